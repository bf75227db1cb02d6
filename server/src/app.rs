use std::path::Path;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use builder_directory::profile::ProfileSubmission;
use builder_directory::store::{
	GENERIC_FAILURE, ProfileStore, SheetsStore, SubmitError, SubmitResponse, submit_profile,
};
use log::{error, info, warn};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::{ServerConfig, TokenSource};

#[derive(Clone)]
pub struct AppState {
	store: SheetsStore,
	token: TokenSource,
}

impl AppState {
	pub fn new(store: SheetsStore, token: TokenSource) -> Self {
		Self { store, token }
	}
}

pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
	let state = AppState::new(SheetsStore::new(config.store.clone()), config.token.clone());
	let app = router(state, &config.dist);

	let listener = TcpListener::bind(config.bind).await?;
	info!("Listening on http://{}", config.bind);
	axum::serve(listener, app).await?;
	Ok(())
}

/// `POST /api/submit`, plus the app bundle for every other path. Unknown
/// paths get `index.html` so client-side routes load.
pub fn router(state: AppState, dist: &Path) -> Router {
	let app = ServeDir::new(dist).not_found_service(ServeFile::new(dist.join("index.html")));
	Router::new()
		.route("/api/submit", post(submit))
		.fallback_service(app)
		.with_state(state)
}

async fn submit(
	State(state): State<AppState>,
	Json(submission): Json<ProfileSubmission>,
) -> (StatusCode, Json<SubmitResponse>) {
	let store = match state.token.current().await {
		Ok(token) => state.store.with_access_token(token),
		Err(err) => {
			error!("access token unreadable: {err}");
			return (
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(SubmitResponse::failed(GENERIC_FAILURE)),
			);
		}
	};
	let (status, body) = store_submission(&store, &submission).await;
	(status, Json(body))
}

/// Validates again, then appends an approved row stamped here. Nothing in
/// the request decides either.
pub async fn store_submission(
	store: &impl ProfileStore,
	submission: &ProfileSubmission,
) -> (StatusCode, SubmitResponse) {
	match submit_profile(store, submission).await {
		Ok(()) => (StatusCode::OK, SubmitResponse::stored()),
		Err(err @ (SubmitError::Invalid(_) | SubmitError::Rejected(_))) => {
			warn!("submission refused: {err}");
			(StatusCode::BAD_REQUEST, SubmitResponse::failed(err.user_message()))
		}
		Err(err) => {
			error!("submission failed: {err}");
			(
				StatusCode::INTERNAL_SERVER_ERROR,
				SubmitResponse::failed(GENERIC_FAILURE),
			)
		}
	}
}

#[cfg(test)]
mod tests {
	use axum::body::{Body, to_bytes};
	use axum::http::{Request, header};
	use builder_directory::config::StoreConfig;
	use builder_directory::store::{MemoryStore, submit_outcome};
	use tower::ServiceExt;

	use super::*;

	fn submission(json: &str) -> ProfileSubmission {
		serde_json::from_str(json).unwrap()
	}

	const VALID: &str = r#"{
		"name": "Jane Smith",
		"major": "Computer Science",
		"gradYear": "2027",
		"building": "learning Rust"
	}"#;

	#[tokio::test]
	async fn valid_submission_is_stored() {
		let store = MemoryStore::default();
		let (status, body) = store_submission(&store, &submission(VALID)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, SubmitResponse::stored());
		assert_eq!(store.rows().len(), 1);
	}

	#[tokio::test]
	async fn request_cannot_set_approval_or_timestamp() {
		let store = MemoryStore::default();
		let forged = submission(
			r#"{
				"name": "Jane Smith",
				"major": "Computer Science",
				"gradYear": "2027",
				"building": "learning Rust",
				"approved": "FALSE",
				"createdAt": "1999-01-01"
			}"#,
		);
		let (status, _) = store_submission(&store, &forged).await;
		assert_eq!(status, StatusCode::OK);

		let rows = store.rows();
		assert_eq!(rows[0][9], "TRUE");
		assert_ne!(rows[0][10], "1999-01-01");
		assert!(rows[0][10].ends_with('Z'));
	}

	#[tokio::test]
	async fn blank_fields_are_refused_with_their_names() {
		let store = MemoryStore::default();
		let (status, body) = store_submission(&store, &submission(r#"{"name": "  "}"#)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(
			body.error.as_deref(),
			Some("name, major, class year and building description are required.")
		);
		assert!(store.rows().is_empty());
	}

	#[tokio::test]
	async fn store_failure_is_generic() {
		let store = MemoryStore::failing();
		let (status, body) = store_submission(&store, &submission(VALID)).await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body.error.as_deref(), Some(GENERIC_FAILURE));
	}

	fn test_router() -> Router {
		// never contacted: every request below fails validation first
		let store = SheetsStore::new(StoreConfig {
			spreadsheet_id: "sheet-123".into(),
			sheet_name: "Sheet1".into(),
			api_key: None,
			access_token: None,
			api_base: "http://127.0.0.1:9".into(),
		});
		router(
			AppState::new(store, TokenSource::Fixed("ya29.test".into())),
			Path::new("dist"),
		)
	}

	#[tokio::test]
	async fn endpoint_answers_validation_text_the_form_can_show() {
		let request = Request::post("/api/submit")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(r#"{"name":"Jane","major":"CS","gradYear":"2027"}"#))
			.unwrap();
		let response = test_router().oneshot(request).await.unwrap();
		let status = response.status();
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body = String::from_utf8(bytes.to_vec()).unwrap();
		let err = submit_outcome(status.as_u16(), &body).unwrap_err();
		assert_eq!(err.user_message(), "building description is required.");
	}

	#[tokio::test]
	async fn malformed_body_never_reaches_the_store() {
		let request = Request::post("/api/submit")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from("{not json"))
			.unwrap();
		let response = test_router().oneshot(request).await.unwrap();
		assert!(response.status().is_client_error());
	}
}
