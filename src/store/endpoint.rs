//! The submit endpoint, seen from both sides.
//!
//! The browser POSTs a [`ProfileSubmission`] as JSON. The server answers
//! `200` with `{"success": true}`, `400` with the validation text in `error`,
//! or `500` with the generic failure text.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::{GENERIC_FAILURE, StoreError, SubmitError};
use crate::profile::ProfileSubmission;

/// Body of every submit response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
	/// Whether the row was stored.
	#[serde(default)]
	pub success: bool,
	/// Text to show the visitor when it was not.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl SubmitResponse {
	/// The row was stored.
	pub fn stored() -> Self {
		Self {
			success: true,
			error: None,
		}
	}

	/// Nothing was stored, for the reason given.
	pub fn failed(message: impl Into<String>) -> Self {
		Self {
			success: false,
			error: Some(message.into()),
		}
	}
}

/// Reads a submit response. `400` carries the server's validation text; any
/// other failure is a store error and gets the generic message in the form.
pub fn submit_outcome(status: u16, body: &str) -> Result<(), SubmitError> {
	if (200..300).contains(&status) {
		return Ok(());
	}
	if status == 400 {
		let message = serde_json::from_str::<SubmitResponse>(body)
			.ok()
			.and_then(|r| r.error)
			.filter(|m| !m.trim().is_empty())
			.unwrap_or_else(|| GENERIC_FAILURE.to_string());
		return Err(SubmitError::Rejected(message));
	}
	Err(SubmitError::Store(StoreError::Status {
		status,
		body: body.to_string(),
	}))
}

/// Client for the submit endpoint.
#[derive(Clone, Debug)]
pub struct SubmitEndpoint {
	client: Client,
	url: Url,
}

impl SubmitEndpoint {
	/// Resolves `path` against the page `origin`. An absolute `path` wins.
	pub fn new(origin: &str, path: &str) -> Result<Self, StoreError> {
		let url = Url::parse(origin)
			.and_then(|base| base.join(path))
			.map_err(|e| StoreError::Url(format!("{origin} + {path}: {e}")))?;
		Ok(Self {
			client: Client::new(),
			url,
		})
	}

	/// Where submissions are sent.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Sends one submission. Validation happens again on the server, so a
	/// `400` can still come back for input the form accepted.
	pub async fn submit(&self, submission: &ProfileSubmission) -> Result<(), SubmitError> {
		let response = self
			.client
			.post(self.url.clone())
			.json(submission)
			.send()
			.await
			.map_err(StoreError::from)?;
		let status = response.status().as_u16();
		let body = response.text().await.unwrap_or_default();
		submit_outcome(status, &body)
	}
}
