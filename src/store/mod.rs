//! Profile persistence: a spreadsheet used as an append-only table.

mod endpoint;
mod memory;
mod row;
mod sheets;

use chrono::Utc;
use thiserror::Error;

pub use endpoint::{SubmitEndpoint, SubmitResponse, submit_outcome};
pub use memory::MemoryStore;
pub use row::{COLUMN_COUNT, ProfileRow};
pub use sheets::SheetsStore;

use crate::config::StoreConfig;
use crate::profile::{Approval, Profile, ProfileSubmission, ValidationError};

/// Shown for any failure that is not the visitor's to fix.
pub const GENERIC_FAILURE: &str = "something went wrong. try again.";

/// Backing-store failures.
#[derive(Debug, Error)]
pub enum StoreError {
	/// No spreadsheet is configured.
	#[error("profile store is not configured")]
	NotConfigured,
	/// Appending needs an access token and none was configured.
	#[error("profile store is read-only: no access token configured")]
	ReadOnly,
	/// The request URL could not be built.
	#[error("invalid store url: {0}")]
	Url(String),
	/// Transport or decoding failure.
	#[error("store request failed: {0}")]
	Http(#[from] reqwest::Error),
	/// The API answered with an error status.
	#[error("store returned {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, for the log.
		body: String,
	},
}

/// Why a submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
	/// Required fields were blank. Nothing was sent.
	#[error(transparent)]
	Invalid(#[from] ValidationError),
	/// The submit endpoint refused the input, with text for the visitor.
	#[error("submission rejected: {0}")]
	Rejected(String),
	/// The append failed.
	#[error(transparent)]
	Store(#[from] StoreError),
}

impl SubmitError {
	/// Text for the form. Store details stay in the log.
	pub fn user_message(&self) -> String {
		match self {
			SubmitError::Invalid(err) => err.to_string(),
			SubmitError::Rejected(message) => message.clone(),
			SubmitError::Store(_) => GENERIC_FAILURE.to_string(),
		}
	}
}

/// Row-level access to the table. Only reads of everything and appends are
/// needed.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
	/// Every data row, header excluded, in sheet order.
	async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, StoreError>;

	/// Appends one row after the last.
	async fn append_row(&self, row: &ProfileRow) -> Result<(), StoreError>;
}

/// Profiles from rows whose flag decodes as approved. Other rows are
/// skipped, not reported.
pub fn approved_profiles(rows: &[Vec<String>]) -> Vec<Profile> {
	rows.iter()
		.map(|cells| ProfileRow::from_cells(cells))
		.filter(|row| row.approval == Approval::Approved)
		.map(|row| row.profile)
		.collect()
}

/// Reads the public directory.
pub async fn fetch_profiles(store: &impl ProfileStore) -> Result<Vec<Profile>, StoreError> {
	let rows = store.fetch_rows().await?;
	let profiles = approved_profiles(&rows);
	log::debug!("{} of {} rows approved", profiles.len(), rows.len());
	Ok(profiles)
}

/// Validates and stores a submission. Invalid input never reaches the store.
/// The row is always approved and stamped with this machine's clock, so call
/// it where the input cannot choose either: the submit server.
pub async fn submit_profile(
	store: &impl ProfileStore,
	submission: &ProfileSubmission,
) -> Result<(), SubmitError> {
	let profile = submission.validate()?;
	let row = ProfileRow::new_submission(profile, Utc::now());
	store.append_row(&row).await?;
	log::info!("profile submitted for {}", row.profile.name);
	Ok(())
}

/// Directory contents for the page. Missing configuration and store failures
/// both degrade to an empty directory.
pub async fn load_directory(config: Option<StoreConfig>) -> Vec<Profile> {
	let Some(config) = config else {
		log::warn!("{}; showing an empty directory", StoreError::NotConfigured);
		return Vec::new();
	};
	match fetch_profiles(&SheetsStore::new(config)).await {
		Ok(profiles) => profiles,
		Err(err) => {
			log::warn!("could not load profiles: {err}");
			Vec::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::profile::RequiredField;

	fn row(name: &str, flag: &str) -> Vec<String> {
		let mut cells = vec![String::new(); COLUMN_COUNT];
		cells[0] = name.into();
		cells[1] = "CS".into();
		cells[2] = "2027".into();
		cells[4] = "things".into();
		cells[9] = flag.into();
		cells
	}

	fn submission(building: &str) -> ProfileSubmission {
		ProfileSubmission {
			name: "Jane Smith".into(),
			major: "Computer Science".into(),
			grad_year: "2027".into(),
			building: building.into(),
			..Default::default()
		}
	}

	#[test]
	fn only_exact_true_is_listed() {
		let rows = vec![
			row("approved", "TRUE"),
			row("lowercase", "true"),
			row("blank", ""),
			row("rejected", "FALSE"),
			vec!["truncated".to_string(), "CS".to_string()],
		];
		let names: Vec<String> = approved_profiles(&rows).into_iter().map(|p| p.name).collect();
		assert_eq!(names, vec!["approved"]);
	}

	#[test]
	fn fetch_keeps_sheet_order() {
		let store = MemoryStore::with_rows(vec![
			row("b", "TRUE"),
			row("hidden", "FALSE"),
			row("a", "TRUE"),
		]);
		let profiles = block_on(fetch_profiles(&store)).unwrap();
		let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
		assert_eq!(names, vec!["b", "a"]);
	}

	#[test]
	fn blank_building_is_not_stored() {
		let store = MemoryStore::default();
		let err = block_on(submit_profile(&store, &submission(""))).unwrap_err();
		match &err {
			SubmitError::Invalid(v) => assert_eq!(v.missing, vec![RequiredField::Building]),
			other => panic!("expected validation error, got {other:?}"),
		}
		assert_eq!(err.user_message(), "building description is required.");
		assert!(store.rows().is_empty());
	}

	#[test]
	fn valid_submission_is_appended_and_listed() {
		let store = MemoryStore::default();
		block_on(submit_profile(&store, &submission("learning Rust"))).unwrap();

		let rows = store.rows();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].len(), COLUMN_COUNT);
		assert_eq!(rows[0][9], "TRUE");
		assert!(rows[0][10].ends_with('Z'));

		let listed = block_on(fetch_profiles(&store)).unwrap();
		assert_eq!(listed.len(), 1);
		assert_eq!(listed[0].building, "learning Rust");
	}

	#[test]
	fn store_failures_get_generic_message() {
		let store = MemoryStore::failing();
		let err = block_on(submit_profile(&store, &submission("learning Rust"))).unwrap_err();
		assert!(matches!(err, SubmitError::Store(_)));
		assert_eq!(err.user_message(), GENERIC_FAILURE);
	}

	#[test]
	fn unconfigured_directory_is_empty() {
		assert!(block_on(load_directory(None)).is_empty());
	}
}
