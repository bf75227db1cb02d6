//! Google Sheets v4 `values` API.
//!
//! Reads use `GET /v4/spreadsheets/{id}/values/{sheet}!A2:K` (row 1 is the
//! header). Appends use `POST .../values/{sheet}!A:K:append` with
//! `valueInputOption=RAW` and a bearer token.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::json;

use super::{ProfileRow, ProfileStore, StoreError};
use crate::config::StoreConfig;

#[derive(Debug, Deserialize)]
struct ValueRange {
	// absent when the range is empty
	#[serde(default)]
	values: Vec<Vec<String>>,
}

/// A [`ProfileStore`] backed by one tab of a Google spreadsheet.
#[derive(Clone, Debug)]
pub struct SheetsStore {
	client: Client,
	config: StoreConfig,
}

impl SheetsStore {
	/// A store for the configured sheet.
	pub fn new(config: StoreConfig) -> Self {
		Self {
			client: Client::new(),
			config,
		}
	}

	/// The same sheet and connection pool, writing with `token`.
	pub fn with_access_token(&self, token: impl Into<String>) -> Self {
		let mut config = self.config.clone();
		config.access_token = Some(token.into());
		Self {
			client: self.client.clone(),
			config,
		}
	}

	fn values_url(&self, range: &str) -> Result<Url, StoreError> {
		let mut url = Url::parse(&self.config.api_base).map_err(|e| StoreError::Url(e.to_string()))?;
		url.path_segments_mut()
			.map_err(|_| StoreError::Url(format!("{} cannot be a base", self.config.api_base)))?
			.pop_if_empty()
			.extend(["v4", "spreadsheets", self.config.spreadsheet_id.as_str(), "values", range]);
		if let Some(key) = &self.config.api_key {
			url.query_pairs_mut().append_pair("key", key);
		}
		Ok(url)
	}

	fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
		match &self.config.access_token {
			Some(token) => request.bearer_auth(token),
			None => request,
		}
	}
}

async fn check(response: Response) -> Result<Response, StoreError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}
	let body = response.text().await.unwrap_or_default();
	Err(StoreError::Status {
		status: status.as_u16(),
		body,
	})
}

impl ProfileStore for SheetsStore {
	async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
		let url = self.values_url(&format!("{}!A2:K", self.config.sheet_name))?;
		let response = self.authorized(self.client.get(url)).send().await?;
		let range: ValueRange = check(response).await?.json().await?;
		Ok(range.values)
	}

	async fn append_row(&self, row: &ProfileRow) -> Result<(), StoreError> {
		if self.config.access_token.is_none() {
			return Err(StoreError::ReadOnly);
		}
		let mut url = self.values_url(&format!("{}!A:K:append", self.config.sheet_name))?;
		url.query_pairs_mut()
			.append_pair("valueInputOption", "RAW")
			.append_pair("insertDataOption", "INSERT_ROWS");
		let body = json!({ "values": [row.to_cells()] });
		let response = self
			.authorized(self.client.post(url))
			.json(&body)
			.send()
			.await?;
		check(response).await?;
		Ok(())
	}
}
