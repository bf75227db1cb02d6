//! Spreadsheet settings.
//!
//! The browser bundle only ever sees read settings, baked in at build time.
//! The access token that allows appending is read by the submit server from
//! its own process environment.

/// Default tab holding the directory rows.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
/// Google Sheets REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
/// Path of the submit endpoint, relative to the page origin.
pub const DEFAULT_SUBMIT_PATH: &str = "/api/submit";

/// Where the directory rows live and how to reach them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
	/// Spreadsheet id from the sheet URL.
	pub spreadsheet_id: String,
	/// Tab name, `Sheet1` unless overridden.
	pub sheet_name: String,
	/// Key for reading a link-shared sheet.
	pub api_key: Option<String>,
	/// OAuth bearer token, needed to append rows. Server side only.
	pub access_token: Option<String>,
	/// API origin, overridable for proxies and tests.
	pub api_base: String,
}

impl StoreConfig {
	/// Read settings for the browser: `DIRECTORY_SHEET_ID`,
	/// `DIRECTORY_SHEET_NAME`, `DIRECTORY_SHEETS_API_KEY` and
	/// `DIRECTORY_SHEETS_API_BASE` as they were when the app was compiled.
	///
	/// `None` means no sheet is configured.
	pub fn from_build_env() -> Option<Self> {
		Self::from_lookup(build_var)
	}

	/// Full settings, token included, from the running process. Used by the
	/// submit server.
	pub fn from_process_env() -> Option<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a config from any key lookup. Values are trimmed and blanks
	/// count as unset.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
		let get = |key: &str| {
			lookup(key)
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
		};

		let spreadsheet_id = get("DIRECTORY_SHEET_ID")?;
		Some(Self {
			spreadsheet_id,
			sheet_name: get("DIRECTORY_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.into()),
			api_key: get("DIRECTORY_SHEETS_API_KEY"),
			access_token: get("DIRECTORY_SHEETS_TOKEN"),
			api_base: get("DIRECTORY_SHEETS_API_BASE")
				.map(|base| base.trim_end_matches('/').to_string())
				.unwrap_or_else(|| DEFAULT_API_BASE.into()),
		})
	}
}

// Only read settings are compiled in. The token never reaches the bundle.
fn build_var(key: &str) -> Option<String> {
	let value = match key {
		"DIRECTORY_SHEET_ID" => option_env!("DIRECTORY_SHEET_ID"),
		"DIRECTORY_SHEET_NAME" => option_env!("DIRECTORY_SHEET_NAME"),
		"DIRECTORY_SHEETS_API_KEY" => option_env!("DIRECTORY_SHEETS_API_KEY"),
		"DIRECTORY_SHEETS_API_BASE" => option_env!("DIRECTORY_SHEETS_API_BASE"),
		_ => None,
	};
	value.map(str::to_string)
}

/// Submit endpoint path, `DIRECTORY_SUBMIT_PATH` at build time or
/// [`DEFAULT_SUBMIT_PATH`]. An absolute URL is allowed too.
pub fn submit_path() -> &'static str {
	option_env!("DIRECTORY_SUBMIT_PATH")
		.map(str::trim)
		.filter(|p| !p.is_empty())
		.unwrap_or(DEFAULT_SUBMIT_PATH)
}
