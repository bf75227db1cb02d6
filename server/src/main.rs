//! Submit endpoint and static host for the builder directory.
//!
//! Holds the sheet credentials so the browser never does. Configured from
//! the process environment: `DIRECTORY_SHEET_ID`, `DIRECTORY_SHEET_NAME`,
//! `DIRECTORY_SHEETS_TOKEN` or `DIRECTORY_SHEETS_TOKEN_FILE`,
//! `DIRECTORY_SHEETS_API_BASE`, `DIRECTORY_BIND` and `DIRECTORY_DIST`.

mod app;
mod config;

use log::info;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	info!("=== builder-directory server starting ===");

	let config = ServerConfig::from_env()?;
	info!(
		"appending to sheet {} tab {:?}, serving {}",
		config.store.spreadsheet_id,
		config.store.sheet_name,
		config.dist.display()
	);
	app::run(config).await
}
