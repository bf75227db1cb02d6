use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use builder_directory::config::StoreConfig;
use thiserror::Error;

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_DIST: &str = "dist";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("DIRECTORY_SHEET_ID is not set")]
	MissingSheet,
	#[error("set DIRECTORY_SHEETS_TOKEN or DIRECTORY_SHEETS_TOKEN_FILE so rows can be appended")]
	MissingToken,
	#[error("DIRECTORY_BIND {value:?} is not a socket address: {source}")]
	Bind {
		value: String,
		#[source]
		source: AddrParseError,
	},
}

/// Where the append token comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenSource {
	Fixed(String),
	/// Re-read on every submission, so whatever refreshes the file rotates
	/// the token without a restart.
	File(PathBuf),
}

impl TokenSource {
	pub async fn current(&self) -> std::io::Result<String> {
		match self {
			TokenSource::Fixed(token) => Ok(token.clone()),
			TokenSource::File(path) => Ok(tokio::fs::read_to_string(path).await?.trim().to_string()),
		}
	}
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
	pub store: StoreConfig,
	pub token: TokenSource,
	pub bind: SocketAddr,
	/// Trunk output served for every non-API path.
	pub dist: PathBuf,
}

impl ServerConfig {
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let get = |key: &str| {
			lookup(key)
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
		};

		let store = StoreConfig::from_lookup(&lookup).ok_or(ConfigError::MissingSheet)?;
		let token = match (get("DIRECTORY_SHEETS_TOKEN_FILE"), &store.access_token) {
			(Some(path), _) => TokenSource::File(PathBuf::from(path)),
			(None, Some(token)) => TokenSource::Fixed(token.clone()),
			(None, None) => return Err(ConfigError::MissingToken),
		};

		let bind_value = get("DIRECTORY_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
		let bind = bind_value.parse().map_err(|source| ConfigError::Bind {
			value: bind_value.clone(),
			source,
		})?;

		Ok(Self {
			store,
			token,
			bind,
			dist: PathBuf::from(get("DIRECTORY_DIST").unwrap_or_else(|| DEFAULT_DIST.to_string())),
		})
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn config(vars: &[(&'static str, &'static str)]) -> Result<ServerConfig, ConfigError> {
		let vars: HashMap<&str, &str> = vars.iter().copied().collect();
		ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
	}

	#[test]
	fn sheet_and_token_are_required() {
		assert!(matches!(config(&[]), Err(ConfigError::MissingSheet)));
		assert!(matches!(
			config(&[("DIRECTORY_SHEET_ID", "abc")]),
			Err(ConfigError::MissingToken)
		));
	}

	#[test]
	fn defaults_fill_in() {
		let cfg = config(&[("DIRECTORY_SHEET_ID", "abc"), ("DIRECTORY_SHEETS_TOKEN", " ya29 ")]).unwrap();
		assert_eq!(cfg.token, TokenSource::Fixed("ya29".into()));
		assert_eq!(cfg.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
		assert_eq!(cfg.dist, PathBuf::from("dist"));
	}

	#[test]
	fn token_file_wins_over_fixed_token() {
		let cfg = config(&[
			("DIRECTORY_SHEET_ID", "abc"),
			("DIRECTORY_SHEETS_TOKEN", "stale"),
			("DIRECTORY_SHEETS_TOKEN_FILE", "/run/secrets/sheets-token"),
			("DIRECTORY_BIND", "0.0.0.0:8080"),
		])
		.unwrap();
		assert_eq!(cfg.token, TokenSource::File("/run/secrets/sheets-token".into()));
		assert_eq!(cfg.bind.port(), 8080);
	}

	#[test]
	fn bad_bind_address_is_reported() {
		let err = config(&[
			("DIRECTORY_SHEET_ID", "abc"),
			("DIRECTORY_SHEETS_TOKEN", "t"),
			("DIRECTORY_BIND", "localhost"),
		])
		.unwrap_err();
		assert!(err.to_string().contains("\"localhost\""), "{err}");
	}

	#[tokio::test]
	async fn token_file_is_read_fresh() {
		let path = std::env::temp_dir().join(format!("sheets-token-{}", std::process::id()));
		let source = TokenSource::File(path.clone());

		tokio::fs::write(&path, "first\n").await.unwrap();
		assert_eq!(source.current().await.unwrap(), "first");
		tokio::fs::write(&path, "second").await.unwrap();
		assert_eq!(source.current().await.unwrap(), "second");

		tokio::fs::remove_file(&path).await.unwrap();
		assert!(source.current().await.is_err());
	}
}
