use std::net::SocketAddr;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::logging;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,

	/// Maximum number of pooled connections
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://root@localhost:5432/business_db".to_string(),
			max_connections: 10,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct GrpcConfig {
	/// The bind address for the gRPC server
	pub bind_address: SocketAddr,
}

impl Default for GrpcConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0], 9090)),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse yaml config {path}: {source}")]
	Yaml {
		path: String,
		#[source]
		source: serde_yaml::Error,
	},
	#[error("failed to parse toml config {path}: {source}")]
	Toml {
		path: String,
		#[source]
		source: toml::de::Error,
	},
}

impl ConfigError {
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Io { .. })
	}
}

/// Reads a config file, picking the format from the extension. Anything that
/// is not `.toml` is read as YAML (which also covers JSON).
pub fn parse_file<C: DeserializeOwned>(path: impl AsRef<Path>) -> Result<C, ConfigError> {
	let path = path.as_ref();
	let display = path.display().to_string();

	let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: display.clone(),
		source,
	})?;

	if path.extension().is_some_and(|ext| ext == "toml") {
		toml::from_str(&contents).map_err(|source| ConfigError::Toml { path: display, source })
	} else {
		serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml { path: display, source })
	}
}

/// Loads `path` if given. A missing file is only an error when `required` is
/// set, otherwise the defaults are used.
pub fn load<C: DeserializeOwned + Default>(path: Option<&str>, required: bool) -> Result<(C, Option<String>), ConfigError> {
	let Some(path) = path else {
		return Ok((C::default(), None));
	};

	match parse_file(path) {
		Ok(config) => Ok((
			config,
			Some(
				std::fs::canonicalize(path)
					.map(|p| p.display().to_string())
					.unwrap_or_else(|_| path.to_string()),
			),
		)),
		Err(err) if err.is_io() && !required => {
			tracing::debug!("failed to load config file: {}", err);
			Ok((C::default(), None))
		}
		Err(err) => Err(err),
	}
}
