use std::net::SocketAddr;

use anyhow::Context as _;
use common::config::{DatabaseConfig, GrpcConfig, LoggingConfig};
use common::logging::Mode;
use serde::de::DeserializeOwned;

use super::Config;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig<T: ConfigExtention> {
	/// The name of the application
	pub name: String,

	/// The path to the config file
	pub config_file: Option<String>,

	/// The logging configuration
	pub logging: LoggingConfig,

	/// The gRPC configuration
	pub grpc: GrpcConfig,

	/// The database configuration
	pub database: DatabaseConfig,

	#[serde(flatten)]
	pub extra: T,
}

pub trait ConfigExtention: Default {
	const APP_NAME: &'static str;

	fn config_default() -> AppConfig<Self> {
		AppConfig {
			name: Self::APP_NAME.to_owned(),
			config_file: Some("config.yaml".to_owned()),
			logging: Default::default(),
			grpc: Default::default(),
			database: Default::default(),
			extra: Self::default(),
		}
	}

	fn pre_hook(_config: &mut AppConfig<Self>) -> anyhow::Result<()> {
		Ok(())
	}
}

impl<T: ConfigExtention> Default for AppConfig<T> {
	fn default() -> Self {
		T::config_default()
	}
}

/// Command line flags. Every flag also reads an environment variable, so the
/// effective precedence is flag, then environment, then config file, then
/// the built-in default.
#[derive(Debug, Default, Clone, clap::Parser)]
#[command(version, about)]
pub struct Cli {
	/// Path to a YAML or TOML config file
	#[arg(long, env = "BUSINESS_CONFIG_FILE")]
	pub config_file: Option<String>,

	/// Name of this instance
	#[arg(long, env = "BUSINESS_NAME")]
	pub name: Option<String>,

	/// Tracing env filter, e.g. `info` or `business_api=debug`
	#[arg(long, env = "BUSINESS_LOG_LEVEL")]
	pub log_level: Option<String>,

	/// One of default, json, pretty or compact
	#[arg(long, env = "BUSINESS_LOG_MODE")]
	pub log_mode: Option<String>,

	/// Database connection string
	#[arg(long, env = "DATABASE_URL", hide_env_values = true)]
	pub database_url: Option<String>,

	/// Port for the gRPC server, an empty value keeps the configured port
	#[arg(long, env = "GRPC_PORT")]
	pub grpc_port: Option<String>,

	/// Full bind address for the gRPC server, the port may still be replaced
	/// by `--grpc-port`
	#[arg(long, env = "BUSINESS_GRPC_BIND_ADDRESS")]
	pub grpc_bind_address: Option<SocketAddr>,
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

impl Cli {
	pub fn apply<T: ConfigExtention>(self, config: &mut AppConfig<T>) -> anyhow::Result<()> {
		if let Some(name) = non_empty(self.name) {
			config.name = name;
		}

		if let Some(level) = non_empty(self.log_level) {
			config.logging.level = level;
		}

		if let Some(mode) = non_empty(self.log_mode) {
			config.logging.mode = mode.parse::<Mode>().context("invalid log mode")?;
		}

		if let Some(uri) = non_empty(self.database_url) {
			config.database.uri = uri;
		}

		if let Some(bind_address) = self.grpc_bind_address {
			config.grpc.bind_address = bind_address;
		}

		if let Some(port) = non_empty(self.grpc_port) {
			config.grpc.bind_address.set_port(port.parse().context("invalid grpc port")?);
		}

		Ok(())
	}
}

impl<T: ConfigExtention + DeserializeOwned> AppConfig<T> {
	pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
		let required = non_empty(cli.config_file.clone());
		let path = required.clone().or_else(|| Self::default().config_file);

		let (mut config, config_file) =
			common::config::load::<Self>(path.as_deref(), required.is_some()).context("failed to load config file")?;

		config.config_file = config_file;

		cli.apply(&mut config)?;

		Ok(config)
	}
}

impl<T: ConfigExtention + DeserializeOwned> Config for AppConfig<T> {
	fn logging(&self) -> &LoggingConfig {
		&self.logging
	}

	fn parse() -> anyhow::Result<Self>
	where
		Self: Sized,
	{
		let cli = if cfg!(test) {
			Cli::default()
		} else {
			<Cli as clap::Parser>::parse()
		};

		Self::from_cli(cli)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn pre_hook(&mut self) -> anyhow::Result<()> {
		T::pre_hook(self)
	}
}
