use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context as _;
use common::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;

#[macro_export]
macro_rules! impl_global_traits {
	($struct:ty) => {
		impl binary_helper::global::GlobalCtx for $struct {
			#[inline(always)]
			fn ctx(&self) -> &common::context::Context {
				&self.ctx
			}
		}

		impl binary_helper::global::GlobalConfig for $struct {}
	};
}

pub trait GlobalCtx {
	fn ctx(&self) -> &common::context::Context;
}

pub trait GlobalConfig {
	#[inline(always)]
	fn config<C>(&self) -> &C
	where
		Self: GlobalConfigProvider<C>,
	{
		GlobalConfigProvider::provide_config(self)
	}
}

pub trait GlobalConfigProvider<C> {
	fn provide_config(&self) -> &C;
}

pub async fn setup_database(config: &DatabaseConfig) -> anyhow::Result<Arc<sqlx::PgPool>> {
	let options = PgConnectOptions::from_str(&config.uri)
		.context("invalid database uri")?
		.disable_statement_logging();

	let pool = PgPoolOptions::new()
		.max_connections(config.max_connections)
		.connect_with(options)
		.await
		.context("failed to connect to database")?;

	Ok(Arc::new(pool))
}
