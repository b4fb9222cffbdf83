use std::sync::Arc;

use anyhow::Context as _;
use binary_helper::global::setup_database;
use binary_helper::{bootstrap, impl_global_traits};
use business_api::config::BusinessConfig;
use business_api::store::{PgRecordStore, RecordStore};
use common::context::Context;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
struct ExtConfig {
	/// The business service configuration.
	business: BusinessConfig,
}

impl binary_helper::config::ConfigExtention for ExtConfig {
	const APP_NAME: &'static str = "business-grpc";
}

type AppConfig = binary_helper::config::AppConfig<ExtConfig>;

struct GlobalState {
	ctx: Context,
	config: AppConfig,
	record_store: Arc<dyn RecordStore>,
}

impl_global_traits!(GlobalState);

impl binary_helper::global::GlobalConfigProvider<BusinessConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &BusinessConfig {
		&self.config.extra.business
	}
}

impl business_api::global::ApiState for GlobalState {
	#[inline(always)]
	fn record_store(&self) -> &Arc<dyn RecordStore> {
		&self.record_store
	}
}

impl binary_helper::Global<AppConfig> for GlobalState {
	async fn new(ctx: Context, config: AppConfig) -> anyhow::Result<Self> {
		let db = setup_database(&config.database).await?;

		tracing::info!("connected to database");

		if config.extra.business.run_migrations {
			sqlx::migrate!("./migrations")
				.run(db.as_ref())
				.await
				.context("failed to run migrations")?;

			tracing::info!("database migrations applied");
		}

		let record_store = Arc::new(PgRecordStore::new(db));

		Ok(Self {
			ctx,
			config,
			record_store,
		})
	}
}

#[tokio::main]
pub async fn main() {
	if let Err(err) = bootstrap::<AppConfig, GlobalState, _>(|global| async move {
		if let Some(file) = &global.config.config_file {
			tracing::info!(file = file, "loaded config from file");
		}

		tracing::info!("authentication is handled by the upstream gateway, trusting identity headers");

		let bind_address = global.config.grpc.bind_address;

		business_api::api::run(global, bind_address)
			.await
			.context("grpc server stopped unexpectedly")
	})
	.await
	{
		tracing::error!("{:#}", err);
		std::process::exit(1);
	}
}
