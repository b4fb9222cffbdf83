use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use common::context::Context;
use common::{logging, signal};
use tokio::select;
use tokio::signal::unix::SignalKind;
pub use traits::{Config, Global};

pub mod config;
pub mod global;
pub mod traits;

/// Parses the config, installs logging, builds the global state and then
/// drives `process` until it stops or the process receives SIGINT/SIGTERM.
///
/// After that every task sharing the root [`Context`] is cancelled and given
/// up to 60 seconds to finish. A second signal forces the shutdown.
pub async fn bootstrap<C: Config, G: Global<C>, F: Future<Output = anyhow::Result<()>> + Send + 'static>(
	process: impl FnOnce(Arc<G>) -> F,
) -> anyhow::Result<()> {
	let (ctx, handler) = Context::new();

	let config = C::parse()
		.and_then(|mut config| {
			config.pre_hook()?;
			Ok(config)
		})
		.map_err(|err| {
			// best effort so the error below is visible
			let _ = logging::init("info", Default::default());
			err
		})
		.context("failed to parse config")?;

	logging::init(&config.logging().level, config.logging().mode).context("failed to init logging")?;

	tracing::info!(name = config.name(), "starting up");

	let global = Arc::new(G::new(ctx, config).await.context("failed to create global state")?);

	tracing::debug!("global state created, starting process");

	let process_future = tokio::spawn(process(global));

	let mut signal_handler = signal::SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.and_then(|handler| handler.with_signal(SignalKind::terminate()))
		.context("failed to install signal handlers")?;

	let result = select! {
		_ = signal_handler.recv() => {
			tracing::info!("shutting down");
			Ok(())
		},
		r = process_future => match r {
			Ok(Ok(())) => {
				tracing::info!("process stopped");
				Ok(())
			}
			Ok(Err(err)) => {
				tracing::error!("process stopped unexpectedly: {:#}", err);
				Err(err)
			}
			Err(err) => {
				tracing::error!("process panicked: {}", err);
				Err(anyhow::anyhow!(err).context("process panicked"))
			}
		},
	};

	tracing::info!("waiting for tasks to finish");

	select! {
		r = tokio::time::timeout(Duration::from_secs(60), handler.cancel()) => {
			if r.is_err() {
				tracing::warn!("force shutting down");
			} else {
				tracing::info!("shutdown complete");
			}
		},
		_ = signal_handler.recv() => tracing::warn!("force shutting down"),
	}

	result
}
