use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::select;
use tonic::transport::Server;

use crate::api::utils::{IdentityLayer, RequestLogLayer};
use crate::global::ApiGlobal;

pub(crate) mod business;
pub(crate) mod errors;
pub(crate) mod utils;

pub use business::BusinessServer;

pub async fn run<G: ApiGlobal>(global: Arc<G>, bind_address: SocketAddr) -> anyhow::Result<()> {
	tracing::info!("gRPC listening on {}", bind_address);

	let server = Server::builder()
		.layer(RequestLogLayer)
		.layer(IdentityLayer)
		.add_service(BusinessServer::<G>::build(&global))
		.serve_with_shutdown(bind_address, async {
			global.ctx().done().await;
		});

	select! {
		_ = global.ctx().done() => {},
		r = server => r.context("grpc server failed")?,
	}

	Ok(())
}
