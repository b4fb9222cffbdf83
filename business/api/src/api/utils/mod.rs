pub mod identity;
pub mod logging;
pub mod pagination;

use std::sync::{Arc, Weak};

pub use identity::{Identity, IdentityLayer};
pub use logging::RequestLogLayer;

use crate::global::ApiGlobal;

#[async_trait::async_trait]
pub trait ApiRequest<R> {
	async fn process<G: ApiGlobal>(&self, global: &Arc<G>, identity: &Identity) -> tonic::Result<tonic::Response<R>>;
}

pub fn get_global<G: ApiGlobal>(global: &Weak<G>) -> tonic::Result<Arc<G>> {
	global
		.upgrade()
		.ok_or_else(|| tonic::Status::internal("global state was dropped"))
}
