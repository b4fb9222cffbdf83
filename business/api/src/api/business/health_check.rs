use std::sync::Arc;

use pb::business::{HealthCheckRequest, HealthCheckResponse};

use crate::api::utils::{ApiRequest, Identity};
use crate::config::BusinessConfig;
use crate::global::ApiGlobal;

pub const HEALTHY: &str = "healthy";

#[async_trait::async_trait]
impl ApiRequest<HealthCheckResponse> for tonic::Request<HealthCheckRequest> {
	async fn process<G: ApiGlobal>(&self, global: &Arc<G>, _: &Identity) -> tonic::Result<tonic::Response<HealthCheckResponse>> {
		Ok(tonic::Response::new(HealthCheckResponse {
			status: HEALTHY.to_string(),
			service: global.config::<BusinessConfig>().service_name.clone(),
		}))
	}
}
