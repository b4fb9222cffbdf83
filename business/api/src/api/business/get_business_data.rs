use std::sync::Arc;

use pb::business::{GetBusinessDataRequest, GetBusinessDataResponse};

use crate::api::errors::StoreResultExt;
use crate::api::utils::pagination::raw_window;
use crate::api::utils::{ApiRequest, Identity};
use crate::database::BusinessRecord;
use crate::global::ApiGlobal;
use crate::store::RecordQuery;

#[async_trait::async_trait]
impl ApiRequest<GetBusinessDataResponse> for tonic::Request<GetBusinessDataRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<GetBusinessDataResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;

		tracing::info!(user_id = %user_id, "get business data");

		let (limit, offset) = raw_window(req.page, req.limit)?;

		let records = global
			.record_store()
			.find(&RecordQuery {
				user_id,
				limit,
				offset,
				..Default::default()
			})
			.await
			.into_status("fetch business data")?;

		Ok(tonic::Response::new(GetBusinessDataResponse {
			success: true,
			total: records.len() as i32,
			data: records.into_iter().map(BusinessRecord::into_proto).collect(),
			message: "Data retrieved successfully".to_string(),
		}))
	}
}
