use std::sync::Arc;

use pb::business::{CreateRecordRequest, CreateRecordResponse};

use crate::api::errors::StoreResultExt;
use crate::api::utils::{ApiRequest, Identity};
use crate::database::NewRecord;
use crate::global::ApiGlobal;

#[async_trait::async_trait]
impl ApiRequest<CreateRecordResponse> for tonic::Request<CreateRecordRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<CreateRecordResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;

		tracing::info!(user_id = %user_id, "create record");

		let record = global
			.record_store()
			.insert(NewRecord::from_proto(req, user_id))
			.await
			.into_status("create record")?;

		Ok(tonic::Response::new(CreateRecordResponse {
			success: true,
			data: Some(record.into_proto()),
			message: "Record created successfully".to_string(),
		}))
	}
}
