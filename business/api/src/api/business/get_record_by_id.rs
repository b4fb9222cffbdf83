use std::sync::Arc;

use pb::business::{GetRecordByIdRequest, GetRecordByIdResponse};
use tonic::Status;

use crate::api::errors::StoreResultExt;
use crate::api::utils::{ApiRequest, Identity};
use crate::global::ApiGlobal;

#[async_trait::async_trait]
impl ApiRequest<GetRecordByIdResponse> for tonic::Request<GetRecordByIdRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<GetRecordByIdResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;

		tracing::info!(user_id = %user_id, record_id = req.id, "get record by id");

		let record = global
			.record_store()
			.find_one(i64::from(req.id), &user_id)
			.await
			.into_status("fetch record")?
			.ok_or_else(|| Status::not_found("Record not found"))?;

		Ok(tonic::Response::new(GetRecordByIdResponse {
			success: true,
			data: Some(record.into_proto()),
			message: "Record retrieved successfully".to_string(),
		}))
	}
}
