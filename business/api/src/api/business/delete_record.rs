use std::sync::Arc;

use pb::business::{DeleteRecordRequest, DeleteRecordResponse};
use tonic::Status;

use crate::api::errors::StoreResultExt;
use crate::api::utils::{ApiRequest, Identity};
use crate::global::ApiGlobal;

#[async_trait::async_trait]
impl ApiRequest<DeleteRecordResponse> for tonic::Request<DeleteRecordRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<DeleteRecordResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;

		tracing::info!(user_id = %user_id, record_id = req.id, "delete record");

		let deleted = global
			.record_store()
			.soft_delete(i64::from(req.id), &user_id)
			.await
			.into_status("delete record")?;

		if deleted == 0 {
			return Err(Status::not_found("Record not found"));
		}

		Ok(tonic::Response::new(DeleteRecordResponse {
			success: true,
			message: "Record deleted successfully".to_string(),
		}))
	}
}
