use std::sync::Arc;

use pb::business::{UpdateRecordRequest, UpdateRecordResponse};
use tonic::Status;

use crate::api::errors::StoreResultExt;
use crate::api::utils::{ApiRequest, Identity};
use crate::database::RecordPatch;
use crate::global::ApiGlobal;

#[async_trait::async_trait]
impl ApiRequest<UpdateRecordResponse> for tonic::Request<UpdateRecordRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<UpdateRecordResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;
		let id = i64::from(req.id);

		tracing::info!(user_id = %user_id, record_id = req.id, "update record");

		let store = global.record_store();

		let mut record = store
			.find_one(id, &user_id)
			.await
			.into_status("find record")?
			.ok_or_else(|| Status::not_found("Record not found"))?;

		let patch = RecordPatch::from_proto(req);

		if !patch.is_empty() {
			// the row can vanish between the read and the write
			record.updated_at = store
				.update(id, &user_id, &patch)
				.await
				.into_status("update record")?
				.ok_or_else(|| Status::not_found("Record not found"))?;

			patch.apply_to(&mut record);
		}

		Ok(tonic::Response::new(UpdateRecordResponse {
			success: true,
			data: Some(record.into_proto()),
			message: "Record updated successfully".to_string(),
		}))
	}
}
