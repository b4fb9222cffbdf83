use std::sync::Arc;

use pb::business::{GetRecordsRequest, GetRecordsResponse};

use crate::api::errors::StoreResultExt;
use crate::api::utils::pagination::Page;
use crate::api::utils::{ApiRequest, Identity};
use crate::database::BusinessRecord;
use crate::global::ApiGlobal;
use crate::store::RecordQuery;

fn filter(value: &str) -> Option<String> {
	(!value.is_empty()).then(|| value.to_string())
}

#[async_trait::async_trait]
impl ApiRequest<GetRecordsResponse> for tonic::Request<GetRecordsRequest> {
	async fn process<G: ApiGlobal>(
		&self,
		global: &Arc<G>,
		identity: &Identity,
	) -> tonic::Result<tonic::Response<GetRecordsResponse>> {
		let req = self.get_ref();
		let user_id = identity.resolve_user_id(&req.user_id)?;

		tracing::info!(user_id = %user_id, "get records");

		let page = Page::new(req.page, req.limit)?;

		let store = global.record_store();

		let records = store
			.find(&RecordQuery {
				user_id: user_id.clone(),
				category: filter(&req.category),
				status: filter(&req.status),
				limit: i64::from(page.limit),
				offset: page.offset(),
				newest_first: true,
			})
			.await
			.into_status("fetch records")?;

		// counts every live record of the user, the category and status
		// filters are not applied
		let total = store.count(&user_id).await.into_status("count records")?;

		Ok(tonic::Response::new(GetRecordsResponse {
			success: true,
			data: records.into_iter().map(BusinessRecord::into_proto).collect(),
			total,
			page: page.page,
			limit: page.limit,
		}))
	}
}
