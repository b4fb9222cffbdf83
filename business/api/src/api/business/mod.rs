use std::sync::{Arc, Weak};

use pb::business::business_service_server::{BusinessService, BusinessServiceServer};
use pb::business::{
	CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, DeleteRecordResponse, GetBusinessDataRequest,
	GetBusinessDataResponse, GetRecordByIdRequest, GetRecordByIdResponse, GetRecordsRequest, GetRecordsResponse,
	HealthCheckRequest, HealthCheckResponse, UpdateRecordRequest, UpdateRecordResponse,
};
use tonic::{async_trait, Request, Response};

pub(crate) mod create_record;
pub(crate) mod delete_record;
pub(crate) mod get_business_data;
pub(crate) mod get_record_by_id;
pub(crate) mod get_records;
pub(crate) mod health_check;
pub(crate) mod update_record;

use super::utils::{get_global, ApiRequest, Identity};
use crate::global::ApiGlobal;

pub struct BusinessServer<G: ApiGlobal> {
	global: Weak<G>,
}

impl<G: ApiGlobal> BusinessServer<G> {
	pub fn build(global: &Arc<G>) -> BusinessServiceServer<Self> {
		BusinessServiceServer::new(Self::new(global))
	}

	pub(crate) fn new(global: &Arc<G>) -> Self {
		Self {
			global: Arc::downgrade(global),
		}
	}

	async fn handle<T, R>(&self, request: Request<T>) -> tonic::Result<Response<R>>
	where
		Request<T>: ApiRequest<R>,
	{
		let global = get_global(&self.global)?;

		// set by the identity layer, absent when called without it
		let identity = request.extensions().get::<Identity>().cloned().unwrap_or_default();

		request.process(&global, &identity).await
	}
}

#[async_trait]
impl<G: ApiGlobal> BusinessService for BusinessServer<G> {
	async fn health_check(&self, request: Request<HealthCheckRequest>) -> tonic::Result<Response<HealthCheckResponse>> {
		self.handle(request).await
	}

	async fn get_business_data(
		&self,
		request: Request<GetBusinessDataRequest>,
	) -> tonic::Result<Response<GetBusinessDataResponse>> {
		self.handle(request).await
	}

	async fn create_record(&self, request: Request<CreateRecordRequest>) -> tonic::Result<Response<CreateRecordResponse>> {
		self.handle(request).await
	}

	async fn get_records(&self, request: Request<GetRecordsRequest>) -> tonic::Result<Response<GetRecordsResponse>> {
		self.handle(request).await
	}

	async fn get_record_by_id(
		&self,
		request: Request<GetRecordByIdRequest>,
	) -> tonic::Result<Response<GetRecordByIdResponse>> {
		self.handle(request).await
	}

	async fn update_record(&self, request: Request<UpdateRecordRequest>) -> tonic::Result<Response<UpdateRecordResponse>> {
		self.handle(request).await
	}

	async fn delete_record(&self, request: Request<DeleteRecordRequest>) -> tonic::Result<Response<DeleteRecordResponse>> {
		self.handle(request).await
	}
}
