use pb::business::business_service_server::BusinessService;
use pb::business::{
	CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, DeleteRecordResponse, GetBusinessDataRequest,
	GetBusinessDataResponse, GetRecordByIdRequest, GetRecordByIdResponse, GetRecordsRequest, GetRecordsResponse,
	HealthCheckRequest, HealthCheckResponse, UpdateRecordRequest, UpdateRecordResponse,
};

use crate::api::utils::Identity;
use crate::api::BusinessServer;
use crate::config::BusinessConfig;
use crate::tests::global::GlobalState;
use crate::tests::utils::{self, process_request, user};

async fn create(global: &std::sync::Arc<GlobalState>, user_id: &str, title: &str, category: &str) -> u32 {
	let resp: CreateRecordResponse = process_request(
		global,
		&Identity::default(),
		CreateRecordRequest {
			title: title.into(),
			category: category.into(),
			user_id: user_id.into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	resp.data.unwrap().id
}

#[tokio::test]
async fn test_health_check() {
	let (global, handler) = utils::setup(Default::default());

	let resp: HealthCheckResponse = process_request(&global, &Identity::default(), HealthCheckRequest {})
		.await
		.unwrap();

	assert_eq!(resp.status, "healthy");
	assert_eq!(resp.service, "business-grpc");

	utils::teardown(global, handler).await;

	let (global, handler) = utils::setup(BusinessConfig {
		service_name: "records".into(),
		..Default::default()
	});

	let resp: HealthCheckResponse = process_request(&global, &Identity::default(), HealthCheckRequest {})
		.await
		.unwrap();

	assert_eq!(resp.service, "records");

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_create_record() {
	let (global, handler) = utils::setup(Default::default());

	let resp: CreateRecordResponse = process_request(
		&global,
		&Identity::default(),
		CreateRecordRequest {
			title: "Ship release".into(),
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.message, "Record created successfully");

	let record = resp.data.unwrap();
	assert!(record.id > 0);
	assert_eq!(record.status, "active");
	assert_eq!(record.priority, 1);
	assert_eq!(record.user_id, "u1");
	assert!(record.created_at.is_some());
	assert!(record.updated_at.is_some());

	let record: CreateRecordResponse = process_request(
		&global,
		&Identity::default(),
		CreateRecordRequest {
			title: "Rotate keys".into(),
			priority: 4,
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	let record = record.data.unwrap();
	assert_eq!(record.priority, 4);
	assert_eq!(record.status, "active");

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_create_record_uses_identity() {
	let (global, handler) = utils::setup(Default::default());

	let resp: CreateRecordResponse = process_request(
		&global,
		&user("gateway-user"),
		CreateRecordRequest {
			title: "From gateway".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.data.unwrap().user_id, "gateway-user");

	let err = process_request::<_, CreateRecordResponse>(
		&global,
		&Identity::default(),
		CreateRecordRequest {
			title: "Nobody".into(),
			..Default::default()
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::Unauthenticated);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_store_errors_are_internal() {
	let (global, handler) = utils::setup(Default::default());

	global.memory.fail();

	let err = process_request::<_, CreateRecordResponse>(
		&global,
		&user("u1"),
		CreateRecordRequest {
			title: "Ship release".into(),
			..Default::default()
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::Internal);
	assert!(err.message().starts_with("failed to create record"), "{}", err.message());

	let err = process_request::<_, GetRecordsResponse>(&global, &user("u1"), GetRecordsRequest::default())
		.await
		.unwrap_err();

	assert_eq!(err.code(), tonic::Code::Internal);

	let err = process_request::<_, DeleteRecordResponse>(
		&global,
		&user("u1"),
		DeleteRecordRequest {
			id: 1,
			..Default::default()
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::Internal);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_get_business_data() {
	let (global, handler) = utils::setup(Default::default());

	for i in 0..15 {
		create(&global, "u1", &format!("record {i}"), "").await;
	}
	create(&global, "u2", "other", "").await;

	let resp: GetBusinessDataResponse = process_request(
		&global,
		&Identity::default(),
		GetBusinessDataRequest {
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.message, "Data retrieved successfully");
	assert_eq!(resp.total, 10);
	assert_eq!(resp.data.len(), 10);
	assert!(resp.data.iter().all(|r| r.user_id == "u1"));

	let resp: GetBusinessDataResponse = process_request(
		&global,
		&Identity::default(),
		GetBusinessDataRequest {
			user_id: "u1".into(),
			page: 2,
			limit: 4,
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.total, 4);
	assert_eq!(resp.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 6, 7, 8]);

	// a zero limit keeps the offset at zero on every page
	let resp: GetBusinessDataResponse = process_request(
		&global,
		&Identity::default(),
		GetBusinessDataRequest {
			user_id: "u1".into(),
			page: 3,
			limit: 0,
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.data.first().map(|r| r.id), Some(1));

	let err = process_request::<_, GetBusinessDataResponse>(
		&global,
		&Identity::default(),
		GetBusinessDataRequest {
			user_id: "u1".into(),
			page: -1,
			limit: 0,
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::InvalidArgument);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_get_records_pagination() {
	let (global, handler) = utils::setup(Default::default());

	for i in 0..12 {
		create(&global, "u1", &format!("record {i}"), "").await;
	}

	let resp: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			page: 2,
			limit: 5,
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.page, 2);
	assert_eq!(resp.limit, 5);
	assert_eq!(resp.total, 12);
	// newest first, skipping the first five
	assert_eq!(resp.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7, 6, 5, 4, 3]);

	let first: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			page: 0,
			limit: 0,
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(first.page, 1);
	assert_eq!(first.limit, 10);
	assert_eq!(first.data.len(), 10);
	assert_eq!(first.data.first().map(|r| r.id), Some(12));

	let page_one: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			page: 1,
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(page_one.data, first.data);

	let err = process_request::<_, GetRecordsResponse>(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			limit: -5,
			..Default::default()
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::InvalidArgument);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_get_records_filters() {
	let (global, handler) = utils::setup(Default::default());

	let ops = create(&global, "u1", "deploy", "ops").await;
	create(&global, "u1", "hire", "hr").await;
	create(&global, "u2", "deploy elsewhere", "ops").await;

	let resp: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			category: "ops".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.data.len(), 1);
	assert_eq!(resp.data[0].id, ops);
	// the total ignores the category filter
	assert_eq!(resp.total, 2);

	let resp: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			status: "done".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert!(resp.data.is_empty());
	assert_eq!(resp.total, 2);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_soft_deleted_records_are_hidden() {
	let (global, handler) = utils::setup(Default::default());

	let keep = create(&global, "u1", "keep", "").await;
	let gone = create(&global, "u1", "gone", "").await;

	let resp: DeleteRecordResponse = process_request(
		&global,
		&Identity::default(),
		DeleteRecordRequest {
			id: gone,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.message, "Record deleted successfully");
	assert!(global.memory.get(i64::from(gone)).unwrap().deleted_at.is_some());

	let data: GetBusinessDataResponse = process_request(
		&global,
		&Identity::default(),
		GetBusinessDataRequest {
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(data.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![keep]);

	let records: GetRecordsResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordsRequest {
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(records.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![keep]);
	assert_eq!(records.total, 1);

	let err = process_request::<_, GetRecordByIdResponse>(
		&global,
		&Identity::default(),
		GetRecordByIdRequest {
			id: gone,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);

	// deleting twice finds nothing the second time
	let err = process_request::<_, DeleteRecordResponse>(
		&global,
		&Identity::default(),
		DeleteRecordRequest {
			id: gone,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_get_record_by_id() {
	let (global, handler) = utils::setup(Default::default());

	let id = create(&global, "u1", "Ship release", "ops").await;

	let resp: GetRecordByIdResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordByIdRequest {
			id,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.message, "Record retrieved successfully");
	assert_eq!(resp.data.unwrap().title, "Ship release");

	let err = process_request::<_, GetRecordByIdResponse>(
		&global,
		&Identity::default(),
		GetRecordByIdRequest {
			id,
			user_id: "u2".into(),
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);
	assert_eq!(err.message(), "Record not found");

	let err = process_request::<_, GetRecordByIdResponse>(
		&global,
		&Identity::default(),
		GetRecordByIdRequest {
			id: 999,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_update_record() {
	let (global, handler) = utils::setup(Default::default());

	let id = create(&global, "u1", "Ship release", "ops").await;
	let before = global.memory.get(i64::from(id)).unwrap();

	let resp: UpdateRecordResponse = process_request(
		&global,
		&Identity::default(),
		UpdateRecordRequest {
			id,
			user_id: "u1".into(),
			status: "done".into(),
			priority: 0,
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert!(resp.success);
	assert_eq!(resp.message, "Record updated successfully");

	let record = resp.data.unwrap();
	assert_eq!(record.status, "done");
	assert_eq!(record.title, "Ship release");
	assert_eq!(record.category, "ops");
	assert_eq!(record.priority, 1);

	let stored = global.memory.get(i64::from(id)).unwrap();
	assert_eq!(stored.status, "done");
	assert_eq!(stored.title, before.title);
	assert_eq!(stored.priority, before.priority);
	assert!(stored.updated_at > before.updated_at);
	assert_eq!(record.updated_at.and_then(|ts| pb::ext::to_datetime(&ts)), Some(stored.updated_at));

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_update_record_empty_patch() {
	let (global, handler) = utils::setup(Default::default());

	let id = create(&global, "u1", "Ship release", "ops").await;
	let before = global.memory.get(i64::from(id)).unwrap();

	let resp: UpdateRecordResponse = process_request(
		&global,
		&Identity::default(),
		UpdateRecordRequest {
			id,
			user_id: "u1".into(),
			..Default::default()
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.data.unwrap(), before.clone().into_proto());
	assert_eq!(global.memory.get(i64::from(id)).unwrap(), before);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_update_record_other_owner() {
	let (global, handler) = utils::setup(Default::default());

	let id = create(&global, "u1", "Ship release", "ops").await;

	let err = process_request::<_, UpdateRecordResponse>(
		&global,
		&Identity::default(),
		UpdateRecordRequest {
			id,
			user_id: "u2".into(),
			title: "hijacked".into(),
			..Default::default()
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);
	assert_eq!(global.memory.get(i64::from(id)).unwrap().title, "Ship release");

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_delete_record_other_owner() {
	let (global, handler) = utils::setup(Default::default());

	let mut id = 0;
	for i in 0..5 {
		id = create(&global, "u1", &format!("record {i}"), "").await;
	}
	assert_eq!(id, 5);

	let err = process_request::<_, DeleteRecordResponse>(
		&global,
		&Identity::default(),
		DeleteRecordRequest {
			id: 5,
			user_id: "u2".into(),
		},
	)
	.await
	.unwrap_err();

	assert_eq!(err.code(), tonic::Code::NotFound);

	let resp: GetRecordByIdResponse = process_request(
		&global,
		&Identity::default(),
		GetRecordByIdRequest {
			id: 5,
			user_id: "u1".into(),
		},
	)
	.await
	.unwrap();

	assert_eq!(resp.data.unwrap().id, 5);

	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_server_reads_identity_extension() {
	let (global, handler) = utils::setup(Default::default());

	let server = BusinessServer::new(&global);

	let mut request = tonic::Request::new(CreateRecordRequest {
		title: "From headers".into(),
		..Default::default()
	});
	request.extensions_mut().insert(user("u9"));

	let resp = server.create_record(request).await.unwrap().into_inner();
	assert_eq!(resp.data.unwrap().user_id, "u9");

	let err = server
		.get_records(tonic::Request::new(GetRecordsRequest::default()))
		.await
		.unwrap_err();
	assert_eq!(err.code(), tonic::Code::Unauthenticated);

	let health = server
		.health_check(tonic::Request::new(HealthCheckRequest {}))
		.await
		.unwrap()
		.into_inner();
	assert_eq!(health.status, "healthy");

	drop(server);
	utils::teardown(global, handler).await;
}

#[tokio::test]
async fn test_server_global_dropped() {
	let (global, handler) = utils::setup(Default::default());

	let server = BusinessServer::new(&global);
	utils::teardown(global, handler).await;

	let err = server
		.health_check(tonic::Request::new(HealthCheckRequest {}))
		.await
		.unwrap_err();

	assert_eq!(err.code(), tonic::Code::Internal);
}
