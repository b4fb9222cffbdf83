use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use super::{RecordQuery, RecordStore, StoreError};
use crate::database::{BusinessRecord, DatabaseTable, NewRecord, RecordPatch};

pub struct PgRecordStore {
	db: Arc<sqlx::PgPool>,
}

impl PgRecordStore {
	pub fn new(db: Arc<sqlx::PgPool>) -> Self {
		Self { db }
	}
}

pub(crate) fn insert_query(record: NewRecord) -> QueryBuilder<'static, Postgres> {
	let mut qb = QueryBuilder::default();

	qb.push("INSERT INTO ").push(BusinessRecord::NAME).push(" (");

	let mut seperated = qb.separated(",");

	seperated.push("title");
	seperated.push("description");
	seperated.push("category");
	seperated.push("status");
	seperated.push("priority");
	seperated.push("user_id");
	seperated.push("metadata");

	qb.push(") VALUES (");

	let mut seperated = qb.separated(",");

	seperated.push_bind(record.title);
	seperated.push_bind(record.description);
	seperated.push_bind(record.category);
	seperated.push_bind(record.status);
	seperated.push_bind(record.priority);
	seperated.push_bind(record.user_id);
	seperated.push_bind(record.metadata);

	qb.push(") RETURNING *");

	qb
}

pub(crate) fn find_query(query: &RecordQuery) -> QueryBuilder<'static, Postgres> {
	let mut qb = QueryBuilder::default();

	qb.push("SELECT * FROM ").push(BusinessRecord::NAME).push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated.push("user_id = ");
	seperated.push_bind_unseparated(query.user_id.clone());
	seperated.push("deleted_at IS NULL");

	if let Some(category) = &query.category {
		seperated.push("category = ");
		seperated.push_bind_unseparated(category.clone());
	}

	if let Some(status) = &query.status {
		seperated.push("status = ");
		seperated.push_bind_unseparated(status.clone());
	}

	if query.newest_first {
		qb.push(" ORDER BY created_at DESC");
	}

	qb.push(" LIMIT ").push_bind(query.limit);

	if query.offset > 0 {
		qb.push(" OFFSET ").push_bind(query.offset);
	}

	qb
}

pub(crate) fn count_query(user_id: &str) -> QueryBuilder<'static, Postgres> {
	let mut qb = QueryBuilder::default();

	qb.push("SELECT COUNT(*) FROM ")
		.push(BusinessRecord::NAME)
		.push(" WHERE user_id = ")
		.push_bind(user_id.to_string())
		.push(" AND deleted_at IS NULL");

	qb
}

pub(crate) fn find_one_query(id: i64, user_id: &str) -> QueryBuilder<'static, Postgres> {
	let mut qb = QueryBuilder::default();

	qb.push("SELECT * FROM ")
		.push(BusinessRecord::NAME)
		.push(" WHERE id = ")
		.push_bind(id)
		.push(" AND user_id = ")
		.push_bind(user_id.to_string())
		.push(" AND deleted_at IS NULL");

	qb
}

/// Returns `None` for an empty patch, there is nothing to write.
pub(crate) fn update_query(id: i64, user_id: &str, patch: &RecordPatch) -> Option<QueryBuilder<'static, Postgres>> {
	if patch.is_empty() {
		return None;
	}

	let mut qb = QueryBuilder::default();

	qb.push("UPDATE ").push(BusinessRecord::NAME).push(" SET ");

	let mut seperated = qb.separated(", ");

	if let Some(title) = &patch.title {
		seperated.push("title = ");
		seperated.push_bind_unseparated(title.clone());
	}

	if let Some(description) = &patch.description {
		seperated.push("description = ");
		seperated.push_bind_unseparated(description.clone());
	}

	if let Some(category) = &patch.category {
		seperated.push("category = ");
		seperated.push_bind_unseparated(category.clone());
	}

	if let Some(status) = &patch.status {
		seperated.push("status = ");
		seperated.push_bind_unseparated(status.clone());
	}

	if let Some(priority) = patch.priority {
		seperated.push("priority = ");
		seperated.push_bind_unseparated(priority);
	}

	if let Some(metadata) = &patch.metadata {
		seperated.push("metadata = ");
		seperated.push_bind_unseparated(metadata.clone());
	}

	seperated.push("updated_at = NOW()");

	qb.push(" WHERE id = ")
		.push_bind(id)
		.push(" AND user_id = ")
		.push_bind(user_id.to_string())
		.push(" AND deleted_at IS NULL RETURNING updated_at");

	Some(qb)
}

pub(crate) fn delete_query(id: i64, user_id: &str) -> QueryBuilder<'static, Postgres> {
	let mut qb = QueryBuilder::default();

	qb.push("UPDATE ")
		.push(BusinessRecord::NAME)
		.push(" SET deleted_at = NOW() WHERE id = ")
		.push_bind(id)
		.push(" AND user_id = ")
		.push_bind(user_id.to_string())
		.push(" AND deleted_at IS NULL");

	qb
}

#[async_trait::async_trait]
impl RecordStore for PgRecordStore {
	async fn insert(&self, record: NewRecord) -> Result<BusinessRecord, StoreError> {
		Ok(insert_query(record).build_query_as().fetch_one(self.db.as_ref()).await?)
	}

	async fn find(&self, query: &RecordQuery) -> Result<Vec<BusinessRecord>, StoreError> {
		Ok(find_query(query).build_query_as().fetch_all(self.db.as_ref()).await?)
	}

	async fn count(&self, user_id: &str) -> Result<i64, StoreError> {
		Ok(count_query(user_id).build_query_scalar().fetch_one(self.db.as_ref()).await?)
	}

	async fn find_one(&self, id: i64, user_id: &str) -> Result<Option<BusinessRecord>, StoreError> {
		Ok(find_one_query(id, user_id)
			.build_query_as()
			.fetch_optional(self.db.as_ref())
			.await?)
	}

	async fn update(&self, id: i64, user_id: &str, patch: &RecordPatch) -> Result<Option<DateTime<Utc>>, StoreError> {
		let Some(mut qb) = update_query(id, user_id, patch) else {
			return Ok(self.find_one(id, user_id).await?.map(|record| record.updated_at));
		};

		Ok(qb.build_query_scalar().fetch_optional(self.db.as_ref()).await?)
	}

	async fn soft_delete(&self, id: i64, user_id: &str) -> Result<u64, StoreError> {
		Ok(delete_query(id, user_id).build().execute(self.db.as_ref()).await?.rows_affected())
	}
}
