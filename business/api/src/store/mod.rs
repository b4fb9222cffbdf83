use chrono::{DateTime, Utc};

use crate::database::{BusinessRecord, NewRecord, RecordPatch};

mod postgres;

pub use postgres::PgRecordStore;
#[cfg(test)]
pub(crate) use postgres::{count_query, delete_query, find_one_query, find_query, insert_query, update_query};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// The filters and window of a record listing. Every listing is scoped to a
/// single owner and skips soft deleted rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
	pub user_id: String,
	pub category: Option<String>,
	pub status: Option<String>,
	pub limit: i64,
	/// Only applied when greater than zero
	pub offset: i64,
	/// Orders by `created_at DESC`, otherwise the order is unspecified
	pub newest_first: bool,
}

/// Persistence for business records.
///
/// Every lookup, update and delete is keyed by both the record id and the
/// owner id and ignores soft deleted rows.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
	async fn insert(&self, record: NewRecord) -> Result<BusinessRecord, StoreError>;

	async fn find(&self, query: &RecordQuery) -> Result<Vec<BusinessRecord>, StoreError>;

	/// Counts the owner's live records, ignoring any other filter.
	async fn count(&self, user_id: &str) -> Result<i64, StoreError>;

	async fn find_one(&self, id: i64, user_id: &str) -> Result<Option<BusinessRecord>, StoreError>;

	/// Writes the patch and returns the new `updated_at`, `None` when no live
	/// record matched.
	async fn update(&self, id: i64, user_id: &str, patch: &RecordPatch) -> Result<Option<DateTime<Utc>>, StoreError>;

	/// Marks the record as deleted and returns the number of affected rows.
	async fn soft_delete(&self, id: i64, user_id: &str) -> Result<u64, StoreError>;
}
