use chrono::{DateTime, Utc};
use pb::ext::TimestampExt;

use super::DatabaseTable;

pub const DEFAULT_STATUS: &str = "active";
pub const DEFAULT_PRIORITY: i32 = 1;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BusinessRecord {
	/// Assigned by the database
	pub id: i64,

	pub title: String,
	pub description: String,
	pub category: String,

	/// Free form, `active` on creation
	pub status: String,

	pub priority: i32,

	/// The owner of the record, never changes after creation
	pub user_id: String,

	/// Opaque to the service, conventionally JSON
	pub metadata: String,

	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,

	/// Set when the record is soft deleted, such records are never returned
	pub deleted_at: Option<DateTime<Utc>>,
}

impl DatabaseTable for BusinessRecord {
	const NAME: &'static str = "business_records";
}

impl BusinessRecord {
	pub fn into_proto(self) -> pb::business::BusinessRecord {
		pb::business::BusinessRecord {
			// the wire id is 32 bit, larger ids wrap
			id: self.id as u32,
			title: self.title,
			description: self.description,
			category: self.category,
			status: self.status,
			priority: self.priority,
			user_id: self.user_id,
			metadata: self.metadata,
			created_at: Some(self.created_at.to_proto()),
			updated_at: Some(self.updated_at.to_proto()),
		}
	}
}

/// The columns written when a record is created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
	pub title: String,
	pub description: String,
	pub category: String,
	pub status: String,
	pub priority: i32,
	pub user_id: String,
	pub metadata: String,
}

impl NewRecord {
	/// Status is always `active` and a zero priority becomes
	/// [`DEFAULT_PRIORITY`].
	pub fn from_proto(req: &pb::business::CreateRecordRequest, user_id: String) -> Self {
		Self {
			title: req.title.clone(),
			description: req.description.clone(),
			category: req.category.clone(),
			status: DEFAULT_STATUS.to_string(),
			priority: if req.priority == 0 { DEFAULT_PRIORITY } else { req.priority },
			user_id,
			metadata: req.metadata.clone(),
		}
	}
}

/// A partial update, `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
	pub title: Option<String>,
	pub description: Option<String>,
	pub category: Option<String>,
	pub status: Option<String>,
	pub priority: Option<i32>,
	pub metadata: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
	(!value.is_empty()).then(|| value.to_string())
}

impl RecordPatch {
	/// Empty strings and non positive priorities mean "unchanged".
	pub fn from_proto(req: &pb::business::UpdateRecordRequest) -> Self {
		Self {
			title: non_empty(&req.title),
			description: non_empty(&req.description),
			category: non_empty(&req.category),
			status: non_empty(&req.status),
			priority: (req.priority > 0).then_some(req.priority),
			metadata: non_empty(&req.metadata),
		}
	}

	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}

	pub fn apply_to(&self, record: &mut BusinessRecord) {
		if let Some(title) = &self.title {
			record.title = title.clone();
		}

		if let Some(description) = &self.description {
			record.description = description.clone();
		}

		if let Some(category) = &self.category {
			record.category = category.clone();
		}

		if let Some(status) = &self.status {
			record.status = status.clone();
		}

		if let Some(priority) = self.priority {
			record.priority = priority;
		}

		if let Some(metadata) = &self.metadata {
			record.metadata = metadata.clone();
		}
	}
}
