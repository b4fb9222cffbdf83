use chrono::{DateTime, TimeZone, Utc};
use prost_types::Timestamp;

pub trait TimestampExt {
	fn to_proto(&self) -> Timestamp;
}

impl TimestampExt for DateTime<Utc> {
	fn to_proto(&self) -> Timestamp {
		Timestamp {
			seconds: self.timestamp(),
			nanos: self.timestamp_subsec_nanos() as i32,
		}
	}
}

pub fn to_datetime(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
	Utc.timestamp_opt(timestamp.seconds, u32::try_from(timestamp.nanos).ok()?)
		.single()
}
