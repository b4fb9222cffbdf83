mod timestamp;

pub use timestamp::{to_datetime, TimestampExt};
