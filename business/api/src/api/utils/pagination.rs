use tonic::Status;

pub const DEFAULT_LIMIT: i32 = 10;

fn check(page: i32, limit: i32) -> tonic::Result<()> {
	if page < 0 {
		return Err(Status::invalid_argument("page must not be negative"));
	}

	if limit < 0 {
		return Err(Status::invalid_argument("limit must not be negative"));
	}

	Ok(())
}

/// A normalized page request, page 0 is the first page and a zero limit
/// falls back to [`DEFAULT_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub page: i32,
	pub limit: i32,
}

impl Page {
	pub fn new(page: i32, limit: i32) -> tonic::Result<Self> {
		check(page, limit)?;

		Ok(Self {
			page: page.max(1),
			limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
		})
	}

	pub fn offset(&self) -> i64 {
		(i64::from(self.page) - 1) * i64::from(self.limit)
	}
}

/// The `(limit, offset)` window of a raw data listing.
///
/// Unlike [`Page`] the offset uses the limit exactly as requested, so a page
/// with a zero limit always starts at the first row.
pub fn raw_window(page: i32, limit: i32) -> tonic::Result<(i64, i64)> {
	check(page, limit)?;

	let size = if limit > 0 { limit } else { DEFAULT_LIMIT };
	let offset = if page > 0 {
		(i64::from(page) - 1) * i64::from(limit)
	} else {
		0
	};

	Ok((i64::from(size), offset))
}
