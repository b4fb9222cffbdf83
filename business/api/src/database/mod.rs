mod record;

pub use record::*;

pub trait DatabaseTable {
	/// The name of the table in the database.
	const NAME: &'static str;
}
