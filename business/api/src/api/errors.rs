use tonic::Status;

use crate::store::StoreError;

pub trait StoreResultExt<T> {
	/// Logs the error and turns it into an internal status, `action` reads as
	/// "failed to {action}".
	fn into_status(self, action: &str) -> tonic::Result<T>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
	fn into_status(self, action: &str) -> tonic::Result<T> {
		self.map_err(|err| {
			tracing::error!(err = %err, "failed to {action}");
			Status::internal(format!("failed to {action}: {err}"))
		})
	}
}
