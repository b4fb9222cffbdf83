#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
	/// The service name reported by the health check
	pub service_name: String,

	/// Apply the bundled schema migrations on startup
	pub run_migrations: bool,
}

impl Default for BusinessConfig {
	fn default() -> Self {
		Self {
			service_name: "business-grpc".to_string(),
			run_migrations: true,
		}
	}
}
