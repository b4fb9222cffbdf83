use http::HeaderMap;
use tonic::Status;

pub const X_USER_ID: &str = "x-user-id";
pub const X_USER_ROLE: &str = "x-user-role";
pub const X_USER_NAME: &str = "x-user-name";
pub const X_USER_EMAIL: &str = "x-user-email";

/// The caller as described by the upstream gateway. Nothing here is verified,
/// the gateway is trusted to have authenticated the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
	pub user_id: String,
	pub role: String,
	pub name: String,
	pub email: String,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		// an empty value counts as absent
		.filter(|value| !value.is_empty())
		.map(str::to_string)
}

impl Identity {
	/// Reads the identity headers, the first value of a repeated header wins.
	/// Without a user id the identity stays empty.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let Some(user_id) = header(headers, X_USER_ID) else {
			return Self::default();
		};

		Self {
			user_id,
			role: header(headers, X_USER_ROLE).unwrap_or_default(),
			name: header(headers, X_USER_NAME).unwrap_or_default(),
			email: header(headers, X_USER_EMAIL).unwrap_or_default(),
		}
	}

	pub fn is_anonymous(&self) -> bool {
		self.user_id.is_empty()
	}

	/// Picks the user id an operation acts for. A non-empty id on the request
	/// takes precedence over the gateway identity, so a caller can act for any
	/// user id. The gateway is expected to reject or rewrite such requests; the
	/// identity headers only fill in when the request leaves the id empty.
	pub fn resolve_user_id(&self, requested: &str) -> tonic::Result<String> {
		if !requested.is_empty() {
			Ok(requested.to_string())
		} else if !self.is_anonymous() {
			Ok(self.user_id.clone())
		} else {
			Err(Status::unauthenticated("missing user id"))
		}
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLayer;

impl<S> tower::Layer<S> for IdentityLayer {
	type Service = IdentitySvc<S>;

	fn layer(&self, inner: S) -> Self::Service {
		IdentitySvc { inner }
	}
}

#[derive(Debug, Clone)]
pub struct IdentitySvc<S> {
	inner: S,
}

impl<S, B> tower::Service<http::Request<B>> for IdentitySvc<S>
where
	S: tower::Service<http::Request<B>>,
{
	type Error = S::Error;
	type Future = S::Future;
	type Response = S::Response;

	fn call(&mut self, mut req: http::Request<B>) -> Self::Future {
		let identity = Identity::from_headers(req.headers());
		let path = req.uri().path();

		if identity.is_anonymous() {
			tracing::info!(path, "no user id from gateway, proceeding without user context");
		} else {
			tracing::info!(
				path,
				user_id = %identity.user_id,
				role = if identity.role.is_empty() { "unknown" } else { identity.role.as_str() },
				"user context from gateway",
			);
		}

		req.extensions_mut().insert(identity);

		self.inner.call(req)
	}

	fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}
}
