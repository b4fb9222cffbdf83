use std::time::Instant;

use futures_util::future::BoxFuture;

const GRPC_STATUS: &str = "grpc-status";

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogLayer;

impl<S> tower::Layer<S> for RequestLogLayer {
	type Service = RequestLogSvc<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequestLogSvc { inner }
	}
}

#[derive(Debug, Clone)]
pub struct RequestLogSvc<S> {
	inner: S,
}

/// Status of a unary call as far as the headers tell. Handler errors are sent
/// as trailers-only responses, so the status is already in the headers. A
/// successful response carries it in the trailers instead.
fn header_status<B>(response: &http::Response<B>) -> tonic::Code {
	response
		.headers()
		.get(GRPC_STATUS)
		.map(|value| tonic::Code::from_bytes(value.as_bytes()))
		.unwrap_or(tonic::Code::Ok)
}

impl<S, B, ResBody> tower::Service<http::Request<B>> for RequestLogSvc<S>
where
	S: tower::Service<http::Request<B>, Response = http::Response<ResBody>>,
	S::Future: Send + 'static,
	S::Error: std::fmt::Display,
{
	type Error = S::Error;
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;
	type Response = S::Response;

	fn call(&mut self, req: http::Request<B>) -> Self::Future {
		let path = req.uri().path().to_string();

		tracing::info!(path = %path, "grpc call");

		let start = Instant::now();
		let fut = self.inner.call(req);

		Box::pin(async move {
			let result = fut.await;
			let elapsed_ms = start.elapsed().as_millis() as u64;

			match &result {
				Ok(response) => match header_status(response) {
					tonic::Code::Ok => tracing::info!(path = %path, elapsed_ms, "grpc call completed"),
					code => tracing::warn!(path = %path, elapsed_ms, code = ?code, "grpc call failed"),
				},
				Err(err) => tracing::error!(path = %path, elapsed_ms, err = %err, "grpc call failed"),
			}

			result
		})
	}

	fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}
}
