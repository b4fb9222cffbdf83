use std::convert::Infallible;

use http::{HeaderMap, HeaderValue};
use tower::{Layer, ServiceExt};

use crate::api::utils::identity::{X_USER_EMAIL, X_USER_ID, X_USER_NAME, X_USER_ROLE};
use crate::api::utils::{Identity, IdentityLayer};

#[test]
fn test_identity_from_headers() {
	let mut headers = HeaderMap::new();
	headers.append(X_USER_ID, HeaderValue::from_static("u1"));
	headers.append(X_USER_ID, HeaderValue::from_static("u2"));
	headers.append(X_USER_ROLE, HeaderValue::from_static("admin"));
	headers.append(X_USER_EMAIL, HeaderValue::from_static("u1@example.com"));

	assert_eq!(
		Identity::from_headers(&headers),
		Identity {
			user_id: "u1".into(),
			role: "admin".into(),
			name: String::new(),
			email: "u1@example.com".into(),
		}
	);
}

#[test]
fn test_identity_without_user_id() {
	let mut headers = HeaderMap::new();
	headers.append(X_USER_ROLE, HeaderValue::from_static("admin"));
	headers.append(X_USER_NAME, HeaderValue::from_static("Ada"));

	let identity = Identity::from_headers(&headers);

	assert!(identity.is_anonymous());
	assert_eq!(identity, Identity::default());
}

#[test]
fn test_identity_ignores_non_ascii() {
	let mut headers = HeaderMap::new();
	headers.append(X_USER_ID, HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap());

	assert!(Identity::from_headers(&headers).is_anonymous());
}

#[test]
fn test_identity_empty_user_id() {
	let mut headers = HeaderMap::new();
	headers.append(X_USER_ID, HeaderValue::from_static(""));
	headers.append(X_USER_ROLE, HeaderValue::from_static("admin"));

	let identity = Identity::from_headers(&headers);

	assert!(identity.is_anonymous());
	assert_eq!(identity, Identity::default());
	assert_eq!(identity.resolve_user_id("").unwrap_err().code(), tonic::Code::Unauthenticated);
}

#[test]
fn test_resolve_user_id() {
	let identity = Identity {
		user_id: "gateway".into(),
		..Default::default()
	};

	assert_eq!(identity.resolve_user_id("explicit").unwrap(), "explicit");
	assert_eq!(identity.resolve_user_id("").unwrap(), "gateway");

	let err = Identity::default().resolve_user_id("").unwrap_err();
	assert_eq!(err.code(), tonic::Code::Unauthenticated);
	assert_eq!(err.message(), "missing user id");
}

#[tokio::test]
async fn test_identity_layer() {
	let svc = IdentityLayer.layer(tower::service_fn(|req: http::Request<()>| async move {
		Ok::<_, Infallible>(req.extensions().get::<Identity>().cloned())
	}));

	let req = http::Request::builder()
		.uri("/business.BusinessService/GetRecords")
		.header(X_USER_ID, "u1")
		.header(X_USER_NAME, "Ada")
		.body(())
		.unwrap();

	let identity = svc.clone().oneshot(req).await.unwrap().unwrap();
	assert_eq!(identity.user_id, "u1");
	assert_eq!(identity.name, "Ada");
	assert_eq!(identity.role, "");

	let req = http::Request::builder()
		.uri("/business.BusinessService/HealthCheck")
		.body(())
		.unwrap();

	let identity = svc.oneshot(req).await.unwrap().unwrap();
	assert!(identity.is_anonymous());
}
