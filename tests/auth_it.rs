// crates.io
use httpmock::prelude::*;
// self
use tokenrelay::{
	_preludet::*,
	auth::CredentialSlot,
	error::ConfigError,
	store::CredentialStore,
};

const AUTH_PATH: &str = "/api/v1/OAuth/token";
const USER_EMAIL: &str = "user@example.com";
const USER_PWD: &str = "hunter2";

#[tokio::test]
async fn authenticate_caches_a_credential_with_computed_expiry() {
	let server = MockServer::start_async().await;
	let (relay, store) = build_test_relay(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH).json_body_includes(
				r#"{"grant_type":"password","username":"user@example.com","password":"hunter2","client_id":"test-client-id","scope":"profile"}"#,
			);
			then.status(200).header("content-type", "application/json").body(
				r#"{"ok":true,"access_token":"user-token","expires_in":1200,"scope":"profile","refresh_token":"user-refresh"}"#,
			);
		})
		.await;
	let before = OffsetDateTime::now_utc();
	let credential = relay
		.authenticate(USER_EMAIL, USER_PWD)
		.await
		.expect("Password grant should succeed against the mock endpoint.");
	let after = OffsetDateTime::now_utc();

	assert_eq!(credential.access_token.expose(), "user-token");
	assert_eq!(credential.refresh_token.expose(), "user-refresh");
	assert!(credential.expires_at >= before + Duration::seconds(1200));
	assert!(credential.expires_at <= after + Duration::seconds(1200));

	mock.assert_async().await;

	let stored = store
		.get(CredentialSlot::User)
		.await
		.expect("Store fetch should succeed.")
		.expect("User slot should hold the freshly issued credential.");

	assert_eq!(stored.access_token.expose(), "user-token");
	assert_eq!(stored.expires_at, credential.expires_at);
}

#[tokio::test]
async fn rejected_grant_surfaces_the_raw_body_and_caches_nothing() {
	let server = MockServer::start_async().await;
	let (relay, store) = build_test_relay(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200).header("content-type", "application/json").body(
				r#"{"ok":false,"error":"invalid_grant","error_description":"Invalid username and password combination"}"#,
			);
		})
		.await;
	let err = relay
		.authenticate(USER_EMAIL, "wrong-password")
		.await
		.expect_err("A rejected grant should surface as an error.");

	assert_eq!(err.status(), -1);
	assert!(err.to_string().contains("invalid_grant"));
	assert!(err.to_string().contains("Invalid username and password combination"));

	mock.assert_async().await;

	assert!(
		store
			.get(CredentialSlot::User)
			.await
			.expect("Store fetch should succeed.")
			.is_none(),
		"A failed grant must not cache or overwrite a credential.",
	);
}

#[tokio::test]
async fn transport_level_auth_failure_passes_the_status_through() {
	let server = MockServer::start_async().await;
	let (relay, _store) = build_test_relay(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"ok":false,"error":"unauthorized_client"}"#);
		})
		.await;
	let err = relay
		.authenticate(USER_EMAIL, USER_PWD)
		.await
		.expect_err("An HTTP 401 from the token endpoint should surface as an error.");

	assert_eq!(err.status(), 401);
	assert!(err.to_string().contains("unauthorized_client"));

	mock.assert_async().await;
}

#[tokio::test]
async fn malformed_token_response_reports_a_parse_failure() {
	let server = MockServer::start_async().await;
	let (relay, store) = build_test_relay(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"ok":true,"expires_in":"soon"}"#);
		})
		.await;
	let err = relay
		.authenticate(USER_EMAIL, USER_PWD)
		.await
		.expect_err("A structurally invalid token response should surface as an error.");

	assert_eq!(err.status(), -1);
	assert!(matches!(err, Error::TokenResponseParse { .. }));

	mock.assert_async().await;

	assert!(
		store
			.get(CredentialSlot::User)
			.await
			.expect("Store fetch should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn user_call_without_a_stored_refresh_token_fails_locally() {
	let server = MockServer::start_async().await;
	let (relay, _store) = build_test_relay(&server.base_url());
	// No mocks are registered; a config error proves no request ever left the relay.
	let err = relay
		.authenticated_call("/Me", None)
		.await
		.expect_err("A user call with an empty user slot should fail locally.");

	assert!(matches!(err, Error::Config(ConfigError::MissingRefreshToken)));
	assert_eq!(err.status(), -1);
}
