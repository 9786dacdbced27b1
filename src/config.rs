//! Static endpoint configuration consumed by the relay, gateway, and flows.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default URL scheme used to reach the backend.
pub const DEFAULT_PROTOCOL: &str = "https";
/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";
/// Default token endpoint path, relative to the API root.
pub const DEFAULT_AUTH_PATH: &str = "/OAuth/token";
/// Default number of renew-and-retry cycles allowed per logical call.
pub const DEFAULT_RETRY_BUDGET: u32 = 1;

/// Immutable endpoint configuration for one backend host.
///
/// Carries no logic beyond URL assembly; every component reads from the same value for the
/// lifetime of the relay instance.
#[derive(Clone)]
pub struct Config {
	/// Backend host, optionally `host:port`.
	pub host: String,
	/// URL scheme used to reach the backend.
	pub protocol: String,
	/// Optional API version path segment; omitted from built URLs when `None`.
	pub api_version: Option<String>,
	/// Token endpoint path, relative to the API root.
	pub auth_path: String,
	/// OAuth client identifier sent with every grant.
	pub client_id: String,
	/// OAuth client secret sent with every grant.
	pub client_secret: String,
	/// Scope string sent verbatim with every grant.
	pub scope: String,
	/// Renew-and-retry cycles allowed per logical call; `0` disables replays.
	pub retry_budget: u32,
	/// Application name advertised through the SDK identification headers.
	pub application: String,
}
impl Config {
	/// Creates a config with the crate defaults for protocol, API version, auth path, and
	/// retry budget.
	pub fn new(
		host: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		scope: impl Into<String>,
		application: impl Into<String>,
	) -> Self {
		Self {
			host: host.into(),
			protocol: DEFAULT_PROTOCOL.into(),
			api_version: Some(DEFAULT_API_VERSION.into()),
			auth_path: DEFAULT_AUTH_PATH.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			scope: scope.into(),
			retry_budget: DEFAULT_RETRY_BUDGET,
			application: application.into(),
		}
	}

	/// Overrides the URL scheme.
	pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
		self.protocol = protocol.into();

		self
	}

	/// Overrides the API version path segment.
	pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = Some(version.into());

		self
	}

	/// Removes the API version path segment from built URLs.
	pub fn without_api_version(mut self) -> Self {
		self.api_version = None;

		self
	}

	/// Overrides the token endpoint path.
	pub fn with_auth_path(mut self, path: impl Into<String>) -> Self {
		self.auth_path = path.into();

		self
	}

	/// Overrides the renew-and-retry budget.
	pub fn with_retry_budget(mut self, budget: u32) -> Self {
		self.retry_budget = budget;

		self
	}

	/// Builds the path component for a call: `/api[/<version>]<uri>`.
	pub fn build_path(&self, uri: &str) -> String {
		match &self.api_version {
			Some(version) => format!("/api/{version}{uri}"),
			None => format!("/api{uri}"),
		}
	}

	/// Builds the absolute URL for a call: `<protocol>://<host>` plus [`Config::build_path`].
	pub fn build_url(&self, uri: &str) -> Result<Url, ConfigError> {
		let raw = format!("{}://{}{}", self.protocol, self.host, self.build_path(uri));

		Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl { url: raw, source: e })
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("host", &self.host)
			.field("protocol", &self.protocol)
			.field("api_version", &self.api_version)
			.field("auth_path", &self.auth_path)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("scope", &self.scope)
			.field("retry_budget", &self.retry_budget)
			.field("application", &self.application)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> Config {
		Config::new("backend.example.com", "id", "secret", "profile", "demo-app")
	}

	#[test]
	fn build_url_includes_the_version_segment() {
		let url = config().build_url("/Category").expect("Default config should build a URL.");

		assert_eq!(url.as_str(), "https://backend.example.com/api/v1/Category");
	}

	#[test]
	fn build_url_omits_the_version_segment_when_unset() {
		let url = config()
			.without_api_version()
			.build_url("/Category")
			.expect("Versionless config should build a URL.");

		assert_eq!(url.as_str(), "https://backend.example.com/api/Category");
	}

	#[test]
	fn build_url_honors_protocol_and_port_overrides() {
		let url = Config::new("127.0.0.1:8080", "id", "secret", "profile", "demo-app")
			.with_protocol("http")
			.build_url(DEFAULT_AUTH_PATH)
			.expect("Config with port should build a URL.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/v1/OAuth/token");
	}

	#[test]
	fn build_path_matches_build_url_minus_origin() {
		let config = config();

		assert_eq!(config.build_path("/Me"), "/api/v1/Me");
		assert_eq!(config.without_api_version().build_path("/Me"), "/api/Me");
	}

	#[test]
	fn build_url_reports_invalid_hosts() {
		let err = Config::new("not a host", "id", "secret", "profile", "demo-app")
			.build_url("/Category")
			.expect_err("Whitespace in the host should fail URL parsing.");

		assert!(matches!(err, ConfigError::InvalidUrl { .. }));
	}

	#[test]
	fn debug_redacts_the_client_secret() {
		let rendered = format!("{:?}", config());

		assert!(!rendered.contains("\"secret\""));
		assert!(rendered.contains("<redacted>"));
	}
}
