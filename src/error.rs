//! Relay-level error types shared across flows, the gateway, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Status code reported when no HTTP status is available: transport failures,
/// malformed payloads, and business-level grant rejections delivered over HTTP 200.
pub const STATUS_NONE: i32 = -1;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(#[from] crate::store::StoreError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Gateway-level failure: transport, non-success HTTP status, or a malformed body.
	#[error(transparent)]
	Gateway(#[from] crate::http::GatewayError),

	/// Token endpoint answered HTTP 200 with `ok:false`; the raw response body is preserved.
	#[error("Token endpoint rejected the grant: {body}")]
	GrantRejected {
		/// Raw JSON response body returned by the backend.
		body: String,
	},
	/// Token endpoint answered `ok:true` but the payload was structurally invalid.
	#[error("Token endpoint returned a malformed response.")]
	TokenResponseParse {
		/// Structured parsing failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Numeric status code reported to callers: the backend's HTTP status when a response was
	/// received, [`STATUS_NONE`] otherwise.
	pub fn status(&self) -> i32 {
		match self {
			Self::Gateway(e) => e.status(),
			_ => STATUS_NONE,
		}
	}
}

/// Configuration and validation failures raised by the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A built endpoint URL failed to parse.
	#[error("Built URL `{url}` is invalid.")]
	InvalidUrl {
		/// The URL string assembled from the config.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configured application name cannot be carried in an HTTP header.
	#[error("Application name is not a valid header value.")]
	InvalidApplicationName,
	/// User slot holds no refresh token, so a user-token renewal cannot be issued.
	#[error("Cached user credential is missing a refresh token.")]
	MissingRefreshToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}
