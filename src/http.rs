//! Transport seam between the relay and the JSON REST backend.
//!
//! The [`Gateway`] trait is the relay's only dependency on an HTTP stack: one operation that
//! POSTs a JSON object and resolves to the parsed JSON object of any 2xx response. The default
//! [`ReqwestGateway`] implementation precomputes the SDK identification headers at construction
//! so every outgoing call carries them.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")]
use crate::{config::Config, error::ConfigError};

/// JSON object payload exchanged with the backend.
pub type JsonObject = serde_json::Map<String, Json>;

/// Future type returned by [`Gateway::execute`].
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GatewayError>> + 'a + Send>>;

/// Header carrying the SDK implementation language.
pub const SDK_LANGUAGE_HEADER: &str = "X-SDK-Language";
/// Header carrying the SDK crate version.
pub const SDK_VERSION_HEADER: &str = "X-SDK-Version";
/// Header carrying the configured application name.
pub const SDK_APPLICATION_HEADER: &str = "X-SDK-Application";
/// Value advertised through [`SDK_LANGUAGE_HEADER`].
pub const SDK_LANGUAGE: &str = "rust";

/// Failure reported by a [`Gateway`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum GatewayError {
	/// No network response was received (DNS, TCP, TLS, or an aborted exchange).
	#[error("No network response was received: {message}.")]
	NoResponse {
		/// Transport-reported failure description.
		message: String,
	},
	/// Backend returned a non-success HTTP status; the body is preserved verbatim.
	#[error("Backend returned HTTP {status}: {body}")]
	Http {
		/// HTTP status code reported by the backend.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Response carried a 2xx status but the body was not a JSON object.
	#[error("Backend returned a malformed JSON body: {message}.")]
	MalformedBody {
		/// Parse failure description.
		message: String,
	},
}
impl GatewayError {
	/// Numeric status code for this failure: the HTTP status when a response was received,
	/// `-1` otherwise.
	pub fn status(&self) -> i32 {
		match self {
			Self::Http { status, .. } => i32::from(*status),
			Self::NoResponse { .. } | Self::MalformedBody { .. } => crate::error::STATUS_NONE,
		}
	}
}

/// Transport contract consumed by the relay: POST a JSON object, receive a parsed JSON object.
pub trait Gateway
where
	Self: 'static + Send + Sync,
{
	/// Executes a POST of `body` against `url`, resolving to the parsed response object on any
	/// 2xx status. Implementations must not retry; retry policy belongs to the relay's flows.
	fn execute<'a>(&'a self, url: &'a Url, body: &'a JsonObject) -> GatewayFuture<'a, JsonObject>;
}

/// Reqwest-backed [`Gateway`] carrying the SDK identification headers on every call.
///
/// Redirect following is disabled; the backend returns results directly instead of delegating
/// to another URI.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestGateway {
	client: ReqwestClient,
	headers: HeaderMap,
}
#[cfg(feature = "reqwest")]
impl ReqwestGateway {
	/// Builds a gateway with the crate's default reqwest client.
	pub fn new(config: &Config) -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Self::with_client(client, config)
	}

	/// Wraps an existing reqwest client. Configure the client to not follow redirects.
	pub fn with_client(client: ReqwestClient, config: &Config) -> Result<Self, ConfigError> {
		Ok(Self { client, headers: Self::build_headers(config)? })
	}

	fn build_headers(config: &Config) -> Result<HeaderMap, ConfigError> {
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(SDK_LANGUAGE_HEADER, HeaderValue::from_static(SDK_LANGUAGE));
		headers.insert(SDK_VERSION_HEADER, HeaderValue::from_static(env!("CARGO_PKG_VERSION")));
		headers.insert(
			SDK_APPLICATION_HEADER,
			HeaderValue::from_str(&config.application)
				.map_err(|_| ConfigError::InvalidApplicationName)?,
		);

		Ok(headers)
	}
}
#[cfg(feature = "reqwest")]
impl Gateway for ReqwestGateway {
	fn execute<'a>(&'a self, url: &'a Url, body: &'a JsonObject) -> GatewayFuture<'a, JsonObject> {
		Box::pin(async move {
			let response = self
				.client
				.post(url.clone())
				.headers(self.headers.clone())
				.json(body)
				.send()
				.await
				.map_err(|e| GatewayError::NoResponse { message: e.to_string() })?;
			let status = response.status();
			let text = response
				.text()
				.await
				.map_err(|e| GatewayError::NoResponse { message: e.to_string() })?;

			if !status.is_success() {
				return Err(GatewayError::Http { status: status.as_u16(), body: text });
			}

			match serde_json::from_str(&text) {
				Ok(Json::Object(object)) => Ok(object),
				Ok(other) => Err(GatewayError::MalformedBody {
					message: format!("expected a JSON object, got `{other}`"),
				}),
				Err(e) => Err(GatewayError::MalformedBody { message: e.to_string() }),
			}
		})
	}
}
