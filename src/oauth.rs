//! Token endpoint client: grant encoding and response mapping.
//!
//! The backend reports business-level auth failures (e.g. a bad password) as HTTP 200 with
//! `ok:false` in the body, reserving real HTTP statuses for transport and authorization
//! failures. Both paths are handled here: `ok:false` surfaces as [`Error::GrantRejected`]
//! carrying the raw body, while transport and HTTP failures pass through unchanged from the
//! gateway.

// self
use crate::{
	_prelude::*,
	auth::{Credential, GrantRequest},
	flows::Relay,
	http::Gateway,
};

#[derive(Debug, Deserialize)]
struct OkFlag {
	ok: bool,
}

/// Wire shape of a successful token response. `scope` and other fields are ignored; a missing
/// `refresh_token` defaults to empty (the client-credentials grant never returns one).
#[derive(Debug, Deserialize)]
struct TokenPayload {
	access_token: String,
	expires_in: i64,
	#[serde(default)]
	refresh_token: String,
}

impl<G> Relay<G>
where
	G: ?Sized + Gateway,
{
	/// Performs one token request against the configured auth path and maps the response into a
	/// [`Credential`] whose expiry is the receipt instant plus the response's `expires_in`.
	pub async fn request_token(&self, grant: GrantRequest) -> Result<Credential> {
		let url = self.config.build_url(&self.config.auth_path)?;
		let body = grant.into_body(&self.config);
		let response = self.gateway.execute(&url, &body).await?;

		parse_token_response(response)
	}
}

fn parse_token_response(response: JsonObject) -> Result<Credential> {
	let value = Json::Object(response);
	let flag: OkFlag = deserialize(&value)?;

	if !flag.ok {
		return Err(Error::GrantRejected { body: value.to_string() });
	}

	let payload: TokenPayload = deserialize(&value)?;

	Ok(Credential::issued_now(
		payload.access_token,
		payload.refresh_token,
		Duration::seconds(payload.expires_in),
	))
}

fn deserialize<T>(value: &Json) -> Result<T>
where
	T: for<'de> Deserialize<'de>,
{
	serde_path_to_error::deserialize(value).map_err(|e| Error::TokenResponseParse { source: e })
}
