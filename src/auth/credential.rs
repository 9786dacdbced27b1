//! Immutable credential record issued by the token endpoint.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Immutable credential produced from a successful token response.
///
/// A renewal constructs a new value that fully replaces the stored one; credentials are never
/// mutated in place.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
	/// Bearer token attached to API calls.
	pub access_token: TokenSecret,
	/// Token used to renew the user credential without re-supplying user secrets. Empty when the
	/// grant did not return one (the client-credentials grant never does).
	pub refresh_token: TokenSecret,
	/// Absolute expiry instant, computed at receipt time from the response's `expires_in`.
	#[serde(with = "time::serde::timestamp")]
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Builds a credential from raw parts.
	pub fn new(
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
		expires_at: OffsetDateTime,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
			expires_at,
		}
	}

	/// Builds a credential whose expiry is the current instant plus `expires_in`.
	pub fn issued_now(
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
		expires_in: Duration,
	) -> Self {
		Self::new(access_token, refresh_token, OffsetDateTime::now_utc() + expires_in)
	}

	/// Returns `true` if the credential has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the credential is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` when the backend issued a refresh token alongside this credential.
	pub fn has_refresh_token(&self) -> bool {
		!self.refresh_token.is_empty()
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
