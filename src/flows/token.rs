//! Token brokering: cached access tokens with forced-renew replacement.
//!
//! [`Relay::access_token`] returns a valid access token for a slot, consulting the store first
//! and contacting the token endpoint only on miss, expiry, or forced renewal. The application
//! slot is always re-derived via `client_credentials`; the backend treats it as re-derivable
//! from the client id/secret, so it is never renewed through a refresh grant. The user slot
//! renews via `refresh_token` using the stored refresh token. A successful issuance fully
//! replaces the slot's stored credential; the prior refresh token is discarded.

// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialSlot, GrantRequest},
	error::ConfigError,
	flows::Relay,
	http::Gateway,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<G> Relay<G>
where
	G: ?Sized + Gateway,
{
	/// Returns a valid access token for the slot, renewing when forced or stale.
	///
	/// The slot's issuance guard is held across the whole check-then-renew sequence, so
	/// concurrent callers observe either the cached credential or the finished replacement,
	/// never an interleaved write.
	pub async fn access_token(&self, slot: CredentialSlot, force_renew: bool) -> Result<String> {
		let guard = self.slot_guard(slot);
		let _issuance = guard.lock().await;

		if !force_renew {
			if let Some(current) =
				self.store.get(slot).await?.filter(|credential| !credential.is_expired())
			{
				return Ok(current.access_token.into_inner());
			}
		}

		let grant = match slot {
			CredentialSlot::Application => GrantRequest::client_credentials(),
			CredentialSlot::User => {
				let refresh = self
					.store
					.get(slot)
					.await?
					.filter(Credential::has_refresh_token)
					.ok_or(ConfigError::MissingRefreshToken)?;

				GrantRequest::refresh(refresh.refresh_token.expose())
			},
		};
		let credential = self.issue(slot, grant).await?;

		Ok(credential.access_token.into_inner())
	}

	/// Performs a grant and replaces the slot's stored credential on success.
	///
	/// Failures leave the slot untouched; nothing is cached or overwritten until the token
	/// endpoint has answered `ok:true`.
	pub(crate) async fn issue(
		&self,
		slot: CredentialSlot,
		grant: GrantRequest,
	) -> Result<Credential> {
		let kind = FlowKind::from(grant.grant_type());
		let span = FlowSpan::new(kind, "issue");

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);
		self.renew_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let credential = self.request_token(grant).await?;

				self.store.reset(slot).await?;
				self.store.set(slot, credential.clone()).await?;

				Ok(credential)
			})
			.await;

		match &result {
			Ok(_) => {
				obs::record_flow_outcome(kind, FlowOutcome::Success);
				self.renew_metrics.record_success();
			},
			Err(_) => {
				obs::record_flow_outcome(kind, FlowOutcome::Failure);
				self.renew_metrics.record_failure();
			},
		}

		result
	}
}
