//! API call execution: token attachment and the renew-on-401 replay policy.
//!
//! Every call obtains its slot's token through the broker, merges it into the outgoing body as
//! a top-level `access_token` field, and submits through the gateway. A 401 with remaining
//! retry budget forces a renewal for the same slot and replays the call with the fresh token.
//! Any other failure, including a 401 once the budget is exhausted, surfaces to the caller
//! unchanged.

// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialSlot, GrantRequest},
	flows::Relay,
	http::Gateway,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<G> Relay<G>
where
	G: ?Sized + Gateway,
{
	/// Obtains a user credential via the password grant and replaces the user slot.
	///
	/// Needed before user-scoped endpoints. Failures surface immediately; a user-initiated
	/// login is never retried implicitly.
	pub async fn authenticate(&self, identifier: &str, password: &str) -> Result<Credential> {
		let guard = self.slot_guard(CredentialSlot::User);
		let _issuance = guard.lock().await;

		self.issue(CredentialSlot::User, GrantRequest::password(identifier, password)).await
	}

	/// Executes an application-scoped API call; `None` sends an empty body.
	pub async fn call(&self, uri: &str, body: Option<JsonObject>) -> Result<JsonObject> {
		self.execute(uri, body, CredentialSlot::Application).await
	}

	/// Executes a user-scoped API call; requires a prior [`Relay::authenticate`].
	pub async fn authenticated_call(
		&self,
		uri: &str,
		body: Option<JsonObject>,
	) -> Result<JsonObject> {
		self.execute(uri, body, CredentialSlot::User).await
	}

	async fn execute(
		&self,
		uri: &str,
		body: Option<JsonObject>,
		slot: CredentialSlot,
	) -> Result<JsonObject> {
		const KIND: FlowKind = FlowKind::Call;

		let span = FlowSpan::new(KIND, "execute");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.access_token(slot, false).await?;
				let mut request_body = body.unwrap_or_default();

				request_body.insert("access_token".into(), token.into());

				self.exec_post(uri, request_body, slot, self.config.retry_budget).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Posts the body, forcing a renewal and replaying once per remaining retry after a 401.
	///
	/// The renewal always completes before the replayed call is issued. Recursion is bounded by
	/// the configured retry budget.
	fn exec_post<'a>(
		&'a self,
		uri: &'a str,
		body: JsonObject,
		slot: CredentialSlot,
		remaining_retries: u32,
	) -> Pin<Box<dyn Future<Output = Result<JsonObject>> + 'a + Send>> {
		Box::pin(async move {
			let url = self.config.build_url(uri)?;

			match self.gateway.execute(&url, &body).await {
				Ok(response) => Ok(response),
				Err(e) if e.status() == 401 && remaining_retries > 0 => {
					#[cfg(feature = "tracing")]
					tracing::debug!(
						uri,
						slot = slot.as_str(),
						remaining_retries,
						"Renewing token after 401."
					);

					let token = self.access_token(slot, true).await?;
					let mut replay_body = body;

					replay_body.insert("access_token".into(), token.into());

					self.exec_post(uri, replay_body, slot, remaining_retries - 1).await
				},
				Err(e) => Err(e.into()),
			}
		})
	}
}
