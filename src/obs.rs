//! Optional observability helpers for relay flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `tokenrelay.flow` with the `flow` (grant or
//!   call) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `tokenrelay_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod tracing;

pub use tracing::*;

// self
use crate::{_prelude::*, auth::GrantType};

/// Flow kinds observed by the relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Password grant (explicit user login).
	Password,
	/// Client-credentials grant (application token issuance).
	ClientCredentials,
	/// Refresh-token grant (user token renewal).
	Refresh,
	/// Authenticated API call.
	Call,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Password => "password",
			FlowKind::ClientCredentials => "client_credentials",
			FlowKind::Refresh => "refresh_token",
			FlowKind::Call => "call",
		}
	}
}
impl From<GrantType> for FlowKind {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::Password => FlowKind::Password,
			GrantType::ClientCredentials => FlowKind::ClientCredentials,
			GrantType::RefreshToken => FlowKind::Refresh,
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a relay helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"tokenrelay_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_labels_are_stable() {
		assert_eq!(FlowKind::from(GrantType::RefreshToken).to_string(), "refresh_token");
		assert_eq!(FlowOutcome::Failure.to_string(), "failure");
	}

	#[test]
	fn record_flow_outcome_noop_without_metrics() {
		record_flow_outcome(FlowKind::Call, FlowOutcome::Failure);
	}
}
