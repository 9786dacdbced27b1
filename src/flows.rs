//! High-level call orchestration built around the [`Relay`] facade.

pub mod calls;
pub mod token;

mod metrics;

pub use metrics::RenewMetrics;

// self
use crate::{_prelude::*, auth::CredentialSlot, config::Config, http::Gateway, store::CredentialStore};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestGateway;

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport.
pub type ReqwestRelay = Relay<ReqwestGateway>;

/// Coordinates token brokering and API calls against a single backend host.
///
/// The relay owns the gateway, the credential store, and the endpoint config so the flow
/// implementations can focus on grant selection and the renew-on-401 replay policy. Each
/// credential slot carries its own issuance guard: concurrent calls serialize their
/// check-then-renew sequences instead of stampeding the token endpoint.
pub struct Relay<G>
where
	G: ?Sized + Gateway,
{
	/// Transport used for every outbound request.
	pub gateway: Arc<G>,
	/// Durable credential cache holding the application and user slots.
	pub store: Arc<dyn CredentialStore>,
	/// Endpoint configuration shared by every component.
	pub config: Config,
	/// Counters tracking token issuance outcomes.
	pub renew_metrics: Arc<RenewMetrics>,
	slot_guards: [Arc<AsyncMutex<()>>; 2],
}
impl<G> Relay<G>
where
	G: ?Sized + Gateway,
{
	/// Creates a relay that reuses a caller-provided transport.
	pub fn with_gateway(
		store: Arc<dyn CredentialStore>,
		config: Config,
		gateway: impl Into<Arc<G>>,
	) -> Self {
		Self {
			gateway: gateway.into(),
			store,
			config,
			renew_metrics: Default::default(),
			slot_guards: Default::default(),
		}
	}

	pub(crate) fn slot_guard(&self, slot: CredentialSlot) -> Arc<AsyncMutex<()>> {
		self.slot_guards[slot.index()].clone()
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestGateway> {
	/// Creates a relay that provisions its own reqwest-backed gateway from the config.
	pub fn new(store: Arc<dyn CredentialStore>, config: Config) -> Result<Self> {
		let gateway = ReqwestGateway::new(&config)?;

		Ok(Self::with_gateway(store, config, gateway))
	}
}
impl<G> Clone for Relay<G>
where
	G: ?Sized + Gateway,
{
	fn clone(&self) -> Self {
		Self {
			gateway: self.gateway.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			renew_metrics: self.renew_metrics.clone(),
			slot_guards: self.slot_guards.clone(),
		}
	}
}
impl<G> Debug for Relay<G>
where
	G: ?Sized + Gateway,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("config", &self.config).finish()
	}
}
