//! Storage contracts and built-in credential store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialSlot},
};

/// Future type returned by every [`CredentialStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Durable two-slot credential cache contract.
///
/// Each slot holds at most one current credential; [`CredentialStore::set`] fully replaces the
/// previous value. An empty slot is distinct from an expired one, but both force acquisition.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the slot's current credential, if one has been stored.
	fn get(&self, slot: CredentialSlot) -> StoreFuture<'_, Option<Credential>>;

	/// Persists or replaces the slot's credential.
	fn set(&self, slot: CredentialSlot, credential: Credential) -> StoreFuture<'_, ()>;

	/// Clears the slot back to empty.
	fn reset(&self, slot: CredentialSlot) -> StoreFuture<'_, ()>;

	/// Reports whether the slot's credential has expired against the current clock.
	///
	/// An empty slot counts as expired so callers fall through to acquisition. The check
	/// consults only the queried slot.
	fn is_expired(&self, slot: CredentialSlot) -> StoreFuture<'_, bool> {
		Box::pin(async move {
			Ok(self.get(slot).await?.is_none_or(|credential| credential.is_expired()))
		})
	}
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
