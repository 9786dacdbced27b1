//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialSlot},
	store::{CredentialStore, StoreError, StoreFuture},
};

type Slots = Arc<RwLock<[Option<Credential>; 2]>>;

/// Thread-safe storage backend that keeps credentials in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slots);
impl MemoryStore {
	fn get_now(slots: Slots, slot: CredentialSlot) -> Option<Credential> {
		slots.read()[slot.index()].clone()
	}

	fn set_now(slots: Slots, slot: CredentialSlot, credential: Credential) -> Result<(), StoreError> {
		slots.write()[slot.index()] = Some(credential);

		Ok(())
	}

	fn reset_now(slots: Slots, slot: CredentialSlot) -> Result<(), StoreError> {
		slots.write()[slot.index()] = None;

		Ok(())
	}
}
impl CredentialStore for MemoryStore {
	fn get(&self, slot: CredentialSlot) -> StoreFuture<'_, Option<Credential>> {
		let slots = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(slots, slot)) })
	}

	fn set(&self, slot: CredentialSlot, credential: Credential) -> StoreFuture<'_, ()> {
		let slots = self.0.clone();

		Box::pin(async move { Self::set_now(slots, slot, credential) })
	}

	fn reset(&self, slot: CredentialSlot) -> StoreFuture<'_, ()> {
		let slots = self.0.clone();

		Box::pin(async move { Self::reset_now(slots, slot) })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	#[test]
	fn set_replaces_and_reset_clears() {
		let store = MemoryStore::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for memory store test.");
		let first = Credential::new("first", "r1", OffsetDateTime::now_utc() + Duration::hours(1));
		let second =
			Credential::new("second", "r2", OffsetDateTime::now_utc() + Duration::hours(2));

		rt.block_on(store.set(CredentialSlot::User, first))
			.expect("Failed to store the first credential.");
		rt.block_on(store.set(CredentialSlot::User, second))
			.expect("Failed to replace the stored credential.");

		let current = rt
			.block_on(store.get(CredentialSlot::User))
			.expect("Fetch should succeed.")
			.expect("User slot should hold the replacement credential.");

		assert_eq!(current.access_token.expose(), "second");
		assert_eq!(current.refresh_token.expose(), "r2");

		rt.block_on(store.reset(CredentialSlot::User)).expect("Reset should succeed.");

		assert!(
			rt.block_on(store.get(CredentialSlot::User))
				.expect("Fetch should succeed after reset.")
				.is_none()
		);
	}
}
