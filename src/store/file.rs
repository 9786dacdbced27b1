//! Simple file-backed [`CredentialStore`] that survives process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialSlot},
	store::{CredentialStore, StoreError, StoreFuture},
};

/// Persisted layout: six scalar entries, one access-token/expiry/refresh-token triple per slot.
///
/// An empty access token marks an empty slot; emptiness is decided per slot without consulting
/// the other one. Expiry instants are stored as unix-second timestamps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Snapshot {
	user_access_token: String,
	user_token_expires: i64,
	user_refresh_token: String,
	app_access_token: String,
	app_token_expires: i64,
	app_refresh_token: String,
}
impl Snapshot {
	fn credential(&self, slot: CredentialSlot) -> Option<Credential> {
		let (access, expires, refresh) = match slot {
			CredentialSlot::Application =>
				(&self.app_access_token, self.app_token_expires, &self.app_refresh_token),
			CredentialSlot::User =>
				(&self.user_access_token, self.user_token_expires, &self.user_refresh_token),
		};

		if access.is_empty() {
			return None;
		}

		let expires_at = OffsetDateTime::from_unix_timestamp(expires).ok()?;

		Some(Credential::new(access.clone(), refresh.clone(), expires_at))
	}

	fn put(&mut self, slot: CredentialSlot, credential: &Credential) {
		let access = credential.access_token.expose().to_owned();
		let refresh = credential.refresh_token.expose().to_owned();
		let expires = credential.expires_at.unix_timestamp();

		match slot {
			CredentialSlot::Application => {
				self.app_access_token = access;
				self.app_token_expires = expires;
				self.app_refresh_token = refresh;
			},
			CredentialSlot::User => {
				self.user_access_token = access;
				self.user_token_expires = expires;
				self.user_refresh_token = refresh;
			},
		}
	}

	fn clear(&mut self, slot: CredentialSlot) {
		match slot {
			CredentialSlot::Application => {
				self.app_access_token = String::new();
				self.app_token_expires = 0;
				self.app_refresh_token = String::new();
			},
			CredentialSlot::User => {
				self.user_access_token = String::new();
				self.user_token_expires = 0;
				self.user_refresh_token = String::new();
			},
		}
	}
}

/// Persists both credential slots to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Snapshot>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { Snapshot::default() };

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(Snapshot::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileStore {
	fn get(&self, slot: CredentialSlot) -> StoreFuture<'_, Option<Credential>> {
		Box::pin(async move { Ok(self.inner.read().credential(slot)) })
	}

	fn set(&self, slot: CredentialSlot, credential: Credential) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.put(slot, &credential);
			self.persist_locked(&guard)?;

			Ok(())
		})
	}

	fn reset(&self, slot: CredentialSlot) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.clear(slot);
			self.persist_locked(&guard)?;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"tokenrelay_file_store_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let expires = OffsetDateTime::now_utc() + Duration::hours(1);
		// Unix-second persistence truncates sub-second precision.
		let expires = OffsetDateTime::from_unix_timestamp(expires.unix_timestamp())
			.expect("Truncated expiry should remain a valid instant.");
		let credential = Credential::new("user-access", "user-refresh", expires);
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.set(CredentialSlot::User, credential.clone()))
			.expect("Failed to save fixture credential to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");
		let fetched = rt
			.block_on(reopened.get(CredentialSlot::User))
			.expect("Failed to fetch fixture credential from file store.")
			.expect("File store lost the credential after reopen.");

		assert_eq!(fetched.access_token.expose(), "user-access");
		assert_eq!(fetched.refresh_token.expose(), "user-refresh");
		assert_eq!(fetched.expires_at, credential.expires_at);
		assert!(
			rt.block_on(reopened.get(CredentialSlot::Application))
				.expect("Application fetch should succeed.")
				.is_none()
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn reset_clears_one_slot_and_persists() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let expires = OffsetDateTime::now_utc() + Duration::hours(1);
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.set(CredentialSlot::User, Credential::new("user", "r", expires)))
			.expect("Failed to seed the user slot.");
		rt.block_on(store.set(CredentialSlot::Application, Credential::new("app", "", expires)))
			.expect("Failed to seed the application slot.");
		rt.block_on(store.reset(CredentialSlot::User)).expect("Failed to reset the user slot.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(
			rt.block_on(reopened.get(CredentialSlot::User))
				.expect("User fetch should succeed.")
				.is_none()
		);
		assert!(
			rt.block_on(reopened.get(CredentialSlot::Application))
				.expect("Application fetch should succeed.")
				.is_some()
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}
}
