//! Async client SDK that brokers OAuth 2.0-style tokens for a JSON REST backend: two independent
//! credential domains, durable caching, and transparent renew-on-401 replay.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::Config,
		flows::Relay,
		http::ReqwestGateway,
		store::{CredentialStore, MemoryStore},
	};

	/// Relay type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRelay = Relay<ReqwestGateway>;

	/// Builds a config aimed at a local mock server base URL, e.g. `http://127.0.0.1:8080`.
	pub fn test_config(base_url: &str) -> Config {
		let url = Url::parse(base_url).expect("Failed to parse mock server base URL.");
		let host = url.host_str().expect("Mock server base URL should carry a host.");
		let host = match url.port() {
			Some(port) => format!("{host}:{port}"),
			None => host.to_owned(),
		};

		Config::new(host, "test-client-id", "test-client-secret", "profile", "test-app")
			.with_protocol(url.scheme())
	}

	/// Constructs a [`Relay`] backed by an in-memory store and the crate's reqwest gateway,
	/// aimed at the provided mock server base URL.
	pub fn build_test_relay(base_url: &str) -> (ReqwestTestRelay, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let relay = Relay::new(store, test_config(base_url))
			.expect("Failed to build reqwest relay for tests.");

		(relay, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as Json;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::{
		error::{Error, Result},
		http::JsonObject,
	};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokenrelay as _};
