//! End-to-end walkthrough against a real backend.
//!
//! ```sh
//! BACKEND_HOST=api.example.com \
//! CLIENT_ID=... \
//! CLIENT_SECRET=... \
//! USER_EMAIL=... \
//! USER_PASSWORD=... \
//! cargo run --example end_to_end
//! ```

// std
use std::{env, sync::Arc};
// self
use tokenrelay::{
	config::Config,
	error::Result,
	flows::ReqwestRelay,
	store::{CredentialStore, FileStore},
};

fn required(name: &str) -> String {
	env::var(name).unwrap_or_else(|_| panic!("Environment variable {name} is required."))
}

#[tokio::main]
async fn main() -> Result<()> {
	let config = Config::new(
		required("BACKEND_HOST"),
		required("CLIENT_ID"),
		required("CLIENT_SECRET"),
		"profile",
		"end-to-end-demo",
	);
	let store: Arc<dyn CredentialStore> = Arc::new(FileStore::open("target/demo-credentials.json")?);
	let relay = ReqwestRelay::new(store, config)?;

	// Application-scoped call; the client-credentials token is issued on first use and cached.
	let categories = relay.call("/Category", None).await?;

	println!(
		"categories: {}",
		serde_json::to_string_pretty(&categories).unwrap_or_else(|_| "<unprintable>".into())
	);

	// User login, then a user-scoped call with the freshly issued credential.
	relay.authenticate(&required("USER_EMAIL"), &required("USER_PASSWORD")).await?;

	let me = relay.authenticated_call("/Me", None).await?;

	println!(
		"me: {}",
		serde_json::to_string_pretty(&me).unwrap_or_else(|_| "<unprintable>".into())
	);

	Ok(())
}
