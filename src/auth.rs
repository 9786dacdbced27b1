//! Credential domain types shared across the relay.

pub mod credential;
pub mod grant;
pub mod secret;
pub mod slot;

pub use credential::Credential;
pub use grant::{GrantRequest, GrantType};
pub use secret::TokenSecret;
pub use slot::CredentialSlot;
