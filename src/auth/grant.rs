//! Grant kinds and token-endpoint request encoding.

// self
use crate::{_prelude::*, config::Config};

/// OAuth grant flow variants supported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantType {
	/// User login with identifier + password.
	Password,
	/// Application credential derived from the client id/secret pair.
	ClientCredentials,
	/// User credential renewal from a stored refresh token.
	RefreshToken,
}
impl GrantType {
	/// Returns the wire value carried in the `grant_type` body field.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::Password => "password",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single token-endpoint request: the grant kind plus its grant-specific fields.
///
/// [`GrantRequest::into_body`] adds the client identification fields every grant carries, so a
/// request value holds only what distinguishes one grant from another.
#[derive(Clone)]
pub struct GrantRequest {
	grant_type: GrantType,
	fields: BTreeMap<String, String>,
}
impl GrantRequest {
	/// Builds a password grant for an explicit user login.
	pub fn password(identifier: impl Into<String>, password: impl Into<String>) -> Self {
		let fields = BTreeMap::from([
			("username".to_owned(), identifier.into()),
			("password".to_owned(), password.into()),
		]);

		Self { grant_type: GrantType::Password, fields }
	}

	/// Builds a client-credentials grant; carries no grant-specific fields.
	pub fn client_credentials() -> Self {
		Self { grant_type: GrantType::ClientCredentials, fields: BTreeMap::new() }
	}

	/// Builds a refresh-token grant from the stored refresh token.
	pub fn refresh(refresh_token: impl Into<String>) -> Self {
		let fields = BTreeMap::from([("refresh_token".to_owned(), refresh_token.into())]);

		Self { grant_type: GrantType::RefreshToken, fields }
	}

	/// Returns the grant kind this request performs.
	pub fn grant_type(&self) -> GrantType {
		self.grant_type
	}

	/// Assembles the JSON request body: the grant-specific fields plus `grant_type`,
	/// `client_id`, `client_secret`, and `scope` from the config.
	pub fn into_body(self, config: &Config) -> JsonObject {
		let mut body = JsonObject::new();

		for (key, value) in self.fields {
			body.insert(key, value.into());
		}

		body.insert("grant_type".into(), self.grant_type.as_str().into());
		body.insert("client_id".into(), config.client_id.clone().into());
		body.insert("client_secret".into(), config.client_secret.clone().into());
		body.insert("scope".into(), config.scope.clone().into());

		body
	}
}
impl Debug for GrantRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GrantRequest")
			.field("grant_type", &self.grant_type)
			.field("fields", &self.fields.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> Config {
		Config::new("backend.example.com", "id-1", "secret-1", "profile email", "demo-app")
	}

	fn field<'a>(body: &'a JsonObject, key: &str) -> &'a str {
		body.get(key)
			.and_then(Json::as_str)
			.unwrap_or_else(|| panic!("Body should carry a string `{key}` field."))
	}

	#[test]
	fn password_grant_carries_user_fields_plus_client_identification() {
		let body = GrantRequest::password("user@example.com", "hunter2").into_body(&config());

		assert_eq!(field(&body, "grant_type"), "password");
		assert_eq!(field(&body, "username"), "user@example.com");
		assert_eq!(field(&body, "password"), "hunter2");
		assert_eq!(field(&body, "client_id"), "id-1");
		assert_eq!(field(&body, "client_secret"), "secret-1");
		assert_eq!(field(&body, "scope"), "profile email");
	}

	#[test]
	fn client_credentials_grant_carries_no_extra_fields() {
		let body = GrantRequest::client_credentials().into_body(&config());

		assert_eq!(field(&body, "grant_type"), "client_credentials");
		assert_eq!(body.len(), 4);
	}

	#[test]
	fn refresh_grant_carries_the_stored_refresh_token() {
		let body = GrantRequest::refresh("refresh-1").into_body(&config());

		assert_eq!(field(&body, "grant_type"), "refresh_token");
		assert_eq!(field(&body, "refresh_token"), "refresh-1");
	}

	#[test]
	fn debug_lists_field_names_without_values() {
		let rendered = format!("{:?}", GrantRequest::password("user@example.com", "hunter2"));

		assert!(rendered.contains("password"));
		assert!(!rendered.contains("hunter2"));
		assert!(!rendered.contains("user@example.com"));
	}
}
