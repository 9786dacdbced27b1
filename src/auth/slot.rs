//! The two independent credential domains served by the relay.

// self
use crate::_prelude::*;

/// Named storage location for one cached credential.
///
/// The two slots never share or merge state; the expiry of one is evaluated without consulting
/// the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialSlot {
	/// Application-level credential derived from the client id/secret pair.
	Application,
	/// User-level credential obtained through an explicit login.
	User,
}
impl CredentialSlot {
	/// Both slots, in storage order.
	pub const ALL: [Self; 2] = [Self::Application, Self::User];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialSlot::Application => "application",
			CredentialSlot::User => "user",
		}
	}

	pub(crate) const fn index(self) -> usize {
		match self {
			CredentialSlot::Application => 0,
			CredentialSlot::User => 1,
		}
	}
}
impl Display for CredentialSlot {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
