//! Username/password pair posted to the login endpoint.

// self
use crate::{_prelude::*, auth::Secret};

/// Credentials sent as the JSON body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
	/// Account name.
	pub username: String,
	/// Plaintext password; redacted in debug output.
	pub password: Secret,
}
impl Credentials {
	/// Username seeded by the backend's development profile.
	pub const DEV_USERNAME: &'static str = "admin";
	/// Password seeded by the backend's development profile.
	pub const DEV_PASSWORD: &'static str = "admin";

	/// Creates a new credential pair.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: Secret::new(password) }
	}

	/// Returns the development seed account.
	pub fn dev() -> Self {
		Self::new(Self::DEV_USERNAME, Self::DEV_PASSWORD)
	}
}
impl Default for Credentials {
	fn default() -> Self {
		Self::dev()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credentials_serialize_as_login_body() {
		let body = serde_json::to_value(Credentials::new("alice", "p\"w"))
			.expect("Credentials should serialize.");

		assert_eq!(body, serde_json::json!({ "username": "alice", "password": "p\"w" }));
	}

	#[test]
	fn debug_output_hides_password() {
		let rendered = format!("{:?}", Credentials::dev());

		assert!(rendered.contains("admin"));
		assert!(rendered.contains("<redacted>"));
		assert_eq!(rendered.matches("admin").count(), 1);
	}
}
