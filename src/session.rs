//! In-memory session shared by every clone of a console.
//!
//! The session holds exactly two fields: the last bearer token obtained by a successful
//! login and the last display text. Neither is ever persisted. Writers take a short lock,
//! overwrite, and release; there is no ordering between concurrent writers, so whichever
//! operation completes last determines what the session shows.

// self
use crate::{_prelude::*, auth::Secret};

/// Characters of the token revealed by [`Session::token_preview`].
pub const TOKEN_PREVIEW_LEN: usize = 16;

/// Point-in-time copy of the session fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
	/// Last bearer token; empty until a login succeeds.
	pub token: Secret,
	/// Last human-readable outcome.
	pub display: String,
}

/// Thread-safe handle to the session fields; clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct Session(Arc<Mutex<SessionState>>);
impl Session {
	/// Returns the stored token (empty when no login has succeeded).
	pub fn token(&self) -> Secret {
		self.0.lock().token.clone()
	}

	/// Whether a token has been stored.
	pub fn has_token(&self) -> bool {
		!self.0.lock().token.is_empty()
	}

	/// First [`TOKEN_PREVIEW_LEN`] characters of the token, for status lines.
	pub fn token_preview(&self) -> Option<String> {
		let guard = self.0.lock();

		if guard.token.is_empty() {
			return None;
		}

		Some(guard.token.expose().chars().take(TOKEN_PREVIEW_LEN).collect())
	}

	/// Returns the current display text.
	pub fn display(&self) -> String {
		self.0.lock().display.clone()
	}

	/// Returns both fields as observed under a single lock.
	pub fn snapshot(&self) -> SessionState {
		self.0.lock().clone()
	}

	/// Overwrites the display text.
	pub fn set_display(&self, display: impl Into<String>) {
		self.0.lock().display = display.into();
	}

	/// Overwrites the token and the display text together.
	pub fn store_login(&self, token: Secret, display: impl Into<String>) {
		let mut guard = self.0.lock();

		guard.token = token;
		guard.display = display.into();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn new_session_is_empty() {
		let session = Session::default();

		assert!(!session.has_token());
		assert_eq!(session.token(), Secret::default());
		assert_eq!(session.token_preview(), None);
		assert_eq!(session.display(), "");
	}

	#[test]
	fn clones_share_state() {
		let session = Session::default();
		let other = session.clone();

		other.store_login(Secret::new("abc123"), "LOGIN OK");

		assert_eq!(session.token().expose(), "abc123");
		assert_eq!(session.display(), "LOGIN OK");

		session.set_display("Calling /api/auth/me...");

		assert_eq!(
			other.snapshot(),
			SessionState { token: Secret::new("abc123"), display: "Calling /api/auth/me...".into() }
		);
	}

	#[test]
	fn preview_truncates_long_tokens() {
		let session = Session::default();

		session.store_login(Secret::new("eyJhbGciOiJIUzI1NiJ9.payload.signature"), "");

		assert_eq!(session.token_preview().as_deref(), Some("eyJhbGciOiJIUzI1"));

		session.store_login(Secret::new("short"), "");

		assert_eq!(session.token_preview().as_deref(), Some("short"));
	}
}
