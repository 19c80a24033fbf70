//! Wire model of the authentication API: endpoint paths and response bodies.

// crates.io
use serde::Deserializer;
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, auth::Secret};

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// Current-user endpoint, relative to the base URL.
pub const ME_PATH: &str = "/api/auth/me";

/// Body returned by a successful login.
///
/// Only `token` is required; the backend also reports the token type and expiry, which are
/// kept when they parse.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	/// Bearer token presented to protected endpoints.
	pub token: Secret,
	/// Token scheme announced by the backend, normally `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Expiry instant, accepted as an RFC 3339 string or a Unix timestamp.
	#[serde(default, deserialize_with = "lenient_instant")]
	pub expires_at: Option<OffsetDateTime>,
}
impl LoginResponse {
	/// Decodes a login body; any object with a string `token` (even an empty one) is accepted.
	pub fn from_json(body: &Value) -> Result<Self, LoginBodyError> {
		serde_path_to_error::deserialize(body)
	}
}

/// Decoding failure for a login body, carrying the offending field path.
pub type LoginBodyError = serde_path_to_error::Error<serde_json::Error>;

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	let instant = match value {
		Some(Value::String(raw)) => OffsetDateTime::parse(&raw, &Rfc3339).ok(),
		Some(Value::Number(n)) => n
			.as_i64()
			.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
			.or_else(|| {
				n.as_f64().and_then(|secs| {
					OffsetDateTime::from_unix_timestamp_nanos((secs * 1e9) as i128).ok()
				})
			}),
		_ => None,
	};

	Ok(instant)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn decodes_backend_login_body() {
		let body = json!({
			"tokenType": "Bearer",
			"token": "abc123",
			"expiresAt": "2025-01-01T12:00:00Z"
		});
		let response = LoginResponse::from_json(&body).expect("Login body should decode.");

		assert_eq!(response.token.expose(), "abc123");
		assert_eq!(response.token_type.as_deref(), Some("Bearer"));
		assert_eq!(response.expires_at, Some(datetime!(2025-01-01 12:00:00 UTC)));
	}

	#[test]
	fn token_alone_is_enough() {
		let response = LoginResponse::from_json(&json!({ "token": "abc123" }))
			.expect("A bare token body should decode.");

		assert!(response.token_type.is_none());
		assert!(response.expires_at.is_none());
	}

	#[test]
	fn numeric_expiry_is_accepted() {
		let response = LoginResponse::from_json(&json!({ "token": "t", "expiresAt": 1735732800 }))
			.expect("Epoch expiry should decode.");

		assert_eq!(response.expires_at, Some(datetime!(2025-01-01 12:00:00 UTC)));
	}

	#[test]
	fn missing_or_mistyped_token_reports_path() {
		let err = LoginResponse::from_json(&json!({ "tokenType": "Bearer" }))
			.expect_err("A body without token must be rejected.");

		assert!(err.inner().to_string().contains("missing field `token`"));

		let err = LoginResponse::from_json(&json!({ "token": 42 }))
			.expect_err("A numeric token must be rejected.");

		assert_eq!(err.path().to_string(), "token");
	}

	#[test]
	fn empty_token_is_accepted() {
		let response = LoginResponse::from_json(&json!({ "token": "" }))
			.expect("An empty string is still a string token.");

		assert!(response.token.is_empty());
	}
}
