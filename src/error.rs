//! Client-level error types shared by the console, transport, and configuration layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Any failed call against the authentication API.
	#[error(transparent)]
	Request(#[from] RequestError),
}
impl Error {
	/// Returns the request failure, if this error came from an API call.
	pub fn as_request(&self) -> Option<&RequestError> {
		match self {
			Self::Request(e) => Some(e),
			Self::Config(_) => None,
		}
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL scheme `{scheme}` is not supported.")]
	UnsupportedScheme {
		/// Rejected scheme.
		scheme: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL cannot be used as a base for API paths.")]
	CannotBeABase,
	/// Endpoint URL could not be joined onto the base URL.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Language tag contains characters not allowed in a header value.
	#[error("Language `{language}` is not a valid Accept-Language value.")]
	InvalidLanguage {
		/// Rejected language tag.
		language: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// The single failure category of the API: the request did not yield a usable response.
///
/// Network errors, non-success statuses, and unusable bodies all land here. The value
/// serializes to JSON so it can be shown to the user verbatim; the transport-level source
/// is kept for [`std::error::Error::source`] but never serialized.
#[derive(Debug, Serialize, ThisError)]
#[error("Request to {url} failed: {message}")]
pub struct RequestError {
	/// Target URL of the failed request.
	pub url: String,
	/// HTTP status code, when a response arrived.
	pub status: Option<u16>,
	/// Human-readable summary of the failure.
	pub message: String,
	/// Response body, decoded as JSON when possible and as a string otherwise.
	pub body: Option<Value>,
	#[serde(skip)]
	#[source]
	source: Option<BoxError>,
}
impl RequestError {
	/// Builds a failure for a response that arrived with a non-success status.
	pub fn from_status(url: impl Into<String>, status: u16, body: Option<Value>) -> Self {
		let message = match body.as_ref().and_then(api_message) {
			Some(api) => format!("HTTP {status}: {api}"),
			None => format!("HTTP {status}"),
		};

		Self { url: url.into(), status: Some(status), message, body, source: None }
	}

	/// Builds a failure for a request that never produced a response.
	pub fn network(
		url: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self {
			url: url.into(),
			status: None,
			message: format!("Network error: {src}"),
			body: None,
			source: Some(Box::new(src)),
		}
	}

	/// Builds a failure for a successful status whose body could not be used.
	pub fn malformed(
		url: impl Into<String>,
		status: u16,
		body: Option<Value>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self {
			url: url.into(),
			status: Some(status),
			message: format!("Unexpected response body: {src}"),
			body,
			source: Some(Box::new(src)),
		}
	}

	/// Pretty-printed JSON form shown in the display state.
	pub fn to_pretty_json(&self) -> String {
		crate::console::pretty(self)
	}
}

/// Extracts the backend's `{ "code", "message" }` error message, if present.
fn api_message(body: &Value) -> Option<&str> {
	body.get("message").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_error_includes_backend_message() {
		let body = serde_json::json!({
			"code": "auth.invalid_credentials",
			"message": "Invalid username or password"
		});
		let err = RequestError::from_status("http://localhost/api/auth/login", 401, Some(body));

		assert_eq!(err.message, "HTTP 401: Invalid username or password");
		assert!(err.source().is_none());
	}

	#[test]
	fn serialized_form_skips_source() {
		let io = std::io::Error::other("connection refused");
		let err = RequestError::network("http://localhost/api/auth/me", io);
		let value = serde_json::to_value(&err).expect("Request errors should serialize.");

		assert_eq!(value["status"], Value::Null);
		assert_eq!(value["url"], "http://localhost/api/auth/me");
		assert!(value.get("source").is_none());
		assert!(err.source().is_some());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_builder_failure_becomes_config_error() {
		let reqwest_err = ReqwestClient::new()
			.get("http://[::1")
			.build()
			.expect_err("An unparsable URL should fail to build.");
		let err = Error::from(ConfigError::from(reqwest_err));

		assert!(matches!(err, Error::Config(ConfigError::HttpClientBuild { .. })));
		assert!(err.source().is_some());
		assert!(err.as_request().is_none());
	}
}
