//! Client configuration: where the authentication API lives and how to talk to it.

// self
use crate::{_prelude::*, api, auth::Credentials, error::ConfigError};

/// Validated client configuration with resolved endpoint URLs.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base URL of the backend; endpoint paths are resolved beneath it.
	pub base_url: Url,
	/// Value sent as `Accept-Language`, if any.
	pub language: Option<String>,
	/// Credentials posted by [`AuthConsole::login`](crate::console::AuthConsole::login).
	pub credentials: Credentials,
	login_url: Url,
	me_url: Url,
}
impl ClientConfig {
	/// Backend address used when none is configured.
	pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";
	/// Language sent when none is configured.
	pub const DEFAULT_LANGUAGE: &'static str = "en";

	/// Starts a builder seeded with the local development defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	/// Resolved `POST` login endpoint.
	pub fn login_url(&self) -> &Url {
		&self.login_url
	}

	/// Resolved `GET` current-user endpoint.
	pub fn me_url(&self) -> &Url {
		&self.me_url
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Backend base URL; defaults to [`ClientConfig::DEFAULT_BASE_URL`].
	pub base_url: Option<Url>,
	/// Accept-Language value; defaults to [`ClientConfig::DEFAULT_LANGUAGE`].
	pub language: Option<String>,
	/// Login credentials; defaults to [`Credentials::dev`].
	pub credentials: Credentials,
}
impl ClientConfigBuilder {
	/// Creates a new builder with development defaults.
	pub fn new() -> Self {
		Self {
			base_url: None,
			language: Some(ClientConfig::DEFAULT_LANGUAGE.into()),
			credentials: Credentials::default(),
		}
	}

	/// Sets the backend base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the Accept-Language value.
	pub fn language(mut self, language: impl Into<String>) -> Self {
		self.language = Some(language.into());

		self
	}

	/// Stops sending an Accept-Language header.
	pub fn without_language(mut self) -> Self {
		self.language = None;

		self
	}

	/// Sets the credentials used by the default login.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = credentials;

		self
	}

	/// Validates the inputs and resolves endpoint URLs.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(ClientConfig::DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidEndpoint { source })?,
		};

		validate_base_url(&base_url)?;

		if let Some(language) = &self.language {
			validate_language(language)?;
		}

		let login_url = resolve(&base_url, api::LOGIN_PATH)?;
		let me_url = resolve(&base_url, api::ME_PATH)?;

		Ok(ClientConfig {
			base_url,
			language: self.language,
			credentials: self.credentials,
			login_url,
			me_url,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => {},
		other => return Err(ConfigError::UnsupportedScheme { scheme: other.into() }),
	}

	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase);
	}

	Ok(())
}

fn validate_language(language: &str) -> Result<(), ConfigError> {
	let valid = !language.trim().is_empty()
		&& language.chars().all(|c| c.is_ascii_graphic() || c == ' ');

	if valid {
		Ok(())
	} else {
		Err(ConfigError::InvalidLanguage { language: language.into() })
	}
}

/// Joins an API path beneath the base URL, keeping any path prefix the base carries.
fn resolve(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let mut base = base.clone();

	if !base.path().ends_with('/') {
		let prefixed = format!("{}/", base.path());

		base.set_path(&prefixed);
	}

	base.join(path.trim_start_matches('/'))
		.map_err(|source| ConfigError::InvalidEndpoint { source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn defaults_point_at_local_backend() {
		let config = ClientConfig::builder().build().expect("Default config should build.");

		assert_eq!(config.login_url().as_str(), "http://localhost:8080/api/auth/login");
		assert_eq!(config.me_url().as_str(), "http://localhost:8080/api/auth/me");
		assert_eq!(config.language.as_deref(), Some("en"));
		assert_eq!(config.credentials, Credentials::dev());
	}

	#[test]
	fn base_path_prefix_is_kept() {
		let config = ClientConfig::builder()
			.base_url(url("https://example.com/placemat"))
			.build()
			.expect("Prefixed base URL should build.");

		assert_eq!(config.login_url().as_str(), "https://example.com/placemat/api/auth/login");
		assert_eq!(config.me_url().as_str(), "https://example.com/placemat/api/auth/me");
	}

	#[test]
	fn rejects_unsupported_scheme() {
		let err = ClientConfig::builder()
			.base_url(url("ftp://example.com"))
			.build()
			.expect_err("FTP base URLs should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { scheme } if scheme == "ftp"));
	}

	#[test]
	fn rejects_header_unsafe_language() {
		let err = ClientConfig::builder()
			.language("en\r\nX-Evil: 1")
			.build()
			.expect_err("Control characters must not reach the header.");

		assert!(matches!(err, ConfigError::InvalidLanguage { .. }));

		let config = ClientConfig::builder()
			.without_language()
			.build()
			.expect("Config without language should build.");

		assert!(config.language.is_none());
	}
}
