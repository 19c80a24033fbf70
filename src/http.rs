//! Transport primitives for calls against the authentication API.
//!
//! The module exposes [`AuthHttpClient`] alongside the transport-neutral [`ApiRequest`] and
//! [`ApiResponse`] so downstream crates can plug in custom HTTP stacks (or test fakes)
//! without touching the console. The default implementation wraps reqwest.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, HeaderMap, HeaderValue};
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, auth::Secret};

/// Boxed, `Send` future returned by transports.
pub type HttpFuture<T> = Pin<Box<dyn Future<Output = T> + 'static + Send>>;

/// Abstraction over HTTP transports able to execute API requests.
///
/// Implementations must be `Send + Sync + 'static` and return owning futures so console
/// operations can be spawned onto any executor and left to complete on their own.
pub trait AuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request`, resolving with any HTTP response (including error statuses).
	///
	/// Only failures that prevent a response from arriving are reported as errors.
	fn send(&self, request: ApiRequest) -> HttpFuture<Result<ApiResponse, Self::TransportError>>;
}

/// HTTP method used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl Method {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-neutral request description.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Token sent as `Authorization: Bearer <token>`.
	pub bearer: Option<Secret>,
	/// Value sent as `Accept-Language`.
	pub language: Option<String>,
	/// JSON request body.
	pub body: Option<Value>,
}
impl ApiRequest {
	/// Creates a `GET` request without headers or body.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, bearer: None, language: None, body: None }
	}

	/// Creates a `POST` request carrying a JSON body.
	pub fn post_json(url: Url, body: Value) -> Self {
		Self { method: Method::Post, url, bearer: None, language: None, body: Some(body) }
	}

	/// Attaches a bearer token.
	pub fn with_bearer(mut self, token: Secret) -> Self {
		self.bearer = Some(token);

		self
	}

	/// Attaches an Accept-Language value.
	pub fn with_language(mut self, language: Option<String>) -> Self {
		self.language = language;

		self
	}

	/// Full `Authorization` header value, if a bearer token is attached.
	pub fn authorization(&self) -> Option<String> {
		self.bearer.as_ref().map(|token| format!("Bearer {}", token.expose()))
	}
}

/// Response captured by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from a status and body bytes.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Strictly decodes the body as JSON.
	pub fn json(&self) -> Result<Value, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}

	/// Body for display: JSON when it parses, the text otherwise, nothing when empty.
	pub fn display_body(&self) -> Option<Value> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return None;
		}

		match self.json() {
			Ok(value) => Some(value),
			Err(_) => Some(Value::String(String::from_utf8_lossy(&self.body).into_owned())),
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// `User-Agent` sent by clients built with [`ReqwestHttpClient::new`].
	pub const USER_AGENT: &'static str =
		concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

	/// Builds a client that sends [`Self::USER_AGENT`] and `Accept: application/json` on
	/// every request.
	pub fn new() -> Result<Self, ConfigError> {
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		let client =
			ReqwestClient::builder().user_agent(Self::USER_AGENT).default_headers(headers).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn send(&self, request: ApiRequest) -> HttpFuture<Result<ApiResponse, Self::TransportError>> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = match request.method {
				Method::Get => client.get(request.url.clone()),
				Method::Post => client.post(request.url.clone()),
			};

			if let Some(value) = request.authorization() {
				builder = builder.header(AUTHORIZATION, value);
			}
			if let Some(language) = &request.language {
				builder = builder.header(ACCEPT_LANGUAGE, language.as_str());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(ApiResponse { status, body })
		})
	}
}
