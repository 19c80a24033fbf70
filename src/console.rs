//! The auth console: log in, remember the bearer token, call the current-user endpoint.
//!
//! [`AuthConsole`] is a cheap, cloneable handle. Triggering an operation immediately writes a
//! pending message to the display and returns an owning future; the request runs when that
//! future is polled (awaited or spawned). Completions overwrite the shared [`Session`]
//! without coordination, so when operations overlap the last response to arrive wins.
//! Every failure (transport, status, or body) is rendered the same way: the serialized
//! [`RequestError`] becomes the display text.

// self
use crate::{
	_prelude::*,
	api::LoginResponse,
	auth::{Credentials, Secret},
	config::ClientConfig,
	error::RequestError,
	http::{ApiRequest, AuthHttpClient},
	obs::{OpKind, OpOutcome, OpSpan},
	session::Session,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Marker that opens the display text after a successful login.
pub const LOGIN_OK: &str = "LOGIN OK";
/// Display text while a login is in flight.
pub const LOGIN_PENDING: &str = "Logging in...";
/// Display text while a current-user call is in flight.
pub const ME_PENDING: &str = "Calling /api/auth/me...";

/// Owning future returned by console operations; safe to spawn.
pub type OpFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + 'static + Send>>;

#[cfg(feature = "reqwest")]
/// Console specialized for the crate's default reqwest transport.
pub type ReqwestConsole = AuthConsole<ReqwestHttpClient>;

/// Client for the authentication API that keeps its token and last outcome in memory.
pub struct AuthConsole<C>
where
	C: AuthHttpClient,
{
	/// HTTP transport used for every request.
	pub http_client: Arc<C>,
	/// Endpoint, language, and credential settings.
	pub config: Arc<ClientConfig>,
	session: Session,
}
impl<C> AuthConsole<C>
where
	C: AuthHttpClient,
{
	/// Creates a console that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			config: Arc::new(config),
			session: Session::default(),
		}
	}

	/// Shared session backing this console and its clones.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Stored bearer token; empty before the first successful login.
	pub fn token(&self) -> Secret {
		self.session.token()
	}

	/// Current display text.
	pub fn display(&self) -> String {
		self.session.display()
	}

	/// Logs in with the configured credentials.
	pub fn login(&self) -> OpFuture<LoginResponse> {
		self.login_with(self.config.credentials.clone())
	}

	/// Logs in with explicit credentials.
	///
	/// On success the token is stored and the display becomes [`LOGIN_OK`], a blank line,
	/// and the pretty-printed response body. On failure the token is left untouched and the
	/// display becomes the pretty-printed error.
	pub fn login_with(&self, credentials: Credentials) -> OpFuture<LoginResponse> {
		const KIND: OpKind = OpKind::Login;

		let span = OpSpan::start(KIND, "login");

		self.session.set_display(LOGIN_PENDING);

		let http_client = self.http_client.clone();
		let config = self.config.clone();
		let session = self.session.clone();

		Box::pin(span.clone().instrument(async move {
			let body = serde_json::json!({
				"username": credentials.username,
				"password": credentials.password.expose(),
			});
			let request = ApiRequest::post_json(config.login_url().clone(), body)
				.with_language(config.language.clone());
			let url = request.url.to_string();
			let result = exchange(http_client.as_ref(), request).await.and_then(|(status, body)| {
				match LoginResponse::from_json(&body) {
					Ok(response) => Ok((status, response, body)),
					Err(e) => Err(RequestError::malformed(url, status, Some(body), e)),
				}
			});

			match result {
				Ok((status, response, body)) => {
					session.store_login(
						response.token.clone(),
						format!("{LOGIN_OK}\n\n{}", pretty(&body)),
					);
					span.finish(OpOutcome::Success, Some(status));

					Ok(response)
				},
				Err(e) => {
					session.set_display(e.to_pretty_json());
					span.finish(OpOutcome::Failure, e.status);

					Err(Error::from(e))
				},
			}
		}))
	}

	/// Calls the current-user endpoint with the stored token as a bearer credential.
	///
	/// The token is read when the call is triggered. On success the display becomes the
	/// pretty-printed response body; on failure the pretty-printed error.
	pub fn call_me(&self) -> OpFuture<Value> {
		const KIND: OpKind = OpKind::Me;

		let span = OpSpan::start(KIND, "call_me");

		self.session.set_display(ME_PENDING);

		let http_client = self.http_client.clone();
		let session = self.session.clone();
		let token = self.session.token();
		let mut request = ApiRequest::get(self.config.me_url().clone())
			.with_language(self.config.language.clone());

		if !token.is_empty() {
			request = request.with_bearer(token);
		}

		Box::pin(span.clone().instrument(async move {
			match exchange(http_client.as_ref(), request).await {
				Ok((status, body)) => {
					session.set_display(pretty(&body));
					span.finish(OpOutcome::Success, Some(status));

					Ok(body)
				},
				Err(e) => {
					session.set_display(e.to_pretty_json());
					span.finish(OpOutcome::Failure, e.status);

					Err(Error::from(e))
				},
			}
		}))
	}
}
#[cfg(feature = "reqwest")]
impl AuthConsole<ReqwestHttpClient> {
	/// Creates a console backed by [`ReqwestHttpClient::new`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for AuthConsole<C>
where
	C: AuthHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			session: self.session.clone(),
		}
	}
}
impl<C> Debug for AuthConsole<C>
where
	C: AuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthConsole")
			.field("base_url", &self.config.base_url.as_str())
			.field("language", &self.config.language)
			.field("token_set", &self.session.has_token())
			.finish()
	}
}

/// Pretty-prints a value as two-space indented JSON.
pub fn pretty<T>(value: &T) -> String
where
	T: ?Sized + Serialize,
{
	serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string())
}

/// Sends `request` and returns the status with the decoded JSON body of a 2xx response.
///
/// An empty success body decodes as `null`.
async fn exchange<C>(http_client: &C, request: ApiRequest) -> Result<(u16, Value), RequestError>
where
	C: AuthHttpClient,
{
	let url = request.url.to_string();
	let response =
		http_client.send(request).await.map_err(|e| RequestError::network(url.clone(), e))?;

	if !response.is_success() {
		return Err(RequestError::from_status(url, response.status, response.display_body()));
	}
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return Ok((response.status, Value::Null));
	}

	match response.json() {
		Ok(body) => Ok((response.status, body)),
		Err(e) => Err(RequestError::malformed(url, response.status, response.display_body(), e)),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn pretty_matches_two_space_json() {
		let value = serde_json::json!({ "user": "admin", "roles": ["ROLE_ADMIN"] });

		assert_eq!(
			pretty(&value),
			"{\n  \"user\": \"admin\",\n  \"roles\": [\n    \"ROLE_ADMIN\"\n  ]\n}"
		);
	}
}
