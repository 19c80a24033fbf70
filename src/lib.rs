//! Thin async client for the placemat authentication API: log in, keep the bearer token in
//! memory, call protected endpoints, and render every outcome as display-ready JSON.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod obs;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		config::ClientConfig,
		console::{AuthConsole, ReqwestConsole},
		http::ReqwestHttpClient,
	};

	/// Builds the production reqwest transport for talking to plain-HTTP `httpmock` servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::new().expect("Failed to build Reqwest client for tests.")
	}

	/// Constructs an [`AuthConsole`] pointed at `base_url` with the provided credentials and
	/// the reqwest transport used across integration tests.
	pub fn build_reqwest_test_console(
		base_url: &str,
		username: &str,
		password: &str,
	) -> ReqwestConsole {
		let config = ClientConfig::builder()
			.base_url(Url::parse(base_url).expect("Failed to parse mock server URL."))
			.credentials(Credentials::new(username, password))
			.build()
			.expect("Failed to build test client config.");

		AuthConsole::with_http_client(config, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
