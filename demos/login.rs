//! Demonstrates logging in, calling the current-user endpoint, and reading the display text
//! against a mock placemat backend.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use placemat_client::{config::ClientConfig, console::AuthConsole, url::Url};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).header("content-type", "application/json").body(
				"{\"tokenType\":\"Bearer\",\"token\":\"demo-token\",\"expiresAt\":\"2030-01-01T00:00:00Z\"}",
			);
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer demo-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"username\":\"admin\"}");
		})
		.await;
	let config = ClientConfig::builder().base_url(Url::parse(&server.base_url())?).build()?;
	let console = AuthConsole::new(config)?;

	console.login().await?;
	println!("{}\n", console.display());

	console.call_me().await?;
	println!("{}", console.display());

	login_mock.assert_async().await;
	me_mock.assert_async().await;

	Ok(())
}
