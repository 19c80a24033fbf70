//! Credential and secret primitives handed to the authentication API.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
