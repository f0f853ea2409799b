// oauthdesk-api: Async client for the authorization service administration API

pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
