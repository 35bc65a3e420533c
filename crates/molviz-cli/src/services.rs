pub mod pubchem;
pub mod translate;

use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("molviz/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for every lookup service.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}
