use reqwest::Client;
use tracing::info;

use crate::settings::GatewayConfig;

/// Builds the HTTP client used for every backend call.
///
/// Requests are never retried; a failed call is reported once.
pub fn create_client(config: &GatewayConfig) -> Result<Client, reqwest::Error> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    info!("HTTP client ready for backend {}", config.base_url);
    Ok(client)
}
