use reqwest::Client;
use url::Url;

use crate::{errors::GatewayError, http::client::create_client, settings::GatewayConfig};

/// Resume backend reached over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    pub client: Client,
    pub base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = create_client(config)
            .map_err(|e| GatewayError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpGateway {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Joins `path` (and an optional id) onto the base URL, keeping any
    /// prefix the base URL carries. The id is percent-encoded as one segment.
    pub fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}
