use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{
    entities::{EditMethod, Resource, Stored},
    errors::GatewayError,
    repositories::http_repo::HttpGateway,
};

#[async_trait]
pub trait ResumeGateway: Send + Sync {
    /// Checks that the backend answers at all.
    async fn check_connection(&self) -> Result<(), GatewayError>;

    /// Fetches the full collection.
    async fn list<R: Resource>(&self) -> Result<Vec<Stored<R>>, GatewayError>;

    /// Fetches one record by id.
    async fn get<R: Resource>(&self, id: &str) -> Result<R, GatewayError>;

    /// Creates a record.
    async fn create<R: Resource>(&self, record: &R) -> Result<(), GatewayError>;

    /// Sends an edited record back, using the resource's edit method.
    async fn update<R: Resource>(&self, id: &str, record: &R) -> Result<(), GatewayError>;
}

/// Body the backend sends instead of a record when something is wrong.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(alias = "Error", alias = "error")]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Failure(ErrorPayload),
    Found(T),
}

impl HttpGateway {
    async fn fetch<T>(&self, url: Url, resource: &str) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| log_failure(&Method::GET, &url, e.into()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| log_failure(&Method::GET, &url, e.into()))?;

        let envelope = serde_json::from_slice::<Envelope<T>>(&body);
        let result = match envelope {
            Ok(Envelope::Failure(payload)) => Err(GatewayError::NotFound(payload.message)),
            _ if status == StatusCode::NOT_FOUND => {
                Err(GatewayError::NotFound(format!("Could not find that {resource}")))
            }
            _ if !status.is_success() => Err(GatewayError::Status(status.as_u16())),
            Ok(Envelope::Found(value)) => Ok(value),
            Err(e) => Err(e.into()),
        };

        result.map_err(|e| log_failure(&Method::GET, &url, e))
    }

    async fn send_json<R: Resource>(
        &self,
        method: Method,
        url: Url,
        record: &R,
    ) -> Result<(), GatewayError> {
        tracing::debug!("{} {}", method, url);
        let response = self
            .client
            .request(method.clone(), url.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| log_failure(&method, &url, e.into()))?;

        ensure_success(response).map_err(|e| log_failure(&method, &url, e))
    }
}

/// Decodes rows one at a time so an unreadable row is named in the error.
fn decode_rows<R: Resource>(rows: Vec<serde_json::Value>) -> Result<Vec<Stored<R>>, GatewayError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row)
                .map_err(|e| GatewayError::Decode(format!("{} row {}: {}", R::NAME, index, e)))
        })
        .collect()
}

fn ensure_success(response: Response) -> Result<(), GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::Status(status.as_u16()))
    }
}

fn log_failure(method: &Method, url: &Url, error: GatewayError) -> GatewayError {
    match &error {
        GatewayError::Transport(msg) => {
            tracing::error!("Transport failure on {} {}: {}", method, url, msg)
        }
        GatewayError::NotFound(msg) => tracing::info!("{} {} not found: {}", method, url, msg),
        other => tracing::warn!("{} {} failed: {}", method, url, other),
    }
    error
}

#[async_trait]
impl ResumeGateway for HttpGateway {
    async fn check_connection(&self) -> Result<(), GatewayError> {
        self.client
            .head(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn list<R: Resource>(&self) -> Result<Vec<Stored<R>>, GatewayError> {
        let url = self.endpoint(R::PATH, None)?;
        let rows = self.fetch(url.clone(), R::PLURAL).await?;
        decode_rows(rows).map_err(|e| log_failure(&Method::GET, &url, e))
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<R, GatewayError> {
        let url = self.endpoint(R::PATH, Some(id))?;
        self.fetch(url, R::NAME).await
    }

    async fn create<R: Resource>(&self, record: &R) -> Result<(), GatewayError> {
        let url = self.endpoint(R::PATH, None)?;
        self.send_json(Method::POST, url, record).await
    }

    async fn update<R: Resource>(&self, id: &str, record: &R) -> Result<(), GatewayError> {
        match R::EDIT_METHOD {
            EditMethod::Put => {
                let url = self.endpoint(R::PATH, Some(id))?;
                self.send_json(Method::PUT, url, record).await
            }
            EditMethod::Post => {
                let url = self.endpoint(R::PATH, None)?;
                self.send_json(Method::POST, url, record).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::skill::Skill;

    #[test]
    fn row_without_id_is_named_in_error() {
        let rows = vec![
            json!({ "_id": "a1", "name": "Go", "proficiency": "70%", "logo": "https://x.test/go.png" }),
            json!({ "name": "Rust", "proficiency": "90%", "logo": "https://x.test/rs.png" }),
        ];

        match decode_rows::<Skill>(rows) {
            Err(GatewayError::Decode(msg)) => {
                assert!(msg.starts_with("skill row 1:"), "{msg}");
                assert!(msg.contains("id"), "{msg}");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
