use serde::Serialize;

use super::PredictionError;
use crate::config::ServiceConfig;

/// HTTP client bound to the prediction webhook.
///
/// Cheap to clone; clones share one connection pool. No retries and no
/// backoff: every call is a single request.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, PredictionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PredictionError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `body` as JSON to the webhook.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<reqwest::Response, PredictionError> {
        self.client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))
    }

    /// GET the webhook with the given query parameters.
    pub async fn get_with_query(
        &self,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, PredictionError> {
        self.client
            .get(&self.endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, e: reqwest::Error) -> PredictionError {
        if e.is_connect() {
            PredictionError::Connection(self.endpoint.clone())
        } else if e.is_timeout() {
            PredictionError::Timeout(self.endpoint.clone())
        } else {
            PredictionError::HttpClient(e.to_string())
        }
    }
}

/// Reject non-2xx responses, then parse the body as JSON.
pub async fn success_json(
    response: reqwest::Response,
) -> Result<serde_json::Value, PredictionError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PredictionError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    any_json(response).await
}

/// Parse the body as JSON whatever the status code.
pub async fn any_json(response: reqwest::Response) -> Result<serde_json::Value, PredictionError> {
    response
        .json()
        .await
        .map_err(|e| PredictionError::ResponseParsing(e.to_string()))
}
