use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use lazy_static::lazy_static;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use url::Url;

lazy_static! {
    static ref CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error("Failed to fetch request from {url}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest_middleware::Error,
    },
    #[error("Request to {url} failed with status {status}")]
    Status { url: Url, status: StatusCode },
    #[error("Failed to read response body from {url}")]
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything able to perform a single HTTP GET and hand back the raw body.
///
/// A non-2xx status is reported as [`HttpClientError::Status`], never as a body.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get_bytes(&self, url: Url) -> Result<Bytes, HttpClientError>;
}

/// The process-wide reqwest client. Requests are traced but never retried.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpClient;

#[async_trait]
impl HttpGet for HttpClient {
    async fn get_bytes(&self, url: Url) -> Result<Bytes, HttpClientError> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .map_err(|source| HttpClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpClientError::Status { url, status });
        }

        response
            .bytes()
            .await
            .map_err(|source| HttpClientError::Body { url, source })
    }
}

pub async fn get_json<DTO: DeserializeOwned>(
    client: &dyn HttpGet,
    url: Url,
) -> anyhow::Result<DTO> {
    let bytes = client.get_bytes(url.clone()).await?;
    serde_json::from_slice::<DTO>(&bytes)
        .with_context(|| format!("Failed to deserialize response from {url}"))
}
