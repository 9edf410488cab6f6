use std::future::Future;

use tracing::debug;

use super::gemini::GenerateContentRequest;
use crate::error::NetworkError;

/// Status and body of an HTTP answer, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one JSON POST and returns the raw answer
///
/// Implementations make exactly one attempt: no retry and no timeout.
pub trait Transport: Clone + Send + Sync + 'static {
    fn post_json(
        &self,
        url: String,
        request: GenerateContentRequest,
    ) -> impl Future<Output = Result<HttpResponse, NetworkError>> + Send;
}

/// Real transport backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: String,
        request: GenerateContentRequest,
    ) -> impl Future<Output = Result<HttpResponse, NetworkError>> + Send {
        let client = self.client.clone();

        async move {
            let response = client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        NetworkError::Connection(e.to_string())
                    } else {
                        NetworkError::Request(e)
                    }
                })?;

            let status = response.status().as_u16();
            let body = response.text().await?;

            debug!("📥 HTTP {} ({} bytes)", status, body.len());

            Ok(HttpResponse { status, body })
        }
    }
}
