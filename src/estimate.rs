/// One estimation cycle: encode → request → parse
///
/// The cycle is a single linear async task. The session guarantees that
/// only one runs at a time, so there is no locking here.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::gemini::{self, GenerateContentRequest};
use crate::api::Transport;
use crate::config::ApiConfig;
use crate::error::EstimateError;
use crate::photo;
use crate::state::data::{EstimationResult, SelectedImage};

/// Stages of an estimation cycle, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Encoding,
    Requesting,
    Parsing,
}

/// Runs estimation cycles against the configured API
#[derive(Debug, Clone)]
pub struct Estimator<T> {
    transport: T,
    config: Arc<ApiConfig>,
}

impl<T: Transport> Estimator<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Run one full cycle for the given image
    ///
    /// Makes exactly one HTTP request unless encoding fails first.
    pub async fn estimate(self, image: SelectedImage) -> Result<EstimationResult, EstimateError> {
        debug!(phase = ?Phase::Encoding, "Encoding {}", image.file_name);
        let data = photo::encode_image(&image.path).await?;

        debug!(phase = ?Phase::Requesting, "Sending {} base64 chars", data.len());
        info!("📤 Requesting estimate for {}", image.file_name);
        let request = GenerateContentRequest::for_photo(&image.mime_type, data);
        let response = self
            .transport
            .post_json(self.config.request_url(), request)
            .await?;

        debug!(phase = ?Phase::Parsing, "HTTP {}", response.status);
        let outcome = gemini::interpret_response(response.status, &response.body);

        match &outcome {
            Ok(result) => info!("✅ Estimate: {} ({})", result.description, result.calories),
            Err(e) => warn!("❌ Estimate failed: {e}"),
        }

        outcome
    }
}
