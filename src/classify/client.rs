//! HTTP client for the remote semantic classification service.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language::TargetLanguage;
use crate::tracker::SemanticLabel;

/// The service identifies at most one prominent object but may return a few
/// candidates; anything past this is dropped.
const MAX_OBJECTS: usize = 3;

/// Error type for classification calls.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The service rate-limited us. Carries the server-suggested retry
    /// delay when one was present in the response.
    #[error("classification rate limited")]
    RateLimited { retry_after: Option<Duration> },
    /// The service answered with a non-success status other than 429.
    #[error("classification service returned http {0}")]
    Status(u16),
    /// The request never completed (DNS, connect, timeout).
    #[error("classification transport failure: {0}")]
    Transport(String),
    /// The response body did not match the wire contract.
    #[error("classification response malformed: {0}")]
    Malformed(String),
}

/// Configuration for [`VisionClient`].
#[derive(Debug, Clone)]
pub struct VisionClientConfig {
    /// Classification endpoint URL.
    pub endpoint: String,
    /// Hard per-request timeout.
    pub timeout: Duration,
}

impl Default for VisionClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/api/vision".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyRequest<'a> {
    image: String,
    target_language: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    #[serde(default)]
    objects: Vec<SemanticLabel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitBody {
    retry_after: Option<f64>,
}

/// Blocking client for the semantic classification service.
///
/// Sends a downscaled JPEG still and the target language code; receives the
/// service's translated-object records. Callers run this off the frame loop
/// and hand the result back through the pipeline.
pub struct VisionClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl VisionClient {
    pub fn new(config: VisionClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self {
            agent,
            endpoint: config.endpoint,
        }
    }

    /// Classify one frame snapshot.
    pub fn classify(
        &self,
        jpeg: &[u8],
        language: TargetLanguage,
    ) -> Result<Vec<SemanticLabel>, ClassifyError> {
        let request = ClassifyRequest {
            image: BASE64_STANDARD.encode(jpeg),
            target_language: language.code(),
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| ClassifyError::Malformed(format!("request encoding: {e}")))?;

        match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(response) => {
                let payload: ClassifyResponse =
                    serde_json::from_reader(response.into_reader())
                        .map_err(|e| ClassifyError::Malformed(e.to_string()))?;
                Ok(payload.objects.into_iter().take(MAX_OBJECTS).collect())
            }
            Err(ureq::Error::Status(429, response)) => {
                let header = response.header("Retry-After").map(str::to_owned);
                let body = response.into_string().ok();
                Err(ClassifyError::RateLimited {
                    retry_after: retry_after_hint(header.as_deref(), body.as_deref()),
                })
            }
            Err(ureq::Error::Status(code, _)) => Err(ClassifyError::Status(code)),
            Err(err) => Err(ClassifyError::Transport(err.to_string())),
        }
    }
}

/// Extract the server-suggested retry delay from a 429 response.
///
/// Prefers the standard `Retry-After` header (delta-seconds form), then a
/// `retryAfter` field in a JSON error body. Returns `None` when neither is
/// present so the caller falls back to its configured default.
fn retry_after_hint(header: Option<&str>, body: Option<&str>) -> Option<Duration> {
    if let Some(value) = header {
        if let Ok(secs) = value.trim().parse::<u64>() {
            return Some(Duration::from_secs(secs));
        }
    }
    let body = body?;
    let parsed: RateLimitBody = serde_json::from_str(body).ok()?;
    let secs = parsed.retry_after?;
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
