/// Reve Client — the single point of entry for all generation API calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the Reve API directly.
/// All image generation MUST go through this module.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_API_BASE_URL: &str = "https://api.reve.com/v1";
/// All generated images use the poster aspect ratio.
const ASPECT_RATIO: &str = "2:3";
/// Always track the service's latest model version.
const MODEL_VERSION: &str = "latest";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ReveError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("base64 image decode error: {0}")]
    ImageDecode(#[from] base64::DecodeError),

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    prompt: &'a str,
    aspect_ratio: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct RemixRequest<'a> {
    prompt: &'a str,
    reference_images: &'a [String],
    aspect_ratio: &'a str,
    version: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    request_id: String,
    credits_used: u32,
    credits_remaining: u32,
    #[serde(default)]
    content_violation: bool,
    /// Base64-encoded image payload; absent when the service returns none.
    image: Option<String>,
}

/// A decoded generation result.
///
/// `content_violation` is non-fatal: the service processed the request but
/// flagged the content, and `image` is typically absent. Callers decide how to
/// surface it.
#[derive(Debug)]
pub struct GeneratedImage {
    pub request_id: String,
    pub credits_used: u32,
    pub credits_remaining: u32,
    pub content_violation: bool,
    pub image: Option<Vec<u8>>,
}

impl GeneratedImage {
    fn decode(response: GenerationResponse) -> Result<Self, ReveError> {
        let image = response.image.map(|b64| BASE64.decode(b64)).transpose()?;
        Ok(Self {
            request_id: response.request_id,
            credits_used: response.credits_used,
            credits_remaining: response.credits_remaining,
            content_violation: response.content_violation,
            image,
        })
    }
}

/// The single Reve API client used by all commands.
/// Wraps the create/remix endpoints with retry logic and base64 decoding.
#[derive(Clone)]
pub struct ReveClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ReveClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL.to_string())
    }

    /// Overrides the API base URL (integration tests, staging).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Generates an image from a text prompt (`POST /image/create`).
    pub async fn create_image(&self, prompt: &str) -> Result<GeneratedImage, ReveError> {
        let body = CreateRequest {
            prompt,
            aspect_ratio: ASPECT_RATIO,
            version: MODEL_VERSION,
        };
        self.post_generation("image/create", &body).await
    }

    /// Remixes reference images under a text prompt (`POST /image/remix`).
    ///
    /// `reference_images` are base64-encoded PNGs, referenced from the prompt
    /// as `<img>1</img>`, `<img>2</img>`, … in order.
    pub async fn remix_image(
        &self,
        prompt: &str,
        reference_images: &[String],
    ) -> Result<GeneratedImage, ReveError> {
        let body = RemixRequest {
            prompt,
            reference_images,
            aspect_ratio: ASPECT_RATIO,
            version: MODEL_VERSION,
        };
        self.post_generation("image/remix", &body).await
    }

    /// Posts a generation request, retrying 429 and 5xx responses with
    /// exponential backoff (1s, 2s, 4s).
    async fn post_generation<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GeneratedImage, ReveError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut last_error: Option<ReveError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Reve call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .header("accept", "application/json")
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ReveError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Reve API returned {}: {}", status, body);
                last_error = Some(ReveError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ReveError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generation: GenerationResponse = response.json().await?;

            debug!(
                request_id = %generation.request_id,
                credits_used = generation.credits_used,
                "Reve call succeeded"
            );

            return GeneratedImage::decode(generation);
        }

        Err(last_error.unwrap_or(ReveError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_decodes_base64_image() {
        let json = r#"{
            "request_id": "req-123",
            "credits_used": 1,
            "credits_remaining": 41,
            "image": "aGVsbG8="
        }"#;
        let response: GenerationResponse = serde_json::from_str(json).expect("valid response");
        assert!(!response.content_violation, "flag defaults to false");

        let generated = GeneratedImage::decode(response).expect("valid base64");
        assert_eq!(generated.request_id, "req-123");
        assert_eq!(generated.credits_remaining, 41);
        assert_eq!(generated.image.as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_response_without_image_field() {
        let json = r#"{
            "request_id": "req-456",
            "credits_used": 1,
            "credits_remaining": 40,
            "content_violation": true
        }"#;
        let response: GenerationResponse = serde_json::from_str(json).expect("valid response");
        let generated = GeneratedImage::decode(response).expect("no image to decode");
        assert!(generated.content_violation);
        assert!(generated.image.is_none());
    }

    #[test]
    fn test_malformed_base64_is_decode_error() {
        let response = GenerationResponse {
            request_id: "req-789".to_string(),
            credits_used: 1,
            credits_remaining: 39,
            content_violation: false,
            image: Some("not!!valid@@base64".to_string()),
        };
        assert!(matches!(
            GeneratedImage::decode(response),
            Err(ReveError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_create_request_wire_shape() {
        let body = CreateRequest {
            prompt: "a lighthouse at dusk",
            aspect_ratio: ASPECT_RATIO,
            version: MODEL_VERSION,
        };
        let json = serde_json::to_value(&body).expect("serializable");
        assert_eq!(json["prompt"], "a lighthouse at dusk");
        assert_eq!(json["aspect_ratio"], "2:3");
        assert_eq!(json["version"], "latest");
    }

    #[test]
    fn test_remix_request_carries_reference_images() {
        let refs = vec!["AAAA".to_string(), "BBBB".to_string()];
        let body = RemixRequest {
            prompt: "compose a poster",
            reference_images: &refs,
            aspect_ratio: ASPECT_RATIO,
            version: MODEL_VERSION,
        };
        let json = serde_json::to_value(&body).expect("serializable");
        assert_eq!(json["reference_images"].as_array().map(Vec::len), Some(2));
    }
}
