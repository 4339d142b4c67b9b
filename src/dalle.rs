use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Production endpoint for the OpenAI image-generation API.
pub const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    b64_json: String,
}

/// Thin client over the image-generation API. The API key is optional at
/// construction so the process can boot without one; `generate` fails before
/// any network call when it is absent.
#[derive(Debug, Clone)]
pub struct DalleClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl DalleClient {
    pub fn new(api_key: Option<String>) -> DalleClient {
        Self::with_base_url(api_key, OPENAI_IMAGES_URL)
    }

    /// Construct against a custom endpoint (used by tests).
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> DalleClient {
        DalleClient {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Generate one 1024x1024 image for the prompt and return its base64
    /// payload.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("OPENAI_API_KEY is not configured")?;

        let request = GenerationRequest {
            prompt,
            n: 1,
            size: "1024x1024",
            response_format: "b64_json",
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach image generation API")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_else(|_| "".to_string());
            bail!("Image generation API returned {status}: {detail}");
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .context("Failed to parse image generation response")?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|image| image.b64_json)
            .context("Image generation response contained no images")
    }
}
