//! Word list extraction from photos through a vision model.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::instrument;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

const EXTRACTION_PROMPT: &str = r#"You extract vocabulary lists from school textbook pages.

Step 1: decide which TWO languages appear on the photo.
Use ISO codes: nl, en, de, fr, es.
Example: nl + de.

Step 2: extract the word pairs from the photo.

Answer with EXACT JSON only, no extra text.

JSON schema:
{
  "languages": { "a": "nl", "b": "de" },
  "items": [
    { "a": "word in language a", "b": ["translation 1", "translation 2"] }
  ]
}

Rules:
- "a" and "b" are the two languages on the page.
- "b" may contain several synonyms.
- Skip anything that is unreadable.
"#;

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unreadable response: {0}")]
    InvalidResponse(String),
}

/// An uploaded photo of a word list.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageUpload {
    /// Base64 `data:` URL, defaulting to JPEG when the type is unknown.
    pub fn data_url(&self) -> String {
        let content_type = self
            .content_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        format!("data:{};base64,{}", content_type, STANDARD.encode(&self.bytes))
    }
}

/// Turns a photo into the model's raw text answer.
///
/// Parsing the text into a word list is left to the caller so the raw answer
/// can be reported when it is unusable.
#[async_trait]
pub trait WordListExtractor: Send + Sync {
    async fn extract(&self, image: &ImageUpload) -> Result<String, VisionError>;
}

/// Extractor backed by the OpenAI Responses API.
pub struct OpenAiExtractor {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiExtractor {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self, VisionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| VisionError::Network(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        })
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage>,
}

#[derive(Serialize)]
struct InputMessage {
    role: &'static str,
    content: Vec<InputContent>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent {
    InputText { text: String },
    InputImage { image_url: String, detail: &'static str },
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Convenience text if present, otherwise the first content part.
    fn into_text(self) -> String {
        self.output_text
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.output
                    .into_iter()
                    .next()
                    .and_then(|item| item.content.into_iter().next())
                    .and_then(|content| content.text)
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl WordListExtractor for OpenAiExtractor {
    #[instrument(skip(self, image), fields(model = %self.model, bytes = image.bytes.len()))]
    async fn extract(&self, image: &ImageUpload) -> Result<String, VisionError> {
        let body = ResponsesRequest {
            model: &self.model,
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    InputContent::InputText {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    InputContent::InputImage {
                        image_url: image.data_url(),
                        detail: "low",
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VisionError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    VisionError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(VisionError::Api { status, message });
        }

        let parsed: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;

        let text = parsed.into_text();
        tracing::debug!(chars = text.len(), "vision model answered");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upload() -> ImageUpload {
        ImageUpload {
            bytes: vec![0xff, 0xd8, 0xff],
            content_type: Some("image/png".to_string()),
        }
    }

    #[test]
    fn data_url_encodes_bytes() {
        assert_eq!(upload().data_url(), "data:image/png;base64,/9j/");
        let untyped = ImageUpload {
            bytes: b"hi".to_vec(),
            content_type: None,
        };
        assert_eq!(untyped.data_url(), "data:image/jpeg;base64,aGk=");
    }

    #[tokio::test]
    async fn reads_output_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({ "model": "gpt-4o-mini" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output_text": "{\"languages\":{\"a\":\"nl\",\"b\":\"de\"},\"items\":[]}"
            })))
            .mount(&server)
            .await;

        let extractor = OpenAiExtractor::new("test-key", &server.uri(), "gpt-4o-mini").unwrap();
        let text = extractor.extract(&upload()).await.unwrap();
        assert!(text.starts_with("{\"languages\""));
    }

    #[tokio::test]
    async fn falls_back_to_first_content_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": [{ "type": "message", "content": [{ "type": "output_text", "text": "hello" }] }]
            })))
            .mount(&server)
            .await;

        let extractor = OpenAiExtractor::new("k", &server.uri(), "gpt-4o-mini").unwrap();
        assert_eq!(extractor.extract(&upload()).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn empty_response_gives_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let extractor = OpenAiExtractor::new("k", &server.uri(), "gpt-4o-mini").unwrap();
        assert_eq!(extractor.extract(&upload()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let extractor = OpenAiExtractor::new("k", &server.uri(), "gpt-4o-mini").unwrap();
        let err = extractor.extract(&upload()).await.unwrap_err();
        assert!(matches!(err, VisionError::Api { status: 401, .. }));
    }
}
