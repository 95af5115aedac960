use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{AiError, GenerationRequest, GenerativeModel};

const JSON_MIME: &str = "application/json";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking client for the `generateContent` REST call.
pub struct GeminiClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: "GEMINI_API_KEY".into(),
        }
    }

    /// Name of the environment variable mentioned when the key is missing.
    pub fn with_key_hint(mut self, env_name: impl Into<String>) -> Self {
        self.api_key_env = env_name.into();
        self
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey(self.api_key_env.clone()))?;

        let body = GenerateContentBody {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME,
                response_schema: &request.response_schema,
            },
        };

        let url = self.url();
        debug!(%url, "sending generateContent request");
        let response = self
            .agent
            .post(&url)
            .set(API_KEY_HEADER, key)
            .send_json(&body)
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => AiError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => AiError::Transport(transport.to_string()),
            })?;

        let decoded: GenerateContentResponse = response
            .into_json()
            .map_err(|err| AiError::Malformed(err.to_string()))?;
        decoded.into_text().ok_or(AiError::EmptyResponse)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
