//! Gemini `generateContent` client

use super::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
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

/// The only finish reason for a complete answer.
const FINISH_STOP: &str = "STOP";

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated. Answers cut short
    /// (token limit, safety, ...) are errors.
    fn into_text(self) -> PipelineResult<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::Llm("response contained no candidates".to_string()))?;

        match candidate.finish_reason.as_deref() {
            Some(FINISH_STOP) => {}
            other => {
                return Err(PipelineError::Llm(format!(
                    "generation did not finish (finishReason: {})",
                    other.unwrap_or("missing")
                )))
            }
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(PipelineError::Llm("response contained no text".to_string()));
        }
        Ok(text)
    }
}

impl GeminiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: &str,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key: api_key.into(),
        }
    }

    /// Single-turn generation at temperature 0.
    pub async fn generate(&self, prompt: &str) -> PipelineResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<GenerateResponse>().await?.into_text()
    }
}
