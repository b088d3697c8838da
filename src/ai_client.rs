use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(15);

/// Gemini text-generation client. Composition failures are never fatal to a
/// digest; the dispatch pipeline falls back to a local template instead.
pub struct AiClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    model: String,
}

#[derive(thiserror::Error, Debug)]
pub enum AiError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation response contained no candidates")]
    EmptyResponse,
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(serde::Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct TextPart {
    text: String,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    parts: Vec<TextPart>,
}

impl AiClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        model: String,
        timeout: Option<time::Duration>,
    ) -> AiClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        AiClient {
            http_client,
            base_url,
            api_key,
            model,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: String::from(prompt),
                }],
            }],
        };

        let response: GenerateResponse = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AiError::EmptyResponse)
    }
}
