use super::GenerativeBackend;
use super::composer::GenerateContentRequest;
use super::error::AssistantError;
use crate::config::REQUEST_TIMEOUT;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Fallback when an HTTP error body carries no message.
const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(endpoint: String, api_key: String) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(crate::config::api_endpoint(), crate::config::api_key()?)
    }
}

// Success body: text lives at candidates[0].content.parts[0].text
#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// Error body: {"error": {"code": 503, "message": "..."}}
#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

/// Extract the candidate text from a success body. A body without the
/// expected path (or with empty text) is a malformed response.
pub fn parse_reply_text(body: &str) -> Result<String, AssistantError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| AssistantError::MalformedResponse)?;

    parsed
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or(AssistantError::MalformedResponse)
}

/// Classify a non-success response. The error body's code wins over the
/// HTTP status when present.
pub fn classify_http_error(status: u16, body: &str) -> AssistantError {
    let error_body = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error);

    let code = error_body
        .as_ref()
        .and_then(|body| body.code)
        .unwrap_or(status);
    let message = error_body
        .and_then(|body| body.message)
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

    AssistantError::from_status(code, message)
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            parse_reply_text(&body)
        } else {
            Err(classify_http_error(status.as_u16(), &body))
        }
    }
}
