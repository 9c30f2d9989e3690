//! Request composition for the generateContent endpoint.
//!
//! Pure transformation: conversation history plus the new utterance in, a
//! serializable payload out. The history window keeps the last
//! [`HISTORY_WINDOW`] non-loading messages so the model has short-term
//! context without unbounded prompt growth.

use serde::Serialize;

use crate::config::SYSTEM_PROMPT;
use crate::types::{Message, Role};

/// Upper bound on history entries included in one request.
pub const HISTORY_WINDOW: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_output_tokens: 1024,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        _ => "model",
    }
}

/// Build the payload for one send.
///
/// `history` is the conversation as it stood before the new utterance;
/// loading placeholders and empty entries never reach the wire. The new
/// user text goes last, after the windowed history.
pub fn build_request(
    history: &[Message],
    user_text: &str,
    extra_context: Option<&str>,
) -> GenerateContentRequest {
    let system_prompt = match extra_context {
        Some(ctx) if !ctx.trim().is_empty() => {
            format!("{SYSTEM_PROMPT}\n\nContexto adicional:\n{ctx}")
        }
        _ => SYSTEM_PROMPT.to_string(),
    };

    let eligible: Vec<&Message> = history
        .iter()
        .filter(|m| !m.content.is_empty() && !m.is_loading)
        .collect();
    let window_start = eligible.len().saturating_sub(HISTORY_WINDOW);

    let mut contents: Vec<Content> = eligible[window_start..]
        .iter()
        .map(|m| Content::new(wire_role(m.role), m.content.clone()))
        .collect();
    contents.push(Content::new("user", user_text));

    GenerateContentRequest {
        system_instruction: Content::new("system", system_prompt),
        contents,
        generation_config: GenerationConfig::default(),
    }
}
