//! Conversation state and the send lifecycle.
//!
//! `Conversation` owns the visible message list. `send` runs one user
//! utterance to a terminal outcome: it appends the user message and a
//! typing placeholder, drives the assistant client (rewriting the
//! placeholder with retry progress), then replaces the placeholder with
//! either the reply or a localized failure message plus an alert payload.

use crate::ai::composer::build_request;
use crate::ai::{AssistantClient, AssistantError, GenerativeBackend, RetryNotice};
use crate::types::{Message, Role};

/// Assistant greeting seeded into every new conversation.
pub const GREETING: &str =
    "Olá! Eu sou a IAtec, assistente da Etec de Peruíbe. Como posso ajudar você hoje?";

const TYPING_PLACEHOLDER: &str = "Digitando...";

/// Pre-flight rejections. Terminal request failures are not errors of
/// `send` itself; they come back as [`SendOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("não há mensagem para enviar")]
    EmptyMessage,
    #[error("já existe uma resposta em andamento")]
    Busy,
}

/// Alert payload for the embedding UI to raise on terminal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug)]
pub enum SendOutcome {
    Answered,
    Failed {
        alert: Alert,
        error: AssistantError,
    },
}

pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        let id = conversation.allocate_id();
        conversation
            .messages
            .push(Message::new(id, Role::Assistant, GREETING));
        conversation
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a reply is pending (the typing placeholder is present).
    pub fn is_busy(&self) -> bool {
        self.messages.iter().any(|message| message.is_loading)
    }

    /// Run one user utterance to a terminal outcome. Empty input and
    /// re-entrant sends are rejected up front; see [`SendError`].
    pub async fn send<B: GenerativeBackend>(
        &mut self,
        text: &str,
        client: &AssistantClient<B>,
    ) -> Result<SendOutcome, SendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendError::EmptyMessage);
        }
        if self.is_busy() {
            return Err(SendError::Busy);
        }

        tracing::debug!(chars = text.len(), "sending user message");

        // History snapshot is taken before the new entries are appended.
        let request = build_request(&self.messages, text, None);

        let user_id = self.allocate_id();
        self.messages.push(Message::new(user_id, Role::User, text));
        let placeholder_id = self.allocate_id();
        self.messages
            .push(Message::loading(placeholder_id, TYPING_PLACEHOLDER));

        let messages = &mut self.messages;
        let result = client
            .generate(&request, |notice| {
                if let Some(placeholder) = messages
                    .iter_mut()
                    .find(|message| message.id == placeholder_id)
                {
                    placeholder.content = progress_line(notice);
                }
            })
            .await;

        self.messages.retain(|message| !message.is_loading);

        match result {
            Ok(reply) => {
                let id = self.allocate_id();
                self.messages.push(Message::new(id, Role::Assistant, reply));
                tracing::info!(message_id = id, "assistant reply appended");
                Ok(SendOutcome::Answered)
            }
            Err(error) => {
                let (alert, chat_message) = failure_texts(&error);
                let id = self.allocate_id();
                self.messages
                    .push(Message::new(id, Role::Assistant, chat_message));
                Ok(SendOutcome::Failed { alert, error })
            }
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder text while a retry is pending, e.g. "(2/4)" before the
/// second of four attempts.
fn progress_line(notice: &RetryNotice) -> String {
    match notice.error {
        AssistantError::NetworkError(_) => format!(
            "Erro de conexão, tentando novamente... ({}/{})",
            notice.upcoming_attempt, notice.total_attempts
        ),
        _ => format!(
            "Servidor ocupado, tentando novamente... ({}/{})",
            notice.upcoming_attempt, notice.total_attempts
        ),
    }
}

/// PT-BR catalog for terminal failures: the alert pair plus the
/// assistant-voiced chat line that stays in the conversation.
fn failure_texts(error: &AssistantError) -> (Alert, &'static str) {
    match error {
        AssistantError::ServerOverloaded(_) => (
            Alert {
                title: "Servidor Sobrecarregado",
                body: "O servidor da IA está muito ocupado no momento. Já tentei 3 vezes \
                       mas não consegui. Por favor, aguarde alguns segundos e tente novamente.",
            },
            "Desculpe, o servidor está muito ocupado no momento. 😔 Por favor, \
             aguarde um pouquinho e tente novamente.",
        ),
        AssistantError::RateLimited(_) => (
            Alert {
                title: "Muitas Requisições",
                body: "Você está enviando mensagens muito rápido. Por favor, aguarde \
                       um momento antes de tentar novamente.",
            },
            "Você está enviando mensagens muito rápido. ⏱️ Por favor, aguarde um momento.",
        ),
        AssistantError::NetworkError(_) => (
            Alert {
                title: "Erro de Rede",
                body: "Verifique sua conexão com a internet e tente novamente.",
            },
            "Não consegui me conectar à internet. 📡 Verifique sua conexão e tente novamente.",
        ),
        AssistantError::MalformedResponse | AssistantError::Unknown { .. } => (
            Alert {
                title: "Erro de Conexão",
                body: "Não foi possível conectar com a IAtec. Verifique sua conexão \
                       e tente novamente.",
            },
            "Desculpe, estou com dificuldades para responder agora. Por favor, \
             tente novamente em alguns instantes.",
        ),
    }
}
