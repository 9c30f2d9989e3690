//! Application state: storage, session, theme, assistant client and the
//! active conversation, with explicit init and teardown.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::ai::{AssistantClient, GeminiBackend};
use crate::chat::Conversation;
use crate::config;
use crate::session::Session;
use crate::storage::{Storage, StorageError};
use crate::theme::ThemePreference;

const STORAGE_NAMESPACE: &str = "etecnotes";

pub struct App {
    pub storage: Storage,
    pub session: Session,
    pub theme: ThemePreference,
    pub client: AssistantClient<GeminiBackend>,
    pub conversation: Conversation,
}

impl App {
    /// Load configuration, open storage, restore persisted state and wire
    /// the Gemini-backed assistant client. Fails when the API key is not
    /// configured.
    pub fn init() -> Result<Self> {
        config::load_dotenv();

        let storage = Storage::open(STORAGE_NAMESPACE);
        let session = Session::restore(&storage);
        let theme = ThemePreference::restore(&storage);
        let client = AssistantClient::new(GeminiBackend::from_env()?);

        tracing::info!(
            authenticated = session.is_authenticated(),
            theme = theme.mode().as_str(),
            "application state initialized"
        );

        Ok(Self {
            storage,
            session,
            theme,
            client,
            conversation: Conversation::new(),
        })
    }

    /// Explicit session teardown.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.session.logout(&self.storage)
    }
}

/// Install the fmt subscriber, honoring `RUST_LOG`. Later calls are
/// no-ops, so embedders and tests may call this freely.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}
