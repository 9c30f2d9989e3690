//! etecnotes: headless core of the Etec de Peruíbe companion app.
//!
//! The center is the IAtec assistant path: request composition with a
//! bounded history window (`ai::composer`), the Gemini HTTP backend
//! (`ai::gemini`), a bounded-backoff retry controller (`ai::client`) and
//! the conversation state that turns outcomes into visible messages
//! (`chat`). Around it sit the persisted session and theme state
//! (`session`, `theme`) over a file-backed key/value store (`storage`),
//! wired together by `app::App`.

pub mod ai;
pub mod app;
pub mod chat;
pub mod config;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;

pub use app::App;
pub use chat::{Conversation, SendError, SendOutcome};
pub use types::{Message, Role};
