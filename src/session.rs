//! Authenticated-session state.
//!
//! A `Session` is restored from storage at startup (profile only, never
//! the authenticated flag), authenticated by `login` and torn down by
//! `logout`. The profile persists as JSON under the `user` key.

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError};

const USER_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Credenciais inválidas")]
    InvalidCredentials,
    #[error("Erro ao fazer login")]
    Storage(#[from] StorageError),
    #[error("Erro ao fazer login")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub school: String,
    pub identification: String,
    pub rm: String,
    pub year: String,
    pub course: String,
}

impl UserProfile {
    /// Fixed student profile issued on every successful login.
    // TODO: replace with a real authentication API call
    fn demo() -> Self {
        Self {
            id: 1,
            name: "Gustavo Rodrigues Silva".to_string(),
            email: "gustavo.silva@email.com".to_string(),
            school: "Etec de Peruíbe".to_string(),
            identification: "266".to_string(),
            rm: "04617".to_string(),
            year: "3º ano do ensino médio, 2025".to_string(),
            course: "Desenvolvimento de Sistemas".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    profile: Option<UserProfile>,
    authenticated: bool,
}

impl Session {
    /// Load the persisted profile, if any. Restoring never authenticates;
    /// the user logs in again explicitly.
    pub fn restore(storage: &Storage) -> Self {
        let profile = storage
            .get(USER_KEY)
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    tracing::warn!(error = %err, "stored profile is unreadable, ignoring");
                    None
                }
            });

        if profile.is_some() {
            tracing::debug!("session profile restored");
        }

        Self {
            profile,
            authenticated: false,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Authenticate with the given credentials. Any non-empty pair is
    /// accepted; the demo profile is persisted under the `user` key.
    pub fn login(
        &mut self,
        storage: &Storage,
        username: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        let profile = UserProfile::demo();
        let json = serde_json::to_string(&profile)?;
        storage.set(USER_KEY, &json)?;

        self.profile = Some(profile);
        self.authenticated = true;
        tracing::info!("session authenticated");
        Ok(())
    }

    /// Teardown: clear the in-memory state and remove the persisted
    /// profile. State is cleared even when the removal fails.
    pub fn logout(&mut self, storage: &Storage) -> Result<(), StorageError> {
        self.profile = None;
        self.authenticated = false;
        tracing::info!("session cleared");
        storage.delete(USER_KEY)
    }
}
