//! Theme preference: light or dark, persisted under the `theme` key.
//! Color palettes are up to the embedding UI; only the mode is modeled.

use crate::storage::{Storage, StorageError};

const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    fn from_saved(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ThemePreference {
    mode: ThemeMode,
}

impl ThemePreference {
    /// Light unless a persisted value says otherwise.
    pub fn restore(storage: &Storage) -> Self {
        let mode = storage
            .get(THEME_KEY)
            .and_then(|saved| ThemeMode::from_saved(&saved))
            .unwrap_or_default();
        tracing::debug!(mode = mode.as_str(), "theme restored");
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Flip the mode, then persist it. The in-memory mode changes even
    /// when persistence fails.
    pub fn toggle(&mut self, storage: &Storage) -> Result<ThemeMode, StorageError> {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        storage.set(THEME_KEY, self.mode.as_str())?;
        Ok(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_values_map_to_modes() {
        assert_eq!(ThemeMode::from_saved("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_saved("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_saved("octane"), None);
        assert_eq!(ThemeMode::from_saved(""), None);
    }

    #[test]
    fn default_mode_is_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
        assert!(!ThemePreference::default().is_dark());
    }
}
