//! Theme selection.

use thiserror::Error;
use tracing::{debug, warn};

use super::ThemeApplier;

/// Errors from theme selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Theme id is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid theme id '{0}'")]
    InvalidTheme(String),
}

fn is_valid_theme_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Holds the current theme and forwards changes to a [`ThemeApplier`].
pub struct ThemeSwitcher {
    current: String,
    applier: Box<dyn ThemeApplier>,
}

impl ThemeSwitcher {
    /// Creates a switcher and applies `initial` right away.
    ///
    /// An invalid initial id is logged and replaced by the default theme.
    pub fn new(initial: &str, applier: Box<dyn ThemeApplier>) -> Self {
        let mut switcher = Self {
            current: crate::types::DEFAULT_THEME.to_string(),
            applier,
        };
        if switcher.select(initial).is_err() {
            let fallback = switcher.current.clone();
            switcher.applier.apply(&fallback);
        }
        switcher
    }

    /// Switches to `theme_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidTheme`] and keeps the current theme if
    /// the id is malformed.
    pub fn select(&mut self, theme_id: &str) -> Result<(), ThemeError> {
        let theme_id = theme_id.trim();
        if !is_valid_theme_id(theme_id) {
            warn!("Rejected theme id '{}'", theme_id);
            return Err(ThemeError::InvalidTheme(theme_id.to_string()));
        }
        self.current = theme_id.to_string();
        self.applier.apply(theme_id);
        debug!("Theme applied: {}", theme_id);
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }
}

impl std::fmt::Debug for ThemeSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSwitcher")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
