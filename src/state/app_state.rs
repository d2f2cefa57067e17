//! Application-level state: theme and transient UI flags.

use serde::{Deserialize, Serialize};

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(crate::Error::invalid_input(format!(
                "unknown theme '{}'",
                other
            ))),
        }
    }
}

/// Global application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Current theme. Persisted.
    pub theme: Theme,
    /// Whether the navigation sidebar is open.
    pub sidebar_open: bool,
    /// Identifier of the open modal, if any.
    pub active_modal: Option<String>,
}

impl AppState {
    /// Set the theme. Returns false when it already had that value.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        true
    }

    /// Flip the theme.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Flip the sidebar flag.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Open a modal, or close it with `None`.
    pub fn set_modal_open(&mut self, modal: Option<String>) {
        self.active_modal = modal;
    }

    /// Check if any modal is open.
    pub fn has_modal(&self) -> bool {
        self.active_modal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_dark() {
        assert_eq!(AppState::default().theme, Theme::Dark);
    }

    #[test]
    fn test_set_theme_guard() {
        let mut app = AppState::default();
        assert!(!app.set_theme(Theme::Dark));
        assert!(app.set_theme(Theme::Light));
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_toggle_theme_twice() {
        let mut app = AppState::default();
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Light);
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_modal_flags() {
        let mut app = AppState::default();
        app.set_modal_open(Some("subscribe".to_string()));
        assert!(app.has_modal());
        app.set_modal_open(None);
        assert!(!app.has_modal());
        app.toggle_sidebar();
        assert!(app.sidebar_open);
    }
}
