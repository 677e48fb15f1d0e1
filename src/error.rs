//! Color and colorscheme parsing errors.

/// Errors that can occur while resolving color descriptors.
///
/// None of these are fatal for a run: configuration code reports them as
/// warnings and keeps the default color for the affected role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Bad colour {text:?}: {reason}")]
    InvalidColor { text: String, reason: &'static str },

    #[error("Bad colorscheme entry {entry:?}: {reason}")]
    InvalidColorScheme { entry: String, reason: &'static str },

    #[error("Unknown colorscheme role: {role}")]
    UnknownColorRole { role: String },
}

impl ColorError {
    pub(crate) fn invalid_color(text: &str, reason: &'static str) -> Self {
        ColorError::InvalidColor {
            text: text.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_scheme(entry: &str, reason: &'static str) -> Self {
        ColorError::InvalidColorScheme {
            entry: entry.to_string(),
            reason,
        }
    }
}
