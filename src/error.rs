//! Error types for the Slippy playground core
//!
//! Structured errors are defined with thiserror; the binary propagates them
//! through anyhow.

use thiserror::Error;

use crate::session::TabId;

/// Main error type for playground operations
#[derive(Error, Debug)]
pub enum PlaygroundError {
    /// No tab with this id is open
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    /// Language tag outside the supported set
    #[error("Unsupported language: {0}. Please choose javascript, html, or css.")]
    UnsupportedLanguage(String),

    /// Operation needs an active tab but none is selected
    #[error("No active tab")]
    NoActiveTab,

    /// Saved file collection has no entry with this name
    #[error("Saved file not found: {0}")]
    SavedFileNotFound(String),

    /// Nothing to save
    #[error("No code to save in {0}")]
    EmptyDocument(String),

    /// Preference value out of range
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage quota would be exceeded by a write
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl PlaygroundError {
    /// Lookup errors leave state untouched and are only logged
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            PlaygroundError::TabNotFound(_)
                | PlaygroundError::UnsupportedLanguage(_)
                | PlaygroundError::NoActiveTab
                | PlaygroundError::SavedFileNotFound(_)
        )
    }
}

/// Result type alias for playground operations
pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Convert anyhow::Error to PlaygroundError
impl From<anyhow::Error> for PlaygroundError {
    fn from(err: anyhow::Error) -> Self {
        PlaygroundError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlaygroundError::UnsupportedLanguage("python".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported language: python. Please choose javascript, html, or css."
        );

        let err = PlaygroundError::QuotaExceeded {
            key: "codeai-files".to_string(),
            needed: 12,
            limit: 8,
        };
        assert!(err.to_string().contains("codeai-files"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json");
        assert!(json_err.is_err());

        let err: PlaygroundError = json_err.unwrap_err().into();
        assert!(matches!(err, PlaygroundError::Serialization(_)));
        assert!(!err.is_lookup());
    }

    #[test]
    fn test_lookup_classification() {
        assert!(PlaygroundError::NoActiveTab.is_lookup());
        assert!(PlaygroundError::SavedFileNotFound("a.js".into()).is_lookup());
        assert!(!PlaygroundError::Storage("disk".into()).is_lookup());
    }
}
