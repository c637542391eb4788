//! Supported playground languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::PlaygroundError;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Html,
    Css,
}

impl Language {
    /// Every supported language, in menu order
    pub const ALL: [Language; 3] = [Language::JavaScript, Language::Html, Language::Css];

    /// Parse a language tag. `js` is accepted for javascript.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "html" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// Parse a tag, falling back to the scripting language
    pub fn normalize(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "html" | "htm" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// Get file extension for language
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    /// Canonical lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Html => "html",
            Language::Css => "css",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::JavaScript
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| PlaygroundError::UnsupportedLanguage(s.to_string()))
    }
}
