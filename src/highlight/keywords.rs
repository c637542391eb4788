//! Per-language word tables

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::Language;

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "var", "let", "const", "function", "return", "if", "else", "for", "while", "do", "switch",
    "case", "break", "continue", "new", "this", "class", "extends", "import", "export", "try",
    "catch", "finally", "throw", "async", "await", "from", "of", "in", "instanceof", "typeof",
    "void",
];

const HTML_KEYWORDS: &[&str] = &[
    "html", "head", "body", "div", "span", "a", "img", "button", "form", "input", "label",
    "script", "style", "link", "meta", "title",
];

const CSS_KEYWORDS: &[&str] = &[
    "@media", "@keyframes", "@import", "@charset", "@font-face", "background", "color",
    "margin", "padding", "font", "border",
];

const JAVASCRIPT_BUILTINS: &[&str] = &[
    "console", "document", "window", "Array", "Object", "String", "Number", "Boolean", "Math",
    "Date", "RegExp", "JSON", "Map", "Set", "Promise",
];

const JAVASCRIPT_BOOLEANS: &[&str] = &["true", "false"];

const JAVASCRIPT_NULLS: &[&str] = &["null", "undefined"];

static JS_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| JAVASCRIPT_KEYWORDS.iter().copied().collect());
static HTML_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HTML_KEYWORDS.iter().copied().collect());
static CSS_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CSS_KEYWORDS.iter().copied().collect());
static JS_BUILTIN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| JAVASCRIPT_BUILTINS.iter().copied().collect());

/// Reserved words highlighted as keywords for a language
pub fn is_keyword(language: Language, word: &str) -> bool {
    match language {
        Language::JavaScript => JS_KEYWORD_SET.contains(word),
        Language::Html => HTML_KEYWORD_SET.contains(word),
        Language::Css => CSS_KEYWORD_SET.contains(word),
    }
}

/// Built-in identifiers; only the scripting language has any
pub fn is_builtin(language: Language, word: &str) -> bool {
    language == Language::JavaScript && JS_BUILTIN_SET.contains(word)
}

pub fn is_boolean(language: Language, word: &str) -> bool {
    language == Language::JavaScript && JAVASCRIPT_BOOLEANS.contains(&word)
}

pub fn is_null(language: Language, word: &str) -> bool {
    language == Language::JavaScript && JAVASCRIPT_NULLS.contains(&word)
}

/// Raw keyword table, used by the CLI listing
pub fn keywords(language: Language) -> &'static [&'static str] {
    match language {
        Language::JavaScript => JAVASCRIPT_KEYWORDS,
        Language::Html => HTML_KEYWORDS,
        Language::Css => CSS_KEYWORDS,
    }
}
