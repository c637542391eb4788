//! Syntax highlighting for the playground editor
//!
//! Source text is scanned once into a token stream, then rendered into
//! HTML-safe markup. The rendered form keeps whitespace visible: newlines
//! become `<br>`, spaces and tabs become `&nbsp;` runs.
//!
//! ```
//! use slippy_core::highlight::highlight;
//!
//! let markup = highlight("let x = 1;", "javascript");
//! assert!(markup.starts_with("<span class=\"token keyword\">let</span>"));
//! ```

mod keywords;
mod language;
mod render;
mod scanner;

pub use keywords::keywords;
pub use language::Language;
pub use render::{escape_html, escape_plain, render};
pub use scanner::{tokenize, Token, TokenKind};

use std::panic;
use tracing::{debug, error};

/// Highlight `source` for a language tag.
///
/// Unknown or empty tags use the javascript rules. Never panics: if
/// tokenizing fails the input is returned escaped but otherwise unstyled.
pub fn highlight(source: &str, language: &str) -> String {
    let lang = Language::parse(language).unwrap_or_else(|| {
        debug!("Unknown highlight language '{}', using javascript", language);
        Language::default()
    });
    highlight_language(source, lang)
}

/// Highlight with an already-resolved language
pub fn highlight_language(source: &str, language: Language) -> String {
    if source.is_empty() {
        return String::new();
    }

    render_or_escape(source, language, || render(&tokenize(source, language)))
}

/// Run `render_fn`, degrading to [`escape_plain`] if it panics
fn render_or_escape<F>(source: &str, language: Language, render_fn: F) -> String
where
    F: FnOnce() -> String + panic::UnwindSafe,
{
    match panic::catch_unwind(render_fn) {
        Ok(markup) => markup,
        Err(_) => {
            error!(
                "Syntax highlighting failed for {} bytes of {}, falling back to escaped text",
                source.len(),
                language
            );
            escape_plain(source)
        }
    }
}

/// Languages the highlighter and tab store accept
pub fn supported_languages() -> &'static [Language] {
    &Language::ALL
}
