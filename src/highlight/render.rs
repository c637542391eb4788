//! Markup rendering for token streams

use super::scanner::{Token, TokenKind};

const NBSP: &str = "&nbsp;";
const LINE_BREAK: &str = "<br>";

/// Render tokens into display markup.
///
/// Each token's text is escaped exactly once. Plain tokens are emitted bare,
/// everything else is wrapped in `<span class="token {kind}">`.
pub fn render(tokens: &[Token<'_>]) -> String {
    let capacity = tokens.iter().map(|t| t.text.len() + 32).sum();
    let mut out = String::with_capacity(capacity);

    for token in tokens {
        if token.kind == TokenKind::Plain {
            push_display(&mut out, token.text);
        } else {
            out.push_str("<span class=\"token ");
            out.push_str(token.kind.class_name());
            out.push_str("\">");
            push_display(&mut out, token.text);
            out.push_str("</span>");
        }
    }

    out
}

/// Escape the five HTML metacharacters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !push_escaped(&mut out, c) {
            out.push(c);
        }
    }
    out
}

/// Escape plus display whitespace, with no highlighting at all
pub fn escape_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    push_display(&mut out, text);
    out
}

fn push_display(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str(LINE_BREAK),
            ' ' => out.push_str(NBSP),
            '\t' => {
                for _ in 0..4 {
                    out.push_str(NBSP);
                }
            }
            c => {
                if !push_escaped(out, c) {
                    out.push(c);
                }
            }
        }
    }
}

fn push_escaped(out: &mut String, c: char) -> bool {
    let entity = match c {
        '&' => "&amp;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '\'' => "&#039;",
        _ => return false,
    };
    out.push_str(entity);
    true
}
