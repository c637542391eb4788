//! Combined HTML/CSS/JS preview document

use once_cell::sync::Lazy;
use regex::Regex;

static HEAD_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</head>").expect("Valid head close regex"));

static BODY_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<body").expect("Valid body open regex"));

static BODY_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</body>").expect("Valid body close regex"));

/// Document used when there is no HTML to preview
pub const PLACEHOLDER_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Preview</title>
  <meta charset="UTF-8">
</head>
<body>
  <div id="app">
    <h1>Preview</h1>
    <p>This is a placeholder. Add HTML content to see your actual page.</p>
  </div>
</body>
</html>"#;

/// Merge the three sources into one document.
///
/// CSS goes in a `<style>` block before `</head>` (or `<body`, or the start);
/// JS goes in a `<script>` block before `</body>` (or the end). Blank CSS or
/// JS is skipped.
pub fn compose(html: &str, css: &str, js: &str) -> String {
    let mut document = if html.trim().is_empty() {
        PLACEHOLDER_DOCUMENT.to_string()
    } else {
        html.to_string()
    };

    if !css.trim().is_empty() {
        let style = format!("<style>\n{}\n</style>\n", css);
        let at = HEAD_CLOSE
            .find(&document)
            .or_else(|| BODY_OPEN.find(&document))
            .map_or(0, |m| m.start());
        document.insert_str(at, &style);
    }

    if !js.trim().is_empty() {
        match BODY_CLOSE.find(&document).map(|m| m.start()) {
            Some(at) => document.insert_str(at, &format!("<script>\n{}\n</script>\n", js)),
            None => document.push_str(&format!("\n<script>\n{}\n</script>", js)),
        }
    }

    document
}
