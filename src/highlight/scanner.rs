//! Single-pass source scanner
//!
//! Walks the raw source once and classifies contiguous runs of text. The
//! scanner never produces markup, so a later rendering step cannot disturb
//! tokens that were already classified.

use super::keywords;
use super::Language;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    Function,
    Builtin,
    Boolean,
    Null,
    Plain,
}

impl TokenKind {
    /// CSS class suffix used by the renderer
    pub fn class_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Comment => "comment",
            TokenKind::Function => "function",
            TokenKind::Builtin => "builtin",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Plain => "plain",
        }
    }
}

/// Classified run of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Split `source` into tokens for `language`.
///
/// Tokens come back in source order, never overlap, and their texts
/// concatenate to exactly `source`. Adjacent plain text is merged into a
/// single token.
pub fn tokenize(source: &str, language: Language) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(source, language);
    scanner.run();
    scanner.tokens
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    language: Language,
    /// Inside `<...>` of an html tag; quotes only start strings there
    in_tag: bool,
    plain_start: Option<usize>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, language: Language) -> Self {
        Self {
            src,
            pos: 0,
            language,
            in_tag: false,
            plain_start: None,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.src.len() {
            let (kind, end) = self.scan_token();
            debug_assert!(end > self.pos, "scanner must always advance");

            if kind == TokenKind::Plain {
                if self.plain_start.is_none() {
                    self.plain_start = Some(self.pos);
                }
            } else {
                self.flush_plain();
                self.tokens.push(Token {
                    kind,
                    text: &self.src[self.pos..end],
                });
            }
            self.pos = end;
        }
        self.flush_plain();
    }

    fn flush_plain(&mut self) {
        if let Some(start) = self.plain_start.take() {
            if start < self.pos {
                self.tokens.push(Token {
                    kind: TokenKind::Plain,
                    text: &self.src[start..self.pos],
                });
            }
        }
    }

    /// Classify the token starting at `pos` and return its end offset
    fn scan_token(&mut self) -> (TokenKind, usize) {
        let rest = &self.src[self.pos..];
        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => return (TokenKind::Plain, self.src.len()),
        };

        if let Some(end) = self.scan_comment(rest) {
            return (TokenKind::Comment, end);
        }
        if let Some(end) = self.scan_string(rest, ch) {
            return (TokenKind::String, end);
        }
        if let Some(end) = self.scan_number(rest, ch) {
            return (TokenKind::Number, end);
        }
        if self.is_word_start(rest, ch) {
            let end = self.scan_word(rest);
            return (self.classify_word(&self.src[self.pos..end], end), end);
        }

        if self.language == Language::Html {
            match ch {
                '<' => self.in_tag = true,
                '>' => self.in_tag = false,
                _ => {}
            }
        }
        (TokenKind::Plain, self.pos + ch.len_utf8())
    }

    fn scan_comment(&self, rest: &str) -> Option<usize> {
        let (open, close) = match self.language {
            Language::JavaScript if rest.starts_with("//") => {
                // Line comment stops before the newline
                let len = rest.find('\n').unwrap_or(rest.len());
                return Some(self.pos + len);
            }
            Language::JavaScript | Language::Css if rest.starts_with("/*") => ("/*", "*/"),
            Language::Html if rest.starts_with("<!--") => ("<!--", "-->"),
            _ => return None,
        };

        let len = rest[open.len()..]
            .find(close)
            .map(|idx| open.len() + idx + close.len())
            .unwrap_or(rest.len());
        Some(self.pos + len)
    }

    fn scan_string(&self, rest: &str, quote: char) -> Option<usize> {
        let multiline = match (self.language, quote) {
            (Language::JavaScript, '`') => true,
            (Language::JavaScript | Language::Css, '\'' | '"') => false,
            (Language::Html, '\'' | '"') if self.in_tag => false,
            _ => return None,
        };
        let escapes = self.language != Language::Html;

        let mut escaped = false;
        for (idx, c) in rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' if escapes => escaped = true,
                '\n' if !multiline => return Some(self.pos + idx),
                c if c == quote => return Some(self.pos + idx + c.len_utf8()),
                _ => {}
            }
        }
        Some(self.src.len())
    }

    fn scan_number(&self, rest: &str, ch: char) -> Option<usize> {
        let bytes = rest.as_bytes();

        if self.language == Language::Css && ch == '#' {
            return scan_hex_color(bytes).map(|len| self.pos + len);
        }

        let leading_dot = ch == '.'
            && self.language != Language::Html
            && bytes.get(1).is_some_and(u8::is_ascii_digit);
        if !ch.is_ascii_digit() && !leading_dot {
            return None;
        }

        if self.language == Language::JavaScript
            && bytes.len() > 2
            && bytes[0] == b'0'
            && (bytes[1] | 0x20) == b'x'
            && bytes[2].is_ascii_hexdigit()
        {
            let mut end = 2;
            while end < bytes.len() && bytes[end].is_ascii_hexdigit() {
                end += 1;
            }
            return Some(self.pos + end);
        }

        let mut end = skip_digits(bytes, 0);
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end = skip_digits(bytes, end + 1);
        }

        match self.language {
            Language::JavaScript => {
                if end < bytes.len() && (bytes[end] | 0x20) == b'e' {
                    let mut exp = end + 1;
                    if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                        exp += 1;
                    }
                    if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                        end = skip_digits(bytes, exp);
                    }
                }
            }
            Language::Css => {
                // Unit suffix: px, em, vh, %
                if end < bytes.len() && bytes[end] == b'%' {
                    end += 1;
                } else {
                    while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
                        end += 1;
                    }
                }
            }
            Language::Html => {}
        }

        Some(self.pos + end)
    }

    fn is_word_start(&self, rest: &str, ch: char) -> bool {
        match self.language {
            Language::JavaScript => ch.is_alphabetic() || ch == '_' || ch == '$',
            Language::Html => ch.is_alphabetic() || ch == '_',
            Language::Css => {
                ch.is_alphabetic()
                    || ch == '_'
                    || (ch == '@' && rest[1..].chars().next().is_some_and(char::is_alphabetic))
            }
        }
    }

    fn is_word_char(&self, c: char) -> bool {
        match self.language {
            Language::JavaScript => c.is_alphanumeric() || c == '_' || c == '$',
            Language::Html | Language::Css => c.is_alphanumeric() || c == '_' || c == '-',
        }
    }

    fn scan_word(&self, rest: &str) -> usize {
        let mut chars = rest.char_indices();
        // First char was already accepted by is_word_start (may be '@')
        let first_len = chars.next().map_or(0, |(_, c)| c.len_utf8());
        let len = chars
            .find(|&(_, c)| !self.is_word_char(c))
            .map_or(rest.len(), |(idx, _)| idx);
        self.pos + len.max(first_len)
    }

    fn classify_word(&self, word: &str, end: usize) -> TokenKind {
        let language = self.language;
        if keywords::is_keyword(language, word) {
            TokenKind::Keyword
        } else if keywords::is_builtin(language, word) {
            TokenKind::Builtin
        } else if keywords::is_boolean(language, word) {
            TokenKind::Boolean
        } else if keywords::is_null(language, word) {
            TokenKind::Null
        } else if language == Language::JavaScript && self.src[end..].starts_with('(') {
            TokenKind::Function
        } else {
            TokenKind::Plain
        }
    }
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    idx
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; anything else is a selector
fn scan_hex_color(bytes: &[u8]) -> Option<usize> {
    let run = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_' || **b == b'-')
        .count();
    let digits = &bytes[1..1 + run];
    if matches!(run, 3 | 4 | 6 | 8) && digits.iter().all(u8::is_ascii_hexdigit) {
        Some(1 + run)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a str)> {
        tokens.iter().map(|t| (t.kind, t.text)).collect()
    }

    fn joined(tokens: &[Token<'_>]) -> String {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_keyword_requires_whole_word() {
        let tokens = tokenize("classify(x)", Language::JavaScript);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Keyword));
        assert_eq!(tokens[0], Token { kind: TokenKind::Function, text: "classify" });

        let tokens = tokenize("class Foo {}", Language::JavaScript);
        assert_eq!(tokens[0], Token { kind: TokenKind::Keyword, text: "class" });
        assert_eq!(tokens[1], Token { kind: TokenKind::Plain, text: " Foo {}" });
    }

    #[test]
    fn test_javascript_token_kinds() {
        let src = "const n = 0x1F + 2.5e3; // sum\nconsole.log(\"hi\", true, null)";
        let tokens = tokenize(src, Language::JavaScript);
        let kinds = kinds(&tokens);

        assert!(kinds.contains(&(TokenKind::Keyword, "const")));
        assert!(kinds.contains(&(TokenKind::Number, "0x1F")));
        assert!(kinds.contains(&(TokenKind::Number, "2.5e3")));
        assert!(kinds.contains(&(TokenKind::Comment, "// sum")));
        assert!(kinds.contains(&(TokenKind::Builtin, "console")));
        assert!(kinds.contains(&(TokenKind::Function, "log")));
        assert!(kinds.contains(&(TokenKind::String, "\"hi\"")));
        assert!(kinds.contains(&(TokenKind::Boolean, "true")));
        assert!(kinds.contains(&(TokenKind::Null, "null")));
        assert_eq!(joined(&tokens), src);
    }

    #[test]
    fn test_keywords_inside_strings_and_comments_stay_put() {
        let src = "'class' /* return */ `let\nvar`";
        let tokens = tokenize(src, Language::JavaScript);
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::String, "'class'"),
                (TokenKind::Plain, " "),
                (TokenKind::Comment, "/* return */"),
                (TokenKind::Plain, " "),
                (TokenKind::String, "`let\nvar`"),
            ]
        );
    }

    #[test]
    fn test_unterminated_constructs() {
        let tokens = tokenize("'open\nnext", Language::JavaScript);
        assert_eq!(tokens[0], Token { kind: TokenKind::String, text: "'open" });
        assert_eq!(joined(&tokens), "'open\nnext");

        let tokens = tokenize("/* never closed\nstill", Language::Css);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
    }

    #[test]
    fn test_html_strings_only_inside_tags() {
        let src = "<div class=\"a\">don't</div><!-- note -->";
        let tokens = tokenize(src, Language::Html);
        let kinds = kinds(&tokens);

        assert!(kinds.contains(&(TokenKind::Keyword, "div")));
        assert!(kinds.contains(&(TokenKind::String, "\"a\"")));
        assert!(kinds.contains(&(TokenKind::Comment, "<!-- note -->")));
        assert!(!kinds.iter().any(|(k, t)| *k == TokenKind::String && t.contains("don")));
        assert_eq!(joined(&tokens), src);
    }

    #[test]
    fn test_css_words_units_and_colors() {
        let src = "@media screen { body { margin: 10px; color: #fff; width: 50%; } #main {} }";
        let tokens = tokenize(src, Language::Css);
        let kinds = kinds(&tokens);

        assert!(kinds.contains(&(TokenKind::Keyword, "@media")));
        assert!(kinds.contains(&(TokenKind::Keyword, "margin")));
        assert!(kinds.contains(&(TokenKind::Number, "10px")));
        assert!(kinds.contains(&(TokenKind::Number, "#fff")));
        assert!(kinds.contains(&(TokenKind::Number, "50%")));
        assert!(!kinds.iter().any(|(_, t)| *t == "#main"));
        assert_eq!(joined(&tokens), src);
    }

    #[test]
    fn test_hyphenated_css_property_is_one_word() {
        let tokens = tokenize("font-size: 1em", Language::Css);
        assert_eq!(tokens[0], Token { kind: TokenKind::Plain, text: "font-size: " });
    }

    #[test]
    fn test_non_ascii_identifiers_do_not_split() {
        let tokens = tokenize("éclass", Language::JavaScript);
        assert_eq!(kinds(&tokens), vec![(TokenKind::Plain, "éclass")]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("", Language::Html).is_empty());
        let tokens = tokenize(" \t\n ", Language::JavaScript);
        assert_eq!(kinds(&tokens), vec![(TokenKind::Plain, " \t\n ")]);
    }
}
