//! Plain textarea fallback widget
//!
//! Keeps the raw text and a highlighted overlay rendered by the tokenizer.
//! The overlay is rebuilt on every content or language change.

use super::widget::{EditorWidget, WidgetKind};
use crate::highlight::{highlight_language, Language};

pub struct PlainTextWidget {
    content: String,
    language: Language,
    tab_width: usize,
    markup: String,
    focused: bool,
}

impl PlainTextWidget {
    pub fn new(tab_width: usize) -> Self {
        Self {
            content: String::new(),
            language: Language::default(),
            tab_width,
            markup: String::new(),
            focused: false,
        }
    }

    /// User typed into the textarea
    pub fn input(&mut self, content: &str) {
        self.content = content.to_string();
        self.refresh();
    }

    /// Highlighted overlay for the current content
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Gutter numbers, one per line (an empty buffer still has line 1)
    pub fn line_numbers(&self) -> Vec<usize> {
        let lines = self.content.matches('\n').count() + 1;
        (1..=lines).collect()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn refresh(&mut self) {
        self.markup = highlight_language(&self.content, self.language);
    }
}

impl EditorWidget for PlainTextWidget {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: &str) {
        self.input(content);
    }

    fn language(&self) -> Language {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.refresh();
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width;
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::PlainText
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_follows_input() {
        let mut widget = PlainTextWidget::new(4);
        assert_eq!(widget.markup(), "");

        widget.input("let x");
        assert!(widget
            .markup()
            .contains("<span class=\"token keyword\">let</span>"));
    }

    #[test]
    fn test_language_change_rerenders() {
        let mut widget = PlainTextWidget::new(4);
        widget.set_content("color");
        assert!(!widget.markup().contains("token keyword"));

        widget.set_language(Language::Css);
        assert!(widget
            .markup()
            .contains("<span class=\"token keyword\">color</span>"));
    }

    #[test]
    fn test_line_numbers() {
        let mut widget = PlainTextWidget::new(4);
        assert_eq!(widget.line_numbers(), vec![1]);

        widget.input("a\nb\n");
        assert_eq!(widget.line_numbers(), vec![1, 2, 3]);
    }
}
