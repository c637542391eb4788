//! Rich editor widget backed by a rope

use ropey::Rope;
use std::collections::VecDeque;

use super::widget::{EditorWidget, WidgetKind};
use crate::highlight::Language;

/// Maximum number of undo snapshots kept
pub const HISTORY_LIMIT: usize = 50;

/// Cursor position (0-based line and column, in chars)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Rope-backed editor with snapshot undo/redo
pub struct RichWidget {
    /// Text content (rope for efficient editing)
    content: Rope,

    language: Language,

    tab_width: usize,

    cursor: Position,

    focused: bool,

    /// Previous contents, oldest first
    undo_stack: VecDeque<String>,

    redo_stack: Vec<String>,
}

impl RichWidget {
    pub fn new(tab_width: usize) -> Self {
        Self {
            content: Rope::new(),
            language: Language::default(),
            tab_width,
            cursor: Position::default(),
            focused: false,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// Move the cursor, clamped to the document
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        let line = line.min(self.content.len_lines().saturating_sub(1));
        let column = column.min(self.line_len(line));
        self.cursor = Position { line, column };
    }

    /// Insert text at the cursor and move the cursor past it
    pub fn insert_at_cursor(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.record_snapshot();

        let idx = self.cursor_to_char_idx();
        self.content.insert(idx, text);
        self.move_cursor_to_char(idx + text.chars().count());
    }

    /// Insert one indent unit (spaces, never a tab character)
    pub fn insert_indent(&mut self) {
        let indent = " ".repeat(self.tab_width);
        self.insert_at_cursor(&indent);
    }

    /// Replace the buffer as a user edit that can be undone
    pub fn replace_content(&mut self, text: &str) {
        if self.content == text {
            return;
        }
        self.record_snapshot();
        self.content = Rope::from_str(text);
        self.clamp_cursor();
    }

    /// Undo last edit
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(self.content.to_string());
        self.content = Rope::from_str(&previous);
        self.clamp_cursor();
        true
    }

    /// Redo last undone edit
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(self.content.to_string());
        self.content = Rope::from_str(&next);
        self.clamp_cursor();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn record_snapshot(&mut self) {
        if self.undo_stack.len() == HISTORY_LIMIT {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(self.content.to_string());
        self.redo_stack.clear();
    }

    /// Line length without its line terminator
    fn line_len(&self, line: usize) -> usize {
        if line >= self.content.len_lines() {
            return 0;
        }
        let slice = self.content.line(line);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    fn cursor_to_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.content.len_lines().saturating_sub(1));
        self.content.line_to_char(line) + self.cursor.column.min(self.line_len(line))
    }

    fn move_cursor_to_char(&mut self, idx: usize) {
        let idx = idx.min(self.content.len_chars());
        let line = self.content.char_to_line(idx);
        let column = idx - self.content.line_to_char(line);
        self.cursor = Position { line, column };
    }

    fn clamp_cursor(&mut self) {
        let Position { line, column } = self.cursor;
        self.set_cursor(line, column);
    }
}

impl EditorWidget for RichWidget {
    fn content(&self) -> String {
        self.content.to_string()
    }

    fn set_content(&mut self, content: &str) {
        self.content = Rope::from_str(content);
        self.cursor = Position::default();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn language(&self) -> Language {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = language;
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
        WidgetKind::Rich
    }
}
