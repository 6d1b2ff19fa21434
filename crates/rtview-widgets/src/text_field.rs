//! Single-line editable text field.
//!
//! Cursor and selection positions are grapheme indices, never byte offsets,
//! so edits cannot split a character.
//!
//! # Invariants
//!
//! 1. `cursor <= grapheme_count()`.
//! 2. A selection is never empty: `start < end <= grapheme_count()`.
//! 3. Programmatic [`set_text`](TextField::set_text) places the cursor at the
//!    end and drops the selection.

use unicode_segmentation::UnicodeSegmentation;

use crate::format::FORMAT_PATTERN;

/// An editable single-line text buffer with cursor, selection and focus flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
    selection: Option<(usize, usize)>,
    focused: bool,
    columns: usize,
}

impl TextField {
    /// An empty field sized for `columns` characters.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// An empty field sized for the numeric display pattern.
    #[must_use]
    pub fn numeric() -> Self {
        Self::new(FORMAT_PATTERN.len())
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text. The cursor moves to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.grapheme_count();
        self.selection = None;
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Select the entire text (no-op on an empty field).
    pub fn select_all(&mut self) {
        let len = self.grapheme_count();
        self.selection = (len > 0).then_some((0, len));
        self.cursor = len;
    }

    /// Select graphemes `start..end`, clamped to the text.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.grapheme_count();
        let (start, end) = (start.min(len), end.min(len));
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        self.selection = (lo < hi).then_some((lo, hi));
        self.cursor = end;
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// The selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let (start, end) = self.selection?;
        Some(&self.text[self.byte_offset(start)..self.byte_offset(end)])
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Insert `s` at the cursor, replacing the selection if there is one.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        // Leading combining marks merge into the previous grapheme.
        self.cursor = self.text[..at + s.len()].graphemes(true).count();
    }

    /// Delete the selection, or the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn move_left(&mut self) {
        self.selection = None;
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.selection = None;
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection.take() else {
            return false;
        };
        let range = self.byte_offset(start)..self.byte_offset(end);
        self.text.replace_range(range, "");
        self.cursor = start;
        true
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}
