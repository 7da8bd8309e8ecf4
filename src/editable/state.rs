//! EditableState - text buffer, cursor and constraints of a single-line field.

use super::buffer::FieldBuffer;
use super::constraints::EditConstraints;
use super::messages::{MoveTarget, TextEditMsg};

/// Editable single-line text with one cursor.
///
/// The cursor is a character offset in `0..=len`. Every operation leaves it in range.
#[derive(Debug, Clone, Default)]
pub struct EditableState {
    buffer: FieldBuffer,
    cursor: usize,
    /// Constraints for this field
    pub constraints: EditConstraints,
}

impl EditableState {
    /// Create an empty state with the given constraints
    pub fn new(constraints: EditConstraints) -> Self {
        Self {
            buffer: FieldBuffer::new(),
            cursor: 0,
            constraints,
        }
    }

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.as_str().to_string()
    }

    /// Borrow the text content
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Cursor offset in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an edit message. Returns true if the content changed.
    pub fn apply(&mut self, msg: &TextEditMsg) -> bool {
        match msg {
            TextEditMsg::Move(target) => {
                match target {
                    MoveTarget::Left => self.move_left(),
                    MoveTarget::Right => self.move_right(),
                    MoveTarget::Start => self.reset_cursor(),
                }
                false
            }
            TextEditMsg::InsertChar(ch) => self.insert_char(*ch),
            TextEditMsg::DeleteBackward => self.delete_backward(),
            TextEditMsg::SetText(text) => {
                let before = self.buffer.clone();
                self.set_text(text);
                before != self.buffer
            }
        }
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl EditableState {
    /// Move cursor left by one character
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right by one character
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
    }

    /// Move cursor by a signed number of characters, clamped to the text
    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.buffer.len() as isize) as usize;
    }

    /// Move cursor to start of text
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl EditableState {
    /// Insert a character at the cursor position.
    /// Returns true if the character was inserted, false if rejected by constraints.
    pub fn insert_char(&mut self, raw: char) -> bool {
        if self
            .constraints
            .would_exceed_max_length(self.buffer.len(), 1)
        {
            tracing::debug!(max = ?self.constraints.max_length, "max length reached, dropping {raw:?}");
            return false;
        }

        let Some(ch) = self.constraints.filter.classify(raw) else {
            return false;
        };

        self.buffer.insert_char(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    /// Returns true if a character was removed.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.buffer.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        true
    }

    /// Replace the content with the filtered version of `raw` and put the cursor at the end.
    ///
    /// Characters rejected by the filter are dropped. Returns how many were dropped.
    pub fn set_text(&mut self, raw: &str) -> usize {
        self.buffer.clear();
        let mut dropped = 0;
        for ch in raw.chars() {
            match self.constraints.filter.classify(ch) {
                Some(ch) => self.buffer.push(ch),
                None => dropped += 1,
            }
        }
        self.cursor = self.buffer.len();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::super::constraints::CharFilter;
    use super::*;

    fn create_test_state(text: &str) -> EditableState {
        let mut state = EditableState::new(EditConstraints::default());
        state.set_text(text);
        state
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = create_test_state("hello");
        state.move_cursor(-3);

        state.move_left();
        assert_eq!(state.cursor(), 1);

        state.move_right();
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_movement_clamps() {
        let mut state = create_test_state("hi");
        state.move_right();
        assert_eq!(state.cursor(), 2);

        state.reset_cursor();
        state.move_left();
        assert_eq!(state.cursor(), 0);

        state.move_cursor(10);
        assert_eq!(state.cursor(), 2);
        state.move_cursor(-10);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_insert_char() {
        let mut state = create_test_state("hllo");
        state.reset_cursor();
        state.move_right();

        assert!(state.insert_char('e'));
        assert_eq!(state.text(), "hello");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_delete_backward() {
        let mut state = create_test_state("hello");

        assert!(state.delete_backward());
        assert_eq!(state.text(), "hell");
        assert_eq!(state.cursor(), 4);
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut state = create_test_state("hello");
        state.reset_cursor();

        assert!(!state.delete_backward());
        assert_eq!(state.text(), "hello");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_char_filter() {
        let mut state = EditableState::new(EditConstraints {
            max_length: None,
            filter: CharFilter::default().with_allowed(Some("0123456789")),
        });

        assert!(state.insert_char('5'));
        assert!(!state.insert_char('a'));
        assert_eq!(state.text(), "5");
    }

    #[test]
    fn test_set_text_filters_and_moves_cursor_to_end() {
        let mut state = EditableState::new(EditConstraints {
            max_length: None,
            filter: CharFilter::new(true).with_forbidden(Some("X")),
        });

        let dropped = state.set_text("axb\ty");
        assert_eq!(dropped, 2);
        assert_eq!(state.text(), "ABY");
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn test_max_length_blocks_insert() {
        let mut state = create_test_state("abc");
        state.constraints.max_length = Some(3);

        assert!(!state.insert_char('d'));
        assert_eq!(state.text(), "abc");
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn test_apply_reports_content_changes() {
        let mut state = create_test_state("ab");
        assert!(!state.apply(&TextEditMsg::Move(MoveTarget::Start)));
        assert_eq!(state.cursor(), 0);
        assert!(state.apply(&TextEditMsg::InsertChar('x')));
        assert!(state.apply(&TextEditMsg::DeleteBackward));
        assert!(!state.apply(&TextEditMsg::DeleteBackward));
        assert!(!state.apply(&TextEditMsg::SetText("ab".to_string())));
        assert!(state.apply(&TextEditMsg::SetText("abc".to_string())));
        assert_eq!(state.cursor(), 3);
    }
}
