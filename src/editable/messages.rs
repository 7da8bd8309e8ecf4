//! Message types for editing the field's text.

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move to start of text
    Start,
}

/// Editing operations understood by [`EditableState::apply`](super::EditableState::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEditMsg {
    /// Move cursor
    Move(MoveTarget),
    /// Insert a single (raw, unfiltered) character
    InsertChar(char),
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Replace all content with filtered text, cursor at end
    SetText(String),
}
