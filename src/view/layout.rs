//! Scroll layout of a single-line field.
//!
//! Given the text, the cursor and the widget width, decide which part of the
//! text is visible, where it is drawn and where the cursor bar goes. All x
//! coordinates are widget-local with the origin at the widget centre.
//!
//! When the text fits it is left-aligned. When it does not, the view keeps the
//! cursor visible: centred when text overflows on both sides of it,
//! right-aligned when only the text before it overflows, left-aligned when only
//! the text after it does. Trimming works on index ranges of the buffer, so
//! measuring never allocates.

use std::ops::Range;

use super::{TextAlign, TextMeasure};

/// Horizontal placement of the visible text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    CursorCentered,
}

/// Width of the smallest drawn feature (cursor bar, interior inset)
pub fn pixel_unit(font: &dyn TextMeasure) -> f32 {
    font.line_height() / 8.0
}

/// Width of the fade drawn over a clipped edge
pub fn fade_width(font: &dyn TextMeasure) -> f32 {
    font.line_height() * 4.0
}

/// Result of laying out the field's text.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLayout {
    /// Byte (= character) range of the text that is drawn
    pub visible: Range<usize>,
    pub align: Align,
    /// Left edge of the visible text
    pub text_x: f32,
    /// Cursor position as an index into the visible text
    pub cursor_draw_position: usize,
    /// Cursor offset from the left inner edge
    pub cursor_offset: f32,
    /// Left inner edge (`-w/2 + border`)
    pub inner_left: f32,
    /// Right inner edge (`w/2 - border`)
    pub inner_right: f32,
    pub trimmed_front: bool,
    pub trimmed_back: bool,
}

impl FieldLayout {
    pub fn compute(
        text: &str,
        cursor: usize,
        width: f32,
        border: f32,
        font: &dyn TextMeasure,
    ) -> Self {
        let len = text.len();
        let cursor = cursor.min(len);
        let inner_width = width - 2.0 * border;
        let half = inner_width / 2.0;
        let inner_left = -width / 2.0 + border;
        let inner_right = width / 2.0 - border;
        let pix = pixel_unit(font);
        let measure = |range: Range<usize>| font.measure(&text[range]);

        let mut start = 0;
        let mut end = len;

        let align = if measure(0..len) <= inner_width {
            Align::Left
        } else {
            let before_over = measure(0..cursor) > half;
            let after_over = measure(cursor..len) > half;
            match (before_over, after_over) {
                (true, true) => {
                    while start < cursor && measure(start..cursor) > half {
                        start += 1;
                    }
                    while end > cursor && measure(cursor..end) > half {
                        end -= 1;
                    }
                    Align::CursorCentered
                }
                (true, false) => {
                    while start < cursor && measure(start..end) > inner_width {
                        start += 1;
                    }
                    Align::Right
                }
                (false, true) => {
                    while end > cursor && measure(start..end) > inner_width {
                        end -= 1;
                    }
                    Align::Left
                }
                // Only reachable when measuring is not additive
                (false, false) => Align::Left,
            }
        };

        let before_width = measure(start..cursor);
        let after_width = measure(cursor..end);

        let (text_x, cursor_offset) = match align {
            Align::Left => {
                let offset = if before_width == 0.0 { -pix } else { before_width };
                (inner_left, offset)
            }
            Align::Right => {
                let mut offset = inner_width - after_width;
                if end > cursor {
                    offset -= pix;
                }
                (inner_right - measure(start..end), offset)
            }
            Align::CursorCentered => (-before_width, half),
        };

        tracing::trace!(?align, start, end, cursor, "field layout");

        Self {
            visible: start..end,
            align,
            text_x,
            cursor_draw_position: cursor - start,
            cursor_offset,
            inner_left,
            inner_right,
            trimmed_front: start > 0,
            trimmed_back: end < len,
        }
    }

    /// Where and how to anchor the visible text when drawing it
    pub fn text_anchor(&self) -> (f32, TextAlign) {
        match self.align {
            Align::Right => (self.inner_right, TextAlign::Right),
            Align::Left | Align::CursorCentered => (self.text_x, TextAlign::Left),
        }
    }

    /// Widget-local x of the cursor bar
    pub fn cursor_x(&self) -> f32 {
        self.inner_left + self.cursor_offset
    }

    /// Index (into the visible text) of the character boundary nearest to `x`.
    ///
    /// Boundaries sit half a character spacing after each prefix of the
    /// visible text. Ties go to the lower index. Anything farther than
    /// `max_distance` leaves the cursor where it is.
    pub fn nearest_boundary(
        &self,
        text: &str,
        font: &dyn TextMeasure,
        x: f32,
        max_distance: f32,
    ) -> usize {
        let visible = &text[self.visible.start.min(text.len())..self.visible.end.min(text.len())];
        let half_spacing = font.char_spacing() / 2.0;

        let mut best = self.cursor_draw_position;
        let mut best_distance = max_distance;
        for i in 0..=visible.len() {
            let gap_x = self.text_x + font.measure(&visible[..i]) + half_spacing;
            let distance = (gap_x - x).abs();
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        best
    }
}
