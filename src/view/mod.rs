//! View module - layout and rendering of text fields
//!
//! The widget core only talks to two capabilities: [`TextMeasure`] for font
//! metrics and [`Canvas`] for draw calls. [`frame`] implements both on top of a
//! software pixel buffer and `fontdue`.

pub mod frame;
pub mod geometry;
pub mod layout;
pub mod text_field;

pub use frame::{FontFace, Frame, FrameCanvas, GlyphCache, TextPainter};
pub use geometry::{Point, Rect, TextAlign};
pub use layout::{Align, FieldLayout};
pub use text_field::{TextFieldRenderer, TextFieldStyle};

use crate::theme::Color;

/// Font metrics needed to lay out a field
pub trait TextMeasure {
    /// Advance width of `text` in pixels
    fn measure(&self, text: &str) -> f32;

    /// Height of one line of text in pixels
    fn line_height(&self) -> f32;

    /// Extra space the font puts between characters
    fn char_spacing(&self) -> f32;
}

/// Draw primitives a field renders with.
///
/// Colors carry their own alpha; implementations blend.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill `rect` with a color that goes from `left` to `right` across its width
    fn fill_horizontal_gradient(&mut self, rect: Rect, left: Color, right: Color);

    /// Draw one line of text. `at.y` is the vertical centre of the line,
    /// `at.x` the edge named by `align`.
    fn draw_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color);
}
