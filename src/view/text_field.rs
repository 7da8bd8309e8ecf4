//! Text field rendering.
//!
//! Draws one field from its text and a computed [`FieldLayout`]: border,
//! interior, label, visible text, edge fades, cursor bar and the inactive
//! overlay, in that order. Coordinates in the layout are widget-local and
//! get translated by the widget's centre here.

use super::geometry::{Point, Rect, TextAlign};
use super::layout::{fade_width, pixel_unit, FieldLayout};
use super::{Canvas, TextMeasure};
use crate::theme::FieldTheme;

/// Per-draw state of a field that is not part of the layout.
#[derive(Debug, Clone)]
pub struct TextFieldStyle<'a> {
    /// Widget centre in canvas coordinates
    pub center: Point,
    /// Outer width in pixels
    pub width: f32,
    /// Outer height in pixels
    pub height: f32,
    pub border: f32,
    pub focused: bool,
    pub active: bool,
    pub label: Option<&'a str>,
    pub theme: &'a FieldTheme,
}

/// Renderer for single-line fields.
pub struct TextFieldRenderer;

impl TextFieldRenderer {
    pub fn render(
        canvas: &mut dyn Canvas,
        font: &dyn TextMeasure,
        text: &str,
        layout: &FieldLayout,
        style: &TextFieldStyle,
    ) {
        let theme = style.theme;
        let pix = pixel_unit(font);
        let Point { x: cx, y: cy } = style.center;

        // 1. Border and interior
        let outer = Rect::centered(cx, cy, style.width, style.height);
        let border_color = if style.focused {
            theme.border_focused
        } else {
            theme.border_unfocused
        };
        canvas.fill_rect(outer, border_color);

        let interior = outer.inset(pix);
        canvas.fill_rect(interior, theme.interior);

        // 2. Label, to the left of the widget
        if let Some(label) = style.label {
            let at = Point::new(cx - style.width / 2.0 - style.border, cy);
            canvas.draw_text(label, at, TextAlign::Right, theme.label);
        }

        // 3. Visible text
        let visible = &text[layout.visible.clone()];
        if !visible.is_empty() {
            let (anchor_x, align) = layout.text_anchor();
            canvas.draw_text(visible, Point::new(cx + anchor_x, cy), align, theme.text);
        }

        // 4. Fades over clipped edges
        let fade = fade_width(font).min(interior.width);
        let clear = theme.interior.with_alpha(0);
        if layout.trimmed_front {
            let rect = Rect::new(interior.x, interior.y, fade, interior.height);
            canvas.fill_horizontal_gradient(rect, theme.interior, clear);
        }
        if layout.trimmed_back {
            let rect = Rect::new(interior.right() - fade, interior.y, fade, interior.height);
            canvas.fill_horizontal_gradient(rect, clear, theme.interior);
        }

        // 5. Cursor bar
        if style.focused {
            let bar = Rect::new(
                cx + layout.cursor_x(),
                interior.y - pix,
                pix,
                interior.height + 2.0 * pix,
            );
            canvas.fill_rect(bar, theme.cursor);
        }

        // 6. Dim inactive fields
        if !style.active {
            canvas.fill_rect(outer, theme.inactive_overlay);
        }
    }
}
