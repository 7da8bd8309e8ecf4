//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use fieldline::input::Modifiers;
use fieldline::theme::Color;
use fieldline::view::{Canvas, Point, Rect, TextAlign, TextMeasure};
use fieldline::{TextField, TextFieldOptions, UiContext};

/// Fixed-advance font: every character is `advance` wide
#[derive(Debug, Clone, Copy)]
pub struct MonoFont {
    pub advance: f32,
    pub line_height: f32,
    pub spacing: f32,
}

impl Default for MonoFont {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 10.0,
            spacing: 0.0,
        }
    }
}

impl TextMeasure for MonoFont {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn char_spacing(&self) -> f32 {
        self.spacing
    }
}

/// Font where `W` and `M` are twice as wide as everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct WideCapsFont;

impl TextMeasure for WideCapsFont {
    fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| if matches!(c, 'W' | 'M') { 20.0 } else { 10.0 })
            .sum()
    }

    fn line_height(&self) -> f32 {
        10.0
    }

    fn char_spacing(&self) -> f32 {
        0.0
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect(Rect, Color),
    Gradient(Rect, Color, Color),
    Text(String, Point, TextAlign, Color),
}

/// Canvas that records every call in order
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(text, ..) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn gradients(&self) -> Vec<(Rect, Color, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Gradient(r, a, b) => Some((*r, *a, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect(r, color) => Some((*r, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn fill_horizontal_gradient(&mut self, rect: Rect, left: Color, right: Color) {
        self.calls.push(DrawCall::Gradient(rect, left, right));
    }

    fn draw_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color) {
        self.calls
            .push(DrawCall::Text(text.to_string(), at, align, color));
    }
}

/// Field at the origin, `chars_wide` wide, measured with [`MonoFont`]
pub fn test_field(ctx: &mut UiContext, chars_wide: usize) -> TextField {
    TextField::new(
        ctx,
        &MonoFont::default(),
        TextFieldOptions::new(0.0, 0.0, chars_wide),
    )
}

/// Same as [`test_field`], already focused
pub fn focused_field(ctx: &mut UiContext, chars_wide: usize) -> TextField {
    let mut field = test_field(ctx, chars_wide);
    field.focus(ctx);
    field
}

/// Type every character of `text` with no modifiers held
pub fn type_text(field: &mut TextField, ctx: &mut UiContext, text: &str) {
    for ch in text.chars() {
        field.key_down(ctx, ch, Modifiers::NONE);
    }
}

/// Run `n` simulation steps
pub fn run_steps(field: &mut TextField, ctx: &UiContext, n: usize) {
    for _ in 0..n {
        field.step(ctx);
    }
}
