//! Benchmarks for field layout and drawing
//!
//! Run with: cargo bench layout

use fieldline::theme::Color;
use fieldline::view::{Canvas, FieldLayout, Frame, Point, Rect, TextAlign, TextMeasure};
use fieldline::{TextField, TextFieldOptions, UiContext};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Fixed 8px advance, 16px lines
struct Mono;

impl TextMeasure for Mono {
    fn measure(&self, text: &str) -> f32 {
        text.len() as f32 * 8.0
    }

    fn line_height(&self) -> f32 {
        16.0
    }

    fn char_spacing(&self) -> f32 {
        0.0
    }
}

/// Canvas that fills rectangles into a frame and skips text
struct RectCanvas<'a, 'buf> {
    frame: &'a mut Frame<'buf>,
}

impl Canvas for RectCanvas<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rect_blended(rect, color.to_argb_u32());
    }

    fn fill_horizontal_gradient(&mut self, rect: Rect, left: Color, right: Color) {
        self.frame
            .fill_horizontal_gradient(rect, left.to_argb_u32(), right.to_argb_u32());
    }

    fn draw_text(&mut self, text: &str, at: Point, _align: TextAlign, _color: Color) {
        divan::black_box((text, at));
    }
}

// ============================================================================
// Layout
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn layout_cursor_at_end(len: usize) {
    let text = "x".repeat(len);
    let layout = FieldLayout::compute(divan::black_box(&text), len, 200.0, 4.0, &Mono);
    divan::black_box(layout);
}

#[divan::bench(args = [10, 100, 1000])]
fn layout_cursor_centered(len: usize) {
    let text = "x".repeat(len);
    let layout = FieldLayout::compute(divan::black_box(&text), len / 2, 200.0, 4.0, &Mono);
    divan::black_box(layout);
}

// ============================================================================
// Full draw
// ============================================================================

#[divan::bench(args = [10, 1000])]
fn draw_field(bencher: divan::Bencher, len: usize) {
    let mut ctx = UiContext::new();
    let mut field = TextField::new(&mut ctx, &Mono, TextFieldOptions::new(160.0, 40.0, 20));
    field.set_text(&"x".repeat(len));
    field.focus(&mut ctx);
    let mut buffer = vec![0u32; 320 * 80];

    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, 320, 80);
        let mut canvas = RectCanvas { frame: &mut frame };
        field.draw(&ctx, &Mono, &mut canvas);
    });
}
