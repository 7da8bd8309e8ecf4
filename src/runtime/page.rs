//! The demo page: three text fields sharing one UI context.
//!
//! Key presses go to the focused field only. Releases go to every field so
//! a key held across a focus change still stops repeating.

use fieldline::cli::CliArgs;
use fieldline::input::{FieldKey, Modifiers};
use fieldline::theme::FieldTheme;
use fieldline::view::{Canvas, TextMeasure};
use fieldline::{FieldConfig, FieldEvent, TextField, TextFieldOptions, UiContext};

/// Simulation rate for key repeats
pub const STEPS_PER_SECOND: u32 = 60;

const NOTE: usize = 0;
const NAME: usize = 1;
const CODE: usize = 2;

/// What the window should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    None,
    Redraw,
    Exit,
}

pub struct Page {
    ctx: UiContext,
    fields: Vec<TextField>,
}

impl Page {
    pub fn demo(config: &FieldConfig, font: &dyn TextMeasure, args: &CliArgs) -> Self {
        let mut ctx = UiContext::from_config(config);

        let mut note = TextField::new(
            &mut ctx,
            font,
            TextFieldOptions::new(0.0, 0.0, args.chars_wide)
                .with_caps(args.caps)
                .with_label("Note"),
        );
        note.set_fire_on_any_text_change(true);

        let mut name = TextField::new(
            &mut ctx,
            font,
            TextFieldOptions::new(0.0, 0.0, 10)
                .with_caps(true)
                .with_label("Name")
                .with_forbidden("0123456789"),
        );
        name.set_fire_on_any_text_change(true);

        let mut code = TextField::new(
            &mut ctx,
            font,
            TextFieldOptions::new(0.0, 0.0, args.max_length.max(1))
                .with_label("Code")
                .with_allowed("0123456789"),
        );
        code.set_max_length(Some(args.max_length));
        // Unlocked once a name is entered
        code.set_active(false);

        note.focus(&mut ctx);

        Self {
            ctx,
            fields: vec![note, name, code],
        }
    }

    pub fn theme(&self) -> &FieldTheme {
        self.ctx.theme()
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    /// Position the fields for a window of the given size
    pub fn layout(&mut self, width: f32, height: f32) {
        let rows = self.fields.len() as f32 + 1.0;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_position(width * 0.55, height * (i as f32 + 1.0) / rows);
        }
    }

    /// Advance one simulation step. Returns true if a redraw is needed.
    pub fn step(&mut self) -> bool {
        for i in 0..self.fields.len() {
            if let Some(event) = self.fields[i].step(&self.ctx) {
                self.on_event(i, event);
            }
        }
        self.ctx.focused().is_some()
    }

    pub fn key_down(&mut self, key: FieldKey, modifiers: Modifiers) -> PageAction {
        match key {
            FieldKey::Escape => PageAction::Exit,
            FieldKey::Tab => {
                self.focus_next();
                PageAction::Redraw
            }
            FieldKey::Char(ch) => {
                let Some(i) = self.focused_index() else {
                    return PageAction::None;
                };
                if let Some(event) = self.fields[i].key_down(&mut self.ctx, ch, modifiers) {
                    self.on_event(i, event);
                }
                PageAction::Redraw
            }
            FieldKey::Special(special) => {
                let Some(i) = self.focused_index() else {
                    return PageAction::None;
                };
                self.fields[i].special_key_down(&mut self.ctx, special);
                PageAction::Redraw
            }
        }
    }

    pub fn key_up(&mut self, key: FieldKey) {
        for field in &mut self.fields {
            match key {
                FieldKey::Char(ch) => field.key_up(ch),
                FieldKey::Special(special) => field.special_key_up(special),
                FieldKey::Tab | FieldKey::Escape => {}
            }
        }
    }

    /// Pointer released at window coordinates. Returns true if a field was hit.
    pub fn pointer_up(&mut self, font: &dyn TextMeasure, x: f32, y: f32) -> bool {
        let mut hit = false;
        for field in self.fields.iter_mut().filter(|f| f.is_active()) {
            let (lx, ly) = field.to_local(x, y);
            hit |= field.pointer_up(&mut self.ctx, font, lx, ly);
        }
        hit
    }

    /// The active field holding focus, resolved once per key event
    fn focused_index(&self) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.is_active() && f.is_focused(&self.ctx))
    }

    /// Move focus to the next active field
    pub fn focus_next(&mut self) {
        let count = self.fields.len();
        let current = self
            .fields
            .iter()
            .position(|f| f.is_focused(&self.ctx))
            .unwrap_or(count - 1);

        let next = (1..=count)
            .map(|offset| (current + offset) % count)
            .find(|&i| self.fields[i].is_active());

        if let Some(next) = next {
            self.fields[next].focus(&mut self.ctx);
        }
    }

    pub fn draw(&mut self, font: &dyn TextMeasure, canvas: &mut dyn Canvas) {
        for field in &mut self.fields {
            field.draw(&self.ctx, font, canvas);
        }
    }

    fn on_event(&mut self, index: usize, event: FieldEvent) {
        match event {
            FieldEvent::Submitted => {
                tracing::info!(field = index, text = %self.fields[index].as_str(), "submitted");
                self.focus_next();
            }
            FieldEvent::Changed => {
                tracing::debug!(field = index, text = %self.fields[index].as_str(), "changed");
                if index == NAME {
                    let unlocked = !self.fields[NAME].as_str().is_empty();
                    let code = &mut self.fields[CODE];
                    code.set_active(unlocked);
                    if !unlocked {
                        code.unfocus(&mut self.ctx);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fieldline::input::{SpecialKey, DELETE, RETURN};

    struct Fixed;

    impl TextMeasure for Fixed {
        fn measure(&self, text: &str) -> f32 {
            text.len() as f32 * 10.0
        }

        fn line_height(&self) -> f32 {
            10.0
        }

        fn char_spacing(&self) -> f32 {
            0.0
        }
    }

    fn demo_page() -> Page {
        let args = CliArgs::try_parse_from(["fieldline", "--font", "x.ttf"]).unwrap();
        let mut page = Page::demo(&FieldConfig::default(), &Fixed, &args);
        page.layout(800.0, 400.0);
        page
    }

    fn type_str(page: &mut Page, text: &str) {
        for ch in text.chars() {
            page.key_down(FieldKey::Char(ch), Modifiers::NONE);
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field_only() {
        let mut page = demo_page();
        type_str(&mut page, "hi");
        assert_eq!(page.fields()[NOTE].as_str(), "hi");
        assert_eq!(page.fields()[NAME].as_str(), "");
    }

    #[test]
    fn test_tab_skips_inactive_field() {
        let mut page = demo_page();
        page.key_down(FieldKey::Tab, Modifiers::NONE);
        assert!(page.fields()[NAME].is_focused(&page.ctx));

        page.key_down(FieldKey::Tab, Modifiers::NONE);
        assert!(page.fields()[NOTE].is_focused(&page.ctx));
    }

    #[test]
    fn test_name_unlocks_code_field() {
        let mut page = demo_page();
        page.key_down(FieldKey::Tab, Modifiers::NONE);
        type_str(&mut page, "ab");
        assert!(page.fields()[CODE].is_active());

        page.key_down(FieldKey::Char(RETURN), Modifiers::NONE);
        assert!(page.fields()[CODE].is_focused(&page.ctx));
        type_str(&mut page, "12x345678");
        assert_eq!(page.fields()[CODE].as_str(), "123456");

        page.key_down(FieldKey::Tab, Modifiers::NONE);
        page.key_down(FieldKey::Tab, Modifiers::NONE);
        assert!(page.fields()[NAME].is_focused(&page.ctx));
        page.key_down(FieldKey::Char(DELETE), Modifiers::NONE);
        page.key_down(FieldKey::Char(DELETE), Modifiers::NONE);
        assert!(!page.fields()[CODE].is_active());
    }

    #[test]
    fn test_held_arrow_repeats_through_steps() {
        let mut page = demo_page();
        type_str(&mut page, "abcdef");
        page.key_down(FieldKey::Special(SpecialKey::Left), Modifiers::NONE);
        assert_eq!(page.fields()[NOTE].cursor(), 5);

        for _ in 0..31 {
            page.step();
        }
        assert_eq!(page.fields()[NOTE].cursor(), 4);

        page.key_up(FieldKey::Special(SpecialKey::Left));
        for _ in 0..100 {
            page.step();
        }
        assert_eq!(page.fields()[NOTE].cursor(), 4);
    }

    #[test]
    fn test_return_advances_focus_by_one() {
        let mut page = demo_page();
        page.key_down(FieldKey::Char(RETURN), Modifiers::NONE);
        assert!(page.fields()[NAME].is_focused(&page.ctx));

        page.key_down(FieldKey::Char(RETURN), Modifiers::NONE);
        assert!(page.fields()[NOTE].is_focused(&page.ctx));
    }

    #[test]
    fn test_escape_exits() {
        let mut page = demo_page();
        assert_eq!(
            page.key_down(FieldKey::Escape, Modifiers::NONE),
            PageAction::Exit
        );
    }
}
