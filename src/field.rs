//! The text field widget.
//!
//! [`TextField`] combines an [`EditableState`] with a [`RepeatScheduler`],
//! fixed pixel geometry and a cached layout. Shared state (focus, repeat
//! delays, theme) lives in the [`UiContext`] passed to every call that needs
//! it. Handlers return a [`FieldEvent`] when the owner should react.

use crate::context::{FieldId, UiContext};
use crate::editable::{CharFilter, EditConstraints, EditableState, MoveTarget, TextEditMsg};
use crate::input::{Modifiers, SpecialKey, BACKSPACE, DELETE, RETURN};
use crate::repeat::{RepeatAction, RepeatScheduler};
use crate::view::geometry::{Point, Rect};
use crate::view::layout::FieldLayout;
use crate::view::text_field::{TextFieldRenderer, TextFieldStyle};
use crate::view::{Canvas, TextMeasure};

/// Construction parameters of a [`TextField`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldOptions {
    /// Widget centre
    pub x: f32,
    pub y: f32,
    /// Visible width in characters (does not limit how much can be typed)
    pub chars_wide: usize,
    pub force_caps: bool,
    /// Drawn to the left of the field
    pub label: Option<String>,
    /// Only these characters may be typed (None or empty = any)
    pub allowed_chars: Option<String>,
    /// These characters may never be typed
    pub forbidden_chars: Option<String>,
}

impl Default for TextFieldOptions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            chars_wide: 10,
            force_caps: false,
            label: None,
            allowed_chars: None,
            forbidden_chars: None,
        }
    }
}

impl TextFieldOptions {
    pub fn new(x: f32, y: f32, chars_wide: usize) -> Self {
        Self {
            x,
            y,
            chars_wide,
            ..Self::default()
        }
    }

    pub fn with_caps(mut self, force_caps: bool) -> Self {
        self.force_caps = force_caps;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_allowed(mut self, chars: impl Into<String>) -> Self {
        self.allowed_chars = Some(chars.into());
        self
    }

    pub fn with_forbidden(mut self, chars: impl Into<String>) -> Self {
        self.forbidden_chars = Some(chars.into());
        self
    }
}

/// Notifications returned by field handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The text changed (only when firing on any change is enabled)
    Changed,
    /// Enter was pressed
    Submitted,
}

/// A single-line, fixed-width text input.
#[derive(Debug)]
pub struct TextField {
    id: FieldId,
    x: f32,
    y: f32,
    chars_wide: usize,
    label: Option<String>,
    state: EditableState,
    active: bool,
    fire_on_any_change: bool,
    repeat: RepeatScheduler,
    width: f32,
    height: f32,
    border: f32,
    /// Layout of the last draw; cleared by anything that changes text or cursor
    last_layout: Option<FieldLayout>,
}

impl TextField {
    /// Create a field and register it with the context.
    ///
    /// The widget is sized once, from the widest character the filter accepts.
    pub fn new(ctx: &mut UiContext, font: &dyn TextMeasure, options: TextFieldOptions) -> Self {
        let filter = CharFilter::new(options.force_caps)
            .with_allowed(options.allowed_chars.as_deref())
            .with_forbidden(options.forbidden_chars.as_deref());

        let char_width = font.line_height();
        let border = char_width * 0.25;
        let height = font.line_height() + 2.0 * border;

        let mut widest: Option<(char, f32)> = None;
        for ch in filter.accepted_chars() {
            let mut buf = [0u8; 4];
            let w = font.measure(ch.encode_utf8(&mut buf));
            if widest.map_or(true, |(_, best)| w > best) {
                widest = Some((ch, w));
            }
        }
        let inner_width = match widest {
            Some((ch, _)) => font.measure(&ch.to_string().repeat(options.chars_wide)),
            None => 0.0,
        };
        let width = inner_width + 2.0 * border;

        let id = ctx.register();
        tracing::debug!(
            field = id.raw(),
            chars_wide = options.chars_wide,
            width,
            height,
            "text field created"
        );

        Self {
            id,
            x: options.x,
            y: options.y,
            chars_wide: options.chars_wide,
            label: options.label,
            state: EditableState::new(EditConstraints {
                max_length: None,
                filter,
            }),
            active: true,
            fire_on_any_change: false,
            repeat: RepeatScheduler::new(),
            width,
            height,
            border,
            last_layout: None,
        }
    }

    /// Remove the field, releasing focus if it holds it
    pub fn dispose(self, ctx: &mut UiContext) {
        ctx.unregister(self.id);
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Replace the text. Characters the filter rejects are dropped, the cursor
    /// goes to the end and any held key stops repeating. No event is produced.
    pub fn set_text(&mut self, text: &str) {
        let dropped = self.state.set_text(text);
        self.repeat.release_all();
        self.last_layout = None;
        tracing::debug!(field = self.id.raw(), len = self.state.len(), dropped, "text set");
    }

    /// Owned copy of the text
    pub fn text(&self) -> String {
        self.state.text()
    }

    pub fn as_str(&self) -> &str {
        self.state.as_str()
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    /// Move the cursor to the start of the text
    pub fn reset_cursor(&mut self) {
        self.edit(&TextEditMsg::Move(MoveTarget::Start));
    }

    /// Limit how many characters may be typed (None = unlimited)
    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.state.constraints.max_length = max_length;
    }

    pub fn max_length(&self) -> Option<usize> {
        self.state.constraints.max_length
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Produce [`FieldEvent::Changed`] on every accepted keystroke and deletion
    pub fn set_fire_on_any_text_change(&mut self, fire: bool) {
        self.fire_on_any_change = fire;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn chars_wide(&self) -> usize {
        self.chars_wide
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn border_width(&self) -> f32 {
        self.border
    }

    pub fn right_edge_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Convert a point to widget-local coordinates (origin at the centre)
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// Check if a widget-local point is strictly inside the widget
    pub fn contains_local(&self, x: f32, y: f32) -> bool {
        Rect::centered(0.0, 0.0, self.width, self.height).contains_strict(x, y)
    }

    /// Layout of the most recent draw, if nothing changed since
    pub fn last_layout(&self) -> Option<&FieldLayout> {
        self.last_layout.as_ref()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Take focus; whichever field had it loses it
    pub fn focus(&mut self, ctx: &mut UiContext) {
        // Keys held before focus was lost were released elsewhere
        if !ctx.is_focused(self.id) {
            self.repeat.release_all();
        }
        ctx.focus(self.id);
    }

    pub fn unfocus(&mut self, ctx: &mut UiContext) {
        ctx.unfocus(self.id);
        self.repeat.release_all();
    }

    pub fn is_focused(&self, ctx: &UiContext) -> bool {
        ctx.is_focused(self.id)
    }

    /// Check focus, dropping held keys if it was lost to another field
    fn sync_focus(&mut self, ctx: &UiContext) -> bool {
        let focused = ctx.is_focused(self.id);
        if !focused && self.repeat.is_active() {
            self.repeat.release_all();
        }
        focused
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Apply an edit, returning true if the text changed
    fn edit(&mut self, msg: &TextEditMsg) -> bool {
        let cursor = self.state.cursor();
        let changed = self.state.apply(msg);
        if changed || cursor != self.state.cursor() {
            self.last_layout = None;
        }
        changed
    }

    fn changed_event(&self, changed: bool) -> Option<FieldEvent> {
        (changed && self.fire_on_any_change).then_some(FieldEvent::Changed)
    }

    /// Handle a character key press.
    ///
    /// `DELETE`/`BACKSPACE` delete backward and start the delete repeat,
    /// `RETURN` submits, printable characters are filtered and inserted.
    pub fn key_down(
        &mut self,
        ctx: &mut UiContext,
        ch: char,
        modifiers: Modifiers,
    ) -> Option<FieldEvent> {
        if !self.sync_focus(ctx) {
            return None;
        }

        // Command-letter combinations are shortcuts; other characters may
        // need a modifier to be typed at all on some layouts
        if modifiers.command() && ch.is_ascii_alphabetic() {
            return None;
        }

        match ch {
            DELETE | BACKSPACE => {
                let changed = self.edit(&RepeatAction::DeleteBackward.edit_msg());
                self.repeat.press(RepeatAction::DeleteBackward);
                self.changed_event(changed)
            }
            RETURN => {
                tracing::debug!(field = self.id.raw(), "submitted");
                Some(FieldEvent::Submitted)
            }
            ch if ch >= ' ' => {
                let changed = self.edit(&TextEditMsg::InsertChar(ch));
                self.repeat.release_all();
                self.changed_event(changed)
            }
            _ => None,
        }
    }

    /// Handle a character key release
    pub fn key_up(&mut self, ch: char) {
        if matches!(ch, DELETE | BACKSPACE) {
            self.repeat.release(RepeatAction::DeleteBackward);
        }
    }

    pub fn special_key_down(&mut self, ctx: &mut UiContext, key: SpecialKey) {
        if !self.sync_focus(ctx) {
            return;
        }

        let action = repeat_action_for(key);
        self.edit(&action.edit_msg());
        self.repeat.press(action);
    }

    pub fn special_key_up(&mut self, key: SpecialKey) {
        self.repeat.release(repeat_action_for(key));
    }

    /// Advance held-key repeats by one simulation step
    pub fn step(&mut self, ctx: &UiContext) -> Option<FieldEvent> {
        if !self.sync_focus(ctx) {
            return None;
        }

        let mut fired = [None; 3];
        let mut count = 0;
        self.repeat.tick(ctx.repeat_delays(), |action| {
            fired[count] = Some(action);
            count += 1;
        });

        let mut changed = false;
        for action in fired.into_iter().flatten() {
            changed |= self.edit(&action.edit_msg());
        }
        self.changed_event(changed)
    }

    /// Handle a pointer release at a widget-local point.
    ///
    /// A release strictly inside the widget focuses it and moves the cursor to
    /// the character boundary nearest the pointer. Returns true on a hit.
    pub fn pointer_up(
        &mut self,
        ctx: &mut UiContext,
        font: &dyn TextMeasure,
        x: f32,
        y: f32,
    ) -> bool {
        if !self.contains_local(x, y) {
            return false;
        }

        self.focus(ctx);

        let layout = match self.last_layout.take() {
            Some(layout) => layout,
            None => self.compute_layout(font),
        };

        let best = layout.nearest_boundary(self.state.as_str(), font, x, self.width * 2.0);
        let delta = best as isize - layout.cursor_draw_position as isize;
        tracing::trace!(field = self.id.raw(), best, delta, "pointer moved cursor");

        self.last_layout = Some(layout);
        if delta != 0 {
            self.state.move_cursor(delta);
            self.last_layout = None;
        }
        true
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn compute_layout(&self, font: &dyn TextMeasure) -> FieldLayout {
        FieldLayout::compute(
            self.state.as_str(),
            self.state.cursor(),
            self.width,
            self.border,
            font,
        )
    }

    pub fn draw(&mut self, ctx: &UiContext, font: &dyn TextMeasure, canvas: &mut dyn Canvas) {
        let layout = self.compute_layout(font);
        let style = TextFieldStyle {
            center: self.position(),
            width: self.width,
            height: self.height,
            border: self.border,
            focused: ctx.is_focused(self.id),
            active: self.active,
            label: self.label.as_deref(),
            theme: ctx.theme(),
        };
        TextFieldRenderer::render(canvas, font, self.state.as_str(), &layout, &style);
        self.last_layout = Some(layout);
    }
}

fn repeat_action_for(key: SpecialKey) -> RepeatAction {
    match key {
        SpecialKey::Left => RepeatAction::MoveLeft,
        SpecialKey::Right => RepeatAction::MoveRight,
    }
}
