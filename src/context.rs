//! Shared UI state for a page of text fields.
//!
//! Owns the single focused-field reference, the key-repeat delays and the
//! theme. Every field operation that touches shared state takes the context,
//! so focus exclusivity is enforced here and nowhere else.

use crate::config::FieldConfig;
use crate::repeat::RepeatDelays;
use crate::theme::FieldTheme;

/// Identifies a field registered with a [`UiContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u32);

impl FieldId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Focus, repeat timing and colors shared by every field on a page.
#[derive(Debug, Clone, Default)]
pub struct UiContext {
    focused: Option<FieldId>,
    next_id: u32,
    repeat_delays: RepeatDelays,
    theme: FieldTheme,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from loaded configuration
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            repeat_delays: config.repeat,
            theme: config.theme.clone(),
            ..Self::default()
        }
    }

    /// Allocate an id for a new field
    pub(crate) fn register(&mut self) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Forget a field that is being destroyed
    pub(crate) fn unregister(&mut self, id: FieldId) {
        if self.focused == Some(id) {
            tracing::debug!(field = id.raw(), "focused field disposed");
            self.focused = None;
        }
    }

    /// The currently focused field, if any
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn is_focused(&self, id: FieldId) -> bool {
        self.focused == Some(id)
    }

    /// Give focus to `id`, returning the field that lost it
    pub(crate) fn focus(&mut self, id: FieldId) -> Option<FieldId> {
        let previous = self.focused.replace(id);
        if previous != Some(id) {
            tracing::debug!(
                field = id.raw(),
                previous = ?previous.map(FieldId::raw),
                "focus changed"
            );
        }
        previous.filter(|prev| *prev != id)
    }

    /// Drop focus if `id` holds it
    pub(crate) fn unfocus(&mut self, id: FieldId) {
        if self.focused == Some(id) {
            tracing::debug!(field = id.raw(), "focus cleared");
            self.focused = None;
        }
    }

    pub fn repeat_delays(&self) -> RepeatDelays {
        self.repeat_delays
    }

    /// Tune how long delete and arrow keys must be held before they repeat
    pub fn set_repeat_delays(&mut self, first_delay_steps: u32, next_delay_steps: u32) {
        self.repeat_delays = RepeatDelays::new(first_delay_steps, next_delay_steps);
    }

    pub fn theme(&self) -> &FieldTheme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ctx = UiContext::new();
        let a = ctx.register();
        let b = ctx.register();
        assert_ne!(a, b);
    }

    #[test]
    fn test_focus_replaces_previous() {
        let mut ctx = UiContext::new();
        let a = ctx.register();
        let b = ctx.register();

        assert_eq!(ctx.focus(a), None);
        assert_eq!(ctx.focus(b), Some(a));
        assert!(ctx.is_focused(b));
        assert!(!ctx.is_focused(a));
    }

    #[test]
    fn test_refocus_same_field_reports_nothing_lost() {
        let mut ctx = UiContext::new();
        let a = ctx.register();
        ctx.focus(a);
        assert_eq!(ctx.focus(a), None);
    }

    #[test]
    fn test_unfocus_only_affects_holder() {
        let mut ctx = UiContext::new();
        let a = ctx.register();
        let b = ctx.register();
        ctx.focus(a);

        ctx.unfocus(b);
        assert_eq!(ctx.focused(), Some(a));

        ctx.unfocus(a);
        assert_eq!(ctx.focused(), None);
    }

    #[test]
    fn test_unregister_clears_focus() {
        let mut ctx = UiContext::new();
        let a = ctx.register();
        ctx.focus(a);
        ctx.unregister(a);
        assert_eq!(ctx.focused(), None);
    }

    #[test]
    fn test_set_repeat_delays() {
        let mut ctx = UiContext::new();
        assert_eq!(ctx.repeat_delays(), RepeatDelays::new(30, 2));
        ctx.set_repeat_delays(10, 1);
        assert_eq!(ctx.repeat_delays(), RepeatDelays::new(10, 1));
    }
}
