//! fieldline - single-line scrolling text fields
//!
//! A fixed-width text input for real-time rendered UIs. The widget owns its
//! text, cursor and held-key repeat state; focus, repeat timing and colors are
//! shared through a [`UiContext`]. Text that does not fit scrolls so the
//! cursor stays visible, with fades over the clipped edges.
//!
//! Font metrics and drawing are supplied through the [`view::TextMeasure`] and
//! [`view::Canvas`] traits; [`view::frame`] implements both over a software
//! pixel buffer.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod editable;
pub mod field;
pub mod input;
pub mod repeat;
pub mod theme;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use config::FieldConfig;
pub use context::{FieldId, UiContext};
pub use field::{FieldEvent, TextField, TextFieldOptions};
pub use repeat::RepeatDelays;
pub use theme::{Color, FieldTheme};
