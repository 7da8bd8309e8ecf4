//! Runtime module - winit/platform integration for the demo
//!
//! - `app` - ApplicationHandler, window, surface and the fixed-step clock
//! - `page` - the fields on screen and how events reach them

pub mod app;
pub mod page;

pub use app::App;
pub use page::Page;
