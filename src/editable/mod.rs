//! Text editing core for the field.
//!
//! - [`FieldBuffer`]: owned single-line buffer of printable single-byte characters
//! - [`CharFilter`]: case-forcing, deny-list and allow-list applied to every character
//! - [`EditConstraints`]: filter plus optional maximum length
//! - [`EditableState`]: buffer, cursor and constraints, with the editing operations
//! - [`TextEditMsg`]: message form of the editing operations
//!
//! # Example
//!
//! ```
//! use fieldline::editable::{CharFilter, EditConstraints, EditableState};
//!
//! let mut state = EditableState::new(EditConstraints {
//!     max_length: None,
//!     filter: CharFilter::new(true).with_allowed(Some("0123456789")),
//! });
//!
//! for ch in "a1B2c3".chars() {
//!     state.insert_char(ch);
//! }
//!
//! assert_eq!(state.text(), "123");
//! ```

mod buffer;
mod constraints;
mod messages;
mod state;

pub use buffer::FieldBuffer;
pub use constraints::{is_printable, CharFilter, EditConstraints, FIRST_PRINTABLE, LAST_PRINTABLE};
pub use messages::{MoveTarget, TextEditMsg};
pub use state::EditableState;
