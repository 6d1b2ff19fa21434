#![forbid(unsafe_code)]

//! Widgets for viewing and editing a right triangle numerically.

pub mod format;
pub mod numeric_view;
pub mod text_field;

pub use format::{FORMAT_PATTERN, ParseFailure, commit_value, format_side, parse_side};
pub use numeric_view::{FocusEvent, NumericBindingView, ViewSnapshot};
pub use text_field::TextField;
