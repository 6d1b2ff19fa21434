#![forbid(unsafe_code)]

//! rtview public facade.
//!
//! Re-exports the model, reactive runtime and widgets, plus a [`prelude`] for
//! the common imports.

pub use rtview_model as model;
pub use rtview_runtime as runtime;
pub use rtview_widgets as widgets;

pub use rtview_model::{Attribute, ModelConfig, RightTriangle, TriangleModel};
pub use rtview_widgets::{NumericBindingView, ViewSnapshot};

pub mod prelude {
    pub use rtview_model::{Attribute, MAX_SIDE, ModelConfig, RightTriangle, SideBounds, TriangleModel};
    pub use rtview_runtime::{BindingScope, Observable, Subscription};
    pub use rtview_widgets::{FocusEvent, NumericBindingView, ViewSnapshot, format_side, parse_side};
}
