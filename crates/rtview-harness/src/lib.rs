#![forbid(unsafe_code)]

//! Test harness for rtview.
//!
//! - [`script`]: a line-based language of focus and edit steps
//! - [`session`]: runs steps against a model and a bound view, recording a
//!   transcript of snapshots
//! - [`probe`]: a [`RightTriangle`](rtview_model::RightTriangle) wrapper that
//!   records every mutator call and notification

pub mod probe;
pub mod script;
pub mod session;

pub use probe::{ModelEvent, RecordingModel};
pub use script::{ScriptError, ScriptErrorKind, ScriptLine, Step, Target, parse_script};
pub use session::Session;
