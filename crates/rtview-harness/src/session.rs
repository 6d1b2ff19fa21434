//! Scripted sessions: a model, a view bound to it, and a transcript.

use rtview_model::{RightTriangle, TriangleModel};
use rtview_widgets::NumericBindingView;

use crate::script::{ScriptError, ScriptErrorKind, ScriptLine, Step, Target, parse_script};

/// Drives a [`NumericBindingView`] the way a user (and other observers)
/// would, step by step.
///
/// # Example
///
/// ```
/// use rtview_harness::Session;
/// use rtview_model::TriangleModel;
///
/// let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
/// session
///     .run_script("focus base\ntype 6\ntab\nexpect hypotenuse 7.21\nshow\n")
///     .expect("script passes");
/// assert_eq!(session.transcript(), ["Base: 6  Height: 4  Hypotenuse: 7.21"]);
/// ```
pub struct Session<M: RightTriangle + Clone + 'static = TriangleModel> {
    model: M,
    view: NumericBindingView<M>,
    transcript: Vec<String>,
}

impl<M: RightTriangle + Clone + 'static> Session<M> {
    pub fn new(model: &M) -> Self {
        Self {
            model: model.clone(),
            view: NumericBindingView::new(model),
            transcript: Vec::new(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn view(&self) -> &NumericBindingView<M> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut NumericBindingView<M> {
        &mut self.view
    }

    /// Snapshots recorded by `show` steps, in order.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &Step) -> Result<(), ScriptErrorKind> {
        tracing::trace!(message = "session.step", step = ?step);
        match step {
            Step::Focus(attribute) => self.view.focus(*attribute),
            Step::Tab => self.view.focus_next(),
            Step::Blur => self.view.blur(),
            Step::Type(text) => {
                self.view.type_text(text);
            }
            Step::Backspace => {
                self.view.backspace();
            }
            Step::Clear => {
                self.view.clear_field();
            }
            Step::Set(attribute, value) => {
                self.model.set(*attribute, *value);
            }
            Step::Expect { target, text } => {
                let actual = match target {
                    Target::Field(attribute) => self.view.field_text(*attribute),
                    Target::Hypotenuse => self.view.hypotenuse_text(),
                };
                if actual != *text {
                    return Err(ScriptErrorKind::ExpectationFailed {
                        target: *target,
                        expected: text.clone(),
                        actual,
                    });
                }
            }
            Step::Show => self.transcript.push(self.view.snapshot().to_string()),
        }
        Ok(())
    }

    /// Apply parsed lines, stopping at the first failure.
    pub fn run(&mut self, lines: &[ScriptLine]) -> Result<(), ScriptError> {
        for ScriptLine { line, step } in lines {
            self.apply(step).map_err(|kind| ScriptError { line: *line, kind })?;
        }
        Ok(())
    }

    /// Parse and run a script.
    pub fn run_script(&mut self, text: &str) -> Result<(), ScriptError> {
        let lines = parse_script(text)?;
        self.run(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtview_model::Attribute;

    #[test]
    fn external_set_step_bypasses_view() {
        let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
        session.apply(&Step::Set(Attribute::Base, 5.0)).expect("set");
        assert_eq!(session.view().field_text(Attribute::Base), "5");
        assert_eq!(session.view().focused(), None);
    }

    #[test]
    fn failed_expectation_reports_line() {
        let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
        let err = session
            .run_script("show\n\nexpect base 4\n")
            .unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.to_string(),
            "line 3: expected base to show '4', found '3'"
        );
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn typing_without_focus_changes_nothing() {
        let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
        session
            .run_script("type 99\nblur\nexpect base 3\n")
            .expect("script passes");
    }
}
