#![forbid(unsafe_code)]

//! End-to-end scripted sessions.

use rtview_harness::{RecordingModel, ScriptErrorKind, Session, Target};
use rtview_model::{Attribute, RightTriangle, SideBounds, TriangleModel};
use rtview_widgets::NumericBindingView;

#[test]
fn edit_base_then_clear_height() {
    let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
    session
        .run_script(
            "\
# initial state
expect hypotenuse 5
show

# replace the base
focus base
type 6
tab
expect base 6
expect hypotenuse 7.21
show

# wipe the height
clear
blur
expect height 50
expect hypotenuse 50.36
show
",
        )
        .expect("scenario passes");

    assert_eq!(
        session.transcript(),
        [
            "Base: 3  Height: 4  Hypotenuse: 5",
            "Base: 6  Height: 4  Hypotenuse: 7.21",
            "Base: 6  Height: 50  Hypotenuse: 50.36",
        ]
    );
    assert_eq!(session.model().height(), 50.0);
}

#[test]
fn editing_with_backspace_and_retyping() {
    let mut session = Session::new(&TriangleModel::new(12.5, 4.0));
    session
        .run_script(
            "\
focus base
backspace
expect base \"\"
type 9.75
tab
expect base 9.75
tab
expect height 4
",
        )
        .expect("scenario passes");
    assert_eq!(session.model().base(), 9.75);
}

#[test]
fn foreign_mutation_while_editing_other_field() {
    let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
    session
        .run_script(
            "\
focus height
type 11
set base 8
expect base 8
expect height 11
blur
expect height 11
expect hypotenuse 13.6
",
        )
        .expect("scenario passes");
}

#[test]
fn clamped_commit_is_displayed() {
    let model = TriangleModel::with_bounds(
        SideBounds::new(1.0, 20.0).expect("bounds"),
        3.0,
        4.0,
    );
    let mut session = Session::new(&model);
    session
        .run_script(
            "\
focus base
type 400
tab
expect base 20
type abc
tab
expect height 10
",
        )
        .expect("scenario passes");
}

#[test]
fn expectation_failure_stops_the_run() {
    let mut session = Session::new(&TriangleModel::new(3.0, 4.0));
    let err = session
        .run_script("focus base\ntype 6\ntab\nexpect hypotenuse 7\nshow\n")
        .unwrap_err();
    assert_eq!(err.line, 4);
    assert_eq!(
        err.kind,
        ScriptErrorKind::ExpectationFailed {
            target: Target::Hypotenuse,
            expected: "7".into(),
            actual: "7.21".into(),
        }
    );
    assert!(session.transcript().is_empty());
}

#[test]
fn recording_session_sees_one_set_per_commit() {
    let model = RecordingModel::new(TriangleModel::new(3.0, 4.0));
    let mut session = Session::new(&model);
    session
        .run_script("focus base\ntype 6\ntab\ntype 8\ntab\n")
        .expect("scenario passes");

    assert_eq!(model.set_calls(Attribute::Base), 1);
    assert_eq!(model.set_calls(Attribute::Height), 1);
    assert_eq!(model.notifications(Attribute::Base), 1);
    assert_eq!(model.notifications(Attribute::Height), 1);
    assert_eq!(session.view().hypotenuse_text(), "10");
}

#[test]
fn sibling_views_share_one_model() {
    let model = TriangleModel::new(3.0, 4.0);
    let mut editor = Session::new(&model);
    let mirror = NumericBindingView::new(&model);

    editor
        .run_script("focus height\ntype 7.5\nblur\n")
        .expect("scenario passes");
    assert_eq!(mirror.snapshot(), editor.view().snapshot());
    assert_eq!(mirror.field_text(Attribute::Height), "7.5");
}
