#![forbid(unsafe_code)]

//! Numeric view bound two ways to a [`RightTriangle`].
//!
//! The view shows two editable fields (base, height) and one read-only field
//! (hypotenuse).
//!
//! - **View → model**: when an editable field loses focus its text is parsed
//!   and committed through the attribute's mutator. Text that does not parse
//!   commits `max_side / 2`.
//! - **Model → view**: one change handler per attribute re-reads the model and
//!   re-formats that attribute's field plus the hypotenuse.
//!
//! # Invariants
//!
//! 1. Exactly one field controller per editable field and one change handler
//!    per attribute, registered at construction and held until the view drops.
//! 2. Change handlers never call a mutator, so a commit produces exactly one
//!    notification cycle.
//! 3. When a commit returns, every field already reflects the model.
//! 4. Handlers re-read the model instead of trusting the notification, so
//!    repeated or foreign notifications re-render to the same text.
//! 5. No borrow of the field state is held while a mutator runs.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unparseable text | Empty, malformed, `NaN` | Commits `max_side / 2`, silently |
//! | Out-of-range text | Negative, too large | Model clamps; field shows the clamped value |
//! | Commit leaves model unchanged | Same value, or clamps to current | Field re-rendered from the model |

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rtview_model::{Attribute, RightTriangle};
use rtview_runtime::BindingScope;

use crate::format::{commit_value, format_side};
use crate::text_field::TextField;

/// Focus transition delivered to an editable field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FocusEvent {
    Gained,
    Lost,
}

/// Displayed text of every field at one instant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewSnapshot {
    pub base: String,
    pub height: String,
    pub hypotenuse: String,
}

impl fmt::Display for ViewSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Base: {}  Height: {}  Hypotenuse: {}",
            self.base, self.height, self.hypotenuse
        )
    }
}

#[derive(Debug)]
struct DisplayFields {
    base: TextField,
    height: TextField,
    hypotenuse: String,
}

impl DisplayFields {
    fn new() -> Self {
        Self {
            base: TextField::numeric(),
            height: TextField::numeric(),
            hypotenuse: String::from(" "),
        }
    }

    fn field(&self, attribute: Attribute) -> &TextField {
        match attribute {
            Attribute::Base => &self.base,
            Attribute::Height => &self.height,
        }
    }

    fn field_mut(&mut self, attribute: Attribute) -> &mut TextField {
        match attribute {
            Attribute::Base => &mut self.base,
            Attribute::Height => &mut self.height,
        }
    }
}

/// Format the model's current `attribute` into its field.
fn render_field<M: RightTriangle>(fields: &RefCell<DisplayFields>, model: &M, attribute: Attribute) {
    let text = format_side(model.value(attribute));
    fields.borrow_mut().field_mut(attribute).set_text(text);
}

fn render_hypotenuse<M: RightTriangle>(fields: &RefCell<DisplayFields>, model: &M) {
    let text = format_side(model.hypotenuse());
    fields.borrow_mut().hypotenuse = text;
}

/// Turns focus transitions on one editable field into model commits.
#[derive(Clone, Copy, Debug)]
struct FieldController {
    attribute: Attribute,
}

impl FieldController {
    fn focus_gained(&self, fields: &RefCell<DisplayFields>) {
        let mut fields = fields.borrow_mut();
        let field = fields.field_mut(self.attribute);
        field.set_focused(true);
        field.select_all();
    }

    fn focus_lost<M: RightTriangle>(&self, fields: &RefCell<DisplayFields>, model: &M) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("field_commit", attribute = self.attribute.name()).entered();

        let text = {
            let mut fields = fields.borrow_mut();
            let field = fields.field_mut(self.attribute);
            field.set_focused(false);
            field.clear_selection();
            field.text().to_owned()
        };

        let value = commit_value(&text, model.max_side());
        // Notifies the change handlers (and re-renders) before returning.
        let changed = model.set(self.attribute, value);
        if !changed {
            render_field(fields, model, self.attribute);
        }
    }
}

/// Re-renders the fields that depend on one attribute.
#[derive(Clone, Copy, Debug)]
struct ChangeHandler {
    attribute: Attribute,
}

impl ChangeHandler {
    fn on_change<M: RightTriangle>(&self, fields: &RefCell<DisplayFields>, model: &M) {
        render_field(fields, model, self.attribute);
        render_hypotenuse(fields, model);
    }
}

/// Two editable side fields and a derived hypotenuse field, bound to a shared
/// [`RightTriangle`].
///
/// The model is owned elsewhere; the view keeps a handle to it and registers
/// one change listener per attribute for as long as it lives.
///
/// # Example
///
/// ```
/// use rtview_model::{Attribute, TriangleModel};
/// use rtview_widgets::NumericBindingView;
///
/// let model = TriangleModel::new(3.0, 4.0);
/// let mut view = NumericBindingView::new(&model);
/// assert_eq!(view.hypotenuse_text(), "5");
///
/// view.focus(Attribute::Base);
/// view.type_text("6");
/// view.focus_next();
/// assert_eq!(view.field_text(Attribute::Base), "6");
/// assert_eq!(view.hypotenuse_text(), "7.21");
/// ```
pub struct NumericBindingView<M: RightTriangle + Clone + 'static> {
    model: M,
    fields: Rc<RefCell<DisplayFields>>,
    controllers: [FieldController; 2],
    focused: Option<Attribute>,
    bindings: BindingScope,
}

impl<M: RightTriangle + Clone + 'static> NumericBindingView<M> {
    /// Bind a new view to `model` and render its current state.
    pub fn new(model: &M) -> Self {
        let mut view = Self {
            model: model.clone(),
            fields: Rc::new(RefCell::new(DisplayFields::new())),
            controllers: Attribute::ALL.map(|attribute| FieldController { attribute }),
            focused: None,
            bindings: BindingScope::new(),
        };
        view.register_listeners();
        view.render_all();
        view
    }

    fn register_listeners(&mut self) {
        for attribute in Attribute::ALL {
            let handler = ChangeHandler { attribute };
            let fields: Weak<RefCell<DisplayFields>> = Rc::downgrade(&self.fields);
            let model = self.model.clone();
            let sub = self.model.add_change_listener(attribute, move |_| {
                if let Some(fields) = fields.upgrade() {
                    handler.on_change(&fields, &model);
                }
            });
            self.bindings.hold(sub);
        }
    }

    fn render_all(&self) {
        for attribute in Attribute::ALL {
            render_field(&self.fields, &self.model, attribute);
        }
        render_hypotenuse(&self.fields, &self.model);
    }

    fn controller(&self, attribute: Attribute) -> FieldController {
        self.controllers[match attribute {
            Attribute::Base => 0,
            Attribute::Height => 1,
        }]
    }

    /// The model handle this view is bound to.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Deliver a raw focus event to the field of `attribute`.
    pub fn handle_focus(&mut self, attribute: Attribute, event: FocusEvent) {
        let controller = self.controller(attribute);
        match event {
            FocusEvent::Gained => {
                controller.focus_gained(&self.fields);
                self.focused = Some(attribute);
            }
            FocusEvent::Lost => {
                if self.focused == Some(attribute) {
                    self.focused = None;
                }
                controller.focus_lost(&self.fields, &self.model);
            }
        }
    }

    /// Move focus to `attribute`, committing the previously focused field.
    pub fn focus(&mut self, attribute: Attribute) {
        if self.focused == Some(attribute) {
            return;
        }
        if let Some(previous) = self.focused {
            self.handle_focus(previous, FocusEvent::Lost);
        }
        self.handle_focus(attribute, FocusEvent::Gained);
    }

    /// Tab traversal: base → height → base.
    pub fn focus_next(&mut self) {
        let next = match self.focused {
            Some(Attribute::Base) => Attribute::Height,
            Some(Attribute::Height) | None => Attribute::Base,
        };
        self.focus(next);
    }

    /// Drop focus, committing the focused field.
    pub fn blur(&mut self) {
        if let Some(previous) = self.focused {
            self.handle_focus(previous, FocusEvent::Lost);
        }
    }

    #[must_use]
    pub fn focused(&self) -> Option<Attribute> {
        self.focused
    }

    /// Type `text` into the focused field. Returns `false` when nothing has focus.
    pub fn type_text(&mut self, text: &str) -> bool {
        self.edit_focused(|field| field.insert_str(text))
    }

    /// Backspace in the focused field.
    pub fn backspace(&mut self) -> bool {
        self.edit_focused(TextField::backspace)
    }

    /// Empty the focused field.
    pub fn clear_field(&mut self) -> bool {
        self.edit_focused(TextField::clear)
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut TextField)) -> bool {
        let Some(attribute) = self.focused else {
            return false;
        };
        edit(self.fields.borrow_mut().field_mut(attribute));
        true
    }

    /// Replace a field's text without focus changes or commits.
    pub fn set_field_text(&mut self, attribute: Attribute, text: &str) {
        self.fields.borrow_mut().field_mut(attribute).set_text(text);
    }

    #[must_use]
    pub fn field_text(&self, attribute: Attribute) -> String {
        self.fields.borrow().field(attribute).text().to_owned()
    }

    #[must_use]
    pub fn selected_text(&self, attribute: Attribute) -> Option<String> {
        self.fields
            .borrow()
            .field(attribute)
            .selected_text()
            .map(str::to_owned)
    }

    #[must_use]
    pub fn hypotenuse_text(&self) -> String {
        self.fields.borrow().hypotenuse.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let fields = self.fields.borrow();
        ViewSnapshot {
            base: fields.base.text().to_owned(),
            height: fields.height.text().to_owned(),
            hypotenuse: fields.hypotenuse.clone(),
        }
    }

    /// Run the change handler of `attribute` as if the model had notified it.
    pub fn refresh(&self, attribute: Attribute) {
        ChangeHandler { attribute }.on_change(&self.fields, &self.model);
    }

    /// Number of model listeners this view holds.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.binding_count()
    }
}

impl<M: RightTriangle + Clone + fmt::Debug + 'static> fmt::Debug for NumericBindingView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericBindingView")
            .field("model", &self.model)
            .field("snapshot", &self.snapshot())
            .field("focused", &self.focused)
            .field("bindings", &self.bindings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtview_model::{MAX_SIDE, MIN_SIDE, TriangleModel};

    fn bound(base: f64, height: f64) -> (TriangleModel, NumericBindingView<TriangleModel>) {
        let model = TriangleModel::new(base, height);
        let view = NumericBindingView::new(&model);
        (model, view)
    }

    fn commit(view: &mut NumericBindingView<TriangleModel>, attribute: Attribute, text: &str) {
        view.focus(attribute);
        view.clear_field();
        view.type_text(text);
        view.blur();
    }

    #[test]
    fn initial_render_reads_model() {
        let (_model, view) = bound(3.0, 4.0);
        assert_eq!(
            view.snapshot(),
            ViewSnapshot {
                base: "3".into(),
                height: "4".into(),
                hypotenuse: "5".into(),
            }
        );
        assert_eq!(view.binding_count(), 2);
    }

    #[test]
    fn focus_gained_selects_all() {
        let (_model, mut view) = bound(12.5, 4.0);
        view.focus(Attribute::Base);
        assert_eq!(view.selected_text(Attribute::Base), Some("12.5".into()));
        assert_eq!(view.focused(), Some(Attribute::Base));
    }

    #[test]
    fn typing_replaces_selection_and_tab_commits() {
        let (model, mut view) = bound(3.0, 4.0);
        view.focus(Attribute::Base);
        view.type_text("6");
        assert_eq!(model.base(), 3.0, "no commit before focus loss");

        view.focus_next();
        assert_eq!(model.base(), 6.0);
        assert_eq!(view.field_text(Attribute::Base), "6");
        assert_eq!(view.hypotenuse_text(), "7.21");
        assert_eq!(view.focused(), Some(Attribute::Height));
    }

    #[test]
    fn cleared_field_falls_back_to_midpoint() {
        let (model, mut view) = bound(6.0, 4.0);
        commit(&mut view, Attribute::Height, "");
        assert_eq!(model.height(), MAX_SIDE / 2.0);
        assert_eq!(view.field_text(Attribute::Height), "50");
        assert_eq!(view.hypotenuse_text(), format_side(6.0_f64.hypot(50.0)));
    }

    #[test]
    fn malformed_text_falls_back_to_midpoint() {
        for text in ["abc", "12.3x", "   ", "NaN"] {
            let (model, mut view) = bound(3.0, 4.0);
            commit(&mut view, Attribute::Base, text);
            assert_eq!(model.base(), MAX_SIDE / 2.0, "input {text:?}");
            assert_eq!(view.field_text(Attribute::Base), "50");
        }
    }

    #[test]
    fn out_of_range_text_shows_clamped_value() {
        let (model, mut view) = bound(3.0, 4.0);
        commit(&mut view, Attribute::Base, "-7");
        assert_eq!(model.base(), MIN_SIDE);
        assert_eq!(view.field_text(Attribute::Base), ".01");

        commit(&mut view, Attribute::Height, "250");
        assert_eq!(view.field_text(Attribute::Height), "100");
    }

    #[test]
    fn unchanged_commit_normalizes_field_text() {
        let (model, mut view) = bound(50.0, 4.0);
        let before = model.version(Attribute::Base);
        commit(&mut view, Attribute::Base, "oops");
        assert_eq!(model.version(Attribute::Base), before, "no change, no notification");
        assert_eq!(view.field_text(Attribute::Base), "50");

        commit(&mut view, Attribute::Base, " 50.0 ");
        assert_eq!(view.field_text(Attribute::Base), "50");
    }

    #[test]
    fn external_mutation_rerenders() {
        let (model, view) = bound(3.0, 4.0);
        let other_handle = model.clone();
        other_handle.set_height(8.0);
        assert_eq!(view.field_text(Attribute::Height), "8");
        assert_eq!(view.hypotenuse_text(), "8.54");
    }

    #[test]
    fn two_views_stay_in_sync() {
        let model = TriangleModel::new(3.0, 4.0);
        let mut left = NumericBindingView::new(&model);
        let right = NumericBindingView::new(&model);

        commit(&mut left, Attribute::Base, "9");
        assert_eq!(right.snapshot(), left.snapshot());
        assert_eq!(right.field_text(Attribute::Base), "9");
    }

    #[test]
    fn refresh_is_idempotent() {
        let (_model, view) = bound(7.0, 2.5);
        view.refresh(Attribute::Base);
        let first = view.snapshot();
        view.refresh(Attribute::Base);
        assert_eq!(view.snapshot(), first);
    }

    #[test]
    fn blur_without_focus_is_noop() {
        let (model, mut view) = bound(3.0, 4.0);
        view.blur();
        assert_eq!(model.version(Attribute::Base), 0);
        assert!(!view.type_text("1"));
    }

    #[test]
    fn refocusing_same_field_does_not_commit() {
        let (model, mut view) = bound(3.0, 4.0);
        view.focus(Attribute::Base);
        view.type_text("9");
        view.focus(Attribute::Base);
        assert_eq!(model.base(), 3.0);
    }

    #[test]
    fn dropping_view_releases_listeners() {
        let model = TriangleModel::new(3.0, 4.0);
        {
            let _view = NumericBindingView::new(&model);
        }
        // Listener callbacks are gone; mutation must not touch freed fields.
        assert!(model.set_base(10.0));
        assert_eq!(model.base(), 10.0);
    }

    #[test]
    fn snapshot_display() {
        let (_model, view) = bound(3.0, 4.0);
        assert_eq!(view.snapshot().to_string(), "Base: 3  Height: 4  Hypotenuse: 5");
    }
}
