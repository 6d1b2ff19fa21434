#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rtview_model::{Attribute, RightTriangle, TriangleModel};
use rtview_widgets::{NumericBindingView, format_side};

#[derive(Debug, Arbitrary)]
struct Commit {
    height: bool,
    text: String,
}

// Whatever is typed, every field must end up showing the model.
fuzz_target!(|commits: Vec<Commit>| {
    let model = TriangleModel::default();
    let mut view = NumericBindingView::new(&model);
    let bounds = model.bounds();

    for commit in commits.iter().take(64) {
        let attribute = if commit.height {
            Attribute::Height
        } else {
            Attribute::Base
        };
        view.focus(attribute);
        view.type_text(&commit.text);
        view.blur();

        let value = model.value(attribute);
        assert!((bounds.min..=bounds.max).contains(&value));
        assert_eq!(view.field_text(attribute), format_side(value));
        assert_eq!(view.hypotenuse_text(), format_side(model.hypotenuse()));
    }
});
