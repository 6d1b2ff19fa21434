//! Instrumented model for asserting on binding traffic.

use std::cell::RefCell;
use std::rc::Rc;

use rtview_model::{Attribute, RightTriangle, TriangleModel};
use rtview_runtime::Subscription;

/// One observed interaction with the model.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelEvent {
    /// A mutator call with the value it was given.
    Set { attribute: Attribute, value: f64 },
    /// A change notification delivered to a listener.
    Notified(Attribute),
}

/// A [`TriangleModel`] handle that logs every mutator call and every
/// notification it delivers.
///
/// Clones share both the triangle and the log.
#[derive(Clone, Debug, Default)]
pub struct RecordingModel {
    inner: TriangleModel,
    log: Rc<RefCell<Vec<ModelEvent>>>,
}

impl RecordingModel {
    #[must_use]
    pub fn new(inner: TriangleModel) -> Self {
        Self {
            inner,
            log: Rc::default(),
        }
    }

    /// The wrapped model.
    #[must_use]
    pub fn inner(&self) -> &TriangleModel {
        &self.inner
    }

    #[must_use]
    pub fn events(&self) -> Vec<ModelEvent> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    /// Number of mutator calls recorded for `attribute`.
    #[must_use]
    pub fn set_calls(&self, attribute: Attribute) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| matches!(event, ModelEvent::Set { attribute: a, .. } if *a == attribute))
            .count()
    }

    /// Number of notifications delivered for `attribute`.
    #[must_use]
    pub fn notifications(&self, attribute: Attribute) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| **event == ModelEvent::Notified(attribute))
            .count()
    }

    fn record(&self, event: ModelEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl RightTriangle for RecordingModel {
    fn base(&self) -> f64 {
        self.inner.base()
    }

    fn height(&self) -> f64 {
        self.inner.height()
    }

    fn hypotenuse(&self) -> f64 {
        self.inner.hypotenuse()
    }

    fn set_base(&self, value: f64) -> bool {
        self.record(ModelEvent::Set {
            attribute: Attribute::Base,
            value,
        });
        self.inner.set_base(value)
    }

    fn set_height(&self, value: f64) -> bool {
        self.record(ModelEvent::Set {
            attribute: Attribute::Height,
            value,
        });
        self.inner.set_height(value)
    }

    fn add_change_listener(
        &self,
        attribute: Attribute,
        listener: impl Fn(Attribute) + 'static,
    ) -> Subscription {
        let log = Rc::clone(&self.log);
        self.inner.add_change_listener(attribute, move |changed| {
            log.borrow_mut().push(ModelEvent::Notified(changed));
            listener(changed);
        })
    }

    fn max_side(&self) -> f64 {
        self.inner.max_side()
    }
}
