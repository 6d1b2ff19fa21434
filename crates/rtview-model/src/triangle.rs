#![forbid(unsafe_code)]

//! The right-triangle model and the contract views bind against.
//!
//! # Invariants
//!
//! 1. `bounds.min <= base, height <= bounds.max` at all times, with
//!    `bounds.min > 0`.
//! 2. `hypotenuse() == base().hypot(height())`; it is derived on every read and
//!    cannot be set.
//! 3. A mutator notifies the listeners of its own attribute exactly once when
//!    the stored (clamped) value changes, and not at all otherwise.
//! 4. Notifications are dispatched before the mutator returns.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | Below `min` or above `max` (incl. infinities) | Clamped |
//! | `NaN` | Ignored, returns `false` |

use rtview_runtime::{Binding, Observable, Subscription, bind_mapped2};

use crate::attribute::Attribute;
use crate::config::{ConfigError, ModelConfig};

/// Default upper bound for either side.
pub const MAX_SIDE: f64 = 100.0;

/// Default lower bound for either side (the smallest value `###.##` can show).
pub const MIN_SIDE: f64 = 0.01;

/// Contract between a numeric view and the triangle it displays.
///
/// Implementations are handles to shared state: `&self` mutators notify every
/// listener registered through any handle.
pub trait RightTriangle {
    fn base(&self) -> f64;

    fn height(&self) -> f64;

    /// `sqrt(base² + height²)`.
    fn hypotenuse(&self) -> f64;

    /// Clamp and store `value` as the base. Returns whether the stored value
    /// changed (and therefore whether base listeners were notified).
    fn set_base(&self, value: f64) -> bool;

    /// Clamp and store `value` as the height. See [`set_base`](Self::set_base).
    fn set_height(&self, value: f64) -> bool;

    /// Invoke `listener` synchronously after every change of `attribute`, for
    /// as long as the returned [`Subscription`] is alive.
    fn add_change_listener(
        &self,
        attribute: Attribute,
        listener: impl Fn(Attribute) + 'static,
    ) -> Subscription;

    /// Upper bound for either side.
    fn max_side(&self) -> f64 {
        MAX_SIDE
    }

    /// Current value of `attribute`.
    fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Base => self.base(),
            Attribute::Height => self.height(),
        }
    }

    /// Dispatch to the mutator for `attribute`.
    fn set(&self, attribute: Attribute, value: f64) -> bool {
        match attribute {
            Attribute::Base => self.set_base(value),
            Attribute::Height => self.set_height(value),
        }
    }
}

/// Inclusive range accepted for either side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideBounds {
    pub min: f64,
    pub max: f64,
}

impl SideBounds {
    /// Bounds `[min, max]`, validated.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Clamp `value` into the bounds. `NaN` has no clamped value.
    #[must_use]
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            None
        } else {
            Some(value.clamp(self.min, self.max))
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.max / 2.0
    }
}

impl Default for SideBounds {
    fn default() -> Self {
        Self {
            min: MIN_SIDE,
            max: MAX_SIDE,
        }
    }
}

/// Shared right-triangle state.
///
/// Cloning a `TriangleModel` yields another handle to the **same** triangle.
#[derive(Clone)]
pub struct TriangleModel {
    base: Observable<f64>,
    height: Observable<f64>,
    hypotenuse: Binding<f64>,
    bounds: SideBounds,
}

impl std::fmt::Debug for TriangleModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleModel")
            .field("base", &self.base.get())
            .field("height", &self.height.get())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl TriangleModel {
    /// A triangle with default bounds; initial sides are clamped.
    #[must_use]
    pub fn new(base: f64, height: f64) -> Self {
        Self::with_bounds(SideBounds::default(), base, height)
    }

    /// A triangle with explicit bounds; initial sides are clamped, and a `NaN`
    /// side starts at the bounds midpoint.
    #[must_use]
    pub fn with_bounds(bounds: SideBounds, base: f64, height: f64) -> Self {
        let initial = |v: f64| bounds.clamp(v).unwrap_or_else(|| bounds.midpoint());
        let base = Observable::new(initial(base));
        let height = Observable::new(initial(height));
        let hypotenuse = bind_mapped2(&base, &height, |b, h| b.hypot(*h));
        Self {
            base,
            height,
            hypotenuse,
            bounds,
        }
    }

    /// Build a model from a validated configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = SideBounds::new(config.min_side, config.max_side)?;
        Ok(Self::with_bounds(bounds, config.base, config.height))
    }

    #[must_use]
    pub fn bounds(&self) -> SideBounds {
        self.bounds
    }

    /// Number of stored changes applied to `attribute` so far.
    #[must_use]
    pub fn version(&self, attribute: Attribute) -> u64 {
        self.side(attribute).version()
    }

    fn side(&self, attribute: Attribute) -> &Observable<f64> {
        match attribute {
            Attribute::Base => &self.base,
            Attribute::Height => &self.height,
        }
    }

    fn store(&self, attribute: Attribute, requested: f64) -> bool {
        let Some(clamped) = self.bounds.clamp(requested) else {
            tracing::debug!(
                message = "triangle.set.ignored",
                attribute = attribute.name(),
                requested
            );
            return false;
        };
        let changed = self.side(attribute).set(clamped);
        tracing::debug!(
            message = "triangle.set",
            attribute = attribute.name(),
            requested,
            stored = clamped,
            changed
        );
        changed
    }
}

impl Default for TriangleModel {
    fn default() -> Self {
        Self::new(3.0, 4.0)
    }
}

impl RightTriangle for TriangleModel {
    fn base(&self) -> f64 {
        self.base.get()
    }

    fn height(&self) -> f64 {
        self.height.get()
    }

    fn hypotenuse(&self) -> f64 {
        self.hypotenuse.get()
    }

    fn set_base(&self, value: f64) -> bool {
        self.store(Attribute::Base, value)
    }

    fn set_height(&self, value: f64) -> bool {
        self.store(Attribute::Height, value)
    }

    fn add_change_listener(
        &self,
        attribute: Attribute,
        listener: impl Fn(Attribute) + 'static,
    ) -> Subscription {
        tracing::trace!(
            message = "triangle.listen",
            attribute = attribute.name()
        );
        self.side(attribute).subscribe(move |_| listener(attribute))
    }

    fn max_side(&self) -> f64 {
        self.bounds.max
    }
}
