use thiserror::Error;

/// A closed `[min, max]` interval with a default value inside it.
///
/// Slider-driven settings are clamped into their range rather than rejected,
/// since an interaction can transiently push a value past either end.
///
/// # Example
///
/// ```
/// use springlab_core::BoundedRange;
///
/// let gravity = BoundedRange::new(0.0, 30.0, 9.8).unwrap();
/// assert_eq!(gravity.clamp(42.0), 30.0);
/// assert_eq!(gravity.default_value(), 9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedRange {
    min: f64,
    max: f64,
    default: f64,
}

/// Errors that can occur when building a [`BoundedRange`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    #[error("range bounds must be finite with min <= max, got [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },

    #[error("default {default} lies outside [{min}, {max}]")]
    DefaultOutOfRange { min: f64, max: f64, default: f64 },
}

impl BoundedRange {
    /// Creates a range, checking that `min <= default <= max`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidBounds`] for non-finite or inverted bounds
    /// and [`RangeError::DefaultOutOfRange`] if the default is outside them.
    pub fn new(min: f64, max: f64, default: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(RangeError::InvalidBounds { min, max });
        }
        if !(min..=max).contains(&default) {
            return Err(RangeError::DefaultOutOfRange { min, max, default });
        }
        Ok(Self { min, max, default })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn default_value(&self) -> f64 {
        self.default
    }

    /// Returns `true` if `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into the range.
    ///
    /// `NaN` maps to the default value.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}
