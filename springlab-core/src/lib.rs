//! Shared building blocks for the springlab crates.
//!
//! - [`constraint`]: construction-time numeric invariants
//! - [`units`]: `uom` aliases for stiffness and damping coefficients
//! - [`Observer`]: consumes events in order and may answer with an action
//! - [`StepIntegrable`]: a state that can be advanced by its derivative
//! - [`LinearInterp`]: piecewise-linear interpolation backed by `ninterp`
//! - [`BoundedRange`]: a closed range with a default value and clamping

pub mod constraint;
mod interpolation;
mod observer;
mod range;
mod step;
pub mod units;

pub use interpolation::{Extrapolate, InterpError, LinearInterp};
pub use observer::Observer;
pub use range::{BoundedRange, RangeError};
pub use step::StepIntegrable;
