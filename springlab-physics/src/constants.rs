//! Physical and geometric constants for the spring lab.
//!
//! Lengths are meters, masses kilograms, and times seconds.

/// Natural resting length of a freshly created spring.
pub const DEFAULT_SPRING_LENGTH: f64 = 0.5;

/// Allowed natural resting lengths.
pub const MIN_SPRING_LENGTH: f64 = 0.1;
pub const MAX_SPRING_LENGTH: f64 = 0.5;

/// Spring constant of a freshly created spring (N/m).
pub const DEFAULT_SPRING_CONSTANT: f64 = 6.0;

/// Coil thickness of a freshly created spring (view units).
pub const DEFAULT_THICKNESS: f64 = 3.0;

/// Y of the ceiling that springs hang from.
pub const CEILING_Y: f64 = 1.47;

/// Y of the floor.
pub const FLOOR_Y: f64 = 0.0;

/// Shelf height above the floor. Falling masses come to rest on the shelf.
pub const SHELF_HEIGHT: f64 = 0.02;

/// Horizontal and vertical reach within which a free mass hooks onto a spring.
pub const GRAB_DISTANCE: f64 = 0.1;

/// Horizontal distance beyond which a dragged mass is pulled off its spring.
pub const RELEASE_DISTANCE: f64 = 0.12;

/// Lightest allowed mass; smaller values are raised to this.
pub const MIN_MASS: f64 = 0.001;

/// Allowed spring constants (N/m). A constant derived from a held thickness
/// is clamped to the same range.
pub const MIN_SPRING_CONSTANT: f64 = 3.0;
pub const MAX_SPRING_CONSTANT: f64 = 12.0;

/// Equilibrium shifts smaller than this do not reset a period trace.
pub const EQUILIBRIUM_EPSILON: f64 = 1e-9;

/// Horizontal shift of the period trace on every change of direction.
pub const TRACE_X_OFFSET_STEP: f64 = 20.0;

/// Animation seconds for a completed trace to fade out.
pub const TRACE_FADE_SECONDS: f64 = 2.0;

/// Angular frequency (rad/s) of an empty spring returning to rest.
pub const SETTLE_ANGULAR_FREQUENCY: f64 = 12.0;
