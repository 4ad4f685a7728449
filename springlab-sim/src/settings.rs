//! Environment shared by every spring: gravity, damping, and the body.

use springlab_core::BoundedRange;
use springlab_physics::{
    Environment,
    constants::{DEFAULT_SPRING_CONSTANT, MAX_SPRING_CONSTANT, MIN_SPRING_CONSTANT},
};

use crate::Body;

/// Allowed gravity (m/s²).
#[must_use]
pub fn gravity_range() -> BoundedRange {
    BoundedRange::new(0.0, 30.0, 9.8).expect("gravity bounds are ordered")
}

/// Allowed damping coefficient (N·s/m).
#[must_use]
pub fn damping_range() -> BoundedRange {
    BoundedRange::new(0.0, 0.7, 0.3).expect("damping bounds are ordered")
}

/// Allowed spring constant (N/m).
#[must_use]
pub fn spring_constant_range() -> BoundedRange {
    BoundedRange::new(MIN_SPRING_CONSTANT, MAX_SPRING_CONSTANT, DEFAULT_SPRING_CONSTANT)
        .expect("spring constant bounds are ordered")
}

/// Gravity, damping, and the selected body.
///
/// Every effective change bumps [`Settings::epoch`], so readers can tell
/// whether anything derived from the environment needs recomputing. Setting
/// a value to what it already is leaves the epoch alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    gravity: f64,
    damping: f64,
    body: Body,
    custom_gravity: f64,
    epoch: u64,
    initial_gravity: f64,
    initial_damping: f64,
}

impl Settings {
    /// Creates settings with the given environment, clamped into range.
    ///
    /// The body is the preset whose gravity matches, or [`Body::Custom`].
    #[must_use]
    pub fn new(gravity: f64, damping: f64) -> Self {
        let gravity = gravity_range().clamp(gravity);
        let damping = damping_range().clamp(damping);
        let body = Body::PRESETS
            .into_iter()
            .find(|b| b.gravity() == Some(gravity))
            .unwrap_or(Body::Custom);
        Self {
            gravity,
            damping,
            body,
            custom_gravity: gravity,
            epoch: 0,
            initial_gravity: gravity,
            initial_damping: damping,
        }
    }

    /// Gravity in m/s².
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Damping coefficient in N·s/m.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[must_use]
    pub fn body(&self) -> Body {
        self.body
    }

    /// Counter bumped on every effective change.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Snapshot handed to the integrator.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment {
            gravity: self.gravity,
            damping: self.damping,
        }
    }

    /// Sets gravity from a slider or typed value.
    ///
    /// A gravity that differs from the current body's switches the body to
    /// [`Body::Custom`]. Returns whether anything changed.
    pub fn set_gravity(&mut self, gravity: f64) -> bool {
        if !gravity.is_finite() {
            log::warn!("ignoring non-finite gravity {gravity}");
            return false;
        }
        let clamped = clamp_logged("gravity", gravity_range(), gravity);

        let mut changed = self.write_gravity(clamped);
        if self.body.gravity() != Some(clamped) && self.body != Body::Custom {
            log::debug!("gravity {clamped} does not match {}, switching to Custom", self.body);
            self.body = Body::Custom;
            self.epoch += 1;
            changed = true;
        }
        if self.body == Body::Custom {
            self.custom_gravity = clamped;
        }
        changed
    }

    /// Sets the damping coefficient. Returns whether it changed.
    pub fn set_damping(&mut self, damping: f64) -> bool {
        if !damping.is_finite() {
            log::warn!("ignoring non-finite damping {damping}");
            return false;
        }
        let clamped = clamp_logged("damping", damping_range(), damping);
        if clamped == self.damping {
            return false;
        }
        self.damping = clamped;
        self.epoch += 1;
        true
    }

    /// Selects a body.
    ///
    /// Presets apply their gravity. Choosing [`Body::Custom`] keeps the
    /// current gravity, except when coming from [`Body::PlanetX`]: then the
    /// last custom gravity is restored.
    pub fn set_body(&mut self, body: Body) -> bool {
        if body == self.body {
            return false;
        }
        let previous = self.body;
        self.body = body;
        self.epoch += 1;

        match body.gravity() {
            Some(g) => {
                self.write_gravity(g);
            }
            None if previous.is_mystery() => {
                self.write_gravity(self.custom_gravity);
            }
            None => self.custom_gravity = self.gravity,
        }
        true
    }

    /// Restores the environment the settings were created with.
    pub fn reset(&mut self) {
        let epoch = self.epoch;
        *self = Self::new(self.initial_gravity, self.initial_damping);
        self.epoch = epoch + 1;
    }

    fn write_gravity(&mut self, gravity: f64) -> bool {
        if gravity == self.gravity {
            return false;
        }
        self.gravity = gravity;
        self.epoch += 1;
        true
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(gravity_range().default_value(), 0.0)
    }
}

/// Clamps `value` into `range`, noting at debug level when it had to.
pub(crate) fn clamp_logged(name: &str, range: BoundedRange, value: f64) -> f64 {
    let clamped = range.clamp(value);
    if clamped != value {
        log::debug!("{name} {value} clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_earth() {
        let s = Settings::default();
        assert_eq!(s.body(), Body::Earth);
        assert_eq!(s.gravity(), 9.8);
        assert_eq!(s.damping(), 0.0);
        assert_eq!(s.epoch(), 0);
    }

    #[test]
    fn identical_assignments_keep_the_epoch() {
        let mut s = Settings::default();
        assert!(!s.set_gravity(9.8));
        assert!(!s.set_damping(0.0));
        assert!(!s.set_body(Body::Earth));
        assert_eq!(s.epoch(), 0);
        assert_eq!(s.body(), Body::Earth);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut s = Settings::default();
        s.set_gravity(100.0);
        assert_eq!(s.gravity(), 30.0);
        s.set_damping(-2.0);
        assert_eq!(s.damping(), 0.0);
        s.set_damping(5.0);
        assert_eq!(s.damping(), 0.7);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut s = Settings::default();
        assert!(!s.set_gravity(f64::NAN));
        assert!(!s.set_damping(f64::INFINITY));
        assert_eq!(s.gravity(), 9.8);
        assert_eq!(s.epoch(), 0);
    }

    #[test]
    fn manual_gravity_switches_to_custom() {
        let mut s = Settings::default();
        s.set_body(Body::Moon);
        assert_eq!(s.gravity(), 1.6);

        let epoch = s.epoch();
        assert!(s.set_gravity(5.0));
        assert_eq!(s.body(), Body::Custom);
        assert!(s.epoch() > epoch);
    }

    #[test]
    fn planet_x_gravity_is_not_leaked_to_custom() {
        let mut s = Settings::default();
        s.set_gravity(4.0);
        assert_eq!(s.body(), Body::Custom);

        s.set_body(Body::PlanetX);
        assert_eq!(s.gravity(), 14.2);

        s.set_body(Body::Custom);
        assert_eq!(s.gravity(), 4.0);
    }

    #[test]
    fn switching_to_custom_keeps_preset_gravity() {
        let mut s = Settings::default();
        s.set_body(Body::Jupiter);
        s.set_body(Body::Custom);
        assert_eq!(s.gravity(), 24.8);
    }

    #[test]
    fn reset_restores_initial_values_and_bumps_epoch() {
        let mut s = Settings::new(1.6, 0.2);
        assert_eq!(s.body(), Body::Moon);
        s.set_gravity(20.0);
        s.set_damping(0.5);
        let epoch = s.epoch();

        s.reset();
        assert_eq!(s.gravity(), 1.6);
        assert_eq!(s.damping(), 0.2);
        assert_eq!(s.body(), Body::Moon);
        assert!(s.epoch() > epoch);
    }
}
