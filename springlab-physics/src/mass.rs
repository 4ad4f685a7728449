use glam::DVec2;

use crate::constants::MIN_MASS;

/// Cosmetic options for a mass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MassOptions {
    /// Hide the mass value behind a "?" label.
    pub mystery: bool,
}

/// Kinematic state of one mass.
///
/// `velocity` is signed along Y (up is positive), so a falling mass has a
/// negative velocity. While the mass hangs on a spring its position is driven
/// by the [`crate::OscillationIntegrator`]; [`MassState::step`] only handles
/// free fall.
#[derive(Debug, Clone, PartialEq)]
pub struct MassState {
    mass: f64,
    position: DVec2,
    velocity: f64,
    user_controlled: bool,
    attached: bool,
    animation_time: f64,
    color: String,
    label: Option<String>,
    options: MassOptions,
    initial_position: DVec2,
}

impl MassState {
    /// Creates a mass resting at `position`.
    ///
    /// Masses below [`MIN_MASS`] (or non-finite) are raised to it.
    #[must_use]
    pub fn new(
        mass: f64,
        position: DVec2,
        color: impl Into<String>,
        label: Option<String>,
        options: MassOptions,
    ) -> Self {
        let mass = if mass.is_finite() && mass >= MIN_MASS {
            mass
        } else {
            log::warn!("mass {mass} kg is not usable, raising to {MIN_MASS} kg");
            MIN_MASS
        };
        Self {
            mass,
            position,
            velocity: 0.0,
            user_controlled: false,
            attached: false,
            animation_time: 0.0,
            color: color.into(),
            label,
            options,
            initial_position: position,
        }
    }

    /// Mass in kilograms.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn is_user_controlled(&self) -> bool {
        self.user_controlled
    }

    /// Whether the mass currently hangs on a spring.
    ///
    /// Mirrors [`crate::Attachments`], which is the only writer.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Unscaled time accumulated for cosmetic effects.
    #[must_use]
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Label shown on the mass; `None` for mystery masses.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        if self.options.mystery {
            return None;
        }
        self.label.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &MassOptions {
        &self.options
    }

    /// Kinetic energy in joules.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }

    /// Advances free fall by `dt`.
    ///
    /// Does nothing while the mass is dragged or hangs on a spring. A mass
    /// above `floor_y` accelerates downward; on reaching the floor it stops.
    pub fn step(&mut self, gravity: f64, floor_y: f64, dt: f64, animation_dt: f64) {
        if self.user_controlled || self.attached {
            return;
        }
        self.animation_time += animation_dt;

        if self.position.y > floor_y {
            self.velocity -= gravity * dt;
            self.position.y += self.velocity * dt;
        }
        if self.position.y <= floor_y {
            self.position.y = floor_y;
            self.velocity = 0.0;
        }
    }

    pub fn begin_drag(&mut self) {
        self.user_controlled = true;
        self.velocity = 0.0;
    }

    /// Moves a dragged mass; ignored unless the mass is user controlled.
    pub fn drag_to(&mut self, position: DVec2) {
        if !self.user_controlled {
            log::warn!("drag_to called on a mass that is not being dragged");
            return;
        }
        if !position.is_finite() {
            log::warn!("ignoring non-finite drag position {position}");
            return;
        }
        self.position = position;
    }

    pub fn end_drag(&mut self) {
        self.user_controlled = false;
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
    }

    /// Marks the mass as free. Velocity is kept so the motion stays continuous.
    pub(crate) fn detach(&mut self) {
        self.attached = false;
    }

    pub(crate) fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Returns the mass to where it was created, at rest and free.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = 0.0;
        self.user_controlled = false;
        self.attached = false;
        self.animation_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn mass_at(y: f64) -> MassState {
        MassState::new(0.25, DVec2::new(1.0, y), "gray", Some("250 g".into()), MassOptions::default())
    }

    #[test]
    fn falls_and_rests_on_floor() {
        let mut m = mass_at(1.0);
        m.step(9.8, 0.02, 0.1, 0.1);
        assert!(m.velocity() < 0.0);
        assert!(m.position().y < 1.0);

        for _ in 0..100 {
            m.step(9.8, 0.02, 0.1, 0.1);
        }
        assert_relative_eq!(m.position().y, 0.02);
        assert_relative_eq!(m.velocity(), 0.0);
    }

    #[test]
    fn free_fall_matches_semi_implicit_update() {
        let mut m = mass_at(1.0);
        m.step(10.0, 0.0, 0.01, 0.01);
        assert_relative_eq!(m.velocity(), -0.1);
        assert_relative_eq!(m.position().y, 1.0 - 0.001);
    }

    #[test]
    fn dragged_mass_does_not_fall() {
        let mut m = mass_at(1.0);
        m.begin_drag();
        m.step(9.8, 0.0, 0.1, 0.1);
        assert_relative_eq!(m.position().y, 1.0);
        assert_relative_eq!(m.animation_time(), 0.0);

        m.drag_to(DVec2::new(0.5, 0.6));
        assert_eq!(m.position(), DVec2::new(0.5, 0.6));
    }

    #[test]
    fn drag_requires_begin() {
        let mut m = mass_at(1.0);
        m.drag_to(DVec2::new(0.5, 0.6));
        assert_eq!(m.position(), DVec2::new(1.0, 1.0));
    }

    #[test]
    fn detach_keeps_velocity() {
        let mut m = mass_at(1.0);
        m.attach();
        m.set_velocity(-0.7);
        m.detach();
        assert!(!m.is_attached());
        assert_relative_eq!(m.velocity(), -0.7);
    }

    #[test]
    fn degenerate_mass_is_raised() {
        let m = MassState::new(0.0, DVec2::ZERO, "red", None, MassOptions::default());
        assert_relative_eq!(m.mass(), MIN_MASS);
        let m = MassState::new(f64::NAN, DVec2::ZERO, "red", None, MassOptions::default());
        assert_relative_eq!(m.mass(), MIN_MASS);
    }

    #[test]
    fn mystery_masses_hide_their_label() {
        let m = MassState::new(
            0.2,
            DVec2::ZERO,
            "purple",
            Some("200 g".into()),
            MassOptions { mystery: true },
        );
        assert_eq!(m.label(), None);
        assert_eq!(mass_at(0.0).label(), Some("250 g"));
    }

    #[test]
    fn reset_restores_creation_state() {
        let mut m = mass_at(0.5);
        m.begin_drag();
        m.drag_to(DVec2::new(2.0, 1.0));
        m.reset();
        assert_eq!(m.position(), DVec2::new(1.0, 0.5));
        assert!(!m.is_user_controlled());
    }
}
