//! Damped spring/mass integration.
//!
//! The extension `x` of a loaded spring (positive when stretched, so positive
//! is downward) obeys
//!
//! ```text
//! m x'' = m g - k x - b x'
//! ```
//!
//! and is advanced with a semi-implicit (symplectic) Euler step. The spring
//! and gravity forces are explicit; damping is taken at the new rate:
//!
//! ```text
//! v_{n+1} = (v_n + (g - k x_n / m) dt) / (1 + b dt / m)
//! x_{n+1} = x_n + v_{n+1} dt
//! ```
//!
//! The damping solve is stable for any `b dt / m`, so light masses at high
//! damping decay instead of diverging. With no damping the amplitude stays
//! bounded.

use springlab_core::StepIntegrable;

use crate::{Direction, MassState, OscillationEvent, SpringId, SpringState};

/// Gravity (m/s², positive magnitude) and damping coefficient (N·s/m) read
/// by the integrator for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: f64,
    pub damping: f64,
}

/// Extension and extension rate of a loaded spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorState {
    pub extension: f64,
    pub rate: f64,
}

/// What drives the extension for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forcing {
    /// Acceleration from gravity and the spring (m/s²).
    pub acceleration: f64,
    /// Damping coefficient over mass (1/s), applied at the new rate.
    pub drag: f64,
}

impl StepIntegrable<f64> for OscillatorState {
    type Derivative = Forcing;

    fn step(&self, forcing: Forcing, dt: f64) -> Self {
        let rate = (self.rate + forcing.acceleration * dt) / (1.0 + forcing.drag * dt);
        Self {
            extension: self.extension + rate * dt,
            rate,
        }
    }
}

/// Advances spring/mass pairs and reports crossings and peaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OscillationIntegrator;

impl OscillationIntegrator {
    /// Forcing on the extension for the given state.
    #[must_use]
    pub fn forcing(
        state: OscillatorState,
        spring_constant: f64,
        mass: f64,
        env: &Environment,
    ) -> Forcing {
        Forcing {
            acceleration: env.gravity - spring_constant * state.extension / mass,
            drag: env.damping / mass,
        }
    }

    /// Advances one pair by `dt`, appending events in the order they occur.
    ///
    /// Returns the energy dissipated by damping during the step. Nothing
    /// happens while the mass is dragged or when `dt` is not a positive
    /// finite number.
    pub fn step(
        &self,
        id: SpringId,
        spring: &mut SpringState,
        mass: &mut MassState,
        env: &Environment,
        dt: f64,
        events: &mut Vec<OscillationEvent>,
    ) -> f64 {
        if mass.is_user_controlled() || !(dt.is_finite() && dt > 0.0) {
            return 0.0;
        }

        let m = mass.mass();
        let k = spring.spring_constant();
        let before = OscillatorState {
            extension: spring.displacement(),
            rate: -mass.velocity(),
        };
        let after = before.step(Self::forcing(before, k, m, env), dt);

        if !(after.extension.is_finite() && after.rate.is_finite()) {
            log::warn!("{id}: integration produced a non-finite state, holding position");
            return 0.0;
        }

        let equilibrium = spring.equilibrium_displacement(env.gravity, m);
        let d0 = before.extension - equilibrium;
        let d1 = after.extension - equilibrium;

        let mut pending: Vec<(f64, OscillationEvent)> = Vec::with_capacity(2);
        if let Some(t) = sign_change(d0, d1) {
            pending.push((t, OscillationEvent::Crossed { spring: id }));
        }
        if let Some(t) = sign_change(before.rate, after.rate) {
            let direction = if after.rate > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            };
            pending.push((
                t,
                OscillationEvent::Peaked {
                    spring: id,
                    direction,
                    displacement: d0 + t * (d1 - d0),
                },
            ));
        }
        pending.sort_by(|a, b| a.0.total_cmp(&b.0));
        events.extend(pending.into_iter().map(|(_, e)| e));

        spring.set_motion(after.extension, after.rate);
        Self::place_mass(spring, mass);
        mass.set_velocity(-after.rate);

        env.damping * after.rate * after.rate * dt
    }

    /// Puts the mass at the bottom of its spring.
    pub fn place_mass(spring: &SpringState, mass: &mut MassState) {
        mass.set_position(glam::DVec2::new(spring.anchor().x, spring.bottom_y()));
    }

    /// Hangs the mass motionless at its equilibrium.
    pub fn stop(spring: &mut SpringState, mass: &mut MassState, gravity: f64) {
        let equilibrium = spring.equilibrium_displacement(gravity, mass.mass());
        spring.set_motion(equilibrium, 0.0);
        Self::place_mass(spring, mass);
        mass.set_velocity(0.0);
    }
}

/// Fraction of the step at which `a → b` changes sign, if it does.
///
/// Landing exactly on zero counts as a change; leaving zero does not, so a
/// value that touches zero reports once.
fn sign_change(a: f64, b: f64) -> Option<f64> {
    let changed = (a < 0.0 && b >= 0.0) || (a > 0.0 && b <= 0.0);
    changed.then(|| a / (a - b))
}
