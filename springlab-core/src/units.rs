//! Quantity aliases that `uom` does not ship.
//!
//! `uom` has no named quantities for a spring constant or a viscous damping
//! coefficient, so they are spelled out here from their base dimensions.

use uom::{
    si::{
        Quantity, SI,
        f64::{Force, Length, Velocity},
        force::newton,
        length::meter,
        velocity::meter_per_second,
        ISQ,
    },
    typenum::{N1, N2, P1, Z0},
};

/// Stiffness: force per unit length (N/m or kg/s²).
pub type Stiffness = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Viscous damping coefficient: force per unit velocity (N·s/m or kg/s).
pub type DampingCoefficient = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a stiffness from a value in N/m.
#[must_use]
pub fn stiffness_si(value: f64) -> Stiffness {
    Force::new::<newton>(value) / Length::new::<meter>(1.0)
}

/// Creates a damping coefficient from a value in N·s/m.
#[must_use]
pub fn damping_si(value: f64) -> DampingCoefficient {
    Force::new::<newton>(value) / Velocity::new::<meter_per_second>(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn stiffness_over_mass_is_angular_frequency_squared() {
        let k = stiffness_si(6.0);
        let m = Mass::new::<kilogram>(0.25);
        let omega_squared = (k / m).value;
        assert_relative_eq!(omega_squared, 24.0);
    }

    #[test]
    fn damping_keeps_si_value() {
        assert_relative_eq!(damping_si(0.7).value, 0.7);
    }
}
