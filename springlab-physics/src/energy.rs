use crate::{MassState, SpringState};

/// Energy of one spring/mass pair, in joules.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Energy {
    pub kinetic: f64,
    /// Gravitational potential measured from the floor.
    pub gravitational: f64,
    pub elastic: f64,
    /// Work done by damping since the mass was hung on the spring.
    pub thermal: f64,
}

impl Energy {
    /// Energy of `mass` hanging on `spring`.
    #[must_use]
    pub fn of_pair(
        spring: &SpringState,
        mass: &MassState,
        gravity: f64,
        floor_y: f64,
        thermal: f64,
    ) -> Self {
        let x = spring.displacement();
        Self {
            kinetic: mass.kinetic_energy(),
            gravitational: mass.mass() * gravity * (mass.position().y - floor_y),
            elastic: 0.5 * spring.spring_constant() * x * x,
            thermal,
        }
    }

    /// Mechanical plus thermal energy.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.kinetic + self.gravitational + self.elastic + self.thermal
    }
}
