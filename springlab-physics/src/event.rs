use crate::SpringId;

/// Vertical direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Something that happened to an oscillating spring during a step.
///
/// The integrator produces these in the order they occur, and consumers must
/// process them in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OscillationEvent {
    /// Displacement relative to equilibrium changed sign.
    Crossed { spring: SpringId },

    /// Velocity changed sign, i.e. the mass reached a local extremum.
    ///
    /// `direction` is the direction of travel after the peak and
    /// `displacement` is measured from equilibrium (positive below it).
    Peaked {
        spring: SpringId,
        direction: Direction,
        displacement: f64,
    },

    /// A mass was hung on, dropped onto, or removed from the spring.
    Dropped { spring: SpringId },
}

impl OscillationEvent {
    /// The spring this event belongs to.
    #[must_use]
    pub fn spring(&self) -> SpringId {
        match *self {
            Self::Crossed { spring } | Self::Peaked { spring, .. } | Self::Dropped { spring } => {
                spring
            }
        }
    }
}
