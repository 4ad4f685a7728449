use std::fmt;

/// A planetary body that sets the gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    #[default]
    Earth,
    Moon,
    Jupiter,
    /// A planet whose gravity the user is asked to discover.
    PlanetX,
    /// Whatever gravity the user dialed in.
    Custom,
}

impl Body {
    /// Bodies with a fixed gravity, in menu order.
    pub const PRESETS: [Body; 4] = [Body::Earth, Body::Moon, Body::Jupiter, Body::PlanetX];

    /// Surface gravity in m/s², or `None` for [`Body::Custom`].
    #[must_use]
    pub fn gravity(self) -> Option<f64> {
        match self {
            Body::Earth => Some(9.8),
            Body::Moon => Some(1.6),
            Body::Jupiter => Some(24.8),
            Body::PlanetX => Some(14.2),
            Body::Custom => None,
        }
    }

    /// Whether the gravity of this body is hidden from the user.
    #[must_use]
    pub fn is_mystery(self) -> bool {
        self == Body::PlanetX
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Jupiter => "Jupiter",
            Body::PlanetX => "Planet X",
            Body::Custom => "Custom",
        };
        f.write_str(name)
    }
}
