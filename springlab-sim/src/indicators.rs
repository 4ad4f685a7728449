/// Which forces the vector overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcesMode {
    /// Gravity and spring force drawn separately.
    #[default]
    Forces,
    /// Only their sum.
    NetForces,
}

/// Visibility of the optional measuring tools and overlays.
///
/// These have no effect on the physics; the model only stores them so a
/// reset can restore them together with everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indicators {
    pub ruler: bool,
    pub movable_line: bool,
    pub equilibrium_position: bool,
    /// Also toggles the displacement arrow.
    pub natural_length: bool,
    pub velocity_vector: bool,
    pub acceleration_vector: bool,
    pub gravity_vector: bool,
    pub spring_vector: bool,
    pub forces_mode: ForcesMode,
}
