use springlab_core::constraint::{Constrained, StrictlyPositive};
use thiserror::Error;

use crate::settings::{damping_range, gravity_range};

/// Configuration for a [`crate::Lab`].
///
/// With the `serde` feature enabled the config can be deserialized, and the
/// same validation as [`SimConfig::new`] runs on the loaded values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawConfig", into = "RawConfig")
)]
pub struct SimConfig {
    max_frame_dt: Constrained<f64, StrictlyPositive>,
    max_substep: Constrained<f64, StrictlyPositive>,
    slow_motion_ratio: f64,
    gravity: f64,
    damping: f64,
}

/// Errors that can occur when validating a [`SimConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("max_frame_dt must be finite and positive, got {0}")]
    MaxFrameDt(f64),

    #[error("max_substep must be finite, positive, and no larger than max_frame_dt, got {0}")]
    MaxSubstep(f64),

    #[error("slow_motion_ratio must be finite and at least 1, got {0}")]
    SlowMotionRatio(f64),

    #[error("gravity {0} m/s² is outside the allowed range")]
    Gravity(f64),

    #[error("damping {0} N·s/m is outside the allowed range")]
    Damping(f64),
}

impl Default for SimConfig {
    fn default() -> Self {
        // Known-good values
        Self::new(0.3, 1.0 / 120.0, 8.0, 9.8, 0.0).expect("default config is valid")
    }
}

impl SimConfig {
    /// Creates a validated config.
    ///
    /// - `max_frame_dt`: longest frame accepted by `advance`; longer frames
    ///   are clamped (s)
    /// - `max_substep`: longest single integration step (s)
    /// - `slow_motion_ratio`: physics time divisor in slow motion
    /// - `gravity`, `damping`: initial environment (m/s², N·s/m)
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn new(
        max_frame_dt: f64,
        max_substep: f64,
        slow_motion_ratio: f64,
        gravity: f64,
        damping: f64,
    ) -> Result<Self, ConfigError> {
        let max_frame_dt = StrictlyPositive::new(max_frame_dt)
            .ok()
            .filter(|dt| dt.into_inner().is_finite())
            .ok_or(ConfigError::MaxFrameDt(max_frame_dt))?;
        let max_substep = StrictlyPositive::new(max_substep)
            .ok()
            .filter(|dt| dt.into_inner().is_finite() && dt.into_inner() <= max_frame_dt.into_inner())
            .ok_or(ConfigError::MaxSubstep(max_substep))?;
        if !slow_motion_ratio.is_finite() || slow_motion_ratio < 1.0 {
            return Err(ConfigError::SlowMotionRatio(slow_motion_ratio));
        }
        if !gravity_range().contains(gravity) {
            return Err(ConfigError::Gravity(gravity));
        }
        if !damping_range().contains(damping) {
            return Err(ConfigError::Damping(damping));
        }

        Ok(Self {
            max_frame_dt,
            max_substep,
            slow_motion_ratio,
            gravity,
            damping,
        })
    }

    /// Returns the longest frame accepted by `advance` (s).
    #[must_use]
    pub fn max_frame_dt(&self) -> f64 {
        self.max_frame_dt.into_inner()
    }

    /// Returns the longest single integration step (s).
    #[must_use]
    pub fn max_substep(&self) -> f64 {
        self.max_substep.into_inner()
    }

    /// Returns how many times slower physics runs in slow motion.
    #[must_use]
    pub fn slow_motion_ratio(&self) -> f64 {
        self.slow_motion_ratio
    }

    /// Returns the initial gravity (m/s²).
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the initial damping coefficient (N·s/m).
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

/// Unvalidated serialized form of [`SimConfig`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    max_frame_dt: f64,
    max_substep: f64,
    slow_motion_ratio: f64,
    gravity: f64,
    damping: f64,
}

#[cfg(feature = "serde")]
impl Default for RawConfig {
    fn default() -> Self {
        SimConfig::default().into()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for SimConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.max_frame_dt,
            raw.max_substep,
            raw.slow_motion_ratio,
            raw.gravity,
            raw.damping,
        )
    }
}

#[cfg(feature = "serde")]
impl From<SimConfig> for RawConfig {
    fn from(config: SimConfig) -> Self {
        Self {
            max_frame_dt: config.max_frame_dt(),
            max_substep: config.max_substep(),
            slow_motion_ratio: config.slow_motion_ratio,
            gravity: config.gravity,
            damping: config.damping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.max_frame_dt(), 0.3);
        assert_eq!(config.slow_motion_ratio(), 8.0);
        assert_eq!(config.damping(), 0.0);
    }

    #[test]
    fn rejects_bad_timing() {
        assert_eq!(
            SimConfig::new(0.0, 0.01, 8.0, 9.8, 0.0),
            Err(ConfigError::MaxFrameDt(0.0))
        );
        assert_eq!(
            SimConfig::new(0.3, 0.5, 8.0, 9.8, 0.0),
            Err(ConfigError::MaxSubstep(0.5))
        );
        assert!(matches!(
            SimConfig::new(0.3, f64::NAN, 8.0, 9.8, 0.0),
            Err(ConfigError::MaxSubstep(_))
        ));
        assert_eq!(
            SimConfig::new(f64::INFINITY, 0.01, 8.0, 9.8, 0.0),
            Err(ConfigError::MaxFrameDt(f64::INFINITY))
        );
        assert_eq!(
            SimConfig::new(0.3, -0.01, 8.0, 9.8, 0.0),
            Err(ConfigError::MaxSubstep(-0.01))
        );
        assert_eq!(
            SimConfig::new(0.3, 0.01, 0.5, 9.8, 0.0),
            Err(ConfigError::SlowMotionRatio(0.5))
        );
    }

    #[test]
    fn rejects_environment_outside_ranges() {
        assert_eq!(
            SimConfig::new(0.3, 0.01, 8.0, 31.0, 0.0),
            Err(ConfigError::Gravity(31.0))
        );
        assert_eq!(
            SimConfig::new(0.3, 0.01, 8.0, 9.8, 0.8),
            Err(ConfigError::Damping(0.8))
        );
    }
}
