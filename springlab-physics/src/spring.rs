use std::sync::LazyLock;

use glam::DVec2;
use ndarray::array;
use springlab_core::{Extrapolate, LinearInterp};

use crate::constants::{
    DEFAULT_SPRING_CONSTANT, DEFAULT_SPRING_LENGTH, DEFAULT_THICKNESS, MAX_SPRING_CONSTANT,
    MAX_SPRING_LENGTH, MIN_SPRING_CONSTANT, MIN_SPRING_LENGTH, SETTLE_ANGULAR_FREQUENCY,
};

/// Which spring property stays fixed while the other one is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldMode {
    SpringConstant,
    Thickness,
}

/// The held spring property together with its value.
///
/// The other property is derived from it and the natural resting length:
///
/// ```text
/// thickness = DEFAULT_THICKNESS * (k * L) / (DEFAULT_K * DEFAULT_L)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringHold {
    /// Spring constant (N/m) is fixed; thickness follows the length.
    SpringConstant(f64),
    /// Coil thickness is fixed; the spring constant follows the length.
    Thickness(f64),
}

impl SpringHold {
    #[must_use]
    pub fn mode(&self) -> HoldMode {
        match self {
            Self::SpringConstant(_) => HoldMode::SpringConstant,
            Self::Thickness(_) => HoldMode::Thickness,
        }
    }
}

/// Coil count drawn for a given natural resting length.
static LOOPS_FOR_LENGTH: LazyLock<LinearInterp> = LazyLock::new(|| {
    LinearInterp::new(array![0.1, 0.5], array![4.0, 10.0], Extrapolate::Clamp)
        .expect("loop grid is sorted and matches its values")
});

/// Highest Y of the spring bottom for a given `thickness * loops`.
static COIL_CLOSURE_Y: LazyLock<LinearInterp> = LazyLock::new(|| {
    LinearInterp::new(array![20.0, 60.0], array![1.353, 1.265], Extrapolate::Enable)
        .expect("closure grid is sorted and matches its values")
});

/// Scale linking `k * L` to thickness.
const THICKNESS_PER_KL: f64 =
    DEFAULT_THICKNESS / (DEFAULT_SPRING_CONSTANT * DEFAULT_SPRING_LENGTH);

/// Elastic parameters and geometry of one spring.
///
/// The spring hangs from `anchor`. Its `displacement` is the extension beyond
/// the natural resting length (positive when stretched), so the bottom of the
/// spring sits at `anchor.y - (natural_resting_length + displacement)`.
///
/// Which mass hangs on the spring is tracked by [`crate::Attachments`], not
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringState {
    anchor: DVec2,
    natural_resting_length: f64,
    hold: SpringHold,
    displacement: f64,
    extension_rate: f64,
    forces_orientation: f64,
    initial: Initial,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Initial {
    natural_resting_length: f64,
    hold: SpringHold,
    forces_orientation: f64,
}

impl SpringState {
    /// Creates a relaxed spring hanging from `anchor`.
    ///
    /// The spring constant is held at its default value.
    #[must_use]
    pub fn new(anchor: DVec2, natural_resting_length: f64) -> Self {
        let natural_resting_length = clamp_length(natural_resting_length);
        let hold = SpringHold::SpringConstant(DEFAULT_SPRING_CONSTANT);
        Self {
            anchor,
            natural_resting_length,
            hold,
            displacement: 0.0,
            extension_rate: 0.0,
            forces_orientation: 1.0,
            initial: Initial {
                natural_resting_length,
                hold,
                forces_orientation: 1.0,
            },
        }
    }

    #[must_use]
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    #[must_use]
    pub fn natural_resting_length(&self) -> f64 {
        self.natural_resting_length
    }

    /// Extension beyond the natural resting length.
    #[must_use]
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Rate of change of the extension (positive while stretching).
    #[must_use]
    pub fn extension_rate(&self) -> f64 {
        self.extension_rate
    }

    /// Current length from anchor to bottom.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.natural_resting_length + self.displacement
    }

    /// Y of the spring's bottom end.
    #[must_use]
    pub fn bottom_y(&self) -> f64 {
        self.anchor.y - self.length()
    }

    /// Y of the bottom end when the spring is relaxed.
    #[must_use]
    pub fn natural_bottom_y(&self) -> f64 {
        self.anchor.y - self.natural_resting_length
    }

    #[must_use]
    pub fn hold(&self) -> SpringHold {
        self.hold
    }

    #[must_use]
    pub fn hold_mode(&self) -> HoldMode {
        self.hold.mode()
    }

    /// Spring constant (N/m), always within
    /// [`MIN_SPRING_CONSTANT`]..=[`MAX_SPRING_CONSTANT`].
    ///
    /// While the thickness is held the constant is derived from it and the
    /// length, then clamped.
    #[must_use]
    pub fn spring_constant(&self) -> f64 {
        match self.hold {
            SpringHold::SpringConstant(k) => k,
            SpringHold::Thickness(t) => clamp_spring_constant(
                t / (THICKNESS_PER_KL * self.natural_resting_length),
            ),
        }
    }

    /// Coil thickness used by the view and by the coil-closure limit.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        match self.hold {
            SpringHold::SpringConstant(k) => THICKNESS_PER_KL * k * self.natural_resting_length,
            SpringHold::Thickness(t) => t,
        }
    }

    /// Sign used to mirror force arrows; has no effect on the dynamics.
    #[must_use]
    pub fn forces_orientation(&self) -> f64 {
        self.forces_orientation
    }

    pub fn set_forces_orientation(&mut self, orientation: f64) {
        self.forces_orientation = if orientation < 0.0 { -1.0 } else { 1.0 };
        self.initial.forces_orientation = self.forces_orientation;
    }

    /// Sets the natural resting length, clamped to the allowed range.
    ///
    /// The held property keeps its value and the other one is re-derived.
    pub fn set_natural_resting_length(&mut self, length: f64) {
        if !length.is_finite() {
            log::warn!("ignoring non-finite natural resting length {length}");
            return;
        }
        self.natural_resting_length = clamp_length(length);
    }

    /// Sets the spring constant.
    ///
    /// Returns `false` and leaves the spring unchanged while the thickness is
    /// held, since the constant is then derived.
    pub fn set_spring_constant(&mut self, k: f64) -> bool {
        match self.hold {
            SpringHold::SpringConstant(_) if k.is_finite() => {
                self.hold = SpringHold::SpringConstant(clamp_spring_constant(k));
                true
            }
            SpringHold::SpringConstant(_) => {
                log::warn!("ignoring non-finite spring constant {k}");
                false
            }
            SpringHold::Thickness(_) => {
                log::warn!("spring constant is derived while thickness is held; ignoring {k}");
                false
            }
        }
    }

    /// Sets the coil thickness.
    ///
    /// Returns `false` and leaves the spring unchanged while the spring
    /// constant is held.
    pub fn set_thickness(&mut self, thickness: f64) -> bool {
        match self.hold {
            SpringHold::Thickness(_) if thickness.is_finite() && thickness > 0.0 => {
                self.hold = SpringHold::Thickness(thickness);
                true
            }
            SpringHold::Thickness(_) => {
                log::warn!("ignoring invalid thickness {thickness}");
                false
            }
            SpringHold::SpringConstant(_) => {
                log::warn!("thickness is derived while spring constant is held; ignoring {thickness}");
                false
            }
        }
    }

    /// Switches which property is held, keeping both current values.
    pub fn set_hold_mode(&mut self, mode: HoldMode) {
        self.hold = match mode {
            HoldMode::SpringConstant => SpringHold::SpringConstant(self.spring_constant()),
            HoldMode::Thickness => SpringHold::Thickness(self.thickness()),
        };
    }

    /// Recomputes the displacement so the bottom of the spring is at `mass_y`.
    ///
    /// With `preserve_velocity == false` the extension rate is zeroed, which
    /// is what a drag overriding physics wants.
    pub fn update_displacement(&mut self, mass_y: f64, preserve_velocity: bool) {
        if !mass_y.is_finite() {
            log::warn!("ignoring non-finite mass position {mass_y}");
            return;
        }
        self.displacement = self.natural_bottom_y() - mass_y;
        if !preserve_velocity {
            self.extension_rate = 0.0;
        }
    }

    pub(crate) fn set_motion(&mut self, displacement: f64, extension_rate: f64) {
        self.displacement = displacement;
        self.extension_rate = extension_rate;
    }

    /// Extension at which `mass` (kg) hangs at rest under `gravity`.
    #[must_use]
    pub fn equilibrium_displacement(&self, gravity: f64, mass: f64) -> f64 {
        mass * gravity / self.spring_constant()
    }

    /// Y at which the net force on the hanging mass is zero.
    ///
    /// Without a mass this is the bottom of the relaxed spring.
    #[must_use]
    pub fn equilibrium_y(&self, gravity: f64, mass: Option<f64>) -> f64 {
        let extension = mass.map_or(0.0, |m| self.equilibrium_displacement(gravity, m));
        self.natural_bottom_y() - extension
    }

    /// Highest Y the spring bottom may be pushed to before the coils close.
    ///
    /// Falls back to the anchor height if the closure grid cannot be read.
    #[must_use]
    pub fn max_coil_closure_y(&self) -> f64 {
        let closure = LOOPS_FOR_LENGTH
            .interpolate(self.natural_resting_length)
            .and_then(|loops| COIL_CLOSURE_Y.interpolate(self.thickness() * loops));
        match closure {
            Ok(y) => y,
            Err(e) => {
                log::error!("coil closure lookup failed: {e}");
                self.anchor.y
            }
        }
    }

    /// Starts relaxing toward the natural length after the mass is removed.
    pub fn release(&mut self, extension_rate: f64) {
        self.extension_rate = if extension_rate.is_finite() {
            extension_rate
        } else {
            0.0
        };
    }

    /// Advances an empty spring toward its natural length.
    ///
    /// Uses a critically damped return so a released spring never rings.
    pub fn settle(&mut self, dt: f64) {
        if self.is_settled() {
            self.displacement = 0.0;
            self.extension_rate = 0.0;
            return;
        }
        let omega = SETTLE_ANGULAR_FREQUENCY;
        let acceleration = -omega * omega * self.displacement - 2.0 * omega * self.extension_rate;
        self.extension_rate += acceleration * dt;
        self.displacement += self.extension_rate * dt;
    }

    /// Whether an empty spring is back at its natural length.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.displacement.abs() < 1e-6 && self.extension_rate.abs() < 1e-5
    }

    /// Restores the configuration the spring was created with.
    pub fn reset(&mut self) {
        self.natural_resting_length = self.initial.natural_resting_length;
        self.hold = self.initial.hold;
        self.forces_orientation = self.initial.forces_orientation;
        self.displacement = 0.0;
        self.extension_rate = 0.0;
    }
}

fn clamp_length(length: f64) -> f64 {
    length.clamp(MIN_SPRING_LENGTH, MAX_SPRING_LENGTH)
}

fn clamp_spring_constant(k: f64) -> f64 {
    k.clamp(MIN_SPRING_CONSTANT, MAX_SPRING_CONSTANT)
}
