//! Turning host frame times into physics steps.

use crate::SimConfig;

/// Playback speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimSpeed {
    #[default]
    Normal,
    Slow,
}

/// How a frame was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// A regular animation frame; ignored while paused.
    Play,
    /// A single step requested by the user, taken even while paused.
    StepForward,
}

/// The physics work for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    /// Physics time to advance, after clamping and slow-motion scaling.
    pub dt: f64,
    /// Unscaled frame time for cosmetic effects.
    pub animation_dt: f64,
    /// Number of equal integration steps.
    pub substeps: usize,
}

impl FramePlan {
    /// Length of one integration step.
    #[must_use]
    pub fn substep_dt(&self) -> f64 {
        self.dt / self.substeps as f64
    }

    /// Animation time attributed to one integration step.
    #[must_use]
    pub fn substep_animation_dt(&self) -> f64 {
        self.animation_dt / self.substeps as f64
    }
}

/// Play/pause state and frame planning.
///
/// A frame longer than `max_frame_dt` (typically a tab that was hidden for a
/// while) is clamped rather than replayed. Slow motion divides the physics
/// time by `slow_motion_ratio` but leaves the animation time alone. Each frame
/// is split into equal steps no longer than `max_substep`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    playing: bool,
    speed: SimSpeed,
    max_frame_dt: f64,
    max_substep: f64,
    slow_motion_ratio: f64,
}

impl SimulationClock {
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            playing: true,
            speed: SimSpeed::Normal,
            max_frame_dt: config.max_frame_dt(),
            max_substep: config.max_substep(),
            slow_motion_ratio: config.slow_motion_ratio(),
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    #[must_use]
    pub fn speed(&self) -> SimSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.speed = speed;
    }

    /// Plans the physics for a frame of length `dt`.
    ///
    /// Returns `None` when nothing should be integrated: a paused clock
    /// asked for a regular frame, or `dt` is not a positive finite number.
    /// Slow motion only applies while playing, so a step forward from pause
    /// always covers the requested time.
    #[must_use]
    pub fn plan(&self, dt: f64, request: FrameRequest) -> Option<FramePlan> {
        if !(dt.is_finite() && dt > 0.0) {
            if !dt.is_finite() {
                log::warn!("ignoring non-finite frame time {dt}");
            }
            return None;
        }
        if request == FrameRequest::Play && !self.playing {
            return None;
        }

        let animation_dt = dt.min(self.max_frame_dt);
        let dt = if self.playing && self.speed == SimSpeed::Slow {
            animation_dt / self.slow_motion_ratio
        } else {
            animation_dt
        };

        // Shave rounding noise so 0.3 / (1/120) plans 36 steps, not 37.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let substeps = (dt / self.max_substep * (1.0 - 1e-12)).ceil().max(1.0) as usize;

        Some(FramePlan {
            dt,
            animation_dt,
            substeps,
        })
    }

    /// Back to playing at normal speed.
    pub fn reset(&mut self) {
        self.playing = true;
        self.speed = SimSpeed::Normal;
    }
}
