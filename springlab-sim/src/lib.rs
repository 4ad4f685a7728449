//! # springlab-sim
//!
//! The frame-driven model of a spring lab. A host creates a [`Lab`], feeds it
//! user intents (drags, slider changes, play/pause) and calls
//! [`Lab::advance`] once per animation frame, then reads back spring, mass,
//! and period-trace state to draw.
//!
//! ```
//! use springlab_sim::Lab;
//! use uom::si::{f64::Time, time::second};
//!
//! let mut lab = Lab::with_default_scene();
//! lab.advance(Time::new::<second>(1.0 / 60.0));
//! assert_eq!(lab.springs().len(), 2);
//! ```

mod body;
mod clock;
mod config;
mod indicators;
mod lab;
pub mod settings;
mod stopwatch;

pub use body::Body;
pub use clock::{FramePlan, FrameRequest, SimSpeed, SimulationClock};
pub use config::{ConfigError, SimConfig};
pub use indicators::{ForcesMode, Indicators};
pub use lab::Lab;
pub use settings::Settings;
pub use stopwatch::Stopwatch;

pub use springlab_physics::{
    AttachmentChange, Direction, Energy, HoldMode, MassId, MassOptions, MassState,
    OscillationEvent, PeriodTracker, SpringHold, SpringId, SpringState,
};
