//! # Spring/mass physics
//!
//! Single-degree-of-freedom vertical springs with hanging masses:
//!
//! - [`SpringState`] and [`MassState`]: per-object state
//! - [`Attachments`] and [`AttachmentResolver`]: which mass hangs where
//! - [`OscillationIntegrator`]: semi-implicit Euler stepping of a pair
//! - [`OscillationEvent`]: ordered crossings, peaks, and drops
//! - [`PeriodTracker`]: oscillation phase state machine
//! - [`Energy`]: per-pair energy accounting
//!
//! Coordinates are in meters with Y pointing up. Springs hang below their
//! anchor, and a mass's position is the point where it hooks onto a spring.

pub mod constants;
mod attachment;
mod energy;
mod event;
mod id;
mod integrator;
mod mass;
mod period_trace;
mod spring;

pub use attachment::{AttachmentChange, AttachmentResolver, Attachments};
pub use energy::Energy;
pub use event::{Direction, OscillationEvent};
pub use id::{MassId, SpringId};
pub use integrator::{Environment, Forcing, OscillationIntegrator, OscillatorState};
pub use mass::{MassOptions, MassState};
pub use period_trace::{PeriodTracker, TraceAction};
pub use spring::{HoldMode, SpringHold, SpringState};
