//! Period trace phase tracking.
//!
//! The tracker classifies an oscillation into phases from the crossing and
//! peak events of one spring:
//!
//! | phase | meaning |
//! |---|---|
//! | 0 | nothing recorded |
//! | 1 | first crossing of equilibrium seen, waiting for the first peak |
//! | 2 | first peak recorded, moving toward the second peak |
//! | 3 | second peak recorded, waiting for a crossing |
//! | 4 | trace complete |
//!
//! Crossings are counted modulo 4 and only the 1st and 3rd advance the
//! phase. The phase wraps back to 0 when it reaches 5.

use springlab_core::Observer;

use crate::{
    Direction, OscillationEvent,
    constants::{EQUILIBRIUM_EPSILON, TRACE_FADE_SECONDS, TRACE_X_OFFSET_STEP},
};

/// Signals returned by [`PeriodTracker::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceAction {
    /// The trace just reached its terminal phase.
    Completed,
}

/// Phase state machine for one spring's period trace.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTracker {
    phase: u8,
    crossing_count: u8,
    first_peak: f64,
    second_peak: f64,
    direction: Option<Direction>,
    x_offset: f64,
    fading: bool,
    alpha: f64,
    origin_y: Option<f64>,
}

impl Default for PeriodTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: 0,
            crossing_count: 0,
            first_peak: 0.0,
            second_peak: 0.0,
            direction: None,
            x_offset: 0.0,
            fading: false,
            alpha: 1.0,
            origin_y: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> u8 {
        self.phase
    }

    #[must_use]
    pub fn crossing_count(&self) -> u8 {
        self.crossing_count
    }

    /// Displacement from equilibrium captured on entering phase 2.
    #[must_use]
    pub fn first_peak(&self) -> f64 {
        self.first_peak
    }

    /// Displacement from equilibrium captured on entering phase 3.
    #[must_use]
    pub fn second_peak(&self) -> f64 {
        self.second_peak
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Horizontal layout offset of the trace; grows on every reversal.
    #[must_use]
    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fading
    }

    /// Opacity of a completed, fading trace.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Equilibrium Y the trace is measured from.
    #[must_use]
    pub fn origin_y(&self) -> Option<f64> {
        self.origin_y
    }

    fn on_peak(&mut self, direction: Direction, displacement: f64) {
        if self.phase != 0 && self.phase != 4 {
            self.phase += 1;
            if self.phase == 2 {
                self.first_peak = displacement;
            }
            if self.phase == 3 {
                self.second_peak = displacement;
            }
        }
        if self.direction != Some(direction) {
            self.x_offset += TRACE_X_OFFSET_STEP;
        }
        self.direction = Some(direction);
    }

    fn on_crossing(&mut self) {
        self.crossing_count += 1;
        if self.crossing_count == 1 || self.crossing_count == 3 {
            self.phase += 1;
        }
        if self.phase % 5 == 0 {
            self.phase = 0;
        }
        if self.crossing_count % 4 == 0 {
            self.crossing_count = 0;
        }
    }

    fn on_drop(&mut self) {
        self.phase = 0;
        self.crossing_count = 0;
    }

    /// Clears a completed trace once it has faded out.
    pub fn on_faded(&mut self) {
        self.phase = 0;
        self.crossing_count = 0;
        self.fading = false;
        self.alpha = 1.0;
    }

    /// Advances the fade of a completed trace by unscaled animation time.
    pub fn fade(&mut self, animation_dt: f64) {
        if self.phase != 4 {
            self.fading = false;
            self.alpha = 1.0;
            return;
        }
        self.fading = true;
        self.alpha -= animation_dt / TRACE_FADE_SECONDS;
        if self.alpha <= 0.0 {
            self.on_faded();
        }
    }

    /// Records the equilibrium the trace is measured from.
    ///
    /// Resets the trace and returns `true` when the equilibrium moved by more
    /// than [`EQUILIBRIUM_EPSILON`]; repeated identical values are ignored.
    pub fn watch_equilibrium(&mut self, equilibrium_y: Option<f64>) -> bool {
        let moved = match (self.origin_y, equilibrium_y) {
            (Some(old), Some(new)) => (old - new).abs() > EQUILIBRIUM_EPSILON,
            (None, None) => false,
            _ => true,
        };
        self.origin_y = equilibrium_y;
        if moved {
            self.on_faded();
        }
        moved
    }

    /// Clears the trace and forgets the direction history.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Observer<OscillationEvent, TraceAction> for PeriodTracker {
    fn observe(&mut self, event: &OscillationEvent) -> Option<TraceAction> {
        let before = self.phase;
        match *event {
            OscillationEvent::Crossed { .. } => self.on_crossing(),
            OscillationEvent::Peaked {
                direction,
                displacement,
                ..
            } => self.on_peak(direction, displacement),
            OscillationEvent::Dropped { .. } => self.on_drop(),
        }
        (self.phase == 4 && before != 4).then_some(TraceAction::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::SpringId;

    const SPRING: SpringId = SpringId(0);

    fn crossed() -> OscillationEvent {
        OscillationEvent::Crossed { spring: SPRING }
    }

    fn peaked(direction: Direction, displacement: f64) -> OscillationEvent {
        OscillationEvent::Peaked {
            spring: SPRING,
            direction,
            displacement,
        }
    }

    fn dropped() -> OscillationEvent {
        OscillationEvent::Dropped { spring: SPRING }
    }

    /// Events for one cycle of a mass released from rest below equilibrium.
    fn one_cycle() -> Vec<OscillationEvent> {
        vec![
            crossed(),
            peaked(Direction::Down, -0.05),
            crossed(),
            peaked(Direction::Up, 0.05),
            crossed(),
        ]
    }

    #[test]
    fn full_cycle_reaches_terminal_phase_once() {
        let mut tracker = PeriodTracker::new();
        let actions: Vec<_> = one_cycle()
            .iter()
            .filter_map(|e| tracker.observe(e))
            .collect();

        assert_eq!(actions, vec![TraceAction::Completed]);
        assert_eq!(tracker.phase(), 4);
        assert_relative_eq!(tracker.first_peak(), -0.05);
        assert_relative_eq!(tracker.second_peak(), 0.05);
    }

    #[test]
    fn terminal_phase_ignores_peaks_and_wraps_on_crossings() {
        let mut tracker = PeriodTracker::new();
        for e in one_cycle() {
            tracker.observe(&e);
        }

        tracker.observe(&peaked(Direction::Down, -0.04));
        assert_eq!(tracker.phase(), 4);

        tracker.observe(&crossed());
        assert_eq!(tracker.crossing_count(), 0);
        assert_eq!(tracker.phase(), 4);

        tracker.observe(&crossed());
        assert_eq!(tracker.phase(), 0);
    }

    #[test]
    fn drop_between_peaks_resets_before_next_phase() {
        let mut tracker = PeriodTracker::new();

        // t = 0.5: crossing, t = 1: peak at +0.05
        tracker.observe(&crossed());
        tracker.observe(&peaked(Direction::Up, 0.05));
        assert_eq!(tracker.phase(), 2);

        // t = 1.5: the mass is dropped
        tracker.observe(&dropped());
        assert_eq!(tracker.phase(), 0);
        assert_eq!(tracker.crossing_count(), 0);

        // t = 2: peak at -0.05 is ignored in phase 0
        tracker.observe(&peaked(Direction::Down, -0.05));
        assert_eq!(tracker.phase(), 0);
    }

    #[test]
    fn peaks_before_any_crossing_are_ignored() {
        let mut tracker = PeriodTracker::new();
        tracker.observe(&peaked(Direction::Up, 0.05));
        tracker.observe(&peaked(Direction::Down, -0.05));
        assert_eq!(tracker.phase(), 0);
    }

    #[test]
    fn direction_changes_shift_the_trace() {
        let mut tracker = PeriodTracker::new();
        tracker.observe(&peaked(Direction::Up, 0.0));
        tracker.observe(&peaked(Direction::Up, 0.0));
        tracker.observe(&peaked(Direction::Down, 0.0));
        assert_relative_eq!(tracker.x_offset(), 2.0 * TRACE_X_OFFSET_STEP);
        assert_eq!(tracker.direction(), Some(Direction::Down));
    }

    #[test]
    fn completed_trace_fades_then_resets() {
        let mut tracker = PeriodTracker::new();
        for e in one_cycle() {
            tracker.observe(&e);
        }
        tracker.fade(TRACE_FADE_SECONDS / 2.0);
        assert!(tracker.is_fading());
        assert_relative_eq!(tracker.alpha(), 0.5);

        tracker.fade(TRACE_FADE_SECONDS);
        assert_eq!(tracker.phase(), 0);
        assert!(!tracker.is_fading());
        assert_relative_eq!(tracker.alpha(), 1.0);
    }

    #[test]
    fn equilibrium_shift_resets_only_when_material() {
        let mut tracker = PeriodTracker::new();
        assert!(tracker.watch_equilibrium(Some(0.5)));
        tracker.observe(&crossed());
        assert_eq!(tracker.phase(), 1);

        assert!(!tracker.watch_equilibrium(Some(0.5 + 1e-12)));
        assert_eq!(tracker.phase(), 1);

        assert!(tracker.watch_equilibrium(Some(0.45)));
        assert_eq!(tracker.phase(), 0);
    }
}
