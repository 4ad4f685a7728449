//! The spring lab model.
//!
//! [`Lab`] owns every spring and mass and is the only thing a host talks to.
//! Each call to [`Lab::advance`] runs one frame:
//!
//! 1. attach/detach requests queued by drags are resolved,
//! 2. period traces whose equilibrium moved are reset,
//! 3. the clock turns the frame time into equal physics steps,
//! 4. in each step free masses fall, loaded springs are integrated in spring
//!    order, and empty springs settle,
//! 5. the oscillation events are fed to the period trackers in order.

mod scene;
#[cfg(test)]
mod tests;

use std::fmt::Display;

use glam::DVec2;
use springlab_core::{
    Observer,
    units::{DampingCoefficient, Stiffness, damping_si, stiffness_si},
};
use springlab_physics::{
    AttachmentChange, AttachmentResolver, Attachments, Energy, HoldMode, MassId, MassOptions,
    MassState, OscillationEvent, OscillationIntegrator, PeriodTracker, SpringId, SpringState,
    TraceAction,
    constants::{CEILING_Y, DEFAULT_SPRING_LENGTH, FLOOR_Y, SHELF_HEIGHT},
};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Mass, Time},
    length::meter,
    mass::kilogram,
    time::second,
};

use crate::{
    Body, FrameRequest, Indicators, Settings, SimConfig, SimSpeed, SimulationClock, Stopwatch,
    settings::{clamp_logged, spring_constant_range},
};

/// Y at which free masses come to rest.
const REST_Y: f64 = FLOOR_Y + SHELF_HEIGHT;

/// A frame-driven simulation of masses hanging from springs.
///
/// No operation returns an error. Unknown ids and non-finite inputs are
/// logged and ignored, out-of-range settings are clamped.
#[derive(Debug, Clone)]
pub struct Lab {
    config: SimConfig,
    settings: Settings,
    clock: SimulationClock,
    stopwatch: Stopwatch,
    indicators: Indicators,

    masses: Vec<MassState>,
    springs: Vec<SpringState>,
    trackers: Vec<PeriodTracker>,
    thermal: Vec<f64>,
    table: Attachments,
    resolver: AttachmentResolver,
    integrator: OscillationIntegrator,

    pending: Vec<MassId>,
    events: Vec<OscillationEvent>,
    changes: Vec<AttachmentChange>,
    seen_epoch: u64,
    equilibria_stale: bool,
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Lab {
    /// Creates an empty lab.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        let settings = Settings::new(config.gravity(), config.damping());
        Self {
            clock: SimulationClock::new(&config),
            seen_epoch: settings.epoch(),
            settings,
            config,
            stopwatch: Stopwatch::default(),
            indicators: Indicators::default(),
            masses: Vec::new(),
            springs: Vec::new(),
            trackers: Vec::new(),
            thermal: Vec::new(),
            table: Attachments::new(),
            resolver: AttachmentResolver::default(),
            integrator: OscillationIntegrator,
            pending: Vec::new(),
            events: Vec::new(),
            changes: Vec::new(),
            equilibria_stale: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Adds a mass resting on the shelf at `x`.
    pub fn create_mass(
        &mut self,
        mass: Mass,
        x: Length,
        color: impl Into<String>,
        label: Option<String>,
        options: MassOptions,
    ) -> MassId {
        let mut x = x.get::<meter>();
        if !x.is_finite() {
            log::warn!("mass created at non-finite x {x}, using 0");
            x = 0.0;
        }
        let state = MassState::new(
            mass.get::<kilogram>(),
            DVec2::new(x, REST_Y),
            color,
            label,
            options,
        );
        self.masses.push(state);
        self.table.register_mass()
    }

    /// Adds a relaxed spring hanging from the ceiling at `x`.
    pub fn create_spring(&mut self, x: Length) -> SpringId {
        let mut x = x.get::<meter>();
        if !x.is_finite() {
            log::warn!("spring created at non-finite x {x}, using 0");
            x = 0.0;
        }
        self.springs.push(SpringState::new(
            DVec2::new(x, CEILING_Y),
            DEFAULT_SPRING_LENGTH,
        ));
        self.trackers.push(PeriodTracker::new());
        self.thermal.push(0.0);
        self.table.register_spring()
    }

    // Environment

    pub fn set_gravity(&mut self, gravity: Acceleration) {
        self.settings
            .set_gravity(gravity.get::<meter_per_second_squared>());
    }

    pub fn set_damping(&mut self, damping: DampingCoefficient) {
        self.settings.set_damping(damping.value);
    }

    pub fn set_body(&mut self, body: Body) {
        self.settings.set_body(body);
    }

    #[must_use]
    pub fn gravity(&self) -> Acceleration {
        Acceleration::new::<meter_per_second_squared>(self.settings.gravity())
    }

    #[must_use]
    pub fn damping(&self) -> DampingCoefficient {
        damping_si(self.settings.damping())
    }

    #[must_use]
    pub fn body(&self) -> Body {
        self.settings.body()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // Springs

    /// Sets a spring's constant, clamped to the allowed range.
    ///
    /// Ignored while the spring holds its thickness.
    pub fn set_spring_constant(&mut self, spring: SpringId, k: Stiffness) {
        let k = k.value;
        if !k.is_finite() {
            log::warn!("ignoring non-finite spring constant {k}");
            return;
        }
        let k = clamp_logged("spring constant", spring_constant_range(), k);
        if let Some(s) = lookup(&mut self.springs, spring.index(), spring) {
            if s.set_spring_constant(k) {
                self.equilibria_stale = true;
            }
        }
    }

    /// Sets a spring's natural resting length.
    ///
    /// A hanging mass keeps its extension and moves with the spring bottom.
    pub fn set_natural_resting_length(&mut self, spring: SpringId, length: Length) {
        let Some(s) = lookup(&mut self.springs, spring.index(), spring) else {
            return;
        };
        s.set_natural_resting_length(length.get::<meter>());
        if let Some(mass) = self.table.mass_on(spring) {
            OscillationIntegrator::place_mass(s, &mut self.masses[mass.index()]);
        }
        self.equilibria_stale = true;
    }

    /// Sets a spring's coil thickness. Ignored while the constant is held.
    pub fn set_thickness(&mut self, spring: SpringId, thickness: f64) {
        if let Some(s) = lookup(&mut self.springs, spring.index(), spring) {
            if s.set_thickness(thickness) {
                self.equilibria_stale = true;
            }
        }
    }

    pub fn set_hold_mode(&mut self, spring: SpringId, mode: HoldMode) {
        if let Some(s) = lookup(&mut self.springs, spring.index(), spring) {
            s.set_hold_mode(mode);
        }
    }

    /// Brings a spring and its mass to rest at equilibrium and clears its
    /// period trace.
    pub fn stop_spring(&mut self, spring: SpringId) {
        let Some(s) = lookup(&mut self.springs, spring.index(), spring) else {
            return;
        };
        match self.table.mass_on(spring) {
            Some(mass) => {
                let mass = &mut self.masses[mass.index()];
                if mass.is_user_controlled() {
                    return;
                }
                OscillationIntegrator::stop(s, mass, self.settings.gravity());
            }
            None => s.update_displacement(s.natural_bottom_y(), false),
        }
        self.trackers[spring.index()].reset();
        self.thermal[spring.index()] = 0.0;
        self.equilibria_stale = true;
    }

    // Playback

    pub fn set_playing(&mut self, playing: bool) {
        self.clock.set_playing(playing);
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn set_sim_speed(&mut self, speed: SimSpeed) {
        self.clock.set_speed(speed);
    }

    #[must_use]
    pub fn sim_speed(&self) -> SimSpeed {
        self.clock.speed()
    }

    /// Runs one animation frame of length `dt`.
    ///
    /// Frames longer than the configured maximum are clamped. Nothing is
    /// integrated while paused, but queued drag requests are still resolved.
    pub fn advance(&mut self, dt: Time) {
        self.frame(dt.get::<second>(), FrameRequest::Play);
    }

    /// Takes one step of length `dt`, even while paused.
    ///
    /// Completed period traces are cleared afterwards.
    pub fn step_forward(&mut self, dt: Time) {
        self.frame(dt.get::<second>(), FrameRequest::StepForward);
        for tracker in &mut self.trackers {
            if tracker.phase() == 4 {
                tracker.on_faded();
            }
        }
    }

    // Dragging

    pub fn begin_drag(&mut self, mass: MassId) {
        if let Some(m) = lookup(&mut self.masses, mass.index(), mass) {
            m.begin_drag();
        }
    }

    /// Moves a dragged mass and queues an attachment check for the next frame.
    pub fn update_drag(&mut self, mass: MassId, x: Length, y: Length) {
        let Some(m) = lookup(&mut self.masses, mass.index(), mass) else {
            return;
        };
        m.drag_to(DVec2::new(x.get::<meter>(), y.get::<meter>()));
        if m.is_user_controlled() && !self.pending.contains(&mass) {
            self.pending.push(mass);
        }
    }

    /// Lets go of a dragged mass.
    ///
    /// Attachment is resolved immediately. A mass released on a spring is
    /// dropped onto it, which restarts that spring's period trace.
    pub fn end_drag(&mut self, mass: MassId) {
        match self.masses.get(mass.index()) {
            Some(m) if m.is_user_controlled() => {}
            Some(_) => {
                log::warn!("{mass} is not being dragged");
                return;
            }
            None => {
                log::warn!("unknown {mass}");
                return;
            }
        }
        self.pending.retain(|&m| m != mass);
        self.resolve(mass);
        self.masses[mass.index()].end_drag();
        if let Some(spring) = self.table.spring_of(mass) {
            self.drop_on(spring);
        }
    }

    /// Restores every setting, mass, and spring to its initial state.
    pub fn reset(&mut self) {
        self.settings.reset();
        self.clock.reset();
        self.stopwatch.reset();
        self.indicators = Indicators::default();

        self.masses.iter_mut().for_each(MassState::reset);
        self.springs.iter_mut().for_each(SpringState::reset);
        self.table.clear();
        self.trackers.iter_mut().for_each(PeriodTracker::reset);
        self.thermal.iter_mut().for_each(|t| *t = 0.0);

        self.pending.clear();
        self.events.clear();
        self.changes.clear();
        self.seen_epoch = self.settings.epoch();
        self.equilibria_stale = false;
    }

    // Tools

    #[must_use]
    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn set_stopwatch_running(&mut self, running: bool) {
        self.stopwatch.set_running(running);
    }

    pub fn reset_stopwatch(&mut self) {
        self.stopwatch.reset();
    }

    /// Physics time measured by the stopwatch.
    #[must_use]
    pub fn elapsed(&self) -> Time {
        Time::new::<second>(self.stopwatch.elapsed())
    }

    #[must_use]
    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    pub fn indicators_mut(&mut self) -> &mut Indicators {
        &mut self.indicators
    }

    // Observables

    #[must_use]
    pub fn masses(&self) -> &[MassState] {
        &self.masses
    }

    #[must_use]
    pub fn springs(&self) -> &[SpringState] {
        &self.springs
    }

    #[must_use]
    pub fn mass(&self, id: MassId) -> Option<&MassState> {
        self.masses.get(id.index())
    }

    #[must_use]
    pub fn spring(&self, id: SpringId) -> Option<&SpringState> {
        self.springs.get(id.index())
    }

    #[must_use]
    pub fn tracker(&self, id: SpringId) -> Option<&PeriodTracker> {
        self.trackers.get(id.index())
    }

    #[must_use]
    pub fn attachments(&self) -> &Attachments {
        &self.table
    }

    #[must_use]
    pub fn spring_of(&self, mass: MassId) -> Option<SpringId> {
        self.table.spring_of(mass)
    }

    #[must_use]
    pub fn mass_on(&self, spring: SpringId) -> Option<MassId> {
        self.table.mass_on(spring)
    }

    #[must_use]
    pub fn spring_constant(&self, spring: SpringId) -> Option<Stiffness> {
        self.spring(spring).map(|s| stiffness_si(s.spring_constant()))
    }

    /// Y at which the spring's load would hang at rest.
    ///
    /// For an empty spring this is its relaxed bottom.
    #[must_use]
    pub fn equilibrium_y(&self, spring: SpringId) -> Option<Length> {
        let s = self.spring(spring)?;
        let mass = self.mass_on(spring).map(|m| self.masses[m.index()].mass());
        let y = s.equilibrium_y(self.settings.gravity(), mass);
        Some(Length::new::<meter>(y))
    }

    /// Energy of the pair on `spring`, or `None` if it holds no mass.
    #[must_use]
    pub fn energy(&self, spring: SpringId) -> Option<Energy> {
        let s = self.spring(spring)?;
        let m = &self.masses[self.mass_on(spring)?.index()];
        Some(Energy::of_pair(
            s,
            m,
            self.settings.gravity(),
            FLOOR_Y,
            self.thermal[spring.index()],
        ))
    }

    /// Oscillation events since the start of the last frame, in order.
    #[must_use]
    pub fn events(&self) -> &[OscillationEvent] {
        &self.events
    }

    /// Attachment changes since the start of the last frame, in order.
    #[must_use]
    pub fn attachment_changes(&self) -> &[AttachmentChange] {
        &self.changes
    }

    // Frame internals

    fn frame(&mut self, dt: f64, request: FrameRequest) {
        self.events.clear();
        self.changes.clear();

        for mass in std::mem::take(&mut self.pending) {
            self.resolve(mass);
        }
        self.watch_equilibria();

        let Some(plan) = self.clock.plan(dt, request) else {
            return;
        };
        log::trace!(
            "frame: {:.5} s physics in {} steps",
            plan.dt,
            plan.substeps
        );

        let step_dt = plan.substep_dt();
        let step_animation_dt = plan.substep_animation_dt();
        for _ in 0..plan.substeps {
            self.step(step_dt, step_animation_dt);
        }

        self.stopwatch.step(plan.dt);
        for tracker in &mut self.trackers {
            tracker.fade(plan.animation_dt);
        }
    }

    fn step(&mut self, dt: f64, animation_dt: f64) {
        let env = self.settings.environment();

        for mass in &mut self.masses {
            mass.step(env.gravity, REST_Y, dt, animation_dt);
        }

        for (i, spring) in self.springs.iter_mut().enumerate() {
            let id = SpringId(i);
            let Some(mass) = self.table.mass_on(id) else {
                spring.settle(dt);
                continue;
            };
            let start = self.events.len();
            self.thermal[i] += self.integrator.step(
                id,
                spring,
                &mut self.masses[mass.index()],
                &env,
                dt,
                &mut self.events,
            );
            for event in &self.events[start..] {
                notify(&mut self.trackers[i], event);
            }
        }
    }

    fn resolve(&mut self, mass: MassId) {
        let start = self.changes.len();
        self.resolver.resolve(
            mass,
            &mut self.masses,
            &mut self.springs,
            &mut self.table,
            &mut self.changes,
        );
        for i in start..self.changes.len() {
            let change = self.changes[i];
            match change {
                AttachmentChange::Attached { spring, .. } => self.thermal[spring.index()] = 0.0,
                AttachmentChange::Detached { spring, .. } => self.drop_on(spring),
            }
            self.equilibria_stale = true;
        }
    }

    /// Restarts the trace and heat accounting of `spring`.
    fn drop_on(&mut self, spring: SpringId) {
        let event = OscillationEvent::Dropped { spring };
        self.events.push(event);
        notify(&mut self.trackers[spring.index()], &event);
        self.thermal[spring.index()] = 0.0;
    }

    /// Resets traces whose equilibrium moved since it was last looked at.
    fn watch_equilibria(&mut self) {
        if !self.equilibria_stale && self.settings.epoch() == self.seen_epoch {
            return;
        }
        self.equilibria_stale = false;
        self.seen_epoch = self.settings.epoch();

        let gravity = self.settings.gravity();
        for (i, tracker) in self.trackers.iter_mut().enumerate() {
            let id = SpringId(i);
            let equilibrium = self
                .table
                .mass_on(id)
                .map(|m| self.springs[i].equilibrium_y(gravity, Some(self.masses[m.index()].mass())));
            if tracker.watch_equilibrium(equilibrium) {
                log::debug!("{id}: equilibrium moved, period trace reset");
            }
        }
    }
}

fn notify(tracker: &mut PeriodTracker, event: &OscillationEvent) {
    if tracker.observe(event) == Some(TraceAction::Completed) {
        log::debug!("{}: period trace complete", event.spring());
    }
}

fn lookup<T>(items: &mut [T], index: usize, id: impl Display) -> Option<&mut T> {
    let item = items.get_mut(index);
    if item.is_none() {
        log::warn!("unknown {id}");
    }
    item
}
