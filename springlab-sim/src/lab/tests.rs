use approx::assert_relative_eq;
use springlab_core::units::{damping_si, stiffness_si};
use springlab_physics::{AttachmentChange, HoldMode, MassId, MassOptions, OscillationEvent, SpringId};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Mass, Time},
    length::meter,
    mass::kilogram,
    time::second,
};

use crate::{Body, SimSpeed};

use super::Lab;

fn meters(v: f64) -> Length {
    Length::new::<meter>(v)
}

fn frame() -> Time {
    Time::new::<second>(1.0 / 60.0)
}

fn run(lab: &mut Lab, seconds: f64) {
    for _ in 0..(seconds * 60.0).round() as usize {
        lab.advance(frame());
    }
}

/// One spring at x = 1 and a 250 g mass on the shelf.
fn lab_with_one_spring() -> (Lab, SpringId, MassId) {
    let mut lab = Lab::default();
    let spring = lab.create_spring(meters(1.0));
    let mass = lab.create_mass(
        Mass::new::<kilogram>(0.25),
        meters(0.2),
        "gray",
        Some("250 g".into()),
        MassOptions::default(),
    );
    (lab, spring, mass)
}

/// Drags `mass` to the bottom of the relaxed spring at x = 1 and lets go.
fn hang(lab: &mut Lab, mass: MassId) {
    lab.begin_drag(mass);
    lab.update_drag(mass, meters(1.0), meters(0.97));
    lab.advance(frame());
    lab.end_drag(mass);
}

#[test]
fn releasing_on_a_spring_attaches_and_drops() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);

    assert_eq!(lab.spring_of(mass), Some(spring));
    assert_eq!(lab.mass_on(spring), Some(mass));
    assert_eq!(
        lab.attachment_changes(),
        &[AttachmentChange::Attached { mass, spring }]
    );
    assert_eq!(lab.events(), &[OscillationEvent::Dropped { spring }]);
    assert_relative_eq!(lab.mass(mass).unwrap().position().x, 1.0);
}

#[test]
fn drag_requests_are_resolved_while_paused() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    lab.set_playing(false);
    hang(&mut lab, mass);
    assert_eq!(lab.spring_of(mass), Some(spring));

    let y = lab.mass(mass).unwrap().position().y;
    run(&mut lab, 0.5);
    assert_relative_eq!(lab.mass(mass).unwrap().position().y, y);
}

#[test]
fn hung_mass_completes_one_period_trace() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);

    // Period is 2π / sqrt(24) ≈ 1.28 s. The trace completes on the third
    // crossing at ≈ 1.6 s and fades for two seconds after that.
    run(&mut lab, 2.0);
    let tracker = lab.tracker(spring).unwrap();
    assert_eq!(tracker.phase(), 4);
    assert!(tracker.is_fading());
    // Released above equilibrium, so the first peak is the low point.
    assert!(tracker.first_peak() > 0.0);
    assert!(tracker.second_peak() < 0.0);
}

#[test]
fn mass_oscillates_about_equilibrium() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);

    let equilibrium = lab.equilibrium_y(spring).unwrap().get::<meter>();
    assert_relative_eq!(equilibrium, 0.97 - 0.25 * 9.8 / 6.0, epsilon = 1e-12);

    let mut lowest = f64::INFINITY;
    for _ in 0..120 {
        lab.advance(frame());
        lowest = lowest.min(lab.mass(mass).unwrap().position().y);
    }
    let amplitude = 0.25 * 9.8 / 6.0;
    assert_relative_eq!(lowest, equilibrium - amplitude, epsilon = 5e-3);
}

#[test]
fn dragging_off_detaches_and_the_spring_settles() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);
    run(&mut lab, 0.5);

    let y = lab.mass(mass).unwrap().position().y;
    lab.begin_drag(mass);
    lab.update_drag(mass, meters(1.2), meters(y));
    lab.advance(frame());

    assert_eq!(
        lab.attachment_changes(),
        &[AttachmentChange::Detached { mass, spring }]
    );
    assert!(lab.events().contains(&OscillationEvent::Dropped { spring }));
    assert_eq!(lab.tracker(spring).unwrap().phase(), 0);

    lab.end_drag(mass);
    run(&mut lab, 3.0);
    assert_relative_eq!(lab.mass(mass).unwrap().position().y, 0.02);
    assert!(lab.spring(spring).unwrap().is_settled());
    assert_eq!(lab.energy(spring), None);
}

#[test]
fn stopping_a_spring_hangs_the_mass_at_rest() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);
    run(&mut lab, 0.5);

    lab.stop_spring(spring);
    let equilibrium = lab.equilibrium_y(spring).unwrap().get::<meter>();
    assert_relative_eq!(lab.mass(mass).unwrap().position().y, equilibrium);
    assert_relative_eq!(lab.mass(mass).unwrap().velocity(), 0.0);
    assert_eq!(lab.tracker(spring).unwrap().phase(), 0);

    run(&mut lab, 1.0);
    assert_relative_eq!(
        lab.mass(mass).unwrap().position().y,
        equilibrium,
        epsilon = 1e-9
    );
}

#[test]
fn step_forward_clears_completed_traces() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    lab.set_playing(false);
    hang(&mut lab, mass);

    let mut highest = 0;
    for _ in 0..180 {
        lab.step_forward(frame());
        let phase = lab.tracker(spring).unwrap().phase();
        assert_ne!(phase, 4);
        highest = highest.max(phase);
    }
    assert_eq!(highest, 3);
}

#[test]
fn gravity_change_resets_the_trace_only_when_it_moves_equilibrium() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);
    run(&mut lab, 0.5);
    assert_eq!(lab.tracker(spring).unwrap().phase(), 1);

    lab.set_gravity(Acceleration::new::<meter_per_second_squared>(9.8));
    lab.set_damping(damping_si(0.0));
    lab.advance(frame());
    assert_eq!(lab.tracker(spring).unwrap().phase(), 1);

    lab.set_gravity(Acceleration::new::<meter_per_second_squared>(1.6));
    lab.advance(frame());
    assert_eq!(lab.tracker(spring).unwrap().phase(), 0);
    assert_eq!(lab.body(), Body::Custom);
}

#[test]
fn damping_heat_is_tracked_per_spring() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    let empty = lab.create_spring(meters(1.3));
    lab.set_damping(damping_si(0.5));
    hang(&mut lab, mass);
    assert_relative_eq!(lab.energy(spring).unwrap().thermal, 0.0);

    run(&mut lab, 2.0);
    assert!(lab.energy(spring).unwrap().thermal > 0.0);
    assert_eq!(lab.energy(empty), None);
}

#[test]
fn stopwatch_runs_on_physics_time() {
    let mut lab = Lab::default();
    lab.set_sim_speed(SimSpeed::Slow);
    lab.set_stopwatch_running(true);
    run(&mut lab, 1.0);
    assert_relative_eq!(lab.elapsed().get::<second>(), 1.0 / 8.0, epsilon = 1e-12);
}

#[test]
fn changing_length_carries_the_mass() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);
    run(&mut lab, 0.3);

    let displacement = lab.spring(spring).unwrap().displacement();
    lab.set_natural_resting_length(spring, meters(0.3));
    assert_relative_eq!(
        lab.mass(mass).unwrap().position().y,
        1.47 - 0.3 - displacement,
        epsilon = 1e-12
    );
}

#[test]
fn spring_constant_is_clamped_and_respects_hold_mode() {
    let (mut lab, spring, _) = lab_with_one_spring();
    lab.set_spring_constant(spring, stiffness_si(50.0));
    assert_relative_eq!(lab.spring_constant(spring).unwrap().value, 12.0);

    lab.set_hold_mode(spring, HoldMode::Thickness);
    lab.set_spring_constant(spring, stiffness_si(4.0));
    assert_relative_eq!(lab.spring_constant(spring).unwrap().value, 12.0);
}

#[test]
fn held_thickness_keeps_the_constant_in_range() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    lab.set_hold_mode(spring, HoldMode::Thickness);
    lab.set_natural_resting_length(spring, meters(0.1));
    assert_relative_eq!(lab.spring_constant(spring).unwrap().value, 12.0);

    let natural_bottom = lab.spring(spring).unwrap().natural_bottom_y();
    lab.begin_drag(mass);
    lab.update_drag(mass, meters(1.0), meters(natural_bottom));
    lab.advance(frame());
    lab.end_drag(mass);
    assert_eq!(lab.spring_of(mass), Some(spring));
    assert_relative_eq!(
        lab.equilibrium_y(spring).unwrap().get::<meter>(),
        natural_bottom - 0.25 * 9.8 / 12.0,
        epsilon = 1e-12
    );
}

#[test]
fn reset_restores_the_initial_scene() {
    let (mut lab, spring, mass) = lab_with_one_spring();
    hang(&mut lab, mass);
    lab.set_body(Body::Jupiter);
    lab.set_stopwatch_running(true);
    lab.indicators_mut().ruler = true;
    run(&mut lab, 1.0);

    lab.reset();
    assert_eq!(lab.spring_of(mass), None);
    assert_eq!(lab.body(), Body::Earth);
    assert_relative_eq!(lab.gravity().get::<meter_per_second_squared>(), 9.8);
    assert_eq!(lab.mass(mass).unwrap().position(), glam::DVec2::new(0.2, 0.02));
    assert_eq!(lab.tracker(spring).unwrap().phase(), 0);
    assert_relative_eq!(lab.elapsed().get::<second>(), 0.0);
    assert!(!lab.indicators().ruler);
    assert!(lab.is_playing());
}

#[test]
fn unknown_ids_are_ignored() {
    let mut lab = Lab::default();
    lab.begin_drag(MassId(3));
    lab.update_drag(MassId(3), meters(1.0), meters(1.0));
    lab.end_drag(MassId(3));
    lab.stop_spring(SpringId(7));
    lab.advance(frame());
    assert!(lab.events().is_empty());
}

#[test]
fn default_scene_has_two_springs_and_nine_masses() {
    let lab = Lab::with_default_scene();
    assert_eq!(lab.springs().len(), 2);
    assert_relative_eq!(lab.springs()[0].forces_orientation(), -1.0);
    assert_relative_eq!(lab.springs()[1].forces_orientation(), 1.0);
    assert_eq!(lab.masses().len(), 9);
    assert_eq!(lab.masses()[0].label(), Some("250 g"));
    assert_eq!(lab.masses()[6].label(), None);
    assert!(lab.masses().iter().all(|m| m.position().y == 0.02));
}
