//! Hangs a mass on the left spring of the default scene and logs what the
//! period trace and energy do over a few seconds.
//!
//! Run with `RUST_LOG=debug` to also see attachment and trace events.

use springlab_sim::{Lab, OscillationEvent};
use uom::si::{
    f64::{Length, Time},
    length::meter,
    time::second,
};

fn main() {
    env_logger::init();

    let mut lab = Lab::with_default_scene();
    let spring = springlab_sim::SpringId(0);
    let mass = springlab_sim::MassId(0);
    let frame = Time::new::<second>(1.0 / 60.0);

    let Some(bottom) = lab.spring(spring).map(|s| s.bottom_y()) else {
        return;
    };
    lab.begin_drag(mass);
    lab.update_drag(mass, Length::new::<meter>(1.0), Length::new::<meter>(bottom));
    lab.advance(frame);
    lab.end_drag(mass);
    lab.set_stopwatch_running(true);

    let mut last_phase = 0;
    for _ in 0..(5 * 60) {
        lab.advance(frame);
        for event in lab.events() {
            if let OscillationEvent::Peaked { displacement, .. } = event {
                log::info!(
                    "t = {:.3} s: peak at {displacement:+.4} m from equilibrium",
                    lab.elapsed().get::<second>()
                );
            }
        }
        let phase = lab.tracker(spring).map_or(0, |t| t.phase());
        if phase == 4 && last_phase != 4 {
            log::info!("period trace complete");
        }
        last_phase = phase;
    }

    if let Some(energy) = lab.energy(spring) {
        log::info!(
            "after {:.1} s: kinetic {:.4} J, gravitational {:.4} J, elastic {:.4} J, total {:.4} J",
            lab.elapsed().get::<second>(),
            energy.kinetic,
            energy.gravitational,
            energy.elastic,
            energy.total()
        );
    }
}
