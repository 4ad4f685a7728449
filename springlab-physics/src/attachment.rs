//! Which mass hangs on which spring, and when that changes.

use glam::DVec2;

use crate::{
    MassId, MassState, SpringId, SpringState,
    constants::{GRAB_DISTANCE, RELEASE_DISTANCE},
};

/// A change to the attachment relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentChange {
    Attached { mass: MassId, spring: SpringId },
    Detached { mass: MassId, spring: SpringId },
}

/// Index table relating masses and springs.
///
/// This is the only record of which mass hangs where. It keeps the
/// [`MassState::is_attached`] mirror and the spring geometry in step with
/// every change, so neither can drift from the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    spring_of: Vec<Option<SpringId>>,
    mass_on: Vec<Option<MassId>>,
}

impl Attachments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a row for a new, free mass and returns its id.
    pub fn register_mass(&mut self) -> MassId {
        self.spring_of.push(None);
        MassId(self.spring_of.len() - 1)
    }

    /// Adds a row for a new, empty spring and returns its id.
    pub fn register_spring(&mut self) -> SpringId {
        self.mass_on.push(None);
        SpringId(self.mass_on.len() - 1)
    }

    /// The spring `mass` hangs on, if any.
    #[must_use]
    pub fn spring_of(&self, mass: MassId) -> Option<SpringId> {
        self.spring_of.get(mass.index()).copied().flatten()
    }

    /// The mass hanging on `spring`, if any.
    #[must_use]
    pub fn mass_on(&self, spring: SpringId) -> Option<MassId> {
        self.mass_on.get(spring.index()).copied().flatten()
    }

    /// Occupied springs in spring order.
    pub fn pairs(&self) -> impl Iterator<Item = (SpringId, MassId)> + '_ {
        self.mass_on
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|m| (SpringId(i), m)))
    }

    /// Hangs `mass_id` on `spring_id`.
    ///
    /// The mass snaps to the spring's X and the spring stretches to reach it.
    /// Attaching an attached mass or hanging a mass on an occupied spring is
    /// a caller bug: it panics in debug builds and is logged and ignored
    /// otherwise. Returns whether the attachment was made.
    pub fn attach(
        &mut self,
        mass_id: MassId,
        spring_id: SpringId,
        masses: &mut [MassState],
        springs: &mut [SpringState],
    ) -> bool {
        let (Some(mass), Some(spring)) = (
            masses.get_mut(mass_id.index()),
            springs.get_mut(spring_id.index()),
        ) else {
            log::error!("cannot attach unknown {mass_id} to {spring_id}");
            debug_assert!(false, "unknown {mass_id} or {spring_id}");
            return false;
        };

        if let Some(current) = self.spring_of(mass_id) {
            log::error!("{mass_id} already hangs on {current}");
            debug_assert!(false, "{mass_id} already hangs on {current}");
            return false;
        }
        if let Some(occupant) = self.mass_on(spring_id) {
            log::error!("{spring_id} already holds {occupant}");
            debug_assert!(false, "{spring_id} already holds {occupant}");
            return false;
        }

        self.spring_of[mass_id.index()] = Some(spring_id);
        self.mass_on[spring_id.index()] = Some(mass_id);
        mass.attach();
        hang(spring, mass);
        log::debug!("{mass_id} attached to {spring_id}");
        true
    }

    /// Takes `mass_id` off its spring and returns that spring.
    ///
    /// The mass keeps its velocity and the spring starts settling from its
    /// current extension rate. Detaching a free mass is a caller bug: it
    /// panics in debug builds and returns `None` otherwise.
    pub fn detach(
        &mut self,
        mass_id: MassId,
        masses: &mut [MassState],
        springs: &mut [SpringState],
    ) -> Option<SpringId> {
        let Some(spring_id) = self.spring_of(mass_id) else {
            log::error!("{mass_id} is not attached to any spring");
            debug_assert!(false, "{mass_id} is not attached");
            return None;
        };
        self.spring_of[mass_id.index()] = None;
        self.mass_on[spring_id.index()] = None;

        if let Some(spring) = springs.get_mut(spring_id.index()) {
            spring.release(spring.extension_rate());
        }
        if let Some(mass) = masses.get_mut(mass_id.index()) {
            mass.detach();
        }
        log::debug!("{mass_id} detached from {spring_id}");
        Some(spring_id)
    }

    /// Forgets every attachment without touching mass or spring state.
    ///
    /// Used when the caller resets the states itself.
    pub fn clear(&mut self) {
        self.spring_of.iter_mut().for_each(|s| *s = None);
        self.mass_on.iter_mut().for_each(|m| *m = None);
    }
}

/// Spatial policy deciding when a dragged mass hooks onto or leaves a spring.
///
/// Grabbing requires the mass to be closer than `grab_distance` to a spring's
/// anchor X and to its bottom Y. Once attached, the mass only comes off when
/// dragged more than `release_distance` away horizontally. Keeping the grab
/// distance below the release distance gives the hysteresis that stops a
/// mass from flickering on and off at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentResolver {
    grab_distance: f64,
    release_distance: f64,
}

impl Default for AttachmentResolver {
    fn default() -> Self {
        Self {
            grab_distance: GRAB_DISTANCE,
            release_distance: RELEASE_DISTANCE,
        }
    }
}

impl AttachmentResolver {
    #[must_use]
    pub fn grab_distance(&self) -> f64 {
        self.grab_distance
    }

    #[must_use]
    pub fn release_distance(&self) -> f64 {
        self.release_distance
    }

    /// Applies the attachment policy to one dragged mass.
    ///
    /// Changes are appended to `changes` in the order they happen. A mass
    /// dragged off its spring is immediately checked against the other
    /// springs, so a single call can report a detach followed by an attach.
    pub fn resolve(
        &self,
        mass_id: MassId,
        masses: &mut [MassState],
        springs: &mut [SpringState],
        table: &mut Attachments,
        changes: &mut Vec<AttachmentChange>,
    ) {
        let Some(position) = masses.get(mass_id.index()).map(MassState::position) else {
            log::error!("cannot resolve unknown {mass_id}");
            debug_assert!(false, "unknown {mass_id}");
            return;
        };

        if let Some(spring_id) = table.spring_of(mass_id) {
            let anchor_x = springs[spring_id.index()].anchor().x;
            if (position.x - anchor_x).abs() <= self.release_distance {
                hang(
                    &mut springs[spring_id.index()],
                    &mut masses[mass_id.index()],
                );
                return;
            }
            table.detach(mass_id, masses, springs);
            changes.push(AttachmentChange::Detached {
                mass: mass_id,
                spring: spring_id,
            });
        }

        let target = springs.iter().enumerate().find_map(|(i, spring)| {
            let spring_id = SpringId(i);
            let in_reach = (spring.anchor().x - position.x).abs() < self.grab_distance
                && (spring.bottom_y() - position.y).abs() < self.grab_distance;
            (in_reach && table.mass_on(spring_id).is_none()).then_some(spring_id)
        });

        if let Some(spring_id) = target {
            if table.attach(mass_id, spring_id, masses, springs) {
                changes.push(AttachmentChange::Attached {
                    mass: mass_id,
                    spring: spring_id,
                });
            }
        }
    }
}

/// Snaps `mass` under `spring` and stretches the spring to reach it.
///
/// The mass cannot be pushed above the point where the coils close. Both
/// velocities are zeroed.
fn hang(spring: &mut SpringState, mass: &mut MassState) {
    let y = mass.position().y.min(spring.max_coil_closure_y());
    mass.set_position(DVec2::new(spring.anchor().x, y));
    mass.set_velocity(0.0);
    spring.update_displacement(y, false);
}
