use springlab_physics::MassOptions;
use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
};

use super::Lab;

const LABELED_COLOR: &str = "#999999";

/// Standard labeled masses: kg and shelf X.
const LABELED_MASSES: [(f64, f64); 6] = [
    (0.250, 0.12),
    (0.250, 0.16),
    (0.100, 0.30),
    (0.100, 0.33),
    (0.050, 0.425),
    (0.050, 0.445),
];

/// Mystery masses: kg, shelf X, and color.
const MYSTERY_MASSES: [(f64, f64, &str); 3] = [
    (0.200, 0.76, "#f15a24"),
    (0.100, 0.69, "#2e8b57"),
    (0.075, 0.62, "#4169e1"),
];

impl Lab {
    /// A lab with two springs and the standard set of masses on the shelf.
    #[must_use]
    pub fn with_default_scene() -> Self {
        let mut lab = Self::default();
        lab.add_default_springs();
        lab.add_default_masses();
        lab
    }

    /// Adds the left and right springs, with force arrows mirrored on the
    /// left one.
    pub fn add_default_springs(&mut self) {
        for (x, orientation) in [(1.0, -1.0), (1.3, 1.0)] {
            let id = self.create_spring(Length::new::<meter>(x));
            self.springs[id.index()].set_forces_orientation(orientation);
        }
    }

    /// Adds six labeled masses and three mystery masses.
    pub fn add_default_masses(&mut self) {
        for (kg, x) in LABELED_MASSES {
            self.create_mass(
                Mass::new::<kilogram>(kg),
                Length::new::<meter>(x),
                LABELED_COLOR,
                Some(format!("{} g", (kg * 1000.0).round())),
                MassOptions::default(),
            );
        }
        for (kg, x, color) in MYSTERY_MASSES {
            self.create_mass(
                Mass::new::<kilogram>(kg),
                Length::new::<meter>(x),
                color,
                Some(format!("{} g", (kg * 1000.0).round())),
                MassOptions { mystery: true },
            );
        }
    }
}
