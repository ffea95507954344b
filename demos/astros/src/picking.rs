//! Click-to-inspect: cast a ray through the pointer and select the nearest
//! planet it hits.

use glam::{Vec2, Vec3};
use astros_engine::{InfoCard, PerspectiveCamera};

/// A planet as seen by the picker: where it is and how big.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    /// Index into the planet table.
    pub index: usize,
    pub center: Vec3,
    pub radius: f32,
}

/// Index of the nearest target hit by the ray through `ndc`, if any.
pub fn pick_nearest(camera: &PerspectiveCamera, ndc: Vec2, targets: &[PickTarget]) -> Option<usize> {
    let ray = camera.ray_from_ndc(ndc);
    targets
        .iter()
        .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|hit| (t.index, hit.distance)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// The planet currently shown in the info card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace the selection with the outcome of a pick; a miss clears it.
    /// Returns `true` when the selection changed.
    pub fn apply(&mut self, picked: Option<usize>) -> bool {
        let changed = self.selected != picked;
        self.selected = picked;
        changed
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Card for the selection, resolved through `lookup`.
    pub fn card(&self, lookup: impl Fn(usize) -> Option<(&'static str, &'static str)>) -> Option<InfoCard> {
        let (name, fact) = lookup(self.selected?)?;
        Some(InfoCard {
            name: name.to_string(),
            fact: fact.to_string(),
        })
    }
}
