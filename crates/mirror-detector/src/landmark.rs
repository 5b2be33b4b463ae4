//! Traffic mirror landmarks and de-duplicated landmark sets.

use std::collections::BTreeMap;

use mirror_core::{normalize_radian, Pt3, Real, Vec3};
use serde::{Deserialize, Serialize};

/// Identity of a landmark: the id of its line string in the vector map.
pub type LandmarkId = u64;

/// Subtype carried by line strings that are painted or solid panels rather
/// than reflective mirrors.
pub const SOLID_SUBTYPE: &str = "solid";

/// A mapped traffic mirror: the bottom edge of the panel as a 3D segment in
/// the map frame, plus its height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: LandmarkId,
    /// First point of the line string (bottom, near side).
    pub near: Pt3,
    /// Last point of the line string (bottom, far side).
    pub far: Pt3,
    #[serde(default)]
    pub height: Real,
    #[serde(default)]
    pub subtype: Option<String>,
}

impl Landmark {
    /// Only landmarks with a subtype other than `solid` are mirrors.
    pub fn is_reflective(&self) -> bool {
        matches!(self.subtype.as_deref(), Some(subtype) if subtype != SOLID_SUBTYPE)
    }

    /// Near endpoint raised by the panel height.
    pub fn top_left(&self) -> Pt3 {
        self.near + Vec3::new(0.0, 0.0, self.height)
    }

    /// Far endpoint at ground level.
    pub fn bottom_right(&self) -> Pt3 {
        self.far
    }

    pub fn center(&self) -> Pt3 {
        nalgebra::center(&self.top_left(), &self.bottom_right())
    }

    /// Facing direction of the panel in the map plane: the bottom edge
    /// direction rotated by +90 degrees.
    pub fn heading(&self) -> Real {
        let dir = self.far - self.near;
        normalize_radian(dir.y.atan2(dir.x) + std::f64::consts::FRAC_PI_2)
    }
}

/// Landmarks keyed by id. Inserting an id that is already present keeps the
/// first landmark.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    landmarks: BTreeMap<LandmarkId, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when a landmark with the same id was already present.
    pub fn insert(&mut self, landmark: Landmark) -> bool {
        use std::collections::btree_map::Entry;
        match self.landmarks.entry(landmark.id) {
            Entry::Vacant(slot) => {
                slot.insert(landmark);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    pub fn contains(&self, id: LandmarkId) -> bool {
        self.landmarks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }
}

impl FromIterator<Landmark> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        let mut set = Self::new();
        for landmark in iter {
            set.insert(landmark);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn mirror(id: LandmarkId, subtype: Option<&str>) -> Landmark {
        Landmark {
            id,
            near: Pt3::new(10.0, 0.0, 0.0),
            far: Pt3::new(10.0, 2.0, 0.0),
            height: 1.0,
            subtype: subtype.map(str::to_string),
        }
    }

    #[test]
    fn derived_corners_and_center() {
        let lm = mirror(1, Some("reflective"));
        assert_eq!(lm.top_left(), Pt3::new(10.0, 0.0, 1.0));
        assert_eq!(lm.bottom_right(), Pt3::new(10.0, 2.0, 0.0));
        assert_eq!(lm.center(), Pt3::new(10.0, 1.0, 0.5));
    }

    #[test]
    fn heading_is_edge_direction_rotated_left() {
        let lm = mirror(1, Some("reflective"));
        // edge along +y, rotated by +90 degrees points along -x
        assert_relative_eq!(lm.heading().abs(), PI, epsilon = 1e-12);

        let reversed = Landmark {
            near: lm.far,
            far: lm.near,
            ..lm
        };
        assert_relative_eq!(reversed.heading(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn solid_and_untyped_landmarks_are_not_reflective() {
        assert!(mirror(1, Some("reflective")).is_reflective());
        assert!(mirror(1, Some("mirror")).is_reflective());
        assert!(!mirror(1, Some("solid")).is_reflective());
        assert!(!mirror(1, None).is_reflective());
    }

    #[test]
    fn set_deduplicates_by_id() {
        let mut set = LandmarkSet::new();
        assert!(set.insert(mirror(7, Some("reflective"))));
        assert!(!set.insert(mirror(7, Some("solid"))));
        assert!(set.insert(mirror(8, Some("reflective"))));
        assert_eq!(set.len(), 2);
        assert!(set.get(7).unwrap().is_reflective());

        let collected: LandmarkSet = vec![mirror(1, None), mirror(1, None)].into_iter().collect();
        assert_eq!(collected.len(), 1);
    }
}
