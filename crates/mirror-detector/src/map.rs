//! Vector map and route ingestion.
//!
//! A [`VectorMap`] is the serialized form: lanelets reference regulatory
//! elements, and traffic-mirror regulatory elements reference the line
//! strings that outline each mirror. [`LaneletMap`] indexes it, drops
//! references to missing primitives with a warning, and derives
//! [`LandmarkSet`]s for the whole map or for the lanelets of a
//! [`LaneletRoute`].

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use mirror_core::{Pt3, Real};
use serde::{Deserialize, Serialize};

use crate::{Landmark, LandmarkId, LandmarkSet, MapError};

pub const HEIGHT_ATTRIBUTE: &str = "height";
pub const SUBTYPE_ATTRIBUTE: &str = "subtype";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineString3d {
    pub id: LandmarkId,
    pub points: Vec<Pt3>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl LineString3d {
    /// Convert to a landmark. Needs at least one point; a missing or
    /// unparsable `height` counts as 0.
    pub fn to_landmark(&self) -> Option<Landmark> {
        let near = *self.points.first()?;
        let far = *self.points.last()?;
        let height = self
            .attributes
            .get(HEIGHT_ATTRIBUTE)
            .and_then(|h| h.trim().parse::<Real>().ok())
            .unwrap_or(0.0);
        Some(Landmark {
            id: self.id,
            near,
            far,
            height,
            subtype: self.attributes.get(SUBTYPE_ATTRIBUTE).cloned(),
        })
    }
}

/// Regulatory element grouping the mirrors that serve a lanelet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryElement {
    pub id: u64,
    /// Line string ids of the mirror outlines.
    #[serde(default)]
    pub traffic_mirrors: Vec<LandmarkId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lanelet {
    pub id: u64,
    #[serde(default)]
    pub regulatory_elements: Vec<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorMap {
    #[serde(default)]
    pub lanelets: Vec<Lanelet>,
    #[serde(default)]
    pub regulatory_elements: Vec<RegulatoryElement>,
    #[serde(default)]
    pub line_strings: Vec<LineString3d>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneletPrimitive {
    pub id: u64,
    #[serde(default)]
    pub primitive_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneletSegment {
    #[serde(default)]
    pub primitives: Vec<LaneletPrimitive>,
}

/// Planned route as a sequence of lanelet segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneletRoute {
    #[serde(default)]
    pub segments: Vec<LaneletSegment>,
}

impl LaneletRoute {
    pub fn primitive_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.primitives.iter().map(|p| p.id))
    }
}

/// Indexed, reference-checked vector map.
#[derive(Clone, Debug, Default)]
pub struct LaneletMap {
    lanelets: HashMap<u64, Lanelet>,
    lanelet_order: Vec<u64>,
    regulatory_elements: HashMap<u64, RegulatoryElement>,
    line_strings: HashMap<LandmarkId, LineString3d>,
}

impl LaneletMap {
    pub fn from_vector_map(map: VectorMap) -> Result<Self, MapError> {
        let mut line_strings = HashMap::with_capacity(map.line_strings.len());
        for ls in map.line_strings {
            let id = ls.id;
            if line_strings.insert(id, ls).is_some() {
                return Err(MapError::DuplicateId {
                    kind: "line string",
                    id,
                });
            }
        }

        let mut regulatory_elements = HashMap::with_capacity(map.regulatory_elements.len());
        for mut element in map.regulatory_elements {
            let element_id = element.id;
            element.traffic_mirrors.retain(|ls| {
                let found = line_strings.contains_key(ls);
                if !found {
                    warn!(
                        "line string {ls} referenced by regulatory element {element_id} not found in map, skipped"
                    );
                }
                found
            });
            if regulatory_elements.insert(element_id, element).is_some() {
                return Err(MapError::DuplicateId {
                    kind: "regulatory element",
                    id: element_id,
                });
            }
        }

        let mut lanelets = HashMap::with_capacity(map.lanelets.len());
        let mut lanelet_order = Vec::with_capacity(map.lanelets.len());
        for mut lanelet in map.lanelets {
            let lanelet_id = lanelet.id;
            lanelet.regulatory_elements.retain(|element| {
                let found = regulatory_elements.contains_key(element);
                if !found {
                    warn!(
                        "regulatory element {element} referenced by lanelet {lanelet_id} not found in map, skipped"
                    );
                }
                found
            });
            if lanelets.insert(lanelet_id, lanelet).is_some() {
                return Err(MapError::DuplicateId {
                    kind: "lanelet",
                    id: lanelet_id,
                });
            }
            lanelet_order.push(lanelet_id);
        }

        Ok(Self {
            lanelets,
            lanelet_order,
            regulatory_elements,
            line_strings,
        })
    }

    pub fn num_lanelets(&self) -> usize {
        self.lanelets.len()
    }

    pub fn lanelet(&self, id: u64) -> Result<&Lanelet, MapError> {
        self.lanelets.get(&id).ok_or(MapError::NoSuchLanelet(id))
    }

    /// Traffic mirrors referenced by any lanelet of the map.
    pub fn all_traffic_mirrors(&self) -> LandmarkSet {
        self.traffic_mirrors(self.lanelet_order.iter().filter_map(|id| self.lanelets.get(id)))
    }

    /// Traffic mirrors referenced by the lanelets of a route.
    ///
    /// Fails on the first primitive id that is not a lanelet of this map.
    pub fn route_traffic_mirrors(&self, route: &LaneletRoute) -> Result<LandmarkSet, MapError> {
        let route_lanelets = route
            .primitive_ids()
            .map(|id| self.lanelet(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.traffic_mirrors(route_lanelets.into_iter()))
    }

    fn traffic_mirrors<'a>(&'a self, lanelets: impl Iterator<Item = &'a Lanelet>) -> LandmarkSet {
        let mut set = LandmarkSet::new();
        for lanelet in lanelets {
            let elements = lanelet
                .regulatory_elements
                .iter()
                .filter_map(|id| self.regulatory_elements.get(id));
            for element in elements {
                for ls in element
                    .traffic_mirrors
                    .iter()
                    .filter_map(|id| self.line_strings.get(id))
                {
                    match ls.to_landmark() {
                        Some(landmark) => {
                            set.insert(landmark);
                        }
                        None => debug!("line string {} has no points, skipped", ls.id),
                    }
                }
            }
        }
        set
    }
}

#[cfg(test)]
pub(crate) mod test_maps {
    use super::*;

    pub fn line_string(id: LandmarkId, near: Pt3, far: Pt3, subtype: &str) -> LineString3d {
        LineString3d {
            id,
            points: vec![near, far],
            attributes: BTreeMap::from([
                (HEIGHT_ATTRIBUTE.to_string(), "1.0".to_string()),
                (SUBTYPE_ATTRIBUTE.to_string(), subtype.to_string()),
            ]),
        }
    }

    /// Two lanelets, each with one regulatory element and one mirror.
    /// Lanelet 10 → element 100 → mirror 1000; lanelet 11 → element 101 → mirror 1001.
    pub fn two_lane_map() -> VectorMap {
        VectorMap {
            lanelets: vec![
                Lanelet {
                    id: 10,
                    regulatory_elements: vec![100],
                },
                Lanelet {
                    id: 11,
                    regulatory_elements: vec![101],
                },
            ],
            regulatory_elements: vec![
                RegulatoryElement {
                    id: 100,
                    traffic_mirrors: vec![1000],
                },
                RegulatoryElement {
                    id: 101,
                    traffic_mirrors: vec![1001],
                },
            ],
            line_strings: vec![
                line_string(
                    1000,
                    Pt3::new(10.0, 2.0, 0.0),
                    Pt3::new(10.0, 0.0, 0.0),
                    "reflective",
                ),
                line_string(
                    1001,
                    Pt3::new(30.0, 2.0, 0.0),
                    Pt3::new(30.0, 0.0, 0.0),
                    "reflective",
                ),
            ],
        }
    }

    pub fn route(ids: &[u64]) -> LaneletRoute {
        LaneletRoute {
            segments: ids
                .iter()
                .map(|&id| LaneletSegment {
                    primitives: vec![LaneletPrimitive {
                        id,
                        primitive_type: "lane".to_string(),
                    }],
                })
                .collect(),
        }
    }
}
