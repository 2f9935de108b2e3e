use crate::core::geo::{BBox, LngLat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types the overlay sources carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
}

impl Geometry {
    /// Creates a point geometry from a coordinate
    pub fn point(at: LngLat) -> Self {
        Geometry::Point {
            coordinates: at.to_array(),
        }
    }

    /// Creates a line-string geometry from a coordinate sequence
    pub fn line_string(line: impl IntoIterator<Item = LngLat>) -> Self {
        Geometry::LineString {
            coordinates: line.into_iter().map(|c| c.to_array()).collect(),
        }
    }

    /// Gets the tightest bounding box covering the geometry.
    ///
    /// Returns `None` for geometries with no coordinates.
    pub fn bbox(&self) -> Option<BBox> {
        let coords: Vec<LngLat> = match self {
            Geometry::Point { coordinates } => vec![LngLat::from(*coordinates)],
            Geometry::LineString { coordinates } => {
                coordinates.iter().map(|c| LngLat::from(*c)).collect()
            }
        };
        BBox::of_points(&coords)
    }
}

/// GeoJSON feature with geometry and free-form properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection { features: Vec<Feature> },
}

impl GeoJson {
    /// Creates a feature collection with no features
    pub fn empty_collection() -> Self {
        GeoJson::FeatureCollection {
            features: Vec::new(),
        }
    }
}

/// Payload of an overlay source: a geometry, or the explicit empty sentinel.
///
/// The empty sentinel serializes as a feature collection with zero features,
/// so a cleared slot is an ordinary data update rather than a removed source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Geometry(Geometry),
    Empty,
}

impl SourceData {
    /// Creates the empty sentinel
    pub fn empty() -> Self {
        SourceData::Empty
    }

    /// Wraps an optional geometry, mapping `None` to the empty sentinel
    pub fn from_option(geometry: Option<Geometry>) -> Self {
        match geometry {
            Some(g) => SourceData::Geometry(g),
            None => SourceData::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SourceData::Empty)
    }

    /// Gets the carried geometry, if any
    pub fn geometry(&self) -> Option<&Geometry> {
        match self {
            SourceData::Geometry(g) => Some(g),
            SourceData::Empty => None,
        }
    }

    /// Serializes to the wire representation the map widget consumes
    pub fn to_json(&self) -> serde_json::Value {
        let fallback = || {
            serde_json::to_value(GeoJson::empty_collection())
                .unwrap_or(serde_json::Value::Null)
        };
        match self {
            SourceData::Geometry(g) => serde_json::to_value(g).unwrap_or_else(|_| fallback()),
            SourceData::Empty => fallback(),
        }
    }
}

impl From<Geometry> for SourceData {
    fn from(geometry: Geometry) -> Self {
        SourceData::Geometry(geometry)
    }
}

/// A named point of interest, as returned by a geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub point: LngLat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
}

impl PointFeature {
    pub fn new(point: LngLat) -> Self {
        Self {
            point,
            place_name: None,
        }
    }

    pub fn with_place_name(mut self, name: impl Into<String>) -> Self {
        self.place_name = Some(name.into());
        self
    }

    /// Gets the point geometry of the feature
    pub fn geometry(&self) -> Geometry {
        Geometry::point(self.point)
    }
}

/// A fetched route between two endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    pub line: Vec<LngLat>,
    /// Route length in meters, when the directions API reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    /// Travel time in seconds, when the directions API reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
}

impl RouteFeature {
    pub fn new(line: Vec<LngLat>) -> Self {
        Self {
            line,
            distance_m: None,
            duration_s: None,
        }
    }

    /// Gets the line-string geometry of the route
    pub fn geometry(&self) -> Geometry {
        Geometry::line_string(self.line.iter().copied())
    }

    /// Gets the bounding box of the route, `None` for an empty line
    pub fn bbox(&self) -> Option<BBox> {
        BBox::of_points(&self.line)
    }
}
