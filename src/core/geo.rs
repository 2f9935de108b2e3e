use geo::HaversineDistance;
use serde::{Deserialize, Serialize};

/// Longitude limits of the coordinate space
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Latitude limits of the coordinate space
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Represents a geographical coordinate, longitude first to match GeoJSON
/// ordering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    /// Creates a new LngLat coordinate
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && self.lng >= MIN_LNG
            && self.lng <= MAX_LNG
            && self.lat >= MIN_LAT
            && self.lat <= MAX_LAT
    }

    /// Calculates the great-circle distance to another coordinate, in
    /// kilometers
    pub fn distance_km(&self, other: &LngLat) -> f64 {
        let a = geo_types::Point::new(self.lng, self.lat);
        let b = geo_types::Point::new(other.lng, other.lat);
        a.haversine_distance(&b) / 1000.0
    }

    /// Gets the coordinate as a `[lng, lat]` pair
    pub fn to_array(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl Default for LngLat {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LngLat> for geo_types::Point<f64> {
    fn from(c: LngLat) -> Self {
        geo_types::Point::new(c.lng, c.lat)
    }
}

/// An axis-aligned bounding box in geographical coordinates,
/// `[min_lng, min_lat, max_lng, max_lat]`
///
/// Always derived from geometry, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BBox {
    /// Creates a bounding box from individual coordinates
    pub fn from_coords(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    /// Creates the tightest bounding box covering all given points.
    ///
    /// Returns `None` for an empty slice.
    pub fn of_points(points: &[LngLat]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::from_coords(first.lng, first.lat, first.lng, first.lat);
        for p in &points[1..] {
            bbox.extend(p);
        }
        Some(bbox)
    }

    /// Extends the bounding box to include a point
    pub fn extend(&mut self, point: &LngLat) {
        self.min_lng = self.min_lng.min(point.lng);
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lng = self.max_lng.max(point.lng);
        self.max_lat = self.max_lat.max(point.lat);
    }

    /// Gets the south-west corner
    pub fn south_west(&self) -> LngLat {
        LngLat::new(self.min_lng, self.min_lat)
    }

    /// Gets the north-east corner
    pub fn north_east(&self) -> LngLat {
        LngLat::new(self.max_lng, self.max_lat)
    }

    /// Gets the center point of the bounding box
    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Great-circle distance between the two opposite corners, in kilometers
    pub fn diagonal_km(&self) -> f64 {
        self.south_west().distance_km(&self.north_east())
    }

    /// Checks if the box contains a point
    pub fn contains(&self, point: &LngLat) -> bool {
        point.lng >= self.min_lng
            && point.lng <= self.max_lng
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }

    /// Checks if the box fully contains another box
    pub fn contains_bbox(&self, other: &BBox) -> bool {
        self.contains(&other.south_west()) && self.contains(&other.north_east())
    }

    /// Checks that corners are ordered, finite, and within coordinate limits
    pub fn is_valid(&self) -> bool {
        self.south_west().is_valid()
            && self.north_east().is_valid()
            && self.min_lng <= self.max_lng
            && self.min_lat <= self.max_lat
    }

    /// Converts to a `geo_types` rectangle
    pub fn to_rect(&self) -> geo_types::Rect<f64> {
        geo_types::Rect::new(
            geo_types::coord! { x: self.min_lng, y: self.min_lat },
            geo_types::coord! { x: self.max_lng, y: self.max_lat },
        )
    }

    /// Converts to a `geo_types` polygon covering the box
    pub fn to_polygon(&self) -> geo_types::Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// Gets the box as a `[min_lng, min_lat, max_lng, max_lat]` quadruple
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lng, self.min_lat, self.max_lng, self.max_lat]
    }
}

impl From<geo_types::Rect<f64>> for BBox {
    fn from(rect: geo_types::Rect<f64>) -> Self {
        Self::from_coords(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lng_lat_creation() {
        let coord = LngLat::new(-74.0060, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_lng_lat_invalid() {
        assert!(!LngLat::new(-200.0, 10.0).is_valid());
        assert!(!LngLat::new(10.0, 95.0).is_valid());
        assert!(!LngLat::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_nyc_la() {
        let nyc = LngLat::new(-74.0060, 40.7128);
        let la = LngLat::new(-118.2437, 34.0522);
        let distance = nyc.distance_km(&la);

        // Distance should be approximately 3944 km
        assert!((distance - 3944.0).abs() < 10.0);
    }

    #[test]
    fn test_bbox_of_points() {
        let bbox = BBox::of_points(&[
            LngLat::new(-122.42, 37.77),
            LngLat::new(-122.41, 37.78),
        ])
        .unwrap();

        assert_eq!(bbox.min_lng, -122.42);
        assert_eq!(bbox.max_lat, 37.78);
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_bbox_of_points_empty() {
        assert!(BBox::of_points(&[]).is_none());
    }

    #[test]
    fn test_bbox_contains() {
        let bbox = BBox::from_coords(-75.0, 40.0, -73.0, 41.0);
        assert!(bbox.contains(&LngLat::new(-74.0, 40.5)));
        assert!(!bbox.contains(&LngLat::new(-74.0, 42.0)));

        let inner = BBox::from_coords(-74.5, 40.2, -73.5, 40.8);
        assert!(bbox.contains_bbox(&inner));
        assert!(!inner.contains_bbox(&bbox));
    }

    #[test]
    fn test_bbox_center_and_diagonal() {
        let bbox = BBox::from_coords(0.0, 0.0, 2.0, 2.0);
        assert_eq!(bbox.center(), LngLat::new(1.0, 1.0));
        assert!(bbox.diagonal_km() > 0.0);

        let point_box = BBox::from_coords(5.0, 5.0, 5.0, 5.0);
        assert_eq!(point_box.diagonal_km(), 0.0);
    }
}
