//! Controller tuning options.

use std::time::Duration;

/// Options governing camera behavior and the geolocation poll cadence.
///
/// The zoom bounds are the values a host should pass to the map widget at
/// initialization; the ease zooms are the levels used when the camera moves
/// to a single point rather than fitting a box.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Minimum zoom level for the map widget
    pub min_zoom: f64,
    /// Maximum zoom level for the map widget
    pub max_zoom: f64,
    /// Zoom level used when easing to a point without an explicit zoom
    pub ease_zoom: f64,
    /// Zoom level used when easing to a geolocation fix
    pub geolocate_zoom: f64,
    /// Interval between background geolocation polls
    pub poll_interval: Duration,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            min_zoom: 2.0,
            max_zoom: 21.0,
            ease_zoom: 16.0,
            geolocate_zoom: 13.0,
            poll_interval: Duration::from_secs(10),
        }
    }
}

impl MapOptions {
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_ease_zoom(mut self, zoom: f64) -> Self {
        self.ease_zoom = zoom;
        self
    }

    pub fn with_geolocate_zoom(mut self, zoom: f64) -> Self {
        self.geolocate_zoom = zoom;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MapOptions::default();
        assert_eq!(options.min_zoom, 2.0);
        assert_eq!(options.max_zoom, 21.0);
        assert_eq!(options.ease_zoom, 16.0);
        assert_eq!(options.geolocate_zoom, 13.0);
        assert_eq!(options.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_methods() {
        let options = MapOptions::default()
            .with_zoom_limits(1.0, 18.0)
            .with_poll_interval(Duration::from_secs(30));
        assert_eq!(options.min_zoom, 1.0);
        assert_eq!(options.max_zoom, 18.0);
        assert_eq!(options.poll_interval, Duration::from_secs(30));
    }
}
