//! The narrow interface to the embedded map widget.
//!
//! The widget's engine (tile rendering, input handling, style evaluation)
//! is an external collaborator; the controller only needs the capability
//! set expressed by [`MapSurface`].

pub mod headless;
pub mod style;

use crate::core::geo::{BBox, LngLat};
use crate::data::geojson::SourceData;
use crate::Result;
use serde::{Deserialize, Serialize};

/// The four named overlay sources the controller keeps in sync.
///
/// Every slot exists for the lifetime of the map and holds either a
/// geometry or the empty sentinel; slots are never added or removed after
/// mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlaySlot {
    /// The fetched route line (directions mode)
    Route,
    /// The primary marker: search result, or directions destination
    Marker,
    /// The directions origin marker
    FromMarker,
    /// The user's geolocation fix
    Geolocation,
}

impl OverlaySlot {
    pub const ALL: [OverlaySlot; 4] = [
        OverlaySlot::Route,
        OverlaySlot::Marker,
        OverlaySlot::FromMarker,
        OverlaySlot::Geolocation,
    ];

    /// Gets the widget-facing source id
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlaySlot::Route => "route",
            OverlaySlot::Marker => "marker",
            OverlaySlot::FromMarker => "fromMarker",
            OverlaySlot::Geolocation => "geolocation",
        }
    }
}

impl std::fmt::Display for OverlaySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a bounds-fitting camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitOptions {
    /// Move along a straight interpolation path instead of a flight curve
    pub linear: bool,
}

impl FitOptions {
    /// Creates options for a linear (non-flight) fit
    pub fn linear() -> Self {
        Self { linear: true }
    }
}

/// Capability set of the embedded map widget.
///
/// Implementations are expected to be cheap to call; the controller issues
/// wholesale source replacements every update cycle rather than diffing
/// individual features.
pub trait MapSurface {
    /// Registers an overlay source with its initial payload
    fn add_source(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()>;

    /// Adds a styled layer, optionally inserted beneath an existing layer id
    fn add_layer(&mut self, spec: style::LayerSpec, before: Option<&str>) -> Result<()>;

    /// Replaces an overlay source's payload wholesale
    fn set_source_data(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()>;

    /// Moves the camera so the given box is fully visible
    fn fit_bounds(&mut self, bbox: BBox, options: FitOptions) -> Result<()>;

    /// Eases the camera to a center and zoom
    fn ease_to(&mut self, center: LngLat, zoom: f64) -> Result<()>;

    /// Gets the current camera center
    fn center(&self) -> LngLat;

    /// Gets the current camera zoom
    fn zoom(&self) -> f64;
}

impl<S: MapSurface + ?Sized> MapSurface for Box<S> {
    fn add_source(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()> {
        (**self).add_source(slot, data)
    }

    fn add_layer(&mut self, spec: style::LayerSpec, before: Option<&str>) -> Result<()> {
        (**self).add_layer(spec, before)
    }

    fn set_source_data(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()> {
        (**self).set_source_data(slot, data)
    }

    fn fit_bounds(&mut self, bbox: BBox, options: FitOptions) -> Result<()> {
        (**self).fit_bounds(bbox, options)
    }

    fn ease_to(&mut self, center: LngLat, zoom: f64) -> Result<()> {
        (**self).ease_to(center, zoom)
    }

    fn center(&self) -> LngLat {
        (**self).center()
    }

    fn zoom(&self) -> f64 {
        (**self).zoom()
    }
}
