//! # wayview
//!
//! A state-driven view controller for interactive maps.
//!
//! This library keeps a map surface's overlay sources and camera consistent
//! with application state (search location, directions endpoints, fetched
//! route, user geolocation) and triggers route-fetch side effects. The map
//! widget itself, the state store, and the directions API are external
//! collaborators reached through narrow interfaces: [`MapSurface`],
//! [`StoreLink`], and [`GeolocationProvider`].

pub mod controller;
pub mod core;
pub mod data;
pub mod geolocate;
pub mod map;
pub mod prelude;
pub mod state;

// Re-export public API
pub use crate::core::{
    config::MapOptions,
    framing::{frame_bbox, frame_target, CameraCommand, FrameTarget, FramingError},
    geo::{BBox, LngLat},
};

pub use crate::data::geojson::{
    Feature, GeoJson, Geometry, PointFeature, RouteFeature, SourceData,
};

pub use crate::map::{
    headless::HeadlessMap,
    style::{overlay_layers, LayerKind, LayerSpec},
    FitOptions, MapSurface, OverlaySlot,
};

pub use crate::state::{Action, AppState, CycleFlag, Modality, Mode, RouteStatus, StoreLink};

pub use crate::controller::ViewController;

pub use crate::geolocate::{GeolocationProvider, GeolocationWatcher, Position};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Store channel closed")]
    StoreClosed,
}

/// Error type alias for convenience
pub type Error = MapError;
