//! Prelude module for common wayview types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use wayview::prelude::*;`

pub use crate::controller::ViewController;

pub use crate::core::{
    config::MapOptions,
    framing::{frame_bbox, frame_target, CameraCommand, FrameTarget, FramingError},
    geo::{BBox, LngLat},
};

pub use crate::data::geojson::{
    Feature, GeoJson, Geometry, PointFeature, RouteFeature, SourceData,
};

pub use crate::map::{
    headless::{CameraCall, HeadlessMap, SurfaceOp},
    style::{overlay_layers, LayerKind, LayerSpec},
    FitOptions, MapSurface, OverlaySlot,
};

pub use crate::state::{Action, AppState, CycleFlag, Modality, Mode, RouteStatus, StoreLink};

pub use crate::geolocate::{GeolocationProvider, GeolocationWatcher, Position};

pub use crate::{Error, MapError, Result};
