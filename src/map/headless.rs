//! An in-memory map surface.
//!
//! `HeadlessMap` implements [`MapSurface`] without a rendering engine: it
//! records sources, layers, and camera moves so hosts can embed the
//! controller in tests, servers, or snapshot tooling.

use crate::core::geo::{BBox, LngLat};
use crate::data::geojson::SourceData;
use crate::map::{style::LayerSpec, FitOptions, MapSurface, OverlaySlot};
use crate::{MapError, Result};
use fxhash::FxHashMap;

/// A camera operation recorded by the headless surface
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    FitBounds { bbox: BBox, options: FitOptions },
    EaseTo { center: LngLat, zoom: f64 },
}

/// Every surface mutation, in call order
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    AddSource(OverlaySlot),
    AddLayer(String),
    SetSourceData(OverlaySlot),
    Camera(CameraCall),
}

pub struct HeadlessMap {
    center: LngLat,
    zoom: f64,
    sources: FxHashMap<OverlaySlot, SourceData>,
    layers: Vec<LayerSpec>,
    camera_log: Vec<CameraCall>,
    ops: Vec<SurfaceOp>,
}

impl HeadlessMap {
    /// Creates a headless surface with an initial camera position
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            sources: FxHashMap::default(),
            layers: Vec::new(),
            camera_log: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Gets the current payload of a slot, if the source was added
    pub fn source(&self, slot: OverlaySlot) -> Option<&SourceData> {
        self.sources.get(&slot)
    }

    /// Gets the installed layer ids in z-order
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|spec| spec.id.as_str()).collect()
    }

    /// Gets every camera move issued so far
    pub fn camera_log(&self) -> &[CameraCall] {
        &self.camera_log
    }

    /// Gets the most recent camera move
    pub fn last_camera(&self) -> Option<&CameraCall> {
        self.camera_log.last()
    }

    /// Gets the full mutation log, in call order
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }
}

impl MapSurface for HeadlessMap {
    fn add_source(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()> {
        if self.sources.contains_key(&slot) {
            return Err(MapError::Source(format!("source '{}' already added", slot)));
        }
        self.sources.insert(slot, data);
        self.ops.push(SurfaceOp::AddSource(slot));
        Ok(())
    }

    fn add_layer(&mut self, spec: LayerSpec, before: Option<&str>) -> Result<()> {
        if self.layers.iter().any(|l| l.id == spec.id) {
            return Err(MapError::Layer(format!("layer '{}' already added", spec.id)));
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(MapError::Source(format!(
                "layer '{}' references missing source '{}'",
                spec.id, spec.source
            )));
        }

        // Insertion hints naming layers of the widget's base style are
        // unknown here; append in that case, like a style without the
        // referenced layer would.
        let index = before
            .and_then(|id| self.layers.iter().position(|l| l.id == id))
            .unwrap_or(self.layers.len());
        self.ops.push(SurfaceOp::AddLayer(spec.id.clone()));
        self.layers.insert(index, spec);
        Ok(())
    }

    fn set_source_data(&mut self, slot: OverlaySlot, data: SourceData) -> Result<()> {
        match self.sources.get_mut(&slot) {
            Some(entry) => {
                *entry = data;
                self.ops.push(SurfaceOp::SetSourceData(slot));
                Ok(())
            }
            None => Err(MapError::Source(format!("source '{}' not added", slot))),
        }
    }

    fn fit_bounds(&mut self, bbox: BBox, options: FitOptions) -> Result<()> {
        if !bbox.is_valid() {
            return Err(MapError::Camera(format!(
                "cannot fit invalid bounds {:?}",
                bbox.to_array()
            )));
        }
        self.center = bbox.center();
        let call = CameraCall::FitBounds { bbox, options };
        self.camera_log.push(call.clone());
        self.ops.push(SurfaceOp::Camera(call));
        Ok(())
    }

    fn ease_to(&mut self, center: LngLat, zoom: f64) -> Result<()> {
        self.center = center;
        self.zoom = zoom;
        let call = CameraCall::EaseTo { center, zoom };
        self.camera_log.push(call.clone());
        self.ops.push(SurfaceOp::Camera(call));
        Ok(())
    }

    fn center(&self) -> LngLat {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
