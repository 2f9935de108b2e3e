//! Declarative styling specs for the overlay layers.

use crate::map::OverlaySlot;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Style layer the route line is inserted beneath, so the line runs under
/// road decorations instead of covering them
pub const ROAD_DECORATION_LAYER: &str = "bridge-oneway-arrows-white";

/// Rendering kind of an overlay layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Line,
    Symbol,
}

/// A widget-facing layer definition: id, backing source, and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: OverlaySlot,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub paint: serde_json::Value,
    pub layout: serde_json::Value,
}

impl LayerSpec {
    fn line(id: &str, source: OverlaySlot, color: &str, width: f64) -> Self {
        Self {
            id: id.to_string(),
            source,
            kind: LayerKind::Line,
            paint: json!({
                "line-color": color,
                "line-width": width,
            }),
            layout: json!({
                "line-join": "round",
                "line-cap": "round",
            }),
        }
    }

    fn symbol(id: &str, source: OverlaySlot, layout: serde_json::Value) -> Self {
        Self {
            id: id.to_string(),
            source,
            kind: LayerKind::Symbol,
            paint: json!({}),
            layout,
        }
    }
}

/// The overlay layers in installation order, each with its insertion hint.
///
/// The route line goes beneath the style's road decorations and its casing
/// beneath the line itself; the origin and geolocation symbols stack under
/// the destination marker.
pub fn overlay_layers() -> Vec<(LayerSpec, Option<&'static str>)> {
    vec![
        (
            LayerSpec::line("route", OverlaySlot::Route, "#2abaf7", 5.5),
            Some(ROAD_DECORATION_LAYER),
        ),
        (
            LayerSpec::line("route-casing", OverlaySlot::Route, "#2779b5", 6.5),
            Some("route"),
        ),
        (
            LayerSpec::symbol(
                "marker",
                OverlaySlot::Marker,
                json!({
                    "icon-image": "pin",
                    "icon-offset": [0, -20],
                }),
            ),
            None,
        ),
        (
            LayerSpec::symbol(
                "fromMarker",
                OverlaySlot::FromMarker,
                json!({ "icon-image": "fromLocation" }),
            ),
            Some("marker"),
        ),
        (
            LayerSpec::symbol(
                "geolocation",
                OverlaySlot::Geolocation,
                json!({ "icon-image": "geolocation" }),
            ),
            Some("fromMarker"),
        ),
    ]
}
