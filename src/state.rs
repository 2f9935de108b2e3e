//! Read and write interfaces to the surrounding application state.
//!
//! The store itself lives in the host application; the controller reads an
//! [`AppState`] snapshot each update cycle and writes back through
//! [`Action`] messages on a [`StoreLink`].

use crate::core::geo::LngLat;
use crate::data::geojson::{PointFeature, RouteFeature};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// The two mutually exclusive UI modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Search,
    Directions,
}

/// Travel modality requested for directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Walking,
    Cycling,
    Driving,
}

impl Modality {
    /// Gets the directions-API profile name
    pub fn as_profile(&self) -> &'static str {
        match self {
            Modality::Walking => "walking",
            Modality::Cycling => "cycling",
            Modality::Driving => "driving",
        }
    }
}

/// Lifecycle of the most recent route fetch.
///
/// Only `Error` is load-bearing for the controller: it suppresses automatic
/// re-fetching until an endpoint changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Idle,
    Pending,
    Ready,
    Error,
}

/// The two acknowledge-after-processing cycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CycleFlag {
    /// Overlay slots and side effects need reconciling
    NeedsUpdate,
    /// The camera should be re-framed to the current mode's geometry
    NeedsReframe,
}

/// Snapshot of the upstream state the controller reads.
///
/// Owned by the host's store; read-only to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Credential forwarded to the directions API on route requests
    pub credentials: String,
    /// Style id the map widget was initialized with
    pub style: String,
    pub center: LngLat,
    pub zoom: f64,
    pub mode: Mode,
    pub search_location: Option<PointFeature>,
    pub directions_from: Option<PointFeature>,
    pub directions_to: Option<PointFeature>,
    pub route: Option<RouteFeature>,
    pub route_status: RouteStatus,
    pub user_location: Option<LngLat>,
    pub modality: Modality,
    pub needs_update: bool,
    pub needs_reframe: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            credentials: String::new(),
            style: String::new(),
            center: LngLat::default(),
            zoom: 2.0,
            mode: Mode::Search,
            search_location: None,
            directions_from: None,
            directions_to: None,
            route: None,
            route_status: RouteStatus::Idle,
            user_location: None,
            modality: Modality::Walking,
            needs_update: false,
            needs_reframe: false,
        }
    }
}

/// Write operations the controller can dispatch to the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCenter(LngLat),
    SetZoom(f64),
    SetFlag(CycleFlag, bool),
    SetUserLocation(LngLat),
    RequestRoute {
        from: PointFeature,
        to: PointFeature,
        modality: Modality,
        credentials: String,
    },
}

/// Cloneable dispatcher for store actions.
///
/// Sends never block; a closed channel is logged and otherwise ignored so a
/// torn-down host cannot crash the controller mid-callback.
#[derive(Debug, Clone)]
pub struct StoreLink {
    tx: Sender<Action>,
}

impl StoreLink {
    /// Creates a link over an existing sender
    pub fn new(tx: Sender<Action>) -> Self {
        Self { tx }
    }

    /// Creates a link together with the receiving end for the host to drain
    pub fn channel() -> (Self, Receiver<Action>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }

    /// Dispatches an action to the store
    pub fn dispatch(&self, action: Action) {
        if self.tx.send(action).is_err() {
            log::warn!("store channel closed; dropping action");
        }
    }

    pub fn set_center(&self, center: LngLat) {
        self.dispatch(Action::SetCenter(center));
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.dispatch(Action::SetZoom(zoom));
    }

    pub fn set_flag(&self, flag: CycleFlag, value: bool) {
        self.dispatch(Action::SetFlag(flag, value));
    }

    pub fn set_user_location(&self, location: LngLat) {
        self.dispatch(Action::SetUserLocation(location));
    }

    pub fn request_route(
        &self,
        from: PointFeature,
        to: PointFeature,
        modality: Modality,
        credentials: String,
    ) {
        self.dispatch(Action::RequestRoute {
            from,
            to,
            modality,
            credentials,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&Mode::Search).unwrap(), "\"search\"");
        assert_eq!(
            serde_json::to_string(&Mode::Directions).unwrap(),
            "\"directions\""
        );
    }

    #[test]
    fn test_route_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RouteStatus::Error).unwrap(),
            "\"error\""
        );
        let status: RouteStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, RouteStatus::Pending);
    }

    #[test]
    fn test_modality_profiles() {
        assert_eq!(Modality::Walking.as_profile(), "walking");
        assert_eq!(Modality::Cycling.as_profile(), "cycling");
        assert_eq!(Modality::Driving.as_profile(), "driving");
    }

    #[test]
    fn test_store_link_dispatch() {
        let (link, rx) = StoreLink::channel();
        link.set_center(LngLat::new(4.9, 52.37));
        link.set_flag(CycleFlag::NeedsUpdate, false);

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::SetCenter(LngLat::new(4.9, 52.37))
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::SetFlag(CycleFlag::NeedsUpdate, false)
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_after_receiver_dropped_is_silent() {
        let (link, rx) = StoreLink::channel();
        drop(rx);
        // Must not panic
        link.set_zoom(10.0);
    }
}
