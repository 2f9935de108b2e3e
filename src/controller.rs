//! The viewport controller.
//!
//! `ViewController` is the single writer of the map surface: it reconciles
//! overlay slots with the current [`AppState`] snapshot, decides where the
//! camera should point, requests route fetches when directions are
//! incomplete, and forwards widget callbacks (camera moves, geolocation
//! fixes) back to the store.

use crate::core::config::MapOptions;
use crate::core::framing::{frame_target, CameraCommand, FrameTarget};
use crate::core::geo::{BBox, LngLat};
use crate::data::geojson::{Geometry, SourceData};
use crate::geolocate::{GeolocationProvider, GeolocationWatcher, Position};
use crate::map::{style::overlay_layers, FitOptions, MapSurface, OverlaySlot};
use crate::state::{AppState, CycleFlag, Mode, RouteStatus, StoreLink};
use crate::Result;
use crossbeam_channel::Receiver;
use std::sync::Arc;

/// Slot assignments for one update cycle, keyed by mode.
///
/// Each view owns exactly the slots its mode renders; applying a plan
/// writes those slots and explicitly empties every other mode-owned slot,
/// so a stale marker cannot survive a mode switch. The geolocation slot is
/// mode-independent and never part of a plan.
#[derive(Debug, Clone, PartialEq)]
enum OverlayPlan {
    SearchView {
        marker: SourceData,
    },
    DirectionsView {
        from_marker: SourceData,
        marker: SourceData,
        route: SourceData,
    },
}

impl OverlayPlan {
    fn for_state(state: &AppState) -> Self {
        match state.mode {
            Mode::Search => OverlayPlan::SearchView {
                marker: SourceData::from_option(
                    state.search_location.as_ref().map(|f| f.geometry()),
                ),
            },
            Mode::Directions => OverlayPlan::DirectionsView {
                from_marker: SourceData::from_option(
                    state.directions_from.as_ref().map(|f| f.geometry()),
                ),
                marker: SourceData::from_option(
                    state.directions_to.as_ref().map(|f| f.geometry()),
                ),
                route: SourceData::from_option(state.route.as_ref().map(|r| r.geometry())),
            },
        }
    }

    /// The slot writes for this plan, covering every mode-owned slot
    fn writes(self) -> [(OverlaySlot, SourceData); 3] {
        match self {
            OverlayPlan::SearchView { marker } => [
                (OverlaySlot::Marker, marker),
                (OverlaySlot::FromMarker, SourceData::empty()),
                (OverlaySlot::Route, SourceData::empty()),
            ],
            OverlayPlan::DirectionsView {
                from_marker,
                marker,
                route,
            } => [
                (OverlaySlot::FromMarker, from_marker),
                (OverlaySlot::Marker, marker),
                (OverlaySlot::Route, route),
            ],
        }
    }
}

/// Owns the map surface and keeps it consistent with application state.
///
/// The controller is single-threaded: every method takes `&mut self` and
/// runs to completion on the host's execution context. Background
/// geolocation fixes arrive over a channel and are applied by
/// [`pump_geolocation`](Self::pump_geolocation) on that same context.
pub struct ViewController<S: MapSurface> {
    surface: S,
    store: StoreLink,
    options: MapOptions,
    provider: Option<Arc<dyn GeolocationProvider>>,
    watcher: Option<GeolocationWatcher>,
    fixes: Option<Receiver<Position>>,
    awaiting_first_fix: bool,
}

impl<S: MapSurface> ViewController<S> {
    /// Creates a controller owning the given surface
    pub fn new(surface: S, store: StoreLink) -> Self {
        Self {
            surface,
            store,
            options: MapOptions::default(),
            provider: None,
            watcher: None,
            fixes: None,
            awaiting_first_fix: false,
        }
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a geolocation capability; without one, every geolocation
    /// path is silently skipped
    pub fn with_geolocation(mut self, provider: Arc<dyn GeolocationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Installs the overlay sources and layers and starts the geolocation
    /// watcher.
    ///
    /// Every overlay slot starts out holding the empty sentinel. When the
    /// store already carries a user location it is displayed and eased to
    /// immediately; otherwise the watcher's first fix plays that role.
    /// Must run inside a tokio runtime when a geolocation provider is
    /// attached.
    pub fn mount(&mut self, state: &AppState) -> Result<()> {
        for slot in OverlaySlot::ALL {
            self.surface.add_source(slot, SourceData::empty())?;
        }
        for (spec, before) in overlay_layers() {
            self.surface.add_layer(spec, before)?;
        }

        if let Some(location) = state.user_location {
            self.surface
                .set_source_data(OverlaySlot::Geolocation, Geometry::point(location).into())?;
            self.move_to(FrameTarget::Point(
                location,
                Some(self.options.geolocate_zoom),
            ));
        } else if self.provider.is_some() {
            self.awaiting_first_fix = true;
        }

        if let Some(provider) = &self.provider {
            let (watcher, fixes) =
                GeolocationWatcher::spawn(provider.clone(), self.options.poll_interval);
            self.watcher = Some(watcher);
            self.fixes = Some(fixes);
        }
        Ok(())
    }

    /// Runs one update cycle against the given state snapshot.
    ///
    /// No-op unless the `needs_update` flag is set. Slot writes happen
    /// before the reframe decision, and both cycle flags are acknowledged
    /// back to the store after processing.
    pub fn apply(&mut self, state: &AppState) -> Result<()> {
        if !state.needs_update {
            return Ok(());
        }

        for (slot, data) in OverlayPlan::for_state(state).writes() {
            self.surface.set_source_data(slot, data)?;
        }

        if state.mode == Mode::Directions {
            self.maybe_request_route(state);
        }

        if state.needs_reframe {
            self.reframe(state);
        }

        self.store.set_flag(CycleFlag::NeedsUpdate, false);
        self.store.set_flag(CycleFlag::NeedsReframe, false);
        Ok(())
    }

    /// Camera-move-end callback: writes the new center and zoom back to
    /// the store
    pub fn on_move_end(&mut self, center: LngLat, zoom: f64) {
        self.store.set_center(center);
        self.store.set_zoom(zoom);
    }

    /// Explicit geolocate event (the widget's geolocate control): shows
    /// the fix, stores it, and eases the camera to it
    pub fn on_geolocate(&mut self, position: Position) -> Result<()> {
        self.awaiting_first_fix = false;
        self.apply_fix(position, true)
    }

    /// Drains pending background fixes, returning how many were applied.
    ///
    /// Poll fixes update the geolocation slot and the store but leave the
    /// camera alone; only the first fix after a mount without a stored
    /// user location eases, standing in for the initial position read.
    pub fn pump_geolocation(&mut self) -> Result<usize> {
        let Some(fixes) = &self.fixes else {
            return Ok(0);
        };

        let pending: Vec<Position> = fixes.try_iter().collect();
        let mut applied = 0;
        for position in pending {
            let ease = self.awaiting_first_fix;
            self.awaiting_first_fix = false;
            self.apply_fix(position, ease)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Stops the geolocation watcher and releases the surface
    pub fn teardown(mut self) -> S {
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
        }
        self.fixes = None;
        self.surface
    }

    fn apply_fix(&mut self, position: Position, ease: bool) -> Result<()> {
        let coord = position.lng_lat();
        self.surface
            .set_source_data(OverlaySlot::Geolocation, Geometry::point(coord).into())?;
        self.store.set_user_location(coord);
        if ease {
            self.move_to(FrameTarget::Point(coord, Some(self.options.geolocate_zoom)));
        }
        Ok(())
    }

    fn maybe_request_route(&mut self, state: &AppState) {
        let (Some(from), Some(to)) = (&state.directions_from, &state.directions_to) else {
            return;
        };
        if state.route.is_some() {
            return;
        }
        // A failed fetch is not retried until an endpoint changes, which
        // resets the status upstream.
        if state.route_status == RouteStatus::Error {
            log::debug!("route fetch suppressed after error");
            return;
        }

        log::debug!(
            "requesting {} route from ({}, {}) to ({}, {})",
            state.modality.as_profile(),
            from.point.lng,
            from.point.lat,
            to.point.lng,
            to.point.lat
        );
        self.store.request_route(
            from.clone(),
            to.clone(),
            state.modality,
            state.credentials.clone(),
        );
    }

    fn reframe(&mut self, state: &AppState) {
        match state.mode {
            Mode::Search => {
                if let Some(location) = &state.search_location {
                    self.move_to(FrameTarget::Point(location.point, None));
                }
            }
            Mode::Directions => {
                if let Some(bbox) = state.route.as_ref().and_then(|r| r.bbox()) {
                    self.move_to(FrameTarget::Bounds(bbox));
                } else if let (Some(from), Some(to)) =
                    (&state.directions_from, &state.directions_to)
                {
                    if let Some(bbox) = BBox::of_points(&[from.point, to.point]) {
                        self.move_to(FrameTarget::Bounds(bbox));
                    }
                } else {
                    // At most one endpoint exists here; both commands are
                    // issued and the last one wins.
                    if let Some(to) = &state.directions_to {
                        self.move_to(FrameTarget::Point(to.point, None));
                    }
                    if let Some(from) = &state.directions_from {
                        self.move_to(FrameTarget::Point(from.point, None));
                    }
                }
            }
        }
    }

    /// Executes the camera command for a frame target. A framed fit the
    /// surface rejects is retried with the raw, unpadded box.
    fn move_to(&mut self, target: FrameTarget) {
        match frame_target(&target, self.options.ease_zoom) {
            CameraCommand::EaseTo { center, zoom } => {
                if let Err(err) = self.surface.ease_to(center, zoom) {
                    log::warn!("ease to ({}, {}) failed: {}", center.lng, center.lat, err);
                }
            }
            CameraCommand::FitBounds { bbox, linear } => {
                let options = FitOptions { linear };
                if let Err(err) = self.surface.fit_bounds(bbox, options) {
                    log::warn!("framed fit failed ({}), fitting raw bounds", err);
                    if let FrameTarget::Bounds(raw) = target {
                        if let Err(err) = self.surface.fit_bounds(raw, options) {
                            log::warn!("bounds fit failed: {}", err);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::PointFeature;

    fn search_state(location: Option<PointFeature>) -> AppState {
        AppState {
            mode: Mode::Search,
            search_location: location,
            needs_update: true,
            ..AppState::default()
        }
    }

    #[test]
    fn test_search_plan_owns_marker_only() {
        let state = search_state(Some(PointFeature::new(LngLat::new(2.35, 48.86))));
        let plan = OverlayPlan::for_state(&state);

        let writes = plan.writes();
        assert_eq!(writes[0].0, OverlaySlot::Marker);
        assert!(!writes[0].1.is_empty());
        assert_eq!(writes[1], (OverlaySlot::FromMarker, SourceData::empty()));
        assert_eq!(writes[2], (OverlaySlot::Route, SourceData::empty()));
    }

    #[test]
    fn test_search_plan_without_location_is_all_empty() {
        let plan = OverlayPlan::for_state(&search_state(None));
        assert!(plan.writes().iter().all(|(_, data)| data.is_empty()));
    }

    #[test]
    fn test_directions_plan_fills_available_slots() {
        let state = AppState {
            mode: Mode::Directions,
            directions_from: Some(PointFeature::new(LngLat::new(-122.42, 37.77))),
            directions_to: None,
            needs_update: true,
            ..AppState::default()
        };

        let writes = OverlayPlan::for_state(&state).writes();
        assert_eq!(writes[0].0, OverlaySlot::FromMarker);
        assert!(!writes[0].1.is_empty());
        assert!(writes[1].1.is_empty());
        assert!(writes[2].1.is_empty());
    }

    #[test]
    fn test_geolocation_slot_never_in_plan() {
        for mode in [Mode::Search, Mode::Directions] {
            let state = AppState {
                mode,
                needs_update: true,
                ..AppState::default()
            };
            let writes = OverlayPlan::for_state(&state).writes();
            assert!(writes
                .iter()
                .all(|(slot, _)| *slot != OverlaySlot::Geolocation));
        }
    }
}
