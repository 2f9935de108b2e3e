//! Bounding-box framing for "fit to view" camera moves.
//!
//! A bare fit produces a box exactly tangent to the target geometry. Framing
//! pads the box by half its own diagonal before fitting, which gives
//! scale-invariant margins: two nearby points get a small margin, a
//! continental route gets a large one, with no fixed-pixel constant.

use crate::core::geo::{BBox, LngLat};
use geo::BoundingRect;
use geo_types::{coord, Rect};

/// Kilometers covered by one degree of latitude
const KM_PER_DEGREE_LAT: f64 = 110.574;

/// Kilometers covered by one degree of longitude at the equator
const KM_PER_DEGREE_LNG: f64 = 111.320;

/// Errors from the framing computation.
///
/// Callers are expected to fall back to fitting the raw, unpadded box;
/// framing failure is never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    /// The input box has no diagonal to derive a padding from, or its
    /// corners are inverted or out of range
    #[error("degenerate bounding box")]
    DegenerateBounds,

    /// Padding pushed the box outside the representable coordinate space
    #[error("padded box leaves the coordinate space")]
    Unrepresentable,
}

/// What the camera should frame: a bounding box, or a bare point with an
/// optional zoom override
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTarget {
    Bounds(BBox),
    Point(LngLat, Option<f64>),
}

/// A camera move realizing a frame target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    FitBounds { bbox: BBox, linear: bool },
    EaseTo { center: LngLat, zoom: f64 },
}

/// Maps a frame target to the camera command that realizes it.
///
/// Bounds are fitted padded, falling back to the raw box when the framing
/// math rejects it; a point is eased to at its zoom override or
/// `ease_zoom`. Bounds fits are linear so a re-pan does not fly.
pub fn frame_target(target: &FrameTarget, ease_zoom: f64) -> CameraCommand {
    match target {
        FrameTarget::Bounds(bbox) => {
            let fitted = match frame_bbox(bbox) {
                Ok(framed) => framed,
                Err(err) => {
                    log::debug!("framing unavailable ({}), fitting raw bounds", err);
                    *bbox
                }
            };
            CameraCommand::FitBounds {
                bbox: fitted,
                linear: true,
            }
        }
        FrameTarget::Point(center, zoom) => CameraCommand::EaseTo {
            center: *center,
            zoom: zoom.unwrap_or(ease_zoom),
        },
    }
}

/// Computes the padded bounding box for a framed "fit to view".
///
/// The padding distance is half the great-circle diagonal of the input box.
/// The box polygon is buffered outward by that distance and the bounding
/// rectangle of the buffered polygon is the framed box.
pub fn frame_bbox(bbox: &BBox) -> Result<BBox, FramingError> {
    if !bbox.is_valid() {
        return Err(FramingError::DegenerateBounds);
    }

    let diagonal = bbox.diagonal_km();
    if !(diagonal > 0.0) {
        return Err(FramingError::DegenerateBounds);
    }

    let buffered = buffer_polygon(bbox, diagonal / 2.0)?;
    let framed: BBox = buffered
        .bounding_rect()
        .ok_or(FramingError::Unrepresentable)?
        .into();

    if !framed.is_valid() {
        return Err(FramingError::Unrepresentable);
    }
    Ok(framed)
}

/// Buffers the box polygon outward by `km` kilometers.
///
/// The kilometer distance is converted to degree offsets at the latitude of
/// the box center; longitude degrees shrink with the cosine of the latitude,
/// which becomes unrepresentable at the poles.
fn buffer_polygon(bbox: &BBox, km: f64) -> Result<geo_types::Polygon<f64>, FramingError> {
    let cos_lat = bbox.center().lat.to_radians().cos();
    if cos_lat <= f64::EPSILON {
        return Err(FramingError::Unrepresentable);
    }

    let pad_lat = km / KM_PER_DEGREE_LAT;
    let pad_lng = km / (KM_PER_DEGREE_LNG * cos_lat);
    if !pad_lat.is_finite() || !pad_lng.is_finite() {
        return Err(FramingError::Unrepresentable);
    }

    let rect = Rect::new(
        coord! { x: bbox.min_lng - pad_lng, y: bbox.min_lat - pad_lat },
        coord! { x: bbox.max_lng + pad_lng, y: bbox.max_lat + pad_lat },
    );
    Ok(rect.to_polygon())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margins(outer: &BBox, inner: &BBox) -> [f64; 4] {
        [
            inner.min_lng - outer.min_lng,
            inner.min_lat - outer.min_lat,
            outer.max_lng - inner.max_lng,
            outer.max_lat - inner.max_lat,
        ]
    }

    #[test]
    fn test_framed_box_contains_original() {
        let bbox = BBox::from_coords(-122.42, 37.77, -122.41, 37.78);
        let framed = frame_bbox(&bbox).unwrap();

        assert!(framed.contains_bbox(&bbox));
        for margin in margins(&framed, &bbox) {
            assert!(margin > 0.0, "expected positive margin, got {}", margin);
        }
    }

    #[test]
    fn test_margin_scales_with_box() {
        let small = BBox::from_coords(4.89, 52.36, 4.91, 52.38);
        let large = BBox::from_coords(-5.0, 45.0, 9.0, 53.0);

        let small_margin = margins(&frame_bbox(&small).unwrap(), &small)[0];
        let large_margin = margins(&frame_bbox(&large).unwrap(), &large)[0];

        assert!(large_margin > small_margin * 100.0);
    }

    #[test]
    fn test_zero_width_box_still_framed_on_all_sides() {
        // Two stacked points: no longitude extent, non-zero diagonal
        let bbox = BBox::from_coords(13.40, 52.50, 13.40, 52.52);
        let framed = frame_bbox(&bbox).unwrap();

        let m = margins(&framed, &bbox);
        assert!(m.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let bbox = BBox::from_coords(4.895, 52.370, 4.895, 52.370);
        assert_eq!(frame_bbox(&bbox), Err(FramingError::DegenerateBounds));
    }

    #[test]
    fn test_inverted_box_is_degenerate() {
        let bbox = BBox::from_coords(10.0, 10.0, 5.0, 5.0);
        assert_eq!(frame_bbox(&bbox), Err(FramingError::DegenerateBounds));
    }

    #[test]
    fn test_non_finite_box_is_degenerate() {
        let bbox = BBox::from_coords(f64::NAN, 0.0, 1.0, 1.0);
        assert_eq!(frame_bbox(&bbox), Err(FramingError::DegenerateBounds));
    }

    #[test]
    fn test_polar_box_is_unrepresentable() {
        let bbox = BBox::from_coords(-30.0, 88.0, 30.0, 90.0);
        assert!(frame_bbox(&bbox).is_err());
    }

    #[test]
    fn test_frame_target_point_uses_default_zoom() {
        let target = FrameTarget::Point(LngLat::new(2.35, 48.86), None);
        assert_eq!(
            frame_target(&target, 16.0),
            CameraCommand::EaseTo {
                center: LngLat::new(2.35, 48.86),
                zoom: 16.0
            }
        );
    }

    #[test]
    fn test_frame_target_point_zoom_override_wins() {
        let target = FrameTarget::Point(LngLat::new(4.895, 52.370), Some(13.0));
        assert_eq!(
            frame_target(&target, 16.0),
            CameraCommand::EaseTo {
                center: LngLat::new(4.895, 52.370),
                zoom: 13.0
            }
        );
    }

    #[test]
    fn test_frame_target_bounds_fits_padded() {
        let bbox = BBox::from_coords(-122.42, 37.77, -122.41, 37.78);
        match frame_target(&FrameTarget::Bounds(bbox), 16.0) {
            CameraCommand::FitBounds {
                bbox: fitted,
                linear,
            } => {
                assert!(fitted.contains_bbox(&bbox));
                assert_ne!(fitted, bbox);
                assert!(linear);
            }
            other => panic!("expected a bounds fit, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_target_degenerate_bounds_fall_back_raw() {
        let bbox = BBox::from_coords(4.895, 52.370, 4.895, 52.370);
        assert_eq!(
            frame_target(&FrameTarget::Bounds(bbox), 16.0),
            CameraCommand::FitBounds { bbox, linear: true }
        );
    }
}
