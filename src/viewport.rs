use serde::Serialize;

use crate::region::RouteKind;

const MAX_PADDING_PER_DEGREE: f64 = 0.2;
const LABEL_PADDING: f64 = 0.1;
/// Extent given to an axis that would otherwise collapse (zero-length route).
const MIN_SPAN_DEG: f64 = 2.0;

/// Geographic point in degrees, stored GeoJSON-style as (lon, lat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Planar distance in degrees.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        (other.lon - self.lon).hypot(other.lat - self.lat)
    }
}

/// Axis-aligned box in degrees. Latitude may overshoot the poles after padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn of_segment(a: GeoPoint, b: GeoPoint) -> Self {
        Self::new(
            a.lon.min(b.lon),
            a.lat.min(b.lat),
            a.lon.max(b.lon),
            a.lat.max(b.lat),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lon >= self.min_lon && p.lon <= self.max_lon && p.lat >= self.min_lat && p.lat <= self.max_lat
    }

    pub fn expand(&self, by: f64) -> Self {
        self.expand_xy(by, by)
    }

    pub fn expand_xy(&self, lon: f64, lat: f64) -> Self {
        Self::new(
            self.min_lon - lon,
            self.min_lat - lat,
            self.max_lon + lon,
            self.max_lat + lat,
        )
    }

    fn is_finite(&self) -> bool {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Bounding box of the segment a-b thickened by `radius` on every side.
///
/// Returns `None` when no capsule can be formed (zero or non-finite radius).
pub fn capsule_bbox(a: GeoPoint, b: GeoPoint, radius: f64) -> Option<BBox> {
    if !(radius.is_finite() && radius > 0.0) {
        return None;
    }
    // Minkowski sum of the segment with a disk: the round end caps reach
    // exactly `radius` past the segment's own extent on both axes.
    Some(BBox::of_segment(a, b).expand(radius))
}

/// Frames a route for a `width` x `height` pixel surface.
///
/// Returns `None` for a degenerate viewport.
pub fn solve(departure: GeoPoint, arrival: GeoPoint, width: u32, height: u32, kind: RouteKind) -> Option<BBox> {
    if width == 0 || height == 0 {
        return None;
    }
    let screen_aspect = f64::from(width) / f64::from(height);

    let d = departure.distance(&arrival);
    let padding = kind.base_padding().min(MAX_PADDING_PER_DEGREE * d);
    let mut bbox = capsule_bbox(departure, arrival, d * padding)
        .unwrap_or_else(|| BBox::of_segment(departure, arrival));

    let label_pad = LABEL_PADDING * bbox.width().max(bbox.height());
    bbox = bbox.expand(label_pad);

    if bbox.width() <= 0.0 {
        bbox = bbox.expand_xy(MIN_SPAN_DEG / 2.0, 0.0);
    }
    if bbox.height() <= 0.0 {
        bbox = bbox.expand_xy(0.0, MIN_SPAN_DEG / 2.0);
    }

    if bbox.aspect() > screen_aspect {
        let grow = bbox.width() / screen_aspect - bbox.height();
        bbox = bbox.expand_xy(0.0, grow / 2.0);
    } else {
        let grow = bbox.height() * screen_aspect - bbox.width();
        bbox = bbox.expand_xy(grow / 2.0, 0.0);
    }

    // A NaN coordinate can slip through min/max above, but never `contains`.
    (bbox.is_finite() && bbox.contains(departure) && bbox.contains(arrival)).then_some(bbox)
}
