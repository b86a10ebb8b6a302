use serde::Serialize;

use crate::projection::Point;
use crate::region::RouteKind;

/// Aircraft silhouette, drawn in its own 512x384 box.
pub const AIRCRAFT_PATH: &str = "M480 192H365.71L260.61 8.06A16.014 16.014 0 0 0 246.71 0h-65.5c-10.63 0-18.3 10.17-15.38 20.39L214.86 192H112l-43.2-57.6c-3.02-4.03-7.77-6.4-12.8-6.4H16.01C5.6 128-2.04 137.78.49 147.88L32 256 .49 364.12C-2.04 374.22 5.6 384 16.01 384H56c5.04 0 9.78-2.37 12.8-6.4L112 320h102.86l-49.03 171.6c-2.92 10.22 4.75 20.4 15.38 20.4h65.5c5.74 0 11.04-3.08 13.89-8.06L365.71 320H480c35.35 0 96-28.65 96-64s-60.65-64-96-64z";
pub const AIRCRAFT_WIDTH: f64 = 512.0;
pub const AIRCRAFT_HEIGHT: f64 = 384.0;
pub const AIRCRAFT_SCALE: f64 = 0.015;

/// Screen-space route: a quadratic Bézier from departure to arrival whose
/// control point sits `chord * curvature` above the chord midpoint.
///
/// The control point only clears both endpoints when `chord * curvature`
/// exceeds half the vertical drop; steep routes bow up from the midpoint
/// but not above the higher endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteGeometry {
    pub departure: Point,
    pub arrival: Point,
    pub control: Point,
}

impl RouteGeometry {
    pub fn new(departure: Point, arrival: Point, kind: RouteKind) -> Self {
        let mid_x = departure.x + 0.5 * (arrival.x - departure.x);
        let mid_y = departure.y + 0.5 * (arrival.y - departure.y);
        let chord = (arrival.x - departure.x).hypot(arrival.y - departure.y);
        let control = Point::new(mid_x, mid_y - chord * kind.curvature());
        Self {
            departure,
            arrival,
            control,
        }
    }

    pub fn chord(&self) -> f64 {
        (self.arrival.x - self.departure.x).hypot(self.arrival.y - self.departure.y)
    }

    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c) = (u * u, 2.0 * u * t, t * t);
        Point::new(
            a * self.departure.x + b * self.control.x + c * self.arrival.x,
            a * self.departure.y + b * self.control.y + c * self.arrival.y,
        )
    }

    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Heading of the chord in degrees; `atan2(0, 0)` gives 0 for a zero-length route.
    pub fn heading_deg(&self) -> f64 {
        (self.arrival.y - self.departure.y)
            .atan2(self.arrival.x - self.departure.x)
            .to_degrees()
    }

    pub fn glyph_transform(&self) -> GlyphTransform {
        GlyphTransform {
            translate: self.midpoint(),
            rotate_deg: self.heading_deg(),
            offset: Point::new(
                -AIRCRAFT_WIDTH / 2.0 * AIRCRAFT_SCALE,
                -AIRCRAFT_HEIGHT / 2.0 * AIRCRAFT_SCALE,
            ),
            scale: AIRCRAFT_SCALE,
        }
    }
}

/// `translate(translate) rotate(rotate_deg) translate(offset) scale(scale)`,
/// in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphTransform {
    pub translate: Point,
    pub rotate_deg: f64,
    pub offset: Point,
    pub scale: f64,
}

impl GlyphTransform {
    /// Maps a point of the glyph's own coordinate space onto the surface.
    pub fn apply(&self, p: Point) -> Point {
        let x = p.x * self.scale + self.offset.x;
        let y = p.y * self.scale + self.offset.y;
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        Point::new(
            self.translate.x + x * cos - y * sin,
            self.translate.y + x * sin + y * cos,
        )
    }
}
