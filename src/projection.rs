use serde::Serialize;

use crate::viewport::{BBox, GeoPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Equirectangular map from a geographic bbox onto a `width` x `height`
/// surface, north up.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    bbox: BBox,
    width: f64,
    height: f64,
}

impl Projector {
    pub fn new(bbox: BBox, width: u32, height: u32) -> Self {
        Self {
            bbox,
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    pub fn project(&self, p: GeoPoint) -> Point {
        self.project_lon_lat(p.lon, p.lat)
    }

    pub fn project_lon_lat(&self, lon: f64, lat: f64) -> Point {
        let b = &self.bbox;
        let x = (lon - b.min_lon) / b.width() * self.width;
        let y = self.height - (lat - b.min_lat) / b.height() * self.height;
        Point::new(x, y)
    }

    pub fn unproject(&self, p: Point) -> GeoPoint {
        let b = &self.bbox;
        let lon = b.min_lon + p.x / self.width * b.width();
        let lat = b.min_lat + (self.height - p.y) / self.height * b.height();
        GeoPoint::new(lon, lat)
    }
}
