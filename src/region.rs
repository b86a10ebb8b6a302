use serde::Serialize;

use crate::airport::Airport;

const MAX_DOMESTIC_LON_SPREAD: f64 = 30.0;
const US_LON_WEST: f64 = -130.0;
const US_LON_EAST: f64 = -60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Domestic,
    International,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    States,
    Countries,
}

impl RouteKind {
    pub fn classify(departure: &Airport, arrival: &Airport) -> Self {
        let wide = (departure.lon - arrival.lon).abs() > MAX_DOMESTIC_LON_SPREAD;
        if wide || !in_us_band(departure.lon) || !in_us_band(arrival.lon) {
            RouteKind::International
        } else {
            RouteKind::Domestic
        }
    }

    /// Arc height as a fraction of the screen-space chord.
    pub fn curvature(self) -> f64 {
        match self {
            RouteKind::Domestic => 0.2,
            RouteKind::International => 0.4,
        }
    }

    pub fn base_padding(self) -> f64 {
        match self {
            RouteKind::Domestic => 0.3,
            RouteKind::International => 0.2,
        }
    }

    pub fn layer(self) -> Layer {
        match self {
            RouteKind::Domestic => Layer::States,
            RouteKind::International => Layer::Countries,
        }
    }
}

fn in_us_band(lon: f64) -> bool {
    lon > US_LON_WEST && lon < US_LON_EAST
}
