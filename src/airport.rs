use serde::Serialize;

use crate::viewport::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub city: &'static str,
}

impl Airport {
    /// Airport records are (lat, lon); everything downstream works in (lon, lat).
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lon, self.lat)
    }
}

static AIRPORTS: [Airport; 6] = [
    Airport { code: "ORD", lat: 41.9786, lon: -87.9048, city: "Chicago" },   // O'Hare
    Airport { code: "LGA", lat: 40.7769, lon: -73.8740, city: "New York" },  // LaGuardia
    Airport { code: "LAX", lat: 33.9416, lon: -118.4085, city: "Los Angeles" },
    Airport { code: "HND", lat: 35.5533, lon: 139.7810, city: "Tokyo" },      // Haneda
    Airport { code: "SFO", lat: 37.6213, lon: -122.3790, city: "San Francisco" },
    Airport { code: "JFK", lat: 40.6413, lon: -73.7781, city: "New York" },
];

/// Codes must already be upper-case; a miss is `None`, never an error.
pub fn lookup(code: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.code == code)
}

pub fn all() -> &'static [Airport] {
    &AIRPORTS
}
