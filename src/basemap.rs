use std::path::PathBuf;
use std::str::FromStr;

use geojson::{Geometry, Value};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::projection::Projector;
use crate::scene::Primitive;
use crate::svg::num;

pub const LAND_FILL: &str = "#a5d6a7";
pub const LAND_STROKE: &str = "#66bb6a";
pub const LAND_STROKE_WIDTH: f64 = 0.5;

/// A closed ring of `[lon, lat]` positions.
pub type Ring = Vec<[f64; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    /// Any other geometry type, an unreadable geometry, or none at all.
    Unsupported,
}

impl Shape {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Polygon(rings) => Shape::Polygon(rings.iter().map(|r| to_ring(r)).collect()),
            Value::MultiPolygon(polygons) => Shape::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| rings.iter().map(|r| to_ring(r)).collect())
                    .collect(),
            ),
            _ => Shape::Unsupported,
        }
    }

    /// Rings in source order; a multipolygon flattens its polygons.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Shape::Polygon(rings) => Box::new(rings.iter()),
            Shape::MultiPolygon(polygons) => Box::new(polygons.iter().flatten()),
            Shape::Unsupported => Box::new(std::iter::empty()),
        }
    }
}

// geojson rejects positions shorter than two numbers.
fn to_ring(positions: &[Vec<f64>]) -> Ring {
    positions.iter().map(|p| [p[0], p[1]]).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasemapFeature {
    pub name: String,
    pub shape: Shape,
}

/// Parsed land layer, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basemap {
    features: Vec<BasemapFeature>,
}

#[derive(Debug, Error)]
pub enum BasemapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Basemap {
    pub fn new(features: Vec<BasemapFeature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[BasemapFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.features.iter().flat_map(|f| f.shape.rings())
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    geometry: serde_json::Value,
}

impl From<RawFeature> for BasemapFeature {
    /// A geometry geojson cannot read (unknown type, short positions) makes
    /// only this feature unsupported, never the whole layer.
    fn from(raw: RawFeature) -> Self {
        let name = raw
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let shape = match Geometry::from_json_value(raw.geometry) {
            Ok(geometry) => Shape::from_value(&geometry.value),
            Err(_) => Shape::Unsupported,
        };
        BasemapFeature { name, shape }
    }
}

impl FromStr for Basemap {
    type Err = BasemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let collection: RawCollection = serde_json::from_str(s)?;
        Ok(Basemap::new(collection.features.into_iter().map(BasemapFeature::from).collect()))
    }
}

/// One `PolygonPath` per non-empty ring, in feature order. Nothing is
/// clipped to the surface.
pub fn rasterize<'a>(basemap: &'a Basemap, projector: &'a Projector) -> impl Iterator<Item = Primitive> + 'a {
    basemap
        .rings()
        .filter(|ring| !ring.is_empty())
        .map(move |ring| Primitive::PolygonPath {
            d: ring_path(ring, projector),
            fill: LAND_FILL,
            stroke: LAND_STROKE,
            stroke_width: LAND_STROKE_WIDTH,
        })
}

fn ring_path(ring: &[[f64; 2]], projector: &Projector) -> String {
    let mut d = String::with_capacity(ring.len() * 16);
    for (i, [lon, lat]) in ring.iter().enumerate() {
        let p = projector.project_lon_lat(*lon, *lat);
        if i > 0 {
            d.push(' ');
        }
        d.push_str(if i == 0 { "M " } else { "L " });
        d.push_str(&num(p.x));
        d.push(' ');
        d.push_str(&num(p.y));
    }
    d.push_str(" Z");
    d
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasemapSource {
    Path(PathBuf),
    Url(String),
}

impl BasemapSource {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            BasemapSource::Url(s.to_string())
        } else {
            BasemapSource::Path(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for BasemapSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasemapSource::Path(p) => write!(f, "{}", p.display()),
            BasemapSource::Url(u) => f.write_str(u),
        }
    }
}

pub async fn load(source: &BasemapSource) -> Result<Basemap, BasemapError> {
    let text = match source {
        BasemapSource::Path(path) => tokio::fs::read_to_string(path).await?,
        BasemapSource::Url(url) => {
            info!("Fetching basemap from {}", url);
            reqwest::get(url).await?.error_for_status()?.text().await?
        }
    };
    text.parse()
}

/// Both layers, each independently absent when its load failed.
#[derive(Debug, Clone, Default)]
pub struct Basemaps {
    pub states: Option<Basemap>,
    pub countries: Option<Basemap>,
}

impl Basemaps {
    pub async fn load(states: &BasemapSource, countries: &BasemapSource) -> Self {
        let (states_result, countries_result) = tokio::join!(load(states), load(countries));
        Self {
            states: keep_loaded("states", states, states_result),
            countries: keep_loaded("countries", countries, countries_result),
        }
    }
}

fn keep_loaded(layer: &str, source: &BasemapSource, result: Result<Basemap, BasemapError>) -> Option<Basemap> {
    match result {
        Ok(basemap) => {
            info!("Loaded {} basemap from {}: {} features", layer, source, basemap.len());
            Some(basemap)
        }
        Err(e) => {
            error!("Error loading {} basemap from {}: {}", layer, source, e);
            None
        }
    }
}
