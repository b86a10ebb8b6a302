//! Flight route map previews: a pure renderer that turns two airport codes
//! and a land basemap into an ordered list of drawing primitives, plus the
//! SVG/PNG service that hosts it.

pub mod airport;
pub mod basemap;
pub mod config;
pub mod projection;
pub mod raster;
pub mod region;
pub mod route;
pub mod scene;
pub mod server;
pub mod svg;
pub mod viewport;

pub use basemap::{Basemap, Basemaps};
pub use scene::{Primitive, Scene, render_flight_map};
