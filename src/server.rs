use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::basemap::Basemaps;
use crate::raster::svg_to_png;
use crate::scene::{Scene, render_flight_map};
use crate::svg::render_svg;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Clone)]
pub struct AppState {
    pub usvg_options: Arc<usvg::Options<'static>>,
    pub basemaps: Arc<Basemaps>,
    pub default_width: u32,
    pub default_height: u32,
    pub max_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapQuery {
    pub dep: String,
    pub arr: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl AppState {
    /// Oversized surfaces are refused before anything is allocated for them.
    fn scene(&self, query: &MapQuery) -> Result<Scene, (StatusCode, String)> {
        let width = query.width.unwrap_or(self.default_width);
        let height = query.height.unwrap_or(self.default_height);
        if width > self.max_size || height > self.max_size {
            info!(
                "Refusing {}x{} map for {}->{} (max {})",
                width, height, query.dep, query.arr, self.max_size
            );
            return Err((
                StatusCode::BAD_REQUEST,
                format!("width and height must not exceed {}", self.max_size),
            ));
        }
        Ok(render_flight_map(
            &query.dep.to_ascii_uppercase(),
            &query.arr.to_ascii_uppercase(),
            width,
            height,
            self.basemaps.states.as_ref(),
            self.basemaps.countries.as_ref(),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/map.svg", get(get_map_svg))
        .route("/map.png", get(get_map_png))
        .route("/scene.json", get(get_scene))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html("<h1>Flight map</h1><ul><li><a href='/map.svg?dep=ORD&arr=LGA&width=280&height=140'>/map.svg</a></li><li><a href='/map.png?dep=ORD&arr=LGA&width=280&height=140'>/map.png</a></li><li><a href='/scene.json?dep=LAX&arr=HND&width=280&height=140'>/scene.json</a></li></ul>")
}

async fn get_map_svg(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Response {
    let start = Instant::now();
    let scene = match state.scene(&query) {
        Ok(scene) => scene,
        Err(rejection) => return rejection.into_response(),
    };
    if scene.is_empty() {
        info!("Nothing to draw for {}->{}", query.dep, query.arr);
        return StatusCode::NO_CONTENT.into_response();
    }
    let svg = render_svg(&scene);
    info!(
        "Rendered {}->{} (SVG, {} primitives) in {:?}",
        query.dep,
        query.arr,
        scene.primitives.len(),
        start.elapsed()
    );

    (
        [(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, NO_CACHE)],
        svg,
    )
        .into_response()
}

async fn get_map_png(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Response {
    let start = Instant::now();
    let scene = match state.scene(&query) {
        Ok(scene) => scene,
        Err(rejection) => return rejection.into_response(),
    };
    if scene.is_empty() {
        info!("Nothing to draw for {}->{}", query.dep, query.arr);
        return StatusCode::NO_CONTENT.into_response();
    }
    let svg = render_svg(&scene);
    let svg_duration = start.elapsed();

    let png_start = Instant::now();
    match svg_to_png(&svg, &state.usvg_options) {
        Ok(png) => {
            info!(
                "Rendered {}->{} (PNG): svg={:?}, png={:?}",
                query.dep,
                query.arr,
                svg_duration,
                png_start.elapsed()
            );
            (
                [(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, NO_CACHE)],
                png,
            )
                .into_response()
        }
        Err(e) => {
            error!("Error rendering PNG for {}->{}: {}", query.dep, query.arr, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error rendering PNG: {}", e)).into_response()
        }
    }
}

async fn get_scene(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Response {
    let scene = match state.scene(&query) {
        Ok(scene) => scene,
        Err(rejection) => return rejection.into_response(),
    };
    ([(header::CACHE_CONTROL, NO_CACHE)], Json(scene)).into_response()
}
