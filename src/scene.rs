use serde::Serialize;

use crate::airport::{self, Airport};
use crate::basemap::{self, Basemap};
use crate::projection::{Point, Projector};
use crate::region::{Layer, RouteKind};
use crate::route::{AIRCRAFT_PATH, RouteGeometry};
use crate::viewport::{self, BBox};

pub const OCEAN_FILL: &str = "#e6f3ff";
pub const ROUTE_COLOR: &str = "#f4511e";
pub const ROUTE_STROKE_WIDTH: f64 = 1.5;
pub const ROUTE_DASH: [f64; 2] = [4.0, 4.0];
pub const DOT_RADIUS: f64 = 3.0;
pub const LABEL_FILL: &str = "#333";
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const LABEL_OFFSET_Y: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Middle,
}

/// Device-independent drawing primitive. Colours are CSS hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    BackgroundRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &'static str,
    },
    PolygonPath {
        d: String,
        fill: &'static str,
        stroke: &'static str,
        stroke_width: f64,
    },
    CurvePath {
        start: Point,
        control: Point,
        end: Point,
        stroke: &'static str,
        stroke_width: f64,
        dash: [f64; 2],
    },
    Dot {
        center: Point,
        radius: f64,
        fill: &'static str,
    },
    Label {
        text: String,
        anchor: Point,
        font_size: f64,
        fill: &'static str,
        text_anchor: TextAnchor,
    },
    GlyphTransformed {
        translate: Point,
        rotate_deg: f64,
        translate2: Point,
        scale: f64,
        fill: &'static str,
        path: &'static str,
    },
}

/// One render's output. Primitives are in paint order, bottom first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub bounds: Option<BBox>,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bounds: None,
            primitives: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Builds the route preview for `departure` -> `arrival` on a
/// `width` x `height` surface.
///
/// Codes must be upper-case. An unknown code, a missing basemap for the
/// route's layer, or a degenerate surface yields an empty scene.
pub fn render_flight_map(
    departure: &str,
    arrival: &str,
    width: u32,
    height: u32,
    states: Option<&Basemap>,
    countries: Option<&Basemap>,
) -> Scene {
    let (Some(dep), Some(arr)) = (airport::lookup(departure), airport::lookup(arrival)) else {
        return Scene::empty(width, height);
    };

    let kind = RouteKind::classify(dep, arr);
    let land = match kind.layer() {
        Layer::States => states,
        Layer::Countries => countries,
    };
    let Some(land) = land else {
        return Scene::empty(width, height);
    };

    let Some(bbox) = viewport::solve(dep.position(), arr.position(), width, height, kind) else {
        return Scene::empty(width, height);
    };
    let projector = Projector::new(bbox, width, height);

    let route = RouteGeometry::new(projector.project(dep.position()), projector.project(arr.position()), kind);

    let mut primitives = vec![Primitive::BackgroundRect {
        x: 0.0,
        y: 0.0,
        width: f64::from(width),
        height: f64::from(height),
        fill: OCEAN_FILL,
    }];
    primitives.extend(basemap::rasterize(land, &projector));
    primitives.push(Primitive::CurvePath {
        start: route.departure,
        control: route.control,
        end: route.arrival,
        stroke: ROUTE_COLOR,
        stroke_width: ROUTE_STROKE_WIDTH,
        dash: ROUTE_DASH,
    });
    push_endpoint(&mut primitives, dep, route.departure);
    push_endpoint(&mut primitives, arr, route.arrival);

    let glyph = route.glyph_transform();
    primitives.push(Primitive::GlyphTransformed {
        translate: glyph.translate,
        rotate_deg: glyph.rotate_deg,
        translate2: glyph.offset,
        scale: glyph.scale,
        fill: ROUTE_COLOR,
        path: AIRCRAFT_PATH,
    });

    Scene {
        width,
        height,
        bounds: Some(bbox),
        primitives,
    }
}

fn push_endpoint(primitives: &mut Vec<Primitive>, airport: &Airport, at: Point) {
    primitives.push(Primitive::Dot {
        center: at,
        radius: DOT_RADIUS,
        fill: ROUTE_COLOR,
    });
    primitives.push(Primitive::Label {
        text: airport.city.to_string(),
        anchor: Point::new(at.x, at.y - LABEL_OFFSET_Y),
        font_size: LABEL_FONT_SIZE,
        fill: LABEL_FILL,
        text_anchor: TextAnchor::Middle,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basemap::{BasemapFeature, Shape};

    fn square(name: &str, lon: f64, lat: f64) -> BasemapFeature {
        BasemapFeature {
            name: name.to_string(),
            shape: Shape::Polygon(vec![vec![
                [lon, lat],
                [lon + 1.0, lat],
                [lon + 1.0, lat + 1.0],
                [lon, lat + 1.0],
                [lon, lat],
            ]]),
        }
    }

    /// Fifty one-degree squares laid out over the contiguous US.
    fn states() -> Basemap {
        Basemap::new(
            (0..50)
                .map(|i| square(&format!("State {i}"), -124.0 + (i % 10) as f64 * 5.5, 26.0 + (i / 10) as f64 * 4.5))
                .collect(),
        )
    }

    fn countries() -> Basemap {
        Basemap::new(vec![
            square("Japan", 138.0, 35.0),
            BasemapFeature {
                name: "Bogus".to_string(),
                shape: Shape::Unsupported,
            },
            square("United States", -100.0, 40.0),
        ])
    }

    fn count(scene: &Scene, pred: fn(&Primitive) -> bool) -> usize {
        scene.primitives.iter().filter(|p| pred(p)).count()
    }

    fn endpoints(scene: &Scene) -> (Point, Point) {
        let dots: Vec<Point> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Dot { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        (dots[0], dots[1])
    }

    fn curve(scene: &Scene) -> (Point, Point, Point) {
        scene
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::CurvePath { start, control, end, .. } => Some((*start, *control, *end)),
                _ => None,
            })
            .unwrap()
    }

    fn glyph(scene: &Scene) -> (Point, f64) {
        match scene.primitives.last().unwrap() {
            Primitive::GlyphTransformed { translate, rotate_deg, .. } => (*translate, *rotate_deg),
            other => panic!("last primitive is {other:?}"),
        }
    }

    fn assert_z_order(scene: &Scene) {
        assert!(matches!(scene.primitives.first(), Some(Primitive::BackgroundRect { .. })));
        assert!(matches!(scene.primitives.last(), Some(Primitive::GlyphTransformed { .. })));
        assert_eq!(count(scene, |p| matches!(p, Primitive::Dot { .. })), 2);
        assert_eq!(count(scene, |p| matches!(p, Primitive::Label { .. })), 2);
        assert_eq!(count(scene, |p| matches!(p, Primitive::CurvePath { .. })), 1);

        let n = scene.primitives.len();
        assert!(matches!(scene.primitives[n - 6], Primitive::CurvePath { .. }));
        assert!(matches!(scene.primitives[n - 5], Primitive::Dot { .. }));
        assert!(matches!(scene.primitives[n - 4], Primitive::Label { .. }));
        assert!(matches!(scene.primitives[n - 3], Primitive::Dot { .. }));
        assert!(matches!(scene.primitives[n - 2], Primitive::Label { .. }));
        assert!(
            scene.primitives[1..n - 6]
                .iter()
                .all(|p| matches!(p, Primitive::PolygonPath { .. }))
        );

        let (start, control, end) = curve(scene);
        let (at, _) = glyph(scene);
        let mid = Point::new(
            0.25 * start.x + 0.5 * control.x + 0.25 * end.x,
            0.25 * start.y + 0.5 * control.y + 0.25 * end.y,
        );
        assert!((at.x - mid.x).abs() < 1e-9 && (at.y - mid.y).abs() < 1e-9);
    }

    #[test]
    fn test_ord_lga_domestic() {
        let states = states();
        let scene = render_flight_map("ORD", "LGA", 280, 140, Some(&states), None);
        assert!(!scene.is_empty());
        assert_z_order(&scene);
        assert_eq!(count(&scene, |p| matches!(p, Primitive::PolygonPath { .. })), 50);

        let bounds = scene.bounds.unwrap();
        assert!((bounds.aspect() - 2.0).abs() < 1e-9);

        let (dep, arr) = endpoints(&scene);
        for p in [dep, arr] {
            assert!(p.x > 0.0 && p.x < 280.0);
            assert!(p.y > 0.0 && p.y < 140.0);
        }
        let (_, control, _) = curve(&scene);
        assert!(control.y < dep.y.min(arr.y));
        let chord = (arr.x - dep.x).hypot(arr.y - dep.y);
        assert!((control.y - ((dep.y + 0.5 * (arr.y - dep.y)) - chord * 0.2)).abs() < 1e-9);

        let (_, angle) = glyph(&scene);
        assert!(angle.abs() < 10.0, "eastbound angle {angle}");
    }

    #[test]
    fn test_lax_hnd_international() {
        let countries = countries();
        let scene = render_flight_map("LAX", "HND", 280, 140, None, Some(&countries));
        assert_z_order(&scene);
        // the unsupported feature is skipped
        assert_eq!(count(&scene, |p| matches!(p, Primitive::PolygonPath { .. })), 2);

        let bounds = scene.bounds.unwrap();
        assert!(bounds.width() > 258.0);

        let (dep, arr) = endpoints(&scene);
        assert!(arr.x > dep.x);
        let (_, control, _) = curve(&scene);
        let chord = (arr.x - dep.x).hypot(arr.y - dep.y);
        assert!((control.y - ((dep.y + 0.5 * (arr.y - dep.y)) - chord * 0.4)).abs() < 1e-9);
    }

    #[test]
    fn test_westbound_glyph_faces_west() {
        let countries = countries();
        let scene = render_flight_map("HND", "LAX", 280, 140, None, Some(&countries));
        let (dep, arr) = endpoints(&scene);
        assert!(arr.x < dep.x);
        let (_, angle) = glyph(&scene);
        assert!(angle.abs() > 90.0);
    }

    #[test]
    fn test_jfk_jfk_degenerate() {
        let states = states();
        let scene = render_flight_map("JFK", "JFK", 200, 100, Some(&states), None);
        assert!(!scene.is_empty());
        assert_z_order(&scene);

        let (dep, arr) = endpoints(&scene);
        assert_eq!(dep, arr);
        let (start, control, end) = curve(&scene);
        assert_eq!(start, control);
        assert_eq!(control, end);
        let (at, angle) = glyph(&scene);
        assert!((at.x - dep.x).abs() < 1e-9 && (at.y - dep.y).abs() < 1e-9);
        assert_eq!(angle, 0.0);

        let labels: Vec<&Primitive> = scene
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Label { .. }))
            .collect();
        assert_eq!(labels[0], labels[1]);
    }

    #[test]
    fn test_unknown_code_is_empty() {
        let states = states();
        let countries = countries();
        let scene = render_flight_map("XYZ", "LGA", 280, 140, Some(&states), Some(&countries));
        assert!(scene.is_empty());
        assert_eq!((scene.width, scene.height), (280, 140));
        assert!(render_flight_map("ORD", "xyz", 280, 140, Some(&states), Some(&countries)).is_empty());
    }

    #[test]
    fn test_missing_layer_is_empty() {
        let countries = countries();
        assert!(render_flight_map("ORD", "LGA", 280, 140, None, Some(&countries)).is_empty());

        let states = states();
        assert!(render_flight_map("LAX", "HND", 280, 140, Some(&states), None).is_empty());
    }

    #[test]
    fn test_zero_size_is_empty() {
        let states = states();
        assert!(render_flight_map("ORD", "LGA", 0, 140, Some(&states), None).is_empty());
        assert!(render_flight_map("ORD", "LGA", 280, 0, Some(&states), None).is_empty());
    }

    #[test]
    fn test_sfo_jfk_uses_countries_layer() {
        // 48.6 degrees of longitude apart, so the spread rule makes it international.
        let states = states();
        let countries = countries();
        let scene = render_flight_map("SFO", "JFK", 320, 160, Some(&states), Some(&countries));
        assert_z_order(&scene);
        assert_eq!(count(&scene, |p| matches!(p, Primitive::PolygonPath { .. })), 2);
        assert!((scene.bounds.unwrap().aspect() - 2.0).abs() < 1e-9);
        assert!(render_flight_map("SFO", "JFK", 320, 160, Some(&states), None).is_empty());
    }

    #[test]
    fn test_label_placement() {
        let states = states();
        let scene = render_flight_map("ORD", "LGA", 280, 140, Some(&states), None);
        let (dep, _) = endpoints(&scene);
        let label = scene
            .primitives
            .iter()
            .find(|p| matches!(p, Primitive::Label { .. }))
            .unwrap();
        assert_eq!(
            label,
            &Primitive::Label {
                text: "Chicago".to_string(),
                anchor: Point::new(dep.x, dep.y - 10.0),
                font_size: 10.0,
                fill: "#333",
                text_anchor: TextAnchor::Middle,
            }
        );
    }

    #[test]
    fn test_all_pairs_keep_endpoints_on_surface() {
        let states = states();
        let countries = countries();
        for dep in airport::all() {
            for arr in airport::all() {
                let scene = render_flight_map(dep.code, arr.code, 280, 140, Some(&states), Some(&countries));
                assert_z_order(&scene);
                let (a, b) = endpoints(&scene);
                for p in [a, b] {
                    assert!(p.x > 0.0 && p.x < 280.0, "{} -> {}", dep.code, arr.code);
                    assert!(p.y > 0.0 && p.y < 140.0, "{} -> {}", dep.code, arr.code);
                }
            }
        }
    }

    #[test]
    fn test_arc_clears_endpoints_on_shallow_routes() {
        let states = states();
        let countries = countries();
        for (dep, arr) in [("ORD", "LGA"), ("ORD", "JFK"), ("LAX", "HND"), ("SFO", "HND"), ("SFO", "JFK")] {
            let scene = render_flight_map(dep, arr, 280, 140, Some(&states), Some(&countries));
            let (start, control, end) = curve(&scene);
            assert!(control.y < start.y.min(end.y), "{dep} -> {arr}");
        }
    }

    #[test]
    fn test_arc_clears_endpoints_iff_rise_exceeds_half_drop() {
        let states = states();
        let countries = countries();
        let mut steep = Vec::new();
        for dep in airport::all() {
            for arr in airport::all() {
                if dep.code == arr.code {
                    continue;
                }
                let kind = RouteKind::classify(dep, arr);
                let scene = render_flight_map(dep.code, arr.code, 280, 140, Some(&states), Some(&countries));
                let (start, control, end) = curve(&scene);
                let chord = (end.x - start.x).hypot(end.y - start.y);
                let clears = control.y < start.y.min(end.y);
                assert!(control.y < 0.5 * (start.y + end.y), "{} -> {}", dep.code, arr.code);
                assert_eq!(
                    clears,
                    chord * kind.curvature() > 0.5 * (end.y - start.y).abs(),
                    "{} -> {}",
                    dep.code,
                    arr.code
                );
                if !clears {
                    steep.push((dep.code, arr.code));
                }
            }
        }
        // Short, mostly north-south domestic hops.
        assert!(steep.contains(&("LAX", "SFO")));
        assert!(steep.contains(&("JFK", "LGA")));
    }

    #[test]
    fn test_scene_serializes_with_kind_tags() {
        let states = states();
        let scene = render_flight_map("ORD", "LGA", 280, 140, Some(&states), None);
        let json = serde_json::to_value(&scene).unwrap();
        let prims = json["primitives"].as_array().unwrap();
        assert_eq!(prims[0]["kind"], "background_rect");
        assert_eq!(prims.last().unwrap()["kind"], "glyph_transformed");
        assert_eq!(json["width"], 280);
    }
}
