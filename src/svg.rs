use crate::scene::{Primitive, Scene, TextAnchor};

/// Fixed two-decimal formatting shared by path data and attributes, so the
/// same scene always serializes to the same bytes.
pub fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{:.2}", rounded)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_svg(scene: &Scene) -> String {
    let mut svg = format!(
        r#"<svg width='{w}' height='{h}' viewBox='0 0 {w} {h}' xmlns='http://www.w3.org/2000/svg'>"#,
        w = scene.width,
        h = scene.height
    );
    svg.push('\n');
    for primitive in &scene.primitives {
        svg.push_str(&render_primitive(primitive));
    }
    svg.push_str("</svg>");
    svg
}

fn render_primitive(primitive: &Primitive) -> String {
    match primitive {
        Primitive::BackgroundRect { x, y, width, height, fill } => format!(
            "  <rect x='{}' y='{}' width='{}' height='{}' fill='{}' />\n",
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            fill
        ),
        Primitive::PolygonPath { d, fill, stroke, stroke_width } => format!(
            "  <path d='{}' fill='{}' stroke='{}' stroke-width='{}' />\n",
            d, fill, stroke, stroke_width
        ),
        Primitive::CurvePath { start, control, end, stroke, stroke_width, dash } => format!(
            "  <path d='M {} {} Q {} {} {} {}' stroke='{}' stroke-width='{}' fill='none' stroke-dasharray='{},{}' />\n",
            num(start.x),
            num(start.y),
            num(control.x),
            num(control.y),
            num(end.x),
            num(end.y),
            stroke,
            stroke_width,
            dash[0],
            dash[1]
        ),
        Primitive::Dot { center, radius, fill } => format!(
            "  <circle cx='{}' cy='{}' r='{}' fill='{}' />\n",
            num(center.x),
            num(center.y),
            radius,
            fill
        ),
        Primitive::Label { text, anchor, font_size, fill, text_anchor } => format!(
            "  <text x='{}' y='{}' fill='{}' font-family='sans-serif' font-size='{}' text-anchor='{}'>{}</text>\n",
            num(anchor.x),
            num(anchor.y),
            fill,
            font_size,
            match text_anchor {
                TextAnchor::Middle => "middle",
            },
            escape(text)
        ),
        Primitive::GlyphTransformed { translate, rotate_deg, translate2, scale, fill, path } => format!(
            "  <g transform='translate({},{}) rotate({}) translate({},{}) scale({})' fill='{}'>\n    <path d='{}' />\n  </g>\n",
            num(translate.x),
            num(translate.y),
            num(*rotate_deg),
            num(translate2.x),
            num(translate2.y),
            scale,
            fill,
            path
        ),
    }
}
