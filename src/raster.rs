use thiserror::Error;
use tiny_skia::Pixmap;
use usvg::Tree;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate a {0}x{1} canvas")]
    Canvas(u32, u32),
    #[error("PNG encode error: {0}")]
    Encode(String),
}

pub fn svg_to_png(svg: &str, opt: &usvg::Options) -> Result<Vec<u8>, RenderError> {
    let tree = Tree::from_str(svg, opt)?;

    let size = tree.size().to_int_size();
    let mut pixmap =
        Pixmap::new(size.width(), size.height()).ok_or(RenderError::Canvas(size.width(), size.height()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
}
