use crate::{Color, Point2, Surface};
use std::mem;
use svg::{
    node::{
        element::{Polygon, Polyline, Text},
        Text as TextNode,
    },
    Document, Node,
};

/// A [Surface] that builds an SVG document. Each filled or stroked path
/// becomes its own `<polygon>`, and text becomes `<text>`, so a render pass
/// produces a flat list of shapes in paint order.
///
/// SVG has no pixels to erase, so [Surface::clear_rect] throws away
/// everything drawn so far regardless of the rectangle given.
#[derive(Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    document: Document,
    path: Vec<Point2>,
    path_closed: bool,
    fill_style: Color,
    stroke_style: Color,
    line_width: f64,
    font: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            document: Self::empty_document(width, height),
            path: Vec::new(),
            path_closed: false,
            fill_style: Color::BLACK,
            stroke_style: Color::BLACK,
            line_width: 1.0,
            font: "10px sans-serif".to_owned(),
        }
    }

    /// Get the document drawn so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the surface and return the finished document
    pub fn into_document(self) -> Document {
        self.document
    }

    fn empty_document(width: u32, height: u32) -> Document {
        Document::new()
            .set("viewBox", (0.0, 0.0, f64::from(width), f64::from(height)))
            .set("width", width)
            .set("height", height)
    }

    fn add(&mut self, node: impl Node) {
        let document = mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
    }

    fn path_points(&self) -> Vec<(f64, f64)> {
        self.path.iter().map(|point| (point.x, point.y)).collect()
    }
}

impl Surface for SvgSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.document = Self::empty_document(self.width, self.height);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.path_closed = false;
    }

    fn move_to(&mut self, point: Point2) {
        // Subpaths aren't supported, a move starts the path over
        self.path.clear();
        self.path.push(point);
    }

    fn line_to(&mut self, point: Point2) {
        self.path.push(point);
    }

    fn close_path(&mut self) {
        self.path_closed = true;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_owned();
    }

    fn fill(&mut self) {
        // Filling always closes the shape, same as canvas
        let polygon = Polygon::new()
            .set("points", self.path_points())
            .set("fill", self.fill_style.to_css());
        self.add(polygon);
    }

    fn stroke(&mut self) {
        let points = self.path_points();
        let stroke = self.stroke_style.to_css();
        if self.path_closed {
            let polygon = Polygon::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", stroke)
                .set("stroke-width", self.line_width);
            self.add(polygon);
        } else {
            let polyline = Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", stroke)
                .set("stroke-width", self.line_width);
            self.add(polyline);
        }
    }

    fn fill_text(&mut self, text: &str, position: Point2) {
        let element = Text::new()
            .set("x", position.x)
            .set("y", position.y)
            .set("text-anchor", "middle")
            .set("fill", self.fill_style.to_css())
            .set("style", format!("font: {}", self.font))
            .add(TextNode::new(text));
        self.add(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        GridPoint, LabelMode, RenderConfig, Renderer, Tile, TileStore, TileType,
    };

    #[test]
    fn test_render_to_svg() {
        let renderer = Renderer::new(RenderConfig {
            label_mode: LabelMode::Coordinates,
            ..Default::default()
        })
        .unwrap();
        let mut store = TileStore::new();
        store.upsert(Tile::new(GridPoint::new(0, 0), TileType::Grass));
        store.upsert(Tile::new(GridPoint::new(1, 0), TileType::Forest));

        let mut surface = SvgSurface::new(800, 600);
        let selection = Some(GridPoint::new(1, 0));
        renderer.render(&mut surface, &store, 64.0, selection);
        let svg = surface.document().to_string();

        assert!(svg.contains(r#"viewBox="0 0 800 600""#), "{}", svg);
        assert!(svg.contains(r##"fill="#27ae60""##), "{}", svg);
        // Forest is elevated, so it casts a shadow
        assert!(svg.contains(r#"fill="rgba(0, 0, 0, 0.3)""#), "{}", svg);
        assert!(svg.contains(r##"stroke="#ff0000""##), "{}", svg);
        assert_eq!(svg.matches("<text").count(), 2, "{}", svg);

        // Rendering again starts from a clean document
        renderer.render(&mut surface, &TileStore::new(), 64.0, None);
        assert!(!surface.into_document().to_string().contains("polygon"));
    }
}
