//! JS-compatibility code. This exposes the editor to a browser page through
//! wasm-bindgen, drawing straight onto a `<canvas>` 2D context. The page is
//! only responsible for forwarding pointer events and field edits.
//!
//! You probably won't ever want to enable this feature when including this
//! crate in another Rust project. Instead, use `wasm-pack` to build this into
//! an npm package, then import that into your JS project.

mod util;

use crate::{
    js::util::ResultExt, Color, Editor, EditorConfig, EditorEvent, Point2,
    RenderConfig, Surface,
};
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Executed when the Wasm module is first loaded
#[wasm_bindgen(start)]
pub fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::default());
}

/// Validate the given editor config and return it with any missing values
/// populated with defaults. Fails if the value can't be deserialized or has
/// any invalid values.
#[wasm_bindgen]
pub fn validate_editor_config(input: JsValue) -> Result<JsValue, JsValue> {
    util::validate_config::<EditorConfig>(&input)
}

/// Validate the given render config. See [validate_editor_config].
#[wasm_bindgen]
pub fn validate_render_config(input: JsValue) -> Result<JsValue, JsValue> {
    util::validate_config::<RenderConfig>(&input)
}

/// [Surface] implementation for a browser canvas
struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, point: Point2) {
        self.context.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point2) {
        self.context.line_to(point.x, point.y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn set_fill_style(&mut self, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.context.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.context.set_font(font);
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }

    fn fill_text(&mut self, text: &str, position: Point2) {
        self.context.set_text_align("center");
        // Text failures are logged and the rest of the pass carries on
        if let Err(error) = self.context.fill_text(text, position.x, position.y)
        {
            warn!("Error drawing text {:?}: {:?}", text, error);
        }
    }
}

/// An editor session bound to a canvas. Every method that changes something
/// visible re-draws the canvas before returning, and returns `true` if it
/// did so.
#[wasm_bindgen]
pub struct IsoEditor {
    editor: Editor,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl IsoEditor {
    /// Create a new editor drawing onto the given context, and draw the
    /// initial map. Both configs are given as JS objects, and can be
    /// `undefined` to use the defaults. Fails if either config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(
        context: CanvasRenderingContext2d,
        editor_config: JsValue,
        render_config: JsValue,
    ) -> Result<IsoEditor, JsValue> {
        let editor_config: EditorConfig = util::parse_config(&editor_config)?;
        let render_config: RenderConfig = util::parse_config(&render_config)?;
        let editor = Editor::new(editor_config, render_config).into_js()?;
        let mut surface = CanvasSurface { context };
        editor.render(&mut surface);
        Ok(Self { editor, surface })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.handle(EditorEvent::PointerDown(Point2::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.handle(EditorEvent::PointerMove(Point2::new(x, y)))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.handle(EditorEvent::PointerUp(Point2::new(x, y)))
    }

    pub fn set_width(&mut self, width: i32) -> bool {
        self.handle(EditorEvent::SetWidth(width.into()))
    }

    pub fn set_height(&mut self, height: i32) -> bool {
        self.handle(EditorEvent::SetHeight(height.into()))
    }

    pub fn set_tile_size(&mut self, tile_size: i32) -> bool {
        self.handle(EditorEvent::SetTileSize(tile_size.into()))
    }

    /// Set the active brush by tile type name. Fails for unknown names.
    pub fn set_brush(&mut self, name: &str) -> Result<(), JsValue> {
        self.editor.set_brush_by_name(name).into_js()
    }

    pub fn remove_selected(&mut self) -> bool {
        self.handle(EditorEvent::RemoveSelected)
    }

    pub fn add_tile_right_of_selection(&mut self) -> bool {
        self.handle(EditorEvent::AddTileRightOfSelection)
    }

    /// Get the selected tile as a JS object, or `null`
    pub fn selected_tile(&self) -> Result<JsValue, JsValue> {
        match self.editor.selected_tile() {
            Some(tile) => JsValue::from_serde(tile).into_js(),
            None => Ok(JsValue::NULL),
        }
    }

    /// Force a re-draw, e.g. after the canvas was cleared externally
    pub fn render(&mut self) {
        self.editor.render(&mut self.surface);
    }
}

impl IsoEditor {
    fn handle(&mut self, event: EditorEvent) -> bool {
        self.editor.handle(event, &mut self.surface)
    }
}
