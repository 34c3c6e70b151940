//! isomap is the engine behind an isometric tile-map editor. It owns the math
//! that maps grid cells onto a 2:1 isometric screen (and back), the
//! painter's-algorithm ordering that makes tall tiles overlap their
//! neighbors correctly, an in-memory tile store, and a render pass that
//! turns all of that into draw calls on any 2D raster [Surface].
//!
//! Buttons, inputs and page layout live elsewhere. A host UI forwards pointer
//! and field events into an [Editor], and the editor re-renders synchronously
//! whenever an event changes its state.
//!
//! ```
//! use isomap::{
//!     DrawList, Editor, EditorConfig, EditorEvent, Point2, RenderConfig,
//! };
//!
//! let mut editor =
//!     Editor::new(EditorConfig::default(), RenderConfig::default()).unwrap();
//! let mut surface = DrawList::default();
//! editor.render(&mut surface);
//!
//! // A click on the top vertex of tile (2, 3) selects it
//! let click = Point2 { x: 368.0, y: 280.0 };
//! editor.handle(EditorEvent::PointerDown(click), &mut surface);
//! editor.handle(EditorEvent::PointerUp(click), &mut surface);
//! let selected = editor.selected_tile().unwrap();
//! assert_eq!(selected.position().to_string(), "(2, 3)");
//! ```
//!
//! See [EditorConfig] and [RenderConfig] for details on how the editor can be
//! customized.

mod config;
mod editor;
pub mod iso;
#[cfg(feature = "js")]
mod js;
mod map;
mod render;
mod util;

pub use crate::{
    config::{DimensionLimits, EditorConfig, MapDimensions},
    editor::{Editor, EditorEvent, EditorState, PointerState},
    iso::{GridPoint, Point2, Vector2},
    map::{
        generate::{
            Generate, GradientGenerator, MapGenerator, TerrainGenerator,
        },
        store::{GridPointMap, TileStore},
        tile::{Tile, TileType, TileTypeProperties},
    },
    render::{
        config::{LabelMode, RenderConfig},
        surface::{DrawCommand, DrawList, Surface},
        unit::Color,
        Renderer,
    },
    util::range::NumRange,
};
#[cfg(feature = "svg")]
pub use crate::render::svg::SvgSurface;
