pub mod config;
pub mod surface;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    iso::{self, GridPoint, Point2, Vector2},
    render::{
        config::{LabelMode, RenderConfig},
        surface::Surface,
        unit::Color,
    },
    timed, Tile, TileStore,
};
use anyhow::Context;
use log::trace;
use validator::Validate;

/// A renderer draws a [TileStore] onto a [Surface]. A renderer is created
/// using a particular [RenderConfig], and from there can be used to render
/// any number of maps any number of times.
///
/// There's no depth buffer. Tiles are painted back to front (the painter's
/// algorithm), ordered by [iso::depth_key]. See [Self::draw_order].
///
/// Config options cannot be changed after creating a renderer, but renderers
/// are very cheap to create so if you need to change the config, just create
/// a new renderer.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Outline of a tile that isn't selected
    pub const OUTLINE_COLOR: Color = Color::new_int(0x2c, 0x3e, 0x50);
    pub const OUTLINE_WIDTH: f64 = 1.0;
    /// Outline of the selected tile
    pub const HIGHLIGHT_COLOR: Color = Color::new_int(0xff, 0x00, 0x00);
    pub const HIGHLIGHT_WIDTH: f64 = 3.0;
    /// Drop shadow under elevated tiles, `rgba(0, 0, 0, 0.3)`
    pub const SHADOW_COLOR: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.3,
    };
    pub const LABEL_COLOR: Color = Color::WHITE;
    pub const COORDINATES_FONT: &'static str = "12px Arial";
    pub const HEIGHT_FONT: &'static str = "10px Arial";

    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid. The error can be downcast to
    /// [validator::ValidationErrors].
    pub fn new(config: RenderConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid render config")?;
        Ok(Self { config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Screen-space offset of the map. Any screen/grid conversion that should
    /// line up with what this renderer draws needs to use this offset.
    pub fn offset(&self) -> Vector2 {
        self.config.offset
    }

    /// Take a snapshot of every tile in the store, sorted in the order that
    /// they should be painted. The sort is ascending by [Tile::depth_key] and
    /// stable, so tiles with equal keys stay in store order. There is
    /// intentionally no secondary key.
    pub fn draw_order<'a>(&self, store: &'a TileStore) -> Vec<&'a Tile> {
        let mut tiles: Vec<&Tile> = store.all().collect();
        // sort_by is stable
        tiles.sort_by(|a, b| a.depth_key().total_cmp(&b.depth_key()));
        tiles
    }

    /// Draw the whole map onto the surface. The surface is cleared first,
    /// then every tile is drawn in [Self::draw_order]. The tile on the
    /// `selection` cell (if any) gets a highlighted outline.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        store: &TileStore,
        tile_size: f64,
        selection: Option<GridPoint>,
    ) {
        timed!("Render pass", log::Level::Trace, {
            surface.clear_rect(
                0.0,
                0.0,
                self.config.canvas_width.into(),
                self.config.canvas_height.into(),
            );
            for tile in self.draw_order(store) {
                let selected = selection == Some(tile.position());
                self.draw_tile(surface, tile, tile_size, selected);
            }
        })
    }

    /// Draw a single tile: shadow (if any), body, then label (if any)
    fn draw_tile<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        tile: &Tile,
        tile_size: f64,
        selected: bool,
    ) {
        let position = tile.screen_position(tile_size, self.config.offset);
        trace!("Drawing {} at {}", tile.position(), position);

        // The shadow goes first so the tile body covers it
        if self.config.show_shadows && tile.z() > 0.0 {
            let drop = tile.z() * self.config.shadow_offset_per_height;
            surface.set_fill_style(Self::SHADOW_COLOR);
            let shadow_position = position + Vector2::new(0.0, drop);
            trace_diamond(surface, shadow_position, tile_size);
            surface.fill();
        }

        let (stroke_color, line_width) = if selected {
            (Self::HIGHLIGHT_COLOR, Self::HIGHLIGHT_WIDTH)
        } else {
            (Self::OUTLINE_COLOR, Self::OUTLINE_WIDTH)
        };
        surface.set_fill_style(tile.color());
        surface.set_stroke_style(stroke_color);
        surface.set_line_width(line_width);
        trace_diamond(surface, position, tile_size);
        surface.fill();
        surface.stroke();

        let label = match self.config.label_mode {
            LabelMode::None => None,
            LabelMode::Coordinates => Some((
                format!("{},{}", tile.x(), tile.y()),
                Self::COORDINATES_FONT,
                15.0,
            )),
            // Ground-level tiles get no height label
            LabelMode::Height if tile.z() == 0.0 => None,
            LabelMode::Height => {
                Some((format!("z:{}", tile.z()), Self::HEIGHT_FONT, 20.0))
            }
        };
        if let Some((text, font, drop)) = label {
            surface.set_fill_style(Self::LABEL_COLOR);
            surface.set_font(font);
            surface.fill_text(
                &text,
                position + Vector2::new(0.0, tile_size / 2.0 + drop),
            );
        }
    }
}

/// Start a new path in the shape of a tile diamond, with its top vertex at
/// `position`. The path is closed but not painted.
fn trace_diamond<S: Surface + ?Sized>(
    surface: &mut S,
    position: Point2,
    tile_size: f64,
) {
    let [top, right, bottom, left] = iso::tile_vertices(position, tile_size);
    surface.begin_path();
    surface.move_to(top);
    surface.line_to(right);
    surface.line_to(bottom);
    surface.line_to(left);
    surface.close_path();
}
