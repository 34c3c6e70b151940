use crate::{
    iso::{self, GridPoint, Point2, Vector2},
    Color,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A map is comprised of tiles. Each tile is drawn as a flat diamond, lifted
/// above (or sunk below) the ground plane by its elevation. Tiles **cannot**
/// be stacked, each grid cell holds at most one tile.
///
/// Tiles are plain values. Once one is placed into a
/// [TileStore](crate::TileStore), the store owns it; the render pass only ever
/// reads tiles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    /// The cell this tile occupies
    #[serde(flatten)]
    position: GridPoint,

    /// Height of the tile. Can be negative for depressions like water.
    #[serde(rename = "z")]
    elevation: f64,

    #[serde(rename = "type")]
    tile_type: TileType,

    /// Display color. Usually the color of the tile type, but generators can
    /// pick their own.
    color: Color,
}

impl Tile {
    /// Create a tile from the catalog entry for its type. Elevation and color
    /// are both taken from [TileType::properties].
    pub fn new(position: GridPoint, tile_type: TileType) -> Self {
        let TileTypeProperties { color, height } = tile_type.properties();
        Self {
            position,
            elevation: height,
            tile_type,
            color,
        }
    }

    /// Create a tile with an explicit elevation and color, ignoring the
    /// catalog. Used for procedurally colored maps.
    pub fn with_appearance(
        position: GridPoint,
        elevation: f64,
        tile_type: TileType,
        color: Color,
    ) -> Self {
        Self {
            position,
            elevation,
            tile_type,
            color,
        }
    }

    /// The grid cell that this tile occupies
    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Elevation of this tile, AKA `z`
    pub fn z(&self) -> f64 {
        self.elevation
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The painter's algorithm key for this tile. See [iso::depth_key].
    pub fn depth_key(&self) -> f64 {
        iso::depth_key(self.position.x, self.position.y, self.elevation)
    }

    /// Screen position of this tile's top vertex. See [iso::grid_to_screen].
    pub fn screen_position(&self, tile_size: f64, offset: Vector2) -> Point2 {
        iso::grid_to_screen(
            self.position.x.into(),
            self.position.y.into(),
            self.elevation,
            tile_size,
            offset,
        )
    }
}

/// The catalog of tile types. This is a closed set: brushes and generators
/// can only produce these types, and each one has a fixed color and height
/// (see [Self::properties]).
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TileType {
    Grass,
    Water,
    Mountain,
    Sand,
    Forest,
}

/// The appearance that a [TileType] gives to new tiles
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileTypeProperties {
    pub color: Color,
    pub height: f64,
}

impl TileType {
    /// Look up the catalog entry for this type
    pub const fn properties(self) -> TileTypeProperties {
        match self {
            Self::Grass => TileTypeProperties {
                color: Color::new_int(0x27, 0xae, 0x60),
                height: 0.0,
            },
            Self::Water => TileTypeProperties {
                color: Color::new_int(0x34, 0x98, 0xdb),
                height: -1.0,
            },
            Self::Mountain => TileTypeProperties {
                color: Color::new_int(0x7f, 0x8c, 0x8d),
                height: 2.0,
            },
            Self::Sand => TileTypeProperties {
                color: Color::new_int(0xf1, 0xc4, 0x0f),
                height: 0.0,
            },
            Self::Forest => TileTypeProperties {
                color: Color::new_int(0x2e, 0xcc, 0x71),
                height: 1.0,
            },
        }
    }
}

impl Default for TileType {
    fn default() -> Self {
        Self::Grass
    }
}
