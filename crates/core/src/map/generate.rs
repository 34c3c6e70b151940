use crate::{
    config::serde_seed,
    iso::{self, GridPoint},
    timed, Color, Tile, TileStore, TileType,
};
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A per-cell tile generator. Generators are handed to
/// [TileStore::regenerate] to fill a fresh map. They're called once per cell,
/// in the store's iteration order, so a generator with internal state (e.g.
/// an RNG) is deterministic for a given map size.
pub trait Generate: Debug {
    /// Create the tile for a single cell. The returned tile must be placed on
    /// `position`.
    fn generate_tile(&mut self, position: GridPoint) -> Tile;
}

/// Selects which [Generate] implementation fills the map when the editor
/// starts or the map is resized.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapGenerator {
    /// See [GradientGenerator]
    Gradient,
    /// See [TerrainGenerator]
    Terrain {
        /// RNG seed for the random parts of the terrain. Accepts the same
        /// inputs as the other seeds in the config: integers, numeric
        /// strings, or any other string (which gets hashed).
        #[serde(deserialize_with = "serde_seed::deserialize")]
        seed: u64,
    },
}

impl MapGenerator {
    /// Replace the contents of the store with a fresh `width`×`height` map
    pub fn regenerate(&self, store: &mut TileStore, width: u32, height: u32) {
        match *self {
            Self::Gradient => {
                apply_generator(store, width, height, GradientGenerator)
            }
            Self::Terrain { seed } => apply_generator(
                store,
                width,
                height,
                TerrainGenerator::new(seed, width, height),
            ),
        }
    }
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self::Gradient
    }
}

fn apply_generator(
    store: &mut TileStore,
    width: u32,
    height: u32,
    mut generator: impl Generate,
) {
    info!("Generating {}x{} map with {:?}", width, height, generator);
    timed!(
        "Map generation",
        store.regenerate(width, height, |position| {
            generator.generate_tile(position)
        })
    );
}

/// Flat grass everywhere, with a hue that shifts diagonally across the map.
/// The color of `(x, y)` is `hsl(120 + 2·(x+y), 60%, 50%)`, so every tile on
/// the same anti-diagonal shares a color and each step away from the origin
/// moves the hue towards cyan.
#[derive(Copy, Clone, Debug)]
pub struct GradientGenerator;

impl GradientGenerator {
    const BASE_HUE: f32 = 120.0;
    const HUE_STEP: f32 = 2.0;
    const SATURATION: f32 = 0.6;
    const LIGHTNESS: f32 = 0.5;

    /// The color for a cell under this generator
    pub fn color_at(position: GridPoint) -> Color {
        let hue =
            Self::BASE_HUE + Self::HUE_STEP * (position.x + position.y) as f32;
        Color::from_hsl(hue, Self::SATURATION, Self::LIGHTNESS)
    }
}

impl Generate for GradientGenerator {
    fn generate_tile(&mut self, position: GridPoint) -> Tile {
        Tile::with_appearance(
            position,
            0.0,
            TileType::Grass,
            Self::color_at(position),
        )
    }
}

/// A small island of terrain. A mountain sits on the center of the map,
/// ringed by forest. Everything further out is grass, with random patches of
/// water. Tile elevation and color come from the [TileType] catalog.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    rng: Pcg64,
    center_x: f64,
    center_y: f64,
}

impl TerrainGenerator {
    /// Cells closer than this to the center are mountain
    const MOUNTAIN_RADIUS: f64 = 3.0;
    /// Cells closer than this (but not mountain) are forest
    const FOREST_RADIUS: f64 = 5.0;
    /// Chance that any cell outside the forest is water
    const WATER_CHANCE: f64 = 0.3;

    pub fn new(seed: u64, width: u32, height: u32) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            center_x: f64::from(width) / 2.0,
            center_y: f64::from(height) / 2.0,
        }
    }
}

impl Generate for TerrainGenerator {
    fn generate_tile(&mut self, position: GridPoint) -> Tile {
        let distance = iso::planar_distance(
            position.x.into(),
            position.y.into(),
            self.center_x,
            self.center_y,
        );
        let tile_type = if distance < Self::MOUNTAIN_RADIUS {
            TileType::Mountain
        } else if distance < Self::FOREST_RADIUS {
            TileType::Forest
        } else if self.rng.gen_bool(Self::WATER_CHANCE) {
            TileType::Water
        } else {
            TileType::Grass
        };
        Tile::new(position, tile_type)
    }
}
