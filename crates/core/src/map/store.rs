use crate::{iso::GridPoint, Tile};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use log::debug;

/// An ORDERED map of grid points to some `T`. Iteration follows insertion
/// order, which the render pass relies on to break depth ties.
pub type GridPointMap<T> = IndexMap<GridPoint, T, FnvBuildHasher>;

/// The set of tiles that make up the current map. The store is keyed by grid
/// cell, so it's impossible for two tiles to occupy the same `(x, y)`.
///
/// Lookups are exact: there is no rounding or tolerance, a tile is only found
/// at the integer cell it was inserted at.
#[derive(Clone, Debug, Default)]
pub struct TileStore {
    tiles: GridPointMap<Tile>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tile at its own position. If another tile is already on that
    /// cell, it's replaced (last write wins) and returned. A replaced tile
    /// keeps the old tile's place in iteration order.
    pub fn upsert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.position(), tile)
    }

    /// Get the tile on the given cell, if any
    pub fn find_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tiles.get(&GridPoint::new(x, y))
    }

    /// Is there a tile on the given cell?
    pub fn contains(&self, position: GridPoint) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Remove the tile on the given cell and return it. If the cell is empty,
    /// this does nothing.
    pub fn remove_at(&mut self, x: i32, y: i32) -> Option<Tile> {
        // shift_remove instead of swap_remove, so the remaining tiles keep
        // their relative order
        self.tiles.shift_remove(&GridPoint::new(x, y))
    }

    /// Iterate over every tile in the store. The order is insertion order,
    /// but callers that care about draw order should sort (see
    /// [Renderer::draw_order](crate::Renderer::draw_order)).
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Throw away every tile and fill a fresh `width`×`height` grid, one tile
    /// per cell, using the given function to create each tile. The new grid is
    /// built off to the side and swapped in at the end, so the store is never
    /// observed half-populated.
    ///
    /// Cells are visited column by column: `(0, 0), (0, 1), ... (1, 0), ...`.
    /// The generator must return a tile positioned on the cell it was given.
    pub fn regenerate(
        &mut self,
        width: u32,
        height: u32,
        mut generator: impl FnMut(GridPoint) -> Tile,
    ) {
        let capacity = width as usize * height as usize;
        let mut tiles = GridPointMap::with_capacity_and_hasher(
            capacity,
            FnvBuildHasher::default(),
        );

        for x in 0..width as i32 {
            for y in 0..height as i32 {
                let position = GridPoint::new(x, y);
                let tile = generator(position);
                debug_assert_eq!(
                    tile.position(),
                    position,
                    "generator placed a tile on the wrong cell"
                );
                tiles.insert(tile.position(), tile);
            }
        }

        debug!("Regenerated {}x{} map ({} tiles)", width, height, tiles.len());
        self.tiles = tiles;
    }
}
