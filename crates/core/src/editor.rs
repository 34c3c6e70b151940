use crate::{
    iso::{self, GridPoint, Point2},
    EditorConfig, MapDimensions, Renderer, RenderConfig, Surface, Tile,
    TileStore, TileType,
};
use anyhow::Context;
use log::{debug, info};
use std::str::FromStr;
use validator::Validate;

/// What the pointer is currently doing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerState {
    /// No button held. Pointer moves are ignored.
    Idle,
    /// A button is held. Moves paint any empty cell they pass over.
    Drawing {
        /// The cell the pointer went down on
        pressed: GridPoint,
        /// Has the pointer left `pressed` since it went down? If not, releasing
        /// the button counts as a click.
        dragged: bool,
    },
}

impl Default for PointerState {
    fn default() -> Self {
        Self::Idle
    }
}

/// An input from the host UI. Pointer positions are in surface pixels,
/// relative to the surface's top-left corner. Dimension edits carry the raw
/// user value; the editor clamps it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EditorEvent {
    PointerDown(Point2),
    PointerMove(Point2),
    PointerUp(Point2),
    SetWidth(i64),
    SetHeight(i64),
    SetTileSize(i64),
    SetBrush(TileType),
    RemoveSelected,
    AddTileRightOfSelection,
}

/// All mutable state of one editor session. Only [Editor] can modify it.
#[derive(Clone, Debug)]
pub struct EditorState {
    tiles: TileStore,
    dimensions: MapDimensions,
    brush: TileType,
    selection: Option<GridPoint>,
    pointer: PointerState,
}

impl EditorState {
    pub fn tiles(&self) -> &TileStore {
        &self.tiles
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// The tile type that painting creates
    pub fn brush(&self) -> TileType {
        self.brush
    }

    /// The selected cell. There may not be a tile on it, see
    /// [Editor::selected_tile].
    pub fn selection(&self) -> Option<GridPoint> {
        self.selection
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}

/// The editor controller. This owns the map and everything else about an
/// editing session, and is the only thing a host UI needs to talk to. Feed it
/// input with [Self::handle] and it re-renders whenever something visible
/// changes.
///
/// Every operation is synchronous, and a render pass always runs to
/// completion before the next event is processed.
#[derive(Clone, Debug)]
pub struct Editor {
    config: EditorConfig,
    renderer: Renderer,
    state: EditorState,
}

impl Editor {
    /// Create a new editor session and generate its initial map. Returns an
    /// error if either config is invalid. The error can be downcast to
    /// [validator::ValidationErrors].
    pub fn new(
        config: EditorConfig,
        render_config: RenderConfig,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid editor config")?;
        let renderer = Renderer::new(render_config)?;
        info!("Creating editor with config {:?}", config);

        let mut tiles = TileStore::new();
        let MapDimensions { width, height, .. } = config.dimensions;
        config.generator.regenerate(&mut tiles, width, height);

        Ok(Self {
            config,
            renderer,
            state: EditorState {
                tiles,
                dimensions: config.dimensions,
                brush: config.brush,
                selection: None,
                pointer: PointerState::Idle,
            },
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Get the tile on the selected cell, if there is one
    pub fn selected_tile(&self) -> Option<&Tile> {
        let selection = self.state.selection?;
        self.state.tiles.find_at(selection.x, selection.y)
    }

    /// The grid cell under a point on the surface. Elevation is ignored, see
    /// [iso::screen_to_grid]. Returns `None` if either coordinate is NaN or
    /// infinite, since there is no cell under such a point.
    pub fn cell_at_screen(&self, point: Point2) -> Option<GridPoint> {
        if !(point.x.is_finite() && point.y.is_finite()) {
            return None;
        }
        Some(iso::screen_to_grid(
            point,
            self.state.dimensions.tile_size.into(),
            self.renderer.offset(),
        ))
    }

    /// The tile under a point on the surface, if any
    pub fn tile_at_screen(&self, point: Point2) -> Option<&Tile> {
        let cell = self.cell_at_screen(point)?;
        self.state.tiles.find_at(cell.x, cell.y)
    }

    /// Apply an event, and re-render onto the surface if anything visible
    /// changed. Returns `true` iff a render happened.
    pub fn handle<S: Surface + ?Sized>(
        &mut self,
        event: EditorEvent,
        surface: &mut S,
    ) -> bool {
        let changed = self.apply(event);
        if changed {
            self.render(surface);
        }
        changed
    }

    /// Apply an event without rendering. Returns `true` iff the event changed
    /// something that affects the rendered map (tiles, dimensions, or
    /// selection). Events that only change invisible state, like the pointer
    /// state or the brush, return `false`.
    pub fn apply(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::PointerDown(point) => {
                self.pointer_down(point);
                false
            }
            EditorEvent::PointerMove(point) => self.pointer_move(point),
            EditorEvent::PointerUp(point) => self.pointer_up(point),
            EditorEvent::SetWidth(width) => self.set_width(width),
            EditorEvent::SetHeight(height) => self.set_height(height),
            EditorEvent::SetTileSize(tile_size) => {
                self.set_tile_size(tile_size)
            }
            EditorEvent::SetBrush(brush) => {
                self.set_brush(brush);
                false
            }
            EditorEvent::RemoveSelected => self.remove_selected().is_some(),
            EditorEvent::AddTileRightOfSelection => {
                self.add_tile_right_of_selection()
            }
        }
    }

    /// Draw the current map onto a surface
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.renderer.render(
            surface,
            &self.state.tiles,
            self.state.dimensions.tile_size.into(),
            self.state.selection,
        );
    }

    pub fn set_brush(&mut self, brush: TileType) {
        debug!("Brush set to {}", brush);
        self.state.brush = brush;
    }

    /// Set the brush from a tile type name (e.g. `"water"`). Returns an error
    /// if the name isn't in the catalog, in which case the brush is unchanged.
    pub fn set_brush_by_name(&mut self, name: &str) -> anyhow::Result<()> {
        let brush = TileType::from_str(name)
            .with_context(|| format!("unknown tile type {:?}", name))?;
        self.set_brush(brush);
        Ok(())
    }

    /// Set the map width, clamped to the configured limits. If the width
    /// actually changes, the whole map is regenerated. Returns whether it
    /// changed.
    pub fn set_width(&mut self, width: i64) -> bool {
        let width = self.clamp_dimension(width);
        if width == self.state.dimensions.width {
            return false;
        }
        self.state.dimensions.width = width;
        self.regenerate();
        true
    }

    /// Set the map height. Same rules as [Self::set_width].
    pub fn set_height(&mut self, height: i64) -> bool {
        let height = self.clamp_dimension(height);
        if height == self.state.dimensions.height {
            return false;
        }
        self.state.dimensions.height = height;
        self.regenerate();
        true
    }

    /// Set the tile size, clamped to the configured limits. This only changes
    /// how the map is drawn, the tiles themselves are untouched. Returns
    /// whether the size changed.
    pub fn set_tile_size(&mut self, tile_size: i64) -> bool {
        let tile_size = clamp_to_u32(
            self.config.limits.tile_size_range().clamp(tile_size),
        );
        if tile_size == self.state.dimensions.tile_size {
            return false;
        }
        info!("Tile size set to {}", tile_size);
        self.state.dimensions.tile_size = tile_size;
        true
    }

    /// Remove the tile on the selected cell and clear the selection. Returns
    /// the removed tile. If nothing is selected, this does nothing.
    pub fn remove_selected(&mut self) -> Option<Tile> {
        let selection = self.state.selection.take()?;
        debug!("Removing selected tile at {}", selection);
        self.state.tiles.remove_at(selection.x, selection.y)
    }

    /// Paint a tile on the cell to the right (`+x`) of the selection. Follows
    /// the same rules as painting with the pointer: the cell must be in bounds
    /// and empty. The selection doesn't move. Returns whether a tile was
    /// added.
    pub fn add_tile_right_of_selection(&mut self) -> bool {
        match self.state.selection {
            Some(selection) => {
                self.paint(selection + GridPoint::new(1, 0))
            }
            None => false,
        }
    }

    /// Pressing on a point with no cell under it leaves the pointer idle
    fn pointer_down(&mut self, point: Point2) {
        self.state.pointer = match self.cell_at_screen(point) {
            Some(pressed) => PointerState::Drawing {
                pressed,
                dragged: false,
            },
            None => PointerState::Idle,
        };
    }

    fn pointer_move(&mut self, point: Point2) -> bool {
        match (self.state.pointer, self.cell_at_screen(point)) {
            (PointerState::Drawing { pressed, dragged }, Some(cell)) => {
                self.state.pointer = PointerState::Drawing {
                    pressed,
                    dragged: dragged || cell != pressed,
                };
                self.paint(cell)
            }
            _ => false,
        }
    }

    fn pointer_up(&mut self, point: Point2) -> bool {
        let pointer = std::mem::take(&mut self.state.pointer);
        match (pointer, self.cell_at_screen(point)) {
            (PointerState::Drawing { pressed, dragged }, Some(cell))
                if !dragged && cell == pressed =>
            {
                self.click(pressed)
            }
            _ => false,
        }
    }

    /// A click selects an occupied cell, or paints and selects an empty one.
    /// Clicking outside the map clears the selection.
    fn click(&mut self, cell: GridPoint) -> bool {
        let painted = !self.state.tiles.contains(cell) && self.paint(cell);
        let selection = if self.state.tiles.contains(cell) {
            Some(cell)
        } else {
            None
        };
        let changed = painted || selection != self.state.selection;
        if selection != self.state.selection {
            debug!("Selection changed to {:?}", selection);
            self.state.selection = selection;
        }
        changed
    }

    /// Add a tile of the active brush on a cell, if the cell is inside the map
    /// and empty. Returns whether a tile was added.
    fn paint(&mut self, cell: GridPoint) -> bool {
        let MapDimensions { width, height, .. } = self.state.dimensions;
        if !cell.is_within(width, height) {
            debug!("Not painting {}, out of bounds", cell);
            false
        } else if self.state.tiles.contains(cell) {
            false
        } else {
            debug!("Painting {} at {}", self.state.brush, cell);
            self.state.tiles.upsert(Tile::new(cell, self.state.brush));
            true
        }
    }

    fn clamp_dimension(&self, value: i64) -> u32 {
        clamp_to_u32(self.config.limits.dimension_range().clamp(value))
    }

    /// Rebuild the map at the current dimensions. Any selection that doesn't
    /// survive is dropped.
    fn regenerate(&mut self) {
        let MapDimensions { width, height, .. } = self.state.dimensions;
        info!("Map resized to {}x{}", width, height);
        self.config
            .generator
            .regenerate(&mut self.state.tiles, width, height);
        if let Some(selection) = self.state.selection {
            if !self.state.tiles.contains(selection) {
                self.state.selection = None;
            }
        }
    }
}

/// Narrow a value that's already been clamped to one of the (`u32`) limits
fn clamp_to_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX.into()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawList, MapGenerator, Vector2};

    /// A 4x4 map with every tile removed, and the offset at the origin to
    /// make the math easy
    fn editor() -> Editor {
        let mut editor = Editor::new(
            EditorConfig {
                dimensions: MapDimensions {
                    width: 4,
                    height: 4,
                    tile_size: 64,
                },
                ..Default::default()
            },
            RenderConfig {
                offset: Vector2::ZERO,
                ..Default::default()
            },
        )
        .unwrap();
        for x in 0..4 {
            for y in 0..4 {
                editor.state.tiles.remove_at(x, y);
            }
        }
        editor
    }

    /// Screen position of the top vertex of a cell, at z=0
    fn screen(x: i32, y: i32) -> Point2 {
        iso::grid_to_screen(x.into(), y.into(), 0.0, 64.0, Vector2::ZERO)
    }

    #[test]
    fn test_new() {
        let editor =
            Editor::new(EditorConfig::default(), RenderConfig::default())
                .unwrap();
        assert_eq!(editor.state().tiles().len(), 100);
        assert_eq!(editor.state().pointer(), PointerState::Idle);
        assert_eq!(editor.state().brush(), TileType::Grass);
        assert_eq!(editor.selected_tile(), None);
    }

    #[test]
    fn test_click_empty_paints_and_selects() {
        let mut editor = editor();
        editor.set_brush(TileType::Sand);
        assert!(!editor.apply(EditorEvent::PointerDown(screen(1, 2))));
        assert!(editor.apply(EditorEvent::PointerUp(screen(1, 2))));

        let tile = editor.selected_tile().unwrap();
        assert_eq!(tile.position(), GridPoint::new(1, 2));
        assert_eq!(tile.tile_type(), TileType::Sand);
        assert_eq!(editor.state().tiles().len(), 1);
        assert_eq!(editor.state().pointer(), PointerState::Idle);
    }

    #[test]
    fn test_click_occupied_selects_without_painting() {
        let mut editor = editor();
        editor
            .state
            .tiles
            .upsert(Tile::new(GridPoint::new(0, 0), TileType::Water));
        editor.set_brush(TileType::Mountain);

        editor.apply(EditorEvent::PointerDown(screen(0, 0)));
        assert!(editor.apply(EditorEvent::PointerUp(screen(0, 0))));
        assert_eq!(editor.state().selection(), Some(GridPoint::ORIGIN));
        assert_eq!(
            editor.selected_tile().map(Tile::tile_type),
            Some(TileType::Water)
        );

        // Clicking the same tile again changes nothing
        editor.apply(EditorEvent::PointerDown(screen(0, 0)));
        assert!(!editor.apply(EditorEvent::PointerUp(screen(0, 0))));
    }

    #[test]
    fn test_click_out_of_bounds_clears_selection() {
        let mut editor = editor();
        editor.apply(EditorEvent::PointerDown(screen(0, 0)));
        editor.apply(EditorEvent::PointerUp(screen(0, 0)));
        assert!(editor.state().selection().is_some());

        editor.apply(EditorEvent::PointerDown(screen(-3, 1)));
        assert!(editor.apply(EditorEvent::PointerUp(screen(-3, 1))));
        assert_eq!(editor.state().selection(), None);
        assert_eq!(editor.state().tiles().len(), 1);
    }

    #[test]
    fn test_drag_paints() {
        let mut editor = editor();
        editor.set_brush(TileType::Forest);
        editor.apply(EditorEvent::PointerDown(screen(0, 0)));
        assert!(editor.apply(EditorEvent::PointerMove(screen(1, 0))));
        assert!(editor.apply(EditorEvent::PointerMove(screen(2, 0))));
        // Already painted, nothing to do
        assert!(!editor.apply(EditorEvent::PointerMove(screen(2, 0))));
        // Out of bounds
        assert!(!editor.apply(EditorEvent::PointerMove(screen(9, 0))));
        // Drag ended, so release isn't a click
        assert!(!editor.apply(EditorEvent::PointerUp(screen(0, 0))));

        let mut painted: Vec<GridPoint> =
            editor.state().tiles().all().map(Tile::position).collect();
        painted.sort_by_key(|p| (p.x, p.y));
        assert_eq!(painted, vec![GridPoint::new(1, 0), GridPoint::new(2, 0)]);
        assert_eq!(editor.state().selection(), None);
    }

    #[test]
    fn test_idle_moves_ignored() {
        let mut editor = editor();
        assert!(!editor.apply(EditorEvent::PointerMove(screen(1, 1))));
        assert!(!editor.apply(EditorEvent::PointerUp(screen(1, 1))));
        assert!(editor.state().tiles().is_empty());
    }

    #[test]
    fn test_set_dimensions_clamp() {
        let mut editor = editor();
        assert!(editor.set_width(1000));
        assert_eq!(editor.state().dimensions().width, 50);
        assert!(editor.set_height(-5));
        assert_eq!(editor.state().dimensions().height, 1);
        assert_eq!(editor.state().tiles().len(), 50);
        assert!(!editor.set_height(0));

        assert!(editor.set_tile_size(4));
        assert_eq!(editor.state().dimensions().tile_size, 16);
        assert!(editor.set_tile_size(500));
        assert_eq!(editor.state().dimensions().tile_size, 128);
        assert!(!editor.set_tile_size(128));
        // Tile size doesn't touch the map
        assert_eq!(editor.state().tiles().len(), 50);
    }

    #[test]
    fn test_resize_drops_lost_selection() {
        let mut editor = editor();
        editor.apply(EditorEvent::PointerDown(screen(3, 3)));
        editor.apply(EditorEvent::PointerUp(screen(3, 3)));
        assert_eq!(editor.state().selection(), Some(GridPoint::new(3, 3)));

        editor.set_width(2);
        assert_eq!(editor.state().selection(), None);

        editor.apply(EditorEvent::PointerDown(screen(1, 1)));
        editor.apply(EditorEvent::PointerUp(screen(1, 1)));
        editor.set_height(10);
        assert_eq!(editor.state().selection(), Some(GridPoint::new(1, 1)));
    }

    #[test]
    fn test_remove_selected() {
        let mut editor = editor();
        assert_eq!(editor.remove_selected(), None);

        editor.apply(EditorEvent::PointerDown(screen(2, 2)));
        editor.apply(EditorEvent::PointerUp(screen(2, 2)));
        let removed = editor.remove_selected().unwrap();
        assert_eq!(removed.position(), GridPoint::new(2, 2));
        assert_eq!(editor.state().selection(), None);
        assert!(editor.state().tiles().is_empty());
    }

    #[test]
    fn test_add_tile_right_of_selection() {
        let mut editor = editor();
        assert!(!editor.add_tile_right_of_selection());

        editor.apply(EditorEvent::PointerDown(screen(2, 0)));
        editor.apply(EditorEvent::PointerUp(screen(2, 0)));
        editor.set_brush(TileType::Water);
        assert!(editor.apply(EditorEvent::AddTileRightOfSelection));
        assert_eq!(
            editor.state().tiles().find_at(3, 0).map(Tile::tile_type),
            Some(TileType::Water)
        );
        // Already occupied
        assert!(!editor.add_tile_right_of_selection());

        // (4, 0) is off the map
        editor.apply(EditorEvent::PointerDown(screen(3, 0)));
        editor.apply(EditorEvent::PointerUp(screen(3, 0)));
        assert!(!editor.add_tile_right_of_selection());
        assert_eq!(editor.state().tiles().len(), 2);
    }

    #[test]
    fn test_set_brush_by_name() {
        let mut editor = editor();
        editor.set_brush_by_name("mountain").unwrap();
        assert_eq!(editor.state().brush(), TileType::Mountain);

        let err = editor.set_brush_by_name("lava").unwrap_err();
        assert_eq!(err.to_string(), "unknown tile type \"lava\"");
        assert_eq!(editor.state().brush(), TileType::Mountain);
    }

    #[test]
    fn test_handle_renders_on_change() {
        let mut editor = editor();
        let mut surface = DrawList::default();
        let point = screen(0, 0);
        assert!(!editor.handle(EditorEvent::PointerDown(point), &mut surface));
        assert!(surface.is_empty());
        assert!(editor.handle(EditorEvent::PointerUp(point), &mut surface));
        assert!(!surface.is_empty());
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut editor = editor();
        let nan = Point2::new(f64::NAN, f64::NAN);
        assert_eq!(editor.cell_at_screen(nan), None);
        assert_eq!(editor.tile_at_screen(nan), None);

        // (0, 0) is empty, but NaN must not land on it
        assert!(!editor.apply(EditorEvent::PointerDown(nan)));
        assert_eq!(editor.state().pointer(), PointerState::Idle);
        assert!(!editor.apply(EditorEvent::PointerUp(nan)));
        assert!(editor.state().tiles().is_empty());
        assert_eq!(editor.state().selection(), None);

        // Mid-drag, a non-finite move paints nothing and a non-finite release
        // isn't a click
        let inf = Point2::new(f64::INFINITY, 0.0);
        editor.apply(EditorEvent::PointerDown(screen(1, 1)));
        assert!(!editor.apply(EditorEvent::PointerMove(inf)));
        assert!(!editor.apply(EditorEvent::PointerUp(inf)));
        assert!(editor.state().tiles().is_empty());
        assert_eq!(editor.state().selection(), None);
        assert_eq!(editor.state().pointer(), PointerState::Idle);
    }

    #[test]
    fn test_terrain_resize_uses_generator() {
        let mut editor = Editor::new(
            EditorConfig {
                generator: MapGenerator::Terrain { seed: 5 },
                ..Default::default()
            },
            RenderConfig::default(),
        )
        .unwrap();
        editor.set_width(15);
        editor.set_height(15);
        assert_eq!(
            editor.state().tiles().find_at(7, 7).map(Tile::tile_type),
            Some(TileType::Mountain)
        );
    }
}
