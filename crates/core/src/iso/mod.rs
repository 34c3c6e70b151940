//! This module holds the math that connects the map grid to the screen.
//!
//! ## Coordinate Systems
//!
//! ### Grid Coordinates
//!
//! Every tile lives on a cell of a rectangular grid, identified by an integer
//! `(x, y)` pair ([GridPoint]). A `width`×`height` map covers the cells
//! `[0, width) × [0, height)`. Each tile also has an elevation `z`, which is
//! **not** a third grid axis: tiles can't stack, `z` only lifts a tile up (or
//! sinks it down, for water) when it's drawn.
//!
//! ### Screen Coordinates
//!
//! Screen coordinates ([Point2]) are pixels on the drawing surface. The
//! origin is the top-left corner of the surface, `+x` is right and `+y` is
//! down.
//!
//! ```text
//! o----> +x
//! |
//! v
//! +y
//! ```
//!
//! #### Calculation
//!
//! The grid is projected with the standard 2:1 isometric convention: the grid
//! `x` axis points down-right on screen, the grid `y` axis points down-left,
//! and a tile is drawn as a diamond twice as wide as it is tall. For a tile
//! size `s` and a centering offset `o`:
//!
//! ```text
//! screen_x = (x - y) * s/2          + o.x
//! screen_y = (x + y) * s/4 - z * s/4 + o.y
//! ```
//!
//! The projected point is the **top** vertex of the tile's diamond. See
//! [tile_vertices] for the other three.
//!
//! Going back from screen to grid ([screen_to_grid]) inverts the `x`/`y` terms
//! only. A screen point doesn't say which tile's elevation it was drawn at, so
//! the inverse assumes `z = 0`. Clicks on elevated tiles can therefore land on
//! a neighboring cell where tiles overlap visually; that's a known limitation
//! of the projection, not something callers should try to correct.
//!
//! ## Depth Ordering
//!
//! There is no depth buffer. Tiles are painted back to front, ordered by
//! [depth_key]. Elevation lowers the key, so taller tiles paint later and cover
//! the shadows and faces of the lower tiles around them.

mod unit;

pub use self::unit::*;

use nalgebra::{Matrix2x3, Vector3};

/// Project a grid position (plus elevation) into screen space. `tile_size` is
/// the pixel width of one tile's diamond, and `offset` is added to the result
/// to position the map on the surface. Total over all inputs; non-finite
/// input produces non-finite output.
pub fn grid_to_screen(
    x: f64,
    y: f64,
    z: f64,
    tile_size: f64,
    offset: Vector2,
) -> Point2 {
    let half = tile_size / 2.0;
    let quarter = tile_size / 4.0;

    // Columns are the contribution of one unit along grid x, grid y, and
    // elevation respectively
    #[rustfmt::skip]
    let projection = Matrix2x3::new(
        half,    -half,   0.0,
        quarter, quarter, -quarter,
    );

    Point2::from(projection * Vector3::new(x, y, z)) + offset
}

/// Convert a screen position back to the grid cell under it. This is the
/// algebraic inverse of the `x`/`y` terms of [grid_to_screen], assuming an
/// elevation of zero. Fractional results are rounded half away from zero.
///
/// The returned cell is **not** checked against any map bounds, use
/// [is_within_bounds] for that.
pub fn screen_to_grid(
    screen: Point2,
    tile_size: f64,
    offset: Vector2,
) -> GridPoint {
    let relative = screen - offset;
    let half = tile_size / 2.0;
    let quarter = tile_size / 4.0;

    let x = (relative.x / half + relative.y / quarter) / 2.0;
    let y = (relative.y / quarter - relative.x / half) / 2.0;
    // Float-to-int casts saturate, and NaN goes to 0
    GridPoint::new(x.round() as i32, y.round() as i32)
}

/// Painter's algorithm sort key for a tile. Lower keys are further from the
/// viewer and get painted first. Distinct tiles can share a key; the render
/// pass keeps those in their original order.
pub fn depth_key(x: i32, y: i32, z: f64) -> f64 {
    f64::from(y) + f64::from(x) - z
}

/// Is the cell `(x, y)` inside a map of the given size?
pub fn is_within_bounds(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

/// Euclidean distance between two points in grid space. Used by terrain
/// generation, it has nothing to do with projection.
pub fn planar_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Get the four vertices of a tile's diamond, given the screen position of
/// the tile (its top vertex). Clockwise, starting with the top: top, right,
/// bottom, left.
pub fn tile_vertices(position: Point2, tile_size: f64) -> [Point2; 4] {
    let half = tile_size / 2.0;
    let quarter = tile_size / 4.0;
    [
        position,
        position + Vector2::new(half, quarter),
        position + Vector2::new(0.0, half),
        position + Vector2::new(-half, quarter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_grid_to_screen() {
        assert_eq!(
            grid_to_screen(2.0, 3.0, 0.0, 64.0, Vector2::ZERO),
            Point2::new(-32.0, 80.0)
        );
        assert_eq!(
            grid_to_screen(0.0, 0.0, 0.0, 64.0, Vector2::new(400.0, 200.0)),
            Point2::new(400.0, 200.0)
        );

        // Elevation lifts the tile by a quarter tile per unit
        assert_eq!(
            grid_to_screen(2.0, 3.0, 2.0, 64.0, Vector2::ZERO),
            Point2::new(-32.0, 48.0)
        );
        // And negative elevation sinks it
        assert_eq!(
            grid_to_screen(2.0, 3.0, -1.0, 64.0, Vector2::ZERO),
            Point2::new(-32.0, 96.0)
        );
    }

    #[test]
    fn test_grid_to_screen_non_finite() {
        let point = grid_to_screen(f64::NAN, 0.0, 0.0, 64.0, Vector2::ZERO);
        assert!(point.x.is_nan());
        assert!(point.y.is_nan());

        let point =
            grid_to_screen(0.0, f64::INFINITY, 0.0, 64.0, Vector2::ZERO);
        assert_eq!(point.x, f64::NEG_INFINITY);
        assert_eq!(point.y, f64::INFINITY);
    }

    #[test]
    fn test_screen_to_grid() {
        assert_eq!(
            screen_to_grid(Point2::new(-32.0, 80.0), 64.0, Vector2::ZERO),
            GridPoint::new(2, 3)
        );
        assert_eq!(
            screen_to_grid(
                Point2::new(368.0, 280.0),
                64.0,
                Vector2::new(400.0, 200.0)
            ),
            GridPoint::new(2, 3)
        );

        // Points near a vertex snap to the nearest cell
        assert_eq!(
            screen_to_grid(Point2::new(-30.0, 83.0), 64.0, Vector2::ZERO),
            GridPoint::new(2, 3)
        );

        // No bounds checking
        assert_eq!(
            screen_to_grid(Point2::new(0.0, -160.0), 64.0, Vector2::ZERO),
            GridPoint::new(-5, -5)
        );
    }

    #[test]
    fn test_screen_to_grid_ignores_elevation() {
        // A tile at (2, 3) lifted by 2 is drawn where (1, 2) would be at z=0
        let lifted = grid_to_screen(2.0, 3.0, 2.0, 64.0, Vector2::ZERO);
        assert_eq!(
            screen_to_grid(lifted, 64.0, Vector2::ZERO),
            GridPoint::new(1, 2)
        );
    }

    #[test]
    fn test_screen_to_grid_rounding() {
        // Exactly halfway between cells along grid x rounds away from zero
        assert_eq!(
            screen_to_grid(Point2::new(16.0, 8.0), 64.0, Vector2::ZERO),
            GridPoint::new(1, 0)
        );
        assert_eq!(
            screen_to_grid(Point2::new(-16.0, -8.0), 64.0, Vector2::ZERO),
            GridPoint::new(-1, 0)
        );
    }

    #[test]
    fn test_depth_key() {
        assert_approx_eq!(depth_key(0, 0, 0.0), 0.0);
        assert_approx_eq!(depth_key(2, 3, 0.0), 5.0);
        assert_approx_eq!(depth_key(2, 3, 2.0), 3.0);
        assert_approx_eq!(depth_key(2, 3, -1.0), 6.0);
        // Ties are possible
        assert_approx_eq!(depth_key(1, 4, 0.0), depth_key(3, 3, 1.0));
    }

    #[test]
    fn test_is_within_bounds() {
        assert!(is_within_bounds(0, 0, 10, 10));
        assert!(is_within_bounds(9, 9, 10, 10));
        assert!(is_within_bounds(9, 0, 10, 1));
        assert!(!is_within_bounds(10, 0, 10, 10));
        assert!(!is_within_bounds(0, 10, 10, 10));
        assert!(!is_within_bounds(-1, 0, 10, 10));
        assert!(!is_within_bounds(0, -1, 10, 10));
        assert!(!is_within_bounds(0, 0, 0, 0));
        assert!(GridPoint::new(3, 4).is_within(4, 5));
        assert!(!GridPoint::new(4, 4).is_within(4, 5));
    }

    #[test]
    fn test_planar_distance() {
        assert_approx_eq!(planar_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_approx_eq!(planar_distance(3.0, 4.0, 0.0, 0.0), 5.0);
        assert_approx_eq!(planar_distance(7.5, 7.5, 7.5, 7.5), 0.0);
    }

    #[test]
    fn test_tile_vertices() {
        assert_eq!(
            tile_vertices(Point2::new(-32.0, 80.0), 64.0),
            [
                Point2::new(-32.0, 80.0),
                Point2::new(0.0, 96.0),
                Point2::new(-32.0, 112.0),
                Point2::new(-64.0, 96.0),
            ]
        );
    }
}
