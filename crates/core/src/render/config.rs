use crate::Vector2;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

/// Configuration specific to drawing the map. These options have absolutely
/// no bearing on the map's _contents_ (see
/// [EditorConfig](crate::EditorConfig) for that), only on its presentation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of the drawing surface, in pixels. The render pass clears this
    /// much of the surface before drawing.
    #[validate(range(min = 1))]
    pub canvas_width: u32,

    /// Height of the drawing surface, in pixels
    #[validate(range(min = 1))]
    pub canvas_height: u32,

    /// Screen position of grid cell `(0, 0)`'s top vertex. This is also the
    /// origin used when converting pointer positions back to grid cells.
    pub offset: Vector2,

    /// What text (if any) is drawn on top of each tile
    pub label_mode: LabelMode,

    /// Should elevated tiles cast a drop shadow?
    pub show_shadows: bool,

    /// How far (in pixels) a tile's shadow drops per unit of elevation
    #[validate(range(min = 0.0))]
    pub shadow_offset_per_height: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            offset: Vector2::new(400.0, 200.0),
            label_mode: LabelMode::Height,
            show_shadows: true,
            shadow_offset_per_height: 8.0,
        }
    }
}

/// The text that gets drawn in the middle of each tile
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LabelMode {
    /// No labels
    None,
    /// The tile's grid cell, as `x,y`
    Coordinates,
    /// The tile's elevation, as `z:<elevation>`. Tiles on the ground plane
    /// get no label.
    Height,
}
