use crate::{MapGenerator, NumRange, TileType};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration that defines an editor session: the starting map size, the
/// limits that user edits get clamped to, how the map is filled, and which
/// brush is active at startup.
///
/// This config has no bearing on how the map is _drawn_, see
/// [RenderConfig](crate::RenderConfig) for that.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_dimensions_in_limits"))]
pub struct EditorConfig {
    /// Size of the map when the editor starts
    #[validate]
    pub dimensions: MapDimensions,

    /// Bounds that every dimension edit is clamped to
    #[validate]
    pub limits: DimensionLimits,

    /// Fills the map at startup, and again whenever it's resized. Resizing
    /// always discards every tile on the map.
    pub generator: MapGenerator,

    /// The tile type that painting creates, until the user picks another
    pub brush: TileType,
}

/// Size of the map grid, and of each tile on screen
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapDimensions {
    /// Number of cells along the grid `x` axis
    #[validate(range(min = 1))]
    pub width: u32,

    /// Number of cells along the grid `y` axis
    #[validate(range(min = 1))]
    pub height: u32,

    /// Width of one tile's diamond, in pixels. The diamond is half as tall as
    /// it is wide.
    #[validate(range(min = 1))]
    pub tile_size: u32,
}

/// Limits on the values a user can give to [MapDimensions]. Edits outside
/// these bounds aren't rejected, they're clamped to the nearest bound.
/// Width and height always have a minimum of 1.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_tile_size_limits"))]
pub struct DimensionLimits {
    /// Maximum width and height of the map, in cells
    #[validate(range(min = 1, max = 1000))]
    pub max_dimension: u32,

    #[validate(range(min = 1))]
    pub min_tile_size: u32,

    #[validate(range(min = 1))]
    pub max_tile_size: u32,
}

impl EditorConfig {
    /// The "enhanced" layout: a bigger map filled with terrain from the given
    /// seed. Everything else is default.
    pub fn terrain(seed: u64) -> Self {
        Self {
            dimensions: MapDimensions {
                width: 15,
                height: 15,
                ..Default::default()
            },
            generator: MapGenerator::Terrain { seed },
            ..Default::default()
        }
    }
}

impl DimensionLimits {
    /// The range that width and height edits are clamped to
    pub fn dimension_range(&self) -> NumRange<i64> {
        NumRange::new(1, self.max_dimension.into())
    }

    /// The range that tile size edits are clamped to
    pub fn tile_size_range(&self) -> NumRange<i64> {
        NumRange::new(self.min_tile_size.into(), self.max_tile_size.into())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dimensions: MapDimensions::default(),
            limits: DimensionLimits::default(),
            generator: MapGenerator::default(),
            brush: TileType::default(),
        }
    }
}

impl Default for MapDimensions {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            tile_size: 64,
        }
    }
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self {
            max_dimension: 50,
            min_tile_size: 16,
            max_tile_size: 128,
        }
    }
}

fn validate_tile_size_limits(
    limits: &DimensionLimits,
) -> Result<(), ValidationError> {
    if limits.min_tile_size <= limits.max_tile_size {
        Ok(())
    } else {
        Err(ValidationError::new("min_tile_size_above_max"))
    }
}

fn validate_dimensions_in_limits(
    config: &EditorConfig,
) -> Result<(), ValidationError> {
    let MapDimensions {
        width,
        height,
        tile_size,
    } = config.dimensions;
    let limits = &config.limits;
    if width > limits.max_dimension || height > limits.max_dimension {
        Err(ValidationError::new("dimension_above_max"))
    } else if !limits.tile_size_range().contains(tile_size.into()) {
        Err(ValidationError::new("tile_size_out_of_range"))
    } else {
        Ok(())
    }
}

/// Seed fields have some fancy deserialization behavior implemented here.
///
/// - If the value is an integer that fits into `u64`, use that value
/// - If it's a string that can be parsed into a `u64`, use the parsed value
/// - If it's any other string, hash it and use the hash value
/// - If it's anything else (out of range number, float, array, etc.), error
///
/// Regardless of how the seed value is input, it will always be serialized
/// as a number.
pub(crate) mod serde_seed {
    use fnv::FnvHasher;
    use serde::{de::Visitor, Deserializer};
    use std::{
        convert::TryInto,
        fmt,
        hash::{Hash, Hasher},
    };

    /// Macro to make it easier to implement visit logic for different types
    macro_rules! impl_visit {
        ($fname:ident, $type:ty) => {
            fn $fname<E>(self, value: $type) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.try_into().map_err(|_| {
                    E::custom(format!("u64 out of range: {}", value))
                })
            }
        };
    }

    struct SeedVisitor;

    impl<'de> Visitor<'de> for SeedVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or string")
        }

        impl_visit!(visit_u8, u8);
        impl_visit!(visit_u16, u16);
        impl_visit!(visit_u32, u32);
        impl_visit!(visit_u64, u64);
        impl_visit!(visit_u128, u128);
        impl_visit!(visit_i8, i8);
        impl_visit!(visit_i16, i16);
        impl_visit!(visit_i32, i32);
        impl_visit!(visit_i64, i64);
        impl_visit!(visit_i128, i128);

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            match value.parse::<u64>() {
                Ok(seed) => Ok(seed),
                Err(_) => {
                    let mut hasher = FnvHasher::default();
                    value.hash(&mut hasher);
                    Ok(hasher.finish())
                }
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        // We can deserialize from a bunch of different types so we can't give
        // a type hint here
        deserializer.deserialize_any(SeedVisitor)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
        assert!(EditorConfig::terrain(3).validate().is_ok());
    }

    #[test]
    fn test_limit_ranges() {
        let limits = DimensionLimits::default();
        assert_eq!(limits.dimension_range(), NumRange::new(1, 50));
        assert_eq!(limits.tile_size_range(), NumRange::new(16, 128));
    }

    #[test]
    fn test_schema_validation() {
        let config = EditorConfig {
            dimensions: MapDimensions {
                width: 60,
                ..Default::default()
            },
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"), "{:?}", errors);
    }
}
