//! Water surface records

use std::fmt;

use crate::error::Error;

/// Visibility and depth class of a water surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WaterFlag {
    /// Deep water, not rendered
    DefaultInvisible = 0,
    /// Deep water, rendered
    #[default]
    DefaultVisible = 1,
    /// Shallow water, not rendered
    ShallowInvisible = 2,
    /// Shallow water, rendered
    ShallowVisible = 3,
}

impl WaterFlag {
    /// Every flag in numeric order
    pub const ALL: [WaterFlag; 4] = [
        Self::DefaultInvisible,
        Self::DefaultVisible,
        Self::ShallowInvisible,
        Self::ShallowVisible,
    ];

    /// Numeric value written to the file
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Whether the surface is rendered
    pub fn is_visible(self) -> bool {
        matches!(self, Self::DefaultVisible | Self::ShallowVisible)
    }

    /// Whether the surface is shallow water
    pub fn is_shallow(self) -> bool {
        matches!(self, Self::ShallowInvisible | Self::ShallowVisible)
    }
}

impl TryFrom<i64> for WaterFlag {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::DefaultInvisible),
            1 => Ok(Self::DefaultVisible),
            2 => Ok(Self::ShallowInvisible),
            3 => Ok(Self::ShallowVisible),
            other => Err(Error::InvalidFlag(other)),
        }
    }
}

impl fmt::Display for WaterFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DefaultInvisible => "default, invisible",
            Self::DefaultVisible => "default, visible",
            Self::ShallowInvisible => "shallow, invisible",
            Self::ShallowVisible => "shallow, visible",
        };
        f.write_str(name)
    }
}

/// One corner of a water surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterVertex {
    /// World position
    pub position: [f64; 3],
    /// Flow direction (U, V)
    pub flow_direction: [f64; 2],
    /// Unidentified height value, kept as-is
    pub unknown_height: f64,
    /// Wave height
    pub wave_height: f64,
}

impl WaterVertex {
    /// Number of fields a vertex occupies in a record
    pub const FIELDS: usize = 7;

    /// A still vertex at `position`
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub(crate) fn from_fields(fields: [f64; Self::FIELDS]) -> Self {
        let [x, y, z, u, v, unknown_height, wave_height] = fields;
        Self {
            position: [x, y, z],
            flow_direction: [u, v],
            unknown_height,
            wave_height,
        }
    }
}

/// Corners of a surface; the count fixes the record layout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceVertices {
    /// Three corners, 22 fields on disk
    Triangle([WaterVertex; 3]),
    /// Four corners, 29 fields on disk
    Quad([WaterVertex; 4]),
}

impl SurfaceVertices {
    /// Corners in storage order
    pub fn as_slice(&self) -> &[WaterVertex] {
        match self {
            Self::Triangle(v) => v,
            Self::Quad(v) => v,
        }
    }

    /// Number of corners
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Always false, a surface has at least three corners
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Record length in fields, including the flag
    pub fn field_count(&self) -> usize {
        self.len() * WaterVertex::FIELDS + 1
    }

    /// Order in which corners are written to disk
    pub fn write_order(&self) -> &'static [usize] {
        match self {
            Self::Triangle(_) => &[0, 2, 1],
            Self::Quad(_) => &[0, 1, 3, 2],
        }
    }
}

/// One water polygon
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterSurface {
    /// Corners in storage order
    pub vertices: SurfaceVertices,
    /// Visibility and depth class
    pub flag: WaterFlag,
}

impl WaterSurface {
    /// A triangular surface
    pub fn triangle(vertices: [WaterVertex; 3], flag: WaterFlag) -> Self {
        Self {
            vertices: SurfaceVertices::Triangle(vertices),
            flag,
        }
    }

    /// A quadrilateral surface
    pub fn quad(vertices: [WaterVertex; 4], flag: WaterFlag) -> Self {
        Self {
            vertices: SurfaceVertices::Quad(vertices),
            flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_classes() {
        let visible: Vec<_> = WaterFlag::ALL.iter().map(|f| f.is_visible()).collect();
        let shallow: Vec<_> = WaterFlag::ALL.iter().map(|f| f.is_shallow()).collect();
        assert_eq!(visible, vec![false, true, false, true]);
        assert_eq!(shallow, vec![false, false, true, true]);
    }

    #[test]
    fn test_flag_conversion() {
        assert_eq!(WaterFlag::try_from(3).unwrap(), WaterFlag::ShallowVisible);
        assert!(matches!(WaterFlag::try_from(4), Err(Error::InvalidFlag(4))));
        assert!(matches!(WaterFlag::try_from(-1), Err(Error::InvalidFlag(-1))));
    }

    #[test]
    fn test_field_counts() {
        let tri = WaterSurface::triangle([WaterVertex::default(); 3], WaterFlag::default());
        let quad = WaterSurface::quad([WaterVertex::default(); 4], WaterFlag::default());
        assert_eq!(tri.vertices.field_count(), 22);
        assert_eq!(quad.vertices.field_count(), 29);
    }
}
