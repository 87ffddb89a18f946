//! Rectangular beam geometry
//!
//! # Coordinate system
//!
//! - **x**: along the span, 0 at the left end, L at the right end
//! - **y**: vertical, measured from the geometric centroid, up(+)
//! - **z**: across the width, measured from the centroid
//!
//! All coordinates are stored in **METERS**. Public constructors accept UOM
//! types and convert at the boundary.

use crate::section::SectionError;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Immutable rectangular cross-section carried along the full span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamDimensions")]
pub struct BeamSection {
    length: f64,
    height: f64,
    width: f64,
    second_moment: f64,
}

/// Serialized form of a section; I is always recomputed on the way in
#[derive(Debug, Clone, Copy, Deserialize)]
struct BeamDimensions {
    length: f64,
    height: f64,
    width: f64,
}

impl TryFrom<BeamDimensions> for BeamSection {
    type Error = SectionError;

    fn try_from(dims: BeamDimensions) -> Result<Self, Self::Error> {
        BeamSection::from_meters(dims.length, dims.height, dims.width)
    }
}

impl BeamSection {
    /// Create a section from UOM lengths
    pub fn new(length: Length, height: Length, width: Length) -> Result<Self, SectionError> {
        Self::from_meters(to_coord(length), to_coord(height), to_coord(width))
    }

    /// Create a section from raw dimensions (meters)
    pub fn from_meters(length: f64, height: f64, width: f64) -> Result<Self, SectionError> {
        for (field, value) in [("length", length), ("height", height), ("width", width)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SectionError::InvalidGeometry {
                    field,
                    value,
                });
            }
        }

        Ok(Self {
            length,
            height,
            width,
            second_moment: width * height.powi(3) / 12.0,
        })
    }

    /// Span length (m)
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Section depth (m)
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Section width (m)
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Gross area (m²)
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Uncracked second moment of area, I = w·h³/12 (m⁴)
    pub fn second_moment_of_area(&self) -> f64 {
        self.second_moment
    }

    pub fn span(&self) -> Length {
        from_coord(self.length)
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= -POSITION_TOLERANCE && x <= self.length + POSITION_TOLERANCE
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y.abs() <= self.half_height() + POSITION_TOLERANCE
    }

    pub fn contains_z(&self, z: f64) -> bool {
        z.abs() <= self.width / 2.0 + POSITION_TOLERANCE
    }
}

/// First moment of area of a rectangular strip about a horizontal axis
///
/// Integrates `width · (η - neutral_axis) dη` from `lower` to `upper`, so the
/// result is signed: material above the axis counts positive. Summing the strip
/// from any fiber to the extreme fiber is the Q used in the shear formula.
pub fn first_moment_of_area(width: f64, lower: f64, upper: f64, neutral_axis: f64) -> f64 {
    if upper <= lower {
        return 0.0;
    }
    let area = width * (upper - lower);
    let centroid = (upper + lower) / 2.0;
    area * (centroid - neutral_axis)
}
