pub mod crack;
pub mod geometry;

pub use crack::*;
pub use geometry::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SectionError {
    #[error("Invalid geometry: {field} must be positive (got {value})")]
    InvalidGeometry { field: &'static str, value: f64 },

    #[error("Invalid crack: depth {depth} m must be in [0, {height}) m")]
    InvalidCrack { depth: f64, height: f64 },

    #[error("Crack at x = {position} m lies outside the span [0, {length}] m")]
    CrackOutsideSpan { position: f64, length: f64 },
}
