pub mod conversion;
pub mod units;

pub use uom::si::f64::{Force, Length, Pressure, Torque};
pub use uom::si::{force, length, pressure, torque};

pub use conversion::*;
pub use units::{
    DisplayForce, DisplayLength, DisplayMoment, DisplayStress, ForceValue, IntensityValue,
    LengthValue, LineLoadIntensity, MomentValue, StressValue, UnitError, WithUnit,
};

// Re-export nalgebra
pub use nalgebra as na;

// Standard units we use internally (just documentation)
/// Internal standard: meters
pub const INTERNAL_LENGTH_UNIT: &str = "meters";
/// Internal standard: kilonewtons
pub const INTERNAL_FORCE_UNIT: &str = "kilonewtons";
/// Internal standard: kilonewton-meters
pub const INTERNAL_MOMENT_UNIT: &str = "kilonewton-meters";
/// Internal standard: megapascals
pub const INTERNAL_STRESS_UNIT: &str = "megapascals";

/// Positions closer than this (meters) are treated as the same location
pub const POSITION_TOLERANCE: f64 = 1e-9;

/// Crack lookups match positions within this distance (meters)
pub const CRACK_POSITION_TOLERANCE: f64 = 1e-6;
