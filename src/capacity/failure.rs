//! Strength checks against ultimate limits
//!
//! Two criteria are provided and they are not interchangeable:
//! - [`FailureCriterion::PrincipalStress`] transforms to principal stresses first
//!   (Mohr's circle) and compares σ1, σ2 and τxy to the limits.
//! - [`FailureCriterion::ComponentBox`] compares σxx and τxy to the limits
//!   directly. This is the envelope drawn on failure plots.
//!
//! A point with combined bending and shear can pass the box and still fail the
//! principal-stress check, because σ1 > σxx whenever τxy ≠ 0.

use serde::{Deserialize, Serialize};

use crate::physics::stress::{principal_stresses, StressState};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FailureError {
    #[error("Ultimate {name} strength must be positive (got {value} MPa)")]
    InvalidLimit { name: &'static str, value: f64 },
}

/// Ultimate strengths, all given as positive magnitudes (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureLimits {
    pub ultimate_tensile: f64,
    pub ultimate_compressive: f64,
    pub ultimate_shear: f64,
}

impl FailureLimits {
    pub fn new(tensile: Pressure, compressive: Pressure, shear: Pressure) -> Result<Self, FailureError> {
        Self::from_mpa(to_mpa(tensile), to_mpa(compressive), to_mpa(shear))
    }

    pub fn from_mpa(tensile: f64, compressive: f64, shear: f64) -> Result<Self, FailureError> {
        for (name, value) in [("tensile", tensile), ("compressive", compressive), ("shear", shear)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FailureError::InvalidLimit { name, value });
            }
        }
        Ok(Self {
            ultimate_tensile: tensile,
            ultimate_compressive: compressive,
            ultimate_shear: shear,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureMode {
    TensileExceeded,
    CompressiveExceeded,
    ShearExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyVerdict {
    Safe,
    Unsafe(Vec<FailureMode>),
}

impl SafetyVerdict {
    fn from_modes(modes: Vec<FailureMode>) -> Self {
        if modes.is_empty() {
            SafetyVerdict::Safe
        } else {
            SafetyVerdict::Unsafe(modes)
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }

    pub fn modes(&self) -> &[FailureMode] {
        match self {
            SafetyVerdict::Safe => &[],
            SafetyVerdict::Unsafe(modes) => modes,
        }
    }
}

/// Principal-stress (Mohr) check
pub fn check_safety(sigma1: f64, sigma2: f64, tau_xy: f64, limits: &FailureLimits) -> SafetyVerdict {
    let mut modes = Vec::new();
    if sigma1 > limits.ultimate_tensile {
        modes.push(FailureMode::TensileExceeded);
    }
    if sigma2 < -limits.ultimate_compressive {
        modes.push(FailureMode::CompressiveExceeded);
    }
    if tau_xy.abs() > limits.ultimate_shear {
        modes.push(FailureMode::ShearExceeded);
    }
    SafetyVerdict::from_modes(modes)
}

/// Direct σxx / τxy box check
pub fn check_components(sigma_xx: f64, tau_xy: f64, limits: &FailureLimits) -> SafetyVerdict {
    let mut modes = Vec::new();
    if sigma_xx > limits.ultimate_tensile {
        modes.push(FailureMode::TensileExceeded);
    }
    if sigma_xx < -limits.ultimate_compressive {
        modes.push(FailureMode::CompressiveExceeded);
    }
    if tau_xy.abs() > limits.ultimate_shear {
        modes.push(FailureMode::ShearExceeded);
    }
    SafetyVerdict::from_modes(modes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCriterion {
    #[default]
    PrincipalStress,
    ComponentBox,
}

impl FailureCriterion {
    pub fn assess(&self, stress: &StressState, limits: &FailureLimits) -> SafetyVerdict {
        match self {
            FailureCriterion::PrincipalStress => {
                let p = principal_stresses(stress.sigma_xx, stress.tau_xy);
                check_safety(p.sigma1, p.sigma2, stress.tau_xy, limits)
            }
            FailureCriterion::ComponentBox => check_components(stress.sigma_xx, stress.tau_xy, limits),
        }
    }

    /// Largest demand/capacity ratio under this criterion (> 1.0 fails)
    pub fn utilization(&self, stress: &StressState, limits: &FailureLimits) -> f64 {
        let (tension, compression) = match self {
            FailureCriterion::PrincipalStress => {
                let p = principal_stresses(stress.sigma_xx, stress.tau_xy);
                (p.sigma1, p.sigma2)
            }
            FailureCriterion::ComponentBox => (stress.sigma_xx, stress.sigma_xx),
        };

        let tensile = tension.max(0.0) / limits.ultimate_tensile;
        let compressive = (-compression).max(0.0) / limits.ultimate_compressive;
        let shear = stress.tau_xy.abs() / limits.ultimate_shear;
        tensile.max(compressive).max(shear)
    }
}
