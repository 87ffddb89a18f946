//! Bending and transverse shear stress at a point
//!
//! The stress state is planar: only σxx (bending) and τxy (transverse shear)
//! are populated. Axial force is not modelled, so σxx comes from bending alone.
//!
//! Units: moments in kN·m, shears in kN, lengths in m. Stresses come out in
//! kN/m² and are reported in MPa.

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::section::{first_moment_of_area, BeamSection, CrackMap, SectionProperties};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StressError {
    #[error("Query at x = {x} m is outside the span [0, {length}] m")]
    OutOfRangeX { x: f64, length: f64 },

    #[error("Fiber y = {y} m is outside the section [-{half_height}, {half_height}] m")]
    OutOfRangeY { y: f64, half_height: f64 },

    #[error("Point z = {z} m is outside the section width [-{half_width}, {half_width}] m")]
    OutOfRangeZ { z: f64, half_width: f64 },
}

/// Planar stress state at one point (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    pub sigma_xx: f64,
    pub tau_xy: f64,
}

impl StressState {
    pub const ZERO: StressState = StressState {
        sigma_xx: 0.0,
        tau_xy: 0.0,
    };

    /// Full 3×3 Cauchy tensor; everything but σxx and τxy is zero
    pub fn tensor(&self) -> na::Matrix3<f64> {
        na::Matrix3::new(
            self.sigma_xx, self.tau_xy, 0.0,
            self.tau_xy, 0.0, 0.0,
            0.0, 0.0, 0.0,
        )
    }

    pub fn principal(&self) -> PrincipalStresses {
        principal_stresses(self.sigma_xx, self.tau_xy)
    }

    pub fn normal(&self) -> Pressure {
        from_mpa(self.sigma_xx)
    }

    pub fn shear(&self) -> Pressure {
        from_mpa(self.tau_xy)
    }
}

/// In-plane principal stresses, σ1 ≥ σ2 (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalStresses {
    pub sigma1: f64,
    pub sigma2: f64,
}

impl PrincipalStresses {
    /// Radius of Mohr's circle
    pub fn max_shear(&self) -> f64 {
        (self.sigma1 - self.sigma2) / 2.0
    }
}

/// σ1,2 = σ/2 ± √((σ/2)² + τ²)
pub fn principal_stresses(sigma_xx: f64, tau_xy: f64) -> PrincipalStresses {
    let center = sigma_xx / 2.0;
    let radius = center.hypot(tau_xy);
    PrincipalStresses {
        sigma1: center + radius,
        sigma2: center - radius,
    }
}

/// Converts internal forces at a section into point stresses
#[derive(Debug, Clone, Copy)]
pub struct StressEngine<'a> {
    section: &'a BeamSection,
    cracks: &'a CrackMap,
}

impl<'a> StressEngine<'a> {
    pub fn new(section: &'a BeamSection, cracks: &'a CrackMap) -> Self {
        Self { section, cracks }
    }

    pub fn properties_at(&self, x: f64) -> SectionProperties {
        self.cracks.properties_at(self.section, x)
    }

    /// Stress at (x, y, z) under bending moment `moment` and shear `shear`
    ///
    /// Callers at a load or support location should pass the governing
    /// one-sided values.
    pub fn stress_at(
        &self,
        x: Length,
        y: Length,
        z: Length,
        moment: Torque,
        shear: Force,
    ) -> Result<StressState, StressError> {
        self.stress_at_raw(to_coord(x), to_coord(y), to_coord(z), to_kn_m(moment), to_kn(shear))
    }

    pub fn stress_at_raw(
        &self,
        x: f64,
        y: f64,
        z: f64,
        moment: f64,
        shear: f64,
    ) -> Result<StressState, StressError> {
        self.check_point(x, y, z)?;
        let props = self.properties_at(x);

        if props.is_in_crack(y) {
            return Ok(StressState::ZERO);
        }

        let i_eff = props.effective_second_moment;
        let sigma_xx = -moment * (y - props.neutral_axis) / i_eff * KPA_TO_MPA;

        let tau_xy = if (props.top_fiber - y).abs() <= POSITION_TOLERANCE {
            0.0
        } else {
            let q = first_moment_of_area(props.width, y, props.top_fiber, props.neutral_axis);
            -shear * q / (i_eff * props.width) * KPA_TO_MPA
        };

        log::trace!(
            "stress at ({:.4}, {:.4}, {:.4}): sxx = {:.4} MPa, txy = {:.4} MPa",
            x, y, z, sigma_xx, tau_xy
        );

        Ok(StressState { sigma_xx, tau_xy })
    }

    fn check_point(&self, x: f64, y: f64, z: f64) -> Result<(), StressError> {
        if !x.is_finite() || !self.section.contains_x(x) {
            return Err(StressError::OutOfRangeX {
                x,
                length: self.section.length(),
            });
        }
        if !y.is_finite() || !self.section.contains_y(y) {
            return Err(StressError::OutOfRangeY {
                y,
                half_height: self.section.half_height(),
            });
        }
        if !z.is_finite() || !self.section.contains_z(z) {
            return Err(StressError::OutOfRangeZ {
                z,
                half_width: self.section.width() / 2.0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::section::Crack;

    fn beam() -> BeamSection {
        BeamSection::from_meters(4.0, 0.4, 0.2).unwrap()
    }

    #[test]
    fn test_bending_stress_extreme_fibers() {
        let section = beam();
        let cracks = CrackMap::new();
        let engine = StressEngine::new(&section, &cracks);

        // σ = M·c/I = 10 · 0.2 / (0.2·0.4³/12) kPa = 1.875 MPa
        let top = engine.stress_at_raw(2.0, 0.2, 0.0, 10.0, 0.0).unwrap();
        let bottom = engine.stress_at_raw(2.0, -0.2, 0.0, 10.0, 0.0).unwrap();
        assert_relative_eq!(top.sigma_xx, -1.875, epsilon = 1e-9);
        assert_relative_eq!(bottom.sigma_xx, 1.875, epsilon = 1e-9);
        assert_eq!(top.tau_xy, 0.0);
    }

    #[test]
    fn test_shear_stress_peak_at_centroid() {
        let section = beam();
        let cracks = CrackMap::new();
        let engine = StressEngine::new(&section, &cracks);

        // τmax = 1.5·V/A = 1.5 · 5 / 0.08 kPa
        let mid = engine.stress_at_raw(1.0, 0.0, 0.0, 0.0, 5.0).unwrap();
        assert_relative_eq!(mid.tau_xy, -1.5 * 5.0 / 0.08 / 1000.0, epsilon = 1e-12);
        assert_eq!(mid.sigma_xx, 0.0);

        let bottom = engine.stress_at_raw(1.0, -0.2, 0.0, 0.0, 5.0).unwrap();
        assert_relative_eq!(bottom.tau_xy, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cracked_section_stresses() {
        let section = beam();
        let mut cracks = CrackMap::new();
        cracks.insert(&section, Crack::from_meters(&section, 2.0, 0.1).unwrap()).unwrap();
        let engine = StressEngine::new(&section, &cracks);

        // Material at or below the crack tip carries nothing
        assert_eq!(engine.stress_at_raw(2.0, -0.15, 0.0, 10.0, 5.0).unwrap(), StressState::ZERO);
        assert_eq!(engine.stress_at_raw(2.0, -0.1, 0.0, 10.0, 5.0).unwrap(), StressState::ZERO);

        // Neutral axis moved up to y = 0.05
        let at_na = engine.stress_at_raw(2.0, 0.05, 0.0, 10.0, 5.0).unwrap();
        assert_relative_eq!(at_na.sigma_xx, 0.0, epsilon = 1e-12);
        // τmax = 1.5·V/(w·(h-d))
        assert_relative_eq!(at_na.tau_xy, -1.5 * 5.0 / (0.2 * 0.3) / 1000.0, epsilon = 1e-12);

        // Top fiber: c = 0.15, I = 0.2·0.3³/12
        let top = engine.stress_at_raw(2.0, 0.2, 0.0, 10.0, 5.0).unwrap();
        assert_relative_eq!(top.sigma_xx, -10.0 * 0.15 / (0.2 * 0.027 / 12.0) / 1000.0, epsilon = 1e-9);
        assert_eq!(top.tau_xy, 0.0);

        // Elsewhere the section is intact
        let away = engine.stress_at_raw(1.0, 0.2, 0.0, 10.0, 0.0).unwrap();
        assert_relative_eq!(away.sigma_xx, -1.875, epsilon = 1e-9);
    }

    #[test]
    fn test_shear_below_cracked_neutral_axis() {
        let section = beam();
        let mut cracks = CrackMap::new();
        cracks.insert(&section, Crack::from_meters(&section, 2.0, 0.1).unwrap()).unwrap();
        let engine = StressEngine::new(&section, &cracks);

        // Parabolic over the remaining 0.3 m: symmetric about the shifted axis
        let above = engine.stress_at_raw(2.0, 0.05 + 0.08, 0.0, 0.0, 5.0).unwrap();
        let below = engine.stress_at_raw(2.0, 0.05 - 0.08, 0.0, 0.0, 5.0).unwrap();
        assert_relative_eq!(above.tau_xy, below.tau_xy, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_points() {
        let section = beam();
        let cracks = CrackMap::new();
        let engine = StressEngine::new(&section, &cracks);

        assert!(matches!(
            engine.stress_at_raw(2.0, 0.25, 0.0, 1.0, 1.0),
            Err(StressError::OutOfRangeY { .. })
        ));
        assert!(matches!(
            engine.stress_at_raw(2.0, 0.0, 0.15, 1.0, 1.0),
            Err(StressError::OutOfRangeZ { .. })
        ));
        assert!(matches!(
            engine.stress_at_raw(-1.0, 0.0, 0.0, 1.0, 1.0),
            Err(StressError::OutOfRangeX { .. })
        ));
    }

    #[test]
    fn test_principal_stresses_without_shear() {
        let p = principal_stresses(12.0, 0.0);
        assert_eq!((p.sigma1, p.sigma2), (12.0, 0.0));

        let p = principal_stresses(-12.0, 0.0);
        assert_eq!((p.sigma1, p.sigma2), (0.0, -12.0));
    }

    #[test]
    fn test_principal_stresses_match_tensor_eigenvalues() {
        for (sxx, txy) in [(3.0, 4.0), (-2.5, 1.2), (0.0, -3.0), (7.0, 0.5)] {
            let state = StressState { sigma_xx: sxx, tau_xy: txy };
            let principal = state.principal();
            let eig = state.tensor().symmetric_eigen();

            assert!(principal.sigma1 >= principal.sigma2);
            assert_relative_eq!(principal.sigma1, eig.eigenvalues.max(), epsilon = 1e-9);
            assert_relative_eq!(principal.sigma2, eig.eigenvalues.min(), epsilon = 1e-9);
            assert_relative_eq!(principal.max_shear(), (sxx / 2.0).hypot(txy), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tensor_layout() {
        let t = StressState { sigma_xx: 2.0, tau_xy: -1.0 }.tensor();
        assert_eq!(t[(0, 0)], 2.0);
        assert_eq!(t[(0, 1)], -1.0);
        assert_eq!(t[(1, 0)], -1.0);
        assert_eq!(t[(1, 1)], 0.0);
        assert_eq!(t[(2, 2)], 0.0);
    }
}
