//! Shear force and bending moment by superposition
//!
//! ## Sign convention
//! - Positive shear: resultant of everything left of the cut acts upward
//! - Positive moment: sagging (tension on the bottom fiber)
//!
//! V and M jump at supports, point loads and point moments. A plain query uses
//! the left-continuous convention (forces exactly at x are excluded, couples
//! exactly at x are included). [`Side`] gives the exact one-sided limits, and
//! [`OneSidedValue::governing`] picks the design value at a jump.

use serde::{Deserialize, Serialize};

use crate::loads::LoadSet;
use crate::physics::statics::Reactions;
use crate::section::BeamSection;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InternalForceError {
    #[error("Query at x = {x} m is outside the span [0, {length}] m")]
    OutOfRangeQuery { x: f64, length: f64 },
}

/// Which one-sided limit to take at x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Limit from the left: concentrated actions at x are excluded
    Left,
    /// Limit from the right: concentrated actions at x are included
    Right,
}

impl Side {
    fn includes(self, position: f64, x: f64) -> bool {
        match self {
            Side::Left => position < x - POSITION_TOLERANCE,
            Side::Right => position <= x + POSITION_TOLERANCE,
        }
    }
}

/// Values on either side of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneSidedValue {
    pub left: f64,
    pub right: f64,
}

impl OneSidedValue {
    pub fn is_discontinuous(&self) -> bool {
        (self.left - self.right).abs() > POSITION_TOLERANCE
    }

    /// Design value at the section
    ///
    /// Larger magnitude wins; on equal magnitude the more positive value wins.
    pub fn governing(&self) -> f64 {
        let (l, r) = (self.left, self.right);
        if l.abs() > r.abs() {
            l
        } else if r.abs() > l.abs() {
            r
        } else {
            l.max(r)
        }
    }
}

/// Governing internal forces at a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    pub x: f64,
    /// Shear (kN)
    pub shear: OneSidedValue,
    /// Moment (kN·m)
    pub moment: OneSidedValue,
}

impl InternalForces {
    pub fn governing_shear(&self) -> Force {
        from_kn(self.shear.governing())
    }

    pub fn governing_moment(&self) -> Torque {
        from_kn_m(self.moment.governing())
    }
}

/// Evaluates V(x) and M(x) for a solved beam
#[derive(Debug, Clone, Copy)]
pub struct InternalForceEvaluator<'a> {
    section: &'a BeamSection,
    loads: &'a LoadSet,
    reactions: &'a Reactions,
}

impl<'a> InternalForceEvaluator<'a> {
    pub fn new(section: &'a BeamSection, loads: &'a LoadSet, reactions: &'a Reactions) -> Self {
        Self {
            section,
            loads,
            reactions,
        }
    }

    fn check_range(&self, x: f64) -> Result<(), InternalForceError> {
        if x.is_finite() && self.section.contains_x(x) {
            Ok(())
        } else {
            Err(InternalForceError::OutOfRangeQuery {
                x,
                length: self.section.length(),
            })
        }
    }

    /// Shear force at x (left-continuous)
    pub fn shear_force(&self, x: Length) -> Result<Force, InternalForceError> {
        let x = to_coord(x);
        self.check_range(x)?;
        Ok(from_kn(self.shear_raw(x, Side::Left)))
    }

    /// Bending moment at x (couples at x included)
    pub fn bending_moment(&self, x: Length) -> Result<Torque, InternalForceError> {
        let x = to_coord(x);
        self.check_range(x)?;
        Ok(from_kn_m(self.moment_raw(x, Side::Left, Side::Right)))
    }

    pub fn shear_limits(&self, x: f64) -> Result<OneSidedValue, InternalForceError> {
        self.check_range(x)?;
        Ok(OneSidedValue {
            left: self.shear_raw(x, Side::Left),
            right: self.shear_raw(x, Side::Right),
        })
    }

    pub fn moment_limits(&self, x: f64) -> Result<OneSidedValue, InternalForceError> {
        self.check_range(x)?;
        Ok(OneSidedValue {
            left: self.moment_raw(x, Side::Left, Side::Left),
            right: self.moment_raw(x, Side::Right, Side::Right),
        })
    }

    /// Both one-sided limits of V and M at x
    pub fn internal_forces_at(&self, x: f64) -> Result<InternalForces, InternalForceError> {
        Ok(InternalForces {
            x,
            shear: self.shear_limits(x)?,
            moment: self.moment_limits(x)?,
        })
    }

    /// V at x (kN); `side` decides concentrated forces located exactly at x
    pub fn shear_raw(&self, x: f64, side: Side) -> f64 {
        let reactions: f64 = self
            .reactions
            .iter()
            .filter(|r| side.includes(r.support.position, x))
            .map(|r| r.force)
            .sum();
        let points: f64 = self
            .loads
            .point_loads()
            .iter()
            .filter(|p| side.includes(p.position, x))
            .map(|p| p.magnitude)
            .sum();
        let lines: f64 = self
            .loads
            .distributed_loads()
            .iter()
            .filter(|d| d.start < x)
            .map(|d| d.intensity * d.overlap_until(x))
            .sum();

        log::trace!("V({:.4}) = {:.4} - {:.4} - {:.4}", x, reactions, points, lines);
        reactions - points - lines
    }

    /// M at x (kN·m); forces and couples take their own side
    pub fn moment_raw(&self, x: f64, force_side: Side, couple_side: Side) -> f64 {
        let reactions: f64 = self
            .reactions
            .iter()
            .filter(|r| force_side.includes(r.support.position, x))
            .map(|r| r.force * (x - r.support.position))
            .sum();
        let points: f64 = self
            .loads
            .point_loads()
            .iter()
            .filter(|p| force_side.includes(p.position, x))
            .map(|p| p.magnitude * (x - p.position))
            .sum();
        let lines: f64 = self
            .loads
            .distributed_loads()
            .iter()
            .filter(|d| d.start < x)
            .map(|d| {
                let (resultant, centroid) = d.partial_resultant(x);
                resultant * (x - centroid)
            })
            .sum();
        let couples: f64 = self
            .loads
            .point_moments()
            .iter()
            .filter(|m| couple_side.includes(m.position, x))
            .map(|m| m.magnitude)
            .sum();

        log::trace!("M({:.4}) = {:.4} - {:.4} - {:.4} + {:.4}", x, reactions, points, lines, couples);
        reactions - points - lines + couples
    }

    /// Sorted, de-duplicated positions where V or M can jump
    pub fn discontinuities(&self) -> Vec<f64> {
        let mut positions: Vec<f64> = self
            .reactions
            .iter()
            .map(|r| r.support.position)
            .chain(self.loads.concentrated_positions())
            .collect();
        positions.sort_by(|a, b| a.total_cmp(b));
        positions.dedup_by(|a, b| (*a - *b).abs() <= POSITION_TOLERANCE);
        positions
    }

    pub fn section(&self) -> &BeamSection {
        self.section
    }
}
