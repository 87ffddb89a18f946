//! Support reactions from global equilibrium
//!
//! Reactions are vertical, up(+). Moment equilibrium is taken about the first
//! support, clockwise(+), matching [`LoadSet::net_moment_about`].

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::loads::LoadSet;
use crate::section::BeamSection;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains vertical and horizontal translation
    Pin,
    /// Restrains vertical translation only
    Roller,
}

/// A support point; each contributes one vertical reaction unknown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Position along the span (m)
    pub position: f64,
    pub kind: SupportKind,
}

impl Support {
    pub fn new(position: Length, kind: SupportKind) -> Self {
        Self::at(to_coord(position), kind)
    }

    pub fn at(position: f64, kind: SupportKind) -> Self {
        Self { position, kind }
    }

    pub fn pin(position: f64) -> Self {
        Self::at(position, SupportKind::Pin)
    }

    pub fn roller(position: f64) -> Self {
        Self::at(position, SupportKind::Roller)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReactionError {
    #[error("Unsupported support configuration: {count} vertical unknowns (only 2 is statically determinate)")]
    UnsupportedSupportConfiguration { count: usize },

    #[error("Equilibrium system is singular (supports at {first} m and {second} m coincide)")]
    SingularSystem { first: f64, second: f64 },

    #[error("Support at x = {position} m lies outside the span [0, {length}] m")]
    SupportOutsideSpan { position: f64, length: f64 },
}

/// Solution method, selected by the number of vertical unknowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionStrategy {
    /// Two supports: ΣFy = 0 and ΣM = 0 give a square, determinate system
    TwoSupport,
}

impl ReactionStrategy {
    /// Pick the strategy for `supports`
    ///
    /// Anything but two vertical unknowns is statically indeterminate (or a
    /// mechanism) and would need a stiffness-based method.
    pub fn select(supports: &[Support]) -> Result<Self, ReactionError> {
        match supports.len() {
            2 => Ok(ReactionStrategy::TwoSupport),
            count => Err(ReactionError::UnsupportedSupportConfiguration { count }),
        }
    }

    pub fn solve(&self, supports: &[Support], loads: &LoadSet) -> Result<Reactions, ReactionError> {
        match self {
            ReactionStrategy::TwoSupport => solve_two_support(supports, loads),
        }
    }
}

/// Solve for one reaction per support
pub fn solve_reactions(supports: &[Support], loads: &LoadSet) -> Result<Reactions, ReactionError> {
    ReactionStrategy::select(supports)?.solve(supports, loads)
}

fn solve_two_support(supports: &[Support], loads: &LoadSet) -> Result<Reactions, ReactionError> {
    let n = supports.len();
    if n != 2 {
        return Err(ReactionError::UnsupportedSupportConfiguration { count: n });
    }
    let x0 = supports[0].position;

    if (supports[1].position - x0).abs() <= POSITION_TOLERANCE {
        return Err(ReactionError::SingularSystem {
            first: x0,
            second: supports[1].position,
        });
    }
    if supports.iter().all(|s| s.kind == SupportKind::Roller) {
        log::warn!("Both supports are rollers; horizontal restraint is assumed to exist elsewhere");
    }

    // Row 0: ΣR = total load. Row 1: ΣR·(x - x0) = net moment about x0.
    let mut matrix = na::DMatrix::<f64>::zeros(n, n);
    let mut rhs = na::DVector::<f64>::zeros(n);
    for (j, support) in supports.iter().enumerate() {
        matrix[(0, j)] = 1.0;
        matrix[(1, j)] = support.position - x0;
    }
    rhs[0] = loads.total_downward_load();
    rhs[1] = loads.net_moment_about(x0);

    let lu = matrix.lu();
    if !lu.is_invertible() {
        return Err(ReactionError::SingularSystem {
            first: x0,
            second: supports[1].position,
        });
    }
    let solution = lu.solve(&rhs).ok_or(ReactionError::SingularSystem {
        first: x0,
        second: supports[1].position,
    })?;

    let reactions = Reactions {
        entries: supports
            .iter()
            .zip(solution.iter())
            .map(|(support, &force)| SupportReaction { support: *support, force })
            .collect(),
    };

    log::debug!(
        "Solved reactions: {}",
        reactions
            .iter()
            .map(|r| format!("{:.3} kN @ {:.3} m", r.force, r.support.position))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(reactions)
}

/// Check supports sit on the beam
pub fn validate_supports(supports: &[Support], section: &BeamSection) -> Result<(), ReactionError> {
    for support in supports {
        if !section.contains_x(support.position) {
            return Err(ReactionError::SupportOutsideSpan {
                position: support.position,
                length: section.length(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    pub support: Support,
    /// Vertical reaction, up(+) (kN)
    pub force: f64,
}

/// Solved reactions, one per support, in support order
///
/// Produced once by the solver and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    entries: Vec<SupportReaction>,
}

impl Reactions {
    /// Reaction at the support located at `position`
    pub fn at(&self, position: f64) -> Option<Force> {
        self.entries
            .iter()
            .find(|r| (r.support.position - position).abs() <= POSITION_TOLERANCE)
            .map(|r| from_kn(r.force))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportReaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Σ reactions (kN)
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|r| r.force).sum()
    }

    /// Net vertical force and clockwise moment about `pivot` left over after
    /// adding reactions to `loads` (both zero at equilibrium)
    pub fn residuals(&self, loads: &LoadSet, pivot: f64) -> (f64, f64) {
        let force = self.total() - loads.total_downward_load();
        let reaction_moment: f64 = self
            .entries
            .iter()
            .map(|r| r.force * (r.support.position - pivot))
            .sum();
        let moment = loads.net_moment_about(pivot) - reaction_moment;
        (force, moment)
    }

    /// Check the system is in static equilibrium
    ///
    /// For equilibrium:
    /// - Sum of vertical forces = 0
    /// - Sum of moments = 0
    pub fn is_in_equilibrium(
        &self,
        loads: &LoadSet,
        pivot: f64,
        force_tolerance: f64,
        moment_tolerance: f64,
    ) -> bool {
        let (force, moment) = self.residuals(loads, pivot);
        force.abs() < force_tolerance && moment.abs() < moment_tolerance
    }
}
