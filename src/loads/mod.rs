//! Applied loads
//!
//! ## Sign convention
//! - Point loads and line loads: downward(+)
//! - Point moments: clockwise(+), adds directly to the internal moment

pub mod load_types;

pub use load_types::*;

use crate::section::BeamSection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("{kind} at x = {position} m lies outside the span [0, {length}] m")]
    OutsideSpan {
        kind: &'static str,
        position: f64,
        length: f64,
    },

    #[error("Distributed load must end after it starts (start {start} m, end {end} m)")]
    EmptyDistribution { start: f64, end: f64 },

    #[error("{kind} has a non-finite magnitude")]
    NonFinite { kind: &'static str },
}

/// Every load acting on the beam, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    point_loads: Vec<PointLoad>,
    point_moments: Vec<PointMoment>,
    distributed_loads: Vec<DistributedLoad>,
}

impl LoadSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point_load(&mut self, load: PointLoad) -> &mut Self {
        self.point_loads.push(load);
        self
    }

    pub fn add_point_moment(&mut self, moment: PointMoment) -> &mut Self {
        self.point_moments.push(moment);
        self
    }

    pub fn add_distributed_load(&mut self, load: DistributedLoad) -> &mut Self {
        self.distributed_loads.push(load);
        self
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point_loads
    }

    pub fn point_moments(&self) -> &[PointMoment] {
        &self.point_moments
    }

    pub fn distributed_loads(&self) -> &[DistributedLoad] {
        &self.distributed_loads
    }

    pub fn is_empty(&self) -> bool {
        self.point_loads.is_empty()
            && self.point_moments.is_empty()
            && self.distributed_loads.is_empty()
    }

    /// Σ point loads + Σ line-load resultants (kN, downward)
    pub fn total_downward_load(&self) -> f64 {
        let points: f64 = self.point_loads.iter().map(|p| p.magnitude).sum();
        let lines: f64 = self.distributed_loads.iter().map(|d| d.resultant()).sum();
        points + lines
    }

    /// Clockwise moment of every load about `x0` (kN·m)
    pub fn net_moment_about(&self, x0: f64) -> f64 {
        let points: f64 = self
            .point_loads
            .iter()
            .map(|p| p.magnitude * (p.position - x0))
            .sum();
        let couples: f64 = self.point_moments.iter().map(|m| m.magnitude).sum();
        let lines: f64 = self
            .distributed_loads
            .iter()
            .map(|d| d.resultant() * (d.centroid() - x0))
            .sum();
        points + couples + lines
    }

    /// Check every load sits on the beam
    pub fn validate(&self, section: &BeamSection) -> Result<(), LoadError> {
        let length = section.length();
        let on_span = |kind, position: f64| {
            if section.contains_x(position) {
                Ok(())
            } else {
                Err(LoadError::OutsideSpan { kind, position, length })
            }
        };

        for p in &self.point_loads {
            if !p.magnitude.is_finite() {
                return Err(LoadError::NonFinite { kind: "Point load" });
            }
            on_span("Point load", p.position)?;
        }
        for m in &self.point_moments {
            if !m.magnitude.is_finite() {
                return Err(LoadError::NonFinite { kind: "Point moment" });
            }
            on_span("Point moment", m.position)?;
        }
        for d in &self.distributed_loads {
            if !d.intensity.is_finite() {
                return Err(LoadError::NonFinite { kind: "Distributed load" });
            }
            if d.end <= d.start {
                return Err(LoadError::EmptyDistribution { start: d.start, end: d.end });
            }
            on_span("Distributed load", d.start)?;
            on_span("Distributed load", d.end)?;
        }
        Ok(())
    }

    /// Positions where V or M jump
    pub fn concentrated_positions(&self) -> Vec<f64> {
        self.point_loads
            .iter()
            .map(|p| p.position)
            .chain(self.point_moments.iter().map(|m| m.position))
            .collect()
    }
}
