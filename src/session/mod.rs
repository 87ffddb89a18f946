//! Analysis session
//!
//! Collect the beam, supports, loads, cracks and strength limits with a
//! [`SessionBuilder`], then `build()` once. Building validates every input and
//! solves the reactions; the resulting [`AnalysisSession`] is immutable and all
//! of its queries are pure.

pub mod config;
pub mod diagram;

pub use config::*;
pub use diagram::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::capacity::*;
use crate::loads::*;
use crate::physics::*;
use crate::section::*;
use crate::types::*;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Section error: {0}")]
    Section(#[from] SectionError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Reaction error: {0}")]
    Reaction(#[from] ReactionError),

    #[error("Internal force error: {0}")]
    InternalForce(#[from] InternalForceError),

    #[error("Stress error: {0}")]
    Stress(#[from] StressError),

    #[error("Failure limit error: {0}")]
    Failure(#[from] FailureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No beam section was provided")]
    MissingBeam,

    #[error("No failure limits were provided")]
    MissingLimits,
}

/// Accumulates session inputs; nothing is validated until [`build`](Self::build)
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    section: Option<BeamSection>,
    supports: Vec<Support>,
    loads: LoadSet,
    cracks: Vec<(Length, Length)>,
    limits: Option<FailureLimits>,
    criterion: FailureCriterion,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beam(mut self, section: BeamSection) -> Self {
        self.section = Some(section);
        self
    }

    pub fn support(mut self, support: Support) -> Self {
        self.supports.push(support);
        self
    }

    pub fn point_load(mut self, load: PointLoad) -> Self {
        self.loads.add_point_load(load);
        self
    }

    pub fn point_moment(mut self, moment: PointMoment) -> Self {
        self.loads.add_point_moment(moment);
        self
    }

    pub fn distributed_load(mut self, load: DistributedLoad) -> Self {
        self.loads.add_distributed_load(load);
        self
    }

    /// Crack at `position` with `depth` measured from the bottom fiber
    pub fn crack(mut self, position: Length, depth: Length) -> Self {
        self.cracks.push((position, depth));
        self
    }

    pub fn limits(mut self, limits: FailureLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn criterion(mut self, criterion: FailureCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Validate inputs and solve reactions
    pub fn build(self) -> Result<AnalysisSession, AnalysisError> {
        let section = self.section.ok_or(AnalysisError::MissingBeam)?;

        self.loads.validate(&section)?;
        validate_supports(&self.supports, &section)?;

        let mut cracks = CrackMap::new();
        for (position, depth) in self.cracks {
            cracks.insert(&section, Crack::new(&section, position, depth)?)?;
        }

        let reactions = solve_reactions(&self.supports, &self.loads)?;

        log::debug!(
            "Built session: L = {:.3} m, {} supports, {} cracks, total load {:.3} kN",
            section.length(),
            self.supports.len(),
            cracks.len(),
            self.loads.total_downward_load()
        );

        Ok(AnalysisSession {
            section,
            supports: self.supports,
            loads: self.loads,
            cracks,
            reactions,
            limits: self.limits,
            criterion: self.criterion,
        })
    }
}

/// Everything known about one fiber of one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAssessment {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub stress: StressState,
    pub principal: PrincipalStresses,
    /// Verdict under the principal-stress criterion
    pub principal_verdict: SafetyVerdict,
    /// Verdict under the component box criterion
    pub component_verdict: SafetyVerdict,
    /// Governing demand/capacity ratio under the session criterion
    pub utilization: f64,
}

/// Fiber-by-fiber scan of one cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAssessment {
    pub x: f64,
    pub forces: InternalForces,
    pub points: Vec<PointAssessment>,
    pub critical_index: usize,
}

impl SectionAssessment {
    pub fn critical(&self) -> &PointAssessment {
        &self.points[self.critical_index]
    }
}

/// Immutable, solved beam
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    section: BeamSection,
    supports: Vec<Support>,
    loads: LoadSet,
    cracks: CrackMap,
    reactions: Reactions,
    limits: Option<FailureLimits>,
    criterion: FailureCriterion,
}

impl AnalysisSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Load a session description (TOML or JSON) and build it
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        SessionConfig::from_file(path)?.build()
    }

    pub fn section(&self) -> &BeamSection {
        &self.section
    }

    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    pub fn loads(&self) -> &LoadSet {
        &self.loads
    }

    pub fn cracks(&self) -> &CrackMap {
        &self.cracks
    }

    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    pub fn limits(&self) -> Option<&FailureLimits> {
        self.limits.as_ref()
    }

    pub fn criterion(&self) -> FailureCriterion {
        self.criterion
    }

    pub fn evaluator(&self) -> InternalForceEvaluator<'_> {
        InternalForceEvaluator::new(&self.section, &self.loads, &self.reactions)
    }

    pub fn stress_engine(&self) -> StressEngine<'_> {
        StressEngine::new(&self.section, &self.cracks)
    }

    pub fn shear_force(&self, x: Length) -> Result<Force, AnalysisError> {
        Ok(self.evaluator().shear_force(x)?)
    }

    pub fn bending_moment(&self, x: Length) -> Result<Torque, AnalysisError> {
        Ok(self.evaluator().bending_moment(x)?)
    }

    /// One-sided V and M at x, with the governing values resolved
    pub fn internal_forces_at(&self, x: Length) -> Result<InternalForces, AnalysisError> {
        Ok(self.evaluator().internal_forces_at(to_coord(x))?)
    }

    pub fn section_properties(&self, x: Length) -> Result<SectionProperties, AnalysisError> {
        let x = to_coord(x);
        if !x.is_finite() || !self.section.contains_x(x) {
            return Err(InternalForceError::OutOfRangeQuery {
                x,
                length: self.section.length(),
            }
            .into());
        }
        Ok(self.stress_engine().properties_at(x))
    }

    /// Stress at a point under the governing internal forces at x
    pub fn stress_at(&self, x: Length, y: Length, z: Length) -> Result<StressState, AnalysisError> {
        let forces = self.internal_forces_at(x)?;
        Ok(self
            .stress_engine()
            .stress_at(x, y, z, forces.governing_moment(), forces.governing_shear())?)
    }

    /// Stress, principal stresses and both verdicts at a point
    pub fn assess_point(&self, x: Length, y: Length, z: Length) -> Result<PointAssessment, AnalysisError> {
        let forces = self.internal_forces_at(x)?;
        self.assess_with_forces(&forces, to_coord(y), to_coord(z))
    }

    fn assess_with_forces(
        &self,
        forces: &InternalForces,
        y: f64,
        z: f64,
    ) -> Result<PointAssessment, AnalysisError> {
        let limits = self.limits.as_ref().ok_or(AnalysisError::MissingLimits)?;
        let stress = self.stress_engine().stress_at_raw(
            forces.x,
            y,
            z,
            forces.moment.governing(),
            forces.shear.governing(),
        )?;
        let principal = stress.principal();

        Ok(PointAssessment {
            x: forces.x,
            y,
            z,
            stress,
            principal,
            principal_verdict: check_safety(principal.sigma1, principal.sigma2, stress.tau_xy, limits),
            component_verdict: check_components(stress.sigma_xx, stress.tau_xy, limits),
            utilization: self.criterion.utilization(&stress, limits),
        })
    }

    /// Verdict at a point under the session criterion
    pub fn verdict_at(&self, x: Length, y: Length, z: Length) -> Result<SafetyVerdict, AnalysisError> {
        let assessment = self.assess_point(x, y, z)?;
        Ok(match self.criterion {
            FailureCriterion::PrincipalStress => assessment.principal_verdict,
            FailureCriterion::ComponentBox => assessment.component_verdict,
        })
    }

    /// Scan `fibers` evenly spaced fibers from bottom to top at x (z = 0)
    pub fn assess_section(&self, x: Length, fibers: usize) -> Result<SectionAssessment, AnalysisError> {
        let forces = self.internal_forces_at(x)?;
        let fibers = fibers.max(2);
        let half = self.section.half_height();
        let step = self.section.height() / (fibers - 1) as f64;

        let points = (0..fibers)
            .map(|i| self.assess_with_forces(&forces, (-half + step * i as f64).min(half), 0.0))
            .collect::<Result<Vec<_>, _>>()?;

        let critical_index = points
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.utilization.total_cmp(&b.utilization))
            .map(|(i, _)| i)
            .unwrap_or(0);

        Ok(SectionAssessment {
            x: forces.x,
            forces,
            points,
            critical_index,
        })
    }

    /// V and M over `points` evenly spaced stations plus both sides of every jump
    pub fn sample_diagrams(&self, points: usize) -> Vec<DiagramSample> {
        sample_diagrams(&self.evaluator(), points)
    }

    /// Format results for display
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("Beam Analysis:\n");
        s.push_str(&format!(
            " Span: {}, section {:.3} m x {:.3} m, I = {:.4e} m^4\n",
            DisplayLength(self.section.span()),
            self.section.height(),
            self.section.width(),
            self.section.second_moment_of_area(),
        ));

        s.push_str("\nReactions:\n");
        for reaction in self.reactions.iter() {
            s.push_str(&format!(
                " {:?} at {}: {}\n",
                reaction.support.kind,
                DisplayLength(from_coord(reaction.support.position)),
                DisplayForce(from_kn(reaction.force)),
            ));
        }

        if !self.cracks.is_empty() {
            s.push_str("\nCracks:\n");
            for crack in self.cracks.iter() {
                let props = SectionProperties::cracked(&self.section, crack.depth());
                s.push_str(&format!(
                    " x = {:.3} m: depth {:.3} m, neutral axis +{:.4} m, I_eff = {:.4e} m^4\n",
                    crack.position(), crack.depth(), props.neutral_axis, props.effective_second_moment,
                ));
            }
        }

        let samples = self.sample_diagrams(101);
        if let Some(peak) = samples.iter().max_by(|a, b| a.moment.abs().total_cmp(&b.moment.abs())) {
            s.push_str(&format!(
                "\n Peak moment: {} at {:.3} m\n",
                DisplayMoment(from_kn_m(peak.moment)),
                peak.x
            ));

            let engine = self.stress_engine();
            let half = self.section.half_height();
            if let (Ok(top), Ok(bottom)) = (
                engine.stress_at_raw(peak.x, half, 0.0, peak.moment, peak.shear),
                engine.stress_at_raw(peak.x, -half, 0.0, peak.moment, peak.shear),
            ) {
                s.push_str(&format!(
                    "  Extreme fibers: top {}, bottom {}\n",
                    DisplayStress(from_mpa(top.sigma_xx)),
                    DisplayStress(from_mpa(bottom.sigma_xx)),
                ));
            }
        }
        if let Some(peak) = samples.iter().max_by(|a, b| a.shear.abs().total_cmp(&b.shear.abs())) {
            s.push_str(&format!(
                " Peak shear: {} at {:.3} m\n",
                DisplayForce(from_kn(peak.shear)),
                peak.x
            ));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::types::units::*;

    fn m(x: f64) -> Length {
        Length::new::<meter>(x)
    }

    fn midspan_session(crack: Option<f64>) -> AnalysisSession {
        let mut builder = SessionBuilder::new()
            .beam(BeamSection::from_meters(4.0, 0.4, 0.2).unwrap())
            .support(Support::pin(0.0))
            .support(Support::roller(4.0))
            .point_load(PointLoad::from_raw(2.0, 10.0))
            .limits(FailureLimits::from_mpa(3.0, 30.0, 4.0).unwrap());
        if let Some(depth) = crack {
            builder = builder.crack(m(2.0), m(depth));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_end_to_end_midspan_load() {
        let session = midspan_session(None);

        assert_relative_eq!(session.reactions().at(0.0).unwrap().get::<kilonewton>(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(session.reactions().at(4.0).unwrap().get::<kilonewton>(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(session.bending_moment(m(2.0)).unwrap().get::<kilonewton_meter>(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(session.shear_force(m(1.0)).unwrap().get::<kilonewton>(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(session.shear_force(m(3.0)).unwrap().get::<kilonewton>(), -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_end_to_end_with_crack() {
        let session = midspan_session(Some(0.1));

        let props = session.section_properties(m(2.0)).unwrap();
        assert_relative_eq!(props.effective_second_moment, 0.2 * 0.3_f64.powi(3) / 12.0, epsilon = 1e-15);
        assert!(props.effective_second_moment < session.section().second_moment_of_area());

        // Below the crack tip nothing is stressed
        let cracked = session.stress_at(m(2.0), m(-0.15), m(0.0)).unwrap();
        assert_eq!(cracked, StressState::ZERO);
    }

    #[test]
    fn test_stress_at_load_point_uses_governing_shear() {
        let session = midspan_session(None);

        // V jumps from +5 to -5 at midspan; equal magnitudes so +5 governs
        let forces = session.internal_forces_at(m(2.0)).unwrap();
        assert_relative_eq!(forces.governing_shear().get::<kilonewton>(), 5.0, epsilon = 1e-9);

        let at_centroid = session.stress_at(m(2.0), m(0.0), m(0.0)).unwrap();
        assert_relative_eq!(at_centroid.tau_xy, -1.5 * 5.0 / 0.08 / 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_assess_point_and_section() {
        let session = midspan_session(None);

        let bottom = session.assess_point(m(2.0), m(-0.2), m(0.0)).unwrap();
        assert_relative_eq!(bottom.stress.sigma_xx, 1.875, epsilon = 1e-9);
        assert!(bottom.principal_verdict.is_safe());
        assert!(bottom.component_verdict.is_safe());
        assert_relative_eq!(bottom.utilization, 1.875 / 3.0, epsilon = 1e-9);

        let scan = session.assess_section(m(2.0), 9).unwrap();
        assert_eq!(scan.points.len(), 9);
        assert_relative_eq!(scan.critical().y, -0.2, epsilon = 1e-12);
        assert_relative_eq!(scan.points[8].y, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_overloaded_beam_is_unsafe() {
        let session = SessionBuilder::new()
            .beam(BeamSection::from_meters(4.0, 0.4, 0.2).unwrap())
            .support(Support::pin(0.0))
            .support(Support::roller(4.0))
            .point_load(PointLoad::from_raw(2.0, 40.0))
            .limits(FailureLimits::from_mpa(3.0, 30.0, 4.0).unwrap())
            .build()
            .unwrap();

        // M = 40 kN·m gives 7.5 MPa tension at the bottom fiber
        let verdict = session.verdict_at(m(2.0), m(-0.2), m(0.0)).unwrap();
        assert_eq!(verdict, SafetyVerdict::Unsafe(vec![FailureMode::TensileExceeded]));
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(SessionBuilder::new().build(), Err(AnalysisError::MissingBeam)));

        let beam = BeamSection::from_meters(4.0, 0.4, 0.2).unwrap();
        let three = SessionBuilder::new()
            .beam(beam)
            .support(Support::pin(0.0))
            .support(Support::roller(2.0))
            .support(Support::roller(4.0))
            .build();
        assert!(matches!(
            three,
            Err(AnalysisError::Reaction(ReactionError::UnsupportedSupportConfiguration { count: 3 }))
        ));

        let deep_crack = SessionBuilder::new()
            .beam(beam)
            .support(Support::pin(0.0))
            .support(Support::roller(4.0))
            .crack(m(1.0), m(0.5))
            .build();
        assert!(matches!(
            deep_crack,
            Err(AnalysisError::Section(SectionError::InvalidCrack { .. }))
        ));
    }

    #[test]
    fn test_query_errors() {
        let session = midspan_session(None);
        assert!(matches!(
            session.shear_force(m(5.0)),
            Err(AnalysisError::InternalForce(InternalForceError::OutOfRangeQuery { .. }))
        ));
        assert!(matches!(
            session.stress_at(m(1.0), m(0.3), m(0.0)),
            Err(AnalysisError::Stress(StressError::OutOfRangeY { .. }))
        ));

        let no_limits = SessionBuilder::new()
            .beam(*session.section())
            .support(Support::pin(0.0))
            .support(Support::roller(4.0))
            .build()
            .unwrap();
        assert!(matches!(
            no_limits.assess_point(m(1.0), m(0.0), m(0.0)),
            Err(AnalysisError::MissingLimits)
        ));
    }

    #[test]
    fn test_summary_mentions_reactions_and_peak() {
        let session = midspan_session(Some(0.1));
        let summary = session.summary();
        assert!(summary.contains("Reactions:"));
        assert!(summary.contains("5.00 kN"));
        assert!(summary.contains("Peak moment: 10.00 kN·m"));
        assert!(summary.contains("Cracks:"));
    }

    #[test]
    fn test_summary_reports_extreme_fiber_stress() {
        // Peak M = 10 kN·m at midspan: ±1.875 MPa on the intact section
        let summary = midspan_session(None).summary();
        assert!(summary.contains("Extreme fibers: top -1.875 MPa"));
        assert!(summary.contains("bottom 1.875 MPa"));

        // The cracked bottom fiber carries nothing
        let cracked = midspan_session(Some(0.1)).summary();
        assert!(cracked.contains("bottom 0.000 MPa"));
    }
}
