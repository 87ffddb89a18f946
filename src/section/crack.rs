//! Flexural cracks and the weakened section they leave behind
//!
//! A crack is measured from the bottom fiber upward. Cracked material is
//! excised: it carries no stress and contributes no stiffness, so the section at
//! a cracked x is the rectangle between the crack tip and the top fiber.

use crate::section::{BeamSection, SectionError};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// A flexural crack at a single cross-section
///
/// Only built through [`Crack::new`] / [`Crack::from_meters`], so the depth is
/// always checked against a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crack {
    position: f64,
    depth: f64,
}

impl Crack {
    /// Create a crack, checking it fits the section
    pub fn new(section: &BeamSection, position: Length, depth: Length) -> Result<Self, SectionError> {
        Self::from_meters(section, to_coord(position), to_coord(depth))
    }

    pub fn from_meters(section: &BeamSection, position: f64, depth: f64) -> Result<Self, SectionError> {
        if !depth.is_finite() || depth < 0.0 || depth >= section.height() {
            return Err(SectionError::InvalidCrack {
                depth,
                height: section.height(),
            });
        }
        if !section.contains_x(position) {
            return Err(SectionError::CrackOutsideSpan {
                position,
                length: section.length(),
            });
        }

        Ok(Self { position, depth })
    }

    /// Location along the span (m)
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Depth from the bottom fiber (m)
    pub fn depth(&self) -> f64 {
        self.depth
    }
}

/// Section properties governing stress at one x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Crack depth at this x (0 if uncracked)
    pub crack_depth: f64,
    /// Neutral axis offset from the geometric centroid, up(+) (m)
    pub neutral_axis: f64,
    /// Second moment of the stress-carrying material about the neutral axis (m⁴)
    pub effective_second_moment: f64,
    /// Lowest fiber that still carries stress (m)
    pub bottom_fiber: f64,
    /// Extreme top fiber (m)
    pub top_fiber: f64,
    /// Section width (m)
    pub width: f64,
}

impl SectionProperties {
    /// Properties of the intact section
    pub fn uncracked(section: &BeamSection) -> Self {
        Self {
            crack_depth: 0.0,
            neutral_axis: 0.0,
            effective_second_moment: section.second_moment_of_area(),
            bottom_fiber: -section.half_height(),
            top_fiber: section.half_height(),
            width: section.width(),
        }
    }

    /// Properties with `depth` of material removed from the bottom
    pub fn cracked(section: &BeamSection, depth: f64) -> Self {
        if depth <= 0.0 {
            return Self::uncracked(section);
        }

        let h = section.height();
        let w = section.width();
        let remaining = h - depth;

        Self {
            crack_depth: depth,
            neutral_axis: h / 2.0 - remaining / 2.0,
            effective_second_moment: w * remaining.powi(3) / 12.0,
            bottom_fiber: -h / 2.0 + depth,
            top_fiber: h / 2.0,
            width: w,
        }
    }

    pub fn is_cracked(&self) -> bool {
        self.crack_depth > 0.0
    }

    /// True if fiber `y` is inside cracked material (carries no stress)
    pub fn is_in_crack(&self, y: f64) -> bool {
        self.is_cracked() && y <= self.bottom_fiber + POSITION_TOLERANCE
    }
}

/// Set of cracks keyed by position
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrackMap {
    cracks: Vec<Crack>,
}

impl CrackMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a crack, replacing any crack already at the same position
    ///
    /// The crack is re-checked against `section`, which may differ from the
    /// one it was created for.
    pub fn insert(&mut self, section: &BeamSection, crack: Crack) -> Result<Option<Crack>, SectionError> {
        let crack = Crack::from_meters(section, crack.position, crack.depth)?;

        if let Some(existing) = self
            .cracks
            .iter_mut()
            .find(|c| (c.position - crack.position).abs() <= CRACK_POSITION_TOLERANCE)
        {
            log::warn!(
                "Replacing crack at x = {:.4} m (depth {:.4} m -> {:.4} m)",
                existing.position,
                existing.depth,
                crack.depth
            );
            return Ok(Some(std::mem::replace(existing, crack)));
        }

        self.cracks.push(crack);
        self.cracks
            .sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(None)
    }

    /// Crack at `x`, if one exists within tolerance
    pub fn at(&self, x: f64) -> Option<&Crack> {
        self.cracks
            .iter()
            .find(|c| (c.position - x).abs() <= CRACK_POSITION_TOLERANCE)
    }

    /// Resolve the section properties that govern at `x`
    pub fn properties_at(&self, section: &BeamSection, x: f64) -> SectionProperties {
        match self.at(x) {
            Some(crack) => SectionProperties::cracked(section, crack.depth),
            None => SectionProperties::uncracked(section),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crack> {
        self.cracks.iter()
    }

    pub fn len(&self) -> usize {
        self.cracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn beam() -> BeamSection {
        BeamSection::from_meters(4.0, 0.4, 0.2).unwrap()
    }

    #[test]
    fn test_zero_depth_reproduces_intact_section() {
        let section = beam();
        let props = SectionProperties::cracked(&section, 0.0);
        assert_eq!(props, SectionProperties::uncracked(&section));
        assert_eq!(props.neutral_axis, 0.0);
        assert!(!props.is_in_crack(-0.2));
    }

    #[test]
    fn test_cracked_properties() {
        let section = beam();
        let props = SectionProperties::cracked(&section, 0.1);

        assert_relative_eq!(props.effective_second_moment, 0.2 * 0.3_f64.powi(3) / 12.0);
        assert!(props.effective_second_moment < section.second_moment_of_area());
        assert_relative_eq!(props.neutral_axis, 0.05);
        assert_relative_eq!(props.bottom_fiber, -0.1);
        assert!(props.is_in_crack(-0.1));
        assert!(props.is_in_crack(-0.15));
        assert!(!props.is_in_crack(-0.099));
    }

    #[test]
    fn test_crack_validation() {
        let section = beam();
        assert!(Crack::from_meters(&section, 2.0, 0.0).is_ok());
        assert_eq!(
            Crack::from_meters(&section, 2.0, 0.4),
            Err(SectionError::InvalidCrack { depth: 0.4, height: 0.4 })
        );
        assert!(Crack::from_meters(&section, 2.0, -0.01).is_err());
        assert!(matches!(
            Crack::from_meters(&section, 4.5, 0.1),
            Err(SectionError::CrackOutsideSpan { .. })
        ));
    }

    #[test]
    fn test_crack_map_lookup_and_replace() {
        let section = beam();
        let mut cracks = CrackMap::new();
        cracks.insert(&section, Crack::from_meters(&section, 3.0, 0.05).unwrap()).unwrap();
        cracks.insert(&section, Crack::from_meters(&section, 1.0, 0.1).unwrap()).unwrap();

        assert_eq!(cracks.len(), 2);
        assert_eq!(cracks.iter().next().unwrap().position(), 1.0);
        assert_relative_eq!(cracks.at(1.0 + 5e-7).unwrap().depth(), 0.1);
        assert!(cracks.at(1.1).is_none());

        let old = cracks.insert(&section, Crack::from_meters(&section, 1.0, 0.2).unwrap()).unwrap();
        assert_eq!(old.map(|c| c.depth()), Some(0.1));
        assert_eq!(cracks.len(), 2);
        assert_relative_eq!(cracks.properties_at(&section, 1.0).crack_depth, 0.2);
        assert_eq!(cracks.properties_at(&section, 2.0), SectionProperties::uncracked(&section));
    }

    #[test]
    fn test_crack_from_deeper_section_is_rejected() {
        let shallow = beam();
        let deep = BeamSection::from_meters(4.0, 0.8, 0.2).unwrap();
        let mut cracks = CrackMap::new();

        // Valid on the 0.8 m section, too deep for the 0.4 m one
        for depth in [0.4, 0.6] {
            let crack = Crack::from_meters(&deep, 2.0, depth).unwrap();
            assert_eq!(
                cracks.insert(&shallow, crack),
                Err(SectionError::InvalidCrack { depth, height: 0.4 })
            );
        }
        assert!(cracks.is_empty());
        assert_eq!(cracks.properties_at(&shallow, 2.0), SectionProperties::uncracked(&shallow));
    }
}
