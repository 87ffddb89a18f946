use crate::types::*;
use serde::{Deserialize, Serialize};

/// Concentrated force, downward(+) (kN at m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    pub position: f64,
    pub magnitude: f64,
}

impl PointLoad {
    pub fn new(position: Length, magnitude: Force) -> Self {
        Self::from_raw(to_coord(position), to_kn(magnitude))
    }

    pub fn from_raw(position: f64, magnitude: f64) -> Self {
        Self { position, magnitude }
    }
}

/// Concentrated couple (kN·m at m)
///
/// Positive magnitude is a clockwise couple: it raises the internal bending
/// moment by `magnitude` for every section at or right of `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMoment {
    pub position: f64,
    pub magnitude: f64,
}

impl PointMoment {
    pub fn new(position: Length, magnitude: Torque) -> Self {
        Self::from_raw(to_coord(position), to_kn_m(magnitude))
    }

    pub fn from_raw(position: f64, magnitude: f64) -> Self {
        Self { position, magnitude }
    }
}

/// Uniform line load over [start, end], downward(+) (kN/m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    pub start: f64,
    pub end: f64,
    pub intensity: f64,
}

impl DistributedLoad {
    pub fn new(start: Length, end: Length, intensity_kn_per_m: f64) -> Self {
        Self::from_raw(to_coord(start), to_coord(end), intensity_kn_per_m)
    }

    pub fn from_raw(start: f64, end: f64, intensity: f64) -> Self {
        Self { start, end, intensity }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Total force (kN)
    pub fn resultant(&self) -> f64 {
        self.intensity * self.span()
    }

    /// Point of action of the resultant (m)
    pub fn centroid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Loaded length lying left of `x` (m)
    pub fn overlap_until(&self, x: f64) -> f64 {
        (x.min(self.end) - self.start).max(0.0)
    }

    /// Resultant and centroid of the portion left of `x`
    pub fn partial_resultant(&self, x: f64) -> (f64, f64) {
        let overlap = self.overlap_until(x);
        (self.intensity * overlap, self.start + overlap / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::types::units::*;

    #[test]
    fn test_distributed_resultant() {
        let udl = DistributedLoad::from_raw(1.0, 3.0, 4.0);
        assert_relative_eq!(udl.resultant(), 8.0);
        assert_relative_eq!(udl.centroid(), 2.0);
    }

    #[test]
    fn test_partial_overlap() {
        let udl = DistributedLoad::from_raw(1.0, 3.0, 4.0);
        assert_eq!(udl.overlap_until(0.5), 0.0);
        assert_relative_eq!(udl.overlap_until(2.5), 1.5);
        assert_relative_eq!(udl.overlap_until(10.0), 2.0);

        let (w, c) = udl.partial_resultant(2.0);
        assert_relative_eq!(w, 4.0);
        assert_relative_eq!(c, 1.5);
    }

    #[test]
    fn test_uom_constructors() {
        let p = PointLoad::new(Length::new::<millimeter>(2000.0), Force::new::<newton>(10_000.0));
        assert_relative_eq!(p.position, 2.0);
        assert_relative_eq!(p.magnitude, 10.0);

        let m = PointMoment::new(Length::new::<meter>(1.0), Torque::new::<newton_meter>(500.0));
        assert_relative_eq!(m.magnitude, 0.5);
    }
}
