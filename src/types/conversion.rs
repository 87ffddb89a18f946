use uom::si::{
    f64::{Force, Length, Pressure, Torque},
    force::kilonewton,
    length::meter,
    pressure::megapascal,
    torque::kilonewton_meter,
};

/// kN·m / m³ (= kPa) to MPa
pub const KPA_TO_MPA: f64 = 1.0 / 1000.0;

/// Convert UOM Length to internal coordinate (meters)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert internal coordinate (meters) to UOM Length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Convert UOM Force to internal force (kilonewtons)
#[inline]
pub fn to_kn(force: Force) -> f64 {
    force.get::<kilonewton>()
}

/// Convert internal force (kilonewtons) to UOM Force
#[inline]
pub fn from_kn(value: f64) -> Force {
    Force::new::<kilonewton>(value)
}

/// Convert UOM Torque to internal moment (kilonewton-meters)
#[inline]
pub fn to_kn_m(moment: Torque) -> f64 {
    moment.get::<kilonewton_meter>()
}

/// Convert internal moment (kilonewton-meters) to UOM Torque
#[inline]
pub fn from_kn_m(value: f64) -> Torque {
    Torque::new::<kilonewton_meter>(value)
}

/// Convert UOM Pressure to internal stress (megapascals)
#[inline]
pub fn to_mpa(stress: Pressure) -> f64 {
    stress.get::<megapascal>()
}

/// Convert internal stress (megapascals) to UOM Pressure
#[inline]
pub fn from_mpa(value: f64) -> Pressure {
    Pressure::new::<megapascal>(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::{force::newton, pressure::kilopascal};

    #[test]
    fn test_boundary_conversions() {
        assert_relative_eq!(to_kn(Force::new::<newton>(2500.0)), 2.5);
        assert_relative_eq!(to_mpa(Pressure::new::<kilopascal>(1500.0)), 1.5);
        assert_relative_eq!(to_coord(from_coord(3.25)), 3.25);
        assert_relative_eq!(to_kn_m(from_kn_m(-12.0)), -12.0);
    }

    #[test]
    fn test_kpa_factor() {
        // 10 kN·m over a 1e-3 m³ section modulus is 10 MPa
        assert_relative_eq!(10.0 / 1e-3 * KPA_TO_MPA, 10.0);
    }
}
