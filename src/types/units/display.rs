use std::fmt;
use uom::si::{
    force::{kilonewton, pound_force},
    length::{foot, meter},
    pressure::{megapascal, psi},
    torque::{kilonewton_meter, pound_force_foot},
};

use crate::types::units::*;

#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);
#[derive(Debug, Clone, Copy)]
pub struct DisplayForce(pub Force);
#[derive(Debug, Clone, Copy)]
pub struct DisplayMoment(pub Torque);
#[derive(Debug, Clone, Copy)]
pub struct DisplayStress(pub Pressure);

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.3} m ({:.2} ft)", meters, feet)
    }
}

impl fmt::Display for DisplayForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kn = self.0.get::<kilonewton>();
        let lbf = self.0.get::<pound_force>();
        write!(f, "{:.2} kN ({:.0} lbf)", kn, lbf)
    }
}

impl fmt::Display for DisplayMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kn_m = self.0.get::<kilonewton_meter>();
        let lbf_ft = self.0.get::<pound_force_foot>();
        write!(f, "{:.2} kN·m ({:.0} lbf·ft)", kn_m, lbf_ft)
    }
}

impl fmt::Display for DisplayStress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mpa = self.0.get::<megapascal>();
        let psi_f64 = self.0.get::<psi>();
        write!(f, "{:.3} MPa ({:.0} psi)", mpa, psi_f64)
    }
}
