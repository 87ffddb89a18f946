mod display;
mod explicit_unit_values;

pub use uom::si::f64::{Force, Length, Pressure, Torque};

pub use uom::si::{
    force::{kilonewton, kip, meganewton, newton, pound_force},
    length::{centimeter, foot, inch, meter, millimeter},
    pressure::{
        gigapascal, kilopascal, kip_per_square_inch, megapascal, pascal,
        pound_force_per_square_inch, psi,
    },
    torque::{kilonewton_meter, newton_meter, pound_force_foot},
};

pub use display::{DisplayForce, DisplayLength, DisplayMoment, DisplayStress};
pub use explicit_unit_values::{
    ForceValue, IntensityValue, LengthValue, LineLoadIntensity, MomentValue, StressValue,
    UnitError, WithUnit,
};
