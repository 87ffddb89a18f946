use serde::{self, Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    f64::{Force, Length, Pressure, Torque},
    force::{kilonewton, kip, meganewton, newton, pound_force},
    length::{centimeter, foot, inch, meter, millimeter},
    pressure::{gigapascal, kilopascal, kip_per_square_inch, megapascal, pascal, psi},
    torque::{kilonewton_meter, newton_meter, pound_force_foot},
};

/// A quantity as written in an input file: raw value plus unit label
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

/// Marker for distributed-load intensity (force per length)
///
/// uom has no force-per-length quantity, so these parse straight to kN/m.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLoadIntensity;

pub type LengthValue = WithUnit<Length>;
pub type ForceValue = WithUnit<Force>;
pub type MomentValue = WithUnit<Torque>;
pub type StressValue = WithUnit<Pressure>;
pub type IntensityValue = WithUnit<LineLoadIntensity>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown force unit: {0}")]
    UnknownForceUnit(String),

    #[error("Unknown moment unit: {0}")]
    UnknownMomentUnit(String),

    #[error("Unknown stress unit: {0}")]
    UnknownStressUnit(String),

    #[error("Unknown distributed load unit: {0}")]
    UnknownIntensityUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        match self.unit.as_str() {
            "m" | "M"
            | "meter" | "Meter" | "METER"
            | "metre" | "Metre" | "METRE"
            | "meters" | "Meters" | "METERS"
            | "metres" | "Metres" | "METRES" => Ok(Length::new::<meter>(self.value)),
            "cm" | "Cm" | "CM"
            | "centimeter" | "centimeters"
            | "centimetre" | "centimetres" => Ok(Length::new::<centimeter>(self.value)),
            "mm" | "Mm" | "MM"
            | "millimeter" | "millimeters"
            | "millimetre" | "millimetres" => Ok(Length::new::<millimeter>(self.value)),
            "ft" | "Ft" | "FT"
            | "foot" | "Foot" | "feet" | "Feet" => Ok(Length::new::<foot>(self.value)),
            "in" | "In" | "IN"
            | "inch" | "Inch" | "inches" | "Inches" => Ok(Length::new::<inch>(self.value)),
            _ => Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        }
    }

    pub fn from_length(length: Length, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "m" | "meter" | "metre" | "meters" | "metres" => length.get::<meter>(),
            "cm" | "centimeter" | "centimeters" => length.get::<centimeter>(),
            "mm" | "millimeter" | "millimeters" => length.get::<millimeter>(),
            "ft" | "foot" | "feet" => length.get::<foot>(),
            "in" | "inch" | "inches" => length.get::<inch>(),
            _ => return Err(UnitError::UnknownLengthUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<Force> {
    pub fn to_force(&self) -> Result<Force, UnitError> {
        match self.unit.as_str() {
            "N" | "n"
            | "newton" | "Newton" | "newtons" | "Newtons" => Ok(Force::new::<newton>(self.value)),
            "kN" | "KN" | "kn"
            | "kilonewton" | "Kilonewton" | "kilonewtons" | "Kilonewtons" => {
                Ok(Force::new::<kilonewton>(self.value))
            }
            "MN" | "meganewton" | "meganewtons" => Ok(Force::new::<meganewton>(self.value)),
            "lbf" | "lb" | "lbs"
            | "pound" | "pounds" => Ok(Force::new::<pound_force>(self.value)),
            "kip" | "kips" | "Kip" | "Kips" => Ok(Force::new::<kip>(self.value)),
            _ => Err(UnitError::UnknownForceUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Torque> {
    pub fn to_moment(&self) -> Result<Torque, UnitError> {
        match self.unit.as_str() {
            "N·m" | "N*m" | "Nm" | "N-m" => Ok(Torque::new::<newton_meter>(self.value)),
            "kN·m" | "kN*m" | "kNm" | "kN-m" | "KNm" => {
                Ok(Torque::new::<kilonewton_meter>(self.value))
            }
            "lbf·ft" | "lbf*ft" | "lb-ft" | "ft-lb" | "ft·lbf" => {
                Ok(Torque::new::<pound_force_foot>(self.value))
            }
            "kip·ft" | "kip*ft" | "kip-ft" | "ft-kip" => {
                Ok(Torque::new::<pound_force_foot>(self.value * 1000.0))
            }
            _ => Err(UnitError::UnknownMomentUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Pressure> {
    pub fn to_stress(&self) -> Result<Pressure, UnitError> {
        match self.unit.as_str() {
            "Pa" | "pa" | "PA"
            | "pascal" | "pascals"
            | "N/m²" | "N/m^2" => Ok(Pressure::new::<pascal>(self.value)),
            "kPa" | "KPa" | "kpa"
            | "kilopascal" | "kilopascals"
            | "kN/m²" | "kN/m^2" => Ok(Pressure::new::<kilopascal>(self.value)),
            "MPa" | "mpa" | "Mpa"
            | "megapascal" | "megapascals"
            | "N/mm²" | "N/mm^2" => Ok(Pressure::new::<megapascal>(self.value)),
            "GPa" | "gpa"
            | "gigapascal" | "gigapascals" => Ok(Pressure::new::<gigapascal>(self.value)),
            "psi" | "lbf/in²" | "lbf/in^2" => Ok(Pressure::new::<psi>(self.value)),
            "ksi" | "kip/in²" | "kip/in^2" => Ok(Pressure::new::<kip_per_square_inch>(self.value)),
            _ => Err(UnitError::UnknownStressUnit(self.unit.clone())),
        }
    }

    pub fn from_stress(stress: Pressure, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "Pa" | "pascal" | "pascals" => stress.get::<pascal>(),
            "kPa" | "kilopascal" | "kilopascals" => stress.get::<kilopascal>(),
            "MPa" | "megapascal" | "megapascals" => stress.get::<megapascal>(),
            "GPa" | "gigapascal" | "gigapascals" => stress.get::<gigapascal>(),
            "psi" => stress.get::<psi>(),
            "ksi" => stress.get::<kip_per_square_inch>(),
            _ => return Err(UnitError::UnknownStressUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<LineLoadIntensity> {
    /// Intensity in kN/m
    pub fn to_kn_per_m(&self) -> Result<f64, UnitError> {
        let per_meter = |force: Force| force.get::<kilonewton>();
        let per_foot = |force: Force| force.get::<kilonewton>() / Length::new::<foot>(1.0).get::<meter>();

        match self.unit.as_str() {
            "N/m" | "n/m" => Ok(per_meter(Force::new::<newton>(self.value))),
            "kN/m" | "KN/m" | "kn/m" => Ok(self.value),
            "lbf/ft" | "plf" | "lb/ft" => Ok(per_foot(Force::new::<pound_force>(self.value))),
            "kip/ft" | "klf" => Ok(per_foot(Force::new::<kip>(self.value))),
            _ => Err(UnitError::UnknownIntensityUnit(self.unit.clone())),
        }
    }
}
