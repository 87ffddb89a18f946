//! Session description files
//!
//! A session can be written as TOML or JSON. Every quantity carries its own
//! unit label:
//!
//! ```toml
//! criterion = "principal_stress"
//!
//! [beam]
//! length = { value = 4.0, unit = "m" }
//! height = { value = 400.0, unit = "mm" }
//! width = { value = 200.0, unit = "mm" }
//!
//! [[supports]]
//! position = { value = 0.0, unit = "m" }
//! kind = "pin"
//!
//! [[supports]]
//! position = { value = 4.0, unit = "m" }
//! kind = "roller"
//!
//! [[point_loads]]
//! position = { value = 2.0, unit = "m" }
//! magnitude = { value = 10.0, unit = "kN" }
//!
//! [limits]
//! tensile = { value = 3.0, unit = "MPa" }
//! compressive = { value = 30.0, unit = "MPa" }
//! shear = { value = 4.0, unit = "MPa" }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::capacity::{FailureCriterion, FailureLimits};
use crate::loads::{DistributedLoad, PointLoad, PointMoment};
use crate::physics::{Support, SupportKind};
use crate::section::BeamSection;
use crate::session::{AnalysisError, AnalysisSession, SessionBuilder};
use crate::types::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unit conversion error: {0}")]
    UnitError(#[from] UnitError),

    #[error("Unsupported session file extension: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    pub length: LengthValue,
    pub height: LengthValue,
    pub width: LengthValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportConfig {
    pub position: LengthValue,
    pub kind: SupportKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoadConfig {
    pub position: LengthValue,
    pub magnitude: ForceValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMomentConfig {
    pub position: LengthValue,
    /// Clockwise(+)
    pub magnitude: MomentValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoadConfig {
    pub start: LengthValue,
    pub end: LengthValue,
    pub intensity: IntensityValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackConfig {
    pub position: LengthValue,
    pub depth: LengthValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub tensile: StressValue,
    pub compressive: StressValue,
    pub shear: StressValue,
}

/// Serializable description of a whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub criterion: FailureCriterion,
    pub beam: BeamConfig,
    #[serde(default)]
    pub supports: Vec<SupportConfig>,
    #[serde(default)]
    pub point_loads: Vec<PointLoadConfig>,
    #[serde(default)]
    pub point_moments: Vec<PointMomentConfig>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoadConfig>,
    #[serde(default)]
    pub cracks: Vec<CrackConfig>,
    #[serde(default)]
    pub limits: Option<LimitsConfig>,
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }

    /// Save to a `.toml` or `.json` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => self.to_toml_string()?,
            Some("json") => self.to_json_string()?,
            other => return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        };
        fs::write(path, text)?;
        Ok(())
    }

    /// Convert every quantity and stage it in a builder
    pub fn to_builder(&self) -> Result<SessionBuilder, AnalysisError> {
        let section = BeamSection::new(
            self.beam.length.to_length().map_err(ConfigError::from)?,
            self.beam.height.to_length().map_err(ConfigError::from)?,
            self.beam.width.to_length().map_err(ConfigError::from)?,
        )?;

        let mut builder = SessionBuilder::new().beam(section).criterion(self.criterion);

        for support in &self.supports {
            let position = support.position.to_length().map_err(ConfigError::from)?;
            builder = builder.support(Support::new(position, support.kind));
        }
        for load in &self.point_loads {
            builder = builder.point_load(PointLoad::new(
                load.position.to_length().map_err(ConfigError::from)?,
                load.magnitude.to_force().map_err(ConfigError::from)?,
            ));
        }
        for moment in &self.point_moments {
            builder = builder.point_moment(PointMoment::new(
                moment.position.to_length().map_err(ConfigError::from)?,
                moment.magnitude.to_moment().map_err(ConfigError::from)?,
            ));
        }
        for load in &self.distributed_loads {
            builder = builder.distributed_load(DistributedLoad::new(
                load.start.to_length().map_err(ConfigError::from)?,
                load.end.to_length().map_err(ConfigError::from)?,
                load.intensity.to_kn_per_m().map_err(ConfigError::from)?,
            ));
        }
        for crack in &self.cracks {
            builder = builder.crack(
                crack.position.to_length().map_err(ConfigError::from)?,
                crack.depth.to_length().map_err(ConfigError::from)?,
            );
        }
        if let Some(limits) = &self.limits {
            builder = builder.limits(FailureLimits::new(
                limits.tensile.to_stress().map_err(ConfigError::from)?,
                limits.compressive.to_stress().map_err(ConfigError::from)?,
                limits.shear.to_stress().map_err(ConfigError::from)?,
            )?);
        }

        Ok(builder)
    }

    pub fn build(&self) -> Result<AnalysisSession, AnalysisError> {
        self.to_builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::types::units::*;

    const MIDSPAN: &str = r#"
[beam]
length = { value = 4.0, unit = "m" }
height = { value = 400.0, unit = "mm" }
width = { value = 20.0, unit = "cm" }

[[supports]]
position = { value = 0.0, unit = "m" }
kind = "pin"

[[supports]]
position = { value = 4.0, unit = "m" }
kind = "roller"

[[point_loads]]
position = { value = 2.0, unit = "m" }
magnitude = { value = 10000.0, unit = "N" }

[[distributed_loads]]
start = { value = 0.0, unit = "m" }
end = { value = 4.0, unit = "m" }
intensity = { value = 1.0, unit = "kN/m" }

[[cracks]]
position = { value = 2.0, unit = "m" }
depth = { value = 100.0, unit = "mm" }

[limits]
tensile = { value = 3.0, unit = "MPa" }
compressive = { value = 30.0, unit = "MPa" }
shear = { value = 4.0, unit = "MPa" }
"#;

    #[test]
    fn test_toml_session() {
        let config = SessionConfig::from_toml_str(MIDSPAN).unwrap();
        assert_eq!(config.criterion, FailureCriterion::PrincipalStress);
        assert!(config.point_moments.is_empty());

        let session = config.build().unwrap();
        assert_relative_eq!(session.section().width(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(session.reactions().total(), 14.0, epsilon = 1e-9);
        assert_relative_eq!(
            session.bending_moment(Length::new::<meter>(2.0)).unwrap().get::<kilonewton_meter>(),
            12.0,
            epsilon = 1e-9
        );
        assert_eq!(session.cracks().len(), 1);
        assert_relative_eq!(session.limits().unwrap().ultimate_compressive, 30.0);
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let config = SessionConfig::from_toml_str(MIDSPAN).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        config.save(&path).unwrap();

        let back = SessionConfig::from_file(&path).unwrap();
        assert_eq!(back, config);

        let session = AnalysisSession::from_config_file(&path).unwrap();
        assert_eq!(session.supports().len(), 2);
    }

    #[test]
    fn test_toml_file_and_bad_extension() {
        let config = SessionConfig::from_toml_str(MIDSPAN).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("session.toml");
        config.save(&path).unwrap();
        assert_eq!(SessionConfig::from_file(&path).unwrap(), config);

        let bad = dir.path().join("session.yaml");
        assert!(matches!(config.save(&bad), Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unknown_unit_is_reported() {
        let text = MIDSPAN.replace(r#"unit = "kN/m""#, r#"unit = "kg/m""#);
        let config = SessionConfig::from_toml_str(&text).unwrap();
        assert!(matches!(
            config.build(),
            Err(AnalysisError::Config(ConfigError::UnitError(UnitError::UnknownIntensityUnit(_))))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SessionConfig::from_toml_str("[beam]\nlength = 4"),
            Err(ConfigError::TomlError(_))
        ));
    }
}
