//! JSON-backed controller configuration.
//!
//! The types here mirror the runtime force types but keep every field
//! optional or defaulted, so documents stay short. Converting into runtime
//! settings runs the same validation as building the types by hand.

use std::fs;
use std::path::Path;

use glam::DVec3;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FOLLOW_MULTIPLIER, ON_SURFACE_EPSILON};
use crate::controller::{check_limit, PursuitSettings, VelocitySettings};
use crate::error::ConfigurationError;
use crate::force::{
    DirectionType, DistanceSpec, ForceGenerator, ForceKind, ForceTerm, Gradient, GradientStop,
    SpeedGate,
};
use crate::registry::defaults::default_plane_terms;
use crate::registry::RegistrySettings;

/// A single generator as written in a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Constant or drag.
    pub kind: ForceKind,
    /// What the generator acts along.
    pub direction: DirectionType,
    /// Mass-independent strength.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_force: Option<f64>,
    /// Strength per unit mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_acceleration: Option<f64>,
    /// Only apply below this selected length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_when_under_speed: Option<f64>,
    /// Only apply above this selected length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_when_over_speed: Option<f64>,
}

impl TryFrom<&GeneratorConfig> for ForceGenerator {
    type Error = ConfigurationError;

    fn try_from(config: &GeneratorConfig) -> Result<Self, Self::Error> {
        let generator = Self::new(
            config.kind,
            config.direction,
            config.base_force,
            config.base_acceleration,
        )?;
        Ok(generator.with_speed_gate(SpeedGate {
            under: config.apply_when_under_speed,
            over: config.apply_when_over_speed,
        }))
    }
}

impl From<&ForceGenerator> for GeneratorConfig {
    fn from(generator: &ForceGenerator) -> Self {
        let magnitude = generator.magnitude();
        let gate = generator.speed_gate();
        Self {
            kind: generator.kind(),
            direction: generator.direction(),
            base_force: magnitude.force(),
            base_acceleration: magnitude.acceleration(),
            apply_when_under_speed: gate.under,
            apply_when_over_speed: gate.over,
        }
    }
}

/// One gradient stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopConfig {
    /// Where the stop sits.
    pub distance: DistanceSpec,
    /// Generator in effect there.
    pub generator: GeneratorConfig,
}

/// A generator or a gradient, tagged by `"term"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "term", rename_all = "snake_case")]
pub enum TermConfig {
    /// A single generator.
    Generator(GeneratorConfig),
    /// Stops blended by distance.
    Gradient {
        /// Stops in ascending distance order.
        stops: Vec<StopConfig>,
    },
}

impl TryFrom<&TermConfig> for ForceTerm {
    type Error = ConfigurationError;

    fn try_from(config: &TermConfig) -> Result<Self, Self::Error> {
        match config {
            TermConfig::Generator(generator) => Ok(ForceGenerator::try_from(generator)?.into()),
            TermConfig::Gradient { stops } => {
                let resolved = stops
                    .iter()
                    .map(|stop| {
                        ForceGenerator::try_from(&stop.generator)
                            .map(|generator| GradientStop::new(stop.distance, generator))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Gradient::new(resolved)?.into())
            }
        }
    }
}

impl From<&ForceTerm> for TermConfig {
    fn from(term: &ForceTerm) -> Self {
        match term {
            ForceTerm::Generator(generator) => Self::Generator(generator.into()),
            ForceTerm::Gradient(gradient) => Self::Gradient {
                stops: gradient
                    .stops()
                    .iter()
                    .map(|stop| StopConfig {
                        distance: stop.distance,
                        generator: (&stop.generator).into(),
                    })
                    .collect(),
            },
        }
    }
}

/// Pursuit controller settings as written in a configuration document.
///
/// Missing fields fall back to the default plane-pinning setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Force terms summed each step.
    pub terms: Vec<TermConfig>,
    /// Body-local anchor offset.
    pub offset_from_body: DVec3,
    /// Push at the anchor instead of the centre of mass.
    pub causes_torque: bool,
    /// Cap on the summed force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_force: Option<f64>,
    /// Cap on the summed force per unit mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_acceleration: Option<f64>,
    /// Distance under which a tracked object counts as on its surface.
    pub on_surface_epsilon: f64,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            terms: default_plane_terms().iter().map(TermConfig::from).collect(),
            offset_from_body: DVec3::ZERO,
            causes_torque: false,
            max_force: None,
            max_acceleration: None,
            on_surface_epsilon: ON_SURFACE_EPSILON,
        }
    }
}

impl PursuitConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Json`] for malformed documents.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        parse(json)
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Io`] or [`ConfigurationError::Json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        read(path.as_ref())
    }

    /// Validated pursuit settings with a zero body radius.
    ///
    /// # Errors
    /// Propagates generator and gradient validation errors, and returns
    /// [`ConfigurationError::InvalidLimit`] for a negative or non-finite cap.
    pub fn pursuit_settings(&self) -> Result<PursuitSettings, ConfigurationError> {
        check_limit("max_force", self.max_force)?;
        check_limit("max_acceleration", self.max_acceleration)?;
        let generators = self
            .terms
            .iter()
            .map(ForceTerm::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PursuitSettings::new(generators)
            .with_offset(self.offset_from_body, self.causes_torque)
            .with_limits(self.max_force, self.max_acceleration))
    }

    /// Validated registry template.
    ///
    /// # Errors
    /// Propagates generator and gradient validation errors.
    pub fn registry_settings(&self) -> Result<RegistrySettings, ConfigurationError> {
        Ok(RegistrySettings {
            pursuit: self.pursuit_settings()?,
            on_surface_epsilon: self.on_surface_epsilon,
        })
    }
}

/// Velocity controller settings as written in a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    /// Velocity per unit of distance to the target.
    pub multiplier: f64,
    /// Optional speed cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_velocity: Option<f64>,
    /// Body-local anchor offset.
    pub offset_from_body: DVec3,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_FOLLOW_MULTIPLIER,
            max_velocity: None,
            offset_from_body: DVec3::ZERO,
        }
    }
}

impl From<VelocityConfig> for VelocitySettings {
    fn from(config: VelocityConfig) -> Self {
        Self {
            offset_from_body: config.offset_from_body,
            multiplier: config.multiplier,
            max_velocity: config.max_velocity,
        }
    }
}

/// Top-level document for the demo binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for surface-pinning controllers.
    pub pursuit: PursuitConfig,
    /// Optional camera that follows the bodies' centroid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<VelocityConfig>,
}

impl Config {
    /// Parse a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Json`] for malformed documents.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        parse(json)
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Io`] or [`ConfigurationError::Json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        read(path.as_ref())
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Json`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, ConfigurationError> {
    Ok(serde_json::from_str(json)?)
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigurationError> {
    let json = fs::read_to_string(path)?;
    let config = parse(&json)?;
    info!("loaded configuration from {}", path.display());
    Ok(config)
}
