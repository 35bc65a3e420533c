use crate::core::elements::{FALLBACK_COLOR, FALLBACK_RADIUS};
use crate::core::models::color::Rgb;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view, in degrees.
    pub fov_degrees: f64,
    /// Multiplier applied to the fitted distance so the molecule does not touch the frame.
    pub margin: f64,
    /// Closest the fitted camera may be placed.
    pub min_distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BondConfig {
    pub color: Rgb,
    pub single_radius: f64,
    /// Radius of each cylinder of a double or triple bond.
    pub multi_radius: f64,
    pub double_offset: f64,
    pub triple_offset: f64,
    /// Absolute y component of the bond direction above which the
    /// perpendicular is taken against +X instead of +Y.
    pub near_parallel_threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomConfig {
    /// Style for atoms whose element has no entry in the structure.
    pub fallback_color: Rgb,
    pub fallback_radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    pub camera: CameraConfig,
    pub bonds: BondConfig,
    pub atoms: AtomConfig,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                fov_degrees: 75.0,
                margin: 1.5,
                min_distance: 3.0,
            },
            bonds: BondConfig {
                color: Rgb::from_hex(0x666666),
                single_radius: 0.05,
                multi_radius: 0.04,
                double_offset: 0.1,
                triple_offset: 0.08,
                near_parallel_threshold: 0.9,
            },
            atoms: AtomConfig {
                fallback_color: FALLBACK_COLOR,
                fallback_radius: FALLBACK_RADIUS,
            },
        }
    }
}

#[derive(Default)]
pub struct GeometryConfigBuilder {
    fov_degrees: Option<f64>,
    margin: Option<f64>,
    min_distance: Option<f64>,
    bond_color: Option<Rgb>,
    single_radius: Option<f64>,
    multi_radius: Option<f64>,
    double_offset: Option<f64>,
    triple_offset: Option<f64>,
    near_parallel_threshold: Option<f64>,
    fallback_color: Option<Rgb>,
    fallback_radius: Option<f64>,
}

impl GeometryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fov_degrees(mut self, degrees: f64) -> Self {
        self.fov_degrees = Some(degrees);
        self
    }
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }
    pub fn min_distance(mut self, distance: f64) -> Self {
        self.min_distance = Some(distance);
        self
    }
    pub fn bond_color(mut self, color: Rgb) -> Self {
        self.bond_color = Some(color);
        self
    }
    pub fn single_radius(mut self, radius: f64) -> Self {
        self.single_radius = Some(radius);
        self
    }
    pub fn multi_radius(mut self, radius: f64) -> Self {
        self.multi_radius = Some(radius);
        self
    }
    pub fn double_offset(mut self, offset: f64) -> Self {
        self.double_offset = Some(offset);
        self
    }
    pub fn triple_offset(mut self, offset: f64) -> Self {
        self.triple_offset = Some(offset);
        self
    }
    pub fn near_parallel_threshold(mut self, threshold: f64) -> Self {
        self.near_parallel_threshold = Some(threshold);
        self
    }
    pub fn fallback_color(mut self, color: Rgb) -> Self {
        self.fallback_color = Some(color);
        self
    }
    pub fn fallback_radius(mut self, radius: f64) -> Self {
        self.fallback_radius = Some(radius);
        self
    }

    /// Builds the configuration. Unset values take their defaults.
    pub fn build(self) -> Result<GeometryConfig, ConfigError> {
        let defaults = GeometryConfig::default();

        let camera = CameraConfig {
            fov_degrees: check(
                "fov_degrees",
                self.fov_degrees.unwrap_or(defaults.camera.fov_degrees),
                |v| v > 0.0 && v < 180.0,
                "must be strictly between 0 and 180",
            )?,
            margin: check(
                "margin",
                self.margin.unwrap_or(defaults.camera.margin),
                |v| v >= 1.0,
                "must be at least 1",
            )?,
            min_distance: check(
                "min_distance",
                self.min_distance.unwrap_or(defaults.camera.min_distance),
                |v| v >= 0.0,
                "must not be negative",
            )?,
        };
        let bonds = BondConfig {
            color: self.bond_color.unwrap_or(defaults.bonds.color),
            single_radius: positive(
                "single_radius",
                self.single_radius.unwrap_or(defaults.bonds.single_radius),
            )?,
            multi_radius: positive(
                "multi_radius",
                self.multi_radius.unwrap_or(defaults.bonds.multi_radius),
            )?,
            double_offset: check(
                "double_offset",
                self.double_offset.unwrap_or(defaults.bonds.double_offset),
                |v| v >= 0.0,
                "must not be negative",
            )?,
            triple_offset: check(
                "triple_offset",
                self.triple_offset.unwrap_or(defaults.bonds.triple_offset),
                |v| v >= 0.0,
                "must not be negative",
            )?,
            near_parallel_threshold: check(
                "near_parallel_threshold",
                self.near_parallel_threshold
                    .unwrap_or(defaults.bonds.near_parallel_threshold),
                |v| v > 0.0 && v <= 1.0,
                "must be in (0, 1]",
            )?,
        };
        let atoms = AtomConfig {
            fallback_color: self.fallback_color.unwrap_or(defaults.atoms.fallback_color),
            fallback_radius: positive(
                "fallback_radius",
                self.fallback_radius.unwrap_or(defaults.atoms.fallback_radius),
            )?,
        };

        Ok(GeometryConfig {
            camera,
            bonds,
            atoms,
        })
    }
}

fn check(
    name: &'static str,
    value: f64,
    accept: impl Fn(f64) -> bool,
    reason: &'static str,
) -> Result<f64, ConfigError> {
    if value.is_finite() && accept(value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    check(name, value, |v| v > 0.0, "must be positive")
}
