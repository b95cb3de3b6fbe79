//! Static configuration tables for the petal and particle simulations
//!
//! Defaults reproduce the landing page's constants. A TOML file may override
//! any subset of fields; missing fields keep their defaults.

use crate::error::{HanamiError, Result};
use crate::types::{Color, Hsl};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewport width (CSS px) below which the mobile pool sizes apply
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Top-level configuration for both simulations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HanamiConfig {
    /// Width threshold between the mobile and desktop breakpoints
    pub breakpoint_px: f32,
    /// Fixed RNG seed; a host-derived seed is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    pub petals: PetalConfig,
    pub field: FieldConfig,
}

impl Default for HanamiConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            seed: None,
            petals: PetalConfig::default(),
            field: FieldConfig::default(),
        }
    }
}

impl HanamiConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every range and factor the simulations rely on
    pub fn validate(&self) -> Result<()> {
        if !(self.breakpoint_px > 0.0) {
            return Err(HanamiError::InvalidConfig(format!(
                "breakpoint_px must be positive, got {}",
                self.breakpoint_px
            )));
        }
        self.petals.validate()?;
        self.field.validate()?;
        Ok(())
    }
}

/// Constants for the falling-petal simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetalConfig {
    pub mobile_count: usize,
    pub desktop_count: usize,
    pub colors: Vec<Color>,
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Gusts pick a target wind in `[-wind_speed, wind_speed]`
    pub wind_speed: f32,
    /// Full span of the per-petal rotation speed, centered on zero
    pub rotation_speed: f32,
    /// Per-frame chance of a new gust target
    pub gust_probability: f32,
    /// Fraction of the remaining gap closed by the wind each frame
    pub wind_smoothing: f32,
    /// Wind target change per pixel of horizontal pointer travel
    pub pointer_wind_scale: f32,
    pub min_swing_amplitude: f32,
    pub max_swing_amplitude: f32,
    pub min_swing_speed: f32,
    pub max_swing_speed: f32,
    /// Scale applied to the frame-to-frame swing change before it moves x
    pub swing_damping: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    /// Vertical distance past the edges where petals spawn and recycle
    pub vertical_margin: f32,
    /// Horizontal distance past the edges before a petal is relocated
    pub horizontal_margin: f32,
    /// Peak alpha of the white highlight drawn over each petal
    pub highlight_alpha: f32,
}

impl Default for PetalConfig {
    fn default() -> Self {
        Self {
            mobile_count: 15,
            desktop_count: 30,
            colors: vec![
                Color::from_rgba8(255, 229, 236, 0.8),
                Color::from_rgba8(255, 201, 217, 0.8),
                Color::from_rgba8(255, 179, 198, 0.8),
                Color::from_rgba8(240, 230, 255, 0.7),
            ],
            min_size: 8.0,
            max_size: 16.0,
            min_speed: 1.0,
            max_speed: 3.0,
            wind_speed: 0.5,
            rotation_speed: 0.02,
            gust_probability: 0.01,
            wind_smoothing: 0.02,
            pointer_wind_scale: 0.01,
            min_swing_amplitude: 50.0,
            max_swing_amplitude: 100.0,
            min_swing_speed: 0.01,
            max_swing_speed: 0.03,
            swing_damping: 0.01,
            min_opacity: 0.6,
            max_opacity: 1.0,
            vertical_margin: 20.0,
            horizontal_margin: 50.0,
            highlight_alpha: 0.3,
        }
    }
}

impl PetalConfig {
    fn validate(&self) -> Result<()> {
        positive_count("petals.mobile_count", self.mobile_count)?;
        positive_count("petals.desktop_count", self.desktop_count)?;
        if self.colors.is_empty() {
            return Err(HanamiError::InvalidConfig(
                "petals.colors must contain at least one color".into(),
            ));
        }
        ordered("petals.size", self.min_size, self.max_size)?;
        ordered("petals.speed", self.min_speed, self.max_speed)?;
        ordered(
            "petals.swing_amplitude",
            self.min_swing_amplitude,
            self.max_swing_amplitude,
        )?;
        ordered("petals.swing_speed", self.min_swing_speed, self.max_swing_speed)?;
        ordered("petals.opacity", self.min_opacity, self.max_opacity)?;
        within("petals.min_opacity", self.min_opacity, 0.0, 1.0)?;
        within("petals.max_opacity", self.max_opacity, 0.0, 1.0)?;
        within("petals.gust_probability", self.gust_probability, 0.0, 1.0)?;
        within("petals.wind_smoothing", self.wind_smoothing, f32::EPSILON, 1.0)?;
        within("petals.highlight_alpha", self.highlight_alpha, 0.0, 1.0)?;
        if self.wind_speed < 0.0 {
            return Err(HanamiError::InvalidConfig(format!(
                "petals.wind_speed must not be negative, got {}",
                self.wind_speed
            )));
        }
        Ok(())
    }

    pub fn count_for(&self, mobile: bool) -> usize {
        if mobile {
            self.mobile_count
        } else {
            self.desktop_count
        }
    }
}

/// Constants for the 3D ambient particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub mobile_count: usize,
    pub desktop_count: usize,
    /// Point sprite size in world units
    pub particle_size: f32,
    pub opacity: f32,
    /// Span of the random per-axis velocity (z uses half of it)
    pub move_speed: f32,
    /// Camera displacement at full pointer deflection
    pub mouse_influence: f32,
    /// Fraction of the remaining pointer gap the camera closes each frame
    pub camera_smoothing: f32,
    /// Per-axis position bounds; crossing one negates that coordinate
    pub bounds: [f32; 3],
    /// Peak per-frame jitter on x and y
    pub jitter_amplitude: f32,
    /// Jitter phase advance per second of simulation time
    pub jitter_frequency: f32,
    /// Group rotation about the vertical axis, radians per frame
    pub rotation_speed: f32,
    pub gradient_start: Hsl,
    pub gradient_end: Hsl,
    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_distance: f32,
    pub max_pixel_ratio: f32,
    pub additive_blending: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mobile_count: 50,
            desktop_count: 100,
            particle_size: 3.0,
            opacity: 0.8,
            move_speed: 0.2,
            mouse_influence: 50.0,
            camera_smoothing: 0.05,
            bounds: [400.0, 400.0, 200.0],
            jitter_amplitude: 0.1,
            jitter_frequency: 0.1,
            rotation_speed: 0.0005,
            gradient_start: Hsl::new(0.92, 0.7, 0.8),
            gradient_end: Hsl::new(1.0, 0.7, 0.8),
            camera_fov_degrees: 75.0,
            camera_near: 1.0,
            camera_far: 1000.0,
            camera_distance: 400.0,
            max_pixel_ratio: 2.0,
            additive_blending: true,
        }
    }
}

impl FieldConfig {
    fn validate(&self) -> Result<()> {
        positive_count("field.mobile_count", self.mobile_count)?;
        positive_count("field.desktop_count", self.desktop_count)?;
        within("field.opacity", self.opacity, 0.0, 1.0)?;
        within("field.camera_smoothing", self.camera_smoothing, f32::EPSILON, 1.0)?;
        within("field.camera_fov_degrees", self.camera_fov_degrees, 1.0, 179.0)?;
        for (axis, bound) in ["x", "y", "z"].iter().zip(self.bounds) {
            if !(bound > 0.0) {
                return Err(HanamiError::InvalidConfig(format!(
                    "field.bounds.{axis} must be positive, got {bound}"
                )));
            }
        }
        if !(self.camera_near > 0.0 && self.camera_far > self.camera_near) {
            return Err(HanamiError::InvalidConfig(format!(
                "field camera planes must satisfy 0 < near < far, got {} and {}",
                self.camera_near, self.camera_far
            )));
        }
        Ok(())
    }

    pub fn count_for(&self, mobile: bool) -> usize {
        if mobile {
            self.mobile_count
        } else {
            self.desktop_count
        }
    }
}

fn positive_count(field: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(HanamiError::InvalidConfig(format!(
            "{field} must be at least 1"
        )));
    }
    Ok(())
}

fn ordered(field: &str, min: f32, max: f32) -> Result<()> {
    if min > max {
        return Err(HanamiError::EmptyRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

fn within(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(HanamiError::ValueOutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HanamiConfig::default();
        config.validate().unwrap();
        assert_eq!(config.petals.count_for(true), 15);
        assert_eq!(config.petals.count_for(false), 30);
        assert_eq!(config.field.count_for(true), 50);
        assert_eq!(config.field.count_for(false), 100);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml_str = r#"
seed = 7

[petals]
desktop_count = 40
wind_speed = 1.5
colors = [[1.0, 0.5, 0.5, 0.9]]

[field]
bounds = [300, 300, 100]
"#;
        let config = HanamiConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.petals.desktop_count, 40);
        assert_eq!(config.petals.mobile_count, 15);
        assert!((config.petals.wind_speed - 1.5).abs() < 1e-6);
        assert_eq!(config.petals.colors.len(), 1);
        assert!((config.petals.colors[0].g - 0.5).abs() < 1e-6);
        assert!((config.field.bounds[2] - 100.0).abs() < 1e-6);
        assert!((config.field.camera_smoothing - 0.05).abs() < 1e-6);
    }

    #[test]
    fn toml_round_trip_preserves_defaults() {
        let config = HanamiConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = HanamiConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn inverted_size_range_is_rejected() {
        let toml_str = "[petals]\nmin_size = 20.0\nmax_size = 10.0\n";
        let err = HanamiConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, HanamiError::EmptyRange { .. }));
    }

    #[test]
    fn opacity_above_one_is_rejected() {
        let toml_str = "[petals]\nmax_opacity = 1.5\n";
        let err = HanamiConfig::from_toml_str(toml_str).unwrap_err();
        match err {
            HanamiError::ValueOutOfRange { field, .. } => assert_eq!(field, "petals.max_opacity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = HanamiConfig::from_toml_str("[petals]\ncolors = []\n").unwrap_err();
        assert!(matches!(err, HanamiError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = HanamiConfig::from_toml_str("petals = [").unwrap_err();
        assert!(matches!(err, HanamiError::TomlParseError(_)));
    }
}
