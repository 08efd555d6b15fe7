//! Configuration management for Vantage
//!
//! This module handles loading, parsing, and validating configuration
//! from TOML files. It combines settings for window transitions,
//! slide offsets, and layer ordering.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;



/// Main configuration struct containing all Vantage settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UiConfig {
    /// Transition animation settings
    #[serde(default)]
    pub animations: AnimationConfig,

    /// Window placement and ordering settings
    #[serde(default)]
    pub window: WindowConfig,
}

/// Window open/close transition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// Enable transition animations (false = every window opens/closes instantly)
    pub enabled: bool,

    /// Fallback animation duration in milliseconds, used when a window view
    /// declares no duration of its own
    pub default_duration: u32,

    /// Fallback easing curve name ("linear", "ease-in", "ease-out",
    /// "ease-in-out", "bounce-out", "back-out")
    pub default_curve: String,
}

/// Window placement configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    /// Off-screen start offset for FromTop/FromDown slides (pixels)
    #[serde(default = "WindowConfig::default_slide_vertical")]
    pub slide_vertical_offset: f32,

    /// Off-screen start offset for FromLeft/FromRight slides (pixels)
    #[serde(default = "WindowConfig::default_slide_horizontal")]
    pub slide_horizontal_offset: f32,

    /// Sort order assigned to the first window
    #[serde(default = "WindowConfig::default_base_order")]
    pub base_order: i32,

    /// Sort order gap between successively raised windows
    #[serde(default = "WindowConfig::default_order_step")]
    pub order_step: i32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_duration: 300,
            default_curve: "ease-out".to_string(),
        }
    }
}

impl WindowConfig {
    fn default_slide_vertical() -> f32 {
        1000.0
    }
    fn default_slide_horizontal() -> f32 {
        1400.0
    }
    fn default_base_order() -> i32 {
        100
    }
    fn default_order_step() -> i32 {
        10
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            slide_vertical_offset: Self::default_slide_vertical(),
            slide_horizontal_offset: Self::default_slide_horizontal(),
            base_order: Self::default_base_order(),
            order_step: Self::default_order_step(),
        }
    }
}

/// Easing curve names accepted in configuration and prefab declarations
pub const VALID_CURVES: &[&str] = &[
    "linear",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "bounce-out",
    "back-out",
];

impl UiConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Path::new(&home).join(path.strip_prefix("~").unwrap_or(path))
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: UiConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.animations.default_duration == 0 {
            anyhow::bail!("Invalid default_duration: must be greater than zero");
        }

        if !VALID_CURVES.contains(&self.animations.default_curve.as_str()) {
            anyhow::bail!("Invalid easing curve: {}", self.animations.default_curve);
        }

        if self.window.slide_vertical_offset <= 0.0 {
            anyhow::bail!("Invalid slide_vertical_offset: must be positive");
        }

        if self.window.slide_horizontal_offset <= 0.0 {
            anyhow::bail!("Invalid slide_horizontal_offset: must be positive");
        }

        if self.window.order_step <= 0 {
            anyhow::bail!("Invalid order_step: must be positive");
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}
