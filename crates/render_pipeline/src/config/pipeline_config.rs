//! # Pipeline Configuration
//!
//! Per-category switches and draw budgets, plus the level-of-detail policy.
//!
//! ```toml
//! [opaque]
//! max_drawn = 500
//!
//! [transparent]
//! enabled = false
//!
//! [lod]
//! enabled = true
//! min_angular_size = 0.01
//! ```

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Settings for one item category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Whether the category's job runs at all
    pub enabled: bool,

    /// Maximum number of draws submitted per frame (`None` = unlimited)
    pub max_drawn: Option<usize>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_drawn: None,
        }
    }
}

/// Settings for the light path
///
/// Lights are never truncated, so there is no budget; a `max_drawn` key is
/// rejected when the file is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightsConfig {
    /// Whether the light job runs at all
    pub enabled: bool,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Level-of-detail rejection policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    /// Install the angular-size predicate during culling
    pub enabled: bool,

    /// Smallest angular size (radians, approximated as size / distance) still drawn
    pub min_angular_size: f32,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_angular_size: 0.005,
        }
    }
}

/// Top-level pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Opaque shapes (front-to-back)
    pub opaque: CategoryConfig,

    /// Translucent shapes (back-to-front)
    pub transparent: CategoryConfig,

    /// Light items
    pub lights: LightsConfig,

    /// Level-of-detail policy
    pub lod: LodConfig,
}

impl PipelineConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.lod.min_angular_size;
        if !size.is_finite() || size < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "lod.min_angular_size must be a finite, non-negative angle (got {size})"
            )));
        }
        Ok(())
    }
}

impl Config for PipelineConfig {}
