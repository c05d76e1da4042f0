//! Canvas configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Settings shared by the layout engine and the canvas controller.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub snap_to_grid: bool,
    /// Factor applied by the zoom keys and API.
    pub zoom_step: f64,
    /// Factor applied per wheel notch with Ctrl/Meta held.
    pub wheel_zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            snap_to_grid: true,
            zoom_step: 1.2,
            wheel_zoom_step: 1.1,
            min_zoom: 0.25,
            max_zoom: 4.0,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.min_zoom > config.max_zoom {
            log::warn!(
                "min_zoom {} exceeds max_zoom {}; zoom will be pinned",
                config.min_zoom,
                config.max_zoom
            );
        }
        Ok(config)
    }
}
