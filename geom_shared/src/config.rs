//! Configuration system.
//!
//! Loads viewer configuration from JSON strings/files. Every field has a
//! default, so an empty object `{}` is a valid config.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    camera::Camera,
    geometry::Segment,
    math::Vec3,
    shapes::{Grid, Sphere},
};

/// Root configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Frame rate of the viewer loop.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub grid: Grid,
    /// The fixed segment the closest point is taken on.
    #[serde(default = "default_segment")]
    pub segment: Segment,
    /// Initial query point; the overlay may move it every frame.
    #[serde(default = "default_point")]
    pub point: Vec3,
    /// Template for both marker spheres (radius, subdivision).
    #[serde(default)]
    pub marker: Sphere,
}

fn default_tick_hz() -> u32 {
    60
}

fn default_segment() -> Segment {
    Segment::new(Vec3::new(-2.0, -1.0, 0.0), Vec3::new(3.0, 2.0, 2.0))
}

fn default_point() -> Vec3 {
    Vec3::new(-1.5, 0.6, 0.6)
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            camera: Camera::default(),
            grid: Grid::default(),
            segment: default_segment(),
            point: default_point(),
            marker: Sphere::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_json_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), tick_hz = cfg.tick_hz, "Loaded viewer config");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json_str("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn partial_camera_keeps_other_defaults() {
        let cfg = ViewerConfig::from_json_str(
            r#"{ "tick_hz": 30, "camera": { "translate": { "x": 0.0, "y": 5.0, "z": -10.0 } } }"#,
        )
        .unwrap();
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.camera.params.translate, Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(cfg.camera.params.rotate, Camera::default().params.rotate);
        assert_eq!(cfg.camera.fov_y, 0.45);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ViewerConfig::from_json_str("{ tick_hz: }").is_err());
    }
}
