//! Parameter overlay.
//!
//! Console-backed replacement for slider widgets. User commands mutate cvars
//! between frames; the frame loop reads a fresh [`OverlayParams`] every tick
//! and publishes computed values back as read-only cvars.

use geom_shared::{
    camera::CameraParams,
    config::ViewerConfig,
    console::{Console, CvarFlags, CvarValue},
    math::Vec3,
};

use crate::app::FrameReport;

/// Everything the overlay feeds into one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    pub point: Vec3,
    pub point_radius: f32,
    pub closest_radius: f32,
    pub camera: CameraParams,
}

impl OverlayParams {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self {
            point: cfg.point,
            point_radius: cfg.marker.radius,
            closest_radius: cfg.marker.radius,
            camera: cfg.camera.params,
        }
    }
}

pub struct Overlay {
    console: Console,
}

impl Overlay {
    pub fn new(initial: &OverlayParams) -> Self {
        let mut console = Console::new();
        console.register_cvar("point", CvarValue::Vec3(initial.point), "Query point", CvarFlags::NONE);
        console.register_cvar(
            "radius",
            CvarValue::Float(initial.point_radius as f64),
            "Radius of the query point marker",
            CvarFlags::NONE,
        );
        console.register_cvar(
            "closest_radius",
            CvarValue::Float(initial.closest_radius as f64),
            "Radius of the closest point marker",
            CvarFlags::NONE,
        );
        console.register_cvar(
            "camera_translate",
            CvarValue::Vec3(initial.camera.translate),
            "Camera position",
            CvarFlags::NONE,
        );
        console.register_cvar(
            "camera_rotate",
            CvarValue::Vec3(initial.camera.rotate),
            "Camera pitch/yaw/roll, radians",
            CvarFlags::NONE,
        );
        console.register_cvar("project", CvarValue::Vec3(Vec3::ZERO), "Projection of point onto the segment", CvarFlags::READ_ONLY);
        console.register_cvar("closest", CvarValue::Vec3(Vec3::ZERO), "Closest point on the segment", CvarFlags::READ_ONLY);
        Self { console }
    }

    /// Reads the current parameter values.
    pub fn params(&self) -> anyhow::Result<OverlayParams> {
        Ok(OverlayParams {
            point: self.console.vec3("point")?,
            point_radius: self.console.float("radius")?,
            closest_radius: self.console.float("closest_radius")?,
            camera: CameraParams {
                translate: self.console.vec3("camera_translate")?,
                rotate: self.console.vec3("camera_rotate")?,
            },
        })
    }

    /// Mirrors computed results into the read-only cvars.
    pub fn publish(&mut self, report: &FrameReport) -> anyhow::Result<()> {
        self.console.set_cvar("project", CvarValue::Vec3(report.project))?;
        self.console.set_cvar("closest", CvarValue::Vec3(report.closest.position))?;
        Ok(())
    }

    pub fn exec(&mut self, line: &str) -> anyhow::Result<Vec<String>> {
        self.console.exec(line)
    }
}
