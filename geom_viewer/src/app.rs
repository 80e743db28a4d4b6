//! Frame logic.
//!
//! One call to [`ClosestPointApp::frame`] is one tick: the closest point is
//! recomputed from that tick's parameters, the camera matrices are refreshed,
//! and only then is anything drawn. No geometry survives between frames
//! except the fixed segment and the camera/grid settings.

use anyhow::Context;
use geom_shared::{
    camera::Camera,
    config::ViewerConfig,
    geometry::{closest_point, project, ClosestPoint, Segment},
    math::Vec3,
    render::{Color, RenderBackend},
    shapes::{Grid, Sphere},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::overlay::OverlayParams;

/// What one frame computed and drew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub project: Vec3,
    pub closest: ClosestPoint,
    pub lines: usize,
}

pub struct ClosestPointApp {
    segment: Segment,
    camera: Camera,
    grid: Grid,
    marker: Sphere,
    frame: u64,
}

impl ClosestPointApp {
    pub fn new(cfg: &ViewerConfig) -> Self {
        if cfg.segment.is_degenerate() {
            warn!(origin = ?cfg.segment.origin, "Segment has zero length; closest point collapses to its origin");
        }
        Self {
            segment: cfg.segment,
            camera: cfg.camera,
            grid: cfg.grid,
            marker: cfg.marker,
            frame: 0,
        }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Runs one tick: recompute, then draw.
    pub fn frame(
        &mut self,
        params: &OverlayParams,
        backend: &mut impl RenderBackend,
    ) -> anyhow::Result<FrameReport> {
        let project = project(params.point - self.segment.origin, self.segment.diff);
        let closest = closest_point(params.point, &self.segment);

        self.camera.update(&params.camera);
        let pipeline = self
            .camera
            .pipeline()
            .with_context(|| format!("camera matrices for frame {}", self.frame))?;

        let point_sphere = Sphere {
            center: params.point,
            radius: params.point_radius,
            ..self.marker
        };
        let closest_sphere = Sphere {
            center: closest.position,
            radius: params.closest_radius,
            ..self.marker
        };

        let mut lines = self.grid.edges(&pipeline);
        lines.extend(point_sphere.edges(&pipeline, Color::RED));
        lines.extend(closest_sphere.edges(&pipeline, Color::BLACK));

        let (x1, y1) = pipeline.to_pixel(self.segment.origin);
        let (x2, y2) = pipeline.to_pixel(self.segment.end());

        backend.begin_frame();
        for line in &lines {
            backend.draw_line(line.x1, line.y1, line.x2, line.y2, line.color);
        }
        backend.draw_line(x1, y1, x2, y2, Color::WHITE);
        backend.end_frame();

        let report = FrameReport {
            frame: self.frame,
            project,
            closest,
            lines: lines.len() + 1,
        };
        debug!(
            frame = report.frame,
            t = closest.t,
            closest = ?closest.position,
            lines = report.lines,
            "Frame drawn"
        );
        self.frame += 1;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_shared::render::{NullRenderer, RecordingRenderer};

    fn params(cfg: &ViewerConfig) -> OverlayParams {
        OverlayParams::from_config(cfg)
    }

    #[test]
    fn frame_draws_grid_spheres_and_segment() {
        let cfg = ViewerConfig::default();
        let mut app = ClosestPointApp::new(&cfg);
        let mut r = RecordingRenderer::new();
        let report = app.frame(&params(&cfg), &mut r).unwrap();

        let frame = r.last_frame().unwrap();
        assert_eq!(report.lines, 22 + 2 * 288 + 1);
        assert_eq!(frame.lines.len(), report.lines);
        assert_eq!(frame.lines.iter().filter(|l| l.color == Color::RED).count(), 288);
        assert_eq!(frame.lines.last().unwrap().color, Color::WHITE);
    }

    #[test]
    fn closest_point_tracks_each_frames_point() {
        let cfg = ViewerConfig::default();
        let mut app = ClosestPointApp::new(&cfg);
        let mut p = params(&cfg);

        let first = app.frame(&p, &mut NullRenderer).unwrap();
        p.point = app.segment().end() + Vec3::new(0.0, 5.0, 0.0);
        let second = app.frame(&p, &mut NullRenderer).unwrap();

        assert_ne!(first.closest.position, second.closest.position);
        assert_eq!(second.frame, 1);
        assert!(second.closest.t > first.closest.t);
    }

    #[test]
    fn singular_camera_is_an_error() {
        let mut cfg = ViewerConfig::default();
        cfg.camera.scale = Vec3::ZERO;
        let mut app = ClosestPointApp::new(&cfg);
        assert!(app.frame(&params(&cfg), &mut NullRenderer).is_err());
    }
}
