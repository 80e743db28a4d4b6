//! Wireframe shapes drawn as screen-space lines.

use serde::{Deserialize, Serialize};

use crate::{
    camera::Pipeline,
    math::{Vec3, PI},
    render::{Color, Line, RenderBackend},
};

fn screen_line(pipeline: &Pipeline, from: Vec3, to: Vec3, color: Color) -> Line {
    let (x1, y1) = pipeline.to_pixel(from);
    let (x2, y2) = pipeline.to_pixel(to);
    Line { x1, y1, x2, y2, color }
}

/// UV sphere approximated by `subdivision x subdivision` lat/lon patches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub subdivision: u32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.01,
            subdivision: 12,
        }
    }
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            ..Self::default()
        }
    }

    fn surface_point(&self, lat: f32, lon: f32) -> Vec3 {
        let r = self.radius;
        self.center + Vec3::new(r * lat.cos() * lon.cos(), r * lat.sin(), r * lat.cos() * lon.sin())
    }

    /// Two edges per patch (`a→b` along latitude, `a→c` along longitude).
    pub fn edges(&self, pipeline: &Pipeline, color: Color) -> Vec<Line> {
        let n = self.subdivision;
        let lat_every = PI / n as f32;
        let lon_every = 2.0 * PI / n as f32;

        let mut lines = Vec::with_capacity(2 * (n * n) as usize);
        for lat_index in 0..n {
            let lat = -PI / 2.0 + lat_every * lat_index as f32;
            for lon_index in 0..n {
                let lon = lon_index as f32 * lon_every;

                let a = self.surface_point(lat, lon);
                let b = self.surface_point(lat + lat_every, lon);
                let c = self.surface_point(lat, lon + lon_every);

                lines.push(screen_line(pipeline, a, b, color));
                lines.push(screen_line(pipeline, a, c, color));
            }
        }
        lines
    }

    pub fn draw(&self, pipeline: &Pipeline, color: Color, backend: &mut impl RenderBackend) {
        for line in self.edges(pipeline, color) {
            backend.draw_line(line.x1, line.y1, line.x2, line.y2, line.color);
        }
    }
}

/// Square grid on the `y = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub half_width: f32,
    pub subdivision: u32,
    pub color: Color,
    pub axis_color: Color,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            half_width: 2.0,
            subdivision: 10,
            color: Color::GRID,
            axis_color: Color::BLACK,
        }
    }
}

impl Grid {
    /// `subdivision + 1` lines along Z followed by as many along X.
    pub fn edges(&self, pipeline: &Pipeline) -> Vec<Line> {
        let hw = self.half_width;
        let every = 2.0 * hw / self.subdivision as f32;
        let center = self.subdivision / 2;

        let mut lines = Vec::with_capacity(2 * (self.subdivision as usize + 1));
        for index in 0..=self.subdivision {
            let x = -hw + every * index as f32;
            let color = if index == center { self.axis_color } else { self.color };
            lines.push(screen_line(pipeline, Vec3::new(x, 0.0, -hw), Vec3::new(x, 0.0, hw), color));
        }
        for index in 0..=self.subdivision {
            let z = -hw + every * index as f32;
            let color = if index == center { self.axis_color } else { self.color };
            lines.push(screen_line(pipeline, Vec3::new(-hw, 0.0, z), Vec3::new(hw, 0.0, z), color));
        }
        lines
    }

    pub fn draw(&self, pipeline: &Pipeline, backend: &mut impl RenderBackend) {
        for line in self.edges(pipeline) {
            backend.draw_line(line.x1, line.y1, line.x2, line.y2, line.color);
        }
    }
}
