//! `geom_shared`
//!
//! Shared libraries for the closest-point viewer.
//!
//! Design goals:
//! - Pure value types; everything is recomputed from inputs each frame.
//! - Degenerate numeric input is reported through [`GeomError`] or a
//!   documented sentinel, never through NaN/inf.
//! - Drawing goes through the [`render::RenderBackend`] trait only.
//! - No `unsafe`.

pub mod camera;
pub mod config;
pub mod console;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod shapes;

pub use error::GeomError;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::math::*;
    pub use crate::render::*;
    pub use crate::shapes::*;
}
