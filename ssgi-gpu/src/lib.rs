//! Common structs, algorithms etc. used by SSGI's shaders and frame driver.

#![allow(clippy::manual_range_contains)]

mod camera;
mod debug_mode;
mod edge_detector;
mod noise;
mod normal;
mod passes;
mod prepass;
mod ray;
mod ray_marcher;
mod utils;

pub use self::camera::*;
pub use self::debug_mode::*;
pub use self::edge_detector::*;
pub use self::noise::*;
pub use self::normal::*;
pub use self::passes::*;
pub use self::prepass::*;
pub use self::ray::*;
pub use self::ray_marcher::*;
pub use self::utils::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use glam::*;

    pub use crate::*;
}

/// Smallest magnitude of clip-space `w` we are willing to divide by.
///
/// Positions whose `w` falls below this get pushed very far away from the
/// camera instead of producing infinities; reflections marching through such
/// positions simply find nothing and fall back to the sky color.
pub const MIN_PERSPECTIVE_W: f32 = 1e-6;
