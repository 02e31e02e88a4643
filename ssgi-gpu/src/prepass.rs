use glam::{IVec2, Vec2, Vec3, Vec4Swizzles};

use crate::{Normal, TexR32, TexRgba32};

/// Depth reported for texels that don't contain any geometry - the cleared
/// part of the depth buffer and everything outside of it.
///
/// This is the farthest value the depth buffer can hold (its far plane).
pub const NO_GEOMETRY_DEPTH: f32 = 1.0;

/// Nearest-neighbour access to the depth & normal prepass buffers.
#[derive(Clone, Copy, Debug)]
pub struct PrepassMap<'a> {
    depth: TexR32<'a>,
    normals: TexRgba32<'a>,
}

impl<'a> PrepassMap<'a> {
    pub fn new(depth: TexR32<'a>, normals: TexRgba32<'a>) -> Self {
        Self { depth, normals }
    }

    /// Returns depth at given pixel position, rounded down to the texel that
    /// contains it; returns [`NO_GEOMETRY_DEPTH`] for positions outside the
    /// buffer.
    pub fn sample_depth(&self, pixel: Vec2) -> f32 {
        Self::texel(pixel)
            .and_then(|pos| self.depth.get(pos))
            .unwrap_or(NO_GEOMETRY_DEPTH)
    }

    /// Returns depth at given texel, clamping the coordinates to the buffer's
    /// edges.
    pub fn sample_depth_clamped(&self, pos: IVec2) -> f32 {
        self.depth.read_clamped(pos)
    }

    /// Returns decoded (but not renormalized) normal at given pixel position;
    /// returns zero for positions outside the buffer.
    pub fn sample_normal(&self, pixel: Vec2) -> Vec3 {
        Self::texel(pixel)
            .and_then(|pos| self.normals.get(pos))
            .map(|normal| Normal::decode(normal.xyz()))
            .unwrap_or_default()
    }

    pub fn is_background(depth: f32) -> bool {
        depth >= NO_GEOMETRY_DEPTH
    }

    fn texel(pixel: Vec2) -> Option<IVec2> {
        if pixel.is_finite() {
            Some(pixel.floor().as_ivec2())
        } else {
            None
        }
    }
}
