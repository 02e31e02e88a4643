use glam::{ivec2, IVec2, Vec4};

use crate::{lerp, PrepassMap};

/// Darkens pixels that lie behind their neighbours, outlining silhouettes.
///
/// The detector is one-sided: only the pixel on the far side of a depth
/// discontinuity gets darkened, so outlines are one pixel wide instead of
/// two.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDetector<'a> {
    prepass: PrepassMap<'a>,
    sharpness: f32,
}

impl<'a> EdgeDetector<'a> {
    pub const DEFAULT_SHARPNESS: f32 = 3000.0;

    pub fn new(prepass: PrepassMap<'a>, sharpness: f32) -> Self {
        Self { prepass, sharpness }
    }

    /// Returns the average amount by which this texel lies behind its four
    /// direct neighbours.
    ///
    /// Neighbours outside of the buffer are clamped to its edges, so the
    /// border doesn't produce a frame of fake edges.
    pub fn response(&self, pos: IVec2) -> f32 {
        let center = self.prepass.sample_depth_clamped(pos);

        let response: f32 = [ivec2(-1, 0), ivec2(1, 0), ivec2(0, -1), ivec2(0, 1)]
            .into_iter()
            .map(|offset| {
                let neighbour = self.prepass.sample_depth_clamped(pos + offset);

                (center - neighbour).max(0.0)
            })
            .sum();

        response / 4.0
    }

    /// Returns `1.0` for texels with no edge, going down towards `0.0` the
    /// stronger the edge is.
    pub fn multiplier(&self, pos: IVec2) -> f32 {
        (-self.response(pos) * self.sharpness).exp()
    }

    /// Applies the edge to given color; alpha is kept as-is.
    pub fn shade(&self, pos: IVec2, color: Vec4) -> Vec4 {
        (color.truncate() * self.multiplier(pos)).extend(color.w)
    }

    /// Returns the edge alone, painted with `edge_color` over white.
    pub fn visualize(&self, pos: IVec2, edge_color: Vec4) -> Vec4 {
        lerp(edge_color, Vec4::ONE, self.multiplier(pos))
            .truncate()
            .extend(1.0)
    }
}
