mod edge_detection;
mod reflection;

use glam::{uvec2, UVec2, Vec4};
use rayon::prelude::*;

pub use self::edge_detection::*;
pub use self::reflection::*;

/// Evaluates given fragment shader over every pixel of a frame of given size,
/// in parallel over rows.
///
/// Pixels outside `viewport` are copied from `fallback` instead.
pub(crate) fn dispatch(
    size: UVec2,
    viewport: &crate::CameraViewport,
    fallback: &[Vec4],
    fs: impl Fn(Vec4, &mut Vec4) + Sync,
) -> Vec<Vec4> {
    let mut colors = vec![Vec4::ZERO; (size.x * size.y) as usize];

    colors
        .par_chunks_mut(size.x as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, color) in row.iter_mut().enumerate() {
                let pixel = uvec2(x as u32, y as u32);

                if viewport.contains(pixel) {
                    let pos = (pixel.as_vec2() + 0.5).extend(0.0).extend(1.0);

                    fs(pos, color);
                } else {
                    *color = fallback[(pixel.y * size.x + pixel.x) as usize];
                }
            }
        });

    colors
}
