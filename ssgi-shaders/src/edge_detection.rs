use ssgi_gpu::prelude::*;

pub fn fs(
    pos: Vec4,
    params: &EdgeDetectionPassParams,
    prepass_depth: TexR32,
    prepass_normals: TexRgba32,
    colors: TexRgba32,
    frag_color: &mut Vec4,
) {
    let screen_pos = pos.xy().as_uvec2();
    let color = colors.read(screen_pos);

    if !params.is_enabled() {
        *frag_color = color;
        return;
    }

    let detector = EdgeDetector::new(
        PrepassMap::new(prepass_depth, prepass_normals),
        params.sharpness(),
    );

    *frag_color = if params.is_debug() {
        detector.visualize(screen_pos.as_ivec2(), params.edge_color)
    } else {
        detector.shade(screen_pos.as_ivec2(), color)
    };
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const SIZE: UVec2 = uvec2(8, 6);

    fn params(enabled: bool, debug: bool) -> EdgeDetectionPassParams {
        EdgeDetectionPassParams {
            thresholds: vec4(0.1, 0.1, 0.1, EdgeDetector::DEFAULT_SHARPNESS),
            edge_color: vec4(0.0, 0.0, 0.0, 1.0),
            flags: vec4(enabled as u32 as f32, debug as u32 as f32, 0.0, 0.0),
        }
    }

    fn run(
        params: &EdgeDetectionPassParams,
        depth: &[f32],
        normals: &[Vec4],
        colors: &[Vec4],
        pixel: UVec2,
    ) -> Vec4 {
        let mut frag_color = Vec4::ZERO;

        fs(
            (pixel.as_vec2() + 0.5).extend(0.0).extend(1.0),
            params,
            TexR32::new(depth, SIZE),
            TexRgba32::new(normals, SIZE),
            TexRgba32::new(colors, SIZE),
            &mut frag_color,
        );

        frag_color
    }

    fn pixels() -> impl Iterator<Item = UVec2> {
        (0..SIZE.y).flat_map(|y| (0..SIZE.x).map(move |x| uvec2(x, y)))
    }

    #[test]
    fn disabled_is_identity() {
        let mut rng = StdRng::seed_from_u64(1234);
        let len = (SIZE.x * SIZE.y) as usize;
        let depth: Vec<f32> = (0..len).map(|_| rng.gen()).collect();

        let normals: Vec<Vec4> = (0..len)
            .map(|_| vec4(rng.gen(), rng.gen(), rng.gen(), 1.0))
            .collect();

        let colors: Vec<Vec4> = (0..len)
            .map(|_| vec4(rng.gen(), rng.gen(), rng.gen(), rng.gen()))
            .collect();

        for debug in [false, true] {
            let params = params(false, debug);

            for pixel in pixels() {
                assert_eq!(
                    colors[(pixel.y * SIZE.x + pixel.x) as usize],
                    run(&params, &depth, &normals, &colors, pixel)
                );
            }
        }
    }

    #[test]
    fn flat_depth_is_identity() {
        let len = (SIZE.x * SIZE.y) as usize;
        let depth = vec![5.0; len];
        let normals = vec![vec4(0.5, 0.5, 1.0, 1.0); len];
        let colors = vec![vec4(0.2, 0.4, 0.6, 0.8); len];
        let params = params(true, false);

        for pixel in pixels() {
            assert_eq!(
                vec4(0.2, 0.4, 0.6, 0.8),
                run(&params, &depth, &normals, &colors, pixel)
            );
        }
    }

    #[test]
    fn step_darkens_the_far_side() {
        let len = (SIZE.x * SIZE.y) as usize;
        let normals = vec![vec4(0.5, 0.5, 1.0, 1.0); len];
        let colors = vec![vec4(1.0, 1.0, 1.0, 0.5); len];
        let params = params(true, false);

        // Left half is closer to the camera than the right half
        let depth: Vec<f32> = pixels()
            .map(|pixel| if pixel.x < 4 { 0.5 } else { 0.52 })
            .collect();

        let near = run(&params, &depth, &normals, &colors, uvec2(3, 2));
        let far = run(&params, &depth, &normals, &colors, uvec2(4, 2));
        let inner = run(&params, &depth, &normals, &colors, uvec2(6, 2));

        assert_eq!(vec4(1.0, 1.0, 1.0, 0.5), near);
        assert_eq!(vec4(1.0, 1.0, 1.0, 0.5), inner);
        assert!(far.x < 1.0);
        assert_eq!(0.5, far.w);
    }

    #[test]
    fn debug_paints_edges_over_white() {
        let len = (SIZE.x * SIZE.y) as usize;
        let normals = vec![vec4(0.5, 0.5, 1.0, 1.0); len];
        let colors = vec![vec4(0.3, 0.3, 0.3, 0.3); len];
        let params = params(true, true);

        let depth: Vec<f32> = pixels()
            .map(|pixel| if pixel.x < 4 { 0.5 } else { 0.52 })
            .collect();

        assert_eq!(
            Vec4::ONE,
            run(&params, &depth, &normals, &colors, uvec2(0, 0))
        );

        let edge = run(&params, &depth, &normals, &colors, uvec2(4, 0));

        assert!(edge.x < 0.5);
        assert_eq!(1.0, edge.w);
    }
}
