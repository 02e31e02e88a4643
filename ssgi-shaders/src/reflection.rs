use ssgi_gpu::prelude::*;

pub fn fs(
    pos: Vec4,
    params: &ReflectionPassParams,
    camera: &Camera,
    prepass_depth: TexR32,
    prepass_normals: TexRgba32,
    colors: TexRgba32,
    frag_color: &mut Vec4,
) {
    let pixel = pos.xy();
    let prepass = PrepassMap::new(prepass_depth, prepass_normals);
    let depth = prepass.sample_depth(pixel);
    let debug_mode = params.debug_mode();

    if debug_mode == DebugMode::RawDepth {
        let clip_planes = camera.clip_planes();

        let depth =
            linearize_depth(depth, clip_planes.x, clip_planes.y) / clip_planes.y;

        *frag_color = Vec3::splat(depth.saturate()).extend(1.0);
        return;
    }

    let base_color = colors.get(pixel.floor().as_ivec2()).unwrap_or_default();

    if PrepassMap::is_background(depth) {
        *frag_color = match debug_mode {
            DebugMode::Final => base_color,
            _ => vec4(0.0, 0.0, 0.0, 1.0),
        };

        return;
    }

    let point = camera
        .reconstruct_world_position(depth, camera.viewport_uv(pixel));

    let normal = prepass.sample_normal(pixel);

    let reflection = RayMarcher::new(camera, prepass, colors, params.settings())
        .reflect(
            point,
            normal,
            base_color,
            params.strength(),
            params.roughness(),
            params.sky_color,
        );

    *frag_color = match debug_mode {
        DebugMode::RawDirection => {
            (reflection.direction * 0.5 + 0.5).extend(1.0)
        }

        DebugMode::HitMask => {
            if reflection.outcome.is_hit() {
                Vec4::ONE
            } else {
                vec4(0.0, 0.0, 0.0, 1.0)
            }
        }

        _ => reflection.color,
    };
}
