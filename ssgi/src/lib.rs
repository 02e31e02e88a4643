//! Screen-space reflections and depth-edge shading, evaluated on the CPU over
//! a frame's color and prepass (depth & normal) buffers.

mod camera;
mod config;
mod error;
mod frame;
mod passes;
mod utils;

use log::{debug, info};
pub use ssgi_gpu as gpu;

pub use self::camera::*;
pub use self::config::*;
pub use self::error::*;
pub use self::frame::*;
use self::passes::*;

#[derive(Debug, Default)]
pub struct Ssgi {
    config: SsgiConfig,
}

impl Ssgi {
    pub fn new(config: SsgiConfig) -> Self {
        info!("Initializing; {}", config.describe());

        Self { config }
    }

    pub fn config(&self) -> &SsgiConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SsgiConfig {
        &mut self.config
    }

    /// Renders given frame, as seen through given camera.
    ///
    /// Reflections are computed first and edge detection then runs over
    /// their output; pixels outside of the camera's viewport are copied from
    /// the frame as-is.
    pub fn render(&self, camera: &Camera, frame: &Frame) -> Result<Output, Error> {
        frame.validate()?;
        camera.validate(frame.size())?;

        debug!(
            "Rendering frame; size={}x{}, camera: {}",
            frame.size().x,
            frame.size().y,
            camera.describe()
        );

        let viewport = camera.viewport;

        let colors = if self.config.reflection.enabled {
            ReflectionPass::new(&self.config.reflection).run(
                &camera.serialize(),
                &viewport,
                frame,
            )
        } else {
            frame.colors().to_vec()
        };

        let colors = EdgeDetectionPass::new(&self.config.edge_detection)
            .run(&viewport, frame, &colors);

        Ok(Output::new(frame.size(), colors))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use glam::{uvec2, vec3, vec4, UVec2, Vec3, Vec4};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const SIZE: UVec2 = uvec2(48, 32);

    fn camera() -> Camera {
        Camera::looking_at(
            vec3(0.0, 1.0, 4.0),
            vec3(0.0, 0.0, 0.0),
            Vec3::Y,
            FRAC_PI_4,
            CameraViewport::full(SIZE),
        )
    }

    /// Frame showing a floor (`y = 0`) with a wall (`z = -2`) behind it,
    /// rendered by casting camera rays analytically.
    fn frame(camera: &Camera) -> Frame {
        let gpu_camera = camera.serialize();
        let mut frame = Frame::new(SIZE);
        let mut rng = StdRng::seed_from_u64(1234);

        for y in 0..SIZE.y {
            for x in 0..SIZE.x {
                let pixel = uvec2(x, y);
                let ray = gpu_camera.ray(pixel.as_vec2() + 0.5);

                let floor = -ray.origin().y / ray.direction().y;
                let wall = (-2.0 - ray.origin().z) / ray.direction().z;

                // Wall is only 1 unit tall, leaving some sky above it
                let wall = if ray.at(wall).y <= 1.0 {
                    wall
                } else {
                    f32::INFINITY
                };

                let hit = [(floor, Vec3::Y), (wall, Vec3::Z)]
                    .into_iter()
                    .filter(|(t, _)| t.is_finite() && *t > 0.0)
                    .min_by(|a, b| a.0.total_cmp(&b.0));

                let Some((t, normal)) = hit else {
                    continue;
                };

                let clip = gpu_camera.world_to_clip(ray.at(t));

                frame.set_depth(pixel, clip.z / clip.w);
                frame.set_normal(pixel, normal);

                frame.set_color(
                    pixel,
                    vec4(rng.gen(), rng.gen(), rng.gen(), 1.0),
                );
            }
        }

        frame
    }

    #[test]
    fn render_is_deterministic() {
        let camera = camera();
        let frame = frame(&camera);

        let target = Ssgi::new(SsgiConfig {
            reflection: ReflectionConfig {
                roughness: 0.3,
                ..Default::default()
            },
            ..Default::default()
        });

        let a = target.render(&camera, &frame).unwrap();
        let b = target.render(&camera, &frame).unwrap();

        assert_eq!(SIZE, a.size());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn disabled_passes_are_identity() {
        let camera = camera();
        let frame = frame(&camera);
        let mut target = Ssgi::default();

        target.config_mut().reflection.enabled = false;
        target.config_mut().edge_detection.enabled = false;

        let actual = target.render(&camera, &frame).unwrap();

        assert_eq!(frame.colors(), actual.colors());
    }

    #[test]
    fn zero_strength_keeps_colors() {
        let camera = camera();
        let frame = frame(&camera);
        let mut target = Ssgi::default();

        target.config_mut().reflection.strength = 0.0;
        target.config_mut().edge_detection.enabled = false;

        let actual = target.render(&camera, &frame).unwrap();

        assert_eq!(frame.colors(), actual.colors());
    }

    #[test]
    fn reflections_change_the_floor() {
        let camera = camera();
        let frame = frame(&camera);
        let mut target = Ssgi::default();

        target.config_mut().edge_detection.enabled = false;

        let actual = target.render(&camera, &frame).unwrap();

        assert_ne!(frame.colors(), actual.colors());

        // Sky stays untouched
        assert_eq!(frame.color(uvec2(0, 0)), actual.color(uvec2(0, 0)));
    }

    #[test]
    fn debug_modes_yield_distinct_outputs() {
        let camera = camera();
        let frame = frame(&camera);
        let mut target = Ssgi::default();

        target.config_mut().edge_detection.enabled = false;

        let outputs: Vec<_> = gpu::DebugMode::ALL
            .into_iter()
            .map(|mode| {
                target.config_mut().reflection.debug_mode = mode;
                target.render(&camera, &frame).unwrap()
            })
            .collect();

        for (i, a) in outputs.iter().enumerate() {
            for b in &outputs[(i + 1)..] {
                assert_ne!(a.colors(), b.colors());
            }
        }

        // Hit mask is strictly black & white
        let hit_mask = &outputs[3];

        assert!(hit_mask
            .colors()
            .iter()
            .all(|c| *c == Vec4::ONE || *c == vec4(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn pixels_outside_viewport_are_passed_through() {
        let camera = Camera {
            viewport: CameraViewport {
                position: uvec2(8, 8),
                size: uvec2(16, 16),
            },
            ..camera()
        };

        let frame = frame(&camera);
        let mut target = Ssgi::default();

        target.config_mut().reflection.debug_mode = gpu::DebugMode::HitMask;

        let actual = target.render(&camera, &frame).unwrap();

        assert_eq!(frame.color(uvec2(0, 0)), actual.color(uvec2(0, 0)));
        assert_eq!(frame.color(uvec2(30, 20)), actual.color(uvec2(30, 20)));
    }

    #[test]
    fn invalid_inputs() {
        let target = Ssgi::default();

        let camera = Camera {
            viewport: CameraViewport {
                position: uvec2(1, 0),
                size: SIZE,
            },
            ..camera()
        };

        assert!(matches!(
            target.render(&camera, &Frame::new(SIZE)),
            Err(Error::ViewportOutOfBounds { .. })
        ));

        let frame = Frame::from_buffers(
            SIZE,
            vec![Vec4::ZERO; 10],
            vec![0.0; 10],
            vec![Vec4::ZERO; 10],
        );

        assert!(matches!(frame, Err(Error::BufferSizeMismatch { .. })));
    }
}
