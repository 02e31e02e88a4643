//! Renders a Cornell box with reflections & edge detection and saves one PNG
//! per debug mode.
//!
//! Usage: `cargo run --example cornell [output-dir]`

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};
use std::path::PathBuf;

use glam::{uvec2, vec3, vec4, Quat, UVec2, Vec3, Vec4};
use ssgi::gpu::{DebugMode, Ray};
use ssgi::{Camera, CameraViewport, Frame, Ssgi, SsgiConfig};

const SIZE: UVec2 = uvec2(640, 480);
const LIGHT: Vec3 = vec3(0.0, 4.75, 0.0);

fn main() -> Result<(), ssgi::Error> {
    let _ = env_logger::try_init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let camera = Camera::looking_at(
        vec3(0.0, 2.5, -8.75),
        vec3(0.0, 2.5, 0.0),
        Vec3::Y,
        FRAC_PI_4,
        CameraViewport::full(SIZE),
    );

    let frame = Scene::cornell_box().render(&camera);
    let mut ssgi = Ssgi::new(SsgiConfig::default());

    for mode in DebugMode::ALL {
        ssgi.config_mut().reflection.debug_mode = mode;

        let path = output_dir.join(format!("cornell-{}.png", mode.name()));

        ssgi.render(&camera, &frame)?.save(&path)?;

        log::info!("Saved {}", path.display());
    }

    ssgi.config_mut().reflection.debug_mode = DebugMode::Final;
    ssgi.config_mut().edge_detection.debug = true;

    let path = output_dir.join("cornell-edges.png");

    ssgi.render(&camera, &frame)?.save(&path)?;

    log::info!("Saved {}", path.display());

    Ok(())
}

struct Scene {
    objects: Vec<Object>,
}

impl Scene {
    fn cornell_box() -> Self {
        let white = vec4(0.9, 0.9, 0.9, 1.0);
        let red = vec4(0.9, 0.1, 0.1, 1.0);
        let green = vec4(0.1, 0.9, 0.1, 1.0);
        let box_size = 1.25;
        let half_box_size = box_size / 2.0;

        Self {
            objects: vec![
                // Floor
                Object::quad(Vec3::ZERO, Vec3::Y, Vec3::X, white),
                // Ceiling
                Object::quad(vec3(0.0, 5.0, 0.0), -Vec3::Y, Vec3::X, white),
                // Back wall
                Object::quad(vec3(0.0, 2.5, 2.5), -Vec3::Z, Vec3::X, white),
                // Left wall (as seen from the camera)
                Object::quad(vec3(2.5, 2.5, 0.0), -Vec3::X, Vec3::Z, red),
                // Right wall (as seen from the camera)
                Object::quad(vec3(-2.5, 2.5, 0.0), Vec3::X, Vec3::Z, green),
                // Tall box
                Object::cuboid(
                    vec3(half_box_size, half_box_size * 2.0, half_box_size),
                    vec3(half_box_size, box_size, half_box_size),
                    Quat::from_rotation_y(FRAC_PI_6),
                    white,
                ),
                // Short box
                Object::cuboid(
                    vec3(-half_box_size, half_box_size, -half_box_size),
                    Vec3::splat(half_box_size),
                    Quat::from_rotation_y(-FRAC_PI_6),
                    white,
                ),
            ],
        }
    }

    /// Fills the color & prepass buffers by casting one ray per pixel.
    fn render(&self, camera: &Camera) -> Frame {
        let camera = camera.serialize();
        let mut frame = Frame::new(SIZE);

        for y in 0..SIZE.y {
            for x in 0..SIZE.x {
                let pixel = uvec2(x, y);
                let ray = camera.ray(pixel.as_vec2() + 0.5);

                let Some(hit) = self.trace(ray) else {
                    continue;
                };

                let point = ray.at(hit.distance);
                let clip = camera.world_to_clip(point);
                let to_light = (LIGHT - point).normalize();
                let diffuse = hit.normal.dot(to_light).max(0.0);

                frame.set_depth(pixel, clip.z / clip.w);
                frame.set_normal(pixel, hit.normal);

                frame.set_color(
                    pixel,
                    (hit.color.truncate() * (0.15 + 0.85 * diffuse)).extend(1.0),
                );
            }
        }

        frame
    }

    fn trace(&self, ray: Ray) -> Option<Hit> {
        self.objects
            .iter()
            .filter_map(|object| object.hit(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

enum Object {
    Quad {
        center: Vec3,
        normal: Vec3,
        tangent: Vec3,
        color: Vec4,
    },

    Cuboid {
        center: Vec3,
        half_size: Vec3,
        rotation: Quat,
        color: Vec4,
    },
}

impl Object {
    const QUAD_HALF_SIZE: f32 = 2.5;

    fn quad(center: Vec3, normal: Vec3, tangent: Vec3, color: Vec4) -> Self {
        Self::Quad {
            center,
            normal,
            tangent,
            color,
        }
    }

    fn cuboid(
        center: Vec3,
        half_size: Vec3,
        rotation: Quat,
        color: Vec4,
    ) -> Self {
        Self::Cuboid {
            center,
            half_size,
            rotation,
            color,
        }
    }

    fn hit(&self, ray: Ray) -> Option<Hit> {
        match *self {
            Object::Quad {
                center,
                normal,
                tangent,
                color,
            } => {
                let denom = ray.direction().dot(normal);

                if denom >= 0.0 {
                    return None;
                }

                let distance = (center - ray.origin()).dot(normal) / denom;

                if distance <= 0.0 {
                    return None;
                }

                let offset = ray.at(distance) - center;
                let bitangent = normal.cross(tangent);

                if offset.dot(tangent).abs() > Self::QUAD_HALF_SIZE
                    || offset.dot(bitangent).abs() > Self::QUAD_HALF_SIZE
                {
                    return None;
                }

                Some(Hit {
                    distance,
                    normal,
                    color,
                })
            }

            Object::Cuboid {
                center,
                half_size,
                rotation,
                color,
            } => {
                let inv_rotation = rotation.inverse();
                let origin = inv_rotation * (ray.origin() - center);
                let direction = inv_rotation * ray.direction();

                let t0 = (-half_size - origin) / direction;
                let t1 = (half_size - origin) / direction;
                let t_near = t0.min(t1).max_element();
                let t_far = t0.max(t1).min_element();

                if t_near > t_far || t_near <= 0.0 {
                    return None;
                }

                let local = (origin + direction * t_near) / half_size;
                let axis = local.abs();

                let local_normal = if axis.x >= axis.y && axis.x >= axis.z {
                    vec3(local.x.signum(), 0.0, 0.0)
                } else if axis.y >= axis.z {
                    vec3(0.0, local.y.signum(), 0.0)
                } else {
                    vec3(0.0, 0.0, local.z.signum())
                };

                Some(Hit {
                    distance: t_near,
                    normal: rotation * local_normal,
                    color,
                })
            }
        }
    }
}

struct Hit {
    distance: f32,
    normal: Vec3,
    color: Vec4,
}
