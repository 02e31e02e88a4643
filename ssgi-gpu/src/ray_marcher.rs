use glam::{Vec2, Vec3, Vec4};

use crate::{lerp, Camera, Noise, PrepassMap, Ray, TexRgba32, Vec3Ext};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayMarchSettings {
    /// Length of the first step, in world units
    pub initial_step: f32,

    /// How much each next step is longer than the previous one
    pub step_increment: f32,

    /// Maximum number of steps before we give up and fall back to the sky
    pub max_steps: u32,
}

impl RayMarchSettings {
    pub const DEFAULT_INITIAL_STEP: f32 = 0.05;
    pub const DEFAULT_STEP_INCREMENT: f32 = 0.05;
    pub const DEFAULT_MAX_STEPS: u32 = 20;
}

impl Default for RayMarchSettings {
    fn default() -> Self {
        Self {
            initial_step: Self::DEFAULT_INITIAL_STEP,
            step_increment: Self::DEFAULT_STEP_INCREMENT,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// What the ray-marcher sees at a single point along the ray.
#[derive(Clone, Copy, Debug)]
pub struct ReflectionSample {
    /// Distance between the camera and the scene's surface visible at `uv`;
    /// infinity if there's no surface there (sky, off-screen, behind the
    /// camera).
    pub depth: f32,

    /// Scene's color at `uv`.
    pub color: Vec4,

    /// Distance between the camera and the marched point.
    pub distance: f32,

    /// Screen-space position of the marched point.
    pub uv: Vec2,
}

impl ReflectionSample {
    fn miss(distance: f32, uv: Vec2) -> Self {
        Self {
            depth: f32::INFINITY,
            color: Vec4::ZERO,
            distance,
            uv,
        }
    }

    /// Returns whether the ray has just crossed the scene's surface.
    ///
    /// For this to happen the marched point has to be behind the surface, but
    /// not by much - the previous point (or, to be exact, the previous point
    /// pushed back by the current step) must've been in front of it.
    /// Otherwise the ray went behind this surface a long time ago and we're
    /// just looking at some unrelated object that covers it.
    pub fn is_hit(&self, prev_distance: f32, step: f32) -> bool {
        self.depth <= self.distance && self.depth > prev_distance - step
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RayMarchState {
    pub iteration: u32,
    pub traveled: f32,
    pub prev_traveled: f32,
    pub step: f32,
}

impl RayMarchState {
    pub fn new(settings: RayMarchSettings) -> Self {
        Self {
            step: settings.initial_step,
            ..Default::default()
        }
    }

    /// Moves the state to the next point along the ray.
    pub fn advance(&mut self) {
        self.iteration += 1;
        self.prev_traveled = self.traveled;
        self.traveled += self.step;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RayMarchOutcome {
    Hit {
        color: Vec4,
        uv: Vec2,
        traveled: f32,
        step: f32,
        iterations: u32,
    },

    Exhausted {
        iterations: u32,
    },
}

impl RayMarchOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn iterations(&self) -> u32 {
        match *self {
            Self::Hit { iterations, .. } => iterations,
            Self::Exhausted { iterations } => iterations,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Reflection {
    pub direction: Vec3,
    pub outcome: RayMarchOutcome,
    pub color: Vec4,
}

/// Screen-space reflections, done by walking along the reflected ray in
/// world-space and checking whether the depth buffer "caught up" with it.
#[derive(Clone, Copy, Debug)]
pub struct RayMarcher<'a> {
    pub camera: &'a Camera,
    pub prepass: PrepassMap<'a>,
    pub colors: TexRgba32<'a>,
    pub settings: RayMarchSettings,
}

impl<'a> RayMarcher<'a> {
    pub fn new(
        camera: &'a Camera,
        prepass: PrepassMap<'a>,
        colors: TexRgba32<'a>,
        settings: RayMarchSettings,
    ) -> Self {
        Self {
            camera,
            prepass,
            colors,
            settings,
        }
    }

    /// Returns color of the surface at `point` with its reflection blended
    /// in.
    ///
    /// `strength` controls the blend, `roughness` controls how much the
    /// reflected direction gets jittered.
    pub fn reflect(
        &self,
        point: Vec3,
        normal: Vec3,
        base_color: Vec4,
        strength: f32,
        roughness: f32,
        sky_color: Vec4,
    ) -> Reflection {
        let direction = self.reflection_direction(point, normal, roughness);
        let outcome = self.march(Ray::new(point, direction));

        let reflected_color = match outcome {
            RayMarchOutcome::Hit { color, .. } => color,
            RayMarchOutcome::Exhausted { .. } => sky_color,
        };

        Reflection {
            direction,
            outcome,
            color: lerp(base_color, reflected_color, strength),
        }
    }

    /// Returns direction of the camera ray reflected off the surface at
    /// `point`, perturbed according to `roughness`.
    ///
    /// This is a single-sample approximation of a glossy lobe: the
    /// perturbation is seeded from the position, so a given point always
    /// reflects into the same direction.
    pub fn reflection_direction(
        &self,
        point: Vec3,
        normal: Vec3,
        roughness: f32,
    ) -> Vec3 {
        let normal = normal.normalize_or_zero();
        let view_dir = (point - self.camera.origin.truncate()).normalize_or_zero();
        let dir = view_dir.reflect(normal);

        if roughness <= 0.0 {
            return dir;
        }

        let mut jitter = Noise::from_position(point).sample_sphere() * roughness;

        // Keep the jittered ray above the surface, otherwise it'd immediately
        // hit the surface it starts at
        if (dir + jitter).dot(normal) < 0.0 {
            jitter = -jitter;
        }

        let jittered_dir = (dir + jitter).normalize_or_zero();

        if jittered_dir == Vec3::ZERO {
            dir
        } else {
            jittered_dir
        }
    }

    /// Walks along given ray with ever-increasing steps until either the
    /// depth buffer reports a crossing or we run out of iterations.
    ///
    /// Steps get longer the farther we go: most of the visible reflections
    /// are contact ones, right next to the ray's origin, while the distant
    /// ones are dim anyway and can make do with coarse sampling.
    pub fn march(&self, ray: Ray) -> RayMarchOutcome {
        let mut state = RayMarchState::new(self.settings);

        while state.iteration < self.settings.max_steps {
            let prev_distance = self.camera.distance_to(ray.at(state.traveled));

            state.advance();

            let sample = self.sample(ray.at(state.traveled));

            if sample.is_hit(prev_distance, state.step) {
                return RayMarchOutcome::Hit {
                    color: sample.color,
                    uv: sample.uv,
                    traveled: state.traveled,
                    step: state.step,
                    iterations: state.iteration,
                };
            }

            state.step += self.settings.step_increment;
        }

        RayMarchOutcome::Exhausted {
            iterations: state.iteration,
        }
    }

    /// Projects given world-space point onto the screen and looks up what the
    /// prepass has there.
    pub fn sample(&self, point: Vec3) -> ReflectionSample {
        let distance = self.camera.distance_to(point);

        let Some(uv) = self.camera.world_to_uv(point) else {
            return ReflectionSample::miss(distance, Vec2::ZERO);
        };

        if !self.camera.contains_uv(uv) {
            return ReflectionSample::miss(distance, uv);
        }

        let pixel = self.camera.uv_to_pixel(uv);
        let depth = self.prepass.sample_depth(pixel);

        if PrepassMap::is_background(depth) {
            return ReflectionSample::miss(distance, uv);
        }

        let surface = self.camera.reconstruct_world_position(depth, uv);

        let color = self
            .colors
            .get(pixel.floor().as_ivec2())
            .unwrap_or_default();

        ReflectionSample {
            depth: self.camera.distance_to(surface),
            color,
            distance,
            uv,
        }
    }
}
