use glam::{uvec2, vec4, Mat4, UVec2, Vec3, Vec4Swizzles};

use crate::{gpu, Error};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-from-view transformation (i.e. camera's placement in the world)
    pub transform: Mat4,

    /// View-to-clip transformation; must produce depth in `<0.0, 1.0>`
    pub projection: Mat4,

    pub viewport: CameraViewport,
}

impl Camera {
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 100.0;

    /// Creates a right-handed perspective camera placed at `eye` and looking
    /// at `target`.
    pub fn looking_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        viewport: CameraViewport,
    ) -> Self {
        let aspect_ratio = viewport.size.x as f32 / viewport.size.y.max(1) as f32;

        Self {
            transform: Mat4::look_at_rh(eye, target, up).inverse(),
            projection: Mat4::perspective_rh(
                fov_y,
                aspect_ratio,
                Self::DEFAULT_NEAR,
                Self::DEFAULT_FAR,
            ),
            viewport,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.transform.w_axis.xyz()
    }

    pub fn serialize(&self) -> gpu::Camera {
        gpu::Camera::new(
            self.transform.inverse(),
            self.projection,
            vec4(
                self.viewport.position.x as f32,
                self.viewport.position.y as f32,
                self.viewport.size.x as f32,
                self.viewport.size.y as f32,
            ),
        )
    }

    pub(crate) fn validate(&self, frame_size: UVec2) -> Result<(), Error> {
        let CameraViewport { position, size } = self.viewport;

        if size.x == 0 || size.y == 0 {
            return Err(Error::EmptyViewport(size));
        }

        let fits = |pos: u32, size: u32, frame_size: u32| {
            pos.checked_add(size)
                .is_some_and(|end| end <= frame_size)
        };

        if !fits(position.x, size.x, frame_size.x)
            || !fits(position.y, size.y, frame_size.y)
        {
            return Err(Error::ViewportOutOfBounds {
                position,
                size,
                frame_size,
            });
        }

        Ok(())
    }

    pub(crate) fn describe(&self) -> String {
        let origin = self.origin();

        format!(
            "origin={:.2},{:.2},{:.2}; viewport-pos={}x{}; viewport-size={}x{}",
            origin.x,
            origin.y,
            origin.z,
            self.viewport.position.x,
            self.viewport.position.y,
            self.viewport.size.x,
            self.viewport.size.y,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraViewport {
    pub position: UVec2,
    pub size: UVec2,
}

impl CameraViewport {
    /// Creates a viewport covering the entire frame of given size.
    pub fn full(size: UVec2) -> Self {
        Self {
            position: uvec2(0, 0),
            size,
        }
    }

    pub fn contains(&self, pixel: UVec2) -> bool {
        pixel.cmpge(self.position).all()
            && pixel.cmplt(self.position + self.size).all()
    }
}
