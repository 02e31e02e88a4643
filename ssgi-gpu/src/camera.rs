use bytemuck::{Pod, Zeroable};
use glam::{vec2, vec4, Mat4, Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

use crate::{Ray, MIN_PERSPECTIVE_W};

/// Per-frame camera state, as seen by the shaders.
///
/// All inverses are computed once, on the host, by [`Camera::new()`] - shaders
/// never invert matrices themselves, so that a matrix and its inverse can't
/// drift apart.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Camera {
    /// World-space to view-space transformation.
    pub view: Mat4,

    /// View-space to world-space transformation.
    pub inv_view: Mat4,

    /// View-space to clip-space transformation.
    pub projection: Mat4,

    /// Clip-space to view-space transformation.
    pub inv_projection: Mat4,

    /// World-space to clip-space transformation.
    pub view_projection: Mat4,

    /// Clip-space to world-space transformation.
    pub inv_view_projection: Mat4,

    /// Camera's position in world-space (`w` is always `1.0`).
    pub origin: Vec4,

    /// Viewport's origin (`xy`) and size (`zw`), in pixels.
    pub viewport: Vec4,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec4) -> Self {
        let inv_view = view.inverse();
        let view_projection = projection * view;

        Self {
            view,
            inv_view,
            projection,
            inv_projection: projection.inverse(),
            view_projection,
            inv_view_projection: view_projection.inverse(),
            origin: inv_view.w_axis.xyz().extend(1.0),
            viewport,
        }
    }

    pub fn viewport_origin(&self) -> Vec2 {
        self.viewport.xy()
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport.zw()
    }

    /// Given a fragment coordinate (i.e. pixel position with texel centers at
    /// `+0.5`), returns its viewport-relative UV.
    pub fn viewport_uv(&self, pixel: Vec2) -> Vec2 {
        (pixel - self.viewport_origin()) / self.viewport_size()
    }

    /// See: [`Self::viewport_uv()`].
    pub fn uv_to_pixel(&self, uv: Vec2) -> Vec2 {
        self.viewport_origin() + uv * self.viewport_size()
    }

    /// Returns whether given UV maps onto a texel inside the viewport.
    ///
    /// The range is half-open: `1.0` would land right past the viewport's
    /// last texel.
    pub fn contains_uv(&self, uv: Vec2) -> bool {
        uv.x >= 0.0 && uv.y >= 0.0 && uv.x < 1.0 && uv.y < 1.0
    }

    /// Given depth-buffer value and UV, returns position in view-space.
    pub fn reconstruct_view_position(&self, depth: f32, uv: Vec2) -> Vec3 {
        let ndc = uv_to_ndc(uv);
        let pos = self.inv_projection * vec4(ndc.x, ndc.y, depth, 1.0);

        perspective_divide(pos)
    }

    /// Given depth-buffer value and UV, returns position in world-space.
    pub fn reconstruct_world_position(&self, depth: f32, uv: Vec2) -> Vec3 {
        self.inv_view
            .transform_point3(self.reconstruct_view_position(depth, uv))
    }

    /// Closed-form alternative to [`Self::reconstruct_view_position()`].
    ///
    /// Assumes a plain pinhole perspective projection (no skew, no lens shift)
    /// and `depth` being the camera-space Z of the point (negative in front
    /// of the camera); `fov_scale` comes from [`Self::pinhole_fov_scale()`].
    pub fn calculate_view_position(uv: Vec2, depth: f32, fov_scale: Vec2) -> Vec3 {
        ((vec2(0.5, 0.5) - uv) * fov_scale * depth).extend(depth)
    }

    /// Returns the `fov_scale` for [`Self::calculate_view_position()`], given
    /// vertical field of view (in radians) and aspect ratio.
    pub fn pinhole_fov_scale(fov_y: f32, aspect_ratio: f32) -> Vec2 {
        let tan = (0.5 * fov_y).tan();

        vec2(2.0 * aspect_ratio * tan, -2.0 * tan)
    }

    /// Returns distances to the near and far planes, extracted from the
    /// projection matrix.
    ///
    /// Assumes a right-handed perspective projection with depth range
    /// `<0.0, 1.0>`.
    pub fn clip_planes(&self) -> Vec2 {
        let a = self.projection.z_axis.z;
        let b = self.projection.w_axis.z;

        vec2(b / a, b / (a + 1.0))
    }

    /// Given a point in world-coordinates, returns it in clip-coordinates.
    pub fn world_to_clip(&self, pos: Vec3) -> Vec4 {
        self.view_projection * pos.extend(1.0)
    }

    /// Given a point in world-coordinates, returns its viewport UV; returns
    /// `None` for points behind the camera.
    pub fn world_to_uv(&self, pos: Vec3) -> Option<Vec2> {
        let clip = self.world_to_clip(pos);

        if clip.w <= 0.0 {
            return None;
        }

        Some(ndc_to_uv(perspective_divide(clip).xy()))
    }

    /// Returns Euclidean distance between the camera and given world-space
    /// point.
    pub fn distance_to(&self, pos: Vec3) -> f32 {
        self.origin.xyz().distance(pos)
    }

    /// Casts a ray from camera's near plane through given fragment coordinate.
    pub fn ray(&self, pixel: Vec2) -> Ray {
        let uv = self.viewport_uv(pixel);
        let near_plane = self.reconstruct_world_position(0.0, uv);
        let far_plane = self.reconstruct_world_position(1.0, uv);

        Ray::new(near_plane, (far_plane - near_plane).normalize())
    }
}

/// Converts projected depth (`<0.0, 1.0>`, `0.0` at the near plane) into
/// linear eye-space distance.
pub fn linearize_depth(depth: f32, near: f32, far: f32) -> f32 {
    near * far / (far + depth * (near - far))
}

/// Divides `xyz` by `w`, keeping `w` away from zero.
///
/// See: [`MIN_PERSPECTIVE_W`].
pub fn perspective_divide(pos: Vec4) -> Vec3 {
    let w = if pos.w.abs() < MIN_PERSPECTIVE_W {
        MIN_PERSPECTIVE_W.copysign(pos.w)
    } else {
        pos.w
    };

    pos.xyz() / w
}

fn uv_to_ndc(uv: Vec2) -> Vec2 {
    vec2(2.0 * uv.x - 1.0, 1.0 - 2.0 * uv.y)
}

fn ndc_to_uv(ndc: Vec2) -> Vec2 {
    vec2(0.5 * ndc.x + 0.5, 0.5 - 0.5 * ndc.y)
}
