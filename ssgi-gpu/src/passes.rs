use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec4};

use crate::{DebugMode, RayMarchSettings};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct ReflectionPassParams {
    /// x - strength, y - roughness, z - debug mode (as bits)
    pub surface: Vec4,

    /// x - initial step, y - step increment, z - max steps (as bits)
    pub march: Vec4,

    pub sky_color: Vec4,
}

impl ReflectionPassParams {
    pub fn new(
        strength: f32,
        roughness: f32,
        debug_mode: DebugMode,
        settings: RayMarchSettings,
        sky_color: Vec4,
    ) -> Self {
        Self {
            surface: vec4(
                strength,
                roughness,
                f32::from_bits(debug_mode.serialize()),
                0.0,
            ),
            march: vec4(
                settings.initial_step,
                settings.step_increment,
                f32::from_bits(settings.max_steps),
                0.0,
            ),
            sky_color,
        }
    }

    pub fn strength(&self) -> f32 {
        self.surface.x
    }

    pub fn roughness(&self) -> f32 {
        self.surface.y
    }

    pub fn debug_mode(&self) -> DebugMode {
        DebugMode::deserialize(self.surface.z.to_bits())
    }

    pub fn settings(&self) -> RayMarchSettings {
        RayMarchSettings {
            initial_step: self.march.x,
            step_increment: self.march.y,
            max_steps: self.march.z.to_bits(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct EdgeDetectionPassParams {
    /// x - depth threshold, y - normal threshold, z - color threshold, w -
    /// sharpness
    pub thresholds: Vec4,

    pub edge_color: Vec4,

    /// x - enabled (`0.0` or `1.0`), y - debug (`0.0` or `1.0`)
    pub flags: Vec4,
}

impl EdgeDetectionPassParams {
    pub fn depth_threshold(&self) -> f32 {
        self.thresholds.x
    }

    pub fn normal_threshold(&self) -> f32 {
        self.thresholds.y
    }

    pub fn color_threshold(&self) -> f32 {
        self.thresholds.z
    }

    pub fn sharpness(&self) -> f32 {
        self.thresholds.w
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.x > 0.5
    }

    pub fn is_debug(&self) -> bool {
        self.flags.y > 0.5
    }
}
