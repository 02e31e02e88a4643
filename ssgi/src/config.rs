use glam::{vec4, Vec4};

use crate::gpu;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SsgiConfig {
    pub reflection: ReflectionConfig,
    pub edge_detection: EdgeDetectionConfig,
}

impl SsgiConfig {
    pub(crate) fn describe(&self) -> String {
        format!(
            "reflection={} (strength={}, roughness={}, debug-mode={}); edge-detection={} (sharpness={}, debug={})",
            Self::describe_flag(self.reflection.enabled),
            self.reflection.strength,
            self.reflection.roughness,
            self.reflection.debug_mode.name(),
            Self::describe_flag(self.edge_detection.enabled),
            self.edge_detection.sharpness,
            self.edge_detection.debug,
        )
    }

    fn describe_flag(enabled: bool) -> &'static str {
        if enabled {
            "on"
        } else {
            "off"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReflectionConfig {
    pub enabled: bool,

    /// How much of the reflected color gets blended into the surface's color,
    /// `<0.0, 1.0>`
    pub strength: f32,

    /// How much the reflected direction gets jittered; `0.0` is a perfect
    /// mirror
    pub roughness: f32,

    /// Color used when the reflected ray doesn't hit anything on the screen
    pub sky_color: Vec4,

    pub march: gpu::RayMarchSettings,
    pub debug_mode: gpu::DebugMode,
}

impl ReflectionConfig {
    pub(crate) fn serialize(&self) -> gpu::ReflectionPassParams {
        gpu::ReflectionPassParams::new(
            self.strength,
            self.roughness,
            self.debug_mode,
            self.march,
            self.sky_color,
        )
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 0.5,
            roughness: 0.0,
            sky_color: vec4(0.0, 0.0, 0.0, 1.0),
            march: Default::default(),
            debug_mode: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDetectionConfig {
    pub enabled: bool,

    pub depth_threshold: f32,
    pub normal_threshold: f32,
    pub color_threshold: f32,

    /// Color used to paint edges in the debug view
    pub edge_color: Vec4,

    /// How quickly the multiplier falls off with the depth discontinuity
    pub sharpness: f32,

    /// Whether to output just the edges instead of the shaded color
    pub debug: bool,
}

impl EdgeDetectionConfig {
    pub(crate) fn serialize(&self) -> gpu::EdgeDetectionPassParams {
        gpu::EdgeDetectionPassParams {
            thresholds: vec4(
                self.depth_threshold,
                self.normal_threshold,
                self.color_threshold,
                self.sharpness,
            ),
            edge_color: self.edge_color,
            flags: vec4(
                if self.enabled { 1.0 } else { 0.0 },
                if self.debug { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ),
        }
    }
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            depth_threshold: 0.1,
            normal_threshold: 0.1,
            color_threshold: 0.1,
            edge_color: vec4(0.0, 0.0, 0.0, 1.0),
            sharpness: gpu::EdgeDetector::DEFAULT_SHARPNESS,
            debug: false,
        }
    }
}
