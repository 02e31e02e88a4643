use glam::Vec4;
use log::trace;

use crate::{gpu, passes, utils, CameraViewport, Frame, ReflectionConfig};

#[derive(Debug)]
pub struct ReflectionPass {
    params: gpu::ReflectionPassParams,
}

impl ReflectionPass {
    pub fn new(config: &ReflectionConfig) -> Self {
        Self {
            params: config.serialize(),
        }
    }

    pub fn run(
        &self,
        camera: &gpu::Camera,
        viewport: &CameraViewport,
        frame: &Frame,
    ) -> Vec<Vec4> {
        trace!(
            "Running reflection pass; debug-mode={}",
            self.params.debug_mode().name()
        );

        utils::measure("reflection", || {
            passes::dispatch(frame.size(), viewport, frame.colors(), |pos, color| {
                ssgi_shaders::reflection::fs(
                    pos,
                    &self.params,
                    camera,
                    frame.depth_tex(),
                    frame.normals_tex(),
                    frame.colors_tex(),
                    color,
                );
            })
        })
    }
}
