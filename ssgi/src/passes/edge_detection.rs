use glam::Vec4;
use log::trace;

use crate::{gpu, passes, utils, CameraViewport, EdgeDetectionConfig, Frame};

#[derive(Debug)]
pub struct EdgeDetectionPass {
    params: gpu::EdgeDetectionPassParams,
}

impl EdgeDetectionPass {
    pub fn new(config: &EdgeDetectionConfig) -> Self {
        Self {
            params: config.serialize(),
        }
    }

    /// Runs edge detection over `colors`, which are the output of the
    /// previous pass (and so might differ from the frame's colors).
    pub fn run(
        &self,
        viewport: &CameraViewport,
        frame: &Frame,
        colors: &[Vec4],
    ) -> Vec<Vec4> {
        trace!(
            "Running edge detection pass; debug={}",
            self.params.is_debug()
        );

        let colors_tex = gpu::TexRgba32::new(colors, frame.size());

        utils::measure("edge-detection", || {
            passes::dispatch(frame.size(), viewport, colors, |pos, color| {
                ssgi_shaders::edge_detection::fs(
                    pos,
                    &self.params,
                    frame.depth_tex(),
                    frame.normals_tex(),
                    colors_tex,
                    color,
                );
            })
        })
    }
}
