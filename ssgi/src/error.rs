use glam::UVec2;
use thiserror::Error;

/// Errors that can happen when preparing or rendering a frame.
#[derive(Debug, Error)]
pub enum Error {
    #[error("frame is empty (size = {0})")]
    EmptyFrame(UVec2),

    #[error(
        "{buffer} buffer has {actual} texels, but frame of size {size} needs {expected}"
    )]
    BufferSizeMismatch {
        buffer: &'static str,
        size: UVec2,
        expected: usize,
        actual: usize,
    },

    #[error("{image} image has size {actual}, expected {expected}")]
    ImageSizeMismatch {
        image: &'static str,
        expected: UVec2,
        actual: UVec2,
    },

    #[error("viewport is empty (size = {0})")]
    EmptyViewport(UVec2),

    #[error(
        "viewport (position = {position}, size = {size}) doesn't fit in frame of size {frame_size}"
    )]
    ViewportOutOfBounds {
        position: UVec2,
        size: UVec2,
        frame_size: UVec2,
    },

    #[error("couldn't process image")]
    Image(#[from] image::ImageError),
}
