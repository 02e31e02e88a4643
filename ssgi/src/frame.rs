use std::path::Path;

use derivative::Derivative;
use glam::{uvec2, vec4, UVec2, Vec3, Vec4};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::{gpu, Error};

/// Color and prepass buffers of a single frame.
///
/// All buffers are row-major and contain exactly `size.x * size.y` texels;
/// normals are stored packed into `<0.0, 1.0>` (see [`gpu::Normal`]).
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Frame {
    size: UVec2,

    #[derivative(Debug = "ignore")]
    colors: Vec<Vec4>,

    #[derivative(Debug = "ignore")]
    depth: Vec<f32>,

    #[derivative(Debug = "ignore")]
    normals: Vec<Vec4>,
}

impl Frame {
    /// Creates an empty frame - black, with no geometry.
    pub fn new(size: UVec2) -> Self {
        let len = (size.x * size.y) as usize;

        Self {
            size,
            colors: vec![vec4(0.0, 0.0, 0.0, 1.0); len],
            depth: vec![gpu::NO_GEOMETRY_DEPTH; len],
            normals: vec![gpu::Normal::encode(Vec3::ZERO).extend(1.0); len],
        }
    }

    pub fn from_buffers(
        size: UVec2,
        colors: Vec<Vec4>,
        depth: Vec<f32>,
        normals: Vec<Vec4>,
    ) -> Result<Self, Error> {
        let this = Self {
            size,
            colors,
            depth,
            normals,
        };

        this.validate()?;

        Ok(this)
    }

    /// Creates a frame out of a color image, packed-normals image and a
    /// depth buffer.
    pub fn from_images(
        colors: &DynamicImage,
        normals: &DynamicImage,
        depth: Vec<f32>,
    ) -> Result<Self, Error> {
        let size = uvec2(colors.width(), colors.height());

        if normals.dimensions() != colors.dimensions() {
            return Err(Error::ImageSizeMismatch {
                image: "normals",
                expected: size,
                actual: uvec2(normals.width(), normals.height()),
            });
        }

        let colors = colors
            .to_rgba32f()
            .pixels()
            .map(|pixel| Vec4::from_array(pixel.0))
            .collect();

        let normals = normals
            .to_rgb32f()
            .pixels()
            .map(|pixel| Vec3::from_array(pixel.0).extend(1.0))
            .collect();

        Self::from_buffers(size, colors, depth, normals)
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn color(&self, pixel: UVec2) -> Vec4 {
        self.colors[self.index(pixel)]
    }

    pub fn depth(&self, pixel: UVec2) -> f32 {
        self.depth[self.index(pixel)]
    }

    /// Returns decoded normal at given pixel.
    pub fn normal(&self, pixel: UVec2) -> Vec3 {
        gpu::Normal::decode(self.normals[self.index(pixel)].truncate())
    }

    pub fn set_color(&mut self, pixel: UVec2, color: Vec4) {
        let idx = self.index(pixel);

        self.colors[idx] = color;
    }

    pub fn set_depth(&mut self, pixel: UVec2, depth: f32) {
        let idx = self.index(pixel);

        self.depth[idx] = depth;
    }

    /// Stores given (world-space, normalized) normal at given pixel.
    pub fn set_normal(&mut self, pixel: UVec2, normal: Vec3) {
        let idx = self.index(pixel);

        self.normals[idx] = gpu::Normal::encode(normal).extend(1.0);
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(Error::EmptyFrame(self.size));
        }

        let expected = (self.size.x as usize) * (self.size.y as usize);

        for (buffer, actual) in [
            ("color", self.colors.len()),
            ("depth", self.depth.len()),
            ("normal", self.normals.len()),
        ] {
            if actual != expected {
                return Err(Error::BufferSizeMismatch {
                    buffer,
                    size: self.size,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn colors_tex(&self) -> gpu::TexRgba32<'_> {
        gpu::TexRgba32::new(&self.colors, self.size)
    }

    pub(crate) fn depth_tex(&self) -> gpu::TexR32<'_> {
        gpu::TexR32::new(&self.depth, self.size)
    }

    pub(crate) fn normals_tex(&self) -> gpu::TexRgba32<'_> {
        gpu::TexRgba32::new(&self.normals, self.size)
    }

    fn index(&self, pixel: UVec2) -> usize {
        pixel_index(self.size, pixel)
    }
}

/// Final colors of a rendered frame.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Output {
    size: UVec2,

    #[derivative(Debug = "ignore")]
    colors: Vec<Vec4>,
}

impl Output {
    pub(crate) fn new(size: UVec2, colors: Vec<Vec4>) -> Self {
        Self { size, colors }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn color(&self, pixel: UVec2) -> Vec4 {
        self.colors[pixel_index(self.size, pixel)]
    }

    /// Converts colors into 8-bit RGBA, clamping them into `<0.0, 1.0>`.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.size.x, self.size.y, |x, y| {
            let color = self.color(uvec2(x, y));
            let color = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();

            Rgba([color.x as u8, color.y as u8, color.z as u8, color.w as u8])
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.to_image().save(path)?;

        Ok(())
    }
}

fn pixel_index(size: UVec2, pixel: UVec2) -> usize {
    assert!(
        pixel.x < size.x && pixel.y < size.y,
        "pixel {} is outside of frame of size {}",
        pixel,
        size
    );

    (pixel.y * size.x + pixel.x) as usize
}
