use glam::{IVec2, UVec2, Vec4};

pub type TexR32<'a> = Tex<'a, f32>;
pub type TexRgba32<'a> = Tex<'a, Vec4>;

/// Read-only view into a row-major, single-mip 2D texture.
///
/// Mirrors what a fragment shader gets out of a `texture_2d` binding: texel
/// fetches addressed by integer coordinates, no filtering, no writes.
#[derive(Clone, Copy, Debug)]
pub struct Tex<'a, T> {
    texels: &'a [T],
    size: UVec2,
}

impl<'a, T> Tex<'a, T>
where
    T: Copy,
{
    pub fn new(texels: &'a [T], size: UVec2) -> Self {
        debug_assert_eq!(texels.len(), (size.x as usize) * (size.y as usize));

        Self { texels, size }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns whether given texel lays inside the texture.
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.size.x
            && (pos.y as u32) < self.size.y
    }

    /// Fetches given texel; `pos` must lay inside the texture.
    pub fn read(&self, pos: UVec2) -> T {
        self.texels[(pos.y as usize) * (self.size.x as usize) + (pos.x as usize)]
    }

    /// Fetches given texel, returning `None` if it's outside the texture.
    pub fn get(&self, pos: IVec2) -> Option<T> {
        if self.contains(pos) {
            Some(self.read(pos.as_uvec2()))
        } else {
            None
        }
    }

    /// Fetches given texel, clamping the coordinates to the texture's edges.
    pub fn read_clamped(&self, pos: IVec2) -> T {
        let max = self.size.as_ivec2() - IVec2::ONE;

        self.read(pos.clamp(IVec2::ZERO, max.max(IVec2::ZERO)).as_uvec2())
    }
}
