/// What the reflection pass writes into its output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DebugMode {
    /// Surface color blended with its reflection
    #[default]
    Final,

    /// Linearized depth of the shaded pixel, as grayscale
    RawDepth,

    /// Reflection direction, remapped into `<0.0, 1.0>`
    RawDirection,

    /// White where the reflection ray hit something, black otherwise
    HitMask,
}

impl DebugMode {
    pub const ALL: [Self; 4] =
        [Self::Final, Self::RawDepth, Self::RawDirection, Self::HitMask];

    pub fn serialize(self) -> u32 {
        match self {
            DebugMode::Final => 0,
            DebugMode::RawDepth => 1,
            DebugMode::RawDirection => 2,
            DebugMode::HitMask => 3,
        }
    }

    pub fn deserialize(id: u32) -> Self {
        match id {
            1 => DebugMode::RawDepth,
            2 => DebugMode::RawDirection,
            3 => DebugMode::HitMask,
            _ => DebugMode::Final,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DebugMode::Final => "final",
            DebugMode::RawDepth => "raw-depth",
            DebugMode::RawDirection => "raw-direction",
            DebugMode::HitMask => "hit-mask",
        }
    }
}
