use glam::Vec3;

pub struct Normal;

impl Normal {
    /// Packs normal from `<-1.0, 1.0>` into `<0.0, 1.0>` per channel, which is
    /// how the prepass stores them.
    pub fn encode(n: Vec3) -> Vec3 {
        n * 0.5 + 0.5
    }

    /// See: [`Self::encode()`].
    ///
    /// Note that the result is not renormalized.
    pub fn decode(n: Vec3) -> Vec3 {
        n * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn decode() {
        assert_eq!(vec3(-1.0, 0.0, 1.0), Normal::decode(vec3(0.0, 0.5, 1.0)));

        // Packed normals that went through an 8-bit target are not unit-length
        // anymore and decoding doesn't pretend otherwise
        let actual = Normal::decode(vec3(0.5, 0.5, 0.75));

        assert_eq!(vec3(0.0, 0.0, 0.5), actual);
    }

    #[test]
    fn encode() {
        assert_eq!(vec3(0.0, 0.5, 1.0), Normal::encode(vec3(-1.0, 0.0, 1.0)));
    }
}
