use glam::Vec3A;

/// Bitmask of collision layers a ray is allowed to hit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    /// Mask of every layer except `layer`
    #[must_use]
    pub const fn all_except(layer: u8) -> Self {
        Self(!(1 << (layer as u32 & 31)))
    }

    #[must_use]
    pub const fn contains(self, layer: u8) -> bool {
        self.0 & (1 << (layer as u32 & 31)) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3A,
    pub normal: Vec3A,
}

/// Synchronous single-hit ray queries against the host's physics world
pub trait Raycaster {
    /// Returns the closest hit along `dir` (unit length) within `max_distance`
    fn raycast(
        &self,
        origin: Vec3A,
        dir: Vec3A,
        max_distance: f32,
        layer_mask: LayerMask,
    ) -> Option<RayHit>;
}

impl<R: Raycaster + ?Sized> Raycaster for &R {
    fn raycast(
        &self,
        origin: Vec3A,
        dir: Vec3A,
        max_distance: f32,
        layer_mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).raycast(origin, dir, max_distance, layer_mask)
    }
}

/// An infinite horizontal plane at `height`, optionally bounded in X.
///
/// The bound turns it into a plateau with a sheer drop, which is enough to
/// exercise the TEx terrain probes.
#[derive(Clone, Copy, Debug)]
pub struct FlatGround {
    pub height: f32,
    pub layer: u8,
    /// Ground only exists where `x <= edge_x`
    pub edge_x: Option<f32>,
}

impl FlatGround {
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self {
            height,
            layer: 0,
            edge_x: None,
        }
    }

    #[must_use]
    pub const fn with_edge(mut self, edge_x: f32) -> Self {
        self.edge_x = Some(edge_x);
        self
    }
}

impl Raycaster for FlatGround {
    fn raycast(
        &self,
        origin: Vec3A,
        dir: Vec3A,
        max_distance: f32,
        layer_mask: LayerMask,
    ) -> Option<RayHit> {
        if !layer_mask.contains(self.layer) {
            return None;
        }

        let height_above = origin.z - self.height;
        if height_above < 0.0 || dir.z >= 0.0 {
            return None;
        }

        let distance = height_above / -dir.z;
        if distance > max_distance {
            return None;
        }

        let point = origin + dir * distance;
        if self.edge_x.is_some_and(|edge_x| point.x > edge_x) {
            return None;
        }

        Some(RayHit {
            distance,
            point,
            normal: Vec3A::Z,
        })
    }
}
