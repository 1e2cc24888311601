use crate::math::*;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box covering all of space.
    pub const fn max() -> Self {
        Self { min: Vec3::splat(-f32::MAX), max: Vec3::splat(f32::MAX) }
    }

    /// Inverted box, the neutral element of `union_with`.
    pub const fn empty() -> Self {
        Self { min: Vec3::splat(f32::MAX), max: Vec3::splat(-f32::MAX) }
    }

    pub fn from_points(positions: &[Vec3]) -> Self {
        if positions.is_empty() {
            return Self::default();
        }

        let mut min = positions[0];
        let mut max = positions[0];

        for &p in &positions[1..] {
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    pub fn union_with(&self, other: &AABB) -> AABB {
        AABB { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    pub fn include_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grows the box so that it contains a sphere of `radius` around `p`.
    pub fn include_sphere(&mut self, p: Vec3, radius: f32) {
        self.min = self.min.min(p - Vec3::splat(radius));
        self.max = self.max.max(p + Vec3::splat(radius));
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn to_array(&self) -> [f32; 6] {
        [self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z]
    }

    pub fn from_array(v: [f32; 6]) -> Self {
        Self { min: Vec3::new(v[0], v[1], v[2]), max: Vec3::new(v[3], v[4], v[5]) }
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self {
            min: Vec3::new(0.0, 0.0, 0.0), //
            max: Vec3::new(0.0, 0.0, 0.0),
        }
    }
}
