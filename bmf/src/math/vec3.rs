#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Reads the first three floats of the slice.
    pub fn from_slice(values: &[f32]) -> Self {
        Self { x: values[0], y: values[1], z: values[2] }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(self) -> f32 {
        dot(self, self).sqrt()
    }

    pub fn length_squared(self) -> f32 {
        dot(self, self)
    }

    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        self / len
    }

    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x.min(other.x), y: self.y.min(other.y), z: self.z.min(other.z) }
    }

    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x.max(other.x), y: self.y.max(other.y), z: self.z.max(other.z) }
    }

    pub fn abs(self) -> Vec3 {
        Vec3 { x: self.x.abs(), y: self.y.abs(), z: self.z.abs() }
    }
}

// a * b
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

// a x b
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3 {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

// |a - b|
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

// |a - b|^2
pub fn distance_squared(a: Vec3, b: Vec3) -> f32 {
    (a - b).length_squared()
}

// -Vec3
impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 { x: -self.x, y: -self.y, z: -self.z }
    }
}

// Vec3 + Vec3
impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

// Vec3 += Vec3
impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

// Vec3 - Vec3
impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

// Vec3 * f32
impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, scalar: f32) -> Vec3 {
        Vec3 { x: self.x * scalar, y: self.y * scalar, z: self.z * scalar }
    }
}

// f32 * Vec3
impl std::ops::Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, vec: Vec3) -> Vec3 {
        Vec3 { x: vec.x * self, y: vec.y * self, z: vec.z * self }
    }
}

// Vec3 / f32
impl std::ops::Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, scalar: f32) -> Vec3 {
        Vec3 { x: self.x / scalar, y: self.y / scalar, z: self.z / scalar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_subtraction() {
        let v1 = Vec3::new(5.0, 7.0, 9.0);
        let v2 = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(v1 - v2, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_scalar_multiplication_by_vec3() {
        let v = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(2.0 * v, Vec3::new(4.0, 6.0, 8.0));
        assert_eq!(v * 2.0, Vec3::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn test_dot_product() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        // 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0 = 4.0 + 10.0 + 18.0 = 32.0
        assert_eq!(dot(v1, v2), 32.0);
    }

    #[test]
    fn test_cross_product() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(x, y), Vec3::new(0.0, 0.0, 1.0));

        // a × b = -(b × a)
        assert_eq!(cross(y, x), -cross(x, y));

        // (2,3,4) × (5,6,7) = (21 - 24, 20 - 14, 12 - 15) = (-3, 6, -3)
        assert_eq!(cross(Vec3::new(2.0, 3.0, 4.0), Vec3::new(5.0, 6.0, 7.0)), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance_squared(a, b), 25.0);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn test_normalized() {
        let normalized = Vec3::new(3.0, 4.0, 0.0).normalized();
        assert!((normalized.length() - 1.0).abs() < f32::EPSILON);
        assert!((normalized.x - 0.6).abs() < f32::EPSILON);
        assert!((normalized.y - 0.8).abs() < f32::EPSILON);
        assert!((normalized.z - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_vector_normalized() {
        // Normalizing a zero vector results in NaN values
        let normalized = Vec3::ZERO.normalized();
        assert!(normalized.x.is_nan());
        assert!(normalized.y.is_nan());
        assert!(normalized.z.is_nan());
    }

    #[test]
    fn test_min_max() {
        let a = Vec3::new(1.0, 5.0, -2.0);
        let b = Vec3::new(3.0, -1.0, -2.5);
        assert_eq!(a.min(b), Vec3::new(1.0, -1.0, -2.5));
        assert_eq!(a.max(b), Vec3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn test_slice_conversion() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let v = Vec3::from_slice(&values);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
    }
}
