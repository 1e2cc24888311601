use crate::math::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Zero radius sphere at the origin.
    pub const fn min() -> Self {
        Self { center: Vec3::ZERO, radius: 0.0 }
    }

    pub const fn max() -> Self {
        Self { center: Vec3::ZERO, radius: f32::MAX }
    }

    /// Approximate bounding sphere (Ritter). Not minimal.
    /// Returns `Sphere::min()` for fewer than two points. With non-finite
    /// points the result is not finite either.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.len() < 2 {
            return Self::min();
        }

        let x = points[0];
        let y = farthest_from(points, x);
        let z = farthest_from(points, y);

        // padded so that y and z end up strictly inside
        let mut sphere = Sphere { center: (y + z) * 0.5, radius: distance(y, z) * 0.5001 };

        while let Some(&outside) = points.iter().find(|&&p| !sphere.is_inside(p)) {
            sphere = sphere.grown_to(outside);
            if !sphere.radius.is_finite() {
                break;
            }
        }

        sphere
    }

    /// Grows the sphere just enough (plus padding) to contain `point`.
    pub fn union_with(&self, point: Vec3) -> Sphere {
        if distance(self.center, point) <= self.radius {
            return *self;
        }
        self.grown_to(point)
    }

    fn grown_to(&self, point: Vec3) -> Sphere {
        let to_center = self.center - point;
        let dist = to_center.length();
        let opposite = self.center + self.radius * (to_center / dist);
        Sphere { center: (point + opposite) * 0.5, radius: (dist + self.radius) * 0.50001 }
    }

    pub fn overlapping_with(&self, other: &Sphere) -> bool {
        let dist_sq = distance_squared(self.center, other.center);
        let radius_sum = self.radius + other.radius;
        dist_sq < radius_sum * radius_sum
    }

    pub fn is_inside(&self, point: Vec3) -> bool {
        distance_squared(point, self.center) <= self.radius * self.radius
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.center.x, self.center.y, self.center.z, self.radius]
    }

    pub fn from_array(v: [f32; 4]) -> Self {
        Self { center: Vec3::new(v[0], v[1], v[2]), radius: v[3] }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::min()
    }
}

fn farthest_from(points: &[Vec3], origin: Vec3) -> Vec3 {
    let mut best = points[0];
    let mut best_dist = distance_squared(best, origin);
    for &p in &points[1..] {
        let d = distance_squared(p, origin);
        if d > best_dist {
            best = p;
            best_dist = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_inside() {
        let s = Sphere::new(Vec3::ZERO, 10.0);
        assert!(s.is_inside(Vec3::new(0.0, 0.0, 0.0)));
        assert!(s.is_inside(Vec3::new(10.0, 0.0, 0.0)));
        assert!(s.is_inside(Vec3::new(0.0, 10.0, 0.0)));
        assert!(s.is_inside(Vec3::new(0.0, 0.0, 10.0)));
        assert!(s.is_inside(Vec3::new(2.0, 2.0, 2.0)));
        assert!(!s.is_inside(Vec3::new(11.0, 0.0, 0.0)));
        assert!(!s.is_inside(Vec3::new(10.01, 0.0, 0.0)));
    }

    #[test]
    fn sphere_union() {
        let s = Sphere::new(Vec3::ZERO, 1.0);

        let res = s.union_with(Vec3::new(2.0, 0.0, 0.0));
        assert!((res.radius - 1.5).abs() < 0.001);
        assert!((res.center.x - 0.5).abs() < 0.001);

        // point inside leaves the sphere unchanged
        assert_eq!(s.union_with(Vec3::new(0.5, 0.0, 0.0)), s);
    }

    #[test]
    fn sphere_overlap() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        assert!(a.overlapping_with(&Sphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0)));
        assert!(!a.overlapping_with(&Sphere::new(Vec3::new(3.0, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(Sphere::from_points(&[]), Sphere::min());
        assert_eq!(Sphere::from_points(&[Vec3::new(4.0, 5.0, 6.0)]), Sphere::min());

        let same = [Vec3::new(1.0, 1.0, 1.0); 4];
        let s = Sphere::from_points(&same);
        assert_eq!(s.center, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(s.radius, 0.0);
    }

    #[test]
    fn non_finite_points_terminate() {
        let s = Sphere::from_points(&[Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)]);
        assert!(!s.radius.is_finite());

        let s = Sphere::from_points(&[Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)]);
        assert!(!s.radius.is_finite());
    }

    #[test]
    fn two_points() {
        let s = Sphere::from_points(&[Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
        assert_eq!(s.center, Vec3::ZERO);
        assert!((s.radius - 1.0002).abs() < 1e-6);
    }

    #[test]
    fn contains_all_points() {
        // deterministic pseudo random cloud
        let mut state = 0x2545_f491_u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 20_000) as f32 / 100.0 - 100.0
        };
        let points: Vec<Vec3> = (0..2000).map(|_| Vec3::new(next(), next(), next())).collect();

        let s = Sphere::from_points(&points);
        for p in &points {
            assert!(distance(*p, s.center) <= s.radius * (1.0 + 1e-5), "{:?} outside of {:?}", p, s);
        }
    }
}
