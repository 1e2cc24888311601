pub mod aabb;
pub mod sphere;
pub mod vec3;

pub use aabb::*;
pub use sphere::*;
pub use vec3::*;
