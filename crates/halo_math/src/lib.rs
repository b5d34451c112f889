// Re-export glam for convenience
pub use glam::*;

// Halo math types
mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_elementwise_product() {
        let a = Vec3::new(0.5, 0.5, 0.5);
        let b = Vec3::new(1.0, 0.7, 0.2);
        assert_eq!(a * b, Vec3::new(0.5, 0.35, 0.1));
    }

    #[test]
    fn test_vec3_cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.5, 4.0);
        let c = a.cross(b);
        assert!(c.dot(a).abs() < 1e-5);
        assert!(c.dot(b).abs() < 1e-5);
    }
}
