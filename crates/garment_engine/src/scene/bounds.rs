//! Axis-aligned bounding volumes used for framing the garment

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An empty box that any point will expand
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Smallest box enclosing every point; empty when there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Grow the box to include a point
    pub fn expand_to_include(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow the box to include another box
    pub fn union(&self, other: &Aabb) -> Aabb {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Whether the box encloses nothing
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full edge lengths of the box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal; zero for an empty box
    pub fn diagonal_length(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.size().norm()
        }
    }

    /// The same box moved by an offset
    pub fn translated(&self, offset: &Vec3) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points() {
        let points = [Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, -2.0, 12.0)];
        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 12.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 0.0, 6.0));
    }

    #[test]
    fn test_diagonal_length() {
        // 4 x 6 x 12 box has a diagonal of exactly 14
        let aabb = Aabb::new(Vec3::zeros(), Vec3::new(4.0, 6.0, 12.0));
        assert_relative_eq!(aabb.diagonal_length(), 14.0, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_box() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
        assert_eq!(aabb.diagonal_length(), 0.0);
        assert!(!aabb.contains_point(Vec3::zeros()));

        let other = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.union(&other), other);
    }

    #[test]
    fn test_translated() {
        let aabb = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let moved = aabb.translated(&-aabb.center());
        assert_eq!(moved.center(), Vec3::zeros());
        assert!(moved.contains_point(Vec3::new(0.5, -0.5, 1.0)));
    }
}
