use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction does not have to be unit length. Operations that need a
/// unit direction (triangle intersection, reflection) normalize internally.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Raw result of a ray-triangle test.
///
/// `u` and `v` are the barycentric weights of the second and third vertex,
/// `w = 1 - u - v` is the weight of the first. `t` is the distance from the
/// ray origin to `point` along the normalized direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleHit {
    pub point: Vec3,
    pub u: f32,
    pub v: f32,
    pub t: f32,
}

impl TriangleHit {
    /// Barycentric coordinates packed as (u, v, w).
    #[inline]
    pub fn uvw(&self) -> Vec3 {
        Vec3::new(self.u, self.v, 1.0 - self.u - self.v)
    }
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Direction as given, not normalized.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `origin + t * direction`, using the direction as given.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Mirror this ray about `normal`, starting the new ray at `position`.
    pub fn reflect(&self, position: Vec3, normal: Vec3) -> Ray {
        Ray::new(position, reflect_direction(self.direction, normal))
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// The direction is normalized before the test, so the returned `t` is a
    /// true distance and `point == origin + normalize(direction) * t`.
    /// Parallel rays, degenerate triangles and hits with `t < epsilon` are
    /// reported as `None`. Both triangle sides are hit.
    pub fn intersect_triangle(&self, v1: Vec3, v2: Vec3, v3: Vec3, epsilon: f32) -> Option<TriangleHit> {
        let direction = self.direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let edge1 = v2 - v1;
        let edge2 = v3 - v1;

        let p = direction.cross(edge2);
        let det = edge1.dot(p);

        // Ray is parallel to the triangle plane (or the triangle is degenerate)
        if det.abs() < epsilon {
            return None;
        }

        let inv_det = 1.0 / det;
        let t_vec = self.origin - v1;
        let u = t_vec.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = t_vec.cross(edge1);
        let v = direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        if t < epsilon {
            return None;
        }

        Some(TriangleHit {
            point: self.origin + direction * t,
            u,
            v,
            t,
        })
    }
}

/// Reflect `direction` about `normal`: d - 2 (d . n) n.
///
/// The normal is normalized first, which keeps `|result| == |direction|`.
#[inline]
pub fn reflect_direction(direction: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    direction - n * (2.0 * direction.dot(n))
}
