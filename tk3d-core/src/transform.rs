/// 3D transformation matrices and local transform chains
///
/// Angles are in degrees throughout. Matrices act on column vectors, so
/// `a * b` applies `b` first.
use nalgebra::{Matrix4, Point3, Vector3};

/// One step of a local transform chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Scale(Vector3<f32>),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Translate(Vector3<f32>),
}

impl Op {
    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            Op::Scale(s) => Transform::scale_matrix(s.x, s.y, s.z),
            Op::RotateX(deg) => Transform::rotation_x(deg),
            Op::RotateY(deg) => Transform::rotation_y(deg),
            Op::RotateZ(deg) => Transform::rotation_z(deg),
            Op::Translate(t) => Transform::translation_matrix(t.x, t.y, t.z),
        }
    }

    fn is_rigid(&self) -> bool {
        !matches!(self, Op::Scale(_))
    }
}

/// A part's local transform chain.
///
/// Ops compose in call order by right-multiplication, so the op added last
/// is the first one to act on the mesh. A part written as
/// `translate(..).rotate_y(..).scale(..)` is scaled, then oriented, then
/// placed relative to its parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalTransform {
    ops: Vec<Op>,
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, op: Op) -> Self {
        self.ops.push(op);
        self
    }

    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Op::Translate(Vector3::new(x, y, z)))
    }

    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Op::Scale(Vector3::new(x, y, z)))
    }

    pub fn rotate_x(self, deg: f32) -> Self {
        self.then(Op::RotateX(deg))
    }

    pub fn rotate_y(self, deg: f32) -> Self {
        self.then(Op::RotateY(deg))
    }

    pub fn rotate_z(self, deg: f32) -> Self {
        self.then(Op::RotateZ(deg))
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// True when the chain contains no scale, i.e. it is a pure rigid motion
    pub fn is_rigid(&self) -> bool {
        self.ops.iter().all(Op::is_rigid)
    }

    /// Product of all ops in call order
    pub fn matrix(&self) -> Matrix4<f32> {
        self.ops
            .iter()
            .fold(Matrix4::identity(), |acc, op| acc * op.matrix())
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about the X axis
    pub fn rotation_x(deg: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(deg.to_radians(), 0.0, 0.0))
    }

    /// Rotation about the Y axis
    pub fn rotation_y(deg: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, deg.to_radians(), 0.0))
    }

    /// Rotation about the Z axis
    pub fn rotation_z(deg: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, deg.to_radians()))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Map a point through `m`, translation included
    pub fn apply_point(m: &Matrix4<f32>, p: &Point3<f32>) -> Point3<f32> {
        m.transform_point(p)
    }

    /// Map a direction through the linear part of `m`, translation excluded
    pub fn apply_direction(m: &Matrix4<f32>, v: &Vector3<f32>) -> Vector3<f32> {
        m.transform_vector(v)
    }
}

/// Unit vector along `v`, or the zero vector when `v` has no length
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_chain() {
        let chain = LocalTransform::new();
        assert!(chain.is_empty());
        assert!((chain.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_degrees() {
        let m = Transform::rotation_y(90.0);
        let v = Transform::apply_direction(&m, &Vector3::x());
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        let m = Transform::rotation_z(90.0);
        let v = Transform::apply_direction(&m, &Vector3::x());
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_chain_applies_last_op_first() {
        // Scale first, then translate: (1,0,0) -> (2,0,0) -> (2,5,0)
        let chain = LocalTransform::new().translate(0.0, 5.0, 0.0).scale(2.0, 2.0, 2.0);
        let p = Transform::apply_point(&chain.matrix(), &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(2.0, 5.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let m = Transform::translation_matrix(4.0, 5.0, 6.0);
        let v = Transform::apply_direction(&m, &Vector3::z());
        assert_relative_eq!(v, Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_rigid_detection() {
        assert!(LocalTransform::new().translate(1.0, 0.0, 0.0).rotate_x(10.0).is_rigid());
        assert!(!LocalTransform::new().scale(1.0, 2.0, 1.0).is_rigid());
    }

    #[test]
    fn test_normalize_zero_vector() {
        let v = normalize_or_zero(Vector3::zeros());
        assert_eq!(v, Vector3::zeros());
        let v = normalize_or_zero(Vector3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-6);
    }
}
