//! Object-to-world affine transform.

use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{
    Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3,
};

/// Affine 4×4 transform mapping object-local coordinates to world space.
///
/// Holds rotation, translation and possibly non-uniform scale. Owned by the
/// caller; the kernel only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Matrix4<Real>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            matrix: Matrix4::identity(),
        }
    }

    pub const fn from_matrix(matrix: Matrix4<Real>) -> Self {
        Transform { matrix }
    }

    /// Compose `translation * rotation * scale`.
    pub fn from_parts(
        translation: Vector3<Real>,
        rotation: UnitQuaternion<Real>,
        scale: Vector3<Real>,
    ) -> Self {
        let matrix = Translation3::from(translation).to_homogeneous()
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&scale);
        Transform { matrix }
    }

    pub const fn matrix(&self) -> &Matrix4<Real> {
        &self.matrix
    }

    /// The 3×3 linear part (rotation and scale).
    pub fn linear(&self) -> Matrix3<Real> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    pub fn translation(&self) -> Vector3<Real> {
        Vector3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// World-space position of the object's local origin.
    pub fn origin(&self) -> Point3<Real> {
        Point3::from(self.translation())
    }

    pub fn transform_point(&self, point: &Point3<Real>) -> Point3<Real> {
        self.matrix.transform_point(point)
    }

    pub fn transform_vector(&self, vector: &Vector3<Real>) -> Vector3<Real> {
        self.linear() * vector
    }

    /// Inverse-transpose of the linear part. Equal to the linear part itself
    /// for rigid transforms; `None` when the linear part is singular.
    pub fn normal_matrix(&self) -> Option<Matrix3<Real>> {
        self.linear().try_inverse().map(|inv| inv.transpose())
    }

    /// Map a surface normal to world space and renormalize it.
    pub fn transform_normal(&self, normal: &Vector3<Real>) -> Option<Unit<Vector3<Real>>> {
        let world = self.normal_matrix()? * normal;
        Unit::try_new(world, EPSILON)
    }

    /// The pure rotation of this transform, with scale and mirroring removed.
    pub fn rotation(&self) -> Result<UnitQuaternion<Real>, GeometryError> {
        let linear = self.linear();
        let mut axes = [Vector3::zeros(); 3];
        for (i, axis) in axes.iter_mut().enumerate() {
            let column = linear.column(i).into_owned();
            let length = column.norm();
            if length < EPSILON {
                return Err(GeometryError::SingularTransform);
            }
            *axis = column / length;
        }
        // a negative scale leaves a reflection behind; flip one axis to get a proper rotation
        if axes[0].cross(&axes[1]).dot(&axes[2]) < 0.0 {
            axes[2] = -axes[2];
        }
        let basis = Matrix3::from_columns(&axes);
        let rotation = Rotation3::from_matrix(&basis);
        Ok(UnitQuaternion::from_rotation_matrix(&rotation))
    }

    pub fn inverse(&self) -> Result<Transform, GeometryError> {
        self.matrix
            .try_inverse()
            .map(Transform::from_matrix)
            .ok_or(GeometryError::SingularTransform)
    }
}

impl From<Matrix4<Real>> for Transform {
    fn from(matrix: Matrix4<Real>) -> Self {
        Transform::from_matrix(matrix)
    }
}
