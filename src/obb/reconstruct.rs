//! Turn a winning [`BoxFit`] into eight local-space corners.

use super::optimizer::BoxFit;
use super::{BOX_FACES, CollisionBox};
use crate::config::FrameCorrection;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::mesh::Transform;
use nalgebra::{Point3, Rotation3, Unit, UnitQuaternion, Vector3};

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Build the collision box for `fit` in the local space of the object whose
/// world transform is `transform`.
///
/// Corners are generated with x outermost and z innermost, negative offset
/// first, which is the ordering [`BOX_FACES`] indexes into. With
/// [`FrameCorrection::AlignToObject`] the residual rotation between the fitted
/// frame and the object's own orientation is removed around the box center.
pub fn reconstruct_box(
    fit: &BoxFit,
    transform: &Transform,
    correction: FrameCorrection,
) -> Result<CollisionBox, GeometryError> {
    let c = &fit.candidate;
    let center = c.world_center(&fit.origin);

    let (axes, half) = match correction {
        FrameCorrection::Preserve => (c.axes(), c.half_extents()),
        FrameCorrection::AlignToObject => {
            let r_object = transform.rotation()?;
            let (axes, half) = relabel_towards(&c.axes(), &c.half_extents(), &r_object);
            let r_candidate =
                UnitQuaternion::from_rotation_matrix(&Rotation3::from_basis_unchecked(&axes));
            let delta = r_candidate * r_object.inverse();
            let undo = delta.inverse();
            (axes.map(|axis| undo * axis), half)
        },
    };

    let mut corners_world = [Point3::origin(); 8];
    let mut k = 0;
    for dx in [-half.x, half.x] {
        for dy in [-half.y, half.y] {
            for dz in [-half.z, half.z] {
                corners_world[k] = center + axes[0] * dx + axes[1] * dy + axes[2] * dz;
                k += 1;
            }
        }
    }

    let to_local = transform.inverse()?;
    let corners = corners_world.map(|p| to_local.transform_point(&p));

    Ok(CollisionBox {
        corners,
        faces: BOX_FACES,
        transform: *transform,
        volume: c.volume,
        center,
        axes: axes.map(Unit::new_normalize),
        half_extents: half,
        report: fit.report,
    })
}

/// Reorder and flip the box axes (with their extents) so they lie as close
/// as possible to the axes of `rotation`. The box itself does not change.
fn relabel_towards(
    axes: &[Vector3<Real>; 3],
    half: &Vector3<Real>,
    rotation: &UnitQuaternion<Real>,
) -> ([Vector3<Real>; 3], Vector3<Real>) {
    let targets = [
        rotation * Vector3::x(),
        rotation * Vector3::y(),
        rotation * Vector3::z(),
    ];
    let score = |perm: &[usize; 3]| -> Real {
        (0..3).map(|i| axes[perm[i]].dot(&targets[i]).abs()).sum()
    };

    let mut best = PERMUTATIONS[0];
    for perm in &PERMUTATIONS[1..] {
        if score(perm) > score(&best) {
            best = *perm;
        }
    }

    let mut out = [Vector3::zeros(); 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let axis = axes[best[i]];
        *slot = if axis.dot(&targets[i]) < 0.0 { -axis } else { axis };
    }
    if out[0].cross(&out[1]).dot(&out[2]) < 0.0 {
        out[2] = -out[2];
    }
    (out, Vector3::new(half[best[0]], half[best[1]], half[best[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relabelling_keeps_extents_with_their_axes() {
        let axes = [Vector3::y(), -Vector3::x(), Vector3::z()];
        let half = Vector3::new(2.0, 1.0, 3.0);
        let (out, out_half) = relabel_towards(&axes, &half, &UnitQuaternion::identity());
        assert_eq!(out, [Vector3::x(), Vector3::y(), Vector3::z()]);
        assert_eq!(out_half, Vector3::new(1.0, 2.0, 3.0));
    }
}
