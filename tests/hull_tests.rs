mod support;

use geo::{Area, Intersects};
use hullbox::{
    config::Tolerances,
    errors::GeometryError,
    float_types::Real,
    hull::{convex_hull_2d, convex_hull_3d, hull2d::cross, world_hull},
    mesh::{Mesh, Transform},
};
use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use proptest::prelude::*;

#[test]
fn sphere_hull_faces_are_planar_with_unit_normals() {
    let sphere = Mesh::sphere(1.0, 16, 8);
    let hull = convex_hull_3d(&sphere.vertices, &Tolerances::default()).expect("hull");
    assert!(hull.faces.len() >= 4);

    for face in &hull.faces {
        assert!(support::approx_eq(face.normal.norm(), 1.0, 1e-9));
        for p in hull.face_points(face) {
            let residual = face.normal.dot(&p.coords) - face.offset;
            assert!(residual.abs() < 1e-6, "face vertex off its plane by {residual}");
        }
        // every input point lies on the inner side of every face
        for p in &sphere.vertices {
            assert!(face.normal.dot(&p.coords) - face.offset < 1e-6);
        }
    }
}

#[test]
fn cube_hull_merges_coplanar_triangles() {
    let points = support::unit_cube_points();
    let hull = convex_hull_3d(&points, &Tolerances::default()).expect("hull");
    assert_eq!(hull.faces.len(), 6);
    assert_eq!(hull.points.len(), 8);
    for face in &hull.faces {
        assert_eq!(face.vertices.len(), 4);
    }
    assert!(support::approx_eq(hull.volume(), 1.0, 1e-9));
}

#[test]
fn cube_hull_ignores_interior_and_duplicate_points() {
    let mut points = support::unit_cube_points();
    points.push(Point3::new(0.5, 0.5, 0.5));
    points.push(Point3::new(0.25, 0.75, 0.5));
    points.push(Point3::new(1.0, 1.0, 1.0));
    let hull = convex_hull_3d(&points, &Tolerances::default()).expect("hull");
    assert_eq!(hull.points.len(), 8);
    assert_eq!(hull.faces.len(), 6);
}

#[test]
fn face_rings_wind_counter_clockwise_about_normal() {
    let hull = convex_hull_3d(&support::unit_cube_points(), &Tolerances::default()).expect("hull");
    for face in &hull.faces {
        let pts = hull.face_points(face);
        let area_normal = (pts[1] - pts[0]).cross(&(pts[2] - pts[0]));
        assert!(area_normal.dot(&*face.normal) > 0.0);
    }
}

#[test]
fn flat_input_is_degenerate() {
    let quad = support::flat_quad();
    let result = convex_hull_3d(&quad.vertices, &Tolerances::default());
    assert!(matches!(result, Err(GeometryError::DegenerateInput { .. })));

    let line = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(2.0, 2.0, 2.0),
        Point3::new(3.0, 3.0, 3.0),
    ];
    match convex_hull_3d(&line, &Tolerances::default()) {
        Err(GeometryError::DegenerateInput { reason, .. }) => assert!(reason.contains("collinear")),
        other => panic!("expected degenerate input, got {other:?}"),
    }

    let few = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
    assert!(matches!(
        convex_hull_3d(&few, &Tolerances::default()),
        Err(GeometryError::DegenerateInput { distinct: 2, .. })
    ));
}

#[test]
fn world_hull_normals_survive_non_uniform_scale() {
    let cube = Mesh::cube(1.0);
    let transform = Transform::from_parts(
        Vector3::new(4.0, -2.0, 1.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.6),
        Vector3::new(3.0, 1.0, 0.5),
    );
    let hull = world_hull(&cube, &transform, &Tolerances::default()).expect("world hull");
    assert_eq!(hull.faces.len(), 6);

    for face in &hull.faces {
        assert!(support::approx_eq(face.normal.norm(), 1.0, 1e-9));
        // normals stay perpendicular to the transformed face edges
        for k in 0..face.vertices.len() {
            let edge = face.vertices[(k + 1) % face.vertices.len()] - face.vertices[k];
            assert!(edge.dot(&*face.normal).abs() < 1e-9);
        }
        let c = hull.points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / hull.points.len() as Real;
        assert!(face.normal.dot(&(face.vertices[0].coords - c)) > 0.0);
    }
}

#[test]
fn rigid_transform_rotates_normals_like_vectors() {
    let mesh = Mesh::cuboid(2.0, 1.0, 0.5);
    let transform = Transform::from_parts(
        Vector3::new(-1.0, 3.0, 2.0),
        UnitQuaternion::from_euler_angles(0.3, -0.8, 1.1),
        Vector3::new(1.0, 1.0, 1.0),
    );
    let normal_matrix = transform.normal_matrix().expect("invertible");
    assert!((normal_matrix - transform.linear()).abs().max() < 1e-12);

    let local = convex_hull_3d(&mesh.vertices, &Tolerances::default()).expect("local hull");
    let world = world_hull(&mesh, &transform, &Tolerances::default()).expect("world hull");
    assert_eq!(local.faces.len(), world.faces.len());
    for (l, w) in local.faces.iter().zip(&world.faces) {
        let rotated = transform.transform_vector(&l.normal).normalize();
        assert!((rotated - *w.normal).norm() < 1e-12);
    }
}

#[test]
fn invalid_mesh_is_rejected_before_hulling() {
    let mut mesh = Mesh::cube(1.0);
    mesh.vertices[3].y = Real::NAN;
    assert!(matches!(
        world_hull(&mesh, &Transform::identity(), &Tolerances::default()),
        Err(GeometryError::InvalidCoordinate(_))
    ));

    let mut mesh = Mesh::cube(1.0);
    mesh.faces.push(vec![0, 1, 42]);
    assert!(matches!(
        world_hull(&mesh, &Transform::identity(), &Tolerances::default()),
        Err(GeometryError::InvalidMesh(_))
    ));
}

fn grid_points() -> impl Strategy<Value = Vec<Point2<Real>>> {
    prop::collection::vec((-50i32..50, -50i32..50), 1..40).prop_map(|coords| {
        coords
            .into_iter()
            .map(|(x, y)| Point2::new(x as Real, y as Real))
            .collect()
    })
}

proptest! {
    #[test]
    fn hull_2d_is_convex_and_contains_input(points in grid_points()) {
        let hull = convex_hull_2d(&points);
        prop_assert!(!hull.is_empty());

        if hull.len() >= 3 {
            let n = hull.len();
            for i in 0..n {
                let turn = cross(&hull.points[i], &hull.points[(i + 1) % n], &hull.points[(i + 2) % n]);
                prop_assert!(turn > 0.0, "hull is not strictly convex at {i}");
            }

            let polygon = hull.to_geo();
            prop_assert!(polygon.signed_area() > 0.0);
            for p in &points {
                prop_assert!(polygon.intersects(&geo::Point::new(p.x, p.y)));
            }
        } else {
            // all input lies on the segment between the hull points
            let a = hull.points[0];
            let b = *hull.points.last().unwrap_or(&a);
            for p in &points {
                prop_assert_eq!(cross(&a, &b, p), 0.0);
            }
        }

        for p in &hull.points {
            prop_assert!(points.contains(p));
        }
    }
}
