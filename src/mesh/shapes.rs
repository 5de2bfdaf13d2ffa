//! Primitive meshes, mostly useful as fitting fixtures.

use super::Mesh;
use crate::float_types::{PI, Real, TAU};
use nalgebra::Point3;

impl Mesh {
    /// Axis-aligned box spanning `[0, width] × [0, length] × [0, height]`.
    pub fn cuboid(width: Real, length: Real, height: Real) -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),         // 0: origin
            Point3::new(width, 0.0, 0.0),       // 1: +X
            Point3::new(width, length, 0.0),    // 2: +X+Y
            Point3::new(0.0, length, 0.0),      // 3: +Y
            Point3::new(0.0, 0.0, height),      // 4: +Z
            Point3::new(width, 0.0, height),    // 5: +X+Z
            Point3::new(width, length, height), // 6: +X+Y+Z
            Point3::new(0.0, length, height),   // 7: +Y+Z
        ];

        // CCW from outside
        let faces = vec![
            vec![0, 3, 2, 1], // Bottom face
            vec![4, 5, 6, 7], // Top face
            vec![0, 1, 5, 4], // Front face
            vec![3, 7, 6, 2], // Back face
            vec![0, 4, 7, 3], // Left face
            vec![1, 2, 6, 5], // Right face
        ];

        Mesh::from_parts(vertices, faces)
    }

    pub fn cube(width: Real) -> Mesh {
        Self::cuboid(width, width, width)
    }

    /// Regular tetrahedron with edge length `edge`, one face resting on z = 0.
    pub fn tetrahedron(edge: Real) -> Mesh {
        let h_tri = edge * (3.0 as Real).sqrt() / 2.0;
        let height = edge * (2.0 as Real / 3.0).sqrt();
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(edge, 0.0, 0.0),
            Point3::new(edge / 2.0, h_tri, 0.0),
            Point3::new(edge / 2.0, h_tri / 3.0, height),
        ];
        let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
        Mesh::from_parts(vertices, faces)
    }

    /// UV sphere centred on the origin with poles on ±Z.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> Mesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let mut vertices = vec![Point3::new(0.0, 0.0, radius)];
        for stack in 1..stacks {
            let phi = PI * stack as Real / stacks as Real;
            for seg in 0..segments {
                let theta = TAU * seg as Real / segments as Real;
                vertices.push(Point3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                ));
            }
        }
        let south = vertices.len();
        vertices.push(Point3::new(0.0, 0.0, -radius));

        let ring = |stack: usize, seg: usize| 1 + (stack - 1) * segments + seg % segments;

        let mut faces = Vec::new();
        for seg in 0..segments {
            faces.push(vec![0, ring(1, seg), ring(1, seg + 1)]);
        }
        for stack in 1..stacks - 1 {
            for seg in 0..segments {
                faces.push(vec![
                    ring(stack, seg),
                    ring(stack + 1, seg),
                    ring(stack + 1, seg + 1),
                    ring(stack, seg + 1),
                ]);
            }
        }
        for seg in 0..segments {
            faces.push(vec![south, ring(stacks - 1, seg + 1), ring(stacks - 1, seg)]);
        }

        Mesh::from_parts(vertices, faces)
    }
}
