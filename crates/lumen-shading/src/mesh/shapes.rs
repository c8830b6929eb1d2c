use glam::{Vec2, Vec3};

use super::{Mesh, Vertex};

// Triangles are wound so that `(b - a) x (c - a)` points outward, which reads
// clockwise on screen under a left-handed projection.

impl Mesh {
    /// Axis-aligned cube centred on the origin with 24 vertices (flat normals).
    pub fn cube(size: f32) -> Mesh {
        let s = size * 0.5;
        // (normal, u, v) with u x v == normal.
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let uvs = [
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = vertices.len() as u32;
            for ((cu, cv), uv) in corners.iter().zip(uvs) {
                let p = (n + u * *cu + v * *cv) * s;
                vertices.push(Vertex::new(p, n, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Mesh::new(vertices, indices)
    }

    /// UV sphere centred on the origin.
    ///
    /// `rings` is clamped to at least 2 and `segments` to at least 3.
    pub fn uv_sphere(rings: u32, segments: u32, radius: f32) -> Mesh {
        let rings = rings.max(2);
        let segments = segments.max(3);

        let mut vertices = Vec::with_capacity((rings as usize + 1) * (segments as usize + 1));
        for r in 0..=rings {
            let v = r as f32 / rings as f32;
            let (st, ct) = (v * core::f32::consts::PI).sin_cos();
            for s in 0..=segments {
                let u = s as f32 / segments as f32;
                let (sp, cp) = (u * core::f32::consts::TAU).sin_cos();
                let n = Vec3::new(cp * st, ct, sp * st);
                vertices.push(Vertex::new(n * radius, n, Vec2::new(u, v)));
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
        for r in 0..rings {
            for s in 0..segments {
                let i0 = r * stride + s;
                let i1 = i0 + 1;
                let i2 = i0 + stride;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
            }
        }
        Mesh::new(vertices, indices)
    }
}
