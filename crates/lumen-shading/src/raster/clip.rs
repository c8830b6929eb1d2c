//! Clip-space polygon clipping against the depth range.
//!
//! D3D clip space keeps `0 <= z <= w`. Triangles are clipped against both
//! planes (Sutherland-Hodgman) and the result fanned back into triangles.

use crate::program::{Interpolate, VertexOutput};

/// A triangle clipped by two planes has at most five vertices.
const MAX_VERTS: usize = 5;

#[derive(Debug, Copy, Clone)]
pub(crate) struct Polygon<V> {
    verts: [VertexOutput<V>; MAX_VERTS],
    len: usize,
}

impl<V: Interpolate> Polygon<V> {
    fn triangle(tri: [VertexOutput<V>; 3]) -> Self {
        Self {
            verts: [tri[0], tri[1], tri[2], tri[2], tri[2]],
            len: 3,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Triangle fan around the first vertex.
    pub(crate) fn fan(&self) -> impl Iterator<Item = [VertexOutput<V>; 3]> + '_ {
        (1..self.len.saturating_sub(1)).map(move |i| [self.verts[0], self.verts[i], self.verts[i + 1]])
    }

    /// Keeps the part of the polygon where `distance >= 0`.
    fn clip_plane(&self, distance: impl Fn(&VertexOutput<V>) -> f32) -> Self {
        let mut out = Self { verts: self.verts, len: 0 };
        for i in 0..self.len {
            let curr = self.verts[i];
            let prev = self.verts[(i + self.len - 1) % self.len];
            let dc = distance(&curr);
            let dp = distance(&prev);

            if (dp >= 0.0) != (dc >= 0.0) {
                let t = dp / (dp - dc);
                out.push(lerp(&prev, &curr, t));
            }
            if dc >= 0.0 {
                out.push(curr);
            }
        }
        out
    }

    #[inline]
    fn push(&mut self, v: VertexOutput<V>) {
        if self.len < MAX_VERTS {
            self.verts[self.len] = v;
            self.len += 1;
        }
    }
}

#[inline]
fn lerp<V: Interpolate>(a: &VertexOutput<V>, b: &VertexOutput<V>, t: f32) -> VertexOutput<V> {
    VertexOutput {
        clip: a.clip + (b.clip - a.clip) * t,
        varyings: V::lerp(&a.varyings, &b.varyings, t),
    }
}

#[inline]
fn inside<V>(v: &VertexOutput<V>) -> bool {
    v.clip.z >= 0.0 && v.clip.z <= v.clip.w
}

/// Clips a triangle to `0 <= z <= w`.
///
/// Returns `None` when nothing survives. A triangle entirely inside is returned
/// unchanged.
pub(crate) fn clip_triangle<V: Interpolate>(tri: [VertexOutput<V>; 3]) -> Option<Polygon<V>> {
    let poly = Polygon::triangle(tri);
    if tri.iter().all(inside) {
        return Some(poly);
    }
    let poly = poly
        .clip_plane(|v| v.clip.z)
        .clip_plane(|v| v.clip.w - v.clip.z);
    (poly.len() >= 3).then_some(poly)
}
