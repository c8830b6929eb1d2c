use core::ops::AddAssign;

use glam::{Vec2, Vec3};

use crate::error::ShadingError;
use crate::math::Viewport;
use crate::mesh::Mesh;
use crate::program::{Interpolate, ShaderResources, ShadingProgram, VertexInput, VertexOutput};

use super::RenderTarget;
use super::clip::clip_triangle;

/// Which window-space winding to discard.
///
/// Front faces are those with positive window-space area, which is what
/// outward-wound meshes produce under a left-handed projection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CullMode {
    #[default]
    None,
    Front,
    Back,
}

/// Fixed-function state for one draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RasterState {
    pub cull_mode: CullMode,
    pub depth_test: bool,
    pub depth_write: bool,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::None,
            depth_test: true,
            depth_write: true,
        }
    }
}

/// One draw: program, its bound state and the geometry.
pub struct DrawCall<'a, P: ShadingProgram> {
    pub program: &'a P,
    pub constants: &'a P::Constants,
    pub resources: ShaderResources<'a>,
    pub mesh: &'a Mesh,
    pub instance_count: u32,
}

impl<'a, P: ShadingProgram> DrawCall<'a, P> {
    pub fn new(program: &'a P, constants: &'a P::Constants, mesh: &'a Mesh) -> Self {
        Self {
            program,
            constants,
            resources: ShaderResources::default(),
            mesh,
            instance_count: 1,
        }
    }

    pub fn with_resources(mut self, resources: ShaderResources<'a>) -> Self {
        self.resources = resources;
        self
    }

    pub fn instanced(mut self, instance_count: u32) -> Self {
        self.instance_count = instance_count;
        self
    }
}

/// Counters gathered while executing a draw.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub instances: u32,
    /// Triangles submitted, summed over instances.
    pub triangles: usize,
    /// Triangles discarded entirely by depth-range clipping.
    pub clipped: usize,
    /// Triangles discarded by culling or zero area.
    pub culled: usize,
    pub pixels_shaded: usize,
    pub depth_rejected: usize,
}

/// Accumulates the counters of several draws into one frame total.
impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.instances += other.instances;
        self.triangles += other.triangles;
        self.clipped += other.clipped;
        self.culled += other.culled;
        self.pixels_shaded += other.pixels_shaded;
        self.depth_rejected += other.depth_rejected;
    }
}

/// Single-threaded triangle rasterizer.
#[derive(Debug, Copy, Clone, Default)]
pub struct Rasterizer {
    pub state: RasterState,
}

/// Window-space vertex ready for scan conversion.
#[derive(Debug, Copy, Clone)]
struct ScreenVertex<V> {
    pos: Vec3,
    inv_w: f32,
    varyings: V,
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Top-left fill rule for positive-area triangles in y-down window space.
#[inline]
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    (d.y == 0.0 && d.x > 0.0) || d.y < 0.0
}

/// Rescales screen-space barycentrics by `1/w` so attributes interpolate
/// linearly in clip space.
#[inline]
fn perspective_weights(b: [f32; 3], inv_w: [f32; 3]) -> [f32; 3] {
    let pw = [b[0] * inv_w[0], b[1] * inv_w[1], b[2] * inv_w[2]];
    let sum = pw[0] + pw[1] + pw[2];
    [pw[0] / sum, pw[1] / sum, pw[2] / sum]
}

#[inline]
fn covers(w: f32, top_left: bool) -> bool {
    w > 0.0 || (w == 0.0 && top_left)
}

impl Rasterizer {
    pub fn new(state: RasterState) -> Self {
        Self { state }
    }

    /// Executes `call` into `target`.
    ///
    /// Validates stage linkage, the mesh and the bound resources up front.
    /// A pixel-stage error aborts the draw; pixels already written stay.
    pub fn draw<P: ShadingProgram>(
        &self,
        target: &mut RenderTarget,
        call: DrawCall<'_, P>,
    ) -> Result<DrawStats, ShadingError> {
        let signature = call.program.signature();
        signature.validate()?;
        call.mesh.validate()?;
        call.resources.check(signature)?;

        if call.instance_count > 1 && !signature.uses_instance_id {
            log::debug!(
                "{}: {} instances of a program that ignores the instance id",
                signature.label,
                call.instance_count
            );
        }

        let viewport = target.viewport();
        let mut stats = DrawStats::default();
        let mut outputs: Vec<VertexOutput<P::Varyings>> = Vec::with_capacity(call.mesh.vertices.len());

        for instance_id in 0..call.instance_count {
            outputs.clear();
            outputs.extend(call.mesh.vertices.iter().map(|vertex| {
                call.program
                    .vertex(call.constants, &VertexInput::from_vertex(vertex, instance_id))
            }));

            for [i0, i1, i2] in call.mesh.triangles() {
                stats.triangles += 1;
                let tri = [outputs[i0 as usize], outputs[i1 as usize], outputs[i2 as usize]];
                let Some(poly) = clip_triangle(tri) else {
                    stats.clipped += 1;
                    continue;
                };
                for piece in poly.fan() {
                    self.fill(target, viewport, &call, piece, &mut stats)?;
                }
            }
            stats.instances += 1;
            log::trace!("{}: instance {instance_id} done", signature.label);
        }

        log::debug!("{}: {stats:?}", signature.label);
        Ok(stats)
    }

    fn fill<P: ShadingProgram>(
        &self,
        target: &mut RenderTarget,
        viewport: Viewport,
        call: &DrawCall<'_, P>,
        tri: [VertexOutput<P::Varyings>; 3],
        stats: &mut DrawStats,
    ) -> Result<(), ShadingError> {
        if tri.iter().any(|v| v.clip.w <= 0.0) {
            stats.clipped += 1;
            return Ok(());
        }
        let [v0, mut v1, mut v2] = tri.map(|v| ScreenVertex {
            pos: viewport.clip_to_window(v.clip),
            inv_w: 1.0 / v.clip.w,
            varyings: v.varyings,
        });

        let area = edge(v0.pos.truncate(), v1.pos.truncate(), v2.pos.truncate());
        let culled = match self.state.cull_mode {
            CullMode::None => false,
            CullMode::Front => area > 0.0,
            CullMode::Back => area < 0.0,
        };
        if culled || area == 0.0 || !area.is_finite() {
            stats.culled += 1;
            return Ok(());
        }
        // Scan conversion below assumes positive area.
        if area < 0.0 {
            core::mem::swap(&mut v1, &mut v2);
        }
        let area = area.abs();
        let (p0, p1, p2) = (v0.pos.truncate(), v1.pos.truncate(), v2.pos.truncate());
        let top_left = [is_top_left(p1, p2), is_top_left(p2, p0), is_top_left(p0, p1)];

        let width = target.width() as f32;
        let height = target.height() as f32;
        let min = p0.min(p1).min(p2).floor().max(Vec2::ZERO);
        let max = p0.max(p1).max(p2).ceil().min(Vec2::new(width, height));
        if min.x >= max.x || min.y >= max.y {
            return Ok(());
        }

        let inv_area = 1.0 / area;
        for y in min.y as u32..max.y as u32 {
            for x in min.x as u32..max.x as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let e = [edge(p1, p2, p), edge(p2, p0, p), edge(p0, p1, p)];
                if !(0..3).all(|i| covers(e[i], top_left[i])) {
                    continue;
                }
                let b = [e[0] * inv_area, e[1] * inv_area, e[2] * inv_area];

                // Window z is affine in screen space.
                let z = b[0] * v0.pos.z + b[1] * v1.pos.z + b[2] * v2.pos.z;
                if self.state.depth_test && (z.is_nan() || z >= target.depth_at(x, y)) {
                    stats.depth_rejected += 1;
                    continue;
                }

                let w = perspective_weights(b, [v0.inv_w, v1.inv_w, v2.inv_w]);
                let varyings = Interpolate::blend(&v0.varyings, &v1.varyings, &v2.varyings, w);
                let index = target.index(x, y);

                let color = call.program.pixel(call.constants, &call.resources, &varyings)?;
                target.color_mut()[index] = color;
                if self.state.depth_write {
                    target.depth_mut()[index] = z;
                }
                stats.pixels_shaded += 1;
            }
        }
        Ok(())
    }
}
