//! Ground surface mesh sampled from a [`HeightField`].
//!
//! A square plane centered on the origin is subdivided into `segments × segments`
//! quads; every vertex is lifted to the field's elevation and normals are derived
//! from the resulting surface so the renderer can shade it directly.

use glam::Vec3;

use crate::heightfield::HeightField;

/// CPU-side ground mesh ready for upload.
#[derive(Clone, Debug)]
pub struct GroundMesh {
    /// Edge length of the square plane in world units.
    pub size: f64,
    /// Quads along each edge.
    pub segments: u32,
    /// Vertex positions, row-major with `segments + 1` vertices per row (x fastest).
    pub positions: Vec<[f32; 3]>,
    /// Unit vertex normals, parallel to `positions`.
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices, two triangles per quad.
    pub indices: Vec<u32>,
}

impl GroundMesh {
    /// Sample `field` over a `size × size` plane with `segments` quads per edge.
    ///
    /// A zero segment count is treated as one.
    pub fn build(field: &HeightField, size: f64, segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments as usize + 1;
        let step = size / f64::from(segments);
        let half = size * 0.5;

        let mut heights = Vec::with_capacity(row * row);
        let mut positions = Vec::with_capacity(row * row);
        for j in 0..row {
            let z = -half + j as f64 * step;
            for i in 0..row {
                let x = -half + i as f64 * step;
                let y = field.height(x, z);
                heights.push(y);
                positions.push([x as f32, y as f32, z as f32]);
            }
        }

        let normals = grid_normals(&heights, row, step);

        let mut indices = Vec::with_capacity(segments as usize * segments as usize * 6);
        for j in 0..segments {
            for i in 0..segments {
                let a = j * (segments + 1) + i;
                let b = a + 1;
                let c = a + segments + 1;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        tracing::debug!(
            segments,
            vertices = positions.len(),
            triangles = indices.len() / 3,
            "built ground mesh"
        );

        Self {
            size,
            segments,
            positions,
            normals,
            indices,
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Smallest and largest vertex elevation.
    pub fn height_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[1]), hi.max(p[1]))
            })
    }
}

/// Central-difference normals over a square height grid (one-sided on the border).
fn grid_normals(heights: &[f64], row: usize, step: f64) -> Vec<[f32; 3]> {
    let at = |i: usize, j: usize| heights[j * row + i];
    let mut normals = Vec::with_capacity(heights.len());
    for j in 0..row {
        for i in 0..row {
            let (il, ir) = (i.saturating_sub(1), (i + 1).min(row - 1));
            let (jd, ju) = (j.saturating_sub(1), (j + 1).min(row - 1));
            let dx = (at(ir, j) - at(il, j)) / ((ir - il) as f64 * step);
            let dz = (at(i, ju) - at(i, jd)) / ((ju - jd) as f64 * step);
            let n = Vec3::new(-dx as f32, 1.0, -dz as f32).normalize();
            normals.push(n.to_array());
        }
    }
    normals
}
