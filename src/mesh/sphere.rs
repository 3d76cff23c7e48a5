//! UV sphere tessellation.
//!
//! Vertices are laid out ring by ring (top to bottom), `width_segments`
//! vertices per ring, followed by the top pole and then the bottom pole.
//! Azimuth runs over the closed interval `[0, 2π]`, so the last vertex of a
//! ring sits on top of the first one; the index topology never wraps from
//! the last longitude back to the first.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Positions, normals and triangle indices of a unit sphere centered at the
/// origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl SphereMesh {
    /// Tessellate a unit sphere into `width_segments` longitude divisions and
    /// `height_segments` latitude divisions.
    ///
    /// Sensible results need both counts to be at least 3. Smaller values
    /// are accepted and yield degenerate geometry: with fewer than 3 height
    /// segments only the two poles are emitted, with fewer than 2 width
    /// segments no triangles are emitted. Indices always stay in range.
    ///
    /// The vertex count must fit in a `u32` index (see
    /// [`fits_u32_indices`](Self::fits_u32_indices)); use
    /// [`try_generate`](Self::try_generate) for untrusted sizes.
    #[must_use]
    pub fn generate(width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments;
        let rows = height_segments.saturating_sub(2);

        let vertex_count = (rows as usize) * (w as usize) + 2;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        let lat_steps = height_segments.saturating_sub(1).max(1) as f32;
        let lon_steps = w.saturating_sub(1).max(1) as f32;

        for j in 1..=rows {
            let theta = j as f32 / lat_steps * PI;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for i in 0..w {
                let phi = i as f32 / lon_steps * TAU;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let p = Vec3::new(
                    sin_theta * cos_phi,
                    cos_theta,
                    -sin_theta * sin_phi,
                );
                positions.push(p);
                normals.push(p.normalize());
            }
        }

        positions.push(Vec3::Y);
        normals.push(Vec3::Y);
        positions.push(Vec3::NEG_Y);
        normals.push(Vec3::NEG_Y);

        let indices = build_indices(w, rows);

        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Like [`generate`](Self::generate), but returns `None` instead of
    /// building a mesh whose vertices cannot all be addressed by `u32`
    /// indices. Nothing is allocated in that case.
    #[must_use]
    pub fn try_generate(
        width_segments: u32,
        height_segments: u32,
    ) -> Option<Self> {
        Self::fits_u32_indices(width_segments, height_segments)
            .then(|| Self::generate(width_segments, height_segments))
    }

    /// Whether every vertex of a `width_segments` x `height_segments`
    /// sphere, poles included, has a `u32` index.
    #[must_use]
    pub fn fits_u32_indices(width_segments: u32, height_segments: u32) -> bool {
        let rows = u64::from(height_segments.saturating_sub(2));
        rows * u64::from(width_segments) + 2 <= u64::from(u32::MAX)
    }

    /// Unit-length vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals, parallel to [`positions`](Self::positions).
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle list indices into the vertex arrays.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index of the `(0, 1, 0)` pole vertex.
    #[must_use]
    pub fn top_pole_index(&self) -> u32 {
        (self.positions.len() - 2) as u32
    }

    /// Index of the `(0, -1, 0)` pole vertex.
    #[must_use]
    pub fn bottom_pole_index(&self) -> u32 {
        (self.positions.len() - 1) as u32
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Side walls between adjacent rings, then the top and bottom pole fans.
fn build_indices(w: u32, rows: u32) -> Vec<u32> {
    let quads =
        rows.saturating_sub(1) as usize * w.saturating_sub(1) as usize;
    let fans = if rows > 0 {
        2 * w.saturating_sub(1) as usize
    } else {
        0
    };
    let mut indices = Vec::with_capacity((quads * 2 + fans) * 3);

    for j in 0..rows.saturating_sub(1) {
        let base = j * w;
        let next = (j + 1) * w;
        for i in 0..w.saturating_sub(1) {
            indices.extend_from_slice(&[
                base + i,
                next + i + 1,
                base + i + 1,
            ]);
            indices.extend_from_slice(&[base + i, next + i, next + i + 1]);
        }
    }

    // Without rings there is nothing for the poles to fan out to.
    if rows == 0 {
        return indices;
    }

    let top = rows * w;
    for i in 0..w.saturating_sub(1) {
        indices.extend_from_slice(&[top, i, i + 1]);
    }

    let bottom = top + 1;
    let row_start = (rows - 1) * w;
    for i in 0..w.saturating_sub(1) {
        indices.extend_from_slice(&[
            bottom,
            row_start + i + 1,
            row_start + i,
        ]);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &SphereMesh) {
        let n = mesh.vertex_count() as u32;
        assert_eq!(mesh.indices().len() % 3, 0);
        for &idx in mesh.indices() {
            assert!(idx < n, "index {idx} out of range for {n} vertices");
        }
    }

    #[test]
    fn default_tessellation_counts() {
        let mesh = SphereMesh::generate(32, 16);
        assert_eq!(mesh.positions().len(), 14 * 32 + 2);
        assert_eq!(mesh.normals().len(), 450);

        // 13 ring gaps * 31 quads * 2 + two fans of 31
        assert_eq!(mesh.triangle_count(), 806 + 62);
        assert_eq!(mesh.indices().len(), 2604);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn small_sphere_stays_in_range() {
        let mesh = SphereMesh::generate(4, 4);
        assert_eq!(mesh.vertex_count(), 10);
        assert!(mesh.indices().iter().all(|&i| i <= 9));
        // one ring gap of 3 quads plus two fans of 3
        assert_eq!(mesh.triangle_count(), 6 + 6);
    }

    #[test]
    fn vertex_count_formula() {
        for (w, h) in [(3, 3), (5, 7), (12, 9), (64, 32)] {
            let mesh = SphereMesh::generate(w, h);
            let expected = ((h - 2) * w + 2) as usize;
            assert_eq!(mesh.positions().len(), expected, "w={w} h={h}");
            assert_eq!(mesh.normals().len(), expected, "w={w} h={h}");
            assert_indices_in_range(&mesh);
        }
    }

    #[test]
    fn positions_are_unit_length_and_match_normals() {
        let mesh = SphereMesh::generate(32, 16);
        for (k, (p, n)) in
            mesh.positions().iter().zip(mesh.normals()).enumerate()
        {
            assert!(
                (p.length() - 1.0).abs() < 1e-5,
                "vertex {k}: length {}",
                p.length()
            );
            assert!(
                (*p - *n).length() < 1e-5,
                "vertex {k}: normal {n} != position {p}"
            );
        }
    }

    #[test]
    fn poles_sit_after_the_rings() {
        let (w, h) = (32, 16);
        let mesh = SphereMesh::generate(w, h);
        let top = ((h - 2) * w) as usize;

        assert_eq!(mesh.top_pole_index() as usize, top);
        assert_eq!(mesh.bottom_pole_index() as usize, top + 1);
        assert_eq!(mesh.positions()[top], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.positions()[top + 1], Vec3::new(0.0, -1.0, 0.0));

        let tops = mesh.positions().iter().filter(|&&p| p == Vec3::Y).count();
        let bottoms =
            mesh.positions().iter().filter(|&&p| p == Vec3::NEG_Y).count();
        assert_eq!((tops, bottoms), (1, 1));
    }

    #[test]
    fn triangles_face_outward() {
        for (w, h) in [(32, 16), (6, 5), (4, 4)] {
            let mesh = SphereMesh::generate(w, h);
            let p = mesh.positions();
            for [a, b, c] in mesh.triangles() {
                let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
                let facing = (b - a).cross(c - a).dot(a);
                assert!(
                    facing > 0.0,
                    "w={w} h={h}: inward triangle {a} {b} {c}"
                );
            }
        }
    }

    #[test]
    fn pole_fans_use_the_outer_rings() {
        let (w, h) = (8, 6);
        let mesh = SphereMesh::generate(w, h);
        let top = mesh.top_pole_index();
        let bottom = mesh.bottom_pole_index();
        let last_ring = (h - 3) * w..(h - 2) * w;

        for [a, b, c] in mesh.triangles() {
            if a == top {
                assert!(b < w && c < w);
                assert_eq!(c, b + 1);
            }
            if a == bottom {
                assert!(last_ring.contains(&b) && last_ring.contains(&c));
                assert_eq!(b, c + 1);
            }
        }
    }

    #[test]
    fn seam_is_not_wrapped() {
        let w = 16;
        let mesh = SphereMesh::generate(w, 8);
        let poles = mesh.top_pole_index();
        let wraps = mesh.triangles().any(|t| {
            let columns: Vec<u32> =
                t.iter().filter(|&&i| i < poles).map(|&i| i % w).collect();
            columns.contains(&0) && columns.contains(&(w - 1))
        });
        assert!(!wraps);

        // Azimuth covers [0, 2π], so the seam still closes geometrically.
        let p = mesh.positions();
        for ring in 0..6 {
            let first = p[(ring * w) as usize];
            let last = p[(ring * w + w - 1) as usize];
            assert!((first - last).length() < 1e-5, "ring {ring}");
        }
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        for (w, h) in [(0, 0), (1, 1), (2, 2), (0, 8), (8, 0), (1, 5), (2, 3)]
        {
            let mesh = SphereMesh::generate(w, h);
            assert_eq!(mesh.positions().len(), mesh.normals().len());
            assert!(mesh.vertex_count() >= 2);
            assert_indices_in_range(&mesh);
        }

        let poles_only = SphereMesh::generate(32, 2);
        assert_eq!(poles_only.vertex_count(), 2);
        assert!(poles_only.indices().is_empty());
    }

    #[test]
    fn oversized_tessellation_is_refused() {
        assert!(SphereMesh::fits_u32_indices(32, 16));
        assert!(SphereMesh::fits_u32_indices(u32::MAX, 2));
        assert!(!SphereMesh::fits_u32_indices(u32::MAX, u32::MAX));
        assert!(!SphereMesh::fits_u32_indices(65_536, 65_538));

        assert!(SphereMesh::try_generate(u32::MAX, u32::MAX).is_none());
        assert!(SphereMesh::try_generate(70_000, 70_000).is_none());
        assert_eq!(
            SphereMesh::try_generate(32, 16),
            Some(SphereMesh::generate(32, 16))
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let a = SphereMesh::generate(32, 16);
        let b = SphereMesh::generate(32, 16);
        let bits = |m: &SphereMesh| -> Vec<u32> {
            m.positions()
                .iter()
                .chain(m.normals())
                .flat_map(|v| v.to_array().map(f32::to_bits))
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(a.indices(), b.indices());
    }
}
