//! Buffer optimization and per-bucket mesh generation.
//!
//! Compacts the vertex/UV buffers of a triangle selection so that every
//! output vertex is referenced by at least one triangle.

use hashbrown::HashMap;
use nalgebra::{Point2, Point3};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analyze::GroupResult;
use crate::bucket::{bucket_ids, collect_bucket_triangles};
use crate::error::{SeparateError, SeparateResult};
use crate::link::LinkTable;
use crate::mesh::SourceMesh;

/// A compacted output mesh for one bucket.
///
/// Every vertex is referenced by at least one triangle, and the triangle
/// list has the same length and winding as the selection it was built from.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    /// Texture coordinates, parallel to `positions`.
    pub uvs: Vec<Point2<f64>>,

    /// Flat triangle index buffer into the compacted vertex list.
    pub triangles: Vec<u32>,
}

impl CompactMesh {
    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Compact source buffers down to the vertices a triangle list references.
///
/// Walks `triangles` in order. The first encounter of a source index
/// appends its position and UV to the output and records the remapping;
/// repeat encounters reuse the recorded index. Per-corner geometry and UV
/// are preserved exactly: for every `i`,
/// `out.positions[out.triangles[i]] == positions[triangles[i]]`, and
/// likewise for UVs.
///
/// # Errors
///
/// Returns an error if `uvs` does not run parallel to `positions`, or if
/// any triangle index is out of range.
///
/// # Example
///
/// ```
/// use mesh_separate::optimize_buffers;
/// use nalgebra::{Point2, Point3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(9.0, 9.0, 9.0), // unreferenced
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let uvs = vec![Point2::new(0.0, 0.0); 4];
///
/// let compact = optimize_buffers(&positions, &uvs, &[0, 1, 3]).unwrap();
/// assert_eq!(compact.vertex_count(), 3);
/// assert_eq!(compact.triangles, vec![0, 1, 2]);
/// ```
pub fn optimize_buffers(
    positions: &[Point3<f64>],
    uvs: &[Point2<f64>],
    triangles: &[u32],
) -> SeparateResult<CompactMesh> {
    if uvs.len() != positions.len() {
        return Err(SeparateError::UvCountMismatch {
            uv_count: uvs.len(),
            vertex_count: positions.len(),
        });
    }

    let mut out = CompactMesh::default();
    out.triangles.reserve(triangles.len());

    let mut remap: HashMap<u32, u32> = HashMap::new();

    for &index in triangles {
        if let Some(&mapped) = remap.get(&index) {
            out.triangles.push(mapped);
            continue;
        }

        let at = index as usize;
        if at >= positions.len() {
            return Err(SeparateError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        out.positions.push(positions[at]);
        out.uvs.push(uvs[at]);

        #[allow(clippy::cast_possible_truncation)]
        // Indices are u32 throughout; larger vertex counts are unsupported.
        let mapped = (out.positions.len() - 1) as u32;
        remap.insert(index, mapped);
        out.triangles.push(mapped);
    }

    debug!(
        source_vertices = positions.len(),
        compact_vertices = out.positions.len(),
        triangles = out.triangle_count(),
        "optimized vertex buffers"
    );

    Ok(out)
}

/// Generate the compact mesh for one bucket.
///
/// Chains [`collect_bucket_triangles`] and [`optimize_buffers`]. A bucket
/// with no triangles yields an empty [`CompactMesh`].
///
/// # Errors
///
/// Returns an error if the source buffers are inconsistent (see
/// [`optimize_buffers`]).
pub fn generate_bucket_mesh(
    mesh: &SourceMesh,
    groups: &[GroupResult],
    links: &LinkTable,
    bucket_id: u32,
) -> SeparateResult<CompactMesh> {
    let triangles = collect_bucket_triangles(bucket_id, groups, links);
    optimize_buffers(&mesh.positions, &mesh.uvs, &triangles)
}

/// Generate a compact mesh for every live bucket.
///
/// Buckets are emitted in [`bucket_ids`] order: the reserved bucket 0
/// first, then non-zero ids in first-occurrence order of the link list.
///
/// # Errors
///
/// Returns the first generation error; no partial result is returned.
pub fn generate_all(
    mesh: &SourceMesh,
    groups: &[GroupResult],
    links: &LinkTable,
) -> SeparateResult<Vec<(u32, CompactMesh)>> {
    let ids = bucket_ids(links);
    info!(buckets = ids.len(), "generating separated meshes");

    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        let compact = generate_bucket_mesh(mesh, groups, links, id)?;
        debug!(
            bucket = id,
            vertices = compact.vertex_count(),
            triangles = compact.triangle_count(),
            "bucket mesh generated"
        );
        results.push((id, compact));
    }

    Ok(results)
}

/// Name under which the host stores a bucket's output mesh.
///
/// ```
/// use mesh_separate::separated_mesh_name;
///
/// assert_eq!(separated_mesh_name("Body", 3), "Body_Separated_3");
/// ```
#[must_use]
pub fn separated_mesh_name(source_name: &str, bucket_id: u32) -> String {
    format!("{source_name}_Separated_{bucket_id}")
}
