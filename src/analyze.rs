//! Connectivity analysis.
//!
//! Discovers connected groups of triangles by vertex proximity.

use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SeparateError, SeparateResult};
use crate::mesh::SourceMesh;

/// Configuration for connectivity analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzeConfig {
    /// Whether triangles are grouped by vertex proximity at all.
    /// When disabled, every triangle becomes its own group.
    pub group_by_vertex_distance: bool,

    /// Distance below which two vertices are considered coincident.
    /// The comparison is strict (`d² < threshold²`), so a threshold of
    /// zero never links anything.
    pub vertex_distance: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            group_by_vertex_distance: true,
            vertex_distance: 0.01,
        }
    }
}

impl AnalyzeConfig {
    /// Set the vertex distance threshold.
    #[must_use]
    pub fn with_vertex_distance(mut self, distance: f64) -> Self {
        self.vertex_distance = distance;
        self
    }

    /// Enable or disable distance grouping.
    #[must_use]
    pub fn with_distance_grouping(mut self, enabled: bool) -> Self {
        self.group_by_vertex_distance = enabled;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex distance is negative or non-finite.
    pub fn validate(&self) -> SeparateResult<()> {
        if !self.vertex_distance.is_finite() || self.vertex_distance < 0.0 {
            return Err(SeparateError::InvalidVertexDistance {
                value: self.vertex_distance,
            });
        }
        Ok(())
    }
}

/// One connected group of triangles.
///
/// The triangle list is flat: 3 vertex indices per triangle, in discovery
/// order. A group's identity is its position in the result vector returned
/// by [`analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupResult {
    /// Flat vertex-index triples of the member triangles.
    pub triangles: Vec<u32>,
}

impl GroupResult {
    /// Number of triangles in this group.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Segment a mesh into connected groups.
///
/// Two triangles belong to the same group if any pair of their vertices
/// lies strictly within the configured distance threshold, directly or
/// through a chain of such triangles. Every input triangle lands in exactly
/// one group; groups are emitted in discovery order, and the triangle at
/// buffer position 0 always seeds group 0.
///
/// The result is deterministic for a given mesh and configuration: seeds
/// are taken in ascending triangle order from an immutable copy of the
/// input, and absorbed triangles keep their relative pool order.
///
/// # Errors
///
/// Returns an error if the mesh buffers are malformed (see
/// [`SourceMesh::validate`]) or if the configuration is invalid (see
/// [`AnalyzeConfig::validate`]). No partial result is returned.
///
/// # Example
///
/// ```
/// use mesh_separate::{analyze, AnalyzeConfig, SourceMesh};
/// use nalgebra::{Point2, Point3};
///
/// let mut mesh = SourceMesh::new();
/// // Two triangles sharing one vertex position.
/// mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(2.0, 0.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(2.0, 1.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_triangle(0, 1, 2);
/// mesh.push_triangle(1, 3, 4);
///
/// let groups = analyze(&mesh, &AnalyzeConfig::default()).unwrap();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].triangle_count(), 2);
/// ```
pub fn analyze(mesh: &SourceMesh, config: &AnalyzeConfig) -> SeparateResult<Vec<GroupResult>> {
    analyze_with_progress(mesh, config, |_| {})
}

/// Segment a mesh into connected groups, reporting progress.
///
/// Identical to [`analyze`], but invokes `on_progress` with a value in
/// `[0, 1]` after each group closes. Progress is monotonic non-decreasing
/// and computed as `1 - remaining / initial` over the triangle pool.
///
/// # Errors
///
/// Same as [`analyze`]. The callback is never invoked on the error path.
pub fn analyze_with_progress(
    mesh: &SourceMesh,
    config: &AnalyzeConfig,
    mut on_progress: impl FnMut(f32),
) -> SeparateResult<Vec<GroupResult>> {
    mesh.validate()?;
    config.validate()?;

    let triangles = &mesh.triangles;
    let positions = &mesh.positions;
    let initial = mesh.triangle_count();
    let threshold_sq = config.vertex_distance * config.vertex_distance;

    info!(
        triangles = initial,
        vertex_distance = config.vertex_distance,
        grouping = config.group_by_vertex_distance,
        "analyzing mesh connectivity"
    );

    // Pool of unclaimed triangle ids, kept in original buffer order.
    let mut pool: Vec<u32> = (0..initial as u32).collect();
    let mut groups: Vec<GroupResult> = Vec::new();

    let corner = |tri: u32, j: usize| triangles[tri as usize * 3 + j];

    while !pool.is_empty() {
        // The first unclaimed triangle seeds the next group.
        let mut members: Vec<u32> = vec![pool.remove(0)];

        // Worklist cursor over the group's own growing member list, so
        // transitively connected triangles are absorbed as they appear.
        let mut cursor = 0;
        while cursor < members.len() {
            if config.group_by_vertex_distance {
                let base = members[cursor];
                for base_j in 0..3 {
                    let base_v = positions[corner(base, base_j) as usize];

                    // Scan the pool in order. A matched triangle is removed
                    // in place, so the next entry shifts into the same slot
                    // and the scan index must not advance.
                    let mut i = 0;
                    while i < pool.len() {
                        let candidate = pool[i];
                        let linked = (0..3).any(|j| {
                            let v = positions[corner(candidate, j) as usize];
                            nalgebra::distance_squared(&base_v, &v) < threshold_sq
                        });
                        if linked {
                            members.push(pool.remove(i));
                        } else {
                            i += 1;
                        }
                    }
                }
            }
            cursor += 1;
        }

        let mut flat = Vec::with_capacity(members.len() * 3);
        for &tri in &members {
            let at = tri as usize * 3;
            flat.extend_from_slice(&triangles[at..at + 3]);
        }
        groups.push(GroupResult { triangles: flat });

        #[allow(clippy::cast_precision_loss)]
        let progress = 1.0 - pool.len() as f32 / initial as f32;
        debug!(
            group = groups.len() - 1,
            triangles = members.len(),
            progress,
            "group closed"
        );
        on_progress(progress);
    }

    info!(groups = groups.len(), "analysis complete");
    Ok(groups)
}
