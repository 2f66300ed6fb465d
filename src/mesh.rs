//! Source mesh buffers.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SeparateError, SeparateResult};

/// Input buffers for a separation run.
///
/// Positions and UVs are parallel arrays indexed `0..vertex_count`. The
/// triangle buffer is flat: every 3 consecutive entries form one triangle
/// referencing 3 vertex indices. Triangle winding is preserved through all
/// operations in this crate.
///
/// # Example
///
/// ```
/// use mesh_separate::SourceMesh;
/// use nalgebra::{Point2, Point3};
///
/// let mut mesh = SourceMesh::new();
/// mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Point2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Point2::new(1.0, 0.0));
/// mesh.push_vertex(Point3::new(0.5, 1.0, 0.0), Point2::new(0.5, 1.0));
/// mesh.push_triangle(0, 1, 2);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    /// Texture coordinates (UV0), parallel to `positions`.
    pub uvs: Vec<Point2<f64>>,

    /// Flat triangle index buffer, 3 entries per triangle.
    pub triangles: Vec<u32>,
}

impl SourceMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            uvs: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Create a mesh from existing buffers, validating them.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers violate any invariant checked by
    /// [`validate`](Self::validate).
    pub fn from_parts(
        positions: Vec<Point3<f64>>,
        uvs: Vec<Point2<f64>>,
        triangles: Vec<u32>,
    ) -> SeparateResult<Self> {
        let mesh = Self {
            positions,
            uvs,
            triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Append a vertex with its texture coordinate.
    #[inline]
    pub fn push_vertex(&mut self, position: Point3<f64>, uv: Point2<f64>) {
        self.positions.push(position);
        self.uvs.push(uv);
    }

    /// Append one triangle.
    #[inline]
    pub fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.extend_from_slice(&[i0, i1, i2]);
    }

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

    /// Check whether the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Validate buffer invariants.
    ///
    /// Checks that the triangle buffer length is a multiple of 3, that the
    /// UV buffer runs parallel to the vertex buffer, and that every triangle
    /// index is in range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in the order listed above.
    pub fn validate(&self) -> SeparateResult<()> {
        if self.triangles.len() % 3 != 0 {
            return Err(SeparateError::InvalidTriangleBuffer {
                len: self.triangles.len(),
            });
        }

        if self.uvs.len() != self.positions.len() {
            return Err(SeparateError::UvCountMismatch {
                uv_count: self.uvs.len(),
                vertex_count: self.positions.len(),
            });
        }

        let vertex_count = self.positions.len();
        for &index in &self.triangles {
            if index as usize >= vertex_count {
                return Err(SeparateError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}
