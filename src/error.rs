//! Error types for mesh separation operations.

use thiserror::Error;

/// Result type for separation operations.
pub type SeparateResult<T> = Result<T, SeparateError>;

/// Errors that can occur during separation operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeparateError {
    /// The triangle buffer length is not a multiple of 3.
    #[error("triangle buffer length {len} is not a multiple of 3")]
    InvalidTriangleBuffer {
        /// The offending buffer length.
        len: usize,
    },

    /// The UV buffer does not run parallel to the vertex buffer.
    #[error("uv count {uv_count} does not match vertex count {vertex_count}")]
    UvCountMismatch {
        /// Number of UV coordinates.
        uv_count: usize,
        /// Number of vertex positions.
        vertex_count: usize,
    },

    /// A triangle references a vertex index outside the vertex buffer.
    #[error("vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The grouping distance threshold is negative or non-finite.
    #[error("vertex distance {value} must be finite and non-negative")]
    InvalidVertexDistance {
        /// The rejected threshold value.
        value: f64,
    },
}
