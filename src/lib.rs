//! Connectivity-based mesh parts separation.
//!
//! This crate splits a triangle mesh into disjoint connected groups, lets a
//! host assign those groups to bucket ids, and produces one compact
//! vertex/UV/triangle buffer per bucket. Common use cases include:
//!
//! - Breaking a scanned or imported mesh into its physical parts
//! - Letting an operator regroup parts into export targets
//! - Emitting minimal buffers with no unreferenced vertices
//!
//! # Overview
//!
//! Analysis produces an ordered list of [`GroupResult`]s: two triangles land
//! in the same group when any pair of their vertices lies strictly within a
//! distance threshold, directly or transitively. Group→bucket assignments
//! live in a caller-owned [`LinkTable`]; bucket id 0 is reserved for groups
//! with no link. Generation compacts each bucket's triangles into a
//! [`CompactMesh`].
//!
//! # Quick Start
//!
//! ```
//! use mesh_separate::{analyze, generate_all, AnalyzeConfig, LinkTable, SourceMesh};
//! use nalgebra::{Point2, Point3};
//!
//! let mut mesh = SourceMesh::new();
//! // Two triangles far apart from each other.
//! for x in [0.0, 100.0] {
//!     let base = mesh.vertex_count() as u32;
//!     mesh.push_vertex(Point3::new(x, 0.0, 0.0), Point2::new(0.0, 0.0));
//!     mesh.push_vertex(Point3::new(x + 1.0, 0.0, 0.0), Point2::new(1.0, 0.0));
//!     mesh.push_vertex(Point3::new(x, 1.0, 0.0), Point2::new(0.0, 1.0));
//!     mesh.push_triangle(base, base + 1, base + 2);
//! }
//!
//! let groups = analyze(&mesh, &AnalyzeConfig::default()).unwrap();
//! assert_eq!(groups.len(), 2);
//!
//! // Route the second group into bucket 5; the first stays in bucket 0.
//! let mut links = LinkTable::new();
//! links.set(1, 5);
//!
//! let outputs = generate_all(&mesh, &groups, &links).unwrap();
//! assert_eq!(outputs.len(), 2);
//! assert_eq!(outputs[0].1.vertex_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

mod analyze;
mod bucket;
mod error;
mod link;
mod mesh;
mod optimize;

pub use analyze::{analyze, analyze_with_progress, AnalyzeConfig, GroupResult};
pub use bucket::{bucket_ids, bucket_ids_sorted, collect_bucket_triangles};
pub use error::{SeparateError, SeparateResult};
pub use link::{GroupLink, LinkTable, UNASSIGNED_BUCKET};
pub use mesh::SourceMesh;
pub use optimize::{
    generate_all, generate_bucket_mesh, optimize_buffers, separated_mesh_name, CompactMesh,
};

// Re-export for convenience
pub use nalgebra::{Point2, Point3};
