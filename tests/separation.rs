//! End-to-end separation scenarios.
//!
//! Exercises the full pipeline: analysis, link editing, bucket
//! aggregation, and buffer generation.

use approx::assert_relative_eq;
use mesh_separate::{
    analyze, analyze_with_progress, bucket_ids, collect_bucket_triangles, generate_all,
    generate_bucket_mesh, optimize_buffers, separated_mesh_name, AnalyzeConfig, GroupResult,
    LinkTable, SourceMesh,
};
use nalgebra::{Point2, Point3};

/// Append one triangle with its own three vertices.
fn push_soup_triangle(mesh: &mut SourceMesh, corners: [[f64; 3]; 3]) {
    let base = mesh.vertex_count() as u32;
    for (i, c) in corners.iter().enumerate() {
        mesh.push_vertex(
            Point3::new(c[0], c[1], c[2]),
            Point2::new(i as f64 * 0.5, 0.0),
        );
    }
    mesh.push_triangle(base, base + 1, base + 2);
}

/// Two triangles sharing no vertices.
fn disjoint_mesh() -> SourceMesh {
    let mut mesh = SourceMesh::new();
    push_soup_triangle(
        &mut mesh,
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    );
    push_soup_triangle(
        &mut mesh,
        [[5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]],
    );
    mesh
}

/// Three disjoint triangles, analysis yields three singleton groups.
fn three_part_mesh() -> SourceMesh {
    let mut mesh = SourceMesh::new();
    for x in [0.0, 5.0, 10.0] {
        push_soup_triangle(
            &mut mesh,
            [[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]],
        );
    }
    mesh
}

#[test]
fn disjoint_triangles_with_small_threshold() {
    let mesh = disjoint_mesh();
    let config = AnalyzeConfig::default().with_vertex_distance(0.01);

    let groups = analyze(&mesh, &config).expect("analyze");
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.triangle_count() == 1));
}

#[test]
fn shared_vertex_position_merges_triangles() {
    let mut mesh = SourceMesh::new();
    push_soup_triangle(
        &mut mesh,
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    );
    // Second triangle repeats the position (1, 0, 0) under a new index.
    push_soup_triangle(
        &mut mesh,
        [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0]],
    );

    let groups = analyze(&mesh, &AnalyzeConfig::default()).expect("analyze");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].triangles.len(), 6);
    assert_eq!(groups[0].triangle_count(), 2);
}

#[test]
fn quad_optimization_preserves_winding() {
    let mut mesh = SourceMesh::new();
    mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Point2::new(0.0, 0.0));
    mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Point2::new(1.0, 0.0));
    mesh.push_vertex(Point3::new(1.0, 1.0, 0.0), Point2::new(1.0, 1.0));
    mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Point2::new(0.0, 1.0));
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 2, 3);

    let compact = optimize_buffers(&mesh.positions, &mesh.uvs, &mesh.triangles).expect("optimize");

    assert_eq!(compact.vertex_count(), 4);
    assert_eq!(compact.triangles.len(), 6);

    // Winding: each output corner resolves to the same position as the
    // corresponding input corner.
    for (corner, &src) in mesh.triangles.iter().enumerate() {
        let dst = compact.triangles[corner] as usize;
        assert_eq!(compact.positions[dst], mesh.positions[src as usize]);
        assert_eq!(compact.uvs[dst], mesh.uvs[src as usize]);
    }
}

#[test]
fn single_link_over_three_groups() {
    let mesh = three_part_mesh();
    let groups = analyze(&mesh, &AnalyzeConfig::default()).expect("analyze");
    assert_eq!(groups.len(), 3);

    let mut links = LinkTable::new();
    links.set(2, 5);

    // Bucket 0 holds groups 0 and 1; bucket 5 holds group 2.
    let zero = collect_bucket_triangles(0, &groups, &links);
    let five = collect_bucket_triangles(5, &groups, &links);
    assert_eq!(zero.len(), 6);
    assert_eq!(five.len(), 3);
    assert_eq!(five, groups[2].triangles);

    assert_eq!(bucket_ids(&links), vec![0, 5]);
}

#[test]
fn full_pipeline_generates_compact_buckets() {
    let mesh = three_part_mesh();
    let groups = analyze(&mesh, &AnalyzeConfig::default()).expect("analyze");

    let mut links = LinkTable::new();
    links.set(0, 2);
    links.set(2, 2);

    let outputs = generate_all(&mesh, &groups, &links).expect("generate");
    assert_eq!(outputs.len(), 2);

    // Bucket 0: group 1 only.
    let (id0, bucket0) = &outputs[0];
    assert_eq!(*id0, 0);
    assert_eq!(bucket0.triangle_count(), 1);
    assert_eq!(bucket0.vertex_count(), 3);

    // Bucket 2: groups 0 and 2, compacted independently.
    let (id2, bucket2) = &outputs[1];
    assert_eq!(*id2, 2);
    assert_eq!(bucket2.triangle_count(), 2);
    assert_eq!(bucket2.vertex_count(), 6);

    // Compact buffers index only their own vertices.
    for &i in &bucket2.triangles {
        assert!((i as usize) < bucket2.vertex_count());
    }
}

#[test]
fn relinking_after_reanalysis_ignores_stale_links() {
    let mesh = three_part_mesh();
    let groups = analyze(&mesh, &AnalyzeConfig::default()).expect("analyze");

    let mut links = LinkTable::new();
    links.set(7, 4); // stale: no group 7 exists

    let bucket = generate_bucket_mesh(&mesh, &groups, &links, 4).expect("generate");
    assert!(bucket.triangles.is_empty());

    // All triangles still reachable through bucket 0.
    let zero = collect_bucket_triangles(0, &groups, &links);
    assert_eq!(zero.len(), mesh.triangles.len());
}

#[test]
fn progress_reaches_one_on_multi_group_mesh() {
    let mesh = three_part_mesh();
    let mut last = 0.0f32;
    let groups = analyze_with_progress(&mesh, &AnalyzeConfig::default(), |p| {
        assert!(p >= last);
        last = p;
    })
    .expect("analyze");

    assert_eq!(groups.len(), 3);
    assert_relative_eq!(last, 1.0);
}

#[test]
fn bucket_meshes_are_named_after_source() {
    assert_eq!(separated_mesh_name("Chair", 2), "Chair_Separated_2");
    assert_eq!(separated_mesh_name("Chair", 0), "Chair_Separated_0");
}

#[test]
fn manual_groups_round_trip_through_buckets() {
    // Aggregation works on any group list, not only freshly analyzed ones.
    let mesh = three_part_mesh();
    let groups = vec![
        GroupResult {
            triangles: mesh.triangles[0..6].to_vec(),
        },
        GroupResult {
            triangles: mesh.triangles[6..9].to_vec(),
        },
    ];

    let links = LinkTable::new();
    let compact = generate_bucket_mesh(&mesh, &groups, &links, 0).expect("generate");
    assert_eq!(compact.triangle_count(), 3);
    assert_eq!(compact.vertex_count(), 9);
}
