//! Bucket aggregation.
//!
//! Collects the triangles of every group assigned to a bucket, honoring
//! the reserved bucket 0 for unlinked groups.

use hashbrown::HashSet;

use crate::analyze::GroupResult;
use crate::link::{LinkTable, UNASSIGNED_BUCKET};

/// Collect the flat triangle list of one bucket.
///
/// For [`UNASSIGNED_BUCKET`], the triangle lists of all groups without a
/// link are concatenated in group order. For a non-zero id, the lists of
/// all groups linked to that id are concatenated in link order.
///
/// Links referencing group indices beyond `groups.len()` are skipped. A
/// bucket id with no matching groups yields an empty vector; an empty
/// output mesh is a legitimate, if degenerate, result.
///
/// # Example
///
/// ```
/// use mesh_separate::{collect_bucket_triangles, GroupResult, LinkTable};
///
/// let groups = vec![
///     GroupResult { triangles: vec![0, 1, 2] },
///     GroupResult { triangles: vec![3, 4, 5] },
/// ];
/// let mut links = LinkTable::new();
/// links.set(1, 7);
///
/// assert_eq!(collect_bucket_triangles(0, &groups, &links), vec![0, 1, 2]);
/// assert_eq!(collect_bucket_triangles(7, &groups, &links), vec![3, 4, 5]);
/// assert!(collect_bucket_triangles(9, &groups, &links).is_empty());
/// ```
#[must_use]
pub fn collect_bucket_triangles(
    bucket_id: u32,
    groups: &[GroupResult],
    links: &LinkTable,
) -> Vec<u32> {
    let mut result = Vec::new();

    if bucket_id == UNASSIGNED_BUCKET {
        for (index, group) in groups.iter().enumerate() {
            if links.get(index).is_none() {
                result.extend_from_slice(&group.triangles);
            }
        }
    } else {
        for link in links.iter().filter(|l| l.bucket_id == bucket_id) {
            if let Some(group) = groups.get(link.group_index) {
                result.extend_from_slice(&group.triangles);
            }
        }
    }

    result
}

/// The set of live bucket ids.
///
/// [`UNASSIGNED_BUCKET`] is always first, even when every group is linked.
/// Non-zero ids follow in first-occurrence order of the link list.
#[must_use]
pub fn bucket_ids(links: &LinkTable) -> Vec<u32> {
    let mut ids = vec![UNASSIGNED_BUCKET];
    let mut seen: HashSet<u32> = HashSet::new();
    seen.insert(UNASSIGNED_BUCKET);

    for link in links.iter() {
        if seen.insert(link.bucket_id) {
            ids.push(link.bucket_id);
        }
    }

    ids
}

/// The set of live bucket ids in ascending numeric order.
///
/// Display convenience only; aggregation order is defined by
/// [`bucket_ids`].
#[must_use]
pub fn bucket_ids_sorted(links: &LinkTable) -> Vec<u32> {
    let mut ids = bucket_ids(links);
    ids.sort_unstable();
    ids
}
