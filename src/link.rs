//! Group-to-bucket links.
//!
//! Links are owned by the caller (typically an interactive host) and edited
//! freely between analysis runs. The crate only ever reads them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bucket id reserved for groups with no link.
pub const UNASSIGNED_BUCKET: u32 = 0;

/// A single group-to-bucket assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupLink {
    /// Index of the group in the analysis result vector.
    pub group_index: usize,

    /// Target bucket id. Never [`UNASSIGNED_BUCKET`]; a group without a
    /// link implicitly belongs to that bucket.
    pub bucket_id: u32,
}

/// An ordered list of group-to-bucket links.
///
/// Holds at most one link per group index. Link order is preserved and
/// meaningful: it defines the first-occurrence order of bucket ids (see
/// [`bucket_ids`](crate::bucket_ids)) and the aggregation order of non-zero
/// buckets.
///
/// Links referencing group indices beyond the current analysis result are
/// tolerated; aggregation simply skips them. This matches the host model
/// where a re-analysis can invalidate links without eagerly cleaning them.
///
/// # Example
///
/// ```
/// use mesh_separate::LinkTable;
///
/// let mut links = LinkTable::new();
/// links.set(2, 5);
/// assert_eq!(links.bucket_for(2), 5);
/// assert_eq!(links.bucket_for(0), 0); // unassigned
///
/// links.set(2, 0); // assigning bucket 0 removes the link
/// assert!(links.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkTable {
    links: Vec<GroupLink>,
}

impl LinkTable {
    /// Create an empty link table.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Build a table from existing links.
    ///
    /// Links targeting [`UNASSIGNED_BUCKET`] are dropped, and only the
    /// first link per group index is kept.
    #[must_use]
    pub fn from_links(links: impl IntoIterator<Item = GroupLink>) -> Self {
        let mut table = Self::new();
        for link in links {
            if link.bucket_id != UNASSIGNED_BUCKET && table.get(link.group_index).is_none() {
                table.links.push(link);
            }
        }
        table
    }

    /// Assign a group to a bucket.
    ///
    /// Setting [`UNASSIGNED_BUCKET`] removes any existing link for the
    /// group. A non-zero id updates the existing link in place, or appends
    /// a new one at the end of the list.
    pub fn set(&mut self, group_index: usize, bucket_id: u32) {
        if bucket_id == UNASSIGNED_BUCKET {
            self.remove(group_index);
            return;
        }

        if let Some(link) = self
            .links
            .iter_mut()
            .find(|l| l.group_index == group_index)
        {
            link.bucket_id = bucket_id;
        } else {
            self.links.push(GroupLink {
                group_index,
                bucket_id,
            });
        }
    }

    /// Remove the link for a group, if any.
    ///
    /// Returns the removed link.
    pub fn remove(&mut self, group_index: usize) -> Option<GroupLink> {
        let at = self
            .links
            .iter()
            .position(|l| l.group_index == group_index)?;
        Some(self.links.remove(at))
    }

    /// Look up the link for a group.
    #[must_use]
    pub fn get(&self, group_index: usize) -> Option<&GroupLink> {
        self.links.iter().find(|l| l.group_index == group_index)
    }

    /// Bucket id for a group, [`UNASSIGNED_BUCKET`] when unlinked.
    #[inline]
    #[must_use]
    pub fn bucket_for(&self, group_index: usize) -> u32 {
        self.get(group_index)
            .map_or(UNASSIGNED_BUCKET, |l| l.bucket_id)
    }

    /// Iterate over the links in list order.
    pub fn iter(&self) -> impl Iterator<Item = &GroupLink> {
        self.links.iter()
    }

    /// The links as a slice, in list order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[GroupLink] {
        &self.links
    }

    /// Number of links.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check whether the table has no links.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Remove all links.
    pub fn clear(&mut self) {
        self.links.clear();
    }
}
