//! Extension hooks a column family is configured with.
//!
//! Every hook is shared through an `Arc`, so a handle stays valid for as long
//! as any options set that refers to it is alive.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::config;

/// Total order over user keys.
pub trait Comparator: Debug + Send + Sync {
    /// Identifies the ordering; persisted so a reopen with a different order is refused.
    fn name(&self) -> &str;

    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// Lexicographic byte-wise ordering.
#[derive(Debug, Default, Copy, Clone)]
pub struct BytewiseComparator;

impl Comparator for BytewiseComparator {
    fn name(&self) -> &str {
        "leveldb.BytewiseComparator"
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

/// Orders internal keys: user key ascending, then the packed
/// `(sequence << 8 | type)` trailer descending, so newer entries sort first.
#[derive(Debug, Clone)]
pub struct InternalKeyComparator {
    user_comparator: Arc<dyn Comparator>,
}

impl InternalKeyComparator {
    pub fn new(user_comparator: Arc<dyn Comparator>) -> Self {
        Self { user_comparator }
    }

    pub fn user_comparator(&self) -> &dyn Comparator {
        self.user_comparator.as_ref()
    }

    pub fn name(&self) -> &str {
        "rocksdb.InternalKeyComparator"
    }

    /// # Panics
    ///
    /// Panics if either key is shorter than the 8 byte trailer.
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let (a_user, a_trailer) = split_internal_key(a);
        let (b_user, b_trailer) = split_internal_key(b);

        self.user_comparator
            .compare(a_user, b_user)
            .then_with(|| b_trailer.cmp(&a_trailer))
    }
}

fn split_internal_key(key: &[u8]) -> (&[u8], u64) {
    assert!(
        key.len() >= config::INTERNAL_KEY_TRAILER_LEN,
        "internal key of {} bytes has no trailer",
        key.len()
    );

    let (user_key, trailer) = key.split_at(key.len() - config::INTERNAL_KEY_TRAILER_LEN);
    let mut buf = [0u8; config::INTERNAL_KEY_TRAILER_LEN];
    buf.copy_from_slice(trailer);

    (user_key, u64::from_le_bytes(buf))
}

/// Maps a key to the prefix used by prefix bloom filters and hash indexes.
pub trait SliceTransform: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn transform<'a>(&self, key: &'a [u8]) -> &'a [u8];

    fn in_domain(&self, key: &[u8]) -> bool;
}

pub trait MergeOperator: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Folds `operands` (oldest first) onto `existing_value`.
    /// `None` signals corruption of the merge input.
    fn full_merge(
        &self,
        key: &[u8],
        existing_value: Option<&[u8]>,
        operands: &[&[u8]],
    ) -> Option<Vec<u8>>;
}

pub trait CompactionFilter: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Return `true` to drop the entry from the compaction output.
    fn filter(&self, level: i32, key: &[u8], existing_value: &[u8]) -> bool;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct CompactionFilterContext {
    pub is_full_compaction: bool,
    pub is_manual_compaction: bool,
}

pub trait CompactionFilterFactory: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn create_compaction_filter(
        &self,
        context: &CompactionFilterContext,
    ) -> Box<dyn CompactionFilter>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Failed,
    UpdatedInplace,
    Updated,
}

/// In-place update callback: may rewrite `existing_value` directly, or
/// produce a fresh value in `merged_value`.
pub type InplaceCallback =
    fn(existing_value: &mut Vec<u8>, delta_value: &[u8], merged_value: &mut Vec<u8>) -> UpdateStatus;
