//! Config and Default Constants Definitions Module.

pub(crate) const KB: u64 = 1024;
pub(crate) const MB: u64 = 1024 * KB;
pub(crate) const GB: u64 = 1024 * MB;

/// Length of the sequence/type trailer appended to every user key.
pub(crate) const INTERNAL_KEY_TRAILER_LEN: usize = std::mem::size_of::<u64>();

// memtable.
pub(crate) const DEFAULT_WRITE_BUFFER_SIZE: usize = 64 * MB as usize;
pub(crate) const DEFAULT_MAX_WRITE_BUFFER_NUMBER: i32 = 2;
pub(crate) const DEFAULT_MIN_WRITE_BUFFER_NUMBER_TO_MERGE: i32 = 1;
pub(crate) const DEFAULT_INPLACE_UPDATE_NUM_LOCKS: usize = 10000;

// compaction.
pub(crate) const DEFAULT_NUM_LEVELS: i32 = 7;
pub(crate) const DEFAULT_LEVEL0_FILE_NUM_COMPACTION_TRIGGER: i32 = 4;
pub(crate) const DEFAULT_LEVEL0_SLOWDOWN_WRITES_TRIGGER: i32 = 20;
pub(crate) const DEFAULT_LEVEL0_STOP_WRITES_TRIGGER: i32 = 36;
pub(crate) const DEFAULT_TARGET_FILE_SIZE_BASE: u64 = 64 * MB;
pub(crate) const DEFAULT_TARGET_FILE_SIZE_MULTIPLIER: i32 = 1;
pub(crate) const DEFAULT_MAX_BYTES_FOR_LEVEL_BASE: u64 = 256 * MB;
pub(crate) const DEFAULT_MAX_BYTES_FOR_LEVEL_MULTIPLIER: f64 = 10.0;
pub(crate) const DEFAULT_SOFT_PENDING_COMPACTION_BYTES_LIMIT: u64 = 64 * GB;
pub(crate) const DEFAULT_HARD_PENDING_COMPACTION_BYTES_LIMIT: u64 = 256 * GB;

// universal compaction.
pub(crate) const DEFAULT_UNIVERSAL_SIZE_RATIO: u32 = 1;
pub(crate) const DEFAULT_UNIVERSAL_MIN_MERGE_WIDTH: u32 = 2;
pub(crate) const DEFAULT_UNIVERSAL_MAX_SIZE_AMPLIFICATION_PERCENT: u32 = 200;

// fifo compaction.
pub(crate) const DEFAULT_FIFO_MAX_TABLE_FILES_SIZE: u64 = GB;

// iteration.
pub(crate) const DEFAULT_MAX_SEQUENTIAL_SKIP_IN_ITERATIONS: u64 = 8;

// compression.
pub(crate) const DEFAULT_COMPRESSION_WINDOW_BITS: i32 = -14;

// 40 MiB. The upstream default `40 * (1LL < 20)` is a `<`/`<<` typo that yields 40 bytes.
#[cfg(feature = "indirect-values")]
pub(crate) const DEFAULT_VLOGFILE_MAX_SIZE: u64 = 40 * MB;
