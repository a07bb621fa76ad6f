//! Compaction policy identifiers and style-specific sub-options.

use std::fmt;

use crate::config;

/// How sorted runs are organized and picked for compaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CompactionStyle {
    /// Geometrically growing levels, each with a target file size.
    #[default]
    Level,
    Universal,
    Fifo,
    /// Compaction is only ever triggered manually.
    None,
}

impl CompactionStyle {
    pub fn is_leveled(self) -> bool {
        self == CompactionStyle::Level
    }
}

impl fmt::Display for CompactionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompactionStyle::Level => "kCompactionStyleLevel",
            CompactionStyle::Universal => "kCompactionStyleUniversal",
            CompactionStyle::Fifo => "kCompactionStyleFIFO",
            CompactionStyle::None => "kCompactionStyleNone",
        };
        f.write_str(name)
    }
}

/// Which file of a level the leveled picker prefers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CompactionPri {
    #[default]
    ByCompensatedSize,
    OldestLargestSeqFirst,
    OldestSmallestSeqFirst,
    MinOverlappingRatio,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CompactionStopStyle {
    SimilarSize,
    #[default]
    TotalSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionOptionsUniversal {
    /// Percentage flexibility while comparing file sizes.
    pub size_ratio: u32,
    pub min_merge_width: u32,
    pub max_merge_width: u32,
    pub max_size_amplification_percent: u32,
    /// `None` compresses every output.
    pub compression_size_percent: Option<u32>,
    pub stop_style: CompactionStopStyle,
    pub allow_trivial_move: bool,
}

impl Default for CompactionOptionsUniversal {
    fn default() -> Self {
        Self {
            size_ratio: config::DEFAULT_UNIVERSAL_SIZE_RATIO,
            min_merge_width: config::DEFAULT_UNIVERSAL_MIN_MERGE_WIDTH,
            max_merge_width: u32::MAX,
            max_size_amplification_percent: config::DEFAULT_UNIVERSAL_MAX_SIZE_AMPLIFICATION_PERCENT,
            compression_size_percent: None,
            stop_style: CompactionStopStyle::default(),
            allow_trivial_move: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionOptionsFifo {
    /// Once the total size of table files reaches this, the oldest file is deleted.
    pub max_table_files_size: u64,
    pub allow_compaction: bool,
}

impl Default for CompactionOptionsFifo {
    fn default() -> Self {
        Self {
            max_table_files_size: config::DEFAULT_FIFO_MAX_TABLE_FILES_SIZE,
            allow_compaction: false,
        }
    }
}

/// Access pattern advice given to the OS for compaction input files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AccessHint {
    None,
    #[default]
    Normal,
    Sequential,
    WillNeed,
}
