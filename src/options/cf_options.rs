use std::sync::Arc;

use crate::compaction::{
    CompactionOptionsFifo, CompactionOptionsUniversal, CompactionPri, CompactionStyle,
};
use crate::compression::{CompressionOptions, CompressionType};
use crate::config;
use crate::hooks::{
    BytewiseComparator, CompactionFilter, CompactionFilterFactory, Comparator, InplaceCallback,
    MergeOperator, SliceTransform,
};
#[cfg(feature = "indirect-values")]
use crate::indirect::IndirectValueOptions;
use crate::resources::{
    BlockBasedTableFactory, MemTableRepFactory, SkipListFactory, TableFactory,
    TablePropertiesCollectorFactory,
};

/// Every setting of a single column family, fixed and tunable alike.
#[derive(Debug, Clone)]
pub struct ColumnFamilyOptions {
    // identity and hooks.
    pub comparator: Arc<dyn Comparator>,
    pub merge_operator: Option<Arc<dyn MergeOperator>>,
    pub compaction_filter: Option<Arc<dyn CompactionFilter>>,
    pub compaction_filter_factory: Option<Arc<dyn CompactionFilterFactory>>,
    pub prefix_extractor: Option<Arc<dyn SliceTransform>>,
    pub memtable_insert_with_hint_prefix_extractor: Option<Arc<dyn SliceTransform>>,
    pub inplace_callback: Option<InplaceCallback>,

    // memtable.
    pub write_buffer_size: usize,
    pub max_write_buffer_number: i32,
    pub min_write_buffer_number_to_merge: i32,
    pub max_write_buffer_number_to_maintain: i32,
    pub arena_block_size: usize,
    pub memtable_prefix_bloom_size_ratio: f64,
    pub memtable_huge_page_size: usize,
    pub max_successive_merges: usize,
    pub inplace_update_support: bool,
    pub inplace_update_num_locks: usize,
    pub memtable_factory: Arc<dyn MemTableRepFactory>,

    // compaction.
    pub compaction_style: CompactionStyle,
    pub compaction_pri: CompactionPri,
    pub compaction_options_universal: CompactionOptionsUniversal,
    pub compaction_options_fifo: CompactionOptionsFifo,
    pub num_levels: i32,
    pub disable_auto_compactions: bool,
    pub soft_pending_compaction_bytes_limit: u64,
    pub hard_pending_compaction_bytes_limit: u64,
    pub level0_file_num_compaction_trigger: i32,
    pub level0_slowdown_writes_trigger: i32,
    pub level0_stop_writes_trigger: i32,
    pub max_compaction_bytes: u64,
    pub target_file_size_base: u64,
    pub target_file_size_multiplier: i32,
    pub max_bytes_for_level_base: u64,
    pub max_bytes_for_level_multiplier: f64,
    /// Extra per-level multipliers; levels past the end use 1.
    pub max_bytes_for_level_multiplier_additional: Vec<i32>,
    pub level_compaction_dynamic_level_bytes: bool,
    pub purge_redundant_kvs_while_flush: bool,

    // compression.
    pub compression: CompressionType,
    pub compression_per_level: Vec<CompressionType>,
    /// Overrides `compression` for the bottommost level when set.
    pub bottommost_compression: Option<CompressionType>,
    pub compression_opts: CompressionOptions,

    // tables.
    pub table_factory: Arc<dyn TableFactory>,
    pub table_properties_collector_factories: Vec<Arc<dyn TablePropertiesCollectorFactory>>,
    pub bloom_locality: u32,
    pub optimize_filters_for_hits: bool,

    // misc.
    pub max_sequential_skip_in_iterations: u64,
    pub paranoid_file_checks: bool,
    pub force_consistency_checks: bool,
    pub report_bg_io_stats: bool,

    #[cfg(feature = "indirect-values")]
    pub indirect: IndirectValueOptions,
}

impl Default for ColumnFamilyOptions {
    fn default() -> Self {
        Self {
            comparator: Arc::new(BytewiseComparator),
            merge_operator: None,
            compaction_filter: None,
            compaction_filter_factory: None,
            prefix_extractor: None,
            memtable_insert_with_hint_prefix_extractor: None,
            inplace_callback: None,

            write_buffer_size: config::DEFAULT_WRITE_BUFFER_SIZE,
            max_write_buffer_number: config::DEFAULT_MAX_WRITE_BUFFER_NUMBER,
            min_write_buffer_number_to_merge: config::DEFAULT_MIN_WRITE_BUFFER_NUMBER_TO_MERGE,
            max_write_buffer_number_to_maintain: 0,
            arena_block_size: 0,
            memtable_prefix_bloom_size_ratio: 0.0,
            memtable_huge_page_size: 0,
            max_successive_merges: 0,
            inplace_update_support: false,
            inplace_update_num_locks: config::DEFAULT_INPLACE_UPDATE_NUM_LOCKS,
            memtable_factory: Arc::new(SkipListFactory),

            compaction_style: CompactionStyle::Level,
            compaction_pri: CompactionPri::default(),
            compaction_options_universal: CompactionOptionsUniversal::default(),
            compaction_options_fifo: CompactionOptionsFifo::default(),
            num_levels: config::DEFAULT_NUM_LEVELS,
            disable_auto_compactions: false,
            soft_pending_compaction_bytes_limit: config::DEFAULT_SOFT_PENDING_COMPACTION_BYTES_LIMIT,
            hard_pending_compaction_bytes_limit: config::DEFAULT_HARD_PENDING_COMPACTION_BYTES_LIMIT,
            level0_file_num_compaction_trigger: config::DEFAULT_LEVEL0_FILE_NUM_COMPACTION_TRIGGER,
            level0_slowdown_writes_trigger: config::DEFAULT_LEVEL0_SLOWDOWN_WRITES_TRIGGER,
            level0_stop_writes_trigger: config::DEFAULT_LEVEL0_STOP_WRITES_TRIGGER,
            max_compaction_bytes: 0,
            target_file_size_base: config::DEFAULT_TARGET_FILE_SIZE_BASE,
            target_file_size_multiplier: config::DEFAULT_TARGET_FILE_SIZE_MULTIPLIER,
            max_bytes_for_level_base: config::DEFAULT_MAX_BYTES_FOR_LEVEL_BASE,
            max_bytes_for_level_multiplier: config::DEFAULT_MAX_BYTES_FOR_LEVEL_MULTIPLIER,
            max_bytes_for_level_multiplier_additional: vec![1; config::DEFAULT_NUM_LEVELS as usize],
            level_compaction_dynamic_level_bytes: false,
            purge_redundant_kvs_while_flush: true,

            compression: CompressionType::default_fast(),
            compression_per_level: Vec::new(),
            bottommost_compression: None,
            compression_opts: CompressionOptions::default(),

            table_factory: Arc::new(BlockBasedTableFactory),
            table_properties_collector_factories: Vec::new(),
            bloom_locality: 0,
            optimize_filters_for_hits: false,

            max_sequential_skip_in_iterations: config::DEFAULT_MAX_SEQUENTIAL_SKIP_IN_ITERATIONS,
            paranoid_file_checks: false,
            force_consistency_checks: false,
            report_bg_io_stats: false,

            #[cfg(feature = "indirect-values")]
            indirect: IndirectValueOptions::default(),
        }
    }
}
