//! Column family options fixed for the lifetime of the column family.

use std::sync::Arc;

use crate::compaction::{
    AccessHint, CompactionOptionsFifo, CompactionOptionsUniversal, CompactionPri, CompactionStyle,
};
use crate::compression::{CompressionOptions, CompressionType};
use crate::hooks::{
    CompactionFilter, CompactionFilterFactory, Comparator, InplaceCallback, InternalKeyComparator,
    MergeOperator, SliceTransform,
};
use crate::mutable::{dump_line, join};
use crate::options::{ColumnFamilyOptions, DbOptions, Options};
use crate::resources::{
    Cache, DbPath, Env, EventListener, LevelFilter, LevelGatedLogger, Logger, MemTableRepFactory,
    RateLimiter, Statistics, TableFactory, TablePropertiesCollectorFactory,
};

/// Options that must not change once a column family is open.
///
/// Every field is assigned once, in the constructor, and is only reachable
/// through `&self` accessors afterwards. Hooks and resources are `Arc`s shared
/// with the options they were built from.
#[derive(Debug, Clone)]
pub struct ImmutableCfOptions {
    compaction_style: CompactionStyle,
    compaction_pri: CompactionPri,
    compaction_options_universal: CompactionOptionsUniversal,
    compaction_options_fifo: CompactionOptionsFifo,

    prefix_extractor: Option<Arc<dyn SliceTransform>>,
    user_comparator: Arc<dyn Comparator>,
    internal_comparator: InternalKeyComparator,

    merge_operator: Option<Arc<dyn MergeOperator>>,
    compaction_filter: Option<Arc<dyn CompactionFilter>>,
    compaction_filter_factory: Option<Arc<dyn CompactionFilterFactory>>,

    min_write_buffer_number_to_merge: i32,
    max_write_buffer_number_to_maintain: i32,
    inplace_update_support: bool,
    inplace_callback: Option<InplaceCallback>,

    info_log: Arc<dyn Logger>,
    statistics: Option<Arc<dyn Statistics>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    info_log_level: LevelFilter,
    env: Arc<dyn Env>,

    allow_mmap_reads: bool,
    allow_mmap_writes: bool,

    db_paths: Vec<DbPath>,
    memtable_factory: Arc<dyn MemTableRepFactory>,
    table_factory: Arc<dyn TableFactory>,
    table_properties_collector_factories: Vec<Arc<dyn TablePropertiesCollectorFactory>>,

    advise_random_on_open: bool,
    bloom_locality: u32,
    purge_redundant_kvs_while_flush: bool,
    use_fsync: bool,

    compression_per_level: Vec<CompressionType>,
    bottommost_compression: Option<CompressionType>,
    compression_opts: CompressionOptions,

    level_compaction_dynamic_level_bytes: bool,
    access_hint_on_compaction_start: AccessHint,
    new_table_reader_for_compaction_inputs: bool,
    compaction_readahead_size: usize,
    num_levels: i32,
    optimize_filters_for_hits: bool,
    force_consistency_checks: bool,
    allow_ingest_behind: bool,

    listeners: Vec<Arc<dyn EventListener>>,
    row_cache: Option<Arc<dyn Cache>>,
    max_subcompactions: u32,
    memtable_insert_with_hint_prefix_extractor: Option<Arc<dyn SliceTransform>>,
}

impl ImmutableCfOptions {
    pub fn new(db_options: &DbOptions, cf_options: &ColumnFamilyOptions) -> Self {
        Self {
            compaction_style: cf_options.compaction_style,
            compaction_pri: cf_options.compaction_pri,
            compaction_options_universal: cf_options.compaction_options_universal.clone(),
            compaction_options_fifo: cf_options.compaction_options_fifo.clone(),
            prefix_extractor: cf_options.prefix_extractor.clone(),
            user_comparator: Arc::clone(&cf_options.comparator),
            internal_comparator: InternalKeyComparator::new(Arc::clone(&cf_options.comparator)),
            merge_operator: cf_options.merge_operator.clone(),
            compaction_filter: cf_options.compaction_filter.clone(),
            compaction_filter_factory: cf_options.compaction_filter_factory.clone(),
            min_write_buffer_number_to_merge: cf_options.min_write_buffer_number_to_merge,
            max_write_buffer_number_to_maintain: cf_options.max_write_buffer_number_to_maintain,
            inplace_update_support: cf_options.inplace_update_support,
            inplace_callback: cf_options.inplace_callback,
            info_log: Arc::clone(&db_options.info_log),
            statistics: db_options.statistics.clone(),
            rate_limiter: db_options.rate_limiter.clone(),
            info_log_level: db_options.info_log_level,
            env: Arc::clone(&db_options.env),
            allow_mmap_reads: db_options.allow_mmap_reads,
            allow_mmap_writes: db_options.allow_mmap_writes,
            db_paths: db_options.db_paths.clone(),
            memtable_factory: Arc::clone(&cf_options.memtable_factory),
            table_factory: Arc::clone(&cf_options.table_factory),
            table_properties_collector_factories: cf_options
                .table_properties_collector_factories
                .clone(),
            advise_random_on_open: db_options.advise_random_on_open,
            bloom_locality: cf_options.bloom_locality,
            purge_redundant_kvs_while_flush: cf_options.purge_redundant_kvs_while_flush,
            use_fsync: db_options.use_fsync,
            compression_per_level: cf_options.compression_per_level.clone(),
            bottommost_compression: cf_options.bottommost_compression,
            compression_opts: cf_options.compression_opts,
            level_compaction_dynamic_level_bytes: cf_options.level_compaction_dynamic_level_bytes,
            access_hint_on_compaction_start: db_options.access_hint_on_compaction_start,
            new_table_reader_for_compaction_inputs: db_options
                .new_table_reader_for_compaction_inputs,
            compaction_readahead_size: db_options.compaction_readahead_size,
            num_levels: cf_options.num_levels,
            optimize_filters_for_hits: cf_options.optimize_filters_for_hits,
            force_consistency_checks: cf_options.force_consistency_checks,
            allow_ingest_behind: db_options.allow_ingest_behind,
            listeners: db_options.listeners.clone(),
            row_cache: db_options.row_cache.clone(),
            max_subcompactions: db_options.max_subcompactions,
            memtable_insert_with_hint_prefix_extractor: cf_options
                .memtable_insert_with_hint_prefix_extractor
                .clone(),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(&options.db, &options.cf)
    }

    pub fn compaction_style(&self) -> CompactionStyle {
        self.compaction_style
    }

    pub fn compaction_pri(&self) -> CompactionPri {
        self.compaction_pri
    }

    pub fn compaction_options_universal(&self) -> &CompactionOptionsUniversal {
        &self.compaction_options_universal
    }

    pub fn compaction_options_fifo(&self) -> &CompactionOptionsFifo {
        &self.compaction_options_fifo
    }

    pub fn prefix_extractor(&self) -> Option<&Arc<dyn SliceTransform>> {
        self.prefix_extractor.as_ref()
    }

    pub fn user_comparator(&self) -> &Arc<dyn Comparator> {
        &self.user_comparator
    }

    pub fn internal_comparator(&self) -> &InternalKeyComparator {
        &self.internal_comparator
    }

    pub fn merge_operator(&self) -> Option<&Arc<dyn MergeOperator>> {
        self.merge_operator.as_ref()
    }

    pub fn compaction_filter(&self) -> Option<&Arc<dyn CompactionFilter>> {
        self.compaction_filter.as_ref()
    }

    pub fn compaction_filter_factory(&self) -> Option<&Arc<dyn CompactionFilterFactory>> {
        self.compaction_filter_factory.as_ref()
    }

    pub fn min_write_buffer_number_to_merge(&self) -> i32 {
        self.min_write_buffer_number_to_merge
    }

    pub fn max_write_buffer_number_to_maintain(&self) -> i32 {
        self.max_write_buffer_number_to_maintain
    }

    pub fn inplace_update_support(&self) -> bool {
        self.inplace_update_support
    }

    pub fn inplace_callback(&self) -> Option<InplaceCallback> {
        self.inplace_callback
    }

    pub fn info_log(&self) -> &Arc<dyn Logger> {
        &self.info_log
    }

    pub fn statistics(&self) -> Option<&Arc<dyn Statistics>> {
        self.statistics.as_ref()
    }

    pub fn rate_limiter(&self) -> Option<&Arc<dyn RateLimiter>> {
        self.rate_limiter.as_ref()
    }

    pub fn info_log_level(&self) -> LevelFilter {
        self.info_log_level
    }

    /// `info_log`, filtered to `info_log_level`.
    pub fn info_logger(&self) -> LevelGatedLogger<'_> {
        LevelGatedLogger::new(self.info_log.as_ref(), self.info_log_level)
    }

    pub fn env(&self) -> &Arc<dyn Env> {
        &self.env
    }

    pub fn allow_mmap_reads(&self) -> bool {
        self.allow_mmap_reads
    }

    pub fn allow_mmap_writes(&self) -> bool {
        self.allow_mmap_writes
    }

    pub fn db_paths(&self) -> &[DbPath] {
        &self.db_paths
    }

    pub fn memtable_factory(&self) -> &Arc<dyn MemTableRepFactory> {
        &self.memtable_factory
    }

    pub fn table_factory(&self) -> &Arc<dyn TableFactory> {
        &self.table_factory
    }

    pub fn table_properties_collector_factories(
        &self,
    ) -> &[Arc<dyn TablePropertiesCollectorFactory>] {
        &self.table_properties_collector_factories
    }

    pub fn advise_random_on_open(&self) -> bool {
        self.advise_random_on_open
    }

    /// Required by plain table readers.
    pub fn bloom_locality(&self) -> u32 {
        self.bloom_locality
    }

    pub fn purge_redundant_kvs_while_flush(&self) -> bool {
        self.purge_redundant_kvs_while_flush
    }

    pub fn use_fsync(&self) -> bool {
        self.use_fsync
    }

    pub fn compression_per_level(&self) -> &[CompressionType] {
        &self.compression_per_level
    }

    pub fn bottommost_compression(&self) -> Option<CompressionType> {
        self.bottommost_compression
    }

    pub fn compression_opts(&self) -> &CompressionOptions {
        &self.compression_opts
    }

    pub fn level_compaction_dynamic_level_bytes(&self) -> bool {
        self.level_compaction_dynamic_level_bytes
    }

    pub fn access_hint_on_compaction_start(&self) -> AccessHint {
        self.access_hint_on_compaction_start
    }

    pub fn new_table_reader_for_compaction_inputs(&self) -> bool {
        self.new_table_reader_for_compaction_inputs
    }

    pub fn compaction_readahead_size(&self) -> usize {
        self.compaction_readahead_size
    }

    pub fn num_levels(&self) -> i32 {
        self.num_levels
    }

    pub fn optimize_filters_for_hits(&self) -> bool {
        self.optimize_filters_for_hits
    }

    pub fn force_consistency_checks(&self) -> bool {
        self.force_consistency_checks
    }

    pub fn allow_ingest_behind(&self) -> bool {
        self.allow_ingest_behind
    }

    pub fn listeners(&self) -> &[Arc<dyn EventListener>] {
        &self.listeners
    }

    pub fn row_cache(&self) -> Option<&Arc<dyn Cache>> {
        self.row_cache.as_ref()
    }

    pub fn max_subcompactions(&self) -> u32 {
        self.max_subcompactions
    }

    pub fn memtable_insert_with_hint_prefix_extractor(&self) -> Option<&Arc<dyn SliceTransform>> {
        self.memtable_insert_with_hint_prefix_extractor.as_ref()
    }

    /// Renders the fixed options to `logger`.
    pub fn dump(&self, logger: &dyn Logger) {
        dump_line(logger, "comparator", self.user_comparator.name());
        dump_line(
            logger,
            "merge_operator",
            self.merge_operator.as_ref().map_or("None", |m| m.name()),
        );
        dump_line(
            logger,
            "compaction_filter",
            self.compaction_filter.as_ref().map_or("None", |f| f.name()),
        );
        dump_line(
            logger,
            "compaction_filter_factory",
            self.compaction_filter_factory
                .as_ref()
                .map_or("None", |f| f.name()),
        );
        dump_line(
            logger,
            "prefix_extractor",
            self.prefix_extractor.as_ref().map_or("nullptr", |p| p.name()),
        );
        dump_line(logger, "memtable_factory", self.memtable_factory.name());
        dump_line(logger, "table_factory", self.table_factory.name());
        dump_line(logger, "compaction_style", self.compaction_style);
        dump_line(logger, "compaction_pri", format!("{:?}", self.compaction_pri));
        dump_line(logger, "num_levels", self.num_levels);
        dump_line(
            logger,
            "min_write_buffer_number_to_merge",
            self.min_write_buffer_number_to_merge,
        );
        dump_line(
            logger,
            "max_write_buffer_number_to_maintain",
            self.max_write_buffer_number_to_maintain,
        );
        dump_line(logger, "inplace_update_support", self.inplace_update_support);
        dump_line(logger, "bloom_locality", self.bloom_locality);
        dump_line(logger, "compression_per_level", join(&self.compression_per_level));
        dump_line(
            logger,
            "bottommost_compression",
            self.bottommost_compression
                .map_or("Disabled".to_string(), |c| c.to_string()),
        );
        dump_line(logger, "compression_opts", self.compression_opts);
        dump_line(
            logger,
            "level_compaction_dynamic_level_bytes",
            self.level_compaction_dynamic_level_bytes,
        );
        dump_line(logger, "optimize_filters_for_hits", self.optimize_filters_for_hits);
        dump_line(logger, "force_consistency_checks", self.force_consistency_checks);
        dump_line(logger, "allow_ingest_behind", self.allow_ingest_behind);
        dump_line(logger, "max_subcompactions", self.max_subcompactions);
    }
}
