use std::sync::Arc;

use crate::compaction::AccessHint;
use crate::resources::{
    Cache, DbPath, Env, EventListener, LevelFilter, LogCrateLogger, Logger, RateLimiter,
    Statistics, SystemEnv,
};

/// Options shared by every column family of one engine instance.
#[derive(Debug, Clone)]
pub struct DbOptions {
    pub env: Arc<dyn Env>,

    /// Where diagnostic messages go.
    pub info_log: Arc<dyn Logger>,

    pub info_log_level: LevelFilter,

    pub statistics: Option<Arc<dyn Statistics>>,

    /// Throttles flush and compaction writes when set.
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,

    /// Directories for table files, an empty list means the db directory.
    pub db_paths: Vec<DbPath>,

    /// Allow the OS to mmap files for reading table files.
    pub allow_mmap_reads: bool,

    /// Allow the OS to mmap files for writing.
    pub allow_mmap_writes: bool,

    pub advise_random_on_open: bool,

    pub use_fsync: bool,

    pub access_hint_on_compaction_start: AccessHint,

    pub new_table_reader_for_compaction_inputs: bool,

    pub compaction_readahead_size: usize,

    pub listeners: Vec<Arc<dyn EventListener>>,

    pub row_cache: Option<Arc<dyn Cache>>,

    /// Maximum number of threads a single compaction job may be split into.
    pub max_subcompactions: u32,

    pub allow_ingest_behind: bool,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            env: Arc::new(SystemEnv),
            info_log: Arc::new(LogCrateLogger::default()),
            info_log_level: LevelFilter::Info,
            statistics: None,
            rate_limiter: None,
            db_paths: Vec::new(),
            allow_mmap_reads: false,
            allow_mmap_writes: false,
            advise_random_on_open: true,
            use_fsync: false,
            access_hint_on_compaction_start: AccessHint::default(),
            new_table_reader_for_compaction_inputs: false,
            compaction_readahead_size: 0,
            listeners: Vec::new(),
            row_cache: None,
            max_subcompactions: 1,
            allow_ingest_behind: false,
        }
    }
}
