//! Shared engine resources referenced by a column family.

use std::fmt::Debug;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub use log::{Level, LevelFilter};

/// Sink for human-readable diagnostics, such as option dumps.
///
/// This has nothing to do with the write-ahead log; messages here are only
/// for debugging and never feed back into engine decisions.
pub trait Logger: Debug + Send + Sync {
    fn log(&self, level: Level, msg: &str);
}

/// Forwards every message to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogCrateLogger(pub LevelFilter);

impl Default for LogCrateLogger {
    fn default() -> Self {
        Self(LevelFilter::Info)
    }
}

impl Logger for LogCrateLogger {
    fn log(&self, level: Level, msg: &str) {
        if level <= self.0 {
            log::log!(target: "cfopts", level, "{msg}");
        }
    }
}

/// Drops messages less severe than `level` before they reach `inner`.
#[derive(Debug, Clone, Copy)]
pub struct LevelGatedLogger<'a> {
    inner: &'a dyn Logger,
    level: LevelFilter,
}

impl<'a> LevelGatedLogger<'a> {
    pub fn new(inner: &'a dyn Logger, level: LevelFilter) -> Self {
        Self { inner, level }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }
}

impl Logger for LevelGatedLogger<'_> {
    fn log(&self, level: Level, msg: &str) {
        if self.enabled(level) {
            self.inner.log(level, msg);
        }
    }
}

/// Operating-system services used by the engine.
pub trait Env: Debug + Send + Sync {
    fn now_micros(&self) -> u64;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SystemEnv;

impl Env for SystemEnv {
    fn now_micros(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

pub trait Statistics: Debug + Send + Sync {
    fn record_tick(&self, ticker: &str, count: u64);
}

pub trait RateLimiter: Debug + Send + Sync {
    fn bytes_per_second(&self) -> u64;

    /// Blocks until `bytes` may be written.
    fn request(&self, bytes: u64);
}

/// A directory table files may be placed in, filled up to `target_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    pub path: PathBuf,
    pub target_size: u64,
}

impl DbPath {
    pub fn new(path: impl Into<PathBuf>, target_size: u64) -> Self {
        Self {
            path: path.into(),
            target_size,
        }
    }
}

pub trait MemTableRepFactory: Debug + Send + Sync {
    fn name(&self) -> &str;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SkipListFactory;

impl MemTableRepFactory for SkipListFactory {
    fn name(&self) -> &str {
        "SkipListFactory"
    }
}

pub trait TableFactory: Debug + Send + Sync {
    fn name(&self) -> &str;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct BlockBasedTableFactory;

impl TableFactory for BlockBasedTableFactory {
    fn name(&self) -> &str {
        "BlockBasedTable"
    }
}

pub trait TablePropertiesCollectorFactory: Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// Callbacks for engine events. Every method has an empty default.
pub trait EventListener: Debug + Send + Sync {
    fn on_flush_completed(&self, _cf_name: &str) {}

    fn on_compaction_completed(&self, _cf_name: &str) {}
}

pub trait Cache: Debug + Send + Sync {
    fn capacity(&self) -> usize;

    fn usage(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::*;

    /// Collects every logged line.
    #[derive(Debug, Default)]
    pub(crate) struct CaptureLogger {
        pub(crate) lines: Mutex<Vec<String>>,
    }

    impl Logger for CaptureLogger {
        fn log(&self, _level: Level, msg: &str) {
            self.lines.lock().push(msg.to_string());
        }
    }

    impl CaptureLogger {
        pub(crate) fn contains(&self, needle: &str) -> bool {
            self.lines.lock().iter().any(|line| line.contains(needle))
        }

        pub(crate) fn len(&self) -> usize {
            self.lines.lock().len()
        }
    }
}
