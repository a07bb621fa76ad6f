//! Publication of option snapshots to the read and write paths.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use parking_lot::Mutex;

use crate::error::Result;
use crate::immutable::ImmutableCfOptions;
use crate::mutable::{MutableCfOptions, MutableCfOptionsBuilder, OptionValue};
use crate::options::{ColumnFamilyOptions, DbOptions, Options};

/// The options of one open column family.
///
/// The fixed set never changes. The tunable set is an immutable snapshot:
/// reconfiguration builds and derives a new one off to the side, then swaps it
/// in atomically. Readers never lock and always see a complete snapshot;
/// writers are serialized so no edit is lost.
#[derive(Debug)]
pub struct CfOptionsHandle {
    ioptions: Arc<ImmutableCfOptions>,

    /// Current tunable snapshot.
    current: ArcSwap<MutableCfOptions>,

    /// Serializes reconfiguration.
    write_lock: Mutex<()>,

    /// Number of snapshots published so far. Bumped before the swap, so it is
    /// never behind what a reader can observe.
    version: AtomicU64,
}

impl CfOptionsHandle {
    pub fn open(db_options: &DbOptions, cf_options: &ColumnFamilyOptions) -> Self {
        let ioptions = ImmutableCfOptions::new(db_options, cf_options);
        let moptions = MutableCfOptions::new(cf_options);

        log::info!(
            "open column family options: {} levels, {}",
            ioptions.num_levels(),
            ioptions.compaction_style()
        );
        let logger = ioptions.info_logger();
        ioptions.dump(&logger);
        moptions.dump(&logger);

        Self {
            ioptions: Arc::new(ioptions),
            current: ArcSwap::from_pointee(moptions),
            write_lock: Mutex::new(()),
            version: AtomicU64::new(1),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::open(&options.db, &options.cf)
    }

    pub fn immutable(&self) -> &Arc<ImmutableCfOptions> {
        &self.ioptions
    }

    /// Current snapshot, without touching the reference count on the hot path.
    #[inline]
    pub fn load(&self) -> Guard<Arc<MutableCfOptions>> {
        self.current.load()
    }

    /// Current snapshot as an owned `Arc`, for holding across long operations.
    #[inline]
    pub fn current(&self) -> Arc<MutableCfOptions> {
        self.current.load_full()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Applies field-name edits on top of the current snapshot and publishes
    /// the result. Nothing is published if any edit is rejected.
    pub fn set_options<I, K, V>(&self, edits: I) -> Result<Arc<MutableCfOptions>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        let _guard = self.write_lock.lock();

        let builder = self.current.load().to_builder().apply(edits)?;
        Ok(self.publish(builder))
    }

    /// Like [`set_options`](Self::set_options), with typed builder edits.
    pub fn update<F>(&self, f: F) -> Arc<MutableCfOptions>
    where
        F: FnOnce(MutableCfOptionsBuilder) -> MutableCfOptionsBuilder,
    {
        let _guard = self.write_lock.lock();

        let builder = f(self.current.load().to_builder());
        self.publish(builder)
    }

    // caller holds `write_lock`.
    fn publish(&self, builder: MutableCfOptionsBuilder) -> Arc<MutableCfOptions> {
        let snapshot = Arc::new(builder.build_for(&self.ioptions));

        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        self.current.store(Arc::clone(&snapshot));

        log::debug!("published column family options version {}", version);
        snapshot.dump(&self.ioptions.info_logger());

        snapshot
    }
}
