//! Column family options that may change while the engine is running.
//!
//! A [`MutableCfOptions`] is a fully derived snapshot: the only ways to get one
//! run the per-level size derivation, and its settings are read-only once built.
//! Edits go through a [`MutableCfOptionsBuilder`], which produces a new snapshot.

use std::fmt::Display;
use std::ops::Deref;

use crate::compaction::CompactionStyle;
use crate::compression::CompressionType;
use crate::derived::MaxFileSizes;
use crate::error::{OptionsError, Result};
use crate::immutable::ImmutableCfOptions;
#[cfg(feature = "indirect-values")]
use crate::indirect::IndirectValueOptions;
use crate::options::{ColumnFamilyOptions, Options};
use crate::resources::{Level, Logger};

/// Names of column family options that are fixed once the column family is open.
const IMMUTABLE_OPTION_NAMES: &[&str] = &[
    "comparator",
    "merge_operator",
    "compaction_filter",
    "compaction_filter_factory",
    "prefix_extractor",
    "memtable_insert_with_hint_prefix_extractor",
    "inplace_callback",
    "min_write_buffer_number_to_merge",
    "max_write_buffer_number_to_maintain",
    "inplace_update_support",
    "memtable_factory",
    "compaction_style",
    "compaction_pri",
    "compaction_options_universal",
    "compaction_options_fifo",
    "num_levels",
    "level_compaction_dynamic_level_bytes",
    "purge_redundant_kvs_while_flush",
    "compression_per_level",
    "bottommost_compression",
    "compression_opts",
    "table_factory",
    "table_properties_collector_factories",
    "bloom_locality",
    "optimize_filters_for_hits",
    "force_consistency_checks",
];

/// The tunable settings of a column family, as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableCfSettings {
    // memtable.
    pub write_buffer_size: usize,
    pub max_write_buffer_number: i32,
    pub arena_block_size: usize,
    pub memtable_prefix_bloom_size_ratio: f64,
    pub memtable_huge_page_size: usize,
    pub max_successive_merges: usize,
    pub inplace_update_num_locks: usize,

    // compaction.
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
    pub max_bytes_for_level_multiplier_additional: Vec<i32>,

    #[cfg(feature = "indirect-values")]
    pub indirect: IndirectValueOptions,

    // misc.
    pub max_sequential_skip_in_iterations: u64,
    pub paranoid_file_checks: bool,
    pub report_bg_io_stats: bool,
    pub compression: CompressionType,
}

impl MutableCfSettings {
    /// Extra multiplier applied to the byte budget of `level`, 1 for every
    /// level past the end of the override list.
    pub fn max_bytes_multiplier_additional(&self, level: usize) -> i32 {
        self.max_bytes_for_level_multiplier_additional
            .get(level)
            .copied()
            .unwrap_or(1)
    }
}

impl From<&ColumnFamilyOptions> for MutableCfSettings {
    fn from(options: &ColumnFamilyOptions) -> Self {
        Self {
            write_buffer_size: options.write_buffer_size,
            max_write_buffer_number: options.max_write_buffer_number,
            arena_block_size: options.arena_block_size,
            memtable_prefix_bloom_size_ratio: options.memtable_prefix_bloom_size_ratio,
            memtable_huge_page_size: options.memtable_huge_page_size,
            max_successive_merges: options.max_successive_merges,
            inplace_update_num_locks: options.inplace_update_num_locks,
            disable_auto_compactions: options.disable_auto_compactions,
            soft_pending_compaction_bytes_limit: options.soft_pending_compaction_bytes_limit,
            hard_pending_compaction_bytes_limit: options.hard_pending_compaction_bytes_limit,
            level0_file_num_compaction_trigger: options.level0_file_num_compaction_trigger,
            level0_slowdown_writes_trigger: options.level0_slowdown_writes_trigger,
            level0_stop_writes_trigger: options.level0_stop_writes_trigger,
            max_compaction_bytes: options.max_compaction_bytes,
            target_file_size_base: options.target_file_size_base,
            target_file_size_multiplier: options.target_file_size_multiplier,
            max_bytes_for_level_base: options.max_bytes_for_level_base,
            max_bytes_for_level_multiplier: options.max_bytes_for_level_multiplier,
            max_bytes_for_level_multiplier_additional: options
                .max_bytes_for_level_multiplier_additional
                .clone(),
            #[cfg(feature = "indirect-values")]
            indirect: options.indirect.clone(),
            max_sequential_skip_in_iterations: options.max_sequential_skip_in_iterations,
            paranoid_file_checks: options.paranoid_file_checks,
            report_bg_io_stats: options.report_bg_io_stats,
            compression: options.compression,
        }
    }
}

impl Default for MutableCfSettings {
    /// Zero/false baseline, compressing with the fast codec if one is compiled in.
    fn default() -> Self {
        Self {
            write_buffer_size: 0,
            max_write_buffer_number: 0,
            arena_block_size: 0,
            memtable_prefix_bloom_size_ratio: 0.0,
            memtable_huge_page_size: 0,
            max_successive_merges: 0,
            inplace_update_num_locks: 0,
            disable_auto_compactions: false,
            soft_pending_compaction_bytes_limit: 0,
            hard_pending_compaction_bytes_limit: 0,
            level0_file_num_compaction_trigger: 0,
            level0_slowdown_writes_trigger: 0,
            level0_stop_writes_trigger: 0,
            max_compaction_bytes: 0,
            target_file_size_base: 0,
            target_file_size_multiplier: 0,
            max_bytes_for_level_base: 0,
            max_bytes_for_level_multiplier: 0.0,
            max_bytes_for_level_multiplier_additional: Vec::new(),
            #[cfg(feature = "indirect-values")]
            indirect: IndirectValueOptions::default(),
            max_sequential_skip_in_iterations: 0,
            paranoid_file_checks: false,
            report_bg_io_stats: false,
            compression: CompressionType::default_fast(),
        }
    }
}

/// A fully derived, read-only snapshot of the tunable options.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableCfOptions {
    settings: MutableCfSettings,

    /// Shape the derived sizes were computed for.
    num_levels: i32,
    compaction_style: CompactionStyle,

    /// Per-level target file size.
    max_file_size: MaxFileSizes,
}

impl MutableCfOptions {
    pub fn new(options: &ColumnFamilyOptions) -> Self {
        Self::derive(
            MutableCfSettings::from(options),
            options.num_levels,
            options.compaction_style,
        )
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(&options.cf)
    }

    fn derive(settings: MutableCfSettings, num_levels: i32, style: CompactionStyle) -> Self {
        let mut options = Self {
            settings,
            num_levels,
            compaction_style: style,
            max_file_size: MaxFileSizes::default(),
        };
        options.refresh_derived_options(num_levels, style);
        options
    }

    /// Recomputes every derived value for the given level count and style,
    /// replacing whatever was derived before.
    pub fn refresh_derived_options(&mut self, num_levels: i32, style: CompactionStyle) {
        let multiplier = u64::try_from(self.settings.target_file_size_multiplier).unwrap_or(0);

        self.num_levels = num_levels;
        self.compaction_style = style;
        self.max_file_size = MaxFileSizes::derive(
            usize::try_from(num_levels).unwrap_or(0),
            style,
            self.settings.target_file_size_base,
            multiplier,
        );
    }

    pub fn refresh_derived_options_for(&mut self, ioptions: &ImmutableCfOptions) {
        self.refresh_derived_options(ioptions.num_levels(), ioptions.compaction_style());
    }

    pub fn settings(&self) -> &MutableCfSettings {
        &self.settings
    }

    /// Starts an edit that produces a new snapshot, leaving this one untouched.
    pub fn to_builder(&self) -> MutableCfOptionsBuilder {
        MutableCfOptionsBuilder(self.settings.clone())
    }

    pub fn num_levels(&self) -> i32 {
        self.num_levels
    }

    pub fn compaction_style(&self) -> CompactionStyle {
        self.compaction_style
    }

    pub fn max_file_size(&self) -> &MaxFileSizes {
        &self.max_file_size
    }

    /// Get the max file size in a given level.
    ///
    /// # Panics
    ///
    /// Only meaningful under leveled compaction: panics for any other style,
    /// and for a `level` outside `0..num_levels`.
    pub fn max_file_size_for_level(&self, level: usize) -> u64 {
        assert!(
            self.compaction_style.is_leveled(),
            "max_file_size_for_level queried under {}",
            self.compaction_style
        );

        self.max_file_size.get(level).unwrap_or_else(|| {
            panic!(
                "level {} out of range, column family has {} levels",
                level, self.num_levels
            )
        })
    }

    /// Renders every option to `logger`.
    pub fn dump(&self, logger: &dyn Logger) {
        let s = &self.settings;

        dump_line(logger, "write_buffer_size", s.write_buffer_size);
        dump_line(logger, "max_write_buffer_number", s.max_write_buffer_number);
        dump_line(logger, "arena_block_size", s.arena_block_size);
        dump_line(
            logger,
            "memtable_prefix_bloom_ratio",
            format!("{:.6}", s.memtable_prefix_bloom_size_ratio),
        );
        dump_line(logger, "memtable_huge_page_size", s.memtable_huge_page_size);
        dump_line(logger, "max_successive_merges", s.max_successive_merges);
        dump_line(logger, "inplace_update_num_locks", s.inplace_update_num_locks);
        dump_line(logger, "disable_auto_compactions", s.disable_auto_compactions);
        dump_line(
            logger,
            "soft_pending_compaction_bytes_limit",
            s.soft_pending_compaction_bytes_limit,
        );
        dump_line(
            logger,
            "hard_pending_compaction_bytes_limit",
            s.hard_pending_compaction_bytes_limit,
        );
        dump_line(
            logger,
            "level0_file_num_compaction_trigger",
            s.level0_file_num_compaction_trigger,
        );
        dump_line(logger, "level0_slowdown_writes_trigger", s.level0_slowdown_writes_trigger);
        dump_line(logger, "level0_stop_writes_trigger", s.level0_stop_writes_trigger);
        dump_line(logger, "max_compaction_bytes", s.max_compaction_bytes);
        dump_line(logger, "target_file_size_base", s.target_file_size_base);
        dump_line(logger, "target_file_size_multiplier", s.target_file_size_multiplier);
        dump_line(logger, "max_bytes_for_level_base", s.max_bytes_for_level_base);
        dump_line(
            logger,
            "max_bytes_for_level_multiplier",
            format!("{:.6}", s.max_bytes_for_level_multiplier),
        );
        dump_line(
            logger,
            "max_bytes_for_level_multiplier_additional",
            join(&s.max_bytes_for_level_multiplier_additional),
        );
        dump_line(
            logger,
            "max_sequential_skip_in_iterations",
            s.max_sequential_skip_in_iterations,
        );
        dump_line(logger, "paranoid_file_checks", s.paranoid_file_checks);
        dump_line(logger, "report_bg_io_stats", s.report_bg_io_stats);
        dump_line(logger, "compression", s.compression);
        dump_line(logger, "max_file_size", join(self.max_file_size.as_slice()));

        #[cfg(feature = "indirect-values")]
        s.indirect.dump(logger);
    }
}

impl Default for MutableCfOptions {
    fn default() -> Self {
        Self::derive(MutableCfSettings::default(), 0, CompactionStyle::default())
    }
}

impl Deref for MutableCfOptions {
    type Target = MutableCfSettings;

    fn deref(&self) -> &Self::Target {
        &self.settings
    }
}

pub(crate) fn dump_line(logger: &dyn Logger, name: &str, value: impl Display) {
    logger.log(Level::Info, &format!("  Options.{}: {}", name, value));
}

pub(crate) fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A value for a field-name edit.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Compression(CompressionType),
    IntList(Vec<i32>),
    UIntList(Vec<u64>),
    DoubleList(Vec<f64>),
    CompressionList(Vec<CompressionType>),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::UInt(value)
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        OptionValue::UInt(value as u64)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Double(value)
    }
}

impl From<CompressionType> for OptionValue {
    fn from(value: CompressionType) -> Self {
        OptionValue::Compression(value)
    }
}

impl From<Vec<i32>> for OptionValue {
    fn from(value: Vec<i32>) -> Self {
        OptionValue::IntList(value)
    }
}

impl From<Vec<u32>> for OptionValue {
    fn from(value: Vec<u32>) -> Self {
        OptionValue::UIntList(value.into_iter().map(u64::from).collect())
    }
}

impl From<Vec<usize>> for OptionValue {
    fn from(value: Vec<usize>) -> Self {
        OptionValue::UIntList(value.into_iter().map(|v| v as u64).collect())
    }
}

impl From<Vec<u64>> for OptionValue {
    fn from(value: Vec<u64>) -> Self {
        OptionValue::UIntList(value)
    }
}

impl From<Vec<f32>> for OptionValue {
    fn from(value: Vec<f32>) -> Self {
        OptionValue::DoubleList(value.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<f64>> for OptionValue {
    fn from(value: Vec<f64>) -> Self {
        OptionValue::DoubleList(value)
    }
}

impl From<Vec<CompressionType>> for OptionValue {
    fn from(value: Vec<CompressionType>) -> Self {
        OptionValue::CompressionList(value)
    }
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) | OptionValue::UInt(_) => "integer",
            OptionValue::Double(_) => "floating point",
            OptionValue::Compression(_) => "compression type",
            OptionValue::IntList(_) => "integer list",
            OptionValue::UIntList(_) => "unsigned integer list",
            OptionValue::DoubleList(_) => "floating point list",
            OptionValue::CompressionList(_) => "compression type list",
        }
    }

    pub(crate) fn as_bool(&self, name: &str) -> Result<bool> {
        match self {
            OptionValue::Bool(v) => Ok(*v),
            _ => Err(mismatch(name, "boolean")),
        }
    }

    fn as_int<T>(&self, name: &str) -> Result<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        let converted = match self {
            OptionValue::Int(v) => <T as TryFrom<i64>>::try_from(*v).ok(),
            OptionValue::UInt(v) => <T as TryFrom<u64>>::try_from(*v).ok(),
            _ => return Err(mismatch(name, "integer")),
        };

        converted.ok_or_else(|| OptionsError::OutOfRange {
            name: name.to_string(),
            value: self.render(),
        })
    }

    fn as_f64(&self, name: &str) -> Result<f64> {
        match self {
            OptionValue::Double(v) => Ok(*v),
            OptionValue::Int(v) => Ok(*v as f64),
            OptionValue::UInt(v) => Ok(*v as f64),
            _ => Err(mismatch(name, "floating point")),
        }
    }

    fn as_compression(&self, name: &str) -> Result<CompressionType> {
        match self {
            OptionValue::Compression(v) => Ok(*v),
            _ => Err(mismatch(name, "compression type")),
        }
    }

    fn as_int_list(&self, name: &str) -> Result<Vec<i32>> {
        match self {
            OptionValue::IntList(v) => Ok(v.clone()),
            _ => Err(mismatch(name, "integer list")),
        }
    }

    #[cfg(feature = "indirect-values")]
    pub(crate) fn as_uint_list<T: TryFrom<u64>>(&self, name: &str) -> Result<Vec<T>> {
        match self {
            OptionValue::UIntList(v) => v
                .iter()
                .map(|x| {
                    <T as TryFrom<u64>>::try_from(*x).map_err(|_| OptionsError::OutOfRange {
                        name: name.to_string(),
                        value: x.to_string(),
                    })
                })
                .collect(),
            _ => Err(mismatch(name, "unsigned integer list")),
        }
    }

    #[cfg(feature = "indirect-values")]
    pub(crate) fn as_f32_list(&self, name: &str) -> Result<Vec<f32>> {
        match self {
            OptionValue::DoubleList(v) => Ok(v.iter().map(|x| *x as f32).collect()),
            _ => Err(mismatch(name, "floating point list")),
        }
    }

    #[cfg(feature = "indirect-values")]
    pub(crate) fn as_compression_list(&self, name: &str) -> Result<Vec<CompressionType>> {
        match self {
            OptionValue::CompressionList(v) => Ok(v.clone()),
            _ => Err(mismatch(name, "compression type list")),
        }
    }

    fn render(&self) -> String {
        match self {
            OptionValue::Bool(v) => v.to_string(),
            OptionValue::Int(v) => v.to_string(),
            OptionValue::UInt(v) => v.to_string(),
            OptionValue::Double(v) => v.to_string(),
            OptionValue::Compression(v) => v.to_string(),
            OptionValue::IntList(v) => join(v),
            OptionValue::UIntList(v) => join(v),
            OptionValue::DoubleList(v) => join(v),
            OptionValue::CompressionList(v) => join(v),
        }
    }
}

fn mismatch(name: &str, expected: &'static str) -> OptionsError {
    OptionsError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

/// Collects edits to the tunable options; [`build`](Self::build) is the only
/// way to turn them into a snapshot.
#[derive(Debug, Clone, Default)]
pub struct MutableCfOptionsBuilder(MutableCfSettings);

impl MutableCfOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cf_options(options: &ColumnFamilyOptions) -> Self {
        Self(MutableCfSettings::from(options))
    }

    pub fn write_buffer_size(mut self, value: usize) -> Self {
        self.0.write_buffer_size = value;
        self
    }

    pub fn max_write_buffer_number(mut self, value: i32) -> Self {
        self.0.max_write_buffer_number = value;
        self
    }

    pub fn arena_block_size(mut self, value: usize) -> Self {
        self.0.arena_block_size = value;
        self
    }

    pub fn memtable_prefix_bloom_size_ratio(mut self, value: f64) -> Self {
        self.0.memtable_prefix_bloom_size_ratio = value;
        self
    }

    pub fn memtable_huge_page_size(mut self, value: usize) -> Self {
        self.0.memtable_huge_page_size = value;
        self
    }

    pub fn max_successive_merges(mut self, value: usize) -> Self {
        self.0.max_successive_merges = value;
        self
    }

    pub fn inplace_update_num_locks(mut self, value: usize) -> Self {
        self.0.inplace_update_num_locks = value;
        self
    }

    pub fn disable_auto_compactions(mut self, value: bool) -> Self {
        self.0.disable_auto_compactions = value;
        self
    }

    pub fn soft_pending_compaction_bytes_limit(mut self, value: u64) -> Self {
        self.0.soft_pending_compaction_bytes_limit = value;
        self
    }

    pub fn hard_pending_compaction_bytes_limit(mut self, value: u64) -> Self {
        self.0.hard_pending_compaction_bytes_limit = value;
        self
    }

    pub fn level0_file_num_compaction_trigger(mut self, value: i32) -> Self {
        self.0.level0_file_num_compaction_trigger = value;
        self
    }

    pub fn level0_slowdown_writes_trigger(mut self, value: i32) -> Self {
        self.0.level0_slowdown_writes_trigger = value;
        self
    }

    pub fn level0_stop_writes_trigger(mut self, value: i32) -> Self {
        self.0.level0_stop_writes_trigger = value;
        self
    }

    pub fn max_compaction_bytes(mut self, value: u64) -> Self {
        self.0.max_compaction_bytes = value;
        self
    }

    pub fn target_file_size_base(mut self, value: u64) -> Self {
        self.0.target_file_size_base = value;
        self
    }

    pub fn target_file_size_multiplier(mut self, value: i32) -> Self {
        self.0.target_file_size_multiplier = value;
        self
    }

    pub fn max_bytes_for_level_base(mut self, value: u64) -> Self {
        self.0.max_bytes_for_level_base = value;
        self
    }

    pub fn max_bytes_for_level_multiplier(mut self, value: f64) -> Self {
        self.0.max_bytes_for_level_multiplier = value;
        self
    }

    pub fn max_bytes_for_level_multiplier_additional(mut self, value: Vec<i32>) -> Self {
        self.0.max_bytes_for_level_multiplier_additional = value;
        self
    }

    #[cfg(feature = "indirect-values")]
    pub fn indirect(mut self, value: IndirectValueOptions) -> Self {
        self.0.indirect = value;
        self
    }

    pub fn max_sequential_skip_in_iterations(mut self, value: u64) -> Self {
        self.0.max_sequential_skip_in_iterations = value;
        self
    }

    pub fn paranoid_file_checks(mut self, value: bool) -> Self {
        self.0.paranoid_file_checks = value;
        self
    }

    pub fn report_bg_io_stats(mut self, value: bool) -> Self {
        self.0.report_bg_io_stats = value;
        self
    }

    pub fn compression(mut self, value: CompressionType) -> Self {
        self.0.compression = value;
        self
    }

    /// Sets the option called `name`.
    pub fn set(mut self, name: &str, value: impl Into<OptionValue>) -> Result<Self> {
        let value = value.into();
        let s = &mut self.0;

        match name {
            "write_buffer_size" => s.write_buffer_size = value.as_int(name)?,
            "max_write_buffer_number" => s.max_write_buffer_number = value.as_int(name)?,
            "arena_block_size" => s.arena_block_size = value.as_int(name)?,
            "memtable_prefix_bloom_size_ratio" => {
                s.memtable_prefix_bloom_size_ratio = value.as_f64(name)?
            }
            "memtable_huge_page_size" => s.memtable_huge_page_size = value.as_int(name)?,
            "max_successive_merges" => s.max_successive_merges = value.as_int(name)?,
            "inplace_update_num_locks" => s.inplace_update_num_locks = value.as_int(name)?,
            "disable_auto_compactions" => s.disable_auto_compactions = value.as_bool(name)?,
            "soft_pending_compaction_bytes_limit" => {
                s.soft_pending_compaction_bytes_limit = value.as_int(name)?
            }
            "hard_pending_compaction_bytes_limit" => {
                s.hard_pending_compaction_bytes_limit = value.as_int(name)?
            }
            "level0_file_num_compaction_trigger" => {
                s.level0_file_num_compaction_trigger = value.as_int(name)?
            }
            "level0_slowdown_writes_trigger" => {
                s.level0_slowdown_writes_trigger = value.as_int(name)?
            }
            "level0_stop_writes_trigger" => s.level0_stop_writes_trigger = value.as_int(name)?,
            "max_compaction_bytes" => s.max_compaction_bytes = value.as_int(name)?,
            "target_file_size_base" => s.target_file_size_base = value.as_int(name)?,
            "target_file_size_multiplier" => {
                s.target_file_size_multiplier = value.as_int(name)?
            }
            "max_bytes_for_level_base" => s.max_bytes_for_level_base = value.as_int(name)?,
            "max_bytes_for_level_multiplier" => {
                s.max_bytes_for_level_multiplier = value.as_f64(name)?
            }
            "max_bytes_for_level_multiplier_additional" => {
                s.max_bytes_for_level_multiplier_additional = value.as_int_list(name)?
            }
            "max_sequential_skip_in_iterations" => {
                s.max_sequential_skip_in_iterations = value.as_int(name)?
            }
            "paranoid_file_checks" => s.paranoid_file_checks = value.as_bool(name)?,
            "report_bg_io_stats" => s.report_bg_io_stats = value.as_bool(name)?,
            "compression" => s.compression = value.as_compression(name)?,
            #[cfg(feature = "indirect-values")]
            _ if IndirectValueOptions::OPTION_NAMES.contains(&name) => {
                s.indirect.set(name, &value)?
            }
            _ if IMMUTABLE_OPTION_NAMES.contains(&name) => {
                return Err(OptionsError::ImmutableOption(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }

        log::trace!("set option {} = {} ({})", name, value.render(), value.kind());

        Ok(self)
    }

    /// Applies every `(name, value)` edit in order, stopping at the first error.
    pub fn apply<I, K, V>(self, edits: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        edits
            .into_iter()
            .try_fold(self, |builder, (name, value)| builder.set(name.as_ref(), value))
    }

    /// Finalizes the edits into a derived snapshot.
    pub fn build(self, num_levels: i32, style: CompactionStyle) -> MutableCfOptions {
        MutableCfOptions::derive(self.0, num_levels, style)
    }

    pub fn build_for(self, ioptions: &ImmutableCfOptions) -> MutableCfOptions {
        self.build(ioptions.num_levels(), ioptions.compaction_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::CaptureLogger;

    fn leveled(base: u64, multiplier: i32, num_levels: i32) -> MutableCfOptions {
        MutableCfOptionsBuilder::new()
            .target_file_size_base(base)
            .target_file_size_multiplier(multiplier)
            .build(num_levels, CompactionStyle::Level)
    }

    #[test]
    fn default_snapshot_is_zero_baseline() {
        let opts = MutableCfOptions::default();

        assert!(!opts.disable_auto_compactions);
        assert_eq!(opts.write_buffer_size, 0);
        assert_eq!(opts.max_write_buffer_number, 0);
        assert_eq!(opts.level0_file_num_compaction_trigger, 0);
        assert_eq!(opts.level0_slowdown_writes_trigger, 0);
        assert_eq!(opts.level0_stop_writes_trigger, 0);
        assert_eq!(opts.soft_pending_compaction_bytes_limit, 0);
        assert_eq!(opts.hard_pending_compaction_bytes_limit, 0);
        assert_eq!(opts.target_file_size_base, 0);
        assert_eq!(opts.max_bytes_for_level_multiplier, 0.0);
        assert!(!opts.paranoid_file_checks);
        assert!(!opts.report_bg_io_stats);
        assert_eq!(opts.compression, CompressionType::default_fast());
        assert!(opts.max_file_size().is_empty());
    }

    #[test]
    fn level_zero_matches_base() {
        for multiplier in [1, 2, 8] {
            let opts = leveled(2 << 20, multiplier, 7);
            assert_eq!(opts.max_file_size_for_level(0), 2 << 20);
        }
    }

    #[test]
    fn each_level_multiplies_the_previous() {
        let opts = leveled(1 << 20, 3, 7);

        for level in 1..7 {
            assert_eq!(
                opts.max_file_size_for_level(level),
                opts.max_file_size_for_level(level - 1) * 3
            );
        }
    }

    #[test]
    fn overflow_saturates() {
        let opts = leveled(1 << 62, 4, 5);

        assert_eq!(opts.max_file_size_for_level(0), 1 << 62);
        assert_eq!(opts.max_file_size().overflow_level(), Some(1));
        for level in 1..5 {
            assert_eq!(opts.max_file_size_for_level(level), u64::MAX);
        }
    }

    #[test]
    fn sparse_multiplier_defaults_to_one() {
        let opts = MutableCfOptionsBuilder::new()
            .max_bytes_for_level_multiplier_additional(vec![2, 3])
            .build(7, CompactionStyle::Level);

        assert_eq!(opts.max_bytes_multiplier_additional(0), 2);
        assert_eq!(opts.max_bytes_multiplier_additional(1), 3);
        assert_eq!(opts.max_bytes_multiplier_additional(2), 1);
        assert_eq!(opts.max_bytes_multiplier_additional(100), 1);
    }

    #[test]
    fn non_leveled_styles_have_no_file_sizes() {
        for style in [CompactionStyle::Universal, CompactionStyle::Fifo] {
            let opts = MutableCfOptionsBuilder::new()
                .target_file_size_base(64 << 20)
                .target_file_size_multiplier(2)
                .build(7, style);

            assert!(opts.max_file_size().is_empty());
        }
    }

    #[test]
    #[should_panic(expected = "queried under")]
    fn file_size_query_under_universal_panics() {
        let opts = MutableCfOptionsBuilder::new().build(7, CompactionStyle::Universal);
        opts.max_file_size_for_level(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn file_size_query_past_last_level_panics() {
        let opts = leveled(1 << 20, 2, 3);
        opts.max_file_size_for_level(3);
    }

    #[test]
    fn derivation_is_deterministic() {
        let cf = ColumnFamilyOptions {
            target_file_size_base: 3 << 20,
            target_file_size_multiplier: 5,
            ..Default::default()
        };

        let a = MutableCfOptions::new(&cf);
        let b = MutableCfOptions::new(&cf);
        assert_eq!(a.max_file_size(), b.max_file_size());
        assert_eq!(a, b);
    }

    #[test]
    fn new_copies_column_family_options() {
        let cf = ColumnFamilyOptions {
            write_buffer_size: 4 << 20,
            level0_stop_writes_trigger: 50,
            compression: CompressionType::None,
            ..Default::default()
        };

        let opts = MutableCfOptions::new(&cf);
        assert_eq!(opts.write_buffer_size, 4 << 20);
        assert_eq!(opts.level0_stop_writes_trigger, 50);
        assert_eq!(opts.compression, CompressionType::None);
        assert_eq!(opts.max_file_size().len(), cf.num_levels as usize);
        assert_eq!(opts.num_levels(), cf.num_levels);
    }

    #[test]
    fn refresh_replaces_the_whole_list() {
        let mut opts = leveled(1 << 20, 2, 7);
        opts.refresh_derived_options(3, CompactionStyle::Level);
        assert_eq!(opts.max_file_size().as_slice(), &[1 << 20, 2 << 20, 4 << 20]);

        opts.refresh_derived_options(3, CompactionStyle::Fifo);
        assert!(opts.max_file_size().is_empty());
    }

    #[test]
    fn negative_level_count_derives_nothing() {
        let opts = leveled(1 << 20, 2, -1);
        assert!(opts.max_file_size().is_empty());
    }

    #[test]
    fn edits_by_name_rederive() {
        let base = leveled(1 << 20, 2, 4);

        let edited = base
            .to_builder()
            .apply([
                ("target_file_size_base", OptionValue::from(8u64 << 20)),
                ("target_file_size_multiplier", OptionValue::from(1)),
                ("disable_auto_compactions", OptionValue::from(true)),
            ])
            .unwrap()
            .build(4, CompactionStyle::Level);

        assert!(edited.disable_auto_compactions);
        assert_eq!(edited.max_file_size().as_slice(), &[8 << 20; 4]);
        // the source snapshot is untouched.
        assert_eq!(base.max_file_size_for_level(3), 8 << 20);
        assert!(!base.disable_auto_compactions);
    }

    #[test]
    fn unknown_and_immutable_names_are_rejected() {
        let err = MutableCfOptionsBuilder::new().set("no_such_option", 1).unwrap_err();
        assert!(matches!(err, OptionsError::UnknownOption(name) if name == "no_such_option"));

        let err = MutableCfOptionsBuilder::new().set("num_levels", 3).unwrap_err();
        assert!(matches!(err, OptionsError::ImmutableOption(name) if name == "num_levels"));
    }

    #[test]
    fn wrongly_typed_values_are_rejected() {
        let err = MutableCfOptionsBuilder::new()
            .set("paranoid_file_checks", 1)
            .unwrap_err();
        assert!(matches!(err, OptionsError::TypeMismatch { expected: "boolean", .. }));

        let err = MutableCfOptionsBuilder::new()
            .set("target_file_size_base", -1)
            .unwrap_err();
        assert!(matches!(err, OptionsError::OutOfRange { .. }));

        let err = MutableCfOptionsBuilder::new()
            .set("level0_stop_writes_trigger", u64::MAX)
            .unwrap_err();
        assert!(matches!(err, OptionsError::OutOfRange { .. }));
    }

    #[test]
    fn doubles_accept_integers() {
        let opts = MutableCfOptionsBuilder::new()
            .set("max_bytes_for_level_multiplier", 8)
            .unwrap()
            .build(7, CompactionStyle::Level);

        assert_eq!(opts.max_bytes_for_level_multiplier, 8.0);
    }

    #[test]
    fn dump_renders_every_field() {
        let logger = CaptureLogger::default();
        let opts = MutableCfOptions::new(&ColumnFamilyOptions::default());

        opts.dump(&logger);

        assert!(logger.contains("Options.write_buffer_size: 67108864"));
        assert!(logger.contains("Options.level0_stop_writes_trigger: 36"));
        assert!(logger.contains("Options.max_bytes_for_level_multiplier: 10.000000"));
        assert!(logger.contains("Options.max_bytes_for_level_multiplier_additional: 1, 1"));
        assert!(logger.contains("Options.max_file_size: 67108864"));
        assert!(logger.lines.lock().len() >= 24);
    }

    #[test]
    fn refresh_follows_the_fixed_set() {
        let mut opts = leveled(1 << 20, 2, 7);

        let cf = ColumnFamilyOptions {
            num_levels: 3,
            ..Default::default()
        };
        let shallow = ImmutableCfOptions::new(&crate::options::DbOptions::default(), &cf);
        opts.refresh_derived_options_for(&shallow);
        assert_eq!(opts.num_levels(), 3);
        assert_eq!(opts.max_file_size().as_slice(), &[1 << 20, 2 << 20, 4 << 20]);

        let cf = ColumnFamilyOptions {
            num_levels: 5,
            compaction_style: CompactionStyle::Universal,
            ..Default::default()
        };
        let universal = ImmutableCfOptions::new(&crate::options::DbOptions::default(), &cf);
        opts.refresh_derived_options_for(&universal);
        assert_eq!(opts.num_levels(), 5);
        assert_eq!(opts.compaction_style(), CompactionStyle::Universal);
        assert!(opts.max_file_size().is_empty());
    }

    #[cfg(feature = "indirect-values")]
    fn custom_indirect() -> IndirectValueOptions {
        IndirectValueOptions {
            allow_trivial_move: true,
            vlogring_activation_level: vec![2, 3],
            vlogfile_max_size: vec![8 << 20],
            ..Default::default()
        }
    }

    #[cfg(feature = "indirect-values")]
    #[test]
    fn new_copies_indirect_options() {
        let cf = ColumnFamilyOptions {
            indirect: custom_indirect(),
            ..Default::default()
        };

        let opts = MutableCfOptions::new(&cf);

        assert_eq!(opts.indirect, custom_indirect());
        assert_ne!(opts.indirect, IndirectValueOptions::default());
    }

    #[cfg(feature = "indirect-values")]
    #[test]
    fn dump_includes_indirect_options() {
        let logger = CaptureLogger::default();
        let cf = ColumnFamilyOptions {
            indirect: custom_indirect(),
            ..Default::default()
        };

        MutableCfOptions::new(&cf).dump(&logger);

        assert!(logger.contains("Options.vlogfile_max_size: [8388608]"));
        assert!(logger.contains("Options.allow_trivial_move: true"));
        assert!(logger.contains("Options.vlogring_activation_level: [2, 3]"));
    }

    #[cfg(feature = "indirect-values")]
    #[test]
    fn indirect_setter_republishes_through_handle() {
        use crate::handle::CfOptionsHandle;

        let handle = CfOptionsHandle::from_options(&Options::default());
        let before = handle.current();

        let after = handle.update(|b| b.indirect(custom_indirect()));

        assert_eq!(after.indirect, custom_indirect());
        assert_eq!(before.indirect, IndirectValueOptions::default());
        assert_eq!(handle.load().indirect.vlogfile_max_size_for_ring(1), 8 << 20);
        assert_eq!(handle.version(), 2);
    }
}
