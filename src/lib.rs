//! Column family options for an LSM storage engine.
//!
//! Options are split into an [`ImmutableCfOptions`] fixed when the column
//! family opens, and [`MutableCfOptions`] snapshots that may be replaced at
//! runtime through a [`CfOptionsHandle`].
mod config;
mod error;

pub mod compaction;
pub mod compression;
pub mod derived;
pub mod handle;
pub mod hooks;
pub mod immutable;
#[cfg(feature = "indirect-values")]
pub mod indirect;
pub mod mutable;
pub mod options;
pub mod resources;

pub use compaction::{CompactionPri, CompactionStyle};
pub use compression::{CompressionOptions, CompressionType};
pub use derived::{multiply_check_overflow, MaxFileSizes};
pub use error::{OptionsError, Result};
pub use handle::CfOptionsHandle;
pub use immutable::ImmutableCfOptions;
pub use mutable::{MutableCfOptions, MutableCfOptionsBuilder, MutableCfSettings, OptionValue};
pub use options::{ColumnFamilyOptions, DbOptions, Options};
