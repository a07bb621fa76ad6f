//! Tuning for values stored indirectly in value-log rings.
//!
//! Every list is indexed by ring number; a ring past the end of a list uses
//! the list's last entry.

use crate::compression::CompressionType;
use crate::config;
use crate::error::{OptionsError, Result};
use crate::mutable::OptionValue;
use crate::resources::{Level, Logger};

#[derive(Debug, Clone, PartialEq)]
pub struct IndirectValueOptions {
    /// Allow files to move down a level without being rewritten.
    pub allow_trivial_move: bool,
    pub vlogring_activation_level: Vec<u32>,
    pub min_indirect_val_size: Vec<usize>,
    pub fraction_remapped_during_compaction: Vec<f32>,
    pub fraction_remapped_during_active_recycling: Vec<f32>,
    pub fragmentation_active_recycling_trigger: Vec<f32>,
    pub fragmentation_active_recycling_klaxon: Vec<f32>,
    pub active_recycling_sst_minct: Vec<usize>,
    pub active_recycling_sst_maxct: Vec<usize>,
    pub active_recycling_vlogfile_freed_min: Vec<usize>,
    pub vlogfile_max_size: Vec<u64>,
    pub compaction_picker_age_importance: Vec<f32>,
    pub ring_compression_style: Vec<CompressionType>,
}

impl IndirectValueOptions {
    /// Names accepted by [`set`](Self::set).
    pub(crate) const OPTION_NAMES: &[&str] = &[
        "allow_trivial_move",
        "vlogring_activation_level",
        "min_indirect_val_size",
        "fraction_remapped_during_compaction",
        "fraction_remapped_during_active_recycling",
        "fragmentation_active_recycling_trigger",
        "fragmentation_active_recycling_klaxon",
        "active_recycling_sst_minct",
        "active_recycling_sst_maxct",
        "active_recycling_vlogfile_freed_min",
        "vlogfile_max_size",
        "compaction_picker_age_importance",
        "ring_compression_style",
    ];

    pub(crate) fn set(&mut self, name: &str, value: &OptionValue) -> Result<()> {
        match name {
            "allow_trivial_move" => self.allow_trivial_move = value.as_bool(name)?,
            "vlogring_activation_level" => {
                self.vlogring_activation_level = value.as_uint_list(name)?
            }
            "min_indirect_val_size" => self.min_indirect_val_size = value.as_uint_list(name)?,
            "fraction_remapped_during_compaction" => {
                self.fraction_remapped_during_compaction = value.as_f32_list(name)?
            }
            "fraction_remapped_during_active_recycling" => {
                self.fraction_remapped_during_active_recycling = value.as_f32_list(name)?
            }
            "fragmentation_active_recycling_trigger" => {
                self.fragmentation_active_recycling_trigger = value.as_f32_list(name)?
            }
            "fragmentation_active_recycling_klaxon" => {
                self.fragmentation_active_recycling_klaxon = value.as_f32_list(name)?
            }
            "active_recycling_sst_minct" => {
                self.active_recycling_sst_minct = value.as_uint_list(name)?
            }
            "active_recycling_sst_maxct" => {
                self.active_recycling_sst_maxct = value.as_uint_list(name)?
            }
            "active_recycling_vlogfile_freed_min" => {
                self.active_recycling_vlogfile_freed_min = value.as_uint_list(name)?
            }
            "vlogfile_max_size" => self.vlogfile_max_size = value.as_uint_list(name)?,
            "compaction_picker_age_importance" => {
                self.compaction_picker_age_importance = value.as_f32_list(name)?
            }
            "ring_compression_style" => {
                self.ring_compression_style = value.as_compression_list(name)?
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }

        Ok(())
    }

    /// Compression applied to values of `ring`.
    pub fn ring_compression(&self, ring: usize) -> CompressionType {
        per_ring(&self.ring_compression_style, ring).unwrap_or(CompressionType::None)
    }

    pub fn vlogfile_max_size_for_ring(&self, ring: usize) -> u64 {
        per_ring(&self.vlogfile_max_size, ring).unwrap_or(config::DEFAULT_VLOGFILE_MAX_SIZE)
    }

    pub(crate) fn dump(&self, logger: &dyn Logger) {
        let lines = [
            format!("allow_trivial_move: {}", self.allow_trivial_move),
            format!("vlogring_activation_level: {:?}", self.vlogring_activation_level),
            format!("min_indirect_val_size: {:?}", self.min_indirect_val_size),
            format!(
                "fraction_remapped_during_compaction: {:?}",
                self.fraction_remapped_during_compaction
            ),
            format!(
                "fraction_remapped_during_active_recycling: {:?}",
                self.fraction_remapped_during_active_recycling
            ),
            format!(
                "fragmentation_active_recycling_trigger: {:?}",
                self.fragmentation_active_recycling_trigger
            ),
            format!(
                "fragmentation_active_recycling_klaxon: {:?}",
                self.fragmentation_active_recycling_klaxon
            ),
            format!("active_recycling_sst_minct: {:?}", self.active_recycling_sst_minct),
            format!("active_recycling_sst_maxct: {:?}", self.active_recycling_sst_maxct),
            format!(
                "active_recycling_vlogfile_freed_min: {:?}",
                self.active_recycling_vlogfile_freed_min
            ),
            format!("vlogfile_max_size: {:?}", self.vlogfile_max_size),
            format!(
                "compaction_picker_age_importance: {:?}",
                self.compaction_picker_age_importance
            ),
            format!("ring_compression_style: {:?}", self.ring_compression_style),
        ];

        for line in lines {
            logger.log(Level::Info, &format!("  Options.{line}"));
        }
    }
}

fn per_ring<T: Copy>(values: &[T], ring: usize) -> Option<T> {
    values.get(ring).or_else(|| values.last()).copied()
}

impl Default for IndirectValueOptions {
    fn default() -> Self {
        Self {
            allow_trivial_move: false,
            vlogring_activation_level: vec![1],
            min_indirect_val_size: vec![0],
            fraction_remapped_during_compaction: vec![0.5],
            fraction_remapped_during_active_recycling: vec![0.25],
            fragmentation_active_recycling_trigger: vec![0.25],
            fragmentation_active_recycling_klaxon: vec![0.5],
            active_recycling_sst_minct: vec![5],
            active_recycling_sst_maxct: vec![15],
            active_recycling_vlogfile_freed_min: vec![7],
            vlogfile_max_size: vec![config::DEFAULT_VLOGFILE_MAX_SIZE],
            compaction_picker_age_importance: vec![10.0],
            ring_compression_style: vec![CompressionType::Zlib],
        }
    }
}
