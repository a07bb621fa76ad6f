//! Compression Module.

use std::fmt;

use crate::config;

/// Block compression codecs a table writer may be asked to use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CompressionType {
    None,
    Snappy,
    Zlib,
    BZip2,
    Lz4,
    Lz4hc,
    Xpress,
    Zstd,
}

impl CompressionType {
    /// Returns `true` if a codec for this type is compiled into the binary.
    pub fn is_supported(self) -> bool {
        match self {
            CompressionType::None => true,
            CompressionType::Zstd => cfg!(feature = "zstd"),
            _ => false,
        }
    }

    /// The fast general-purpose codec if one is available, else no compression.
    pub fn default_fast() -> Self {
        if CompressionType::Zstd.is_supported() {
            CompressionType::Zstd
        } else {
            CompressionType::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionType::None => "NoCompression",
            CompressionType::Snappy => "Snappy",
            CompressionType::Zlib => "Zlib",
            CompressionType::BZip2 => "BZip2",
            CompressionType::Lz4 => "LZ4",
            CompressionType::Lz4hc => "LZ4HC",
            CompressionType::Xpress => "Xpress",
            CompressionType::Zstd => "ZSTD",
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Codec tuning shared by every level of a column family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CompressionOptions {
    pub window_bits: i32,

    /// Codec specific level, `None` lets the codec pick its own default.
    pub level: Option<i32>,

    pub strategy: i32,

    /// Maximum size of the dictionary trained from the bottommost level, 0 disables it.
    pub max_dict_bytes: u32,
}

impl CompressionOptions {
    /// Level handed to zstd: the configured level clamped into the range
    /// the linked library accepts.
    #[cfg(feature = "zstd")]
    pub fn zstd_level(&self) -> i32 {
        match self.level {
            Some(level) => {
                let range = zstd::compression_level_range();
                level.clamp(*range.start(), *range.end())
            }
            None => zstd::DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            window_bits: config::DEFAULT_COMPRESSION_WINDOW_BITS,
            level: None,
            strategy: 0,
            max_dict_bytes: 0,
        }
    }
}

impl fmt::Display for CompressionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.level.map_or_else(|| "default".to_string(), |l| l.to_string());
        write!(
            f,
            "window_bits={} level={} strategy={} max_dict_bytes={}",
            self.window_bits, level, self.strategy, self.max_dict_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_compression_is_always_supported() {
        assert!(CompressionType::None.is_supported());
        assert!(!CompressionType::Snappy.is_supported());
    }

    #[test]
    fn default_fast_is_supported() {
        let fast = CompressionType::default_fast();
        assert!(fast.is_supported());

        if cfg!(feature = "zstd") {
            assert_eq!(fast, CompressionType::Zstd);
        } else {
            assert_eq!(fast, CompressionType::None);
        }
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn zstd_level_is_clamped() {
        let mut opts = CompressionOptions::default();
        assert_eq!(opts.zstd_level(), zstd::DEFAULT_COMPRESSION_LEVEL);

        opts.level = Some(i32::MAX);
        assert_eq!(opts.zstd_level(), *zstd::compression_level_range().end());

        opts.level = Some(5);
        assert_eq!(opts.zstd_level(), 5);
    }
}
