//! Derived per-level file size targets.

use crate::compaction::CompactionStyle;

/// Returns `a * b` if the product fits in a `u64`, `None` on overflow.
#[inline]
pub fn multiply_check_overflow(a: u64, b: u64) -> Option<u64> {
    a.checked_mul(b)
}

/// Maximum file size of every level, derived from the target file size base
/// and multiplier.
///
/// Empty for every compaction style other than leveled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaxFileSizes {
    sizes: Vec<u64>,
    overflow_level: Option<usize>,
}

impl MaxFileSizes {
    /// Level 0 gets `base`, and each following level multiplies the previous
    /// one by `multiplier`. The first level whose product overflows, and every
    /// level after it, is saturated to `u64::MAX`.
    pub fn derive(num_levels: usize, style: CompactionStyle, base: u64, multiplier: u64) -> Self {
        if !style.is_leveled() {
            return Self::default();
        }

        let mut sizes = Vec::with_capacity(num_levels);
        let mut overflow_level = None;

        for level in 0..num_levels {
            let size = match sizes.last() {
                None => base,
                Some(_) if overflow_level.is_some() => u64::MAX,
                Some(&prev) => match multiply_check_overflow(prev, multiplier) {
                    Some(size) => size,
                    None => {
                        log::warn!(
                            "target file size of level {} overflows ({} * {}), saturating",
                            level,
                            prev,
                            multiplier
                        );
                        overflow_level = Some(level);
                        u64::MAX
                    }
                },
            };
            sizes.push(size);
        }

        Self {
            sizes,
            overflow_level,
        }
    }

    pub fn get(&self, level: usize) -> Option<u64> {
        self.sizes.get(level).copied()
    }

    /// First level whose size saturated, if any.
    pub fn overflow_level(&self) -> Option<usize> {
        self.overflow_level
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_detects_overflow() {
        assert_eq!(multiply_check_overflow(0, u64::MAX), Some(0));
        assert_eq!(multiply_check_overflow(1 << 32, 1 << 31), Some(1 << 63));
        assert_eq!(multiply_check_overflow(1 << 32, 1 << 32), None);
        assert_eq!(multiply_check_overflow(u64::MAX, 2), None);
    }

    #[test]
    fn level_zero_is_the_base() {
        for multiplier in [0, 1, 2, 10] {
            let sizes = MaxFileSizes::derive(4, CompactionStyle::Level, 2 << 20, multiplier);
            assert_eq!(sizes.get(0), Some(2 << 20));
        }
    }

    #[test]
    fn levels_grow_geometrically() {
        let sizes = MaxFileSizes::derive(6, CompactionStyle::Level, 1000, 10);

        assert_eq!(
            sizes.as_slice(),
            &[1000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000]
        );
        assert_eq!(sizes.overflow_level(), None);
    }

    #[test]
    fn overflow_saturates_every_later_level() {
        let sizes = MaxFileSizes::derive(5, CompactionStyle::Level, 1 << 62, 4);

        assert_eq!(sizes.get(0), Some(1 << 62));
        assert_eq!(sizes.overflow_level(), Some(1));
        for level in 1..5 {
            assert_eq!(sizes.get(level), Some(u64::MAX));
        }
    }

    #[test]
    fn multiplier_of_one_never_overflows() {
        let sizes = MaxFileSizes::derive(7, CompactionStyle::Level, u64::MAX, 1);

        assert!(sizes.as_slice().iter().all(|s| *s == u64::MAX));
        assert_eq!(sizes.overflow_level(), None);
    }

    #[test]
    fn non_leveled_styles_derive_nothing() {
        for style in [
            CompactionStyle::Universal,
            CompactionStyle::Fifo,
            CompactionStyle::None,
        ] {
            let sizes = MaxFileSizes::derive(7, style, 64 << 20, 2);
            assert!(sizes.is_empty());
            assert_eq!(sizes.get(0), None);
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = MaxFileSizes::derive(7, CompactionStyle::Level, 3 << 40, 7);
        let b = MaxFileSizes::derive(7, CompactionStyle::Level, 3 << 40, 7);
        assert_eq!(a, b);
    }
}
