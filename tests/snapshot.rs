use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use cfopts::{CfOptionsHandle, ColumnFamilyOptions, CompactionStyle, DbOptions, OptionValue};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every snapshot a reader sees must have sizes derived from its own settings.
fn assert_consistent(snapshot: &cfopts::MutableCfOptions) {
    let base = snapshot.target_file_size_base;
    let multiplier = snapshot.target_file_size_multiplier as u64;

    let mut expected = base;
    for level in 0..snapshot.num_levels() as usize {
        assert_eq!(snapshot.max_file_size_for_level(level), expected);
        expected = expected.saturating_mul(multiplier);
    }
}

#[test]
fn readers_never_see_a_torn_snapshot() {
    init();

    let cf = ColumnFamilyOptions {
        num_levels: 6,
        target_file_size_base: 1 << 20,
        target_file_size_multiplier: 2,
        ..Default::default()
    };
    let handle = Arc::new(CfOptionsHandle::open(&DbOptions::default(), &cf));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut seen = 0u64;
                while !done.load(Ordering::Acquire) {
                    assert_consistent(&handle.load());
                    seen += 1;
                }
                seen
            })
        })
        .collect();

    let writers: Vec<_> = (1..=4u64)
        .map(|w| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for i in 1..=50u64 {
                    handle
                        .set_options([
                            ("target_file_size_base", OptionValue::from((w * 100 + i) << 10)),
                            ("target_file_size_multiplier", OptionValue::from((i % 4 + 1) as i32)),
                        ])
                        .unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }

    // one initial snapshot plus one per edit, none lost.
    assert_eq!(handle.version(), 1 + 4 * 50);
    assert_consistent(&handle.current());
}

#[test]
fn overflowing_edit_saturates_instead_of_wrapping() {
    init();

    let cf = ColumnFamilyOptions {
        num_levels: 5,
        compaction_style: CompactionStyle::Level,
        ..Default::default()
    };
    let handle = CfOptionsHandle::open(&DbOptions::default(), &cf);

    let snapshot = handle.update(|b| b.target_file_size_base(1 << 62).target_file_size_multiplier(4));

    assert_eq!(snapshot.max_file_size_for_level(0), 1 << 62);
    assert_eq!(snapshot.max_file_size().overflow_level(), Some(1));
    assert!((1..5).all(|level| snapshot.max_file_size_for_level(level) == u64::MAX));
}

#[test]
fn fixed_set_is_shared_across_snapshots() {
    init();

    let handle = CfOptionsHandle::from_options(&cfopts::Options::default());
    let fixed = Arc::clone(handle.immutable());

    handle.update(|b| b.write_buffer_size(8 << 20));

    assert!(Arc::ptr_eq(&fixed, handle.immutable()));
    assert_eq!(handle.load().write_buffer_size, 8 << 20);
}
