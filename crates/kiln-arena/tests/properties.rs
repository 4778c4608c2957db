//! Integration tests: observable allocation properties of the arena.
//!
//! Covers alignment, bump monotonicity, default spacing, growth on
//! overflow, zero-size requests and boundary chunk sizes.

use kiln_arena::{Arena, ArenaConfig, ArenaError, ArenaState, DEFAULT_ALIGNMENT};
use kiln_test_utils::{assert_disjoint, replay, AllocOp};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("kiln_arena=trace")
        .try_init();
}

// ── Alignment ────────────────────────────────────────────────────────

#[test]
fn aligned_allocations_after_misaligned_prefix() {
    let mut arena = Arena::new(512).unwrap();
    let misaligned = arena.alloc_chars(7).unwrap();
    assert_eq!(misaligned.len(), 7);

    let a64 = arena.alloc_aligned(32, 64).unwrap();
    assert_eq!(a64.addr() % 64, 0);

    let a128 = arena.alloc_aligned(32, 128).unwrap();
    assert_eq!(a128.addr() % 128, 0);
    assert_disjoint(&[misaligned, a64, a128]);
}

#[test]
fn every_power_of_two_up_to_4096() {
    let mut arena = Arena::new(1024).unwrap();
    for shift in 0..=12 {
        let align = 1usize << shift;
        arena.alloc_chars(1).unwrap();
        let region = arena.alloc_aligned(24, align).unwrap();
        assert_eq!(region.addr() % align, 0, "align {align}");
    }
}

#[test]
fn large_alignment_in_fresh_chunk() {
    let mut arena = Arena::new(64).unwrap();
    let region = arena.alloc_aligned(16, 4096).unwrap();
    assert!(region.is_aligned_to(4096));
}

// ── Bump behaviour ───────────────────────────────────────────────────

#[test]
fn default_alignment_spacing_and_char_packing() {
    let mut arena = Arena::new(1024).unwrap();
    let p1 = arena.alloc(1).unwrap();
    let p2 = arena.alloc(1).unwrap();
    assert_eq!(p2.addr() - p1.addr(), DEFAULT_ALIGNMENT);
    let p3 = arena.alloc_chars(2).unwrap();
    assert_eq!(p3.addr() - p2.addr(), 1);
}

#[test]
fn bump_is_monotonic_within_a_chunk() {
    let mut arena = Arena::new(4096).unwrap();
    let ops = [
        AllocOp::Default(3),
        AllocOp::Chars(5),
        AllocOp::Aligned { size: 10, align: 32 },
        AllocOp::Default(0),
        AllocOp::Chars(1),
        AllocOp::Aligned { size: 7, align: 8 },
    ];
    let regions = replay(&mut arena, &ops).unwrap();
    assert_eq!(arena.chunk_count(), 1);
    for pair in regions.windows(2) {
        assert!(pair[1].addr() >= pair[0].end_addr());
        assert_eq!(pair[0].chunk(), pair[1].chunk());
    }
}

#[test]
fn older_chunks_are_not_revisited() {
    let mut arena = Arena::new(128).unwrap();
    let a = arena.alloc(64).unwrap();
    let b = arena.alloc(64).unwrap();
    let c = arena.alloc(64).unwrap();
    assert_eq!(a.chunk(), 0);
    assert!(c.chunk() >= 1);
    let d = arena.alloc_chars(1).unwrap();
    assert_eq!(d.chunk(), arena.chunk_count() - 1);
    assert_disjoint(&[a, b, c, d]);
}

// ── Growth ───────────────────────────────────────────────────────────

#[test]
fn overflow_moves_to_a_new_chunk() {
    init_tracing();
    let mut arena = Arena::new(1024).unwrap();
    let original_base = arena.chunk_base(0).unwrap();
    arena.alloc(1).unwrap();
    arena.alloc(1).unwrap();
    arena.alloc_chars(2).unwrap();

    let large = arena.alloc_chars(4000).unwrap();
    assert_eq!(large.chunk(), 1);
    assert_eq!(large.len(), 4000);
    assert_ne!(arena.chunk_base(1).unwrap(), original_base);
    assert!(arena.chunk_capacity(1).unwrap() >= 4000);
    // The first chunk is untouched.
    assert_eq!(arena.chunk_base(0), Some(original_base));
    assert_eq!(arena.chunk_capacity(0), Some(1024));
}

#[test]
fn lazy_arena_reserve_then_grow() {
    let mut arena = Arena::default();
    assert_eq!(arena.state(), ArenaState::Empty);
    arena.reserve(200).unwrap();
    let original_base = arena.chunk_base(0).unwrap();
    let p1 = arena.alloc(1).unwrap();
    let p2 = arena.alloc(1).unwrap();
    assert_eq!(p2.addr() - p1.addr(), DEFAULT_ALIGNMENT);
    let big = arena
        .alloc_chars(ArenaConfig::DEFAULT_CHUNK_SIZE + 1)
        .unwrap();
    assert_ne!(arena.chunk_base(big.chunk()).unwrap(), original_base);
}

#[test]
fn small_chunks_grow_repeatedly() {
    let mut arena = Arena::new(128).unwrap();
    let regions: Vec<_> = (0..3).map(|_| arena.alloc(64).unwrap()).collect();
    let large = arena.alloc(1024).unwrap();
    assert!(arena.chunk_count() >= 3);
    assert_eq!(large.len(), 1024);
    assert!(large.is_aligned_to(DEFAULT_ALIGNMENT));
    let mut all = regions;
    all.push(large);
    assert_disjoint(&all);
}

#[test]
fn failed_growth_is_reported_and_harmless() {
    let mut arena = Arena::new(256).unwrap();
    arena.alloc(16).unwrap();
    let before = arena.stats();

    let result = arena.alloc_chars(usize::MAX / 2);
    assert!(matches!(result, Err(ArenaError::OutOfMemory { .. })));
    assert_eq!(arena.stats(), before);

    let next = arena.alloc(16).unwrap();
    assert_eq!(next.chunk(), 0);
}

#[test]
fn chunk_limit_is_enforced() {
    let config = ArenaConfig::new(64).with_max_chunks(2);
    let mut arena = Arena::with_config(config).unwrap();
    arena.alloc_chars(64).unwrap();
    arena.alloc_chars(64).unwrap();
    assert_eq!(arena.chunk_count(), 2);
    // The second chunk was sized 65 bytes; one byte is left in it.
    let result = arena.alloc_chars(2);
    assert!(matches!(result, Err(ArenaError::CapacityExceeded { .. })));
    assert_eq!(arena.chunk_count(), 2);

    // After a reset the same chunks serve the same traffic again.
    arena.reset();
    arena.alloc_chars(64).unwrap();
    arena.alloc_chars(64).unwrap();
}

// ── Degenerate requests ──────────────────────────────────────────────

#[test]
fn zero_size_allocations_are_safe() {
    let mut arena = Arena::new(256).unwrap();
    let z1 = arena.alloc(0).unwrap();
    let z2 = arena.alloc(0).unwrap();
    assert!(z1.is_empty() && z2.is_empty());
    assert_ne!(z1.addr(), 0);
    assert_ne!(z2.addr(), 0);
    assert_eq!(arena.bytes(z1), Some(&[0u8; 0][..]));

    let real = arena.alloc(64).unwrap();
    assert_eq!(real.len(), 64);
    assert!(real.addr() >= z2.addr());
    arena.bytes_mut(real).unwrap().fill(7);
    assert!(arena.bytes(real).unwrap().iter().all(|&b| b == 7));
}

#[test]
fn zero_size_on_lazy_arena_creates_chunk() {
    let mut arena = Arena::default();
    let z = arena.alloc_chars(0).unwrap();
    assert_ne!(z.addr(), 0);
    assert_eq!(arena.state(), ArenaState::Active);
}

// ── Boundary chunk sizes ─────────────────────────────────────────────

#[test]
fn tiny_chunk_arena() {
    let mut arena = Arena::new(16).unwrap();
    let region = arena.alloc(8).unwrap();
    assert_eq!(region.len(), 8);
    arena.free();
}

#[test]
fn huge_chunk_arena() {
    let mut arena = Arena::new(10 * 1024 * 1024).unwrap();
    let region = arena.alloc(1024 * 1024).unwrap();
    assert_eq!(region.len(), 1024 * 1024);
    assert_eq!(region.chunk(), 0);
    arena.free();
}

// ── Randomized scripts ───────────────────────────────────────────────

#[cfg(not(miri))]
mod proptests {
    use super::*;
    use kiln_test_utils::arb_script;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn random_scripts_are_aligned_and_disjoint(
            chunk_size in 16usize..8192,
            ops in arb_script(64),
        ) {
            let mut arena = Arena::new(chunk_size).unwrap();
            let regions = replay(&mut arena, &ops).unwrap();
            for (op, region) in ops.iter().zip(&regions) {
                prop_assert_eq!(region.len(), op.size());
                prop_assert_eq!(region.addr() % op.align(), 0);
                prop_assert!(arena.bytes(*region).is_some());
            }
            assert_disjoint(&regions);
        }

        #[test]
        fn random_scripts_never_straddle_chunks(
            chunk_size in 16usize..2048,
            ops in arb_script(64),
        ) {
            let mut arena = Arena::new(chunk_size).unwrap();
            let regions = replay(&mut arena, &ops).unwrap();
            for region in &regions {
                let base = arena.chunk_base(region.chunk()).unwrap();
                let capacity = arena.chunk_capacity(region.chunk()).unwrap();
                prop_assert!(region.addr() >= base);
                prop_assert!(region.end_addr() <= base + capacity);
            }
        }
    }
}
