//! Standard allocation workloads and proptest strategies.

use proptest::prelude::*;

use crate::AllocOp;

/// `count` default-aligned requests cycling through sizes 1 to 32.
pub fn small_varying_ops(count: usize) -> Vec<AllocOp> {
    (0..count).map(|i| AllocOp::Default(i % 32 + 1)).collect()
}

/// `count` default-aligned requests of `size` bytes each.
pub fn large_ops(count: usize, size: usize) -> Vec<AllocOp> {
    vec![AllocOp::Default(size); count]
}

/// A single request of 0 to 4 KiB with any of the three alignment modes.
///
/// Explicit alignments range over the powers of two up to 4096.
pub fn arb_alloc_op() -> impl Strategy<Value = AllocOp> {
    prop_oneof![
        (0usize..4096).prop_map(AllocOp::Default),
        (0usize..4096).prop_map(AllocOp::Chars),
        (0usize..4096, 0u32..13).prop_map(|(size, shift)| AllocOp::Aligned {
            size,
            align: 1 << shift,
        }),
    ]
}

/// Between 1 and `max_len` random requests.
pub fn arb_script(max_len: usize) -> impl Strategy<Value = Vec<AllocOp>> {
    proptest::collection::vec(arb_alloc_op(), 1..=max_len)
}
