//! Power-of-two alignment arithmetic shared by every allocation path.

use crate::error::ArenaError;

/// Alignment used by [`Arena::alloc`](crate::Arena::alloc).
///
/// 16 bytes: the alignment of `max_align_t` on x86_64 and aarch64, and of
/// `u128` and 128-bit SIMD vectors. Two back-to-back `alloc(1)` calls on a
/// fresh chunk are exactly this many bytes apart.
pub const DEFAULT_ALIGNMENT: usize = 16;

/// Reject alignments that are zero or not a power of two.
pub fn check(align: usize) -> Result<(), ArenaError> {
    if align.is_power_of_two() {
        Ok(())
    } else {
        Err(ArenaError::InvalidAlignment { align })
    }
}

/// Round `x` up to the next multiple of `align`.
///
/// Returns `None` if the result does not fit in `usize`. `align` must be a
/// power of two.
#[inline]
pub fn round_up(x: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    x.checked_add(mask).map(|v| v & !mask)
}

/// Bytes needed to move `addr` forward to the next multiple of `align`.
///
/// Always `< align`. `align` must be a power of two.
#[inline]
pub fn padding(addr: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    addr.wrapping_neg() & (align - 1)
}
