use std::mem::MaybeUninit;

/// Raw storage for a reservation of `SIZE` bytes at the alignment of `A`.
///
/// This is the entire memory footprint of an [`OpaqueSlot`][crate::OpaqueSlot]:
/// a zero-sized alignment marker followed by the reserved bytes, embedded
/// directly in the owner with no separate allocation. The bytes start
/// uninitialized and the storage itself never tracks whether a value lives in
/// them; that is the owner's invariant.
#[repr(C)]
pub(crate) struct Reserved<const SIZE: usize, A> {
    /// Zero-sized, zero-cost; only its alignment requirement matters.
    _alignment: [A; 0],

    /// The reserved bytes. The hidden value, once constructed, lives at
    /// offset zero of this array.
    bytes: [MaybeUninit<u8>; SIZE],
}

impl<const SIZE: usize, A> Reserved<SIZE, A> {
    /// Creates a reservation with all bytes uninitialized.
    #[must_use]
    pub(crate) const fn uninit() -> Self {
        Self {
            _alignment: [],
            bytes: [MaybeUninit::uninit(); SIZE],
        }
    }

    /// Returns a pointer to the start of the reserved bytes.
    #[must_use]
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr().cast()
    }

    /// Returns a mutable pointer to the start of the reserved bytes.
    #[must_use]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr().cast()
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use static_assertions::const_assert_eq;

    use super::*;
    use crate::align::{Align1, Align8, Align16};

    // The alignment marker contributes no bytes of its own; the reservation
    // is padded out to its declared alignment, exactly like any Rust struct.
    const_assert_eq!(mem::align_of::<Reserved<8, Align8>>(), 8);
    const_assert_eq!(mem::size_of::<Reserved<8, Align8>>(), 8);
    const_assert_eq!(mem::align_of::<Reserved<4, Align16>>(), 16);
    const_assert_eq!(mem::align_of::<Reserved<1, Align1>>(), 1);
    const_assert_eq!(mem::size_of::<Reserved<1, Align1>>(), 1);
    const_assert_eq!(mem::align_of::<Reserved<16, u64>>(), 8);

    #[test]
    fn bytes_start_at_offset_zero() {
        let reserved = Reserved::<8, Align8>::uninit();
        let base: *const Reserved<8, Align8> = &raw const reserved;
        assert_eq!(base.cast::<u8>(), reserved.as_ptr());
    }

    #[test]
    fn pointer_is_aligned_to_archetype() {
        let reserved = Reserved::<4, Align16>::uninit();
        assert_eq!(reserved.as_ptr().addr() % 16, 0);
    }
}
