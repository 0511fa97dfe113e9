//! Alignment archetypes for declaring the alignment of a reservation.
//!
//! An [`OpaqueSlot`][crate::OpaqueSlot] never inspects the archetype's value, only
//! its alignment. Any type works as an archetype (`u64`, `[usize; 2]`, your own
//! `repr(align)` struct); the unit structs here exist so a reservation can spell
//! out its alignment as a number without inventing a carrier type.
//!
//! # Examples
//!
//! ```
//! use opaque_slot::OpaqueSlot;
//! use opaque_slot::align::Align8;
//!
//! let slot = OpaqueSlot::<u64, 8, Align8>::new(42);
//! assert_eq!(*slot, 42);
//! ```

/// Archetype for 1-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(1))]
pub struct Align1;

/// Archetype for 2-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(2))]
pub struct Align2;

/// Archetype for 4-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(4))]
pub struct Align4;

/// Archetype for 8-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(8))]
pub struct Align8;

/// Archetype for 16-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(16))]
pub struct Align16;

/// Archetype for 32-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(32))]
pub struct Align32;

/// Archetype for 64-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(64))]
pub struct Align64;

/// Archetype for 128-byte alignment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(align(128))]
pub struct Align128;

/// The default archetype when a reservation does not declare an alignment.
///
/// Matches the strictest alignment of any primitive type on mainstream
/// targets, so a reservation without an explicit alignment accepts any
/// ordinarily-aligned hidden type, the same way C++ `aligned_storage`
/// defaults to `max_align_t`.
pub type MaxAlign = Align16;

#[cfg(test)]
mod tests {
    use std::mem;

    use static_assertions::const_assert_eq;

    use super::*;

    const_assert_eq!(mem::align_of::<Align1>(), 1);
    const_assert_eq!(mem::align_of::<Align2>(), 2);
    const_assert_eq!(mem::align_of::<Align4>(), 4);
    const_assert_eq!(mem::align_of::<Align8>(), 8);
    const_assert_eq!(mem::align_of::<Align16>(), 16);
    const_assert_eq!(mem::align_of::<Align32>(), 32);
    const_assert_eq!(mem::align_of::<Align64>(), 64);
    const_assert_eq!(mem::align_of::<Align128>(), 128);
    const_assert_eq!(mem::align_of::<MaxAlign>(), 16);

    // The archetypes carry no payload.
    const_assert_eq!(mem::size_of::<Align1>(), 0);
    const_assert_eq!(mem::size_of::<Align128>(), 0);

    #[test]
    fn arbitrary_types_work_as_archetypes() {
        // Nothing special about the unit structs; any type's alignment counts.
        assert_eq!(mem::align_of::<u64>(), 8);
        assert_eq!(mem::align_of::<[u32; 4]>(), 4);
    }
}
