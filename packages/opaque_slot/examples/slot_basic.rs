//! Basic usage example for `OpaqueSlot`.
//!
//! This example demonstrates the value-semantic surface of the slot itself:
//! construction, access, cloning, in-place assignment, and swapping.

use opaque_slot::align::Align8;
use opaque_slot::{OpaqueSlot, Swappable};

fn main() {
    // A slot for one u64: eight bytes, eight-byte aligned, stored inline.
    let mut slot = OpaqueSlot::<u64, 8, Align8>::new(0xdead_beef_u64);

    println!("Initial value: {:#x}", *slot);

    // Mutate through DerefMut, like any by-value wrapper.
    *slot += 1;
    println!("After increment: {:#x}", *slot);

    // Cloning copy-constructs an independent value.
    let mut copy = slot.clone();
    assert_eq!(copy, slot);

    // clone_from assigns in place; the target value is mutated, not rebuilt.
    *copy = 7;
    copy.clone_from(&slot);
    assert_eq!(copy, slot);
    println!("Copy re-assigned to: {:#x}", *copy);

    // Larger types work the same way; the const expression keeps the
    // reservation honest on every platform.
    let text = OpaqueSlot::<String, { size_of::<String>() }, Align8>::new("inline".to_string());
    println!("String length through the slot: {}", text.len());

    // The contained value can be moved back out; the slot's destructor
    // does not run a second time on it.
    let extracted = text.into_inner();
    println!("Extracted: {extracted}");

    // Swapping slots exchanges the two live values in place.
    let mut a = OpaqueSlot::<Pair, { size_of::<Pair>() }, Align8>::new(Pair { x: 1, y: 2 });
    let mut b = OpaqueSlot::<Pair, { size_of::<Pair>() }, Align8>::new(Pair { x: 3, y: 4 });
    a.swap_with(&mut b);
    println!("After swap: a = ({}, {}), b = ({}, {})", a.x, a.y, b.x, b.y);

    println!("The slots themselves allocated nothing; every value lived inline");
}

/// A small value type that opts into the default bitwise exchange.
struct Pair {
    x: u64,
    y: u64,
}

impl Swappable for Pair {}
