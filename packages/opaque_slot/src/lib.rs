//! A fixed-layout inline slot that stores one value of a hidden type without
//! heap allocation.
//!
//! This crate provides [`OpaqueSlot`], a value-semantic wrapper that embeds
//! its contents directly in a reservation of declared size and alignment. A
//! public-facing type declares the reservation next to a representation type
//! whose definition stays private; the reservation is validated against the
//! real type at compile time, at every operation, so the two can never drift
//! apart silently.
//!
//! # Key features
//!
//! - **No heap allocation**: The hidden value lives inside the slot, which
//!   lives inside its owner
//! - **Compile-time layout contract**: Declared size must match exactly and
//!   declared alignment must suffice; violations fail the build, never the run
//! - **Full value semantics**: Construct, clone, assign in place, swap, and
//!   drop all delegate to the hidden type's own operations
//! - **No empty state**: Every live slot holds exactly one live value from
//!   construction to drop
//! - **Customizable exchange**: The [`Swappable`] trait lets a hidden type
//!   specialize how two values trade places
//! - **Opaque by default**: [`std::fmt::Debug`] output never exposes the
//!   representation
//!
//! # Hiding a representation
//!
//! The intended use is the private-representation pattern: the slot's owner
//! exposes behavior while the stored type, and everything about its layout
//! except the reservation, stays out of the public surface.
//!
//! ```
//! mod public_api {
//!     use opaque_slot::OpaqueSlot;
//!     use opaque_slot::align::Align4;
//!
//!     /// The representation; private to this module.
//!     struct Body {
//!         reading: i32,
//!         revision: i32,
//!     }
//!
//!     /// The public-facing type. Callers see behavior, not layout.
//!     pub struct Meter {
//!         body: OpaqueSlot<Body, 8, Align4>,
//!     }
//!
//!     impl Meter {
//!         pub fn new(reading: i32) -> Self {
//!             Self {
//!                 body: OpaqueSlot::new(Body {
//!                     reading,
//!                     revision: 0,
//!                 }),
//!             }
//!         }
//!
//!         pub fn set(&mut self, reading: i32) {
//!             self.body.reading = reading;
//!             self.body.revision = self.body.revision.wrapping_add(1);
//!         }
//!
//!         pub fn reading(&self) -> i32 {
//!             self.body.reading
//!         }
//!     }
//! }
//!
//! let mut meter = public_api::Meter::new(0);
//! meter.set(4);
//! assert_eq!(meter.reading(), 4);
//! ```
//!
//! # Value semantics
//!
//! ```
//! use opaque_slot::OpaqueSlot;
//! use opaque_slot::align::Align8;
//!
//! let mut a = OpaqueSlot::<u64, 8, Align8>::new(1);
//! let b = a.clone(); // copy-construct
//! a.clone_from(&b); // assign in place
//! *a += 1; // mutate through the slot
//!
//! assert_eq!(*a, 2);
//! assert_eq!(*b, 1);
//! ```
//!
//! # Layout mismatches do not compile
//!
//! Size is an exact match:
//!
//! ```compile_fail
//! use opaque_slot::OpaqueSlot;
//! use opaque_slot::align::Align8;
//!
//! // 16 bytes reserved for an 8-byte type: build failure.
//! let slot = OpaqueSlot::<u64, 16, Align8>::new(1);
//! ```
//!
//! Alignment is a sufficiency check:
//!
//! ```compile_fail
//! use opaque_slot::OpaqueSlot;
//! use opaque_slot::align::Align2;
//!
//! // u32 needs 4-byte alignment but only 2 is reserved: build failure.
//! let slot = OpaqueSlot::<u32, 4, Align2>::new(1);
//! ```

pub mod align;
mod reserved;
mod slot;
mod swappable;

pub(crate) use reserved::*;
pub use slot::OpaqueSlot;
pub use swappable::Swappable;
