//! Demonstrates the lifecycle of values held in an `OpaqueSlot`.
//!
//! A public-facing `Meter` type hides its representation behind a slot and a
//! private module. The representation traces every special-member call, so
//! the program output shows exactly when values are constructed, swapped,
//! and destroyed:
//!
//! ```text
//! constructed
//! 0 0
//! 4 1
//! constructed
//! swapped
//! 4 1
//! 2 2
//! destructed
//! -1 0
//! destructed
//! ```

use meter::Meter;

fn main() {
    let mut outer = Meter::default(); // constructed
    outer.print();
    outer.set(4);
    outer.print();

    {
        let mut inner = Meter::with_reading(-1); // constructed
        inner.swap(&mut outer); // swapped
        inner.print();
        inner.set(2);
        inner.print();
    } // destructed

    outer.print();
} // destructed

mod meter {
    use opaque_slot::align::Align4;
    use opaque_slot::{OpaqueSlot, Swappable};

    use self::body::MeterBody;

    /// The reservation: two `i32` fields, declared without looking at the
    /// representation's definition. The slot verifies the declaration against
    /// `MeterBody` wherever the two meet.
    type MeterSlot = OpaqueSlot<MeterBody, { 2 * size_of::<i32>() }, Align4>;

    /// Public-facing type; its representation stays inside [`body`].
    pub struct Meter {
        body: MeterSlot,
    }

    impl Meter {
        /// Creates a meter with the given initial reading.
        pub fn with_reading(reading: i32) -> Self {
            Self {
                body: OpaqueSlot::new(MeterBody::new(reading)),
            }
        }

        /// Records a new reading and bumps the revision counter.
        pub fn set(&mut self, reading: i32) {
            self.body.set(reading);
        }

        /// Prints the current reading and revision.
        pub fn print(&self) {
            self.body.print();
        }

        /// Exchanges the contents of two meters in place.
        pub fn swap(&mut self, other: &mut Self) {
            self.body.swap_with(&mut other.body);
        }
    }

    impl Default for Meter {
        fn default() -> Self {
            Self::with_reading(0)
        }
    }

    /// The representation, private to this module. Everything below could
    /// move to its own file (or change shape entirely, within the reserved
    /// layout) without touching the surface above.
    mod body {
        use std::mem;

        use opaque_slot::Swappable;

        pub(super) struct MeterBody {
            reading: i32,
            revision: i32,
        }

        impl MeterBody {
            pub(super) fn new(reading: i32) -> Self {
                println!("constructed");
                Self {
                    reading,
                    revision: 0,
                }
            }

            pub(super) fn set(&mut self, reading: i32) {
                self.reading = reading;
                // The revision is a trace aid; wrapping is fine.
                self.revision = self.revision.wrapping_add(1);
            }

            pub(super) fn print(&self) {
                println!("{} {}", self.reading, self.revision);
            }
        }

        impl Swappable for MeterBody {
            fn swap_with(&mut self, other: &mut Self) {
                println!("swapped");
                mem::swap(&mut self.reading, &mut other.reading);
                mem::swap(&mut self.revision, &mut other.revision);
            }
        }

        impl Drop for MeterBody {
            fn drop(&mut self) {
                println!("destructed");
            }
        }
    }
}
