//! End-to-end scenario for `opaque_slot`: a public-facing type with a traced
//! private representation, exercised through construct, mutate, swap, and
//! scope-ordered destruction.
//!
//! Mirrors the `trace_demo` example, but records the trace instead of
//! printing it so the exact event order can be asserted.

use std::cell::RefCell;
use std::mem;

use opaque_slot::align::Align4;
use opaque_slot::{OpaqueSlot, Swappable};

thread_local! {
    static TRACE: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn trace(event: impl Into<String>) {
    TRACE.with(|t| t.borrow_mut().push(event.into()));
}

fn take_trace() -> Vec<String> {
    TRACE.with(|t| t.borrow_mut().drain(..).collect())
}

/// The private representation: two `i32` fields plus trace side effects.
struct MeterBody {
    reading: i32,
    revision: i32,
}

impl MeterBody {
    fn new(reading: i32) -> Self {
        trace("constructed");
        Self {
            reading,
            revision: 0,
        }
    }
}

impl Clone for MeterBody {
    fn clone(&self) -> Self {
        trace("copyconstructed");
        Self {
            reading: self.reading,
            revision: self.revision,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        trace("copied");
        self.reading = source.reading;
        self.revision = source.revision;
    }
}

impl Swappable for MeterBody {
    fn swap_with(&mut self, other: &mut Self) {
        trace("swapped");
        mem::swap(&mut self.reading, &mut other.reading);
        mem::swap(&mut self.revision, &mut other.revision);
    }
}

impl Drop for MeterBody {
    fn drop(&mut self) {
        trace("destructed");
    }
}

/// The public-facing type: reservation declared as two `i32`s.
struct Meter {
    body: OpaqueSlot<MeterBody, { 2 * size_of::<i32>() }, Align4>,
}

impl Meter {
    fn with_reading(reading: i32) -> Self {
        Self {
            body: OpaqueSlot::new(MeterBody::new(reading)),
        }
    }

    fn set(&mut self, reading: i32) {
        self.body.reading = reading;
        self.body.revision = self.body.revision.wrapping_add(1);
    }

    fn print(&self) {
        trace(format!("{} {}", self.body.reading, self.body.revision));
    }

    fn swap(&mut self, other: &mut Self) {
        self.body.swap_with(&mut other.body);
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::with_reading(0)
    }
}

impl Clone for Meter {
    fn clone(&self) -> Self {
        Self {
            body: self.body.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.body.clone_from(&source.body);
    }
}

#[test]
fn demonstration_scenario_trace_order() {
    {
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

    assert_eq!(
        take_trace(),
        [
            "constructed",
            "0 0",
            "4 1",
            "constructed",
            "swapped",
            "4 1",
            "2 2",
            "destructed",
            "-1 0",
            "destructed",
        ]
    );
}

#[test]
fn copy_semantics_delegate_to_the_representation() {
    {
        let original = Meter::with_reading(3); // constructed
        let mut copy = original.clone(); // copyconstructed
        copy.clone_from(&original); // copied
    } // destructed x2

    assert_eq!(
        take_trace(),
        [
            "constructed",
            "copyconstructed",
            "copied",
            "destructed",
            "destructed",
        ]
    );
}

#[test]
fn swap_then_swap_back_restores_both_meters() {
    let mut a = Meter::with_reading(1);
    let mut b = Meter::with_reading(2);

    a.swap(&mut b);
    a.swap(&mut b);

    assert_eq!(a.body.reading, 1);
    assert_eq!(b.body.reading, 2);

    drop(a);
    drop(b);

    assert_eq!(
        take_trace(),
        [
            "constructed",
            "constructed",
            "swapped",
            "swapped",
            "destructed",
            "destructed",
        ]
    );
}
