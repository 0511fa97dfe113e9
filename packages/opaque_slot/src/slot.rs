use std::marker::PhantomData;
use std::mem::{ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::{fmt, mem, ptr};

use crate::{Reserved, Swappable, align::MaxAlign};

/// A fixed-layout inline slot that owns exactly one value of a hidden type.
///
/// The slot embeds `SIZE` bytes of storage at the alignment of the archetype
/// `A` directly in its owner, with no heap allocation and no indirection, and
/// keeps one live `T` in that storage for its entire lifetime. The public-facing
/// type that embeds the slot declares the reservation (`SIZE`, `A`) next to a
/// representation type whose definition stays private, so the representation
/// can change freely as long as it still fits the reservation.
///
/// # Layout contract
///
/// Every operation on the slot re-validates the reservation against the real
/// hidden type at compile time:
///
/// - `size_of::<T>()` must equal `SIZE` exactly;
/// - `align_of::<T>()` must not exceed the alignment of `A`.
///
/// A mismatch is a build failure (a const evaluation error raised when the
/// operation is monomorphized), never a runtime error. There is no runtime
/// failure path owned by the slot itself; any panic during an operation
/// originates from `T`'s own code and propagates unchanged.
///
/// # Value semantics
///
/// From the moment construction completes until the slot is dropped, the
/// storage holds exactly one live value. There is no empty or poisoned state:
/// moving a slot consumes the source binding (the language runs no destructor
/// on a moved-from slot), cloning copy-constructs a new value from the live
/// one, and [`Clone::clone_from`] delegates to the hidden type's own
/// assignment without destroying and reconstructing. Dropping the slot runs
/// the hidden value's destructor in place, exactly once, on every exit path
/// including unwinding.
///
/// # Examples
///
/// ```
/// use opaque_slot::OpaqueSlot;
/// use opaque_slot::align::Align8;
///
/// let mut slot = OpaqueSlot::<u64, 8, Align8>::new(42);
///
/// // Direct access through Deref/DerefMut.
/// assert_eq!(*slot, 42);
/// *slot += 1;
/// assert_eq!(*slot, 43);
///
/// // Value semantics: cloning copies the hidden value.
/// let copy = slot.clone();
/// assert_eq!(copy, slot);
/// ```
///
/// Reservations are usually spelled with a const expression so they cannot
/// drift from the platform's real layout:
///
/// ```
/// use opaque_slot::OpaqueSlot;
/// use opaque_slot::align::Align8;
///
/// let slot = OpaqueSlot::<String, { size_of::<String>() }, Align8>::new("hi".to_string());
/// assert_eq!(slot.len(), 2);
/// ```
///
/// A reservation that is too small for the hidden type does not compile:
///
/// ```compile_fail
/// use opaque_slot::OpaqueSlot;
/// use opaque_slot::align::Align8;
///
/// // u64 is 8 bytes; a 4-byte reservation is a build-time contract violation.
/// let slot = OpaqueSlot::<u64, 4, Align8>::new(42);
/// ```
///
/// Neither does a reservation whose alignment is insufficient:
///
/// ```compile_fail
/// use opaque_slot::OpaqueSlot;
/// use opaque_slot::align::Align1;
///
/// // u64 requires 8-byte alignment; a byte-aligned reservation must not compile.
/// let slot = OpaqueSlot::<u64, 8, Align1>::new(42);
/// ```
///
/// # Thread safety
///
/// The slot adds no synchronization of its own; it is [`Send`]/[`Sync`]
/// exactly when `T` is, like any ordinary by-value wrapper.
pub struct OpaqueSlot<T, const SIZE: usize, A = MaxAlign> {
    storage: Reserved<SIZE, A>,

    /// The slot owns a `T` by value even though none appears in its fields.
    _owns: PhantomData<T>,
}

impl<T, const SIZE: usize, A> OpaqueSlot<T, SIZE, A> {
    /// The layout contract between the reservation and the hidden type.
    ///
    /// Called from a `const` block in every operation so the contract is
    /// re-checked at each point where the hidden type is used concretely,
    /// not only at the first declaration site. Evaluation happens during
    /// monomorphization; a violation fails the build.
    const fn layout_check() {
        assert!(
            size_of::<T>() == SIZE,
            "OpaqueSlot: hidden type size differs from the declared reservation size"
        );
        assert!(
            align_of::<T>() <= align_of::<A>(),
            "OpaqueSlot: hidden type alignment exceeds the reservation alignment"
        );
    }

    /// Constructs a slot owning `value`, written in place into the reserved
    /// storage.
    ///
    /// Arguments for the hidden type are applied to its constructor at the
    /// call site; the finished value is what moves into the reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use opaque_slot::OpaqueSlot;
    /// use opaque_slot::align::Align4;
    ///
    /// let slot = OpaqueSlot::<u32, 4, Align4>::new(7);
    /// assert_eq!(*slot, 7);
    /// ```
    #[must_use]
    pub fn new(value: T) -> Self {
        const { Self::layout_check() };

        let mut slot = Self {
            storage: Reserved::uninit(),
            _owns: PhantomData,
        };

        // SAFETY: layout_check() guarantees the reservation is exactly
        // size_of::<T>() bytes at sufficient alignment, and the storage is
        // uninitialized, so writing a T here is valid and leaks nothing.
        unsafe {
            slot.value_ptr_mut().write(value);
        }

        slot
    }

    /// Constructs a slot by initializing the hidden value in place.
    ///
    /// The closure receives the reserved storage as `&mut MaybeUninit<T>` and
    /// must fully initialize it. This avoids constructing the value on the
    /// stack first and moving it, which matters for large hidden types.
    ///
    /// # Safety
    ///
    /// The caller must ensure the closure fully initializes the
    /// `MaybeUninit<T>` before returning. If the closure panics instead, the
    /// partially written bytes are discarded without running any destructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use opaque_slot::OpaqueSlot;
    /// use opaque_slot::align::Align8;
    ///
    /// // SAFETY: The closure fully initializes the value.
    /// let slot = unsafe {
    ///     OpaqueSlot::<[u64; 4], 32, Align8>::new_with(|uninit| {
    ///         uninit.write([1, 2, 3, 4]);
    ///     })
    /// };
    /// assert_eq!(slot[2], 3);
    /// ```
    #[must_use]
    pub unsafe fn new_with(f: impl FnOnce(&mut MaybeUninit<T>)) -> Self {
        const { Self::layout_check() };

        // The storage is initialized before the slot exists, so a panic in
        // the closure unwinds through plain bytes and no destructor runs on
        // an uninitialized value.
        let mut storage = Reserved::uninit();

        // SAFETY: layout_check() guarantees the reservation fits a T at
        // sufficient alignment, so viewing it as MaybeUninit<T> is valid.
        let uninit = unsafe { &mut *storage.as_mut_ptr().cast::<MaybeUninit<T>>() };

        f(uninit);

        Self {
            storage,
            _owns: PhantomData,
        }
    }

    /// Returns a shared reference to the hidden value.
    ///
    /// Zero-cost and infallible: the slot always holds a live value.
    #[must_use]
    pub fn get(&self) -> &T {
        const { Self::layout_check() };

        // SAFETY: The storage has held a live, properly aligned T since
        // construction; shared access follows the borrow of self.
        unsafe { &*self.value_ptr() }
    }

    /// Returns an exclusive reference to the hidden value.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut T {
        const { Self::layout_check() };

        // SAFETY: The storage has held a live, properly aligned T since
        // construction; exclusive access follows the borrow of self.
        unsafe { &mut *self.value_ptr_mut() }
    }

    /// Returns a raw pointer to the hidden value.
    ///
    /// The pointer is valid for reads for as long as the slot is live and not
    /// mutably borrowed.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        const { Self::layout_check() };

        self.value_ptr()
    }

    /// Returns a raw mutable pointer to the hidden value.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        const { Self::layout_check() };

        self.value_ptr_mut()
    }

    /// Replaces the hidden value, returning the previous one.
    ///
    /// The exchange happens in place; the slot never observes an empty state.
    pub fn replace(&mut self, value: T) -> T {
        const { Self::layout_check() };

        mem::replace(self.get_mut(), value)
    }

    /// Consumes the slot and moves the hidden value out.
    ///
    /// The slot's destructor does not run; ownership of the value passes to
    /// the caller, so the value is still destroyed exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use opaque_slot::OpaqueSlot;
    /// use opaque_slot::align::Align8;
    ///
    /// let slot = OpaqueSlot::<String, { size_of::<String>() }, Align8>::new("out".to_string());
    /// let value = slot.into_inner();
    /// assert_eq!(value, "out");
    /// ```
    #[must_use]
    pub fn into_inner(self) -> T {
        const { Self::layout_check() };

        let slot = ManuallyDrop::new(self);

        // SAFETY: The storage holds a live T and ManuallyDrop suppresses the
        // slot's own destructor, so this read is the single transfer of
        // ownership out of the storage.
        unsafe { slot.value_ptr().read() }
    }

    fn value_ptr(&self) -> *const T {
        self.storage.as_ptr().cast()
    }

    fn value_ptr_mut(&mut self) -> *mut T {
        self.storage.as_mut_ptr().cast()
    }
}

impl<T, const SIZE: usize, A> Drop for OpaqueSlot<T, SIZE, A> {
    fn drop(&mut self) {
        const { Self::layout_check() };

        // SAFETY: The storage has held a live T since construction and drop
        // runs at most once; after this the storage is never read again.
        unsafe {
            ptr::drop_in_place(self.value_ptr_mut());
        }
    }
}

impl<T: Clone, const SIZE: usize, A> Clone for OpaqueSlot<T, SIZE, A> {
    /// Copy-constructs a new hidden value from the source's value.
    ///
    /// The source is untouched and the clone has a fully independent
    /// lifetime.
    fn clone(&self) -> Self {
        Self::new(self.get().clone())
    }

    /// Delegates to the hidden type's own assignment on the two live values.
    ///
    /// The target's value is mutated in place, never destroyed and
    /// reconstructed.
    fn clone_from(&mut self, source: &Self) {
        self.get_mut().clone_from(source.get());
    }
}

impl<T: Default, const SIZE: usize, A> Default for OpaqueSlot<T, SIZE, A> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, const SIZE: usize, A> Deref for OpaqueSlot<T, SIZE, A> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T, const SIZE: usize, A> DerefMut for OpaqueSlot<T, SIZE, A> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: Swappable, const SIZE: usize, A> Swappable for OpaqueSlot<T, SIZE, A> {
    /// Exchanges the two in-place hidden values via the hidden type's own
    /// [`Swappable`] implementation.
    fn swap_with(&mut self, other: &mut Self) {
        T::swap_with(self.get_mut(), other.get_mut());
    }
}

impl<T: PartialEq, const SIZE: usize, A> PartialEq for OpaqueSlot<T, SIZE, A> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq, const SIZE: usize, A> Eq for OpaqueSlot<T, SIZE, A> {}

impl<T, const SIZE: usize, A> fmt::Debug for OpaqueSlot<T, SIZE, A> {
    /// Deliberately opaque: the hidden value is representation, not surface.
    #[cfg_attr(test, mutants::skip)] // The output is deliberately empty of content; mutation is meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueSlot").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::arithmetic_side_effects,
    reason = "test code doesn't need the same rigor as production code"
)]
mod tests {
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::align::{Align1, Align8, Align16};

    // The slot inherits thread mobility from the hidden type, nothing more.
    assert_impl_all!(OpaqueSlot<u64, 8, Align8>: Send, Sync, Unpin);
    assert_not_impl_any!(OpaqueSlot<Rc<u8>, { size_of::<Rc<u8>>() }, Align8>: Send, Sync);

    /// Test hidden type that counts every special-member call it receives,
    /// so tests can prove which operations ran and that lifetimes balance.
    struct Counted {
        value: i32,
        counters: Rc<Counters>,
    }

    #[derive(Default)]
    struct Counters {
        constructs: Cell<usize>,
        assigns: Cell<usize>,
        swaps: Cell<usize>,
        drops: Cell<usize>,
    }

    impl Counted {
        fn new(value: i32, counters: &Rc<Counters>) -> Self {
            counters.constructs.set(counters.constructs.get() + 1);
            Self {
                value,
                counters: Rc::clone(counters),
            }
        }
    }

    impl Clone for Counted {
        // A clone is a construction of a new object.
        fn clone(&self) -> Self {
            Self::new(self.value, &self.counters)
        }

        // Assignment mutates in place; no new object comes to life.
        fn clone_from(&mut self, source: &Self) {
            self.value = source.value;
            self.counters.assigns.set(self.counters.assigns.get() + 1);
        }
    }

    impl Swappable for Counted {
        fn swap_with(&mut self, other: &mut Self) {
            mem::swap(&mut self.value, &mut other.value);
            self.counters.swaps.set(self.counters.swaps.get() + 1);
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.counters.drops.set(self.counters.drops.get() + 1);
        }
    }

    type CountedSlot = OpaqueSlot<Counted, { size_of::<Counted>() }, Align8>;

    #[test]
    fn new_and_read_back() {
        let slot = OpaqueSlot::<u32, 4>::new(42);

        assert_eq!(*slot, 42);
        assert_eq!(*slot.get(), 42);
    }

    #[test]
    fn mutation_through_deref_mut() {
        let mut slot = OpaqueSlot::<u32, 4>::new(1);

        *slot += 1;
        *slot.get_mut() += 1;

        assert_eq!(*slot, 3);
    }

    #[test]
    fn default_constructs_default_value() {
        let slot = OpaqueSlot::<u64, 8, Align8>::default();

        assert_eq!(*slot, 0);
    }

    #[test]
    fn new_with_initializes_in_place() {
        // SAFETY: The closure fully initializes the value.
        let slot = unsafe {
            OpaqueSlot::<[u8; 3], 3, Align1>::new_with(|uninit| {
                uninit.write([7, 8, 9]);
            })
        };

        assert_eq!(*slot, [7, 8, 9]);
    }

    #[test]
    fn raw_pointers_agree_with_references() {
        let mut slot = OpaqueSlot::<u32, 4>::new(5);

        assert_eq!(slot.as_ptr().cast_mut(), slot.as_mut_ptr());

        // SAFETY: The slot holds a live value and no reference is active.
        unsafe {
            *slot.as_mut_ptr() = 6;
        }
        assert_eq!(*slot, 6);
    }

    #[test]
    fn clone_round_trips_and_leaves_source_intact() {
        let counters = Rc::new(Counters::default());
        let original = CountedSlot::new(Counted::new(11, &counters));

        let copy = original.clone();

        assert_eq!(copy.value, 11);
        assert_eq!(original.value, 11);
        assert_eq!(counters.constructs.get(), 2);

        drop(copy);
        assert_eq!(counters.drops.get(), 1);

        // The original is still live and independently destructible.
        assert_eq!(original.value, 11);
        drop(original);
        assert_eq!(counters.drops.get(), 2);
    }

    #[test]
    fn clone_from_assigns_without_reconstructing() {
        let counters = Rc::new(Counters::default());
        let mut target = CountedSlot::new(Counted::new(1, &counters));
        let source = CountedSlot::new(Counted::new(2, &counters));
        assert_eq!(counters.constructs.get(), 2);

        target.clone_from(&source);

        assert_eq!(target.value, 2);
        // Only the assignment counter moved; nothing was destroyed or rebuilt.
        assert_eq!(counters.constructs.get(), 2);
        assert_eq!(counters.assigns.get(), 1);
        assert_eq!(counters.drops.get(), 0);
    }

    #[test]
    fn move_consumes_source_and_lifetimes_balance() {
        let counters = Rc::new(Counters::default());

        {
            let slot = CountedSlot::new(Counted::new(3, &counters));

            // A Rust move: the binding transfers, no destructor runs for the
            // moved-from source, and the value is never duplicated.
            let moved = slot;
            assert_eq!(moved.value, 3);
            assert_eq!(counters.drops.get(), 0);
        }

        assert_eq!(counters.constructs.get(), 1);
        assert_eq!(counters.drops.get(), 1);
    }

    #[test]
    fn swap_exchanges_values_via_hidden_type() {
        let counters = Rc::new(Counters::default());
        let mut a = CountedSlot::new(Counted::new(1, &counters));
        let mut b = CountedSlot::new(Counted::new(2, &counters));

        a.swap_with(&mut b);

        assert_eq!(a.value, 2);
        assert_eq!(b.value, 1);
        assert_eq!(counters.swaps.get(), 1);
        // Swap touches the live values only; no constructions, no drops.
        assert_eq!(counters.constructs.get(), 2);
        assert_eq!(counters.drops.get(), 0);
    }

    #[test]
    fn double_swap_restores_original_contents() {
        let counters = Rc::new(Counters::default());
        let mut a = CountedSlot::new(Counted::new(10, &counters));
        let mut b = CountedSlot::new(Counted::new(20, &counters));

        a.swap_with(&mut b);
        a.swap_with(&mut b);

        assert_eq!(a.value, 10);
        assert_eq!(b.value, 20);
        assert_eq!(counters.swaps.get(), 2);
    }

    #[test]
    fn replace_returns_previous_value() {
        let counters = Rc::new(Counters::default());
        let mut slot = CountedSlot::new(Counted::new(1, &counters));

        let previous = slot.replace(Counted::new(2, &counters));

        assert_eq!(previous.value, 1);
        assert_eq!(slot.value, 2);
        assert_eq!(counters.drops.get(), 0);

        drop(previous);
        drop(slot);
        assert_eq!(counters.constructs.get(), 2);
        assert_eq!(counters.drops.get(), 2);
    }

    #[test]
    fn into_inner_transfers_ownership_once() {
        let counters = Rc::new(Counters::default());
        let slot = CountedSlot::new(Counted::new(9, &counters));

        let value = slot.into_inner();

        // The slot is gone but its destructor did not run on the value.
        assert_eq!(value.value, 9);
        assert_eq!(counters.drops.get(), 0);

        drop(value);
        assert_eq!(counters.constructs.get(), 1);
        assert_eq!(counters.drops.get(), 1);
    }

    #[test]
    fn drops_exactly_once_on_scope_exit() {
        let counters = Rc::new(Counters::default());

        {
            let _slot = CountedSlot::new(Counted::new(0, &counters));
            assert_eq!(counters.drops.get(), 0);
        }

        assert_eq!(counters.drops.get(), 1);
    }

    #[test]
    fn drops_exactly_once_when_unwinding() {
        let counters = Rc::new(Counters::default());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _slot = CountedSlot::new(Counted::new(0, &counters));
            panic!("unwind through the slot's scope");
        }));

        assert!(result.is_err());
        assert_eq!(counters.constructs.get(), 1);
        assert_eq!(counters.drops.get(), 1);
    }

    #[test]
    fn equality_delegates_to_hidden_type() {
        let a = OpaqueSlot::<u32, 4>::new(5);
        let b = OpaqueSlot::<u32, 4>::new(5);
        let c = OpaqueSlot::<u32, 4>::new(6);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_output_reveals_nothing() {
        let slot = OpaqueSlot::<u32, 4>::new(0xDEAD_BEEF);

        let rendered = format!("{slot:?}");

        assert!(rendered.contains("OpaqueSlot"));
        assert!(!rendered.contains("3735928559"));
        assert!(!rendered.contains("deadbeef"));
    }

    #[test]
    fn zero_sized_hidden_type_works() {
        let slot = OpaqueSlot::<(), 0, Align1>::new(());

        let () = slot.into_inner();
    }

    #[test]
    fn overaligned_reservation_accepts_underaligned_type() {
        // Alignment is a sufficiency check, not an exact match.
        let slot = OpaqueSlot::<u8, 1, Align16>::new(200);

        assert_eq!(*slot, 200);
        assert_eq!(slot.as_ptr().addr() % 16, 0);
    }

    #[test]
    fn nested_slots_compose_swapping() {
        type Inner = OpaqueSlot<Counted, { size_of::<Counted>() }, Align8>;
        type Outer = OpaqueSlot<Inner, { size_of::<Inner>() }, Align8>;

        let counters = Rc::new(Counters::default());
        let mut a = Outer::new(Inner::new(Counted::new(1, &counters)));
        let mut b = Outer::new(Inner::new(Counted::new(2, &counters)));

        a.swap_with(&mut b);

        assert_eq!(a.value, 2);
        assert_eq!(b.value, 1);
        assert_eq!(counters.swaps.get(), 1);
    }

    #[test]
    fn panic_in_new_with_closure_leaks_nothing() {
        let counters = Rc::new(Counters::default());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            // SAFETY: The closure never returns, so the initialization
            // obligation is vacuous.
            let _slot = unsafe {
                CountedSlot::new_with(|_| {
                    panic!("constructor failure propagates unchanged");
                })
            };
        }));

        assert!(result.is_err());
        // No value was ever constructed, so nothing may be dropped.
        assert_eq!(counters.constructs.get(), 0);
        assert_eq!(counters.drops.get(), 0);
    }
}
