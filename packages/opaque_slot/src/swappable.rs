use std::mem;

/// Customization point for exchanging two values in place.
///
/// [`mem::swap`] exchanges any two values bitwise and cannot be intercepted.
/// Types that want to observe or specialize the exchange (tracing, swapping
/// only selected fields, fixing up self-references) implement this trait
/// instead; everyone else opts in with an empty `impl` and inherits the
/// bitwise fallback.
///
/// [`OpaqueSlot`][crate::OpaqueSlot] implements `Swappable` whenever its
/// hidden type does, delegating to the hidden type's implementation, so the
/// capability composes through any number of wrapper layers.
///
/// # Examples
///
/// Opting in with the default exchange:
///
/// ```
/// use opaque_slot::Swappable;
///
/// struct Reading(u32);
///
/// impl Swappable for Reading {}
///
/// let mut a = Reading(1);
/// let mut b = Reading(2);
/// a.swap_with(&mut b);
/// assert_eq!(a.0, 2);
/// assert_eq!(b.0, 1);
/// ```
///
/// Specializing the exchange:
///
/// ```
/// use std::mem;
///
/// use opaque_slot::Swappable;
///
/// struct Counter {
///     value: u32,
///     swaps: u32,
/// }
///
/// impl Swappable for Counter {
///     fn swap_with(&mut self, other: &mut Self) {
///         mem::swap(&mut self.value, &mut other.value);
///         self.swaps += 1;
///         other.swaps += 1;
///     }
/// }
/// ```
pub trait Swappable {
    /// Exchanges `self` and `other` in place.
    ///
    /// Both values remain live and valid afterward; only their contents
    /// change hands.
    fn swap_with(&mut self, other: &mut Self)
    where
        Self: Sized,
    {
        mem::swap(self, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(u32);

    impl Swappable for Plain {}

    struct Counting {
        value: u32,
        swaps: u32,
    }

    impl Swappable for Counting {
        fn swap_with(&mut self, other: &mut Self) {
            mem::swap(&mut self.value, &mut other.value);
            self.swaps += 1;
            other.swaps += 1;
        }
    }

    #[test]
    fn default_exchange_is_bitwise() {
        let mut a = Plain(10);
        let mut b = Plain(20);

        a.swap_with(&mut b);

        assert_eq!(a.0, 20);
        assert_eq!(b.0, 10);
    }

    #[test]
    fn override_observes_the_exchange() {
        let mut a = Counting { value: 1, swaps: 0 };
        let mut b = Counting { value: 2, swaps: 0 };

        a.swap_with(&mut b);

        assert_eq!(a.value, 2);
        assert_eq!(b.value, 1);
        assert_eq!(a.swaps, 1);
        assert_eq!(b.swaps, 1);
    }

    #[test]
    fn double_exchange_restores_contents() {
        let mut a = Counting { value: 1, swaps: 0 };
        let mut b = Counting { value: 2, swaps: 0 };

        a.swap_with(&mut b);
        a.swap_with(&mut b);

        assert_eq!(a.value, 1);
        assert_eq!(b.value, 2);
        assert_eq!(a.swaps, 2);
        assert_eq!(b.swaps, 2);
    }
}
