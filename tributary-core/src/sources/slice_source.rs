use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam::utils::CachePadded;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

// ============================================================================
// SliceSource - sequential
// ============================================================================

/// Iterator over the elements of a vector, in order.
///
pub struct SliceSource<T> {
    elements: std::vec::IntoIter<T>,
}

/// Creates a sequential iterator that moves out the elements of `elements`
/// in order.
///
pub fn from_sequence<T>(elements: Vec<T>) -> SliceSource<T> {
    SliceSource {
        elements: elements.into_iter(),
    }
}

impl<T> SliceSource<T> {
    /// Number of elements not delivered yet.
    ///
    pub fn remaining(&self) -> usize {
        self.elements.len()
    }
}

impl<T> Pull for SliceSource<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        self.elements.next().ok_or(Stop::Exhausted)
    }
}

// ============================================================================
// SliceSourceSafe - concurrent
// ============================================================================

/// Concurrent-safe iterator over the elements of a vector.
///
/// Threads claim positions with a single `fetch_add` on a shared cursor, so
/// every position is claimed once and the claims follow the vector order.
/// The claimed element is moved out of its slot; nothing is cloned.
///
/// A claim past the end pins the `stopped` flag. Later pulls test the flag
/// before touching the cursor, which bounds how far racing threads can push
/// the cursor past the end and keeps the source stopped for good.
///
pub struct SliceSourceSafe<T> {
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    cursor: CachePadded<AtomicUsize>,
    stopped: AtomicBool,
}

// SAFETY: a slot is only ever read by the single thread that claimed its
// index, and only once. Sharing the source moves `T` values between threads,
// which requires `T: Send` and nothing more.
//
unsafe impl<T: Send> Send for SliceSourceSafe<T> {}
unsafe impl<T: Send> Sync for SliceSourceSafe<T> {}

/// Creates a concurrent-safe iterator that moves out the elements of
/// `elements` in order.
///
pub fn from_sequence_safe<T>(elements: Vec<T>) -> SliceSourceSafe<T> {
    let slots = elements
        .into_iter()
        .map(|element| UnsafeCell::new(MaybeUninit::new(element)))
        .collect();

    SliceSourceSafe {
        slots,
        cursor: CachePadded::new(AtomicUsize::new(0)),
        stopped: AtomicBool::new(false),
    }
}

impl<T> SliceSourceSafe<T> {
    /// Total number of elements the source was created with.
    ///
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of elements not claimed yet. Approximate while other threads
    /// are pulling.
    ///
    pub fn remaining(&self) -> usize {
        let claimed = self.cursor.load(Ordering::Acquire);
        self.slots.len().saturating_sub(claimed)
    }
}

impl<T: Send> SyncPull for SliceSourceSafe<T> {
    type Item = T;

    fn pull(&self) -> Result<T, Stop> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(Stop::Exhausted);
        }

        let index = self.cursor.fetch_add(1, Ordering::AcqRel);
        if index >= self.slots.len() {
            self.stopped.store(true, Ordering::Release);
            return Err(Stop::Exhausted);
        }

        // SAFETY: fetch_add returned `index` to this thread only, so no other
        // thread reads the slot, and it still holds the element written at
        // construction.
        //
        let element = unsafe { (*self.slots[index].get()).assume_init_read() };
        Ok(element)
    }
}

impl<T: Send> Pull for SliceSourceSafe<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        SyncPull::pull(&*self)
    }
}

impl<T> Drop for SliceSourceSafe<T> {
    fn drop(&mut self) {
        let claimed = (*self.cursor.get_mut()).min(self.slots.len());

        for slot in &mut self.slots[claimed..] {
            // SAFETY: slots at or past the cursor were never handed out.
            //
            unsafe { slot.get_mut().assume_init_drop() };
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_slice_source_order() {
        let mut source = from_sequence(vec!["a", "b", "c"]);

        assert_eq!(source.remaining(), 3);
        assert_eq!(source.pull(), Ok("a"));
        assert_eq!(source.pull(), Ok("b"));
        assert_eq!(source.pull(), Ok("c"));
        assert_eq!(source.pull(), Err(Stop::Exhausted));
        assert_eq!(source.pull(), Err(Stop::Exhausted));
    }

    #[test]
    fn test_safe_source_order() {
        let source = from_sequence_safe(vec![3, 1, 2]);

        assert_eq!(source.len(), 3);
        assert_eq!(source.pull(), Ok(3));
        assert_eq!(source.pull(), Ok(1));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.pull(), Ok(2));
        assert_eq!(source.pull(), Err(Stop::Exhausted));
        assert_eq!(source.pull(), Err(Stop::Exhausted));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_safe_source_empty() {
        let source = from_sequence_safe(Vec::<u8>::new());

        assert!(source.is_empty());
        assert_eq!(source.pull(), Err(Stop::Exhausted));
    }

    // Counts live instances to check that every element is dropped once.
    //
    struct Tracked(Arc<AtomicUsize>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_safe_source_drops_unclaimed() {
        let drops = Arc::new(AtomicUsize::new(0));
        let source =
            from_sequence_safe((0..5).map(|_| Tracked(Arc::clone(&drops))).collect::<Vec<_>>());

        let first = source.pull().ok();
        let second = source.pull().ok();
        assert_eq!(drops.load(Ordering::Relaxed), 0);

        drop(source);
        assert_eq!(drops.load(Ordering::Relaxed), 3);

        drop(first);
        drop(second);
        assert_eq!(drops.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_safe_source_drops_after_overshoot() {
        let drops = Arc::new(AtomicUsize::new(0));
        let source =
            from_sequence_safe((0..2).map(|_| Tracked(Arc::clone(&drops))).collect::<Vec<_>>());

        while source.pull().is_ok() {}
        assert_eq!(drops.load(Ordering::Relaxed), 2);

        drop(source);
        assert_eq!(drops.load(Ordering::Relaxed), 2);
    }
}
