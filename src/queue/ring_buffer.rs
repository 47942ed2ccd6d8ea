use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::BoundedQueue;
use crate::error::{QueueError, Result};

/// Fixed-capacity FIFO queue over a slot array that is allocated once and
/// never resized.
///
/// `first` is the next slot to read, `last` the next slot to write, and
/// `fill_count` the number of live elements. Live elements sit at
/// `first, first + 1, ..., first + fill_count - 1` (mod capacity), so
/// `last == (first + fill_count) % capacity` at all times. Slots outside
/// that window are always `None`.
#[derive(Clone)]
pub struct ArrayRingBuffer<T> {
    slots: Box<[Option<T>]>,
    first: usize,
    last: usize,
    fill_count: usize,
}

impl<T> ArrayRingBuffer<T> {
    /// Creates an empty buffer with `capacity` slots.
    ///
    /// A zero capacity is rejected: such a buffer would be full and empty
    /// at the same time.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        debug!(capacity, "ring buffer allocated");
        Ok(Self { slots, first: 0, last: 0, fill_count: 0 })
    }

    pub fn capacity(&self) -> usize { self.slots.len() }
    pub fn fill_count(&self) -> usize { self.fill_count }
    pub fn is_empty(&self) -> bool { self.fill_count == 0 }
    pub fn is_full(&self) -> bool { self.fill_count == self.capacity() }

    /// Slot after `idx`, wrapping to 0 past the end.
    fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    /// Adds `x` at the back. On overflow `x` is dropped and the buffer is
    /// unchanged; use [`try_enqueue`](Self::try_enqueue) to get it back.
    pub fn enqueue(&mut self, x: T) -> Result<()> {
        self.try_enqueue(x).map_err(|_| QueueError::Overflow)
    }

    /// Adds `x` at the back, handing it back as `Err(x)` when full.
    pub fn try_enqueue(&mut self, x: T) -> std::result::Result<(), T> {
        if self.is_full() {
            trace!(capacity = self.capacity(), "enqueue rejected: overflow");
            return Err(x);
        }
        self.slots[self.last] = Some(x);
        self.last = self.next_index(self.last);
        self.fill_count += 1;
        trace!(first = self.first, last = self.last, fill = self.fill_count, "enqueue");
        Ok(())
    }

    /// Enqueues from `items` until the buffer fills up. Returns how many were
    /// accepted; the item that hit the overflow and everything after it is
    /// dropped.
    pub fn enqueue_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        let mut accepted = 0;
        for item in items {
            if self.try_enqueue(item).is_err() {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Removes the oldest element and returns ownership of it.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            trace!("dequeue rejected: underflow");
            return Err(QueueError::Underflow);
        }
        // `first` is inside the live window, which never holds an empty slot;
        // only `dequeue` and `clear` vacate slots and both move the window.
        let item = self.slots[self.first].take();
        debug_assert!(item.is_some(), "empty slot {} inside live window", self.first);
        let Some(item) = item else {
            return Err(QueueError::Underflow);
        };
        self.first = self.next_index(self.first);
        self.fill_count -= 1;
        trace!(first = self.first, last = self.last, fill = self.fill_count, "dequeue");
        Ok(item)
    }

    /// Borrows the oldest element.
    pub fn peek(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(QueueError::Underflow);
        }
        let front = self.slots[self.first].as_ref();
        debug_assert!(front.is_some(), "empty slot {} inside live window", self.first);
        front.ok_or(QueueError::Underflow)
    }

    /// The `i`-th live element counting from the front.
    pub fn get(&self, i: usize) -> Option<&T> {
        if i >= self.fill_count {
            return None;
        }
        self.slots[(self.first + i) % self.capacity()].as_ref()
    }

    /// Drops every live element and rewinds both cursors to slot 0.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.first = 0;
        self.last = 0;
        self.fill_count = 0;
    }

    /// Iterates live elements front to back.
    ///
    /// The iterator copies the read cursor and fill count when created and
    /// never touches the buffer's own cursors. It holds a shared borrow, so
    /// the buffer cannot be mutated while it is alive.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { slots: &self.slots, cursor: self.first, remaining: self.fill_count }
    }

    /// Removes live elements front to back. Whatever the caller does not
    /// consume is dropped when the `Drain` goes away.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { buf: self }
    }

    /// Compares raw storage slot by slot over `other`'s capacity, ignoring
    /// the cursors.
    ///
    /// This is narrower than `==`: two buffers holding the same sequence at
    /// different rotations are not `slots_eq`, and a larger `other` never
    /// matches. Use `==` for logical equality.
    pub fn slots_eq(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        if other.capacity() > self.capacity() {
            return false;
        }
        self.slots.iter().zip(other.slots.iter()).all(|(a, b)| a == b)
    }
}

impl<T> BoundedQueue<T> for ArrayRingBuffer<T> {
    type Iter<'a> = Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn capacity(&self) -> usize { ArrayRingBuffer::capacity(self) }
    fn fill_count(&self) -> usize { ArrayRingBuffer::fill_count(self) }
    fn enqueue(&mut self, x: T) -> Result<()> { ArrayRingBuffer::enqueue(self, x) }
    fn dequeue(&mut self) -> Result<T> { ArrayRingBuffer::dequeue(self) }
    fn peek(&self) -> Result<&T> { ArrayRingBuffer::peek(self) }
    fn iter(&self) -> Iter<'_, T> { ArrayRingBuffer::iter(self) }
}

/// Logical equality: same capacity, same fill count, same FIFO contents.
/// Where the window starts inside the slot array does not matter.
impl<T: PartialEq> PartialEq for ArrayRingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.fill_count == other.fill_count
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ArrayRingBuffer<T> {}

impl<T: fmt::Debug> fmt::Debug for ArrayRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRingBuffer")
            .field("capacity", &self.capacity())
            .field("fill_count", &self.fill_count)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

// ── Iterators ─────────────────────────────────────────────────────────

pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.cursor].as_ref();
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { slots: self.slots, cursor: self.cursor, remaining: self.remaining }
    }
}

impl<'a, T> IntoIterator for &'a ArrayRingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

pub struct Drain<'a, T> {
    buf: &'a mut ArrayRingBuffer<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buf.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buf.fill_count, Some(self.buf.fill_count))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.buf.clear();
    }
}

/// Owning iterator, front to back.
pub struct IntoIter<T> {
    buf: ArrayRingBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buf.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buf.fill_count, Some(self.buf.fill_count))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for ArrayRingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { buf: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, items: &[i32]) -> ArrayRingBuffer<i32> {
        let mut rb = ArrayRingBuffer::new(capacity).unwrap();
        for &x in items {
            rb.enqueue(x).unwrap();
        }
        rb
    }

    #[test]
    fn new_buffer_is_empty() {
        let rb: ArrayRingBuffer<i32> = ArrayRingBuffer::new(4).unwrap();
        assert_eq!(rb.capacity(), 4);
        assert_eq!(rb.fill_count(), 0);
        assert!(rb.is_empty());
        assert!(!rb.is_full());
        assert_eq!(rb.iter().count(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(ArrayRingBuffer::<i32>::new(0).unwrap_err(), QueueError::ZeroCapacity);
    }

    #[test]
    fn capacity_two_scenario() {
        let mut rb = ArrayRingBuffer::new(2).unwrap();
        rb.enqueue(1).unwrap();
        rb.enqueue(2).unwrap();
        assert!(rb.is_full());
        assert_eq!(rb.enqueue(3), Err(QueueError::Overflow));
        assert_eq!(rb.fill_count(), 2);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rb.dequeue(), Ok(1));
        assert_eq!(rb.dequeue(), Ok(2));
        assert!(rb.is_empty());
        assert_eq!(rb.dequeue(), Err(QueueError::Underflow));
        assert_eq!(rb.peek(), Err(QueueError::Underflow));
    }

    #[test]
    fn wraparound_keeps_fifo_order() {
        let mut rb = ArrayRingBuffer::new(3).unwrap();
        rb.enqueue('A').unwrap();
        rb.enqueue('B').unwrap();
        assert_eq!(rb.dequeue(), Ok('A'));
        rb.enqueue('C').unwrap();
        rb.enqueue('D').unwrap();
        assert_eq!(rb.iter().copied().collect::<String>(), "BCD");
        assert_eq!(rb.enqueue('E'), Err(QueueError::Overflow));
        assert_eq!(rb.first, 1);
        assert_eq!(rb.last, 1);
    }

    #[test]
    fn cursors_stay_consistent() {
        let mut rb = ArrayRingBuffer::new(5).unwrap();
        for round in 0..23 {
            if round % 3 == 2 {
                let _ = rb.dequeue();
            } else {
                let _ = rb.enqueue(round);
            }
            assert_eq!(rb.last, (rb.first + rb.fill_count) % rb.capacity());
            assert!(rb.fill_count <= rb.capacity());
        }
    }

    #[test]
    fn peek_does_not_mutate() {
        let rb = filled(3, &[7, 8]);
        assert_eq!(rb.peek(), Ok(&7));
        assert_eq!(rb.peek(), Ok(&7));
        assert_eq!(rb.fill_count(), 2);
    }

    #[test]
    fn dequeue_releases_the_slot() {
        use std::rc::Rc;

        let shared = Rc::new(5);
        let mut rb = ArrayRingBuffer::new(2).unwrap();
        rb.enqueue(Rc::clone(&shared)).unwrap();
        assert_eq!(Rc::strong_count(&shared), 2);
        let out = rb.dequeue().unwrap();
        drop(out);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn dropping_buffer_releases_live_elements() {
        use std::rc::Rc;

        let shared = Rc::new(());
        {
            let mut rb = ArrayRingBuffer::new(3).unwrap();
            rb.enqueue(Rc::clone(&shared)).unwrap();
            rb.enqueue(Rc::clone(&shared)).unwrap();
            assert_eq!(Rc::strong_count(&shared), 3);
        }
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn try_enqueue_hands_back_rejected_value() {
        let mut rb = filled(1, &[1]);
        assert_eq!(rb.try_enqueue(2), Err(2));
        assert_eq!(rb.peek(), Ok(&1));
    }

    #[test]
    fn enqueue_all_stops_at_capacity() {
        let mut rb = ArrayRingBuffer::new(3).unwrap();
        assert_eq!(rb.enqueue_all(10..20), 3);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12]);
    }

    #[test]
    fn get_indexes_from_front() {
        let mut rb = filled(3, &[1, 2, 3]);
        rb.dequeue().unwrap();
        rb.enqueue(4).unwrap();
        assert_eq!(rb.get(0), Some(&2));
        assert_eq!(rb.get(2), Some(&4));
        assert_eq!(rb.get(3), None);
    }

    #[test]
    fn iterators_are_independent_and_sized() {
        let rb = filled(4, &[1, 2, 3]);
        let mut a = rb.iter();
        assert_eq!(a.len(), 3);
        assert_eq!(a.next(), Some(&1));
        let b = rb.iter();
        assert_eq!(b.len(), 3);
        assert_eq!(a.len(), 2);
        assert_eq!(rb.fill_count(), 3);
        assert_eq!(rb.peek(), Ok(&1));
    }

    #[test]
    fn iterator_snapshot_survives_later_mutation() {
        let mut rb = filled(3, &[1, 2, 3]);
        let snapshot: Vec<i32> = rb.iter().copied().collect();
        rb.dequeue().unwrap();
        rb.enqueue(4).unwrap();
        assert_eq!(snapshot, vec![1, 2, 3]);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "inside live window")]
    fn vacated_live_slot_trips_debug_assert() {
        let mut rb = filled(2, &[1, 2]);
        rb.slots[rb.first] = None;
        let _ = rb.dequeue();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "inside live window")]
    fn peek_of_vacated_live_slot_trips_debug_assert() {
        let mut rb = filled(2, &[1]);
        rb.slots[rb.first] = None;
        let _ = rb.peek();
    }

    #[test]
    fn next_index_wraps_to_zero() {
        let rb: ArrayRingBuffer<u8> = ArrayRingBuffer::new(3).unwrap();
        assert_eq!(rb.next_index(0), 1);
        assert_eq!(rb.next_index(2), 0);
    }

    #[test]
    fn drain_empties_and_rewinds() {
        let mut rb = filled(3, &[1, 2, 3]);
        rb.dequeue().unwrap();
        rb.enqueue(4).unwrap();
        let mut d = rb.drain();
        assert_eq!(d.next(), Some(2));
        drop(d);
        assert!(rb.is_empty());
        assert_eq!(rb.first, 0);
        rb.enqueue(9).unwrap();
        assert_eq!(rb.peek(), Ok(&9));
    }

    #[test]
    fn into_iter_yields_owned_fifo() {
        let mut rb = filled(2, &[1, 2]);
        rb.dequeue().unwrap();
        rb.enqueue(3).unwrap();
        assert_eq!(rb.into_iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn equality_ignores_rotation() {
        let a = filled(3, &[2, 3]);
        let mut b = filled(3, &[1, 2]);
        b.dequeue().unwrap();
        b.enqueue(3).unwrap();
        assert_eq!(a, b);
        assert!(!a.slots_eq(&b));
    }

    #[test]
    fn equality_requires_same_capacity() {
        let a = filled(3, &[1]);
        let b = filled(4, &[1]);
        assert_ne!(a, b);
    }

    #[test]
    fn slots_eq_only_scans_other_capacity() {
        let big = filled(4, &[1, 2, 3]);
        let small = filled(2, &[1, 2]);
        assert!(big.slots_eq(&small));
        assert!(!small.slots_eq(&big));
        assert_ne!(big, small);
    }

    #[test]
    fn debug_shows_logical_contents() {
        let mut rb = filled(2, &[1, 2]);
        rb.dequeue().unwrap();
        rb.enqueue(3).unwrap();
        let s = format!("{:?}", rb);
        assert!(s.contains("items: [2, 3]"), "{}", s);
    }
}
