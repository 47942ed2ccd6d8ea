use std::collections::linked_list::{self, LinkedList};

use tracing::{debug, trace};

use super::BoundedQueue;
use crate::error::{QueueError, Result};

/// List-backed bounded queue. Same contract as `ArrayRingBuffer`, but nodes
/// are allocated per element instead of up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedQueue<T> {
    items: LinkedList<T>,
    capacity: usize,
}

impl<T> LinkedQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        debug!(capacity, "linked queue created");
        Ok(Self { items: LinkedList::new(), capacity })
    }

    pub fn try_enqueue(&mut self, x: T) -> std::result::Result<(), T> {
        if self.items.len() >= self.capacity {
            trace!(capacity = self.capacity, "enqueue rejected: overflow");
            return Err(x);
        }
        self.items.push_back(x);
        Ok(())
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.items.iter().nth(i)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> BoundedQueue<T> for LinkedQueue<T> {
    type Iter<'a> = linked_list::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn fill_count(&self) -> usize {
        self.items.len()
    }

    fn enqueue(&mut self, x: T) -> Result<()> {
        self.try_enqueue(x).map_err(|_| QueueError::Overflow)
    }

    fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front().ok_or_else(|| {
            trace!("dequeue rejected: underflow");
            QueueError::Underflow
        })
    }

    fn peek(&self) -> Result<&T> {
        self.items.front().ok_or(QueueError::Underflow)
    }

    fn iter(&self) -> linked_list::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = linked_list::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(LinkedQueue::<u8>::new(0).unwrap_err(), QueueError::ZeroCapacity);
    }

    #[test]
    fn overflow_leaves_queue_untouched() {
        let mut q = LinkedQueue::new(2).unwrap();
        q.enqueue("a").unwrap();
        q.enqueue("b").unwrap();
        assert!(q.is_full());
        assert_eq!(q.try_enqueue("c"), Err("c"));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn get_and_clear() {
        let mut q = LinkedQueue::new(3).unwrap();
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        assert_eq!(q.get(1), Some(&2));
        assert_eq!(q.get(2), None);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.peek(), Err(QueueError::Underflow));
    }
}
