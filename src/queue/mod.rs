pub mod linked;
pub mod ring_buffer;

pub use linked::LinkedQueue;
pub use ring_buffer::ArrayRingBuffer;

use crate::error::Result;

/// A FIFO queue with a capacity fixed at construction.
///
/// Backends differ only in storage; callers can swap one for another
/// anywhere this trait is the bound.
pub trait BoundedQueue<T> {
    /// Front-to-back iterator over live elements.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    fn capacity(&self) -> usize;

    /// Number of live elements, in `[0, capacity]`.
    fn fill_count(&self) -> usize;

    /// Appends `x` at the back. Fails with `Overflow` when full, dropping `x`.
    fn enqueue(&mut self, x: T) -> Result<()>;

    /// Removes and returns the front element. Fails with `Underflow` when empty.
    fn dequeue(&mut self) -> Result<T>;

    /// Borrows the front element without removing it.
    fn peek(&self) -> Result<&T>;

    fn iter(&self) -> Self::Iter<'_>;

    fn is_empty(&self) -> bool {
        self.fill_count() == 0
    }

    fn is_full(&self) -> bool {
        self.fill_count() == self.capacity()
    }
}

/// Which backend to build when the choice is made at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Array,
    Linked,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Array  => "array",
            Backend::Linked => "linked",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "array" | "ring" => Some(Backend::Array),
            "linked" | "list" => Some(Backend::Linked),
            _ => None,
        }
    }
}
