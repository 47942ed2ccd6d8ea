//! Fixed-capacity FIFO queues.
//!
//! [`ArrayRingBuffer`] is a wraparound queue over a slot array allocated once
//! at construction; [`LinkedQueue`] is a list-backed alternative. Both
//! implement [`BoundedQueue`]. The [`synth`] module drives a ring buffer as a
//! Karplus-Strong plucked string.
//!
//! ```
//! use ringq::{ArrayRingBuffer, QueueError};
//!
//! let mut rb = ArrayRingBuffer::new(2).unwrap();
//! rb.enqueue(1).unwrap();
//! rb.enqueue(2).unwrap();
//! assert_eq!(rb.enqueue(3), Err(QueueError::Overflow));
//! assert_eq!(rb.dequeue(), Ok(1));
//! ```

pub mod config;
pub mod error;
pub mod queue;
pub mod synth;
pub mod util;

pub use error::{QueueError, SynthError};
pub use queue::{ArrayRingBuffer, Backend, BoundedQueue, LinkedQueue};
