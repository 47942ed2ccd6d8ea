use thiserror::Error;

/// Contract violations reported by bounded queues.
///
/// None of these are transient: check `is_full()` / `is_empty()` first
/// instead of retrying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Enqueue on a full queue. The queue is left untouched.
    #[error("ring buffer overflow")]
    Overflow,

    /// Dequeue or peek on an empty queue. The queue is left untouched.
    #[error("ring buffer underflow")]
    Underflow,

    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, QueueError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("frequency must be a positive finite number, got {0}")]
    InvalidFrequency(f64),

    #[error("sample rate {sample_rate} is too low for {frequency} Hz")]
    PeriodTooShort { sample_rate: u32, frequency: f64 },

    #[error("{frequency} Hz at {sample_rate} Hz needs a period longer than {max} samples")]
    PeriodTooLong { sample_rate: u32, frequency: f64, max: usize },

    #[error("cannot render {requested} samples, limit is {max}")]
    TooManySamples { requested: usize, max: usize },

    #[error("decay must be within [0, 1], got {0}")]
    InvalidDecay(f64),

    #[error(transparent)]
    Queue(#[from] QueueError),
}
