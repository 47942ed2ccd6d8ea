pub mod guitar_string;

pub use guitar_string::{render, GuitarString};

/// CD-quality output rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Energy kept per averaging step.
pub const DECAY: f64 = 0.996;

/// Longest period a string may have, in samples (about 24 s at 44.1 kHz).
pub const MAX_PERIOD: usize = 1 << 20;

/// Most samples a single `render` call produces (about 25 min at 44.1 kHz).
pub const MAX_SAMPLES: usize = 1 << 26;
