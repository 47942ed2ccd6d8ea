use rand::Rng;
use tracing::debug;

use super::{DECAY, MAX_PERIOD, MAX_SAMPLES, SAMPLE_RATE};
use crate::error::SynthError;
use crate::queue::ArrayRingBuffer;

/// Karplus-Strong plucked string.
///
/// The buffer always holds exactly one period of samples: `tic` removes the
/// front sample and puts back the damped average of it and its successor.
#[derive(Debug, Clone)]
pub struct GuitarString {
    buffer: ArrayRingBuffer<f64>,
    frequency: f64,
    decay: f64,
}

impl GuitarString {
    pub fn new(frequency: f64) -> Result<Self, SynthError> {
        Self::with_params(frequency, SAMPLE_RATE, DECAY)
    }

    pub fn with_params(frequency: f64, sample_rate: u32, decay: f64) -> Result<Self, SynthError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SynthError::InvalidFrequency(frequency));
        }
        if !(0.0..=1.0).contains(&decay) {
            return Err(SynthError::InvalidDecay(decay));
        }
        let period = (sample_rate as f64 / frequency).round();
        if period < 1.0 {
            return Err(SynthError::PeriodTooShort { sample_rate, frequency });
        }
        if period > MAX_PERIOD as f64 {
            return Err(SynthError::PeriodTooLong { sample_rate, frequency, max: MAX_PERIOD });
        }

        let mut buffer = ArrayRingBuffer::new(period as usize)?;
        while !buffer.is_full() {
            buffer.enqueue(0.0)?;
        }
        debug!(frequency, period = buffer.capacity(), "string tuned");
        Ok(Self { buffer, frequency, decay })
    }

    pub fn frequency(&self) -> f64 { self.frequency }

    /// Samples per period.
    pub fn period(&self) -> usize { self.buffer.capacity() }

    /// Replaces every sample with white noise in [-0.5, 0.5).
    pub fn pluck<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SynthError> {
        while !self.buffer.is_empty() {
            self.buffer.dequeue()?;
        }
        while !self.buffer.is_full() {
            self.buffer.enqueue(rng.random::<f64>() - 0.5)?;
        }
        Ok(())
    }

    /// Advances the simulation by one sample.
    pub fn tic(&mut self) -> Result<(), SynthError> {
        let front = self.buffer.dequeue()?;
        // A one-sample period has no successor; it averages with itself.
        let next = self.buffer.peek().copied().unwrap_or(front);
        self.buffer.enqueue(self.decay * 0.5 * (front + next))?;
        Ok(())
    }

    /// Current output sample.
    pub fn sample(&self) -> f64 {
        self.buffer.peek().copied().unwrap_or(0.0)
    }

    /// Sum of squared samples currently in the string.
    pub fn energy(&self) -> f64 {
        self.buffer.iter().map(|s| s * s).sum()
    }
}

/// Collects `n` successive samples, ticking after each. `n` is capped at
/// `MAX_SAMPLES`.
pub fn render(string: &mut GuitarString, n: usize) -> Result<Vec<f64>, SynthError> {
    if n > MAX_SAMPLES {
        return Err(SynthError::TooManySamples { requested: n, max: MAX_SAMPLES });
    }
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(string.sample());
        string.tic()?;
    }
    Ok(out)
}
