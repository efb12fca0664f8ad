//! Real-time FIR filter with state management
//!
//! Direct-form convolution over a circular delay line. State survives
//! across calls, so a stream split into any number of blocks filters
//! identically to the same stream delivered in one piece.

use super::design::FilterCoefficients;

/// Circular buffer of the most recent input samples
///
/// Between calls the cursor points at the oldest sample, which the next
/// input overwrites; reading backward from just before it visits samples
/// newest to oldest.
#[derive(Debug, Clone)]
pub struct DelayLine {
    samples: Vec<f64>,
    cursor: usize,
}

impl DelayLine {
    /// Zeroed delay line of `length` samples
    pub fn new(length: usize) -> Self {
        Self {
            samples: vec![0.0; length],
            cursor: 0,
        }
    }

    /// Store `input` at the cursor (overwrites the oldest sample)
    #[inline]
    fn write(&mut self, input: f64) {
        self.samples[self.cursor] = input;
    }

    /// Dot product of `taps` with the stored samples, tap 0 against the newest
    #[inline]
    fn convolve(&self, taps: &[f64]) -> f64 {
        let last = self.samples.len() - 1;
        let mut idx = self.cursor;
        let mut acc = 0.0;
        for &tap in taps {
            acc += tap * self.samples[idx];
            idx = if idx == 0 { last } else { idx - 1 };
        }
        acc
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.samples.len();
    }

    /// Samples from newest to oldest
    pub fn recent(&self) -> impl Iterator<Item = f64> + '_ {
        let len = self.samples.len();
        (1..=len).map(move |k| self.samples[(self.cursor + len - k) % len])
    }

    /// Zero every sample and rewind the cursor
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Real-time FIR filter processor with zero-allocation ring buffer
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients h[n]
    coefficients: FilterCoefficients,

    /// Delay line, same length as the coefficients
    delay_line: DelayLine,
}

impl FirFilter {
    /// Create a new FIR filter with a zeroed delay line
    pub fn new(coefficients: FilterCoefficients) -> Self {
        let delay_line = DelayLine::new(coefficients.len());

        Self {
            coefficients,
            delay_line,
        }
    }

    /// Process single sample (zero-allocation)
    ///
    /// # Arguments
    /// * `input` - Input sample x[n]
    ///
    /// # Returns
    /// Filtered output sample y[n] = Σ h[k] * x[n-k]
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.delay_line.write(input);
        let output = self.delay_line.convolve(self.coefficients.as_slice());
        self.delay_line.advance();
        output
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output samples (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place (overwrites input buffer)
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (clear delay line)
    pub fn reset(&mut self) {
        self.delay_line.clear();
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    pub fn delay_line(&self) -> &DelayLine {
        &self.delay_line
    }

    /// Filter length
    pub fn length(&self) -> usize {
        self.coefficients.len()
    }

    /// Group delay of the center tap, in samples
    pub fn group_delay_samples(&self) -> f64 {
        (self.length() - 1) as f64 / 2.0
    }
}
