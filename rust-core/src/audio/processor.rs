//! Block processor - low-pass filter followed by pitch estimation
//!
//! Runs synchronously on whichever thread delivers the block. The only
//! state carried between blocks is the filter's delay line.

use super::block::AudioBlock;
use super::pcm::{decode_pcm16_le, downmix_to_mono, PcmError};
use crate::config::DetectorConfig;
use crate::filters::design::{design_lowpass_fir, DesignError};
use crate::filters::fir::FirFilter;
use crate::note::{Note, NoteEvent};
use crate::spectrum::analysis::PitchEstimator;
use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessorError {
    #[error("Invalid filter design: {0}")]
    Design(#[from] DesignError),

    #[error("Invalid PCM input: {0}")]
    Pcm(#[from] PcmError),

    #[error("Block sample rate {actual} Hz does not match the configured {expected} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },
}

/// Receiver of per-block results (the display side)
pub trait NoteSink {
    /// A note was found in the block
    fn on_note_detected(&mut self, note: Note);

    /// The block was silent, empty or had no usable pitch
    fn on_no_detection(&mut self);

    /// Route an event to the matching callback
    fn on_event(&mut self, event: NoteEvent) {
        match event {
            NoteEvent::Detected(note) => self.on_note_detected(note),
            NoteEvent::NoDetection => self.on_no_detection(),
        }
    }
}

impl NoteSink for Vec<NoteEvent> {
    fn on_note_detected(&mut self, note: Note) {
        self.push(NoteEvent::Detected(note));
    }

    fn on_no_detection(&mut self) {
        self.push(NoteEvent::NoDetection);
    }
}

/// Shared sink; a poisoned lock still delivers the event
impl<S: NoteSink + ?Sized> NoteSink for Arc<Mutex<S>> {
    fn on_note_detected(&mut self, note: Note) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_note_detected(note);
    }

    fn on_no_detection(&mut self) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_no_detection();
    }
}

/// Note detector for one capture stream
///
/// Owns its delay line; build a fresh processor per capture session
/// rather than sharing one between streams.
pub struct NoteProcessor {
    config: DetectorConfig,
    filter: FirFilter,
    estimator: PitchEstimator,

    /// Filtered copy of the current block
    filtered: Vec<f64>,
}

impl NoteProcessor {
    /// Design the low-pass filter and set up the estimator
    ///
    /// Fails before any audio is processed if the configuration is invalid.
    pub fn new(config: DetectorConfig) -> Result<Self, ProcessorError> {
        let coefficients = design_lowpass_fir(&config.lowpass_spec())?;

        log::info!(
            "Note processor: {} Hz, {} Hz low-pass with {} taps (DC gain {:.4})",
            config.sample_rate,
            config.cutoff_hz,
            coefficients.len(),
            coefficients.dc_gain()
        );

        Ok(Self {
            estimator: PitchEstimator::new(config.estimator.clone()),
            filter: FirFilter::new(coefficients),
            config,
            filtered: Vec::new(),
        })
    }

    /// Handle one block of normalized samples from capture
    ///
    /// Interleaved multi-channel input is averaged to mono first. A block
    /// recorded at a different rate than configured is rejected, since the
    /// filter and the bin-to-Hz conversion are tied to that rate.
    pub fn on_audio_block(
        &mut self,
        samples: &[f64],
        sample_rate: u32,
        channel_count: u16,
    ) -> Result<NoteEvent, ProcessorError> {
        if sample_rate != self.config.sample_rate {
            return Err(ProcessorError::SampleRateMismatch {
                expected: self.config.sample_rate,
                actual: sample_rate,
            });
        }

        let mono: Cow<[f64]> = match channel_count {
            1 => Cow::Borrowed(samples),
            n => Cow::Owned(downmix_to_mono(samples, n)?),
        };

        Ok(self.process_mono(&mono))
    }

    /// Handle one block of raw 16-bit little-endian PCM
    ///
    /// A trailing odd byte is ignored.
    pub fn on_pcm16_block(
        &mut self,
        bytes: &[u8],
        sample_rate: u32,
        channel_count: u16,
    ) -> Result<NoteEvent, ProcessorError> {
        let samples = decode_pcm16_le(bytes);
        self.on_audio_block(&samples, sample_rate, channel_count)
    }

    pub fn process_block(&mut self, block: &AudioBlock) -> Result<NoteEvent, ProcessorError> {
        self.on_audio_block(block.samples(), block.sample_rate(), block.channel_count())
    }

    /// Handle a block and hand the result to `sink`
    ///
    /// The sink hears exactly once per block. A rejected block reaches it
    /// as a no-detection while the error is still returned to the caller.
    pub fn dispatch<S: NoteSink + ?Sized>(
        &mut self,
        block: &AudioBlock,
        sink: &mut S,
    ) -> Result<NoteEvent, ProcessorError> {
        let result = self.process_block(block);
        sink.on_event(result.as_ref().map_or(NoteEvent::NoDetection, |event| *event));
        result
    }

    /// Filter and analyze mono samples at the configured rate
    pub fn process_mono(&mut self, samples: &[f64]) -> NoteEvent {
        self.filtered.clear();
        self.filtered.extend_from_slice(samples);
        self.filter.process_block_inplace(&mut self.filtered);

        let event = self.estimator.estimate(&self.filtered, self.config.sample_rate);
        log::debug!("Block of {} samples -> {}", samples.len(), event);
        event
    }

    /// Clear filter history, e.g. before reusing the processor for a new stream
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn filter(&self) -> &FirFilter {
        &self.filter
    }
}
