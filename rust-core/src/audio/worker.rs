//! Background note detection
//!
//! Moves the processor onto its own thread. Capture submits whole owned
//! blocks through a `BlockQueue`; the worker filters and analyzes them in
//! arrival order and reports to a `NoteSink`.

use super::block::AudioBlock;
use super::buffer::{BlockConsumer, BlockProducer, BlockQueue};
use super::processor::{NoteProcessor, NoteSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Idle poll interval when the queue is empty
const IDLE_SLEEP: Duration = Duration::from_micros(100);

/// Note detector running on a dedicated thread
pub struct NoteWorker {
    producer: BlockProducer,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    rejected: usize,
}

impl NoteWorker {
    /// Start a worker owning `processor`
    ///
    /// # Arguments
    /// * `processor` - Processor for this capture session
    /// * `sink` - Receives one event per processed block
    /// * `capacity` - Maximum number of blocks waiting to be processed
    pub fn spawn<S>(processor: NoteProcessor, sink: S, capacity: usize) -> Self
    where
        S: NoteSink + Send + 'static,
    {
        let (producer, consumer) = BlockQueue::new(capacity).split();
        let running = Arc::new(AtomicBool::new(true));

        let thread_running = Arc::clone(&running);
        let handle = std::thread::spawn(move || {
            run(processor, sink, consumer, thread_running);
        });

        log::debug!("Note worker started (queue capacity {})", capacity);

        Self {
            producer,
            running,
            handle: Some(handle),
            rejected: 0,
        }
    }

    /// Queue a block for processing
    ///
    /// Returns the block if the queue is full or the worker has stopped.
    pub fn submit(&mut self, block: AudioBlock) -> Result<(), AudioBlock> {
        if !self.is_running() {
            return Err(block);
        }

        self.producer.push(block).map_err(|block| {
            self.rejected += 1;
            log::warn!(
                "Note worker queue full, block of {} samples rejected",
                block.samples().len()
            );
            block
        })
    }

    /// Process everything already queued, then stop the thread
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Note worker thread panicked");
            }
            log::debug!("Note worker stopped ({} blocks rejected)", self.rejected);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Blocks turned away because the queue was full
    pub fn rejected_blocks(&self) -> usize {
        self.rejected
    }
}

impl Drop for NoteWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<S: NoteSink>(
    mut processor: NoteProcessor,
    mut sink: S,
    mut consumer: BlockConsumer,
    running: Arc<AtomicBool>,
) {
    loop {
        if let Some(block) = consumer.pop() {
            handle_block(&mut processor, &mut sink, &block);
            continue;
        }

        if !running.load(Ordering::SeqCst) {
            // Blocks pushed before stop() are visible now
            while let Some(block) = consumer.pop() {
                handle_block(&mut processor, &mut sink, &block);
            }
            break;
        }

        std::thread::sleep(IDLE_SLEEP);
    }
}

/// The sink has already heard a no-detection for a rejected block
fn handle_block<S: NoteSink>(processor: &mut NoteProcessor, sink: &mut S, block: &AudioBlock) {
    if let Err(e) = processor.dispatch(block, sink) {
        log::warn!("Block reported as no detection: {}", e);
    }
}
