//! Audio block intake: PCM normalization, processing and off-thread handoff

pub mod pcm;
pub mod block;
pub mod buffer;
pub mod processor;
pub mod worker;

pub use block::AudioBlock;
pub use buffer::BlockQueue;
pub use processor::{NoteProcessor, NoteSink, ProcessorError};
pub use worker::NoteWorker;
