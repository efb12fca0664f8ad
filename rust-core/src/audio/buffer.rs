//! Lock-free block queue
//!
//! Single-producer single-consumer ring of whole `AudioBlock`s for moving
//! audio off the capture thread. Blocks come out in the order they went in.

use super::block::AudioBlock;
use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Bounded SPSC queue of audio blocks
pub struct BlockQueue {
    producer: HeapProducer<AudioBlock>,
    consumer: HeapConsumer<AudioBlock>,
    capacity: usize,
}

impl BlockQueue {
    /// Create new queue holding up to `capacity` blocks
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<AudioBlock>::new(capacity.max(1));
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity: capacity.max(1),
        }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (BlockProducer, BlockConsumer) {
        (
            BlockProducer {
                producer: self.producer,
            },
            BlockConsumer {
                consumer: self.consumer,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Capture-side end of the queue
pub struct BlockProducer {
    producer: HeapProducer<AudioBlock>,
}

impl BlockProducer {
    /// Enqueue a block, handing it back if the queue is full
    pub fn push(&mut self, block: AudioBlock) -> Result<(), AudioBlock> {
        self.producer.push(block)
    }

    /// Get number of free slots
    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }
}

/// Processing-side end of the queue
pub struct BlockConsumer {
    consumer: HeapConsumer<AudioBlock>,
}

impl BlockConsumer {
    /// Oldest queued block, if any
    pub fn pop(&mut self) -> Option<AudioBlock> {
        self.consumer.pop()
    }

    /// Get number of queued blocks
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(tag: f64) -> AudioBlock {
        AudioBlock::mono(vec![tag; 4], 44100)
    }

    #[test]
    fn test_blocks_keep_order() {
        let (mut producer, mut consumer) = BlockQueue::new(8).split();

        for tag in 0..5 {
            producer.push(block(tag as f64)).unwrap();
        }
        assert_eq!(consumer.len(), 5);

        for tag in 0..5 {
            assert_eq!(consumer.pop(), Some(block(tag as f64)));
        }
        assert!(consumer.is_empty());
        assert_eq!(consumer.pop(), None);
    }

    #[test]
    fn test_full_queue_returns_block() {
        let queue = BlockQueue::new(2);
        assert_eq!(queue.capacity(), 2);
        let (mut producer, _consumer) = queue.split();

        producer.push(block(1.0)).unwrap();
        producer.push(block(2.0)).unwrap();
        assert_eq!(producer.free_len(), 0);
        assert_eq!(producer.push(block(3.0)), Err(block(3.0)));
    }
}
