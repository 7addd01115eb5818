use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::environment::furnace::FurnaceAction;

/// What a visualizer sees of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub temperature: f64,
    pub action: FurnaceAction,
}

/// Bounded window over the most recent values, oldest first.
pub struct History<T> {
    buffer: AllocRingBuffer<T>,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> History<T> {
        History {
            buffer: AllocRingBuffer::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, value: T) {
        self.buffer.push(value);
    }

    pub fn latest(&self) -> Option<&T> {
        self.buffer.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl History<Tick> {
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|tick| tick.temperature)
    }
}
