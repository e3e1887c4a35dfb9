//! Bounded frame queue
//!
//! Per-direction buffer between a connection's transport and the splitter
//! tick. When the queue is full the oldest frame is dropped to make room, so
//! a stalled consumer costs stale media rather than unbounded memory.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Bounded FIFO of frames with drop-oldest overflow behavior
#[derive(Debug)]
pub struct FrameQueue<T> {
    frames: Mutex<VecDeque<T>>,
    capacity: usize,
}

impl<T> FrameQueue<T> {
    /// Create a queue holding at most `capacity` frames
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a frame, evicting the oldest if the queue is full.
    ///
    /// Returns `true` if the frame was added without evicting anything.
    pub fn push(&self, frame: T) -> bool {
        let mut frames = self.lock();
        let evicted = if frames.len() >= self.capacity {
            frames.pop_front();
            true
        } else {
            false
        };
        frames.push_back(frame);
        !evicted
    }

    /// Take the oldest pending frame
    pub fn poll(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Number of pending frames
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue has no pending frames
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard all pending frames
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        // A panic mid-push/poll cannot leave the deque inconsistent, so a
        // poisoned lock is still safe to reuse.
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
