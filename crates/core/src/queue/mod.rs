//! Single-producer/single-consumer sample queue
//!
//! Carries inertial samples from the data-ready interrupt to the control
//! cadence. Storage and the lock-free split are `heapless::spsc`; this
//! module adds the overflow policy and a dropped-sample counter readable
//! from both halves.
//!
//! # Capacity
//!
//! `SampleQueue<T, N>` has `N` slots and holds at most `N - 1` items, the
//! same convention as `heapless::spsc::Queue`. [`DEFAULT_QUEUE_SLOTS`] gives
//! the reference capacity of 16.
//!
//! # Overflow policy
//!
//! **Reject.** When the queue is full, `push` hands the new item back as
//! `Err(item)` and bumps the dropped counter. Already queued samples are
//! never overwritten, so for a given push/pop sequence the queue contents
//! are fully determined.
//!
//! # Example
//!
//! ```
//! use tiller_core::queue::SampleQueue;
//!
//! let mut queue: SampleQueue<u32, 4> = SampleQueue::new();
//! let (mut tx, mut rx) = queue.split();
//!
//! assert!(tx.push(1).is_ok());
//! assert!(tx.push(2).is_ok());
//! assert_eq!(rx.pop(), Some(1));
//! assert_eq!(rx.pop(), Some(2));
//! assert_eq!(rx.pop(), None);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::spsc;

/// Samples the IMU interrupt may queue ahead of the estimator
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Slot count giving [`DEFAULT_QUEUE_CAPACITY`]
pub const DEFAULT_QUEUE_SLOTS: usize = DEFAULT_QUEUE_CAPACITY + 1;

/// Fixed-capacity SPSC queue with reject-on-full and drop counting
pub struct SampleQueue<T, const N: usize> {
    inner: spsc::Queue<T, N>,
    dropped: AtomicU32,
}

impl<T, const N: usize> SampleQueue<T, N> {
    /// Creates an empty queue
    pub const fn new() -> Self {
        Self {
            inner: spsc::Queue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Splits the queue into its producer and consumer halves
    ///
    /// The mutable borrow guarantees a single producer and a single consumer
    /// for as long as the halves are alive.
    pub fn split(&mut self) -> (Producer<'_, T>, Consumer<'_, T>) {
        let (producer, consumer) = self.inner.split();
        (
            Producer {
                inner: producer,
                dropped: &self.dropped,
            },
            Consumer {
                inner: consumer,
                dropped: &self.dropped,
            },
        )
    }

    /// Pushes without splitting (exclusive access)
    pub fn push(&mut self, item: T) -> Result<(), T> {
        self.inner.enqueue(item).inspect_err(|_| {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        })
    }

    /// Pops without splitting (exclusive access)
    pub fn pop(&mut self) -> Option<T> {
        self.inner.dequeue()
    }

    /// Number of unread items
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Maximum number of unread items (`N - 1`)
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Number of items rejected because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<T, const N: usize> Default for SampleQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side half of a [`SampleQueue`]
pub struct Producer<'a, T> {
    inner: spsc::Producer<'a, T>,
    dropped: &'a AtomicU32,
}

impl<T> Producer<'_, T> {
    /// Pushes an item, returning it back if the queue is full
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), T> {
        self.inner.enqueue(item).inspect_err(|_| {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        })
    }

    pub fn is_full(&self) -> bool {
        !self.inner.ready()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Control-side half of a [`SampleQueue`]
pub struct Consumer<'a, T> {
    inner: spsc::Consumer<'a, T>,
    dropped: &'a AtomicU32,
}

impl<T> Consumer<'_, T> {
    /// Pops the oldest unread item
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.inner.dequeue()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
