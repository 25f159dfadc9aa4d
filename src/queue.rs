use std::fmt;
use std::iter::{Chain, FusedIterator, Rev};
use std::mem;
use std::ops::Index;
use std::slice;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::errors::QueueError;

/// Minimal FIFO capability: anything that can take elements in and hand them
/// back out in arrival order.
pub trait Queue {
    type Element;

    fn enqueue(&mut self, value: Self::Element);

    fn dequeue(&mut self) -> Option<Self::Element>;
}

/// FIFO queue backed by two buffers.
///
/// `outbound` holds the front of the queue reversed, so the next element to
/// leave is its last one. `inbound` holds newly enqueued elements in arrival
/// order. The logical order is `reverse(outbound) ++ inbound`.
///
/// Enqueue is a push onto `inbound`. Dequeue pops from `outbound`, first
/// moving `inbound` over (reversed) when `outbound` has run dry. Every element
/// crosses between the buffers at most once, so both operations are amortized
/// O(1).
#[derive(Clone)]
pub struct FifoQueue<T> {
    outbound: Vec<T>,
    inbound: Vec<T>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self {
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// Builds a queue whose first dequeue yields the first element of
    /// `elements`.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut outbound: Vec<T> = elements.into_iter().collect();
        outbound.reverse();
        Self {
            outbound,
            inbound: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.outbound.len() + self.inbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `position`, counted from the front. Reads across both
    /// buffers without rebalancing.
    pub fn get(&self, position: usize) -> Option<&T> {
        let split = self.outbound.len();
        if position < split {
            self.outbound.get(split - position - 1)
        } else {
            self.inbound.get(position - split)
        }
    }

    /// Like [`FifoQueue::get`] but reports an out-of-range position as an error,
    /// for callers handling untrusted indices.
    pub fn at(&self, position: usize) -> Result<&T, QueueError> {
        self.get(position).ok_or(QueueError::IndexOutOfRange {
            index: position,
            len: self.len(),
        })
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.inbound.last().or_else(|| self.outbound.first())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.outbound.iter().rev().chain(self.inbound.iter()),
        }
    }

    fn rebalance(&mut self) {
        if !self.outbound.is_empty() || self.inbound.is_empty() {
            return;
        }

        trace!(moved = self.inbound.len(), "rebalancing inbound into outbound");
        // outbound is empty here, so swapping hands it the inbound allocation
        mem::swap(&mut self.outbound, &mut self.inbound);
        self.outbound.reverse();
    }
}

impl<T> Queue for FifoQueue<T> {
    type Element = T;

    fn enqueue(&mut self, value: T) {
        self.inbound.push(value);
    }

    fn dequeue(&mut self) -> Option<T> {
        self.rebalance();
        self.outbound.pop()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for FifoQueue<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        match self.get(position) {
            Some(value) => value,
            None => panic!(
                "queue index out of range: the len is {} but the index is {}",
                self.len(),
                position
            ),
        }
    }
}

impl<T> FromIterator<T> for FifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> From<Vec<T>> for FifoQueue<T> {
    fn from(mut elements: Vec<T>) -> Self {
        elements.reverse();
        Self {
            outbound: elements,
            inbound: Vec::new(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for FifoQueue<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from_elements(elements)
    }
}

impl<T: fmt::Debug> fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for FifoQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for FifoQueue<T> {}

// Serialized as a plain front-to-back sequence, independent of the buffer split.
impl<T: Serialize> Serialize for FifoQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FifoQueue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Borrowing iterator over a [`FifoQueue`], front to back.
pub struct Iter<'a, T> {
    inner: Chain<Rev<slice::Iter<'a, T>>, slice::Iter<'a, T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a FifoQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning iterator that drains a [`FifoQueue`] through `dequeue`.
pub struct IntoIter<T> {
    queue: FifoQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for FifoQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { queue: self }
    }
}

/// Builds a [`FifoQueue`] from a bracketed list, first element at the front.
///
/// ```
/// use duoqueue::{fifo_queue, Queue};
///
/// let mut planets = fifo_queue!["Mercury", "Venus", "Earth", "Mars"];
/// assert_eq!(planets.dequeue(), Some("Mercury"));
/// assert_eq!(planets.len(), 3);
/// ```
#[macro_export]
macro_rules! fifo_queue {
    () => {
        $crate::queue::FifoQueue::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::queue::FifoQueue::from_elements([$($value),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn drain<T>(queue: &mut FifoQueue<T>) -> Vec<T> {
        std::iter::from_fn(|| queue.dequeue()).collect()
    }

    #[test]
    fn test_dequeue_preserves_enqueue_order() {
        let mut queue = FifoQueue::new();
        for i in 0..100 {
            queue.enqueue(i);
        }

        assert_eq!(drain(&mut queue), (0..100).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_count_after_enqueues_and_dequeues() {
        let mut queue = FifoQueue::new();
        for i in 0..10 {
            queue.enqueue(i);
        }
        for _ in 0..4 {
            queue.dequeue();
        }

        assert_eq!(queue.len(), 6);
    }

    #[test]
    fn test_dequeue_empty_queue() {
        let mut queue: FifoQueue<i32> = FifoQueue::new();

        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_interleaved_operations_keep_arrival_order() {
        let mut queue = FifoQueue::new();
        queue.enqueue("A");
        queue.enqueue("B");
        assert_eq!(queue.dequeue(), Some("A"));
        queue.enqueue("C");
        assert_eq!(queue.dequeue(), Some("B"));
        assert_eq!(queue.dequeue(), Some("C"));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_numeric_scenario() {
        let mut queue = FifoQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.len(), 1);

        queue.enqueue(3);
        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_literal_construction() {
        let mut planets = crate::fifo_queue!["Mercury", "Venus", "Earth", "Mars"];
        assert_eq!(planets.dequeue(), Some("Mercury"));
        assert_eq!(planets.len(), 3);

        let mut letters = FifoQueue::from_elements(vec!['a', 'b', 'c']);
        assert_eq!(drain(&mut letters), vec!['a', 'b', 'c']);

        let empty: FifoQueue<u8> = crate::fifo_queue![];
        assert!(empty.is_empty());
    }

    #[test]
    fn test_conversions_agree() {
        let from_vec = FifoQueue::from(vec![1, 2, 3]);
        let from_array = FifoQueue::from([1, 2, 3]);
        let collected: FifoQueue<i32> = (1..=3).collect();

        assert_eq!(from_vec, from_array);
        assert_eq!(from_array, collected);
        assert_eq!(from_vec.front(), Some(&1));
    }

    #[test]
    fn test_front_and_back_track_next_dequeue_and_last_enqueue() {
        let mut queue = FifoQueue::from_elements([10, 20]);
        queue.enqueue(30);
        queue.enqueue(40);

        for _ in 0..4 {
            assert_eq!(queue.at(0).ok().copied(), queue.front().copied());
            assert_eq!(queue.at(queue.len() - 1), Ok(&40));
            assert_eq!(queue.back(), Some(&40));

            let expected = queue.front().copied();
            assert_eq!(queue.dequeue(), expected);
        }

        assert_eq!(queue.front(), None);
        assert_eq!(queue.back(), None);
    }

    #[test]
    fn test_indexed_read_spans_both_buffers() {
        let mut queue = FifoQueue::from_elements(["a", "b", "c"]);
        queue.dequeue();
        queue.enqueue("d");
        queue.enqueue("e");

        assert_eq!(queue.outbound, vec!["c", "b"]);
        assert_eq!(queue.inbound, vec!["d", "e"]);

        let read: Vec<&str> = (0..queue.len()).map(|i| queue[i]).collect();
        assert_eq!(read, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_indexed_read_does_not_rebalance() {
        let mut queue = FifoQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);

        assert_eq!(queue.at(1), Ok(&2));
        assert_eq!(queue.get(0), Some(&1));
        assert!(queue.outbound.is_empty());
        assert_eq!(queue.inbound, vec![1, 2]);
    }

    #[test]
    fn test_at_out_of_range() {
        let queue = FifoQueue::from_elements([1, 2, 3]);

        assert_eq!(queue.at(3), Err(QueueError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(queue.get(7), None);
    }

    #[test]
    #[should_panic(expected = "queue index out of range")]
    fn test_index_out_of_range_panics() {
        let queue: FifoQueue<i32> = FifoQueue::new();
        let _ = queue[0];
    }

    #[test]
    fn test_absence_is_distinct_from_stored_none() {
        let mut queue: FifoQueue<Option<i32>> = FifoQueue::new();
        queue.enqueue(None);

        assert_eq!(queue.dequeue(), Some(None));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_rebalance_moves_each_element_once() {
        let mut queue = FifoQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);

        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.outbound, vec![3, 2]);
        assert!(queue.inbound.is_empty());

        queue.enqueue(4);
        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.inbound, vec![4]);
    }

    #[test]
    fn test_iter_matches_drain_order() {
        let mut queue = FifoQueue::from_elements([1, 2]);
        queue.enqueue(3);
        queue.dequeue();
        queue.enqueue(4);

        let iterated: Vec<i32> = queue.iter().copied().collect();
        let reversed: Vec<i32> = queue.iter().rev().copied().collect();
        assert_eq!(queue.iter().len(), 3);
        assert_eq!(reversed, vec![4, 3, 2]);
        assert_eq!(iterated, queue.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_long_interleaving_matches_vecdeque() {
        let mut queue = FifoQueue::new();
        let mut model = VecDeque::new();

        for step in 0..1000u32 {
            if step % 3 == 0 {
                assert_eq!(queue.dequeue(), model.pop_front(), "step {}", step);
            } else {
                queue.enqueue(step);
                model.push_back(step);
            }

            assert_eq!(queue.len(), model.len(), "step {}", step);
            assert_eq!(queue.is_empty(), model.is_empty());
            assert_eq!(queue.front(), model.front(), "step {}", step);
            assert_eq!(queue.back(), model.back(), "step {}", step);
            for i in 0..=model.len() {
                assert_eq!(queue.get(i), model.get(i), "step {} position {}", step, i);
            }
            assert!(queue.iter().eq(model.iter()), "step {}", step);
        }

        // drain through several more rebalances while reading both ends
        while let Some(expected) = model.pop_front() {
            assert_eq!(queue.front(), Some(&expected));
            assert_eq!(queue.back(), model.back().or(Some(&expected)));
            assert_eq!(queue.dequeue(), Some(expected));
        }
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_equality_ignores_buffer_split() {
        let literal = FifoQueue::from_elements([1, 2, 3]);
        let mut enqueued = FifoQueue::new();
        enqueued.enqueue(1);
        enqueued.enqueue(2);
        enqueued.enqueue(3);

        assert_eq!(literal, enqueued);
        assert_ne!(literal, FifoQueue::from_elements([1, 2]));
    }

    #[test]
    fn test_debug_lists_front_to_back() {
        let mut queue = FifoQueue::from_elements([1, 2]);
        queue.enqueue(3);

        assert_eq!(format!("{:?}", queue), "[1, 2, 3]");
    }

    #[test]
    fn test_json_form_is_front_to_back() {
        let mut queue = FifoQueue::from_elements(["x", "y"]);
        queue.enqueue("z");

        let json = serde_json::to_string(&queue).unwrap();
        assert_eq!(json, r#"["x","y","z"]"#);

        let mut decoded: FifoQueue<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.dequeue(), Some("x".to_owned()));
    }
}
