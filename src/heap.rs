/// Binary min-heap over values with a separately supplied priority.
///
/// Entries with equal priority come out in no particular order.
#[derive(Debug, Clone)]
pub struct MinHeap<T, P = usize> {
    entries: Vec<(T, P)>,
}

impl<T, P: PartialOrd> Default for MinHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: PartialOrd> MinHeap<T, P> {
    pub fn new() -> Self {
        MinHeap {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value that [`MinHeap::extract_min`] would return next.
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|(value, _)| value)
    }

    /// Priority of the current minimum, if any.
    pub fn peek_priority(&self) -> Option<&P> {
        self.entries.first().map(|(_, priority)| priority)
    }

    pub fn insert(&mut self, value: T, priority: P) {
        self.entries.push((value, priority));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the value with the lowest priority.
    /// Returns `None` on an empty heap.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        // Move the last entry to the root, then restore the heap property from the top
        let (value, _) = self.entries.swap_remove(0);
        self.sift_down(0);
        Some(value)
    }

    fn sift_up(&mut self, mut current: usize) {
        while current > 0 {
            let parent = (current - 1) / 2;
            if self.entries[parent].1 > self.entries[current].1 {
                self.entries.swap(parent, current);
                current = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut current: usize) {
        let len = self.entries.len();
        loop {
            let left = current * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.entries[right].1 < self.entries[left].1 {
                right
            } else {
                left
            };
            if self.entries[current].1 > self.entries[smaller].1 {
                self.entries.swap(current, smaller);
                current = smaller;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    #[test]
    fn test_extract_in_priority_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut priorities: Vec<usize> = (0..200).map(|i| i % 37).collect();
        priorities.shuffle(&mut rng);

        let mut heap = MinHeap::new();
        for (i, &p) in priorities.iter().enumerate() {
            heap.insert(i, p);
        }
        assert_eq!(heap.len(), 200);

        let mut extracted = Vec::new();
        while let Some(i) = heap.extract_min() {
            extracted.push(priorities[i]);
        }
        assert_eq!(extracted.len(), 200);
        assert!(extracted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_peek_matches_extract() {
        let mut heap = MinHeap::new();
        assert_eq!(heap.peek(), None);
        heap.insert('b', 2);
        heap.insert('a', 1);
        heap.insert('c', 3);
        assert_eq!(heap.peek(), Some(&'a'));
        assert_eq!(heap.peek_priority(), Some(&1));
        assert_eq!(heap.extract_min(), Some('a'));
        assert_eq!(heap.peek(), Some(&'b'));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: MinHeap<&str> = MinHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
        heap.insert("a", 3);
        assert_eq!(heap.peek_priority(), Some(&3));
        assert_eq!(heap.extract_min(), Some("a"));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_interleaved_operations() {
        let mut heap = MinHeap::new();
        heap.insert('c', 3);
        heap.insert('a', 1);
        assert_eq!(heap.extract_min(), Some('a'));
        heap.insert('b', 2);
        heap.insert('d', 4);
        assert_eq!(heap.extract_min(), Some('b'));
        assert_eq!(heap.extract_min(), Some('c'));
        assert_eq!(heap.extract_min(), Some('d'));
        assert_eq!(heap.extract_min(), None);
    }
}
