use crate::error::{Error, Result};

/// array-backed binary min-heap
///
/// children of slot `i` live at `2i + 1` and `2i + 2`. Ordering comes entirely
/// from `T: Ord`, so callers that need a deterministic tie-break must fold it
/// into the key.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T>
where
    T: Ord,
{
    /// heapify `elements` in place, bottom-up, in linear time
    pub fn build(elements: Vec<T>) -> Self {
        let mut heap = MinHeap { elements };
        for i in (0..heap.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// remove and return the smallest element
    pub fn extract_min(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let min = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.elements[left] < self.elements[smallest] {
                smallest = left;
            }
            if right < n && self.elements[right] < self.elements[smallest] {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.elements[i] >= self.elements[parent] {
                return;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.elements.len()).all(|i| self.elements[(i - 1) / 2] <= self.elements[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_establishes_heap_order() {
        let heap = MinHeap::build(vec![9, 4, 7, 1, 8, 2, 6, 3, 5, 0]);
        assert!(heap.is_valid());
        assert_eq!(heap.peek(), Some(&0));
    }

    #[test]
    fn extracts_in_ascending_order() {
        let mut heap = MinHeap::build(vec![5, 3, 9, 3, 1, 7]);
        heap.insert(2);
        heap.insert(8);
        assert!(heap.is_valid());

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.extract_min().unwrap());
        }
        assert_eq!(drained, vec![1, 2, 3, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn ties_follow_the_full_key() {
        let mut heap = MinHeap::build(vec![(2, 'c'), (1, 'b'), (2, 'a'), (1, 'a')]);
        assert_eq!(heap.extract_min().unwrap(), (1, 'a'));
        assert_eq!(heap.extract_min().unwrap(), (1, 'b'));
        assert_eq!(heap.extract_min().unwrap(), (2, 'a'));
        assert_eq!(heap.extract_min().unwrap(), (2, 'c'));
    }

    #[test]
    fn empty_extract_fails() {
        let mut heap: MinHeap<u32> = MinHeap::build(Vec::new());
        assert!(matches!(heap.extract_min(), Err(Error::EmptyQueue)));
        heap.insert(4);
        assert_eq!(heap.extract_min().unwrap(), 4);
        assert!(matches!(heap.extract_min(), Err(Error::EmptyQueue)));
    }
}
