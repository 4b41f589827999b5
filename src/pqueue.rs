#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    items: Vec<T>,
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last_ind = self.items.len() - 1;
        self.items.swap(0, last_ind);
        let min_item = self.items.pop();
        self.sift_down(0);

        min_item
    }

    /// Panics if the queue is empty.
    pub fn remove(&mut self) -> T {
        self.pop()
            .unwrap_or_else(|| panic!("Can't remove item from an empty priority queue."))
    }

    fn sift_up(&mut self, mut ind: usize) {
        while ind > 0 {
            let parent_ind = (ind - 1) / 2;
            if self.items[ind] >= self.items[parent_ind] {
                break;
            }

            self.items.swap(ind, parent_ind);
            ind = parent_ind;
        }
    }

    fn sift_down(&mut self, mut ind: usize) {
        let len = self.items.len();
        loop {
            let left_ind = 2 * ind + 1;
            let right_ind = left_ind + 1;
            let mut min_ind = ind;
            if left_ind < len && self.items[left_ind] < self.items[min_ind] {
                min_ind = left_ind;
            }
            if right_ind < len && self.items[right_ind] < self.items[min_ind] {
                min_ind = right_ind;
            }
            if min_ind == ind {
                break;
            }

            self.items.swap(ind, min_ind);
            ind = min_ind;
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_in_ascending_order() {
        let mut queue = PriorityQueue::new();
        for cost in [5, 3, 8, 1, 4] {
            queue.push(cost);
        }
        assert_eq!(queue.len(), 5);

        let mut removed = Vec::new();
        while !queue.is_empty() {
            removed.push(queue.remove());
        }
        assert_eq!(removed, vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn root_stays_minimum_under_interleaving() {
        let mut queue = PriorityQueue::with_capacity(16);
        let mut last_popped = None;
        let mut pseudo = 17u64;
        for round in 0..200 {
            pseudo = pseudo.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let cost = (pseudo >> 33) % 1000;
            queue.push(cost);
            if round % 3 == 0 {
                let min_seen = *queue.items.iter().min().unwrap();
                assert_eq!(queue.peek(), Some(&min_seen));
                let popped = queue.pop().unwrap();
                assert_eq!(popped, min_seen);
                last_popped = Some(popped);
            }
        }
        assert!(last_popped.is_some());

        let drained = std::iter::from_fn(|| queue.pop()).collect::<Vec<_>>();
        assert!(drained.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn duplicates_and_collect() {
        let mut queue = [2, 2, 1, 3, 1].into_iter().collect::<PriorityQueue<_>>();
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    #[should_panic]
    fn remove_from_empty_panics() {
        let mut queue = PriorityQueue::<usize>::new();
        queue.remove();
    }
}
