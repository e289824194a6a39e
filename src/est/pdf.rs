use num_traits::Float;

/// A discrete distribution over items, supporting weighted sampling and
/// weight updates in logarithmic time.
///
/// Weights live at the leaves of an array-backed binary tree; each interior
/// level stores pairwise sums and the topmost level holds the single total.
/// Element handles are insertion indices and stay valid until `clear`.
pub struct Pdf<T, F: Float> {
    items: Vec<T>,
    levels: Vec<Vec<F>>,
}

impl<T, F: Float> Pdf<T, F> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            levels: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item with the given weight and returns its element handle.
    pub fn add(&mut self, item: T, weight: F) -> usize {
        let index = self.items.len();
        self.items.push(item);
        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        self.levels[0].push(weight);
        self.propagate(index);
        index
    }

    /// Returns the current weight of an element.
    pub fn weight(&self, elem: usize) -> F {
        self.levels[0][elem]
    }

    /// Sets the weight of an element.
    pub fn update(&mut self, elem: usize, weight: F) {
        self.levels[0][elem] = weight;
        self.propagate(elem);
    }

    /// Returns the sum of all weights.
    pub fn total_weight(&self) -> F {
        match self.levels.last() {
            Some(top) => top[0],
            None => F::zero(),
        }
    }

    /// Returns the item selected by the uniform draw `u` in [0, 1), with
    /// probability proportional to its weight.
    /// Panics if the distribution is empty.
    pub fn sample(&self, u: F) -> &T {
        assert!(!self.is_empty(), "cannot sample an empty distribution");

        let mut remaining = u * self.total_weight();
        let mut index = 0;
        for level in (0..self.levels.len() - 1).rev() {
            let left_child = 2 * index;
            let left = self.levels[level][left_child];
            if remaining < left || left_child + 1 >= self.levels[level].len() {
                index = left_child;
            } else {
                remaining = remaining - left;
                index = left_child + 1;
            }
        }
        &self.items[index]
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.levels.clear();
    }

    /// Recomputes the sums on the path from a leaf to the root, growing a
    /// new root level whenever the current top still holds two entries.
    fn propagate(&mut self, elem: usize) {
        let mut index = elem;
        let mut level = 0;
        while self.levels[level].len() > 1 {
            let parent = index / 2;
            let left = self.levels[level][2 * parent];
            let right = if 2 * parent + 1 < self.levels[level].len() {
                self.levels[level][2 * parent + 1]
            } else {
                F::zero()
            };
            let sum = left + right;

            if level + 1 == self.levels.len() {
                self.levels.push(Vec::new());
            }
            let upper = &mut self.levels[level + 1];
            if parent == upper.len() {
                upper.push(sum);
            } else {
                upper[parent] = sum;
            }

            index = parent;
            level += 1;
        }
    }
}

impl<T, F: Float> Default for Pdf<T, F> {
    fn default() -> Self {
        Self::new()
    }
}
