#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The VSIDS priority queue.
//!
//! A binary heap of variables ordered by activity, highest activity at the
//! root. Alongside the heap order it keeps, for every variable, its position
//! in the heap (or `None`) and its activity, so membership is O(1) and an
//! arbitrary variable can be resifted after its activity changes.
//!
//! Naming follows the classic min-heap formulation: the root is the
//! "minimum" under a comparator where higher activity sorts first, so
//! [`ActivityHeap::decrease`] is the sift-up used after an activity increase.

use crate::sat::literal::Variable;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityHeap {
    /// Variables in heap order.
    heap: Vec<Variable>,
    /// Position of each variable in `heap`.
    indices: Vec<Option<usize>>,
    activity: Vec<f64>,
}

#[inline]
const fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
const fn right(i: usize) -> usize {
    2 * i + 2
}

#[inline]
const fn parent(i: usize) -> usize {
    (i - 1) >> 1
}

impl ActivityHeap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows the per-variable tables so that `var` can be held.
    pub fn reserve_var(&mut self, var: Variable) {
        let needed = var as usize + 1;
        if self.indices.len() < needed {
            self.indices.resize(needed, None);
            self.activity.resize(needed, 0.0);
        }
    }

    #[inline]
    fn before(&self, a: Variable, b: Variable) -> bool {
        self.activity[a as usize] > self.activity[b as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, var: Variable) -> bool {
        self.indices
            .get(var as usize)
            .is_some_and(Option::is_some)
    }

    #[must_use]
    #[inline]
    pub fn activity(&self, var: Variable) -> f64 {
        self.activity[var as usize]
    }

    /// Adds `inc` to the activity of `var` and returns the new activity.
    ///
    /// The heap position is not corrected; call [`ActivityHeap::decrease`] if
    /// `var` is in the heap.
    pub fn add_activity(&mut self, var: Variable, inc: f64) -> f64 {
        let act = &mut self.activity[var as usize];
        *act += inc;
        *act
    }

    /// Multiplies every activity by `factor`. Relative order is unchanged, so
    /// the heap stays valid.
    pub fn scale_all(&mut self, factor: f64) {
        for act in &mut self.activity {
            *act *= factor;
        }
    }

    /// # Panics
    ///
    /// If `var` is already in the heap.
    pub fn push(&mut self, var: Variable) {
        assert!(!self.contains(var), "variable {var} is already in the heap");
        self.reserve_var(var);
        self.heap.push(var);
        let pos = self.heap.len() - 1;
        self.indices[var as usize] = Some(pos);
        self.percolate_up(pos);
    }

    /// Pops the variable with the highest activity.
    pub fn remove_min(&mut self) -> Option<Variable> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            self.indices[last as usize] = None;
            return Some(last);
        }

        let top = self.heap[0];
        self.heap[0] = last;
        self.indices[last as usize] = Some(0);
        self.indices[top as usize] = None;
        if self.heap.len() > 1 {
            self.percolate_down(0);
        }
        Some(top)
    }

    /// The variable with the highest activity, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<Variable> {
        self.heap.first().copied()
    }

    /// Restores heap order after the activity of `var` went up.
    ///
    /// # Panics
    ///
    /// If `var` is not in the heap.
    pub fn decrease(&mut self, var: Variable) {
        let pos = self.position(var);
        self.percolate_up(pos);
    }

    /// Restores heap order after the activity of `var` went down.
    ///
    /// # Panics
    ///
    /// If `var` is not in the heap.
    pub fn increase(&mut self, var: Variable) {
        let pos = self.position(var);
        self.percolate_down(pos);
    }

    /// Inserts `var` if absent, otherwise resifts it in whichever direction
    /// its activity moved.
    pub fn update(&mut self, var: Variable) {
        if self.contains(var) {
            let pos = self.position(var);
            self.percolate_up(pos);
            let pos = self.position(var);
            self.percolate_down(pos);
        } else {
            self.push(var);
        }
    }

    /// Heap order, root first.
    #[must_use]
    pub fn as_slice(&self) -> &[Variable] {
        &self.heap
    }

    /// Checks that every child sorts no earlier than its parent and that the
    /// index table agrees with the heap.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let ordered = (1..self.heap.len())
            .all(|i| !self.before(self.heap[i], self.heap[parent(i)]));
        let indexed = self
            .heap
            .iter()
            .enumerate()
            .all(|(i, &v)| self.indices[v as usize] == Some(i));
        let counted = self.indices.iter().filter(|i| i.is_some()).count() == self.heap.len();
        ordered && indexed && counted
    }

    fn position(&self, var: Variable) -> usize {
        self.indices
            .get(var as usize)
            .copied()
            .flatten()
            .unwrap_or_else(|| panic!("variable {var} is not in the heap"))
    }

    fn percolate_up(&mut self, mut i: usize) {
        let var = self.heap[i];
        while i != 0 {
            let p = parent(i);
            if !self.before(var, self.heap[p]) {
                break;
            }
            self.heap[i] = self.heap[p];
            self.indices[self.heap[i] as usize] = Some(i);
            i = p;
        }
        self.heap[i] = var;
        self.indices[var as usize] = Some(i);
    }

    fn percolate_down(&mut self, mut i: usize) {
        let var = self.heap[i];
        while left(i) < self.heap.len() {
            let child = if right(i) < self.heap.len()
                && self.before(self.heap[right(i)], self.heap[left(i)])
            {
                right(i)
            } else {
                left(i)
            };
            if !self.before(self.heap[child], var) {
                break;
            }
            self.heap[i] = self.heap[child];
            self.indices[self.heap[i] as usize] = Some(i);
            i = child;
        }
        self.heap[i] = var;
        self.indices[var as usize] = Some(i);
    }
}
