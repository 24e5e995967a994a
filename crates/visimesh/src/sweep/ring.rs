//! Angle-sorted ring of samples with binary-search insertion and batched edits.
//!
//! Invariants:
//! - `points` is sorted ascending by angle (stable: equal angles keep insertion order).
//! - New equal-angle samples go after every existing one.

use std::ops::{Index, IndexMut};

use super::types::EdgePoint;

/// A pending insertion computed against the ring as it was when the edit was made.
#[derive(Clone, Copy, Debug)]
pub struct RingEdit {
    /// Insert before the sample currently at this index (`len` appends).
    pub index: usize,
    pub point: EdgePoint,
}

/// Angle-sorted sample sequence; closes back on itself after the last sample.
#[derive(Clone, Debug, Default)]
pub struct AngularRing {
    points: Vec<EdgePoint>,
    // Merge target for `apply`; swapped with `points` so both allocations are reused.
    back: Vec<EdgePoint>,
}

impl AngularRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            back: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.back.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[EdgePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgePoint> {
        self.points.iter()
    }

    /// Cyclic successor index.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 >= self.points.len() {
            0
        } else {
            i + 1
        }
    }

    /// Cyclic predecessor index.
    #[inline]
    pub fn prev_index(&self, i: usize) -> usize {
        if i == 0 {
            self.points.len().saturating_sub(1)
        } else {
            i - 1
        }
    }

    /// Replace the contents with `samples`, sorted by angle (stable).
    pub fn replace_sorted<I: IntoIterator<Item = EdgePoint>>(&mut self, samples: I) {
        self.points.clear();
        self.points.extend(samples);
        self.points.sort_by(|a, b| a.angle_cmp(b));
    }

    /// Where a sample with `angle` would be inserted (after any equal angles).
    pub fn insertion_index(&self, angle: f64) -> usize {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0;
        };
        if angle.total_cmp(&last.angle).is_ge() {
            return self.points.len();
        }
        if angle.total_cmp(&first.angle).is_lt() {
            return 0;
        }
        let mut lo = 0usize;
        let mut hi = self.points.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.points[mid].angle.total_cmp(&angle).is_le() {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Insert immediately, keeping the order. Returns the new sample's index.
    ///
    /// Shifts every later index; use `edit` + `apply` while walking the ring.
    pub fn insert(&mut self, point: EdgePoint) -> usize {
        let idx = self.insertion_index(point.angle);
        self.points.insert(idx, point);
        idx
    }

    /// Record an insertion without touching the ring.
    #[inline]
    pub fn edit(&self, point: EdgePoint) -> RingEdit {
        RingEdit {
            index: self.insertion_index(point.angle),
            point,
        }
    }

    /// Merge all `edits` (drained) in one linear pass. Edits sharing an index
    /// are placed by angle, then by their order in `edits`. Returns the count.
    pub fn apply(&mut self, edits: &mut Vec<RingEdit>) -> usize {
        let count = edits.len();
        if count == 0 {
            return 0;
        }
        edits.sort_by(|a, b| {
            a.index
                .cmp(&b.index)
                .then_with(|| a.point.angle_cmp(&b.point))
        });
        self.back.clear();
        self.back.reserve(self.points.len() + count);
        let mut pending = edits.drain(..).peekable();
        for (i, p) in self.points.iter().enumerate() {
            while let Some(e) = pending.next_if(|e| e.index <= i) {
                self.back.push(e.point);
            }
            self.back.push(*p);
        }
        self.back.extend(pending.map(|e| e.point));
        std::mem::swap(&mut self.points, &mut self.back);
        self.back.clear();
        count
    }
}

impl Index<usize> for AngularRing {
    type Output = EdgePoint;

    #[inline]
    fn index(&self, i: usize) -> &EdgePoint {
        &self.points[i]
    }
}

impl IndexMut<usize> for AngularRing {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut EdgePoint {
        &mut self.points[i]
    }
}

impl<'a> IntoIterator for &'a AngularRing {
    type Item = &'a EdgePoint;
    type IntoIter = std::slice::Iter<'a, EdgePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
