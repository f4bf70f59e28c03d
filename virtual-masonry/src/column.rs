use alloc::vec;
use alloc::vec::Vec;

/// Returns how many `item_width` columns separated by `gap` fit in `container_width`.
///
/// Always at least 1, including for zero-width containers.
pub fn column_count(container_width: u32, item_width: u32, gap: u32) -> usize {
    let span = item_width as u64 + gap as u64;
    if span == 0 {
        return 1;
    }
    let fit = (container_width as u64 + gap as u64) / span;
    fit.max(1) as usize
}

/// Running height accumulators for one placement pass.
///
/// Each accumulator holds the top of the next free slot in its column, i.e. the bottom of the
/// last placed item plus `gap`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnState {
    heights: Vec<f64>,
    counts: Vec<usize>,
    gap: f64,
}

impl ColumnState {
    /// Creates `columns` empty accumulators (clamped to at least one).
    pub fn new(columns: usize, gap: u32) -> Self {
        let columns = columns.max(1);
        Self {
            heights: vec![0.0; columns],
            counts: vec![0; columns],
            gap: gap as f64,
        }
    }

    /// Drops every placement and resizes to `columns` accumulators.
    pub fn reset(&mut self, columns: usize) {
        let columns = columns.max(1);
        self.heights.clear();
        self.heights.resize(columns, 0.0);
        self.counts.clear();
        self.counts.resize(columns, 0);
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Never true: a column state always has at least one column.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Whether any item has been placed since the last reset.
    pub fn has_placements(&self) -> bool {
        self.counts.iter().any(|&c| c > 0)
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Number of items placed in `column`.
    pub fn count(&self, column: usize) -> usize {
        self.counts.get(column).copied().unwrap_or(0)
    }

    /// Index of the shortest column; ties go to the lowest index.
    pub fn shortest(&self) -> usize {
        let mut best = 0;
        for (i, &h) in self.heights.iter().enumerate().skip(1) {
            if h < self.heights[best] {
                best = i;
            }
        }
        best
    }

    /// Places an item of `height` in the shortest column and returns `(column, top)`.
    pub fn place(&mut self, height: f64) -> (usize, f64) {
        let column = self.shortest();
        let top = self.heights[column];
        self.heights[column] = top + height + self.gap;
        self.counts[column] += 1;
        (column, top)
    }

    /// Bottom edge of the last item in `column` (0 for an empty column).
    pub fn bottom(&self, column: usize) -> f64 {
        if self.count(column) == 0 {
            return 0.0;
        }
        self.heights[column] - self.gap
    }

    /// Content height: the tallest column without its trailing gap.
    pub fn total_height(&self) -> f64 {
        (0..self.len()).fold(0.0, |acc, c| acc.max(self.bottom(c)))
    }
}
