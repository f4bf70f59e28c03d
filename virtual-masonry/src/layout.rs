use alloc::vec::Vec;

use crate::{ColumnState, Item, LayoutOptions, Placement, ViewportWindow};

/// Column state and counters left behind by one placement pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Pass {
    pub columns: ColumnState,
    /// Items that received a placement.
    pub placed: usize,
    /// Malformed items (zero width or height) that were left out of the grid.
    pub skipped: usize,
}

impl Pass {
    pub fn total_height(&self) -> f64 {
        self.columns.total_height()
    }
}

/// The result of [`compute_layout`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout<K> {
    /// Placements intersecting the viewport window, in input order.
    pub placements: Vec<Placement<K>>,
    pub total_height: f64,
    pub column_heights: Vec<f64>,
    pub skipped: usize,
}

/// Places every item and feeds each placement to `f`, visible or not.
///
/// Items are assigned, in input order, to the column with the smallest running height (ties go
/// to the lowest column index). This never allocates per item; `compute_layout` is built on it.
pub fn for_each_placement<K: Clone>(
    items: &[Item<K>],
    options: LayoutOptions,
    columns: usize,
    mut f: impl FnMut(Placement<K>),
) -> Pass {
    let mut state = ColumnState::new(columns, options.gap);
    let stride = options.item_width.saturating_add(options.gap);
    let mut placed = 0usize;
    let mut skipped = 0usize;

    for (index, item) in items.iter().enumerate() {
        let Some(height) = item.scaled_height(options.item_width) else {
            mwarn!(
                index,
                width = item.width,
                height = item.height,
                "skipping malformed item"
            );
            skipped += 1;
            continue;
        };

        let (column, top) = state.place(height);
        placed += 1;
        f(Placement {
            key: item.key.clone(),
            index,
            column,
            top,
            left: (column as u32).saturating_mul(stride),
            width: options.item_width,
            height,
        });
    }

    Pass {
        columns: state,
        placed,
        skipped,
    }
}

/// Computes a full masonry layout and keeps only the placements inside `window`.
///
/// The result is a pure function of the inputs: identical inputs always produce identical
/// placements in the same order.
pub fn compute_layout<K: Clone>(
    items: &[Item<K>],
    options: LayoutOptions,
    columns: usize,
    window: ViewportWindow,
) -> Layout<K> {
    let mut placements = Vec::new();
    let pass = for_each_placement(items, options, columns, |p| {
        if window.intersects(p.top, p.height) {
            placements.push(p);
        }
    });
    mtrace!(
        items = items.len(),
        visible = placements.len(),
        skipped = pass.skipped,
        "compute_layout"
    );

    Layout {
        placements,
        total_height: pass.total_height(),
        column_heights: pass.columns.heights().to_vec(),
        skipped: pass.skipped,
    }
}
