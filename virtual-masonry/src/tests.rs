use crate::*;

use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

fn random_items(rng: &mut Lcg, n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            Item::new(
                i as u64,
                rng.gen_range_u32(200, 6000),
                rng.gen_range_u32(200, 6000),
            )
        })
        .collect()
}

fn squares(n: usize) -> Vec<Item> {
    (0..n).map(|i| Item::new(i as u64 + 1, 300, 300)).collect()
}

fn everything() -> ViewportWindow {
    ViewportWindow::new(0, u32::MAX, 0)
}

#[test]
fn single_landscape_item() {
    let items = [Item::new(1u64, 1000, 500)];
    let layout = compute_layout(&items, LayoutOptions::new(300, 20), 1, everything());

    assert_eq!(layout.placements.len(), 1);
    let p = layout.placements[0];
    assert_eq!(p.key, 1);
    assert_eq!(p.top, 0.0);
    assert_eq!(p.left, 0);
    assert_eq!(p.width, 300);
    assert_eq!(p.height, 150.0);
    assert_eq!(layout.total_height, 150.0);
}

#[test]
fn total_height_counts_gaps_between_stacked_items() {
    let items = [Item::new(1u64, 1000, 500), Item::new(2u64, 1000, 500)];
    let layout = compute_layout(&items, LayoutOptions::new(300, 20), 1, everything());

    assert_eq!(layout.placements[1].top, 170.0);
    assert_eq!(layout.total_height, 320.0);
    // The accumulator still carries the trailing gap.
    assert_eq!(layout.column_heights, vec![340.0]);
}

#[test]
fn squares_fill_shortest_column_lowest_index_first() {
    let layout = compute_layout(&squares(3), LayoutOptions::new(300, 20), 2, everything());
    let p = &layout.placements;

    assert_eq!((p[0].column, p[0].top, p[0].left), (0, 0.0, 0));
    assert_eq!((p[1].column, p[1].top, p[1].left), (1, 0.0, 320));
    assert_eq!((p[2].column, p[2].top, p[2].left), (0, 320.0, 0));
    assert_eq!(layout.total_height, 620.0);
}

#[test]
fn shortest_column_breaks_ties_by_index() {
    let mut state = ColumnState::new(3, 0);
    assert_eq!(state.shortest(), 0);
    assert_eq!(state.place(10.0), (0, 0.0));
    assert_eq!(state.place(10.0), (1, 0.0));
    assert_eq!(state.place(5.0), (2, 0.0));
    // Column 2 is now the only shortest column.
    assert_eq!(state.place(1.0), (2, 5.0));
    // Columns 0 and 1 tie at 10; column 2 is at 6.
    assert_eq!(state.shortest(), 2);
    assert_eq!(state.place(4.0), (2, 6.0));
    assert_eq!(state.shortest(), 0);
}

#[test]
fn column_state_len_counts_columns_not_items() {
    let mut state = ColumnState::new(0, 20);
    assert_eq!(state.len(), 1);
    assert!(!state.is_empty());
    assert!(!state.has_placements());

    state.reset(3);
    state.place(100.0);
    assert_eq!(state.len(), 3);
    assert!(state.has_placements());
    assert_eq!(state.count(0), 1);

    state.reset(2);
    assert_eq!(state.len(), 2);
    assert!(!state.is_empty());
    assert!(!state.has_placements());
    assert_eq!(state.total_height(), 0.0);
}

#[test]
fn column_count_is_never_zero() {
    assert_eq!(column_count(0, 300, 20), 1);
    assert_eq!(column_count(100, 300, 20), 1);
    assert_eq!(column_count(300, 300, 20), 1);
    assert_eq!(column_count(619, 300, 20), 1);
    assert_eq!(column_count(620, 300, 20), 2);
    assert_eq!(column_count(1000, 300, 20), 3);
    assert_eq!(column_count(1000, 0, 0), 1);
    let layout = compute_layout(&squares(2), LayoutOptions::new(300, 20), 0, everything());
    assert_eq!(layout.column_heights.len(), 1);
}

#[test]
fn column_count_matches_floor_formula() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let width = rng.gen_range_u32(0, 5000);
        let item_width = rng.gen_range_u32(1, 800);
        let gap = rng.gen_range_u32(0, 64);
        let expected = ((width + gap) / (item_width + gap)).max(1) as usize;
        assert_eq!(column_count(width, item_width, gap), expected);
    }
}

#[test]
fn uniform_aspect_ratio_keeps_columns_balanced() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let n = rng.gen_range_usize(0, 120);
        let columns = rng.gen_range_usize(1, 7);
        let w = rng.gen_range_u32(100, 4000);
        let h = rng.gen_range_u32(100, 4000);
        let items: Vec<Item> = (0..n).map(|i| Item::new(i as u64, w, h)).collect();

        for gap in [0u32, 20] {
            let options = LayoutOptions::new(300, gap);
            let layout = compute_layout(&items, options, columns, everything());
            let slot = items
                .first()
                .and_then(|it| it.scaled_height(300))
                .unwrap_or(0.0)
                + gap as f64;

            let max = layout.column_heights.iter().cloned().fold(0.0, f64::max);
            let min = layout.column_heights.iter().cloned().fold(f64::MAX, f64::min);
            assert!(max - min <= slot + 1e-6, "max={max} min={min} slot={slot}");
        }
    }
}

#[test]
fn identical_inputs_give_identical_layouts() {
    let mut rng = Lcg::new(1);
    for _ in 0..50 {
        let n = rng.gen_range_usize(0, 200);
        let items = random_items(&mut rng, n);
        let columns = rng.gen_range_usize(1, 7);
        let window = ViewportWindow::new(
            rng.gen_range_u64(0, 20_000),
            rng.gen_range_u32(0, 2_000),
            rng.gen_range_u32(0, 300),
        );
        let options = LayoutOptions::new(300, 20);
        let a = compute_layout(&items, options, columns, window);
        let b = compute_layout(&items, options, columns, window);
        assert_eq!(a, b);
    }
}

#[test]
fn widening_the_window_never_hides_items() {
    let mut rng = Lcg::new(99);
    for _ in 0..100 {
        let n = rng.gen_range_usize(1, 150);
        let items = random_items(&mut rng, n);
        let columns = rng.gen_range_usize(1, 7);
        let offset = rng.gen_range_u64(0, 30_000);
        let extent = rng.gen_range_u32(0, 1_500);
        let narrow = ViewportWindow::new(offset, extent, rng.gen_range_u32(0, 200));
        let wide = ViewportWindow::new(offset, extent, narrow.overscan + rng.gen_range_u32(0, 400));

        let options = LayoutOptions::new(240, 16);
        let a = compute_layout(&items, options, columns, narrow);
        let b = compute_layout(&items, options, columns, wide);
        for p in &a.placements {
            assert!(b.placements.iter().any(|q| q.index == p.index), "lost {}", p.index);
        }
        assert!(b.placements.len() >= a.placements.len());
    }
}

#[test]
fn visible_items_match_brute_force_intersection() {
    let mut rng = Lcg::new(5);
    for _ in 0..100 {
        let n = rng.gen_range_usize(0, 150);
        let items = random_items(&mut rng, n);
        let columns = rng.gen_range_usize(1, 5);
        let window = ViewportWindow::new(
            rng.gen_range_u64(0, 20_000),
            rng.gen_range_u32(0, 1_500),
            rng.gen_range_u32(0, 200),
        );
        let options = LayoutOptions::new(300, 20);

        let mut all = Vec::new();
        for_each_placement(&items, options, columns, |p| all.push(p));
        assert_eq!(all.len(), items.len());

        let range = window.range();
        let expected: Vec<usize> = all
            .iter()
            .filter(|p| p.top + p.height >= range.start && p.top <= range.end)
            .map(|p| p.index)
            .collect();
        let got: Vec<usize> = compute_layout(&items, options, columns, window)
            .placements
            .iter()
            .map(|p| p.index)
            .collect();
        assert_eq!(got, expected);
    }
}

#[test]
fn window_edges_are_inclusive() {
    let window = ViewportWindow::new(500, 200, 100);
    let range = window.range();
    assert_eq!(range.start, 400.0);
    assert_eq!(range.end, 800.0);

    assert!(window.intersects(300.0, 100.0));
    assert!(!window.intersects(300.0, 99.0));
    assert!(window.intersects(800.0, 50.0));
    assert!(!window.intersects(800.5, 50.0));
}

#[test]
fn malformed_items_are_skipped() {
    let items = [
        Item::new(1u64, 300, 300),
        Item::new(2u64, 0, 300),
        Item::new(3u64, 300, 0),
        Item::new(4u64, 300, 300),
    ];
    let layout = compute_layout(&items, LayoutOptions::new(300, 20), 2, everything());

    assert_eq!(layout.skipped, 2);
    let keys: Vec<u64> = layout.placements.iter().map(|p| p.key).collect();
    assert_eq!(keys, vec![1, 4]);
    assert_eq!(layout.placements[1].column, 1);
    assert_eq!(layout.placements[1].index, 3);
    assert_eq!(layout.total_height, 300.0);
}

#[test]
fn empty_input_has_zero_height() {
    let layout = compute_layout::<u64>(&[], LayoutOptions::default(), 3, everything());
    assert!(layout.placements.is_empty());
    assert_eq!(layout.total_height, 0.0);
    assert_eq!(layout.column_heights, vec![0.0, 0.0, 0.0]);
}

fn grid(width: u32, height: u32) -> Masonry {
    Masonry::new(
        MasonryOptions::new(300, 20)
            .with_overscan(0)
            .with_initial_frame(Some(FrameState::new(Geometry::new(width, height), 0))),
    )
}

#[test]
fn masonry_tracks_visible_items_while_scrolling() {
    let mut m = grid(620, 400);
    assert_eq!(m.columns(), 2);
    m.set_items(squares(10));

    // Rows of squares start at 0, 320, 640, 960, 1280.
    let keys = |m: &Masonry| m.visible_items().iter().map(|p| p.key).collect::<Vec<_>>();
    assert_eq!(keys(&m), vec![1, 2, 3, 4]);
    assert_eq!(m.total_height(), 1580.0);

    m.set_scroll_offset(700);
    assert_eq!(keys(&m), vec![5, 6, 7, 8]);

    m.set_scroll_offset_clamped(10_000);
    assert_eq!(m.scroll_offset(), 1180);
    assert_eq!(keys(&m), vec![7, 8, 9, 10]);
}

#[test]
fn masonry_matches_pure_layout() {
    let mut rng = Lcg::new(11);
    let mut m = grid(1000, 800);
    for _ in 0..50 {
        let n = rng.gen_range_usize(0, 100);
        let items = random_items(&mut rng, n);
        let width = rng.gen_range_u32(0, 2000);
        let frame = FrameState::new(
            Geometry::new(width, rng.gen_range_u32(0, 1200)),
            rng.gen_range_u64(0, 10_000),
        );
        m.set_items(items.clone());
        m.apply_frame(frame);

        let expected = compute_layout(
            &items,
            LayoutOptions::new(300, 20),
            column_count(width, 300, 20),
            m.window(),
        );
        assert_eq!(m.visible_items(), expected.placements.as_slice());
        assert_eq!(m.total_height(), expected.total_height);
    }
}

#[test]
fn unchanged_setters_do_not_relayout() {
    let mut m = grid(1000, 800);
    m.set_items(squares(4));
    let before = m.layout_count();

    m.set_container_width(1000);
    m.set_viewport_extent(800);
    m.set_scroll_offset(0);
    m.set_gap(20);
    m.set_item_width(300);
    m.set_overscan(0);
    m.update_options(|_| {});
    assert_eq!(m.layout_count(), before);

    m.set_gap(10);
    assert_eq!(m.layout_count(), before + 1);
}

#[test]
fn batch_update_relayouts_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut m = grid(1000, 800);
    m.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &Masonry| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));

    m.apply_frame(FrameState::new(Geometry::new(1300, 900), 250));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(m.columns(), 4);
    assert_eq!(m.frame_state().scroll_offset, 250);

    m.batch_update(|m| {
        m.set_items(squares(20));
        m.set_gap(0);
        m.set_item_width(200);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(m.columns(), 6);
}

#[test]
fn width_change_reflows_every_item() {
    let mut m = grid(1000, 10_000);
    m.set_items(squares(6));
    assert_eq!(m.columns(), 3);
    assert!(m.visible_items().iter().all(|p| p.top == 0.0 || p.top == 320.0));

    m.set_container_width(0);
    assert_eq!(m.columns(), 1);
    let tops: Vec<f64> = m.visible_items().iter().map(|p| p.top).collect();
    assert_eq!(tops, vec![0.0, 320.0, 640.0, 960.0, 1280.0, 1600.0]);
    assert!(m.visible_items().iter().all(|p| p.left == 0));
}

#[test]
fn disabled_grid_renders_nothing() {
    let mut m = grid(1000, 800);
    m.set_items(squares(5));
    assert!(!m.visible_items().is_empty());

    m.set_enabled(false);
    assert!(m.visible_items().is_empty());
    assert_eq!(m.total_height(), 0.0);

    m.set_enabled(true);
    assert_eq!(m.visible_items().len(), 5);
}

#[test]
fn extend_items_keeps_earlier_placements() {
    let mut m = grid(620, 10_000);
    m.set_items(squares(3));
    let first: Vec<Placement> = m.visible_items().to_vec();

    m.extend_items((4..=6).map(|k| Item::new(k, 300, 600)));
    assert_eq!(&m.visible_items()[..3], first.as_slice());
    assert_eq!(m.item_count(), 6);

    let before = m.layout_count();
    m.extend_items(core::iter::empty());
    assert_eq!(m.layout_count(), before);
}

#[test]
fn hit_test_finds_item_under_point() {
    let mut m = grid(620, 1000);
    m.set_items(squares(4));

    assert_eq!(m.hit_test(10.0, 10.0).map(|p| p.key), Some(1));
    assert_eq!(m.hit_test(330.0, 330.0).map(|p| p.key), Some(4));
    assert_eq!(m.hit_test(310.0, 10.0).map(|p| p.key), None);
    assert_eq!(m.visible_item_for_key(&3).map(|p| p.top), Some(320.0));
}

#[test]
fn malformed_items_are_reported_by_the_grid() {
    let mut m = grid(1000, 800);
    m.set_items([Item::new(1u64, 0, 0), Item::new(2, 600, 400)]);
    assert_eq!(m.skipped(), 1);
    assert_eq!(m.visible_items().len(), 1);
    assert_eq!(m.visible_items()[0].height, 200.0);
}
