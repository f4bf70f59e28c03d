// Example: lay out a mixed-aspect grid and scroll through it.
use virtual_masonry::{Item, Masonry, MasonryOptions};

fn main() {
    let mut m = Masonry::new(MasonryOptions::new(300, 20).with_overscan(100));
    m.set_viewport(900, 0);
    m.set_container_width(1280);

    let sizes = [(4000, 6000), (6000, 4000), (3000, 3000), (2000, 5000)];
    m.set_items((0..1_000u64).map(|k| {
        let (w, h) = sizes[(k % sizes.len() as u64) as usize];
        Item::new(k, w, h)
    }));

    println!(
        "columns={} total_height={:.1}",
        m.columns(),
        m.total_height()
    );
    println!("visible={}", m.visible_items().len());
    println!("first_visible={:?}", m.visible_items().first());

    m.set_scroll_offset_clamped(u64::MAX);
    let keys: Vec<_> = m.visible_items().iter().map(|p| p.key).collect();
    println!("at bottom: offset={} keys={keys:?}", m.scroll_offset());
}
