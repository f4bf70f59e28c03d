// Example: feed scroll events through the controller with a simulated clock.
use virtual_masonry::{Item, MasonryOptions};
use virtual_masonry_adapter::{Controller, EventOutcome, SignalOptions, StaticContext};

fn main() {
    let mut c = Controller::new(
        MasonryOptions::new(300, 20),
        StaticContext::new(960, 720),
        SignalOptions::default(),
    );
    c.set_items((0..200u64).map(|k| Item::new(k, 3000, 2000 + (k % 5) as u32 * 500)));

    // One scroll event every 16ms; only the last one after the burst is delivered.
    let mut now_ms = 0;
    for step in 1..=30u64 {
        c.context_mut().scroll_to(step * 40);
        if let EventOutcome::Scheduled { deadline_ms } = c.on_scroll(now_ms) {
            println!("t={now_ms} scheduled for {deadline_ms}");
        }
        now_ms += 16;
    }

    while c.tick(now_ms).is_none() {
        now_ms += 16;
    }
    let m = c.masonry();
    println!(
        "t={now_ms} offset={} visible={} load_more={}",
        m.scroll_offset(),
        m.visible_items().len(),
        c.should_load_more(200, false, true)
    );

    c.teardown();
}
