use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::time::{Duration, Instant, sleep};
use tracing_subscriber::EnvFilter;

use photo_gallery::{
    DetailState, DetailView, GalleryConfig, GalleryStatus, GalleryView, PexelsClient, PhotoId,
    SearchInput, StaticContext,
};

/// Browse Pexels photos from the terminal.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Photos requested per page (overrides PEXELS_PER_PAGE).
    #[clap(long, global = true)]
    per_page: Option<u32>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a page of photos and print the cells visible in the viewport.
    Grid {
        /// Search term; the curated feed when omitted.
        #[clap(short, long)]
        query: Option<String>,

        /// Container width in pixels.
        #[clap(long, default_value_t = 1280)]
        width: u32,

        /// Viewport height in pixels.
        #[clap(long, default_value_t = 800)]
        height: u32,

        /// Scroll offset to render.
        #[clap(long, default_value_t = 0)]
        scroll: u64,

        /// Number of pages to load before rendering (fewer if the list ends first).
        #[clap(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print the details of one photo.
    Detail {
        id: PhotoId,
    },
}

/// Milliseconds since `start`, the clock every debounce is driven from.
fn now_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

async fn settle(start: Instant, deadline_ms: Option<u64>) -> u64 {
    if let Some(deadline) = deadline_ms {
        let now = now_ms(start);
        if deadline > now {
            sleep(Duration::from_millis(deadline - now)).await;
        }
    }
    now_ms(start)
}

async fn run_grid(
    config: GalleryConfig,
    query: Option<String>,
    width: u32,
    height: u32,
    scroll: u64,
    pages: u32,
) -> Result<()> {
    let client = PexelsClient::new(&config).context("Failed to build HTTP client")?;
    let start = Instant::now();

    let mut search = SearchInput::new(config.search_debounce_ms);
    if let Some(query) = query {
        search.on_input(query, now_ms(start));
        let now = settle(start, search.deadline_ms()).await;
        search.tick(now);
    }

    let mut gallery = GalleryView::new(&config, StaticContext::new(width, height));
    gallery.load_first(&client, search.query()).await;
    if let GalleryStatus::Error(message) = gallery.status() {
        anyhow::bail!("{message}");
    }

    gallery.context_mut().scroll_to(scroll);
    gallery.on_scroll(now_ms(start));
    let now = settle(start, gallery.controller().signal().deadline_ms()).await;
    if let Some(tick) = gallery.tick(now) {
        tracing::debug!(
            scroll_offset = tick.frame.scroll_offset,
            load_more = tick.load_more,
            "Scrolled"
        );
    }

    gallery.load_pages(&client, pages).await;
    if let Some(message) = gallery.error() {
        eprintln!("{message}");
    }

    let masonry = gallery.controller().masonry();
    println!(
        "{} photos in {} columns, total height {:.0}px, scroll {}",
        gallery.photos().len(),
        masonry.columns(),
        gallery.total_height(),
        masonry.scroll_offset()
    );
    for cell in gallery.visible() {
        let p = cell.placement;
        println!(
            "#{:<10} col {} at ({:>4}, {:>7.1}) {:>3}x{:<6.1} {}",
            cell.photo.id,
            p.column,
            p.left,
            p.top,
            p.width,
            p.height,
            cell.thumbnail_url()
        );
    }
    if gallery.has_more() {
        println!("more photos available ({} total)", gallery.total_results());
    }
    Ok(())
}

async fn run_detail(config: GalleryConfig, id: PhotoId) -> Result<()> {
    let client = PexelsClient::new(&config).context("Failed to build HTTP client")?;
    let view = DetailView::resolve(id, None, &client, config.per_page).await;
    match view.state() {
        DetailState::Ready(detail) => {
            println!("{}", detail.title());
            println!("by {} ({})", detail.photographer(), detail.photographer_url());
            println!("{}", detail.dimensions());
            if !detail.tags().is_empty() {
                println!("tags: {}", detail.tags().join(", "));
            }
            println!("image: {}", detail.image_url());
            println!("original: {}", detail.original_url());
            Ok(())
        }
        state => anyhow::bail!("{}", state.message().unwrap_or("Photo not found")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = GalleryConfig::from_env()?;
    if let Some(per_page) = args.per_page {
        config = config.with_per_page(per_page);
    }

    match args.command {
        Command::Grid {
            query,
            width,
            height,
            scroll,
            pages,
        } => run_grid(config, query, width, height, scroll, pages).await,
        Command::Detail { id } => run_detail(config, id).await,
    }
}
