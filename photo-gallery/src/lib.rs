//! A headless Pexels photo gallery built on `virtual-masonry`.
//!
//! - [`PexelsClient`] fetches curated and search result pages (any [`PhotoSource`] works).
//! - [`GalleryView`] keeps the paginated photo list, feeds it into a virtualized masonry grid and
//!   reports when the viewport is close enough to the end to load another page.
//! - [`SearchInput`] debounces a search box into committed query terms.
//! - [`DetailView`] resolves a single photo for its detail page.
//!
//! Timers are driven by the caller: every time-dependent method takes `now_ms`.

pub mod config;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod gallery;
pub mod photo;
pub mod search;
pub mod tags;

pub use config::GalleryConfig;
pub use detail::{DetailState, DetailView, PhotoDetail};
pub use error::{ConfigError, FetchError};
pub use fetcher::{PageRequest, PexelsClient, PhotoSource};
pub use gallery::{GalleryStatus, GalleryTick, GalleryView, GridCell, Ticket};
pub use photo::{Photo, PhotoId, PhotoPage, PhotoSrc};
pub use search::SearchInput;
pub use tags::extract_tags;

pub use virtual_masonry_adapter::{ScrollContext, StaticContext};
