//! The gallery grid: a paginated photo list wired into a virtualized masonry layout.
//!
//! Page loads are split into `begin_*` (produces a [`Ticket`]) and [`GalleryView::finish`]
//! (applies the response), so an event loop can run the fetch elsewhere and still get
//! at-most-one in-flight load per list and stale-response rejection. [`GalleryView::load_first`]
//! and [`GalleryView::load_more`] run both halves inline.

use std::collections::HashSet;

use virtual_masonry::{FrameState, Placement};
use virtual_masonry_adapter::{Controller, EventOutcome, ScrollContext};

use crate::config::GalleryConfig;
use crate::error::FetchError;
use crate::fetcher::{PageRequest, PhotoSource};
use crate::photo::{Photo, PhotoId, PhotoPage};

pub const FIRST_PAGE_ERROR: &str = "Failed to load photos.";
pub const LOAD_MORE_ERROR: &str = "Failed to load more photos.";

/// Handle for one in-flight page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    request: PageRequest,
}

impl Ticket {
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn is_first_page(&self) -> bool {
        self.request.page == 1
    }
}

/// What the grid should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStatus<'a> {
    /// First page in flight, nothing to show yet.
    Loading,
    /// The list could not be loaded at all.
    Error(&'a str),
    Ready,
}

/// One rendered grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub photo: &'a Photo,
    pub placement: Placement<PhotoId>,
}

impl GridCell<'_> {
    pub fn thumbnail_url(&self) -> &str {
        self.photo.thumbnail_url()
    }
}

/// Result of a timer tick that delivered a scroll/resize signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryTick {
    pub frame: FrameState,
    /// The viewport reached the infinite-scroll threshold and another page can be requested.
    pub load_more: bool,
}

#[derive(Debug)]
pub struct GalleryView<C> {
    controller: Controller<PhotoId, C>,
    photos: Vec<Photo>,
    ids: HashSet<PhotoId>,
    query: Option<String>,
    per_page: u32,
    load_more_threshold_px: u32,

    page: u32,
    total_results: u64,
    seen: u64,
    /// The API signalled the end of the list (an empty page or no `next_page`).
    exhausted: bool,
    loading: bool,
    error: Option<String>,

    generation: u64,
    in_flight: Option<Ticket>,
}

impl<C: ScrollContext> GalleryView<C> {
    pub fn new(config: &GalleryConfig, context: C) -> Self {
        Self {
            controller: Controller::new(config.masonry_options(), context, config.scroll),
            photos: Vec::new(),
            ids: HashSet::new(),
            query: None,
            per_page: config.per_page,
            load_more_threshold_px: config.load_more_threshold_px,
            page: 0,
            total_results: 0,
            seen: 0,
            exhausted: false,
            loading: false,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether another page can be requested.
    ///
    /// False once the API has returned an empty page or a page without `next_page`, even if it
    /// still reports more `total_results` than have been received.
    pub fn has_more(&self) -> bool {
        self.page > 0 && !self.exhausted && self.seen < self.total_results
    }

    pub fn status(&self) -> GalleryStatus<'_> {
        if !self.photos.is_empty() {
            return GalleryStatus::Ready;
        }
        if self.loading {
            return GalleryStatus::Loading;
        }
        match &self.error {
            Some(message) => GalleryStatus::Error(message),
            None => GalleryStatus::Ready,
        }
    }

    pub fn controller(&self) -> &Controller<PhotoId, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<PhotoId, C> {
        &mut self.controller
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.controller.context_mut()
    }

    /// Starts a new list (curated when `query` is blank), discarding the current one.
    ///
    /// Any response still in flight for the previous list will be ignored.
    pub fn begin_first_page(&mut self, query: Option<&str>) -> Ticket {
        let request = match query {
            Some(q) => PageRequest::search(q, 1, self.per_page),
            None => PageRequest::curated(1, self.per_page),
        };
        self.generation = self.generation.wrapping_add(1);
        self.query = request.query.clone();
        self.photos.clear();
        self.ids.clear();
        self.controller.masonry_mut().clear_items();
        self.page = 0;
        self.total_results = 0;
        self.seen = 0;
        self.exhausted = false;
        self.error = None;
        self.loading = true;

        tracing::debug!(generation = self.generation, query = ?self.query, "Loading first page");
        let ticket = Ticket {
            generation: self.generation,
            request,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Requests the next page, unless one is already in flight or the list is exhausted.
    pub fn begin_load_more(&mut self) -> Option<Ticket> {
        if self.loading || !self.has_more() {
            return None;
        }
        let request = PageRequest {
            page: self.page + 1,
            per_page: self.per_page,
            query: self.query.clone(),
        };
        self.loading = true;
        tracing::debug!(page = request.page, "Loading more photos");
        let ticket = Ticket {
            generation: self.generation,
            request,
        };
        self.in_flight = Some(ticket.clone());
        Some(ticket)
    }

    /// Applies the response for `ticket`.
    ///
    /// Returns `false` when the ticket is stale (the list was restarted meanwhile) and the
    /// response was dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<PhotoPage, FetchError>) -> bool {
        if self.in_flight.as_ref() != Some(&ticket) {
            tracing::debug!(
                page = ticket.request.page,
                generation = ticket.generation,
                "Dropping stale photo page"
            );
            return false;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(page) => self.apply_page(&ticket, page),
            Err(e) => {
                tracing::warn!(page = ticket.request.page, error = %e, "Failed to load photos");
                self.error = Some(if ticket.is_first_page() {
                    FIRST_PAGE_ERROR.to_string()
                } else {
                    LOAD_MORE_ERROR.to_string()
                });
            }
        }
        true
    }

    fn apply_page(&mut self, ticket: &Ticket, page: PhotoPage) {
        self.error = None;
        self.page = ticket.request.page;
        self.total_results = page.total_results;
        self.seen = self.seen.saturating_add(page.photos.len() as u64);
        self.exhausted = page.photos.is_empty() || page.next_page.is_none();

        let before = self.photos.len();
        for photo in page.photos {
            if self.ids.insert(photo.id) {
                self.photos.push(photo);
            } else {
                tracing::debug!(id = photo.id, "Skipping duplicate photo");
            }
        }
        let added = &self.photos[before..];
        self.controller.extend_items(added.iter().map(Photo::item));
        tracing::info!(
            page = self.page,
            added = added.len(),
            total = self.photos.len(),
            total_results = self.total_results,
            "Loaded photos"
        );
    }

    /// Loads the first page of a new list from `source`.
    pub async fn load_first<S: PhotoSource + ?Sized>(
        &mut self,
        source: &S,
        query: Option<&str>,
    ) -> bool {
        let ticket = self.begin_first_page(query);
        let result = source.fetch(ticket.request()).await;
        self.finish(ticket, result)
    }

    /// Loads the next page from `source`. Returns `false` if no request was made.
    pub async fn load_more<S: PhotoSource + ?Sized>(&mut self, source: &S) -> bool {
        let Some(ticket) = self.begin_load_more() else {
            return false;
        };
        let result = source.fetch(ticket.request()).await;
        self.finish(ticket, result)
    }

    /// Loads further pages until `max_pages` pages are loaded, the list ends or a load fails.
    ///
    /// Unlike the scroll-driven trigger, this ignores the viewport position. Returns the number
    /// of pages requested.
    pub async fn load_pages<S: PhotoSource + ?Sized>(
        &mut self,
        source: &S,
        max_pages: u32,
    ) -> u32 {
        let mut requested = 0;
        while self.page < max_pages && self.load_more(source).await {
            requested += 1;
            if self.error.is_some() {
                break;
            }
        }
        requested
    }

    pub fn on_scroll(&mut self, now_ms: u64) -> EventOutcome {
        self.controller.on_scroll(now_ms)
    }

    pub fn on_resize(&mut self, now_ms: u64) -> EventOutcome {
        self.controller.on_resize(now_ms)
    }

    /// Applies a due scroll/resize delivery and evaluates the infinite-scroll trigger.
    pub fn tick(&mut self, now_ms: u64) -> Option<GalleryTick> {
        let frame = self.controller.tick(now_ms)?;
        Some(GalleryTick {
            frame,
            load_more: self.wants_more(),
        })
    }

    /// Same as `tick`, but applies a pending delivery without waiting for its deadline.
    pub fn flush(&mut self) -> Option<GalleryTick> {
        let frame = self.controller.flush()?;
        Some(GalleryTick {
            frame,
            load_more: self.wants_more(),
        })
    }

    /// Whether the viewport is close enough to the end of the grid to load another page.
    pub fn wants_more(&self) -> bool {
        self.controller
            .should_load_more(self.load_more_threshold_px, self.loading, self.has_more())
    }

    /// The cells to render for the current frame, in feed order.
    pub fn visible(&self) -> Vec<GridCell<'_>> {
        self.controller
            .masonry()
            .visible_items()
            .iter()
            .filter_map(|placement| {
                let photo = self.photos.get(placement.index)?;
                debug_assert_eq!(photo.id, placement.key);
                Some(GridCell {
                    photo,
                    placement: *placement,
                })
            })
            .collect()
    }

    /// Height of the scrollable content, for sizing the scroll container.
    pub fn total_height(&self) -> f64 {
        self.controller.masonry().total_height()
    }

    /// The photo under a click at (`x`, `y`) in content coordinates.
    pub fn photo_at(&self, x: f64, y: f64) -> Option<&Photo> {
        let placement = self.controller.masonry().hit_test(x, y)?;
        self.photos.get(placement.index)
    }

    /// Stops listening for scroll/resize events.
    pub fn teardown(&mut self) {
        self.controller.teardown();
    }
}
