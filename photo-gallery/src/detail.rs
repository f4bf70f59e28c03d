//! Single-photo detail view.

use crate::fetcher::PhotoSource;
use crate::photo::{Photo, PhotoId};
use crate::tags::extract_tags;

pub const NOT_FOUND_MESSAGE: &str = "Photo not found";
pub const FAILED_MESSAGE: &str = "Failed to load photo details. Please try again later.";
pub const UNTITLED: &str = "Untitled Photo";

/// Display fields derived from a [`Photo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    photo: Photo,
    tags: Vec<String>,
}

impl PhotoDetail {
    pub fn new(photo: Photo) -> Self {
        let tags = extract_tags(&photo.alt);
        Self { photo, tags }
    }

    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    pub fn id(&self) -> PhotoId {
        self.photo.id
    }

    /// The alt text, or "Untitled Photo" when there is none.
    pub fn title(&self) -> &str {
        let alt = self.photo.alt.trim();
        if alt.is_empty() { UNTITLED } else { alt }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn photographer(&self) -> &str {
        &self.photo.photographer
    }

    pub fn photographer_url(&self) -> &str {
        &self.photo.photographer_url
    }

    /// `"{width} x {height}"`.
    pub fn dimensions(&self) -> String {
        format!("{} x {}", self.photo.width, self.photo.height)
    }

    /// The large display image.
    pub fn image_url(&self) -> &str {
        &self.photo.src.large2x
    }

    pub fn original_url(&self) -> &str {
        &self.photo.src.original
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Ready(PhotoDetail),
    NotFound,
    Failed(String),
}

impl DetailState {
    /// The message to show instead of the photo, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DetailState::NotFound => Some(NOT_FOUND_MESSAGE),
            DetailState::Failed(message) => Some(message.as_str()),
            DetailState::Loading | DetailState::Ready(_) => None,
        }
    }

    pub fn detail(&self) -> Option<&PhotoDetail> {
        match self {
            DetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }
}

/// The detail page for one photo id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    id: PhotoId,
    per_page: u32,
    state: DetailState,
}

impl DetailView {
    pub fn new(id: PhotoId, per_page: u32) -> Self {
        Self {
            id,
            per_page,
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Resolves the photo for `id`.
    ///
    /// A photo handed over by the grid is used as-is when its id matches. Otherwise the first
    /// curated page is fetched and searched for the id.
    pub async fn resolve<S: PhotoSource + ?Sized>(
        id: PhotoId,
        passed_in: Option<Photo>,
        source: &S,
        per_page: u32,
    ) -> Self {
        let mut view = Self::new(id, per_page);
        view.load(passed_in, source).await;
        view
    }

    pub async fn load<S: PhotoSource + ?Sized>(&mut self, passed_in: Option<Photo>, source: &S) {
        if let Some(photo) = passed_in {
            if photo.id == self.id {
                self.state = DetailState::Ready(PhotoDetail::new(photo));
                return;
            }
            tracing::debug!(
                id = self.id,
                passed_in = photo.id,
                "Ignoring photo for a different id"
            );
        }

        self.state = DetailState::Loading;
        self.state = match source.curated(1, self.per_page).await {
            Ok(page) => match page.photos.into_iter().find(|p| p.id == self.id) {
                Some(photo) => DetailState::Ready(PhotoDetail::new(photo)),
                None => {
                    tracing::info!(id = self.id, "Photo not on the first curated page");
                    DetailState::NotFound
                }
            },
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "Failed to load photo details");
                DetailState::Failed(FAILED_MESSAGE.to_string())
            }
        };
    }
}
