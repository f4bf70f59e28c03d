//! Photo records as returned by the Pexels API.

use serde::{Deserialize, Serialize};
use virtual_masonry::Item;

pub type PhotoId = u64;

/// Image URLs for the sizes the API renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSrc {
    pub original: String,
    pub large2x: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub portrait: String,
    pub landscape: String,
    pub tiny: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: String,
    #[serde(default)]
    pub photographer_id: Option<u64>,
    #[serde(default)]
    pub avg_color: Option<String>,
    #[serde(default)]
    pub src: PhotoSrc,
    #[serde(default)]
    pub liked: bool,
    /// Alt text; the API packs a short description (and often tags) in here.
    #[serde(default)]
    pub alt: String,
}

impl Photo {
    /// The layout input for this photo.
    pub fn item(&self) -> Item<PhotoId> {
        Item::new(self.id, self.width, self.height)
    }

    /// Grid thumbnail URL.
    pub fn thumbnail_url(&self) -> &str {
        &self.src.medium
    }
}

/// One page of curated or search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
}
