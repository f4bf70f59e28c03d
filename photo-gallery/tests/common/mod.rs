//! Shared fixtures for the gallery integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use photo_gallery::{FetchError, PageRequest, Photo, PhotoPage, PhotoSource, PhotoSrc};

/// A photo with predictable URLs derived from its id.
pub fn photo(id: u64, width: u32, height: u32) -> Photo {
    Photo {
        id,
        width,
        height,
        url: format!("https://www.pexels.com/photo/{id}/"),
        photographer: format!("Photographer {id}"),
        photographer_url: format!("https://www.pexels.com/@p{id}"),
        photographer_id: Some(id * 10),
        avg_color: Some("#808080".to_string()),
        src: PhotoSrc {
            original: format!("https://images.pexels.com/{id}/original.jpg"),
            large2x: format!("https://images.pexels.com/{id}/large2x.jpg"),
            large: format!("https://images.pexels.com/{id}/large.jpg"),
            medium: format!("https://images.pexels.com/{id}/medium.jpg"),
            small: format!("https://images.pexels.com/{id}/small.jpg"),
            portrait: format!("https://images.pexels.com/{id}/portrait.jpg"),
            landscape: format!("https://images.pexels.com/{id}/landscape.jpg"),
            tiny: format!("https://images.pexels.com/{id}/tiny.jpg"),
        },
        liked: false,
        alt: format!("Photo {id}"),
    }
}

/// Square photos with ids `ids`.
pub fn squares(ids: impl IntoIterator<Item = u64>) -> Vec<Photo> {
    ids.into_iter().map(|id| photo(id, 300, 300)).collect()
}

/// A page that links to the next one unless it is empty.
pub fn page(number: u32, photos: Vec<Photo>, total_results: u64) -> PhotoPage {
    let next_page = (!photos.is_empty())
        .then(|| format!("https://api.pexels.com/v1/curated/?page={}", number + 1));
    PhotoPage {
        page: number,
        per_page: photos.len() as u32,
        photos,
        total_results,
        next_page,
        prev_page: None,
    }
}

/// The final page of a list: no `next_page` link.
pub fn last_page(number: u32, photos: Vec<Photo>, total_results: u64) -> PhotoPage {
    PhotoPage {
        next_page: None,
        ..page(number, photos, total_results)
    }
}

pub fn api_error(status: u16) -> FetchError {
    FetchError::Api {
        status,
        message: "boom".to_string(),
    }
}

/// A `PhotoSource` that replays scripted responses in order and records every request.
#[derive(Default)]
pub struct FakeSource {
    responses: Mutex<VecDeque<Result<PhotoPage, FetchError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<PhotoPage, FetchError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoSource for FakeSource {
    async fn fetch(&self, request: &PageRequest) -> Result<PhotoPage, FetchError> {
        request.validate()?;
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::InvalidRequest("no scripted response".into())))
    }
}
