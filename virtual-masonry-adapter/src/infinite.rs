/// Distance from the bottom of the content at which the next page is requested.
pub const DEFAULT_LOAD_MORE_THRESHOLD_PX: u32 = 200;

/// Inputs to the infinite-scroll trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadMoreProbe {
    pub scroll_offset: u64,
    pub viewport_extent: u32,
    pub content_height: f64,
    pub threshold_px: u32,
    /// A page request for this list is already in flight.
    pub loading: bool,
    pub has_more: bool,
}

/// Whether the viewport bottom is within `threshold_px` of the end of the content and another
/// page may be requested.
pub fn should_load_more(probe: LoadMoreProbe) -> bool {
    if probe.loading || !probe.has_more {
        return false;
    }
    let bottom = probe.scroll_offset as f64 + probe.viewport_extent as f64;
    bottom >= probe.content_height - probe.threshold_px as f64
}
