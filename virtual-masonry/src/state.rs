/// Container geometry as reported by the UI layer, in pixels.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Width of the grid container (drives the column count).
    pub width: u32,
    /// Height of the scroll viewport (the visible extent).
    pub height: u32,
}

impl Geometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A combined snapshot of geometry + scroll state.
///
/// This is useful for restoring a grid across frames or sessions without coupling the engine to
/// any specific UI framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub geometry: Geometry,
    pub scroll_offset: u64,
}

impl FrameState {
    pub fn new(geometry: Geometry, scroll_offset: u64) -> Self {
        Self {
            geometry,
            scroll_offset,
        }
    }
}
