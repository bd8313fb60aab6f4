use std::time::Duration;

use bon::Builder;

use crate::FaceTime;

/// Host-side configuration for the watch-face window.
///
/// The face itself is deliberately not configurable: colors, ring radii and
/// the sweep rule are fixed. Everything here only shapes how the host
/// presents the fixed face.
#[derive(Debug, Clone, Builder)]
pub struct FaceConfig {
    #[builder(default = "sweepface".to_string())]
    pub title: String,

    /// Integer upscale from framebuffer pixels to window pixels.
    #[builder(default = 3)]
    pub scale: u32,

    /// Redraw period. One frame per second matches a ticking watch; the
    /// demos shorten it.
    #[builder(default = Duration::from_secs(1))]
    pub tick_period: Duration,

    /// When set, the clock stops and the face always shows this time.
    pub frozen_time: Option<FaceTime>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
