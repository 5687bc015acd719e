//! Seams between the slideshow logic and whatever actually draws it.
//!
//! Every slow operation (loading an image, fading it in, fading a caption
//! out, waiting for the next tick) is started through one of these traits and
//! returns an id right away. The host reports completion later by handing a
//! [`Notice`] back to the instance. Nothing here calls back into the
//! controller, so all ordering goes through one queue.

use std::time::Duration;
use crate::entry::CaptionKey;
use crate::scaling::{Geometry, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FadeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptionHandle(pub u64);

/// How the wrap surface is positioned inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    Fixed,
    Absolute,
}

/// Completion reports and host events, delivered in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// An image finished loading, with its natural size
    ImageLoaded { image: ImageId, width: f64, height: f64 },
    /// An image could not be loaded
    ImageFailed { image: ImageId },
    /// An image finished its fade-in
    ImageFadedIn { image: ImageId },
    /// A caption finished fading out
    CaptionFadedOut { fade: FadeId },
    /// An interval timer fired
    Tick { timer: TimerId },
    Resize,
    OrientationChange,
}

/// Starts asynchronous image loads.
pub trait ImageLoader {
    /// Create an image element for `src` inside the wrap and start loading it.
    /// Reports [`Notice::ImageLoaded`] or [`Notice::ImageFailed`].
    fn load(&mut self, src: &str) -> ImageId;
}

/// The wrap surface images are drawn into.
pub trait Stage {
    /// Create the wrap, or reuse one left behind by an earlier instance.
    fn prepare_wrap(&mut self, positioning: Positioning, is_body: bool);

    /// Current size of the container root.
    fn viewport(&self) -> Viewport;

    /// Size the wrap to `wrap` and place `image` according to `geometry`.
    fn apply_geometry(&mut self, image: ImageId, wrap: Viewport, geometry: &Geometry);

    /// Reports [`Notice::ImageFadedIn`] when done.
    fn fade_in_image(&mut self, image: ImageId, duration: Duration);

    fn remove_image(&mut self, image: ImageId);

    fn remove_wrap(&mut self);

    /// Stop reporting [`Notice::Resize`] and [`Notice::OrientationChange`].
    fn detach_resize_listener(&mut self);
}

/// Repeating timers.
pub trait TimerService {
    /// Reports [`Notice::Tick`] every `period` until cleared.
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Clearing an unknown or already cleared timer does nothing.
    fn clear_interval(&mut self, timer: TimerId);
}

/// Caption nodes living next to the wrap.
pub trait CaptionSurface {
    /// Insert a caption node under `target`, undisplayed, carrying `key` in
    /// its `attribute`. `hide_class` is added to its classes when set.
    fn append_caption(
        &mut self,
        target: &str,
        attribute: &str,
        key: &CaptionKey,
        markup: &str,
        hide_class: Option<&str>,
    );

    fn find_by_key(&self, key: &CaptionKey) -> Option<CaptionHandle>;

    /// Reports [`Notice::CaptionFadedOut`] when done.
    fn fade_out(&mut self, caption: CaptionHandle, duration: Duration) -> FadeId;

    fn fade_in(&mut self, caption: CaptionHandle, duration: Duration);

    fn add_class(&mut self, caption: CaptionHandle, class: &str);

    fn remove_class(&mut self, caption: CaptionHandle, class: &str);
}

/// Everything a controller needs from its host.
pub trait Backend: ImageLoader + Stage + TimerService + CaptionSurface {}

impl<T: ImageLoader + Stage + TimerService + CaptionSurface> Backend for T {}
