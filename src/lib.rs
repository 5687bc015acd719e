//! Cover-fit background slideshows.
//!
//! `backdrop` keeps a background image filling its container at any size,
//! rotates through a list of images on a timer, and keeps an optional caption
//! in step with whichever image is showing. Drawing, loading and timing are
//! left to a host through the traits in [`backend`]. The host reports back
//! with [`Notice`] values, so the whole slideshow runs on one thread off a
//! single queue.

pub mod backend;
pub mod caption;
pub mod constants;
pub mod controller;
pub mod entry;
pub mod error;
pub mod instance;
pub mod options;
pub mod scaling;
pub mod state;
pub mod timer;

#[cfg(test)]
mod testing;

pub use backend::{Backend, Notice, Positioning};
pub use controller::{Controller, EventKind, SlideEvent};
pub use entry::{CaptionKey, ImageEntry, ImageSet};
pub use error::BackdropError;
pub use instance::{Capabilities, ContainerId, Instance, Registry};
pub use options::{Options, OptionsPatch};
pub use scaling::{compute_fill, Geometry, Viewport};
