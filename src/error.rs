//! Errors surfaced while building a slideshow.
//!
//! Only construction can fail. Everything that goes wrong once a slideshow is
//! running (out-of-range navigation, geometry requested before an image has a
//! size, calls after destroy) is absorbed and logged instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackdropError {
    /// The image list was empty
    #[error("No images were supplied for the slideshow")]
    NoImages,

    /// Bare sources and captioned records were mixed in one list
    #[error(
        "Image list mixes bare sources and captioned records (bare entry at {first_bare}, captioned entry at {first_captioned})"
    )]
    MixedEntries {
        first_bare: usize,
        first_captioned: usize,
    },

    /// An entry had an empty source
    #[error("Image at position {position} has an empty source")]
    EmptySource { position: usize },
}
