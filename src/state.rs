use crate::backend::TimerId;
use crate::entry::ImageSet;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,          // Built, nothing requested yet
    Showing,       // Current image fully faded in
    Transitioning, // New image loading or fading in
    Destroyed,     // Torn down, every operation is a no-op
}

/// Mutable slideshow state owned by one controller.
#[derive(Debug)]
pub struct SlideState {
    pub index: usize,
    pub images: ImageSet,
    pub paused: bool,
    pub timer: Option<TimerId>,
    /// Width over height of the current image, once it has loaded
    pub active_ratio: Option<f64>,
}

impl SlideState {
    pub fn new(images: ImageSet) -> Self {
        Self { index: 0, images, paused: false, timer: None, active_ratio: None }
    }

    /// Map a requested index to a position in the image list.
    ///
    /// Anything whose magnitude exceeds the last position is out of range.
    /// Negative requests that pass that check still cannot address an image
    /// and are rejected as well.
    pub fn resolve(&self, requested: isize) -> Option<usize> {
        let last = self.images.len() - 1;
        if requested.unsigned_abs() > last {
            return None;
        }
        usize::try_from(requested).ok()
    }

    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.images.len()
    }

    pub fn prev_index(&self) -> usize {
        if self.index == 0 { self.images.len() - 1 } else { self.index - 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(len: usize) -> SlideState {
        let entries = (0..len).map(|i| format!("{i}.jpg").into()).collect();
        SlideState::new(ImageSet::new(entries).unwrap())
    }

    #[test]
    fn resolve_applies_magnitude_bound() {
        let s = state(3);
        assert_eq!(s.resolve(0), Some(0));
        assert_eq!(s.resolve(2), Some(2));
        assert_eq!(s.resolve(3), None);
        assert_eq!(s.resolve(-3), None);
        assert_eq!(s.resolve(isize::MIN), None);
    }

    #[test]
    fn negative_index_within_magnitude_is_rejected() {
        let s = state(3);
        assert_eq!(s.resolve(-1), None);
        assert_eq!(s.resolve(-2), None);
    }

    #[test]
    fn neighbours_wrap_around() {
        let mut s = state(3);
        assert_eq!((s.prev_index(), s.next_index()), (2, 1));
        s.index = 2;
        assert_eq!((s.prev_index(), s.next_index()), (1, 0));

        let single = state(1);
        assert_eq!((single.prev_index(), single.next_index()), (0, 0));
    }
}
