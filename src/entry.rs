use std::fmt;
use crate::error::BackdropError;

/// One image of a slideshow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEntry {
    /// Bare image source
    Uri(String),
    /// Image source with caption markup
    Captioned { src: String, caption: Option<String> },
}

impl ImageEntry {
    pub fn captioned(src: impl Into<String>, caption: impl Into<String>) -> Self {
        ImageEntry::Captioned { src: src.into(), caption: Some(caption.into()) }
    }

    pub fn src(&self) -> &str {
        match self {
            ImageEntry::Uri(src) => src,
            ImageEntry::Captioned { src, .. } => src,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            ImageEntry::Uri(_) => None,
            ImageEntry::Captioned { caption, .. } => caption.as_deref(),
        }
    }

    fn is_captioned(&self) -> bool {
        matches!(self, ImageEntry::Captioned { .. })
    }
}

impl From<&str> for ImageEntry {
    fn from(src: &str) -> Self {
        ImageEntry::Uri(src.to_string())
    }
}

impl From<String> for ImageEntry {
    fn from(src: String) -> Self {
        ImageEntry::Uri(src)
    }
}

/// Validated, non-empty and homogeneous list of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    entries: Vec<ImageEntry>,
    captioned: bool,
}

impl ImageSet {
    pub fn new(entries: Vec<ImageEntry>) -> Result<Self, BackdropError> {
        let first = entries.first().ok_or(BackdropError::NoImages)?;
        let captioned = first.is_captioned();

        if let Some(odd) = entries.iter().position(|e| e.is_captioned() != captioned) {
            let (first_bare, first_captioned) = if captioned { (odd, 0) } else { (0, odd) };
            return Err(BackdropError::MixedEntries { first_bare, first_captioned });
        }
        if let Some(position) = entries.iter().position(|e| e.src().is_empty()) {
            return Err(BackdropError::EmptySource { position });
        }

        Ok(Self { entries, captioned })
    }

    /// A slideshow of exactly one image.
    pub fn single(src: impl Into<String>) -> Result<Self, BackdropError> {
        Self::new(vec![ImageEntry::Uri(src.into())])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, an empty set cannot be built.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_captions(&self) -> bool {
        self.captioned
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    /// Key correlating the caption node of `index` to its image.
    pub fn caption_key(&self, index: usize, separator: &str) -> Option<CaptionKey> {
        self.get(index).map(|entry| CaptionKey::new(entry.src(), separator, index))
    }
}

impl TryFrom<Vec<ImageEntry>> for ImageSet {
    type Error = BackdropError;

    fn try_from(entries: Vec<ImageEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

/// `src + separator + index`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptionKey(String);

impl CaptionKey {
    pub fn new(src: &str, separator: &str, index: usize) -> Self {
        CaptionKey(format!("{src}{separator}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(ImageSet::new(Vec::new()), Err(BackdropError::NoImages));
    }

    #[test]
    fn single_source_becomes_one_entry() {
        let set = ImageSet::single("sky.jpg").unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.has_captions());
        assert_eq!(set.get(0).unwrap().src(), "sky.jpg");
    }

    #[test]
    fn mixed_entries_are_rejected() {
        let err = ImageSet::new(vec![
            ImageEntry::captioned("a.jpg", "A"),
            "b.jpg".into(),
        ])
        .unwrap_err();
        assert_eq!(err, BackdropError::MixedEntries { first_bare: 1, first_captioned: 0 });

        let err = ImageSet::new(vec!["a.jpg".into(), ImageEntry::captioned("b.jpg", "B")]).unwrap_err();
        assert_eq!(err, BackdropError::MixedEntries { first_bare: 0, first_captioned: 1 });
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = ImageSet::new(vec!["a.jpg".into(), "".into()]).unwrap_err();
        assert_eq!(err, BackdropError::EmptySource { position: 1 });
    }

    #[test]
    fn caption_key_joins_source_and_index() {
        let set = ImageSet::new(vec![
            ImageEntry::captioned("a.jpg", "A"),
            ImageEntry::captioned("b.jpg", "B"),
        ])
        .unwrap();
        assert!(set.has_captions());
        assert_eq!(set.caption_key(1, "_").unwrap().as_str(), "b.jpg_1");
        assert_eq!(set.caption_key(0, "::").unwrap().to_string(), "a.jpg::0");
        assert!(set.caption_key(2, "_").is_none());
    }
}
