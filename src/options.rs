use std::time::Duration;
use crate::constants::*;

/// Settings for one slideshow instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Center horizontal overflow
    pub centered_x: bool,
    /// Center vertical overflow
    pub centered_y: bool,
    /// Auto-advance interval
    pub duration: Duration,
    /// Fade-in duration of a new image
    pub fade: Duration,
    /// Legacy name for `fade`, wins when set to a non-zero value
    pub speed: Option<Duration>,
    /// Where caption nodes get appended
    pub caption_append_to: String,
    /// Attribute carrying the caption key
    pub data_caption: String,
    /// Separator between source and index in a caption key
    pub data_caption_index_separator: String,
    /// Marker class of hidden captions
    pub caption_hide_class: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            centered_x: DEFAULT_CENTERED_X,
            centered_y: DEFAULT_CENTERED_Y,
            duration: DEFAULT_DURATION,
            fade: DEFAULT_FADE,
            speed: None,
            caption_append_to: DEFAULT_CAPTION_APPEND_TO.to_string(),
            data_caption: DEFAULT_DATA_CAPTION.to_string(),
            data_caption_index_separator: DEFAULT_CAPTION_INDEX_SEPARATOR.to_string(),
            caption_hide_class: DEFAULT_CAPTION_HIDE_CLASS.to_string(),
        }
    }
}

impl Options {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Duration actually used to fade a new image in.
    pub fn fade_duration(&self) -> Duration {
        match self.speed {
            Some(speed) if !speed.is_zero() => speed,
            _ => self.fade,
        }
    }

    /// Overwrite every field the patch sets.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(v) = patch.centered_x {
            self.centered_x = v;
        }
        if let Some(v) = patch.centered_y {
            self.centered_y = v;
        }
        if let Some(v) = patch.duration {
            self.duration = v;
        }
        if let Some(v) = patch.fade {
            self.fade = v;
        }
        if let Some(v) = patch.speed {
            self.speed = Some(v);
        }
        if let Some(v) = patch.caption_append_to {
            self.caption_append_to = v;
        }
        if let Some(v) = patch.data_caption {
            self.data_caption = v;
        }
        if let Some(v) = patch.data_caption_index_separator {
            self.data_caption_index_separator = v;
        }
        if let Some(v) = patch.caption_hide_class {
            self.caption_hide_class = v;
        }
    }

    pub fn merged(mut self, patch: OptionsPatch) -> Self {
        self.merge(patch);
        self
    }
}

/// Partial options, as supplied by a caller that only overrides some fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsPatch {
    pub centered_x: Option<bool>,
    pub centered_y: Option<bool>,
    pub duration: Option<Duration>,
    pub fade: Option<Duration>,
    pub speed: Option<Duration>,
    pub caption_append_to: Option<String>,
    pub data_caption: Option<String>,
    pub data_caption_index_separator: Option<String>,
    pub caption_hide_class: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::default();
        assert!(options.centered_x && options.centered_y);
        assert_eq!(options.duration, Duration::from_millis(5000));
        assert_eq!(options.fade, Duration::ZERO);
        assert_eq!(options.caption_append_to, "body");
        assert_eq!(options.data_caption, "bootstrap-image");
        assert_eq!(options.data_caption_index_separator, "_");
        assert_eq!(options.caption_hide_class, "hide");
    }

    #[test]
    fn legacy_speed_overrides_fade_unless_zero() {
        let mut options = Options::default().with_fade(Duration::from_millis(300));
        assert_eq!(options.fade_duration(), Duration::from_millis(300));

        options.speed = Some(Duration::ZERO);
        assert_eq!(options.fade_duration(), Duration::from_millis(300));

        options.speed = Some(Duration::from_millis(750));
        assert_eq!(options.fade_duration(), Duration::from_millis(750));
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let base = Options::default().with_duration(Duration::from_secs(2));
        let merged = base.merged(OptionsPatch {
            centered_y: Some(false),
            caption_hide_class: Some("is-hidden".into()),
            ..Default::default()
        });

        assert!(merged.centered_x);
        assert!(!merged.centered_y);
        assert_eq!(merged.duration, Duration::from_secs(2));
        assert_eq!(merged.caption_hide_class, "is-hidden");
        assert_eq!(merged.data_caption, "bootstrap-image");
    }
}
