use std::time::Duration;

// Option defaults
pub const DEFAULT_CENTERED_X: bool = true;
pub const DEFAULT_CENTERED_Y: bool = true;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000); // Time between slides
pub const DEFAULT_FADE: Duration = Duration::ZERO;                  // Image fade-in duration
pub const DEFAULT_CAPTION_APPEND_TO: &str = "body";
pub const DEFAULT_DATA_CAPTION: &str = "bootstrap-image";
pub const DEFAULT_CAPTION_INDEX_SEPARATOR: &str = "_";
pub const DEFAULT_CAPTION_HIDE_CLASS: &str = "hide";

pub const CAPTION_FADE: Duration = Duration::from_millis(200);     // Caption fade out / fade in, not configurable

// Window host
pub const WINDOW_WIDTH: i32 = 1280;
pub const WINDOW_HEIGHT: i32 = 720;
pub const FPS: u32 = 60;
pub const CAPTION_FONT_SIZE: i32 = 28;
pub const CAPTION_MARGIN: i32 = 32;
