use std::collections::VecDeque;
use std::time::Duration;
use log::{debug, trace};
use raylib::prelude::*;
use backdrop::backend::*;
use backdrop::constants::*;
use backdrop::entry::CaptionKey;
use backdrop::scaling::{Geometry, Viewport};
use backdrop::timer::IntervalTimers;
use crate::slide::{fade_progress, Slide};

struct CaptionFade {
    id: Option<FadeId>,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

struct CaptionLabel {
    handle: CaptionHandle,
    key: CaptionKey,
    text: String,
    classes: Vec<String>,
    opacity: f32,
    fade: Option<CaptionFade>,
}

impl CaptionLabel {
    /// Start a fade, returning the id of a fade-out it interrupted.
    fn start_fade(&mut self, id: Option<FadeId>, to: f32, duration: Duration) -> Option<FadeId> {
        let interrupted = self.fade.take().and_then(|f| f.id);
        self.fade = Some(CaptionFade {
            id,
            from: self.opacity,
            to,
            duration: duration.as_secs_f32(),
            elapsed: 0.0,
        });
        interrupted
    }

    /// Returns the id of a fade that finished this frame.
    fn update(&mut self, dt: f32) -> Option<Option<FadeId>> {
        let fade = self.fade.as_mut()?;
        fade.elapsed += dt;
        let t = fade_progress(fade.elapsed, fade.duration);
        self.opacity = fade.from + (fade.to - fade.from) * t;
        if t >= 1.0 {
            return self.fade.take().map(|f| f.id);
        }
        None
    }
}

/// The raylib window acting as the document body: owns the textures, runs
/// fades and timers off frame time, and queues completions as notices.
pub struct WindowStage {
    next_id: u64,
    viewport: Viewport,
    hide_class: String,
    wrap: Option<Positioning>,
    listening: bool,
    load_requests: Vec<(ImageId, String)>,
    slides: Vec<Slide>,
    captions: Vec<CaptionLabel>,
    timers: IntervalTimers,
    notices: VecDeque<Notice>,
}

impl WindowStage {
    pub fn new(width: i32, height: i32, hide_class: &str) -> Self {
        Self {
            next_id: 0,
            viewport: Viewport::new(width as f64, height as f64),
            hide_class: hide_class.to_string(),
            wrap: None,
            listening: true,
            load_requests: Vec::new(),
            slides: Vec::new(),
            captions: Vec::new(),
            timers: IntervalTimers::new(),
            notices: VecDeque::new(),
        }
    }

    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record a new window size. Queues a resize notice while listening.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = Viewport::new(width as f64, height as f64);
        if self.listening {
            self.notices.push_back(Notice::Resize);
        }
    }

    /// Loads requested since the last call, to be served with the GPU context.
    pub fn take_load_requests(&mut self) -> Vec<(ImageId, String)> {
        std::mem::take(&mut self.load_requests)
    }

    pub fn attach_texture(&mut self, id: ImageId, texture: Texture2D) {
        let slide = Slide::new(id, texture);
        let (width, height) = slide.natural_size();
        self.slides.push(slide);
        self.notices.push_back(Notice::ImageLoaded { image: id, width, height });
    }

    pub fn load_failed(&mut self, id: ImageId) {
        self.notices.push_back(Notice::ImageFailed { image: id });
    }

    /// Run fades and timers forward by one frame.
    pub fn advance(&mut self, dt: f32) {
        for slide in self.slides.iter_mut() {
            if slide.update(dt) {
                self.notices.push_back(Notice::ImageFadedIn { image: slide.id });
            }
        }
        for label in self.captions.iter_mut() {
            if let Some(Some(fade)) = label.update(dt) {
                self.notices.push_back(Notice::CaptionFadedOut { fade });
            }
        }
        for timer in self.timers.advance(Duration::from_secs_f32(dt)) {
            self.notices.push_back(Notice::Tick { timer });
        }
    }

    pub fn pop_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D) {
        if self.wrap.is_none() {
            return;
        }
        // older slides first, the incoming one fades in on top
        for slide in self.slides.iter() {
            slide.draw(d);
        }

        let y = self.viewport.height as i32 - CAPTION_MARGIN - CAPTION_FONT_SIZE;
        for label in self.captions.iter() {
            if label.opacity <= 0.0 || label.classes.contains(&self.hide_class) {
                continue;
            }
            let alpha = (label.opacity * 255.0).round() as u8;
            d.draw_text(&label.text, CAPTION_MARGIN + 2, y + 2, CAPTION_FONT_SIZE, Color::new(0, 0, 0, alpha));
            d.draw_text(&label.text, CAPTION_MARGIN, y, CAPTION_FONT_SIZE, Color::new(255, 255, 255, alpha));
        }
    }

    fn slide_mut(&mut self, image: ImageId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == image)
    }

    fn label_mut(&mut self, caption: CaptionHandle) -> Option<&mut CaptionLabel> {
        self.captions.iter_mut().find(|c| c.handle == caption)
    }
}

impl ImageLoader for WindowStage {
    fn load(&mut self, src: &str) -> ImageId {
        let id = ImageId(self.id());
        self.load_requests.push((id, src.to_string()));
        id
    }
}

impl Stage for WindowStage {
    fn prepare_wrap(&mut self, positioning: Positioning, is_body: bool) {
        if self.wrap.is_some() {
            debug!("Reusing existing wrap");
        }
        trace!("Wrap positioning {positioning:?}, body: {is_body}");
        self.wrap = Some(positioning);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn apply_geometry(&mut self, image: ImageId, _wrap: Viewport, geometry: &Geometry) {
        // the wrap always spans the whole window
        if let Some(slide) = self.slide_mut(image) {
            slide.set_geometry(*geometry);
        }
    }

    fn fade_in_image(&mut self, image: ImageId, duration: Duration) {
        if let Some(slide) = self.slide_mut(image) {
            slide.start_fade_in(duration.as_secs_f32());
        }
    }

    fn remove_image(&mut self, image: ImageId) {
        // dropping the slide unloads its texture
        self.slides.retain(|s| s.id != image);
    }

    fn remove_wrap(&mut self) {
        self.wrap = None;
        self.slides.clear();
    }

    fn detach_resize_listener(&mut self) {
        self.listening = false;
    }
}

impl TimerService for WindowStage {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.timers.set_interval(period)
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.timers.clear_interval(timer);
    }
}

impl CaptionSurface for WindowStage {
    fn append_caption(&mut self, target: &str, attribute: &str, key: &CaptionKey, markup: &str, hide_class: Option<&str>) {
        trace!("Caption {attribute}=\"{key}\" appended to {target}");
        let handle = CaptionHandle(self.id());
        self.captions.push(CaptionLabel {
            handle,
            key: key.clone(),
            text: markup.to_string(),
            classes: hide_class.map(str::to_string).into_iter().collect(),
            opacity: 0.0,
            fade: None,
        });
    }

    fn find_by_key(&self, key: &CaptionKey) -> Option<CaptionHandle> {
        self.captions.iter().find(|c| &c.key == key).map(|c| c.handle)
    }

    fn fade_out(&mut self, caption: CaptionHandle, duration: Duration) -> FadeId {
        let fade = FadeId(self.id());
        let finished = match self.label_mut(caption) {
            Some(label) => label.start_fade(Some(fade), 0.0, duration),
            // nothing to fade, complete right away
            None => Some(fade),
        };
        if let Some(finished) = finished {
            self.notices.push_back(Notice::CaptionFadedOut { fade: finished });
        }
        fade
    }

    fn fade_in(&mut self, caption: CaptionHandle, duration: Duration) {
        let interrupted = self.label_mut(caption).and_then(|label| label.start_fade(None, 1.0, duration));
        if let Some(fade) = interrupted {
            self.notices.push_back(Notice::CaptionFadedOut { fade });
        }
    }

    fn add_class(&mut self, caption: CaptionHandle, class: &str) {
        if let Some(label) = self.label_mut(caption) {
            if !label.classes.iter().any(|c| c == class) {
                label.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, caption: CaptionHandle, class: &str) {
        if let Some(label) = self.label_mut(caption) {
            label.classes.retain(|c| c != class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: usize) -> CaptionKey {
        CaptionKey::new("a.jpg", "_", index)
    }

    #[test]
    fn captions_start_undisplayed() {
        let mut stage = WindowStage::new(640, 480, "hide");
        stage.append_caption("body", "bootstrap-image", &key(0), "A", None);
        stage.append_caption("body", "bootstrap-image", &key(1), "B", Some("hide"));
        assert!(stage.captions.iter().all(|c| c.opacity == 0.0));

        // the first swap reveals caption 0 once its fade-out completes
        let first = stage.find_by_key(&key(0)).unwrap();
        stage.fade_out(first, CAPTION_FADE);
        stage.advance(1.0);
        let Some(Notice::CaptionFadedOut { .. }) = stage.pop_notice() else {
            panic!("expected a caption fade-out");
        };
        stage.fade_in(first, CAPTION_FADE);
        stage.advance(1.0);
        assert_eq!(stage.captions[0].opacity, 1.0);
        assert_eq!(stage.captions[1].opacity, 0.0);
    }
}
