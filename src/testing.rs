//! In-memory backend recording every collaborator call.

use std::time::Duration;
use crate::backend::*;
use crate::entry::CaptionKey;
use crate::scaling::{Geometry, Viewport};
use crate::timer::IntervalTimers;

pub struct FakeImage {
    pub id: ImageId,
    pub src: String,
    pub geometry: Option<Geometry>,
    pub fading: Option<Duration>,
}

pub struct FakeCaption {
    pub handle: CaptionHandle,
    pub key: String,
    pub target: String,
    pub attribute: String,
    pub markup: String,
    pub classes: Vec<String>,
    pub visible: bool,
    /// Fade and class operations received
    pub touched: usize,
}

impl FakeCaption {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

pub struct FakeBackend {
    next_id: u64,
    pub viewport: Viewport,
    pub wrap: Option<Positioning>,
    pub wrap_size: Option<Viewport>,
    pub wrap_removals: usize,
    pub resize_detaches: usize,
    pub loads: Vec<(ImageId, String)>,
    pub images: Vec<FakeImage>,
    pub removed: Vec<ImageId>,
    pub geometry_calls: usize,
    pub timers: IntervalTimers,
    pub set_intervals: Vec<Duration>,
    pub cleared: Vec<TimerId>,
    pub captions: Vec<FakeCaption>,
    caption_fades: Vec<FadeId>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            viewport: Viewport::new(800.0, 600.0),
            wrap: None,
            wrap_size: None,
            wrap_removals: 0,
            resize_detaches: 0,
            loads: Vec::new(),
            images: Vec::new(),
            removed: Vec::new(),
            geometry_calls: 0,
            timers: IntervalTimers::new(),
            set_intervals: Vec::new(),
            cleared: Vec::new(),
            captions: Vec::new(),
            caption_fades: Vec::new(),
        }
    }

    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn image(&self, id: ImageId) -> Option<&FakeImage> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn caption(&self, key: &str) -> Option<&FakeCaption> {
        self.captions.iter().find(|c| c.key == key)
    }

    pub fn caption_mut(&mut self, key: &str) -> Option<&mut FakeCaption> {
        self.captions.iter_mut().find(|c| c.key == key)
    }

    fn caption_by_handle(&mut self, handle: CaptionHandle) -> Option<&mut FakeCaption> {
        self.captions.iter_mut().find(|c| c.handle == handle)
    }

    /// Caption fade-outs started since the last call.
    pub fn take_caption_fades(&mut self) -> Vec<FadeId> {
        std::mem::take(&mut self.caption_fades)
    }
}

impl ImageLoader for FakeBackend {
    fn load(&mut self, src: &str) -> ImageId {
        let id = ImageId(self.id());
        self.loads.push((id, src.to_string()));
        self.images.push(FakeImage { id, src: src.to_string(), geometry: None, fading: None });
        id
    }
}

impl Stage for FakeBackend {
    fn prepare_wrap(&mut self, positioning: Positioning, _is_body: bool) {
        self.wrap = Some(positioning);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn apply_geometry(&mut self, image: ImageId, wrap: Viewport, geometry: &Geometry) {
        self.geometry_calls += 1;
        self.wrap_size = Some(wrap);
        if let Some(img) = self.images.iter_mut().find(|i| i.id == image) {
            img.geometry = Some(*geometry);
        }
    }

    fn fade_in_image(&mut self, image: ImageId, duration: Duration) {
        if let Some(img) = self.images.iter_mut().find(|i| i.id == image) {
            img.fading = Some(duration);
        }
    }

    fn remove_image(&mut self, image: ImageId) {
        self.images.retain(|i| i.id != image);
        self.removed.push(image);
    }

    fn remove_wrap(&mut self) {
        self.wrap = None;
        self.wrap_removals += 1;
    }

    fn detach_resize_listener(&mut self) {
        self.resize_detaches += 1;
    }
}

impl TimerService for FakeBackend {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.set_intervals.push(period);
        self.timers.set_interval(period)
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.cleared.push(timer);
        self.timers.clear_interval(timer);
    }
}

impl CaptionSurface for FakeBackend {
    fn append_caption(&mut self, target: &str, attribute: &str, key: &CaptionKey, markup: &str, hide_class: Option<&str>) {
        let handle = CaptionHandle(self.id());
        self.captions.push(FakeCaption {
            handle,
            key: key.to_string(),
            target: target.to_string(),
            attribute: attribute.to_string(),
            markup: markup.to_string(),
            classes: hide_class.map(str::to_string).into_iter().collect(),
            visible: false,
            touched: 0,
        });
    }

    fn find_by_key(&self, key: &CaptionKey) -> Option<CaptionHandle> {
        self.caption(key.as_str()).map(|c| c.handle)
    }

    fn fade_out(&mut self, caption: CaptionHandle, _duration: Duration) -> FadeId {
        let fade = FadeId(self.id());
        if let Some(c) = self.caption_by_handle(caption) {
            c.visible = false;
            c.touched += 1;
        }
        self.caption_fades.push(fade);
        fade
    }

    fn fade_in(&mut self, caption: CaptionHandle, _duration: Duration) {
        if let Some(c) = self.caption_by_handle(caption) {
            c.visible = true;
            c.touched += 1;
        }
    }

    fn add_class(&mut self, caption: CaptionHandle, class: &str) {
        if let Some(c) = self.caption_by_handle(caption) {
            if !c.has_class(class) {
                c.classes.push(class.to_string());
            }
            c.touched += 1;
        }
    }

    fn remove_class(&mut self, caption: CaptionHandle, class: &str) {
        if let Some(c) = self.caption_by_handle(caption) {
            c.classes.retain(|existing| existing != class);
            c.touched += 1;
        }
    }
}
