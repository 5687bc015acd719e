use std::mem;
use log::{debug, trace, warn};
use crate::backend::{Backend, ImageId, Notice, TimerId};
use crate::caption::CaptionSynchronizer;
use crate::entry::ImageSet;
use crate::instance::ContainerId;
use crate::options::Options;
use crate::scaling::fill_viewport;
use crate::state::{Phase, SlideState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Right before the index changes
    Before,
    /// The new image has faded in and the old one is gone
    After,
    /// Deprecated alias of `After`, emitted right after it
    Show,
}

/// Read-only view of the controller handed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub index: usize,
    pub len: usize,
    pub paused: bool,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEvent {
    pub kind: EventKind,
    /// Index the transition goes to
    pub target: usize,
    pub container: ContainerId,
    pub snapshot: Snapshot,
}

type Listener = Box<dyn FnMut(&SlideEvent)>;

/// An image element inside the wrap.
struct Slot {
    image: ImageId,
    index: usize,
    /// Marked for removal by a later transition
    deleteable: bool,
    /// Images to remove once this one has faded in
    retire: Vec<ImageId>,
}

/// Drives one slideshow: the active index, transitions and the auto-advance
/// timer. Every public operation returns `&mut Self` for chaining and turns
/// into a no-op once the controller has been destroyed.
pub struct Controller<B: Backend> {
    backend: B,
    container: ContainerId,
    options: Options,
    state: SlideState,
    phase: Phase,
    slots: Vec<Slot>,
    current: Option<ImageId>,
    captions: Option<CaptionSynchronizer>,
    listeners: Vec<Listener>,
}

impl<B: Backend> Controller<B> {
    /// Build an idle controller. Nothing is shown until the first `show`.
    pub fn new(
        container: ContainerId,
        backend: B,
        images: ImageSet,
        options: Options,
        captions: Option<CaptionSynchronizer>,
    ) -> Self {
        Self {
            backend,
            container,
            options,
            state: SlideState::new(images),
            phase: Phase::Idle,
            slots: Vec::new(),
            current: None,
            captions,
            listeners: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn len(&self) -> usize {
        self.state.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.images.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn images(&self) -> &ImageSet {
        &self.state.images
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Ratio of the current image, once it has loaded.
    pub fn active_ratio(&self) -> Option<f64> {
        self.state.active_ratio
    }

    /// Currently armed auto-advance timer.
    pub fn timer(&self) -> Option<TimerId> {
        self.state.timer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            index: self.state.index,
            len: self.state.images.len(),
            paused: self.state.paused,
            phase: self.phase,
        }
    }

    /// Register a listener for `before`, `after` and `show` events.
    pub fn subscribe(&mut self, listener: impl FnMut(&SlideEvent) + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    fn emit(&mut self, kind: EventKind, target: usize) {
        let event = SlideEvent {
            kind,
            target,
            container: self.container.clone(),
            snapshot: self.snapshot(),
        };
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.state.timer.take() {
            self.backend.clear_interval(timer);
        }
    }

    /// Transition to the image at `index`.
    ///
    /// Indices whose magnitude exceeds the last position are ignored, and so
    /// are negative indices. A transition already in flight is superseded:
    /// its image still completes and cleans up after itself, but only the
    /// latest request drives the timer and the captions.
    pub fn show(&mut self, index: isize) -> &mut Self {
        if self.is_destroyed() {
            debug!("show({index}) after destroy ignored");
            return self;
        }
        let Some(new_index) = self.state.resolve(index) else {
            debug!("show({index}) out of range for {} images", self.state.images.len());
            return self;
        };

        self.emit(EventKind::Before, new_index);

        let previous = self.state.index;
        self.state.index = new_index;
        self.cancel_timer();

        if let Some(captions) = self.captions.as_mut() {
            captions.sync(&mut self.backend, &self.state.images, previous, new_index);
        }

        let retire = self
            .slots
            .iter_mut()
            .map(|slot| {
                slot.deleteable = true;
                slot.image
            })
            .collect();

        let src = self.state.images.get(new_index).map(|e| e.src().to_string()).unwrap_or_default();
        let image = self.backend.load(&src);
        trace!("Loading {src} as {image:?} for index {new_index}");

        self.slots.push(Slot { image, index: new_index, deleteable: false, retire });
        self.current = Some(image);
        self.state.active_ratio = None;
        self.phase = Phase::Transitioning;
        self
    }

    pub fn next(&mut self) -> &mut Self {
        let index = self.state.next_index();
        self.show(index as isize)
    }

    pub fn prev(&mut self) -> &mut Self {
        let index = self.state.prev_index();
        self.show(index as isize)
    }

    /// Suppress auto-advance and drop the pending tick. A transition in flight
    /// still completes.
    pub fn pause(&mut self) -> &mut Self {
        if !self.is_destroyed() {
            self.state.paused = true;
            self.cancel_timer();
        }
        self
    }

    /// Clear the pause flag and advance one slide right away.
    pub fn resume(&mut self) -> &mut Self {
        if self.is_destroyed() {
            return self;
        }
        self.state.paused = false;
        self.next()
    }

    /// (Re)arm the auto-advance timer. Single-image slideshows never cycle.
    pub fn cycle(&mut self) -> &mut Self {
        if self.is_destroyed() || self.state.images.len() < 2 {
            return self;
        }
        self.cancel_timer();
        self.state.timer = Some(self.backend.set_interval(self.options.duration));
        self
    }

    /// Lay out every image that is not about to be removed.
    ///
    /// Skipped while the current image has no known ratio; the next load or
    /// resize lays it out.
    pub fn resize(&mut self) -> &mut Self {
        if self.is_destroyed() {
            return self;
        }
        let Some(ratio) = self.state.active_ratio else {
            trace!("Resize deferred, current image not loaded yet");
            return self;
        };
        let viewport = self.backend.viewport();
        let Some(geometry) = fill_viewport(viewport, ratio, self.options.centered_x, self.options.centered_y) else {
            trace!("Resize skipped for ratio {ratio}");
            return self;
        };

        for slot in self.slots.iter().filter(|s| !s.deleteable) {
            self.backend.apply_geometry(slot.image, viewport, &geometry);
        }
        self
    }

    /// Tear down. The wrap is removed unless `preserve_visual` is set. Calling
    /// it again does nothing.
    pub fn destroy(&mut self, preserve_visual: bool) -> &mut Self {
        if self.is_destroyed() {
            return self;
        }
        self.backend.detach_resize_listener();
        self.cancel_timer();
        if !preserve_visual {
            self.backend.remove_wrap();
        }
        if let Some(captions) = self.captions.as_mut() {
            captions.clear();
        }
        self.phase = Phase::Destroyed;
        self
    }

    /// Feed a completion or host event back in.
    pub fn notify(&mut self, notice: Notice) -> &mut Self {
        if self.is_destroyed() {
            debug!("{notice:?} after destroy ignored");
            return self;
        }
        match notice {
            Notice::ImageLoaded { image, width, height } => self.image_loaded(image, width / height),
            Notice::ImageFailed { image } => self.image_failed(image),
            Notice::ImageFadedIn { image } => self.image_faded_in(image),
            Notice::CaptionFadedOut { fade } => {
                let index = self.state.index;
                if let Some(captions) = self.captions.as_mut() {
                    captions.fade_out_finished(&mut self.backend, fade, index);
                }
            }
            Notice::Tick { timer } => self.tick(timer),
            Notice::Resize | Notice::OrientationChange => {
                self.resize();
            }
        }
        self
    }

    fn image_loaded(&mut self, image: ImageId, ratio: f64) {
        if !self.slots.iter().any(|s| s.image == image) {
            debug!("Load of removed image {image:?} ignored");
            return;
        }

        self.backend.fade_in_image(image, self.options.fade_duration());

        if self.current == Some(image) {
            self.state.active_ratio = Some(ratio);
            self.resize();
        }
    }

    fn image_failed(&mut self, image: ImageId) {
        match self.slots.iter().find(|s| s.image == image) {
            Some(slot) => {
                let src = self.state.images.get(slot.index).map_or("", |e| e.src());
                warn!("Failed to load image {src} for index {}", slot.index);
            }
            None => {
                debug!("Failure of removed image {image:?} ignored");
                return;
            }
        }

        // keep the previous image on screen and move on at the next tick
        if self.current == Some(image) {
            self.phase = Phase::Showing;
            if !self.state.paused {
                self.cycle();
            }
        }
    }

    fn image_faded_in(&mut self, image: ImageId) {
        let Some(slot) = self.slots.iter_mut().find(|s| s.image == image) else {
            debug!("Fade of removed image {image:?} ignored");
            return;
        };
        let target = slot.index;
        let retire = mem::take(&mut slot.retire);

        for old in retire {
            if let Some(position) = self.slots.iter().position(|s| s.image == old) {
                self.slots.remove(position);
                self.backend.remove_image(old);
            }
        }

        if self.current == Some(image) {
            self.phase = Phase::Showing;
            if !self.state.paused {
                self.cycle();
            }
        }

        self.emit(EventKind::After, target);
        self.emit(EventKind::Show, target);
    }

    fn tick(&mut self, timer: TimerId) {
        if self.state.timer != Some(timer) {
            trace!("Stale tick from {timer:?}");
            return;
        }
        if !self.state.paused {
            self.next();
        }
    }
}
