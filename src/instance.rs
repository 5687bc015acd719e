//! Binding of slideshows to containers.
//!
//! An [`Instance`] ties one controller to one container and routes host
//! notices to it. A [`Registry`] keeps at most one instance per container and
//! owns its lifetime: attaching again replaces the old instance, detaching
//! destroys it.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use log::{debug, info};
use crate::backend::{Backend, Notice, Positioning};
use crate::caption::CaptionSynchronizer;
use crate::controller::Controller;
use crate::entry::{ImageEntry, ImageSet};
use crate::error::BackdropError;
use crate::options::{Options, OptionsPatch};

const BODY: &str = "body";

/// Identity of a container element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        ContainerId(id.into())
    }

    /// The document body.
    pub fn body() -> Self {
        ContainerId(BODY.to_string())
    }

    pub fn is_body(&self) -> bool {
        self.0 == BODY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host capabilities, resolved once and injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Fixed positioning works in this environment
    pub fixed_position: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { fixed_position: true }
    }
}

impl Capabilities {
    /// Body backgrounds are pinned to the viewport when the host allows it,
    /// everything else scrolls with its container.
    pub fn positioning_for(&self, container: &ContainerId) -> Positioning {
        if container.is_body() && self.fixed_position {
            Positioning::Fixed
        } else {
            Positioning::Absolute
        }
    }
}

pub struct Instance<B: Backend> {
    positioning: Positioning,
    controller: Controller<B>,
}

impl<B: Backend> Instance<B> {
    /// Prepare the wrap, install captions and show the first image.
    pub fn new(
        container: ContainerId,
        mut backend: B,
        entries: Vec<ImageEntry>,
        options: Options,
        capabilities: Capabilities,
    ) -> Result<Self, BackdropError> {
        let images = ImageSet::new(entries)?;
        let positioning = capabilities.positioning_for(&container);

        backend.prepare_wrap(positioning, container.is_body());
        let captions = CaptionSynchronizer::install(&mut backend, &images, &options);
        info!(
            "Attaching {} image(s) to {container} ({positioning:?}, captions: {})",
            images.len(),
            captions.is_some()
        );

        let mut controller = Controller::new(container, backend, images, options, captions);
        controller.show(0);

        Ok(Self { positioning, controller })
    }

    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    pub fn controller(&self) -> &Controller<B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<B> {
        &mut self.controller
    }

    /// Route a host notice. Orientation changes only matter for the body.
    pub fn handle(&mut self, notice: Notice) -> &mut Self {
        if notice == Notice::OrientationChange && !self.controller.container().is_body() {
            debug!("Orientation change ignored for {}", self.controller.container());
            return self;
        }
        self.controller.notify(notice);
        self
    }
}

impl<B: Backend> Deref for Instance<B> {
    type Target = Controller<B>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

impl<B: Backend> DerefMut for Instance<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.controller
    }
}

/// At most one instance per container.
pub struct Registry<B: Backend> {
    capabilities: Capabilities,
    instances: HashMap<ContainerId, Instance<B>>,
}

impl<B: Backend> Registry<B> {
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities, instances: HashMap::new() }
    }

    /// Attach a slideshow to `container`.
    ///
    /// An instance already attached there is destroyed with its visual kept,
    /// and its options are the base the patch is merged into.
    pub fn attach(
        &mut self,
        container: ContainerId,
        backend: B,
        entries: Vec<ImageEntry>,
        patch: OptionsPatch,
    ) -> Result<&mut Instance<B>, BackdropError> {
        let base = match self.instances.get(&container) {
            Some(existing) => existing.options().clone(),
            None => Options::default(),
        };
        let options = base.merged(patch);

        // validate before tearing the old instance down
        ImageSet::new(entries.clone())?;

        if let Some(mut old) = self.instances.remove(&container) {
            debug!("Replacing slideshow on {container}");
            old.destroy(true);
        }

        let instance = Instance::new(container.clone(), backend, entries, options, self.capabilities)?;
        Ok(self.instances.entry(container).or_insert(instance))
    }

    /// Attach to the document body.
    pub fn attach_body(&mut self, backend: B, entries: Vec<ImageEntry>, patch: OptionsPatch) -> Result<&mut Instance<B>, BackdropError> {
        self.attach(ContainerId::body(), backend, entries, patch)
    }

    pub fn contains(&self, container: &ContainerId) -> bool {
        self.instances.contains_key(container)
    }

    pub fn get(&self, container: &ContainerId) -> Option<&Instance<B>> {
        self.instances.get(container)
    }

    pub fn get_mut(&mut self, container: &ContainerId) -> Option<&mut Instance<B>> {
        self.instances.get_mut(container)
    }

    /// Destroy and forget the instance on `container`. Returns it so the
    /// caller can still reach its backend.
    pub fn detach(&mut self, container: &ContainerId, preserve_visual: bool) -> Option<Instance<B>> {
        let mut instance = self.instances.remove(container)?;
        instance.destroy(preserve_visual);
        Some(instance)
    }

    /// Deliver a notice to the instance on `container`, if any.
    pub fn dispatch(&mut self, container: &ContainerId, notice: Notice) -> bool {
        match self.instances.get_mut(container) {
            Some(instance) => {
                instance.handle(notice);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
