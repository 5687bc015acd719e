//! Keeps caption visibility in step with the active image.
//!
//! A swap fades the outgoing caption out first. Only once that fade has
//! completed is the outgoing caption marked hidden and the incoming one faded
//! in. Swaps can overlap when navigation is faster than the fade; each
//! completion is checked against the index that is current at that moment.

use std::collections::HashMap;
use log::{debug, warn};
use crate::backend::{CaptionHandle, CaptionSurface, FadeId};
use crate::constants::CAPTION_FADE;
use crate::entry::{CaptionKey, ImageSet};
use crate::options::Options;

struct PendingSwap {
    outgoing: CaptionHandle,
    outgoing_index: usize,
    incoming: CaptionKey,
    incoming_index: usize,
}

pub struct CaptionSynchronizer {
    separator: String,
    hide_class: String,
    pending: HashMap<FadeId, PendingSwap>,
}

impl CaptionSynchronizer {
    /// Append one caption node per captioned entry and return a synchronizer,
    /// or `None` when the images carry no captions.
    pub fn install<S: CaptionSurface + ?Sized>(
        surface: &mut S,
        images: &ImageSet,
        options: &Options,
    ) -> Option<Self> {
        if !images.has_captions() {
            return None;
        }

        let sync = Self {
            separator: options.data_caption_index_separator.clone(),
            hide_class: options.caption_hide_class.clone(),
            pending: HashMap::new(),
        };

        for (index, entry) in images.iter().enumerate() {
            let Some(key) = images.caption_key(index, &sync.separator) else {
                continue;
            };
            let hide_class = (index != 0).then_some(sync.hide_class.as_str());
            surface.append_caption(
                &options.caption_append_to,
                &options.data_caption,
                &key,
                entry.caption().unwrap_or_default(),
                hide_class,
            );
        }

        Some(sync)
    }

    /// Start swapping the caption of `old_index` for the one of `new_index`.
    pub fn sync<S: CaptionSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        images: &ImageSet,
        old_index: usize,
        new_index: usize,
    ) {
        let (Some(outgoing_key), Some(incoming)) = (
            images.caption_key(old_index, &self.separator),
            images.caption_key(new_index, &self.separator),
        ) else {
            debug!("No caption key for {old_index} -> {new_index}");
            return;
        };

        match surface.find_by_key(&outgoing_key) {
            Some(outgoing) => {
                let fade = surface.fade_out(outgoing, CAPTION_FADE);
                self.pending.insert(fade, PendingSwap {
                    outgoing,
                    outgoing_index: old_index,
                    incoming,
                    incoming_index: new_index,
                });
            }
            None => {
                warn!("No caption node for {outgoing_key}, revealing {incoming} directly");
                self.reveal(surface, &incoming);
            }
        }
    }

    /// Finish the swap started with `fade`. `current_index` is the slideshow
    /// index at the time the fade completed.
    pub fn fade_out_finished<S: CaptionSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        fade: FadeId,
        current_index: usize,
    ) {
        let Some(swap) = self.pending.remove(&fade) else {
            debug!("Ignoring unknown caption fade {fade:?}");
            return;
        };

        if swap.outgoing_index != current_index {
            surface.add_class(swap.outgoing, &self.hide_class);
        }

        if swap.incoming_index == current_index {
            self.reveal(surface, &swap.incoming);
        } else {
            debug!("Caption {} superseded before it was revealed", swap.incoming);
        }
    }

    fn reveal<S: CaptionSurface + ?Sized>(&self, surface: &mut S, key: &CaptionKey) {
        match surface.find_by_key(key) {
            Some(caption) => {
                surface.fade_in(caption, CAPTION_FADE);
                surface.remove_class(caption, &self.hide_class);
            }
            None => warn!("No caption node for {key}"),
        }
    }

    /// Drop every swap still waiting for its fade.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
