use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::seq::SliceRandom;
use raylib::prelude::*;

mod slide;
mod texture_loader;
mod window_stage;

use backdrop::constants::*;
use backdrop::{Capabilities, ContainerId, ImageEntry, Instance, Options, OptionsPatch};
use crate::texture_loader::{is_supported_image, load_sorted_image_paths, load_texture_with_exif_rotation};
use crate::window_stage::WindowStage;

/// Full-window background slideshow
#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    /// Image files or directories of images
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Caption for the image at the same position (repeat once per image)
    #[arg(long = "caption", value_name = "TEXT")]
    captions: Vec<String>,

    /// Time between slides in milliseconds
    #[arg(long, value_name = "MS")]
    duration: Option<u64>,

    /// Fade-in duration of each slide in milliseconds
    #[arg(long, value_name = "MS")]
    fade: Option<u64>,

    /// Old name of --fade
    #[arg(long, value_name = "MS", hide = true)]
    speed: Option<u64>,

    /// Do not center horizontal overflow
    #[arg(long)]
    no_center_x: bool,

    /// Do not center vertical overflow
    #[arg(long)]
    no_center_y: bool,

    /// Play the images in random order
    #[arg(long)]
    shuffle: bool,

    /// Start without auto-advance
    #[arg(long)]
    paused: bool,

    /// Treat the window as unable to pin the background
    #[arg(long)]
    no_fixed_position: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,
}

impl Cli {
    fn options_patch(&self) -> OptionsPatch {
        OptionsPatch {
            centered_x: self.no_center_x.then_some(false),
            centered_y: self.no_center_y.then_some(false),
            duration: self.duration.map(Duration::from_millis),
            fade: self.fade.map(Duration::from_millis),
            speed: self.speed.map(Duration::from_millis),
            ..Default::default()
        }
    }
}

/// Expand directories and pair captions with their images.
fn collect_entries(inputs: &[PathBuf], captions: &[String], shuffle: bool) -> Result<Vec<ImageEntry>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(load_sorted_image_paths(input)?);
        } else if is_supported_image(input) {
            paths.push(input.clone());
        } else {
            bail!("Not an image or directory: {}", input.display());
        }
    }

    if !captions.is_empty() && captions.len() != paths.len() {
        bail!("Got {} captions for {} images", captions.len(), paths.len());
    }

    let mut entries: Vec<ImageEntry> = paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let src = path.to_string_lossy().into_owned();
            match captions.get(i) {
                Some(caption) => ImageEntry::captioned(src, caption.clone()),
                None => ImageEntry::Uri(src),
            }
        })
        .collect();

    if shuffle {
        entries.shuffle(&mut rand::rng());
    }
    Ok(entries)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let entries = collect_entries(&cli.inputs, &cli.captions, cli.shuffle)?;
    let options = Options::default().merged(cli.options_patch());
    let capabilities = Capabilities { fixed_position: !cli.no_fixed_position };

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("backdrop")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let stage = WindowStage::new(rl.get_screen_width(), rl.get_screen_height(), &options.caption_hide_class);
    let mut instance = Instance::new(ContainerId::body(), stage, entries, options, capabilities)
        .context("Failed to start slideshow")?;
    instance.subscribe(|event| info!("{:?} -> slide {}", event.kind, event.target));
    if cli.paused {
        instance.pause();
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_window_resized() {
            let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
            instance.backend_mut().set_viewport(w, h);
        }

        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            instance.next();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            instance.prev();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            if instance.is_paused() {
                instance.resume();
            } else {
                instance.pause();
            }
        }

        // Serve image loads with the GPU context
        for (id, src) in instance.backend_mut().take_load_requests() {
            match load_texture_with_exif_rotation(&mut rl, &thread, Path::new(&src)) {
                Ok(texture) => instance.backend_mut().attach_texture(id, texture),
                Err(e) => {
                    warn!("{e:#}");
                    instance.backend_mut().load_failed(id);
                }
            }
        }

        instance.backend_mut().advance(dt);
        while let Some(notice) = instance.backend_mut().pop_notice() {
            instance.handle(notice);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        instance.backend().draw(&mut d);
    }

    instance.destroy(false);
    Ok(())
}
