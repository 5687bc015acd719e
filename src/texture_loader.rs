use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

// --- Expand directories into their images, sorted by file name ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("No image files found in directory: {}", dir_path.display());
    }
    Ok(paths)
}

/// Quarter turns to apply for an EXIF orientation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Half,
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    // 1 = normal, 3 = 180, 6 = 90 cw, 8 = 90 ccw; flipped variants are ignored
    pub fn from_orientation(orientation: u16) -> Self {
        match orientation {
            3 => Rotation::Half,
            6 => Rotation::Clockwise,
            8 => Rotation::CounterClockwise,
            _ => Rotation::None,
        }
    }

    fn apply(self, image: &mut Image) {
        match self {
            Rotation::None => {}
            Rotation::Half => {
                image.rotate_cw();
                image.rotate_cw();
            }
            Rotation::Clockwise => image.rotate_cw(),
            Rotation::CounterClockwise => image.rotate_ccw(),
        }
    }
}

fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // not fatal, the image is shown as stored
            warn!("Could not read EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

// --- Load image, apply EXIF rotation, upload texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // EXIF is only reliable for JPEG
    let rotation = if extension == "jpg" || extension == "jpeg" {
        Rotation::from_orientation(read_orientation(image_path, &file_bytes))
    } else {
        Rotation::None
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to decode {}: {}", image_path.display(), e))?;

    if rotation != Rotation::None {
        debug!("Applying {rotation:?} rotation to {}", image_path.display());
        rotation.apply(&mut image);
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("Failed to create texture for {}: {}", image_path.display(), e))?;

    // CPU copy no longer needed
    drop(image);

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_image_extensions() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("x.png")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("jpg")));
    }

    #[test]
    fn maps_orientation_to_rotation() {
        assert_eq!(Rotation::from_orientation(1), Rotation::None);
        assert_eq!(Rotation::from_orientation(3), Rotation::Half);
        assert_eq!(Rotation::from_orientation(6), Rotation::Clockwise);
        assert_eq!(Rotation::from_orientation(8), Rotation::CounterClockwise);
        assert_eq!(Rotation::from_orientation(2), Rotation::None);
    }

    #[test]
    fn directory_listing_is_sorted_and_filtered() {
        let dir = std::env::temp_dir().join(format!("backdrop-listing-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.jpg", "a.png", "c.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let paths = load_sorted_image_paths(&dir).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
