use raylib::prelude::*;
use backdrop::backend::ImageId;
use backdrop::scaling::Geometry;

/// A background image on screen, fading from transparent to opaque.
pub struct Slide {
    pub id: ImageId,
    image: Texture2D,

    geometry: Option<Geometry>,
    opacity: f32,

    fade_duration: f32,
    animation_timer: f32,
    pub is_animating: bool,
}

impl Slide {
    pub fn new(id: ImageId, image: Texture2D) -> Self {
        Self {
            id,
            image,
            geometry: None,
            opacity: 0.0, // hidden until faded in
            fade_duration: 0.0,
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    pub fn natural_size(&self) -> (f64, f64) {
        (self.image.width() as f64, self.image.height() as f64)
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    pub fn start_fade_in(&mut self, duration: f32) {
        self.fade_duration = duration;
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    /// Advance the fade. Returns true on the frame the fade completes.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_animating {
            return false;
        }
        self.animation_timer += dt;
        self.opacity = fade_progress(self.animation_timer, self.fade_duration);

        if self.opacity >= 1.0 {
            self.is_animating = false;
            self.opacity = 1.0;
            return true;
        }
        false
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D) {
        let Some(geometry) = self.geometry else {
            return;
        };
        if self.opacity <= 0.0 {
            return;
        }

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;
        let alpha = (self.opacity * 255.0).round() as u8;

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height), // whole texture
            Rectangle::new(
                geometry.offset_x as f32,
                geometry.offset_y as f32,
                geometry.width as f32,
                geometry.height as f32,
            ),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}

/// Opacity after `elapsed` seconds of a fade lasting `duration` seconds.
pub fn fade_progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
