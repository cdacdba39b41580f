use raylib::prelude::*;
use crate::camera::DepthCue;
use crate::constants::*;

const SEPIA_TINT: Color = Color { r: 235, g: 220, b: 200, a: 255 };
const SPROCKET_HOLE: Color = Color { r: 51, g: 51, b: 51, a: 255 };

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// One frame of the filmstrip as drawn on screen.
pub struct ReelSlide {
    image: Option<Texture2D>,
    caption: String,

    ken_burns_seconds: f32,
    ken_burns_zoom: f32,
    tween_ken_burns: Option<ease::Tween>,
}

impl ReelSlide {
    pub fn new(image: Option<Texture2D>, caption: String, ken_burns_seconds: f32) -> Self {
        Self {
            image,
            caption,
            ken_burns_seconds,
            ken_burns_zoom: 1.0,
            tween_ken_burns: None,
        }
    }

    /// Starts the slow zoom from scratch.
    pub fn activate(&mut self) {
        self.ken_burns_zoom = 1.0;
        self.tween_ken_burns = Some(ease::Tween::new(
            ease::cubic_out,
            1.0,
            KEN_BURNS_ZOOM,
            self.ken_burns_seconds.max(0.001),
        ));
    }

    pub fn deactivate(&mut self) {
        self.ken_burns_zoom = 1.0;
        self.tween_ken_burns = None;
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(tween) = self.tween_ken_burns.as_mut() {
            self.ken_burns_zoom = tween.apply(dt).clamp(1.0, KEN_BURNS_ZOOM);
        }
    }

    /// Part of the texture to show: cover-fit into the picture area, biased
    /// towards the top (faces), then narrowed by the Ken Burns zoom.
    fn source_rect(&self, tex_width: f32, tex_height: f32) -> Rectangle {
        let aspect = FRAME_WIDTH / FRAME_HEIGHT;
        let (mut width, mut height, mut x, mut y) = if tex_width / tex_height > aspect {
            let width = tex_height * aspect;
            (width, tex_height, (tex_width - width) * 0.5, 0.0)
        } else {
            let height = tex_width / aspect;
            (tex_width, height, 0.0, (tex_height - height) * 0.2)
        };

        let zoomed_width = width / self.ken_burns_zoom;
        let zoomed_height = height / self.ken_burns_zoom;
        x += (width - zoomed_width) * 0.5;
        y += (height - zoomed_height) * 0.5;
        width = zoomed_width;
        height = zoomed_height;

        Rectangle::new(x, y, width, height)
    }

    /// Draws the frame centered on `center`. The tilt is faked by narrowing
    /// the frame and shading the side that turns away from the viewer.
    pub fn draw(&self, d: &mut RaylibDrawHandle, center: Vector2, cue: &DepthCue, show_caption: bool) {
        let squash = cue.tilt_degrees.to_radians().cos();
        let sx = cue.scale * squash;
        let sy = cue.scale;

        let outer_width = (FRAME_WIDTH + 2.0 * FRAME_PADDING) * sx;
        let outer_height = (FRAME_HEIGHT + 2.0 * SPROCKET_HEIGHT) * sy;
        let outer = Rectangle::new(center.x - outer_width * 0.5, center.y - outer_height * 0.5, outer_width, outer_height);

        d.draw_rectangle_rec(outer, with_alpha(Color::BLACK, cue.opacity));

        // Sprocket holes along both edges
        let band = SPROCKET_HEIGHT * sy;
        let hole_width = 12.0 * sx;
        let hole_height = band * 0.4;
        let mut hole_x = outer.x + 6.0 * sx;
        while hole_x + hole_width <= outer.x + outer.width {
            for band_y in [outer.y, outer.y + outer.height - band] {
                let hole = Rectangle::new(hole_x, band_y + (band - hole_height) * 0.5, hole_width, hole_height);
                d.draw_rectangle_rec(hole, with_alpha(SPROCKET_HOLE, cue.opacity));
            }
            hole_x += 24.0 * sx;
        }

        let picture = Rectangle::new(outer.x + FRAME_PADDING * sx, outer.y + band, FRAME_WIDTH * sx, FRAME_HEIGHT * sy);
        let tint = if cue.tilt_degrees == 0.0 { Color::WHITE } else { SEPIA_TINT };

        match &self.image {
            Some(image) => {
                let source = self.source_rect(image.width() as f32, image.height() as f32);
                d.draw_texture_pro(image, source, picture, Vector2::new(0.0, 0.0), 0.0, with_alpha(tint, cue.opacity));
            }
            None => {
                d.draw_rectangle_rec(picture, with_alpha(Color::DARKGRAY, cue.opacity));
                let size = (24.0 * sy) as i32;
                d.draw_text("?", (picture.x + picture.width * 0.5) as i32 - size / 4, (picture.y + picture.height * 0.5) as i32 - size / 2, size, with_alpha(Color::GRAY, cue.opacity));
            }
        }

        if cue.blur > 0.0 {
            d.draw_rectangle_rec(picture, with_alpha(Color::BLACK, cue.blur * 0.08));
        }

        let shade = with_alpha(Color::BLACK, 0.35);
        let clear = with_alpha(Color::BLACK, 0.0);
        let (left, right) = if cue.tilt_degrees > 0.0 {
            (clear, shade)
        } else if cue.tilt_degrees < 0.0 {
            (shade, clear)
        } else {
            (clear, clear)
        };
        if cue.tilt_degrees != 0.0 {
            d.draw_rectangle_gradient_h(picture.x as i32, picture.y as i32, picture.width as i32, picture.height as i32, left, right);
        }

        if show_caption && !self.caption.is_empty() {
            self.draw_caption(d, picture);
        }
    }

    fn draw_caption(&self, d: &mut RaylibDrawHandle, picture: Rectangle) {
        let text = format!("\"{}\"", self.caption);
        let mut size = 28;
        while size > 12 && measure_text(&text, size) as f32 > picture.width - 16.0 {
            size -= 2;
        }
        let width = measure_text(&text, size);

        let fade_height = picture.height * 0.5;
        d.draw_rectangle_gradient_v(
            picture.x as i32,
            (picture.y + picture.height - fade_height) as i32,
            picture.width as i32,
            fade_height as i32,
            with_alpha(Color::BLACK, 0.0),
            with_alpha(Color::BLACK, 0.9),
        );

        let x = (picture.x + picture.width * 0.5) as i32 - width / 2;
        let y = (picture.y + picture.height) as i32 - size - 12;
        d.draw_text(&text, x + 1, y + 2, size, with_alpha(Color::BLACK, 0.8));
        d.draw_text(&text, x, y, size, Color::WHITE);
    }
}
