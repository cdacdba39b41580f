use log::warn;
use rand::rngs::ThreadRng;
use raylib::prelude::*;
use crate::audio::AudioTrack;
use crate::camera::{depth_cue, ViewportQuery};
use crate::ending;
use crate::player::Player;
use crate::reel::controls::{contains, draw_ending, Controls, EndingButtons, HoverEdge};
use crate::reel::layout::FilmstripLayout;
use crate::reel::slide::ReelSlide;
use crate::state::Phase;
use crate::texture_loader::load_texture_with_exif_rotation;

const BACKGROUND: Color = Color { r: 40, g: 8, b: 16, a: 255 };

/// Filmstrip carousel on top of a [`Player`].
pub struct ReelEngine<T: AudioTrack> {
    player: Player<T>,
    slides: Vec<ReelSlide>,
    rng: ThreadRng,

    active_shown: Option<usize>,
    decline_hover: HoverEdge,
}

impl<T: AudioTrack> ReelEngine<T> {
    pub fn new(player: Player<T>) -> Self {
        Self {
            player,
            slides: Vec::new(),
            rng: rand::rng(),
            active_shown: None,
            decline_hover: HoverEdge::default(),
        }
    }

    fn text_width(text: &str, size: i32) -> i32 {
        measure_text(text, size)
    }

    /// Ending screen input: decline dodges on hover and on click, the other
    /// buttons act on click. Nothing else on the screen reacts.
    fn handle_ending_input(&mut self, now_ms: u64, mouse: Vector2, clicked: bool, screen_width: f32, screen_height: f32) {
        let layout = |player: &Player<T>| {
            let view = ending::view(player.state());
            EndingButtons::new(screen_width, screen_height, &view, &Self::text_width)
        };

        let mut buttons = layout(&self.player);
        if self.decline_hover.entered(buttons.hits_decline(mouse)) {
            self.player.decline(&mut self.rng);
            // The button has moved; clicks this frame see it where it is now
            buttons = layout(&self.player);
        }

        if !clicked {
            return;
        }
        if buttons.hits_accept(mouse) {
            self.player.accept();
        } else if buttons.hits_decline(mouse) {
            self.player.decline(&mut self.rng);
        } else if buttons.hits_replay(mouse) {
            self.player.replay(now_ms);
        }
    }

    /// Restarts the Ken Burns zoom whenever another slide comes to the front.
    fn sync_active_slide(&mut self) {
        let state = self.player.state();
        let active = (state.phase == Phase::Playing).then_some(state.active_index);
        if active == self.active_shown {
            return;
        }
        if let Some(previous) = self.active_shown.and_then(|i| self.slides.get_mut(i)) {
            previous.deactivate();
        }
        if let Some(current) = active.and_then(|i| self.slides.get_mut(i)) {
            current.activate();
        }
        self.active_shown = active;
    }
}

impl<T: AudioTrack> crate::engine::Engine for ReelEngine<T> {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        let ken_burns_seconds = self.player.config().ken_burns_seconds;
        let mut all_loaded = true;
        let mut slides = Vec::with_capacity(self.player.slides().len());

        for slide in self.player.slides() {
            let image = match slide.local_path() {
                Some(path) => match load_texture_with_exif_rotation(rl, thread, &path) {
                    Ok(texture) => Some(texture),
                    Err(e) => {
                        warn!("Slide {}: {:#}", slide.id, e);
                        None
                    }
                },
                None => {
                    warn!("Slide {}: not a local image ({})", slide.id, slide.image_url);
                    None
                }
            };
            all_loaded &= image.is_some();
            slides.push(ReelSlide::new(image, slide.caption.clone(), ken_burns_seconds));
        }

        self.slides = slides;
        all_loaded
    }

    fn render_frame(&mut self, now_ms: u64, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        if self.player.is_closed() {
            return false;
        }

        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let mouse = rl.get_mouse_position();
        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        let slide_count = self.player.slides().len();

        // --- Input: controls first, whatever is left is a tap ---
        let controls = Controls::new(screen_width, screen_height, slide_count);
        if clicked && contains(&controls.close, mouse) {
            self.player.close();
            return false;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_M) || (clicked && contains(&controls.mute, mouse)) {
            self.player.toggle_mute();
        } else {
            match self.player.state().phase {
                Phase::Playing if clicked => match controls.dot_at(mouse) {
                    Some(index) => {
                        self.player.jump_to(index, now_ms);
                    }
                    None => {
                        self.player.tap(now_ms, mouse.x, screen_width);
                    }
                },
                Phase::Playing => {}
                Phase::Ended => self.handle_ending_input(now_ms, mouse, clicked, screen_width, screen_height),
            }
        }

        // --- Update ---
        if self.player.state().phase == Phase::Playing {
            self.decline_hover.reset();
        }
        self.player.tick(now_ms);
        let state = self.player.state().clone();
        let layout = FilmstripLayout::new(screen_width, slide_count, state.active_index);
        let scroll = self.player.follow(now_ms, &layout);

        self.sync_active_slide();
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }

        // --- Draw ---
        let time = rl.get_time() as f32;
        let mut d = rl.begin_drawing(thread);
        d.clear_background(BACKGROUND);

        match state.phase {
            Phase::Playing => {
                let mut order: Vec<usize> = (0..slide_count).collect();
                order.sort_by_key(|&i| depth_cue(i, state.active_index).z_order);

                for i in order {
                    let (Some(bounds), Some(slide)) = (layout.measure(i), self.slides.get(i)) else {
                        continue;
                    };
                    let center_x = bounds.offset + bounds.width * 0.5 - scroll;
                    // Skip frames well outside the window
                    if center_x < -bounds.width * 2.0 || center_x > screen_width + bounds.width * 2.0 {
                        continue;
                    }
                    let cue = depth_cue(i, state.active_index);
                    slide.draw(&mut d, Vector2::new(center_x, screen_height * 0.45), &cue, i == state.active_index);
                }

                controls.draw_status(&mut d, screen_width, screen_height, &state);
                controls.draw_dots(&mut d, &state);
            }
            Phase::Ended => {
                let view = ending::view(&state);
                let buttons = EndingButtons::new(screen_width, screen_height, &view, &Self::text_width);
                draw_ending(&mut d, screen_width, screen_height, &view, &buttons, time);
            }
        }

        controls.draw_buttons(&mut d, state.is_muted);
        true
    }

    fn close(&mut self) {
        self.player.close();
    }
}
