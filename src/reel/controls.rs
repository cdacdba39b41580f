use raylib::prelude::*;
use crate::ending::{EndingView, ACCEPT_LABEL, REPLAY_LABEL};
use crate::reel::slide::with_alpha;
use crate::state::PlaybackState;

const DOT_SIZE: f32 = 8.0;
const ACTIVE_DOT_SIZE: f32 = 12.0;
const DOT_GAP: f32 = 8.0;
const DOT_HIT: f32 = 16.0;
const ROSE: Color = Color { r: 244, g: 63, b: 94, a: 255 };
const STONE: Color = Color { r: 168, g: 162, b: 158, a: 255 };
const HEART_RED: Color = Color { r: 220, g: 38, b: 38, a: 255 };
const PINK: Color = Color { r: 236, g: 72, b: 153, a: 255 };
const ACCEPT_GREEN: Color = Color { r: 22, g: 163, b: 74, a: 255 };

pub fn contains(rec: &Rectangle, point: Vector2) -> bool {
    point.x >= rec.x && point.x <= rec.x + rec.width && point.y >= rec.y && point.y <= rec.y + rec.height
}

/// Width in pixels of `text` at `size`, supplied by the renderer.
pub type TextWidth<'a> = &'a dyn Fn(&str, i32) -> i32;

/// Buttons that sit on top of the carousel and never count as taps.
pub struct Controls {
    pub close: Rectangle,
    pub mute: Rectangle,
    dots: Vec<Rectangle>,
    dots_y: f32,
}

impl Controls {
    pub fn new(screen_width: f32, screen_height: f32, slide_count: usize) -> Self {
        let close = Rectangle::new(screen_width - 56.0, 16.0, 40.0, 40.0);
        let mute = Rectangle::new(screen_width - 104.0, 16.0, 40.0, 40.0);

        let stride = DOT_HIT + DOT_GAP;
        let total = slide_count as f32 * stride - DOT_GAP;
        let start_x = (screen_width - total) * 0.5;
        let dots_y = screen_height - 80.0;
        let dots = (0..slide_count)
            .map(|i| Rectangle::new(start_x + i as f32 * stride, dots_y - DOT_HIT * 0.5, DOT_HIT, DOT_HIT))
            .collect();

        Self { close, mute, dots, dots_y }
    }

    pub fn dot_at(&self, point: Vector2) -> Option<usize> {
        self.dots.iter().position(|dot| contains(dot, point))
    }

    pub fn draw_buttons(&self, d: &mut RaylibDrawHandle, muted: bool) {
        let cx = (self.close.x + self.close.width * 0.5) as i32;
        let cy = (self.close.y + self.close.height * 0.5) as i32;
        let arm = 12.0;
        d.draw_line_ex(Vector2::new(cx as f32 - arm, cy as f32 - arm), Vector2::new(cx as f32 + arm, cy as f32 + arm), 3.0, STONE);
        d.draw_line_ex(Vector2::new(cx as f32 - arm, cy as f32 + arm), Vector2::new(cx as f32 + arm, cy as f32 - arm), 3.0, STONE);

        // Speaker: box plus cone, crossed out when muted
        let mx = self.mute.x + 8.0;
        let my = self.mute.y + self.mute.height * 0.5;
        d.draw_rectangle_rec(Rectangle::new(mx, my - 5.0, 8.0, 10.0), STONE);
        d.draw_triangle(
            Vector2::new(mx + 8.0, my - 5.0),
            Vector2::new(mx + 8.0, my + 5.0),
            Vector2::new(mx + 18.0, my + 12.0),
            STONE,
        );
        d.draw_triangle(
            Vector2::new(mx + 8.0, my - 5.0),
            Vector2::new(mx + 18.0, my + 12.0),
            Vector2::new(mx + 18.0, my - 12.0),
            STONE,
        );
        if muted {
            d.draw_line_ex(Vector2::new(mx, my + 12.0), Vector2::new(mx + 24.0, my - 12.0), 3.0, ROSE);
        }
    }

    pub fn draw_dots(&self, d: &mut RaylibDrawHandle, state: &PlaybackState) {
        for (i, dot) in self.dots.iter().enumerate() {
            let center = Vector2::new(dot.x + dot.width * 0.5, self.dots_y);
            let (radius, color) = if i == state.active_index {
                (ACTIVE_DOT_SIZE * 0.5, Color::WHITE)
            } else if i < state.active_index {
                (DOT_SIZE * 0.5, with_alpha(ROSE, 0.8))
            } else {
                (DOT_SIZE * 0.5, with_alpha(Color::WHITE, 0.3))
            };
            d.draw_circle_v(center, radius, color);
        }
    }

    pub fn draw_status(&self, d: &mut RaylibDrawHandle, screen_width: f32, screen_height: f32, state: &PlaybackState) {
        let text = if state.is_paused { "Paused" } else { "Running... Tap screen to Pause" };
        let size = 18;
        let x = (screen_width * 0.5) as i32 - measure_text(text, size) / 2;
        d.draw_text(text, x, (screen_height - 48.0) as i32, size, STONE);
    }
}

/// Hit areas of the ending screen. Accept and decline only exist while the
/// question is still open; the decline button carries its dodge offset.
#[derive(Clone)]
pub struct EndingButtons {
    pub accept: Option<Rectangle>,
    pub decline: Option<Rectangle>,
    pub replay: Rectangle,
}

const BUTTON_ROW_GAP: f32 = 24.0;

impl EndingButtons {
    pub fn new(screen_width: f32, screen_height: f32, view: &EndingView, text_width: TextWidth) -> Self {
        let row_y = screen_height * 0.78;
        let replay_size = Vector2::new(text_width(REPLAY_LABEL, 20) as f32 + 48.0, 44.0);

        if !view.show_choices {
            let replay = Rectangle::new((screen_width - replay_size.x) * 0.5, row_y, replay_size.x, replay_size.y);
            return Self { accept: None, decline: None, replay };
        }

        let accept_size = Vector2::new(text_width(ACCEPT_LABEL, 28) as f32 + 96.0, 60.0);
        let decline_size = Vector2::new(text_width(view.decline_label, 20) as f32 + 48.0, 44.0);
        let total = accept_size.x + decline_size.x + replay_size.x + 2.0 * BUTTON_ROW_GAP;

        let mut x = (screen_width - total) * 0.5;
        let accept = Rectangle::new(x, row_y - 8.0, accept_size.x, accept_size.y);
        x += accept_size.x + BUTTON_ROW_GAP;
        let (dx, dy) = view.decline_offset;
        let decline = Rectangle::new(x + dx, row_y + dy, decline_size.x, decline_size.y);
        x += decline_size.x + BUTTON_ROW_GAP;
        let replay = Rectangle::new(x, row_y, replay_size.x, replay_size.y);

        Self { accept: Some(accept), decline: Some(decline), replay }
    }

    pub fn hits_accept(&self, point: Vector2) -> bool {
        self.accept.is_some_and(|rec| contains(&rec, point))
    }

    pub fn hits_decline(&self, point: Vector2) -> bool {
        self.decline.is_some_and(|rec| contains(&rec, point))
    }

    pub fn hits_replay(&self, point: Vector2) -> bool {
        contains(&self.replay, point)
    }
}

/// Detects the pointer moving onto a button. The first frame after a reset
/// only records where the pointer is, so a button that appears under it
/// does not count as entered.
#[derive(Debug, Default)]
pub struct HoverEdge {
    over: Option<bool>,
}

impl HoverEdge {
    pub fn entered(&mut self, over: bool) -> bool {
        let entered = over && self.over == Some(false);
        self.over = Some(over);
        entered
    }

    pub fn reset(&mut self) {
        self.over = None;
    }
}

fn draw_heart(d: &mut RaylibDrawHandle, center: Vector2, size: f32, color: Color) {
    let r = size * 0.3;
    d.draw_circle_v(Vector2::new(center.x - r * 0.9, center.y - r * 0.3), r, color);
    d.draw_circle_v(Vector2::new(center.x + r * 0.9, center.y - r * 0.3), r, color);
    d.draw_triangle(
        Vector2::new(center.x - r * 1.85, center.y),
        Vector2::new(center.x, center.y + size * 0.6),
        Vector2::new(center.x + r * 1.85, center.y),
        color,
    );
}

fn draw_centered(d: &mut RaylibDrawHandle, text: &str, center_x: f32, y: f32, size: i32, color: Color) {
    let x = center_x as i32 - measure_text(text, size) / 2;
    d.draw_text(text, x, y as i32, size, color);
}

fn draw_button(d: &mut RaylibDrawHandle, rec: Rectangle, label: &str, size: i32, fill: Color, text: Color) {
    d.draw_rectangle_rounded(rec, 1.0, 16, fill);
    let x = (rec.x + rec.width * 0.5) as i32 - measure_text(label, size) / 2;
    let y = (rec.y + rec.height * 0.5) as i32 - size / 2;
    d.draw_text(label, x, y, size, text);
}

pub fn draw_ending(d: &mut RaylibDrawHandle, screen_width: f32, screen_height: f32, view: &EndingView, buttons: &EndingButtons, time: f32) {
    d.draw_rectangle(0, 0, screen_width as i32, screen_height as i32, with_alpha(Color::BLACK, 0.8));

    let center_x = screen_width * 0.5;
    // Two quick beats every 1.5 seconds
    let phase = (time % 1.5) / 1.5;
    let beat = if phase < 0.14 || (0.28..0.42).contains(&phase) { 1.3 } else { 1.0 };
    let heart_color = if view.accepted { PINK } else { HEART_RED };
    draw_heart(d, Vector2::new(center_x, screen_height * 0.2), 120.0 * beat, heart_color);

    let heading_color = if view.accepted { PINK } else { Color::RED };
    draw_centered(d, view.heading, center_x, screen_height * 0.38, 56, heading_color);
    let mut y = screen_height * 0.38 + 80.0;
    for line in view.lines {
        draw_centered(d, line, center_x, y, 26, Color::LIGHTGRAY);
        y += 40.0;
    }

    if let Some(accept) = buttons.accept {
        draw_button(d, accept, ACCEPT_LABEL, 28, ACCEPT_GREEN, Color::WHITE);
    }
    if let Some(decline) = buttons.decline {
        draw_button(d, decline, view.decline_label, 20, with_alpha(Color::DARKGRAY, 0.5), STONE);
    }
    d.draw_rectangle_lines_ex(buttons.replay, 2.0, STONE);
    draw_button(d, buttons.replay, REPLAY_LABEL, 20, with_alpha(Color::BLACK, 0.0), STONE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ending::view;
    use crate::state::{Phase, ProposalChoice};

    fn fake_width(text: &str, size: i32) -> i32 {
        text.len() as i32 * size / 2
    }

    #[test]
    fn dots_are_centered_and_hittable() {
        let controls = Controls::new(800.0, 600.0, 3);
        let middle = Vector2::new(400.0, 520.0);
        assert_eq!(controls.dot_at(middle), Some(1));
        assert_eq!(controls.dot_at(Vector2::new(400.0, 300.0)), None);
        assert!(contains(&controls.close, Vector2::new(780.0, 30.0)));
    }

    #[test]
    fn ending_buttons_follow_the_choice() {
        let mut state = PlaybackState::default();
        state.phase = Phase::Ended;
        state.decline_nudges = 1;
        state.decline_offset = (10.0, -5.0);

        let open = EndingButtons::new(1200.0, 800.0, &view(&state), &fake_width);
        let still = {
            let mut moved = state.clone();
            moved.decline_offset = (0.0, 0.0);
            EndingButtons::new(1200.0, 800.0, &view(&moved), &fake_width)
        };
        let (a, b) = (open.decline.unwrap(), still.decline.unwrap());
        assert_eq!((a.x - b.x, a.y - b.y), (10.0, -5.0));
        assert!(open.hits_accept(Vector2::new(open.accept.unwrap().x + 1.0, open.accept.unwrap().y + 1.0)));

        state.proposal_choice = ProposalChoice::Accepted;
        let done = EndingButtons::new(1200.0, 800.0, &view(&state), &fake_width);
        assert!(done.accept.is_none());
        assert!(done.decline.is_none());
        assert!(!done.hits_decline(Vector2::new(a.x + 1.0, a.y + 1.0)));
        assert!(done.hits_replay(Vector2::new(600.0, 800.0 * 0.78 + 10.0)));
    }

    #[test]
    fn hover_edge_ignores_a_button_appearing_under_the_pointer() {
        let mut hover = HoverEdge::default();
        assert!(!hover.entered(true));
        assert!(!hover.entered(true));
        assert!(!hover.entered(false));
        assert!(hover.entered(true));
        assert!(!hover.entered(true));

        hover.reset();
        assert!(!hover.entered(true));
    }
}
