use crate::camera::{SlideBounds, ViewportQuery};
use crate::constants::*;

/// Geometry of the horizontal filmstrip: half a viewport of lead-in on the
/// left, then one frame after another. The active frame gets wide margins,
/// the others overlap their neighbours slightly.
#[derive(Debug, Clone)]
pub struct FilmstripLayout {
    viewport_width: f32,
    slide_count: usize,
    active_index: usize,
    frame_width: f32,
}

impl FilmstripLayout {
    pub fn new(viewport_width: f32, slide_count: usize, active_index: usize) -> Self {
        Self {
            viewport_width,
            slide_count,
            active_index,
            frame_width: FRAME_WIDTH,
        }
    }

    /// Outer width of one frame, picture plus border.
    pub fn item_width(&self) -> f32 {
        self.frame_width + 2.0 * FRAME_PADDING
    }

    fn margin(&self, index: usize) -> f32 {
        if index == self.active_index { ACTIVE_MARGIN } else { INACTIVE_MARGIN }
    }
}

impl ViewportQuery for FilmstripLayout {
    fn measure(&self, index: usize) -> Option<SlideBounds> {
        if index >= self.slide_count {
            return None;
        }
        let preceding: f32 = (0..index).map(|i| self.item_width() + 2.0 * self.margin(i)).sum();
        Some(SlideBounds {
            offset: self.viewport_width / 2.0 + preceding + self.margin(index),
            width: self.item_width(),
        })
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}
