use raylib::prelude::*;

pub trait Engine {
    /// Uploads textures for the reel; false if some images could not be shown.
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;
    /// Handles input, advances to `now_ms` and draws one frame. False once the viewer closed it.
    fn render_frame(&mut self, now_ms: u64, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;
    fn close(&mut self);
}
