pub const RENDER_WIDTH: i32 = 1280;           // Default window width
pub const RENDER_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const AUTOPLAY_INTERVAL_MS: u64 = 6000;   // Time each slide stays active before autoplay advances
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;    // Two taps closer than this are a double tap
pub const SCROLL_DURATION_MS: u64 = 1000;     // Camera re-centering animation
pub const SETTLE_DELAY_MS: u64 = 100;         // Wait before the first (instant) centering on slide 0

pub const DODGE_RANGE_PX: f32 = 25.0;         // Decline button jumps within +/- this on both axes
pub const MUSIC_VOLUME: f32 = 0.5;
pub const KEN_BURNS_DURATION: f32 = 15.0;     // Seconds
pub const KEN_BURNS_ZOOM: f32 = 1.15;

// Filmstrip geometry (pixels)
pub const FRAME_WIDTH: f32 = 320.0;
pub const FRAME_HEIGHT: f32 = 240.0;
pub const FRAME_PADDING: f32 = 16.0;          // Black border left/right of the picture
pub const ACTIVE_MARGIN: f32 = 48.0;
pub const INACTIVE_MARGIN: f32 = -10.0;       // Neighbouring frames overlap slightly
pub const SPROCKET_HEIGHT: f32 = 30.0;
