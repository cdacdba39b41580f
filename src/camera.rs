use log::debug;
use crate::timeline::Countdown;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideBounds {
    pub offset: f32, // Left edge, in track coordinates
    pub width: f32,
}

/// Layout geometry the animator needs, supplied by whoever renders.
pub trait ViewportQuery {
    /// `None` while the slide has no layout yet.
    fn measure(&self, index: usize) -> Option<SlideBounds>;
    fn viewport_width(&self) -> f32;
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Scroll offset that puts the middle of slide `index` in the middle of the viewport.
pub fn center_target(viewport: &dyn ViewportQuery, index: usize) -> Option<f32> {
    let bounds = viewport.measure(index)?;
    let width = viewport.viewport_width();
    if width <= 0.0 || bounds.width <= 0.0 {
        return None;
    }
    Some((bounds.offset + bounds.width / 2.0 - width / 2.0).max(0.0))
}

#[derive(Debug, Clone, Copy)]
struct ScrollTween {
    from: f32,
    to: f32,
    start_ms: u64,
    duration_ms: u64,
}

impl ScrollTween {
    fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64) -> Self {
        Self { from, to, start_ms, duration_ms: duration_ms.max(1) }
    }

    fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }
}

/// Keeps the active slide centered by easing the track's scroll offset.
///
/// A new target always starts from wherever the offset currently is and
/// replaces the tween in flight. Once the duration has elapsed the offset
/// snaps exactly onto the target.
pub struct CameraAnimator {
    offset: f32,
    tween: Option<ScrollTween>,
    settle: Countdown,
    duration_ms: u64,
    settle_ms: u64,
}

impl CameraAnimator {
    pub fn new(duration_ms: u64, settle_ms: u64) -> Self {
        Self {
            offset: 0.0,
            tween: None,
            settle: Countdown::default(),
            duration_ms,
            settle_ms,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Instant centering on slide 0 once the layout had time to settle.
    pub fn schedule_initial_centering(&mut self, now_ms: u64) {
        self.tween = None;
        self.settle.arm(now_ms, self.settle_ms);
    }

    /// Starts easing towards slide `index`. Does nothing when the slide has
    /// no layout yet.
    pub fn center_on(&mut self, index: usize, now_ms: u64, viewport: &dyn ViewportQuery) -> bool {
        let Some(target) = center_target(viewport, index) else {
            debug!("No layout for slide {}, skipping camera move", index);
            return false;
        };
        debug!("Camera {:.1} -> {:.1} (slide {})", self.offset, target, index);
        self.tween = Some(ScrollTween::new(self.offset, target, now_ms, self.duration_ms));
        true
    }

    /// Advances the camera to `now_ms` and returns the scroll offset to draw with.
    pub fn update(&mut self, now_ms: u64, viewport: &dyn ViewportQuery) -> f32 {
        if self.settle.poll(now_ms) {
            if let Some(target) = center_target(viewport, 0) {
                self.tween = None;
                self.offset = target;
            }
        }

        if let Some(tween) = self.tween {
            if tween.is_done(now_ms) {
                self.offset = tween.to;
                self.tween = None;
            } else {
                self.offset = tween.sample(now_ms);
            }
        }

        self.offset
    }

    pub fn stop(&mut self) {
        self.tween = None;
        self.settle.cancel();
    }
}

/// How a slide at some distance from the active one is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthCue {
    pub scale: f32,
    pub opacity: f32,
    pub blur: f32,          // Pixels
    pub z_order: i32,       // Higher draws on top
    pub tilt_degrees: f32,  // Rotation around the vertical axis; positive for slides before the active one
}

pub fn depth_cue(index: usize, active_index: usize) -> DepthCue {
    let distance = index.abs_diff(active_index);
    let tilt_degrees = if index < active_index {
        25.0
    } else if index > active_index {
        -25.0
    } else {
        0.0
    };

    match distance {
        0 => DepthCue { scale: 1.5, opacity: 1.0, blur: 0.0, z_order: 50, tilt_degrees },
        1 => DepthCue { scale: 0.95, opacity: 0.8, blur: 1.0, z_order: 30, tilt_degrees },
        _ => DepthCue { scale: 0.75, opacity: 0.5, blur: 3.0, z_order: 20, tilt_degrees },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStrip {
        widths: Vec<f32>,
        viewport: f32,
    }

    impl ViewportQuery for FixedStrip {
        fn measure(&self, index: usize) -> Option<SlideBounds> {
            let width = *self.widths.get(index)?;
            let offset = self.viewport / 2.0 + self.widths[..index].iter().sum::<f32>();
            Some(SlideBounds { offset, width })
        }

        fn viewport_width(&self) -> f32 {
            self.viewport
        }
    }

    fn strip() -> FixedStrip {
        FixedStrip { widths: vec![200.0; 5], viewport: 800.0 }
    }

    #[test]
    fn easing_curve_shape() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-6);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-6);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(3.0), 1.0);
    }

    #[test]
    fn target_centers_the_slide() {
        // slide 2: left edge 400 + 400 = 800, middle 900, minus half viewport 400
        assert_eq!(center_target(&strip(), 2), Some(500.0));
        assert_eq!(center_target(&strip(), 9), None);
    }

    #[test]
    fn animation_eases_then_snaps() {
        let viewport = strip();
        let mut camera = CameraAnimator::new(1000, 100);
        assert!(camera.center_on(1, 0, &viewport));
        let target = center_target(&viewport, 1).unwrap();

        let halfway = camera.update(500, &viewport);
        assert!((halfway - target / 2.0).abs() < 1e-3);
        assert!(camera.is_animating());

        assert_eq!(camera.update(1000, &viewport), target);
        assert!(!camera.is_animating());
    }

    #[test]
    fn new_target_supersedes_the_one_in_flight() {
        let viewport = strip();
        let mut camera = CameraAnimator::new(1000, 100);
        camera.center_on(3, 0, &viewport);
        let mid = camera.update(400, &viewport);

        camera.center_on(1, 400, &viewport);
        assert_eq!(camera.update(400, &viewport), mid);
        assert_eq!(camera.update(1400, &viewport), center_target(&viewport, 1).unwrap());
    }

    #[test]
    fn missing_layout_is_a_no_op() {
        let empty = FixedStrip { widths: vec![], viewport: 800.0 };
        let mut camera = CameraAnimator::new(1000, 100);
        assert!(!camera.center_on(0, 0, &empty));
        assert_eq!(camera.update(2000, &empty), 0.0);
    }

    #[test]
    fn initial_centering_is_instant_after_settle_delay() {
        let viewport = strip();
        let mut camera = CameraAnimator::new(1000, 100);
        camera.schedule_initial_centering(0);
        assert_eq!(camera.update(99, &viewport), 0.0);
        assert_eq!(camera.update(100, &viewport), center_target(&viewport, 0).unwrap());
        assert!(!camera.is_animating());
    }

    #[test]
    fn depth_tiers_and_tilt_direction() {
        let active = depth_cue(4, 4);
        assert_eq!(active.scale, 1.5);
        assert_eq!(active.blur, 0.0);
        assert_eq!(active.tilt_degrees, 0.0);

        let before = depth_cue(3, 4);
        let after = depth_cue(5, 4);
        assert_eq!(before.opacity, after.opacity);
        assert!(before.tilt_degrees > 0.0);
        assert!(after.tilt_degrees < 0.0);
        assert!(before.z_order < active.z_order);

        let far_before = depth_cue(0, 4);
        let far_after = depth_cue(40, 4);
        assert_eq!(far_before.scale, far_after.scale);
        assert_eq!(far_before.blur, far_after.blur);
        assert_eq!(far_before.z_order, far_after.z_order);
        assert_eq!(far_before.tilt_degrees, -far_after.tilt_degrees);
        assert!(far_before.blur > before.blur);
        assert!(far_before.scale < before.scale);
    }
}
