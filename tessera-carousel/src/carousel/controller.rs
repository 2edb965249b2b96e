//! State machine driving the carousel: scroll offsets, the auto-advance
//! timer, and gesture arbitration.
use std::time::{Duration, Instant};

use thiserror::Error;

/// Default delay between automatic advances.
pub const DEFAULT_AUTO_SCROLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Errors produced when validating carousel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarouselConfigError {
    /// The auto-scroll interval was zero.
    #[error("auto-scroll interval must be greater than zero")]
    ZeroAutoScrollInterval,
}

/// Behavioral options for a carousel, validated at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    /// Delay between automatic advances.
    pub auto_scroll_interval: Duration,
    /// Whether hovering the viewport suspends the auto-advance timer.
    pub pause_on_hover: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_scroll_interval: DEFAULT_AUTO_SCROLL_INTERVAL,
            pause_on_hover: true,
        }
    }
}

impl CarouselOptions {
    /// Checks the options for invalid values.
    pub fn validate(&self) -> Result<(), CarouselConfigError> {
        if self.auto_scroll_interval.is_zero() {
            return Err(CarouselConfigError::ZeroAutoScrollInterval);
        }
        Ok(())
    }
}

/// Direction for the manual step controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Scroll one viewport width toward the start.
    Previous,
    /// Scroll one viewport width toward the end.
    Next,
}

/// The manual gesture currently in progress, if any. At most one gesture is
/// active at a time; starting one suspends the auto-advance timer.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    /// Incremental drag over the viewport content.
    Content { last_x: f32 },
    /// Anchor-relative drag of the scrollbar thumb.
    Thumb { grab_x: f32, thumb_start: f32 },
}

/// Holds the state for a `carousel` component.
///
/// It tracks the current and target scroll offsets, the auto-advance timer
/// deadline, and the gesture in progress. The scroll offset is smoothly
/// interpolated toward the target over time; thumb drags and the end-of-track
/// wrap bypass the interpolation and jump directly.
#[derive(Clone, PartialEq)]
pub struct CarouselController {
    auto_scroll_interval: Duration,
    pause_on_hover: bool,
    /// User intent from the pause/play toggle. Distinct from whether the
    /// timer is currently armed; gestures and hover suspend the timer
    /// without flipping this.
    auto_scroll_enabled: bool,
    hovered: bool,
    gesture: Option<Gesture>,
    /// When the next automatic advance fires. `None` while suspended.
    next_tick_deadline: Option<Instant>,
    /// The current offset of the content (for rendering).
    scroll_offset: f32,
    /// The offset the smooth scroll animation is heading toward.
    target_offset: f32,
    viewport_width: f32,
    content_width: f32,
    /// Last frame time for delta time calculation.
    last_frame_nanos: Option<u64>,
}

impl CarouselController {
    /// Creates a controller from validated options.
    pub fn new(options: CarouselOptions) -> Result<Self, CarouselConfigError> {
        options.validate()?;
        Ok(Self {
            auto_scroll_interval: options.auto_scroll_interval,
            pause_on_hover: options.pause_on_hover,
            auto_scroll_enabled: true,
            hovered: false,
            gesture: None,
            next_tick_deadline: None,
            scroll_offset: 0.0,
            target_offset: 0.0,
            viewport_width: 0.0,
            content_width: 0.0,
            last_frame_nanos: None,
        })
    }

    /// Returns the current scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Returns the viewport width from the last layout pass.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Returns the content width from the last layout pass.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Maximum scrollable offset; zero when the content fits the viewport.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Whether the content overflows the viewport at all.
    pub fn has_overflow(&self) -> bool {
        self.max_scroll_offset() > 0.0
    }

    /// Whether auto-scroll is enabled by the pause/play toggle.
    pub fn is_auto_scroll_enabled(&self) -> bool {
        self.auto_scroll_enabled
    }

    /// Whether the auto-advance timer is currently armed.
    pub fn is_auto_scroll_running(&self) -> bool {
        self.next_tick_deadline.is_some()
    }

    /// Whether any manual gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether a content drag is in progress.
    pub fn is_dragging_content(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Content { .. }))
    }

    /// Whether a thumb drag is in progress.
    pub fn is_dragging_thumb(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Thumb { .. }))
    }

    /// Records the measured viewport and content widths, clamping the
    /// offsets into the new scrollable range.
    pub fn update_layout(&mut self, viewport_width: f32, content_width: f32) {
        self.viewport_width = viewport_width.max(0.0);
        self.content_width = content_width.max(0.0);
        self.scroll_offset = self.clamp_offset(self.scroll_offset);
        self.target_offset = self.clamp_offset(self.target_offset);
    }

    /// Drives the auto-advance timer. Arms it lazily when it should run,
    /// and advances by one viewport width whenever the deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if !self.timer_should_run() {
            self.next_tick_deadline = None;
            return;
        }
        let Some(deadline) = self.next_tick_deadline else {
            self.next_tick_deadline = Some(now + self.auto_scroll_interval);
            return;
        };
        if now < deadline {
            return;
        }
        self.advance();
        self.next_tick_deadline = Some(now + self.auto_scroll_interval);
    }

    /// Flips the pause/play state, stopping or restarting the timer.
    pub fn toggle_auto_scroll(&mut self, now: Instant) {
        self.auto_scroll_enabled = !self.auto_scroll_enabled;
        if self.auto_scroll_enabled {
            self.restart_auto_scroll(now);
        } else {
            self.stop_auto_scroll();
        }
    }

    /// Updates the hover state, suspending or resuming the timer when
    /// `pause_on_hover` is in effect.
    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        if !self.pause_on_hover {
            return;
        }
        if hovered {
            self.stop_auto_scroll();
        } else {
            self.restart_auto_scroll(now);
        }
    }

    /// Scrolls one viewport width in the given direction, clamped at both
    /// ends. Stops the timer for the duration of the request and restarts
    /// it with a fresh interval. No-op when the content fits the viewport.
    pub fn step(&mut self, direction: StepDirection, now: Instant) {
        if !self.has_overflow() {
            return;
        }
        self.stop_auto_scroll();
        let delta = match direction {
            StepDirection::Previous => -self.viewport_width,
            StepDirection::Next => self.viewport_width,
        };
        self.scroll_by(delta);
        self.restart_auto_scroll(now);
    }

    /// Begins an incremental content drag at the given cursor x.
    pub fn begin_content_drag(&mut self, x: f32) {
        self.gesture = Some(Gesture::Content { last_x: x });
        self.stop_auto_scroll();
    }

    /// Applies the cursor movement since the last recorded position as a
    /// smooth scroll in the opposite direction.
    pub fn update_content_drag(&mut self, x: f32) {
        let Some(Gesture::Content { last_x }) = &mut self.gesture else {
            return;
        };
        let delta = x - *last_x;
        *last_x = x;
        self.scroll_by(-delta);
    }

    /// Begins a thumb drag, recording the grab point and the thumb's
    /// current offset within the track.
    pub fn begin_thumb_drag(&mut self, grab_x: f32, thumb_start: f32) {
        self.gesture = Some(Gesture::Thumb { grab_x, thumb_start });
        self.stop_auto_scroll();
    }

    /// Maps the dragged thumb position onto the content offset and applies
    /// it as a direct jump. `thumb_range` is the track width minus the
    /// thumb width; a non-positive range disables the mapping.
    pub fn update_thumb_drag(&mut self, cursor_x: f32, thumb_range: f32) {
        let Some(Gesture::Thumb { grab_x, thumb_start }) = self.gesture else {
            return;
        };
        if thumb_range <= 0.0 {
            return;
        }
        let bounded = (thumb_start + (cursor_x - grab_x)).clamp(0.0, thumb_range);
        self.set_scroll_progress(bounded / thumb_range);
    }

    /// Ends the gesture in progress and restarts the timer, but only when
    /// auto-scroll is still enabled.
    pub fn end_gesture(&mut self, now: Instant) {
        if self.gesture.take().is_some() {
            self.restart_auto_scroll(now);
        }
    }

    /// Current scroll position as a fraction of the scrollable range.
    pub fn scroll_progress(&self) -> f32 {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (self.scroll_offset / max).clamp(0.0, 1.0)
    }

    /// Jumps to the given fraction of the scrollable range without
    /// animation. No-op when the content fits the viewport.
    pub fn set_scroll_progress(&mut self, progress: f32) {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return;
        }
        self.jump_to(progress.clamp(0.0, 1.0) * max);
    }

    /// Whether the smooth scroll animation still has work to do.
    pub(crate) fn has_pending_animation(&self) -> bool {
        self.scroll_offset != self.target_offset
    }

    /// Updates the scroll offset based on time-based interpolation.
    /// Returns true if the offset changed (needs redraw).
    pub(crate) fn update_scroll_offset(&mut self, frame_nanos: u64, smoothing: f32) -> bool {
        let delta_time = if let Some(last_frame_nanos) = self.last_frame_nanos {
            frame_nanos.saturating_sub(last_frame_nanos) as f32 / 1_000_000_000.0
        } else {
            0.016 // Assume 60fps for first frame
        };
        self.last_frame_nanos = Some(frame_nanos);

        let diff = self.target_offset - self.scroll_offset;
        if diff.abs() < 0.5 {
            if self.scroll_offset != self.target_offset {
                self.scroll_offset = self.target_offset;
                return true;
            }
            return false;
        }

        let mut movement_factor = (1.0 - smoothing) * delta_time * 60.0;
        if movement_factor > 1.0 {
            movement_factor = 1.0;
        }

        self.scroll_offset += diff * movement_factor;
        true
    }

    fn timer_should_run(&self) -> bool {
        self.auto_scroll_enabled
            && self.gesture.is_none()
            && !(self.pause_on_hover && self.hovered)
    }

    fn stop_auto_scroll(&mut self) {
        self.next_tick_deadline = None;
    }

    fn restart_auto_scroll(&mut self, now: Instant) {
        if self.timer_should_run() {
            self.next_tick_deadline = Some(now + self.auto_scroll_interval);
        }
    }

    /// One automatic advance: wrap to the start when the next viewport
    /// would reach or pass the end, otherwise smooth-scroll forward. The
    /// wrap test uses the target offset so that overlapping requests
    /// resolve to the last one.
    fn advance(&mut self) {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return;
        }
        if self.target_offset + self.viewport_width >= max {
            tracing::debug!("carousel wrapped back to start");
            self.jump_to(0.0);
        } else {
            self.scroll_by(self.viewport_width);
        }
    }

    fn scroll_by(&mut self, delta: f32) {
        self.target_offset = self.clamp_offset(self.target_offset + delta);
    }

    fn jump_to(&mut self, offset: f32) {
        let offset = self.clamp_offset(offset);
        self.scroll_offset = offset;
        self.target_offset = offset;
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset())
    }
}

impl Default for CarouselController {
    fn default() -> Self {
        Self {
            auto_scroll_interval: DEFAULT_AUTO_SCROLL_INTERVAL,
            pause_on_hover: true,
            auto_scroll_enabled: true,
            hovered: false,
            gesture: None,
            next_tick_deadline: None,
            scroll_offset: 0.0,
            target_offset: 0.0,
            viewport_width: 0.0,
            content_width: 0.0,
            last_frame_nanos: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(2000);

    fn controller() -> CarouselController {
        let mut c = CarouselController::new(CarouselOptions::default()).expect("valid options");
        c.update_layout(300.0, 900.0);
        c
    }

    fn target_of(c: &CarouselController) -> f32 {
        // Drive the animation to completion so the rendered offset equals
        // the requested destination.
        let mut c = c.clone();
        let mut nanos = 0u64;
        for _ in 0..1000 {
            nanos += 16_000_000;
            if !c.update_scroll_offset(nanos, 0.05) && !c.has_pending_animation() {
                break;
            }
        }
        c.scroll_offset()
    }

    #[test]
    fn zero_interval_is_rejected() {
        let options = CarouselOptions {
            auto_scroll_interval: Duration::ZERO,
            pause_on_hover: true,
        };
        assert_eq!(
            options.validate(),
            Err(CarouselConfigError::ZeroAutoScrollInterval)
        );
        assert!(CarouselController::new(options).is_err());
    }

    #[test]
    fn tick_advances_by_one_viewport() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0); // arms the timer
        assert!(c.is_auto_scroll_running());
        c.tick(t0 + INTERVAL);
        assert_eq!(target_of(&c), 300.0);
    }

    #[test]
    fn tick_before_deadline_does_not_advance() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);
        c.tick(t0 + INTERVAL - Duration::from_millis(1));
        assert_eq!(target_of(&c), 0.0);
    }

    #[test]
    fn tick_wraps_to_exact_start_at_end() {
        let mut c = controller();
        let t0 = Instant::now();
        c.step(StepDirection::Next, t0); // target 300
        c.step(StepDirection::Next, t0); // target 600 == max
        let t1 = t0 + INTERVAL;
        c.tick(t1);
        // Wrap is a jump: both offsets land on zero immediately, not
        // clamped to max and not animated.
        assert_eq!(c.scroll_offset(), 0.0);
        assert!(!c.has_pending_animation());
    }

    #[test]
    fn successive_ticks_cycle_through_wrap() {
        // viewport 300, content 900: targets 300, 0 (wrap), 300.
        let mut c = controller();
        let mut now = Instant::now();
        c.tick(now);
        now += INTERVAL;
        c.tick(now);
        assert_eq!(target_of(&c), 300.0);
        now += INTERVAL;
        c.tick(now);
        assert_eq!(c.scroll_offset(), 0.0);
        now += INTERVAL;
        c.tick(now);
        assert_eq!(target_of(&c), 300.0);
    }

    #[test]
    fn no_overflow_means_no_motion() {
        let mut c = CarouselController::new(CarouselOptions::default()).expect("valid options");
        c.update_layout(300.0, 200.0);
        let t0 = Instant::now();
        c.tick(t0);
        c.tick(t0 + INTERVAL);
        assert_eq!(c.scroll_offset(), 0.0);
        assert!(!c.has_pending_animation());

        c.step(StepDirection::Next, t0);
        assert!(!c.has_pending_animation());

        c.set_scroll_progress(1.0);
        assert_eq!(c.scroll_offset(), 0.0);
    }

    #[test]
    fn step_clamps_at_both_ends() {
        let mut c = controller();
        let t0 = Instant::now();
        c.step(StepDirection::Previous, t0);
        assert_eq!(target_of(&c), 0.0);
        c.step(StepDirection::Next, t0);
        c.step(StepDirection::Next, t0);
        c.step(StepDirection::Next, t0); // would pass max, clamps
        assert_eq!(target_of(&c), 600.0);
    }

    #[test]
    fn step_restarts_the_timer_with_a_fresh_interval() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);
        let t1 = t0 + Duration::from_millis(1500);
        c.step(StepDirection::Next, t1);
        // The old deadline at t0 + 2s must not fire.
        c.tick(t0 + INTERVAL);
        assert_eq!(target_of(&c), 300.0);
        // The fresh one at t1 + 2s does; advancing from 300 reaches the
        // end and wraps.
        c.tick(t1 + INTERVAL);
        assert_eq!(c.scroll_offset(), 0.0);
        assert!(c.is_auto_scroll_running());
    }

    #[test]
    fn gesture_suspends_timer_and_release_restarts_it() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);
        assert!(c.is_auto_scroll_running());

        c.begin_content_drag(100.0);
        assert!(!c.is_auto_scroll_running());
        assert!(c.is_dragging_content());

        c.end_gesture(t0 + Duration::from_millis(500));
        assert!(!c.is_dragging());
        assert!(c.is_auto_scroll_running());
    }

    #[test]
    fn gesture_release_does_not_restart_while_paused() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);
        c.toggle_auto_scroll(t0);
        assert!(!c.is_auto_scroll_enabled());

        c.begin_content_drag(100.0);
        c.end_gesture(t0 + Duration::from_millis(500));
        assert!(!c.is_auto_scroll_running());
    }

    #[test]
    fn pause_toggle_is_symmetric_and_idempotent() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);

        c.toggle_auto_scroll(t0);
        assert!(!c.is_auto_scroll_enabled());
        assert!(!c.is_auto_scroll_running());

        c.toggle_auto_scroll(t0);
        assert!(c.is_auto_scroll_enabled());
        assert!(c.is_auto_scroll_running());

        // A full off/on cycle leaves the state machine unchanged.
        let before = c.clone();
        c.toggle_auto_scroll(t0);
        c.toggle_auto_scroll(t0);
        assert_eq!(c.is_auto_scroll_enabled(), before.is_auto_scroll_enabled());
        assert_eq!(c.is_auto_scroll_running(), before.is_auto_scroll_running());
    }

    #[test]
    fn hover_suspends_and_resumes_when_enabled() {
        let mut c = controller();
        let t0 = Instant::now();
        c.tick(t0);

        c.set_hovered(true, t0);
        assert!(!c.is_auto_scroll_running());

        c.set_hovered(false, t0 + Duration::from_millis(100));
        assert!(c.is_auto_scroll_running());

        // Leaving while paused must not resume.
        c.toggle_auto_scroll(t0);
        c.set_hovered(true, t0);
        c.set_hovered(false, t0);
        assert!(!c.is_auto_scroll_running());
    }

    #[test]
    fn hover_is_ignored_without_pause_on_hover() {
        let options = CarouselOptions {
            auto_scroll_interval: INTERVAL,
            pause_on_hover: false,
        };
        let mut c = CarouselController::new(options).expect("valid options");
        c.update_layout(300.0, 900.0);
        let t0 = Instant::now();
        c.tick(t0);

        c.set_hovered(true, t0);
        assert!(c.is_auto_scroll_running());
    }

    #[test]
    fn thumb_drag_maps_linearly_onto_the_scroll_range() {
        let mut c = controller();
        let thumb_range = 200.0;
        c.begin_thumb_drag(10.0, 0.0);
        assert!(c.is_dragging_thumb());

        c.update_thumb_drag(60.0, thumb_range); // thumb at 50 of 200
        assert!((c.scroll_offset() - 150.0).abs() < 1e-4);
        assert!((c.scroll_progress() - 0.25).abs() < 1e-6);

        // Past the track end the thumb clamps and the offset is exactly max.
        c.update_thumb_drag(500.0, thumb_range);
        assert_eq!(c.scroll_offset(), c.max_scroll_offset());
        assert_eq!(c.scroll_progress(), 1.0);

        // Back before the track start clamps to zero.
        c.update_thumb_drag(-500.0, thumb_range);
        assert_eq!(c.scroll_offset(), 0.0);
    }

    #[test]
    fn thumb_drag_is_anchor_relative() {
        let mut c = controller();
        let thumb_range = 200.0;
        // Grab with the thumb already at 100; moving by +20 lands at 120,
        // regardless of where on the thumb the grab happened.
        c.begin_thumb_drag(130.0, 100.0);
        c.update_thumb_drag(150.0, thumb_range);
        assert!((c.scroll_offset() - 600.0 * 120.0 / 200.0).abs() < 1e-4);
    }

    #[test]
    fn thumb_drag_with_degenerate_track_is_inert() {
        let mut c = controller();
        c.begin_thumb_drag(0.0, 0.0);
        c.update_thumb_drag(100.0, 0.0);
        assert_eq!(c.scroll_offset(), 0.0);
    }

    #[test]
    fn content_drag_is_incremental() {
        let mut c = controller();
        c.begin_content_drag(100.0);
        c.update_content_drag(90.0);
        assert_eq!(target_of(&c), 10.0);
        c.update_content_drag(70.0);
        assert_eq!(target_of(&c), 30.0);
        // Dragging right scrolls back, clamped at zero.
        c.update_content_drag(200.0);
        assert_eq!(target_of(&c), 0.0);
    }

    #[test]
    fn smooth_scroll_converges_and_snaps() {
        let mut c = controller();
        let t0 = Instant::now();
        c.step(StepDirection::Next, t0);
        assert!(c.has_pending_animation());

        let mut nanos = 0u64;
        let mut frames = 0;
        while c.has_pending_animation() && frames < 1000 {
            nanos += 16_000_000;
            c.update_scroll_offset(nanos, 0.05);
            frames += 1;
        }
        assert_eq!(c.scroll_offset(), 300.0);
        assert!(frames > 1, "interpolation should take more than one frame");
    }

    #[test]
    fn layout_shrink_clamps_current_offset() {
        let mut c = controller();
        c.set_scroll_progress(1.0);
        assert_eq!(c.scroll_offset(), 600.0);
        c.update_layout(300.0, 500.0);
        assert_eq!(c.scroll_offset(), 200.0);
    }
}
