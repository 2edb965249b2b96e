//! An auto-scrolling item carousel with manual navigation controls.
//!
//! ## Usage
//!
//! Show a horizontally scrolling strip of images or cards that advances on
//! its own and yields to the user's gestures.
pub mod controller;
mod controls;
mod scrollbar;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use derive_setters::Setters;
use tessera_ui::{
    Color, ComputedData, Constraint, CursorEventContent, DimensionValue, Dp, MeasurementError,
    Modifier, PressKeyEventType, Px, PxPosition, State, current_frame_nanos, key,
    layout::{LayoutInput, LayoutOutput, LayoutSpec, RenderInput},
    receive_frame_nanos, remember, tessera,
};

use tessera_components::{
    alignment::CrossAxisAlignment,
    column::{ColumnArgs, column},
    modifier::ModifierExt as _,
    pos_misc::is_position_in_component,
    spacer::{SpacerArgs, spacer},
};

pub use self::controller::{
    CarouselConfigError, CarouselController, CarouselOptions, DEFAULT_AUTO_SCROLL_INTERVAL,
    StepDirection,
};
use self::{
    controls::carousel_controls,
    scrollbar::{CarouselScrollbarArgs, carousel_scrollbar},
};

const DEFAULT_SCROLL_SMOOTHING: f32 = 0.05;

/// Configuration arguments for the carousel components.
#[derive(Clone, Setters)]
pub struct CarouselArgs {
    /// Modifier chain applied to the carousel subtree.
    pub modifier: Modifier,
    /// Total number of items in the carousel.
    pub item_count: usize,
    /// Width of each item along the scroll axis.
    pub item_width: Dp,
    /// Spacing between adjacent items.
    pub item_spacing: Dp,
    /// Delay between automatic advances.
    pub auto_scroll_interval: Duration,
    /// Whether hovering the viewport suspends auto-scrolling.
    pub pause_on_hover: bool,
    /// Smoothing factor for scroll animations (0.0 = instant).
    pub scroll_smoothing: f32,
    /// Thickness of the scrollbar below the viewport.
    pub scrollbar_thickness: Dp,
    /// The color of the scrollbar track.
    pub scrollbar_track_color: Color,
    /// The color of the scrollbar thumb.
    pub scrollbar_thumb_color: Color,
    /// The color of the scrollbar thumb when hovered.
    pub scrollbar_thumb_hover_color: Color,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            modifier: Modifier::new().fill_max_width(),
            item_count: 0,
            item_width: Dp(280.0),
            item_spacing: Dp(12.0),
            auto_scroll_interval: DEFAULT_AUTO_SCROLL_INTERVAL,
            pause_on_hover: true,
            scroll_smoothing: DEFAULT_SCROLL_SMOOTHING,
            scrollbar_thickness: Dp(8.0),
            scrollbar_track_color: Color::new(0.0, 0.0, 0.0, 0.1),
            scrollbar_thumb_color: Color::new(0.0, 0.0, 0.0, 0.3),
            scrollbar_thumb_hover_color: Color::new(0.0, 0.0, 0.0, 0.5),
        }
    }
}

impl CarouselArgs {
    fn options(&self) -> CarouselOptions {
        CarouselOptions {
            auto_scroll_interval: self.auto_scroll_interval,
            pause_on_hover: self.pause_on_hover,
        }
    }
}

/// # carousel
///
/// Renders a horizontally auto-scrolling carousel with previous/next step
/// buttons, a draggable scrollbar, and a pause/play toggle.
///
/// The carousel advances by one viewport width per interval and wraps back
/// to the start when it reaches the end. Any manual interaction (step
/// buttons, dragging the content or the scrollbar thumb, hovering when
/// `pause_on_hover` is set) suspends the timer; it resumes with a fresh
/// interval once the interaction ends, unless playback was paused.
///
/// ## Parameters
///
/// - `args` — configures sizing, timing, and scrollbar colors; see
///   [`CarouselArgs`].
/// - `item_content` — closure that renders each item by index.
///
/// ## Examples
///
/// ```
/// use tessera_carousel::carousel::{CarouselArgs, carousel};
/// use tessera_components::text::{TextArgs, text};
/// use tessera_ui::{Dp, tessera};
///
/// #[tessera]
/// fn demo() {
///     carousel(
///         CarouselArgs::default()
///             .item_count(5)
///             .item_width(Dp(240.0)),
///         |index| {
///             text(&TextArgs::default().text(format!("Item {index}")));
///         },
///     );
/// }
///
/// demo();
/// ```
#[tessera]
pub fn carousel(args: CarouselArgs, item_content: impl Fn(usize) + Send + Sync + 'static) {
    let options = args.options();
    let controller = remember(move || {
        CarouselController::new(options)
            .expect("carousel auto-scroll interval must be greater than zero")
    });
    carousel_with_controller(args, controller, item_content);
}

/// # carousel_with_controller
///
/// Carousel variant that is driven by an explicit controller.
///
/// ## Usage
///
/// Use when you need to drive scrolling programmatically, observe the
/// scroll position, or handle configuration errors yourself by building
/// the [`CarouselController`] up front.
///
/// ## Parameters
///
/// - `args` — configures sizing, timing, and scrollbar colors; see
///   [`CarouselArgs`].
/// - `controller` — a [`CarouselController`] holding scroll and timer state.
/// - `item_content` — closure that renders each item by index.
#[tessera]
pub fn carousel_with_controller(
    args: CarouselArgs,
    controller: State<CarouselController>,
    item_content: impl Fn(usize) + Send + Sync + 'static,
) {
    let modifier = args.modifier.clone();
    modifier.run(move || carousel_frame(args, controller, item_content));
}

#[tessera]
fn carousel_frame(
    args: CarouselArgs,
    controller: State<CarouselController>,
    item_content: impl Fn(usize) + Send + Sync + 'static,
) {
    let scrollbar_args = CarouselScrollbarArgs {
        controller,
        thickness: args.scrollbar_thickness,
        track_color: args.scrollbar_track_color,
        thumb_color: args.scrollbar_thumb_color,
        thumb_hover_color: args.scrollbar_thumb_hover_color,
    };
    let viewport_args = args.clone();
    let item_content = Arc::new(item_content);

    column(
        ColumnArgs::default()
            .modifier(Modifier::new().fill_max_width())
            .cross_axis_alignment(CrossAxisAlignment::Center),
        move |scope| {
            let viewport_args = viewport_args.clone();
            let item_content = item_content.clone();
            scope.child(move || {
                let item_content = item_content.clone();
                carousel_viewport(viewport_args.clone(), controller, move |index| {
                    item_content(index)
                });
            });
            scope.child(|| spacer(&SpacerArgs::new(Modifier::new().height(Dp(8.0)))));
            let scrollbar_args = scrollbar_args.clone();
            scope.child(move || carousel_scrollbar(scrollbar_args.clone()));
            scope.child(|| spacer(&SpacerArgs::new(Modifier::new().height(Dp(8.0)))));
            scope.child(move || carousel_controls(controller));
        },
    );
}

#[derive(Clone)]
struct CarouselLayout {
    item_width: Px,
    item_spacing: Px,
    item_count: usize,
    scroll_offset: Px,
    controller: State<CarouselController>,
}

impl PartialEq for CarouselLayout {
    fn eq(&self, other: &Self) -> bool {
        self.item_width == other.item_width
            && self.item_spacing == other.item_spacing
            && self.item_count == other.item_count
            && self.scroll_offset == other.scroll_offset
    }
}

impl LayoutSpec for CarouselLayout {
    fn measure(
        &self,
        input: &LayoutInput<'_>,
        output: &mut LayoutOutput<'_>,
    ) -> Result<ComputedData, MeasurementError> {
        if self.item_count == 0 {
            return Ok(ComputedData::min_from_constraint(
                input.parent_constraint().as_ref(),
            ));
        }
        if input.children_ids().len() != self.item_count {
            return Err(MeasurementError::MeasureFnFailed(
                "Carousel measured child count mismatch".into(),
            ));
        }

        let parent = input.parent_constraint();
        let item_step = self.item_width + self.item_spacing;
        let content_width = px_mul(item_step, self.item_count.saturating_sub(1)) + self.item_width;

        let child_constraint = Constraint::new(
            DimensionValue::Fixed(self.item_width),
            DimensionValue::Wrap {
                min: None,
                max: parent.height().get_max(),
            },
        );
        let children_to_measure: Vec<_> = input
            .children_ids()
            .iter()
            .map(|&child_id| (child_id, child_constraint))
            .collect();
        let measurements = input.measure_children(children_to_measure)?;

        let mut max_height = Px::ZERO;
        for size in measurements.values() {
            max_height = max_height.max(size.height);
        }

        let viewport_width = resolve_dimension(parent.width(), content_width, "carousel viewport");
        let viewport_height = resolve_dimension(parent.height(), max_height, "carousel cross axis");

        self.controller
            .with_mut(|c| c.update_layout(viewport_width.to_f32(), content_width.to_f32()));
        let scroll_offset = self.controller.with(|c| c.scroll_offset());

        for (index, &child_id) in input.children_ids().iter().enumerate() {
            let measured = measurements
                .get(&child_id)
                .copied()
                .unwrap_or(ComputedData::ZERO);
            let x = px_mul(item_step, index).to_f32() - scroll_offset;
            let y = (viewport_height - measured.height).max(Px::ZERO) / 2;
            output.place_child(child_id, PxPosition::new(Px::saturating_from_f32(x), y));
        }

        Ok(ComputedData {
            width: viewport_width,
            height: viewport_height,
        })
    }

    fn record(&self, input: &RenderInput<'_>) {
        input.metadata_mut().clips_children = true;
    }
}

#[tessera]
fn carousel_viewport(
    args: CarouselArgs,
    controller: State<CarouselController>,
    item_content: impl Fn(usize) + Send + Sync + 'static,
) {
    let smoothing = args.scroll_smoothing.clamp(0.0, 1.0);
    let frame_nanos = current_frame_nanos();
    controller.with_mut(|c| {
        c.tick(Instant::now());
        c.update_scroll_offset(frame_nanos, smoothing);
    });
    if controller.with(|c| c.has_pending_animation() || c.is_auto_scroll_running()) {
        let controller_for_frame = controller;
        receive_frame_nanos(move |frame_nanos| {
            let keep_running = controller_for_frame.with_mut(|c| {
                c.tick(Instant::now());
                c.update_scroll_offset(frame_nanos, smoothing);
                c.has_pending_animation() || c.is_auto_scroll_running()
            });
            if keep_running {
                tessera_ui::FrameNanosControl::Continue
            } else {
                tessera_ui::FrameNanosControl::Stop
            }
        });
    }

    let item_width = Px::from(args.item_width);
    let item_spacing = sanitize_spacing(Px::from(args.item_spacing));
    let scroll_offset = Px::saturating_from_f32(controller.with(|c| c.scroll_offset()));
    layout(CarouselLayout {
        item_width,
        item_spacing,
        item_count: args.item_count,
        scroll_offset,
        controller,
    });

    input_handler(move |input| {
        let now = Instant::now();
        let is_cursor_in_component = input
            .cursor_position_rel
            .map(|pos| is_position_in_component(input.computed_data, pos))
            .unwrap_or(false);
        controller.with_mut(|c| c.set_hovered(is_cursor_in_component, now));

        let Some(cursor_pos) = input.cursor_position_rel else {
            // Cursor left the window, stop dragging.
            if controller.with(|c| c.is_dragging_content()) {
                controller.with_mut(|c| c.end_gesture(now));
            }
            return;
        };

        let is_dragging = controller.with(|c| c.is_dragging_content());
        if !is_cursor_in_component && !is_dragging {
            return;
        }

        let mut drag_start_pos = None;
        let mut should_end_drag = false;
        for event in input.cursor_events.iter() {
            match &event.content {
                CursorEventContent::Pressed(PressKeyEventType::Left) => {
                    if is_cursor_in_component {
                        drag_start_pos = Some(cursor_pos);
                    }
                }
                CursorEventContent::Released(PressKeyEventType::Left) => {
                    should_end_drag = true;
                }
                _ => {}
            }
        }

        controller.with_mut(|c| {
            if let Some(pos) = drag_start_pos {
                c.begin_content_drag(pos.x.to_f32());
            }
            if should_end_drag {
                c.end_gesture(now);
            }
            if c.is_dragging_content() {
                c.update_content_drag(cursor_pos.x.to_f32());
            }
        });
    });

    let item_content = &item_content;
    for index in 0..args.item_count {
        key(index, || {
            item_content(index);
        });
    }
}

fn sanitize_spacing(px: Px) -> Px {
    if px < Px::ZERO { Px::ZERO } else { px }
}

fn px_mul(px: Px, times: usize) -> Px {
    if times == 0 {
        return Px::ZERO;
    }
    px_from_i64(px.0 as i64 * times as i64)
}

fn px_from_i64(value: i64) -> Px {
    if value > i64::from(i32::MAX) {
        Px(i32::MAX)
    } else if value < i64::from(i32::MIN) {
        Px(i32::MIN)
    } else {
        Px(value as i32)
    }
}

fn clamp_wrap(min: Option<Px>, max: Option<Px>, measure: Px) -> Px {
    min.unwrap_or(Px(0))
        .max(measure)
        .min(max.unwrap_or(Px::MAX))
}

fn fill_value(min: Option<Px>, max: Option<Px>, measure: Px, context: &str) -> Px {
    let Some(max) = max else {
        panic!("Carousel cannot fill an unbounded {context}");
    };
    let mut value = max.max(measure);
    if let Some(min) = min {
        value = value.max(min);
    }
    value
}

fn resolve_dimension(dim: DimensionValue, measure: Px, context: &str) -> Px {
    match dim {
        DimensionValue::Fixed(v) => v,
        DimensionValue::Wrap { min, max } => clamp_wrap(min, max, measure),
        DimensionValue::Fill { min, max } => fill_value(min, max, measure, context),
    }
}
