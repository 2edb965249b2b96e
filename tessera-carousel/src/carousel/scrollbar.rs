//! Synthetic horizontal scrollbar with a draggable thumb.
use std::time::Instant;

use tessera_components::{
    shape_def::Shape,
    surface::{SurfaceArgs, SurfaceStyle, surface},
};
use tessera_ui::{
    Color, ComputedData, Constraint, CursorEventContent, DimensionValue, Dp, MeasurementError,
    Modifier, PressKeyEventType, Px, PxPosition, State,
    layout::{LayoutInput, LayoutOutput, LayoutSpec},
    remember, tessera,
    winit::window::CursorIcon,
};

use super::controller::CarouselController;

const HOVER_FADE_SECS: f32 = 0.2;

#[derive(Clone)]
pub(crate) struct CarouselScrollbarArgs {
    pub controller: State<CarouselController>,
    pub thickness: Dp,
    pub track_color: Color,
    pub thumb_color: Color,
    pub thumb_hover_color: Color,
}

/// Hover feedback for the thumb, used to fade between the idle and hover
/// colors.
#[derive(Clone, Copy, Default, PartialEq)]
struct ThumbHoverState {
    is_hovered: bool,
    hover_instant: Option<Instant>,
}

#[derive(Clone, Copy, PartialEq)]
struct ScrollbarLayout {
    thumb_x: Px,
}

impl LayoutSpec for ScrollbarLayout {
    fn measure(
        &self,
        input: &LayoutInput<'_>,
        output: &mut LayoutOutput<'_>,
    ) -> Result<ComputedData, MeasurementError> {
        let loose = Constraint::new(
            DimensionValue::Wrap {
                min: None,
                max: None,
            },
            DimensionValue::Wrap {
                min: None,
                max: None,
            },
        );
        let track_id = input.children_ids()[0];
        let thumb_id = input.children_ids()[1];
        let track_size = input.measure_child(track_id, &loose)?;
        input.measure_child(thumb_id, &loose)?;

        output.place_child(track_id, PxPosition::ZERO);
        output.place_child(thumb_id, PxPosition::new(self.thumb_x, Px::ZERO));

        Ok(track_size)
    }
}

/// Track plus thumb. The thumb position is derived from the controller's
/// scroll progress every pass, so it follows the content no matter which
/// interaction moved it. Not rendered when the content fits the viewport.
#[tessera]
pub(crate) fn carousel_scrollbar(args: CarouselScrollbarArgs) {
    let controller = args.controller;
    let total = controller.with(|c| c.content_width());
    let visible = controller.with(|c| c.viewport_width());
    if !controller.with(|c| c.has_overflow()) || visible <= 0.0 || args.thickness <= Dp::ZERO {
        return;
    }

    let height = args.thickness.to_px();
    let track_width = Px::saturating_from_f32(visible);
    let thumb_width = Px::saturating_from_f32(visible * visible / total);
    let thumb_range = (track_width - thumb_width).max(Px::ZERO).to_f32();
    let thumb_x = controller.with(|c| c.scroll_progress()) * thumb_range;

    let hover_state = remember(ThumbHoverState::default);

    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .modifier(Modifier::new().constrain(
                Some(DimensionValue::Fixed(track_width)),
                Some(DimensionValue::Fixed(height)),
            ))
            .style(SurfaceStyle::Filled {
                color: args.track_color,
            })
            .shape(Shape::capsule())
            .show_state_layer(false)
            .show_ripple(false),
        || {},
    ));

    let thumb_color = {
        let state = hover_state.get();
        let (from_color, to_color) = if state.is_hovered {
            (args.thumb_color, args.thumb_hover_color)
        } else {
            (args.thumb_hover_color, args.thumb_color)
        };
        let progress = state
            .hover_instant
            .map(|instant| (instant.elapsed().as_secs_f32() / HOVER_FADE_SECS).min(1.0))
            .unwrap_or(1.0);
        lerp_color(from_color, to_color, progress)
    };

    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .modifier(Modifier::new().constrain(
                Some(DimensionValue::Fixed(thumb_width)),
                Some(DimensionValue::Fixed(height)),
            ))
            .style(SurfaceStyle::Filled { color: thumb_color })
            .shape(Shape::capsule())
            .show_state_layer(false)
            .show_ripple(false),
        || {},
    ));

    layout(ScrollbarLayout {
        thumb_x: Px::saturating_from_f32(thumb_x),
    });

    input_handler(move |input| {
        let now = Instant::now();

        if controller.with(|c| c.is_dragging_thumb()) {
            if input.cursor_events.iter().any(|event| {
                matches!(
                    event.content,
                    CursorEventContent::Released(PressKeyEventType::Left)
                )
            }) {
                controller.with_mut(|c| c.end_gesture(now));
                return;
            }

            // The drag keeps tracking the cursor even outside the track
            // bounds; only releasing or losing the cursor ends it.
            match input.cursor_position_rel {
                Some(cursor_pos) => {
                    controller
                        .with_mut(|c| c.update_thumb_drag(cursor_pos.x.to_f32(), thumb_range));
                }
                None => {
                    // Cursor left the window, stop dragging.
                    controller.with_mut(|c| c.end_gesture(now));
                }
            }
            return;
        }

        let Some(cursor_pos) = input.cursor_position_rel else {
            if hover_state.with(|s| s.is_hovered) {
                hover_state.with_mut(|s| {
                    s.is_hovered = false;
                    s.hover_instant = Some(now);
                });
            }
            return;
        };

        let is_on_thumb = cursor_pos.y >= Px::ZERO
            && cursor_pos.y <= height
            && cursor_pos.x >= Px::saturating_from_f32(thumb_x)
            && cursor_pos.x <= Px::saturating_from_f32(thumb_x + thumb_width.to_f32());

        if is_on_thumb != hover_state.with(|s| s.is_hovered) {
            hover_state.with_mut(|s| {
                s.is_hovered = is_on_thumb;
                s.hover_instant = Some(now);
            });
        }

        if !is_on_thumb {
            return;
        }
        input.requests.cursor_icon = CursorIcon::Pointer;

        if input.cursor_events.iter().any(|event| {
            matches!(
                event.content,
                CursorEventContent::Pressed(PressKeyEventType::Left)
            )
        }) {
            controller.with_mut(|c| c.begin_thumb_drag(cursor_pos.x.to_f32(), thumb_x));
        }
    });
}

fn lerp_color(from: Color, to: Color, progress: f32) -> Color {
    let t = progress.clamp(0.0, 1.0);
    Color::new(
        from.r + (to.r - from.r) * t,
        from.g + (to.g - from.g) * t,
        from.b + (to.b - from.b) * t,
        from.a + (to.a - from.a) * t,
    )
}
