//! Step buttons and the pause/play toggle for the carousel.
use std::time::Instant;

use tessera_components::{
    button::{ButtonArgs, button},
    icon::IconArgs,
    icon_button::{IconButtonArgs, icon_button},
    material_icons::filled,
    row::{RowArgs, row},
    spacer::{SpacerArgs, spacer},
    text::{TextArgs, text},
};
use tessera_ui::{Dp, Modifier, State, tessera};

use super::controller::{CarouselController, StepDirection};

/// Navigation row: previous, pause/play, next. The controls are inert when
/// the content fits the viewport.
#[tessera]
pub(crate) fn carousel_controls(controller: State<CarouselController>) {
    let enabled = controller.with(|c| c.has_overflow());
    let label = if controller.with(|c| c.is_auto_scroll_enabled()) {
        "Pause"
    } else {
        "Play"
    };

    row(RowArgs::default(), move |scope| {
        scope.child(move || {
            icon_button(
                &IconButtonArgs::new(IconArgs::from(filled::chevron_left_icon()))
                    .enabled(enabled)
                    .on_click(move || {
                        controller.with_mut(|c| c.step(StepDirection::Previous, Instant::now()));
                    }),
            );
        });
        scope.child(|| spacer(&SpacerArgs::new(Modifier::new().width(Dp(12.0)))));
        scope.child(move || {
            button(&ButtonArgs::with_child(
                ButtonArgs::filled(move || {
                    controller.with_mut(|c| c.toggle_auto_scroll(Instant::now()));
                })
                .enabled(enabled),
                move || {
                    text(&TextArgs::default().text(label));
                },
            ));
        });
        scope.child(|| spacer(&SpacerArgs::new(Modifier::new().width(Dp(12.0)))));
        scope.child(move || {
            icon_button(
                &IconButtonArgs::new(IconArgs::from(filled::chevron_right_icon()))
                    .enabled(enabled)
                    .on_click(move || {
                        controller.with_mut(|c| c.step(StepDirection::Next, Instant::now()));
                    }),
            );
        });
    });
}
