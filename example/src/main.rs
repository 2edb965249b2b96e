// Prevents additional console window on Windows in release, DO NOT REMOVE
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::time::Duration;

use tessera_carousel::carousel::{CarouselArgs, carousel};
use tessera_components::{
    alignment::{Alignment, CrossAxisAlignment},
    column::{ColumnArgs, column},
    modifier::ModifierExt as _,
    shape_def::Shape,
    spacer::{SpacerArgs, spacer},
    surface::{SurfaceArgs, SurfaceStyle, surface},
    text::{TextArgs, text},
    theme::{MaterialTheme, material_theme},
};
use tessera_ui::{Color, Dp, Modifier, tessera, use_context};

const SLIDE_COUNT: usize = 6;

fn app() {
    material_theme(MaterialTheme::default, || {
        carousel_showcase();
    });
}

tessera_ui::entry!(app, pipelines = [tessera_components]);

#[tessera]
fn carousel_showcase() {
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default().modifier(Modifier::new().fill_max_size()),
        || {
            surface(&SurfaceArgs::with_child(
                SurfaceArgs::default()
                    .modifier(Modifier::new().fill_max_width().padding_all(Dp(24.0))),
                || {
                    carousel_content();
                },
            ));
        },
    ));
}

#[tessera]
fn carousel_content() {
    column(
        ColumnArgs::default()
            .modifier(Modifier::new().fill_max_width())
            .cross_axis_alignment(CrossAxisAlignment::Start),
        |scope| {
            scope.child(|| {
                text(&TextArgs::default().text("Carousel").size(Dp(24.0)));
            });
            scope.child(|| {
                text(
                    &TextArgs::default()
                        .text("Auto-advancing slides with step buttons and a draggable scrollbar.")
                        .color(
                            use_context::<MaterialTheme>()
                                .expect("MaterialTheme must be provided")
                                .get()
                                .color_scheme
                                .on_surface_variant,
                        ),
                );
            });
            scope.child(|| spacer(&SpacerArgs::new(Modifier::new().height(Dp(16.0)))));
            scope.child(|| {
                carousel(
                    CarouselArgs::default()
                        .item_count(SLIDE_COUNT)
                        .item_width(Dp(280.0))
                        .item_spacing(Dp(12.0))
                        .auto_scroll_interval(Duration::from_millis(2000))
                        .modifier(Modifier::new().fill_max_width()),
                    |index| {
                        carousel_slide(index);
                    },
                );
            });
        },
    );
}

#[tessera]
fn carousel_slide(index: usize) {
    let color = slide_color(index);
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .modifier(Modifier::new().fill_max_width().height(Dp(180.0)))
            .style(SurfaceStyle::Filled { color })
            .shape(Shape::rounded_rectangle(Dp(18.0)))
            .content_alignment(Alignment::Center),
        move || {
            text(
                &TextArgs::default()
                    .text(format!("Slide {}", index + 1))
                    .size(Dp(20.0))
                    .color(Color::WHITE),
            );
        },
    ));
}

fn slide_color(index: usize) -> Color {
    let palette = [
        Color::new(0.15, 0.55, 0.85, 1.0),
        Color::new(0.1, 0.7, 0.55, 1.0),
        Color::new(0.95, 0.65, 0.15, 1.0),
        Color::new(0.9, 0.3, 0.45, 1.0),
        Color::new(0.45, 0.25, 0.8, 1.0),
        Color::new(0.2, 0.4, 0.75, 1.0),
    ];
    palette[index % palette.len()]
}
