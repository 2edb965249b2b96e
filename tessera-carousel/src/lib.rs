//! An auto-scrolling carousel component for the Tessera UI framework.
//!
//! # Usage
//!
//! The carousel renders its items in a clipped horizontal viewport, advances
//! by one viewport width per interval, and wraps back to the start at the
//! end of the strip. Manual navigation — step buttons, dragging the content,
//! dragging the scrollbar thumb — suspends the automatic timer and resumes
//! it with a fresh interval afterwards; a pause/play toggle stops it
//! entirely.
//!
//! ```
//! # use tessera_ui::tessera;
//! # #[tessera]
//! # fn component() {
//! use tessera_carousel::carousel::{CarouselArgs, carousel};
//! use tessera_components::text::{TextArgs, text};
//! use tessera_ui::Dp;
//!
//! carousel(
//!     CarouselArgs::default().item_count(5).item_width(Dp(240.0)),
//!     |index| {
//!         text(&TextArgs::default().text(format!("Item {index}")));
//!     },
//! );
//! # }
//! # component();
//! ```
//!
//! The rendering pipelines come from `tessera-components`, so register them
//! at the entry point as usual:
//!
//! ```no_run
//! fn app() {
//!     // Your app code here
//! }
//!
//! tessera_ui::entry!(app, pipelines = [tessera_components]);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod carousel;
