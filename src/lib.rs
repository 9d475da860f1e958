//! # overlay-compare
//!
//! Fit-and-zoom model for comparing two photographs stacked on top of each
//! other: the top photo's opacity is adjustable and one pinch gesture zooms
//! both photos together.
//!
//! # Architecture
//!
//! The core is pure state and arithmetic with no rendering API behind it.
//! A UI layer feeds it three kinds of input and draws what comes out:
//!
//! ```text
//! photo picked   (image size, frame)  →  PictureScaleModel in a slot
//! pinch update   (raw multiplier)     →  new scale for both slots
//! slider moved   (any value)          →  top layer opacity in [0, 1]
//!                                          │
//!                                          ▼
//!                               LayerPlan per slot, SessionEvents
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scale`] | Fit rule, pinch clamp, and the per-picture [`scale::PictureScaleModel`] |
//! | [`session`] | Two fixed slots, shared pinch, top layer opacity, change events |
//! | [`render`] | Layer plans: frame, contents scale, opacity, centred image rect |
//! | [`picker`] | Picker configuration passed explicitly, pick requests bound to a slot |
//! | [`geometry`] | `Size` and `Rect` |
//! | [`imaging`] | Image header probe: natural size and EXIF orientation |
//! | [`config`] | `overlay.toml` loading, merging, and validation |
//! | [`script`] | TOML session scripts and their replay |
//! | [`output`] | CLI output formatting |
//!
//! # Scale Convention
//!
//! Scales are contents scales: source pixels per displayed point. A larger
//! scale draws the image smaller. A picture starts at its fit scale and a
//! pinch keeps it within `[1, fit + 2]`.
//!
//! # Threading
//!
//! Everything is synchronous. A session belongs to one owner (in practice
//! the UI thread) and is mutated through `&mut self`; asynchronous photo
//! loading must hand its result back to that owner before calling in.

pub mod config;
pub mod geometry;
pub mod imaging;
pub mod output;
pub mod picker;
pub mod render;
pub mod scale;
pub mod script;
pub mod session;
