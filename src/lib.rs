//! Living Image turns the silhouette of a picture into an ambient, animated point field.
//!
//! The opaque area of a raster (or SVG) image is sampled on a square grid. Every sampled
//! cell becomes a small disc that orbits and drifts forever, flies in from a random
//! scatter during a one-time zoomed entrance, and periodically swaps places with the
//! other discs while the silhouette stays intact.
//!
//! # Pipeline overview
//!
//! 1. **Load**: bytes or a path -> [`SourceImage`] (straight RGBA8) via [`load_image`]
//! 2. **Sample**: [`SourceImage`] -> [`FieldPoint`]s via [`sample_points`]
//! 3. **Animate**: [`LivingImage::tick`] advances orbit, drift, entrance and shuffle
//! 4. **Render**: [`LivingImage::render_frame`] paints discs into any [`Surface`]
//!
//! Time only moves when the caller ticks, and all randomness comes from
//! [`EffectConfig::seed`], so a run is reproducible frame for frame.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded loop**: the animation and render loop is infallible and never blocks.
//! - **Premultiplied RGBA8** out of [`CpuSurface`]; use [`FrameRGBA::to_straight_rgba8`] for encoders.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod effect;
mod foundation;
mod render;
mod sampling;
mod viewport;

pub use animation::ease::Ease;
pub use animation::rng::{Rng64, permutation};
pub use animation::timeline::{Fired, Repeat, Timeline, TweenHandle, TweenSpec, Tweenable};
pub use assets::decode::{decode_image, load_image, rasterize_svg};
pub use assets::source::SourceImage;
pub use effect::config::EffectConfig;
pub use effect::living::{Frames, LivingImage};
pub use effect::state::{FieldKey, FieldState};
pub use foundation::core::{Affine, Canvas, Point, Range, Vec2};
pub use foundation::error::{LivingError, LivingResult};
pub use render::cpu::{CpuSurface, FrameRGBA};
pub use render::frame::FrameRenderer;
pub use render::surface::{DrawCmd, RecordingSurface, Surface, TransformStack};
pub use sampling::point::FieldPoint;
pub use sampling::sampler::{SampleOpts, sample_points};
pub use viewport::scaler::{Phase, ScaleState, ViewportScaler};
