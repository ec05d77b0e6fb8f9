//! Panoramic starfield rendering.
//!
//! Stars are scattered through a periodic (toroidal) volume and projected,
//! from a translating observer, onto an equirectangular raster. The pipeline
//! is: [`StarFieldGenerator`] -> [`FrameRenderer`] -> [`Projector`] per star
//! -> [`Rasterizer`] per visible star -> [`Frame`] -> [`FrameSink`].

pub mod animation;
pub mod error;
pub mod frame;
pub mod output;
pub mod projection;
pub mod raster;
pub mod renderer;
pub mod starfield;
pub mod wrap;

pub use animation::{Animation, AnimationFrame};
pub use error::{OutputError, SkyError};
pub use frame::Frame;
pub use output::{FrameSink, PngSequenceWriter, RunSummary, run_animation};
pub use projection::{Culled, ObserverState, ProjectedStar, Projector, quantize_intensity};
pub use raster::{BlendMode, Rasterizer};
pub use renderer::{FrameRenderer, RenderSettings, RenderStats};
pub use starfield::{FieldDimensions, StarField, StarFieldGenerator, StarRecord};
pub use wrap::{field_to_view, view_space_displacement, wrap};
