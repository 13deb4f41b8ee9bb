//! Sand drawing core: texture synthesis, groove compositing, the wind
//! dissolve and procedural sand sounds.
//!
//! Nothing here touches platform APIs. Audio and haptics sit behind the
//! `AudioBackend` and `HapticSink` traits, randomness is any `rand::Rng`, and
//! layers are plain RGBA8 buffers, so the whole pipeline runs (and is tested)
//! on the host as well as in the browser.

pub mod clear;
pub mod constants;
pub mod error;
pub mod haptics;
pub mod input;
pub mod layer;
pub mod noise;
pub mod raster;
pub mod sound;
pub mod stroke;
pub mod surface;
pub mod table;
pub mod texture;

pub use clear::*;
pub use error::*;
pub use haptics::*;
pub use input::*;
pub use layer::*;
pub use sound::*;
pub use stroke::*;
pub use surface::*;
pub use table::*;
pub use texture::*;
