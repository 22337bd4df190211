pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod presets;
pub mod rotation;
pub mod sampling;
pub mod scene;

#[cfg(feature = "render")]
pub mod render;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use camera::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use field::*;
pub use gpu::*;
pub use input::*;
pub use presets::*;
pub use rotation::*;
pub use sampling::*;
pub use scene::*;
