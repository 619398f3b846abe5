//! Rendering
//!
//! Skin resolution and scene building are plain data and run everywhere.
//! The WebGPU pipeline draws the scene; on the web, sprites are decoded from
//! `<img>` elements and uploaded as textures.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod skin;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub mod sprites;

pub use pipeline::RenderState;
pub use scene::{Scene, build_scene};
pub use skin::{ResolvedSkin, SkinId, SkinResolver};

#[cfg(target_arch = "wasm32")]
pub use sprites::{SpriteCache, SpriteRenderer};

use crate::sim::SimulationState;

/// Presentation surface the driver hands each frame to
///
/// Rendering never feeds back into the simulation.
pub trait RenderTarget {
    fn render(&mut self, state: &SimulationState, skin: Option<&SkinId>);
}
