//! Scene rendering
//!
//! Renderers only read `Snapshot`s; they never touch session state.
//! `layout` holds the shared geometry, `canvas` the Canvas2D back ends (web only).

pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{SpriteAssets, SpriteRenderer, VectorRenderer};

use crate::sim::Snapshot;

/// A back end that can draw a frame from a snapshot
pub trait SceneRenderer {
    type Error;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}
