//! Hanami Web - browser host for the animation layer
//!
//! Binds the simulations to the page: `#sakura-canvas` gets a 2D context for
//! the petals, `#particles-canvas` a WebGL2 context for the particle field.
//! Host events are forwarded to the stage and frames are driven by
//! `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod gl;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod log;

#[cfg(target_arch = "wasm32")]
pub use canvas::WebCanvas;
#[cfg(target_arch = "wasm32")]
pub use gl::WebGlScene;
#[cfg(target_arch = "wasm32")]
pub use host::{boot, HanamiHandle};

/// Element id of the petal canvas
pub const PETAL_CANVAS_ID: &str = "sakura-canvas";
/// Element id of the particle field canvas
pub const FIELD_CANVAS_ID: &str = "particles-canvas";

// When compiling for non-wasm targets, provide an empty stub so the
// workspace still builds and tests on the host.
#[cfg(not(target_arch = "wasm32"))]
pub fn boot() {}
