//=========================================================================
// Proscenium Engine - Library Root
//
// Window, display stack and editor overlay for a 3D game engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Keep the winit integration (`platform`) hidden from end users
// - Publish the display lifecycle and its supporting types under `core`
//
// Typical usage:
// ```no_run
// use proscenium_engine::EngineBuilder;
//
// fn main() {
//     let _ = EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the display manager, window state, input, cameras and the
// entity world. `editor` is the in-engine overlay, compiled with the
// `editor` feature.
//
pub mod core;
#[cfg(feature = "editor")]
pub mod editor;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit backend behind `Window::init`.
// `engine` defines the builder and the frame loop.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
