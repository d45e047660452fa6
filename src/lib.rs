//! Freehand sketchpad engine: stroke capture, undo and replay.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It records
//! every sampled point of a pointer gesture together with the brush active at
//! that moment, paints ink live while the gesture is in progress, and can
//! rebuild the whole drawing from that history after an undo. The host
//! JavaScript layer only wires DOM events and buttons to [`engine::Engine`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture controller ([`engine::EngineCore`]) and the wasm [`engine::Engine`] |
//! | [`history`] | Recorded samples grouped into per-gesture runs |
//! | [`render`] | Live pen, full replay, and the guide grid |
//! | [`surface`] | Drawing surface trait and a headless recording surface |
//! | [`brush`] | Current width/color and the presets they come from |
//! | [`sampler`] | Page-to-surface coordinate conversion and bounds policy |
//! | [`input`] | Pointer event kinds and the gesture state machine |
//! | [`config`] | JSON configuration with defaults |
//! | [`web`] | `web-sys` canvas bindings |
//! | [`consts`] | Shared constants (presets, grid style) |

pub mod brush;
pub mod config;
pub mod consts;
pub mod engine;
pub mod history;
pub mod input;
pub mod render;
pub mod sampler;
pub mod surface;
pub mod web;
