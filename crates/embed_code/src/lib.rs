// crates/embed_code/src/lib.rs

//! Host-side glue around the extraction crates: reads settings, parses
//! embed blocks, fetches sources and stores images, then hands plain text
//! to the engine and formats its answer for display.

pub mod block;
pub mod config;
pub mod display;
pub mod document;
pub mod embedder;
pub mod services;

pub use config::{AppConfig, Settings};
pub use display::Rendered;
pub use document::{find_embed_blocks, render_document};
pub use embedder::Embedder;
