// crates/marker_extractor/src/lib.rs

//! Extracts the code between a pair of comment markers.
//!
//! ```text
//! # BEGIN_SNIPPET:setup
//! connect()
//! # END_SNIPPET:setup
//! ```
//!
//! The marker pair comes from a `"START,END"` spec (see
//! [`parse_marker_spec`]); the comment syntax around the markers comes
//! from the language's [`lang_support::CommentStyle`].

mod markers;
mod region;

pub use markers::{parse_marker_spec, Marker, MarkerPair};
pub use region::{extract_region, region_pattern};
