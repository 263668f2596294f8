//! Output formatting for aggregated networks.
//!
//! This module handles turning networks back into text:
//! - [`render`] - mask styles, quoting and list formats
//! - [`terminal`] - banner, trailer and class listing

mod render;
mod terminal;

pub use render::{quote, render_network, MaskStyle, OutputFormat, Rendering};
pub use terminal::{class_listing, input_banner, rule, total_trailer};
