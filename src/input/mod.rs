//! Input collaborators feeding the engine.
//!
//! - [`parse`] - tokens to addresses, networks and ranges
//! - [`scan`] - IPv4 extraction from free-form text
//! - [`aliases`] - well-known class aliases for filters

mod aliases;
mod parse;
mod scan;

pub use aliases::{resolve_filter, Alias, AliasTable};
pub use parse::{parse_address, parse_item, parse_network, parse_range, RANGE_SEPARATOR};
pub use scan::{scan_line, scan_reader};
