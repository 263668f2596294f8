//! Address and network value types.
//!
//! - [`Address`] - IPv4 or IPv6 address tagged with its [`Family`]
//! - [`Network`] - canonical CIDR block with containment and adjacency relations

mod address;
mod network;

// Re-export public types
pub use address::{cidr_mask, host_mask, lo_mask, Address, Family};
pub use network::Network;
