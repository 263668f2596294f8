//! Token parsing at the engine boundary.
//!
//! Turns command-line or scanned tokens into typed [`Address`], [`Network`]
//! and [`InputItem`] values. Accepted network forms:
//! - `addr` (a single host)
//! - `addr/len`
//! - `addr/netmask`, e.g. `10.0.0.0/255.0.0.0` (IPv4)
//! - `addr/hostmask`, e.g. `10.0.0.0/0.255.255.255` (IPv4)
//!
//! Host bits set in a network token are masked off, never rejected.

use crate::error::AggregateError;
use crate::models::{Address, Network};
use crate::processing::InputItem;
use std::cmp::Ordering;
use std::net::Ipv4Addr;

/// Separator of explicit range tokens, `first-last`.
pub const RANGE_SEPARATOR: char = '-';

/// Parse a single IPv4 or IPv6 address.
pub fn parse_address(token: &str) -> Result<Address, AggregateError> {
    token.parse()
}

/// Parse a network token in any of the accepted forms.
///
/// # Examples
/// ```
/// use ip_aggregator::input::parse_network;
/// assert_eq!(parse_network("10.0.0.5/255.255.255.0").unwrap().to_string(), "10.0.0.0/24");
/// assert_eq!(parse_network("10.0.0.0/0.0.0.255").unwrap().to_string(), "10.0.0.0/24");
/// ```
pub fn parse_network(token: &str) -> Result<Network, AggregateError> {
    let token = token.trim();
    let invalid = || AggregateError::InvalidNetwork(token.to_string());

    let (addr, mask) = match token.split_once('/') {
        None => return parse_address(token).map(Network::host).map_err(|_| invalid()),
        Some(parts) => parts,
    };
    let addr = parse_address(addr).map_err(|_| invalid())?;

    let prefix_len = if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        mask.parse::<u8>().map_err(|_| invalid())?
    } else {
        match (addr, mask.parse::<Ipv4Addr>()) {
            (Address::V4(_), Ok(mask)) => prefix_from_mask(u32::from(mask)).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        }
    };

    let net = Network::new(addr, prefix_len).map_err(|_| invalid())?;
    if net.base() != addr {
        log::debug!("{token} has host bits set, using {net}");
    }
    Ok(net)
}

/// Prefix length of a dotted IPv4 mask, read as a net mask first and as a
/// host (wildcard) mask second.
fn prefix_from_mask(mask: u32) -> Option<u8> {
    if mask.leading_ones() + mask.trailing_zeros() == 32 {
        Some(mask.leading_ones() as u8)
    } else if mask.leading_zeros() + mask.trailing_ones() == 32 {
        Some(mask.leading_zeros() as u8)
    } else {
        None
    }
}

/// Parse an explicit `first-last` range token.
///
/// Both ends must be the same family and in order.
pub fn parse_range(token: &str) -> Result<(Address, Address), AggregateError> {
    let token = token.trim();
    let (first, last) = token
        .split_once(RANGE_SEPARATOR)
        .ok_or_else(|| AggregateError::InvalidNetwork(token.to_string()))?;
    let first = parse_address(first.trim())?;
    let last = parse_address(last.trim())?;

    let invalid = |reason| AggregateError::InvalidRange {
        first: first.to_string(),
        last: last.to_string(),
        reason,
    };
    match first.checked_cmp(&last) {
        Err(_) => Err(invalid("addresses belong to different families")),
        Ok(Ordering::Greater) => Err(invalid("first address is above last address")),
        Ok(_) => Ok((first, last)),
    }
}

/// Parse a positional input: a range when it holds `-`, otherwise a network.
pub fn parse_item(token: &str) -> Result<InputItem, AggregateError> {
    if token.contains(RANGE_SEPARATOR) {
        let (first, last) = parse_range(token)?;
        Ok(InputItem::Range(first, last))
    } else {
        parse_network(token).map(InputItem::Network)
    }
}
