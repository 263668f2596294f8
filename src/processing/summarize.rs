//! Range summarization.
//!
//! Turns an inclusive address range into the minimal ordered list of CIDR
//! blocks covering exactly that range.

use crate::error::AggregateError;
use crate::models::{host_mask, lo_mask, Address, Network};
use std::cmp::Ordering;

/// Summarize the inclusive range `[first, last]` into CIDR blocks.
///
/// At each start address the biggest block that is both aligned on that
/// address and ends at or before `last` is emitted.
///
/// # Examples
/// ```
/// use ip_aggregator::processing::summarize;
/// let nets = summarize("10.0.0.1".parse().unwrap(), "10.0.0.6".parse().unwrap()).unwrap();
/// let nets: Vec<String> = nets.iter().map(|n| n.to_string()).collect();
/// assert_eq!(nets, ["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/31", "10.0.0.6/32"]);
/// ```
pub fn summarize(first: Address, last: Address) -> Result<Vec<Network>, AggregateError> {
    let invalid = |reason| AggregateError::InvalidRange {
        first: first.to_string(),
        last: last.to_string(),
        reason,
    };
    match first.checked_cmp(&last) {
        Err(_) => return Err(invalid("addresses belong to different families")),
        Ok(Ordering::Greater) => return Err(invalid("first address is above last address")),
        Ok(_) => {}
    }

    let family = first.family();
    let last_bits = last.to_bits();
    let mut start = first.to_bits();
    let mut nets = Vec::new();

    loop {
        let host_bits = biggest_block(family.bits(), lo_mask(family, start), last_bits - start);
        let net = Network::new(Address::from_bits(family, start), family.bits() - host_bits)?;
        nets.push(net);

        let end = start | host_mask(family, family.bits() - host_bits);
        if end >= last_bits {
            break;
        }
        start = end + 1;
    }

    log::trace!("summarize({first}, {last}) -> {} networks", nets.len());
    Ok(nets)
}

/// Host bits of the biggest block that starts at an address aligned to
/// `min_prefix` and covers no more than `span + 1` addresses.
fn biggest_block(bits: u8, min_prefix: u8, span: u128) -> u8 {
    let aligned = bits - min_prefix;
    // floor(log2(span + 1)) without overflowing on a full IPv6 range
    let fits = match span.checked_add(1) {
        Some(count) => (127 - count.leading_zeros()) as u8,
        None => 128,
    };
    aligned.min(fits).min(bits)
}
