//! Network collapsing.
//!
//! Reduces an arbitrary, possibly overlapping, unsorted collection of
//! networks of one family to the minimal sorted set of disjoint networks
//! covering the same addresses.

use crate::error::AggregateError;
use crate::models::{Family, Network};
use itertools::Itertools;

/// The single family shared by `nets`, `None` when empty.
///
/// Fails with [`AggregateError::MixedFamily`] when both families are present.
pub fn common_family(nets: &[Network]) -> Result<Option<Family>, AggregateError> {
    match nets.iter().map(Network::family).dedup().at_most_one() {
        Ok(family) => Ok(family),
        Err(_) => Err(AggregateError::MixedFamily),
    }
}

/// Collapse `nets` into the minimal sorted set of disjoint networks.
///
/// # Examples
/// ```
/// use ip_aggregator::models::Network;
/// use ip_aggregator::processing::collapse;
/// let nets: Vec<Network> = vec!["192.168.0.0/25".parse().unwrap(), "192.168.0.128/25".parse().unwrap()];
/// assert_eq!(collapse(&nets).unwrap(), vec!["192.168.0.0/24".parse::<Network>().unwrap()]);
/// ```
pub fn collapse(nets: &[Network]) -> Result<Vec<Network>, AggregateError> {
    if common_family(nets)?.is_none() {
        return Ok(Vec::new());
    }

    let mut sorted = nets.to_vec();
    sorted.sort();
    let disjoint = remove_subsumed(sorted);
    let collapsed = merge_siblings(disjoint);

    log::debug!("collapse: {} networks -> {}", nets.len(), collapsed.len());
    Ok(collapsed)
}

/// Drop every network contained in another, keeping the sorted order.
///
/// In `(base, prefix_len)` order a container always precedes what it
/// contains, and the kept networks are disjoint, so only the last kept one
/// needs checking.
fn remove_subsumed(sorted: Vec<Network>) -> Vec<Network> {
    let mut kept: Vec<Network> = Vec::with_capacity(sorted.len());
    for net in sorted {
        match kept.last() {
            Some(last) if net.subnet_of(last) => {
                log::trace!("{net} is covered by {last}");
            }
            _ => kept.push(net),
        }
    }
    kept
}

/// Replace sibling pairs by their parent until no pair is left.
///
/// A merged parent can only pair with the element right below it, so the
/// stack top is re-checked after every merge.
fn merge_siblings(disjoint: Vec<Network>) -> Vec<Network> {
    let mut merged: Vec<Network> = Vec::with_capacity(disjoint.len());
    for net in disjoint {
        let mut current = net;
        while let Some(parent) = merged
            .last()
            .filter(|lower| lower.is_lower_sibling_of(&current))
            .and_then(Network::supernet)
        {
            log::trace!("merge {} + {current} -> {parent}", merged[merged.len() - 1]);
            merged.pop();
            current = parent;
        }
        merged.push(current);
    }
    merged
}
