//! Exact-duplicate removal.
//!
//! Used when networks are passed through without aggregation.

use crate::models::Network;
use itertools::Itertools;

/// Remove networks equal to one seen earlier, keeping first-seen order.
///
/// Equality is exact (`10.0.0.0/25` and `10.0.0.0/24` are both kept); only
/// collapsing removes contained networks.
pub fn de_duplicate_networks(nets: &[Network]) -> Vec<Network> {
    let unique: Vec<Network> = nets.iter().copied().unique().collect();
    if unique.len() != nets.len() {
        log::info!("Removed {} duplicate networks", nets.len() - unique.len());
    }
    unique
}
