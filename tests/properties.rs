//! Property tests for the aggregation engine.

use ip_aggregator::models::{Address, Network};
use ip_aggregator::processing::{collapse, filter, summarize};
use proptest::prelude::*;

/// IPv4 networks packed into 10.0.0.0/16 so that overlaps and siblings are common.
fn network_strategy() -> impl Strategy<Value = Network> {
    (0u32..=0xFFFF, 16u8..=32).prop_map(|(low, len)| {
        Network::new(Address::V4(0x0A00_0000 | low), len).expect("prefix in range")
    })
}

fn networks_strategy() -> impl Strategy<Value = Vec<Network>> {
    prop::collection::vec(network_strategy(), 0..40)
}

/// IPv6 networks biased towards the edges of the address space: prefixes
/// near `/0` and `/128`, addresses near `::` and `u128::MAX`.
fn network_v6_strategy() -> impl Strategy<Value = Network> {
    let addr = prop_oneof![
        (0u128..=0xFFFF).prop_map(|low| u128::MAX - low),
        0u128..=0xFFFF,
        any::<u128>(),
    ];
    let len = prop_oneof![0u8..=4, 124u8..=128, 0u8..=128];
    (addr, len).prop_map(|(bits, len)| Network::new(Address::V6(bits), len).expect("prefix in range"))
}

fn networks_v6_strategy() -> impl Strategy<Value = Vec<Network>> {
    prop::collection::vec(network_v6_strategy(), 0..40)
}

/// Covered addresses as sorted, merged inclusive intervals.
fn coverage(nets: &[Network]) -> Vec<(u128, u128)> {
    let mut ranges: Vec<(u128, u128)> = nets
        .iter()
        .map(|n| (n.base().to_bits(), n.broadcast().to_bits()))
        .collect();
    ranges.sort();
    let mut merged: Vec<(u128, u128)> = Vec::new();
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some(last) if last.1.checked_add(1).map_or(true, |next| lo <= next) => {
                last.1 = last.1.max(hi)
            }
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

proptest! {
    /// Property: collapsing twice gives the same result as collapsing once
    #[test]
    fn prop_collapse_idempotent(nets in networks_strategy()) {
        let once = collapse(&nets).unwrap();
        prop_assert_eq!(collapse(&once).unwrap(), once);
    }

    /// Property: collapse covers exactly the input addresses
    #[test]
    fn prop_collapse_preserves_union(nets in networks_strategy()) {
        let collapsed = collapse(&nets).unwrap();
        prop_assert_eq!(coverage(&collapsed), coverage(&nets));
    }

    /// Property: collapse output is sorted, disjoint and has no mergeable siblings
    #[test]
    fn prop_collapse_disjoint_and_minimal(nets in networks_strategy()) {
        let collapsed = collapse(&nets).unwrap();
        for pair in collapsed.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert!(pair[0].broadcast().to_bits() < pair[1].base().to_bits());
            prop_assert!(!pair[0].is_lower_sibling_of(&pair[1]));
        }
        for (i, a) in collapsed.iter().enumerate() {
            for b in collapsed.iter().skip(i + 1) {
                prop_assert!(!a.overlaps(b), "{} overlaps {}", a, b);
            }
        }
    }

    /// Property: IPv6 collapse is idempotent near the ends of the address space
    #[test]
    fn prop_collapse_idempotent_ipv6(nets in networks_v6_strategy()) {
        let once = collapse(&nets).unwrap();
        prop_assert_eq!(collapse(&once).unwrap(), once);
    }

    /// Property: IPv6 collapse covers exactly the input addresses
    #[test]
    fn prop_collapse_preserves_union_ipv6(nets in networks_v6_strategy()) {
        let collapsed = collapse(&nets).unwrap();
        prop_assert_eq!(coverage(&collapsed), coverage(&nets));
    }

    /// Property: IPv6 collapse output is sorted, disjoint and has no mergeable siblings
    #[test]
    fn prop_collapse_disjoint_and_minimal_ipv6(nets in networks_v6_strategy()) {
        let collapsed = collapse(&nets).unwrap();
        for pair in collapsed.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert!(pair[0].broadcast().to_bits() < pair[1].base().to_bits());
            prop_assert!(!pair[0].is_lower_sibling_of(&pair[1]));
        }
    }

    /// Property: summarize covers exactly [first, last] and is already collapsed
    #[test]
    fn prop_summarize_round_trip(a in any::<u32>(), b in any::<u32>()) {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        let nets = summarize(Address::V4(first), Address::V4(last)).unwrap();
        prop_assert_eq!(coverage(&nets), vec![(u128::from(first), u128::from(last))]);
        prop_assert_eq!(collapse(&nets).unwrap(), nets);
    }

    /// Property: IPv6 ranges summarize the same way
    #[test]
    fn prop_summarize_round_trip_ipv6(a in any::<u128>(), b in any::<u128>()) {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        let nets = summarize(Address::V6(first), Address::V6(last)).unwrap();
        prop_assert!(nets.len() <= 2 * 128);
        prop_assert_eq!(nets[0].base().to_bits(), first);
        prop_assert_eq!(nets[nets.len() - 1].broadcast().to_bits(), last);
        prop_assert_eq!(collapse(&nets).unwrap(), nets);
    }

    /// Property: a candidate passes an include filter iff it is inside a collapsed include
    #[test]
    fn prop_filter_containment_law(candidate in network_strategy(), includes in networks_strategy()) {
        prop_assume!(!includes.is_empty());
        let passed = filter(&[candidate], &includes, &[]).unwrap();
        let expected = collapse(&includes).unwrap().iter().any(|i| candidate.subnet_of(i));
        prop_assert_eq!(!passed.is_empty(), expected);
    }

    /// Property: an exclude filter removes exactly what an include filter would keep
    #[test]
    fn prop_filter_exclude_complements_include(candidate in network_strategy(), filters in networks_strategy()) {
        prop_assume!(!filters.is_empty());
        let included = filter(&[candidate], &filters, &[]).unwrap();
        let excluded = filter(&[candidate], &[], &filters).unwrap();
        prop_assert_eq!(included.is_empty(), !excluded.is_empty());
    }
}

#[test]
fn test_collapse_rejects_mixed_family() {
    let nets: Vec<Network> = vec!["10.0.0.0/24".parse().unwrap(), "::1/128".parse().unwrap()];
    assert!(collapse(&nets).is_err());
}
