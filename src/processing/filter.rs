//! Include/exclude containment filtering.
//!
//! A candidate passes when it is fully contained in at least one include
//! network (if any includes are given) and is not fully contained in any
//! exclude network. Partial overlap never counts as a match. Includes are
//! always applied before excludes.

use super::collapse::{collapse, common_family};
use crate::error::AggregateError;
use crate::models::{Family, Network};
use itertools::Itertools;
use std::collections::HashMap;

/// Collapsed include and exclude networks, grouped per address family.
#[derive(Debug, Default, Clone)]
pub struct ContainmentFilter {
    includes: HashMap<Family, Vec<Network>>,
    excludes: HashMap<Family, Vec<Network>>,
    include_any: bool,
}

impl ContainmentFilter {
    /// Build a filter, collapsing each family's include and exclude lists.
    pub fn new(includes: &[Network], excludes: &[Network]) -> Result<Self, AggregateError> {
        Ok(ContainmentFilter {
            includes: collapse_per_family(includes)?,
            excludes: collapse_per_family(excludes)?,
            include_any: !includes.is_empty(),
        })
    }

    /// Collapsed include networks, IPv4 first.
    pub fn includes(&self) -> Vec<Network> {
        flatten(&self.includes)
    }

    /// Collapsed exclude networks, IPv4 first.
    pub fn excludes(&self) -> Vec<Network> {
        flatten(&self.excludes)
    }

    /// True when `net` passes the include stage.
    ///
    /// With no includes at all every candidate passes; once includes exist a
    /// candidate of a family without includes does not.
    pub fn is_included(&self, net: &Network) -> bool {
        if !self.include_any {
            return true;
        }
        self.includes
            .get(&net.family())
            .is_some_and(|nets| nets.iter().any(|include| net.subnet_of(include)))
    }

    /// True when `net` is inside some exclude network.
    pub fn is_excluded(&self, net: &Network) -> bool {
        self.excludes
            .get(&net.family())
            .is_some_and(|nets| nets.iter().any(|exclude| net.subnet_of(exclude)))
    }

    /// Apply both stages, keeping the candidates' order.
    pub fn apply(&self, candidates: &[Network]) -> Vec<Network> {
        let included: Vec<Network> = candidates
            .iter()
            .filter(|net| self.is_included(net))
            .copied()
            .collect();

        let result: Vec<Network> = included
            .iter()
            .filter(|net| {
                let excluded = self.is_excluded(net);
                if excluded {
                    log::debug!("Excluding {net} (inside an exclude filter)");
                }
                !excluded
            })
            .copied()
            .collect();

        log::debug!(
            "filter: {} candidates, {} included, {} after excludes",
            candidates.len(),
            included.len(),
            result.len()
        );
        result
    }
}

/// Filter `candidates` of one family by include and exclude networks.
///
/// Each of the three collections must hold a single family, otherwise the
/// call fails with [`AggregateError::MixedFamily`].
///
/// # Examples
/// ```
/// use ip_aggregator::models::Network;
/// use ip_aggregator::processing::filter;
/// let candidates: Vec<Network> = vec!["10.1.0.0/16".parse().unwrap()];
/// let includes: Vec<Network> = vec!["10.0.0.0/8".parse().unwrap()];
/// assert_eq!(filter(&candidates, &includes, &[]).unwrap(), candidates);
/// assert!(filter(&candidates, &includes, &candidates).unwrap().is_empty());
/// ```
pub fn filter(
    candidates: &[Network],
    includes: &[Network],
    excludes: &[Network],
) -> Result<Vec<Network>, AggregateError> {
    common_family(candidates)?;
    common_family(includes)?;
    common_family(excludes)?;
    Ok(ContainmentFilter::new(includes, excludes)?.apply(candidates))
}

fn collapse_per_family(nets: &[Network]) -> Result<HashMap<Family, Vec<Network>>, AggregateError> {
    nets.iter()
        .copied()
        .into_group_map_by(Network::family)
        .into_iter()
        .map(|(family, group)| collapse(&group).map(|nets| (family, nets)))
        .collect()
}

fn flatten(groups: &HashMap<Family, Vec<Network>>) -> Vec<Network> {
    groups
        .iter()
        .sorted_by_key(|(family, _)| **family)
        .flat_map(|(_, nets)| nets.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn strings(nets: &[Network]) -> Vec<String> {
        nets.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_filter_include() {
        let result = filter(&nets(&["10.1.0.0/16"]), &nets(&["10.0.0.0/8"]), &[]).unwrap();
        assert_eq!(strings(&result), vec!["10.1.0.0/16"]);
    }

    #[test]
    fn test_filter_include_then_exclude() {
        let result = filter(
            &nets(&["10.1.0.0/16"]),
            &nets(&["10.0.0.0/8"]),
            &nets(&["10.1.0.0/16"]),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_no_filters_passes_everything() {
        let candidates = nets(&["10.0.0.0/24", "192.168.0.0/16"]);
        assert_eq!(filter(&candidates, &[], &[]).unwrap(), candidates);
    }

    #[test]
    fn test_filter_partial_overlap_is_not_a_match() {
        // the /8 candidate overlaps the /16 include but is not inside it
        let result = filter(&nets(&["10.0.0.0/8"]), &nets(&["10.1.0.0/16"]), &[]).unwrap();
        assert!(result.is_empty());
        // and is not removed by a narrower exclude either
        let result = filter(&nets(&["10.0.0.0/8"]), &[], &nets(&["10.1.0.0/16"])).unwrap();
        assert_eq!(strings(&result), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_filter_includes_are_collapsed_first() {
        // neither half alone contains the /24, the collapsed /24 does
        let result = filter(
            &nets(&["192.168.0.0/24"]),
            &nets(&["192.168.0.128/25", "192.168.0.0/25"]),
            &[],
        )
        .unwrap();
        assert_eq!(strings(&result), vec!["192.168.0.0/24"]);
    }

    #[test]
    fn test_filter_keeps_candidate_order() {
        let result = filter(
            &nets(&["10.3.0.0/16", "172.16.0.0/16", "10.1.0.0/16"]),
            &nets(&["10.0.0.0/8"]),
            &[],
        )
        .unwrap();
        assert_eq!(strings(&result), vec!["10.3.0.0/16", "10.1.0.0/16"]);
    }

    #[test]
    fn test_filter_rejects_mixed_family() {
        let err = filter(&nets(&["10.0.0.0/8"]), &nets(&["10.0.0.0/8", "::/0"]), &[]).unwrap_err();
        assert_eq!(err, AggregateError::MixedFamily);
        let err = filter(&nets(&["10.0.0.0/8", "::/0"]), &[], &[]).unwrap_err();
        assert_eq!(err, AggregateError::MixedFamily);
    }

    #[test]
    fn test_containment_filter_per_family() {
        let filter = ContainmentFilter::new(&nets(&["10.0.0.0/8", "2001:db8::/32"]), &[]).unwrap();
        let result = filter.apply(&nets(&["10.1.0.0/16", "2001:db8:1::/48", "fd00::/8"]));
        assert_eq!(strings(&result), vec!["10.1.0.0/16", "2001:db8:1::/48"]);
        assert_eq!(strings(&filter.includes()), vec!["10.0.0.0/8", "2001:db8::/32"]);
    }

    #[test]
    fn test_containment_filter_family_without_includes() {
        let filter = ContainmentFilter::new(&nets(&["10.0.0.0/8"]), &[]).unwrap();
        assert!(!filter.is_included(&"2001:db8::/32".parse().unwrap()));
        assert!(filter.is_included(&"10.9.0.0/16".parse().unwrap()));
    }
}
