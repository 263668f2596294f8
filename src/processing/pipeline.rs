//! Pipeline coordinator.
//!
//! Sequences summarization, optional de-duplication, include/exclude
//! filtering, collapsing and sorting. IPv4 and IPv6 are handled as disjoint
//! universes: filters only match their own family and each family is
//! collapsed on its own.

use super::collapse::collapse;
use super::dedup::de_duplicate_networks;
use super::filter::ContainmentFilter;
use super::summarize::summarize;
use crate::error::AggregateError;
use crate::models::{Address, Network};
use itertools::Itertools;

/// One input to the pipeline: a network or an inclusive address range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputItem {
    Network(Network),
    Range(Address, Address),
}

impl From<Network> for InputItem {
    fn from(net: Network) -> InputItem {
        InputItem::Network(net)
    }
}

/// Requested output order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Pipeline switches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Collapse the filtered networks.
    pub aggregate: bool,
    /// Drop exact duplicates; only honoured when not aggregating.
    pub dedupe: bool,
    /// Sort the output, `None` keeps filter-pass order.
    pub sort: Option<SortOrder>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            aggregate: true,
            dedupe: false,
            sort: None,
        }
    }
}

/// Result of a pipeline run with its diagnostic counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Output networks.
    pub networks: Vec<Network>,
    /// Networks entering the pipeline, after range summarization, in input order.
    pub inputs: Vec<Network>,
    /// Collapsed include networks that were applied.
    pub includes_applied: Vec<Network>,
    /// Collapsed exclude networks that were applied.
    pub excludes_applied: Vec<Network>,
}

impl Aggregation {
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.networks.len()
    }
}

/// Expand ranges into networks, keeping input order.
pub fn expand_inputs(inputs: &[InputItem]) -> Result<Vec<Network>, AggregateError> {
    let mut nets = Vec::with_capacity(inputs.len());
    for item in inputs {
        match *item {
            InputItem::Network(net) => nets.push(net),
            InputItem::Range(first, last) => nets.extend(summarize(first, last)?),
        }
    }
    Ok(nets)
}

/// Run the full pipeline over `inputs`.
///
/// Fails with [`AggregateError::EmptyInput`] when there is nothing to
/// process before filtering. Any error aborts the whole run.
pub fn run(
    inputs: &[InputItem],
    includes: &[Network],
    excludes: &[Network],
    options: &PipelineOptions,
) -> Result<Aggregation, AggregateError> {
    let networks = expand_inputs(inputs)?;
    if networks.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    log::info!("Input {} networks", networks.len());

    let deduped;
    let candidates: &[Network] = if !options.aggregate && options.dedupe {
        deduped = de_duplicate_networks(&networks);
        &deduped
    } else {
        &networks
    };

    let containment = ContainmentFilter::new(includes, excludes)?;
    let includes_applied = containment.includes();
    let excludes_applied = containment.excludes();
    for include in &includes_applied {
        log::info!("Applying include filter {include}");
    }
    for exclude in &excludes_applied {
        log::info!("Applying exclude filter {exclude}");
    }
    let filtered = containment.apply(candidates);

    let mut output = if options.aggregate {
        collapse_per_family(&filtered)?
    } else {
        log::info!("Not aggregating networks as requested");
        filtered
    };

    match options.sort {
        Some(SortOrder::Ascending) => output.sort(),
        Some(SortOrder::Descending) => output.sort_by(|a, b| b.cmp(a)),
        None => {}
    }

    log::info!("{} networks total", output.len());
    Ok(Aggregation {
        networks: output,
        inputs: networks,
        includes_applied,
        excludes_applied,
    })
}

/// Collapse each family on its own, IPv4 universe first.
fn collapse_per_family(nets: &[Network]) -> Result<Vec<Network>, AggregateError> {
    let mut collapsed = Vec::new();
    for (_, group) in &nets.iter().copied().sorted_by_key(Network::family).group_by(Network::family) {
        collapsed.extend(collapse(&group.collect::<Vec<_>>())?);
    }
    Ok(collapsed)
}
