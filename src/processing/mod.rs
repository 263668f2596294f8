//! Address aggregation engine.
//!
//! This module contains the algorithms that reduce address input:
//! - [`summarize`] - inclusive address range to minimal CIDR blocks
//! - [`collapse`] - minimal disjoint covering set of a network collection
//! - [`filter`] - include/exclude containment filtering
//! - [`dedup`] - exact-duplicate removal
//! - [`pipeline`] - sequencing of the stages above

mod collapse;
mod dedup;
mod filter;
mod pipeline;
mod summarize;

// Re-export public functions
pub use collapse::{collapse, common_family};
pub use dedup::de_duplicate_networks;
pub use filter::{filter, ContainmentFilter};
pub use pipeline::{expand_inputs, run, Aggregation, InputItem, PipelineOptions, SortOrder};
pub use summarize::summarize;
