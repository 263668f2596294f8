//! Well-known address class aliases usable in filters.
//!
//! The table is built once at start-up and handed to the filter parsing
//! explicitly; an alias expands to a fixed list of networks that is treated
//! exactly like networks given directly.

use super::parse::parse_network;
use crate::error::AggregateError;
use crate::models::{Address, Network};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Recognised class alias names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Alias {
    /// Private class A, `10.0.0.0/8`.
    A,
    /// Private class B, `172.16.0.0/12`.
    B,
    /// Private class C, `192.168.0.0/16`.
    C,
    /// Multicast, `224.0.0.0/4`.
    D,
    /// Reserved, `240.0.0.0/4`.
    E,
    /// Carrier-grade NAT, `100.64.0.0/10`.
    N,
    /// Loopback, `127.0.0.0/8`.
    L,
    /// Link-local, `169.254.0.0/16`.
    U,
}

impl Alias {
    pub const ALL: [Alias; 8] = [
        Alias::A,
        Alias::B,
        Alias::C,
        Alias::D,
        Alias::E,
        Alias::N,
        Alias::L,
        Alias::U,
    ];

    fn well_known(self) -> Vec<Network> {
        let (addr, len) = match self {
            Alias::A => (Ipv4Addr::new(10, 0, 0, 0), 8),
            Alias::B => (Ipv4Addr::new(172, 16, 0, 0), 12),
            Alias::C => (Ipv4Addr::new(192, 168, 0, 0), 16),
            Alias::D => (Ipv4Addr::new(224, 0, 0, 0), 4),
            Alias::E => (Ipv4Addr::new(240, 0, 0, 0), 4),
            Alias::N => (Ipv4Addr::new(100, 64, 0, 0), 10),
            Alias::L => (Ipv4Addr::new(127, 0, 0, 0), 8),
            Alias::U => (Ipv4Addr::new(169, 254, 0, 0), 16),
        };
        Network::new(Address::from(addr), len).into_iter().collect()
    }
}

impl FromStr for Alias {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Alias, AggregateError> {
        Alias::ALL
            .into_iter()
            .find(|alias| alias.to_string() == s)
            .ok_or_else(|| AggregateError::InvalidNetwork(format!("unknown alias {s}")))
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Read-only alias to network list mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<Alias, Vec<Network>>,
}

impl AliasTable {
    /// The table of well-known IPv4 classes.
    pub fn well_known() -> AliasTable {
        AliasTable {
            entries: Alias::ALL
                .into_iter()
                .map(|alias| (alias, alias.well_known()))
                .collect(),
        }
    }

    /// Networks behind `alias`, empty when the alias is not in the table.
    pub fn get(&self, alias: Alias) -> &[Network] {
        self.entries.get(&alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entries in alias order.
    pub fn entries(&self) -> impl Iterator<Item = (Alias, &[Network])> {
        self.entries.iter().map(|(alias, nets)| (*alias, nets.as_slice()))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::well_known()
    }
}

/// Resolve a filter argument: an alias name or a network token.
pub fn resolve_filter(token: &str, table: &AliasTable) -> Result<Vec<Network>, AggregateError> {
    let token = token.trim();
    match token.parse::<Alias>() {
        Ok(alias) => Ok(table.get(alias).to_vec()),
        Err(_) => parse_network(token).map(|net| vec![net]),
    }
}
