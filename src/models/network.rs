//! CIDR network model.
//!
//! A [`Network`] is a canonical `(base, prefix_len)` pair: host bits of the
//! base are always zero. Broadcast and size are derived on demand.

use super::address::{cidr_mask, host_mask, Address, Family};
use crate::error::AggregateError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// IPv4 or IPv6 network in CIDR notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Network {
    base: Address,
    prefix_len: u8,
}

impl Network {
    /// Create a network, masking any host bits of `addr` to zero.
    ///
    /// `10.0.0.5/24` becomes `10.0.0.0/24`. Fails only when `prefix_len`
    /// exceeds the family bit width.
    ///
    /// # Examples
    /// ```
    /// use ip_aggregator::models::{Address, Network};
    /// let addr: Address = "10.0.0.5".parse().unwrap();
    /// let net = Network::new(addr, 24).unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/24");
    /// ```
    pub fn new(addr: Address, prefix_len: u8) -> Result<Network, AggregateError> {
        let family = addr.family();
        if prefix_len > family.bits() {
            return Err(AggregateError::InvalidNetwork(format!(
                "prefix length /{prefix_len} is too long for {family}"
            )));
        }
        let bits = addr.to_bits() & cidr_mask(family, prefix_len);
        Ok(Network {
            base: Address::from_bits(family, bits),
            prefix_len,
        })
    }

    /// Single host network (`/32` or `/128`).
    pub fn host(addr: Address) -> Network {
        Network {
            base: addr,
            prefix_len: addr.family().bits(),
        }
    }

    pub fn family(&self) -> Family {
        self.base.family()
    }

    /// The network (lowest) address.
    pub fn base(&self) -> Address {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of host bits, `bits - prefix_len`.
    pub fn host_bits(&self) -> u8 {
        self.family().bits() - self.prefix_len
    }

    /// Net mask as an address, e.g. `255.255.255.0` for a `/24`.
    pub fn netmask(&self) -> Address {
        Address::from_bits(self.family(), cidr_mask(self.family(), self.prefix_len))
    }

    /// Host (wildcard) mask as an address, e.g. `0.0.0.255` for a `/24`.
    pub fn hostmask(&self) -> Address {
        Address::from_bits(self.family(), host_mask(self.family(), self.prefix_len))
    }

    /// The highest address in the network.
    pub fn broadcast(&self) -> Address {
        let bits = self.base.to_bits() | host_mask(self.family(), self.prefix_len);
        Address::from_bits(self.family(), bits)
    }

    /// Number of addresses, `2^(bits - prefix_len)`.
    ///
    /// `None` only for `::/0`, whose size does not fit in a `u128`.
    pub fn size(&self) -> Option<u128> {
        1u128.checked_shl(u32::from(self.host_bits()))
    }

    /// True when `self` lies entirely inside `other` (equal networks included).
    ///
    /// Networks of different families never contain each other.
    pub fn subnet_of(&self, other: &Network) -> bool {
        self.family() == other.family()
            && self.prefix_len >= other.prefix_len
            && self.base.to_bits() & cidr_mask(other.family(), other.prefix_len)
                == other.base.to_bits()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn supernet_of(&self, other: &Network) -> bool {
        other.subnet_of(self)
    }

    /// True when the two networks share at least one address.
    pub fn overlaps(&self, other: &Network) -> bool {
        self.subnet_of(other) || other.subnet_of(self)
    }

    /// True when `addr` is inside this network.
    pub fn contains(&self, addr: Address) -> bool {
        addr.family() == self.family()
            && addr.to_bits() & cidr_mask(self.family(), self.prefix_len) == self.base.to_bits()
    }

    /// The enclosing network one bit shorter, `None` for a `/0`.
    pub fn supernet(&self) -> Option<Network> {
        let len = self.prefix_len.checked_sub(1)?;
        Network::new(self.base, len).ok()
    }

    /// True when `self` is the lower half and `other` the upper half of one
    /// parent network of `prefix_len - 1`.
    pub fn is_lower_sibling_of(&self, other: &Network) -> bool {
        if self.family() != other.family()
            || self.prefix_len != other.prefix_len
            || self.prefix_len == 0
        {
            return false;
        }
        let split_bit = 1u128 << self.host_bits();
        self.base.to_bits() & split_bit == 0
            && self.broadcast().to_bits().checked_add(1) == Some(other.base.to_bits())
    }

    /// Key used to order networks: family, then base, then prefix length.
    pub fn sort_key(&self) -> (Family, u128, u8) {
        (self.family(), self.base.to_bits(), self.prefix_len)
    }
}

/// Networks order by `(base, prefix_len)` within a family; the IPv4 universe
/// sorts before the IPv6 universe.
impl Ord for Network {
    fn cmp(&self, other: &Network) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parses the plain `addr` or `addr/len` forms; see
/// [`crate::input::parse_network`] for mask notations.
impl FromStr for Network {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Network, AggregateError> {
        let s = s.trim();
        match s.split_once('/') {
            None => Ok(Network::host(s.parse()?)),
            Some((addr, len)) => {
                let addr: Address = addr.parse()?;
                let invalid_len = || AggregateError::InvalidNetwork(format!("invalid prefix length in {s}"));
                if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid_len());
                }
                let len: u8 = len.parse().map_err(|_| invalid_len())?;
                Network::new(addr, len)
            }
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
