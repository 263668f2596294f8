//! IP address model shared by both families.
//!
//! An [`Address`] is a fixed-width unsigned integer tagged with its
//! [`Family`]. All bit arithmetic is done on the `u128` widening of the
//! payload and checked against [`Family::bits`], so one code path serves
//! IPv4 and IPv6 without ever mixing the two.

use crate::error::AggregateError;
use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Address family. IPv4 sorts before IPv6 when disjoint universes are listed together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Bit width of an address in this family (32 or 128).
    pub const fn bits(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// All address bits set, widened to `u128`.
    pub const fn all_ones(self) -> u128 {
        match self {
            Family::V4 => u32::MAX as u128,
            Family::V6 => u128::MAX,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// Host mask for `len` network bits: the low `bits - len` bits set.
///
/// # Examples
/// ```
/// use ip_aggregator::models::{host_mask, Family};
/// assert_eq!(host_mask(Family::V4, 24), 0xFF);
/// assert_eq!(host_mask(Family::V6, 128), 0);
/// ```
pub fn host_mask(family: Family, len: u8) -> u128 {
    family.all_ones().checked_shr(u32::from(len)).unwrap_or(0)
}

/// Network mask for `len` network bits, widened to `u128`.
///
/// # Examples
/// ```
/// use ip_aggregator::models::{cidr_mask, Family};
/// assert_eq!(cidr_mask(Family::V4, 24), 0xFFFF_FF00);
/// ```
pub fn cidr_mask(family: Family, len: u8) -> u128 {
    family.all_ones() ^ host_mask(family, len)
}

/// Smallest prefix length `bits` can be the base of, based on trailing zeros.
pub fn lo_mask(family: Family, bits: u128) -> u8 {
    let trailing_zeros = bits.trailing_zeros().min(u32::from(family.bits())) as u8;
    family.bits() - trailing_zeros
}

/// A single IPv4 or IPv6 address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    V4(u32),
    V6(u128),
}

impl Address {
    /// Build an address of `family` from a widened integer.
    ///
    /// Bits above the family width are dropped.
    pub fn from_bits(family: Family, bits: u128) -> Address {
        match family {
            Family::V4 => Address::V4((bits & Family::V4.all_ones()) as u32),
            Family::V6 => Address::V6(bits),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    /// The address as an unsigned integer widened to `u128`.
    pub fn to_bits(&self) -> u128 {
        match *self {
            Address::V4(bits) => u128::from(bits),
            Address::V6(bits) => bits,
        }
    }

    /// Compare two addresses of the same family.
    ///
    /// Comparing across families is a caller error and fails with
    /// [`AggregateError::MixedFamily`].
    pub fn checked_cmp(&self, other: &Address) -> Result<Ordering, AggregateError> {
        if self.family() != other.family() {
            return Err(AggregateError::MixedFamily);
        }
        Ok(self.to_bits().cmp(&other.to_bits()))
    }
}

/// Only same-family addresses are ordered; mixed pairs yield `None`.
impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Address {
        Address::V4(u32::from(addr))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Address {
        Address::V6(u128::from(addr))
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Address {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> IpAddr {
        match addr {
            Address::V4(bits) => IpAddr::V4(Ipv4Addr::from(bits)),
            Address::V6(bits) => IpAddr::V6(Ipv6Addr::from(bits)),
        }
    }
}

impl FromStr for Address {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Address, AggregateError> {
        s.parse::<IpAddr>()
            .map(Address::from)
            .map_err(|_| AggregateError::InvalidNetwork(format!("invalid address {s}")))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", IpAddr::from(*self))
    }
}
