//! # Sweep Range Model
//!
//! A [`NetworkPrefix`] is one IPv4 network found on a local interface. A
//! [`SweepRequest`] is the list of host addresses probed for that network:
//! always the 254 usable hosts `x.y.z.1` through `x.y.z.254` of the /24
//! starting at the prefix's network address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::RangeError;

pub const FIRST_HOST: u32 = 1;
pub const LAST_HOST: u32 = 254;
pub const HOSTS_PER_SWEEP: usize = (LAST_HOST - FIRST_HOST + 1) as usize;

const SLASH_24_MASK: u32 = 0xFFFF_FF00;

/// An IPv4 network address plus prefix length. Host bits are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkPrefix {
    network: Ipv4Addr,
    prefix: u8,
}

impl NetworkPrefix {
    /// Builds a prefix from any address inside the network; host bits are masked off.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, RangeError> {
        let net = Ipv4Network::new(addr, prefix)
            .map_err(|_| RangeError::InvalidPrefix(format!("{addr}/{prefix}")))?;
        Ok(Self::from(net))
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl From<Ipv4Network> for NetworkPrefix {
    fn from(net: Ipv4Network) -> Self {
        Self {
            network: net.network(),
            prefix: net.prefix(),
        }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl FromStr for NetworkPrefix {
    type Err = RangeError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            return Err(RangeError::InvalidPrefix(s.to_string()));
        };

        let addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| RangeError::InvalidPrefix(s.to_string()))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| RangeError::InvalidPrefix(s.to_string()))?;

        Self::new(addr, prefix)
    }
}

/// The ordered host addresses probed in one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRequest {
    prefix: NetworkPrefix,
    addresses: Vec<Ipv4Addr>,
}

impl SweepRequest {
    /// Expands `prefix` into hosts 1 through 254 of its /24, ascending.
    pub fn from_prefix(prefix: NetworkPrefix) -> Result<Self, RangeError> {
        let base: u32 = u32::from(prefix.network()) & SLASH_24_MASK;

        let addresses = (FIRST_HOST..=LAST_HOST)
            .map(|host| {
                base.checked_add(host)
                    .map(Ipv4Addr::from)
                    .ok_or(RangeError::AddressOverflow {
                        network: prefix.network(),
                        host,
                    })
            })
            .collect::<Result<Vec<Ipv4Addr>, RangeError>>()?;

        Ok(Self { prefix, addresses })
    }

    pub fn prefix(&self) -> NetworkPrefix {
        self.prefix
    }

    pub fn addresses(&self) -> &[Ipv4Addr] {
        &self.addresses
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addresses.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        self.addresses.contains(addr)
    }
}

/// Builds the sweep range for entry `index` of the menu.
///
/// An empty menu fails with [`RangeError::EmptyMenu`] rather than
/// producing a range for a network that does not exist.
pub fn select(menu: &[NetworkPrefix], index: usize) -> Result<SweepRequest, RangeError> {
    if menu.is_empty() {
        return Err(RangeError::EmptyMenu);
    }

    let prefix = menu.get(index).ok_or(RangeError::IndexOutOfRange {
        index,
        len: menu.len(),
    })?;

    SweepRequest::from_prefix(*prefix)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(s: &str) -> NetworkPrefix {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefix_masks_host_bits() {
        let p = NetworkPrefix::new(Ipv4Addr::new(192, 168, 1, 77), 24).unwrap();
        assert_eq!(p.network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(p.prefix(), 24);
        assert_eq!(p.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_prefix_from_str() {
        assert_eq!(prefix("10.0.0.0/24").network(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(prefix("172.16.5.9/16").to_string(), "172.16.0.0/16");

        assert!("10.0.0.0".parse::<NetworkPrefix>().is_err());
        assert!("10.0.0.0/33".parse::<NetworkPrefix>().is_err());
        assert!("10.0.0.256/24".parse::<NetworkPrefix>().is_err());
        assert!("not-a-prefix".parse::<NetworkPrefix>().is_err());
    }

    #[test]
    fn test_request_has_254_ascending_hosts() {
        let request = SweepRequest::from_prefix(prefix("192.168.1.0/24")).unwrap();
        assert_eq!(request.len(), HOSTS_PER_SWEEP);
        assert_eq!(request.len(), 254);

        for (i, addr) in request.iter().enumerate() {
            let [a, b, c, d] = addr.octets();
            assert_eq!([a, b, c], [192, 168, 1]);
            assert_eq!(d as usize, i + 1);
        }
    }

    #[test]
    fn test_request_bounds() {
        let request = SweepRequest::from_prefix(prefix("10.0.0.0/24")).unwrap();
        assert_eq!(request.addresses().first(), Some(&Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(request.addresses().last(), Some(&Ipv4Addr::new(10, 0, 0, 254)));
        assert!(!request.contains(&Ipv4Addr::new(10, 0, 0, 0)));
        assert!(!request.contains(&Ipv4Addr::new(10, 0, 0, 255)));
    }

    #[test]
    fn test_wider_prefix_sweeps_first_slash_24() {
        let request = SweepRequest::from_prefix(prefix("10.20.0.0/16")).unwrap();
        assert_eq!(request.len(), 254);
        assert_eq!(request.addresses()[0], Ipv4Addr::new(10, 20, 0, 1));
        assert_eq!(request.prefix().to_string(), "10.20.0.0/16");
    }

    #[test]
    fn test_select_valid_index() {
        let menu = [prefix("192.168.1.0/24"), prefix("10.0.0.0/24")];
        let request = select(&menu, 1).unwrap();
        assert_eq!(request.prefix(), menu[1]);
        assert_eq!(request.addresses()[0], Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn test_select_out_of_range() {
        let menu = [prefix("192.168.1.0/24"), prefix("10.0.0.0/24")];
        assert_eq!(
            select(&menu, 2),
            Err(RangeError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(select(&menu, 99).is_err());
    }

    #[test]
    fn test_select_on_empty_menu_fails_distinctly() {
        assert_eq!(select(&[], 0), Err(RangeError::EmptyMenu));
    }
}
