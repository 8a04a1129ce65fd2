use std::net::Ipv4Addr;

use thiserror::Error;

/// Failures while turning a menu selection into a sweep range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("no local IPv4 networks are available to sweep")]
    EmptyMenu,

    #[error("selection {index} is out of range (menu has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid network prefix '{0}'")]
    InvalidPrefix(String),

    #[error("host {host} does not fit in the network of {network}")]
    AddressOverflow { network: Ipv4Addr, host: u32 },
}
