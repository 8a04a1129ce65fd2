use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

use crate::network::range::NetworkPrefix;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn is_sweepable(&self) -> bool;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn is_sweepable(&self) -> bool {
        self.is_up() && !self.is_loopback()
    }
}

/// Lists the IPv4 networks of every local interface that is up and not a loopback.
pub fn local_ipv4_prefixes() -> anyhow::Result<Vec<NetworkPrefix>> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    if interfaces.is_empty() {
        anyhow::bail!("Interfaces Error: no network interfaces could be listed");
    }

    Ok(collect_prefixes(&interfaces))
}

/// Masks each IPv4 address of the usable interfaces down to its network.
///
/// Entries keep interface order; a network reachable through two interfaces is listed once.
pub fn collect_prefixes(interfaces: &[NetworkInterface]) -> Vec<NetworkPrefix> {
    let mut prefixes: Vec<NetworkPrefix> = Vec::new();

    for intf in interfaces.iter().filter(|i| i.is_sweepable()) {
        for net in intf.get_ipv4_nets() {
            let prefix = NetworkPrefix::from(net);
            if prefixes.contains(&prefix) {
                continue;
            }
            debug!("{} carries {prefix}", intf.name);
            prefixes.push(prefix);
        }
    }

    prefixes
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
