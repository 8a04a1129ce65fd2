//! Single-attempt reachability checks.
//!
//! The sweep engine only sees the [`Prober`] trait. [`IcmpProber`] is the
//! production implementation: one ICMP echo request per call, bounded by the
//! per-attempt timeout of the sweep policy.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use pingsweep_common::config::Privilege;
use rand::random;
use socket2::Type;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence, SurgeError};
use thiserror::Error;
use tokio::sync::OnceCell;

const PAYLOAD: [u8; 56] = [0; 56];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not open {privilege:?} ICMP socket: {source}")]
    Client {
        privilege: Privilege,
        #[source]
        source: io::Error,
    },

    #[error("echo request to {addr} failed: {source}")]
    Transport {
        addr: Ipv4Addr,
        #[source]
        source: SurgeError,
    },
}

/// Performs one bounded-time reachability check.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Sends one echo request to `addr`.
    ///
    /// `Ok(true)` means a reply arrived in time, `Ok(false)` means the attempt
    /// timed out. Errors are reported separately so callers can log them; the
    /// sweep treats them the same as a timeout.
    async fn probe(&self, addr: Ipv4Addr) -> Result<bool, ProbeError>;
}

/// ICMP echo prober backed by a lazily opened, shared `surge-ping` client.
pub struct IcmpProber {
    privilege: Privilege,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl IcmpProber {
    pub fn new(privilege: Privilege, timeout: Duration) -> Self {
        Self {
            privilege,
            timeout,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client, ProbeError> {
        self.client
            .get_or_try_init(|| async {
                let config = Config::builder()
                    .kind(ICMP::V4)
                    .sock_type_hint(socket_type(self.privilege))
                    .build();
                Client::new(&config).map_err(|source| ProbeError::Client {
                    privilege: self.privilege,
                    source,
                })
            })
            .await
    }
}

fn socket_type(privilege: Privilege) -> Type {
    match privilege {
        Privilege::Privileged => Type::RAW,
        Privilege::Unprivileged => Type::DGRAM,
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, addr: Ipv4Addr) -> Result<bool, ProbeError> {
        let client = self.client().await?;
        let mut pinger = client.pinger(IpAddr::V4(addr), PingIdentifier(random())).await;
        pinger.timeout(self.timeout);

        match pinger.ping(PingSequence(0), &PAYLOAD).await {
            Ok(_) => Ok(true),
            Err(SurgeError::Timeout { .. }) => Ok(false),
            Err(source) => Err(ProbeError::Transport { addr, source }),
        }
    }
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

    #[test]
    fn privilege_selects_socket_type() {
        assert_eq!(socket_type(Privilege::Privileged), Type::RAW);
        assert_eq!(socket_type(Privilege::Unprivileged), Type::DGRAM);
    }

    #[tokio::test]
    #[ignore]
    async fn icmp_probe_should_reach_loopback() {
        let prober = IcmpProber::new(Privilege::detect(), Duration::from_secs(1));
        let reached = prober.probe(Ipv4Addr::LOCALHOST).await.unwrap();
        assert!(reached);
    }

    #[tokio::test]
    #[ignore]
    async fn icmp_probe_should_time_out_on_unreachable_ip() {
        let prober = IcmpProber::new(Privilege::detect(), Duration::from_millis(500));
        let reached = prober.probe(Ipv4Addr::new(203, 0, 113, 1)).await;
        assert!(!matches!(reached, Ok(true)));
    }
}
