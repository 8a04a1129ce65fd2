use std::collections::HashSet;
use std::io;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pingsweep_common::config::Privilege;
use pingsweep_common::network::range::{NetworkPrefix, SweepRequest};
use pingsweep_core::prober::{ProbeError, Prober};

/// What a [`ScriptedProber`] does for addresses outside its alive set.
#[derive(Clone, Copy)]
pub enum Silence {
    /// Times out, like a host that is down.
    NoReply,
    /// Fails, like a socket that could not be opened.
    Error,
}

pub struct ScriptedProber {
    alive: HashSet<Ipv4Addr>,
    silence: Silence,
    calls: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(alive: impl IntoIterator<Item = Ipv4Addr>, silence: Silence) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            silence,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, addr: Ipv4Addr) -> Result<bool, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.alive.contains(&addr) {
            return Ok(true);
        }
        match self.silence {
            Silence::NoReply => Ok(false),
            Silence::Error => Err(ProbeError::Client {
                privilege: Privilege::Unprivileged,
                source: io::Error::new(io::ErrorKind::PermissionDenied, "operation not permitted"),
            }),
        }
    }
}

pub fn request(cidr: &str) -> SweepRequest {
    let prefix: NetworkPrefix = cidr.parse().expect("valid prefix");
    SweepRequest::from_prefix(prefix).expect("valid range")
}
