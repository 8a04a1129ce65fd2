use std::time::Duration;

use is_root::is_root;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 2;
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(300);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);

/// Retry policy applied to every address of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPolicy {
    /// Upper bound on echo requests sent to a single address.
    pub max_attempts: u8,
    /// Pause between a failed attempt and the next one.
    pub backoff: Duration,
    /// How long a single attempt waits for an echo reply.
    pub attempt_timeout: Duration,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

/// Kind of ICMP socket the prober is allowed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Raw ICMP socket.
    Privileged,
    /// Datagram ICMP socket, usable by ordinary users where the OS allows it.
    Unprivileged,
}

impl Privilege {
    /// Resolves the socket mode for this process. Called once at startup.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") || is_root() {
            Privilege::Privileged
        } else {
            Privilege::Unprivileged
        }
    }
}

pub struct Config {
    pub policy: SweepPolicy,
    pub privilege: Privilege,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            policy: SweepPolicy::default(),
            privilege: Privilege::detect(),
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
