//! The concurrent sweep engine.
//!
//! One call to [`SweepEngine::run`] owns everything it needs: a bounded work
//! queue pre-loaded with the request's addresses, a results channel of the same
//! capacity and a fixed pool of worker tasks. Workers pull addresses until the
//! queue is drained, run the retry loop against the injected [`Prober`] and
//! push one [`ProbeOutcome`] per address. The caller gets the [`ResultSet`]
//! only after every worker has been joined.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use pingsweep_common::config::SweepPolicy;
use pingsweep_common::network::range::{HOSTS_PER_SWEEP, SweepRequest};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, trace};

use crate::prober::Prober;

/// Never more workers than there are addresses in a sweep.
pub const MAX_WORKERS: usize = HOSTS_PER_SWEEP;
const WORKERS_PER_CPU: usize = 20;

pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// `min(254, cpus * 20)`, never zero.
pub fn worker_count(cpus: usize) -> usize {
    cpus.saturating_mul(WORKERS_PER_CPU).clamp(1, MAX_WORKERS)
}

/// Worker count for the machine this runs on.
pub fn default_worker_count() -> usize {
    worker_count(num_cpus::get())
}

/// How one address ended up after its retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub addr: Ipv4Addr,
    pub responded: bool,
    pub attempts: u8,
}

/// Addresses that answered, in the order workers finished them.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    order: Vec<Ipv4Addr>,
    seen: HashSet<Ipv4Addr>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `addr` was already present.
    pub fn insert(&mut self, addr: Ipv4Addr) -> bool {
        if !self.seen.insert(addr) {
            return false;
        }
        self.order.push(addr);
        true
    }

    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        self.seen.contains(addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ipv4Addr> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<Ipv4Addr> {
        self.order
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Ipv4Addr;
    type IntoIter = std::slice::Iter<'a, Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Everything one sweep produced.
#[derive(Debug)]
pub struct SweepReport {
    pub responded: ResultSet,
    /// Addresses that reached a final classification, responded or not.
    pub probed: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

impl SweepReport {
    pub fn silent(&self) -> usize {
        self.probed - self.responded.len()
    }
}

pub struct SweepEngine {
    prober: Arc<dyn Prober>,
    policy: SweepPolicy,
    workers: usize,
    on_responded: Option<ProgressCallback>,
}

impl SweepEngine {
    pub fn new(prober: Arc<dyn Prober>, policy: SweepPolicy) -> Self {
        Self {
            prober,
            policy,
            workers: default_worker_count(),
            on_responded: None,
        }
    }

    /// Overrides the pool size. Clamped to `1..=254`.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }

    /// Called with the running count of responding hosts each time one answers.
    pub fn on_responded(mut self, callback: ProgressCallback) -> Self {
        self.on_responded = Some(callback);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Probes every address of `request` and returns once all workers are joined.
    pub async fn run(&self, request: &SweepRequest) -> SweepReport {
        let start_time = Instant::now();
        let capacity: usize = request.len().max(1);

        let (work_tx, work_rx) = async_channel::bounded::<Ipv4Addr>(capacity);
        let (result_tx, mut result_rx) = mpsc::channel::<ProbeOutcome>(capacity);

        for addr in request.iter() {
            if work_tx.send(addr).await.is_err() {
                break;
            }
        }
        work_tx.close();

        info!(
            "Sweeping {} addresses of {} with {} workers",
            request.len(),
            request.prefix(),
            self.workers
        );

        let responded_count = Arc::new(AtomicUsize::new(0));
        let mut workers: JoinSet<()> = JoinSet::new();

        for _ in 0..self.workers {
            let queue = work_rx.clone();
            let results = result_tx.clone();
            let prober = Arc::clone(&self.prober);
            let policy = self.policy;
            let count_ref = Arc::clone(&responded_count);
            let cb_ref = self.on_responded.clone();

            workers.spawn(async move {
                while let Ok(addr) = queue.recv().await {
                    let outcome = probe_with_retry(prober.as_ref(), addr, &policy).await;

                    if outcome.responded {
                        let count = count_ref.fetch_add(1, Ordering::Relaxed) + 1;
                        if let Some(cb) = &cb_ref {
                            cb(count);
                        }
                    }

                    if results.send(outcome).await.is_err() {
                        break;
                    }
                }
            });
        }

        drop(work_rx);
        drop(result_tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Sweep worker stopped unexpectedly: {e}");
            }
        }

        result_rx.close();

        let mut responded = ResultSet::new();
        let mut probed: usize = 0;
        while let Some(outcome) = result_rx.recv().await {
            probed += 1;
            if outcome.responded {
                responded.insert(outcome.addr);
            }
        }

        let elapsed = start_time.elapsed();
        info!(
            "Sweep finished: {} of {} addresses responded in {:.2}s",
            responded.len(),
            probed,
            elapsed.as_secs_f64()
        );

        SweepReport {
            responded,
            probed,
            workers: self.workers,
            elapsed,
        }
    }
}

/// Runs the retry loop for a single address.
///
/// Every failed attempt is followed by `policy.backoff`, the last one included.
/// Probe errors count as a missing reply.
pub async fn probe_with_retry(
    prober: &dyn Prober,
    addr: Ipv4Addr,
    policy: &SweepPolicy,
) -> ProbeOutcome {
    let max_attempts: u8 = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match prober.probe(addr).await {
            Ok(true) => {
                return ProbeOutcome {
                    addr,
                    responded: true,
                    attempts: attempt,
                };
            }
            Ok(false) => trace!("{addr}: no echo reply (attempt {attempt})"),
            Err(e) => debug!("{addr}: {e} (attempt {attempt})"),
        }

        tokio::time::sleep(policy.backoff).await;
    }

    ProbeOutcome {
        addr,
        responded: false,
        attempts: max_attempts,
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
