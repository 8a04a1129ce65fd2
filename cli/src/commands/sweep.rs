use std::io;
use std::sync::Arc;

use pingsweep_common::config::Config;
use pingsweep_common::network::range::SweepRequest;
use pingsweep_core::prober::IcmpProber;
use pingsweep_core::sweep::{SweepEngine, SweepReport};
use tracing::{debug, info};

use crate::terminal::{print, spinner};

pub async fn sweep(request: SweepRequest, cfg: &Config) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    print::sweep_header(&mut stdout, &request.prefix())?;

    info!("Probing with {:?} ICMP sockets", cfg.privilege);
    let prober = Arc::new(IcmpProber::new(cfg.privilege, cfg.policy.attempt_timeout));

    let pb = spinner::start_sweep_spinner(&request);
    let pb_ref = pb.clone();
    let engine = SweepEngine::new(prober, cfg.policy).on_responded(Arc::new(move |count: usize| {
        spinner::report_sweep_progress(&pb_ref, count);
    }));

    debug!("Sweeping {} hosts with {} workers", request.len(), engine.workers());

    let report: SweepReport = engine.run(&request).await;
    spinner::finish_sweep_spinner(&pb);

    print::results(&mut stdout, &report)?;
    Ok(())
}
