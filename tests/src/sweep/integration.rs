#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

use pingsweep_common::config::SweepPolicy;
use pingsweep_common::error::RangeError;
use pingsweep_common::network::range::{self, NetworkPrefix};
use pingsweep_core::sweep::{SweepEngine, SweepReport};

use crate::support::{ScriptedProber, Silence, request};

async fn sweep_with(prober: Arc<ScriptedProber>, cidr: &str, workers: usize) -> SweepReport {
    SweepEngine::new(prober, SweepPolicy::default())
        .with_workers(workers)
        .run(&request(cidr))
        .await
}

/// Only the first and last host answer; the result must not depend on the pool size.
#[tokio::test(start_paused = true)]
async fn sweep_finds_first_and_last_host() {
    let expected = HashSet::from([Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 254)]);

    for workers in [1, 20, 254] {
        let prober = Arc::new(ScriptedProber::new(expected.clone(), Silence::NoReply));
        let report = sweep_with(prober.clone(), "10.0.0.0/24", workers).await;

        let found: HashSet<Ipv4Addr> = report.responded.iter().copied().collect();
        assert_eq!(found, expected, "workers = {workers}");
        assert_eq!(report.responded.len(), 2, "workers = {workers}");
        assert_eq!(prober.calls(), 2 + 252 * 2, "workers = {workers}");
    }
}

#[tokio::test(start_paused = true)]
async fn result_is_duplicate_free_subset_for_any_pool_size() {
    let req = request("192.168.10.0/24");

    for workers in 1..=254usize {
        let alive: Vec<Ipv4Addr> = req
            .iter()
            .filter(|addr| (addr.octets()[3] as usize * workers) % 7 == 0)
            .collect();
        let prober = Arc::new(ScriptedProber::new(alive.clone(), Silence::NoReply));

        let report = SweepEngine::new(prober, SweepPolicy::default())
            .with_workers(workers)
            .run(&req)
            .await;

        let unique: HashSet<&Ipv4Addr> = report.responded.iter().collect();
        assert_eq!(unique.len(), report.responded.len(), "workers = {workers}");
        assert!(report.responded.iter().all(|a| req.contains(a)), "workers = {workers}");
        assert_eq!(report.responded.len(), alive.len(), "workers = {workers}");
        assert_eq!(report.responded.len() + report.silent(), req.len(), "workers = {workers}");
    }
}

#[tokio::test(start_paused = true)]
async fn probe_errors_degrade_to_no_reply() {
    let alive = [Ipv4Addr::new(172, 16, 3, 100)];
    let prober = Arc::new(ScriptedProber::new(alive, Silence::Error));

    let report = sweep_with(prober.clone(), "172.16.3.0/24", 20).await;

    assert_eq!(report.responded.into_vec(), alive.to_vec());
    assert_eq!(report.probed, 254);
    assert_eq!(prober.calls(), 1 + 253 * 2);
}

#[tokio::test(start_paused = true)]
async fn selected_menu_entry_is_swept() {
    let menu: Vec<NetworkPrefix> = vec![
        "192.168.1.0/24".parse().unwrap(),
        "10.8.0.0/24".parse().unwrap(),
    ];
    let req = range::select(&menu, 1).unwrap();
    let prober = Arc::new(ScriptedProber::new([Ipv4Addr::new(10, 8, 0, 42)], Silence::NoReply));

    let report = SweepEngine::new(prober, SweepPolicy::default())
        .with_workers(20)
        .run(&req)
        .await;

    assert!(report.responded.contains(&Ipv4Addr::new(10, 8, 0, 42)));
    assert_eq!(report.responded.len(), 1);
}

#[test]
fn empty_menu_never_reaches_the_engine() {
    assert_eq!(range::select(&[], 0), Err(RangeError::EmptyMenu));
}
