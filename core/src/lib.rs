//! Concurrent ICMP sweep engine.
//!
//! [`sweep::SweepEngine`] classifies every address of a
//! [`pingsweep_common::network::range::SweepRequest`] using a fixed worker pool
//! and the injected [`prober::Prober`].

pub mod prober;
pub mod sweep;
