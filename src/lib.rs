//! trainboard - live transit arrivals with adaptive polling
//!
//! Polls a real-time arrivals feed on a schedule that tightens as trains
//! approach, backs off on failures, and labels the displayed arrivals LIVE or
//! STALE so a board never silently shows frozen data.

pub mod arrivals;
pub mod cli;
pub mod config;
pub mod feed;
pub mod freshness;
pub mod logging;
pub mod metrics;
pub mod outcome;
pub mod scheduler;
