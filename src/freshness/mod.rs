//! Freshness classification for the arrivals board.
//!
//! Tracks consecutive failures, consecutive unchanged payloads and the age of
//! the last change, and derives a LIVE/STALE verdict once per poll cycle.
//! A STALE verdict never clears the board; the last good snapshot stays on
//! display with the indicator.

mod config;
mod state;


pub use config::*;
pub use state::*;
