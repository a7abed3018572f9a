//! Arrival parsing for the station feed.
//!
//! Turns the raw feed document into a [`FeedSnapshot`]: the arrivals for one
//! station, normalized and sorted by ETA.

mod colors;
mod error;
mod parser;
mod types;


pub use colors::{normalize_color, parse_line_colors, FALLBACK_COLOR};
pub use error::ParseError;
pub use parser::{parse_last_updated, parse_station_feed};
pub use types::{ArrivalEntry, FeedSnapshot};
