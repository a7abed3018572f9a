//! Output formatting helpers for CLI commands

use crate::arrivals::{ArrivalEntry, FALLBACK_COLOR};
use crate::freshness::{FreshnessState, Verdict};
use crate::scheduler::BoardState;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Human ETA for a card: "now" under a minute, whole minutes otherwise.
pub fn format_eta(seconds: u32) -> String {
    if seconds < 60 {
        "now".to_string()
    } else {
        format!("{} min", seconds / 60)
    }
}

/// Split a `#RRGGBB` color into its channels.
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Colored bar for a line: one block per color, two for a split line.
pub fn line_swatch(colors: &[String]) -> String {
    let fallback = [FALLBACK_COLOR.to_string()];
    let colors = if colors.is_empty() { &fallback[..] } else { colors };

    colors
        .iter()
        .map(|c| {
            let (r, g, b) = hex_rgb(c).unwrap_or((0x99, 0x99, 0x99));
            "██".truecolor(r, g, b).to_string()
        })
        .collect()
}

/// LIVE/STALE indicator, with the cause when STALE.
pub fn verdict_badge(freshness: &FreshnessState) -> String {
    match freshness.verdict {
        Verdict::Live => "● LIVE".green().bold().to_string(),
        Verdict::Stale => {
            let cause = freshness
                .stale_cause
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            format!("{}{}", "● STALE".red().bold(), cause.dimmed())
        }
    }
}

fn arrival_row(entry: &ArrivalEntry) -> Vec<Cell> {
    let message = if entry.arrival_message.is_empty() {
        format_eta(entry.seconds_to_arrival)
    } else {
        entry.arrival_message.clone()
    };

    vec![
        Cell::new(line_swatch(&entry.line_colors)),
        Cell::new(&entry.headsign),
        Cell::new(&entry.label),
        Cell::new(message),
        Cell::new(format_eta(entry.seconds_to_arrival)),
    ]
}

/// Render the board: a status line, then up to `max_cards` arrivals.
///
/// While STALE the last good arrivals are still shown under the indicator.
pub fn format_board(
    board: &BoardState,
    station: &str,
    max_cards: usize,
    now: DateTime<Utc>,
) -> String {
    let mut status = format!("{}  {}", station.bold(), verdict_badge(&board.freshness));

    let Some(snapshot) = &board.snapshot else {
        status.push_str("\n  Waiting for the first arrivals...");
        return status;
    };

    let age = (now - snapshot.last_updated).num_seconds().max(0);
    status.push_str(&format!("  updated {}s ago", age));
    if let Some(ms) = board.next_poll_ms {
        status.push_str(&format!(", next poll in {}s", ms / 1000));
    }

    if snapshot.is_empty() {
        status.push_str("\n  No trains listed for this station");
        return status;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Line", "To", "Direction", "Status", "ETA"]);

    for entry in snapshot.top(max_cards) {
        table.add_row(arrival_row(entry));
    }

    format!("{}\n{}", status, table)
}

/// Board as pretty JSON.
pub fn format_board_json(board: &BoardState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(board)
}
