//! Board display configuration

use serde::{Deserialize, Serialize};

/// How much of the board the terminal view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Arrival cards shown, soonest first
    pub max_cards: usize,
    /// Print the whole board again on every update instead of only on change
    pub redraw_unchanged: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_cards: 5,
            redraw_unchanged: false,
        }
    }
}
