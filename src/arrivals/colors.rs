//! Line color normalization.

/// Color used when the feed gives no usable line color.
pub const FALLBACK_COLOR: &str = "#999999";

/// Maximum colors kept per line; a split bar has two halves.
const MAX_COLORS: usize = 2;

/// Normalize one hex color to `#RRGGBB` uppercase.
///
/// Three-digit shorthand is expanded. Anything else is passed through
/// uppercased, since the feed occasionally sends non-hex names.
pub fn normalize_color(value: &str) -> String {
    let value = value.trim().trim_start_matches('#');
    if value.is_empty() {
        return FALLBACK_COLOR.to_string();
    }

    let expanded: String = if value.len() == 3 {
        value.chars().flat_map(|c| [c, c]).collect()
    } else {
        value.to_string()
    };

    format!("#{}", expanded.to_uppercase())
}

/// Split a composite `lineColor` field ("4D92FB,FF9900") into one or two colors.
pub fn parse_line_colors(raw: &str) -> Vec<String> {
    let colors: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(MAX_COLORS)
        .map(normalize_color)
        .collect();

    if colors.is_empty() {
        vec![FALLBACK_COLOR.to_string()]
    } else {
        colors
    }
}
