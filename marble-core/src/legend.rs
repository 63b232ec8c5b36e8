//! Legend synthesis from raw lane notation

use std::collections::BTreeSet;

use crate::ast::Lane;
use crate::marble::{write_shape, Fill, Shape};
use crate::renderer::Config;
use crate::token::MarbleColor;

/// One row of the legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub symbol: char,
    pub label: String,
    pub shape: Shape,
    pub fill: Fill,
}

/// Build legend rows for every message identity and event category used
/// anywhere in the lanes. Message rows come first, sorted by letter.
pub fn legend_entries(lanes: &[Lane]) -> Vec<LegendEntry> {
    let messages: BTreeSet<char> = lanes
        .iter()
        .flat_map(|lane| lane.notation.chars())
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    let mut entries: Vec<LegendEntry> = messages
        .into_iter()
        .filter_map(|c| {
            MarbleColor::for_message(c).map(|color| LegendEntry {
                symbol: c,
                label: format!("Message {}", c.to_ascii_uppercase()),
                shape: Shape::Circle,
                fill: Fill::Message(color),
            })
        })
        .collect();

    let uses = |symbols: &[char]| lanes.iter().any(|lane| lane.notation.contains(symbols));

    if uses(&['R', 'C', 'L']) {
        entries.push(LegendEntry {
            symbol: 'R',
            label: "Events".to_string(),
            shape: Shape::Diamond,
            fill: Fill::Special,
        });
    }
    if uses(&['X']) {
        entries.push(LegendEntry {
            symbol: 'X',
            label: "Errors".to_string(),
            shape: Shape::Square,
            fill: Fill::Error,
        });
    }
    if uses(&['|']) {
        entries.push(LegendEntry {
            symbol: '|',
            label: "Complete".to_string(),
            shape: Shape::Circle,
            fill: Fill::Complete,
        });
    }

    entries
}

/// Panel height for a number of rows, never below the configured minimum
pub fn legend_height(rows: usize, config: &Config) -> f64 {
    let content = config.legend_row_height * (rows + 1) as f64 + 10.0;
    content.max(config.legend_min_height)
}

/// Append the legend panel, anchored to the top-right of the canvas
pub fn write_legend(svg: &mut String, entries: &[LegendEntry], canvas_width: f64, config: &Config) {
    let radius = config.marble_radius;
    svg.push_str(&format!(
        "<g transform=\"translate({x}, {y})\">\n",
        x = canvas_width - config.legend_right_offset,
        y = config.legend_top,
    ));
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" class="legend-panel" rx="8"/>"#,
        w = config.legend_width,
        h = legend_height(entries.len(), config),
    ));
    svg.push('\n');
    svg.push_str(r#"<text x="15" y="20" class="stream-label">Legend:</text>"#);
    svg.push('\n');

    let mut y = config.legend_row_height;
    for entry in entries {
        write_shape(svg, entry.shape, entry.fill, 25.0, y, radius, entry.symbol);
        svg.push_str(&format!(
            r#"<text x="45" y="{ty}" class="description">{label}</text>"#,
            ty = y + 5.0,
            label = entry.label,
        ));
        svg.push('\n');
        y += config.legend_row_height;
    }

    svg.push_str("</g>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn symbols(entries: &[LegendEntry]) -> String {
        entries.iter().map(|e| e.symbol).collect()
    }

    #[test]
    fn test_messages_sorted_and_deduplicated() {
        let lanes = vec![Lane::new("producer", "c--a--b--a|"), Lane::new("consumer", "--b--d-|")];
        let entries = legend_entries(&lanes);
        assert_eq!(symbols(&entries), "abcd|");
        assert_eq!(entries[0].label, "Message A");
        assert_eq!(entries[0].fill, Fill::Message(MarbleColor::Blue));
    }

    #[test]
    fn test_categories_appear_once() {
        let lanes = vec![
            Lane::new("rebalance", "-R--C--L-|"),
            Lane::new("consumer", "X--R--X-|"),
        ];
        let entries = legend_entries(&lanes);
        assert_eq!(symbols(&entries), "RX|");
        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Events", "Errors", "Complete"]);
        assert_eq!(entries[0].shape, Shape::Diamond);
        assert_eq!(entries[1].shape, Shape::Square);
    }

    #[test]
    fn test_lane_order_does_not_matter() {
        let a = vec![Lane::new("one", "z-a-|"), Lane::new("two", "m-X")];
        let b = vec![Lane::new("two", "m-X"), Lane::new("one", "z-a-|")];
        assert_eq!(legend_entries(&a), legend_entries(&b));
    }

    #[test]
    fn test_empty_legend_keeps_minimum_height() {
        let config = Config::default();
        assert!(legend_entries(&[]).is_empty());
        assert_eq!(legend_height(0, &config), 120.0);
        assert_eq!(legend_height(3, &config), 120.0);
        // 6 rows: 25 * 7 + 10
        assert_eq!(legend_height(6, &config), 185.0);

        let mut svg = String::new();
        write_legend(&mut svg, &[], 800.0, &config);
        assert!(svg.contains(r#"<g transform="translate(550, 30)">"#));
        assert!(svg.contains(r#"width="220" height="120""#));
        assert!(svg.contains("Legend:"));
    }

    #[test]
    fn test_legend_rows_svg() {
        let config = Config::default();
        let entries = legend_entries(&[Lane::new("producer", "a|")]);
        let mut svg = String::new();
        write_legend(&mut svg, &entries, 800.0, &config);
        assert!(svg.contains(r#"<circle cx="25" cy="25" r="12" class="marble-blue"/>"#));
        assert!(svg.contains(r#"<text x="45" y="30" class="description">Message A</text>"#));
        assert!(svg.contains(r#"<circle cx="25" cy="50" r="12" class="marble-complete"/>"#));
        assert!(svg.contains(r#"<text x="45" y="55" class="description">Complete</text>"#));
    }
}
