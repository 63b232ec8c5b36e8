//! SVG renderer for marble diagrams

use tracing::debug;

use crate::ast::*;
use crate::layout::{self, Layout};
use crate::legend::{legend_entries, write_legend};
use crate::marble::Marble;
use crate::parser::parse_notation;
use crate::theme::{self, Theme};
use crate::token::MarbleColor;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Left inset for the header text and lane labels
    pub padding: f64,
    /// Distance from each canvas edge to the timeline ends
    pub timeline_inset: f64,
    /// Length of the arrow segment past the timeline end
    pub arrow_length: f64,
    /// y of the first lane
    pub lane_top: f64,
    /// Vertical distance between lanes
    pub row_height: f64,
    /// Distance of the lane label above its timeline
    pub lane_label_offset: f64,
    /// Number of frames that fit on a timeline
    pub frames: usize,
    /// Marble radius
    pub marble_radius: f64,
    /// Extra gap kept between the last regular marble and the timeline end
    pub clamp_margin: f64,
    /// Number of frame grid lines
    pub grid_markers: usize,
    /// y where grid lines start
    pub grid_top: f64,
    /// Distance from the canvas bottom to where grid lines stop
    pub grid_bottom_margin: f64,
    /// Distance from the canvas bottom to the frame numbers
    pub grid_label_margin: f64,
    /// Horizontal inset of role bands
    pub band_inset: f64,
    /// Room above a lane's timeline covered by its band
    pub band_label_space: f64,
    /// Room below a lane's timeline covered by its band
    pub band_bottom_margin: f64,
    /// Distance from a marble's edge to the centre of its offset label
    pub offset_gap: f64,
    /// Legend panel width
    pub legend_width: f64,
    /// Distance from the canvas right edge to the legend's left edge
    pub legend_right_offset: f64,
    /// y of the legend panel
    pub legend_top: f64,
    /// Height of one legend row
    pub legend_row_height: f64,
    /// Minimum legend panel height
    pub legend_min_height: f64,
    /// Theme for styling
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            padding: 30.0,
            timeline_inset: 50.0,
            arrow_length: 20.0,
            lane_top: 120.0,
            row_height: 100.0,
            lane_label_offset: 25.0,
            frames: 20,
            marble_radius: 12.0,
            clamp_margin: 20.0,
            grid_markers: 20,
            grid_top: 100.0,
            grid_bottom_margin: 40.0,
            grid_label_margin: 20.0,
            band_inset: 20.0,
            band_label_space: 45.0,
            band_bottom_margin: 20.0,
            offset_gap: 20.0,
            legend_width: 220.0,
            legend_right_offset: 250.0,
            legend_top: 30.0,
            legend_row_height: 25.0,
            legend_min_height: 120.0,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set how many frames fit on a timeline
    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = frames.max(1);
        self
    }
}

/// Render a diagram to SVG
pub fn render(spec: &DiagramSpec) -> String {
    render_with_config(spec, &Config::default())
}

/// Render a diagram to SVG with custom config
pub fn render_with_config(spec: &DiagramSpec, config: &Config) -> String {
    let layout = layout::layout(spec, config);
    let legend = legend_entries(&spec.lanes);
    let mut svg = String::with_capacity(8 * 1024);

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg width=\"{w}\" height=\"{h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        w = spec.width,
        h = spec.height,
    ));
    write_defs(&mut svg, config);

    // Background
    svg.push_str(&format!(
        "<rect width=\"{w}\" height=\"{h}\" fill=\"{bg}\" stroke=\"none\"/>\n",
        w = spec.width,
        h = spec.height,
        bg = config.theme.background,
    ));

    // Header
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"35\" class=\"title\">{t}</text>\n",
        x = config.padding,
        t = escape_xml(&spec.title),
    ));
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"55\" class=\"description\">{d}</text>\n",
        x = config.padding,
        d = escape_xml(&spec.description),
    ));

    write_grid(&mut svg, &layout, spec.height, config);
    write_bands(&mut svg, &layout);

    let mut marbles = 0;
    for (lane, geometry) in spec.lanes.iter().zip(&layout.lanes) {
        write_lane_chrome(&mut svg, lane, geometry.y, &layout, config);
        for event in parse_notation(&lane.notation) {
            let placed = layout.place(geometry, event);
            if let Some(marble) = Marble::from_event(&placed, geometry) {
                marble.write_svg(&mut svg, config.marble_radius, config.offset_gap);
                marbles += 1;
            }
        }
    }

    write_legend(&mut svg, &legend, spec.width, config);
    svg.push_str("</svg>\n");

    debug!(
        diagram = %spec.name,
        lanes = spec.lanes.len(),
        bands = layout.bands.len(),
        marbles,
        legend_rows = legend.len(),
        bytes = svg.len(),
        "rendered marble diagram"
    );

    svg
}

fn write_defs(svg: &mut String, config: &Config) {
    let theme = &config.theme;
    let font = &theme.font_family;

    svg.push_str("<defs>\n<style>\n");
    svg.push_str(&format!(
        ".title {{ font-family: {font}; font-size: 20px; font-weight: bold; fill: {c}; }}\n",
        c = theme.title_color
    ));
    svg.push_str(&format!(
        ".description {{ font-family: {font}; font-size: 14px; fill: {c}; }}\n",
        c = theme.muted_text_color
    ));
    svg.push_str(&format!(
        ".stream-label {{ font-family: {font}; font-size: 16px; font-weight: 600; fill: {c}; }}\n",
        c = theme.lane_color
    ));
    svg.push_str(&format!(
        ".timeline {{ stroke: {c}; stroke-width: 3; fill: none; }}\n",
        c = theme.lane_color
    ));
    svg.push_str(&format!(
        ".timeline-arrow {{ stroke: {c}; stroke-width: 3; fill: none; marker-end: url(#arrowhead); }}\n",
        c = theme.lane_color
    ));

    for role in [LaneRole::Source, LaneRole::Intermediate, LaneRole::Sink] {
        if let Some(swatch) = theme::band_swatch(role) {
            svg.push_str(&format!(
                ".{class} {{ fill: {fill}; fill-opacity: 0.3; stroke: {stroke}; stroke-width: 1; stroke-dasharray: 5,5; }}\n",
                class = theme::band_class(role),
                fill = swatch.fill,
                stroke = swatch.stroke,
            ));
        }
    }

    let mut write_swatch = |class: String, swatch: theme::Swatch| {
        svg.push_str(&format!(
            ".{class} {{ fill: {fill}; stroke: {stroke}; stroke-width: 2; }}\n",
            fill = swatch.fill,
            stroke = swatch.stroke,
        ));
    };
    for color in MarbleColor::ALL {
        write_swatch(color.class(), theme::message_swatch(color));
    }
    write_swatch("marble-special".to_string(), theme::SPECIAL_SWATCH);
    write_swatch("marble-error".to_string(), theme::ERROR_SWATCH);
    write_swatch("marble-complete".to_string(), theme::COMPLETE_SWATCH);

    svg.push_str(&format!(
        ".frame-marker {{ stroke: {c}; stroke-width: 1; fill: none; }}\n",
        c = theme.grid_color
    ));
    svg.push_str(&format!(
        ".frame-number {{ font-family: {font}; font-size: 10px; fill: {c}; text-anchor: middle; }}\n",
        c = theme.grid_text_color
    ));
    svg.push_str(&format!(
        ".marble-text {{ font-family: {font}; font-size: 12px; font-weight: bold; fill: {c}; text-anchor: middle; }}\n",
        c = theme.marble_text_color
    ));
    svg.push_str(&format!(
        ".marble-text-dark {{ font-family: {font}; font-size: 12px; font-weight: bold; fill: {c}; text-anchor: middle; }}\n",
        c = theme.marble_text_dark_color
    ));
    svg.push_str(&format!(
        ".offset-label {{ font-family: {font}; font-size: 10px; font-weight: 600; fill: {c}; text-anchor: middle; }}\n",
        c = theme.marble_text_dark_color
    ));
    svg.push_str(&format!(
        ".offset-bg {{ fill: {fill}; fill-opacity: 0.8; stroke: {stroke}; stroke-width: 1; }}\n",
        fill = theme.offset_fill,
        stroke = theme.border_color
    ));
    svg.push_str(&format!(
        ".legend-panel {{ fill: {fill}; stroke: {stroke}; stroke-width: 1; }}\n",
        fill = theme.legend_fill,
        stroke = theme.border_color
    ));
    svg.push_str("</style>\n");

    // Arrow marker with theme color
    svg.push_str(
        r#"<marker id="arrowhead" markerWidth="12" markerHeight="8" refX="11" refY="4" orient="auto">"#,
    );
    svg.push_str(&format!(
        "\n<polygon points=\"0 0, 12 4, 0 8\" fill=\"{c}\"/>\n</marker>\n",
        c = theme.lane_color
    ));

    svg.push_str(r#"<filter id="marbleShadow" x="-50%" y="-50%" width="200%" height="200%">"#);
    svg.push_str(&format!(
        "\n<feDropShadow dx=\"2\" dy=\"2\" stdDeviation=\"2\" flood-color=\"{color}\" flood-opacity=\"{opacity}\"/>\n</filter>\n",
        color = theme.shadow_color,
        opacity = theme.shadow_opacity,
    ));
    svg.push_str("</defs>\n");
}

fn write_grid(svg: &mut String, layout: &Layout, canvas_height: f64, config: &Config) {
    let label_y = canvas_height - config.grid_label_margin;
    for (frame, x) in layout.grid.iter().enumerate() {
        svg.push_str(&format!(
            "<line x1=\"{x}\" y1=\"{y1}\" x2=\"{x}\" y2=\"{y2}\" class=\"frame-marker\"/>\n",
            y1 = layout.grid_top,
            y2 = layout.grid_bottom,
        ));
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"{label_y}\" class=\"frame-number\">{frame}</text>\n"
        ));
    }
}

fn write_bands(svg: &mut String, layout: &Layout) {
    for band in &layout.bands {
        svg.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" class=\"{class}\"/>\n",
            x = band.x,
            y = band.y,
            w = band.width,
            h = band.height,
            class = theme::band_class(band.role),
        ));
    }
}

/// Label and timeline for one lane
fn write_lane_chrome(svg: &mut String, lane: &Lane, y: f64, layout: &Layout, config: &Config) {
    let end_x = layout.timeline.end_x();
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"{ly}\" class=\"stream-label\">{label}:</text>\n",
        x = config.padding,
        ly = y - config.lane_label_offset,
        label = escape_xml(&lane.label()),
    ));
    svg.push_str(&format!(
        "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{end_x}\" y2=\"{y}\" class=\"timeline\"/>\n",
        x1 = layout.timeline.start_x,
    ));
    svg.push_str(&format!(
        "<line x1=\"{end_x}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" class=\"timeline-arrow\"/>\n",
        x2 = end_x + config.arrow_length,
    ));
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn partitions() -> DiagramSpec {
        DiagramSpec::new("multiple-partitions", 1000.0, 400.0)
            .with_title("Multiple Partition Processing")
            .with_description("Messages distributed across multiple partitions")
            .lane("producer", "a---b---c---d---e---f---|")
            .lane("partition0", "a-------c-------e-----|")
            .lane("partition1", "---b-------d-------f-|")
            .lane("consumer", "--a---b---c---d---e---f-|")
    }

    #[test]
    fn test_render_simple() {
        let svg = render(&partitions());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<svg width="1000" height="400""#));
        assert!(svg.contains("Multiple Partition Processing"));
        assert!(svg.contains("Producer:"));
        assert!(svg.contains("Partition1:"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let spec = partitions();
        assert_eq!(render(&spec), render(&spec));
    }

    #[test]
    fn test_one_merged_partition_band() {
        let svg = render(&partitions());
        assert_eq!(svg.matches(r#"class="intermediate-bg"/>"#).count(), 1);
        assert_eq!(svg.matches(r#"class="source-bg"/>"#).count(), 1);
        assert_eq!(svg.matches(r#"class="sink-bg"/>"#).count(), 1);
    }

    #[test]
    fn test_offsets_only_on_partitions() {
        let svg = render(&partitions());
        // partition0 has 3 messages, partition1 has 3
        assert_eq!(svg.matches("offset: 0<").count(), 2);
        assert_eq!(svg.matches("offset: 2<").count(), 2);
        assert_eq!(svg.matches(">EOF<").count(), 2);
        assert!(!svg.contains("offset: 5<"));
    }

    #[test]
    fn test_grid_and_timelines() {
        let svg = render(&partitions());
        assert_eq!(svg.matches(r#"class="frame-marker"/>"#).count(), 20);
        assert!(svg.contains(r#"class="frame-number">19</text>"#));
        assert_eq!(svg.matches(r#"class="timeline"/>"#).count(), 4);
        assert!(svg.contains(r#"<line x1="950" y1="120" x2="970" y2="120" class="timeline-arrow"/>"#));
    }

    #[test]
    fn test_every_shape_has_a_shadow() {
        let svg = render(&partitions());
        let marbles = svg.matches("<circle").count();
        assert_eq!(svg.matches(r#"<g filter="url(#marbleShadow)">"#).count(), marbles);
    }

    #[test]
    fn test_empty_diagram_degrades_gracefully() {
        let spec = DiagramSpec::new("empty", 600.0, 300.0).lane("producer", "");
        let svg = render(&spec);
        assert!(!svg.contains("<circle"));
        assert!(svg.contains(r#"class="timeline"/>"#));
        assert!(svg.contains(r#"width="220" height="120""#));

        let svg = render(&DiagramSpec::new("nothing", 600.0, 300.0));
        assert!(svg.contains("Legend:"));
        assert!(!svg.contains(r#"class="timeline"/>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let spec = parse("title Retry <fast> & slow\nconsumer: a|").unwrap();
        let svg = render(&spec);
        assert!(svg.contains("Retry &lt;fast&gt; &amp; slow"));
    }

    #[test]
    fn test_high_contrast_keeps_shadows() {
        let config = Config::default().with_theme(Theme::high_contrast());
        let spec = DiagramSpec::new("t", 800.0, 300.0).lane("producer", "aRX|");
        let svg = render_with_config(&spec, &config);
        // four marbles plus four legend rows (message, events, errors, complete)
        assert_eq!(svg.matches(r#"<g filter="url(#marbleShadow)">"#).count(), 8);
        assert!(svg.contains(r##"flood-color="#000000" flood-opacity="0.6""##));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn test_with_frames_rescales() {
        let spec = DiagramSpec::new("t", 500.0, 300.0).lane("producer", "-a|");
        let svg = render_with_config(&spec, &Config::default().with_frames(10));
        // 400px over 10 frames puts frame 1 at x=90
        assert!(svg.contains(r#"<circle cx="90" cy="120" r="12" class="marble-blue"/>"#));
        assert_eq!(Config::default().with_frames(0).frames, 1);
    }
}
