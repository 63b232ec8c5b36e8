//! Lane layout: rows, timeline scale, frame grid and role bands

use crate::ast::*;
use crate::renderer::Config;
use crate::token::Token;

/// Vertical placement of one lane
#[derive(Debug, Clone, PartialEq)]
pub struct LaneGeometry {
    pub name: String,
    pub row: usize,
    /// y of the timeline
    pub y: f64,
    pub role: LaneRole,
    pub offsets: bool,
}

/// Shaded background grouping a run of adjacent lanes with the same role
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub role: LaneRole,
    pub first_row: usize,
    pub last_row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Horizontal scale shared by every lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    /// x of frame 0
    pub start_x: f64,
    /// Drawable width of a lane
    pub width: f64,
    /// Pixels per frame
    pub frame_width: f64,
    marble_radius: f64,
    clamp_margin: f64,
}

impl Timeline {
    pub fn new(canvas_width: f64, config: &Config) -> Self {
        let width = (canvas_width - config.timeline_inset * 2.0).max(0.0);
        Self {
            start_x: config.timeline_inset,
            width,
            frame_width: width / config.frames.max(1) as f64,
            marble_radius: config.marble_radius,
            clamp_margin: config.clamp_margin,
        }
    }

    /// x where the timeline line ends and the arrow begins
    pub fn end_x(&self) -> f64 {
        self.start_x + self.width
    }

    /// Rightmost x a regular marble may take; never left of frame 0
    pub fn max_marble_x(&self) -> f64 {
        (self.end_x() - self.marble_radius - self.clamp_margin).max(self.start_x)
    }

    /// Where completion marbles are pinned
    pub fn completion_x(&self) -> f64 {
        (self.end_x() - self.marble_radius).max(self.start_x)
    }

    /// x of a frame, clamped so the marble stays on the timeline
    pub fn frame_x(&self, frame: usize) -> f64 {
        let x = self.start_x + frame as f64 * self.frame_width;
        x.min(self.max_marble_x())
    }

    pub fn x_for(&self, event: &Event) -> f64 {
        match event.token {
            Token::Completion => self.completion_x(),
            _ => self.frame_x(event.frame),
        }
    }
}

/// Everything positional about a diagram
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub lanes: Vec<LaneGeometry>,
    pub bands: Vec<Band>,
    pub timeline: Timeline,
    /// x of each frame grid marker, left to right
    pub grid: Vec<f64>,
    pub grid_top: f64,
    pub grid_bottom: f64,
}

impl Layout {
    /// Position an event on a lane
    pub fn place(&self, lane: &LaneGeometry, event: Event) -> PlacedEvent {
        PlacedEvent {
            lane: lane.name.clone(),
            x: self.timeline.x_for(&event),
            y: lane.y,
            event,
        }
    }
}

/// Lay out a diagram: one row per lane, in declaration order
pub fn layout(spec: &DiagramSpec, config: &Config) -> Layout {
    let lanes: Vec<LaneGeometry> = spec
        .lanes
        .iter()
        .enumerate()
        .map(|(row, lane)| LaneGeometry {
            name: lane.name.clone(),
            row,
            y: config.lane_top + row as f64 * config.row_height,
            role: lane.role,
            offsets: lane.offsets,
        })
        .collect();

    let bands = collect_bands(&lanes, spec.width, config);

    Layout {
        timeline: Timeline::new(spec.width, config),
        grid: grid_positions(spec.width, config),
        grid_top: config.grid_top,
        grid_bottom: spec.height - config.grid_bottom_margin,
        lanes,
        bands,
    }
}

/// Merge runs of adjacent same-role lanes into bands
fn collect_bands(lanes: &[LaneGeometry], canvas_width: f64, config: &Config) -> Vec<Band> {
    let mut bands: Vec<Band> = Vec::new();
    let mut runs: Vec<(LaneRole, &LaneGeometry, &LaneGeometry)> = Vec::new();

    for lane in lanes {
        match runs.last_mut() {
            Some((role, _, last)) if *role == lane.role => {
                *last = lane;
            }
            _ => runs.push((lane.role, lane, lane)),
        }
    }

    for (role, first, last) in runs {
        if role == LaneRole::Unclassified {
            continue;
        }
        let top = first.y - config.band_label_space;
        let bottom = last.y + config.band_bottom_margin;
        bands.push(Band {
            role,
            first_row: first.row,
            last_row: last.row,
            x: config.band_inset,
            y: top,
            width: canvas_width - config.band_inset * 2.0,
            height: bottom - top,
        });
    }

    bands
}

/// Evenly spaced grid markers spanning the timeline
fn grid_positions(canvas_width: f64, config: &Config) -> Vec<f64> {
    let span = canvas_width - config.timeline_inset * 2.0;
    let steps = config.grid_markers.saturating_sub(1).max(1) as f64;
    (0..config.grid_markers)
        .map(|i| config.timeline_inset + i as f64 * span / steps)
        .collect()
}
