//! Marble primitives: shape descriptions for placed events and their SVG

use crate::ast::PlacedEvent;
use crate::layout::LaneGeometry;
use crate::theme::{self, Swatch};
use crate::token::{MarbleColor, Token};

/// Outline of a marble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Diamond,
    Square,
}

/// Style of a marble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Message(MarbleColor),
    Special,
    Error,
    Complete,
}

impl Fill {
    pub fn class(&self) -> String {
        match self {
            Fill::Message(color) => color.class(),
            Fill::Special => "marble-special".to_string(),
            Fill::Error => "marble-error".to_string(),
            Fill::Complete => "marble-complete".to_string(),
        }
    }

    pub fn swatch(&self) -> Swatch {
        match self {
            Fill::Message(color) => theme::message_swatch(*color),
            Fill::Special => theme::SPECIAL_SWATCH,
            Fill::Error => theme::ERROR_SWATCH,
            Fill::Complete => theme::COMPLETE_SWATCH,
        }
    }

    /// Light fills carry dark text
    pub fn dark_text(&self) -> bool {
        matches!(self, Fill::Special)
    }
}

/// Shape and style for a token; `None` for time steps
pub fn style_for(token: &Token) -> Option<(Shape, Fill)> {
    match token {
        Token::TimeStep => None,
        Token::Message { color, .. } => Some((Shape::Circle, Fill::Message(*color))),
        Token::Special(_) => Some((Shape::Diamond, Fill::Special)),
        Token::Error => Some((Shape::Square, Fill::Error)),
        Token::Completion => Some((Shape::Circle, Fill::Complete)),
    }
}

/// Everything needed to draw one marble
#[derive(Debug, Clone, PartialEq)]
pub struct Marble {
    pub shape: Shape,
    pub fill: Fill,
    pub x: f64,
    pub y: f64,
    pub label: char,
    /// Small caption under the marble (`offset: n` or `EOF`)
    pub annotation: Option<String>,
}

impl Marble {
    /// Describe the marble for a placed event on its lane
    pub fn from_event(placed: &PlacedEvent, lane: &LaneGeometry) -> Option<Marble> {
        let token = placed.event.token;
        let (shape, fill) = style_for(&token)?;
        let annotation = if lane.offsets {
            match token {
                Token::Message { .. } => Some(format!("offset: {}", placed.event.sequence)),
                Token::Completion => Some("EOF".to_string()),
                _ => None,
            }
        } else {
            None
        };

        Some(Marble {
            shape,
            fill,
            x: placed.x,
            y: placed.y,
            label: token.symbol(),
            annotation,
        })
    }

    /// Append the marble, and its annotation if any, to an SVG buffer
    pub fn write_svg(&self, svg: &mut String, radius: f64, offset_gap: f64) {
        write_shape(svg, self.shape, self.fill, self.x, self.y, radius, self.label);

        if let Some(text) = &self.annotation {
            let offset_y = self.y + radius + offset_gap;
            svg.push_str("<g>\n");
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="50" height="16" rx="3" class="offset-bg"/>"#,
                x = self.x - 25.0,
                y = offset_y - 8.0,
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{x}" y="{y}" class="offset-label">{t}</text>"#,
                x = self.x,
                y = offset_y + 3.0,
                t = text,
            ));
            svg.push_str("\n</g>\n");
        }
    }
}

/// Draw one labelled shape centred on (x, y), under the drop shadow filter
pub(crate) fn write_shape(
    svg: &mut String,
    shape: Shape,
    fill: Fill,
    x: f64,
    y: f64,
    radius: f64,
    label: char,
) {
    svg.push_str(r#"<g filter="url(#marbleShadow)">"#);
    svg.push('\n');

    let class = fill.class();
    match shape {
        Shape::Circle => svg.push_str(&format!(
            r#"<circle cx="{x}" cy="{y}" r="{r}" class="{class}"/>"#,
            r = radius,
        )),
        Shape::Diamond => svg.push_str(&format!(
            r#"<polygon points="{x},{top} {right},{y} {x},{bottom} {left},{y}" class="{class}"/>"#,
            top = y - radius,
            right = x + radius,
            bottom = y + radius,
            left = x - radius,
        )),
        Shape::Square => svg.push_str(&format!(
            r#"<rect x="{rx}" y="{ry}" width="{s}" height="{s}" rx="3" class="{class}"/>"#,
            rx = x - radius,
            ry = y - radius,
            s = radius * 2.0,
        )),
    }
    svg.push('\n');

    let text_class = if fill.dark_text() {
        "marble-text-dark"
    } else {
        "marble-text"
    };
    svg.push_str(&format!(
        r#"<text x="{x}" y="{ty}" class="{text_class}">{label}</text>"#,
        ty = y + 4.0,
    ));
    svg.push_str("\n</g>\n");
}
