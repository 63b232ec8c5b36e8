//! Theme definitions for marble diagrams

use crate::ast::LaneRole;
use crate::token::MarbleColor;

/// Fill and stroke of one shape style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub fill: &'static str,
    pub stroke: &'static str,
}

impl Swatch {
    pub const fn new(fill: &'static str, stroke: &'static str) -> Self {
        Self { fill, stroke }
    }
}

/// Theme colors and styles
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Canvas background color
    pub background: String,
    /// Font family for all text
    pub font_family: String,
    /// Title text color
    pub title_color: String,
    /// Description and legend row text color
    pub muted_text_color: String,
    /// Lane label and timeline color
    pub lane_color: String,
    /// Frame grid line color
    pub grid_color: String,
    /// Frame number color
    pub grid_text_color: String,
    /// Text drawn on top of dark marbles
    pub marble_text_color: String,
    /// Text drawn on top of light marbles and in offset labels
    pub marble_text_dark_color: String,
    /// Offset label background
    pub offset_fill: String,
    /// Legend panel background
    pub legend_fill: String,
    /// Legend panel and offset label border
    pub border_color: String,
    /// Drop shadow color under marbles
    pub shadow_color: String,
    /// Drop shadow opacity, 0 to 1
    pub shadow_opacity: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme, matching the Kafka slide deck palette
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            background: "#f8f9fa".to_string(),
            font_family: "'Segoe UI', Arial, sans-serif".to_string(),
            title_color: "#2c3e50".to_string(),
            muted_text_color: "#7f8c8d".to_string(),
            lane_color: "#34495e".to_string(),
            grid_color: "#bdc3c7".to_string(),
            grid_text_color: "#95a5a6".to_string(),
            marble_text_color: "white".to_string(),
            marble_text_dark_color: "#2c3e50".to_string(),
            offset_fill: "#ecf0f1".to_string(),
            legend_fill: "white".to_string(),
            border_color: "#bdc3c7".to_string(),
            shadow_color: "#000000".to_string(),
            shadow_opacity: 0.3,
        }
    }

    /// Black-on-white variant for print, with a harder shadow
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            background: "#ffffff".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            title_color: "#000000".to_string(),
            muted_text_color: "#333333".to_string(),
            lane_color: "#000000".to_string(),
            grid_color: "#999999".to_string(),
            grid_text_color: "#333333".to_string(),
            marble_text_color: "white".to_string(),
            marble_text_dark_color: "#000000".to_string(),
            offset_fill: "#ffffff".to_string(),
            legend_fill: "#ffffff".to_string(),
            border_color: "#000000".to_string(),
            shadow_color: "#000000".to_string(),
            shadow_opacity: 0.6,
        }
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "high-contrast" | "highcontrast" | "print" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// List all available theme names
    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "high-contrast"]
    }
}

/// Swatch for a message color
pub fn message_swatch(color: MarbleColor) -> Swatch {
    match color {
        MarbleColor::Blue => Swatch::new("#3498db", "#2980b9"),
        MarbleColor::Green => Swatch::new("#27ae60", "#229954"),
        MarbleColor::Purple => Swatch::new("#9b59b6", "#8e44ad"),
        MarbleColor::Orange => Swatch::new("#f39c12", "#e67e22"),
        MarbleColor::Red => Swatch::new("#e74c3c", "#c0392b"),
        MarbleColor::Yellow => Swatch::new("#f1c40f", "#f39c12"),
        MarbleColor::Teal => Swatch::new("#1abc9c", "#16a085"),
        MarbleColor::Pink => Swatch::new("#e91e63", "#c2185b"),
        MarbleColor::Indigo => Swatch::new("#6366f1", "#4f46e5"),
        MarbleColor::Cyan => Swatch::new("#06b6d4", "#0891b2"),
        MarbleColor::Lime => Swatch::new("#84cc16", "#65a30d"),
        MarbleColor::Amber => Swatch::new("#f59e0b", "#d97706"),
        MarbleColor::Emerald => Swatch::new("#10b981", "#059669"),
        MarbleColor::Rose => Swatch::new("#f43f5e", "#e11d48"),
        MarbleColor::Violet => Swatch::new("#8b5cf6", "#7c3aed"),
        MarbleColor::Sky => Swatch::new("#0ea5e9", "#0284c7"),
        MarbleColor::Stone => Swatch::new("#78716c", "#57534e"),
        MarbleColor::Slate => Swatch::new("#64748b", "#475569"),
        MarbleColor::Zinc => Swatch::new("#71717a", "#52525b"),
        MarbleColor::Neutral => Swatch::new("#a3a3a3", "#737373"),
    }
}

pub const SPECIAL_SWATCH: Swatch = Swatch::new("#f39c12", "#e67e22");
pub const ERROR_SWATCH: Swatch = Swatch::new("#e74c3c", "#c0392b");
pub const COMPLETE_SWATCH: Swatch = Swatch::new("#27ae60", "#229954");

/// Background band style for a role; unclassified lanes get no band
pub fn band_swatch(role: LaneRole) -> Option<Swatch> {
    match role {
        LaneRole::Source => Some(Swatch::new("#e8f5e8", "#27ae60")),
        LaneRole::Intermediate => Some(Swatch::new("#e8f4fd", "#3498db")),
        LaneRole::Sink => Some(Swatch::new("#fef9e7", "#f39c12")),
        LaneRole::Unclassified => None,
    }
}

/// CSS class for a role's background band
pub fn band_class(role: LaneRole) -> String {
    format!("{}-bg", role.as_str())
}
