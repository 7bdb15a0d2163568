//! The formatting policy: page geometry, typography, spacing and colors.
//!
//! A `StyleConfig` is built once at startup and shared read-only. Nothing in
//! the incoming record can change it; renderers only pick which block style
//! a line gets.

use crate::config::Config;
use crate::layout::color::HexColor;
use crate::layout::units::Length;
use crate::render::model::Alignment;

pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_SIZE_PT: f64 = 11.0;
pub const LINE_SPACING: f64 = 1.15;
pub const MARGIN_CM: f64 = 2.54;
pub const PAGE_WIDTH_CM: f64 = 21.0;
pub const PAGE_HEIGHT_CM: f64 = 29.7;
pub const CONTACT_SEPARATOR: &str = " | ";

/// Overview subsection labels rendered as bullet lists instead of plain lines.
pub const HIGHLIGHT_LABELS: &[&str] = &[
    "Career Highlights",
    "Highlights",
    "Key Highlights",
    "Key Achievements",
];

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: Length,
    pub height: Length,
    pub margin_top: Length,
    pub margin_right: Length,
    pub margin_bottom: Length,
    pub margin_left: Length,
}

impl PageGeometry {
    /// A4 with equal margins on all four sides.
    pub fn a4(margin: Length) -> Self {
        PageGeometry {
            width: Length::cm(PAGE_WIDTH_CM),
            height: Length::cm(PAGE_HEIGHT_CM),
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }

    /// Width between the left and right margins.
    pub fn text_width(&self) -> Length {
        self.width - self.margin_left - self.margin_right
    }
}

/// Character-level look of a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: Length,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn new(size_pt: f64) -> Self {
        TextStyle {
            size: Length::pt(size_pt),
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Everything needed to emit one single-run paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub text: TextStyle,
    pub alignment: Alignment,
    pub space_before: Length,
    pub space_after: Length,
}

impl BlockStyle {
    const fn left(text: TextStyle, before_pt: f64, after_pt: f64) -> Self {
        BlockStyle {
            text,
            alignment: Alignment::Left,
            space_before: Length::pt(before_pt),
            space_after: Length::pt(after_pt),
        }
    }

    const fn centered(text: TextStyle, before_pt: f64, after_pt: f64) -> Self {
        BlockStyle {
            text,
            alignment: Alignment::Center,
            space_before: Length::pt(before_pt),
            space_after: Length::pt(after_pt),
        }
    }
}

/// Separator drawn under section headings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStyle {
    pub color: HexColor,
    pub thickness: Length,
    /// Share of the text width the rule spans, starting at the left margin.
    pub width_percent: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// StyleConfig
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub page: PageGeometry,
    pub font_family: String,
    pub line_spacing: f64,
    pub text_color: HexColor,
    pub link_color: HexColor,
    pub contact_separator: String,

    pub name: BlockStyle,
    pub contact: BlockStyle,
    pub desired_role: BlockStyle,
    pub tagline: BlockStyle,
    pub heading: BlockStyle,
    pub position: BlockStyle,
    pub detail_heading: BlockStyle,
    pub body: BlockStyle,
    pub reference_name: BlockStyle,

    pub bullet_indent: Length,
    pub nested_bullet_indent: Length,
    pub heading_rule: Option<RuleStyle>,
    pub highlight_labels: Vec<String>,
}

impl StyleConfig {
    /// Applies the operator-level overrides from the environment.
    pub fn from_config(config: &Config) -> Self {
        let mut style = default_style_config();
        if let Some(raw) = &config.link_color {
            style.link_color = HexColor::normalize(raw);
        }
        if !config.heading_rules {
            style.heading_rule = None;
        }
        style
    }

    pub fn is_highlight_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.highlight_labels
            .iter()
            .any(|known| known.eq_ignore_ascii_case(label))
    }

    /// Width of each of `columns` equal table columns spanning the text width.
    pub fn column_width(&self, columns: usize) -> Length {
        self.page.text_width().divide(columns)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        default_style_config()
    }
}

/// A4, 2.54 cm margins, Arial 11 pt at 1.15 line spacing.
pub fn default_style_config() -> StyleConfig {
    StyleConfig {
        page: PageGeometry::a4(Length::cm(MARGIN_CM)),
        font_family: DEFAULT_FONT.to_string(),
        line_spacing: LINE_SPACING,
        text_color: HexColor::BLACK,
        link_color: HexColor::BLUE,
        contact_separator: CONTACT_SEPARATOR.to_string(),

        name: BlockStyle::centered(TextStyle::new(20.0).bold(), 0.0, 6.0),
        contact: BlockStyle::centered(TextStyle::new(10.0), 0.0, 6.0),
        desired_role: BlockStyle::centered(TextStyle::new(14.0).bold(), 12.0, 6.0),
        tagline: BlockStyle::centered(TextStyle::new(12.0).italic(), 0.0, 12.0),
        heading: BlockStyle::left(TextStyle::new(14.0).bold(), 12.0, 6.0),
        position: BlockStyle::left(TextStyle::new(12.0).bold(), 0.0, 6.0),
        detail_heading: BlockStyle::left(TextStyle::new(DEFAULT_SIZE_PT).bold(), 6.0, 6.0),
        body: BlockStyle::left(TextStyle::new(DEFAULT_SIZE_PT), 0.0, 6.0),
        reference_name: BlockStyle::left(TextStyle::new(DEFAULT_SIZE_PT).bold(), 0.0, 6.0),

        bullet_indent: Length::cm(0.63),
        nested_bullet_indent: Length::cm(1.27),
        heading_rule: Some(RuleStyle {
            color: HexColor::BLACK,
            thickness: Length::pt(1.0),
            width_percent: 100.0,
        }),
        highlight_labels: HIGHLIGHT_LABELS.iter().map(|s| s.to_string()).collect(),
    }
}
