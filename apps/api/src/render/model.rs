//! In-memory document model handed from the builder to a `DocumentSink`.
//!
//! The builder appends blocks top to bottom in a single pass; nothing is
//! edited afterwards.

use crate::layout::color::HexColor;
use crate::layout::style::{PageGeometry, RuleStyle};
use crate::layout::units::Length;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

impl Alignment {
    pub fn ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
        }
    }
}

/// A span of text sharing one set of character properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: String,
    pub size: Length,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: HexColor,
    /// External target when the run is a clickable hyperlink.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphFormat {
    pub alignment: Alignment,
    pub space_before: Length,
    pub space_after: Length,
    pub line_spacing: f64,
    pub left_indent: Option<Length>,
    pub right_indent: Option<Length>,
    pub bullet: bool,
    pub bottom_rule: Option<RuleStyle>,
}

impl Default for ParagraphFormat {
    fn default() -> Self {
        ParagraphFormat {
            alignment: Alignment::Left,
            space_before: Length::ZERO,
            space_after: Length::ZERO,
            line_spacing: 1.0,
            left_indent: None,
            right_indent: None,
            bullet: false,
            bottom_rule: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(format: ParagraphFormat) -> Self {
        Paragraph {
            format,
            runs: Vec::new(),
        }
    }

    pub fn add_run(&mut self, run: Run) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn add_hyperlink(&mut self, mut run: Run, target: impl Into<String>) -> &mut Self {
        run.underline = true;
        run.link = Some(target.into());
        self.runs.push(run);
        self
    }

    /// Concatenated text of all runs.
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn add_paragraph(&mut self, format: ParagraphFormat) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(format));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }
}

/// Fixed-layout table. Every row has exactly `column_widths.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub column_widths: Vec<Length>,
    pub rows: Vec<Vec<Cell>>,
    pub alignment: Alignment,
}

impl Table {
    pub fn new(rows: usize, column_widths: Vec<Length>) -> Self {
        let columns = column_widths.len();
        Table {
            rows: (0..rows).map(|_| vec![Cell::default(); columns]).collect(),
            column_widths,
            alignment: Alignment::Left,
        }
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    pub fn width(&self) -> Length {
        self.column_widths
            .iter()
            .fold(Length::ZERO, |acc, w| acc + *w)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageGeometry,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(page: PageGeometry) -> Self {
        Document {
            page,
            blocks: Vec::new(),
        }
    }

    pub fn add_paragraph(&mut self, format: ParagraphFormat) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(Paragraph::new(format)));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    pub fn add_table(&mut self, rows: usize, column_widths: Vec<Length>) -> &mut Table {
        self.blocks.push(Block::Table(Table::new(rows, column_widths)));
        match self.blocks.last_mut() {
            Some(Block::Table(t)) => t,
            _ => unreachable!("a table was just pushed"),
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// External hyperlink targets in document order.
    pub fn link_targets(&self) -> Vec<&str> {
        let mut targets = Vec::new();
        for block in &self.blocks {
            let paragraphs: Vec<&Paragraph> = match block {
                Block::Paragraph(p) => vec![p],
                Block::Table(t) => t
                    .rows
                    .iter()
                    .flatten()
                    .flat_map(|c| c.paragraphs.iter())
                    .collect(),
            };
            for p in paragraphs {
                targets.extend(p.runs.iter().filter_map(|r| r.link.as_deref()));
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::default_style_config;

    fn make_run(text: &str) -> Run {
        Run {
            text: text.to_string(),
            font: "Arial".to_string(),
            size: Length::pt(11.0),
            bold: false,
            italic: false,
            underline: false,
            color: HexColor::BLACK,
            link: None,
        }
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let mut p = Paragraph::default();
        p.add_run(make_run("a | ")).add_run(make_run("b"));
        assert_eq!(p.text(), "a | b");
    }

    #[test]
    fn test_hyperlink_run_is_underlined_with_target() {
        let mut p = Paragraph::default();
        p.add_hyperlink(make_run("me@example.com"), "mailto:me@example.com");
        assert!(p.runs[0].underline);
        assert_eq!(p.runs[0].link.as_deref(), Some("mailto:me@example.com"));
    }

    #[test]
    fn test_table_has_fixed_shape() {
        let table = Table::new(1, vec![Length::cm(5.0); 3]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].len(), 3);
        assert!((table.width().to_cm() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_link_targets_include_table_cells() {
        let mut doc = Document::new(default_style_config().page);
        doc.add_paragraph(ParagraphFormat::default())
            .add_hyperlink(make_run("site"), "https://a.example");
        let table = doc.add_table(1, vec![Length::cm(5.0); 2]);
        if let Some(cell) = table.cell_mut(0, 1) {
            cell.add_paragraph(ParagraphFormat::default())
                .add_hyperlink(make_run("b"), "https://b.example");
        }
        assert_eq!(doc.link_targets(), vec!["https://a.example", "https://b.example"]);
    }
}
