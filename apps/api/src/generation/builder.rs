//! Presentation builder: walks a validated record once and emits the
//! document model in a fixed section order.
//!
//! `build_document` is pure. Given the same record and `StyleConfig` it
//! produces the same `Document`, and it has no failure mode of its own.

use tracing::debug;

use crate::generation::sections;
use crate::layout::style::{BlockStyle, TextStyle};
use crate::layout::{HexColor, Length, StyleConfig};
use crate::models::resume::CvRecord;
use crate::render::model::{Document, Paragraph, ParagraphFormat, Run};

/// Builds the full document for `record`.
pub fn build_document(record: &CvRecord, style: &StyleConfig) -> Document {
    let mut composer = Composer::new(style);

    sections::render_header(&mut composer, record);
    sections::render_overview(&mut composer, &record.overview);
    sections::render_experience(&mut composer, &record.work_experience);
    sections::render_education(&mut composer, &record.education);
    sections::render_skills(&mut composer, &record.skills);
    sections::render_generic_sections(&mut composer, record);
    sections::render_references(&mut composer, &record.references);

    let document = composer.finish();
    debug!(
        "Built document: {} paragraphs, {} tables, {} links",
        document.paragraphs().count(),
        document.tables().count(),
        document.link_targets().len()
    );
    document
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

/// Owns the document under construction and knows how the style policy
/// maps onto paragraphs and runs. Section renderers only go through this.
pub struct Composer<'a> {
    style: &'a StyleConfig,
    document: Document,
}

impl<'a> Composer<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Composer {
            style,
            document: Document::new(style.page),
        }
    }

    pub fn style(&self) -> &'a StyleConfig {
        self.style
    }

    pub fn finish(self) -> Document {
        self.document
    }

    /// A run in the default font and text color.
    pub fn run(&self, text: &str, look: TextStyle) -> Run {
        self.colored_run(text, look, self.style.text_color)
    }

    pub fn colored_run(&self, text: &str, look: TextStyle, color: HexColor) -> Run {
        Run {
            text: text.to_string(),
            font: self.style.font_family.clone(),
            size: look.size,
            bold: look.bold,
            italic: look.italic,
            underline: false,
            color,
            link: None,
        }
    }

    pub fn format_for(&self, block: &BlockStyle) -> ParagraphFormat {
        ParagraphFormat {
            alignment: block.alignment,
            space_before: block.space_before,
            space_after: block.space_after,
            line_spacing: self.style.line_spacing,
            ..ParagraphFormat::default()
        }
    }

    /// An empty paragraph formatted per `block`, for callers that add runs.
    pub fn open_paragraph(&mut self, block: &BlockStyle) -> &mut Paragraph {
        let format = self.format_for(block);
        self.document.add_paragraph(format)
    }

    /// A single-run paragraph.
    pub fn line(&mut self, text: &str, block: &BlockStyle) {
        let run = self.run(text, block.text);
        self.open_paragraph(block).add_run(run);
    }

    /// A section heading, with the separator rule underneath when enabled.
    pub fn heading(&mut self, title: &str) {
        let block = self.style.heading;
        let mut format = self.format_for(&block);
        if let Some(rule) = self.style.heading_rule {
            format.bottom_rule = Some(rule);
            if rule.width_percent < 100.0 {
                let uncovered = 100.0 - rule.width_percent.max(0.0);
                format.right_indent =
                    Some(Length::percent_of(uncovered, self.style.page.text_width()));
            }
        }
        let run = self.run(title, block.text);
        self.document.add_paragraph(format).add_run(run);
    }

    /// One bulleted paragraph per item at the given left indent.
    pub fn bullets(&mut self, items: &[String], indent: Length) {
        let block = self.style.body;
        for item in items {
            let mut format = self.format_for(&block);
            format.bullet = true;
            format.left_indent = Some(indent);
            let run = self.run(item, block.text);
            self.document.add_paragraph(format).add_run(run);
        }
    }

    /// A one-row table with equal columns across the text width; each
    /// column lists its items as separate paragraphs.
    pub fn column_table(&mut self, columns: &[&[String]]) {
        let width = self.style.column_width(columns.len());
        let block = self.style.body;
        let format = self.format_for(&block);
        let runs: Vec<Vec<Run>> = columns
            .iter()
            .map(|items| items.iter().map(|t| self.run(t, block.text)).collect())
            .collect();

        let table = self.document.add_table(1, vec![width; columns.len()]);
        for (index, column_runs) in runs.into_iter().enumerate() {
            let Some(cell) = table.cell_mut(0, index) else {
                continue;
            };
            for run in column_runs {
                cell.add_paragraph(format.clone()).add_run(run);
            }
        }
    }
}
