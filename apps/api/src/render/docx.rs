//! WordprocessingML serialization of the document model.
//!
//! Produces the minimal part set Word needs: content types, package and
//! document relationships, the main document, styles and one bullet
//! numbering definition. Hyperlinks become external relationships numbered
//! after the fixed ones, in document order.

use std::borrow::Cow;
use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};

use quick_xml::escape::escape;

use crate::layout::units::{line_spacing_units, Length};
use crate::render::model::{Block, Document, Paragraph, Run, Table};
use crate::render::package::PackageWriter;
use crate::render::SinkError;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Relationship ids `rId1` and `rId2` are taken by styles and numbering.
const FIRST_LINK_REL: usize = 3;
const BULLET_NUM_ID: u32 = 1;
/// Hanging indent of the bullet glyph (0.25 in).
const BULLET_HANGING_TWIPS: i64 = 360;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Writes `document` as a complete `.docx` package into `writer`.
pub fn write_package<W: Write + Seek>(document: &Document, writer: W) -> Result<W, SinkError> {
    let mut body = BodyWriter::default();
    let document_xml = body.document_xml(document)?;

    let mut package = PackageWriter::with_writer(writer);
    package.add_part("[Content_Types].xml", content_types_xml().as_bytes())?;
    package.add_part("_rels/.rels", package_rels_xml().as_bytes())?;
    package.add_part("word/document.xml", document_xml.as_bytes())?;
    package.add_part("word/styles.xml", styles_xml().as_bytes())?;
    package.add_part("word/numbering.xml", numbering_xml().as_bytes())?;
    package.add_part(
        "word/_rels/document.xml.rels",
        document_rels_xml(&body.links)?.as_bytes(),
    )?;
    package.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Main document part
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct BodyWriter {
    /// Hyperlink targets in the order their relationship ids were handed out.
    links: Vec<String>,
}

impl BodyWriter {
    fn document_xml(&mut self, document: &Document) -> Result<String, SinkError> {
        let mut xml = String::with_capacity(16 * 1024);
        xml.push_str(XML_DECL);
        write!(xml, r#"<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#)?;

        for block in &document.blocks {
            match block {
                Block::Paragraph(p) => self.paragraph(&mut xml, p)?,
                Block::Table(t) => self.table(&mut xml, t)?,
            }
        }

        let page = &document.page;
        write!(
            xml,
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
            page.width.twips(),
            page.height.twips(),
            page.margin_top.twips(),
            page.margin_right.twips(),
            page.margin_bottom.twips(),
            page.margin_left.twips(),
        )?;
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    fn paragraph(&mut self, xml: &mut String, paragraph: &Paragraph) -> Result<(), SinkError> {
        let f = &paragraph.format;
        xml.push_str("<w:p><w:pPr>");
        if f.bullet {
            write!(
                xml,
                r#"<w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
            )?;
        }
        if let Some(rule) = &f.bottom_rule {
            // Border width is measured in eighths of a point.
            let eighths = (rule.thickness.points() * 8.0).round().clamp(2.0, 96.0) as u32;
            write!(
                xml,
                r#"<w:pBdr><w:bottom w:val="single" w:sz="{eighths}" w:space="1" w:color="{}"/></w:pBdr>"#,
                rule.color.ooxml()
            )?;
        }
        write!(
            xml,
            r#"<w:spacing w:before="{}" w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
            f.space_before.twips(),
            f.space_after.twips(),
            line_spacing_units(f.line_spacing),
        )?;
        if f.left_indent.is_some() || f.right_indent.is_some() || f.bullet {
            xml.push_str("<w:ind");
            if let Some(left) = f.left_indent {
                write!(xml, r#" w:left="{}""#, left.twips())?;
            }
            if let Some(right) = f.right_indent {
                write!(xml, r#" w:right="{}""#, right.twips())?;
            }
            if f.bullet {
                write!(xml, r#" w:hanging="{BULLET_HANGING_TWIPS}""#)?;
            }
            xml.push_str("/>");
        }
        write!(xml, r#"<w:jc w:val="{}"/></w:pPr>"#, f.alignment.ooxml())?;

        for run in &paragraph.runs {
            match &run.link {
                Some(target) => {
                    self.links.push(target.clone());
                    let rel_id = FIRST_LINK_REL + self.links.len() - 1;
                    write!(xml, r#"<w:hyperlink r:id="rId{rel_id}" w:history="1">"#)?;
                    write_run(xml, run)?;
                    xml.push_str("</w:hyperlink>");
                }
                None => write_run(xml, run)?,
            }
        }
        xml.push_str("</w:p>");
        Ok(())
    }

    fn table(&mut self, xml: &mut String, table: &Table) -> Result<(), SinkError> {
        write!(
            xml,
            r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/><w:jc w:val="{}"/><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>"#,
            table.width().twips(),
            table.alignment.ooxml(),
        )?;
        for width in &table.column_widths {
            write!(xml, r#"<w:gridCol w:w="{}"/>"#, width.twips())?;
        }
        xml.push_str("</w:tblGrid>");

        for row in &table.rows {
            xml.push_str("<w:tr>");
            for (cell, width) in row.iter().zip(&table.column_widths) {
                write!(
                    xml,
                    r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>"#,
                    width.twips()
                )?;
                // A cell must hold at least one paragraph.
                if cell.paragraphs.is_empty() {
                    xml.push_str("<w:p/>");
                }
                for p in &cell.paragraphs {
                    self.paragraph(xml, p)?;
                }
                xml.push_str("</w:tc>");
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }
}

fn write_run(xml: &mut String, run: &Run) -> Result<(), SinkError> {
    xml.push_str("<w:r><w:rPr>");
    if run.link.is_some() {
        xml.push_str(r#"<w:rStyle w:val="Hyperlink"/>"#);
    }
    let font = escape(run.font.as_str());
    write!(
        xml,
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
    )?;
    if run.bold {
        xml.push_str("<w:b/>");
    }
    if run.italic {
        xml.push_str("<w:i/>");
    }
    write!(xml, r#"<w:color w:val="{}"/>"#, run.color.ooxml())?;
    let size = run.size.half_points();
    write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
    if run.underline {
        xml.push_str(r#"<w:u w:val="single"/>"#);
    }
    xml.push_str("</w:rPr>");

    let text = sanitize(&run.text);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line))?;
    }
    xml.push_str("</w:r>");
    Ok(())
}

/// Drops characters XML 1.0 cannot carry; tabs become spaces.
fn sanitize(text: &str) -> Cow<'_, str> {
    // U+FFFE and U+FFFF are not XML characters either.
    let allowed = |c: char| {
        (c == '\n' || !c.is_control()) && c != '\u{FFFE}' && c != '\u{FFFF}'
    };
    if text.chars().all(allowed) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if c == '\t' { ' ' } else { c })
            .filter(|&c| allowed(c))
            .collect(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed parts
// ────────────────────────────────────────────────────────────────────────────

fn content_types_xml() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
            "</Types>"
        ),
        decl = XML_DECL
    )
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_RELS}"><Relationship Id="rId1" Type="{REL_OFFICE_DOCUMENT}" Target="word/document.xml"/></Relationships>"#
    )
}

fn document_rels_xml(links: &[String]) -> Result<String, SinkError> {
    let mut xml = String::new();
    write!(
        xml,
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_RELS}"><Relationship Id="rId1" Type="{REL_STYLES}" Target="styles.xml"/><Relationship Id="rId2" Type="{REL_NUMBERING}" Target="numbering.xml"/>"#
    )?;
    for (i, target) in links.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{REL_HYPERLINK}" Target="{}" TargetMode="External"/>"#,
            FIRST_LINK_REL + i,
            escape(&*sanitize(target)),
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn styles_xml() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<w:styles xmlns:w="{ns}">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
            r#"<w:pPr><w:numPr><w:numId w:val="{num}"/></w:numPr></w:pPr></w:style>"#,
            r#"<w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/><w:rPr><w:u w:val="single"/></w:rPr></w:style>"#,
            r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/>"#,
            r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#,
            "</w:styles>"
        ),
        decl = XML_DECL,
        ns = NS_W,
        num = BULLET_NUM_ID
    )
}

fn numbering_xml() -> String {
    let left = Length::cm(0.63).twips();
    format!(
        concat!(
            "{decl}",
            r#"<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="{left}" w:hanging="{hanging}"/></w:pPr>"#,
            r#"<w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/></w:rPr></w:lvl></w:abstractNum>"#,
            r#"<w:num w:numId="{num}"><w:abstractNumId w:val="0"/></w:num>"#,
            "</w:numbering>"
        ),
        decl = XML_DECL,
        ns = NS_W,
        left = left,
        hanging = BULLET_HANGING_TWIPS,
        num = BULLET_NUM_ID
    )
}
