//! DOCX export of a composed resolution.
//!
//! Writes an Office Open XML package directly with the `zip` crate. The page
//! is legal size with one-inch margins and Georgia throughout. Signatures sit
//! in a borderless two-column table: chairman across both columns, the middle
//! block two per row, the general manager across both columns under
//! "Concurred:".
//!
//! # Architecture
//!
//! Implements the `DocumentExportService` port. HTML exports reuse the
//! preview renderer so a downloaded page matches what the user saw.

use std::io::{Cursor, Write};

use async_trait::async_trait;
use tracing::{debug, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::html_preview::HtmlPreviewRenderer;
use super::wordml::{inline_picture, line_break, Align, Cell, Paragraph, RunStyle, Table};
use crate::domain::document::{
    ComposedDocument, DocumentBlock, HeaderBlock, PageGeometry, SignatoryLine, CONCURRED_LABEL,
    MOTION_LEAD, PREAMBLE_CLOSE, PREAMBLE_HELD_ON, PREAMBLE_LEAD,
};
use crate::ports::{
    DocumentExportService, ExportAssets, ExportError, ExportFormat, ExportedDocument,
};

const FONT: &str = "Georgia";
const LOGO_REL_ID: &str = "rIdLogo";
const LOGO_SIZE_PX: u32 = 80;

/// Export service producing `.docx` and `.html` files.
///
/// # Example
///
/// ```rust,ignore
/// let service = DocxExportService::new();
/// let file = service
///     .export(&document, &ExportAssets::default(), ExportFormat::Docx)
///     .await?;
/// std::fs::write(&file.filename, &file.content)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocxExportService {
    preview: HtmlPreviewRenderer,
}

impl DocxExportService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the `.docx` package bytes.
    pub fn render_docx(
        &self,
        document: &ComposedDocument,
        assets: &ExportAssets,
    ) -> Result<Vec<u8>, ExportError> {
        let logo = assets.logo.as_ref().and_then(|asset| {
            let ext = asset.extension();
            if ext.is_none() {
                warn!(
                    content_type = asset.content_type.as_deref().unwrap_or("unknown"),
                    "Logo format cannot be embedded in DOCX, exporting without logo"
                );
            }
            ext.map(|ext| EmbeddedLogo {
                ext,
                bytes: &asset.bytes,
            })
        });
        let body = DocumentBody::new(document.page, logo.is_some()).render(&document.blocks);

        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types(logo).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(document_xml(&body, document.page).as_bytes())?;

        zip.start_file("word/styles.xml", options)?;
        zip.write_all(styles_xml().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(document_rels(logo).as_bytes())?;

        if let Some(logo) = logo {
            zip.start_file(format!("word/media/logo.{}", logo.ext), options)?;
            zip.write_all(logo.bytes)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl DocumentExportService for DocxExportService {
    async fn export(
        &self,
        document: &ComposedDocument,
        assets: &ExportAssets,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError> {
        let exported = match format {
            ExportFormat::Docx => {
                ExportedDocument::from_docx(self.render_docx(document, assets)?, &document.base_filename)
            }
            ExportFormat::Html => {
                ExportedDocument::from_html(self.preview.render(document), &document.base_filename)
            }
        };
        debug!(
            filename = %exported.filename,
            bytes = exported.content.len(),
            with_logo = assets.logo.is_some(),
            "Document rendered"
        );
        Ok(exported)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Body
// ════════════════════════════════════════════════════════════════════════════════

/// Walks the blocks, collecting signature slots into one table.
struct DocumentBody {
    content_width: u32,
    has_logo: bool,
    xml: String,
    signatures: Table,
    footer_started: bool,
}

impl DocumentBody {
    fn new(page: PageGeometry, has_logo: bool) -> Self {
        let content_width = page.width_twips.saturating_sub(2 * page.margin_twips);
        Self {
            content_width,
            has_logo,
            xml: String::new(),
            signatures: Table::borderless(vec![content_width / 2, content_width / 2]),
            footer_started: false,
        }
    }

    fn render(mut self, blocks: &[DocumentBlock]) -> String {
        for block in blocks {
            self.block(block);
        }
        self.flush_signatures();
        self.xml
    }

    fn paragraph(&mut self, paragraph: Paragraph) {
        self.xml.push_str(&paragraph.to_xml());
    }

    fn block(&mut self, block: &DocumentBlock) {
        match block {
            DocumentBlock::Header(header) => {
                self.header(header);
                self.paragraph(Paragraph::new(Align::Left).spacing(400, 400));
            }
            DocumentBlock::MinutesPreamble {
                district_name,
                held_on,
            } => self.paragraph(
                Paragraph::new(Align::Center)
                    .line(360)
                    .text(&format!("{} ", PREAMBLE_LEAD), RunStyle::plain())
                    .text(district_name, RunStyle::bold())
                    .text(&format!(" {} ", PREAMBLE_HELD_ON), RunStyle::plain())
                    .text(&held_on.to_uppercase(), RunStyle::bold())
                    .text(&format!(" {}", PREAMBLE_CLOSE), RunStyle::plain()),
            ),
            DocumentBlock::ResolutionNumber { text } => self.paragraph(
                Paragraph::new(Align::Center)
                    .spacing(400, 400)
                    .text(text, RunStyle::bold().size(24)),
            ),
            DocumentBlock::Title { text } => self.paragraph(
                Paragraph::new(Align::Center)
                    .spacing(0, 600)
                    .text(&DocumentBlock::title_display(text), RunStyle::bold().size(28)),
            ),
            DocumentBlock::Clause { kind, body } => {
                let mut paragraph = Paragraph::new(Align::Justify)
                    .spacing(0, 200)
                    .text(&format!("{} ", kind.prefix()), RunStyle::bold());
                if !kind.connective().is_empty() {
                    paragraph = paragraph.text(kind.connective(), RunStyle::plain());
                }
                self.paragraph(paragraph.text(body, RunStyle::plain()));
            }
            DocumentBlock::MotionTransition { movant, seconder } => self.paragraph(
                Paragraph::new(Align::Justify)
                    .spacing(400, 200)
                    .text(&format!("{} ", MOTION_LEAD), RunStyle::bold())
                    .text(&DocumentBlock::motion_text(movant, seconder), RunStyle::plain()),
            ),
            DocumentBlock::ApprovedLine { text } => {
                let before = self.footer_gap();
                self.paragraph(
                    Paragraph::new(Align::Left)
                        .spacing(before, 200)
                        .text(text, RunStyle::plain()),
                );
            }
            DocumentBlock::AdoptedLine { text } => {
                let before = self.footer_gap();
                self.paragraph(
                    Paragraph::new(Align::Left)
                        .spacing(before, 400)
                        .text(text, RunStyle::plain()),
                );
            }
            DocumentBlock::CertifiedLine { text } => {
                let before = self.footer_gap().max(400);
                self.paragraph(
                    Paragraph::new(Align::Left)
                        .spacing(before, 600)
                        .text(text, RunStyle::plain()),
                );
            }
            DocumentBlock::ChairmanSlot { signatories } => {
                for signatory in signatories {
                    self.signatures.row(vec![Cell::new(self.content_width)
                        .span(2)
                        .paragraph(signature_paragraph(signatory, 400, 600))]);
                }
            }
            DocumentBlock::MiddleBlock { signatories }
            | DocumentBlock::UnclassifiedSlot { signatories } => {
                let half = self.content_width / 2;
                for pair in signatories.chunks(2) {
                    let mut cells: Vec<Cell> = pair
                        .iter()
                        .map(|s| Cell::new(half).paragraph(signature_paragraph(s, 200, 400)))
                        .collect();
                    if cells.len() == 1 {
                        cells.push(Cell::new(half));
                    }
                    self.signatures.row(cells);
                }
            }
            DocumentBlock::GeneralManagerSlot { signatories } => {
                let mut cell = Cell::new(self.content_width).span(2).paragraph(
                    Paragraph::new(Align::Center)
                        .spacing(400, 0)
                        .text(CONCURRED_LABEL, RunStyle::plain()),
                );
                for signatory in signatories {
                    cell = cell.paragraph(signature_paragraph(signatory, 200, 400));
                }
                self.signatures.row(vec![cell]);
            }
            DocumentBlock::SignatoriesMissing { message } => {
                let before = self.footer_gap();
                self.paragraph(
                    Paragraph::new(Align::Left)
                        .spacing(before, 0)
                        .text(message, RunStyle::plain().italic().size(20).color("EF4444")),
                );
            }
        }
    }

    /// Extra space above the first footer paragraph.
    fn footer_gap(&mut self) -> u32 {
        if self.footer_started {
            0
        } else {
            self.footer_started = true;
            600
        }
    }

    fn header(&mut self, header: &HeaderBlock) {
        let side = self.content_width / 5;
        let middle = self.content_width - 2 * side;

        let mut logo_cell = Cell::new(side).center_vertically();
        if self.has_logo {
            logo_cell = logo_cell.paragraph(
                Paragraph::new(Align::Left).push(inline_picture(LOGO_REL_ID, "Logo", LOGO_SIZE_PX)),
            );
        }

        let mut text_cell = Cell::new(middle)
            .center_vertically()
            .paragraph(
                Paragraph::new(Align::Center)
                    .text(&header.country_line, RunStyle::bold().size(20)),
            )
            .paragraph(
                Paragraph::new(Align::Center)
                    .text(&header.district_name, RunStyle::bold().caps().size(24)),
            )
            .paragraph(Paragraph::new(Align::Center).text(&header.address, RunStyle::plain().size(18)));
        if let Some(contact) = &header.contact_line {
            text_cell = text_cell
                .paragraph(Paragraph::new(Align::Center).text(contact, RunStyle::plain().size(16)));
        }

        let mut table = Table::borderless(vec![side, middle, side]);
        table.row(vec![logo_cell, text_cell, Cell::new(side)]);
        self.xml.push_str(&table.to_xml());
    }

    fn flush_signatures(&mut self) {
        if self.signatures.is_empty() {
            return;
        }
        let half = self.content_width / 2;
        let table = std::mem::replace(&mut self.signatures, Table::borderless(vec![half, half]));
        self.xml.push_str(&table.to_xml());
        // Word requires a paragraph after a trailing table.
        self.xml.push_str("<w:p/>");
    }
}

fn signature_paragraph(signatory: &SignatoryLine, before: u32, after: u32) -> Paragraph {
    Paragraph::new(Align::Center)
        .spacing(before, after)
        .text(&signatory.display_name(), RunStyle::bold().underline())
        .push(line_break())
        .text(&signatory.position, RunStyle::plain().italic().size(18))
}

// ════════════════════════════════════════════════════════════════════════════════
// Package parts
// ════════════════════════════════════════════════════════════════════════════════

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Logo bytes with the extension they are stored under.
#[derive(Clone, Copy)]
struct EmbeddedLogo<'a> {
    ext: &'static str,
    bytes: &'a [u8],
}

fn content_types(logo: Option<EmbeddedLogo<'_>>) -> String {
    let image_default = logo
        .map(|logo| {
            format!(
                r#"<Default Extension="{}" ContentType="image/{}"/>"#,
                logo.ext, logo.ext
            )
        })
        .unwrap_or_default();
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            "{}",
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            "</Types>"
        ),
        image_default
    )
}

fn document_rels(logo: Option<EmbeddedLogo<'_>>) -> String {
    let logo_rel = logo
        .map(|logo| {
            format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/logo.{}"/>"#,
                LOGO_REL_ID, logo.ext
            )
        })
        .unwrap_or_default();
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            "{}</Relationships>"
        ),
        logo_rel
    )
}

fn styles_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-US"/>"#,
            r#"</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            "</w:styles>"
        ),
        font = FONT
    )
}

fn document_xml(body: &str, page: PageGeometry) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
            r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "<w:body>{body}",
            r#"<w:sectPr><w:pgSz w:w="{width}" w:h="{height}"/>"#,
            r#"<w:pgMar w:top="{margin}" w:right="{margin}" w:bottom="{margin}" w:left="{margin}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            "</w:sectPr></w:body></w:document>"
        ),
        body = body,
        width = page.width_twips,
        height = page.height_twips,
        margin = page.margin_twips
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocumentComposer;
    use crate::domain::organization::OrgProfile;
    use crate::domain::resolution::{ResolutionDraft, Signatory, SignatoryRole};
    use crate::ports::FetchedAsset;
    use std::io::Read;
    use zip::ZipArchive;

    fn draft_with(signatories: Vec<Signatory>) -> ResolutionDraft {
        let mut draft = ResolutionDraft::blank(2025);
        draft.resolution_number = "012".into();
        draft.title = "Approving the annual budget".into();
        draft.whereas_clauses = vec!["the district needs funds".into()];
        draft.resolved_clauses = vec!["to approve the budget".into()];
        draft.signatories = signatories;
        draft
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn render(draft: &ResolutionDraft, assets: &ExportAssets) -> Vec<u8> {
        let document = DocumentComposer::compose(draft, &OrgProfile::default());
        DocxExportService::new().render_docx(&document, assets).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Package
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn package_contains_required_parts() {
        let bytes = render(&draft_with(vec![]), &ExportAssets::default());
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
        assert!(!names.iter().any(|n| n.starts_with("word/media/")));
    }

    #[test]
    fn page_is_legal_size_with_inch_margins() {
        let bytes = render(&draft_with(vec![]), &ExportAssets::default());
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="18720"/>"#));
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#));
        assert!(read_part(&bytes, "word/styles.xml").contains(r#"w:ascii="Georgia""#));
    }

    #[test]
    fn logo_is_embedded_when_provided() {
        let logo = FetchedAsset::new(vec![0x89, b'P', b'N', b'G'], Some("image/png".into()));
        let bytes = render(&draft_with(vec![]), &ExportAssets::with_logo(logo));

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(archive.file_names().any(|n| n == "word/media/logo.png"));
        assert!(read_part(&bytes, "word/document.xml").contains(r#"r:embed="rIdLogo""#));
        assert!(read_part(&bytes, "word/_rels/document.xml.rels").contains("media/logo.png"));
        assert!(read_part(&bytes, "[Content_Types].xml").contains(r#"Extension="png""#));
    }

    #[test]
    fn webp_logo_is_left_out() {
        let logo = FetchedAsset::new(b"RIFF\0\0\0\0WEBP".to_vec(), Some("image/webp".into()));
        let bytes = render(&draft_with(vec![]), &ExportAssets::with_logo(logo));

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(!archive.file_names().any(|n| n.starts_with("word/media/")));
        assert!(!read_part(&bytes, "word/document.xml").contains("rIdLogo"));
        assert!(!read_part(&bytes, "[Content_Types].xml").contains("image/"));
    }

    #[test]
    fn pasted_vertical_tab_does_not_reach_document_xml() {
        let mut draft = draft_with(vec![]);
        draft.whereas_clauses = vec!["the board met\u{0B}on Monday".into()];
        let xml = read_part(&render(&draft, &ExportAssets::default()), "word/document.xml");

        assert!(xml.contains("the board meton Monday"));
        let illegal: Vec<u32> = xml
            .chars()
            .filter(|&c| c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
            .map(u32::from)
            .collect();
        assert!(illegal.is_empty(), "illegal characters: {:?}", illegal);
    }

    // ───────────────────────────────────────────────────────────────
    // Signatory table
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn odd_middle_block_leaves_blank_right_cell() {
        let draft = draft_with(vec![
            Signatory::new("Carla Chair", "BOD Chairman", SignatoryRole::Chairman),
            Signatory::new("Vic Vice", "BOD Vice-Chairman", SignatoryRole::ViceChairman),
            Signatory::new("Sara Sec", "BOD Secretary", SignatoryRole::Secretary),
            Signatory::new("Mia Member", "BOD Member", SignatoryRole::Member),
            Signatory::new("Gus Manager", "General Manager", SignatoryRole::GeneralManager),
        ]);
        let xml = read_part(&render(&draft, &ExportAssets::default()), "word/document.xml");

        // Chairman and GM each span both columns.
        assert_eq!(xml.matches(r#"<w:gridSpan w:val="2"/>"#).count(), 2);
        // Three middle signatories: one full row and one row with an empty cell.
        let signature_table = &xml[xml.find("CARLA CHAIR").unwrap()..];
        assert_eq!(signature_table.matches("<w:p/></w:tc>").count(), 1);

        let chair = xml.find("CARLA CHAIR").unwrap();
        let vice = xml.find("VIC VICE").unwrap();
        let sec = xml.find("SARA SEC").unwrap();
        let member = xml.find("MIA MEMBER").unwrap();
        let concurred = xml.find(CONCURRED_LABEL).unwrap();
        let gm = xml.find("GUS MANAGER").unwrap();
        assert!(chair < vice && vice < sec && sec < member && member < concurred && concurred < gm);
    }

    #[test]
    fn clauses_have_bold_prefixes() {
        let xml = read_part(
            &render(&draft_with(vec![]), &ExportAssets::default()),
            "word/document.xml",
        );
        assert!(xml.contains(
            r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">WHEREAS, </w:t></w:r>"#
        ));
        assert!(xml.contains("as it is hereby resolved, "));
        assert!(xml.contains("&quot;APPROVING THE ANNUAL BUDGET&quot;"));
    }

    // ───────────────────────────────────────────────────────────────
    // Port
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn export_names_files_after_resolution_number() {
        let document = DocumentComposer::compose(&draft_with(vec![]), &OrgProfile::default());
        let service = DocxExportService::new();

        let docx = service
            .export(&document, &ExportAssets::default(), ExportFormat::Docx)
            .await
            .unwrap();
        assert_eq!(docx.filename, "Resolution-012.docx");
        assert!(docx.content.starts_with(b"PK"));

        let html = service
            .export(&document, &ExportAssets::default(), ExportFormat::Html)
            .await
            .unwrap();
        assert_eq!(html.filename, "Resolution-012.html");
        assert!(String::from_utf8(html.content).unwrap().contains("<!DOCTYPE html>"));
    }
}
