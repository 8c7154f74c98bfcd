//! Minimal WordprocessingML builders for the DOCX export.
//!
//! Only the constructs a resolution page needs: styled runs, paragraphs with
//! alignment and spacing, borderless tables, and an inline picture.

/// Paragraph alignment (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Align {
    Left,
    Center,
    Justify,
}

impl Align {
    fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Justify => "both",
        }
    }
}

/// Character formatting for one run. Sizes are in half-points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub caps: bool,
    pub underline: bool,
    pub size: Option<u32>,
    pub color: Option<&'static str>,
}

impl RunStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn caps(mut self) -> Self {
        self.caps = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, hex: &'static str) -> Self {
        self.color = Some(hex);
        self
    }

    fn to_xml(self) -> String {
        let mut props = String::new();
        if self.bold {
            props.push_str("<w:b/>");
        }
        if self.italic {
            props.push_str("<w:i/>");
        }
        if self.caps {
            props.push_str("<w:caps/>");
        }
        if let Some(color) = self.color {
            props.push_str(&format!(r#"<w:color w:val="{}"/>"#, color));
        }
        if let Some(size) = self.size {
            props.push_str(&format!(r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size));
        }
        if self.underline {
            props.push_str(r#"<w:u w:val="single"/>"#);
        }
        if props.is_empty() {
            String::new()
        } else {
            format!("<w:rPr>{}</w:rPr>", props)
        }
    }
}

/// A text run.
pub(super) fn run(text: &str, style: RunStyle) -> String {
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        style.to_xml(),
        xml_escape(text)
    )
}

/// A line break inside a paragraph.
pub(super) fn line_break() -> String {
    "<w:r><w:br/></w:r>".to_string()
}

/// An inline picture referencing relationship `rel_id`, square, `size_px` wide.
pub(super) fn inline_picture(rel_id: &str, name: &str, size_px: u32) -> String {
    // 9525 EMU per pixel at 96 dpi.
    let emu = u64::from(size_px) * 9525;
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{emu}" cy="{emu}"/><wp:docPr id="1" name="{name}"/>"#,
            r#"<a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{emu}" cy="{emu}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
        ),
        emu = emu,
        name = xml_escape(name),
        rel = rel_id
    )
}

/// A paragraph under construction.
#[derive(Debug, Clone)]
pub(super) struct Paragraph {
    align: Align,
    before: u32,
    after: u32,
    line: Option<u32>,
    content: String,
}

impl Paragraph {
    pub fn new(align: Align) -> Self {
        Self {
            align,
            before: 0,
            after: 0,
            line: None,
            content: String::new(),
        }
    }

    /// Spacing before and after, in twips.
    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// Line height in 240ths of a line.
    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn push(mut self, xml: String) -> Self {
        self.content.push_str(&xml);
        self
    }

    pub fn text(self, text: &str, style: RunStyle) -> Self {
        self.push(run(text, style))
    }

    pub fn to_xml(&self) -> String {
        let line = self
            .line
            .map(|l| format!(r#" w:line="{}" w:lineRule="auto""#, l))
            .unwrap_or_default();
        format!(
            r#"<w:p><w:pPr><w:spacing w:before="{}" w:after="{}"{}/><w:jc w:val="{}"/></w:pPr>{}</w:p>"#,
            self.before,
            self.after,
            line,
            self.align.as_str(),
            self.content
        )
    }
}

/// One table cell.
#[derive(Debug, Clone)]
pub(super) struct Cell {
    width: u32,
    span: u32,
    center_vertically: bool,
    paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            span: 1,
            center_vertically: false,
            paragraphs: Vec::new(),
        }
    }

    pub fn span(mut self, columns: u32) -> Self {
        self.span = columns;
        self
    }

    pub fn center_vertically(mut self) -> Self {
        self.center_vertically = true;
        self
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    fn to_xml(&self) -> String {
        let mut props = format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, self.width);
        if self.span > 1 {
            props.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, self.span));
        }
        if self.center_vertically {
            props.push_str(r#"<w:vAlign w:val="center"/>"#);
        }
        // A cell must hold at least one paragraph.
        let body = if self.paragraphs.is_empty() {
            "<w:p/>".to_string()
        } else {
            self.paragraphs.iter().map(Paragraph::to_xml).collect()
        };
        format!("<w:tc><w:tcPr>{}</w:tcPr>{}</w:tc>", props, body)
    }
}

/// A full-width table without borders.
#[derive(Debug, Clone)]
pub(super) struct Table {
    grid: Vec<u32>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Column widths in twips.
    pub fn borderless(grid: Vec<u32>) -> Self {
        Self {
            grid,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let borders: String = ["top", "left", "bottom", "right", "insideH", "insideV"]
            .iter()
            .map(|side| format!(r#"<w:{} w:val="nil"/>"#, side))
            .collect();
        let grid: String = self
            .grid
            .iter()
            .map(|w| format!(r#"<w:gridCol w:w="{}"/>"#, w))
            .collect();
        let rows: String = self
            .rows
            .iter()
            .map(|cells| {
                let cells: String = cells.iter().map(Cell::to_xml).collect();
                format!("<w:tr>{}</w:tr>", cells)
            })
            .collect();
        format!(
            r#"<w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/><w:tblBorders>{}</w:tblBorders><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>{}</w:tblGrid>{}</w:tbl>"#,
            borders, grid, rows
        )
    }
}

/// Escape text for XML element content and attribute values.
///
/// Characters XML 1.0 cannot carry are dropped, such as the U+000B line
/// break Word puts in copied text.
pub(super) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}
