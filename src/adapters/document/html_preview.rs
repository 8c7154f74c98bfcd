//! HTML preview of a composed resolution.
//!
//! Produces a standalone page laid out like the printed resolution. Print
//! rules set the legal page size and reset any positioned or scrolling
//! ancestors so a long resolution flows onto further pages instead of being
//! clipped to the first.

use crate::domain::document::{
    ComposedDocument, DocumentBlock, HeaderBlock, SignatoryLine, CONCURRED_LABEL, MOTION_LEAD,
    PREAMBLE_CLOSE, PREAMBLE_HELD_ON, PREAMBLE_LEAD,
};

/// Renders `ComposedDocument`s to HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPreviewRenderer;

impl HtmlPreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a complete HTML document.
    pub fn render(&self, document: &ComposedDocument) -> String {
        let mut body = String::new();
        for block in &document.blocks {
            body.push_str(&render_block(block));
            body.push('\n');
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{base_css}
@media print {{
    @page {{
        size: {page_size};
        margin: {page_margin};
    }}
{print_css}
}}
    </style>
</head>
<body>
    <article class="resolution-page">
{body}    </article>
</body>
</html>"#,
            title = html_escape(&document.base_filename),
            base_css = BASE_CSS,
            page_size = document.page.css_size(),
            page_margin = document.page.css_margin(),
            print_css = PRINT_CSS,
            body = body
        )
    }
}

fn render_block(block: &DocumentBlock) -> String {
    match block {
        DocumentBlock::Header(header) => render_header(header),
        DocumentBlock::MinutesPreamble {
            district_name,
            held_on,
        } => format!(
            r#"<p class="preamble">{} <strong>{}</strong> {} <strong>{}</strong> {}</p>"#,
            PREAMBLE_LEAD,
            html_escape(district_name),
            PREAMBLE_HELD_ON,
            html_escape(&held_on.to_uppercase()),
            PREAMBLE_CLOSE
        ),
        DocumentBlock::ResolutionNumber { text } => {
            format!(r#"<p class="resolution-number">{}</p>"#, html_escape(text))
        }
        DocumentBlock::Title { text } => format!(
            r#"<p class="resolution-title">{}</p>"#,
            html_escape(&DocumentBlock::title_display(text))
        ),
        DocumentBlock::Clause { kind, body } => format!(
            r#"<p class="clause"><strong>{}</strong> {}{}</p>"#,
            kind.prefix(),
            kind.connective(),
            html_escape(body)
        ),
        DocumentBlock::MotionTransition { movant, seconder } => format!(
            r#"<p class="clause motion"><strong>{}</strong> {}</p>"#,
            MOTION_LEAD,
            html_escape(&DocumentBlock::motion_text(movant, seconder))
        ),
        DocumentBlock::ApprovedLine { text } | DocumentBlock::AdoptedLine { text } => {
            format!(r#"<p class="footer-line">{}</p>"#, html_escape(text))
        }
        DocumentBlock::CertifiedLine { text } => {
            format!(r#"<p class="footer-line certified">{}</p>"#, html_escape(text))
        }
        DocumentBlock::ChairmanSlot { signatories } => format!(
            r#"<div class="signatories chairman">{}</div>"#,
            render_signatures(signatories)
        ),
        DocumentBlock::MiddleBlock { signatories } => format!(
            r#"<div class="signatories middle-block">{}</div>"#,
            render_signatures(signatories)
        ),
        DocumentBlock::GeneralManagerSlot { signatories } => format!(
            r#"<div class="signatories general-manager"><p class="concurred">{}</p>{}</div>"#,
            CONCURRED_LABEL,
            render_signatures(signatories)
        ),
        DocumentBlock::UnclassifiedSlot { signatories } => format!(
            r#"<div class="signatories middle-block unclassified">{}</div>"#,
            render_signatures(signatories)
        ),
        DocumentBlock::SignatoriesMissing { message } => {
            format!(r#"<p class="warning">{}</p>"#, html_escape(message))
        }
    }
}

fn render_header(header: &HeaderBlock) -> String {
    let logo = header
        .logo_url
        .as_deref()
        .map(|url| format!(r#"<img class="logo" src="{}" alt="Logo">"#, html_escape(url)))
        .unwrap_or_default();
    let contact = header
        .contact_line
        .as_deref()
        .map(|line| format!(r#"<p class="contact">{}</p>"#, html_escape(line)))
        .unwrap_or_default();

    format!(
        r#"<header class="letterhead">
    <div class="letterhead-logo">{logo}</div>
    <div class="letterhead-text">
        <p class="country">{country}</p>
        <p class="district">{district}</p>
        <p class="address">{address}</p>
        {contact}
    </div>
    <div></div>
</header>"#,
        logo = logo,
        country = html_escape(&header.country_line),
        district = html_escape(&header.district_name),
        address = html_escape(&header.address),
        contact = contact
    )
}

fn render_signatures(signatories: &[SignatoryLine]) -> String {
    signatories
        .iter()
        .map(|line| {
            let signature = line
                .signature_url
                .as_deref()
                .map(|url| {
                    format!(
                        r#"<img class="signature" src="{}" alt="Signature">"#,
                        html_escape(url)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="signature-block">{}<p class="signatory-name">{}</p><p class="signatory-position">{}</p></div>"#,
                signature,
                html_escape(&line.display_name()),
                html_escape(&line.position)
            )
        })
        .collect()
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const BASE_CSS: &str = r#"
body {
    margin: 0;
    background: #f3f4f6;
}
.resolution-page {
    width: 8.5in;
    box-sizing: border-box;
    margin: 0 auto;
    padding: 1in;
    background: #ffffff;
    color: #000000;
    font-family: Georgia, "Times New Roman", serif;
    font-size: 12pt;
    line-height: 1.6;
}
.letterhead {
    display: grid;
    grid-template-columns: 1fr auto 1fr;
    align-items: center;
    margin-bottom: 1.5rem;
}
.letterhead p { margin: 0.1rem 0; text-align: center; }
.letterhead .logo { max-width: 80px; max-height: 80px; object-fit: contain; }
.letterhead .country { font-weight: bold; font-size: 10.5pt; text-transform: uppercase; }
.letterhead .district { font-weight: bold; font-size: 13.5pt; text-transform: uppercase; }
.letterhead .address { font-size: 10.5pt; }
.letterhead .contact { font-size: 9pt; }
.preamble { text-align: center; }
.resolution-number {
    text-align: center;
    font-weight: bold;
    font-size: 13.5pt;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    margin-bottom: 1.5rem;
}
.resolution-title {
    text-align: center;
    font-weight: bold;
    font-size: 13.5pt;
    line-height: 1.25;
    margin-bottom: 2.5rem;
}
.clause { text-align: justify; margin: 0 0 1.5rem 0; }
.clause strong { margin-right: 0.5rem; }
.motion { margin-top: 2rem; }
.footer-line { text-align: left; margin: 2rem 0; }
.signatories { break-inside: avoid; margin-top: 3rem; }
.signatories.chairman,
.signatories.general-manager {
    display: flex;
    flex-direction: column;
    align-items: center;
}
.signatories.middle-block {
    display: grid;
    grid-template-columns: 1fr 1fr;
    column-gap: 2rem;
    row-gap: 3rem;
}
.concurred { margin-bottom: 1rem; }
.signature-block {
    position: relative;
    display: flex;
    flex-direction: column;
    align-items: center;
    text-align: center;
    padding-top: 1rem;
}
.signature-block .signature {
    position: absolute;
    top: -2rem;
    height: 4rem;
    object-fit: contain;
    pointer-events: none;
}
.signatory-name {
    font-weight: bold;
    letter-spacing: 0.03em;
    border-bottom: 1px solid #000000;
    min-width: 250px;
    margin: 0 0 0.25rem 0;
}
.signatory-position { font-style: italic; font-size: 10.5pt; margin: 0; }
.warning { color: #ef4444; font-style: italic; font-size: 10.5pt; margin-top: 3rem; }
"#;

const PRINT_CSS: &str = r#"
    body {
        background: white !important;
        height: auto !important;
        overflow: visible !important;
    }
    html, body, .fixed, .absolute,
    div[class*="fixed"], div[class*="absolute"],
    div[class*="overflow-hidden"], div[class*="overflow-y-auto"] {
        position: static !important;
        overflow: visible !important;
        height: auto !important;
        max-height: none !important;
        min-height: 0 !important;
    }
    .resolution-page {
        width: auto;
        padding: 0;
        box-shadow: none;
    }
    .no-print {
        display: none !important;
    }
"#;
