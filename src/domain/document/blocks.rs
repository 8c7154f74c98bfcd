//! Composed document model shared by the preview and export renderers.

use serde::Serialize;

use crate::domain::resolution::{ClauseKind, Signatory};

/// Lead-in of the minutes preamble, before the district name.
pub const PREAMBLE_LEAD: &str =
    "EXCERPTS FROM THE MINUTES OF THE REGULAR MEETING OF THE BOARD OF DIRECTORS OF";
/// Text between district name and meeting date.
pub const PREAMBLE_HELD_ON: &str = "HELD ON";
/// Closing of the minutes preamble.
pub const PREAMBLE_CLOSE: &str = "AT THE BOARD ROOM.";
/// Bold lead-in of the motion line.
pub const MOTION_LEAD: &str = "NOW THEREFORE,";
/// Label above the general manager's block.
pub const CONCURRED_LABEL: &str = "Concurred:";

/// Legal-size page: 8.5in x 13in with 1in margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageGeometry {
    pub width_twips: u32,
    pub height_twips: u32,
    pub margin_twips: u32,
}

impl PageGeometry {
    pub const TWIPS_PER_INCH: u32 = 1440;

    pub const LEGAL: PageGeometry = PageGeometry {
        width_twips: 12240,
        height_twips: 18720,
        margin_twips: 1440,
    };

    /// CSS `@page` size, e.g. `8.5in 13in`.
    pub fn css_size(&self) -> String {
        format!(
            "{}in {}in",
            twips_to_inches(self.width_twips),
            twips_to_inches(self.height_twips)
        )
    }

    /// CSS `@page` margin, e.g. `1in`.
    pub fn css_margin(&self) -> String {
        format!("{}in", twips_to_inches(self.margin_twips))
    }
}

fn twips_to_inches(twips: u32) -> f64 {
    f64::from(twips) / f64::from(PageGeometry::TWIPS_PER_INCH)
}

/// Letterhead at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    pub country_line: String,
    pub district_name: String,
    pub address: String,
    /// `Email: .. | Contact Number: ..`, absent when neither is known.
    pub contact_line: Option<String>,
    pub logo_url: Option<String>,
}

/// One signature block as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatoryLine {
    pub name: String,
    pub position: String,
    pub signature_url: Option<String>,
}

impl SignatoryLine {
    /// Names print in capitals above the rule.
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }
}

impl From<&Signatory> for SignatoryLine {
    fn from(signatory: &Signatory) -> Self {
        Self {
            name: signatory.name.clone(),
            position: signatory.position.clone(),
            signature_url: signatory.signature_url.clone(),
        }
    }
}

/// Ordered, typed pieces of a resolution page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentBlock {
    Header(HeaderBlock),
    MinutesPreamble {
        district_name: String,
        held_on: String,
    },
    ResolutionNumber {
        text: String,
    },
    Title {
        text: String,
    },
    Clause {
        kind: ClauseKind,
        body: String,
    },
    MotionTransition {
        movant: String,
        seconder: String,
    },
    ApprovedLine {
        text: String,
    },
    AdoptedLine {
        text: String,
    },
    CertifiedLine {
        text: String,
    },
    ChairmanSlot {
        signatories: Vec<SignatoryLine>,
    },
    MiddleBlock {
        signatories: Vec<SignatoryLine>,
    },
    GeneralManagerSlot {
        signatories: Vec<SignatoryLine>,
    },
    UnclassifiedSlot {
        signatories: Vec<SignatoryLine>,
    },
    SignatoriesMissing {
        message: String,
    },
}

impl DocumentBlock {
    /// Title as printed: quoted and in capitals.
    pub fn title_display(text: &str) -> String {
        format!("\"{}\"", text.to_uppercase())
    }

    /// Text after the bold `NOW THEREFORE,` lead.
    pub fn motion_text(movant: &str, seconder: &str) -> String {
        format!("on motion of {} duly seconded by {}, be it:", movant, seconder)
    }

    /// The block's text as a single plain line, without markup.
    ///
    /// Signature slots yield their names and positions, one per line.
    pub fn plain_text(&self) -> String {
        match self {
            DocumentBlock::Header(header) => {
                let mut lines = vec![
                    header.country_line.clone(),
                    header.district_name.clone(),
                    header.address.clone(),
                ];
                if let Some(contact) = &header.contact_line {
                    lines.push(contact.clone());
                }
                lines.join("\n")
            }
            DocumentBlock::MinutesPreamble {
                district_name,
                held_on,
            } => format!(
                "{} {} {} {} {}",
                PREAMBLE_LEAD, district_name, PREAMBLE_HELD_ON, held_on, PREAMBLE_CLOSE
            ),
            DocumentBlock::ResolutionNumber { text } => text.clone(),
            DocumentBlock::Title { text } => Self::title_display(text),
            DocumentBlock::Clause { kind, body } => {
                format!("{} {}{}", kind.prefix(), kind.connective(), body)
            }
            DocumentBlock::MotionTransition { movant, seconder } => {
                format!("{} {}", MOTION_LEAD, Self::motion_text(movant, seconder))
            }
            DocumentBlock::ApprovedLine { text }
            | DocumentBlock::AdoptedLine { text }
            | DocumentBlock::CertifiedLine { text } => text.clone(),
            DocumentBlock::ChairmanSlot { signatories }
            | DocumentBlock::MiddleBlock { signatories }
            | DocumentBlock::UnclassifiedSlot { signatories } => signature_lines(signatories),
            DocumentBlock::GeneralManagerSlot { signatories } => {
                format!("{}\n{}", CONCURRED_LABEL, signature_lines(signatories))
            }
            DocumentBlock::SignatoriesMissing { message } => message.clone(),
        }
    }
}

fn signature_lines(signatories: &[SignatoryLine]) -> String {
    signatories
        .iter()
        .map(|s| format!("{}\n{}", s.display_name(), s.position))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A fully composed resolution, ready for any renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedDocument {
    pub blocks: Vec<DocumentBlock>,
    /// File name stem for downloads, e.g. `Resolution-012`.
    pub base_filename: String,
    pub page: PageGeometry,
}

impl ComposedDocument {
    /// All block texts in order, one block per paragraph.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(DocumentBlock::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn header(&self) -> Option<&HeaderBlock> {
        self.blocks.iter().find_map(|block| match block {
            DocumentBlock::Header(header) => Some(header),
            _ => None,
        })
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.header().and_then(|h| h.logo_url.as_deref())
    }

    pub fn has_missing_signatories_warning(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, DocumentBlock::SignatoriesMissing { .. }))
    }
}
