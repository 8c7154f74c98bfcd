//! Document composer.
//!
//! Turns a draft plus the organization profile into the ordered block list
//! both renderers consume. Every fallback and conditional line is decided
//! here, so preview and export cannot drift apart.

use tracing::warn;

use super::blocks::{ComposedDocument, DocumentBlock, HeaderBlock, PageGeometry, SignatoryLine};
use super::dates::{adoption_place, long_date, month_year, ordinal_day};
use crate::domain::organization::OrgProfile;
use crate::domain::resolution::{
    classify_signatories, normalize_clause, resolve_footer_text, AdoptedFooter, ClauseKind,
    ResolutionDraft, Signatory, DEFAULT_APPROVED_TEXT, DEFAULT_CERTIFIED_TEXT,
};

pub const COUNTRY_LINE: &str = "Republic of the Philippines";
pub const DISTRICT_NAME_PLACEHOLDER: &str = "Water District Name";
pub const ADDRESS_PLACEHOLDER: &str = "City/Municipality, Province";
pub const DATE_PLACEHOLDER: &str = "[DATE]";
pub const NUMBER_PLACEHOLDER: &str = "___";
pub const TITLE_PLACEHOLDER: &str = "TITLE OF THE RESOLUTION";
pub const MOVANT_PLACEHOLDER: &str = "[MOVANT]";
pub const SECONDER_PLACEHOLDER: &str = "[SECONDER]";
pub const MISSING_SIGNATORIES_MESSAGE: &str =
    "[No signatories defined. Please configure Organization Settings.]";

/// Builds `ComposedDocument`s. Stateless and pure apart from logging.
pub struct DocumentComposer;

impl DocumentComposer {
    pub fn compose(draft: &ResolutionDraft, profile: &OrgProfile) -> ComposedDocument {
        let mut blocks = Vec::new();

        blocks.push(DocumentBlock::Header(header(profile)));
        blocks.push(DocumentBlock::MinutesPreamble {
            district_name: profile
                .district_name()
                .unwrap_or(DISTRICT_NAME_PLACEHOLDER)
                .to_uppercase(),
            held_on: draft
                .held_on
                .map(long_date)
                .unwrap_or_else(|| DATE_PLACEHOLDER.to_string()),
        });
        blocks.push(DocumentBlock::ResolutionNumber {
            text: format!(
                "Resolution No. {}-Series of {}",
                or_placeholder(&draft.resolution_number, NUMBER_PLACEHOLDER),
                draft.series_year
            ),
        });
        blocks.push(DocumentBlock::Title {
            text: or_placeholder(&draft.title, TITLE_PLACEHOLDER).to_string(),
        });

        push_clauses(&mut blocks, &draft.whereas_clauses, ClauseKind::Whereas);
        blocks.push(DocumentBlock::MotionTransition {
            movant: optional_or_placeholder(&draft.movant_name, MOVANT_PLACEHOLDER),
            seconder: optional_or_placeholder(&draft.seconder_name, SECONDER_PLACEHOLDER),
        });
        push_clauses(&mut blocks, &draft.resolved_clauses, ClauseKind::Resolved);

        push_footer(&mut blocks, draft, profile);
        push_signatories(&mut blocks, &draft.signatories);

        ComposedDocument {
            blocks,
            base_filename: draft.export_base_name(),
            page: PageGeometry::LEGAL,
        }
    }
}

fn header(profile: &OrgProfile) -> HeaderBlock {
    let email = profile.email().map(|e| format!("Email: {}", e));
    let contact = profile.contact_number().map(|c| format!("Contact Number: {}", c));
    let contact_line = match (email, contact) {
        (Some(email), Some(contact)) => Some(format!("{} | {}", email, contact)),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    };

    HeaderBlock {
        country_line: COUNTRY_LINE.to_string(),
        district_name: profile
            .district_name()
            .unwrap_or(DISTRICT_NAME_PLACEHOLDER)
            .to_string(),
        address: profile.address().unwrap_or(ADDRESS_PLACEHOLDER).to_string(),
        contact_line,
        logo_url: profile.logo_url().map(str::to_string),
    }
}

fn push_clauses(blocks: &mut Vec<DocumentBlock>, clauses: &[String], kind: ClauseKind) {
    for raw in clauses {
        let body = normalize_clause(raw, kind);
        blocks.push(DocumentBlock::Clause {
            kind,
            body: ClauseKind::body_or_placeholder(&body).to_string(),
        });
    }
}

fn push_footer(blocks: &mut Vec<DocumentBlock>, draft: &ResolutionDraft, profile: &OrgProfile) {
    if let Some(text) = resolve_footer_text(draft.footer_approved_text.as_deref(), DEFAULT_APPROVED_TEXT) {
        blocks.push(DocumentBlock::ApprovedLine {
            text: text.to_string(),
        });
    }

    if let Some(approved_on) = draft.approved_on {
        let text = match &draft.footer_adopted_text {
            AdoptedFooter::Suppressed => None,
            AdoptedFooter::Custom(text) => Some(text.clone()),
            AdoptedFooter::Auto => Some(format!(
                "Adopted this {} day of {} at {}.",
                ordinal_day(approved_on),
                month_year(approved_on),
                adoption_place(profile.address())
            )),
        };
        if let Some(text) = text {
            blocks.push(DocumentBlock::AdoptedLine { text });
        }
    }

    if !draft.signatories.is_empty() {
        if let Some(text) =
            resolve_footer_text(draft.footer_certified_text.as_deref(), DEFAULT_CERTIFIED_TEXT)
        {
            blocks.push(DocumentBlock::CertifiedLine {
                text: text.to_string(),
            });
        }
    }
}

fn push_signatories(blocks: &mut Vec<DocumentBlock>, signatories: &[Signatory]) {
    if signatories.is_empty() {
        blocks.push(DocumentBlock::SignatoriesMissing {
            message: MISSING_SIGNATORIES_MESSAGE.to_string(),
        });
        return;
    }

    let groups = classify_signatories(signatories);
    if groups.has_unclassified() {
        let roles: Vec<&str> = groups.unclassified.iter().map(|s| s.role.as_str()).collect();
        warn!(?roles, "Signatories with unrecognized roles placed after the main blocks");
    }

    if !groups.chairman.is_empty() {
        blocks.push(DocumentBlock::ChairmanSlot {
            signatories: lines(&groups.chairman),
        });
    }
    if !groups.middle_block.is_empty() {
        blocks.push(DocumentBlock::MiddleBlock {
            signatories: lines(&groups.middle_block),
        });
    }
    if !groups.gm.is_empty() {
        blocks.push(DocumentBlock::GeneralManagerSlot {
            signatories: lines(&groups.gm),
        });
    }
    if !groups.unclassified.is_empty() {
        blocks.push(DocumentBlock::UnclassifiedSlot {
            signatories: lines(&groups.unclassified),
        });
    }
}

fn lines(group: &[&Signatory]) -> Vec<SignatoryLine> {
    group.iter().map(|s| SignatoryLine::from(*s)).collect()
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

fn optional_or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    or_placeholder(value.as_deref().unwrap_or(""), placeholder).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::{BoardRoster, RoleDefault};
    use crate::domain::resolution::SignatoryRole;
    use chrono::NaiveDate;

    // ════════════════════════════════════════════════════════════════════════
    // Fixtures
    // ════════════════════════════════════════════════════════════════════════

    fn profile() -> OrgProfile {
        OrgProfile {
            water_district_name: Some("Metro Tanauan Water District".to_string()),
            address: Some("J. Gonzales St., Poblacion, Tanauan City, Batangas".to_string()),
            water_district_email: Some("board@mtwd.gov.ph".to_string()),
            water_district_contact: None,
            logo_url: Some("https://cdn/logo.png".to_string()),
            full_name: None,
            signature_url: None,
            roster: BoardRoster {
                chairman: Some(RoleDefault::named("Juan Dela Cruz")),
                ..Default::default()
            },
        }
    }

    fn draft() -> ResolutionDraft {
        let mut draft = ResolutionDraft::blank(2025);
        draft.title = "Approving the water rate adjustment".to_string();
        draft.resolution_number = "012".to_string();
        draft.held_on = NaiveDate::from_ymd_opt(2025, 3, 5);
        draft.approved_on = NaiveDate::from_ymd_opt(2025, 3, 14);
        draft.whereas_clauses = vec!["WHEREAS, the rates were last adjusted in 2015".to_string()];
        draft.resolved_clauses = vec!["RESOLVED, as it is hereby resolved, that rates rise".to_string()];
        draft.movant_name = Some("Maria Santos".to_string());
        draft.seconder_name = Some("Pedro Cruz".to_string());
        draft.signatories = vec![Signatory::new(
            "Juan Dela Cruz",
            "BOD Chairman",
            SignatoryRole::Chairman,
        )];
        draft
    }

    fn texts(doc: &ComposedDocument) -> Vec<String> {
        doc.blocks.iter().map(DocumentBlock::plain_text).collect()
    }

    fn adopted_line(doc: &ComposedDocument) -> Option<&str> {
        doc.blocks.iter().find_map(|b| match b {
            DocumentBlock::AdoptedLine { text } => Some(text.as_str()),
            _ => None,
        })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Header and preamble
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn header_uses_profile_values() {
        let doc = DocumentComposer::compose(&draft(), &profile());
        let header = doc.header().unwrap();

        assert_eq!(header.country_line, "Republic of the Philippines");
        assert_eq!(header.district_name, "Metro Tanauan Water District");
        assert_eq!(header.contact_line.as_deref(), Some("Email: board@mtwd.gov.ph"));
        assert_eq!(doc.logo_url(), Some("https://cdn/logo.png"));
    }

    #[test]
    fn header_joins_email_and_contact() {
        let mut profile = profile();
        profile.water_district_contact = Some("(043) 778-1234".to_string());

        let doc = DocumentComposer::compose(&draft(), &profile);

        assert_eq!(
            doc.header().unwrap().contact_line.as_deref(),
            Some("Email: board@mtwd.gov.ph | Contact Number: (043) 778-1234")
        );
    }

    #[test]
    fn empty_profile_uses_placeholders() {
        let doc = DocumentComposer::compose(&ResolutionDraft::blank(2025), &OrgProfile::default());
        let lines = texts(&doc);

        assert_eq!(
            lines[0],
            "Republic of the Philippines\nWater District Name\nCity/Municipality, Province"
        );
        assert_eq!(
            lines[1],
            "EXCERPTS FROM THE MINUTES OF THE REGULAR MEETING OF THE BOARD OF DIRECTORS OF WATER DISTRICT NAME HELD ON [DATE] AT THE BOARD ROOM."
        );
        assert_eq!(lines[2], "Resolution No. ___-Series of 2025");
        assert_eq!(lines[3], "\"TITLE OF THE RESOLUTION\"");
        assert_eq!(lines[4], "WHEREAS, ...");
        assert_eq!(lines[5], "NOW THEREFORE, on motion of [MOVANT] duly seconded by [SECONDER], be it:");
        assert_eq!(lines[6], "RESOLVED, as it is hereby resolved, ...");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Clauses and footer
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn clauses_are_normalized_before_prefixing() {
        let doc = DocumentComposer::compose(&draft(), &profile());
        let lines = texts(&doc);

        assert!(lines.contains(&"WHEREAS, the rates were last adjusted in 2015".to_string()));
        assert!(lines.contains(&"RESOLVED, as it is hereby resolved, that rates rise".to_string()));
    }

    #[test]
    fn auto_adopted_line_uses_date_and_address_tail() {
        let doc = DocumentComposer::compose(&draft(), &profile());
        assert_eq!(
            adopted_line(&doc),
            Some("Adopted this 14th day of March 2025 at Tanauan City, Batangas.")
        );
    }

    #[test]
    fn adopted_line_uses_correct_ordinals() {
        let mut draft = draft();
        draft.approved_on = NaiveDate::from_ymd_opt(2025, 3, 22);

        let doc = DocumentComposer::compose(&draft, &profile());

        assert_eq!(
            adopted_line(&doc),
            Some("Adopted this 22nd day of March 2025 at Tanauan City, Batangas.")
        );
    }

    #[test]
    fn suppressed_adopted_line_is_omitted() {
        let mut draft = draft();
        draft.footer_adopted_text = AdoptedFooter::Suppressed;

        let doc = DocumentComposer::compose(&draft, &profile());

        assert!(adopted_line(&doc).is_none());
    }

    #[test]
    fn custom_adopted_line_is_verbatim() {
        let mut draft = draft();
        draft.footer_adopted_text = AdoptedFooter::Custom("Adopted in session.".to_string());

        let doc = DocumentComposer::compose(&draft, &profile());

        assert_eq!(adopted_line(&doc), Some("Adopted in session."));
    }

    #[test]
    fn adopted_line_requires_approval_date() {
        let mut draft = draft();
        draft.approved_on = None;
        draft.footer_adopted_text = AdoptedFooter::Custom("Adopted in session.".to_string());

        let doc = DocumentComposer::compose(&draft, &profile());

        assert!(adopted_line(&doc).is_none());
    }

    #[test]
    fn adopted_line_without_address_uses_blank_place() {
        let mut profile = profile();
        profile.address = None;

        let doc = DocumentComposer::compose(&draft(), &profile);

        assert_eq!(
            adopted_line(&doc),
            Some("Adopted this 14th day of March 2025 at _____________________.")
        );
    }

    #[test]
    fn approved_line_defaults_and_can_be_hidden() {
        let doc = DocumentComposer::compose(&draft(), &profile());
        assert!(doc
            .blocks
            .contains(&DocumentBlock::ApprovedLine { text: "Unanimously approved.".into() }));

        let mut hidden = draft();
        hidden.footer_approved_text = Some("   ".to_string());
        let doc = DocumentComposer::compose(&hidden, &profile());
        assert!(!doc
            .blocks
            .iter()
            .any(|b| matches!(b, DocumentBlock::ApprovedLine { .. })));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Signatories
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn no_signatories_yields_warning_and_no_certification() {
        let mut draft = draft();
        draft.signatories.clear();

        let doc = DocumentComposer::compose(&draft, &profile());

        assert!(doc.has_missing_signatories_warning());
        assert!(!doc
            .blocks
            .iter()
            .any(|b| matches!(b, DocumentBlock::CertifiedLine { .. })));
        assert_eq!(
            doc.blocks.last().unwrap().plain_text(),
            "[No signatories defined. Please configure Organization Settings.]"
        );
    }

    #[test]
    fn no_signatories_yields_exactly_one_warning_and_no_slots() {
        let mut draft = draft();
        draft.signatories.clear();

        let doc = DocumentComposer::compose(&draft, &profile());

        let warnings = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, DocumentBlock::SignatoriesMissing { .. }))
            .count();
        let slots = doc
            .blocks
            .iter()
            .filter(|b| {
                matches!(
                    b,
                    DocumentBlock::ChairmanSlot { .. }
                        | DocumentBlock::MiddleBlock { .. }
                        | DocumentBlock::GeneralManagerSlot { .. }
                        | DocumentBlock::UnclassifiedSlot { .. }
                )
            })
            .count();
        assert_eq!(warnings, 1);
        assert_eq!(slots, 0);
    }

    #[test]
    fn chairman_and_general_manager_resolution() {
        let mut draft = ResolutionDraft::blank(2025);
        draft.resolution_number = "012".to_string();
        draft.whereas_clauses = vec!["WHEREAS, water rates require adjustment".to_string()];
        draft.resolved_clauses =
            vec!["RESOLVED, as it is hereby resolved, rates are adjusted".to_string()];
        draft.signatories = vec![
            Signatory::new("J. Dela Cruz", "BOD Chairman", SignatoryRole::Chairman),
            Signatory::new("M. Santos", "General Manager", SignatoryRole::GeneralManager),
        ];

        let doc = DocumentComposer::compose(&draft, &profile());
        let lines = texts(&doc);

        assert!(lines.contains(&"Resolution No. 012-Series of 2025".to_string()));
        let whereas: Vec<&String> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                DocumentBlock::Clause {
                    kind: ClauseKind::Whereas,
                    body,
                } => Some(body),
                _ => None,
            })
            .collect();
        assert_eq!(whereas, vec!["water rates require adjustment"]);
        assert!(lines.contains(&"WHEREAS, water rates require adjustment".to_string()));
        assert!(lines.contains(&"RESOLVED, as it is hereby resolved, rates are adjusted".to_string()));

        let chairman: Vec<&DocumentBlock> = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, DocumentBlock::ChairmanSlot { .. }))
            .collect();
        assert_eq!(chairman.len(), 1);
        assert_eq!(chairman[0].plain_text(), "J. DELA CRUZ\nBOD Chairman");

        let gm: Vec<&DocumentBlock> = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, DocumentBlock::GeneralManagerSlot { .. }))
            .collect();
        assert_eq!(gm.len(), 1);
        assert_eq!(gm[0].plain_text(), "Concurred:\nM. SANTOS\nGeneral Manager");

        assert!(!doc
            .blocks
            .iter()
            .any(|b| matches!(b, DocumentBlock::MiddleBlock { .. } | DocumentBlock::UnclassifiedSlot { .. })));
        assert!(!doc.has_missing_signatories_warning());
    }

    #[test]
    fn signatory_slots_follow_layout_order() {
        let mut draft = draft();
        draft.signatories = vec![
            Signatory::new("GM", "General Manager", SignatoryRole::GeneralManager),
            Signatory::new("Member A", "BOD Member", SignatoryRole::Member),
            Signatory::new("Sec", "BOD Secretary", SignatoryRole::Secretary),
            Signatory::new("Chair", "BOD Chairman", SignatoryRole::Chairman),
            Signatory::new("Aud", "Auditor", SignatoryRole::from("auditor")),
        ];

        let doc = DocumentComposer::compose(&draft, &profile());
        let tail: Vec<&DocumentBlock> = doc.blocks.iter().rev().take(4).rev().collect();

        assert!(matches!(tail[0], DocumentBlock::ChairmanSlot { .. }));
        match tail[1] {
            DocumentBlock::MiddleBlock { signatories } => {
                let names: Vec<&str> = signatories.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["Sec", "Member A"]);
            }
            other => panic!("expected middle block, got {:?}", other),
        }
        assert!(matches!(tail[2], DocumentBlock::GeneralManagerSlot { .. }));
        assert!(matches!(tail[3], DocumentBlock::UnclassifiedSlot { .. }));
    }

    #[test]
    fn base_filename_follows_resolution_number() {
        let doc = DocumentComposer::compose(&draft(), &profile());
        assert_eq!(doc.base_filename, "Resolution-012");
        assert_eq!(doc.page, PageGeometry::LEGAL);
    }
}
