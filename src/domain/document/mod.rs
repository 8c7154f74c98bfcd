//! Document composition.
//!
//! `DocumentComposer` turns a `ResolutionDraft` and an `OrgProfile` into a
//! `ComposedDocument`: an ordered list of typed blocks that the HTML preview
//! and the DOCX export both render.

mod blocks;
mod composer;
mod dates;

pub use blocks::{
    ComposedDocument, DocumentBlock, HeaderBlock, PageGeometry, SignatoryLine, CONCURRED_LABEL,
    MOTION_LEAD, PREAMBLE_CLOSE, PREAMBLE_HELD_ON, PREAMBLE_LEAD,
};
pub use composer::{
    DocumentComposer, ADDRESS_PLACEHOLDER, COUNTRY_LINE, DATE_PLACEHOLDER,
    DISTRICT_NAME_PLACEHOLDER, MISSING_SIGNATORIES_MESSAGE, MOVANT_PLACEHOLDER,
    NUMBER_PLACEHOLDER, SECONDER_PLACEHOLDER, TITLE_PLACEHOLDER,
};
pub use dates::{adoption_place, long_date, month_year, ordinal_suffix, BLANK_PLACE};
