//! Resolution domain module.
//!
//! The draft a clerk edits, the signatories who sign it, and the pure rules
//! that prepare it for composition:
//!
//! - `clause` - strips redundant WHEREAS / RESOLVED prefixes
//! - `classifier` - groups signatories into page slots and orders them
//! - `footer` - approved / adopted / certified line settings
//! - `validation` - save-time field checks

mod classifier;
mod clause;
mod draft;
mod errors;
mod footer;
mod record;
mod signatory;
mod validation;

pub use classifier::{classify_signatories, SignatoryGroups};
pub use clause::{normalize_clause, ClauseKind, EMPTY_CLAUSE_PLACEHOLDER};
pub use draft::{ResolutionDraft, ResolutionStatus};
pub use errors::ResolutionError;
pub use footer::{
    resolve_footer_text, AdoptedFooter, DEFAULT_APPROVED_TEXT, DEFAULT_CERTIFIED_TEXT,
    SUPPRESSED_SENTINEL,
};
pub use record::{ResolutionContent, ResolutionRecord};
pub use signatory::{Signatory, SignatoryRole};
pub use validation::{
    CLAUSE_MIN_CHARS, SERIES_YEAR_MAX, SERIES_YEAR_MIN, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
