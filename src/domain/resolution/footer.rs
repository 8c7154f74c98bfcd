//! Footer line settings.

use serde::{Deserialize, Serialize};

/// Approved line used when the draft does not override it.
pub const DEFAULT_APPROVED_TEXT: &str = "Unanimously approved.";

/// Certification line used when the draft does not override it.
pub const DEFAULT_CERTIFIED_TEXT: &str =
    "We hereby certify to the correctness of the foregoing resolution.";

/// Stored value that hides the adopted line.
pub const SUPPRESSED_SENTINEL: &str = "\u{200b}";

/// Tri-state setting for the "Adopted this ..." footer line.
///
/// On the wire this is a nullable string: null or blank means `Auto`, a
/// lone zero-width space means `Suppressed`, anything else is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum AdoptedFooter {
    /// Generate the line from the approval date and district address.
    #[default]
    Auto,
    /// Omit the line even when an approval date is set.
    Suppressed,
    /// Print this text verbatim.
    Custom(String),
}

impl AdoptedFooter {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, AdoptedFooter::Suppressed)
    }
}

impl From<Option<String>> for AdoptedFooter {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => AdoptedFooter::Auto,
            Some(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    AdoptedFooter::Auto
                } else if trimmed == SUPPRESSED_SENTINEL {
                    AdoptedFooter::Suppressed
                } else {
                    AdoptedFooter::Custom(trimmed.to_string())
                }
            }
        }
    }
}

impl From<AdoptedFooter> for Option<String> {
    fn from(footer: AdoptedFooter) -> Self {
        match footer {
            AdoptedFooter::Auto => None,
            AdoptedFooter::Suppressed => Some(SUPPRESSED_SENTINEL.to_string()),
            AdoptedFooter::Custom(text) => Some(text),
        }
    }
}

/// Resolves an optional footer override against its default.
///
/// `None` yields the default; an override that is blank after trimming
/// hides the line.
pub fn resolve_footer_text<'a>(text: Option<&'a str>, default: &'a str) -> Option<&'a str> {
    let text = text.unwrap_or(default).trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
