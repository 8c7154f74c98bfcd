//! The editable resolution draft.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::footer::AdoptedFooter;
use super::signatory::Signatory;
use crate::domain::foundation::ValidationError;

/// Lifecycle state of a stored resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    #[default]
    Draft,
    Final,
    Archived,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Draft => "draft",
            ResolutionStatus::Final => "final",
            ResolutionStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResolutionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(ResolutionStatus::Draft),
            "final" => Ok(ResolutionStatus::Final),
            "archived" => Ok(ResolutionStatus::Archived),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Structured form data for one board resolution.
///
/// The composer accepts any draft, including half-filled ones; `validate`
/// is only enforced when saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub resolution_number: String,
    pub series_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Date of the board meeting.
    #[serde(default)]
    pub held_on: Option<NaiveDate>,
    /// Date the resolution was adopted.
    #[serde(default)]
    pub approved_on: Option<NaiveDate>,
    #[serde(default)]
    pub whereas_clauses: Vec<String>,
    #[serde(default)]
    pub resolved_clauses: Vec<String>,
    #[serde(default, alias = "movant_name")]
    pub movant_name: Option<String>,
    #[serde(default, alias = "seconder_name")]
    pub seconder_name: Option<String>,
    #[serde(default, alias = "footer_approved_text")]
    pub footer_approved_text: Option<String>,
    #[serde(default, alias = "footer_adopted_text")]
    pub footer_adopted_text: AdoptedFooter,
    #[serde(default, alias = "footer_certified_text")]
    pub footer_certified_text: Option<String>,
    #[serde(default)]
    pub signatories: Vec<Signatory>,
}

impl ResolutionDraft {
    /// A blank draft for the given series year, with one empty clause of
    /// each kind so the form has something to edit.
    pub fn blank(series_year: i32) -> Self {
        Self {
            title: String::new(),
            resolution_number: String::new(),
            series_year,
            description: None,
            held_on: None,
            approved_on: None,
            whereas_clauses: vec![String::new()],
            resolved_clauses: vec![String::new()],
            movant_name: None,
            seconder_name: None,
            footer_approved_text: None,
            footer_adopted_text: AdoptedFooter::Auto,
            footer_certified_text: None,
            signatories: Vec::new(),
        }
    }

    /// Base name for exported files: `Resolution-{number}` or
    /// `Resolution-Draft` when unnumbered.
    pub fn export_base_name(&self) -> String {
        let number = self.resolution_number.trim();
        if number.is_empty() {
            "Resolution-Draft".to_string()
        } else {
            format!("Resolution-{}", number)
        }
    }
}

impl Default for ResolutionDraft {
    fn default() -> Self {
        Self::blank(Utc::now().year())
    }
}
