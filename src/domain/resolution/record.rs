//! Stored form of a resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::draft::{ResolutionDraft, ResolutionStatus};
use super::footer::AdoptedFooter;
use super::signatory::Signatory;
use crate::domain::foundation::{ResolutionId, Timestamp, UserId};

/// Clause text and footer settings, stored as one nested document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContent {
    #[serde(default)]
    pub whereas_clauses: Vec<String>,
    #[serde(default)]
    pub resolved_clauses: Vec<String>,
    #[serde(default, alias = "movant_name")]
    pub movant_name: Option<String>,
    #[serde(default, alias = "seconder_name")]
    pub seconder_name: Option<String>,
    #[serde(default)]
    pub footer_approved_text: Option<String>,
    #[serde(default)]
    pub footer_adopted_text: AdoptedFooter,
    #[serde(default)]
    pub footer_certified_text: Option<String>,
}

/// A resolution as persisted for one owner.
///
/// `(resolution_number, series_year, owner)` is unique; saving a draft with
/// an existing number and year updates that record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub id: ResolutionId,
    pub owner: UserId,
    pub resolution_number: String,
    pub series_year: i32,
    pub title: String,
    pub description: Option<String>,
    pub held_on: Option<NaiveDate>,
    pub approved_on: Option<NaiveDate>,
    pub content: ResolutionContent,
    pub signatories: Vec<Signatory>,
    pub status: ResolutionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ResolutionRecord {
    /// Builds a fresh record from a draft.
    pub fn from_draft(
        owner: UserId,
        draft: ResolutionDraft,
        status: ResolutionStatus,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ResolutionId::new(),
            owner,
            resolution_number: draft.resolution_number.trim().to_string(),
            series_year: draft.series_year,
            title: draft.title,
            description: draft.description,
            held_on: draft.held_on,
            approved_on: draft.approved_on,
            content: ResolutionContent {
                whereas_clauses: draft.whereas_clauses,
                resolved_clauses: draft.resolved_clauses,
                movant_name: draft.movant_name,
                seconder_name: draft.seconder_name,
                footer_approved_text: draft.footer_approved_text,
                footer_adopted_text: draft.footer_adopted_text,
                footer_certified_text: draft.footer_certified_text,
            },
            signatories: draft.signatories,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs the editable draft.
    pub fn to_draft(&self) -> ResolutionDraft {
        ResolutionDraft {
            title: self.title.clone(),
            resolution_number: self.resolution_number.clone(),
            series_year: self.series_year,
            description: self.description.clone(),
            held_on: self.held_on,
            approved_on: self.approved_on,
            whereas_clauses: self.content.whereas_clauses.clone(),
            resolved_clauses: self.content.resolved_clauses.clone(),
            movant_name: self.content.movant_name.clone(),
            seconder_name: self.content.seconder_name.clone(),
            footer_approved_text: self.content.footer_approved_text.clone(),
            footer_adopted_text: self.content.footer_adopted_text.clone(),
            footer_certified_text: self.content.footer_certified_text.clone(),
            signatories: self.signatories.clone(),
        }
    }

    /// Whether `other` occupies the same `(number, year, owner)` slot.
    pub fn same_slot(&self, other: &ResolutionRecord) -> bool {
        self.owner == other.owner
            && self.series_year == other.series_year
            && self.resolution_number == other.resolution_number
    }

    /// Case-insensitive substring match over title and resolution number.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.resolution_number.to_lowercase().contains(&needle)
    }
}
