//! Request and response bodies for resolution endpoints.
//!
//! Drafts travel in their camelCase form, so a stored resolution returned by
//! `GET /api/resolutions/:id` can be sent back to `PUT` unchanged.

use serde::{Deserialize, Serialize};

use crate::application::StartDraftResult;
use crate::domain::foundation::Timestamp;
use crate::domain::resolution::{ResolutionDraft, ResolutionRecord, ResolutionStatus};
use crate::ports::DraftSuggestion;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /api/resolutions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResolutionsParams {
    pub query: Option<String>,
}

/// Query string for `GET /api/resolutions/new`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDraftParams {
    pub series_year: Option<i32>,
}

/// Query string for export endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    /// `docx` (default) or `html`.
    pub format: Option<String>,
}

/// Body for `DELETE /api/resolutions/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteResolutionRequest {
    #[serde(default)]
    pub confirm: String,
}

/// Body for `POST /api/resolutions/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDraftRequest {
    pub prompt: String,
    /// Current form contents; omitted for a brand-new draft.
    #[serde(default)]
    pub draft: Option<ResolutionDraft>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// A stored resolution with its draft fields inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse {
    pub id: String,
    pub status: ResolutionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub draft: ResolutionDraft,
}

impl From<ResolutionRecord> for ResolutionResponse {
    fn from(record: ResolutionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
            draft: record.to_draft(),
        }
    }
}

/// One dashboard card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionSummaryResponse {
    pub id: String,
    pub resolution_number: String,
    pub series_year: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ResolutionStatus,
    pub created_at: Timestamp,
}

impl From<ResolutionRecord> for ResolutionSummaryResponse {
    fn from(record: ResolutionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            resolution_number: record.resolution_number,
            series_year: record.series_year,
            title: record.title,
            description: record.description,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionListResponse {
    pub resolutions: Vec<ResolutionSummaryResponse>,
    pub total: usize,
}

impl From<Vec<ResolutionRecord>> for ResolutionListResponse {
    fn from(records: Vec<ResolutionRecord>) -> Self {
        let resolutions: Vec<ResolutionSummaryResponse> =
            records.into_iter().map(Into::into).collect();
        Self {
            total: resolutions.len(),
            resolutions,
        }
    }
}

/// A new draft plus the officials to choose movant and seconder from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraftResponse {
    pub draft: ResolutionDraft,
    pub officials: Vec<String>,
}

impl From<StartDraftResult> for NewDraftResponse {
    fn from(result: StartDraftResult) -> Self {
        Self {
            draft: result.draft,
            officials: result.officials,
        }
    }
}

/// What the model proposed and the merged draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDraftResponse {
    pub suggestion: DraftSuggestion,
    pub draft: ResolutionDraft,
}
