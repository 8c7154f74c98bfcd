//! EditingSession - the mutable state behind one open resolution form.
//!
//! The draft is only changed through the setters below, each of which marks
//! the session dirty. Org defaults are applied to a fresh, untouched draft
//! only, so they never overwrite what the clerk has typed.

use chrono::NaiveDate;

use crate::domain::document::{ComposedDocument, DocumentComposer};
use crate::domain::foundation::ResolutionId;
use crate::domain::organization::OrgProfile;
use crate::domain::resolution::{
    AdoptedFooter, ResolutionDraft, ResolutionError, ResolutionRecord, Signatory,
};
use crate::ports::DraftSuggestion;

/// Which clause list a clause edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseList {
    Whereas,
    Resolved,
}

/// An open resolution draft and its editing flags.
#[derive(Debug, Clone)]
pub struct EditingSession {
    draft: ResolutionDraft,
    resolution_id: Option<ResolutionId>,
    dirty: bool,
    generating: bool,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new(ResolutionDraft::default())
    }
}

impl EditingSession {
    /// Opens a session on an unsaved draft.
    pub fn new(draft: ResolutionDraft) -> Self {
        Self {
            draft,
            resolution_id: None,
            dirty: false,
            generating: false,
        }
    }

    /// Opens a session on a stored resolution.
    pub fn from_record(record: &ResolutionRecord) -> Self {
        Self {
            draft: record.to_draft(),
            resolution_id: Some(record.id),
            dirty: false,
            generating: false,
        }
    }

    pub fn draft(&self) -> &ResolutionDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ResolutionDraft {
        self.draft
    }

    /// Id of the stored record, once the draft has been saved.
    pub fn resolution_id(&self) -> Option<ResolutionId> {
        self.resolution_id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Composes the current draft for rendering.
    pub fn compose(&self, profile: &OrgProfile) -> ComposedDocument {
        DocumentComposer::compose(&self.draft, profile)
    }

    // ───────────────────────────────────────────────────────────────
    // Setters
    // ───────────────────────────────────────────────────────────────

    fn edit(&mut self, change: impl FnOnce(&mut ResolutionDraft)) {
        change(&mut self.draft);
        self.dirty = true;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.edit(|d| d.title = title);
    }

    pub fn set_resolution_number(&mut self, number: impl Into<String>) {
        let number = number.into();
        self.edit(|d| d.resolution_number = number);
    }

    pub fn set_series_year(&mut self, year: i32) {
        self.edit(|d| d.series_year = year);
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.edit(|d| d.description = description);
    }

    pub fn set_held_on(&mut self, date: Option<NaiveDate>) {
        self.edit(|d| d.held_on = date);
    }

    pub fn set_approved_on(&mut self, date: Option<NaiveDate>) {
        self.edit(|d| d.approved_on = date);
    }

    pub fn set_movant(&mut self, name: Option<String>) {
        self.edit(|d| d.movant_name = name);
    }

    pub fn set_seconder(&mut self, name: Option<String>) {
        self.edit(|d| d.seconder_name = name);
    }

    pub fn set_footer_approved_text(&mut self, text: Option<String>) {
        self.edit(|d| d.footer_approved_text = text);
    }

    pub fn set_footer_adopted_text(&mut self, footer: AdoptedFooter) {
        self.edit(|d| d.footer_adopted_text = footer);
    }

    pub fn set_footer_certified_text(&mut self, text: Option<String>) {
        self.edit(|d| d.footer_certified_text = text);
    }

    pub fn set_clauses(&mut self, list: ClauseList, clauses: Vec<String>) {
        self.edit(|d| *clauses_mut(d, list) = clauses);
    }

    /// Appends an empty clause for the form to fill in.
    pub fn add_clause(&mut self, list: ClauseList) {
        self.edit(|d| clauses_mut(d, list).push(String::new()));
    }

    /// Replaces the clause at `index`. Returns false when out of range.
    pub fn set_clause(&mut self, list: ClauseList, index: usize, text: impl Into<String>) -> bool {
        if index >= clauses_mut(&mut self.draft, list).len() {
            return false;
        }
        let text = text.into();
        self.edit(|d| clauses_mut(d, list)[index] = text);
        true
    }

    /// Removes the clause at `index`. Returns false when out of range.
    pub fn remove_clause(&mut self, list: ClauseList, index: usize) -> bool {
        if index >= clauses_mut(&mut self.draft, list).len() {
            return false;
        }
        self.edit(|d| {
            clauses_mut(d, list).remove(index);
        });
        true
    }

    pub fn set_signatories(&mut self, signatories: Vec<Signatory>) {
        self.edit(|d| d.signatories = signatories);
    }

    pub fn add_signatory(&mut self, signatory: Signatory) {
        self.edit(|d| d.signatories.push(signatory));
    }

    /// Removes the signatory at `index`. Returns false when out of range.
    pub fn remove_signatory(&mut self, index: usize) -> bool {
        if index >= self.draft.signatories.len() {
            return false;
        }
        self.edit(|d| {
            d.signatories.remove(index);
        });
        true
    }

    // ───────────────────────────────────────────────────────────────
    // Defaults, drafting, saving
    // ───────────────────────────────────────────────────────────────

    /// Fills the signatory list from the org profile.
    ///
    /// Only applies while the session is untouched and has no signatories.
    /// Returns whether anything was added. Does not mark the session dirty.
    pub fn apply_org_defaults(&mut self, profile: &OrgProfile) -> bool {
        if self.dirty || !self.draft.signatories.is_empty() {
            return false;
        }
        let defaults = profile.default_signatories();
        if defaults.is_empty() {
            return false;
        }
        self.draft.signatories = defaults;
        true
    }

    /// Marks a drafting request as running.
    ///
    /// # Errors
    ///
    /// `GenerationInProgress` when one is already outstanding.
    pub fn begin_generation(&mut self) -> Result<(), ResolutionError> {
        if self.generating {
            return Err(ResolutionError::GenerationInProgress);
        }
        self.generating = true;
        Ok(())
    }

    /// Ends the running request, merging the suggestion when it succeeded.
    pub fn finish_generation<E>(&mut self, outcome: Result<DraftSuggestion, E>) -> Result<(), E> {
        self.generating = false;
        let suggestion = outcome?;
        self.apply_suggestion(suggestion);
        Ok(())
    }

    /// Merges a drafting suggestion field by field.
    ///
    /// Fields the model left out keep their current values. Empty strings
    /// and empty clause lists count as left out.
    pub fn apply_suggestion(&mut self, suggestion: DraftSuggestion) {
        let DraftSuggestion {
            title,
            resolution_number,
            series_year,
            whereas_clauses,
            resolved_clauses,
            description,
        } = suggestion;

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.set_title(title);
        }
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            self.set_description(Some(description));
        }
        if let Some(number) = resolution_number.filter(|n| !n.is_empty()) {
            self.set_resolution_number(number);
        }
        if let Some(year) = series_year.filter(|y| *y != 0) {
            self.set_series_year(year);
        }
        if !whereas_clauses.is_empty() {
            self.set_clauses(ClauseList::Whereas, whereas_clauses);
        }
        if !resolved_clauses.is_empty() {
            self.set_clauses(ClauseList::Resolved, resolved_clauses);
        }
    }

    /// Records a successful save.
    pub fn mark_saved(&mut self, id: ResolutionId) {
        self.resolution_id = Some(id);
        self.dirty = false;
    }
}

fn clauses_mut(draft: &mut ResolutionDraft, list: ClauseList) -> &mut Vec<String> {
    match list {
        ClauseList::Whereas => &mut draft.whereas_clauses,
        ClauseList::Resolved => &mut draft.resolved_clauses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::organization::RoleDefault;
    use crate::domain::resolution::{ResolutionStatus, SignatoryRole};
    use crate::ports::DraftingError;

    fn profile_with_board() -> OrgProfile {
        let mut profile = OrgProfile::default();
        profile.roster.chairman = Some(RoleDefault::named("Juan Dela Cruz"));
        profile.roster.general_manager = Some(RoleDefault::named("Maria Santos"));
        profile
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Setters
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn new_session_is_clean() {
        let session = EditingSession::new(ResolutionDraft::blank(2025));
        assert!(!session.is_dirty());
        assert!(!session.is_generating());
        assert!(session.resolution_id().is_none());
    }

    #[test]
    fn setters_mark_dirty() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        session.set_title("Approving the budget");
        assert!(session.is_dirty());
        assert_eq!(session.draft().title, "Approving the budget");
    }

    #[test]
    fn clause_edits_respect_bounds() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        session.add_clause(ClauseList::Whereas);
        assert_eq!(session.draft().whereas_clauses.len(), 2);

        assert!(session.set_clause(ClauseList::Whereas, 1, "the district needs pipes"));
        assert!(!session.set_clause(ClauseList::Whereas, 5, "nope"));
        assert_eq!(session.draft().whereas_clauses[1], "the district needs pipes");

        assert!(session.remove_clause(ClauseList::Whereas, 0));
        assert!(!session.remove_clause(ClauseList::Resolved, 3));
        assert_eq!(session.draft().whereas_clauses, vec!["the district needs pipes"]);
    }

    #[test]
    fn signatories_can_be_added_and_removed() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        session.add_signatory(Signatory::new("A", "BOD Member", SignatoryRole::Member));
        session.add_signatory(Signatory::new("B", "BOD Member", SignatoryRole::Member));
        assert!(session.remove_signatory(0));
        assert!(!session.remove_signatory(4));
        assert_eq!(session.draft().signatories[0].name, "B");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Org defaults
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn org_defaults_fill_an_untouched_draft() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        assert!(session.apply_org_defaults(&profile_with_board()));

        let names: Vec<&str> = session
            .draft()
            .signatories
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Juan Dela Cruz", "Maria Santos"]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn org_defaults_skip_dirty_sessions() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        session.set_title("Typed first");
        assert!(!session.apply_org_defaults(&profile_with_board()));
        assert!(session.draft().signatories.is_empty());
    }

    #[test]
    fn org_defaults_never_replace_existing_signatories() {
        let mut draft = ResolutionDraft::blank(2025);
        draft.signatories = vec![Signatory::new("Kept", "BOD Member", SignatoryRole::Member)];
        let mut session = EditingSession::new(draft);

        assert!(!session.apply_org_defaults(&profile_with_board()));
        assert_eq!(session.draft().signatories[0].name, "Kept");
    }

    #[test]
    fn empty_profile_adds_nothing() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        assert!(!session.apply_org_defaults(&OrgProfile::default()));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Drafting
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn second_generation_is_rejected_while_running() {
        let mut session = EditingSession::default();
        session.begin_generation().unwrap();
        assert_eq!(
            session.begin_generation(),
            Err(ResolutionError::GenerationInProgress)
        );

        session
            .finish_generation::<DraftingError>(Ok(DraftSuggestion::default()))
            .unwrap();
        assert!(session.begin_generation().is_ok());
    }

    #[test]
    fn failed_generation_clears_flag_and_keeps_draft() {
        let mut session = EditingSession::new(ResolutionDraft::blank(2025));
        session.set_title("Original title");
        session.begin_generation().unwrap();

        let result = session.finish_generation(Err(DraftingError::EmptyResponse));
        assert_eq!(result, Err(DraftingError::EmptyResponse));
        assert!(!session.is_generating());
        assert_eq!(session.draft().title, "Original title");
    }

    #[test]
    fn suggestion_merges_only_present_fields() {
        let mut draft = ResolutionDraft::blank(2025);
        draft.title = "Keep me".into();
        draft.resolution_number = "007".into();
        draft.resolved_clauses = vec!["keep this resolution".into()];
        let mut session = EditingSession::new(draft);

        session.apply_suggestion(DraftSuggestion {
            title: None,
            resolution_number: Some("012".into()),
            series_year: Some(2026),
            whereas_clauses: vec!["WHEREAS, the pumps are failing".into()],
            resolved_clauses: Vec::new(),
            description: Some("Replaces pumps".into()),
        });

        let draft = session.draft();
        assert_eq!(draft.title, "Keep me");
        assert_eq!(draft.resolution_number, "012");
        assert_eq!(draft.series_year, 2026);
        assert_eq!(draft.whereas_clauses, vec!["WHEREAS, the pumps are failing"]);
        assert_eq!(draft.resolved_clauses, vec!["keep this resolution"]);
        assert_eq!(draft.description.as_deref(), Some("Replaces pumps"));
        assert!(session.is_dirty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Saving
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn mark_saved_records_id_and_clears_dirty() {
        let mut session = EditingSession::default();
        session.set_title("Something");
        let id = ResolutionId::new();
        session.mark_saved(id);
        assert_eq!(session.resolution_id(), Some(id));
        assert!(!session.is_dirty());
    }

    #[test]
    fn from_record_round_trips_the_draft() {
        let mut draft = ResolutionDraft::blank(2025);
        draft.title = "Stored".into();
        let record = ResolutionRecord::from_draft(
            UserId::new("clerk").unwrap(),
            draft.clone(),
            ResolutionStatus::Draft,
            Timestamp::now(),
        );

        let session = EditingSession::from_record(&record);
        assert_eq!(session.resolution_id(), Some(record.id));
        assert_eq!(session.draft(), &draft);
        assert!(!session.is_dirty());
    }
}
