//! Save-time validation of resolution drafts.

use super::draft::ResolutionDraft;
use crate::domain::foundation::ValidationError;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const CLAUSE_MIN_CHARS: usize = 5;
pub const SERIES_YEAR_MIN: i32 = 2000;
pub const SERIES_YEAR_MAX: i32 = 2100;

impl ResolutionDraft {
    /// Checks every field and reports all failures at once, so a form can
    /// mark each offending input.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
            errors.push(ValidationError::invalid_length(
                "title",
                TITLE_MIN_CHARS,
                TITLE_MAX_CHARS,
                title_len,
            ));
        }

        if self.resolution_number.trim().is_empty() {
            errors.push(ValidationError::empty_field("resolutionNumber"));
        }

        if !(SERIES_YEAR_MIN..=SERIES_YEAR_MAX).contains(&self.series_year) {
            errors.push(ValidationError::out_of_range(
                "seriesYear",
                SERIES_YEAR_MIN,
                SERIES_YEAR_MAX,
                self.series_year,
            ));
        }

        check_clauses(&mut errors, "whereasClauses", &self.whereas_clauses);
        check_clauses(&mut errors, "resolvedClauses", &self.resolved_clauses);

        if self.signatories.is_empty() {
            errors.push(ValidationError::empty_field("signatories"));
        }
        for (i, signatory) in self.signatories.iter().enumerate() {
            if signatory.name.trim().is_empty() {
                errors.push(ValidationError::empty_field(format!("signatories[{}].name", i)));
            }
            if signatory.position.trim().is_empty() {
                errors.push(ValidationError::empty_field(format!(
                    "signatories[{}].position",
                    i
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_clauses(errors: &mut Vec<ValidationError>, field: &str, clauses: &[String]) {
    if clauses.is_empty() {
        errors.push(ValidationError::empty_field(field));
        return;
    }
    for (i, clause) in clauses.iter().enumerate() {
        let len = clause.trim().chars().count();
        if len < CLAUSE_MIN_CHARS {
            errors.push(ValidationError::too_short(
                format!("{}[{}]", field, i),
                CLAUSE_MIN_CHARS,
                len,
            ));
        }
    }
}
