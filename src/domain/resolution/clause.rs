//! Clause normalization.
//!
//! Drafters often type the canonical prefix themselves ("WHEREAS, the board
//! ..." or "RESOLVED, as it is hereby resolved, that ..."). Renderers always
//! print the prefix, so bodies are stripped of it first to avoid
//! "WHEREAS, WHEREAS, ...".
//!
//! Normalization is a pure function over the stored text; stored clauses are
//! never rewritten.

use serde::{Deserialize, Serialize};

/// Placeholder shown for a clause whose body is empty after normalization.
pub const EMPTY_CLAUSE_PLACEHOLDER: &str = "...";

/// The two clause kinds of a board resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    /// Justification statements in the preamble.
    Whereas,
    /// Operative statements in the body.
    Resolved,
}

impl ClauseKind {
    /// The bold lead-in printed before every clause of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            ClauseKind::Whereas => "WHEREAS,",
            ClauseKind::Resolved => "RESOLVED,",
        }
    }

    /// Plain text following the bold lead-in, before the body.
    pub fn connective(&self) -> &'static str {
        match self {
            ClauseKind::Whereas => "",
            ClauseKind::Resolved => "as it is hereby resolved, ",
        }
    }

    /// Returns the body, or the `...` placeholder when it is empty.
    pub fn body_or_placeholder(body: &str) -> &str {
        if body.trim().is_empty() {
            EMPTY_CLAUSE_PLACEHOLDER
        } else {
            body
        }
    }
}

/// Strips a redundant leading prefix from a clause body.
///
/// - `Whereas`: `WHEREAS`, optional comma, whitespace.
/// - `Resolved`: `RESOLVED`, optional comma, whitespace, then optionally
///   `as it is hereby resolved` with optional comma and whitespace.
///
/// Keywords match case-insensitively and only as whole words, so
/// "Whereasville" is left alone. The strip repeats until nothing more
/// matches, which makes the function idempotent.
pub fn normalize_clause(raw: &str, kind: ClauseKind) -> String {
    let mut current = raw.trim();
    loop {
        let next = match kind {
            ClauseKind::Whereas => strip_whereas(current),
            ClauseKind::Resolved => strip_resolved(current),
        };
        match next {
            Some(rest) => current = rest,
            None => break,
        }
    }
    current.to_string()
}

fn strip_whereas(text: &str) -> Option<&str> {
    let rest = strip_keyword(text, "WHEREAS")?;
    Some(strip_comma(rest).trim())
}

fn strip_resolved(text: &str) -> Option<&str> {
    let rest = strip_comma(strip_keyword(text, "RESOLVED")?).trim_start();
    let rest = match strip_keyword(rest, "as it is hereby resolved") {
        Some(after) => strip_comma(after),
        None => rest,
    };
    Some(rest.trim())
}

/// Case-insensitive keyword match at the start of `text`, requiring a
/// non-alphanumeric character (or end of input) right after it.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

fn strip_comma(text: &str) -> &str {
    text.strip_prefix(',').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ════════════════════════════════════════════════════════════════════════
    // Whereas clauses
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn strips_whereas_with_comma() {
        assert_eq!(
            normalize_clause("WHEREAS, the district needs a new pump", ClauseKind::Whereas),
            "the district needs a new pump"
        );
    }

    #[test]
    fn strips_whereas_case_insensitively_without_comma() {
        assert_eq!(
            normalize_clause("whereas the district needs a new pump", ClauseKind::Whereas),
            "the district needs a new pump"
        );
    }

    #[test]
    fn leaves_plain_whereas_body_untouched() {
        assert_eq!(
            normalize_clause("the district needs a new pump", ClauseKind::Whereas),
            "the district needs a new pump"
        );
    }

    #[test]
    fn ignores_keyword_inside_longer_word() {
        assert_eq!(
            normalize_clause("Whereasville residents petitioned", ClauseKind::Whereas),
            "Whereasville residents petitioned"
        );
    }

    #[test]
    fn bare_prefix_normalizes_to_empty() {
        assert_eq!(normalize_clause("WHEREAS,", ClauseKind::Whereas), "");
        assert_eq!(normalize_clause("   ", ClauseKind::Whereas), "");
    }

    #[test]
    fn repeated_prefixes_are_all_removed() {
        assert_eq!(
            normalize_clause("WHEREAS, WHEREAS, the budget", ClauseKind::Whereas),
            "the budget"
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Resolved clauses
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn strips_full_resolved_formula() {
        assert_eq!(
            normalize_clause(
                "RESOLVED, as it is hereby resolved, that the budget be approved",
                ClauseKind::Resolved
            ),
            "that the budget be approved"
        );
    }

    #[test]
    fn strips_resolved_alone() {
        assert_eq!(
            normalize_clause("Resolved that the budget be approved", ClauseKind::Resolved),
            "that the budget be approved"
        );
    }

    #[test]
    fn formula_without_resolved_keyword_is_kept() {
        assert_eq!(
            normalize_clause("as it is hereby resolved, that x", ClauseKind::Resolved),
            "as it is hereby resolved, that x"
        );
    }

    #[test]
    fn whereas_kind_does_not_strip_resolved() {
        assert_eq!(
            normalize_clause("RESOLVED, that x", ClauseKind::Whereas),
            "RESOLVED, that x"
        );
    }

    // ────────────────────────────────────────────────────────────────────────
    // Placeholders and prefixes
    // ────────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_body_uses_placeholder() {
        assert_eq!(ClauseKind::body_or_placeholder(""), "...");
        assert_eq!(ClauseKind::body_or_placeholder("the budget"), "the budget");
    }

    #[test]
    fn prefixes_and_connectives() {
        assert_eq!(ClauseKind::Whereas.prefix(), "WHEREAS,");
        assert_eq!(ClauseKind::Resolved.prefix(), "RESOLVED,");
        assert_eq!(ClauseKind::Resolved.connective(), "as it is hereby resolved, ");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════

    fn clause_kind() -> impl Strategy<Value = ClauseKind> {
        prop_oneof![Just(ClauseKind::Whereas), Just(ClauseKind::Resolved)]
    }

    fn clause_text() -> impl Strategy<Value = String> {
        let prefixes = prop_oneof![
            Just(String::new()),
            Just("WHEREAS, ".to_string()),
            Just("whereas ".to_string()),
            Just("RESOLVED, ".to_string()),
            Just("resolved, as it is hereby resolved, ".to_string()),
            Just("RESOLVED, RESOLVED, ".to_string()),
        ];
        (prefixes, ".{0,40}").prop_map(|(p, body)| format!("{}{}", p, body))
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(text in clause_text(), kind in clause_kind()) {
            let once = normalize_clause(&text, kind);
            prop_assert_eq!(normalize_clause(&once, kind), once);
        }

        #[test]
        fn normalization_is_total(text in any::<String>(), kind in clause_kind()) {
            let out = normalize_clause(&text, kind);
            prop_assert_eq!(out.trim(), out.as_str());
        }

        #[test]
        fn normalized_whereas_never_starts_with_its_prefix(text in clause_text()) {
            let out = normalize_clause(&text, ClauseKind::Whereas);
            prop_assert!(strip_keyword(&out, "WHEREAS").is_none());
        }
    }
}
