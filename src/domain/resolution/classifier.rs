//! Signatory classification into fixed layout slots.

use super::signatory::{Signatory, SignatoryRole};

/// Signatories partitioned by where their blocks go on the page.
///
/// Borrows from the input list; every input entry lands in exactly one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatoryGroups<'a> {
    /// Centered full-width block(s) at the top.
    pub chairman: Vec<&'a Signatory>,
    /// Two-column grid: vice-chairman, then secretary, then members.
    pub middle_block: Vec<&'a Signatory>,
    /// Centered block(s) under "Concurred:".
    pub gm: Vec<&'a Signatory>,
    /// Entries whose role string was not recognized.
    pub unclassified: Vec<&'a Signatory>,
}

impl SignatoryGroups<'_> {
    /// Number of signatories across all groups.
    pub fn total(&self) -> usize {
        self.chairman.len() + self.middle_block.len() + self.gm.len() + self.unclassified.len()
    }

    pub fn has_unclassified(&self) -> bool {
        !self.unclassified.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Partitions signatories by role.
///
/// The middle block is sorted by rank with a stable sort, so signatories of
/// the same role keep their input order.
pub fn classify_signatories(signatories: &[Signatory]) -> SignatoryGroups<'_> {
    let mut groups = SignatoryGroups::default();

    for signatory in signatories {
        match signatory.role {
            SignatoryRole::Chairman => groups.chairman.push(signatory),
            SignatoryRole::GeneralManager => groups.gm.push(signatory),
            SignatoryRole::Unrecognized(_) => groups.unclassified.push(signatory),
            SignatoryRole::ViceChairman | SignatoryRole::Secretary | SignatoryRole::Member => {
                groups.middle_block.push(signatory)
            }
        }
    }

    groups.middle_block.sort_by_key(|s| s.role.middle_block_rank());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signer(name: &str, role: &str) -> Signatory {
        Signatory::new(name, "Position", SignatoryRole::from(role))
    }

    fn names<'a>(group: &[&'a Signatory]) -> Vec<&'a str> {
        group.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn middle_block_is_ordered_by_rank_and_stable_within_rank() {
        let list = vec![
            signer("A", "member"),
            signer("B", "secretary"),
            signer("C", "vice-chairman"),
            signer("D", "member"),
        ];

        let groups = classify_signatories(&list);

        assert_eq!(names(&groups.middle_block), vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn chairman_and_gm_get_their_own_slots() {
        let list = vec![
            signer("GM", "gm"),
            signer("Chair", "chairman"),
            signer("Sec", "secretary"),
        ];

        let groups = classify_signatories(&list);

        assert_eq!(names(&groups.chairman), vec!["Chair"]);
        assert_eq!(names(&groups.gm), vec!["GM"]);
        assert_eq!(names(&groups.middle_block), vec!["Sec"]);
        assert!(!groups.has_unclassified());
    }

    #[test]
    fn unrecognized_roles_are_kept_separately() {
        let list = vec![signer("T", "treasurer"), signer("M", "member")];

        let groups = classify_signatories(&list);

        assert!(groups.has_unclassified());
        assert_eq!(names(&groups.unclassified), vec!["T"]);
        assert_eq!(groups.total(), 2);
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let groups = classify_signatories(&[]);
        assert!(groups.is_empty());
    }

    fn role_name() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("chairman"),
            Just("vice-chairman"),
            Just("secretary"),
            Just("member"),
            Just("gm"),
            Just("auditor"),
        ]
    }

    proptest! {
        #[test]
        fn classification_is_complete(roles in proptest::collection::vec(role_name(), 0..20)) {
            let list: Vec<Signatory> = roles
                .iter()
                .enumerate()
                .map(|(i, role)| signer(&format!("S{}", i), role))
                .collect();

            let groups = classify_signatories(&list);

            prop_assert_eq!(groups.total(), list.len());
        }

        #[test]
        fn middle_block_ranks_never_decrease(roles in proptest::collection::vec(role_name(), 0..20)) {
            let list: Vec<Signatory> = roles.iter().map(|role| signer("S", role)).collect();

            let groups = classify_signatories(&list);
            let ranks: Vec<u8> = groups.middle_block.iter().map(|s| s.role.middle_block_rank()).collect();

            prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
