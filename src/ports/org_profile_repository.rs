//! Organization profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::organization::OrgProfile;

/// Stores one `OrgProfile` per owner.
#[async_trait]
pub trait OrgProfileRepository: Send + Sync {
    /// Returns `None` when the owner has not saved settings yet.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<OrgProfile>, DomainError>;

    /// Create or replace the owner's profile.
    async fn upsert(&self, owner: &UserId, profile: OrgProfile) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrgProfileRepository) {}
    }
}
