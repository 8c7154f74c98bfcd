//! Signatories and their structural roles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Structural role of a signatory, which decides where their signature
/// block is placed.
///
/// Unknown role strings are kept as `Unrecognized` rather than rejected, so
/// legacy records still load; the composer renders them in a trailing block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignatoryRole {
    Chairman,
    ViceChairman,
    Secretary,
    Member,
    GeneralManager,
    Unrecognized(String),
}

impl SignatoryRole {
    /// Wire spelling of the role.
    pub fn as_str(&self) -> &str {
        match self {
            SignatoryRole::Chairman => "chairman",
            SignatoryRole::ViceChairman => "vice-chairman",
            SignatoryRole::Secretary => "secretary",
            SignatoryRole::Member => "member",
            SignatoryRole::GeneralManager => "gm",
            SignatoryRole::Unrecognized(raw) => raw,
        }
    }

    /// Sort rank within the two-column middle block.
    ///
    /// Roles outside the middle block rank last.
    pub fn middle_block_rank(&self) -> u8 {
        match self {
            SignatoryRole::ViceChairman => 1,
            SignatoryRole::Secretary => 2,
            SignatoryRole::Member => 3,
            _ => 4,
        }
    }

    /// Whether the role belongs in the two-column middle block.
    pub fn is_middle_block(&self) -> bool {
        matches!(
            self,
            SignatoryRole::ViceChairman | SignatoryRole::Secretary | SignatoryRole::Member
        )
    }
}

impl From<String> for SignatoryRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "chairman" => SignatoryRole::Chairman,
            "vice-chairman" => SignatoryRole::ViceChairman,
            "secretary" => SignatoryRole::Secretary,
            "member" => SignatoryRole::Member,
            "gm" => SignatoryRole::GeneralManager,
            _ => SignatoryRole::Unrecognized(raw),
        }
    }
}

impl From<&str> for SignatoryRole {
    fn from(raw: &str) -> Self {
        SignatoryRole::from(raw.to_string())
    }
}

impl From<SignatoryRole> for String {
    fn from(role: SignatoryRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for SignatoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named official who signs the resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signatory {
    pub name: String,
    pub position: String,
    pub role: SignatoryRole,
    /// Signature image URL. Older records call this field `signature`.
    #[serde(default, alias = "signature", skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    #[serde(default)]
    pub is_certified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified_at: Option<Timestamp>,
}

impl Signatory {
    /// Creates an uncertified signatory without a signature image.
    pub fn new(name: impl Into<String>, position: impl Into<String>, role: SignatoryRole) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            role,
            signature_url: None,
            is_certified: false,
            certified_at: None,
        }
    }

    /// Attaches a signature image URL. Blank URLs are ignored.
    pub fn with_signature_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.signature_url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    /// Marks the signatory as having certified the resolution.
    pub fn certified(mut self, at: Timestamp) -> Self {
        self.is_certified = true;
        self.certified_at = Some(at);
        self
    }
}
