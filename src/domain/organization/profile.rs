//! Organization profile: district branding and the standing board roster.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::resolution::{Signatory, SignatoryRole};

/// Position label for the secretary fallback when no board secretary is
/// configured and the account holder signs instead.
pub const SECRETARIAT_POSITION: &str = "BAC Secretariat";

/// Default name and signature for one board seat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleDefault {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
}

impl RoleDefault {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature_url: None,
        }
    }

    pub fn with_signature_url(mut self, url: impl Into<String>) -> Self {
        self.signature_url = Some(url.into());
        self
    }

    fn filled_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    fn to_signatory(&self, position: &str, role: SignatoryRole) -> Option<Signatory> {
        let name = self.filled_name()?;
        let mut signatory = Signatory::new(name, position, role);
        if let Some(url) = &self.signature_url {
            signatory = signatory.with_signature_url(url.clone());
        }
        Some(signatory)
    }
}

/// The standing board and general manager.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardRoster {
    #[serde(default)]
    pub chairman: Option<RoleDefault>,
    #[serde(default)]
    pub vice_chairman: Option<RoleDefault>,
    #[serde(default)]
    pub secretary: Option<RoleDefault>,
    #[serde(default)]
    pub member_1: Option<RoleDefault>,
    #[serde(default)]
    pub member_2: Option<RoleDefault>,
    #[serde(default)]
    pub member_3: Option<RoleDefault>,
    #[serde(default)]
    pub general_manager: Option<RoleDefault>,
}

impl BoardRoster {
    /// Seats in page order.
    fn seats(&self) -> [(&Option<RoleDefault>, &'static str, SignatoryRole); 7] {
        [
            (&self.chairman, "BOD Chairman", SignatoryRole::Chairman),
            (&self.vice_chairman, "BOD Vice-Chairman", SignatoryRole::ViceChairman),
            (&self.secretary, "BOD Secretary", SignatoryRole::Secretary),
            (&self.member_1, "BOD Member", SignatoryRole::Member),
            (&self.member_2, "BOD Member", SignatoryRole::Member),
            (&self.member_3, "BOD Member", SignatoryRole::Member),
            (&self.general_manager, "General Manager", SignatoryRole::GeneralManager),
        ]
    }
}

/// Branding and defaults for one account's water district.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrgProfile {
    #[serde(default)]
    pub water_district_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub water_district_email: Option<String>,
    #[serde(default)]
    pub water_district_contact: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Account holder's name, used as the secretary fallback.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Account holder's personal signature image.
    #[serde(default)]
    pub signature_url: Option<String>,
    #[serde(default)]
    pub roster: BoardRoster,
}

impl OrgProfile {
    pub fn district_name(&self) -> Option<&str> {
        filled(&self.water_district_name)
    }

    pub fn address(&self) -> Option<&str> {
        filled(&self.address)
    }

    pub fn email(&self) -> Option<&str> {
        filled(&self.water_district_email)
    }

    pub fn contact_number(&self) -> Option<&str> {
        filled(&self.water_district_contact)
    }

    pub fn logo_url(&self) -> Option<&str> {
        filled(&self.logo_url)
    }

    /// Signatories a new draft starts with.
    ///
    /// Empty seats are skipped. Without a board secretary, the account
    /// holder signs as "BAC Secretariat" when their name is known.
    pub fn default_signatories(&self) -> Vec<Signatory> {
        let mut signatories = Vec::new();

        for (seat, position, role) in self.roster.seats() {
            let from_seat = seat
                .as_ref()
                .and_then(|default| default.to_signatory(position, role.clone()));

            match (from_seat, role) {
                (Some(signatory), _) => signatories.push(signatory),
                (None, SignatoryRole::Secretary) => {
                    if let Some(name) = filled(&self.full_name) {
                        let mut fallback =
                            Signatory::new(name, SECRETARIAT_POSITION, SignatoryRole::Secretary);
                        if let Some(url) = &self.signature_url {
                            fallback = fallback.with_signature_url(url.clone());
                        }
                        signatories.push(fallback);
                    }
                }
                (None, _) => {}
            }
        }

        signatories
    }

    /// Names offered as movant and seconder choices.
    pub fn official_names(&self) -> Vec<String> {
        self.roster
            .seats()
            .into_iter()
            .filter_map(|(seat, _, _)| seat.as_ref().and_then(RoleDefault::filled_name))
            .map(str::to_string)
            .collect()
    }

    /// Background handed to the drafting service, if anything is known.
    pub fn drafting_context(&self) -> Option<String> {
        let mut lines = Vec::new();
        if let Some(name) = self.district_name() {
            lines.push(format!("Water District Name: {}", name));
        }
        if let Some(address) = self.address() {
            lines.push(format!("Address: {}", address));
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// Checks the settings form: district name, address, and the six
    /// required seats must be filled; the email, when given, must look like
    /// an address.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.district_name().is_none() {
            errors.push(ValidationError::empty_field("water_district_name"));
        }
        if self.address().is_none() {
            errors.push(ValidationError::empty_field("address"));
        }
        if let Some(email) = self.email() {
            if !is_plausible_email(email) {
                errors.push(ValidationError::invalid_format(
                    "water_district_email",
                    "Invalid email",
                ));
            }
        }

        let required = [
            (&self.roster.chairman, "roster.chairman"),
            (&self.roster.vice_chairman, "roster.vice_chairman"),
            (&self.roster.secretary, "roster.secretary"),
            (&self.roster.member_1, "roster.member_1"),
            (&self.roster.member_2, "roster.member_2"),
            (&self.roster.general_manager, "roster.general_manager"),
        ];
        for (seat, field) in required {
            if seat.as_ref().and_then(RoleDefault::filled_name).is_none() {
                errors.push(ValidationError::empty_field(field));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One `@`, something before it, a dotted domain after it, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
