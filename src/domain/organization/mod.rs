//! Organization domain module.
//!
//! The per-account profile that brands every resolution (district name,
//! address, contact details, logo) and supplies default signatories.

mod profile;

pub use profile::{BoardRoster, OrgProfile, RoleDefault, SECRETARIAT_POSITION};
