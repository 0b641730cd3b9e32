//! Serializable records exchanged with the hosting application.
//!
//! The core consumes and produces plain records at its boundary:
//!
//! - `CrewCurrencyRecord`: per-crew-member dated facts as ISO-8601 strings,
//!   parsed into the typed calculator input (malformed data fails loudly)
//! - `CurrencySheet`: the computed expiration dates back out as strings
//! - `DataSnapshot`: the flat aggregate of organizational counts and flags
//!   that compliance predicates read
//! - `ComplianceReport`: per-requirement statuses with rollups

pub mod compliance;
pub mod crew;
pub mod snapshot;

pub use compliance::{ComplianceReport, RequirementStatusRecord, SubpartSummaryRecord};
pub use crew::{CalculatedHints, CheckrideGraceRecord, CrewCurrencyRecord, CurrencySheet};
pub use snapshot::DataSnapshot;
