//! Flightline core - regulatory currency and compliance reasoning.
//!
//! This crate contains the deterministic logic behind flightline's crew
//! currency and compliance dashboards:
//!
//! - `currency`: FAA calendar-month expiration dates for medicals, flight
//!   reviews, instrument proficiency checks, recurrent training, and
//!   checkrides, with manual override precedence and the checkride early
//!   grace window.
//! - `compliance`: evaluation of a versioned requirement catalog against an
//!   organization's data snapshot, with status rollups.
//! - `models`: plain serializable records exchanged with the hosting
//!   application (ISO-8601 date strings in, computed sheets and reports out).
//!
//! Everything here is a pure function of its inputs. The clock is never read
//! inside this crate; callers supply the as-of date.

pub mod compliance;
pub mod currency;
pub mod error;
pub mod models;

pub use compliance::{
    evaluate, summarize, summarize_by_subpart, ComplianceStatus, ComplianceSummary, EvidenceKind,
    EvidenceText, OverrideMap, RequirementDefinition,
};
pub use currency::{
    calculate_currency, CheckrideGrace, CrewCurrencyInput, CrewCurrencyOutput, CurrencyOverrides,
    MedicalClass,
};
pub use error::ModelError;
pub use models::{ComplianceReport, CrewCurrencyRecord, CurrencySheet, DataSnapshot};
