//! Compliance rule evaluator: requirement catalog against a data snapshot.
//!
//! A catalog of regulatory requirements is evaluated against an ephemeral
//! [`DataSnapshot`](crate::models::DataSnapshot) of organizational counts
//! and flags. Resolution order per requirement, first match wins:
//!
//! 1. a caller-supplied override status,
//! 2. the requirement's automatic predicate (true = compliant),
//! 3. manual review (no automatic check exists).
//!
//! The catalog is an explicitly constructed, immutable value passed in on
//! every call; the override map is caller-owned, session-scoped state.

pub mod catalog;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::DataSnapshot;

/// Compliance status for one requirement in one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "compliant")]
    Compliant,
    #[serde(rename = "needs_attention")]
    NeedsAttention,
    #[serde(rename = "manual_review")]
    ManualReview,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "Compliant"),
            ComplianceStatus::NeedsAttention => write!(f, "Needs Attention"),
            ComplianceStatus::ManualReview => write!(f, "Manual Review"),
        }
    }
}

/// What kind of evidence satisfies a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    /// Checked automatically from live system data
    System,
    /// Satisfied by a published policy document
    Policy,
    /// Requires human review of records
    Manual,
}

/// Automatic check over the snapshot. Must be a pure function of the
/// snapshot alone: no clock, no randomness, no outside state.
pub type Predicate = fn(&DataSnapshot) -> bool;

/// Evidence description: fixed text, or text computed from the snapshot
/// (for live counts).
#[derive(Clone)]
pub enum EvidenceText {
    Static(&'static str),
    Dynamic(fn(&DataSnapshot) -> String),
}

impl EvidenceText {
    pub fn resolve(&self, snapshot: &DataSnapshot) -> String {
        match self {
            EvidenceText::Static(text) => (*text).to_string(),
            EvidenceText::Dynamic(f) => f(snapshot),
        }
    }
}

impl fmt::Debug for EvidenceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceText::Static(text) => f.debug_tuple("Static").field(text).finish(),
            EvidenceText::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<fn>").finish(),
        }
    }
}

/// One entry in the requirement catalog. Immutable at evaluation time;
/// only the snapshot and override map vary between evaluations.
#[derive(Clone)]
pub struct RequirementDefinition {
    pub id: &'static str,
    pub subpart: &'static str,
    pub section: &'static str,
    pub text: &'static str,
    pub evidence_kind: EvidenceKind,
    pub predicate: Option<Predicate>,
    pub evidence: EvidenceText,
}

impl fmt::Debug for RequirementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequirementDefinition")
            .field("id", &self.id)
            .field("subpart", &self.subpart)
            .field("section", &self.section)
            .field("evidence_kind", &self.evidence_kind)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Session-scoped manual status overrides, requirement id to status.
/// Never persisted; owned and passed in by the caller.
pub type OverrideMap = HashMap<String, ComplianceStatus>;

/// Evaluate every catalog requirement against the snapshot.
///
/// Overrides naming ids not in the catalog are ignored. A predicate that
/// panics is caught and reported as `NeedsAttention`: absence of evidence
/// must never read as compliance.
pub fn evaluate<'a>(
    catalog: &'a [RequirementDefinition],
    snapshot: &DataSnapshot,
    overrides: &OverrideMap,
) -> BTreeMap<&'a str, ComplianceStatus> {
    let mut statuses = BTreeMap::new();

    for req in catalog {
        let status = if let Some(&forced) = overrides.get(req.id) {
            forced
        } else if let Some(pred) = req.predicate {
            match panic::catch_unwind(AssertUnwindSafe(|| pred(snapshot))) {
                Ok(true) => ComplianceStatus::Compliant,
                Ok(false) => ComplianceStatus::NeedsAttention,
                Err(_) => {
                    warn!(requirement = req.id, "automatic check panicked, flagging for attention");
                    ComplianceStatus::NeedsAttention
                }
            }
        } else {
            ComplianceStatus::ManualReview
        };

        statuses.insert(req.id, status);
    }

    statuses
}

/// Status counts for a set of requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    #[serde(rename = "needsAttention")]
    pub needs_attention: usize,
    #[serde(rename = "manualReview")]
    pub manual_review: usize,
}

impl ComplianceSummary {
    fn add(&mut self, status: ComplianceStatus) {
        self.total += 1;
        match status {
            ComplianceStatus::Compliant => self.compliant += 1,
            ComplianceStatus::NeedsAttention => self.needs_attention += 1,
            ComplianceStatus::ManualReview => self.manual_review += 1,
        }
    }

    /// Percent compliant, 0.0 for an empty set (never divides by zero).
    pub fn percent_compliant(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.compliant as f64 * 100.0 / self.total as f64
        }
    }
}

/// Roll a status map up into overall counts.
pub fn summarize(statuses: &BTreeMap<&str, ComplianceStatus>) -> ComplianceSummary {
    let mut summary = ComplianceSummary::default();
    for status in statuses.values() {
        summary.add(*status);
    }
    summary
}

/// Roll statuses up per catalog subpart.
pub fn summarize_by_subpart<'a>(
    catalog: &'a [RequirementDefinition],
    statuses: &BTreeMap<&str, ComplianceStatus>,
) -> BTreeMap<&'a str, ComplianceSummary> {
    let mut by_subpart: BTreeMap<&str, ComplianceSummary> = BTreeMap::new();
    for req in catalog {
        if let Some(status) = statuses.get(req.id) {
            by_subpart.entry(req.subpart).or_default().add(*status);
        }
    }
    by_subpart
}

// ============================================================================
// Tests
// ============================================================================
