//! Compliance report records: the evaluator's output in serializable form.

use serde::Serialize;

use crate::compliance::{
    evaluate, summarize, summarize_by_subpart, ComplianceStatus, ComplianceSummary, OverrideMap,
    RequirementDefinition,
};

use super::DataSnapshot;

/// One requirement's resolved status and evidence description.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementStatusRecord {
    pub id: String,
    pub subpart: String,
    pub section: String,
    pub text: String,
    pub status: ComplianceStatus,
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubpartSummaryRecord {
    pub subpart: String,
    pub summary: ComplianceSummary,
    #[serde(rename = "percentCompliant")]
    pub percent_compliant: f64,
}

/// Full evaluation result: per-requirement statuses plus rollups.
/// Ephemeral, recomputed per request.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub requirements: Vec<RequirementStatusRecord>,
    pub summary: ComplianceSummary,
    #[serde(rename = "percentCompliant")]
    pub percent_compliant: f64,
    #[serde(rename = "bySubpart")]
    pub by_subpart: Vec<SubpartSummaryRecord>,
}

impl ComplianceReport {
    pub fn build(
        catalog: &[RequirementDefinition],
        snapshot: &DataSnapshot,
        overrides: &OverrideMap,
    ) -> Self {
        let statuses = evaluate(catalog, snapshot, overrides);
        let summary = summarize(&statuses);

        let requirements = catalog
            .iter()
            .map(|req| RequirementStatusRecord {
                id: req.id.to_string(),
                subpart: req.subpart.to_string(),
                section: req.section.to_string(),
                text: req.text.to_string(),
                status: statuses[req.id],
                evidence: req.evidence.resolve(snapshot),
            })
            .collect();

        let by_subpart = summarize_by_subpart(catalog, &statuses)
            .into_iter()
            .map(|(subpart, summary)| SubpartSummaryRecord {
                subpart: subpart.to_string(),
                percent_compliant: summary.percent_compliant(),
                summary,
            })
            .collect();

        Self {
            requirements,
            percent_compliant: summary.percent_compliant(),
            summary,
            by_subpart,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
