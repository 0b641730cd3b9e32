//! Built-in requirement catalog, modeled on the 14 CFR Part 5 safety
//! management system subparts.
//!
//! The catalog is versioned by regulation section and constructed as a plain
//! value: callers build it once at startup and pass it into
//! [`evaluate`](super::evaluate), so tests can substitute smaller catalogs.

use crate::models::DataSnapshot;

use super::{EvidenceKind, EvidenceText, RequirementDefinition};

/// Human title for a subpart letter, for report headings.
pub fn subpart_title(subpart: &str) -> &'static str {
    match subpart {
        "A" => "General",
        "B" => "Safety Policy",
        "C" => "Safety Risk Management",
        "D" => "Safety Assurance",
        "E" => "Safety Promotion",
        _ => "Other",
    }
}

// Automatic checks. Each is a pure function of the snapshot only.

fn has_policies(s: &DataSnapshot) -> bool {
    s.policy_count > 0
}

fn accountable_executive_assigned(s: &DataSnapshot) -> bool {
    s.has_accountable_executive
}

fn safety_officer_assigned(s: &DataSnapshot) -> bool {
    s.has_safety_officer
}

fn emergency_plan_on_file(s: &DataSnapshot) -> bool {
    s.has_emergency_plan
}

fn hazard_register_in_use(s: &DataSnapshot) -> bool {
    s.open_hazard_count > 0 || s.incident_report_count > 0
}

fn risk_assessments_in_use(s: &DataSnapshot) -> bool {
    s.frat_count > 0
}

fn occurrence_reporting_in_use(s: &DataSnapshot) -> bool {
    s.incident_report_count > 0
}

fn corrective_actions_closed(s: &DataSnapshot) -> bool {
    s.open_action_count == 0
}

fn all_crew_training_current(s: &DataSnapshot) -> bool {
    s.crew_count > 0 && s.training_current_count >= s.crew_count
}

fn all_policies_acknowledged(s: &DataSnapshot) -> bool {
    s.policy_count > 0 && s.policy_ack_count >= s.policy_count
}

// Dynamic evidence descriptions carrying live counts.

fn policy_count_text(s: &DataSnapshot) -> String {
    format!("{} safety policies published", s.policy_count)
}

fn hazard_count_text(s: &DataSnapshot) -> String {
    format!(
        "{} open hazard register entries, {} occurrence reports",
        s.open_hazard_count, s.incident_report_count
    )
}

fn frat_count_text(s: &DataSnapshot) -> String {
    format!("{} flight risk assessments completed", s.frat_count)
}

fn report_count_text(s: &DataSnapshot) -> String {
    format!("{} occurrence reports collected", s.incident_report_count)
}

fn action_count_text(s: &DataSnapshot) -> String {
    format!("{} corrective actions open", s.open_action_count)
}

fn training_text(s: &DataSnapshot) -> String {
    format!(
        "{} of {} crew current on safety training",
        s.training_current_count, s.crew_count
    )
}

fn policy_ack_text(s: &DataSnapshot) -> String {
    format!(
        "{} of {} policy acknowledgements recorded",
        s.policy_ack_count, s.policy_count
    )
}

/// The standard Part 5 requirement catalog.
pub fn standard_catalog() -> Vec<RequirementDefinition> {
    vec![
        // Subpart A - General
        RequirementDefinition {
            id: "5.1",
            subpart: "A",
            section: "§5.1",
            text: "The certificate holder has adopted a safety management system appropriate to its operations",
            evidence_kind: EvidenceKind::Manual,
            predicate: None,
            evidence: EvidenceText::Static("SMS adoption statement and implementation plan"),
        },
        RequirementDefinition {
            id: "5.3",
            subpart: "A",
            section: "§5.3",
            text: "The scope of the SMS covers all aviation-related activities of the organization",
            evidence_kind: EvidenceKind::Manual,
            predicate: None,
            evidence: EvidenceText::Static("SMS manual scope section"),
        },
        // Subpart B - Safety Policy
        RequirementDefinition {
            id: "5.21",
            subpart: "B",
            section: "§5.21",
            text: "A safety policy is established, signed, and published to all personnel",
            evidence_kind: EvidenceKind::Policy,
            predicate: Some(has_policies),
            evidence: EvidenceText::Dynamic(policy_count_text),
        },
        RequirementDefinition {
            id: "5.23",
            subpart: "B",
            section: "§5.23",
            text: "An accountable executive with final authority over the SMS is designated",
            evidence_kind: EvidenceKind::System,
            predicate: Some(accountable_executive_assigned),
            evidence: EvidenceText::Static("Accountable executive role assignment"),
        },
        RequirementDefinition {
            id: "5.25",
            subpart: "B",
            section: "§5.25",
            text: "Safety management personnel are designated, including a safety officer",
            evidence_kind: EvidenceKind::System,
            predicate: Some(safety_officer_assigned),
            evidence: EvidenceText::Static("Safety officer role assignment"),
        },
        RequirementDefinition {
            id: "5.27",
            subpart: "B",
            section: "§5.27",
            text: "Emergency response planning is coordinated and documented",
            evidence_kind: EvidenceKind::System,
            predicate: Some(emergency_plan_on_file),
            evidence: EvidenceText::Static("Emergency response plan on file"),
        },
        // Subpart C - Safety Risk Management
        RequirementDefinition {
            id: "5.51",
            subpart: "C",
            section: "§5.51",
            text: "Safety risk management is applied to new systems and changes to existing systems",
            evidence_kind: EvidenceKind::Manual,
            predicate: None,
            evidence: EvidenceText::Static("Change management records"),
        },
        RequirementDefinition {
            id: "5.53",
            subpart: "C",
            section: "§5.53",
            text: "Hazards are identified and documented through system analysis",
            evidence_kind: EvidenceKind::System,
            predicate: Some(hazard_register_in_use),
            evidence: EvidenceText::Dynamic(hazard_count_text),
        },
        RequirementDefinition {
            id: "5.55",
            subpart: "C",
            section: "§5.55",
            text: "Safety risk is assessed and controlled before flight operations",
            evidence_kind: EvidenceKind::System,
            predicate: Some(risk_assessments_in_use),
            evidence: EvidenceText::Dynamic(frat_count_text),
        },
        // Subpart D - Safety Assurance
        RequirementDefinition {
            id: "5.71",
            subpart: "D",
            section: "§5.71",
            text: "Safety performance is monitored through occurrence reporting and data acquisition",
            evidence_kind: EvidenceKind::System,
            predicate: Some(occurrence_reporting_in_use),
            evidence: EvidenceText::Dynamic(report_count_text),
        },
        RequirementDefinition {
            id: "5.73",
            subpart: "D",
            section: "§5.73",
            text: "Safety performance is assessed against the organization's safety objectives",
            evidence_kind: EvidenceKind::Manual,
            predicate: None,
            evidence: EvidenceText::Static("Safety performance review minutes"),
        },
        RequirementDefinition {
            id: "5.75",
            subpart: "D",
            section: "§5.75",
            text: "Identified deficiencies are corrected and corrective actions tracked to closure",
            evidence_kind: EvidenceKind::System,
            predicate: Some(corrective_actions_closed),
            evidence: EvidenceText::Dynamic(action_count_text),
        },
        // Subpart E - Safety Promotion
        RequirementDefinition {
            id: "5.91",
            subpart: "E",
            section: "§5.91",
            text: "Personnel are trained to competency in their safety management responsibilities",
            evidence_kind: EvidenceKind::System,
            predicate: Some(all_crew_training_current),
            evidence: EvidenceText::Dynamic(training_text),
        },
        RequirementDefinition {
            id: "5.93",
            subpart: "E",
            section: "§5.93",
            text: "Safety information is communicated to and acknowledged by all personnel",
            evidence_kind: EvidenceKind::Policy,
            predicate: Some(all_policies_acknowledged),
            evidence: EvidenceText::Dynamic(policy_ack_text),
        },
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::compliance::{evaluate, summarize, ComplianceStatus, OverrideMap};

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = standard_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_system_requirements_have_predicates() {
        for req in standard_catalog() {
            if req.evidence_kind == EvidenceKind::System {
                assert!(req.predicate.is_some(), "{} lacks an automatic check", req.id);
            }
        }
    }

    #[test]
    fn test_known_subparts() {
        for req in standard_catalog() {
            assert_ne!(subpart_title(req.subpart), "Other", "{}", req.id);
        }
    }

    #[test]
    fn test_empty_org_is_mostly_noncompliant() {
        let catalog = standard_catalog();
        let statuses = evaluate(&catalog, &DataSnapshot::default(), &OverrideMap::new());
        let summary = summarize(&statuses);

        // An empty snapshot satisfies only "no open corrective actions"
        assert_eq!(summary.compliant, 1);
        assert_eq!(statuses["5.75"], ComplianceStatus::Compliant);
        assert_eq!(summary.manual_review, 4);
        assert_eq!(summary.total, catalog.len());
    }

    #[test]
    fn test_healthy_org_is_fully_compliant_on_system_checks() {
        let snapshot = DataSnapshot {
            frat_count: 120,
            open_hazard_count: 4,
            incident_report_count: 9,
            open_action_count: 0,
            crew_count: 12,
            training_current_count: 12,
            policy_count: 5,
            policy_ack_count: 5,
            has_safety_officer: true,
            has_accountable_executive: true,
            has_emergency_plan: true,
        };
        let catalog = standard_catalog();
        let statuses = evaluate(&catalog, &snapshot, &OverrideMap::new());
        let summary = summarize(&statuses);

        assert_eq!(summary.needs_attention, 0);
        assert_eq!(summary.manual_review, 4);
        assert_eq!(summary.compliant, catalog.len() - 4);
    }
}
