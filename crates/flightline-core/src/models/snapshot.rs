use serde::{Deserialize, Serialize};

/// Flat aggregate of an organization's live records, recomputed fresh for
/// every compliance evaluation. Carries no identity and is never persisted.
///
/// Every field defaults so a partial snapshot deserializes cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSnapshot {
    /// Flight risk assessment forms completed
    #[serde(rename = "fratCount", default)]
    pub frat_count: u32,
    /// Open entries in the hazard register
    #[serde(rename = "openHazardCount", default)]
    pub open_hazard_count: u32,
    /// Incident/occurrence reports filed
    #[serde(rename = "incidentReportCount", default)]
    pub incident_report_count: u32,
    /// Corrective actions not yet closed
    #[serde(rename = "openActionCount", default)]
    pub open_action_count: u32,
    /// Crew members on the active roster
    #[serde(rename = "crewCount", default)]
    pub crew_count: u32,
    /// Crew members current on required safety training
    #[serde(rename = "trainingCurrentCount", default)]
    pub training_current_count: u32,
    /// Published safety policies
    #[serde(rename = "policyCount", default)]
    pub policy_count: u32,
    /// Policies acknowledged by all personnel
    #[serde(rename = "policyAckCount", default)]
    pub policy_ack_count: u32,
    #[serde(rename = "hasSafetyOfficer", default)]
    pub has_safety_officer: bool,
    #[serde(rename = "hasAccountableExecutive", default)]
    pub has_accountable_executive: bool,
    #[serde(rename = "hasEmergencyPlan", default)]
    pub has_emergency_plan: bool,
}

// ============================================================================
// Tests
// ============================================================================
