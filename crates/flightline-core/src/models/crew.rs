//! Crew currency records: ISO-8601 strings in, computed sheets out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{
    CheckrideGrace, CrewCurrencyInput, CrewCurrencyOutput, CurrencyOverrides,
    DEFAULT_CHECKRIDE_GRACE_MONTHS, DEFAULT_CHECKRIDE_INTERVAL_MONTHS,
};
use crate::error::ModelError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-crew-member dated facts as stored and edited by the administrator.
///
/// Dates are ISO-8601 strings; absent or blank values mean "not on file".
/// Anything present but unparseable is a caller bug and fails conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewCurrencyRecord {
    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "medicalClass", default)]
    pub medical_class: Option<String>,
    #[serde(rename = "medicalIssuedDate", default)]
    pub medical_issued_date: Option<String>,
    #[serde(rename = "lastFlightReviewDate", default)]
    pub last_flight_review_date: Option<String>,
    #[serde(rename = "lastIpcDate", default)]
    pub last_ipc_date: Option<String>,
    #[serde(rename = "lastRecurrentDate", default)]
    pub last_recurrent_date: Option<String>,
    #[serde(rename = "lastCheckrideDate", default)]
    pub last_checkride_date: Option<String>,
    #[serde(rename = "checkrideIntervalMonths", default)]
    pub checkride_interval_months: Option<u32>,
    #[serde(rename = "checkrideGraceMonths", default)]
    pub checkride_grace_months: Option<u32>,
    #[serde(rename = "medicalExpiryOverride", default)]
    pub medical_expiry_override: Option<String>,
    #[serde(rename = "flightReviewExpiryOverride", default)]
    pub flight_review_expiry_override: Option<String>,
    #[serde(rename = "ipcExpiryOverride", default)]
    pub ipc_expiry_override: Option<String>,
    #[serde(rename = "recurrentExpiryOverride", default)]
    pub recurrent_expiry_override: Option<String>,
    #[serde(rename = "checkrideExpiryOverride", default)]
    pub checkride_expiry_override: Option<String>,
    #[serde(rename = "passportExpiryOverride", default)]
    pub passport_expiry_override: Option<String>,
}

/// Parse an optional ISO date field, treating blank strings as absent.
fn parse_date(
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<NaiveDate>, ModelError> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ModelError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

impl CrewCurrencyRecord {
    /// Convert into the typed calculator input, applying interval defaults.
    pub fn to_input(&self) -> Result<CrewCurrencyInput, ModelError> {
        let medical_class = match self.medical_class.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.parse()?),
            _ => None,
        };

        Ok(CrewCurrencyInput {
            birth_date: parse_date("birthDate", &self.birth_date)?,
            medical_class,
            medical_issued: parse_date("medicalIssuedDate", &self.medical_issued_date)?,
            last_flight_review: parse_date("lastFlightReviewDate", &self.last_flight_review_date)?,
            last_ipc: parse_date("lastIpcDate", &self.last_ipc_date)?,
            last_recurrent: parse_date("lastRecurrentDate", &self.last_recurrent_date)?,
            last_checkride: parse_date("lastCheckrideDate", &self.last_checkride_date)?,
            checkride_interval_months: self
                .checkride_interval_months
                .unwrap_or(DEFAULT_CHECKRIDE_INTERVAL_MONTHS),
            checkride_grace_months: self
                .checkride_grace_months
                .unwrap_or(DEFAULT_CHECKRIDE_GRACE_MONTHS),
            overrides: CurrencyOverrides {
                medical: parse_date("medicalExpiryOverride", &self.medical_expiry_override)?,
                flight_review: parse_date(
                    "flightReviewExpiryOverride",
                    &self.flight_review_expiry_override,
                )?,
                ipc: parse_date("ipcExpiryOverride", &self.ipc_expiry_override)?,
                recurrent: parse_date("recurrentExpiryOverride", &self.recurrent_expiry_override)?,
                checkride: parse_date("checkrideExpiryOverride", &self.checkride_expiry_override)?,
                passport: parse_date("passportExpiryOverride", &self.passport_expiry_override)?,
            },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckrideGraceRecord {
    pub expired: bool,
    #[serde(rename = "daysRemaining")]
    pub days_remaining: i64,
    #[serde(rename = "inEarlyWindow")]
    pub in_early_window: bool,
    #[serde(rename = "earlyWindowStart")]
    pub early_window_start: String,
}

impl CheckrideGraceRecord {
    fn from_grace(grace: &CheckrideGrace) -> Self {
        Self {
            expired: grace.expired,
            days_remaining: grace.days_remaining,
            in_early_window: grace.in_early_window,
            early_window_start: grace.early_window_start.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Calculated hints shown next to an override for comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatedHints {
    #[serde(rename = "flightReviewExpiry")]
    pub flight_review_expiry: Option<String>,
    #[serde(rename = "ipcExpiry")]
    pub ipc_expiry: Option<String>,
    #[serde(rename = "recurrentExpiry")]
    pub recurrent_expiry: Option<String>,
    #[serde(rename = "checkrideExpiry")]
    pub checkride_expiry: Option<String>,
}

/// Computed expirations for one crew member, overrides applied, as ISO-8601
/// strings. Recomputed on every read; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySheet {
    #[serde(rename = "firstClassMedicalExpiry")]
    pub first_class_medical_expiry: Option<String>,
    #[serde(rename = "secondClassMedicalExpiry")]
    pub second_class_medical_expiry: Option<String>,
    #[serde(rename = "thirdClassMedicalExpiry")]
    pub third_class_medical_expiry: Option<String>,
    #[serde(rename = "part135MedicalExpiry")]
    pub part135_medical_expiry: Option<String>,
    #[serde(rename = "flightReviewExpiry")]
    pub flight_review_expiry: Option<String>,
    #[serde(rename = "ipcExpiry")]
    pub ipc_expiry: Option<String>,
    #[serde(rename = "recurrentExpiry")]
    pub recurrent_expiry: Option<String>,
    #[serde(rename = "checkrideExpiry")]
    pub checkride_expiry: Option<String>,
    #[serde(rename = "passportExpiry")]
    pub passport_expiry: Option<String>,
    #[serde(rename = "checkrideGrace")]
    pub checkride_grace: Option<CheckrideGraceRecord>,
    pub calculated: CalculatedHints,
}

fn fmt_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

impl CurrencySheet {
    pub fn from_output(output: &CrewCurrencyOutput) -> Self {
        Self {
            first_class_medical_expiry: fmt_date(output.medical.first_class),
            second_class_medical_expiry: fmt_date(output.medical.second_class),
            third_class_medical_expiry: fmt_date(output.medical.third_class),
            part135_medical_expiry: fmt_date(output.part135_medical),
            flight_review_expiry: fmt_date(output.flight_review),
            ipc_expiry: fmt_date(output.ipc),
            recurrent_expiry: fmt_date(output.recurrent),
            checkride_expiry: fmt_date(output.checkride),
            passport_expiry: fmt_date(output.passport),
            checkride_grace: output.checkride_grace.as_ref().map(CheckrideGraceRecord::from_grace),
            calculated: CalculatedHints {
                flight_review_expiry: fmt_date(output.calculated.flight_review),
                ipc_expiry: fmt_date(output.calculated.ipc),
                recurrent_expiry: fmt_date(output.calculated.recurrent),
                checkride_expiry: fmt_date(output.calculated.checkride),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::calculate_currency;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_to_input_parses_dates_and_class() {
        let record = CrewCurrencyRecord {
            birth_date: Some("1985-02-02".to_string()),
            medical_class: Some("First".to_string()),
            medical_issued_date: Some("2024-03-15".to_string()),
            last_flight_review_date: Some("2023-06-01".to_string()),
            ..Default::default()
        };
        let input = record.to_input().unwrap();
        assert_eq!(input.birth_date, Some(d(1985, 2, 2)));
        assert_eq!(input.medical_issued, Some(d(2024, 3, 15)));
        assert_eq!(input.checkride_interval_months, 12);
        assert_eq!(input.checkride_grace_months, 1);
    }

    #[test]
    fn test_blank_strings_are_absent() {
        let record = CrewCurrencyRecord {
            birth_date: Some("".to_string()),
            medical_class: Some("  ".to_string()),
            medical_expiry_override: Some("   ".to_string()),
            ..Default::default()
        };
        let input = record.to_input().unwrap();
        assert_eq!(input.birth_date, None);
        assert_eq!(input.medical_class, None);
        assert_eq!(input.overrides.medical, None);
    }

    #[test]
    fn test_malformed_date_fails_loudly() {
        let record = CrewCurrencyRecord {
            last_ipc_date: Some("11/20/2024".to_string()),
            ..Default::default()
        };
        let err = record.to_input().unwrap_err();
        assert!(err.to_string().contains("lastIpcDate"));
    }

    #[test]
    fn test_unknown_medical_class_fails_loudly() {
        let record = CrewCurrencyRecord {
            medical_class: Some("fourth".to_string()),
            ..Default::default()
        };
        assert!(record.to_input().is_err());
    }

    #[test]
    fn test_sheet_serializes_camel_case_iso_dates() {
        let record = CrewCurrencyRecord {
            medical_class: Some("Second".to_string()),
            medical_issued_date: Some("2024-01-10".to_string()),
            last_checkride_date: Some("2024-06-15".to_string()),
            ..Default::default()
        };
        let input = record.to_input().unwrap();
        let output = calculate_currency(&input, d(2025, 6, 5));
        let sheet = CurrencySheet::from_output(&output);

        assert_eq!(sheet.part135_medical_expiry.as_deref(), Some("2025-01-31"));
        assert_eq!(sheet.checkride_expiry.as_deref(), Some("2025-06-30"));
        let grace = sheet.checkride_grace.as_ref().unwrap();
        assert_eq!(grace.days_remaining, 25);
        assert!(grace.in_early_window);

        let json = serde_json::to_string(&sheet).unwrap();
        assert!(json.contains("\"part135MedicalExpiry\":\"2025-01-31\""));
        assert!(json.contains("\"daysRemaining\":25"));
    }
}
