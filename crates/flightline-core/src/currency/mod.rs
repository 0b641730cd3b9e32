//! Currency calculator: regulation-driven expiration dates for one crew
//! member.
//!
//! `calculate_currency` is a pure function over the crew member's dated
//! facts and a caller-supplied as-of date. Missing inputs never fail the
//! computation; each dependent output is simply `None`. Manual overrides,
//! when present, win verbatim over the calculated dates, which are still
//! returned separately for comparison display.

pub mod dates;
pub mod medical;

use chrono::{Months, NaiveDate};

use self::dates::month_end_add;
pub use self::medical::{MedicalClass, MedicalDates};

/// Flight review interval per 14 CFR 61.56 (months)
const FLIGHT_REVIEW_MONTHS: u32 = 24;

/// Instrument proficiency check interval per 14 CFR 61.57(d) (months)
const IPC_MONTHS: u32 = 6;

/// Recurrent training interval (months)
const RECURRENT_MONTHS: u32 = 12;

/// Default Part 135 checkride interval (months)
pub const DEFAULT_CHECKRIDE_INTERVAL_MONTHS: u32 = 12;

/// Default early-completion grace window before a checkride expires (months)
pub const DEFAULT_CHECKRIDE_GRACE_MONTHS: u32 = 1;

/// Manual override dates, one per tracked qualification.
///
/// A present date replaces the calculated value verbatim. The medical
/// override targets the Part 135 relevant date; passport has no calculated
/// value at all, so its expiration is override-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyOverrides {
    pub medical: Option<NaiveDate>,
    pub flight_review: Option<NaiveDate>,
    pub ipc: Option<NaiveDate>,
    pub recurrent: Option<NaiveDate>,
    pub checkride: Option<NaiveDate>,
    pub passport: Option<NaiveDate>,
}

/// Dated facts for one crew member, as maintained by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewCurrencyInput {
    pub birth_date: Option<NaiveDate>,
    pub medical_class: Option<MedicalClass>,
    pub medical_issued: Option<NaiveDate>,
    pub last_flight_review: Option<NaiveDate>,
    pub last_ipc: Option<NaiveDate>,
    pub last_recurrent: Option<NaiveDate>,
    pub last_checkride: Option<NaiveDate>,
    pub checkride_interval_months: u32,
    pub checkride_grace_months: u32,
    pub overrides: CurrencyOverrides,
}

impl Default for CrewCurrencyInput {
    fn default() -> Self {
        Self {
            birth_date: None,
            medical_class: None,
            medical_issued: None,
            last_flight_review: None,
            last_ipc: None,
            last_recurrent: None,
            last_checkride: None,
            checkride_interval_months: DEFAULT_CHECKRIDE_INTERVAL_MONTHS,
            checkride_grace_months: DEFAULT_CHECKRIDE_GRACE_MONTHS,
            overrides: CurrencyOverrides::default(),
        }
    }
}

/// Position of the as-of date relative to the checkride expiration and its
/// early-completion window.
///
/// `days_remaining` is signed: negative means days overdue. Whether an
/// early completion preserves the original cycle is the caller's decision;
/// this record only reports window membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckrideGrace {
    pub expired: bool,
    pub days_remaining: i64,
    pub in_early_window: bool,
    pub early_window_start: NaiveDate,
}

/// Calculated (pre-override) dates, kept for hint display next to an
/// override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatedDates {
    pub flight_review: Option<NaiveDate>,
    pub ipc: Option<NaiveDate>,
    pub recurrent: Option<NaiveDate>,
    pub checkride: Option<NaiveDate>,
}

/// One expiration date per tracked qualification, overrides already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewCurrencyOutput {
    /// Per-class privilege lapse dates (always the calculated values)
    pub medical: MedicalDates,
    /// Part 135 relevant medical date: override, else Second-class lapse
    pub part135_medical: Option<NaiveDate>,
    pub flight_review: Option<NaiveDate>,
    pub ipc: Option<NaiveDate>,
    pub recurrent: Option<NaiveDate>,
    pub checkride: Option<NaiveDate>,
    pub passport: Option<NaiveDate>,
    pub checkride_grace: Option<CheckrideGrace>,
    pub calculated: CalculatedDates,
}

/// Compute every tracked expiration for one crew member as of a given date.
///
/// Never fails: absent inputs propagate as `None` for their qualification
/// only, and never disturb the others.
pub fn calculate_currency(input: &CrewCurrencyInput, as_of: NaiveDate) -> CrewCurrencyOutput {
    let medical = medical::privilege_dates(input.medical_class, input.medical_issued, input.birth_date);

    let calculated = CalculatedDates {
        flight_review: input
            .last_flight_review
            .and_then(|d| month_end_add(d, FLIGHT_REVIEW_MONTHS)),
        ipc: input.last_ipc.and_then(|d| month_end_add(d, IPC_MONTHS)),
        recurrent: input
            .last_recurrent
            .and_then(|d| month_end_add(d, RECURRENT_MONTHS)),
        checkride: input
            .last_checkride
            .and_then(|d| month_end_add(d, input.checkride_interval_months)),
    };

    let ov = &input.overrides;
    let checkride = ov.checkride.or(calculated.checkride);
    let checkride_grace =
        checkride.map(|expiry| grace_window(expiry, input.checkride_grace_months, as_of));

    CrewCurrencyOutput {
        part135_medical: ov.medical.or(medical.part135_relevant()),
        medical,
        flight_review: ov.flight_review.or(calculated.flight_review),
        ipc: ov.ipc.or(calculated.ipc),
        recurrent: ov.recurrent.or(calculated.recurrent),
        checkride,
        passport: ov.passport,
        checkride_grace,
        calculated,
    }
}

/// Locate `as_of` relative to a checkride expiration.
///
/// The window start is plain month subtraction (chrono clamps the day), not
/// the month-end rule: the start is informational, not itself an expiration.
fn grace_window(expiry: NaiveDate, grace_months: u32, as_of: NaiveDate) -> CheckrideGrace {
    let early_window_start = expiry
        .checked_sub_months(Months::new(grace_months))
        .unwrap_or(expiry);

    CheckrideGrace {
        expired: as_of > expiry,
        days_remaining: (expiry - as_of).num_days(),
        in_early_window: as_of >= early_window_start && as_of <= expiry,
        early_window_start,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn as_of() -> NaiveDate {
        d(2025, 1, 15)
    }

    // -------------------------------------------------------------------------
    // Fixed-duration qualifications
    // -------------------------------------------------------------------------

    #[test]
    fn test_flight_review_24_months() {
        let input = CrewCurrencyInput {
            last_flight_review: Some(d(2023, 6, 1)),
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.flight_review, Some(d(2025, 6, 30)));
        assert_eq!(out.calculated.flight_review, Some(d(2025, 6, 30)));
    }

    #[test]
    fn test_ipc_6_months() {
        let input = CrewCurrencyInput {
            last_ipc: Some(d(2024, 11, 20)),
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.ipc, Some(d(2025, 5, 31)));
    }

    #[test]
    fn test_recurrent_12_months() {
        let input = CrewCurrencyInput {
            last_recurrent: Some(d(2024, 4, 10)),
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.recurrent, Some(d(2025, 4, 30)));
    }

    #[test]
    fn test_checkride_configurable_interval() {
        let input = CrewCurrencyInput {
            last_checkride: Some(d(2024, 6, 10)),
            checkride_interval_months: 6,
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.checkride, Some(d(2024, 12, 31)));
    }

    #[test]
    fn test_missing_inputs_stay_isolated() {
        let input = CrewCurrencyInput {
            last_ipc: Some(d(2024, 11, 20)),
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.ipc, Some(d(2025, 5, 31)));
        assert_eq!(out.flight_review, None);
        assert_eq!(out.recurrent, None);
        assert_eq!(out.checkride, None);
        assert_eq!(out.checkride_grace, None);
        assert_eq!(out.passport, None);
        assert_eq!(out.part135_medical, None);
    }

    // -------------------------------------------------------------------------
    // Checkride grace window
    // -------------------------------------------------------------------------

    #[test]
    fn test_grace_inside_early_window() {
        let input = CrewCurrencyInput {
            last_checkride: Some(d(2024, 6, 15)), // expires 2025-06-30
            ..Default::default()
        };
        let out = calculate_currency(&input, d(2025, 6, 5));
        let grace = out.checkride_grace.unwrap();
        assert!(!grace.expired);
        assert!(grace.in_early_window);
        assert_eq!(grace.days_remaining, 25);
        assert_eq!(grace.early_window_start, d(2025, 5, 30));
    }

    #[test]
    fn test_grace_before_early_window() {
        let input = CrewCurrencyInput {
            last_checkride: Some(d(2024, 6, 15)),
            ..Default::default()
        };
        let out = calculate_currency(&input, d(2025, 4, 1));
        let grace = out.checkride_grace.unwrap();
        assert!(!grace.expired);
        assert!(!grace.in_early_window);
        assert!(grace.days_remaining > 0);
    }

    #[test]
    fn test_grace_expired() {
        let input = CrewCurrencyInput {
            last_checkride: Some(d(2023, 6, 15)), // expired 2024-06-30
            ..Default::default()
        };
        let out = calculate_currency(&input, d(2024, 7, 10));
        let grace = out.checkride_grace.unwrap();
        assert!(grace.expired);
        assert!(!grace.in_early_window);
        assert_eq!(grace.days_remaining, -10);
    }

    #[test]
    fn test_grace_window_boundaries_inclusive() {
        let input = CrewCurrencyInput {
            last_checkride: Some(d(2024, 6, 15)),
            ..Default::default()
        };
        // On the window start
        let grace = calculate_currency(&input, d(2025, 5, 30))
            .checkride_grace
            .unwrap();
        assert!(grace.in_early_window);
        // On the expiration itself
        let grace = calculate_currency(&input, d(2025, 6, 30))
            .checkride_grace
            .unwrap();
        assert!(grace.in_early_window);
        assert!(!grace.expired);
        assert_eq!(grace.days_remaining, 0);
        // One day past
        let grace = calculate_currency(&input, d(2025, 7, 1))
            .checkride_grace
            .unwrap();
        assert!(grace.expired);
        assert!(!grace.in_early_window);
    }

    // -------------------------------------------------------------------------
    // Override precedence
    // -------------------------------------------------------------------------

    #[test]
    fn test_overrides_win_over_calculated() {
        let input = CrewCurrencyInput {
            birth_date: Some(d(1985, 2, 2)),
            medical_class: Some(MedicalClass::Second),
            medical_issued: Some(d(2024, 1, 10)),
            last_flight_review: Some(d(2023, 6, 1)),
            last_ipc: Some(d(2024, 11, 20)),
            last_recurrent: Some(d(2024, 4, 10)),
            last_checkride: Some(d(2024, 6, 15)),
            overrides: CurrencyOverrides {
                medical: Some(d(2030, 1, 1)),
                flight_review: Some(d(2030, 2, 1)),
                ipc: Some(d(2030, 3, 1)),
                recurrent: Some(d(2030, 4, 1)),
                checkride: Some(d(2030, 5, 1)),
                passport: Some(d(2030, 6, 1)),
            },
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.part135_medical, Some(d(2030, 1, 1)));
        assert_eq!(out.flight_review, Some(d(2030, 2, 1)));
        assert_eq!(out.ipc, Some(d(2030, 3, 1)));
        assert_eq!(out.recurrent, Some(d(2030, 4, 1)));
        assert_eq!(out.checkride, Some(d(2030, 5, 1)));
        assert_eq!(out.passport, Some(d(2030, 6, 1)));

        // Calculated values survive for hint display
        assert_eq!(out.calculated.flight_review, Some(d(2025, 6, 30)));
        assert_eq!(out.calculated.ipc, Some(d(2025, 5, 31)));
        assert_eq!(out.medical.second_class, Some(d(2025, 1, 31)));

        // Grace window follows the overridden checkride date
        let grace = out.checkride_grace.unwrap();
        assert_eq!(grace.early_window_start, d(2030, 4, 1));
        assert!(!grace.expired);
    }

    #[test]
    fn test_absent_override_falls_back_to_calculated() {
        let input = CrewCurrencyInput {
            last_flight_review: Some(d(2023, 6, 1)),
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.flight_review, out.calculated.flight_review);
    }

    #[test]
    fn test_medical_override_fills_part135_gap() {
        // Third-class medical: no Part 135 date unless overridden
        let input = CrewCurrencyInput {
            medical_class: Some(MedicalClass::Third),
            medical_issued: Some(d(2024, 1, 10)),
            overrides: CurrencyOverrides {
                medical: Some(d(2025, 12, 31)),
                ..Default::default()
            },
            ..Default::default()
        };
        let out = calculate_currency(&input, as_of());
        assert_eq!(out.part135_medical, Some(d(2025, 12, 31)));
        assert_eq!(out.medical.second_class, None);
    }

    // -------------------------------------------------------------------------
    // Determinism
    // -------------------------------------------------------------------------

    #[test]
    fn test_identical_inputs_yield_identical_outputs() {
        let input = CrewCurrencyInput {
            birth_date: Some(d(1985, 2, 2)),
            medical_class: Some(MedicalClass::First),
            medical_issued: Some(d(2024, 3, 15)),
            last_flight_review: Some(d(2023, 6, 1)),
            last_checkride: Some(d(2024, 6, 15)),
            ..Default::default()
        };
        assert_eq!(
            calculate_currency(&input, as_of()),
            calculate_currency(&input, as_of())
        );
    }
}
