//! Medical certificate privilege step-down (14 CFR 61.23).
//!
//! A medical certificate does not expire all at once: a First-class medical
//! lapses to Second-class privileges, then to Third-class privileges, each on
//! its own calendar-month schedule, with the First- and Third-class durations
//! depending on whether the airman was under 40 at examination.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ModelError;

use super::dates::{age_at, month_end_add};

/// Age threshold that shortens First- and Third-class durations
const STEP_DOWN_AGE: i32 = 40;

/// First-class privilege duration (months)
const FIRST_CLASS_UNDER_40_MONTHS: u32 = 12;
const FIRST_CLASS_40_PLUS_MONTHS: u32 = 6;

/// Second-class privilege duration (months), same at any age
const SECOND_CLASS_MONTHS: u32 = 12;

/// Third-class privilege duration (months)
const THIRD_CLASS_UNDER_40_MONTHS: u32 = 60;
const THIRD_CLASS_40_PLUS_MONTHS: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicalClass {
    First,
    Second,
    Third,
}

impl FromStr for MedicalClass {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "1" | "class 1" => Ok(MedicalClass::First),
            "second" | "2" | "class 2" => Ok(MedicalClass::Second),
            "third" | "3" | "class 3" => Ok(MedicalClass::Third),
            _ => Err(ModelError::UnknownMedicalClass(s.to_string())),
        }
    }
}

impl std::fmt::Display for MedicalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicalClass::First => write!(f, "First"),
            MedicalClass::Second => write!(f, "Second"),
            MedicalClass::Third => write!(f, "Third"),
        }
    }
}

/// The three independent privilege-lapse dates for one medical certificate.
///
/// A slot is `None` when the held class never grants that privilege level
/// (a Third-class medical has no First- or Second-class dates).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalDates {
    pub first_class: Option<NaiveDate>,
    pub second_class: Option<NaiveDate>,
    pub third_class: Option<NaiveDate>,
}

impl MedicalDates {
    /// The privilege level charter (Part 135) operations require.
    ///
    /// Currently the Second-class date; `None` means the crew member does
    /// not meet the Part 135 minimum at all.
    pub fn part135_relevant(&self) -> Option<NaiveDate> {
        self.second_class
    }
}

/// Compute the step-down dates for a medical examination.
///
/// With no issue date there is nothing to compute. With no birth date the
/// airman is assumed to be 40 or older, the conservative (shorter) branch.
pub fn privilege_dates(
    class: Option<MedicalClass>,
    issued: Option<NaiveDate>,
    birth_date: Option<NaiveDate>,
) -> MedicalDates {
    let (Some(class), Some(issued)) = (class, issued) else {
        return MedicalDates::default();
    };

    let under_40 = birth_date
        .map(|b| age_at(issued, b) < STEP_DOWN_AGE)
        .unwrap_or(false);

    let first_class = match class {
        MedicalClass::First => {
            let months = if under_40 {
                FIRST_CLASS_UNDER_40_MONTHS
            } else {
                FIRST_CLASS_40_PLUS_MONTHS
            };
            month_end_add(issued, months)
        }
        _ => None,
    };

    let second_class = match class {
        // First-class holders step down to Second-class privileges
        MedicalClass::First | MedicalClass::Second => month_end_add(issued, SECOND_CLASS_MONTHS),
        MedicalClass::Third => None,
    };

    let third_class = {
        let months = if under_40 {
            THIRD_CLASS_UNDER_40_MONTHS
        } else {
            THIRD_CLASS_40_PLUS_MONTHS
        };
        month_end_add(issued, months)
    };

    MedicalDates {
        first_class,
        second_class,
        third_class,
    }
}

// ============================================================================
// Tests
// ============================================================================
