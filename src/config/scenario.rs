use crate::page::Field;
use serde::Deserialize;
use std::fmt;

/// One complete booking attempt: input values per field plus the expected
/// UI outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Name shown in reports.
    pub name: String,

    /// How the city field is populated.
    pub city: CityEntry,

    /// How the date field is populated.
    pub date: DateEntry,

    /// Value for the name field.
    pub full_name: String,

    /// Value for the phone field.
    pub phone: String,

    /// Whether the agreement checkbox is clicked before submit.
    #[serde(default = "default_true")]
    pub agreement: bool,

    /// Expected outcome after submit.
    pub expect: Expectation,
}

fn default_true() -> bool {
    true
}

/// City field input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityEntry {
    /// Type the value directly (may be empty).
    Value(String),
    /// Type a fragment and pick a dropdown entry containing `pick`.
    Autocomplete { typed: String, pick: String },
}

/// Date field input. Offsets are resolved against "today" when the scenario
/// runs, not when the suite is loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateEntry {
    /// Clear the default and type today + N days as `dd.MM.yyyy`.
    DaysFromNow(u64),
    /// Clear the default and type this exact text (may be empty).
    Literal(String),
    /// Pick today + N days through the calendar popup.
    CalendarDaysFromNow(u64),
}

impl DateEntry {
    /// Whether this entry yields a generated date the success notification
    /// can be checked against.
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::DaysFromNow(_) | Self::CalendarDaysFromNow(_))
    }
}

/// Expected UI state after submit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Loading icon appears, then the success notification shows the
    /// submitted date.
    Success,
    /// The field carries the invalid marker and shows exactly this message;
    /// no success notification.
    FieldError { field: Field, message: String },
    /// The agreement control carries the invalid marker (it has no message
    /// element); no success notification.
    AgreementInvalid,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::FieldError { field, message } => {
                write!(f, "{} error '{}'", field, message)
            }
            Self::AgreementInvalid => f.write_str("agreement invalid"),
        }
    }
}
