//! Types for form submissions and expanded schedule rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One raw entry from the submission payload, before validation.
///
/// Fields that clients historically sent with inconsistent JSON types
/// (`duration`, `capacity`, `recurring_until_week`, `group_capacities`) are
/// kept as loose `Value`s so validation can report precise errors instead of
/// failing at the deserialization layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    pub academic_session_code: Option<String>,
    pub programme_code: Option<String>,
    pub class_commencement: Option<String>,
    pub duration: Option<Value>,
    pub activity_code: Option<String>,
    pub group_capacities: Option<Value>,
    /// Legacy single-capacity field, expanded to `group_capacities` when the
    /// mapping is absent
    pub capacity: Option<Value>,
    pub course_codes: Option<Vec<String>>,
    /// Descriptive option texts parallel to `course_codes`
    #[serde(default)]
    pub course_texts: Vec<String>,
    pub group_codes: Option<Vec<String>>,
    pub recurring_until_week: Option<Value>,
    pub request_special_room_code: Option<String>,
    #[serde(default)]
    pub excluded_dates: Vec<String>,
    #[serde(default)]
    pub week_venue_details: HashMap<String, WeekVenueDetail>,
    pub recurring_dates: Option<Vec<RecurringDateInput>>,
}

/// Per-date venue and faculty overrides keyed by occurrence date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekVenueDetail {
    #[serde(default)]
    pub faculty_code: String,
    #[serde(default)]
    pub faculty_code_2: String,
    #[serde(default)]
    pub special_room_code: String,
}

/// One element of a pre-computed recurring-date list.
///
/// Clients send either a bare `"YYYY-MM-DD"` string or a richer object whose
/// `date` field carries the same value alongside per-date details.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecurringDateInput {
    Plain(String),
    Detailed { date: String },
}

impl RecurringDateInput {
    /// The bare occurrence date regardless of input shape.
    pub fn date(&self) -> &str {
        match self {
            RecurringDateInput::Plain(date) => date,
            RecurringDateInput::Detailed { date } => date,
        }
    }
}

/// A fully validated class request, ready for row expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRequest {
    pub academic_session_code: String,
    pub programme_code: String,
    pub class_commencement: String,
    pub duration: i64,
    pub activity_code: String,
    pub request_special_room_code: String,
    pub recurring_until_week: i64,
    pub course_codes: Vec<String>,
    pub course_texts: Vec<String>,
    pub group_codes: Vec<String>,
    pub group_capacities: HashMap<String, i64>,
    pub excluded_dates: Vec<String>,
    pub week_venue_details: HashMap<String, WeekVenueDetail>,
    /// Pre-computed occurrence dates, already unwrapped to bare date strings.
    /// When present these are used verbatim instead of the date expander.
    pub recurring_dates: Option<Vec<String>>,
}

/// One concrete scheduling line produced by expanding a request.
///
/// `row_id` and `form_id` are stamped by the orchestrator after expansion;
/// the expander leaves them empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedRow {
    pub row_id: String,
    pub form_id: String,
    pub course_group_id: String,
    pub academic_session_code: String,
    pub programme_code: String,
    pub scheduled_date: String,
    pub duration: i64,
    pub activity_code: String,
    pub group_capacity: i64,
    pub total_capacity: i64,
    pub course_code: String,
    pub course_name: String,
    pub group_code: String,
    pub faculty_code: String,
    pub faculty_code_2: String,
    pub special_room_code: String,
    pub recurring_until_week: i64,
}
