//! Validation of raw submission entries.
//!
//! Every check runs before any ID allocation, expansion, or persistence, so
//! a rejected entry leaves no trace.

use serde_json::Value;
use std::collections::HashMap;

use super::error::RequestError;
use super::types::{ClassRequest, RawEntry};

/// Required fields, checked in submission-form order.
const REQUIRED_FIELDS: [&str; 9] = [
    "academic_session_code",
    "programme_code",
    "class_commencement",
    "duration",
    "activity_code",
    "group_capacities",
    "course_codes",
    "group_codes",
    "recurring_until_week",
];

/// Validates one raw entry and produces a typed request.
///
/// Entries that carry the legacy single `capacity` field without a
/// `group_capacities` mapping have the mapping synthesized as every selected
/// group at that capacity before any checks run.
pub fn validate_entry(entry: &RawEntry) -> Result<ClassRequest, RequestError> {
    for field in REQUIRED_FIELDS {
        if !field_present(entry, field) {
            return Err(RequestError::MissingField {
                field: field.to_string(),
            });
        }
    }

    let academic_session_code = required_string(&entry.academic_session_code);
    let programme_code = required_string(&entry.programme_code);
    let class_commencement = required_string(&entry.class_commencement);
    let activity_code = required_string(&entry.activity_code);
    let duration = coerce_int(entry.duration.as_ref(), "duration")?;
    let recurring_until_week =
        coerce_int(entry.recurring_until_week.as_ref(), "recurring_until_week")?;

    let course_codes = entry.course_codes.clone().unwrap_or_default();
    let group_codes = entry.group_codes.clone().unwrap_or_default();

    let group_capacities = validate_group_capacities(entry, &group_codes)?;

    let recurring_dates = entry
        .recurring_dates
        .as_ref()
        .map(|dates| dates.iter().map(|d| d.date().to_string()).collect());

    Ok(ClassRequest {
        academic_session_code,
        programme_code,
        class_commencement,
        duration,
        activity_code,
        request_special_room_code: entry.request_special_room_code.clone().unwrap_or_default(),
        recurring_until_week,
        course_codes,
        course_texts: entry.course_texts.clone(),
        group_codes,
        group_capacities,
        excluded_dates: entry.excluded_dates.clone(),
        week_venue_details: entry.week_venue_details.clone(),
        recurring_dates,
    })
}

/// Checks presence of a required field: absent, null, empty string, and
/// empty list all count as missing.
fn field_present(entry: &RawEntry, field: &str) -> bool {
    match field {
        "academic_session_code" => string_present(&entry.academic_session_code),
        "programme_code" => string_present(&entry.programme_code),
        "class_commencement" => string_present(&entry.class_commencement),
        "activity_code" => string_present(&entry.activity_code),
        "duration" => value_present(&entry.duration),
        "recurring_until_week" => value_present(&entry.recurring_until_week),
        // Legacy entries satisfy the capacity requirement through the single
        // `capacity` field
        "group_capacities" => value_present(&entry.group_capacities) || value_present(&entry.capacity),
        "course_codes" => list_present(&entry.course_codes),
        "group_codes" => list_present(&entry.group_codes),
        _ => false,
    }
}

fn string_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn value_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn list_present(value: &Option<Vec<String>>) -> bool {
    value.as_ref().is_some_and(|list| !list.is_empty())
}

fn required_string(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Coerces a JSON number or numeric string to an integer.
fn coerce_int(value: Option<&Value>, field: &str) -> Result<i64, RequestError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| RequestError::Internal {
        message: format!("Invalid integer value for field: {field}"),
    })
}

/// Validates the group-capacity mapping against the selected groups.
///
/// The mapping must be a JSON object whose key set equals `group_codes`
/// exactly, with every value a non-negative integer.
fn validate_group_capacities(
    entry: &RawEntry,
    group_codes: &[String],
) -> Result<HashMap<String, i64>, RequestError> {
    let effective = if value_present(&entry.group_capacities) {
        entry.group_capacities.clone().unwrap_or_default()
    } else if value_present(&entry.capacity) {
        let capacity = entry.capacity.clone().unwrap_or_default();
        Value::Object(
            group_codes
                .iter()
                .map(|group| (group.clone(), capacity.clone()))
                .collect(),
        )
    } else {
        return Err(RequestError::MissingField {
            field: "group_capacities".to_string(),
        });
    };

    let Some(mapping) = effective.as_object() else {
        return Err(RequestError::InvalidCapacityMapping {
            message: "group_capacities must be an object".to_string(),
        });
    };

    let mut capacities = HashMap::with_capacity(group_codes.len());

    for group in group_codes {
        let Some(value) = mapping.get(group) else {
            return Err(RequestError::InvalidCapacityMapping {
                message: format!("Missing capacity for group: {group}"),
            });
        };

        match value.as_i64() {
            Some(capacity) if capacity >= 0 => {
                capacities.insert(group.clone(), capacity);
            }
            _ => {
                return Err(RequestError::InvalidCapacityMapping {
                    message: format!("Invalid capacity value for group {group}"),
                })
            }
        }
    }

    for key in mapping.keys() {
        if !group_codes.iter().any(|group| group == key) {
            return Err(RequestError::InvalidCapacityMapping {
                message: format!("Capacity specified for unselected group: {key}"),
            });
        }
    }

    Ok(capacities)
}
