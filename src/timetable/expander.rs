//! Cartesian row expansion for validated class requests.

use chrono::NaiveDate;
use std::collections::HashSet;

use super::dates;
use super::types::{ClassRequest, GeneratedRow};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Expands one request into the full set of concrete schedule rows.
///
/// Produces one row per element of the Cartesian product of selected courses,
/// selected groups, and occurrence dates, in that loop order (courses outer,
/// groups middle, dates inner). Downstream consumers rely on this ordering
/// when pairing rows with allocated row IDs.
///
/// Pure: repeated calls with the same request yield identical rows. The
/// `row_id` and `form_id` fields are left empty for the orchestrator to
/// stamp.
pub fn expand_rows(request: &ClassRequest) -> Vec<GeneratedRow> {
    let occurrence_dates = resolve_occurrence_dates(request);
    let course_names = course_name_lookup(&request.course_codes, &request.course_texts);
    let total_capacity: i64 = request.group_capacities.values().sum();

    let mut rows = Vec::with_capacity(
        request.course_codes.len() * request.group_codes.len() * occurrence_dates.len(),
    );

    for (course_idx, course_code) in request.course_codes.iter().enumerate() {
        for group_code in &request.group_codes {
            let group_capacity = request
                .group_capacities
                .get(group_code)
                .copied()
                .unwrap_or(0);

            for scheduled_date in &occurrence_dates {
                let venue = request.week_venue_details.get(scheduled_date);

                rows.push(GeneratedRow {
                    row_id: String::new(),
                    form_id: String::new(),
                    course_group_id: format!("{course_code}-{group_code}"),
                    academic_session_code: request.academic_session_code.clone(),
                    programme_code: request.programme_code.clone(),
                    scheduled_date: scheduled_date.clone(),
                    duration: request.duration,
                    activity_code: request.activity_code.clone(),
                    group_capacity,
                    total_capacity,
                    course_code: course_code.clone(),
                    course_name: course_names[course_idx].clone(),
                    group_code: group_code.clone(),
                    faculty_code: venue.map(|v| v.faculty_code.clone()).unwrap_or_default(),
                    faculty_code_2: venue.map(|v| v.faculty_code_2.clone()).unwrap_or_default(),
                    special_room_code: venue
                        .map(|v| v.special_room_code.clone())
                        .unwrap_or_default(),
                    recurring_until_week: request.recurring_until_week,
                });
            }
        }
    }

    rows
}

/// Resolves the occurrence-date sequence for a request.
///
/// A supplied `recurring_dates` list is used verbatim; otherwise the dates
/// are computed from the commencement anchor, the week count, and the
/// excluded dates. An unparseable anchor behaves like a missing one.
fn resolve_occurrence_dates(request: &ClassRequest) -> Vec<String> {
    if let Some(dates) = &request.recurring_dates {
        return dates.clone();
    }

    let start = NaiveDate::parse_from_str(&request.class_commencement, DATE_FORMAT).ok();
    let excluded: HashSet<NaiveDate> = request
        .excluded_dates
        .iter()
        .filter_map(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
        .collect();

    dates::expand(start, request.recurring_until_week, &excluded)
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect()
}

/// Pairs each course code with its display name.
///
/// Option texts follow the `"<code> - <name>"` convention; entries without
/// the separator are used verbatim, and positions without a text entry get
/// an empty name.
fn course_name_lookup(course_codes: &[String], course_texts: &[String]) -> Vec<String> {
    course_codes
        .iter()
        .enumerate()
        .map(|(idx, _)| match course_texts.get(idx) {
            Some(text) => text
                .split_once(" - ")
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| text.clone()),
            None => String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::types::WeekVenueDetail;
    use std::collections::HashMap;

    fn base_request() -> ClassRequest {
        ClassRequest {
            academic_session_code: "2026S1".into(),
            programme_code: "BCS".into(),
            class_commencement: "2026-02-09".into(),
            duration: 2,
            activity_code: "LEC".into(),
            request_special_room_code: String::new(),
            recurring_until_week: 2,
            course_codes: vec!["CS101".into(), "CS102".into()],
            course_texts: vec![
                "CS101 - Intro to Computing".into(),
                "CS102 - Data Structures".into(),
            ],
            group_codes: vec!["G1".into()],
            group_capacities: HashMap::from([("G1".to_string(), 30)]),
            excluded_dates: Vec::new(),
            week_venue_details: HashMap::new(),
            recurring_dates: None,
        }
    }

    #[test]
    fn test_product_size_and_total_capacity() {
        let rows = expand_rows(&base_request());

        // 2 courses x 1 group x 2 dates
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.total_capacity == 30));
        assert!(rows.iter().all(|r| r.group_capacity == 30));
    }

    #[test]
    fn test_loop_order_courses_groups_dates() {
        let mut request = base_request();
        request.group_codes = vec!["G1".into(), "G2".into()];
        request.group_capacities =
            HashMap::from([("G1".to_string(), 30), ("G2".to_string(), 20)]);

        let rows = expand_rows(&request);
        assert_eq!(rows.len(), 8);

        let key: Vec<(String, String, String)> = rows
            .iter()
            .map(|r| {
                (
                    r.course_code.clone(),
                    r.group_code.clone(),
                    r.scheduled_date.clone(),
                )
            })
            .collect();

        assert_eq!(key[0], ("CS101".into(), "G1".into(), "2026-02-09".into()));
        assert_eq!(key[1], ("CS101".into(), "G1".into(), "2026-02-16".into()));
        assert_eq!(key[2], ("CS101".into(), "G2".into(), "2026-02-09".into()));
        assert_eq!(key[4], ("CS102".into(), "G1".into(), "2026-02-09".into()));
        assert_eq!(key[7], ("CS102".into(), "G2".into(), "2026-02-16".into()));
    }

    #[test]
    fn test_per_group_capacity_and_total() {
        let mut request = base_request();
        request.group_codes = vec!["G1".into(), "G2".into()];
        request.group_capacities =
            HashMap::from([("G1".to_string(), 30), ("G2".to_string(), 20)]);

        let rows = expand_rows(&request);
        for row in &rows {
            let expected = if row.group_code == "G1" { 30 } else { 20 };
            assert_eq!(row.group_capacity, expected);
            assert_eq!(row.total_capacity, 50);
        }
    }

    #[test]
    fn test_excluded_date_pushes_sequence() {
        let mut request = base_request();
        request.excluded_dates = vec!["2026-02-16".into()];

        let rows = expand_rows(&request);
        let dates: Vec<&str> = rows
            .iter()
            .filter(|r| r.course_code == "CS101")
            .map(|r| r.scheduled_date.as_str())
            .collect();

        assert_eq!(dates, vec!["2026-02-09", "2026-02-23"]);
    }

    #[test]
    fn test_week_venue_overrides_applied_per_date() {
        let mut request = base_request();
        request.week_venue_details = HashMap::from([(
            "2026-02-09".to_string(),
            WeekVenueDetail {
                faculty_code: "F01".into(),
                faculty_code_2: "F02".into(),
                special_room_code: "LAB3".into(),
            },
        )]);

        let rows = expand_rows(&request);
        for row in &rows {
            if row.scheduled_date == "2026-02-09" {
                assert_eq!(row.faculty_code, "F01");
                assert_eq!(row.faculty_code_2, "F02");
                assert_eq!(row.special_room_code, "LAB3");
            } else {
                assert_eq!(row.faculty_code, "");
                assert_eq!(row.faculty_code_2, "");
                assert_eq!(row.special_room_code, "");
            }
        }
    }

    #[test]
    fn test_supplied_recurring_dates_used_verbatim() {
        let mut request = base_request();
        request.recurring_dates = Some(vec!["2026-03-01".into(), "2026-03-15".into()]);
        // Anchor and exclusions are ignored when dates are supplied
        request.excluded_dates = vec!["2026-03-01".into()];

        let rows = expand_rows(&request);
        let dates: Vec<&str> = rows
            .iter()
            .filter(|r| r.course_code == "CS101")
            .map(|r| r.scheduled_date.as_str())
            .collect();

        assert_eq!(dates, vec!["2026-03-01", "2026-03-15"]);
    }

    #[test]
    fn test_course_names_extracted_from_texts() {
        let mut request = base_request();
        request.course_texts = vec!["CS101 - Intro to Computing".into(), "CS102".into()];
        request.course_codes.push("CS103".into());

        let rows = expand_rows(&request);
        let name_for = |code: &str| {
            rows.iter()
                .find(|r| r.course_code == code)
                .map(|r| r.course_name.clone())
                .unwrap()
        };

        assert_eq!(name_for("CS101"), "Intro to Computing");
        assert_eq!(name_for("CS102"), "CS102");
        assert_eq!(name_for("CS103"), "");
    }

    #[test]
    fn test_course_group_id_composite() {
        let rows = expand_rows(&base_request());
        assert!(rows
            .iter()
            .all(|r| r.course_group_id == format!("{}-{}", r.course_code, r.group_code)));
    }

    #[test]
    fn test_unparseable_anchor_yields_no_rows() {
        let mut request = base_request();
        request.class_commencement = "next monday".into();
        assert!(expand_rows(&request).is_empty());
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let request = base_request();
        assert_eq!(expand_rows(&request), expand_rows(&request));
    }
}
