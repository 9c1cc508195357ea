//! Submission orchestration: validate, allocate, expand, emit, persist.

use chrono::Local;
use tracing::{info, warn};

use super::error::RequestError;
use super::expander::expand_rows;
use super::ids;
use super::types::{ClassRequest, GeneratedRow, RawEntry};
use super::validate::validate_entry;
use crate::excel;
use crate::types::AppState;

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub file_name: String,
    pub form_ids: Vec<String>,
    pub row_count: usize,
    pub entry_count: usize,
}

/// Processes one batch of submitted entries end to end.
///
/// All entries are validated before anything is allocated or written. Form
/// IDs for the whole batch are reserved as one contiguous block before any
/// row expansion, so every entry keeps its identifier even though rows are
/// generated incrementally afterward. The artifact is written first and the
/// database commit is a single transaction; if the commit fails the artifact
/// is removed again so no half-submission survives.
pub async fn process_submission(
    state: &AppState,
    entries: &[RawEntry],
) -> Result<SubmissionOutcome, RequestError> {
    if entries.is_empty() {
        return Err(RequestError::MissingField {
            field: "entries".to_string(),
        });
    }

    // Holding the lock across read-max, allocation, and persistence closes
    // the duplicate-ID race between concurrent submissions.
    let _guard = state.submission_lock.lock().await;

    let requests: Vec<ClassRequest> = entries
        .iter()
        .map(validate_entry)
        .collect::<Result<_, _>>()?;

    let last_form_id = state.forms_db.last_form_id()?;
    let form_ids = ids::form_ids(last_form_id, requests.len());

    // First entry's programme names the artifact
    let programme_code = requests[0].programme_code.clone();

    let mut all_rows: Vec<GeneratedRow> = Vec::new();
    for (request, form_id) in requests.iter().zip(&form_ids) {
        let mut rows = expand_rows(request);
        for row in &mut rows {
            row.form_id = form_id.clone();
        }
        all_rows.extend(rows);
    }

    let now = Local::now();
    let prefix = ids::time_bucket_prefix(&now);
    let last_running = state.forms_db.last_row_running(&prefix)?;
    let row_ids = ids::row_ids(&prefix, last_running, all_rows.len());
    for (row, row_id) in all_rows.iter_mut().zip(&row_ids) {
        row.row_id = row_id.clone();
    }

    let timestamp = now.format("%Y%m%d-%H%M%S").to_string();
    let file_name = format!("Pre-DTCT_{programme_code}_{timestamp}.xlsx");
    let file_path = state.config.output_dir.join(&file_name);

    excel::write_workbook_file(&file_path, &all_rows)?;

    if let Err(e) = state.forms_db.insert_generated(
        &form_ids,
        &timestamp,
        &programme_code,
        &file_path.display().to_string(),
        &all_rows,
    ) {
        warn!("Submission rolled back, removing orphaned artifact {file_name}: {e}");
        let _ = std::fs::remove_file(&file_path);
        return Err(e.into());
    }

    info!(
        "Generated {} with {} rows across {} entries (form IDs {}..{})",
        file_name,
        all_rows.len(),
        entries.len(),
        form_ids.first().map(String::as_str).unwrap_or(""),
        form_ids.last().map(String::as_str).unwrap_or(""),
    );

    Ok(SubmissionOutcome {
        file_name,
        form_ids,
        row_count: all_rows.len(),
        entry_count: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::FormsDbManager;
    use crate::glossary::GlossaryStore;
    use serde_json::json;
    use std::path::PathBuf;

    fn temp_output_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("predtct-submit-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_state(tag: &str) -> AppState {
        let output_dir = temp_output_dir(tag);
        let config = AppConfig {
            glossary_dir: output_dir.join("glossary"),
            database_path: PathBuf::from(":memory:"),
            output_dir,
            bind_addr: "127.0.0.1:0".into(),
        };

        AppState::new(config, FormsDbManager::new(":memory:"), GlossaryStore::empty())
    }

    fn entry(courses: Vec<&str>, programme: &str) -> RawEntry {
        serde_json::from_value(json!({
            "academic_session_code": "2026S1",
            "programme_code": programme,
            "class_commencement": "2026-02-09",
            "duration": 2,
            "activity_code": "LEC",
            "group_capacities": {"G1": 30},
            "course_codes": courses,
            "group_codes": ["G1"],
            "recurring_until_week": 2
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let state = test_state("empty");
        let err = process_submission(&state, &[]).await.unwrap_err();
        assert!(matches!(err, RequestError::MissingField { ref field } if field == "entries"));
    }

    #[tokio::test]
    async fn test_single_entry_end_to_end() {
        let state = test_state("single");
        let outcome = process_submission(&state, &[entry(vec!["CS101", "CS102"], "BCS")])
            .await
            .unwrap();

        // 2 courses x 1 group x 2 dates
        assert_eq!(outcome.row_count, 4);
        assert_eq!(outcome.entry_count, 1);
        assert_eq!(outcome.form_ids, vec!["900001"]);
        assert!(outcome.file_name.starts_with("Pre-DTCT_BCS_"));
        assert!(outcome.file_name.ends_with(".xlsx"));

        // Artifact exists and rows are persisted under the allocated form ID
        assert!(state.config.output_dir.join(&outcome.file_name).exists());
        let persisted = state.forms_db.get_rows_for_form("900001").unwrap();
        assert_eq!(persisted.len(), 4);
        assert!(persisted.iter().all(|r| r.row_id.len() == 20));

        let _ = std::fs::remove_dir_all(&state.config.output_dir);
    }

    #[tokio::test]
    async fn test_batch_allocates_sequential_form_ids() {
        let state = test_state("batch");
        let entries = vec![
            entry(vec!["CS101"], "BCS"),
            entry(vec!["CS102"], "BIS"),
            entry(vec!["CS103"], "BSE"),
        ];

        let outcome = process_submission(&state, &entries).await.unwrap();
        assert_eq!(outcome.form_ids, vec!["900001", "900002", "900003"]);
        // Artifact is named after the first entry's programme
        assert!(outcome.file_name.starts_with("Pre-DTCT_BCS_"));

        // Each entry owns its own rows
        for form_id in &outcome.form_ids {
            assert_eq!(state.forms_db.get_rows_for_form(form_id).unwrap().len(), 2);
        }

        let _ = std::fs::remove_dir_all(&state.config.output_dir);
    }

    #[tokio::test]
    async fn test_invalid_entry_fails_whole_batch() {
        let state = test_state("rollback");
        let mut bad = entry(vec!["CS102"], "BIS");
        bad.course_codes = Some(Vec::new());

        let entries = vec![entry(vec!["CS101"], "BCS"), bad];
        let err = process_submission(&state, &entries).await.unwrap_err();
        assert!(matches!(err, RequestError::MissingField { .. }));

        // Nothing persisted, nothing written
        assert_eq!(state.forms_db.row_count().unwrap(), 0);
        assert_eq!(state.forms_db.last_form_id().unwrap(), ids::FORM_ID_BASE);
        let leftovers: Vec<_> = std::fs::read_dir(&state.config.output_dir)
            .unwrap()
            .collect();
        assert!(leftovers.is_empty());

        let _ = std::fs::remove_dir_all(&state.config.output_dir);
    }

    #[tokio::test]
    async fn test_row_ids_distinct_and_consecutive() {
        let state = test_state("rowids");
        let outcome = process_submission(&state, &[entry(vec!["CS101", "CS102"], "BCS")])
            .await
            .unwrap();

        let persisted = state.forms_db.get_rows_for_form("900001").unwrap();
        let mut numbers: Vec<i64> = persisted
            .iter()
            .filter_map(|r| ids::running_number(&r.row_id))
            .collect();
        numbers.sort_unstable();

        assert_eq!(numbers.len(), outcome.row_count);
        for pair in numbers.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }

        let _ = std::fs::remove_dir_all(&state.config.output_dir);
    }

    #[tokio::test]
    async fn test_second_submission_continues_form_sequence() {
        let state = test_state("sequence");
        process_submission(&state, &[entry(vec!["CS101"], "BCS")])
            .await
            .unwrap();
        let outcome = process_submission(&state, &[entry(vec!["CS102"], "BCS")])
            .await
            .unwrap();

        assert_eq!(outcome.form_ids, vec!["900002"]);

        let _ = std::fs::remove_dir_all(&state.config.output_dir);
    }
}
