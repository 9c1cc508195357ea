/// Database module for managing form submissions and their generated rows

mod types;

pub use types::{DbGeneratedRow, DbSubmission};

use rusqlite::{Connection, Result};
use std::sync::Mutex;

use crate::timetable::ids;
use crate::timetable::GeneratedRow;

const SCHEMA_SQL: &str = include_str!("../../sql/init_predtct.sql");

pub struct FormsDbManager {
    db: Mutex<Connection>,
}

impl FormsDbManager {
    /// Creates a new FormsDbManager and initializes the database schema
    pub fn new(db_path: &str) -> Self {
        let conn = Connection::open(db_path).expect("Failed to open database");

        // Initialize schema
        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");

        Self {
            db: Mutex::new(conn),
        }
    }

    /// Returns the last used form ID as an integer.
    ///
    /// Defaults to the base value when no submissions exist or the stored
    /// value does not parse.
    pub fn last_form_id(&self) -> Result<i64> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT form_id FROM form_submissions
             ORDER BY CAST(form_id AS INTEGER) DESC LIMIT 1",
        )?;

        let last: Option<String> = stmt.query_row([], |row| row.get(0)).ok();

        Ok(last
            .and_then(|form_id| form_id.parse().ok())
            .unwrap_or(ids::FORM_ID_BASE))
    }

    /// Returns the last running number used within a row-ID time bucket.
    ///
    /// Defaults to the base value when the bucket has no rows or the suffix
    /// does not parse.
    pub fn last_row_running(&self, prefix: &str) -> Result<i64> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT row_id FROM generated_rows
             WHERE row_id LIKE ?1 ORDER BY row_id DESC LIMIT 1",
        )?;

        let last: Option<String> = stmt
            .query_row([format!("{prefix}%")], |row| row.get(0))
            .ok();

        Ok(last
            .and_then(|row_id| ids::running_number(&row_id))
            .unwrap_or(ids::ROW_RUNNING_BASE))
    }

    /// Persists a whole submission batch in one transaction.
    ///
    /// Creates one submission record per form ID and attaches each generated
    /// row to its owning submission. Nothing is committed if any insert
    /// fails.
    pub fn insert_generated(
        &self,
        form_ids: &[String],
        timestamp: &str,
        programme_code: &str,
        generated_file_path: &str,
        rows: &[GeneratedRow],
    ) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;

        for form_id in form_ids {
            tx.execute(
                "INSERT INTO form_submissions (form_id, timestamp, programme_code, generated_file_path)
                 VALUES (?1, ?2, ?3, ?4)",
                (form_id, timestamp, programme_code, generated_file_path),
            )?;

            let submission_id = tx.last_insert_rowid();

            for row in rows.iter().filter(|row| &row.form_id == form_id) {
                tx.execute(
                    "INSERT INTO generated_rows (
                        submission_id, row_id, form_id, course_group_id,
                        academic_session_code, programme_code, scheduled_date,
                        duration, activity_code, group_capacity, total_capacity,
                        course_code, course_name, group_code, faculty_code,
                        faculty_code_2, special_room_code, recurring_until_week
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                    rusqlite::params![
                        submission_id,
                        &row.row_id,
                        &row.form_id,
                        &row.course_group_id,
                        &row.academic_session_code,
                        &row.programme_code,
                        &row.scheduled_date,
                        row.duration,
                        &row.activity_code,
                        row.group_capacity,
                        row.total_capacity,
                        &row.course_code,
                        &row.course_name,
                        &row.group_code,
                        &row.faculty_code,
                        &row.faculty_code_2,
                        &row.special_room_code,
                        row.recurring_until_week,
                    ],
                )?;
            }
        }

        tx.commit()
    }

    /// Gets a submission record by its form ID
    pub fn get_submission(&self, form_id: &str) -> Result<Option<DbSubmission>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, form_id, timestamp, programme_code, generated_file_path
             FROM form_submissions WHERE form_id = ?1",
        )?;

        let submission = stmt
            .query_row([form_id], |row| {
                Ok(DbSubmission {
                    id: row.get(0)?,
                    form_id: row.get(1)?,
                    timestamp: row.get(2)?,
                    programme_code: row.get(3)?,
                    generated_file_path: row.get(4)?,
                })
            })
            .ok();

        Ok(submission)
    }

    /// Gets all persisted rows belonging to one form ID
    pub fn get_rows_for_form(&self, form_id: &str) -> Result<Vec<DbGeneratedRow>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, submission_id, row_id, form_id, course_group_id,
                    academic_session_code, programme_code, scheduled_date,
                    duration, activity_code, group_capacity, total_capacity,
                    course_code, course_name, group_code, faculty_code,
                    faculty_code_2, special_room_code, recurring_until_week
             FROM generated_rows WHERE form_id = ?1 ORDER BY row_id",
        )?;

        let rows = stmt.query_map([form_id], |row| {
            Ok(DbGeneratedRow {
                id: row.get(0)?,
                submission_id: row.get(1)?,
                row_id: row.get(2)?,
                form_id: row.get(3)?,
                course_group_id: row.get(4)?,
                academic_session_code: row.get(5)?,
                programme_code: row.get(6)?,
                scheduled_date: row.get(7)?,
                duration: row.get(8)?,
                activity_code: row.get(9)?,
                group_capacity: row.get(10)?,
                total_capacity: row.get(11)?,
                course_code: row.get(12)?,
                course_name: row.get(13)?,
                group_code: row.get(14)?,
                faculty_code: row.get(15)?,
                faculty_code_2: row.get(16)?,
                special_room_code: row.get(17)?,
                recurring_until_week: row.get(18)?,
            })
        })?;

        rows.collect()
    }

    /// Deletes a submission; its generated rows go with it (cascade)
    pub fn delete_submission(&self, form_id: &str) -> Result<usize> {
        let db = self.db.lock().unwrap();
        db.execute(
            "DELETE FROM form_submissions WHERE form_id = ?1",
            [form_id],
        )
    }

    /// Total number of persisted generated rows
    pub fn row_count(&self) -> Result<i64> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare("SELECT COUNT(*) FROM generated_rows")?;
        stmt.query_row([], |row| row.get(0))
    }
}
