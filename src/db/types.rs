/// Database types for persisted submissions and generated rows

#[derive(Debug, Clone)]
pub struct DbSubmission {
    pub id: i64,
    pub form_id: String,
    pub timestamp: String,
    pub programme_code: String,
    pub generated_file_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DbGeneratedRow {
    pub id: i64,
    pub submission_id: i64,
    pub row_id: String,
    pub form_id: String,
    pub course_group_id: Option<String>,
    pub academic_session_code: Option<String>,
    pub programme_code: Option<String>,
    pub scheduled_date: Option<String>,
    pub duration: Option<i64>,
    pub activity_code: Option<String>,
    pub group_capacity: Option<i64>,
    pub total_capacity: Option<i64>,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub group_code: Option<String>,
    pub faculty_code: Option<String>,
    pub faculty_code_2: Option<String>,
    pub special_room_code: Option<String>,
    pub recurring_until_week: Option<i64>,
}
