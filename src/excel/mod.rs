//! XLSX serialization of generated schedule rows.

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::timetable::{GeneratedRow, RequestError};

/// Worksheet name expected by the downstream timetabling import.
pub const SHEET_NAME: &str = "Pre-DTCT";

/// Column order is part of the artifact contract; downstream importers read
/// by position, not by header text.
pub const HEADERS: [&str; 17] = [
    "ID",
    "FormID",
    "CourseGroupID",
    "AcademicSessionCode",
    "ProgrammeCode",
    "ScheduledDate",
    "Duration",
    "ActivityCode",
    "GroupCapacity",
    "TotalCapacity",
    "CourseCode",
    "CourseName",
    "GroupCode",
    "FacultyCode",
    "FacultyCode2",
    "SpecialRoomCode",
    "RecurringUntilWeek",
];

/// Renders the rows to an XLSX workbook in memory.
pub fn render_workbook(rows: &[GeneratedRow]) -> Result<Vec<u8>, RequestError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        sheet.write(r, 0, &row.row_id)?;
        sheet.write(r, 1, &row.form_id)?;
        sheet.write(r, 2, &row.course_group_id)?;
        sheet.write(r, 3, &row.academic_session_code)?;
        sheet.write(r, 4, &row.programme_code)?;
        sheet.write(r, 5, &row.scheduled_date)?;
        sheet.write(r, 6, row.duration)?;
        sheet.write(r, 7, &row.activity_code)?;
        sheet.write(r, 8, row.group_capacity)?;
        sheet.write(r, 9, row.total_capacity)?;
        sheet.write(r, 10, &row.course_code)?;
        sheet.write(r, 11, &row.course_name)?;
        sheet.write(r, 12, &row.group_code)?;
        sheet.write(r, 13, &row.faculty_code)?;
        sheet.write(r, 14, &row.faculty_code_2)?;
        sheet.write(r, 15, &row.special_room_code)?;
        sheet.write(r, 16, row.recurring_until_week)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Renders the rows and writes the workbook to `path`.
pub fn write_workbook_file(path: &Path, rows: &[GeneratedRow]) -> Result<(), RequestError> {
    let buffer = render_workbook(rows)?;
    std::fs::write(path, buffer)?;
    Ok(())
}
