/// Timetable request core: validation, date/row expansion, ID allocation
pub mod dates;
pub mod ids;

mod error;
mod expander;
mod submit;
mod types;
mod validate;

pub use error::RequestError;
pub use expander::expand_rows;
pub use submit::{process_submission, SubmissionOutcome};
pub use types::{ClassRequest, GeneratedRow, RawEntry, RecurringDateInput, WeekVenueDetail};
pub use validate::validate_entry;
