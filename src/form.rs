//! Contracts the external form layer consumes.
//!
//! The UI itself lives outside this crate; what it needs from the core is
//! the access gate, submission validation, and the names and MIME types of
//! the two downloads it offers.

use crate::error::{Error, Result};
use crate::pipeline::RunParams;

/// Download file name for the archive of generated memos.
pub const ARCHIVE_FILE_NAME: &str = "oficios.zip";

/// Download file name for the history log.
pub const HISTORY_FILE_NAME: &str = "historial_oficios.xlsx";

/// MIME type for ZIP archives.
pub const ZIP_MIME: &str = "application/zip";

/// MIME type for .xlsx workbooks.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Check a supplied credential against the configured secret.
///
/// Plain equality, no lockout or rate limiting; a mismatch is
/// [`Error::AccessDenied`] and halts further interaction.
pub fn verify_access(supplied: &str, expected: &str) -> Result<()> {
    if supplied == expected {
        Ok(())
    } else {
        Err(Error::AccessDenied)
    }
}

/// Check that a submission can start a run.
///
/// At least one record must be selected and every shared text field must be
/// non-blank; otherwise [`Error::IncompleteFormSubmission`] names what is
/// missing and the user corrects and resubmits.
pub fn validate_submission(selection: &[usize], params: &RunParams) -> Result<()> {
    if selection.is_empty() {
        return Err(Error::IncompleteFormSubmission(
            "no records selected".to_string(),
        ));
    }

    let fields = [
        ("office number", &params.office_number),
        ("venue", &params.venue),
        ("location", &params.location),
        ("schedule", &params.schedule),
        ("assignment description", &params.assignment),
    ];
    for (label, value) in fields {
        if value.trim().is_empty() {
            return Err(Error::IncompleteFormSubmission(format!(
                "{} is blank",
                label
            )));
        }
    }

    Ok(())
}
