//! Unified error types for the oficio generator.
//!
//! One enum covers the whole pipeline, from the form-level gate through
//! document filling, archiving, and the history log, presenting a consistent
//! API to users.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for generator operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Supplied access credential does not match the configured secret
    #[error("Access denied")]
    AccessDenied,

    /// Personnel roster spreadsheet is absent
    #[error("Input file missing: {}", .0.display())]
    InputFileMissing(PathBuf),

    /// Template document path is inaccessible
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template package exists but is not a usable Word document
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// A required record field is absent or blank
    #[error("Record field missing: {field} (row {row})")]
    RecordFieldMissing { field: String, row: usize },

    /// A generated file disappeared before it could be archived
    #[error("File unavailable: {}", .0.display())]
    FileUnavailable(PathBuf),

    /// Submission lacks a selection or leaves a shared field blank
    #[error("Incomplete form submission: {0}")]
    IncompleteFormSubmission(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Spreadsheet read error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
