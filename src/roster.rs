//! Personnel roster loading.
//!
//! The roster is an .xlsx file with one row per person. Column headers are
//! matched case- and whitespace-insensitively: every header is trimmed and
//! upper-cased before lookup, so `" Nombre "` and `NOMBRE` are the same
//! column. No further schema validation is performed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use oficios::roster::Roster;
//!
//! let roster = Roster::load("datos/PLANTILLA.xlsx")?;
//! for index in 0..roster.len() {
//!     let record = roster.record(index)?;
//!     println!("{}", record.display_label());
//! }
//! # Ok::<(), oficios::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::xlsx;
use std::path::Path;

/// Required roster columns, by normalized header name.
const COLUMN_NAME: &str = "NOMBRE";
const COLUMN_PATERNAL: &str = "APELLIDO PATERNO";
const COLUMN_MATERNAL: &str = "APELLIDO MATERNO";
const COLUMN_TAX_ID: &str = "RFC";

/// One person from the roster.
///
/// Immutable for the duration of a run; every field is required.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonnelRecord {
    /// Given name (may contain spaces)
    pub name: String,
    /// Paternal surname
    pub paternal_surname: String,
    /// Maternal surname
    pub maternal_surname: String,
    /// Tax id (RFC)
    pub tax_id: String,
}

impl PersonnelRecord {
    /// Human-readable label for selection lists: `"<name> <paternal> <maternal>"`.
    pub fn display_label(&self) -> String {
        format!(
            "{} {} {}",
            self.name, self.paternal_surname, self.maternal_surname
        )
    }
}

/// A loaded personnel roster.
///
/// Rows are kept raw; field extraction happens per row via [`Roster::record`]
/// so that a blank cell surfaces as [`Error::RecordFieldMissing`] for the row
/// actually selected instead of failing the whole load.
#[derive(Debug)]
pub struct Roster {
    /// Normalized (trimmed, upper-cased) header row
    headers: Vec<String>,
    /// Data rows, in sheet order
    rows: Vec<Vec<String>>,
}

impl Roster {
    /// Load a roster from an .xlsx file.
    ///
    /// A missing file is [`Error::InputFileMissing`]; an empty sheet loads as
    /// a roster with zero rows.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputFileMissing(path.to_path_buf()));
        }

        let mut all_rows = xlsx::read_rows(path)?;
        if all_rows.is_empty() {
            return Ok(Self {
                headers: Vec::new(),
                rows: Vec::new(),
            });
        }

        let headers = all_rows
            .remove(0)
            .iter()
            .map(|h| h.trim().to_uppercase())
            .collect();

        Ok(Self {
            headers,
            rows: all_rows,
        })
    }

    /// Normalized column headers, in sheet order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the roster has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract one personnel record by zero-based row index.
    ///
    /// An absent column or blank required cell is
    /// [`Error::RecordFieldMissing`] naming the field and row.
    pub fn record(&self, index: usize) -> Result<PersonnelRecord> {
        let row = self.rows.get(index).ok_or_else(|| Error::Spreadsheet(
            format!("row {} out of range ({} rows)", index, self.rows.len()),
        ))?;

        Ok(PersonnelRecord {
            name: self.field(row, index, COLUMN_NAME)?,
            paternal_surname: self.field(row, index, COLUMN_PATERNAL)?,
            maternal_surname: self.field(row, index, COLUMN_MATERNAL)?,
            tax_id: self.field(row, index, COLUMN_TAX_ID)?,
        })
    }

    /// Fetch one required cell of a row by normalized column name.
    fn field(&self, row: &[String], index: usize, column: &str) -> Result<String> {
        let missing = || Error::RecordFieldMissing {
            field: column.to_string(),
            row: index,
        };

        let col_idx = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| missing())?;
        let value = row.get(col_idx).ok_or_else(|| missing())?;
        if value.trim().is_empty() {
            return Err(missing());
        }
        Ok(value.clone())
    }
}
