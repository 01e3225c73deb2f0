//! Persisted history of every memo ever generated.
//!
//! The log is a one-sheet .xlsx file. Each run reads the whole log,
//! appends one row per processed record, and rewrites the file in full.
//! The rewrite is not atomic and no lock guards it: a single writer is
//! assumed, and the last of two simultaneous writers wins.

use crate::error::Result;
use crate::roster::PersonnelRecord;
use crate::xlsx::{self, Cell};
use std::path::{Path, PathBuf};

/// Column titles of the history sheet, in order.
const HEADERS: [&str; 6] = [
    "Número Consecutivo",
    "Nombre",
    "Apellido Paterno",
    "Apellido Materno",
    "Número de Oficio",
    "Actividad",
];

/// One row of the history log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Strictly increasing sequence number, never reused across runs
    pub sequence: u64,
    /// Given name
    pub name: String,
    /// Paternal surname
    pub paternal_surname: String,
    /// Maternal surname
    pub maternal_surname: String,
    /// Office number shared by the row's run
    pub office_number: String,
    /// Assignment description shared by the row's run
    pub assignment: String,
}

/// The history log at a fixed spreadsheet path.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// A log handle for the given .xlsx path. The file need not exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the persisted log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row of the persisted log. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<HistoryRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rows = xlsx::read_rows(&self.path)?;
        if !rows.is_empty() {
            rows.remove(0); // header row
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let mut next = || cells.next().unwrap_or_default();
                HistoryRow {
                    sequence: next().parse().unwrap_or(0),
                    name: next(),
                    paternal_surname: next(),
                    maternal_surname: next(),
                    office_number: next(),
                    assignment: next(),
                }
            })
            .collect())
    }

    /// Append one row per record and persist the updated log.
    ///
    /// Sequence numbers continue from the existing row count: a log of M
    /// rows and a run of N records yields numbers `M+1 ..= M+N`, assigned
    /// in record order. Returns the rows appended by this run.
    pub fn record(
        &self,
        records: &[PersonnelRecord],
        office_number: &str,
        assignment: &str,
    ) -> Result<Vec<HistoryRow>> {
        let mut rows = self.load()?;
        let offset = rows.len() as u64;

        let appended: Vec<HistoryRow> = records
            .iter()
            .enumerate()
            .map(|(i, record)| HistoryRow {
                sequence: offset + i as u64 + 1,
                name: record.name.clone(),
                paternal_surname: record.paternal_surname.clone(),
                maternal_surname: record.maternal_surname.clone(),
                office_number: office_number.to_string(),
                assignment: assignment.to_string(),
            })
            .collect();

        rows.extend(appended.iter().cloned());
        self.write_all(&rows)?;
        Ok(appended)
    }

    /// Rewrite the whole persisted file from the given rows.
    fn write_all(&self, rows: &[HistoryRow]) -> Result<()> {
        let mut sheet: Vec<Vec<Cell>> = Vec::with_capacity(rows.len() + 1);
        sheet.push(HEADERS.iter().copied().map(Cell::text).collect());
        for row in rows {
            sheet.push(vec![
                Cell::Number(row.sequence as f64),
                Cell::text(&row.name),
                Cell::text(&row.paternal_surname),
                Cell::text(&row.maternal_surname),
                Cell::text(&row.office_number),
                Cell::text(&row.assignment),
            ]);
        }
        xlsx::write_workbook(&self.path, &sheet)
    }
}
