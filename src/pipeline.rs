//! The generation pipeline.
//!
//! One [`Generator::run`] call takes a roster selection plus the shared run
//! parameters and produces the generated documents, the downloadable
//! archive, and the appended history rows — synchronously, with no UI
//! involvement. All paths come in through [`GeneratorConfig`]; there are no
//! process-wide constants.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use oficios::{Generator, GeneratorConfig, RunParams};
//!
//! let generator = Generator::new(GeneratorConfig {
//!     template_path: "plantillas/oficio.docx".into(),
//!     roster_path: "datos/PLANTILLA.xlsx".into(),
//!     history_path: "historial_oficios.xlsx".into(),
//!     output_root: std::env::temp_dir(),
//! });
//!
//! let output = generator.run(
//!     &[0, 3],
//!     &RunParams {
//!         office_number: "015".into(),
//!         venue: "Escuela A".into(),
//!         location: "Aula 3".into(),
//!         commission_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
//!         schedule: "09:00-11:00".into(),
//!         assignment: "Supervisión".into(),
//!     },
//! )?;
//! println!("{} oficios generados", output.documents.len());
//! # Ok::<(), oficios::Error>(())
//! ```

use crate::archive;
use crate::docx::TemplateDocument;
use crate::docx::fill::{Substitutions, output_file_name};
use crate::error::Result;
use crate::form;
use crate::history::{HistoryLog, HistoryRow};
use crate::roster::{PersonnelRecord, Roster};
use chrono::Local;
use std::io::Cursor;
use std::path::PathBuf;

/// Where the generator finds its inputs and leaves its outputs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// The memo template .docx
    pub template_path: PathBuf,
    /// The personnel roster .xlsx
    pub roster_path: PathBuf,
    /// The persisted history log .xlsx
    pub history_path: PathBuf,
    /// Parent directory for per-run output folders
    pub output_root: PathBuf,
}

/// User-supplied values shared by every record of one run.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Office number stamped on every memo of the run
    pub office_number: String,
    /// Venue (sede)
    pub venue: String,
    /// Location within the venue (ubicación)
    pub location: String,
    /// Commission date
    pub commission_date: chrono::NaiveDate,
    /// Schedule (horario)
    pub schedule: String,
    /// Assignment description (comisión)
    pub assignment: String,
}

/// Everything one run produces.
#[derive(Debug)]
pub struct RunOutput {
    /// Paths of the generated documents, in record order
    pub documents: Vec<PathBuf>,
    /// In-memory ZIP of the generated documents, positioned at the start
    pub archive: Cursor<Vec<u8>>,
    /// History rows appended by this run
    pub history_rows: Vec<HistoryRow>,
}

/// The memo generator.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// A generator over the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Execute one run over the selected roster rows.
    ///
    /// The pipeline validates the submission, loads the roster, fills one
    /// document per selected record (reopening the template each time),
    /// archives the documents, and appends to the history log. The first
    /// error aborts the run; nothing is retried.
    pub fn run(&self, selection: &[usize], params: &RunParams) -> Result<RunOutput> {
        form::validate_submission(selection, params)?;

        let roster = Roster::load(&self.config.roster_path)?;
        let records: Vec<PersonnelRecord> = selection
            .iter()
            .map(|&index| roster.record(index))
            .collect::<Result<_>>()?;

        let output_dir = self.run_output_dir();
        std::fs::create_dir_all(&output_dir)?;

        let mut documents = Vec::with_capacity(records.len());
        for record in &records {
            let mut doc = TemplateDocument::open(&self.config.template_path)?;
            doc.fill(&Substitutions::build(record, params))?;

            let path = output_dir.join(output_file_name(record));
            doc.save_to(&path)?;
            documents.push(path);
        }

        let archive = archive::archive_files(&documents)?;

        let history_rows = HistoryLog::new(&self.config.history_path).record(
            &records,
            &params.office_number,
            &params.assignment,
        )?;

        Ok(RunOutput {
            documents,
            archive,
            history_rows,
        })
    }

    /// Raw bytes of the history file for download, if it exists yet.
    pub fn history_bytes(&self) -> Result<Option<Vec<u8>>> {
        if !self.config.history_path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(&self.config.history_path)?))
    }

    /// The roster this generator reads from.
    pub fn roster(&self) -> Result<Roster> {
        Roster::load(&self.config.roster_path)
    }

    /// Fresh per-run output directory path.
    ///
    /// The timestamp alone has one-second resolution; the random suffix
    /// keeps two runs started within the same second apart.
    fn run_output_dir(&self) -> PathBuf {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let suffix: u32 = rand::random();
        self.config
            .output_root
            .join(format!("Oficios_{}_{:08x}", timestamp, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::testdoc;
    use crate::error::Error;
    use crate::xlsx::{self, Cell};
    use chrono::NaiveDate;
    use std::io::Read;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::read::ZipArchive;

    const TEMPLATE_PARAGRAPHS: [&str; 4] = [
        "Oficio No. numero_oficio",
        "mes de emisión, fecha",
        "Se designa a nombre apellido_paterno apellido_materno, RFC rfc,",
        "en sede, ubicacion, horario horario, para comision.",
    ];

    fn setup(dir: &Path) -> Generator {
        let template_path = dir.join("plantilla.docx");
        std::fs::write(
            &template_path,
            testdoc::docx_with_paragraphs(&TEMPLATE_PARAGRAPHS),
        )
        .unwrap();

        let roster_path = dir.join("PLANTILLA.xlsx");
        let sheet: Vec<Vec<Cell>> = vec![
            ["NOMBRE", "APELLIDO PATERNO", "APELLIDO MATERNO", "RFC"]
                .map(Cell::text)
                .to_vec(),
            ["Juan", "Pérez", "García", "ABC123"].map(Cell::text).to_vec(),
            ["Ana", "López", "Díaz", "XYZ789"].map(Cell::text).to_vec(),
        ];
        xlsx::write_workbook(&roster_path, &sheet).unwrap();

        Generator::new(GeneratorConfig {
            template_path,
            roster_path,
            history_path: dir.join("historial_oficios.xlsx"),
            output_root: dir.join("salida"),
        })
    }

    fn params() -> RunParams {
        RunParams {
            office_number: "015".to_string(),
            venue: "Escuela A".to_string(),
            location: "Aula 3".to_string(),
            commission_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            schedule: "09:00-11:00".to_string(),
            assignment: "Supervisión".to_string(),
        }
    }

    #[test]
    fn test_end_to_end_run() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        let roster = generator.roster().unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.record(0).unwrap().display_label(), "Juan Pérez García");

        let output = generator.run(&[0, 1], &params()).unwrap();

        // One document per selected record, named by surname and given name
        assert_eq!(output.documents.len(), 2);
        let names: Vec<&str> = output
            .documents
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["oficio_Pérez_Juan.docx", "oficio_López_Ana.docx"]);

        // Documents carry the substituted values
        let doc = TemplateDocument::open(&output.documents[1]).unwrap();
        let texts = doc.paragraph_texts().unwrap();
        assert_eq!(texts[0], "Oficio No. 015");
        assert_eq!(texts[1], "September de emisión, 10 de septiembre del 2025");
        assert_eq!(texts[2], "Se designa a Ana López Díaz, RFC XYZ789,");
        assert_eq!(
            texts[3],
            "en Escuela A, Aula 3, 09:00-11:00 09:00-11:00, para Supervisión."
        );

        // Archive holds both documents under base names, exact bytes
        let mut archive = ZipArchive::new(output.archive).unwrap();
        assert_eq!(archive.len(), 2);
        for path in &output.documents {
            let name = path.file_name().unwrap().to_str().unwrap();
            let mut entry = archive.by_name(name).unwrap();
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            assert_eq!(bytes, std::fs::read(path).unwrap());
        }

        // History starts at 1 on a fresh log
        assert_eq!(output.history_rows.len(), 2);
        assert_eq!(output.history_rows[0].sequence, 1);
        assert_eq!(output.history_rows[1].sequence, 2);
        assert!(generator.history_bytes().unwrap().is_some());
    }

    #[test]
    fn test_history_continues_across_runs() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        generator.run(&[0, 1], &params()).unwrap();
        let second = generator.run(&[0], &params()).unwrap();

        assert_eq!(second.history_rows[0].sequence, 3);
        let all = HistoryLog::new(dir.path().join("historial_oficios.xlsx"))
            .load()
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_runs_use_distinct_output_dirs() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        let first = generator.run(&[0], &params()).unwrap();
        let second = generator.run(&[0], &params()).unwrap();

        assert_ne!(
            first.documents[0].parent().unwrap(),
            second.documents[0].parent().unwrap()
        );
        // Both documents still exist under their own run folder
        assert!(first.documents[0].exists());
        assert!(second.documents[0].exists());
    }

    #[test]
    fn test_empty_selection_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        let err = generator.run(&[], &params()).unwrap_err();
        assert!(matches!(err, Error::IncompleteFormSubmission(_)));
        assert!(generator.history_bytes().unwrap().is_none());
    }

    #[test]
    fn test_blank_field_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        let mut incomplete = params();
        incomplete.venue = String::new();
        let err = generator.run(&[0], &incomplete).unwrap_err();
        assert!(matches!(err, Error::IncompleteFormSubmission(_)));
        assert!(generator.history_bytes().unwrap().is_none());
    }

    #[test]
    fn test_missing_roster_aborts() {
        let dir = TempDir::new().unwrap();
        let mut generator = setup(dir.path());
        generator.config.roster_path = dir.path().join("ausente.xlsx");

        let err = generator.run(&[0], &params()).unwrap_err();
        assert!(matches!(err, Error::InputFileMissing(_)));
    }

    #[test]
    fn test_missing_template_aborts_before_history() {
        let dir = TempDir::new().unwrap();
        let mut generator = setup(dir.path());
        generator.config.template_path = dir.path().join("ausente.docx");

        let err = generator.run(&[0], &params()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(_)));
        assert!(generator.history_bytes().unwrap().is_none());
    }

    #[test]
    fn test_identical_runs_produce_identical_document_bytes() {
        let dir = TempDir::new().unwrap();
        let generator = setup(dir.path());

        let first = generator.run(&[0], &params()).unwrap();
        let second = generator.run(&[0], &params()).unwrap();

        assert_eq!(
            std::fs::read(&first.documents[0]).unwrap(),
            std::fs::read(&second.documents[0]).unwrap()
        );
    }
}
