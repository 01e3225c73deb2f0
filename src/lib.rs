//! Oficios - generation of official memo Word documents from personnel rosters
//!
//! This library fills a .docx memo template once per selected person of an
//! .xlsx roster, bundles the generated documents into a downloadable ZIP,
//! and appends one row per document to a persisted .xlsx history log with
//! strictly increasing sequence numbers.
//!
//! # Features
//!
//! - **Template filling**: ordered substring substitution over each
//!   paragraph's full text, preserving paragraph properties
//! - **Spanish dates**: commission dates rendered as `"7 de marzo del 2025"`
//! - **In-memory archiving**: one deflated ZIP of all generated memos
//! - **History log**: cumulative record of every memo ever generated
//! - **Form contracts**: access gate, submission validation, and download
//!   names/MIME types for an external UI layer
//!
//! # Example - One full run
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use oficios::{Generator, GeneratorConfig, RunParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(GeneratorConfig {
//!     template_path: "plantillas/oficio.docx".into(),
//!     roster_path: "datos/PLANTILLA.xlsx".into(),
//!     history_path: "historial_oficios.xlsx".into(),
//!     output_root: std::env::temp_dir(),
//! });
//!
//! let output = generator.run(
//!     &[0, 1],
//!     &RunParams {
//!         office_number: "015".into(),
//!         venue: "Escuela A".into(),
//!         location: "Aula 3".into(),
//!         commission_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
//!         schedule: "09:00-11:00".into(),
//!         assignment: "Supervisión".into(),
//!     },
//! )?;
//!
//! // output.archive is ready to serve as oficios.zip
//! for row in &output.history_rows {
//!     println!("{}: {} {}", row.sequence, row.name, row.paternal_surname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Inspecting a roster
//!
//! ```no_run
//! use oficios::roster::Roster;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let roster = Roster::load("datos/PLANTILLA.xlsx")?;
//! println!("columnas detectadas: {:?}", roster.headers());
//! for index in 0..roster.len() {
//!     println!("{}", roster.record(index)?.display_label());
//! }
//! # Ok(())
//! # }
//! ```

/// Bundling generated memos into one downloadable ZIP archive.
pub mod archive;

/// Spanish month localization for commission dates.
pub mod dates;

/// Template .docx loading, paragraph rewriting, and serialization.
pub mod docx;

/// Unified error types.
pub mod error;

/// Contracts consumed by the external form layer.
pub mod form;

/// The persisted history log of generated memos.
pub mod history;

/// The synchronous generation pipeline.
pub mod pipeline;

/// Personnel roster loading.
pub mod roster;

/// Minimal SpreadsheetML reading and writing shared by roster and history.
pub mod xlsx;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use history::{HistoryLog, HistoryRow};
pub use pipeline::{Generator, GeneratorConfig, RunOutput, RunParams};
pub use roster::{PersonnelRecord, Roster};
