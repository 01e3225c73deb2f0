//! Ordered token substitution for memo templates.
//!
//! The template carries its placeholders as plain words inside paragraph
//! text (`nombre`, `rfc`, `sede`, ...). Filling a document applies a fixed,
//! ordered sequence of substring replacements over each paragraph's full
//! text. Matching is deliberately not delimiter- or word-boundary-aware:
//! the existing template wording relies on plain substring semantics, so a
//! token that happens to appear inside a longer word is partially replaced.

use crate::dates;
use crate::pipeline::RunParams;
use crate::roster::PersonnelRecord;

/// The eleven template tokens, in replacement order.
pub const TOKENS: [&str; 11] = [
    "mes",
    "fecha",
    "numero_oficio",
    "nombre",
    "apellido_paterno",
    "apellido_materno",
    "rfc",
    "sede",
    "ubicacion",
    "horario",
    "comision",
];

/// The ordered token → value pairs for one record of one run.
#[derive(Debug, Clone)]
pub struct Substitutions {
    pairs: Vec<(&'static str, String)>,
}

impl Substitutions {
    /// Build the substitution set for one personnel record.
    ///
    /// `mes` receives the capitalized English month name, `fecha` the
    /// Spanish long date; the remaining tokens take the record and run
    /// parameter values verbatim.
    pub fn build(record: &PersonnelRecord, params: &RunParams) -> Self {
        let pairs = vec![
            ("mes", dates::english_month(params.commission_date).to_string()),
            ("fecha", dates::long_date_es(params.commission_date)),
            ("numero_oficio", params.office_number.clone()),
            ("nombre", record.name.clone()),
            ("apellido_paterno", record.paternal_surname.clone()),
            ("apellido_materno", record.maternal_surname.clone()),
            ("rfc", record.tax_id.clone()),
            ("sede", params.venue.clone()),
            ("ubicacion", params.location.clone()),
            ("horario", params.schedule.clone()),
            ("comision", params.assignment.clone()),
        ];
        Self { pairs }
    }

    /// Apply every replacement to a paragraph's text, in order.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, value) in &self.pairs {
            out = out.replace(token, value);
        }
        out
    }

    /// The substituted values, in token order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }
}

/// Output file name for one generated memo:
/// `oficio_<paternal_surname>_<name>.docx`, spaces in the given name
/// becoming underscores. Accents and other characters pass through verbatim.
pub fn output_file_name(record: &PersonnelRecord) -> String {
    format!(
        "oficio_{}_{}.docx",
        record.paternal_surname,
        record.name.replace(' ', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record() -> PersonnelRecord {
        PersonnelRecord {
            name: "Juan Carlos".to_string(),
            paternal_surname: "Pérez".to_string(),
            maternal_surname: "García".to_string(),
            tax_id: "ABC123".to_string(),
        }
    }

    fn sample_params() -> RunParams {
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
    fn test_apply_replaces_every_token() {
        let subs = Substitutions::build(&sample_record(), &sample_params());
        let text = TOKENS.join(" | ");
        let filled = subs.apply(&text);

        assert_eq!(
            filled,
            "September | 10 de septiembre del 2025 | 015 | Juan Carlos | \
             Pérez | García | ABC123 | Escuela A | Aula 3 | 09:00-11:00 | Supervisión"
        );
    }

    #[test]
    fn test_substring_matching_inside_longer_words() {
        let record = sample_record();
        let mut params = sample_params();
        params.commission_date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let subs = Substitutions::build(&record, &params);

        // "mesa" contains the token "mes"
        assert_eq!(subs.apply("sobre la mesa"), "sobre la Marcha");
    }

    #[test]
    fn test_conjugated_verb_collides_with_comision_token() {
        // "comisiona" contains the token "comision"; the template wording
        // contract is plain substring replacement, so the collision stands.
        let subs = Substitutions::build(&sample_record(), &sample_params());
        assert_eq!(subs.apply("Se comisiona al docente"), "Se Supervisióna al docente");
    }

    #[test]
    fn test_untouched_text_passes_through() {
        let subs = Substitutions::build(&sample_record(), &sample_params());
        assert_eq!(subs.apply("Atentamente, la Dirección"), "Atentamente, la Dirección");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(&sample_record()),
            "oficio_Pérez_Juan_Carlos.docx"
        );
    }
}
