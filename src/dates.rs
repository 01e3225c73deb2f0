//! Spanish month localization for commission dates.
//!
//! The generated memos spell dates out in Spanish (`"7 de marzo del 2025"`)
//! while one template token expects the capitalized English month name.
//! Uses `phf` for a zero-cost compile-time lookup table.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oficios::dates::{english_month, long_date_es};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
//! assert_eq!(english_month(date), "March");
//! assert_eq!(long_date_es(date), "7 de marzo del 2025");
//! ```

use chrono::{Datelike, NaiveDate};
use phf::phf_map;

/// English month name to its Spanish equivalent.
///
/// Exhaustive over the twelve calendar months; there is no error case.
pub static SPANISH_MONTHS: phf::Map<&'static str, &'static str> = phf_map! {
    "January" => "enero",
    "February" => "febrero",
    "March" => "marzo",
    "April" => "abril",
    "May" => "mayo",
    "June" => "junio",
    "July" => "julio",
    "August" => "agosto",
    "September" => "septiembre",
    "October" => "octubre",
    "November" => "noviembre",
    "December" => "diciembre",
};

/// Capitalized English month names indexed by zero-based month.
const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Spanish month names indexed by zero-based month.
const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Capitalized English month name for a date.
#[inline]
pub fn english_month(date: NaiveDate) -> &'static str {
    // month0 is always in 0..12
    MONTHS_EN[date.month0() as usize]
}

/// Spanish month name for a date.
#[inline]
pub fn spanish_month(date: NaiveDate) -> &'static str {
    MONTHS_ES[date.month0() as usize]
}

/// Render a date the way the memo body spells it: `"<day> de <month> del <year>"`.
pub fn long_date_es(date: NaiveDate) -> String {
    format!(
        "{} de {} del {}",
        date.day(),
        spanish_month(date),
        date.year()
    )
}
