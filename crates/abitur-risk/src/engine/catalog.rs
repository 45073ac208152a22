//! Subject-name patterns used to recognise statutory subjects.
//!
//! Matching is a case-insensitive substring test against the display name, so both German and
//! English course names are listed.

use crate::profile::{ContentArea, Subject};

pub const MATHEMATICS: &[&str] = &["mathe", "math"];

pub const NATIONAL_LANGUAGE: &[&str] = &["deutsch", "german"];

pub const FOREIGN_LANGUAGES: &[&str] = &[
    "englisch",
    "english",
    "französisch",
    "franzoesisch",
    "french",
    "latein",
    "latin",
    "spanisch",
    "spanish",
    "italienisch",
    "italian",
    "russisch",
    "russian",
    "griechisch",
    "greek",
    "chinesisch",
    "chinese",
];

pub const NATURAL_SCIENCES: &[&str] = &["biolog", "chemi", "physik", "physics"];

/// Named natural science. Sport courses never count, whatever their name.
pub fn is_named_science(subject: &Subject) -> bool {
    subject.content_area != Some(ContentArea::Sport) && subject.name_matches(NATURAL_SCIENCES)
}
