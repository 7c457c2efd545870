use regex::Regex;
use tracing::trace;

use super::profile::DocumentProfile;

/// Structural role of one line of extracted text. Labels are mutually
/// exclusive; detection order is fixed: Chapter, Part, Division, Section,
/// Subsection, Text. Heading keywords are checked before the numeric
/// section pattern, which false-positives on dates and index rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralMatch {
    Chapter { number: String, title: String },
    Part { number: String, title: String },
    Division { number: String, title: String },
    Section { number: String, title: String },
    Subsection { number: String },
    Text,
}

const MONTHS: [&str; 12] = [
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

/// First title words that mark front-matter, index rows, and amendment
/// boilerplate rather than real section headings.
const REJECT_TOKENS: [&str; 7] = [
    "Page",
    "Contents",
    "Compilation",
    "Registered",
    "Schedule",
    "Volume",
    "Includes",
];

impl DocumentProfile {
    /// Classifies one line. Deterministic and side-effect free; unmatched or
    /// malformed input degrades to [`StructuralMatch::Text`], never an error.
    pub fn classify(&self, line: &str) -> StructuralMatch {
        let line = line.trim();
        if line.is_empty() {
            return StructuralMatch::Text;
        }

        if let Some((number, title)) = self.heading_fields(&self.chapter, line) {
            return StructuralMatch::Chapter { number, title };
        }
        if let Some((number, title)) = self.heading_fields(&self.part, line) {
            return StructuralMatch::Part { number, title };
        }
        if let Some((number, title)) = self.heading_fields(&self.division, line) {
            return StructuralMatch::Division { number, title };
        }

        if let Some(captures) = self.section.captures(line) {
            let number = captures[1].to_string();
            let title = captures[2].trim().to_string();
            if self.section_candidate_ok(&number, &title, line) {
                return StructuralMatch::Section { number, title };
            }
            trace!(line = %line, "section candidate failed validation");
        }

        if let Some(captures) = self.subsection.captures(line) {
            return StructuralMatch::Subsection {
                number: captures[1].to_string(),
            };
        }

        StructuralMatch::Text
    }

    /// Matches a Chapter/Part/Division heading and applies the title
    /// informativeness gate that rejects accidental keyword collisions in
    /// body prose ("... forms part 2 of the scheme ...").
    fn heading_fields(&self, pattern: &Regex, line: &str) -> Option<(String, String)> {
        let captures = pattern.captures(line)?;
        let number = captures[1].to_string();

        let raw_title = captures[2].trim();
        let stripped = self.trailing_page_number.replace(raw_title, "");
        let title = stripped.trim().trim_end_matches('.').trim();

        if title.chars().count() < self.min_heading_title_chars {
            return None;
        }
        if !title.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }

        Some((number, title.to_string()))
    }

    /// Secondary acceptance gate for section candidates. The raw
    /// number-plus-title pattern alone matches calendar dates, schedule
    /// references, and table-of-contents rows.
    fn section_candidate_ok(&self, number: &str, title: &str, line: &str) -> bool {
        let first_word = title
            .split_whitespace()
            .next()
            .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .unwrap_or("");
        if MONTHS.contains(&first_word) || REJECT_TOKENS.contains(&first_word) {
            return false;
        }

        let Some(value) = section_numeric_value(number) else {
            return false;
        };
        if value < self.validation.min_section_number || value > self.validation.max_section_number
        {
            return false;
        }

        let word_count = title.split_whitespace().count();
        if word_count < self.validation.min_title_words
            && line.chars().count() <= self.validation.short_line_char_floor
        {
            return false;
        }

        // A short trailing numeral marks a table-of-contents row.
        if self.trailing_page_number.is_match(line.trim_end()) {
            return false;
        }

        true
    }
}

/// Numeric value of a section number token, with any trailing letter
/// stripped: `"354A"` parses as 354.
pub(crate) fn section_numeric_value(number: &str) -> Option<i64> {
    let digits = number.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}
