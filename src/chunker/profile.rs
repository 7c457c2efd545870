use anyhow::{Context, Result};
use regex::Regex;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DocType {
    /// Section headers run inline into body prose: `354 Kidnapping`.
    InlineHeading,
    /// Numbered-paragraph style: `7. The Senate shall be composed ...`.
    NumberedClause,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InlineHeading => "inline-heading",
            Self::NumberedClause => "numbered-clause",
        }
    }

    /// Guesses the document style from the blob name, e.g.
    /// `pdf/Criminal Code Act 1899.json` or `pdf/Constitution.json`.
    pub fn detect_from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.contains("constitution") {
            return Some(Self::NumberedClause);
        }
        if lower.contains("code") || lower.contains("act") || lower.contains("1899") {
            return Some(Self::InlineHeading);
        }
        None
    }
}

/// Thresholds for the validated-section acceptance gate and the
/// sequencing heuristics. Tuned for Australian legislation; kept as data
/// so new document formats can swap them without touching the segmenter.
#[derive(Clone, Debug)]
pub struct SectionValidation {
    pub min_section_number: i64,
    pub max_section_number: i64,
    pub max_forward_jump: i64,
    pub backward_tolerance: i64,
    pub restart_floor: i64,
    pub min_title_words: usize,
    pub short_line_char_floor: usize,
}

impl Default for SectionValidation {
    fn default() -> Self {
        Self {
            min_section_number: 1,
            max_section_number: 10_000,
            max_forward_jump: 200,
            backward_tolerance: 5,
            restart_floor: 10,
            min_title_words: 2,
            short_line_char_floor: 12,
        }
    }
}

/// One named pattern set per known document style. All literal patterns and
/// thresholds live here; the classifier and segmenter are generic over them.
#[derive(Debug)]
pub struct DocumentProfile {
    pub doc_type: DocType,
    pub document_type_label: String,
    pub jurisdiction: String,
    pub validation: SectionValidation,
    pub toc_line_threshold: usize,
    pub long_line_resplit_chars: usize,
    pub(crate) chapter: Regex,
    pub(crate) part: Regex,
    pub(crate) division: Regex,
    pub(crate) section: Regex,
    pub(crate) subsection: Regex,
    pub(crate) trailing_page_number: Regex,
    pub(crate) min_heading_title_chars: usize,
    toc_row: Regex,
    toc_boilerplate: Regex,
}

impl DocumentProfile {
    pub fn for_doc_type(doc_type: DocType) -> Result<Self> {
        match doc_type {
            DocType::InlineHeading => Self::inline_heading(),
            DocType::NumberedClause => Self::numbered_clause(),
        }
    }

    pub fn for_document(hint: Option<DocType>, name: &str) -> Result<Self> {
        let doc_type = hint
            .or_else(|| DocType::detect_from_name(name))
            .unwrap_or(DocType::InlineHeading);
        Self::for_doc_type(doc_type)
    }

    pub fn inline_heading() -> Result<Self> {
        Self::build(
            DocType::InlineHeading,
            "legislation",
            "Queensland",
            r"^(\d{1,4}[A-Z]?)\s+([A-Z][A-Za-z0-9 ,'\-–—()]{2,120})",
        )
    }

    pub fn numbered_clause() -> Result<Self> {
        Self::build(
            DocType::NumberedClause,
            "constitution",
            "Australia",
            r"^(\d{1,4}[A-Z]?)\.\s{1,3}([A-Z][A-Za-z0-9 ,'\-–—()]{2,120})",
        )
    }

    fn build(
        doc_type: DocType,
        document_type_label: &str,
        jurisdiction: &str,
        section_pattern: &str,
    ) -> Result<Self> {
        Ok(Self {
            doc_type,
            document_type_label: document_type_label.to_string(),
            jurisdiction: jurisdiction.to_string(),
            validation: SectionValidation::default(),
            toc_line_threshold: 8,
            long_line_resplit_chars: 300,
            chapter: heading_regex("Chapter")?,
            part: heading_regex("Part")?,
            division: heading_regex("Division")?,
            section: Regex::new(section_pattern)
                .context("failed to compile section header regex")?,
            subsection: Regex::new(r"^\((\d{1,3}|[a-z])\)")
                .context("failed to compile subsection marker regex")?,
            trailing_page_number: Regex::new(r"\s\d{1,4}$")
                .context("failed to compile trailing page number regex")?,
            min_heading_title_chars: 10,
            toc_row: Regex::new(r"(?m)^.{20,}\s\d{1,3}$")
                .context("failed to compile TOC row regex")?,
            toc_boilerplate: Regex::new(r"(?i)compilation date|registered:")
                .context("failed to compile TOC boilerplate regex")?,
        })
    }

    /// Page-level pre-filter: index pages are dominated by rows that end in a
    /// short page number, or carry registration/compilation boilerplate.
    /// Such pages are skipped before any line-level classification.
    pub fn is_toc_page(&self, page_text: &str) -> bool {
        if self.toc_boilerplate.is_match(page_text) {
            return true;
        }
        self.toc_row.find_iter(page_text).count() >= self.toc_line_threshold
    }
}

fn heading_regex(keyword: &str) -> Result<Regex> {
    // Keyword match is case-insensitive; the numeral is digits with an
    // optional capital suffix, or upper-case Roman numerals.
    let pattern = format!(r"\b(?i:{keyword})\s+(\d{{1,4}}[A-Z]?|[IVXLC]+)[:.\s\-–—]+(.+)$");
    Regex::new(&pattern).with_context(|| format!("failed to compile {keyword} heading regex"))
}
