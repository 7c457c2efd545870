use tracing::debug;

use crate::model::{Chunk, ChunkMetadata, ParsedDocument};

use super::classify::{StructuralMatch, section_numeric_value};
use super::lines::split_lines;
use super::profile::DocumentProfile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeadingRef {
    pub number: String,
    pub title: String,
}

/// Currently open chapter/part/division. Carried forward across pages and
/// sections until explicitly overridden; never reset at chunk emission.
/// Opening a chapter clears part and division; opening a part clears
/// division.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct HierarchyContext {
    pub chapter: Option<HeadingRef>,
    pub part: Option<HeadingRef>,
    pub division: Option<HeadingRef>,
}

impl HierarchyContext {
    pub(crate) fn breadcrumb(&self) -> String {
        let mut parts = Vec::new();
        if let Some(chapter) = &self.chapter {
            parts.push(format!("Chapter {}: {}", chapter.number, chapter.title));
        }
        if let Some(part) = &self.part {
            parts.push(format!("Part {}: {}", part.number, part.title));
        }
        if let Some(division) = &self.division {
            parts.push(format!("Division {}: {}", division.number, division.title));
        }
        parts.join(" > ")
    }
}

/// The section currently accumulating body text. Ancestry is snapshotted at
/// open time, so later context changes cannot leak into an earlier chunk.
struct OpenSection {
    number: String,
    title: String,
    start_page: i64,
    breadcrumb: String,
    chapter_number: Option<String>,
    part_number: Option<String>,
    division_number: Option<String>,
    buffer: Vec<String>,
}

/// A section candidate the sequencing heuristics refused. Kept for audit
/// instead of being silently dropped; the candidate's line degrades to body
/// text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedSection {
    pub page_number: i64,
    pub number: String,
    pub line: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub pages_seen: usize,
    pub toc_pages_skipped: usize,
    pub lines_classified: usize,
    pub sections_opened: usize,
    pub empty_body_chunk_count: usize,
}

pub struct SegmentOutcome {
    pub chunks: Vec<Chunk>,
    pub stats: SegmentStats,
    pub rejected: Vec<RejectedSection>,
}

/// Walks the document's pages in the order given, classifies every line, and
/// emits one chunk per accepted section. Pure in-memory transformation: no
/// I/O, never fails, zero chunks is valid output.
pub fn segment_document(
    doc: &ParsedDocument,
    profile: &DocumentProfile,
    max_pages: Option<usize>,
) -> SegmentOutcome {
    let mut segmenter = Segmenter::new(profile);
    let page_limit = max_pages.unwrap_or(usize::MAX);

    for page in doc.pages.iter().take(page_limit) {
        segmenter.stats.pages_seen += 1;

        if profile.is_toc_page(&page.text) {
            segmenter.stats.toc_pages_skipped += 1;
            debug!(page = page.page_number, "skipped table-of-contents page");
            continue;
        }

        for line in split_lines(&page.text, profile.long_line_resplit_chars) {
            segmenter.stats.lines_classified += 1;
            segmenter.handle_line(page.page_number, &line);
        }
    }

    segmenter.finish()
}

struct Segmenter<'a> {
    profile: &'a DocumentProfile,
    context: HierarchyContext,
    open: Option<OpenSection>,
    last_accepted: Option<i64>,
    chunks: Vec<Chunk>,
    stats: SegmentStats,
    rejected: Vec<RejectedSection>,
}

impl<'a> Segmenter<'a> {
    fn new(profile: &'a DocumentProfile) -> Self {
        Self {
            profile,
            context: HierarchyContext::default(),
            open: None,
            last_accepted: None,
            chunks: Vec::new(),
            stats: SegmentStats::default(),
            rejected: Vec::new(),
        }
    }

    fn handle_line(&mut self, page_number: i64, line: &str) {
        match self.profile.classify(line) {
            StructuralMatch::Chapter { number, title } => {
                self.flush_open();
                self.context.chapter = Some(HeadingRef { number, title });
                self.context.part = None;
                self.context.division = None;
            }
            StructuralMatch::Part { number, title } => {
                self.flush_open();
                self.context.part = Some(HeadingRef { number, title });
                self.context.division = None;
            }
            StructuralMatch::Division { number, title } => {
                self.flush_open();
                self.context.division = Some(HeadingRef { number, title });
            }
            StructuralMatch::Section { number, title } => {
                self.open_section(page_number, line, number, title);
            }
            StructuralMatch::Subsection { .. } | StructuralMatch::Text => {
                if let Some(open) = self.open.as_mut() {
                    open.buffer.push(line.to_string());
                }
            }
        }
    }

    fn open_section(&mut self, page_number: i64, line: &str, number: String, title: String) {
        let Some(value) = section_numeric_value(&number) else {
            // The validation gate guarantees a parseable number; anything
            // else degrades to body text.
            self.append_body(line);
            return;
        };

        if let Some(reason) = self.sequencing_rejection(value) {
            debug!(
                page = page_number,
                number = %number,
                reason = %reason,
                "rejected section candidate"
            );
            self.rejected.push(RejectedSection {
                page_number,
                number,
                line: line.to_string(),
                reason,
            });
            self.append_body(line);
            return;
        }

        self.flush_open();

        self.open = Some(OpenSection {
            breadcrumb: self.context.breadcrumb(),
            chapter_number: self.context.chapter.as_ref().map(|c| c.number.clone()),
            part_number: self.context.part.as_ref().map(|p| p.number.clone()),
            division_number: self.context.division.as_ref().map(|d| d.number.clone()),
            number,
            title,
            start_page: page_number,
            // The header line stays in the buffer so flush-time
            // de-duplication can compare against it.
            buffer: vec![line.to_string()],
        });
        self.last_accepted = Some(value);
        self.stats.sections_opened += 1;
    }

    /// Heuristic safety net against TOC leftovers and stray numerals: a
    /// section number that regresses past the tolerance (once numbering is
    /// clearly under way) or jumps forward implausibly is not accepted.
    fn sequencing_rejection(&self, value: i64) -> Option<String> {
        let prev = self.last_accepted?;
        let rules = &self.profile.validation;

        if value < prev - rules.backward_tolerance && prev > rules.restart_floor {
            return Some(format!("section number {value} regresses from {prev}"));
        }
        if value > prev + rules.max_forward_jump {
            return Some(format!(
                "section number {value} jumps from {prev} by more than {}",
                rules.max_forward_jump
            ));
        }
        None
    }

    fn append_body(&mut self, line: &str) {
        if let Some(open) = self.open.as_mut() {
            open.buffer.push(line.to_string());
        }
    }

    fn flush_open(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };

        let joined = open.buffer.join(" ");
        let text = strip_duplicate_header(&joined, &open.number, &open.title);
        if text.is_empty() {
            self.stats.empty_body_chunk_count += 1;
        }

        self.chunks.push(Chunk {
            chunk_id: format!("section_{}", open.number),
            section_number: open.number,
            section_title: open.title,
            breadcrumb: open.breadcrumb,
            text,
            metadata: ChunkMetadata {
                page_start: open.start_page,
                chapter_number: open.chapter_number,
                part_number: open.part_number,
                division_number: open.division_number,
                jurisdiction: self.profile.jurisdiction.clone(),
                document_type: self.profile.document_type_label.clone(),
            },
        });
    }

    fn finish(mut self) -> SegmentOutcome {
        self.flush_open();
        SegmentOutcome {
            chunks: self.chunks,
            stats: self.stats,
            rejected: self.rejected,
        }
    }
}

/// Removes the section's own header from the front of the joined body text,
/// so it does not appear twice (once as metadata, once inline). This is a
/// structural token comparison against the section's number and title,
/// insensitive to punctuation, not a literal string match.
pub(crate) fn strip_duplicate_header(joined: &str, number: &str, title: &str) -> String {
    let mut expected: Vec<String> = Vec::new();
    expected.push(normalize_token(number));
    expected.extend(title.split_whitespace().map(normalize_token));
    expected.retain(|token| !token.is_empty());

    let tokens: Vec<&str> = joined.split_whitespace().collect();
    if expected.is_empty() || tokens.len() < expected.len() {
        return joined.trim().to_string();
    }

    let header_present = expected
        .iter()
        .zip(tokens.iter())
        .all(|(want, have)| *want == normalize_token(have));

    if header_present {
        tokens[expected.len()..].join(" ")
    } else {
        joined.trim().to_string()
    }
}

fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_ascii_lowercase()
}
