use anyhow::{Context, Result};
use tracing::info;

use crate::chunker::{DocumentProfile, StructuralMatch, segment_document, split_lines};
use crate::cli::InspectArgs;
use crate::commands::doc_type_hint;
use crate::model::ParsedDocument;
use crate::store::{BlobStore, PARSED_NAMESPACE};

/// Per-line classification dump for one document. This is the working tool
/// for tuning profile patterns against a real extraction before running the
/// full pipeline.
pub fn run(args: InspectArgs) -> Result<()> {
    let store = BlobStore::open(&args.store_root)?;
    let raw = store.read(PARSED_NAMESPACE, &args.document)?;
    let parsed: ParsedDocument = serde_json::from_slice(&raw)
        .with_context(|| format!("malformed parsed document: {}", args.document))?;

    let profile = DocumentProfile::for_document(doc_type_hint(args.doc_type), &args.document)?;

    info!(
        document = %args.document,
        doc_type = profile.doc_type.as_str(),
        pages = parsed.pages.len(),
        page_limit = args.page_limit,
        "inspecting document"
    );

    for page in parsed.pages.iter().take(args.page_limit) {
        if profile.is_toc_page(&page.text) {
            info!(page = page.page_number, "table-of-contents page, would be skipped");
            continue;
        }

        for line in split_lines(&page.text, profile.long_line_resplit_chars) {
            let (role, detail) = describe(&profile.classify(&line));
            info!(page = page.page_number, role = role, detail = %detail, line = %line);
        }
    }

    let outcome = segment_document(&parsed, &profile, Some(args.page_limit));
    info!(
        chunks = outcome.chunks.len(),
        sections_opened = outcome.stats.sections_opened,
        rejected_candidates = outcome.rejected.len(),
        "segmentation over inspected pages"
    );

    for chunk in outcome.chunks.iter().take(3) {
        info!(
            chunk_id = %chunk.chunk_id,
            title = %chunk.section_title,
            breadcrumb = %chunk.breadcrumb,
            page_start = chunk.metadata.page_start,
            text_preview = %preview(&chunk.text, 120),
            "chunk"
        );
    }

    for rejection in &outcome.rejected {
        info!(
            page = rejection.page_number,
            number = %rejection.number,
            reason = %rejection.reason,
            "rejected section candidate"
        );
    }

    Ok(())
}

fn describe(matched: &StructuralMatch) -> (&'static str, String) {
    match matched {
        StructuralMatch::Chapter { number, title } => ("chapter", format!("{number}: {title}")),
        StructuralMatch::Part { number, title } => ("part", format!("{number}: {title}")),
        StructuralMatch::Division { number, title } => ("division", format!("{number}: {title}")),
        StructuralMatch::Section { number, title } => ("section", format!("{number}: {title}")),
        StructuralMatch::Subsection { number } => ("subsection", format!("({number})")),
        StructuralMatch::Text => ("text", String::new()),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
