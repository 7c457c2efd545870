use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::chunker::{DocumentProfile, segment_document};
use crate::cli::ChunkArgs;
use crate::commands::doc_type_hint;
use crate::model::{
    ChunkCounts, ChunkPaths, ChunkRunManifest, ChunkedDocument, ParsedDocument, SourceHashEntry,
};
use crate::store::{BlobStore, CHUNKS_NAMESPACE, PARSED_NAMESPACE};
use crate::util::{now_utc_string, sha256_bytes, utc_compact_string, write_json_pretty};

pub fn run(args: ChunkArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let store = BlobStore::open(&args.store_root)?;
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        store
            .root()
            .join("manifests")
            .join(format!("chunk_run_{}.json", utc_compact_string(started_ts)))
    });

    info!(store_root = %args.store_root.display(), run_id = %run_id, "starting chunk run");

    let names = store.list(PARSED_NAMESPACE)?;
    let mut counts = ChunkCounts::default();
    let mut warnings = Vec::new();
    let mut source_hashes = Vec::new();

    for name in &names {
        if !name.ends_with(".json") {
            continue;
        }
        counts.parsed_docs_total += 1;

        if !args.overwrite && store.exists(CHUNKS_NAMESPACE, name) {
            debug!(name = %name, "already chunked, skipping");
            counts.skipped_existing_count += 1;
            continue;
        }

        let entry = chunk_one(&store, name, &args, &mut counts, &mut warnings)
            .with_context(|| format!("failed to chunk {name}"))?;
        source_hashes.push(entry);
    }

    let updated_at = now_utc_string();
    let manifest = ChunkRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at,
        command: render_chunk_command(&args),
        paths: ChunkPaths {
            store_root: store.root().display().to_string(),
            parsed_namespace: store.namespace_dir(PARSED_NAMESPACE).display().to_string(),
            chunks_namespace: store.namespace_dir(CHUNKS_NAMESPACE).display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: counts.clone(),
        source_hashes,
        warnings,
        notes: vec![
            "Chunking completed against the local blob store.".to_string(),
            "One chunk per accepted legislative section; TOC pages skipped wholesale.".to_string(),
        ],
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote chunk run manifest");
    info!(
        processed = counts.processed_doc_count,
        skipped = counts.skipped_existing_count,
        chunks = counts.chunks_written,
        "chunk run completed"
    );

    Ok(())
}

fn chunk_one(
    store: &BlobStore,
    name: &str,
    args: &ChunkArgs,
    counts: &mut ChunkCounts,
    warnings: &mut Vec<String>,
) -> Result<SourceHashEntry> {
    let raw = store.read(PARSED_NAMESPACE, name)?;
    let parsed: ParsedDocument = serde_json::from_slice(&raw)
        .with_context(|| format!("malformed parsed document: {name}"))?;

    let mut profile = DocumentProfile::for_document(doc_type_hint(args.doc_type), name)?;
    if let Some(jurisdiction) = &args.jurisdiction {
        profile.jurisdiction = jurisdiction.clone();
    }

    info!(
        name = %name,
        doc_type = profile.doc_type.as_str(),
        pages = parsed.pages.len(),
        "chunking document"
    );

    let outcome = segment_document(&parsed, &profile, args.max_pages_per_doc);

    for rejection in &outcome.rejected {
        warnings.push(format!(
            "{name}: rejected section candidate {} on page {}: {} (line: {})",
            rejection.number, rejection.page_number, rejection.reason, rejection.line
        ));
    }

    let chunked = ChunkedDocument {
        source_document: parsed.source_document.clone(),
        total_chunks: outcome.chunks.len(),
        chunked_at: now_utc_string(),
        chunks: outcome.chunks,
    };

    let data = serde_json::to_vec_pretty(&chunked)
        .with_context(|| format!("failed to serialize chunks for {name}"))?;
    store.write(CHUNKS_NAMESPACE, name, &data)?;

    counts.processed_doc_count += 1;
    counts.pages_total += outcome.stats.pages_seen;
    counts.toc_pages_skipped += outcome.stats.toc_pages_skipped;
    counts.lines_classified += outcome.stats.lines_classified;
    counts.sections_opened += outcome.stats.sections_opened;
    counts.chunks_written += chunked.total_chunks;
    counts.empty_body_chunk_count += outcome.stats.empty_body_chunk_count;
    counts.section_candidates_rejected += outcome.rejected.len();

    info!(
        name = %name,
        chunks = chunked.total_chunks,
        toc_pages_skipped = outcome.stats.toc_pages_skipped,
        rejected_candidates = outcome.rejected.len(),
        "wrote chunked document"
    );

    Ok(SourceHashEntry {
        name: name.to_string(),
        sha256: sha256_bytes(&raw),
        chunk_count: chunked.total_chunks,
    })
}

fn render_chunk_command(args: &ChunkArgs) -> String {
    let mut command = format!(
        "lawchunk chunk --store-root {} --doc-type {}",
        args.store_root.display(),
        args.doc_type.as_str()
    );

    if let Some(jurisdiction) = &args.jurisdiction {
        command.push_str(&format!(" --jurisdiction {jurisdiction}"));
    }
    if let Some(max_pages) = args.max_pages_per_doc {
        command.push_str(&format!(" --max-pages-per-doc {max_pages}"));
    }
    if args.overwrite {
        command.push_str(" --overwrite");
    }

    command
}
