use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::ChunkRunManifest;
use crate::store::{BlobStore, CHUNKS_NAMESPACE, PARSED_NAMESPACE};

pub fn run(args: StatusArgs) -> Result<()> {
    let store = BlobStore::open(&args.store_root)?;

    info!(store_root = %args.store_root.display(), "status requested");

    let parsed = store.list(PARSED_NAMESPACE)?;
    let chunked = store.list(CHUNKS_NAMESPACE)?;
    let pending = parsed
        .iter()
        .filter(|name| name.ends_with(".json") && !store.exists(CHUNKS_NAMESPACE, name))
        .count();

    info!(
        parsed_blobs = parsed.len(),
        chunked_blobs = chunked.len(),
        pending = pending,
        "blob store status"
    );

    match latest_manifest(&store)? {
        Some((path, manifest)) => {
            info!(
                path = %path,
                run_id = %manifest.run_id,
                status = %manifest.status,
                started_at = %manifest.started_at,
                processed = manifest.counts.processed_doc_count,
                skipped = manifest.counts.skipped_existing_count,
                chunks = manifest.counts.chunks_written,
                toc_pages_skipped = manifest.counts.toc_pages_skipped,
                rejected_candidates = manifest.counts.section_candidates_rejected,
                warnings = manifest.warnings.len(),
                "latest chunk run manifest"
            );
        }
        None => {
            warn!(store_root = %args.store_root.display(), "no chunk run manifest found");
        }
    }

    Ok(())
}

fn latest_manifest(store: &BlobStore) -> Result<Option<(String, ChunkRunManifest)>> {
    let manifest_dir = store.root().join("manifests");
    if !manifest_dir.is_dir() {
        return Ok(None);
    }

    let mut candidates = Vec::new();
    let entries = fs::read_dir(&manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("chunk_run_") && name.ends_with(".json"));
        if is_run_manifest {
            candidates.push(path);
        }
    }

    // Run manifests carry a compact UTC timestamp in the filename, so the
    // lexicographically greatest one is the most recent.
    candidates.sort();
    let Some(path) = candidates.pop() else {
        return Ok(None);
    };

    let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let manifest: ChunkRunManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(Some((path.display().to_string(), manifest)))
}
