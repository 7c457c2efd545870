use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedDocument {
    pub source_document: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub page_number: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub section_number: String,
    pub section_title: String,
    pub breadcrumb: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkMetadata {
    pub page_start: i64,
    pub chapter_number: Option<String>,
    pub part_number: Option<String>,
    pub division_number: Option<String>,
    pub jurisdiction: String,
    pub document_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkedDocument {
    pub source_document: String,
    pub total_chunks: usize,
    pub chunked_at: String,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceHashEntry {
    pub name: String,
    pub sha256: String,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPaths {
    pub store_root: String,
    pub parsed_namespace: String,
    pub chunks_namespace: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkCounts {
    pub parsed_docs_total: usize,
    pub processed_doc_count: usize,
    pub skipped_existing_count: usize,
    pub pages_total: usize,
    pub toc_pages_skipped: usize,
    pub lines_classified: usize,
    pub sections_opened: usize,
    pub chunks_written: usize,
    pub empty_body_chunk_count: usize,
    pub section_candidates_rejected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: ChunkPaths,
    pub counts: ChunkCounts,
    pub source_hashes: Vec<SourceHashEntry>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}
