mod classify;
mod lines;
mod profile;
mod segment;
#[cfg(test)]
mod tests;

pub use classify::StructuralMatch;
pub use lines::split_lines;
pub use profile::{DocType, DocumentProfile, SectionValidation};
pub use segment::{RejectedSection, SegmentOutcome, SegmentStats, segment_document};
