use super::classify::section_numeric_value;
use super::lines::split_sentences;
use super::segment::strip_duplicate_header;
use super::*;

use crate::model::{Page, ParsedDocument};

fn inline_profile() -> DocumentProfile {
    DocumentProfile::inline_heading().expect("inline profile compiles")
}

fn clause_profile() -> DocumentProfile {
    DocumentProfile::numbered_clause().expect("numbered-clause profile compiles")
}

fn doc(pages: Vec<(i64, &str)>) -> ParsedDocument {
    ParsedDocument {
        source_document: "pdf/Criminal Code Act 1899.json".to_string(),
        pages: pages
            .into_iter()
            .map(|(page_number, text)| Page {
                page_number,
                text: text.to_string(),
            })
            .collect(),
    }
}

#[test]
fn classify_detects_chapter_part_and_division_headings() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("Chapter 33 Offences against liberty"),
        StructuralMatch::Chapter {
            number: "33".to_string(),
            title: "Offences against liberty".to_string(),
        }
    );
    assert_eq!(
        profile.classify("Part 6 Offences relating to property"),
        StructuralMatch::Part {
            number: "6".to_string(),
            title: "Offences relating to property".to_string(),
        }
    );
    assert_eq!(
        profile.classify("Division 1 Stealing and like offences"),
        StructuralMatch::Division {
            number: "1".to_string(),
            title: "Stealing and like offences".to_string(),
        }
    );
}

#[test]
fn classify_accepts_roman_numeral_chapters() {
    let profile = clause_profile();

    assert_eq!(
        profile.classify("Chapter IV. The Judicature."),
        StructuralMatch::Chapter {
            number: "IV".to_string(),
            title: "The Judicature".to_string(),
        }
    );
}

#[test]
fn heading_title_gate_rejects_uninformative_titles() {
    let profile = inline_profile();

    // Title shorter than the informativeness floor falls through.
    assert_eq!(profile.classify("Chapter 3 The King"), StructuralMatch::Text);
    // Keyword collisions in body prose have lowercase continuations.
    assert_eq!(
        profile.classify("Chapter 12 applies to every person who commits an offence"),
        StructuralMatch::Text
    );
}

#[test]
fn heading_title_strips_trailing_page_artifact() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("Chapter 33: Offences against liberty 245"),
        StructuralMatch::Chapter {
            number: "33".to_string(),
            title: "Offences against liberty".to_string(),
        }
    );
}

#[test]
fn classify_accepts_inline_section_headers() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("354 Kidnapping"),
        StructuralMatch::Section {
            number: "354".to_string(),
            title: "Kidnapping".to_string(),
        }
    );
    assert_eq!(
        profile.classify("354A Kidnapping for ransom"),
        StructuralMatch::Section {
            number: "354A".to_string(),
            title: "Kidnapping for ransom".to_string(),
        }
    );
}

#[test]
fn classify_rejects_calendar_dates_and_boilerplate_tokens() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("15 January 2026 Schedule 1 Amendment"),
        StructuralMatch::Text
    );
    assert_eq!(
        profile.classify("3 Schedule 2 commencement provisions"),
        StructuralMatch::Text
    );
    assert_eq!(
        profile.classify("1 Contents of this compilation"),
        StructuralMatch::Text
    );
}

#[test]
fn classify_rejects_toc_rows_with_trailing_page_numbers() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("354 Kidnapping 123"),
        StructuralMatch::Text
    );
}

#[test]
fn classify_rejects_out_of_range_section_numbers() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("0 Preliminary provisions note"),
        StructuralMatch::Text
    );
}

#[test]
fn classify_detects_subsection_markers() {
    let profile = inline_profile();

    assert_eq!(
        profile.classify("(1) A person who takes another is guilty of a crime."),
        StructuralMatch::Subsection {
            number: "1".to_string(),
        }
    );
    assert_eq!(
        profile.classify("(a) the person consents"),
        StructuralMatch::Subsection {
            number: "a".to_string(),
        }
    );
}

#[test]
fn numbered_clause_profile_requires_period_after_number() {
    let clause = clause_profile();
    let inline = inline_profile();
    let line = "7. The Senate shall be composed of senators for each State";

    assert_eq!(
        clause.classify(line),
        StructuralMatch::Section {
            number: "7".to_string(),
            title: "The Senate shall be composed of senators for each State".to_string(),
        }
    );
    assert_eq!(inline.classify(line), StructuralMatch::Text);
}

#[test]
fn section_numeric_value_strips_trailing_letters() {
    assert_eq!(section_numeric_value("354"), Some(354));
    assert_eq!(section_numeric_value("354A"), Some(354));
    assert_eq!(section_numeric_value("IV"), None);
}

#[test]
fn split_lines_trims_and_drops_empty_lines() {
    let lines = split_lines("alpha\n\n  beta  \n", 300);
    assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn split_lines_resplits_overlong_lines_on_sentence_boundaries() {
    let sentence = "This is a filler sentence about statutory interpretation.";
    let long_line = vec![sentence; 7].join(" ");
    let text = format!("Header line\n{long_line}");

    let lines = split_lines(&text, 300);
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "Header line");
    assert!(lines[1..].iter().all(|line| line == sentence));
}

#[test]
fn split_lines_without_newlines_splits_on_sentences() {
    let text = "354 Kidnapping is a crime. A person who takes another commits it. (1) The penalty is ten years.";

    let lines = split_lines(text, 300);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "354 Kidnapping is a crime.");
    assert_eq!(lines[2], "(1) The penalty is ten years.");
}

#[test]
fn split_sentences_requires_capital_digit_or_paren_after_boundary() {
    assert_eq!(
        split_sentences("The act no. of parliament applies"),
        vec!["The act no. of parliament applies".to_string()]
    );
    assert_eq!(
        split_sentences("See s. 354 of the code"),
        vec!["See s.".to_string(), "354 of the code".to_string()]
    );
}

#[test]
fn toc_pages_are_detected_by_row_density_and_boilerplate() {
    let profile = inline_profile();

    let toc_page = (0..10)
        .map(|index| format!("Some lengthy entry about kidnapping offences {}", index + 10))
        .collect::<Vec<String>>()
        .join("\n");
    assert!(profile.is_toc_page(&toc_page));

    assert!(profile.is_toc_page("Queensland Criminal Code\nCompilation date: 1 July 2024"));

    assert!(!profile.is_toc_page(
        "354 Kidnapping\nA person who unlawfully confines another person commits a crime."
    ));
}

#[test]
fn single_section_page_yields_one_chunk_with_empty_breadcrumb() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 1);
    let chunk = &outcome.chunks[0];
    assert_eq!(chunk.chunk_id, "section_354");
    assert_eq!(chunk.section_number, "354");
    assert_eq!(chunk.section_title, "Kidnapping");
    assert_eq!(chunk.breadcrumb, "");
    assert_eq!(
        chunk.text,
        "A person who unlawfully confines another person commits a crime."
    );
    assert_eq!(chunk.metadata.page_start, 1);
    assert_eq!(chunk.metadata.chapter_number, None);
    assert_eq!(chunk.metadata.jurisdiction, "Queensland");
    assert_eq!(chunk.metadata.document_type, "legislation");
}

#[test]
fn breadcrumb_uses_ancestry_present_when_section_opened() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "Chapter 33 Offences against liberty\nPart 6 Offences relating to property\n354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 1);
    let chunk = &outcome.chunks[0];
    assert_eq!(
        chunk.breadcrumb,
        "Chapter 33: Offences against liberty > Part 6: Offences relating to property"
    );
    assert_eq!(chunk.metadata.chapter_number.as_deref(), Some("33"));
    assert_eq!(chunk.metadata.part_number.as_deref(), Some("6"));
    assert_eq!(chunk.metadata.division_number, None);
}

#[test]
fn opening_a_chapter_clears_part_context() {
    let profile = inline_profile();
    let input = doc(vec![
        (
            1,
            "Chapter 33 Offences against liberty\nPart 6 Offences relating to property\n354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
        ),
        (
            2,
            "Chapter 34 Offences against the person\n355 Deprivation of liberty\nA person who detains another against their will commits a misdemeanour.",
        ),
    ]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 2);
    let second = &outcome.chunks[1];
    assert_eq!(second.breadcrumb, "Chapter 34: Offences against the person");
    assert_eq!(second.metadata.chapter_number.as_deref(), Some("34"));
    assert_eq!(second.metadata.part_number, None);
    assert_eq!(second.metadata.page_start, 2);
}

#[test]
fn backward_jumping_section_numbers_are_rejected_and_audited() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "354 Kidnapping\nA person who unlawfully confines another person commits a crime.\n12 Stealing of property generally",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 1);
    assert!(outcome.chunks[0].text.contains("12 Stealing of property generally"));
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].number, "12");
    assert_eq!(outcome.rejected[0].page_number, 1);
    assert!(outcome.rejected[0].reason.contains("regresses"));
}

#[test]
fn implausible_forward_jumps_are_rejected() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "354 Kidnapping\nA person who unlawfully confines another person commits a crime.\n900 Perjury and fabrication rules",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(outcome.rejected[0].reason.contains("jumps"));
}

#[test]
fn small_numbers_may_restart_without_rejection() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "8 Application of this code\nSome body text for application.\n1 Short title of the code\nMore body text here.",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 2);
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.chunks[0].section_number, "8");
    assert_eq!(outcome.chunks[1].section_number, "1");
}

#[test]
fn section_superseded_without_body_yields_empty_chunk() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "354 Kidnapping\n355 Deprivation of liberty\nA person who detains another against their will commits a misdemeanour.",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 2);
    assert_eq!(outcome.chunks[0].text, "");
    assert!(outcome.chunks[1].text.starts_with("A person who detains"));
    assert_eq!(outcome.stats.empty_body_chunk_count, 1);
}

#[test]
fn body_lines_are_preserved_in_order() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "354 Kidnapping\n(1) First rule applies.\n(2) Second rule applies.",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(
        outcome.chunks[0].text,
        "(1) First rule applies. (2) Second rule applies."
    );
}

#[test]
fn toc_pages_are_skipped_wholesale() {
    let profile = inline_profile();
    let toc_page = (0..10)
        .map(|index| format!("Some lengthy entry about kidnapping offences {}", index + 10))
        .collect::<Vec<String>>()
        .join("\n");
    let input = doc(vec![
        (1, toc_page.as_str()),
        (
            2,
            "354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
        ),
    ]);

    let outcome = segment_document(&input, &profile, None);

    assert_eq!(outcome.stats.toc_pages_skipped, 1);
    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.chunks[0].metadata.page_start, 2);
}

#[test]
fn front_matter_before_any_section_is_dropped() {
    let profile = inline_profile();
    let input = doc(vec![(
        1,
        "An Act to establish a code of criminal law\nAssented to 28 June 1899",
    )]);

    let outcome = segment_document(&input, &profile, None);

    assert!(outcome.chunks.is_empty());
    assert_eq!(outcome.stats.sections_opened, 0);
}

#[test]
fn page_limit_truncates_the_run() {
    let profile = inline_profile();
    let input = doc(vec![
        (
            1,
            "354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
        ),
        (
            2,
            "355 Deprivation of liberty\nA person who detains another against their will commits a misdemeanour.",
        ),
    ]);

    let outcome = segment_document(&input, &profile, Some(1));

    assert_eq!(outcome.stats.pages_seen, 1);
    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.chunks[0].section_number, "354");
}

#[test]
fn segmentation_is_idempotent() {
    let profile = inline_profile();
    let input = doc(vec![
        (
            1,
            "Chapter 33 Offences against liberty\n354 Kidnapping\nA person who unlawfully confines another person commits a crime.",
        ),
        (
            2,
            "355 Deprivation of liberty\nA person who detains another against their will commits a misdemeanour.",
        ),
    ]);

    let first = segment_document(&input, &profile, None);
    let second = segment_document(&input, &profile, None);

    assert_eq!(first.chunks, second.chunks);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.rejected, second.rejected);
}

#[test]
fn duplicate_header_is_stripped_structurally() {
    assert_eq!(
        strip_duplicate_header("354 Kidnapping A person who", "354", "Kidnapping"),
        "A person who"
    );
    assert_eq!(
        strip_duplicate_header("354. Kidnapping, A person who", "354", "Kidnapping"),
        "A person who"
    );
    assert_eq!(
        strip_duplicate_header("Some unrelated body text", "354", "Kidnapping"),
        "Some unrelated body text"
    );
    assert_eq!(strip_duplicate_header("354 Kidnapping", "354", "Kidnapping"), "");
}

#[test]
fn doc_type_detection_prefers_constitution_marker() {
    assert_eq!(
        DocType::detect_from_name("pdf/Constitution.json"),
        Some(DocType::NumberedClause)
    );
    assert_eq!(
        DocType::detect_from_name("pdf/Criminal Code Act 1899.json"),
        Some(DocType::InlineHeading)
    );
    assert_eq!(DocType::detect_from_name("pdf/unknown.json"), None);
}
