//! Integration test for the audit pipeline against reference scenarios
//!
//! Exercises classification, page resolution, and report assembly
//! through the public library API, the same code paths the binaries
//! use, with hand-checked expected report rows.

use std::collections::HashMap;

use docx_link_manager::audit::{
    assemble, classify, resolve_pages, AuditConfig, Category, HyperlinkRecord, PageRef, PageText,
};
use docx_link_manager::docx::DocxRefs;
use docx_link_manager::pipeline::build_classified;

fn record(target: &str, display_text: &str, extraction_order: usize) -> HyperlinkRecord {
    HyperlinkRecord {
        target: target.to_string(),
        display_text: display_text.to_string(),
        extraction_order,
    }
}

fn page(page_number: u32, text: &str) -> PageText {
    PageText {
        page_number,
        text: text.to_string(),
    }
}

/// Reference document: three links, one bookmark, three pages.
fn reference_refs() -> DocxRefs {
    DocxRefs {
        links: vec![
            record("http://example.com", "Example site", 0),
            record("#intro", "back to intro", 1),
            record("#missing", "broken ref", 2),
        ],
        bookmark_names: vec!["intro".to_string()],
    }
}

fn reference_pages() -> Vec<PageText> {
    vec![
        page(1, "Table of contents"),
        page(2, "See the Example site and come back to intro here"),
        page(3, "This link is a broken ref on purpose"),
    ]
}

/// Expected rows as (target, display, category, page) tuples.
fn rows_as_tuples(
    rows: &[docx_link_manager::audit::ReportRow],
) -> Vec<(String, String, Category, PageRef)> {
    rows.iter()
        .map(|r| {
            (
                r.target.clone(),
                r.display_text.clone(),
                r.category,
                r.page,
            )
        })
        .collect()
}

#[test]
fn test_reference_document_full_report() {
    let refs = reference_refs();
    let classified = build_classified(&refs);
    let records: Vec<HyperlinkRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let matches = resolve_pages(&records, &reference_pages());
    let rows = assemble(&classified, &matches, &AuditConfig::default());

    // Page 2 carries the external link, the internal link, and the
    // bookmark name (as a substring of "back to intro"); page 3 the
    // ghost reference.
    assert_eq!(
        rows_as_tuples(&rows),
        vec![
            (
                "http://example.com".to_string(),
                "Example site".to_string(),
                Category::External,
                PageRef::Page(2)
            ),
            (
                "#intro".to_string(),
                "back to intro".to_string(),
                Category::InternalCrossReference,
                PageRef::Page(2)
            ),
            (
                "#intro".to_string(),
                "intro".to_string(),
                Category::Bookmark,
                PageRef::Page(2)
            ),
            (
                "#missing".to_string(),
                "broken ref".to_string(),
                Category::InternalGhostReference,
                PageRef::Page(3)
            ),
        ]
    );
}

#[test]
fn test_reference_document_with_start_page() {
    let refs = reference_refs();
    let classified = build_classified(&refs);
    let records: Vec<HyperlinkRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let matches = resolve_pages(&records, &reference_pages());
    let rows = assemble(&classified, &matches, &AuditConfig::from_page(3));

    // Only the page-3 match survives the filter; everything else falls
    // back to an unresolved row in extraction order.
    assert_eq!(
        rows_as_tuples(&rows),
        vec![
            (
                "#missing".to_string(),
                "broken ref".to_string(),
                Category::InternalGhostReference,
                PageRef::Page(3)
            ),
            (
                "http://example.com".to_string(),
                "Example site".to_string(),
                Category::External,
                PageRef::Unresolved
            ),
            (
                "#intro".to_string(),
                "back to intro".to_string(),
                Category::InternalCrossReference,
                PageRef::Unresolved
            ),
            (
                "#intro".to_string(),
                "intro".to_string(),
                Category::Bookmark,
                PageRef::Unresolved
            ),
        ]
    );
}

#[test]
fn test_link_and_bookmark_with_identical_text_deduplicate() {
    // An internal link whose visible text equals the bookmark name
    // produces the same (target, text, page) triple as the standalone
    // bookmark row; only the first under the sort survives.
    let refs = DocxRefs {
        links: vec![record("#intro", "intro", 0)],
        bookmark_names: vec!["intro".to_string()],
    };
    let classified = build_classified(&refs);
    assert_eq!(classified.len(), 2);

    let records: Vec<HyperlinkRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let pages = vec![page(1, "the intro page")];
    let matches = resolve_pages(&records, &pages);
    let rows = assemble(&classified, &matches, &AuditConfig::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, Category::InternalCrossReference);
    assert_eq!(rows[0].page, PageRef::Page(1));
}

#[test]
fn test_classifier_matches_reference_categories() {
    let refs = reference_refs();
    let bookmarks = refs.bookmark_set();
    let expected = [
        Category::External,
        Category::InternalCrossReference,
        Category::InternalGhostReference,
    ];
    for (link, want) in refs.links.iter().zip(expected) {
        assert_eq!(classify(link, &bookmarks), want, "link {:?}", link.target);
    }
}

#[test]
fn test_no_pdf_means_every_row_unresolved() {
    let refs = reference_refs();
    let classified = build_classified(&refs);
    let records: Vec<HyperlinkRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let matches = resolve_pages(&records, &[]);
    let rows = assemble(&classified, &matches, &AuditConfig::default());

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.page == PageRef::Unresolved));
    // Unresolved rows keep extraction order.
    let order: Vec<&str> = rows.iter().map(|r| r.display_text.as_str()).collect();
    assert_eq!(order, vec!["Example site", "back to intro", "broken ref", "intro"]);
}

#[test]
fn test_classified_links_survive_into_rows() {
    // Every classified link must appear in the final report at least once.
    let refs = reference_refs();
    let classified = build_classified(&refs);
    let records: Vec<HyperlinkRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let matches = resolve_pages(&records, &reference_pages());
    let rows = assemble(&classified, &matches, &AuditConfig::default());

    let mut by_target: HashMap<&str, usize> = HashMap::new();
    for row in &rows {
        *by_target.entry(row.target.as_str()).or_default() += 1;
    }
    for link in &classified {
        assert!(
            by_target.contains_key(link.record.target.as_str()),
            "target {} missing from report",
            link.record.target
        );
    }
}
