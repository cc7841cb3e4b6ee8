//! Audit pipeline shared by the CLI and the dialog-driven front end.
//!
//! Runs extraction, classification, page resolution, and report
//! assembly, returning structured data instead of printing. Callers
//! decide how to log and where to serialize.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

use crate::audit::{
    assemble, classify, resolve_pages, AuditConfig, Category, ClassifiedLink, HyperlinkRecord,
    PageRef, ReportRow,
};
use crate::docx::{self, DocxRefs};
use crate::pdf_text;

/// Result of a full document audit.
#[derive(Debug)]
pub struct AuditOutcome {
    /// Final report rows, page-ordered and deduplicated.
    pub rows: Vec<ReportRow>,
    /// Hyperlink records extracted from the document.
    pub link_count: usize,
    /// Bookmarks extracted from the document.
    pub bookmark_count: usize,
    /// PDF pages scanned, when page resolution ran.
    pub pages_scanned: Option<usize>,
}

impl AuditOutcome {
    /// Rows carrying the given category.
    pub fn category_count(&self, category: Category) -> usize {
        self.rows.iter().filter(|r| r.category == category).count()
    }

    /// Rows with no resolved page.
    pub fn unresolved_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.page == PageRef::Unresolved)
            .count()
    }

    /// Human-readable summary for logs and stdout.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "Extracted {} hyperlinks and {} bookmarks",
            self.link_count, self.bookmark_count
        );
        match self.pages_scanned {
            Some(n) => {
                let _ = writeln!(
                    s,
                    "Scanned {} pages; {} rows resolved to a page, {} unresolved",
                    n,
                    self.rows.len() - self.unresolved_count(),
                    self.unresolved_count()
                );
            }
            None => {
                let _ = writeln!(s, "No rendered PDF supplied; page numbers not resolved");
            }
        }
        let _ = write!(
            s,
            "Rows: {} external, {} internal, {} broken internal, {} other, {} bookmarks",
            self.category_count(Category::External),
            self.category_count(Category::InternalCrossReference),
            self.category_count(Category::InternalGhostReference),
            self.category_count(Category::OtherReference),
            self.category_count(Category::Bookmark),
        );
        s
    }
}

/// Attach categories to extracted references.
///
/// Hyperlink records go through the classifier; bookmarks follow as
/// standalone rows with their own category and continuing extraction
/// order, so they sort after same-page links from the document body.
pub fn build_classified(refs: &DocxRefs) -> Vec<ClassifiedLink> {
    let bookmarks = refs.bookmark_set();
    let mut classified: Vec<ClassifiedLink> = refs
        .links
        .iter()
        .map(|record| ClassifiedLink {
            category: classify(record, &bookmarks),
            record: record.clone(),
        })
        .collect();

    let mut next_order = refs.links.len();
    for name in &refs.bookmark_names {
        classified.push(ClassifiedLink {
            record: HyperlinkRecord {
                target: format!("#{}", name),
                display_text: name.clone(),
                extraction_order: next_order,
            },
            category: Category::Bookmark,
        });
        next_order += 1;
    }
    classified
}

/// Run the full audit over one document.
///
/// Without a rendered PDF every row reports an unresolved page,
/// matching the report's `N/A` column. Extraction and PDF loading
/// errors propagate before any core logic runs.
pub fn run_audit(
    docx_path: &Path,
    pdf_path: Option<&Path>,
    config: &AuditConfig,
) -> Result<AuditOutcome> {
    let refs = docx::extract_refs(docx_path)?;
    let classified = build_classified(&refs);

    let (pages, pages_scanned) = match pdf_path {
        Some(path) => {
            let pages = pdf_text::extract_page_texts(path)?;
            let count = pages.len();
            (pages, Some(count))
        }
        None => (Vec::new(), None),
    };

    let records: Vec<HyperlinkRecord> =
        classified.iter().map(|c| c.record.clone()).collect();
    let matches = resolve_pages(&records, &pages);
    let rows = assemble(&classified, &matches, config);

    Ok(AuditOutcome {
        rows,
        link_count: refs.links.len(),
        bookmark_count: refs.bookmark_names.len(),
        pages_scanned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_classified_appends_bookmarks() {
        let refs = DocxRefs {
            links: vec![
                HyperlinkRecord {
                    target: "http://x.com".to_string(),
                    display_text: "X".to_string(),
                    extraction_order: 0,
                },
                HyperlinkRecord {
                    target: "#ch1".to_string(),
                    display_text: "Chapter 1".to_string(),
                    extraction_order: 1,
                },
            ],
            bookmark_names: vec!["ch1".to_string(), "_GoBack".to_string()],
        };

        let classified = build_classified(&refs);
        assert_eq!(classified.len(), 4);
        assert_eq!(classified[0].category, Category::External);
        assert_eq!(classified[1].category, Category::InternalCrossReference);
        assert_eq!(classified[2].category, Category::Bookmark);
        assert_eq!(classified[2].record.target, "#ch1");
        assert_eq!(classified[2].record.display_text, "ch1");
        assert_eq!(classified[2].record.extraction_order, 2);
        assert_eq!(classified[3].record.target, "#_GoBack");
        assert_eq!(classified[3].record.extraction_order, 3);
    }
}
