//! Link classification and page resolution
//!
//! This module is the core of the toolkit: it classifies extracted
//! hyperlinks against the document's bookmarks, resolves the printed
//! page(s) on which each link's visible text occurs, and assembles the
//! final page-ordered, deduplicated report rows.
//!
//! Everything here is pure: no I/O, no logging. Extraction, PDF page
//! text, CSV output, and session logging live in the surrounding
//! modules.

use std::collections::{HashMap, HashSet};

/// Prefix that marks an absolute URL target.
const URL_SCHEME_PREFIX: &str = "http";

/// Marker that prefixes an intra-document anchor target.
const ANCHOR_MARKER: char = '#';

/// Bookmark identifiers found in the document, used as a membership
/// oracle during classification.
pub type BookmarkSet = HashSet<String>;

// ─── Data model ──────────────────────────────────────────────────────────────

/// A hyperlink extracted from the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkRecord {
    /// Raw link destination: absolute URL, `#anchor`, or another
    /// relative reference.
    pub target: String,
    /// Visible text of the link. Used only for page matching; may be
    /// empty or duplicated across links.
    pub display_text: String,
    /// Position in extraction order. Canonical tie-break for
    /// otherwise-equal report rows.
    pub extraction_order: usize,
}

/// Category assigned to a reference by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Absolute URL pointing outside the document.
    External,
    /// `#anchor` target with a matching bookmark.
    InternalCrossReference,
    /// `#anchor` target with no matching bookmark (dangling reference).
    InternalGhostReference,
    /// Anything else: relative paths, unrecognized schemes.
    OtherReference,
    /// Standalone bookmark entry reported in its own right.
    Bookmark,
}

/// A hyperlink record with its category attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub record: HyperlinkRecord,
    pub category: Category,
}

/// Plain text of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number.
    pub page_number: u32,
    pub text: String,
}

/// One (link, page) occurrence found by [`resolve_pages`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageMatch {
    pub target: String,
    pub display_text: String,
    pub page_number: u32,
    pub extraction_order: usize,
}

/// Page reference carried by a report row.
///
/// Variant order matters: `Unresolved` sorts after every numbered page,
/// so unmatched links land at the end of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageRef {
    Page(u32),
    Unresolved,
}

/// Final, externally visible report unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub target: String,
    pub display_text: String,
    pub category: Category,
    pub page: PageRef,
    /// Placeholder for a downstream editing feature; always false here.
    pub modified: bool,
}

/// Configuration for report assembly.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// First page to include. Matches on earlier pages are discarded,
    /// letting a caller skip front matter such as a table of contents.
    pub start_page: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { start_page: 1 }
    }
}

impl AuditConfig {
    /// Config starting at the given page.
    pub fn from_page(start_page: u32) -> Self {
        Self { start_page }
    }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Classify a single hyperlink record against the document's bookmarks.
///
/// Rules, first match wins:
/// 1. target starts with an absolute-URL scheme prefix → `External`
/// 2. target starts with `#`: anchor id present in the bookmark set →
///    `InternalCrossReference`, otherwise `InternalGhostReference`
///    (an empty anchor id is also a ghost reference)
/// 3. anything else → `OtherReference`
pub fn classify(record: &HyperlinkRecord, bookmarks: &BookmarkSet) -> Category {
    if record.target.starts_with(URL_SCHEME_PREFIX) {
        return Category::External;
    }
    match record.target.strip_prefix(ANCHOR_MARKER) {
        Some(anchor_id) => {
            if !anchor_id.is_empty() && bookmarks.contains(anchor_id) {
                Category::InternalCrossReference
            } else {
                Category::InternalGhostReference
            }
        }
        None => Category::OtherReference,
    }
}

// ─── Page resolver ───────────────────────────────────────────────────────────

/// Find every page whose text contains each link's visible text.
///
/// Matching is an exact, case-sensitive substring test against the raw
/// page text. It is blind to whether the text belongs to the actual
/// link element on that page; repeated text elsewhere yields false
/// positives. A link with empty display text never matches: the
/// degenerate empty-substring match is excluded explicitly.
///
/// Returns matches grouped by link target. O(pages × links × text
/// length); documents of tens of pages need no index structure.
pub fn resolve_pages(
    links: &[HyperlinkRecord],
    pages: &[PageText],
) -> HashMap<String, Vec<PageMatch>> {
    let mut matches: HashMap<String, Vec<PageMatch>> = HashMap::new();
    for page in pages {
        for link in links {
            if link.display_text.is_empty() {
                continue;
            }
            if page.text.contains(&link.display_text) {
                matches.entry(link.target.clone()).or_default().push(PageMatch {
                    target: link.target.clone(),
                    display_text: link.display_text.clone(),
                    page_number: page.page_number,
                    extraction_order: link.extraction_order,
                });
            }
        }
    }
    matches
}

// ─── Report assembler ────────────────────────────────────────────────────────

/// Assemble the final report: filter by starting page, order by
/// `(page, extraction order)`, deduplicate.
///
/// Every classified link appears in the output. A link with no
/// surviving page match gets a single [`PageRef::Unresolved`] row,
/// including a link whose every match fell below `start_page`.
/// Duplicate `(target, display text, page)` triples keep only their
/// first occurrence under the sort order.
pub fn assemble(
    classified: &[ClassifiedLink],
    matches: &HashMap<String, Vec<PageMatch>>,
    config: &AuditConfig,
) -> Vec<ReportRow> {
    struct Keyed {
        row: ReportRow,
        extraction_order: usize,
    }

    let mut keyed: Vec<Keyed> = Vec::new();
    for link in classified {
        // Matches are grouped by target; a second link sharing the
        // target must not inherit matches for text it does not display.
        let surviving: Vec<&PageMatch> = matches
            .get(&link.record.target)
            .map(|all| {
                all.iter()
                    .filter(|m| {
                        m.page_number >= config.start_page
                            && m.display_text == link.record.display_text
                    })
                    .collect()
            })
            .unwrap_or_default();

        if surviving.is_empty() {
            keyed.push(Keyed {
                row: ReportRow {
                    target: link.record.target.clone(),
                    display_text: link.record.display_text.clone(),
                    category: link.category,
                    page: PageRef::Unresolved,
                    modified: false,
                },
                extraction_order: link.record.extraction_order,
            });
        } else {
            for m in surviving {
                keyed.push(Keyed {
                    row: ReportRow {
                        target: m.target.clone(),
                        display_text: m.display_text.clone(),
                        category: link.category,
                        page: PageRef::Page(m.page_number),
                        modified: false,
                    },
                    extraction_order: m.extraction_order,
                });
            }
        }
    }

    keyed.sort_by(|a, b| {
        (a.row.page, a.extraction_order).cmp(&(b.row.page, b.extraction_order))
    });

    let mut seen: HashSet<(String, String, PageRef)> = HashSet::new();
    let mut rows = Vec::with_capacity(keyed.len());
    for k in keyed {
        if seen.insert((k.row.target.clone(), k.row.display_text.clone(), k.row.page)) {
            rows.push(k.row);
        }
    }
    rows
}
