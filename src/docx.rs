//! DOCX hyperlink and bookmark extraction.
//!
//! A DOCX file is a zip archive. External hyperlink targets live in
//! `word/_rels/document.xml.rels` as `Relationship` entries with
//! `TargetMode="External"`; the links themselves, their visible run
//! text, internal anchors, and bookmarks live in `word/document.xml`.
//! The XML is scanned with compiled regexes over the raw string, which
//! is sufficient for the flat WordprocessingML elements involved.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::audit::{BookmarkSet, HyperlinkRecord};

lazy_static! {
    static ref RELATIONSHIP_RE: Regex =
        Regex::new(r#"<Relationship\b[^>]*>"#).expect("invalid regex");
    static ref ID_ATTR_RE: Regex = Regex::new(r#"\bId="([^"]*)""#).expect("invalid regex");
    static ref TARGET_ATTR_RE: Regex =
        Regex::new(r#"\bTarget="([^"]*)""#).expect("invalid regex");
    static ref TARGET_MODE_ATTR_RE: Regex =
        Regex::new(r#"\bTargetMode="([^"]*)""#).expect("invalid regex");
    static ref HYPERLINK_RE: Regex =
        Regex::new(r#"(?s)<w:hyperlink\b[^>]*>.*?</w:hyperlink>"#).expect("invalid regex");
    static ref BOOKMARK_START_RE: Regex =
        Regex::new(r#"<w:bookmarkStart\b[^>]*>"#).expect("invalid regex");
    static ref R_ID_ATTR_RE: Regex = Regex::new(r#"\br:id="([^"]*)""#).expect("invalid regex");
    static ref ANCHOR_ATTR_RE: Regex =
        Regex::new(r#"\bw:anchor="([^"]*)""#).expect("invalid regex");
    static ref NAME_ATTR_RE: Regex = Regex::new(r#"\bw:name="([^"]*)""#).expect("invalid regex");
    static ref RUN_TEXT_RE: Regex =
        Regex::new(r#"<w:t(?: [^>]*)?>([^<]*)</w:t>"#).expect("invalid regex");
}

/// References extracted from one DOCX document.
#[derive(Debug, Clone, Default)]
pub struct DocxRefs {
    /// Hyperlink records in document order, extraction order 0..n.
    pub links: Vec<HyperlinkRecord>,
    /// Bookmark names in document order. Word-internal bookmarks such
    /// as `_GoBack` are included; filtering is the caller's concern.
    pub bookmark_names: Vec<String>,
}

impl DocxRefs {
    /// Bookmark membership oracle for the classifier.
    pub fn bookmark_set(&self) -> BookmarkSet {
        self.bookmark_names.iter().cloned().collect()
    }
}

/// Extract hyperlinks and bookmarks from a DOCX file.
///
/// A missing rels part yields no external links rather than an error;
/// a missing `word/document.xml` is fatal, the archive is not a usable
/// Word document without it.
pub fn extract_refs(path: &Path) -> Result<DocxRefs> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open DOCX: {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Not a readable DOCX archive: {}", path.display()))?;

    let rels_xml =
        read_zip_entry(&mut archive, "word/_rels/document.xml.rels")?.unwrap_or_default();
    let external_targets = parse_external_targets(&rels_xml);

    let doc_xml = read_zip_entry(&mut archive, "word/document.xml")?.ok_or_else(|| {
        anyhow::anyhow!("word/document.xml missing from {}", path.display())
    })?;

    Ok(parse_document_refs(&doc_xml, &external_targets))
}

/// Read one archive entry as UTF-8, `None` if the entry is absent.
fn read_zip_entry(
    archive: &mut zip::ZipArchive<std::fs::File>,
    name: &str,
) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut data = String::new();
            entry
                .read_to_string(&mut data)
                .with_context(|| format!("Failed to read archive entry {}", name))?;
            Ok(Some(data))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to open archive entry {}", name)),
    }
}

/// Map relationship Id -> Target for `TargetMode="External"` entries.
fn parse_external_targets(rels_xml: &str) -> HashMap<String, String> {
    let mut targets = HashMap::new();
    for m in RELATIONSHIP_RE.find_iter(rels_xml) {
        let tag = m.as_str();
        let external = TARGET_MODE_ATTR_RE
            .captures(tag)
            .map(|c| c[1].contains("External"))
            .unwrap_or(false);
        if !external {
            continue;
        }
        if let (Some(id), Some(target)) =
            (ID_ATTR_RE.captures(tag), TARGET_ATTR_RE.captures(tag))
        {
            targets.insert(id[1].to_string(), xml_unescape(&target[1]));
        }
    }
    targets
}

enum DocEvent {
    Link { target: String, display_text: String },
    Bookmark(String),
}

/// Scan `word/document.xml` for hyperlinks and bookmarks in document
/// order. Hyperlinks carrying an `r:id` resolve through the rels map;
/// ones carrying `w:anchor` become `#anchor` targets. Hyperlinks whose
/// relationship is not external (or unknown) are skipped.
fn parse_document_refs(doc_xml: &str, external_targets: &HashMap<String, String>) -> DocxRefs {
    let mut events: Vec<(usize, DocEvent)> = Vec::new();

    for m in HYPERLINK_RE.find_iter(doc_xml) {
        let element = m.as_str();
        let target = if let Some(c) = R_ID_ATTR_RE.captures(element) {
            match external_targets.get(&c[1]) {
                Some(t) => t.clone(),
                None => continue,
            }
        } else if let Some(c) = ANCHOR_ATTR_RE.captures(element) {
            format!("#{}", xml_unescape(&c[1]))
        } else {
            continue;
        };
        events.push((
            m.start(),
            DocEvent::Link {
                target,
                display_text: run_text(element),
            },
        ));
    }

    for m in BOOKMARK_START_RE.find_iter(doc_xml) {
        if let Some(c) = NAME_ATTR_RE.captures(m.as_str()) {
            events.push((m.start(), DocEvent::Bookmark(xml_unescape(&c[1]))));
        }
    }

    events.sort_by_key(|(pos, _)| *pos);

    let mut refs = DocxRefs::default();
    for (_, event) in events {
        match event {
            DocEvent::Link { target, display_text } => {
                let extraction_order = refs.links.len();
                refs.links.push(HyperlinkRecord {
                    target,
                    display_text,
                    extraction_order,
                });
            }
            DocEvent::Bookmark(name) => refs.bookmark_names.push(name),
        }
    }
    refs
}

/// Concatenated text of all `<w:t>` runs inside one element.
fn run_text(element: &str) -> String {
    RUN_TEXT_RE
        .captures_iter(element)
        .map(|c| xml_unescape(&c[1]))
        .collect()
}

/// Decode the five predefined XML entities. `&amp;` goes last so it
/// cannot re-expose entity text produced by the earlier replacements.
fn xml_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
