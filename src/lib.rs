//! DOCX Link Manager
//!
//! Tools for auditing the hyperlinks and bookmarks of a Word document:
//! every reference is extracted, classified, resolved to the printed
//! page(s) carrying its visible text, and reported as a deduplicated,
//! page-ordered CSV.
//!
//! This library provides:
//! - `audit`: core classification, page resolution, and report assembly
//! - `docx`: hyperlink/bookmark extraction from DOCX archives
//! - `pdf_text`: per-page plain text of a rendered PDF
//! - `pipeline`: the end-to-end audit shared by the front ends
//! - `report`: localized CSV output and the session log file
//!
//! Binaries:
//! - `link-report`: command-line audit tool
//! - `link-picker`: dialog-driven variant of the same pipeline

pub mod audit;
pub mod docx;
pub mod pdf_text;
pub mod pipeline;
pub mod report;

pub use audit::{
    assemble, classify, resolve_pages, AuditConfig, BookmarkSet, Category, ClassifiedLink,
    HyperlinkRecord, PageMatch, PageRef, PageText, ReportRow,
};
pub use pipeline::{run_audit, AuditOutcome};
