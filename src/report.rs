//! CSV report serialization and the session log file.
//!
//! Localization lives here and nowhere else: the core hands over the
//! closed [`Category`] enum and the presentation layer maps it to the
//! label set the report consumer expects. The original report format
//! is Hungarian; an English label set is available for the same
//! columns.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::audit::{Category, PageRef, ReportRow};

/// Label language for serialized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Hungarian,
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hu" | "hungarian" => Ok(Locale::Hungarian),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unknown locale '{}', expected 'hu' or 'en'", other)),
        }
    }
}

impl Locale {
    /// CSV header row: name, destination, status, page number, modified.
    pub fn headers(self) -> [&'static str; 5] {
        match self {
            Locale::Hungarian => ["Név", "Cél", "Státusz", "Oldalszám", "Módosításra került?"],
            Locale::English => ["Name", "Destination", "Status", "Page Number", "Modified?"],
        }
    }

    /// Localized status label for a category.
    pub fn status_label(self, category: Category) -> &'static str {
        match (self, category) {
            (Locale::Hungarian, Category::External) => "Külső hivatkozás",
            (Locale::Hungarian, Category::InternalCrossReference) => "Belső hivatkozás",
            (Locale::Hungarian, Category::InternalGhostReference) => "Hibás belső hivatkozás",
            (Locale::Hungarian, Category::OtherReference) => "Egyéb hivatkozás",
            (Locale::Hungarian, Category::Bookmark) => "Könyvjelző",
            (Locale::English, Category::External) => "External link",
            (Locale::English, Category::InternalCrossReference) => "Internal link",
            (Locale::English, Category::InternalGhostReference) => "Broken internal link",
            (Locale::English, Category::OtherReference) => "Other reference",
            (Locale::English, Category::Bookmark) => "Bookmark",
        }
    }

    /// Page column value: the page number, or `N/A` when unresolved.
    pub fn page_label(self, page: PageRef) -> String {
        match page {
            PageRef::Page(n) => n.to_string(),
            PageRef::Unresolved => "N/A".to_string(),
        }
    }

    /// Modified-flag column value. Unmodified rows carry the report's
    /// established `NEM` sentinel in Hungarian output.
    pub fn modified_label(self, modified: bool) -> &'static str {
        match (self, modified) {
            (Locale::Hungarian, false) => "NEM",
            (Locale::Hungarian, true) => "IGEN",
            (Locale::English, false) => "NO",
            (Locale::English, true) => "YES",
        }
    }

    /// Default CSV file name for the dialog-driven front end.
    pub fn default_csv_name(self) -> &'static str {
        match self {
            Locale::Hungarian => "Frissített_Hivatkozások.csv",
            Locale::English => "updated_links.csv",
        }
    }
}

/// Write the report rows to a CSV file with localized labels.
pub fn write_csv(rows: &[ReportRow], path: &Path, locale: Locale) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV: {}", path.display()))?;
    writer.write_record(locale.headers())?;
    for row in rows {
        let page = locale.page_label(row.page);
        writer.write_record(&[
            row.display_text.as_str(),
            row.target.as_str(),
            locale.status_label(row.category),
            page.as_str(),
            locale.modified_label(row.modified),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Plain-text session log written next to the CSV report.
///
/// One file per run, named with a local timestamp; every entry carries
/// its own timestamp. This is the user-facing processing journal the
/// report consumer archives with the CSV, distinct from the `log`
/// crate diagnostics.
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Create the log file in `dir` and write the opening entry.
    pub fn create(dir: &Path) -> Result<Self> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("link_audit_log_{}.txt", stamp));
        let log = SessionLog { path };
        log.append("Session started")?;
        Ok(log)
    }

    /// Append a timestamped entry.
    pub fn append(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open session log: {}", self.path.display()))?;
        writeln!(
            file,
            "{} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        )?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("hu").unwrap(), Locale::Hungarian);
        assert_eq!(Locale::from_str("EN").unwrap(), Locale::English);
        assert!(Locale::from_str("de").is_err());
    }

    #[test]
    fn test_status_labels_cover_all_categories() {
        for category in [
            Category::External,
            Category::InternalCrossReference,
            Category::InternalGhostReference,
            Category::OtherReference,
            Category::Bookmark,
        ] {
            assert!(!Locale::Hungarian.status_label(category).is_empty());
            assert!(!Locale::English.status_label(category).is_empty());
        }
    }

    #[test]
    fn test_page_label_sentinel() {
        assert_eq!(Locale::Hungarian.page_label(PageRef::Page(12)), "12");
        assert_eq!(Locale::Hungarian.page_label(PageRef::Unresolved), "N/A");
        assert_eq!(Locale::English.page_label(PageRef::Unresolved), "N/A");
    }

    #[test]
    fn test_modified_sentinel() {
        assert_eq!(Locale::Hungarian.modified_label(false), "NEM");
        assert_eq!(Locale::English.modified_label(false), "NO");
    }
}
