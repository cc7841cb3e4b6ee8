//! Audit the hyperlinks and bookmarks of a Word document and write a
//! page-ordered CSV report.
//!
//! Page numbers come from a rendered PDF of the same document; without
//! one, every row reports `N/A`.
//!
//! Usage:
//!   link-report --docx input.docx [--pdf input.pdf] [--start-page 2] \
//!     [--locale hu|en] -o report.csv

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use docx_link_manager::audit::AuditConfig;
use docx_link_manager::pipeline::run_audit;
use docx_link_manager::report::{write_csv, Locale, SessionLog};

#[derive(Parser)]
#[command(
    name = "link-report",
    about = "Audit hyperlinks and bookmarks in a Word document"
)]
struct Cli {
    /// Input DOCX document
    #[arg(long)]
    docx: PathBuf,

    /// Rendered PDF of the same document; enables page resolution
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// First page to include when resolving pages (skips front matter)
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Output CSV file
    #[arg(short, long)]
    output: PathBuf,

    /// Label language for the CSV (hu or en)
    #[arg(long, default_value = "hu")]
    locale: Locale,

    /// Skip writing the session log file next to the CSV
    #[arg(long)]
    no_log: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let session_log = if cli.no_log {
        None
    } else {
        let dir = cli
            .output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Some(SessionLog::create(dir)?)
    };

    if let Some(log) = &session_log {
        log.append(&format!("Processing document: {}", cli.docx.display()))?;
    }

    let config = AuditConfig {
        start_page: cli.start_page,
    };
    let outcome = run_audit(&cli.docx, cli.pdf.as_deref(), &config)?;

    write_csv(&outcome.rows, &cli.output, cli.locale)
        .with_context(|| format!("Failed to write report: {}", cli.output.display()))?;

    if let Some(log) = &session_log {
        for line in outcome.summary().lines() {
            log.append(line)?;
        }
        log.append(&format!("CSV saved: {}", cli.output.display()))?;
        log.append("Session finished")?;
    }

    println!("{}", outcome.summary());
    println!("Report written to {}", cli.output.display());
    if let Some(log) = &session_log {
        println!("Session log written to {}", log.path().display());
    }
    Ok(())
}
