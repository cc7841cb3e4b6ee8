//! Dialog-driven variant of the link audit.
//!
//! Picks the input document, an optional rendered PDF, and the output
//! folder through native file dialogs, then runs the same pipeline as
//! `link-report` and writes the CSV and session log into the chosen
//! folder. Cancelling the PDF dialog skips page resolution; cancelling
//! either required dialog exits without processing.

use anyhow::Result;

use docx_link_manager::audit::AuditConfig;
use docx_link_manager::pipeline::run_audit;
use docx_link_manager::report::{write_csv, Locale, SessionLog};

fn main() -> Result<()> {
    env_logger::init();
    let locale = Locale::Hungarian;

    let docx = match rfd::FileDialog::new()
        .set_title("Select the Word document")
        .add_filter("Word documents", &["docx"])
        .pick_file()
    {
        Some(path) => path,
        None => {
            println!("No document selected. Exiting.");
            return Ok(());
        }
    };

    let pdf = rfd::FileDialog::new()
        .set_title("Select the rendered PDF (cancel to skip page numbers)")
        .add_filter("PDF documents", &["pdf"])
        .pick_file();

    let out_dir = match rfd::FileDialog::new()
        .set_title("Select the output folder")
        .pick_folder()
    {
        Some(path) => path,
        None => {
            println!("No output folder selected. Exiting.");
            return Ok(());
        }
    };

    let session_log = SessionLog::create(&out_dir)?;
    session_log.append(&format!("Processing document: {}", docx.display()))?;

    let outcome = run_audit(&docx, pdf.as_deref(), &AuditConfig::default())?;

    let csv_path = out_dir.join(locale.default_csv_name());
    write_csv(&outcome.rows, &csv_path, locale)?;

    for line in outcome.summary().lines() {
        session_log.append(line)?;
    }
    session_log.append(&format!("CSV saved: {}", csv_path.display()))?;
    session_log.append("Session finished")?;

    println!("{}", outcome.summary());
    println!("Report written to {}", csv_path.display());
    println!("Session log written to {}", session_log.path().display());
    Ok(())
}
