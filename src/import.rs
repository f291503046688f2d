// Import executor: walks the in-range entries in mapping order and sends
// one append request per non-empty file. Strictly sequential; the first
// rejected request stops the run.

use crate::api::{ImportRequest, ReflectApi, DEFAULT_LIST_NAME};
use crate::discover::DailyNoteMapping;
use crate::error::{ImportError, Result};
use crate::range::RangeConfig;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Knobs for [`append_entries`].
#[derive(Clone, Debug)]
pub struct ImportOptions {
    pub list_name: String,
    pub show_progress: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            list_name: DEFAULT_LIST_NAME.to_string(),
            show_progress: false,
        }
    }
}

/// What a completed import did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Dates that were appended, in submission order.
    pub imported: Vec<String>,
    /// Files skipped because they were empty.
    pub skipped_empty: Vec<PathBuf>,
}

/// Read a note as text. Bytes that are not valid UTF-8 become U+FFFD
/// instead of failing the run.
fn read_note(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            // discovery just listed this file
            ImportError::Internal(format!(
                "daily note {} disappeared after discovery",
                path.display()
            ))
        } else {
            ImportError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb
}

/// Append every in-range entry of `mapping` to its daily note in
/// `graph_id`.
///
/// Empty files are skipped with a warning. A non-200 answer aborts with
/// [`ImportError::ImportFailure`] after the submitted payload has been
/// printed to stderr; later entries are not touched.
pub fn append_entries(
    api: &dyn ReflectApi,
    graph_id: &str,
    mapping: &DailyNoteMapping,
    range: &RangeConfig,
    options: &ImportOptions,
    out: &mut dyn Write,
) -> Result<ImportSummary> {
    let selected: Vec<_> = mapping.in_range(range).collect();
    let pb = progress_bar(selected.len(), options.show_progress);
    let mut summary = ImportSummary::default();

    for entry in selected {
        pb.set_message(entry.date.clone());
        let path = entry.file_path.as_path();
        let text = read_note(path)?;

        if text.is_empty() {
            warn!("empty daily note {}", path.display());
            pb.suspend(|| writeln!(out, "{} {}", "Skipping empty file:".yellow(), path.display()))
                .map_err(ImportError::Console)?;
            summary.skipped_empty.push(path.to_path_buf());
            pb.inc(1);
            continue;
        }

        let req = ImportRequest::list_append(&entry.date, text, &options.list_name);
        let status = api.append_daily_note(graph_id, &req)?;
        if !status.is_ok() {
            pb.abandon();
            let payload = serde_json::to_string_pretty(&req)
                .unwrap_or_else(|e| format!("<unserializable payload: {e}>"));
            error!(
                "append for {} answered {} {}",
                entry.date, status.code, status.text
            );
            eprintln!("Attempted to append using API payload:");
            eprintln!("{}", payload);
            return Err(ImportError::ImportFailure {
                file: path.to_path_buf(),
                status_text: status.text,
                payload,
            });
        }

        pb.suspend(|| writeln!(out, "{} {}", "Successfully imported:".green(), path.display()))
            .map_err(ImportError::Console)?;
        summary.imported.push(entry.date.clone());
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}
