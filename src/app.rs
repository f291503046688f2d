// Run orchestration: discovery -> confirmation -> graph choice -> import.
// All configuration arrives as one `RunConfig` value; nothing here reads
// the environment or the command line.

use crate::api::{ReflectApi, DEFAULT_LIST_NAME};
use crate::discover::discover_daily_notes;
use crate::error::{ImportError, Result};
use crate::import::{append_entries, ImportOptions, ImportSummary};
use crate::range::RangeConfig;
use crate::ui::{confirm_import, select_graph, Prompter};
use crossterm::style::Stylize;
use log::info;
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub notes_dir: PathBuf,
    pub range: RangeConfig,
    /// Sort entries by date instead of keeping directory listing order.
    pub sort: bool,
    pub list_name: String,
    pub show_progress: bool,
}

impl RunConfig {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        RunConfig {
            notes_dir: notes_dir.into(),
            range: RangeConfig::default(),
            sort: false,
            list_name: DEFAULT_LIST_NAME.to_string(),
            show_progress: false,
        }
    }
}

/// How a run that did not fail ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operator declined at the confirmation prompt.
    Aborted,
    Completed(ImportSummary),
}

/// Process exit code for a finished run. Declining at the prompt is not
/// a failure.
pub fn exit_code(result: &Result<RunOutcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}

/// Run one import end to end.
pub fn run(
    config: &RunConfig,
    api: &dyn ReflectApi,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<RunOutcome> {
    let discovery = discover_daily_notes(&config.notes_dir)?;
    for name in &discovery.unmatched {
        writeln!(out, "{} {}", "NOT MATCHED:".yellow(), name).map_err(ImportError::Console)?;
    }
    let mapping = if config.sort {
        discovery.mapping.sorted_by_date()
    } else {
        discovery.mapping
    };
    info!(
        "found {} daily notes in {} ({} unmatched files)",
        mapping.len(),
        config.notes_dir.display(),
        discovery.unmatched.len()
    );

    if !confirm_import(&mapping, &config.range, prompter, out)? {
        info!("import declined by operator");
        return Ok(RunOutcome::Aborted);
    }

    let graph_id = select_graph(api, prompter)?;

    let options = ImportOptions {
        list_name: config.list_name.clone(),
        show_progress: config.show_progress,
    };
    let summary = append_entries(api, &graph_id, &mapping, &config.range, &options, out)?;
    info!(
        "imported {} daily notes, skipped {} empty files",
        summary.imported.len(),
        summary.skipped_empty.len()
    );
    Ok(RunOutcome::Completed(summary))
}
