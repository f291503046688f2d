// UI layer: the confirmation listing and graph choice, built on a small
// `Prompter` trait so the flows can be driven without a terminal.
// `TerminalPrompter` is the `dialoguer` implementation used by the binary.

use crate::api::ReflectApi;
use crate::discover::DailyNoteMapping;
use crate::error::{ImportError, Result};
use crate::range::RangeConfig;
use dialoguer::Select;
use log::{info, warn};
use std::io::Write;

pub const CONFIRM_YES: &str = "yes";
pub const CONFIRM_NO: &str = "no";

/// Single-choice prompt: show `message` and `options`, return the option
/// the operator picked.
pub trait Prompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<String>;
}

/// Keyboard-driven prompt on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<String> {
        let idx = Select::new()
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact()
            .map_err(|e| ImportError::Prompt(e.to_string()))?;
        Ok(options[idx].clone())
    }
}

/// Print every in-range entry as `<path> --> <date>` and ask whether to go
/// on. Only an explicit "yes" returns `true`.
pub fn confirm_import(
    mapping: &DailyNoteMapping,
    range: &RangeConfig,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<bool> {
    let mut shown = 0usize;
    writeln!(
        out,
        "The contents of these files will be imported into the matching daily entry:"
    )
    .map_err(ImportError::Console)?;
    for entry in mapping.in_range(range) {
        writeln!(out, "{} --> {}", entry.file_path.display(), entry.date)
            .map_err(ImportError::Console)?;
        shown += 1;
    }
    out.flush().map_err(ImportError::Console)?;

    if shown == 0 {
        warn!(
            "offset {:?} / limit {:?} leaves none of the {} daily notes to import",
            range.offset,
            range.limit,
            mapping.len()
        );
    }

    let options = vec![CONFIRM_YES.to_string(), CONFIRM_NO.to_string()];
    let answer = prompter.select("Proceed with the import?", &options)?;
    info!("operator answered {:?} for {} entries", answer, shown);
    Ok(answer == CONFIRM_YES)
}

/// Ask the API for the available graphs and let the operator pick one.
/// Returns the chosen graph id.
pub fn select_graph(api: &dyn ReflectApi, prompter: &mut dyn Prompter) -> Result<String> {
    let graphs = api.list_graphs()?;
    if graphs.is_empty() {
        return Err(ImportError::EmptyResult(
            "The API token has access to no graphs".into(),
        ));
    }
    let ids: Vec<String> = graphs.into_iter().map(|g| g.id).collect();
    let graph_id = prompter.select("Select which graph to import into", &ids)?;
    info!("importing into graph {}", graph_id);
    Ok(graph_id)
}
