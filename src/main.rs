// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the API client and hand
//   everything to `app::run`.
// - Exits with the remote status code when the graph listing fails.

use anyhow::Context;
use clap::Parser;
use reflect_daily_import::{
    api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_LIST_NAME},
    app::{self, RunConfig, RunOutcome},
    range::RangeConfig,
    ui::TerminalPrompter,
    ImportError,
};
use std::io;
use std::path::PathBuf;

/// Import daily note Markdown files (YYYYMMDD.md) into Reflect
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Directory holding the daily note files
    notes_dir: PathBuf,

    /// Reflect API token
    api_token: String,

    /// Skip this many entries (e.g. ones imported by an earlier run)
    #[arg(long)]
    offset: Option<usize>,

    /// Import at most this many entries after the offset. Needs --offset
    #[arg(long)]
    limit: Option<usize>,

    /// Process entries in date order instead of directory order
    #[arg(long)]
    sort: bool,

    /// Reflect API root
    #[arg(long, env = "REFLECT_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Name of the list the imported text is appended to
    #[arg(long, default_value = DEFAULT_LIST_NAME)]
    list_name: String,

    /// Log debug output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.limit.is_some() && cli.offset.is_none() {
        log::warn!("--limit has no effect without --offset");
    }

    let api = match ApiClient::new(&cli.base_url, &cli.api_token) {
        Ok(api) => api,
        Err(ImportError::InvalidInput(msg)) => anyhow::bail!(msg),
        Err(err) => return Err(err).context("Failed to build HTTP client"),
    };

    let config = RunConfig {
        notes_dir: cli.notes_dir,
        range: RangeConfig::new(cli.offset, cli.limit),
        sort: cli.sort,
        list_name: cli.list_name,
        show_progress: true,
    };

    let mut prompter = TerminalPrompter;
    let stdout = io::stdout();
    let result = app::run(&config, &api, &mut prompter, &mut stdout.lock());

    match &result {
        Ok(RunOutcome::Aborted) => println!("Import cancelled."),
        Ok(RunOutcome::Completed(summary)) => println!(
            "Imported {} daily notes ({} empty files skipped).",
            summary.imported.len(),
            summary.skipped_empty.len()
        ),
        Err(err) => eprintln!("Error: {}", err),
    }
    std::process::exit(app::exit_code(&result));
}
