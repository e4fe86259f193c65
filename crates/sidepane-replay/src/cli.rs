use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use sidepane_runtime::logging::{self, LogFormat};
use sidepane_runtime::{JsonFileStore, LayoutPolicy, PanelStorageKeys};
use sidepane_web::WorkspaceHost;
use tracing::info;

use crate::error::{ReplayError, Result};
use crate::script::{ReplayReport, load_script, replay};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sidepane-replay",
    about = "Replay scripted host events against a file-backed panel layout",
    version
)]
pub struct Cli {
    /// JSON file holding the persisted layout; created if missing.
    #[arg(long)]
    pub store: PathBuf,

    /// JSON array of host events.
    #[arg(long)]
    pub script: PathBuf,

    /// Container width in pixels at mount.
    #[arg(long, default_value_t = 1280)]
    pub container_width: u32,

    /// Layout policy file (`.toml` or `.json`).
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Namespace prepended to every storage key.
    #[arg(long)]
    pub key_prefix: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_format.into()).map_err(|err| ReplayError::Logging {
        message: err.to_string(),
    })?;
    let report = execute(&cli)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    Ok(())
}

/// Mount, replay and persist without touching the global subscriber.
pub fn execute(cli: &Cli) -> Result<ReplayReport> {
    let policy = match &cli.policy {
        Some(path) => load_policy(path)?,
        None => LayoutPolicy::default(),
    };
    let keys = cli
        .key_prefix
        .as_deref()
        .map_or_else(PanelStorageKeys::default, PanelStorageKeys::with_prefix);
    let events = load_script(&cli.script)?;
    let store = JsonFileStore::open(&cli.store)?;
    let host = WorkspaceHost::mount(store, keys, cli.container_width, &policy)?;
    info!(
        target: "sidepane.replay",
        store = %cli.store.display(),
        events = events.len(),
        "replaying script"
    );
    let (report, store) = replay(host, &events)?;
    store.flush()?;
    Ok(report)
}

fn load_policy(path: &Path) -> Result<LayoutPolicy> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let policy = if is_toml {
        LayoutPolicy::from_toml_file(path)?
    } else {
        LayoutPolicy::from_json_file(path)?
    };
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, LogFormatArg};

    #[test]
    fn defaults_apply() {
        let cli = Cli::parse_from(["sidepane-replay", "--store", "s.json", "--script", "e.json"]);
        assert_eq!(cli.container_width, 1280);
        assert_eq!(cli.log_format, LogFormatArg::Pretty);
        assert!(cli.policy.is_none());
    }

    #[test]
    fn store_and_script_are_required() {
        assert!(Cli::try_parse_from(["sidepane-replay", "--store", "s.json"]).is_err());
    }

    #[test]
    fn json_log_format_parses() {
        let cli = Cli::try_parse_from([
            "sidepane-replay",
            "--store",
            "s.json",
            "--script",
            "e.json",
            "--log-format",
            "json",
            "--container-width",
            "900",
        ])
        .expect("valid args");
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert_eq!(cli.container_width, 900);
    }
}
