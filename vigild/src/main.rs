use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use vigil_common::error::ErrorInformation;
use vigil_common::model::{Host, VulnerabilityRecord};
use vigil_module_correlator::model::{CorrelationOptions, HostMatchSet, RunSummary};
use vigil_module_correlator::service::{to_persistable, CorrelationService};
use vigil_module_correlator::store::{FileSystemStore, MatchStore};

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Correlate a host snapshot against a vulnerability snapshot
    Run(Run),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "vigild",
    long_about = None
)]
pub struct Vigild {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(clap::Args, Debug)]
pub struct Run {
    /// JSON file holding the host inventory snapshot
    #[arg(long, env = "VIGIL_HOSTS")]
    hosts: PathBuf,

    /// JSON file holding the vulnerability feed snapshot
    #[arg(long, env = "VIGIL_CVES")]
    cves: PathBuf,

    /// Attempt to upgrade name matches using semantic version bounds
    #[arg(long, env = "VIGIL_MATCH_VERSION")]
    match_version: bool,

    /// Directory to persist the match set in; replaces any prior set
    #[arg(long, env = "VIGIL_OUTPUT")]
    output: Option<PathBuf>,
}

/// What a run hands back to the caller: the counters plus the full match
/// set, mirroring what the HTTP trigger collaborator returns.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput {
    summary: RunSummary,
    matches: HostMatchSet,
}

impl Vigild {
    fn run(self) -> ExitCode {
        match self.run_command() {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                let info = ErrorInformation::new("CorrelationRunFailed", &err)
                    .with_details(format!("{err:#}"));
                if let Ok(payload) = serde_json::to_string(&info) {
                    eprintln!("{payload}");
                }

                ExitCode::FAILURE
            }
        }
    }

    fn run_command(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Run(run) => run.run(),
        }
    }
}

impl Run {
    fn run(self) -> anyhow::Result<ExitCode> {
        let hosts: Vec<Host> = load(&self.hosts).context("loading host snapshot")?;
        let cves: Vec<VulnerabilityRecord> =
            load(&self.cves).context("loading vulnerability snapshot")?;

        let options = CorrelationOptions {
            match_version: self.match_version,
        };
        let (matches, summary) = CorrelationService::new().run(&hosts, &cves, options);

        if let Some(output) = &self.output {
            let store = FileSystemStore::new(output)
                .with_context(|| format!("opening store at {}", output.display()))?;
            store
                .replace_all(&to_persistable(&matches))
                .context("replacing stored match set")?;
        }

        serde_json::to_writer_pretty(std::io::stdout().lock(), &RunOutput { summary, matches })?;
        println!();

        Ok(ExitCode::SUCCESS)
    }
}

fn load<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
    let data =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_slice(&data)?)
}

fn main() -> ExitCode {
    env_logger::init();
    Vigild::parse().run()
}
