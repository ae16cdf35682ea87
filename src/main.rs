//! gh-label-sync CLI
//!
//! Command line tool for listing and bulk-updating GitHub repository labels

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use gh_label_sync::{
    config::{self, DEFAULT_LABEL_FILE},
    ClientConfig, GitHubClient, LabelLister, LabelSource, LabelSyncer, Repository,
};

/// gh-label-sync CLI
#[derive(Parser, Debug)]
#[command(
    name = "gh-label-sync",
    version,
    about = "List and bulk-update GitHub repository labels",
    long_about = "List a repository's labels as JSON, or push label definitions from a JSON/YAML \
    file to a repository. Updates run concurrently, one request per label, and print one status \
    line per label."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the repository's labels as JSON
    List {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Update labels from a file or standard input
    Update {
        #[command(flatten)]
        target: TargetArgs,

        /// JSON/YAML file with labels; an empty value reads JSON from stdin
        #[arg(short = 'f', long, default_value = DEFAULT_LABEL_FILE)]
        file: String,

        /// Add a new label if it doesn't exist
        #[arg(short = 'a', long)]
        add: bool,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Target repository (owner/repo format)
    #[arg(short = 'r', long)]
    repository: Repository,

    /// GitHub access token
    #[arg(short = 't', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

impl TargetArgs {
    fn client(&self) -> anyhow::Result<GitHubClient> {
        let config = ClientConfig::new(self.access_token.clone(), self.api_url.as_deref())?;
        if !config.is_authenticated() {
            warn!("GITHUB_TOKEN is not set, requests will be unauthenticated");
        }
        Ok(GitHubClient::new(config)?)
    }
}

#[tokio::main]
async fn main() {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red(), err);
        std::process::exit(1);
    }
}

/// Parse arguments; usage errors exit with status 1
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "gh_label_sync=debug,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { target } => run_list(target).await,
        Commands::Update { target, file, add } => {
            run_update(target, LabelSource::from_arg(&file), add).await
        }
    }
}

/// Execute list command
async fn run_list(target: TargetArgs) -> anyhow::Result<()> {
    let lister = LabelLister::new(target.client()?);
    lister
        .list(&target.repository, &mut std::io::stdout())
        .await
        .with_context(|| format!("failed to list labels of {}", target.repository))
}

/// Execute update command
async fn run_update(target: TargetArgs, source: LabelSource, add: bool) -> anyhow::Result<()> {
    let labels = config::load_labels(&source)
        .with_context(|| format!("failed to read labels from {}", describe_source(&source)))?;

    let syncer = LabelSyncer::new(target.client()?);
    syncer
        .update(&target.repository, labels, add, &mut std::io::stdout())
        .await?;

    Ok(())
}

fn describe_source(source: &LabelSource) -> String {
    match source {
        LabelSource::File(path) => path.display().to_string(),
        LabelSource::Stdin => "standard input".to_string(),
    }
}
