use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use meeting_artifacts::adapters::{HttpProcessingService, SystemUrlOpener};
use meeting_artifacts::{
    Activation, ArtifactKind, ArtifactSnapshot, MeetingArtifacts, ProcessingConfig, RequestState,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Generate transcripts and summaries for a recorded meeting
#[derive(Parser, Debug)]
#[command(name = "meeting-artifacts", version, about)]
struct Args {
    /// URL of the meeting recording
    #[arg(long)]
    link: String,

    /// Which artifact to generate
    #[arg(long, value_enum, default_value_t = KindArg::All)]
    kind: KindArg,

    /// Processing server base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open each ready artifact once generated
    #[arg(long)]
    open: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Transcript,
    Summary,
    All,
}

impl KindArg {
    fn kinds(self) -> Vec<ArtifactKind> {
        match self {
            KindArg::Transcript => vec![ArtifactKind::Transcript],
            KindArg::Summary => vec![ArtifactKind::Summary],
            KindArg::All => ArtifactKind::ALL.to_vec(),
        }
    }
}

/// Defaults, then config file, then environment, then flags
fn resolve_config(args: &Args) -> Result<ProcessingConfig> {
    let mut config = match &args.config {
        Some(path) => ProcessingConfig::load(path)?,
        None => ProcessingConfig::default(),
    }
    .apply_env_overrides()?;

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }

    config.validate()?;
    Ok(config)
}

fn print_outcome(snapshot: &ArtifactSnapshot) {
    match (&snapshot.result_url, &snapshot.last_failure) {
        (Some(url), _) => println!("{}: {} {}", snapshot.kind, snapshot.label, url),
        (None, Some(failure)) => println!(
            "{}: {} ({}: {})",
            snapshot.kind, snapshot.label, failure.kind, failure.message
        ),
        (None, None) => println!("{}: {}", snapshot.kind, snapshot.label),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let link = args.link.trim();
    if link.is_empty() {
        anyhow::bail!("--link must not be empty");
    }

    let config = resolve_config(&args)?;
    log::info!("Using processing server {}", config.normalized_base_url());

    let service =
        HttpProcessingService::new(&config).context("Failed to create processing client")?;
    let meeting = MeetingArtifacts::new(
        link,
        Arc::new(service),
        Arc::new(SystemUrlOpener::new()),
        &config,
    );

    let kinds = args.kind.kinds();

    // Start every kind before waiting on any
    let mut pending = Vec::new();
    for &kind in &kinds {
        if let Activation::Requested(handle) = meeting.activate(kind) {
            pending.push(handle);
        }
    }
    for handle in pending {
        handle.await.context("Request task panicked")?;
    }

    let mut failed = 0;
    for &kind in &kinds {
        let snapshot = meeting.controller(kind).snapshot();
        print_outcome(&snapshot);

        match snapshot.state {
            RequestState::Failed => failed += 1,
            RequestState::Ready if args.open => {
                meeting.activate(kind);
            }
            _ => {}
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} artifact request(s) failed", failed, kinds.len());
    }

    Ok(())
}
