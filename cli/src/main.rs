//! CLI entrypoint for Vector Clarity
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use clarity_application::{AggregateResultsUseCase, RunBallotUseCase};
use clarity_domain::session::can_vote;
use clarity_infrastructure::{ConfigLoader, InMemoryVoteStore, load_session, seed_votes};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;
mod walkthrough;

#[derive(Parser)]
#[command(name = "vector-clarity", version, about = "Team-consensus scoring for strategic initiatives")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the ranked boardroom report for a session snapshot
    Report {
        /// Path to a session snapshot (JSON)
        session: PathBuf,
    },
    /// Walk through the initiatives and cast a ballot
    Vote {
        /// Path to a session snapshot (JSON)
        session: PathBuf,

        /// Member id to vote as
        #[arg(long)]
        member: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Weight misconfiguration is a startup failure, never a runtime one
    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;
    let weights = config.scoring.to_weights()?;

    match cli.command {
        Command::Report { session } => {
            let session = load_session(&session)?;

            // === Dependency Injection ===
            let store = Arc::new(InMemoryVoteStore::new());
            seed_votes(store.as_ref(), &session).await;
            let aggregate = AggregateResultsUseCase::new(Arc::clone(&store)).with_weights(weights);

            let results = aggregate.execute(&session.initiatives).await;
            println!("{}", report::render(&session, &results));
        }
        Command::Vote { session, member } => {
            let session = load_session(&session)?;
            let Some(participant) = session.member(&member).cloned() else {
                let known: Vec<&str> = session.team_members.iter().map(|m| m.id.as_str()).collect();
                bail!("unknown member '{}'. Known members: {}", member, known.join(", "));
            };

            let locked = session.is_expired(Utc::now());
            let allowed = can_vote(&participant, locked);
            info!(member = %participant.id, role = %participant.system_role, locked, "opening ballot");

            // === Dependency Injection ===
            let store = Arc::new(InMemoryVoteStore::new());
            seed_votes(store.as_ref(), &session).await;
            let ballots = RunBallotUseCase::new(Arc::clone(&store))
                .with_progress(Arc::new(walkthrough::ConsolePulse));
            let aggregate = AggregateResultsUseCase::new(Arc::clone(&store)).with_weights(weights);

            walkthrough::run(&ballots, &session, &participant, allowed, locked).await?;

            let results = aggregate.execute(&session.initiatives).await;
            println!("{}", report::render(&session, &results));
        }
    }

    Ok(())
}
