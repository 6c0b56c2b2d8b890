use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use bluff_duel::config::AppConfig;
use bluff_duel::error::StoreError;
use bluff_duel::game::NamedAgent;
use bluff_duel::store::{OptionsRecord, RosterStore};
use bluff_duel::training::{
    train_in_mode, AgentBlob, ExecutionMode, TrainingRequest, TrainingUpdate,
};

/// Train a betting agent against the configured opponent roster.
#[derive(Parser)]
#[command(name = "train", about = "Train a leader/follower betting agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Roster entry to train (defaults to the first entry)
    #[arg(long)]
    trainee: Option<String>,

    /// Override number of training cycles
    #[arg(long)]
    cycles: Option<usize>,

    /// Override hands per evaluation batch
    #[arg(long)]
    hands: Option<usize>,

    /// Run training on a background worker thread
    #[arg(long)]
    background: bool,

    /// Directory for saved agents; previously saved agents resume from
    /// their stored state, and the trained result is written back
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(cycles) = cli.cycles {
        config.training.cycles = cycles;
    }
    if let Some(hands) = cli.hands {
        config.training.hands = hands;
    }
    if cli.background {
        config.training.background = true;
    }
    config.validate().context("validating config")?;

    let store = cli.save_dir.as_ref().map(RosterStore::new);
    let mut roster = build_roster(&config, store.as_ref())?;
    if roster.is_empty() {
        bail!("config roster is empty");
    }

    let trainee_name = cli
        .trainee
        .clone()
        .unwrap_or_else(|| roster[0].name.clone());
    let Some(position) = roster.iter().position(|a| a.name == trainee_name) else {
        bail!("no roster entry named '{trainee_name}'");
    };
    let trainee = roster.remove(position);
    if roster.is_empty() {
        bail!("roster needs at least one opponent besides '{trainee_name}'");
    }

    let options = config.training.cycle_options();
    let cycles = config.training.cycles;
    let mode = if config.training.background {
        ExecutionMode::Background
    } else {
        ExecutionMode::InProcess
    };

    let opponent_summary: Vec<String> = roster
        .iter()
        .map(|a| format!("{} [{}]", a.name, a.agent.kind().display_name()))
        .collect();
    println!(
        "Training '{trainee_name}' [{}] for {cycles} cycles against {} ({} hands/batch)",
        trainee.agent.kind().display_name(),
        opponent_summary.join(", "),
        options.evaluation.hands
    );

    let request = TrainingRequest::new(&trainee, &roster, cycles, options);
    let mut session = train_in_mode(mode, request);

    let mut latest: Option<AgentBlob> = None;
    while let Some(update) = session.next_update() {
        match update {
            TrainingUpdate::CycleComplete {
                cycle,
                trainee,
                rewards,
            } => {
                let summary: Vec<String> = rewards
                    .iter()
                    .map(|r| format!("{}: {:+.3}", r.opponent, r.reward))
                    .collect();
                println!("cycle {:>4}  {}", cycle + 1, summary.join("  "));
                latest = Some(trainee);
            }
            TrainingUpdate::Finished => println!("Training complete"),
            TrainingUpdate::Failed { message } => bail!("training failed: {message}"),
        }
    }

    if let (Some(store), Some(blob)) = (store, latest) {
        let trained = blob
            .to_agent()
            .context("decoding trained agent for saving")?;
        let path = store.save_agent(&trained)?;
        store.save_options(&OptionsRecord::new(cycles, options))?;
        println!("Saved trained agent to {}", path.display());
    }

    Ok(())
}

/// Builds the live roster from the config, preferring stored blobs over
/// freshly initialized agents when a save directory is in use.
fn build_roster(config: &AppConfig, store: Option<&RosterStore>) -> Result<Vec<NamedAgent>> {
    let mut roster = Vec::with_capacity(config.roster.len());
    for entry in &config.roster {
        let agent = match store {
            Some(store) => match store.load_agent(&entry.name) {
                Ok(saved) => {
                    println!("Resuming '{}' from saved state", entry.name);
                    saved.agent
                }
                Err(StoreError::AgentNotFound(_)) => entry.agent.build(),
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("loading saved agent '{}'", entry.name))
                }
            },
            None => entry.agent.build(),
        };
        roster.push(NamedAgent {
            name: entry.name.clone(),
            agent,
        });
    }
    Ok(roster)
}
