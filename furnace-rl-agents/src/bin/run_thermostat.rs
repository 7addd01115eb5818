use std::{io, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use burn::{backend::NdArray, config::Config, tensor::backend::Backend};
use clap::{Parser, ValueEnum};
use furnace_rl::{
    driver::{Observer, Simulation},
    environment::furnace::{FurnaceAction, FurnaceConfig, FurnaceObservation},
    module::{
        component::Controller, nn::q_network::QNetworkController,
        rule_based::RuleBasedController,
    },
};
use furnace_rl_agents::{
    baseline::RandomController,
    render::{Paced, TerminalRenderer},
};
use rand::{rngs::StdRng, SeedableRng};
use tqdm::tqdm;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type DynController = Box<dyn Controller<O = FurnaceObservation, A = FurnaceAction>>;

#[derive(Parser)]
#[command(name = "run_thermostat")]
#[command(version, about = "Drive the furnace simulation with a thermostat controller", long_about = None)]
struct Cli {
    /// JSON furnace configuration, defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller choosing heat or cool every tick
    #[arg(long, value_enum, default_value_t = ControllerKind::RuleBased)]
    controller: ControllerKind,

    #[arg(short, long, default_value_t = 1)]
    episodes: u64,

    /// Pause between rendered ticks
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Skip rendering and show a progress bar instead
    #[arg(long)]
    headless: bool,

    /// Hidden layer sizes of the q-network controller
    #[arg(long, value_delimiter = ',', default_values_t = [32, 32])]
    hidden: Vec<usize>,

    /// Trained q-network weights, a named MessagePack record (`.mpk`)
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ControllerKind {
    RuleBased,
    Random,
    QNetwork,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FurnaceConfig::load(path).map_err(|err| {
            anyhow!(
                "failed to load furnace config from {}: {err:?}",
                path.display()
            )
        })?,
        None => FurnaceConfig::new(),
    };
    config.validate()?;

    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to write furnace config to {}", path.display()))?;
        info!(path = %path.display(), "furnace config saved");
        return Ok(());
    }

    let env = config.init()?;
    let controller = build_controller(&cli, &config)?;
    info!(controller = ?cli.controller, episodes = cli.episodes, "starting furnace simulation");

    if cli.headless {
        run_episodes(Simulation::new(env, controller, ()), &cli)
    } else {
        let renderer = Paced::new(
            TerminalRenderer::new(io::stdout(), &config),
            Duration::from_millis(cli.delay_ms),
        );
        run_episodes(Simulation::new(env, controller, renderer), &cli)
    }
}

fn build_controller(cli: &Cli, config: &FurnaceConfig) -> Result<DynController> {
    let controller: DynController = match cli.controller {
        ControllerKind::RuleBased => Box::new(RuleBasedController::from_config(config)),
        ControllerKind::Random => Box::new(RandomController::new(StdRng::seed_from_u64(cli.seed))),
        ControllerKind::QNetwork => {
            let device = Default::default();
            match &cli.weights {
                Some(path) => Box::new(QNetworkController::<NdArray>::load(
                    config,
                    &cli.hidden,
                    path,
                    &device,
                )?),
                None => {
                    warn!("no --weights given, the q-network starts from random weights");
                    <NdArray as Backend>::seed(cli.seed);
                    Box::new(QNetworkController::<NdArray>::init(
                        config,
                        &cli.hidden,
                        &device,
                    )?)
                }
            }
        }
    };
    Ok(controller)
}

/// Seeds advance per episode and wrap around at `u64::MAX`.
fn episode_seed(base: u64, episode: u64) -> u64 {
    base.wrapping_add(episode)
}

fn run_episodes<V: Observer>(mut simulation: Simulation<DynController, V>, cli: &Cli) -> Result<()> {
    let mut rewards = Vec::new();
    let mut run = |episode: u64| -> Result<bool> {
        let summary = simulation
            .run_episode(Some(episode_seed(cli.seed, episode)))
            .with_context(|| format!("episode {episode} failed"))?;
        rewards.push(summary.total_reward);
        Ok(!summary.interrupted)
    };

    if cli.headless {
        for episode in tqdm(0..cli.episodes) {
            if !run(episode)? {
                break;
            }
        }
    } else {
        for episode in 0..cli.episodes {
            if !run(episode)? {
                break;
            }
        }
    }

    let mean_reward = rewards.iter().sum::<f64>() / rewards.len().max(1) as f64;
    info!(episodes = rewards.len(), mean_reward, "furnace simulation finished");
    Ok(())
}
