extern crate qubic_td;

use clap::{Parser, ValueEnum};
use generic_array::typenum::{U3, U4, U5};
use generic_array::ArrayLength;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};

use qubic_td::ai::agent::LEARNING_RATE;
use qubic_td::ai::{Agent, AgentConfig, MoveStrategy};
use qubic_td::game::qubic::{MAX_SIZE, MIN_SIZE};
use qubic_td::game::{GameError, PlayerPosition, Qubic};
use qubic_td::runner::{self, MatchStats};

const LEARNER: PlayerPosition = 1;
const OPPONENT: PlayerPosition = 2;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Opponent {
    /// Plays a random empty cell
    Random,
    /// A second learning agent
    SelfPlay,
}

/// Trains a TD(0) agent by playing tic-tac-toe on an n×n×n cube.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Side length of the cube
    #[arg(long, default_value_t = 4)]
    size: usize,
    /// Number of games to play
    #[arg(long, default_value_t = 10_000)]
    games: u64,
    /// Seed for all random decisions, taken from the OS if not given
    #[arg(long, env = "TRAINER_SEED")]
    seed: Option<u64>,
    #[arg(long, default_value_t = LEARNING_RATE)]
    learning_rate: f32,
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,
    /// Log statistics every this many games
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,
    #[arg(long, env = "TRAINER_LOG", default_value_t = Level::INFO)]
    log_level: Level,
}

fn train<N: ArrayLength>(args: &Args, config: AgentConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut learner =
        MoveStrategy::TdLearning(Agent::with_config(LEARNER, config, StdRng::from_rng(&mut rng)?)?);
    let mut opponent = match args.opponent {
        Opponent::Random => MoveStrategy::random(OPPONENT, StdRng::from_rng(&mut rng)?),
        Opponent::SelfPlay => MoveStrategy::TdLearning(Agent::with_config(
            OPPONENT,
            config,
            StdRng::from_rng(&mut rng)?,
        )?),
    };

    let mut total = MatchStats::new([LEARNER, OPPONENT]);
    let mut window = MatchStats::new([LEARNER, OPPONENT]);
    for game in 0..args.games {
        // players take turns in opening the game
        let mut board = if game % 2 == 0 {
            Qubic::<N>::new(LEARNER, OPPONENT)?
        } else {
            Qubic::<N>::new(OPPONENT, LEARNER)?
        };
        let result = runner::play_match(&mut board, [&mut learner, &mut opponent])?;
        total.record(result);
        window.record(result);

        if (game + 1) % args.report_every == 0 {
            info!("after {} games: {}", game + 1, window);
            if let Some(agent) = learner.agent() {
                info!("weights: {:?}", agent.weights());
            }
            window.reset();
        }
    }

    info!("training finished, {}", total);
    if let Some(agent) = learner.agent() {
        info!("final weights: {:?}", agent.weights());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let config = AgentConfig {
        learning_rate: args.learning_rate,
        ..Default::default()
    };
    config.validate()?;
    info!(
        "training on a {size}x{size}x{size} cube for {} games against {:?}",
        args.games,
        args.opponent,
        size = args.size
    );

    match args.size {
        3 => train::<U3>(&args, config),
        4 => train::<U4>(&args, config),
        5 => train::<U5>(&args, config),
        size => Err(GameError::unsupported_size(MIN_SIZE, MAX_SIZE, size).into()),
    }
}
