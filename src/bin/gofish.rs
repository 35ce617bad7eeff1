use clap::Parser;
use go_fish::core::{GameConfig, PlayerId, DEFAULT_HAND_SIZE};
use go_fish::rules::{GameEngine, GameResult};
use go_fish::session::{Command, Cue, Notifier, Session, UiState};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Cards dealt to each player
    #[arg(long, default_value_t = DEFAULT_HAND_SIZE)]
    hand_size: usize,

    /// Let AI2 take the first turn
    #[arg(long, default_value_t = false)]
    second_moves_first: bool,

    /// Print every game's event history to stdout as JSON lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Give up on a game after this many frames
    #[arg(long, default_value_t = 10_000)]
    max_frames: usize,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    ties: usize,
    unfinished: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let first_player = if args.second_moves_first {
        PlayerId::Two
    } else {
        PlayerId::One
    };
    let config = GameConfig::new(seed)
        .with_hand_size(args.hand_size)
        .with_first_player(first_player);

    let mut session = Session::new(GameEngine::new(config)?);
    let notifier = Notifier::new(|cue: Cue, volume: f32| debug!(cue = cue.name(), volume, "cue"));
    session.engine_mut().set_event_callback(notifier.into_callback());

    let mut score = MatchScore::default();
    for game_idx in 0..args.num_games {
        session.handle(Command::NewGame);
        let result = session.run_to_end(args.max_frames);

        for line in session.log().lines() {
            debug!(game_idx, "{}", line);
        }
        if args.json {
            for event in session.engine().history() {
                println!("{}", serde_json::to_string(event)?);
            }
        }

        match result {
            Some(GameResult::Winner(player)) => {
                info!(
                    game_idx,
                    winner = %player,
                    books_one = session.engine().books(PlayerId::One),
                    books_two = session.engine().books(PlayerId::Two)
                );
                score.wins[player.index()] += 1;
            }
            Some(GameResult::Tie) => {
                info!(game_idx, "Tie");
                score.ties += 1;
            }
            None => {
                warn!(game_idx, frames = args.max_frames, "game did not finish");
                score.unfinished += 1;
            }
        }
        debug_assert!(result.is_none() || session.ui_state() == UiState::EndGame);
    }
    session.handle(Command::Exit);

    eprintln!(
        "End result:\n- {} wins by {}\n- {} wins by {}\n- {} ties",
        score.wins[0],
        PlayerId::One,
        score.wins[1],
        PlayerId::Two,
        score.ties
    );
    if score.unfinished > 0 {
        eprintln!("- {} unfinished", score.unfinished);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
