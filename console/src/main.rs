mod config;
mod game_loop;
mod input;

use std::io;

use clap::{Parser, ValueEnum};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{BotType, FirstPlayerMode, TicTacToeGameState};
use tictactoe_common::{log, logger};

use config::{Config, get_config_manager};
use game_loop::{GameEnd, GameOptions, ask_play_again, run_game};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FirstPlayerArg {
    Computer,
    Human,
    Random,
}

impl From<FirstPlayerArg> for FirstPlayerMode {
    fn from(arg: FirstPlayerArg) -> Self {
        match arg {
            FirstPlayerArg::Computer => FirstPlayerMode::Computer,
            FirstPlayerArg::Human => FirstPlayerMode::Human,
            FirstPlayerArg::Random => FirstPlayerMode::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotTypeArg {
    Heuristic,
    Random,
}

impl From<BotTypeArg> for BotType {
    fn from(arg: BotTypeArg) -> Self {
        match arg {
            BotTypeArg::Heuristic => BotType::Heuristic,
            BotTypeArg::Random => BotType::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    /// Config file; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<String>,
    #[arg(long, value_enum)]
    first_player: Option<FirstPlayerArg>,
    #[arg(long, value_enum)]
    bot_type: Option<BotTypeArg>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Log the value of every candidate before each computer move.
    #[arg(long)]
    explain: bool,
    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(first_player) = self.first_player {
            config.first_player = first_player.into();
        }
        if let Some(bot_type) = self.bot_type {
            config.bot_type = bot_type.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.use_log_prefix && config.log_prefix.is_none() {
            config.log_prefix = Some("Console".to_string());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    args.apply_to(&mut config);

    logger::init_logger(config.log_prefix.clone());

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved settings to config file");
    }

    let mut rng = SessionRng::from_optional_seed(config.seed);
    let options = GameOptions {
        bot_type: config.bot_type,
        explain: args.explain,
    };
    let mut state = TicTacToeGameState::with_first_player(config.first_player, &mut rng);

    log!(
        "Starting game: computer plays {} ({:?} bot), seed {}",
        state.computer_mark,
        config.bot_type,
        rng.seed()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        match run_game(&mut state, &options, &mut rng, &mut input, &mut output)? {
            GameEnd::Quit => break,
            GameEnd::Finished(_) => {
                if !ask_play_again(&mut input, &mut output)? {
                    break;
                }
                state.reset();
                log!("New game: computer plays {}", state.computer_mark);
            }
        }
    }

    log!("Goodbye");
    Ok(())
}
