//! Headless autoplay.
//!
//! Runs a session without a window: the ship shadows the enemy from below,
//! fires continuously and bombs when a bullet gets close.
//!
//! ```text
//! danmaku [--difficulty N | --easy | --normal | --hard | --lunatic]
//!         [--frames N] [--seed N]
//! ```
//!
//! Set `RUST_LOG=debug` to follow the game in more detail.

use std::str::FromStr;

use clap::{ArgGroup, Parser};
use danmaku::{Assets, Bounds, Button, Clock, Difficulty, Input, Outcome, Session, Vec2};

const DEFAULT_FRAMES: u64 = 9000;

#[derive(Parser, Debug)]
#[command(name = "danmaku")]
#[command(about = "Run a headless autoplay bullet-hell session", long_about = None)]
#[command(version)]
#[command(group(
    ArgGroup::new("level").args(["difficulty", "easy", "normal", "hard", "lunatic"])
))]
struct Cli {
    /// Difficulty as a level (0-3) or a name
    #[arg(long, value_parser = Difficulty::from_str)]
    difficulty: Option<Difficulty>,

    /// Same as --difficulty easy
    #[arg(long)]
    easy: bool,

    /// Same as --difficulty normal
    #[arg(long)]
    normal: bool,

    /// Same as --difficulty hard
    #[arg(long)]
    hard: bool,

    /// Same as --difficulty lunatic
    #[arg(long)]
    lunatic: bool,

    /// Frames to run before giving up
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Seed every emitter for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn difficulty(&self) -> Difficulty {
        if let Some(difficulty) = self.difficulty {
            return difficulty;
        }
        match (self.normal, self.hard, self.lunatic) {
            (true, _, _) => Difficulty::Normal,
            (_, true, _) => Difficulty::Hard,
            (_, _, true) => Difficulty::Lunatic,
            _ => Difficulty::Easy,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    let mut session = Session::new(cli.difficulty(), Assets::placeholder(), Bounds::FIELD);
    if let Some(seed) = cli.seed {
        session = session.with_seed(seed);
    }

    let mut clock = Clock::fixed(danmaku::time::NOMINAL_FRAME_MS);
    let mut input = Input::new();
    input.press(Button::Fire);

    for _ in 0..cli.frames {
        input.begin_frame();
        autopilot(&session, &mut input);
        if session.step(&input, clock.tick()) != Outcome::Playing {
            break;
        }
        if clock.frame() % 300 == 0 {
            log::info!("frame {}: {}", clock.frame(), session.status(clock.fps()));
        }
    }

    let status = session.status(clock.fps());
    match session.outcome() {
        Outcome::Won => log::info!("You WIN! {}", status),
        Outcome::Lost => log::info!("You LOSE! {}", status),
        Outcome::Playing => log::info!("time up after {} frames: {}", clock.frame(), status),
    }
}

/// Stay under the enemy and bomb when a bullet comes within reach.
fn autopilot(session: &Session, input: &mut Input) {
    let player = session.player();
    let aim = Vec2::new(session.enemy().position().x, 700.0);
    input.set_aim(aim);

    let danger = session
        .enemy()
        .shots()
        .particles()
        .iter()
        .any(|p| p.position.distance(player.position()) < 40.0);
    if danger && player.bombs() > 0 {
        input.press(Button::Bomb);
        input.release(Button::Bomb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use danmaku::ConfigError;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("danmaku").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.difficulty(), Difficulty::Easy);
        assert_eq!(cli.frames, DEFAULT_FRAMES);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--lunatic", "--frames", "10", "--seed", "7"]).unwrap();
        assert_eq!(cli.difficulty(), Difficulty::Lunatic);
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.seed, Some(7));

        assert_eq!(parse(&["--normal"]).unwrap().difficulty(), Difficulty::Normal);
        assert_eq!(parse(&["--difficulty", "hard"]).unwrap().difficulty(), Difficulty::Hard);
        assert_eq!(parse(&["--difficulty", "3"]).unwrap().difficulty(), Difficulty::Lunatic);
    }

    #[test]
    fn test_errors() {
        let err = parse(&["--difficulty", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains(&ConfigError::UnknownLevel(5).to_string()));

        assert!(parse(&["--frames"]).is_err());
        assert_eq!(parse(&["--seed", "x"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--fast"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_difficulty_flags_conflict() {
        let err = parse(&["--easy", "--hard"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        let err = parse(&["--difficulty", "1", "--lunatic"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
