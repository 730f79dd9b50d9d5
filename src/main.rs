use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use krk_endgame::config::{load_config, EngineConfig};
use krk_endgame::engines::engine_console::ConsoleEngine;
use krk_endgame::engines::engine_minimax::MinimaxEngine;
use krk_endgame::engines::engine_trait::Engine;
use krk_endgame::errors::EndgameError;
use krk_endgame::game_state::chess_types::*;
use krk_endgame::game_state::game_outcome::game_outcome;
use krk_endgame::utils::game_driver::{play_game, GameRecord};
use krk_endgame::utils::notation::parse_square;
use krk_endgame::utils::scenario::load_scenarios;
use krk_endgame::utils::transcript::{describe_ply, game_header, TranscriptWriter};

/// King and rook against king: scripted scenarios or a single game.
#[derive(Parser, Debug)]
#[command(author, version, about = "KRK endgame player")]
struct Cli {
    /// Configuration file (default: $KRK_CONFIG, then ./krk.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search lookahead in plies
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// Maximum number of full moves per game
    #[arg(long, global = true)]
    moves: Option<u32>,

    /// Seed for tie-breaking; omit for a different game every run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Append the game report to this file
    #[arg(long, global = true, conflicts_with = "no_transcript")]
    transcript: Option<PathBuf>,

    /// Do not write a transcript
    #[arg(long, global = true, default_value_t = false)]
    no_transcript: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play every scenario in FILE, engine against engine
    Scenarios { file: PathBuf },

    /// Play one game; squares are (file,rank) like (1,8) or e5 and are
    /// asked for when omitted
    Play {
        #[arg(long)]
        kx: Option<String>,
        #[arg(long)]
        rx: Option<String>,
        #[arg(long)]
        ky: Option<String>,
        /// Let a human enter the moves of one side
        #[arg(long, value_enum)]
        human: Option<HumanSide>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum HumanSide {
    Attacker,
    Defender,
}

type Transcript = Option<TranscriptWriter<BufWriter<File>>>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(depth) = cli.depth {
        config.search.max_depth = depth;
    }
    if let Some(moves) = cli.moves {
        config.game.max_moves = moves;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }
    if let Some(path) = &cli.transcript {
        config.game.transcript_path = Some(path.clone());
    }
    if cli.no_transcript {
        config.game.transcript_path = None;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn open_transcript(config: &EngineConfig) -> Result<Transcript> {
    config
        .game
        .transcript_path
        .as_deref()
        .map(|path| {
            TranscriptWriter::append_to(path)
                .with_context(|| format!("failed to open transcript {}", path.display()))
        })
        .transpose()
}

fn run_game(
    start: Position,
    case_name: Option<&str>,
    config: &EngineConfig,
    attacker: &mut dyn Engine,
    defender: &mut dyn Engine,
    transcript: &mut Transcript,
) -> Result<GameRecord> {
    let ply_limit = config.game.ply_limit();
    print!("{}", game_header(case_name, &start, ply_limit));
    if let Some(writer) = transcript.as_mut() {
        writer.begin_game(case_name, &start, ply_limit)?;
    }

    let mut transcript_error = None;
    let record = play_game(start, ply_limit, attacker, defender, |ply| {
        print!("{}", describe_ply(ply, ply_limit));
        if let Some(writer) = transcript.as_mut() {
            if let Err(err) = writer.record_ply(ply, ply_limit) {
                transcript_error.get_or_insert(err);
            }
        }
    })?;

    if let Some(err) = transcript_error {
        return Err(err).context("failed to write transcript");
    }
    if let Some(writer) = transcript.as_mut() {
        writer.flush()?;
    }
    Ok(record)
}

/// Why `start` cannot be played, if it cannot.
fn unplayable(start: &Position, ply_limit: u32) -> Option<String> {
    if let Err(err) = start.validated() {
        return Some(err.to_string());
    }
    game_outcome(start, ply_limit).map(|outcome| format!("already decided ({outcome})"))
}

fn run_scenarios(file: &Path, config: &EngineConfig) -> Result<()> {
    let scenarios = load_scenarios(file)
        .with_context(|| format!("failed to read scenarios from {}", file.display()))?;
    let mut transcript = open_transcript(config)?;
    let mut summary = Vec::new();

    for scenario in &scenarios {
        let scenario = match scenario {
            Ok(scenario) => scenario,
            Err(err) => {
                warn!(%err, "skipping unparsable scenario");
                println!(
                    "There was an error parsing a test case ({err}). Skipping to the next case."
                );
                continue;
            }
        };
        if let Some(reason) = unplayable(&scenario.position, config.game.ply_limit()) {
            warn!(name = %scenario.name, line = scenario.line, %reason, "skipping scenario");
            println!(
                "Test case \"{}\" is not a legitimate starting state ({reason}). Skipping.",
                scenario.name
            );
            continue;
        }

        let mut attacker = MinimaxEngine::from_config(config, Side::Attacker);
        let mut defender = MinimaxEngine::from_config(config, Side::Defender);
        let record = run_game(
            scenario.position,
            Some(&scenario.name),
            config,
            &mut attacker,
            &mut defender,
            &mut transcript,
        )?;
        let outcome = record
            .outcome()
            .map_or_else(|| "unfinished".to_owned(), |outcome| outcome.to_string());
        summary.push(format!(
            "{}: {} after {} plies",
            scenario.name,
            outcome,
            record.plies.len()
        ));
    }

    println!("\nPlayed {} of {} scenarios", summary.len(), scenarios.len());
    for line in summary {
        println!("  {line}");
    }
    Ok(())
}

fn prompt_square(label: &str, input: &mut impl BufRead) -> Result<Square> {
    loop {
        print!("{label} >> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while reading {label}");
        }
        match parse_square(&line) {
            Ok(square) => return Ok(square),
            Err(err) => println!("{err}"),
        }
    }
}

fn square_arg(arg: Option<&str>, label: &str, input: &mut impl BufRead) -> Result<Square> {
    match arg {
        Some(text) => parse_square(text).with_context(|| format!("bad square for {label}")),
        None => prompt_square(label, input),
    }
}

/// Start position from the `play` arguments, prompting for missing squares.
///
/// A start that cannot be played is an error when every square came from the
/// command line; otherwise the prompts are asked again.
fn start_position(
    kx: Option<&str>,
    rx: Option<&str>,
    ky: Option<&str>,
    ply_limit: u32,
    input: &mut impl BufRead,
) -> Result<Position> {
    let interactive = kx.is_none() || rx.is_none() || ky.is_none();
    if interactive {
        println!("Please enter the squares as (file,rank), e.g. (1,2) is file 1, rank 2:");
    }

    loop {
        let kx = square_arg(kx, "Player X's king:", input)?;
        let rx = square_arg(rx, "Player X's rook:", input)?;
        let ky = square_arg(ky, "Player Y's king:", input)?;
        let start = Position::new(kx, Some(rx), ky, Side::Attacker);

        match unplayable(&start, ply_limit) {
            None => return Ok(start),
            Some(reason) if interactive => {
                println!(
                    "The initial state {start} cannot be played ({reason}). Please try again."
                );
            }
            Some(reason) => bail!("cannot start from {start}: {reason}"),
        }
    }
}

fn run_play(
    kx: Option<&str>,
    rx: Option<&str>,
    ky: Option<&str>,
    human: Option<HumanSide>,
    config: &EngineConfig,
) -> Result<()> {
    let start = start_position(
        kx,
        rx,
        ky,
        config.game.ply_limit(),
        &mut io::stdin().lock(),
    )?;

    let mut transcript = open_transcript(config)?;
    let mut console = ConsoleEngine::new(io::stdin().lock(), io::stdout());
    let mut attacker = MinimaxEngine::from_config(config, Side::Attacker);
    let mut defender = MinimaxEngine::from_config(config, Side::Defender);
    let (attacker, defender): (&mut dyn Engine, &mut dyn Engine) = match human {
        Some(HumanSide::Attacker) => (&mut console as &mut dyn Engine, &mut defender),
        Some(HumanSide::Defender) => (&mut attacker as &mut dyn Engine, &mut console),
        None => (&mut attacker as &mut dyn Engine, &mut defender),
    };

    run_game(start, None, config, attacker, defender, &mut transcript)?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let result = match &cli.command {
        Command::Scenarios { file } => run_scenarios(file, &config),
        Command::Play { kx, rx, ky, human } => run_play(
            kx.as_deref(),
            rx.as_deref(),
            ky.as_deref(),
            *human,
            &config,
        ),
    };

    if let Err(err) = &result {
        if let Some(EndgameError::Io(io_err)) = err.downcast_ref::<EndgameError>() {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                warn!("input closed, stopping");
                return Ok(());
            }
        }
    }
    result
}
