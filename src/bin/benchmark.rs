use clap::Parser;
use colored::Colorize;
use connectx::playout::run_batch;
use connectx::{Board, GameState, Marker, Player, PlayoutSummary, RulesConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rows (default: 6)
    #[arg(long, default_value_t = 6)]
    rows: usize,

    /// Number of columns (default: 7)
    #[arg(long, default_value_t = 7)]
    columns: usize,

    /// Length of a winning run (default: 4)
    #[arg(long, default_value_t = 4)]
    run_length: usize,

    /// Number of players (default: 2)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Number of random playouts per benchmark (default: 1000)
    #[arg(long, default_value_t = 1000)]
    playouts: usize,

    /// Base seed; playout i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads for the playout pool. 0 lets rayon decide.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Evaluate the draw oracle on its own thread pool.
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    parallel_oracle: bool,

    /// Rules configuration file (TOML). Defaults apply when missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity ("error" | "warn" | "info" | "debug" | "trace")
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.parse().unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => RulesConfig::load_or_default(path)?,
        None => RulesConfig::default(),
    };
    config.parallel_oracle |= args.parallel_oracle;

    println!("{}", "Connect X Rules - Early Draw Benchmark".bold());
    println!("======================================");
    println!("Board: {}x{}", args.rows, args.columns);
    println!("Run Length: {}", args.run_length);
    println!("Players: {}", args.players);
    println!("Playouts: {}", args.playouts);
    println!("Seed: {}", args.seed);
    println!("Parallel Oracle: {}", config.parallel_oracle);
    println!("--------------------------------------");

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Performance will be significantly lower.\nUse --release for accurate benchmarks.\n");

    let players = make_players(args.players)?;

    println!("\nRunning with early-draw detection...");
    let with_oracle = game(args, players.clone(), &config)?;
    let start = Instant::now();
    let summary = run_batch(&with_oracle, args.playouts, args.seed, args.threads, false)?;
    print_stats("Oracle", &summary, start.elapsed());

    println!("\nRunning to a full board...");
    let plain_config = RulesConfig {
        detect_early_draw: false,
        ..config.clone()
    };
    let without_oracle = game(args, players, &plain_config)?;
    let start = Instant::now();
    let summary = run_batch(&without_oracle, args.playouts, args.seed, args.threads, false)?;
    print_stats("Plain", &summary, start.elapsed());

    Ok(())
}

fn game(args: &Args, players: Vec<Player>, config: &RulesConfig) -> Result<GameState, connectx::RulesError> {
    let board = Board::new(args.rows, args.columns, config)?;
    GameState::new(board, players, args.run_length, config)
}

/// Named colours first, then custom markers
fn make_players(count: usize) -> Result<Vec<Player>, connectx::RulesError> {
    let named = [
        Marker::RED,
        Marker::YELLOW,
        Marker::BLUE,
        Marker::GREEN,
        Marker::BLACK,
        Marker::WHITE,
    ];
    (0..count)
        .map(|i| {
            let marker = named
                .get(i)
                .copied()
                .or_else(|| u8::try_from(i - named.len()).ok().and_then(Marker::custom))
                .ok_or(connectx::RulesError::InvalidPlayerCount {
                    players: count,
                    max: named.len() + Marker::CUSTOM_COUNT,
                })?;
            Player::new(format!("Player {}", i + 1), marker)
        })
        .collect()
}

fn print_stats(name: &str, summary: &PlayoutSummary, duration: Duration) {
    let secs = duration.as_secs_f64();
    let pps = summary.playouts as f64 / secs;

    println!("{} Results:", name.cyan().bold());
    println!("  Playouts: {}", summary.playouts);
    println!("  Time: {:.3}s", secs);
    println!("  PPS: {:.0} playouts/sec", pps);
    println!("  Avg Moves: {:.1}", summary.average_moves());
    let mut wins: Vec<_> = summary.wins.iter().collect();
    wins.sort();
    for (marker, count) in wins {
        println!("  Wins {}: {}", marker.painted(), count);
    }
    println!("  Full Board Draws: {}", summary.full_board_draws);
    println!("  Early Draws: {}", summary.early_draws.to_string().green());
    println!("  Cells Saved: {}", summary.cells_saved);
    if summary.retracted_draws > 0 {
        println!("  Retracted Draws: {}", summary.retracted_draws.to_string().red().bold());
    }
}
