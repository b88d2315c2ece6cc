use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use slider_search::search::DEFAULT_DEPTH_LIMIT;
use slider_search::{solve, Board, BoardRecall, SearchConfig, Strategy};

#[derive(Debug, Parser)]
#[command(name = "slider-search", about = "Solve a sliding tile puzzle read from a file")]
struct Args {
    /// Search strategy: dfs, bfs or astr
    strategy: String,

    /// Move order for dfs/bfs (e.g. RLUD), heuristic for astr (manh or hamm)
    option: String,

    /// Puzzle file: "<width> <height>" then one line per row
    input: PathBuf,

    /// Where to write the move count and moves
    solution: PathBuf,

    /// Where to write the run statistics
    stats: PathBuf,

    /// Depth bound for dfs and bfs
    #[arg(short, long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    depth: usize,

    /// Give up after this many node expansions
    #[arg(long)]
    max_expansions: Option<u64>,

    /// Keep each node's board instead of replaying moves from the start
    #[arg(long)]
    cached: bool,

    /// Also print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Option errors surface before the input is even read.
    let strategy = Strategy::parse(&args.strategy, &args.option)?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read puzzle {}", args.input.display()))?;
    let board: Board = text
        .parse()
        .with_context(|| format!("invalid puzzle in {}", args.input.display()))?;
    info!("loaded {}x{} puzzle", board.width(), board.height());

    let config = SearchConfig::new(strategy)
        .with_depth_limit(args.depth)
        .with_max_expansions(args.max_expansions)
        .with_recall(if args.cached {
            BoardRecall::Cached
        } else {
            BoardRecall::Replay
        });
    let report = solve(board, &config);

    fs::write(&args.solution, report.result_text())
        .with_context(|| format!("failed to write {}", args.solution.display()))?;
    fs::write(&args.stats, report.stats_text())
        .with_context(|| format!("failed to write {}", args.stats.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
