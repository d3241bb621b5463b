//! Color-Stack Puzzle Solver
//!
//! Solves a stack of colored cubes by rotating each layer until every
//! lateral side of the stack shows each palette color exactly once. The
//! default instance is the classic four-cube puzzle; other instances can
//! be supplied on the command line.

use std::sync::atomic::Ordering::Relaxed;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;

use colorstack::cube::{Color, Layer, ORIENTATION_TOUR};
use colorstack::session::Session;
use colorstack::solver::{Report, SolveOutcome, Step};
use colorstack::stack::{self, format_stack, Puzzle, Stack};

/// Solves a color-stack cube puzzle.
#[derive(Parser)]
#[command(name = "colorstack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a stack, showing attempt progress.
    Solve(InstanceArgs),
    /// Solve while printing every move and leaf check.
    Trace(InstanceArgs),
    /// Print the 24-move orientation tour for a single layer.
    Tour,
}

#[derive(Args)]
struct InstanceArgs {
    /// Face colors of one layer in Right,Left,Top,Bottom,Back,Front order;
    /// repeat once per layer. Defaults to the classic four-cube instance.
    #[arg(long = "layer")]
    layers: Vec<String>,
    /// The color palette, one character per color.
    #[arg(long, default_value = stack::CLASSIC_PALETTE)]
    palette: String,
}

impl Default for InstanceArgs {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            palette: stack::CLASSIC_PALETTE.to_string(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(args)) => run_solve(args, false),
        Some(Command::Trace(args)) => run_solve(args, true),
        Some(Command::Tour) => {
            run_tour();
            Ok(())
        }
        None => run_solve(InstanceArgs::default(), false),
    }
}

/// Builds the puzzle and starting stack from command-line arguments.
fn build_instance(args: &InstanceArgs) -> anyhow::Result<(Puzzle, Stack)> {
    let specs: Vec<String> = if args.layers.is_empty() {
        stack::CLASSIC_LAYERS.iter().map(|s| s.to_string()).collect()
    } else {
        args.layers.clone()
    };
    let layers = specs
        .iter()
        .map(|spec| spec.parse::<Layer>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid layer")?;
    let palette: Vec<Color> = args.palette.chars().map(Color).collect();
    let puzzle = Puzzle::new(layers.len(), palette).context("invalid configuration")?;
    let stack = puzzle.stack(layers).context("invalid starting stack")?;
    Ok((puzzle, stack))
}

/// Solves the instance, wiring Ctrl+C to cooperative cancellation.
fn run_solve(args: InstanceArgs, trace: bool) -> anyhow::Result<()> {
    let (puzzle, stack) = build_instance(&args)?;
    let height = puzzle.height();
    let mut session = Session::new(puzzle);

    // Ctrl+C flips the shared flag; the search notices at its next step.
    let cancel = session.cancel_flag();
    ctrlc::set_handler(move || cancel.store(true, Relaxed))
        .context("failed to install Ctrl+C handler")?;

    // Leaf evaluations are bounded by the 24 orientations of each layer.
    let progress = (!trace).then(|| ProgressBar::new(24u64.pow(height as u32)));

    let started = match &progress {
        None => session.start(stack, |step| match step {
            Step::Move { layer, mv } => println!("layer {layer}: {mv}"),
            Step::Leaf { attempts } => println!("check #{attempts}"),
        }),
        Some(bar) => {
            let bar = bar.clone();
            session.start(stack, move |step| {
                if let Step::Leaf { attempts } = step {
                    bar.set_position(*attempts);
                }
            })
        }
    };
    started.expect("fresh session has no search in flight");

    let report = session.await_idle().expect("search was started");
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    match report.outcome {
        SolveOutcome::Solved => {
            println!("Solved after {} attempts", report.attempts);
            print!("{}", format_stack(&report.stack));
        }
        SolveOutcome::Exhausted => {
            println!(
                "No arrangement works; exhausted the search after {} attempts",
                report.attempts
            );
        }
        SolveOutcome::Cancelled => {
            println!("Cancelled after {} attempts", report.attempts);
        }
    }
}

/// Prints the orientation tour an animation driver would play per layer.
fn run_tour() {
    for (index, mv) in ORIENTATION_TOUR.iter().enumerate() {
        println!("{:>2}  {mv}", index + 1);
    }
}
