use std::fmt::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use npuzzle_solver::batch::{self, Report};
use npuzzle_solver::{parse_batch, Board, Outcome, Solver};

use crate::options::{Options, USAGE};

mod options;

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn solve_seq(solver: &Solver, boards: Vec<Board>) -> Result<Vec<Report>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {pos} nodes expanded",
    )?);

    let mut pending = 0;
    let reports = batch::solve_seq(solver, boards, || {
        pending += 1;
        if pending == 4096 {
            pb.inc(pending);
            pending = 0;
        }
    });
    pb.finish_and_clear();
    Ok(reports)
}

fn solve_par(solver: &Solver, boards: Vec<Board>) -> Result<Vec<Report>> {
    let pb = ProgressBar::new(boards.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} puzzles")?
            .progress_chars("##-"),
    );

    let reports = batch::solve_par(solver, boards, |_| pb.inc(1));
    pb.finish_and_clear();
    Ok(reports)
}

fn print_reports(opts: &Options, reports: &[Report]) {
    for (report, i) in reports.iter().zip(1..) {
        let result = &report.result;
        println!("Solution for puzzle {i}");
        match result.outcome {
            Outcome::Found => {
                if !opts.quiet {
                    for state in &result.path {
                        print!("{state}");
                    }
                }
                println!(
                    "Solved in {} steps, expanded {} nodes\n",
                    result.path.len() - 1,
                    result.nodes_expanded,
                );
            }
            Outcome::Exhausted => println!(
                "{}, expanded {} nodes\n",
                style("No solution").red(),
                result.nodes_expanded,
            ),
            Outcome::Aborted => println!(
                "{} after expanding {} nodes\n",
                style("Gave up").yellow(),
                result.nodes_expanded,
            ),
        }
    }

    for (report, i) in reports.iter().zip(1..) {
        println!("Puzzle {i} took {:.3} ms", ms(report.elapsed));
    }
}

fn write_files(opts: &Options, reports: &[Report], total: Duration) -> Result<()> {
    if let Some(path) = &opts.bench {
        let mut bench = String::new();
        for (report, i) in reports.iter().zip(1..) {
            writeln!(bench, "{i}, {:.3}", ms(report.elapsed)).unwrap();
        }
        write!(bench, "total, {:.3}", ms(total)).unwrap();
        std::fs::write(path, bench)
            .with_context(|| format!("Failed to write the bench file {}", path.display()))?;
    }

    if let Some(path) = &opts.out {
        let mut out = String::new();
        for report in reports {
            match report.result.outcome {
                Outcome::Found => writeln!(out, "{} steps", report.result.path.len() - 1),
                Outcome::Exhausted => writeln!(out, "no solution"),
                Outcome::Aborted => writeln!(out, "aborted"),
            }
            .unwrap();
        }
        std::fs::write(path, out)
            .with_context(|| format!("Failed to write the output file {}", path.display()))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(opts) = Options::parse(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let start = Instant::now();
    let data = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("Failed to read {}", opts.input.display()))?;
    let boards = parse_batch(&data).context("Failed to parse the puzzles")?;

    let mut solver = Solver::new();
    if let Some(limit) = opts.node_limit {
        solver = solver.node_limit(limit);
    }

    println!("Running for {} puzzle input(s)...\n", boards.len());
    let reports = if opts.parallel {
        solve_par(&solver, boards)?
    } else {
        solve_seq(&solver, boards)?
    };

    print_reports(&opts, &reports);

    let total = reports.iter().map(|r| r.elapsed).sum::<Duration>();
    let nodes = reports
        .iter()
        .map(|r| r.result.nodes_expanded)
        .sum::<usize>();
    let solved = reports
        .iter()
        .filter(|r| r.result.outcome == Outcome::Found)
        .count();
    log::info!("Solved {solved} of {} puzzles", reports.len());

    write_files(&opts, &reports, total)?;

    println!("Total: {:.3} ms, {nodes} nodes expanded", ms(total));
    println!("End-to-end: {:.3} ms", ms(start.elapsed()));
    Ok(())
}
