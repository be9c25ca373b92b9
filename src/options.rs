use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
Usage: npuzzle-solver <INPUT> [OPTIONS]

Solves every puzzle in INPUT. Puzzles are whitespace-separated tiles, 0 being
the blank, separated by blank lines.

Options:
  --parallel, par     Solve puzzles concurrently
  --sequential, seq   Solve puzzles one after another (default)
  --quiet             Do not print solution paths
  --node-limit N      Give up on a puzzle after N expansions
  --bench FILE        Write per-puzzle timings as CSV
  --out FILE          Write per-puzzle step counts
  --help              Show this message";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub parallel: bool,
    pub quiet: bool,
    pub node_limit: Option<usize>,
    pub bench: Option<PathBuf>,
    pub out: Option<PathBuf>,
}

impl Options {
    /// Parse arguments, not including the program name.
    ///
    /// Returns `None` if help was requested.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>> {
        let mut args = args.into_iter();
        let mut input = None;
        let mut opts = Options::default();

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .with_context(|| format!("Missing value for {name}"))
            };
            match arg.as_str() {
                "--help" | "-h" => return Ok(None),
                "--parallel" | "par" => opts.parallel = true,
                "--sequential" | "seq" => opts.parallel = false,
                "--quiet" | "-q" => opts.quiet = true,
                "--node-limit" => {
                    let n = value(&arg)?;
                    let n = n
                        .parse()
                        .with_context(|| format!("Invalid node limit: {n:?}"))?;
                    opts.node_limit = Some(n);
                }
                "--bench" => opts.bench = Some(value(&arg)?.into()),
                "--out" => opts.out = Some(value(&arg)?.into()),
                flag if flag.starts_with('-') => bail!("Unknown option: {flag}"),
                _ if input.is_some() => bail!("Unexpected argument: {arg}"),
                _ => input = Some(PathBuf::from(&arg)),
            }
        }

        opts.input = input.context("Missing input file argument")?;
        Ok(Some(opts))
    }
}
