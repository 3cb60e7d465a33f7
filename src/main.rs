use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};

use grepy::{build_dfa, build_nfa, serialize};

const DEFAULT_NFA_FILE: &str = "nfa.dot";
const DEFAULT_DFA_FILE: &str = "dfa.dot";

/// Compiles a regex to an NFA and a DFA, writes both as DOT files and prints
/// every line of the input file the regex accepts.
#[derive(Parser)]
#[command(name = "grepy", version)]
struct Args {
    /// Regex using `+` for union, `*` for Kleene star and parentheses for grouping.
    regex: String,
    /// File of candidate strings, one per line. Its characters form the alphabet.
    input: PathBuf,
    /// The dot file to write the NFA to.
    #[arg(short, long, default_value = DEFAULT_NFA_FILE)]
    nfa: PathBuf,
    /// The dot file to write the DFA to.
    #[arg(short, long, default_value = DEFAULT_DFA_FILE)]
    dfa: PathBuf,
    /// Extra symbols to add to the alphabet.
    #[arg(short, long, default_value = "")]
    alphabet: String,
    /// Verbose mode.
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    Ok(content.lines().map(str::to_owned).collect())
}

fn write_dot(path: &Path, dot: &str) -> Result<()> {
    fs::write(path, dot).with_context(|| format!("failed to write {}", path.display()))
}

fn run(args: &Args) -> Result<bool> {
    let lines = read_input(&args.input)?;
    let alphabet: BTreeSet<char> = lines
        .iter()
        .flat_map(|line| line.chars())
        .chain(args.alphabet.chars())
        .collect();
    debug!("alphabet: {:?}", alphabet);

    info!("Creating NFA...");
    let nfa = build_nfa(&args.regex, &alphabet)
        .with_context(|| format!("error parsing regex {:?}", args.regex))?;
    info!("Writing NFA to {}", args.nfa.display());
    write_dot(&args.nfa, &serialize(&nfa))?;

    info!("Creating DFA...");
    let dfa = build_dfa(&nfa, &alphabet);
    info!("Writing DFA to {}", args.dfa.display());
    write_dot(&args.dfa, &serialize(&dfa))?;

    let mut any_accepted = false;
    for line in &lines {
        let accepted = dfa.accepts(line);
        debug!("{} {:?}", if accepted { "accept" } else { "reject" }, line);
        if accepted {
            println!("{}", line);
            any_accepted = true;
        }
    }
    info!("DONE");
    Ok(any_accepted)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();
    if args.verbose {
        info!("{} version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }

    if !run(&args)? {
        process::exit(1);
    }
    Ok(())
}
