//! Command line driver.
//!
//! Usage: `pixel_evolver <generations> <log_every> [target.png] [config.json]`

use pixel_evolver::archive::ImageDirectory;
use pixel_evolver::{Error, Evolver, EvolverConfig};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: pixel_evolver <generations> <log_every> [target.png] [config.json]";

#[derive(Debug)]
struct Args {
    generations: u64,
    log_every: u64,
    target: PathBuf,
    config: Option<PathBuf>,
}

fn parse_count(name: &str, value: Option<String>) -> Result<u64, String> {
    let Some(value) = value else {
        return Err(format!("missing {name}"));
    };
    match value.parse::<u64>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("{name} must be a positive integer, got \"{value}\"")),
    }
}

/// Read the command line arguments. The first item is the program name.
fn get_args(mut arg_iter: impl Iterator<Item = String>) -> Result<Args, String> {
    let _program = arg_iter.next();
    let generations = parse_count("generations", arg_iter.next())?;
    let log_every = parse_count("log_every", arg_iter.next())?;
    let target = arg_iter.next().unwrap_or_else(|| "target.png".to_string());
    let config = arg_iter.next();
    if let Some(item) = arg_iter.next() {
        return Err(format!("unexpected parameter \"{item}\""));
    }
    Ok(Args {
        generations,
        log_every,
        target: target.into(),
        config: config.map(PathBuf::from),
    })
}

fn run(args: &Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => EvolverConfig::load(path)?,
        None => EvolverConfig::default(),
    };
    let output_dir = config.output_dir.clone();
    let mut evolver = Evolver::open(&args.target, config)?;
    let mut archive = ImageDirectory::new(&output_dir);
    let history = evolver.run(args.generations, args.log_every, &mut archive)?;
    if let Some((generation, score)) = history.last() {
        log::info!("finished after generation {generation} with best score {score}");
    }
    evolver.save_history(output_dir.join("history.txt"))?;
    Ok(())
}

fn main() -> ExitCode {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = match get_args(std::env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Argument Error: {message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
