//! Lumo command-line renderer.
//!
//! Usage: lumo <job.json> [output.png]

mod job;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use crate::job::Job;

const DEFAULT_OUTPUT: &str = "output.png";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <job.json> [output.png]", args[0]);
        std::process::exit(1);
    }

    let job_path = PathBuf::from(&args[1]);
    let output = PathBuf::from(args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT));

    log::info!("Starting Lumo: {}", job_path.display());
    let start = Instant::now();

    let (scene, tracer) = Job::load(&job_path)?.prepare()?;
    tracer.render(&scene, Some(&output))?;

    log::info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
