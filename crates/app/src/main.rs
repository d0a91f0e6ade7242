//! huffpress: Huffman-compress a file and report the size reduction
//!
//! ## Usage
//!
//! ```bash
//! # Compress generated sample text (the chosen seed is printed to stderr)
//! huffpress
//!
//! # Compress a file into a framed container
//! huffpress --in notes.txt --out notes.huff
//!
//! # Raw packed bytes plus a JSON report
//! huffpress compress --in notes.txt --format raw --json --include-data
//!
//! # Look inside a container
//! huffpress inspect notes.huff
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use huffpress::config::{parse_log_level, Cli, Command, Config};
use huffpress::run::{inspect, run_compress};
use huffpress::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match parse_log_level(&cli.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
    }

    match execute(cli.into_command()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Compress(args) => {
            let config = Config::from_args(&args)?;
            let (stdout, stderr) = config.preamble();
            print!("{}", stdout);
            eprint!("{}", stderr);

            let outcome = run_compress(&config)?;

            if config.json {
                println!("{}", outcome.report(config.include_data).to_json()?);
                return Ok(());
            }

            println!(
                "Compressed {} -> {} bytes ({}% smaller), wrote {} bytes to {}",
                outcome.result.original_size,
                outcome.result.compressed_size,
                outcome.result.percentage_string(),
                outcome.written_bytes,
                config.output_file.display()
            );

            if config.print_metrics {
                outcome.metrics.print_summary();
            }
        }
        Command::Inspect { path } => {
            print!("{}", inspect(&path)?);
        }
    }

    Ok(())
}
