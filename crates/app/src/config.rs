//! Configuration for the huffpress binary.
//!
//! Arguments are parsed with clap, then resolved into a `Config` with every
//! default filled in. The tool works with zero arguments: without `--in` it
//! compresses generated sample text, and a seed taken from the clock is
//! announced on stderr so the run can be repeated.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

use crate::error::{AppError, Result};

/// Default size of generated sample input
pub const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "huffpress")]
#[command(version)]
#[command(about = "Huffman-compress a file and report the size reduction", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the implicit `compress` command
    #[command(flatten)]
    pub compress: CompressArgs,
}

impl Cli {
    /// The command to run; bare options mean `compress`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Compress(self.compress))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compress a file (or generated sample text)
    Compress(CompressArgs),

    /// Print the header and code table of a framed .huff file
    Inspect {
        /// Container to inspect
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    /// Input file (default: generate sample text)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(long = "out", value_name = "PATH", default_value = "./out.huff")]
    pub output: PathBuf,

    /// Output layout
    #[arg(long, value_enum, default_value_t = OutputFormat::Framed)]
    pub format: OutputFormat,

    /// Seed for sample generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of generated sample input
    #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
    pub sample_bytes: usize,

    /// Print the JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Embed the packed bytes in the JSON report
    #[arg(long, requires = "json")]
    pub include_data: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print metrics summary
    #[arg(long)]
    pub no_metrics: bool,
}

/// How the packed bytes are written out.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Packed bytes only
    Raw,
    /// Header, frequency table and packed bytes
    #[default]
    Framed,
}

/// Where the bytes to compress come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Sample { seed: u64, size_bytes: usize },
}

/// Complete configuration for a compression run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: InputSource,
    pub output_file: PathBuf,
    pub format: OutputFormat,
    pub json: bool,
    pub include_data: bool,
    pub print_config: bool,
    pub print_metrics: bool,
    /// The sample seed came from the clock rather than `--seed`
    pub seed_from_clock: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// Without `--in` the input is generated; the seed is taken from `--seed`
    /// or, failing that, from the clock.
    pub fn from_args(args: &CompressArgs) -> Result<Self> {
        let input = match &args.input {
            Some(path) => InputSource::File(path.clone()),
            None => {
                if args.sample_bytes == 0 {
                    return Err(AppError::Config(
                        "--sample-bytes must be at least 1".to_string(),
                    ));
                }
                InputSource::Sample {
                    seed: args.seed.unwrap_or_else(time_seed),
                    size_bytes: args.sample_bytes,
                }
            }
        };

        Ok(Config {
            input,
            output_file: args.output.clone(),
            format: args.format,
            json: args.json,
            include_data: args.include_data,
            print_config: args.print_config,
            print_metrics: !args.no_metrics && !args.json,
            seed_from_clock: args.input.is_none() && args.seed.is_none(),
        })
    }

    /// The configuration in human-readable form.
    pub fn describe(&self) -> String {
        let input = match &self.input {
            InputSource::File(path) => format!("Input file:  {}\n", path.display()),
            InputSource::Sample { seed, size_bytes } => format!(
                "Input:       generated sample ({} bytes)\nSeed:        {}\n",
                size_bytes, seed
            ),
        };

        format!(
            "=== Configuration ===\n{}Output file: {}\nFormat:      {:?}\n\n",
            input,
            self.output_file.display(),
            self.format
        )
    }

    /// Text to show before compressing, split as `(stdout, stderr)`.
    ///
    /// With `--json` the configuration goes to stderr so stdout stays a
    /// single JSON document.
    pub fn preamble(&self) -> (String, String) {
        if self.print_config {
            if self.json {
                (String::new(), self.describe())
            } else {
                (self.describe(), String::new())
            }
        } else {
            let notice = self
                .seed_notice()
                .map(|line| line + "\n")
                .unwrap_or_default();
            (String::new(), notice)
        }
    }

    /// A line announcing a clock-derived sample seed, if one was chosen.
    pub fn seed_notice(&self) -> Option<String> {
        match self.input {
            InputSource::Sample { seed, .. } if self.seed_from_clock => Some(format!(
                "Sample seed: {} (pass --seed {} to repeat this run)",
                seed, seed
            )),
            _ => None,
        }
    }
}

/// Map a `--log-level` value onto a tracing level.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(AppError::Config(format!("unknown log level: {}", other))),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("huffpress").chain(args.iter().copied())).unwrap()
    }

    fn compress_args(args: &[&str]) -> CompressArgs {
        let mut full = vec!["compress"];
        full.extend_from_slice(args);
        match parse(&full).into_command() {
            Command::Compress(args) => args,
            other => panic!("expected compress command, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&compress_args(&["--seed", "42"])).unwrap();

        assert_eq!(
            config.input,
            InputSource::Sample {
                seed: 42,
                size_bytes: DEFAULT_SAMPLE_BYTES,
            }
        );
        assert_eq!(config.output_file, PathBuf::from("./out.huff"));
        assert_eq!(config.format, OutputFormat::Framed);
        assert!(config.print_metrics);
        assert!(!config.json);
    }

    #[test]
    fn test_bare_options_mean_compress() {
        let command = parse(&["--seed", "7", "--sample-bytes", "100"]).into_command();
        let Command::Compress(args) = command else {
            panic!("expected compress command");
        };

        let config = Config::from_args(&args).unwrap();
        assert_eq!(
            config.input,
            InputSource::Sample {
                seed: 7,
                size_bytes: 100,
            }
        );
    }

    #[test]
    fn test_no_arguments() {
        assert!(matches!(parse(&[]).into_command(), Command::Compress(_)));
    }

    #[test]
    fn test_input_file() {
        let args = compress_args(&["--in", "notes.txt", "--out", "notes.huff", "--format", "raw"]);
        let config = Config::from_args(&args).unwrap();

        assert_eq!(config.input, InputSource::File(PathBuf::from("notes.txt")));
        assert_eq!(config.output_file, PathBuf::from("notes.huff"));
        assert_eq!(config.format, OutputFormat::Raw);
    }

    #[test]
    fn test_json_suppresses_metrics() {
        let config = Config::from_args(&compress_args(&["--json", "--include-data"])).unwrap();
        assert!(config.json);
        assert!(config.include_data);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_include_data_requires_json() {
        let result = Cli::try_parse_from(["huffpress", "compress", "--include-data"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_sample_bytes_rejected() {
        let result = Config::from_args(&compress_args(&["--sample-bytes", "0"]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_inspect_command() {
        let cli = parse(&["inspect", "out.huff", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(
            cli.into_command(),
            Command::Inspect { path } if path == PathBuf::from("out.huff")
        ));
    }

    #[test]
    fn test_clock_seed_is_announced() {
        let config = Config::from_args(&compress_args(&["--sample-bytes", "10"])).unwrap();
        assert!(config.seed_from_clock);

        let InputSource::Sample { seed, .. } = config.input else {
            panic!("expected sample input");
        };
        let notice = config.seed_notice().unwrap();
        assert!(notice.contains(&format!("--seed {}", seed)));
    }

    #[test]
    fn test_explicit_seed_is_not_announced() {
        let config = Config::from_args(&compress_args(&["--seed", "42"])).unwrap();
        assert!(!config.seed_from_clock);
        assert_eq!(config.seed_notice(), None);

        let config = Config::from_args(&compress_args(&["--in", "notes.txt"])).unwrap();
        assert_eq!(config.seed_notice(), None);
    }

    #[test]
    fn test_describe() {
        let args = compress_args(&["--seed", "9", "--format", "raw"]);
        let text = Config::from_args(&args).unwrap().describe();

        assert!(text.starts_with("=== Configuration ===\n"));
        assert!(text.contains("Seed:        9\n"));
        assert!(text.contains("Format:      Raw\n"));
    }

    #[test]
    fn test_preamble_keeps_json_stdout_clean() {
        let args = compress_args(&["--seed", "3", "--json", "--print-config"]);
        let (stdout, stderr) = Config::from_args(&args).unwrap().preamble();
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("=== Configuration ===\n"));

        let args = compress_args(&["--seed", "3", "--print-config"]);
        let (stdout, stderr) = Config::from_args(&args).unwrap().preamble();
        assert!(stdout.starts_with("=== Configuration ===\n"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_preamble_announces_clock_seed() {
        let config = Config::from_args(&compress_args(&["--json"])).unwrap();
        let (stdout, stderr) = config.preamble();
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("Sample seed: "));
        assert!(stderr.ends_with('\n'));

        let config = Config::from_args(&compress_args(&["--seed", "5"])).unwrap();
        assert_eq!(config.preamble(), (String::new(), String::new()));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert!(parse_log_level("loud").is_err());
    }
}
