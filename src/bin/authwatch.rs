use std::path::{Path, PathBuf};
use structopt::StructOpt;

use authwatch::config::Config;
use authwatch::input::has_accepted_extension;
use authwatch::output::{OutputFormat, OutputHandler};
use authwatch::{FileAuditSink, LogAnalyzer};

/// SSH authentication log analyzer
#[derive(StructOpt, Debug)]
#[structopt(name = "authwatch", about = "SSH authentication log analyzer")]
struct Cli {
    /// Path to configuration file
    #[structopt(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Ingest a log file and print the report
    Analyze {
        /// Path to a .txt or .log file
        file: PathBuf,
    },
    /// Ingest a log file or inline log text without reporting
    Ingest {
        /// Path to a .txt or .log file
        file: Option<PathBuf>,
        /// Log content to ingest instead of a file
        #[structopt(long)]
        text: Option<String>,
    },
    /// Print the current report
    Report {
        /// Output format: text or json (defaults to the configured format)
        #[structopt(short, long)]
        format: Option<String>,
    },
    /// Delete all stored events and record the reset
    Reset,
    /// Show recorded resets
    History,
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

fn check_extension(file: &Path) {
    if !has_accepted_extension(file) {
        eprintln!("Invalid file type. Only .txt or .log files are allowed: {:?}", file);
        std::process::exit(1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::from_args();

    match cli.command {
        Command::Config { output } => {
            Config::default().to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Command::Analyze { file } => {
            check_extension(&file);
            let config = Config::load_or_default(&cli.config)?;
            let analyzer = LogAnalyzer::from_config(&config)?;
            println!("{}", analyzer.ingest_file(&file)?);
            print!("{}", analyzer.render_report()?);
        }
        Command::Ingest { file, text } => {
            if let Some(ref file) = file {
                check_extension(file);
            }
            let config = Config::load_or_default(&cli.config)?;
            let analyzer = LogAnalyzer::from_config(&config)?;
            println!("{}", analyzer.ingest_from(file.as_deref(), text.as_deref())?);
        }
        Command::Report { format } => {
            let config = Config::load_or_default(&cli.config)?;
            let analyzer = LogAnalyzer::from_config(&config)?;
            let format: OutputFormat = format.as_deref().unwrap_or(&config.report.format).parse()?;
            let mut output = OutputHandler::new(format, None)?;
            output.write_summary(&analyzer.report()?)?;
        }
        Command::Reset => {
            let config = Config::load_or_default(&cli.config)?;
            let analyzer = LogAnalyzer::from_config(&config)?;
            println!("{}", analyzer.reset()?);
        }
        Command::History => {
            let config = Config::load_or_default(&cli.config)?;
            let sink = FileAuditSink::new(&config.storage.audit_log_path);
            let entries = sink.entries()?;
            if entries.is_empty() {
                println!("No resets recorded in {:?}", sink.path());
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
    }

    Ok(())
}
