// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use capalign::app_config::{self, Config};
use capalign::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean downloaded caption files: collapse redundant language variants
    /// and dedupe auto-generated rolling captions
    Clean(CleanArgs),

    /// Align grouping-service sentence proposals against a caption file and
    /// write a per-sentence SRT
    Align(AlignArgs),

    /// Generate shell completions for capalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CleanArgs {
    /// Caption file or directory to clean (in place)
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Caption language tag used for variant suffix detection
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Caption file providing the cue timing
    #[arg(value_name = "CAPTIONS")]
    captions: PathBuf,

    /// JSON file with the grouping service's sentence proposals
    #[arg(value_name = "PROPOSALS")]
    proposals: PathBuf,

    /// Output SRT path (defaults to <captions>.aligned.srt next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// capalign - Caption Cleaning and Alignment
///
/// Cleans noisy downloaded YouTube captions (duplicate language variants,
/// rolling auto-caption repeats) and realigns externally-grouped sentences
/// back onto cue timing.
#[derive(Parser, Debug)]
#[command(name = "capalign")]
#[command(version = "0.3.0")]
#[command(about = "Caption cleaning and sentence alignment tool")]
#[command(long_about = "capalign cleans caption files downloaded alongside YouTube videos and
realigns sentence groupings produced by an external text service.

EXAMPLES:
    capalign clean video.en.srt                 # Dedupe one rolling caption file in place
    capalign clean /downloads/                  # Collapse variants, then clean the folder
    capalign clean -L ko /downloads/            # Use Korean variant suffixes
    capalign align video.en.srt groups.json     # Write video.en.aligned.srt
    capalign align -o out.srt -f video.en.srt groups.json
    capalign completions bash > capalign.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "capalign", &mut std::io::stdout());
            Ok(())
        }
        Commands::Clean(args) => run_clean(args),
        Commands::Align(args) => run_align(args),
    }
}

fn run_clean(args: CleanArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, args.log_level.as_ref())?;
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;

    if args.input_path.is_file() {
        controller.run_clean(&args.input_path)
    } else if args.input_path.is_dir() {
        controller.run_clean_folder(&args.input_path)
    } else {
        Err(anyhow::anyhow!("Input path does not exist: {:?}", args.input_path))
    }
}

fn run_align(args: AlignArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level.as_ref())?;
    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_align(
        &args.captions,
        &args.proposals,
        args.output,
        args.force_overwrite,
    )?;
    Ok(())
}

/// Load the configuration, creating a default one when missing, and apply
/// the command-line log level (which wins over the configured level).
fn load_config(config_path: &str, cmd_log_level: Option<&CliLogLevel>) -> Result<Config> {
    if let Some(level) = cmd_log_level {
        let config_level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level_filter(&config_level));
    }

    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(level) = cmd_log_level {
            config.log_level = level.clone().into();
        }
        config
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();
        if let Some(level) = cmd_log_level {
            config.log_level = level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if cmd_log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}
