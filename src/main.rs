// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use trackpick::app_config::{Config, LogLevel};
use trackpick::errors::AppError;
use trackpick::mkvtoolnix::{self, MKVMERGE, MKVPROPEDIT, MkvToolNix};
use trackpick::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite default track flags of the containers in a directory (default command)
    Run(RunArgs),

    /// Report whether the MKVToolNix executables are available
    Check,

    /// Generate shell completions for trackpick
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct RunArgs {
    /// Directory containing the container files (defaults to the current directory)
    #[arg(value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Target audio language code (e.g., 'jpn', 'ja')
    #[arg(short, long)]
    audio_language: Option<String>,

    /// Target subtitle language code (e.g., 'eng', 'en')
    #[arg(short, long)]
    subtitle_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Decide and log the edits without applying them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Also process containers in subdirectories
    #[arg(short, long)]
    recursive: bool,
}

/// trackpick - default track picker for Matroska files
///
/// Sets the default audio track to the preferred audio language and the
/// default subtitle track to the preferred subtitle language, skipping
/// commentary and song tracks, for every container in a directory.
#[derive(Parser, Debug)]
#[command(name = "trackpick")]
#[command(version)]
#[command(about = "Rewrite default audio/subtitle track flags of Matroska files")]
#[command(long_about = "trackpick inspects every Matroska file in a directory with mkvmerge and \
rewrites the default-track flags with mkvpropedit.

EXAMPLES:
    trackpick                          # Process the current directory with conf.json
    trackpick /media/anime             # Process another directory
    trackpick -a ja -s en .            # Japanese audio, English subtitles
    trackpick -n --log-level debug .   # Show every decision without editing files
    trackpick check                    # Verify mkvmerge and mkvpropedit are installed
    trackpick completions bash > trackpick.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation, filtering on the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "trackpick", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check) => run_check().await,
        Some(Commands::Run(args)) => run(args).await,
        None => run(cli.run).await,
    }
}

async fn run_check() -> Result<()> {
    let mut missing = Vec::new();
    for name in [MKVMERGE, MKVPROPEDIT] {
        let tool = mkvtoolnix::check_tool(name).await;
        if tool.available {
            info!(
                "{} found at {:?} ({})",
                tool.name,
                tool.path.unwrap_or_default(),
                tool.version.as_deref().unwrap_or("unknown version")
            );
        } else {
            error!("{} not found", tool.name);
            missing.push(tool.name);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Environment(format!("missing tools: {}", missing.join(", "))).into())
    }
}

async fn run(options: RunArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(LogLevel::from(level.clone()).into());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(audio_language) = &options.audio_language {
        config.audio_lang = audio_language.clone();
    }
    if let Some(subtitle_language) = &options.subtitle_language {
        config.subs_lang = subtitle_language.clone();
    }
    if options.recursive {
        config.recursive = true;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    config
        .validate()
        .map_err(AppError::from)
        .context("Configuration validation failed")?;
    info!("target languages: {}", config.describe_targets());

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    info!("looking for mkvtoolnix...");
    let tools = match MkvToolNix::locate() {
        Ok(tools) => tools,
        Err(e) => {
            error!("mkvtoolnix must be installed: {}", e);
            return Err(AppError::Environment(e.to_string()).into());
        }
    };
    info!("mkvtoolnix found");

    let input_dir = match options.input_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    if options.dry_run {
        warn!("dry run: no file will be modified");
    }

    let controller = Controller::new(config, tools).with_dry_run(options.dry_run);
    controller.run_folder(&input_dir).await?;

    Ok(())
}
