// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::error;

use pptx_translator::app_config::{Config, LogLevel};
use pptx_translator::app_controller::Controller;

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

/// pptx-translator - batch deck translation
///
/// Translates every .pptx file in the input directory from the source
/// language to the destination language using Amazon Translate, optionally
/// applying a custom terminology.
#[derive(Parser, Debug)]
#[command(name = "pptx-translator")]
#[command(version)]
#[command(about = "Translates pptx files from source language to target language")]
#[command(long_about = "Translates every .pptx file found in the input directory, shrinking \
font sizes so the translated text still fits and tagging it with the destination language.

EXAMPLES:
    pptx-translator -s en -d fr                    # Translate workspace/ from English to French
    pptx-translator -s en -d de -t terms.csv       # Apply a custom terminology
    pptx-translator --input-dir decks -s en -d ja  # Translate a different directory
    pptx-translator --log-level debug -s en -d es  # Verbose logging

CONFIGURATION:
    Settings are read from conf.json by default (use --config for a different
    file); command-line flags override file values. AWS credentials come from
    the standard environment variables (AWS_ACCESS_KEY_ID,
    AWS_SECRET_ACCESS_KEY, optionally AWS_SESSION_TOKEN and AWS_REGION).")]
struct CommandLineOptions {
    /// The path of the terminology CSV file
    #[arg(short = 't', long = "terminology")]
    terminology: Option<PathBuf>,

    /// The source language code (e.g. 'en')
    #[arg(short = 's', long = "source-lang")]
    source_lang: Option<String>,

    /// The destination language code (e.g. 'fr')
    #[arg(short = 'd', long = "dest-lang")]
    dest_lang: Option<String>,

    /// Directory scanned for .pptx files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory translated decks are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn build_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::from_file_or_default(&options.config_path)?;
    if let Some(source_lang) = &options.source_lang {
        config.source_language = source_lang.clone();
    }
    if let Some(dest_lang) = &options.dest_lang {
        config.dest_language = dest_lang.clone();
    }
    if let Some(terminology) = &options.terminology {
        config.terminology_file = Some(terminology.clone());
    }
    if let Some(input_dir) = &options.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = Some(output_dir.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    Ok(config)
}

fn main() -> ExitCode {
    let options = CommandLineOptions::parse();

    let config = match build_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .format_timestamp(None)
        .init();

    let controller = match Controller::with_config(config) {
        Ok(controller) => controller,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match controller.run() {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            error!("{} deck(s) failed to translate", summary.failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
