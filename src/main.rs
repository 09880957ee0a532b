//! doc-langid: office document language identification

use anyhow::Context;
use clap::Parser;
use doc_langid::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use doc_langid::config::{Config, OutputFormat};
use doc_langid::detection::reliability::ReliabilityPolicy;
use doc_langid::detection::{LanguageClassifier, ModelCache};
use doc_langid::input::InputManager;
use doc_langid::models::ModelManager;
use doc_langid::output::ReportGenerator;
use doc_langid::pipeline::DocumentPipeline;
use doc_langid::LangIdError;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> doc_langid::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn resolve_format(arg: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match arg {
        Some(format) => cli::parse_output_format(format)
            .map_err(|e| anyhow::Error::new(LangIdError::InvalidInput(e))),
        None => Ok(config.output.format),
    }
}

fn build_classifier(config: &Config) -> LanguageClassifier {
    let policy = ReliabilityPolicy::new(config.detection.min_reliable_chars);
    LanguageClassifier::new(ModelCache::global(), policy)
}

/// Fetch the configured model when it is missing. Failure is reported but not fatal:
/// detection will then report the model as not found.
async fn bootstrap_model(config: &Config) -> PathBuf {
    let model_path = config.model_path();
    if model_path.is_file() {
        return model_path;
    }

    let manager = match ModelManager::new(&config.model) {
        Ok(manager) => manager,
        Err(e) => {
            warn!("Model download unavailable: {}", e);
            return model_path;
        }
    };

    println!("Model not found, downloading to {}", model_path.display());
    match manager.ensure_model(false).await {
        Ok(path) => {
            println!("Model download complete.");
            path
        }
        Err(e) => {
            println!("Model download failed: {}", e);
            model_path
        }
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Detect {
            files,
            model,
            output,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let model_path = match model {
                Some(path) => path,
                None => bootstrap_model(&config).await,
            };

            let input = InputManager::new(&config.extraction);
            let mut pipeline = DocumentPipeline::new(input, build_classifier(&config), model_path);
            info!("Using model: {}", pipeline.model_path().display());

            let mut reports = Vec::with_capacity(files.len());
            for file in &files {
                reports.push(pipeline.process(file).await);
            }

            let generator = ReportGenerator::new(
                config.output.color_output,
                detailed || config.output.detailed,
            );
            print!("{}", generator.generate_batch(&reports, format)?);
            if format == OutputFormat::Json {
                println!();
            }
        }

        Commands::Text {
            text,
            model,
            output,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let model_path = match model {
                Some(path) => path,
                None => bootstrap_model(&config).await,
            };

            let input = InputManager::new(&config.extraction);
            let pipeline = DocumentPipeline::new(input, build_classifier(&config), model_path);
            let report = pipeline.process_text(&text).await;

            let generator = ReportGenerator::new(config.output.color_output, config.output.detailed);
            println!("{}", generator.generate_report(&report, format)?);
        }

        Commands::Models { action } => {
            let manager = ModelManager::new(&config.model)?;

            match action {
                ModelAction::Download { force } => {
                    if !force && manager.is_model_downloaded() {
                        println!("Model already present: {}", manager.model_path().display());
                        println!("Use --force to re-download");
                        return Ok(());
                    }

                    println!("Downloading model from {}", config.model.download_url);
                    let path = manager
                        .ensure_model(force)
                        .await
                        .context("Model download failed")?;
                    println!("Model saved to {}", path.display());
                }

                ModelAction::Remove => {
                    if manager.remove_model().await? {
                        println!("Removed {}", manager.model_path().display());
                    } else {
                        println!("No model file at {}", manager.model_path().display());
                    }
                }

                ModelAction::Info => {
                    let info = manager.model_info().await;
                    println!("Path:     {}", info.path.display());
                    println!("Source:   {}", info.source_url);
                    println!(
                        "Status:   {}",
                        if info.downloaded { "downloaded" } else { "not downloaded" }
                    );
                    if let Some(size) = info.size_bytes {
                        println!("Size:     {:.1} MB", size as f64 / (1024.0 * 1024.0));
                    }
                    if let Some(modified) = info.modified {
                        println!("Modified: {}", modified.format("%Y-%m-%d %H:%M:%S UTC"));
                    }
                    if !info.downloaded {
                        println!("\nTo download the model, run:");
                        println!("   doc-langid models download");
                    }
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration ({})\n", path.display());
                    println!("Model file:        {}", config.model_path().display());
                    println!("Model source:      {}", config.model.download_url);
                    println!("Tika endpoint:     {}", config.extraction.tika_endpoint);
                    println!("Request timeout:   {}s", config.extraction.timeout_secs);
                    println!("Min reliable chars: {}", config.detection.min_reliable_chars);
                    println!("Output format:     {:?}", config.output.format);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
