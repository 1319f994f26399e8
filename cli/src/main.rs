//! CLI entrypoint for consult-sim
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use consult_application::{
    ConversationLogger, NoConversationLogger, NoProgress, ProgressNotifier, RunConsultationUseCase,
};
use consult_domain::OutputFormat;
use consult_infrastructure::{
    ConfigLoader, FileConfig, JsonFileCaseSink, JsonlConversationLogger, OpenAiCompletionClient,
    TemplateFactValidator,
};
use consult_presentation::{
    Cli, ConsoleFormatter, OutputConfig, ProgressReporter, TranscriptProgress,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| config.logging.log_dir.as_ref().map(PathBuf::from));
    let _log_guard = init_tracing(cli.verbose, log_dir.as_ref());

    info!("Starting consult-sim");

    // Validate configuration
    let issues = config.validate();
    for issue in &issues {
        warn!("{}", issue.message);
    }
    if issues.iter().any(|i| i.is_error()) {
        let messages: Vec<_> = issues
            .iter()
            .filter(|i| i.is_error())
            .map(|i| i.message.as_str())
            .collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    let output = OutputConfig::resolve(
        cli.output.map(OutputFormat::from),
        config.output.format,
        config.output.color,
        cli.quiet,
    );
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let client_config = config.providers.openai.to_client_config();
    if client_config.api_key.is_none() {
        warn!(
            "No API key found in {} or providers.openai.api_key; requests will be unauthenticated",
            config.providers.openai.api_key_env
        );
    }
    let client = Arc::new(OpenAiCompletionClient::new(client_config)?);
    info!(endpoint = client.endpoint(), "Completion endpoint");
    let validator = Arc::new(TemplateFactValidator::new());
    let record_path = PathBuf::from(&config.consultation.record_path);
    let sink = Arc::new(JsonFileCaseSink::new(&record_path));

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_deref() {
            Some(path) => Arc::new(
                JsonlConversationLogger::open(path)
                    .with_context(|| format!("Failed to open conversation log {}", path))?,
            ),
            None => Arc::new(NoConversationLogger),
        };

    let use_case = RunConsultationUseCase::new(
        client,
        validator,
        sink,
        config.consultation.to_params(),
    )
    .with_conversation_logger(conversation_logger);

    let mut memory = config.memory.build_memory();
    info!(
        seeded = memory.len(),
        capacity = ?memory.capacity_limit(),
        "Case memory ready"
    );

    let progress: Box<dyn ProgressNotifier> = match (output.format, output.show_progress) {
        (OutputFormat::Transcript, true) => Box::new(TranscriptProgress),
        (OutputFormat::Json, true) => Box::new(ProgressReporter::new()),
        _ => Box::new(NoProgress),
    };

    if output.format == OutputFormat::Transcript {
        println!();
        println!("+============================================================+");
        println!("|           consult-sim - Clinical Consultation              |");
        println!("+============================================================+");
        println!();
        println!("Model: {}", use_case.params().model);
    }

    for run in 1..=cli.runs {
        if cli.runs > 1 && output.format != OutputFormat::Quiet {
            print!("{}", ConsoleFormatter::run_header(run, cli.runs));
        }

        let record = use_case
            .execute_with_progress(&mut memory, progress.as_ref())
            .await
            .with_context(|| format!("Consultation {} of {} failed", run, cli.runs))?;

        match output.format {
            OutputFormat::Transcript if !output.show_progress => {
                println!("{}", ConsoleFormatter::format(&record));
            }
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&record)),
            _ => {}
        }

        let saved = ConsoleFormatter::format_saved(&record_path.display().to_string());
        if output.status_to_stderr() {
            eprintln!("{}", saved);
        } else {
            println!("{}", saved);
        }
    }

    info!(remembered_cases = memory.len(), "Finished");

    Ok(())
}

/// Flags given on the command line take precedence over every config file.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.consultation.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.consultation.temperature = temperature;
    }
    if let Some(path) = &cli.record {
        config.consultation.record_path = path.display().to_string();
    }
    if cli.validate_schema {
        config.consultation.validate_medication_schema = true;
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.display().to_string());
    }
}

/// Initialize logging based on verbosity level.
///
/// With a log directory, output goes to a daily-rolling file through a
/// non-blocking writer whose guard must outlive the run.
fn init_tracing(verbose: u8, log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "consult-sim.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
