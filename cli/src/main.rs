//! CLI entrypoint for council
//!
//! Wires the layers together: configuration -> roster -> gateway ->
//! request pipeline, then runs one request in plain or streaming mode.

mod args;
mod output;
mod progress;

use anyhow::Result;
use args::{Cli, OutputFormat};
use clap::Parser;
use council_application::{
    CompositeSink, KnowledgeRetriever, NoRetriever, ProgressSink, RequestEvent, RequestPipeline,
};
use council_domain::{Request, RequestOutcome};
use council_infrastructure::{
    ConfigLoader, ExamCouncil, FileConfig, HttpKnowledgeRetriever, HttpLlmGateway,
    JsonlTranscript, LlmCritic,
};
use output::ConsoleFormatter;
use progress::ConsoleProgress;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli);

    info!("starting council");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // === Dependency injection ===
    let roster = Arc::new(config.council.to_roster()?);
    let gateway = Arc::new(HttpLlmGateway::new(config.providers.clone())?);

    let retriever: Arc<dyn KnowledgeRetriever> = match &config.retrieval.endpoint {
        Some(endpoint) => Arc::new(HttpKnowledgeRetriever::new(
            endpoint.as_str(),
            config.retrieval.timeout_secs,
        )?),
        None => Arc::new(NoRetriever),
    };

    // The chair doubles as the compliance critic.
    let critic = Arc::new(LlmCritic::new(Arc::clone(&gateway), roster.chair().clone()));
    let exam_drafter = Arc::new(ExamCouncil::new(Arc::clone(&gateway), Arc::clone(&roster)));

    let pipeline = RequestPipeline::new(
        gateway,
        Arc::clone(&roster),
        retriever,
        critic,
        exam_drafter,
    );

    let request = Request::try_new(cli.question.clone(), cli.context.clone())?;

    if cli.stream {
        return run_streaming(pipeline, request, &config).await;
    }

    if !cli.quiet {
        println!();
        println!("{}", "council - multi-model deliberation".to_uppercase());
        println!("Question: {}", cli.question);
        println!(
            "Members: {} (chair: {})",
            roster
                .participants()
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            roster.chair().id
        );
        println!();
    }

    let mut sink = CompositeSink::new();
    if !cli.quiet {
        sink = sink.push(Arc::new(ConsoleProgress::new()));
    }
    if let Some(path) = &config.transcript.path
        && let Some(transcript) = JsonlTranscript::create(path)
    {
        sink = sink.push(Arc::new(transcript));
    }

    let outcome = pipeline.handle(request, &sink).await;
    render(&outcome, cli.output)?;
    Ok(())
}

/// Streaming mode: one JSON line per event, the terminal line carrying
/// the result or the error.
async fn run_streaming(
    pipeline: RequestPipeline<HttpLlmGateway>,
    request: Request,
    config: &FileConfig,
) -> Result<()> {
    let transcript = config
        .transcript
        .path
        .as_ref()
        .and_then(JsonlTranscript::create);

    let mut stream = Arc::new(pipeline).handle_streaming(request);
    let mut failure: Option<String> = None;

    while let Some(event) = stream.next_event().await {
        if let RequestEvent::Progress(progress) = &event
            && let Some(transcript) = &transcript
        {
            transcript.emit(progress.clone());
        }
        if let RequestEvent::Failed { message } = &event {
            failure = Some(message.clone());
        }
        println!("{}", serde_json::to_string(&event)?);
    }

    match failure {
        Some(message) => anyhow::bail!("request failed: {message}"),
        None => Ok(()),
    }
}

fn render(outcome: &RequestOutcome, format: OutputFormat) -> Result<()> {
    if !outcome.success {
        let message = outcome.error.as_deref().unwrap_or("request failed");
        anyhow::bail!("{message}");
    }
    let text = match format {
        OutputFormat::Full => ConsoleFormatter::format(outcome),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(outcome),
    };
    println!("{text}");
    Ok(())
}

/// Initialize logging from the verbosity flags; with `--log-file` the
/// subscriber writes through a non-blocking appender whose guard must
/// outlive `main`.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("council.log"));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    }
}
