use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wortschatz_config::Config;
use wortschatz_core::{Generator, Pipeline, PromptTemplate, RunSummary, WordStore, load_words};
use wortschatz_llm::{OpenAiBackend, StructuredCompletion};

mod cli;

use self::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wortschatz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Credential check happens before anything else is touched
    let config = Config::from_env().context("Configuration error")?;
    let config = args.apply(config).context("Configuration error")?;

    let words = load_words(&args.words_file)
        .with_context(|| format!("Failed to read {}", args.words_file.display()))?;
    tracing::info!("Loaded {} words", words.len());

    let template = PromptTemplate::load(&config.store.prompt_file).with_context(|| {
        format!(
            "Failed to read prompt template {}",
            config.store.prompt_file.display()
        )
    })?;

    let backend = OpenAiBackend::new(&config.backend).context("Failed to create HTTP client")?;
    let metadata = backend.metadata();
    tracing::info!("Using {} model {}", metadata.provider, metadata.model);

    let pipeline = Pipeline::new(
        Generator::new(Box::new(backend), config.backend.max_retries),
        WordStore::new(&config.store.data_dir),
        template,
        args.run_options(),
    );

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        summary = pipeline.run(&words) => report(&summary),
        _ = shutdown => {
            tracing::warn!("Shutdown requested, batch interrupted; words already saved are kept");
        }
    }

    Ok(())
}

fn report(summary: &RunSummary) {
    tracing::info!(
        "Done! saved: {}, skipped: {}, failed: {}",
        summary.saved,
        summary.skipped,
        summary.failed.len()
    );

    if !summary.failed.is_empty() {
        tracing::warn!("Failed words: {}", summary.failed.join(", "));
    }
}
