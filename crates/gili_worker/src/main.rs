//! gili-worker binary.
//!
//! - `run`: consume the work queue, evaluate stories, persist feedback
//! - `evaluate`: run the pipeline on a local file and print the result

use clap::Parser;
use gili_core::StoryInput;
use gili_models::OpenAiClient;
use gili_pipeline::Pipeline;
use gili_worker::{GiliConfig, ObservabilityConfig, init_observability};
use std::path::Path;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GiliConfig::load(cli.config.as_deref())?;

    let observability = ObservabilityConfig::from_settings(&config.observability)
        .with_json_logs(config.observability.json_logs || cli.json_logs);
    init_observability(&observability).map_err(|e| anyhow::anyhow!("{e}"))?;

    match cli.command {
        Commands::Run => run(&config).await,
        Commands::Evaluate {
            file,
            age_level,
            title,
        } => evaluate(&config, &file, age_level, title).await,
    }
}

#[cfg(feature = "amqp")]
async fn run(config: &GiliConfig) -> anyhow::Result<()> {
    use gili_database::{PostgresStoryRepository, establish_connection};
    use gili_worker::{AmqpBroker, Worker};

    let client = OpenAiClient::new(config.openai_config()?)?;
    let pipeline = Pipeline::new(client, &config.evaluator_config());
    let repository = PostgresStoryRepository::new(establish_connection(&config.database.url)?);
    let broker = AmqpBroker::connect(&config.broker).await?;

    let mut worker = Worker::new(pipeline, repository, broker);
    tracing::info!(queue = %config.broker.queue, "Worker started");

    let handled = worker
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    tracing::info!(handled, "Worker stopped");
    worker.into_broker().close().await?;
    Ok(())
}

#[cfg(not(feature = "amqp"))]
async fn run(_config: &GiliConfig) -> anyhow::Result<()> {
    anyhow::bail!("gili-worker was built without the `amqp` feature")
}

async fn evaluate(
    config: &GiliConfig,
    file: &Path,
    age_level: gili_core::AgeLevel,
    title: Option<String>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;

    let mut builder = StoryInput::builder();
    builder
        .story_id(file.display().to_string())
        .user_id("local")
        .content(content)
        .age_level(age_level);
    if let Some(title) = title {
        builder.prompt_title(title);
    }
    let story = builder.build()?;

    let client = OpenAiClient::new(config.openai_config()?)?;
    let pipeline = Pipeline::new(client, &config.evaluator_config());
    let result = pipeline.run(story).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
