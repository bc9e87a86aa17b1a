use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use md_image_relay::ImageRelayPlugin;
use md_image_relay::application::SelfTestUseCase;
use md_image_relay::domain::{InboundMessage, MessageSinkPort, OutgoingMessage};
use md_image_relay::infrastructure::{
    AppConfig, CliArgs, DirectorySink, StdoutSink, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new().wrap_err("failed to locate config directory")?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("failed to load configuration")?;
    config.merge_with_args(args);
    Ok(config)
}

async fn create_sink(args: &CliArgs) -> Result<Arc<dyn MessageSinkPort>> {
    let sink: Arc<dyn MessageSinkPort> = match &args.output_dir {
        Some(dir) => Arc::new(DirectorySink::create(dir.clone()).await?),
        None => Arc::new(StdoutSink::new()),
    };
    Ok(sink)
}

async fn read_message(args: &CliArgs) -> Result<String> {
    if let Some(message) = &args.message {
        return Ok(message.clone());
    }

    let mut message = String::new();
    tokio::io::stdin()
        .read_to_string(&mut message)
        .await
        .wrap_err("failed to read message from stdin")?;
    Ok(message)
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM signal"),
                _ = sigint.recv() => info!("Received SIGINT signal (Ctrl+C)"),
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Could not register signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = md_image_relay::VERSION, "Starting {}", md_image_relay::NAME);

    let sink = create_sink(&args).await?;

    if args.self_test {
        SelfTestUseCase::new(sink).execute().await?;
        return Ok(());
    }

    let text = read_message(&args).await?;
    let plugin = ImageRelayPlugin::start(&config)?;

    let message = InboundMessage::new(text).with_origin("cli");
    let outcome = plugin
        .handle_until(&message, sink.as_ref(), wait_for_signal())
        .await;

    if outcome.as_ref().is_some_and(|o| !o.is_processed()) {
        // Not intercepted: deliver the message unchanged.
        if let Err(e) = sink.send(OutgoingMessage::text(message.text())).await {
            warn!(error = %e, "Failed to deliver message");
        }
    }

    plugin.stop().await;

    Ok(())
}
