use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use wordwise_app::controller::AppController;
use wordwise_app::io::spawn_input_reader;
use wordwise_app::profile::load_profile;
use wordwise_app::shell::HELP;
use wordwise_app::state::AppState;
use wordwise_config::Config;
use wordwise_config::backend::BackendKind;
use wordwise_io::clipboard::SystemClipboard;
use wordwise_types::ResultShape;

/// Look up words: translation, meaning and usage examples.
#[derive(Parser)]
#[command(name = "wordwise", version)]
struct Args {
    /// Result shape: structured word lookup or plain-text translation
    #[arg(long)]
    shape: Option<ResultShape>,
    /// Translation backend: http or stub
    #[arg(long)]
    backend: Option<BackendKind>,
    /// Base URL of the lookup service
    #[arg(long)]
    backend_url: Option<String>,
    /// JSON profile to load instead of the environment
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,wordwise=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.profile {
        Some(path) => load_profile(path)?,
        None => Config::new(),
    };

    if let Some(shape) = args.shape {
        config.set_shape(shape);
    }
    if let Some(backend) = args.backend {
        config.backend.kind = backend;
    }
    if let Some(url) = &args.backend_url {
        config.network.base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;
    let queue_capacity = config.event_queue_capacity.max(1);

    let state = Arc::new(AppState::from_config(config)?);
    let controller = AppController::new(state, queue_capacity);

    println!("{HELP}\n");
    let mut tasks = controller.spawn_tasks(Box::new(SystemClipboard::new()));
    spawn_input_reader(
        tokio::runtime::Handle::current(),
        controller.event_sender(),
        controller.notice_sender(),
        controller.cancel_token(),
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("task finished"),
                Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("task failed during shutdown: {e:#}");
        }
    }

    Ok(())
}
