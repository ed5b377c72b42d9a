use clap::Parser;
use smartcareer::app::Application;
use smartcareer::cli::Args;
use smartcareer::commands::create_command_registry;
use smartcareer::config::Config;
use smartcareer::core::error::AdvisorError;
use smartcareer::display;
use smartcareer::providers::LLMProvider;
use smartcareer::providers::gemini::GeminiProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "smartcareer=info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        display::display_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AdvisorError> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.validate()?;

    let api_key = Config::api_key_from_env()?;
    let provider: Arc<dyn LLMProvider> = Arc::new(GeminiProvider::with_endpoint(
        config.base_url.clone(),
        api_key,
        config.model.clone(),
        config.timeout(),
    )?);
    tracing::info!(model = %config.model, "advice service ready");

    let mut app = Application::new(&config, provider, create_command_registry());
    app.run().await
}
