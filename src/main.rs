use clap::Parser;
use pantrychef::app::Application;
use pantrychef::cli::{Args, Command};
use pantrychef::config::{Config, Provider};
use pantrychef::core::error::ChefError;
use pantrychef::display;
use pantrychef::providers::factory::ProviderFactory;
use tracing_subscriber::EnvFilter;

fn init_tracing(args: &Args) {
    let default_level = if args.verbose || matches!(args.command, Command::Serve { .. }) {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pantrychef={},pchef={}", default_level, default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), ChefError> {
    let config = Config::load()?;

    let provider_kind = match &args.provider {
        Some(name) => Provider::from_str(name)
            .ok_or_else(|| ChefError::Config(format!("Unsupported provider: {}", name)))?,
        None => config.active_provider.unwrap_or_default(),
    };

    let mut provider_config = config.provider_config(provider_kind);
    if let Some(model) = &args.model {
        provider_config.model = Some(model.clone());
    }
    if let Some(image_model) = &args.image_model {
        provider_config.image_model = Some(image_model.clone());
    }

    let provider = ProviderFactory::new().create(
        &provider_kind,
        &provider_config,
        config.request_timeout(),
    )?;
    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Provider ready"
    );

    let mut app = Application::new(args, config, provider);
    app.run().await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "pchef failed");
        match e {
            ChefError::Config(_) | ChefError::Io { .. } => eprintln!("{}", e),
            _ => display::display_error(&e),
        }
        std::process::exit(1);
    }
}
