use tracing_subscriber::EnvFilter;

use talentdesk::commands;
use talentdesk::config::Settings;
use talentdesk::error::AppError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    if let Err(err) = run().await {
        let presentation = err.to_presentation();
        eprintln!("{}: {}", presentation.title, presentation.message);
        if let Some(action) = presentation.action {
            eprintln!("  -> {action}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::new()?;
    commands::run(settings).await
}
