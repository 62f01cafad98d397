use rootcause::Report;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use welsh_bot::app::App;
use welsh_bot::config::WidgetConfig;
use welsh_bot::error::WidgetError;

#[tokio::main]
async fn main() -> Result<(), Report<WidgetError>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Optional config file path as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = WidgetConfig::load(config_path.as_deref()).map_err(|e| WidgetError::Config {
        details: e.to_string(),
    })?;
    tracing::info!(
        reply = %config.reply.kind,
        markup = ?config.markup,
        "Loaded configuration"
    );

    let mut app = App::new(&config, std::io::stdout());
    app.check_backend(&config).await;
    app.load_events().await;

    // Closed panel with an unread badge, as on page load
    println!("💬 Welsh BOT (1) · tape /open pour discuter, /help pour l'aide");

    app.run(BufReader::new(tokio::io::stdin())).await
}
