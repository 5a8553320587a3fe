pub mod access;
pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod listing;
pub mod render;
pub mod source;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use error::Result;
use render::StyledRenderer;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("NEWSLETTER_LOG"))
        .init();

    if let Err(e) = serve().await {
        tracing::error!(%e, "newsletter server stopped");
        std::process::exit(1);
    }
}

async fn serve() -> Result<()> {
    let config = Config::from_env()?;

    let app = AppState::new(
        config.source()?,
        StyledRenderer,
        config.subscription()?,
    );

    api::run_server(app, config.addr).await
}
