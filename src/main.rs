use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use changecast::api::{self, AppState};
use changecast::config::Config;
use changecast::db::Database;
use changecast::github::GitHubClient;
use changecast::llm::NotesClient;

#[derive(Parser)]
#[command(name = "ccast")]
#[command(about = "Release note generation server for merged pull requests")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the changecast server
    Serve {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "changecast=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let db = Database::open_default()?;
    db.migrate()?;

    let state = AppState {
        db,
        github: Arc::new(GitHubClient::new(config.github)),
        notes: Arc::new(NotesClient::new(config.notes)),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("changecast server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await,
        None => serve(3000).await,
    }
}
