// Allow common clippy pedantic lints
#![allow(clippy::needless_pass_by_value)]

//! Profile API server
//!
//! Binds the HTTP server with configuration from the environment.

use clap::Parser;
use profile_api::auth::StaticTokenVerifier;
use profile_api::config::Config;
use profile_api::server::{self, AppState};
use profile_api::store::MemoryStore;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "profile-api", version, about = "Content-negotiated profile service")]
struct Cli {
    /// Override the listen port from the environment
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> profile_api::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let mut verifier = StaticTokenVerifier::new();
    for (token, uid) in &config.auth_tokens {
        verifier = verifier.with_token(token.clone(), uid.clone());
    }

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        verifier: Arc::new(verifier),
    };

    server::serve(&config, state).await
}
