use clap::Parser;
use livebrief::application::chat::ChatRequest;
use livebrief::cli::commands::{Cli, Commands};
use livebrief::config::AppConfig;
use livebrief::LiveBrief;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let app = Arc::new(LiveBrief::new(&config));

    match cli.command {
        Commands::Serve => {
            // Initial write before anything is served, so readers never race
            // a missing file during the first interval.
            match app.produce_once().await {
                Ok(snap) => tracing::info!(
                    "initial snapshot @ {}",
                    snap.ts_utc.as_deref().unwrap_or("-")
                ),
                Err(e) => tracing::warn!("initial snapshot failed: {e}"),
            }
            let _loops = app.spawn_background();
            livebrief::api::routes::serve(app, &config.bind_addr).await?;
        }
        Commands::Snapshot => {
            let snapshot = app.produce_once().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Index => {
            let report = app.update_index().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.ok {
                std::process::exit(1);
            }
        }
        Commands::Live { max_stale_sec } => {
            let view = app.live(max_stale_sec).await;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Search { query, k } => {
            let hits = app.rag_search(&query, k.clamp(1, 10)).await?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Chat {
            message,
            no_live,
            no_rag,
            rag_k,
            symbols,
        } => {
            let request = ChatRequest {
                message,
                include_live: !no_live,
                include_rag: !no_rag,
                rag_k,
                symbols,
            };
            let reply = app.chat(&request).await?;
            println!("{reply}");
        }
    }

    Ok(())
}
