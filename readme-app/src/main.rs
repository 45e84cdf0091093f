mod args;

use crate::args::{Args, Command};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{info, warn};
use readme_lib::{router, Config, GenerateOptions, ReadmeService};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, SocketAddr::new(args.bind_address, args.port)).await,
        Command::Generate {
            url,
            no_existing_readme,
            no_contributors,
            limit_file_parsing,
        } => {
            let options = GenerateOptions {
                include_existing_readme: !no_existing_readme,
                limit_file_parsing,
                include_contributors: !no_contributors,
            };
            generate(&config, &url, &options).await
        }
    }
}

async fn serve(config: &Config, addr: SocketAddr) -> Result<()> {
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN is not set; GitHub API calls are unauthenticated");
    }

    let app = router(ReadmeService::from_config(config)?, config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn generate(config: &Config, url: &str, options: &GenerateOptions) -> Result<()> {
    let service = ReadmeService::from_config(config)?;
    let envelope = service.generate(Some(url), options).await?;
    let meta = &envelope.meta;

    eprintln!(
        "{} [{}] {} stars, {} forks, {}",
        meta.name.yellow(),
        meta.url,
        meta.stars,
        meta.forks,
        meta.license,
    );
    eprintln!(
        "{}",
        meta.languages_breakdown
            .iter()
            .map(|(language, pct)| format!("{language} {pct}%"))
            .collect::<Vec<_>>()
            .join(", ")
            .cyan()
    );

    println!("{}", envelope.generated_readme);

    Ok(())
}
