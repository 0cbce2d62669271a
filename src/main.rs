use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use travel_planner::config::Config;
use travel_planner::credential::Credential;
use travel_planner::planner::{Planner, Query};
use travel_planner::web::{self, AppState, Session};
use travel_planner::LlmOverride;

#[derive(Parser)]
#[command(
    name = "travel-planner",
    about = "AI-powered travel planner — cab, train, bus and flight options between two places"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the travel planner web form
    Serve {
        /// Path to config file
        #[arg(short, long, default_value = "travel-planner.toml")]
        config: PathBuf,

        /// Path to the API key file (overrides credential.path)
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// LLM provider override: gemini, anthropic, openrouter, openai
        #[arg(long)]
        provider: Option<String>,

        /// LLM model override
        #[arg(long)]
        model: Option<String>,
    },

    /// Ask for travel options once and print them as JSON
    Plan {
        /// Where the trip starts
        source: String,

        /// Where the trip ends
        destination: String,

        /// Path to config file
        #[arg(short, long, default_value = "travel-planner.toml")]
        config: PathBuf,

        /// Path to the API key file (overrides credential.path)
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// LLM provider override: gemini, anthropic, openrouter, openai
        #[arg(long)]
        provider: Option<String>,

        /// LLM model override
        #[arg(long)]
        model: Option<String>,
    },
}

fn load_config(
    path: &Path,
    provider: Option<String>,
    model: Option<String>,
) -> Result<Config> {
    let mut cfg = Config::load_or_default(path)?;
    if let Some(llm_override) = LlmOverride::from_args(provider, model) {
        llm_override.apply(&mut cfg.llm);
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("travel_planner=info,tower_http=info")
                }),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            key_file,
            bind,
            provider,
            model,
        } => {
            let cfg = load_config(&config, provider, model)?;
            let key_path = key_file.unwrap_or_else(|| cfg.credential.path.clone());
            let session = Session::from_config(&cfg, &key_path)?;
            let addr = bind.unwrap_or(cfg.server.bind);
            web::serve(AppState::new(session), addr)
                .await
                .with_context(|| format!("web server on {addr}"))?;
            Ok(())
        }
        Command::Plan {
            source,
            destination,
            config,
            key_file,
            provider,
            model,
        } => {
            let cfg = load_config(&config, provider, model)?;
            let key_path = key_file.unwrap_or_else(|| cfg.credential.path.clone());
            let credential = Credential::load(&key_path)?;
            let query = Query::new(&source, &destination)?;
            let planner = Planner::from_config(&cfg, &credential)?;
            let outcome = planner.plan(&query).await?;
            let json = serde_json::to_string_pretty(&outcome)?;
            println!("{json}");
            Ok(())
        }
    }
}
