mod analyze;
mod config;
mod pipeline;
mod scrape;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use job_scraper::{SessionPool, WebDriverSession};
use text_analyzer::wordcloud::WordCloud;

use crate::config::Config;
use crate::types::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file, built-in defaults are used without one
    #[clap(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Scrape listings and descriptions, then draw a word cloud per job
    Run {},
    /// Only scrape the listings into CSV files
    Scrape {},
    /// Fetch descriptions for existing CSV files and draw the word clouds
    Analyze {},
}

async fn execute(
    command: Commands,
    pool: &SessionPool<WebDriverSession>,
    config: &Config,
) -> Result<()> {
    match command {
        Commands::Scrape {} => {
            let files = scrape::scrape(pool.primary(), config).await?;
            log::info!("{} listing files written", files.len());
        }
        Commands::Run {} | Commands::Analyze {} => {
            let renderer = WordCloud::new(config.word_cloud.clone(), &config.output_dir)?;
            let rescrape = matches!(command, Commands::Run {});
            let clouds = pipeline::run(pool, &renderer, config, rescrape).await?;
            log::info!("{} word clouds written", clouds.len());
        }
    }
    Ok(())
}

async fn start(args: Cli) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let workers = match args.command {
        Commands::Scrape {} => 1,
        _ => config.scrape.workers,
    };
    let pool = SessionPool::connect(&config.browser, workers).await?;

    let result = execute(args.command, &pool, &config).await;
    if let Err(e) = pool.close().await {
        log::warn!("failed to close browser sessions: {}", e);
    }
    result
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();
    if let Err(e) = start(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
