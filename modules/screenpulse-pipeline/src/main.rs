use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinedex_client::CinedexClient;
use murmur_client::MurmurClient;
use screenpulse_classify::{LexiconScorer, ModelClassifier};
use screenpulse_common::{Config, PipelineError};
use screenpulse_pipeline::orchestrator::{Pipeline, PipelineDeps};
use screenpulse_store::{PostStore, RatingStore};

#[derive(Parser)]
#[command(name = "screenpulse")]
#[command(about = "Audience sentiment ratings for movies, from social posts")]
#[command(version)]
struct Cli {
    /// Movie title to analyze
    subject: String,

    /// Maximum posts fetched from the social source this run
    #[arg(long)]
    fetch_limit: Option<u32>,

    /// Posts per storage page while scanning
    #[arg(long)]
    page_size: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("screenpulse=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    info!("ScreenPulse starting...");

    let pool = screenpulse_store::connect(&config.database_url)
        .await
        .map_err(|e| PipelineError::ConnectionFailed(e.to_string()))?;

    let ratings = RatingStore::new(pool.clone());

    let deps = PipelineDeps {
        source: Arc::new(MurmurClient::new(config.murmur_api_token.clone())),
        posts: Arc::new(PostStore::new(pool.clone())),
        scorer: Arc::new(LexiconScorer::new()),
        classifier: Arc::new(ModelClassifier::new(config.classifier_url.clone())),
        reference: Arc::new(CinedexClient::new(config.cinedex_api_key.clone())),
        ratings: Arc::new(RatingStore::new(pool)),
    };

    let pipeline = Pipeline::new(
        deps,
        cli.fetch_limit.unwrap_or(config.fetch_limit),
        cli.page_size.unwrap_or(config.page_size),
    );

    let record = pipeline.run(&cli.subject).await?;

    println!("{}", record.subject);
    println!("  lexicon   {:>4.1}  ({}+ / {}-)",
        record.lexicon_rating, record.lexicon_positive, record.lexicon_negative);
    println!("  model     {:>4.1}  ({}+ / {}-)",
        record.model_rating, record.model_positive, record.model_negative);
    println!("  reference {:>4.1}", record.reference_rating);

    let history = ratings.for_subject(&cli.subject).await?;
    if history.len() > 1 {
        println!("\nprevious runs:");
        for past in history.iter().skip(1) {
            println!(
                "  {}  lexicon {:.1}  model {:.1}  reference {:.1}",
                past.created_at.format("%Y-%m-%d %H:%M"),
                past.lexicon_rating,
                past.model_rating,
                past.reference_rating
            );
        }
    }

    Ok(())
}
