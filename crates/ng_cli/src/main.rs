use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};

use ng_agents::{ContentWriterAgent, ImageAgent, NewsScoutAgent, OpenAiChat, OpenAiImage};
use ng_core::{
    ArticleCollector, ArtifactSink, ChatModel, ContentWriter, Illustrator, ImageModel, Settings,
};
use ng_jobs::{ArtifactWriter, GenerateRequest, ItemPipeline, JobOrchestrator, JobStore};
use ng_sources::SourceManager;
use ng_web::AppState;

#[derive(Parser, Debug)]
#[command(name = "ng", author, version, about = "Generate branded LinkedIn posts from AI news", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    /// Fetch and filter news without generating anything
    Collect {
        #[arg(long, default_value_t = 5)]
        count: usize,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Generate posts and images synchronously
    Generate {
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Save the generated posts and images under the output directory
        #[arg(long)]
        save: bool,
        /// Explicit article URLs to use instead of fetched news
        #[arg(long = "url")]
        urls: Vec<String>,
    },
}

fn build_state(settings: &Settings) -> AppState {
    let chat: Arc<dyn ChatModel> = Arc::new(OpenAiChat::new(settings.openai_api_key.clone()));
    let image_model: Arc<dyn ImageModel> =
        Arc::new(OpenAiImage::new(settings.openai_api_key.clone()));
    let sources = Arc::new(SourceManager::new(settings));
    let collector: Arc<dyn ArticleCollector> =
        Arc::new(NewsScoutAgent::new(sources, chat.clone()));
    let writer: Arc<dyn ContentWriter> = Arc::new(ContentWriterAgent::new(chat.clone()));
    let illustrator: Arc<dyn Illustrator> =
        Arc::new(ImageAgent::new(chat, image_model, settings.clone()));
    let pipeline = Arc::new(ItemPipeline::new(writer, illustrator));
    let artifacts: Arc<dyn ArtifactSink> =
        Arc::new(ArtifactWriter::new(settings.output_dir.clone()));
    let orchestrator = JobOrchestrator::new(JobStore::new(), collector.clone(), pipeline, artifacts);
    AppState { orchestrator, collector }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    let state = build_state(&settings);

    match cli.command {
        Commands::Serve { addr } => {
            tokio::fs::create_dir_all(settings.images_dir()).await?;
            tokio::fs::create_dir_all(settings.posts_dir()).await?;
            info!("Starting news generation API...");
            ng_web::serve(state, addr).await?;
        }
        Commands::Collect { count, days } => {
            let collection = state.collector.fetch_and_filter(count, Some(days)).await?;
            println!(
                "Collected {} of {} raw article(s):",
                collection.filtered_count, collection.total_count
            );
            for article in &collection.articles {
                println!(
                    "  [{:.1}] {} ({})",
                    article.relevance_score, article.title, article.url
                );
            }
        }
        Commands::Generate { count, days, save, urls } => {
            let request = GenerateRequest {
                count,
                days,
                save_to_disk: save,
                selected_urls: urls,
                extra_urls: Vec::new(),
            };
            let items = state.orchestrator.generate_batch(request).await?;
            for item in &items {
                println!("Post #{}", item.post_index);
                println!("{}", item.post.content);
                println!("Hashtags: {}", item.post.hashtags.join(", "));
                if let Some(path) = item.image.image_path.as_deref() {
                    println!("Image: {}", path);
                } else if let Some(url) = item.image.image_url.as_deref() {
                    println!("Image URL: {}", url);
                }
                println!();
            }
        }
    }

    Ok(())
}
