use clap::Parser;
use nx_core::{Category, Result, SiteConfig};
use nx_search::BrowseState;
use nx_storage::StoreAccessor;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Parser, Debug)]
#[command(author, version, about = "NexusTopic article store and browse tools", long_about = None)]
struct Cli {
    /// Storage backend: fs, memory or sqlite (when compiled in)
    #[arg(long, default_value = "fs")]
    storage: String,

    /// Articles directory (fs) or database file (sqlite)
    #[arg(long, default_value = "articles")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the JSON API for the frontend
    Serve {
        #[arg(long, default_value = "3001")]
        port: u16,
    },
    /// Browse the article index in the terminal
    List {
        /// Filter by category label (case-insensitive)
        #[arg(long)]
        category: Option<Category>,
        /// Free-text search over title, description, keywords and topic
        #[arg(long)]
        query: Option<String>,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Print one article's metadata
    Show { slug: String },
    /// Print the closed category set
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = nx_storage::create_store(&cli.storage, &cli.path).await?;
    let accessor = StoreAccessor::new(store);
    info!("📚 Article store initialized (using {})", cli.storage);

    match cli.command {
        Commands::Serve { port } => {
            let config = SiteConfig::from_env();
            info!("🗞️ Serving {} on port {}", config.site_name, port);
            nx_web::serve(nx_web::AppState::new(accessor, config), port).await?;
        }
        Commands::List {
            category,
            query,
            page,
            page_size,
        } => {
            let state = BrowseState::default()
                .with_category(category)
                .with_query(query.unwrap_or_default())
                .with_page(page);

            let entries = accessor.index().await;
            let result = nx_search::browse(entries, &state, page_size.max(1));

            if result.total == 0 {
                println!("No articles match the active filters.");
                return Ok(());
            }

            for entry in &result.items {
                let topic = entry.topic.map(|t| t.label()).unwrap_or("UNTAGGED");
                println!(
                    "📰 [{}] {} ({} min) - {}",
                    topic, entry.title, entry.reading_time, entry.slug
                );
            }
            println!(
                "page {}/{} ({} articles)",
                result.page, result.total_pages, result.total
            );
        }
        Commands::Show { slug } => match accessor.article(&slug).await {
            Some(article) => {
                println!("{}", article.title);
                println!("slug:         {}", article.slug);
                if let Some(topic) = article.topic {
                    println!("topic:        {}", topic);
                }
                println!("author:       {}", article.author.name);
                println!("created:      {}", article.created_at.to_rfc3339());
                println!("reading time: {} min", article.reading_time);
                println!("word count:   {}", article.word_count);
                if !article.keywords.is_empty() {
                    println!("keywords:     {}", article.keywords.join(", "));
                }
                if let Some(source) = &article.source_data {
                    println!("source:       {} ({})", source.source, source.keyword);
                }
                println!();
                println!("{}", article.meta_description);
            }
            None => {
                eprintln!("Article not found: {}", slug);
                std::process::exit(1);
            }
        },
        Commands::Categories => {
            for category in Category::ALL {
                println!("{}", category.label());
            }
        }
    }

    Ok(())
}
