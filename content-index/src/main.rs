use anyhow::Context;
use clap::{Parser, Subcommand};
use content_index::{
    handlers, ContentProvider, DirectorySource, FeedFormat, HttpSource, HttpSourceConfig, SiteBuilder,
    SiteConfig,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "content-index", about = "Builds search indexes, related links and feeds from articles")]
struct Cli {
    /// Directory of Markdown articles (defaults to $CONTENT_DIR, then src/content/articles)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// URL serving a JSON array of articles, used instead of --content
    #[arg(long, global = true, conflicts_with = "content")]
    content_url: Option<String>,

    /// Site configuration in TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides site_url from the configuration
    #[arg(long, global = true)]
    site_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write search.json, atom.xml, rss.xml, related.json and taxonomy.json
    Build {
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// Print the search index payload
    SearchIndex,
    /// Print the articles related to one slug
    Related {
        slug: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print a feed document
    Feed {
        #[arg(long, value_enum, default_value = "atom")]
        format: FeedFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut site = match &cli.config {
        Some(path) => SiteConfig::from_toml_file(path)
            .await
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(site_url) = &cli.site_url {
        site = site.with_site_url(site_url)?;
    }

    let provider: Arc<dyn ContentProvider> = match &cli.content_url {
        Some(url) => Arc::new(HttpSource::new(url, HttpSourceConfig::default())?),
        None => {
            let dir = cli.content.clone().unwrap_or_else(|| {
                PathBuf::from(env::var("CONTENT_DIR").unwrap_or_else(|_| "src/content/articles".to_string()))
            });
            Arc::new(DirectorySource::new(dir))
        }
    };
    info!("Using content source {}", provider.source_name());

    let builder = SiteBuilder::new(provider, site);

    match cli.command {
        Command::Build { out } => {
            let output = builder.build().await.context("build failed")?;
            let written = output.write_to(&out).await?;
            info!("Build complete: {}", written.join(", "));
        }
        Command::SearchIndex => {
            let response = handlers::search_index(builder.provider()).await;
            println!("{}", response.body);
            if !response.is_success() {
                anyhow::bail!("search index endpoint returned {}", response.status);
            }
        }
        Command::Related { slug, limit } => {
            let limit = limit.unwrap_or(builder.site().related_limit);
            match builder.related_to(&slug, limit).await? {
                Some(items) => {
                    for item in items {
                        println!("{}\t{}", item.slug, item.title);
                    }
                }
                None => {
                    error!("No published article with slug {}", slug);
                    anyhow::bail!("unknown slug: {}", slug);
                }
            }
        }
        Command::Feed { format } => {
            let response = handlers::feed(builder.provider(), builder.site(), format).await?;
            print!("{}", response.body);
        }
    }

    Ok(())
}
