use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use newsfeed::cli::browse::{self, HELP};
use newsfeed::cli::{render, BrowseCommand, Cli, Commands};
use newsfeed::config::Config;
use newsfeed::services::{HeadlineUpdate, NewsService, PageOutcome, RequestStatus};
use newsfeed::sources::NewsApiSource;

type Service = NewsService<NewsApiSource>;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Using endpoint {}", config.base_url);

    let source = NewsApiSource::from_config(&config)?;
    let service = Arc::new(NewsService::new(source, config.api_key.clone()));

    match cli.command {
        Commands::Headline { category } => cmd_headline(&service, &category).await,
        Commands::Search { query, pages } => cmd_search(&service, &query, pages).await,
        Commands::Browse { query, category } => cmd_browse(service, query, category).await,
    }
}

async fn cmd_headline(service: &Service, category: &str) -> anyhow::Result<()> {
    match service.fetch_top_headline(category).await {
        HeadlineUpdate::Loaded(Some(article)) => {
            println!("{}", render::headline_banner(&article));
            Ok(())
        }
        HeadlineUpdate::Loaded(None) => {
            println!("No top headline for category '{}'.", category);
            Ok(())
        }
        HeadlineUpdate::Failed(err) => bail!("Top headline failed: {}", err),
    }
}

async fn cmd_search(service: &Service, query: &str, pages: u32) -> anyhow::Result<()> {
    println!("Searching for '{}'...\n", query);

    let mut loaded = 0;
    while loaded < pages {
        match service.request_page(query).await {
            PageOutcome::Loaded { received: 0 } => break,
            PageOutcome::Loaded { .. } => {
                loaded += 1;
                if service.is_at_last_page() {
                    break;
                }
            }
            PageOutcome::Failed => {
                if let RequestStatus::Error(err) = service.status() {
                    bail!("Search failed: {}", err);
                }
                bail!("Search failed");
            }
            PageOutcome::Skipped => break,
        }
    }

    let state = service.snapshot();
    if state.accumulated_articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    for (i, article) in state.accumulated_articles.iter().enumerate() {
        println!("{}", render::article_line(i + 1, article));
    }
    println!("\n{}", render::summary(&state));
    if !service.is_at_last_page() {
        println!("Next page: {} (use --pages to load more)", state.current_page);
    }

    Ok(())
}

async fn cmd_browse(
    service: Arc<Service>,
    query: String,
    category: String,
) -> anyhow::Result<()> {
    let status_view = browse::spawn_status_view(service.subscribe_status());
    let list_view = browse::spawn_list_view(service.subscribe_articles());
    let headline_view = browse::spawn_headline_view(service.subscribe_headline());

    // The banner loads alongside the first page
    let headline = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service.fetch_top_headline(&category).await;
        })
    };

    println!("{}\n", HELP);
    let mut query = query;
    service.request_page(&query).await;
    headline.await.context("top headline task failed")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("reading command from stdin")?
    {
        match BrowseCommand::parse(&line) {
            Ok(BrowseCommand::Next) => {
                if browse::should_load_more(&service.snapshot(), &service.status()) {
                    service.request_page(&query).await;
                } else {
                    println!("No more articles for '{}'.", query);
                }
            }
            Ok(BrowseCommand::Query(next)) => {
                query = next;
                service.request_page(&query).await;
            }
            Ok(BrowseCommand::Reset) => {
                service.reset();
                println!("Cleared. Press n to reload '{}'.", query);
            }
            Ok(BrowseCommand::Help) => println!("{}", HELP),
            Ok(BrowseCommand::Exit) => break,
            Err(e) => println!("{}", e),
        }
    }

    // Closing the signals lets the views drain and stop
    drop(service);
    for view in [status_view, list_view, headline_view] {
        view.await.context("view task failed")?;
    }

    Ok(())
}
