use clap::{Parser, Subcommand};

pub const DEFAULT_CATEGORY: &str = "business";
pub const DEFAULT_QUERY: &str = "Bank";

#[derive(Parser)]
#[command(name = "newsfeed")]
#[command(about = "News client with paginated search and a top headline banner")]
#[command(version)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the top headline for a category
    Headline {
        /// Headline category (business, technology, sports, ...)
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },

    /// Search articles and print the accumulated pages
    Search {
        /// Search term
        #[arg(value_parser = parse_query)]
        query: String,

        /// Maximum number of pages to load
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Interactive session: headline banner plus a list that loads more on demand
    Browse {
        /// Initial search term
        #[arg(short, long, default_value = DEFAULT_QUERY, value_parser = parse_query)]
        query: String,

        /// Category for the headline banner
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
}

/// Queries must contain something besides whitespace.
pub fn parse_query(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err("query must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
