use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::cli::render;
use crate::errors::{NewsError, NewsResult};
use crate::services::{ArticleList, HeadlineUpdate, PaginationState, RequestStatus};

pub const HELP: &str = "Commands: n (or empty line) = load more, q <text> = new search, r = reset, h = help, x = exit";

/// One line of input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Scrolled to the bottom of the list.
    Next,
    Query(String),
    Reset,
    Help,
    Exit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> NewsResult<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" | "n" | "next" => Ok(BrowseCommand::Next),
            "q" | "query" if !rest.is_empty() => Ok(BrowseCommand::Query(rest.to_string())),
            "q" | "query" => Err(NewsError::InvalidInput(
                "query must not be empty".to_string(),
            )),
            "r" | "reset" => Ok(BrowseCommand::Reset),
            "h" | "help" | "?" => Ok(BrowseCommand::Help),
            "x" | "exit" | "quit" => Ok(BrowseCommand::Exit),
            other => Err(NewsError::InvalidInput(format!(
                "Unknown command '{}'",
                other
            ))),
        }
    }
}

/// Scroll gate: load more unless a request is pending or everything the
/// endpoint reported is already shown. An empty list always loads.
pub fn should_load_more(state: &PaginationState, status: &RequestStatus) -> bool {
    if status.is_loading() {
        return false;
    }
    state.accumulated_articles.is_empty() || !state.is_at_last_page()
}

/// Print status transitions until the service goes away.
pub fn spawn_status_view(mut statuses: UnboundedReceiver<RequestStatus>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(status) = statuses.recv().await {
            if let Some(line) = render::status_line(&status) {
                println!("{}", line);
            }
        }
    })
}

/// Print newly arrived articles; a shrinking list is treated as cleared.
pub fn spawn_list_view(mut lists: UnboundedReceiver<ArticleList>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut shown = 0;
        while let Some(list) = lists.recv().await {
            for line in new_lines(&list, &mut shown) {
                println!("{}", line);
            }
        }
    })
}

pub fn spawn_headline_view(mut headlines: UnboundedReceiver<HeadlineUpdate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = headlines.recv().await {
            match update {
                HeadlineUpdate::Loaded(Some(article)) => {
                    println!("{}\n", render::headline_banner(&article))
                }
                HeadlineUpdate::Loaded(None) => println!("No top headline available\n"),
                HeadlineUpdate::Failed(err) => println!("Top headline unavailable: {}\n", err),
            }
        }
    })
}

fn new_lines(list: &ArticleList, shown: &mut usize) -> Vec<String> {
    let mut lines = Vec::new();

    if list.articles.len() < *shown {
        lines.push("-- list cleared --".to_string());
        *shown = 0;
    }

    for (i, article) in list.articles.iter().enumerate().skip(*shown) {
        lines.push(render::article_line(i + 1, article));
    }

    if list.articles.len() > *shown {
        lines.push(render::progress_line(list.articles.len(), list.total_results));
    }
    *shown = list.articles.len();

    lines
}
